//! Data model for server inventory and the audit trail.
//!
//! An inventory file is loaded into [`InventoryRecord`]s whose derived
//! fields ([`EoslStatus`] and [`FirmwareFlags`]) are recomputed by every
//! classification pass. Operator actions are recorded as
//! [`ChangeLogEntry`] rows in an append-only change log.

mod change_log;
mod record;
mod status;
mod vocab;

pub use change_log::*;
pub use record::*;
pub use status::*;
pub use vocab::*;
