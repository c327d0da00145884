//! Operator actions on inventory rows.
//!
//! - [`contact_owner`] prepares a `mailto:` link and has no side effects.
//! - [`mark_intimated`] and [`mark_intimated_bulk`] append to the change log.
//! - [`ticket_for`] and [`write_tickets`] produce ticket CSV rows.
//!
//! A failed change log write is returned to the caller; rows in memory are
//! never modified by an action.

mod contact;
mod intimate;
mod ticket;

pub use contact::{contact_owner, mailto_url, percent_encode, ContactLink};
pub use intimate::{default_note, mark_intimated, mark_intimated_bulk, BulkIntimateError};
pub use ticket::{ticket_for, write_tickets, Priority, Ticket, TICKET_HEADER};
