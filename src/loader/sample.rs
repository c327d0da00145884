//! Bundled sample inventory.

use crate::error::{ErrorContext, Result};
use std::path::Path;

/// Default file name used by `eosl-inventory sample`.
pub const SAMPLE_FILE_NAME: &str = "sample_inventory.csv";

/// Eight-server inventory used when no file is given or loading fails.
pub const SAMPLE_INVENTORY: &str = "\
hostname,asset_tag,environment,owner,team,location,hardware_vendor,hardware_model,serial,os_name,os_version,end_of_service_date,microcode_version,firmware_version,last_audit,notes,owner_email
web-01,AT-1001,prod,alice,web,dc1,HPE,DL560 Gen9,SN1001,Windows Server,2016,2028-12-31,2.45,FW1.2.3,2025-08-01,web app,alice@example.com
db-01,AT-1002,prod,bob,db,dc1,HPE,DL380 Gen10,SN1002,RHEL,7.9,2024-11-30,1.12,FW2.0.1,2025-07-01,urgent upgrade,bob@example.com
app-qa-03,AT-2001,qa,charlie,app,dc2,Custom,Custom-2U,SN1003,Ubuntu,18.04,2028-05-15,3.01,FW3.1.0,2025-09-01,scheduled,charlie@example.com
backup-01,AT-3001,prod,david,backup,dc2,HPE,DL360 Gen9,SN1004,CentOS,7.6,2023-06-30,,FW2.2.0,2024-12-01,missing microcode,david@example.com
edge-01,AT-4001,edge,eva,edge,site1,CISCO,XR-5000,SN1005,RouterOS,6.47,2025-10-01,4.0,FW4.0.1,2025-01-10,-,eva@example.com
oracle-db,AT-5001,prod,frank,db,dc3,ORACLE,Sun-X8,SN2001,Solaris,11.3,2024-10-15,1.0,FW1.0.0,2024-09-01,legacy,frank@example.com
aix-01,AT-6001,prod,grace,infra,dc1,IBM,P770,SN3001,AIX,7.1,2025-08-15,2.0,FW2.5,2025-02-10,planning migration,grace@example.com
old-win,AT-7001,prod,harry,app,dc1,DELL,R740,SN4001,Windows Server,2012,2023-01-01,1.1,FW1.1,2023-01-01,very old,harry@example.com
";

/// Write the sample inventory to `path`, overwriting any existing file.
pub fn write_sample(path: &Path) -> Result<()> {
    std::fs::write(path, SAMPLE_INVENTORY)
        .with_context(|| format!("writing sample inventory to {}", path.display()))?;
    tracing::info!("Sample inventory written to {}", path.display());
    Ok(())
}
