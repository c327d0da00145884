//! Owner contact links.

use crate::model::InventoryRecord;
use serde::Serialize;

/// A prepared e-mail to the owner of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub hostname: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// `mailto:` URL with percent-encoded subject and body
    pub url: String,
}

/// Build the contact e-mail for a row.
///
/// The recipient is `owner_email`, or the `owner` field when no e-mail is
/// recorded. Returns `None` when neither is present.
#[must_use]
pub fn contact_owner(record: &InventoryRecord, actor: &str) -> Option<ContactLink> {
    let recipient = record.contact_address()?.to_string();
    let subject = format!(
        "Action required: {} - EOSL {}",
        record.hostname, record.status
    );
    let body = contact_body(record, actor);
    let url = mailto_url(&recipient, &subject, &body);
    Some(ContactLink {
        hostname: record.hostname.clone(),
        recipient,
        subject,
        body,
        url,
    })
}

fn contact_body(record: &InventoryRecord, actor: &str) -> String {
    let greeting = if record.owner.trim().is_empty() {
        "Hi,".to_string()
    } else {
        format!("Hi {},", record.owner.trim())
    };
    let asset = if record.asset_tag.is_empty() {
        String::new()
    } else {
        format!(" (asset {})", record.asset_tag)
    };
    let eosl_date = if record.eosl_date_raw.trim().is_empty() {
        "not recorded"
    } else {
        record.eosl_date_raw.trim()
    };

    format!(
        "{greeting}\n\
         \n\
         This message is regarding server {host}{asset}:\n\
         \n\
         - Vendor/Model: {vendor_model}\n\
         - OS: {os}\n\
         - EOSL date: {eosl_date} (Status: {status})\n\
         - Firmware: {firmware}\n\
         - Microcode: {microcode}\n\
         \n\
         Recommended actions:\n\
         1) Validate workloads and schedule replacement/upgrade.\n\
         2) If already actioned, update the inventory and notify ops.\n\
         \n\
         Regards,\n\
         {actor}\n",
        host = record.hostname,
        vendor_model = record.vendor_model(),
        os = record.os_display(),
        status = record.status,
        firmware = record.firmware_display(),
        microcode = record.microcode_display(),
    )
}

/// Build a `mailto:` URL. The recipient is left as-is; query values are
/// percent-encoded.
#[must_use]
pub fn mailto_url(recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        percent_encode(subject),
        percent_encode(body)
    )
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
///
/// # Examples
///
/// ```
/// use eosl_inventory::actions::percent_encode;
///
/// assert_eq!(percent_encode("EOSL soon & now"), "EOSL%20soon%20%26%20now");
/// assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
/// ```
#[must_use]
pub fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(char::from(byte));
            }
            _ => result.push_str(&format!("%{byte:02X}")),
        }
    }
    result
}
