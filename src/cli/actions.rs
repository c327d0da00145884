//! Contact and mark-intimated command handlers.

use super::{find_host, report_pipeline_error, require_requested_inventory};
use crate::actions::{contact_owner, mark_intimated, mark_intimated_bulk};
use crate::changelog::ChangeLogStore;
use crate::config::{ContactConfig, IntimateConfig, IntimateTarget};
use crate::pipeline::{self, exit_codes, PipelineError};
use anyhow::{Context, Result};

/// Run the contact command: print the owner mail draft and its `mailto:` link.
#[allow(clippy::needless_pass_by_value)]
pub fn run_contact(config: ContactConfig) -> Result<i32> {
    let snapshot = pipeline::run(&config.pipeline)?;
    if let Err(err) = require_requested_inventory(&snapshot) {
        return Ok(report_pipeline_error(&err));
    }
    let record = match find_host(&snapshot, &config.hostname) {
        Ok(record) => record,
        Err(err) => return Ok(report_pipeline_error(&err)),
    };

    let Some(link) = contact_owner(record, &config.actor) else {
        tracing::warn!("{} has no owner or owner email to contact", record.hostname);
        return Ok(exit_codes::NOT_FOUND);
    };

    println!("To: {}", link.recipient);
    println!("Subject: {}", link.subject);
    println!();
    println!("{}", link.body);
    println!();
    println!("{}", link.url);
    Ok(exit_codes::SUCCESS)
}

/// Run the intimate command for one host or every filtered row.
#[allow(clippy::needless_pass_by_value)]
pub fn run_intimate(config: IntimateConfig) -> Result<i32> {
    let snapshot = pipeline::run(&config.pipeline)?;
    if let Err(err) = require_requested_inventory(&snapshot) {
        return Ok(report_pipeline_error(&err));
    }
    let store = ChangeLogStore::open(&config.change_log.path);
    let actor = config.change_log.actor.as_str();
    let note = config.note.as_deref();

    match &config.target {
        IntimateTarget::Host(hostname) => {
            let record = match find_host(&snapshot, hostname) {
                Ok(record) => record,
                Err(err) => return Ok(report_pipeline_error(&err)),
            };
            let entry = mark_intimated(&store, record, actor, note)
                .with_context(|| format!("Failed to record {hostname} as intimated"))?;
            println!(
                "{} {} {} \"{}\"",
                entry.timestamp.to_rfc3339(),
                entry.hostname,
                entry.action,
                entry.note
            );
        }
        IntimateTarget::Filtered => {
            if snapshot.visible_count() == 0 {
                let err = PipelineError::NothingMatched {
                    filter: snapshot.criteria.description(),
                };
                return Ok(report_pipeline_error(&err));
            }
            let written = mark_intimated_bulk(&store, snapshot.filtered(), actor, note)?;
            println!(
                "Marked {written} row(s) intimated in {}",
                store.path().display()
            );
        }
    }
    Ok(exit_codes::SUCCESS)
}
