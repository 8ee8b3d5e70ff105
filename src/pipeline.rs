// src/pipeline.rs

use crate::aggregator::aggregate_top_n;
use crate::catalog::InventorySource;
use crate::config::Config;
use crate::db::SnapshotStore;
use crate::domain::{CheapestSnapshot, ProductLines};
use crate::errors::{PipelineError, Sink};
use crate::mailer::{OutgoingEmail, ReportMailer};
use crate::snapshot::build_snapshot;
use crate::templates::{render_report, report_subject};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::panic::{self, AssertUnwindSafe};

pub struct RunSettings {
    pub to_addr: String,
    pub from_addr: String,
    pub top_n: usize,
}

impl From<&Config> for RunSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            to_addr: cfg.to_addr.clone(),
            from_addr: cfg.source_addr.clone(),
            top_n: cfg.top_n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        ranked: usize,
        snapshot_written: bool,
        email_sent: bool,
    },
    Failed(String),
}

/// One end-to-end run: aggregate, then snapshot and report.
pub struct Pipeline<'a> {
    source: &'a dyn InventorySource,
    store: &'a dyn SnapshotStore,
    mailer: &'a dyn ReportMailer,
    lines: &'a ProductLines,
    settings: RunSettings,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn InventorySource,
        store: &'a dyn SnapshotStore,
        mailer: &'a dyn ReportMailer,
        lines: &'a ProductLines,
        settings: RunSettings,
    ) -> Self {
        Self {
            source,
            store,
            mailer,
            lines,
            settings,
        }
    }

    pub fn run(&self) -> RunOutcome {
        self.run_at(Utc::now())
    }

    /// Never fails: every error, and any panic, ends up as a logged `Failed`.
    /// The scheduler would otherwise treat an escaped failure as a reason to retry.
    pub fn run_at(&self, now: DateTime<Utc>) -> RunOutcome {
        info!("🚗 Pipeline run started at {now}");

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.execute(now))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("❌ Run failed: {e}");
                RunOutcome::Failed(e.to_string())
            }
            Err(_) => {
                error!("❌ Run panicked");
                RunOutcome::Failed("run panicked".to_string())
            }
        };

        info!("🏁 Pipeline run finished: {outcome:?}");
        outcome
    }

    fn execute(&self, now: DateTime<Utc>) -> Result<RunOutcome, PipelineError> {
        let selection = aggregate_top_n(self.source, &self.lines.codes(), self.settings.top_n)?;
        if selection.is_empty() {
            warn!("No priced listings in any partition");
        } else {
            info!("Ranked {} listings", selection.len());
        }

        let snapshot = build_snapshot(&selection, self.lines, now);
        let email = OutgoingEmail {
            to: self.settings.to_addr.clone(),
            from: self.settings.from_addr.clone(),
            subject: report_subject(selection.len(), now.date_naive()),
            html: render_report(&selection, self.lines).into_string(),
        };

        // The two sinks are independent: one failing doesn't stop the other.
        let snapshot_written = match snapshot {
            Some(snapshot) => self.write_snapshot(&snapshot),
            None => {
                info!("Nothing ranked, skipping snapshot");
                false
            }
        };
        let email_sent = self.send_report(&email);

        Ok(RunOutcome::Completed {
            ranked: selection.len(),
            snapshot_written,
            email_sent,
        })
    }

    fn write_snapshot(&self, snapshot: &CheapestSnapshot) -> bool {
        match self.store.put_snapshot(snapshot) {
            Ok(()) => {
                info!(
                    "✅ Snapshot {} written ({} at {})",
                    snapshot.id, snapshot.model, snapshot.price
                );
                true
            }
            Err(e) => {
                let err = PipelineError::SinkUnavailable {
                    sink: Sink::SnapshotStore,
                    reason: e.to_string(),
                };
                error!("{err}");
                false
            }
        }
    }

    fn send_report(&self, email: &OutgoingEmail) -> bool {
        info!("Sending email to {}", email.to);
        match self.mailer.send_email(email) {
            Ok(()) => {
                info!("✅ Report sent");
                true
            }
            Err(e) => {
                let err = PipelineError::SinkUnavailable {
                    sink: Sink::Email,
                    reason: e.to_string(),
                };
                error!("{err}");
                false
            }
        }
    }
}
