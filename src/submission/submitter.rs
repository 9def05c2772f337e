use std::fmt::Display;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Local, TimeZone};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::bundle::ArchiveBuilder;
use crate::cloud::remote_path::plan;
use crate::cloud::{UploadClient, UploadError, UploadReceipt};
use crate::config::SubmissionConfig;
use crate::models::Report;
use crate::submission::gate::{SubmitGate, SubmitGuard};

/// How a submission ended.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The archive reached the storage service
    Delivered(UploadReceipt),
    /// Another submission held the gate; nothing was done
    Busy,
    /// No archive existed after compression; no upload was attempted
    ArchiveMissing,
    /// The upload phase failed; local artifacts are left in place
    NotDelivered(UploadError),
}

impl SubmissionOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered(_))
    }
}

/// Runs the full report pipeline: write, collect, compress, read, upload.
pub struct Submitter {
    builder: ArchiveBuilder,
    client: UploadClient,
    gate: SubmitGate,
}

impl Submitter {
    pub fn new(config: SubmissionConfig) -> Result<Self> {
        let client = UploadClient::new(config.api.clone())?;
        Ok(Self::with_parts(ArchiveBuilder::new(config), client, SubmitGate::new()))
    }

    pub fn with_parts(builder: ArchiveBuilder, client: UploadClient, gate: SubmitGate) -> Self {
        Self { builder, client, gate }
    }

    /// Gate to wire to whatever triggers submissions
    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    /// Submit a report using the local clock and no cancellation.
    pub async fn submit(&self, token: &str, summary: &str, detail: &str) -> Result<SubmissionOutcome> {
        self.submit_at(token, summary, detail, &Local::now(), &CancellationToken::new())
            .await
    }

    /// Submit a report with an explicit clock reading and cancellation token.
    ///
    /// Local filesystem failures are returned as errors. Everything that
    /// happens after the archive is built is reported in the outcome.
    pub async fn submit_at<Tz>(
        &self,
        token: &str,
        summary: &str,
        detail: &str,
        now: &DateTime<Tz>,
        cancel: &CancellationToken,
    ) -> Result<SubmissionOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(guard) = self.gate.try_acquire() else {
            warn!("A submission is already in progress, ignoring new request");
            return Ok(SubmissionOutcome::Busy);
        };
        let guard = Arc::new(guard);

        let report = Report::new(summary, detail);
        let Some(payload) = self.build_archive(report, Arc::clone(&guard)).await? else {
            warn!("No archive to upload, aborting submission");
            return Ok(SubmissionOutcome::ArchiveMissing);
        };

        let target = plan(now, summary);
        info!("Submitting report to {}", target.file);

        match self.client.upload(token, &target, payload, cancel).await {
            Ok(receipt) => Ok(SubmissionOutcome::Delivered(receipt)),
            Err(e) => {
                warn!("Report not delivered: {}", e);
                Ok(SubmissionOutcome::NotDelivered(e))
            }
        }
    }

    /// Filesystem half of the pipeline, run off the async executor.
    ///
    /// The blocking task holds its own share of the guard, so the gate stays
    /// closed until the task finishes even if this future is dropped.
    async fn build_archive(&self, report: Report, guard: Arc<SubmitGuard>) -> Result<Option<Bytes>> {
        let builder = self.builder.clone();

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            builder.write_report(&report)?;
            let working_dir = builder.prepare_working_directory()?;
            let archive_path = builder.compress(&working_dir)?;
            builder.read_archive_bytes(&archive_path)
        })
        .await
        .context("Archive task failed to complete")?
    }
}
