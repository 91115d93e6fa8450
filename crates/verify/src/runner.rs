//! Flow runner: preflight, execution, summary, report

use std::path::PathBuf;
use std::time::{Duration, Instant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::artifact::{ArtifactStore, ScreenshotRecord};
use crate::error::VerifyResult;
use crate::flow::{FailurePolicy, Flow};
use crate::playwright::{PlaywrightConfig, PlaywrightHandle};
use crate::preflight;

/// Outcome of one walkthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub name: String,
    pub description: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshots: Vec<ScreenshotRecord>,
}

/// Outcome of the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub flows: Vec<FlowOutcome>,
}

/// Configuration for the flow runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub playwright: PlaywrightConfig,
    pub preflight_timeout: Duration,
    pub skip_preflight: bool,
    pub report_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            playwright: PlaywrightConfig::default(),
            preflight_timeout: Duration::from_secs(30),
            skip_preflight: false,
            report_dir: PathBuf::from("verification"),
        }
    }
}

/// Runs walkthroughs against the front-end and collects outcomes.
pub struct FlowRunner {
    config: RunnerConfig,
    artifacts: ArtifactStore,
}

impl FlowRunner {
    pub fn with_config(config: RunnerConfig) -> VerifyResult<Self> {
        let artifacts = ArtifactStore::new(config.playwright.artifact_dir.clone())?;
        Ok(Self { config, artifacts })
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Run the given flows in order.
    pub async fn run_flows(&self, flows: &[Flow]) -> VerifyResult<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        if !self.config.skip_preflight {
            preflight::wait_until_ready(
                &self.config.playwright.base_url,
                self.config.preflight_timeout,
            )
            .await?;
        }

        info!("Running {} flow(s)...", flows.len());

        let mut outcomes = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        for flow in flows {
            let outcome = match self.run_flow(flow).await {
                Ok(outcome) => outcome,
                Err(e) => FlowOutcome {
                    name: flow.name.to_string(),
                    description: flow.description.to_string(),
                    success: false,
                    duration_ms: 0,
                    error: Some(e.to_string()),
                    screenshots: vec![],
                },
            };

            if outcome.success {
                passed += 1;
                info!("✓ {} ({} ms)", outcome.name, outcome.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    outcome.name,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
            outcomes.push(outcome);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Verification: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(RunReport {
            started_at,
            base_url: self.config.playwright.base_url.clone(),
            total: flows.len(),
            passed,
            failed,
            duration_ms,
            flows: outcomes,
        })
    }

    /// Run a single flow and gather its artifacts.
    async fn run_flow(&self, flow: &Flow) -> VerifyResult<FlowOutcome> {
        let start = Instant::now();
        debug!("Running flow: {}", flow.name);

        let handle = PlaywrightHandle::new(self.config.playwright.clone())?;
        let result = handle.run_flow(flow).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let error = result.err().map(|e| e.to_string());
        let success = error.is_none();

        let mut screenshots = Vec::new();
        if success {
            // Every capture the flow names must exist and decode
            for name in flow.screenshot_names() {
                screenshots.push(self.artifacts.record(name)?);
            }
        } else if let FailurePolicy::CaptureScreenshot { name } = &flow.on_failure {
            // Diagnostic capture is best-effort; it may not exist if the
            // page never came up
            if let Ok(record) = self.artifacts.record(name) {
                screenshots.push(record);
            }
        }

        Ok(FlowOutcome {
            name: flow.name.to_string(),
            description: flow.description.to_string(),
            success,
            duration_ms,
            error,
            screenshots,
        })
    }

    /// Write the run report to JSON.
    pub fn write_report(&self, report: &RunReport) -> VerifyResult<PathBuf> {
        std::fs::create_dir_all(&self.config.report_dir)?;

        let path = self.config.report_dir.join("run-report.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Report written to: {}", path.display());
        Ok(path)
    }
}
