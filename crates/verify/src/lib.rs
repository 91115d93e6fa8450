//! LMS UI Verification Runner
//!
//! This crate drives a running LMS web front-end through Playwright and
//! walks two fixed verification flows:
//! - the student enrollment walkthrough
//! - the admin lesson-authoring walkthrough
//!
//! It does not spawn the application; the front-end is expected to be
//! serving already (by default at `http://localhost:5173`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Verification Runner (Rust)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FlowRunner                                                 │
//! │    ├── wait_until_ready(base_url)                           │
//! │    ├── run_flow(flow) -> FlowOutcome                        │
//! │    └── write_report(report) -> run-report.json              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Flow (fixed, in code)                                      │
//! │    ├── name, description, failure policy                    │
//! │    └── steps: [FlowStep]                                    │
//! │          ├── goto { path }                                  │
//! │          ├── fill / select / expect by label                │
//! │          ├── click by role + accessible name                │
//! │          └── screenshot { name }                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PlaywrightHandle                                           │
//! │    └── steps -> generated JS -> node -> JSON envelope       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod artifact;
pub mod error;
pub mod flow;
pub mod playwright;
pub mod preflight;
pub mod runner;
pub mod step;

pub use error::{VerifyError, VerifyResult};
pub use flow::Flow;
pub use runner::FlowRunner;
