//! Verification runner entry point
//!
//! Run with the front-end already serving, e.g.:
//! `lms-verify --base-url http://localhost:5173`

use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lms_verify::flow;
use lms_verify::playwright::{Browser, PlaywrightConfig};
use lms_verify::runner::RunnerConfig;
use lms_verify::{FlowRunner, VerifyError, VerifyResult};

#[derive(Parser, Debug)]
#[command(name = "lms-verify")]
#[command(about = "UI verification walkthroughs for the LMS front-end")]
struct Args {
    /// Base URL of the running front-end
    #[arg(long, default_value = "http://localhost:5173")]
    base_url: String,

    /// Run only the named flow (see --list)
    #[arg(short, long)]
    flow: Option<String>,

    /// List available flows and exit
    #[arg(long)]
    list: bool,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,

    /// Per-step timeout in milliseconds
    #[arg(long, default_value = "5000")]
    step_timeout_ms: u64,

    /// Directory for screenshots
    #[arg(long, default_value = "verification")]
    artifact_dir: PathBuf,

    /// Remove screenshots from earlier runs before starting
    #[arg(long)]
    clean: bool,

    /// Directory for the JSON run report
    #[arg(short, long, default_value = "verification")]
    output: PathBuf,

    /// Seconds to wait for the front-end before giving up
    #[arg(long, default_value = "30")]
    preflight_timeout: u64,

    /// Skip the front-end reachability check
    #[arg(long)]
    skip_preflight: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    // Run async main
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> VerifyResult<bool> {
    if args.list {
        for flow in flow::all() {
            println!("{:<12} {}", flow.name, flow.description);
        }
        return Ok(true);
    }

    let flows = match &args.flow {
        Some(name) => {
            vec![flow::by_name(name).ok_or_else(|| VerifyError::UnknownFlow(name.clone()))?]
        }
        None => flow::all(),
    };

    let browser = match args.browser.as_str() {
        "firefox" => Browser::Firefox,
        "webkit" => Browser::Webkit,
        _ => Browser::Chromium,
    };

    let config = RunnerConfig {
        playwright: PlaywrightConfig {
            base_url: args.base_url,
            artifact_dir: args.artifact_dir,
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            step_timeout_ms: args.step_timeout_ms,
            browser,
            headless: !args.headed,
        },
        preflight_timeout: Duration::from_secs(args.preflight_timeout),
        skip_preflight: args.skip_preflight,
        report_dir: args.output,
    };

    let runner = FlowRunner::with_config(config)?;

    if args.clean {
        runner.artifacts().clean()?;
    }

    let report = runner.run_flows(&flows).await?;
    runner.write_report(&report)?;

    Ok(report.failed == 0)
}
