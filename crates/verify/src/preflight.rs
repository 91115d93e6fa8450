//! Front-end reachability check
//!
//! The application under verification is started out-of-band (typically a
//! Vite dev server); nothing here spawns it. Before driving any flow we
//! poll the base URL until it answers, so a slow-starting front-end does
//! not surface as a bogus step failure.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{VerifyError, VerifyResult};

/// Wait for the front-end to respond at `base_url`.
pub async fn wait_until_ready(base_url: &str, timeout_duration: Duration) -> VerifyResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout_duration {
        attempts += 1;

        match client.get(base_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Front-end is up at {}", base_url);
                return Ok(());
            }
            Ok(resp) => {
                warn!("Front-end returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for front-end at {}...", base_url);
                }
                // Connection refused is expected while the dev server starts
                if !e.is_connect() {
                    warn!("Reachability check error: {}", e);
                }
            }
        }

        sleep(Duration::from_millis(100)).await;
    }

    Err(VerifyError::FrontendUnreachable {
        url: base_url.to_string(),
        attempts,
    })
}
