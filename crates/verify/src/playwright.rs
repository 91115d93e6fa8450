//! Playwright browser automation
//!
//! Flows are executed by generating a self-contained Playwright program,
//! running it with `node`, and reading a one-line JSON envelope back. The
//! generated program owns the browser lifecycle: the close happens in a
//! `finally`, so the browser is released even when a step fails.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};
use crate::flow::{FailurePolicy, Flow};
use crate::step::js_str;

/// Playwright browser handle
pub struct PlaywrightHandle {
    /// Base URL of the front-end
    base_url: String,

    /// Directory for screenshots
    artifact_dir: PathBuf,

    /// Viewport dimensions
    viewport_width: u32,
    viewport_height: u32,

    /// Per-step timeout applied via the page default
    step_timeout_ms: u64,

    /// Browser type
    browser: Browser,

    /// Headless mode
    headless: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// JSON envelope printed by the generated program.
#[derive(Debug, Deserialize)]
struct ScriptOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> VerifyResult<Self> {
        // Create screenshot directory
        std::fs::create_dir_all(&config.artifact_dir)?;

        Ok(Self {
            base_url: config.base_url,
            artifact_dir: config.artifact_dir,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            step_timeout_ms: config.step_timeout_ms,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> VerifyResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(VerifyError::PlaywrightNotFound),
        }
    }

    /// Build the Playwright program for a flow
    pub fn build_script(&self, flow: &Flow) -> String {
        let mut script = String::new();

        // Header
        script.push_str(&format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultTimeout({timeout});
  const baseUrl = '{base_url}';

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            timeout = self.step_timeout_ms,
            base_url = js_str(&self.base_url),
        ));

        // Generate step code
        for (i, step) in flow.steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.label()));
            script.push_str(&step.to_js(&self.artifact_dir));
        }

        // Footer: the failure policy decides whether the catch takes a
        // diagnostic screenshot before reporting. The close always runs.
        script.push_str(
            r#"

    console.log(JSON.stringify({ success: true }));
  } catch (error) {
"#,
        );

        if let FailurePolicy::CaptureScreenshot { name } = &flow.on_failure {
            let path = self.artifact_dir.join(format!("{}.png", name));
            script.push_str(&format!(
                "    try {{ await page.screenshot({{ path: '{}' }}); }} catch (_) {{}}\n",
                js_str(&path.to_string_lossy())
            ));
        }

        script.push_str(
            r#"    console.error(JSON.stringify({ success: false, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Execute a flow's program via node
    pub async fn run_flow(&self, flow: &Flow) -> VerifyResult<()> {
        // Verify playwright is installed before launching anything
        Self::check_playwright_installed()?;

        let script = self.build_script(flow);

        // Write script to temp file
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join(format!("{}.js", flow.name));
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // The generated program reports failures as a JSON line on
            // stderr; Playwright's own noise can surround it.
            let reason = stderr
                .lines()
                .rev()
                .find_map(|line| serde_json::from_str::<ScriptOutcome>(line.trim()).ok())
                .filter(|o| !o.success)
                .and_then(|o| o.error)
                .unwrap_or_else(|| {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    format!("script failed:\nstdout: {}\nstderr: {}", stdout, stderr)
                });

            return Err(VerifyError::Playwright(reason));
        }

        Ok(())
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub artifact_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub step_timeout_ms: u64,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            artifact_dir: PathBuf::from("verification"),
            viewport_width: 1280,
            viewport_height: 720,
            step_timeout_ms: 5000,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow;

    fn handle(config: PlaywrightConfig) -> PlaywrightHandle {
        let tmp = tempfile::tempdir().unwrap();
        PlaywrightHandle::new(PlaywrightConfig {
            artifact_dir: tmp.path().join("verification"),
            ..config
        })
        .unwrap()
    }

    #[test]
    fn script_header_launches_configured_browser() {
        let script = handle(PlaywrightConfig {
            browser: Browser::Firefox,
            ..Default::default()
        })
        .build_script(&flow::enrollment());

        assert!(script.contains("require('playwright')"));
        assert!(script.contains("await firefox.launch({ headless: true })"));
        assert!(script.contains("viewport: { width: 1280, height: 720 }"));
        assert!(script.contains("const baseUrl = 'http://localhost:5173';"));
    }

    #[test]
    fn headed_mode_is_honored() {
        let script = handle(PlaywrightConfig {
            headless: false,
            ..Default::default()
        })
        .build_script(&flow::enrollment());

        assert!(script.contains("launch({ headless: false })"));
    }

    #[test]
    fn propagate_policy_takes_no_diagnostic_screenshot() {
        let script = handle(PlaywrightConfig::default()).build_script(&flow::enrollment());

        assert!(!script.contains("error.png"));
        assert!(script.contains("} finally {\n    await browser.close();"));
    }

    #[test]
    fn capture_policy_screenshots_before_reporting() {
        let script = handle(PlaywrightConfig::default()).build_script(&flow::lesson_form());

        let shot = script.find("verification/error.png").expect("error screenshot");
        let report = script.find("success: false").expect("failure report");
        assert!(shot < report);
    }

    #[test]
    fn close_runs_after_failure_report() {
        let script = handle(PlaywrightConfig::default()).build_script(&flow::lesson_form());

        // exitCode, not exit(): the finally must still close the browser
        assert!(script.contains("process.exitCode = 1;"));
        assert!(!script.contains("process.exit(1)"));
    }

    #[test]
    fn steps_render_in_flow_order() {
        let script = handle(PlaywrightConfig::default()).build_script(&flow::enrollment());

        let login = script.find("goto(baseUrl + '/login')").unwrap();
        let dashboard = script.find("waitForURL(baseUrl + '/dashboard')").unwrap();
        let enroll = script.find("waitForURL(baseUrl + '/enroll')").unwrap();
        let shot = script.find("enrollment-page.png").unwrap();
        assert!(login < dashboard && dashboard < enroll && enroll < shot);
    }

    #[test]
    fn default_timeout_is_applied_to_the_page() {
        let script = handle(PlaywrightConfig::default()).build_script(&flow::enrollment());
        assert!(script.contains("page.setDefaultTimeout(5000);"));
    }
}
