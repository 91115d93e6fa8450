//! Typed walkthrough steps and their JavaScript rendering
//!
//! The walkthroughs address the page the way a user would: form fields by
//! their label, buttons and links by their accessible name, table rows by
//! position. Each step knows how to render itself as one line of the
//! generated Playwright program.

use std::path::Path;

/// ARIA role used by role-based locators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Link,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Button => "button",
            Role::Link => "link",
        }
    }
}

/// Accessible-name filter for a role locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleName {
    /// Match the full accessible name.
    Exact(String),
    /// Match names containing this pattern, rendered as a JS regex literal.
    Pattern(String),
}

/// A single step in a walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// Navigate to a path relative to the base URL
    Goto { path: String },

    /// Fill the form field with the given label
    FillByLabel { label: String, value: String },

    /// Click an element located by role and accessible name
    ClickByRole { role: Role, name: RoleName },

    /// Wait until the page URL equals base URL + path
    ExpectUrl { path: String },

    /// Wait until the given text is visible
    ExpectTextVisible { text: String },

    /// Wait until the field with the given label is visible
    ExpectLabelVisible { label: String },

    /// Wait until the field with the given label is hidden or gone
    ExpectLabelHidden { label: String },

    /// Choose an option in the select with the given label
    SelectByLabel { label: String, value: String },

    /// Click the first link inside the nth table row
    ClickRowLink { row: usize },

    /// Capture a page screenshot into the artifact directory
    Screenshot { name: String },
}

impl FlowStep {
    /// Short label for a step, used in generated-script comments and logs.
    pub fn label(&self) -> String {
        match self {
            FlowStep::Goto { path } => format!("goto:{}", path),
            FlowStep::FillByLabel { label, .. } => format!("fill-label:{}", label),
            FlowStep::ClickByRole { role, name } => match name {
                RoleName::Exact(n) => format!("click-{}:{}", role.as_str(), n),
                RoleName::Pattern(p) => format!("click-{}:/{}/", role.as_str(), p),
            },
            FlowStep::ExpectUrl { path } => format!("expect-url:{}", path),
            FlowStep::ExpectTextVisible { text } => format!("expect-text:{}", text),
            FlowStep::ExpectLabelVisible { label } => format!("expect-label-visible:{}", label),
            FlowStep::ExpectLabelHidden { label } => format!("expect-label-hidden:{}", label),
            FlowStep::SelectByLabel { label, value } => {
                format!("select-label:{}={}", label, value)
            }
            FlowStep::ClickRowLink { row } => format!("click-row-link:{}", row),
            FlowStep::Screenshot { name } => format!("screenshot:{}", name),
        }
    }

    /// Render this step as a line of the generated Playwright program.
    ///
    /// `artifact_dir` is where screenshot steps write their PNG files.
    pub fn to_js(&self, artifact_dir: &Path) -> String {
        match self {
            FlowStep::Goto { path } => {
                format!("    await page.goto(baseUrl + '{}');", js_str(path))
            }
            FlowStep::FillByLabel { label, value } => format!(
                "    await page.getByLabel('{}').fill('{}');",
                js_str(label),
                js_str(value)
            ),
            FlowStep::ClickByRole { role, name } => {
                let name_js = match name {
                    RoleName::Exact(n) => format!("'{}'", js_str(n)),
                    RoleName::Pattern(p) => format!("/{}/", js_regex(p)),
                };
                format!(
                    "    await page.getByRole('{}', {{ name: {} }}).click();",
                    role.as_str(),
                    name_js
                )
            }
            FlowStep::ExpectUrl { path } => {
                format!("    await page.waitForURL(baseUrl + '{}');", js_str(path))
            }
            FlowStep::ExpectTextVisible { text } => format!(
                "    await page.getByText('{}').waitFor({{ state: 'visible' }});",
                js_str(text)
            ),
            FlowStep::ExpectLabelVisible { label } => format!(
                "    await page.getByLabel('{}').waitFor({{ state: 'visible' }});",
                js_str(label)
            ),
            FlowStep::ExpectLabelHidden { label } => format!(
                "    await page.getByLabel('{}').waitFor({{ state: 'hidden' }});",
                js_str(label)
            ),
            FlowStep::SelectByLabel { label, value } => format!(
                "    await page.getByLabel('{}').selectOption('{}');",
                js_str(label),
                js_str(value)
            ),
            FlowStep::ClickRowLink { row } => format!(
                "    await page.getByRole('row').nth({}).getByRole('link').first().click();",
                row
            ),
            FlowStep::Screenshot { name } => {
                let path = artifact_dir.join(format!("{}.png", name));
                format!(
                    "    await page.screenshot({{ path: '{}' }});",
                    js_str(&path.to_string_lossy())
                )
            }
        }
    }
}

/// Escape a string for inclusion in a single-quoted JS literal.
pub fn js_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Escape a pattern for inclusion in a JS regex literal.
pub fn js_regex(s: &str) -> String {
    s.replace('\\', "\\\\").replace('/', "\\/")
}
