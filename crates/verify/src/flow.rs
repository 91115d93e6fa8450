//! The two fixed verification walkthroughs
//!
//! Flows are literal: step lists, credentials, and screenshot names match
//! the LMS front-end as deployed locally. They are defined in code rather
//! than loaded from files.

use crate::step::{FlowStep, Role, RoleName};

/// Student account used by the enrollment walkthrough.
pub const STUDENT_EMAIL: &str = "testuser@example.com";

/// Admin account used by the lesson-form walkthrough.
pub const ADMIN_EMAIL: &str = "admin@test.com";

/// Shared password for both seeded accounts.
pub const PASSWORD: &str = "password";

/// What to do when a step fails mid-flow.
///
/// The browser is closed in a guaranteed cleanup step either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure and stop; no diagnostic artifact.
    Propagate,
    /// Capture a best-effort diagnostic screenshot under this name, then
    /// report the failure.
    CaptureScreenshot { name: String },
}

/// A named, fixed sequence of steps against the front-end.
#[derive(Debug, Clone)]
pub struct Flow {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<FlowStep>,
    pub on_failure: FailurePolicy,
}

impl Flow {
    /// Screenshot names this flow captures on the happy path, in order.
    pub fn screenshot_names(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                FlowStep::Screenshot { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Student walkthrough: log in, reach the dashboard, open the enrollment
/// page, confirm the course list header renders.
pub fn enrollment() -> Flow {
    Flow {
        name: "enrollment",
        description: "Student logs in and reaches the course enrollment page",
        steps: vec![
            FlowStep::Goto { path: "/login".into() },
            FlowStep::FillByLabel { label: "Email".into(), value: STUDENT_EMAIL.into() },
            FlowStep::FillByLabel { label: "Password".into(), value: PASSWORD.into() },
            FlowStep::ClickByRole {
                role: Role::Button,
                name: RoleName::Exact("Login".into()),
            },
            FlowStep::ExpectUrl { path: "/dashboard".into() },
            FlowStep::ClickByRole {
                role: Role::Link,
                name: RoleName::Exact("Enroll in a new Course".into()),
            },
            FlowStep::ExpectUrl { path: "/enroll".into() },
            FlowStep::ExpectTextVisible { text: "Enroll in a Course".into() },
            FlowStep::Screenshot { name: "enrollment-page".into() },
        ],
        on_failure: FailurePolicy::Propagate,
    }
}

/// Admin walkthrough: log in, open the first course, expand its modules,
/// open the lesson form, and check that the type selector swaps the
/// video/text fields.
pub fn lesson_form() -> Flow {
    Flow {
        name: "lesson-form",
        description: "Admin opens a course and checks the lesson form's conditional fields",
        steps: vec![
            FlowStep::Goto { path: "/login".into() },
            FlowStep::FillByLabel { label: "Email Address".into(), value: ADMIN_EMAIL.into() },
            FlowStep::FillByLabel { label: "Password".into(), value: PASSWORD.into() },
            FlowStep::ClickByRole {
                role: Role::Button,
                name: RoleName::Exact("Login".into()),
            },
            FlowStep::ExpectTextVisible { text: "Admin Dashboard".into() },
            FlowStep::ClickByRole {
                role: Role::Button,
                name: RoleName::Exact("Courses".into()),
            },
            // Row 0 is the table header; the first course sits in row 1.
            FlowStep::ClickRowLink { row: 1 },
            FlowStep::ExpectTextVisible { text: "Course Content".into() },
            FlowStep::ClickByRole {
                role: Role::Button,
                name: RoleName::Pattern("Lessons for".into()),
            },
            FlowStep::ClickByRole {
                role: Role::Button,
                name: RoleName::Exact("Add Lesson".into()),
            },
            FlowStep::ExpectTextVisible { text: "Create New Lesson".into() },
            FlowStep::SelectByLabel { label: "Type".into(), value: "video".into() },
            FlowStep::ExpectLabelVisible { label: "YouTube Video ID".into() },
            FlowStep::ExpectLabelHidden { label: "Content".into() },
            FlowStep::SelectByLabel { label: "Type".into(), value: "text".into() },
            FlowStep::ExpectLabelHidden { label: "YouTube Video ID".into() },
            FlowStep::ExpectLabelVisible { label: "Content".into() },
            FlowStep::Screenshot { name: "verification".into() },
        ],
        on_failure: FailurePolicy::CaptureScreenshot { name: "error".into() },
    }
}

/// All flows, in the order they run by default.
pub fn all() -> Vec<Flow> {
    vec![enrollment(), lesson_form()]
}

/// Look up a flow by its CLI name.
pub fn by_name(name: &str) -> Option<Flow> {
    all().into_iter().find(|f| f.name == name)
}
