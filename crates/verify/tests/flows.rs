//! Whole-script generation checks for both walkthroughs
//!
//! These run without a browser: they assert that the generated Playwright
//! programs carry the literal walkthrough content in order.

use lms_verify::flow;
use lms_verify::playwright::{PlaywrightConfig, PlaywrightHandle};

fn script_for(flow: &lms_verify::Flow) -> String {
    let tmp = tempfile::tempdir().unwrap();
    let handle = PlaywrightHandle::new(PlaywrightConfig {
        artifact_dir: tmp.path().join("verification"),
        ..Default::default()
    })
    .unwrap();
    handle.build_script(flow)
}

/// Assert each needle appears in the script, in the given order.
fn assert_ordered(script: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match script[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("missing or out of order: {:?}", needle),
        }
    }
}

#[test]
fn enrollment_script_walks_login_to_enrollment_page() {
    let script = script_for(&flow::enrollment());

    assert_ordered(
        &script,
        &[
            "await page.goto(baseUrl + '/login');",
            "await page.getByLabel('Email').fill('testuser@example.com');",
            "await page.getByLabel('Password').fill('password');",
            "await page.getByRole('button', { name: 'Login' }).click();",
            "await page.waitForURL(baseUrl + '/dashboard');",
            "await page.getByRole('link', { name: 'Enroll in a new Course' }).click();",
            "await page.waitForURL(baseUrl + '/enroll');",
            "await page.getByText('Enroll in a Course').waitFor({ state: 'visible' });",
            "enrollment-page.png",
            "await browser.close();",
        ],
    );

    // Failure propagates without a diagnostic capture
    assert!(!script.contains("error.png"));
}

#[test]
fn lesson_form_script_walks_login_to_conditional_fields() {
    let script = script_for(&flow::lesson_form());

    assert_ordered(
        &script,
        &[
            "await page.goto(baseUrl + '/login');",
            "await page.getByLabel('Email Address').fill('admin@test.com');",
            "await page.getByRole('button', { name: 'Login' }).click();",
            "await page.getByText('Admin Dashboard').waitFor({ state: 'visible' });",
            "await page.getByRole('button', { name: 'Courses' }).click();",
            "await page.getByRole('row').nth(1).getByRole('link').first().click();",
            "await page.getByText('Course Content').waitFor({ state: 'visible' });",
            "await page.getByRole('button', { name: /Lessons for/ }).click();",
            "await page.getByRole('button', { name: 'Add Lesson' }).click();",
            "await page.getByText('Create New Lesson').waitFor({ state: 'visible' });",
            "await page.getByLabel('Type').selectOption('video');",
            "await page.getByLabel('YouTube Video ID').waitFor({ state: 'visible' });",
            "await page.getByLabel('Content').waitFor({ state: 'hidden' });",
            "await page.getByLabel('Type').selectOption('text');",
            "await page.getByLabel('YouTube Video ID').waitFor({ state: 'hidden' });",
            "await page.getByLabel('Content').waitFor({ state: 'visible' });",
            "verification.png",
            "await browser.close();",
        ],
    );

    // The catch captures a diagnostic screenshot before reporting
    assert_ordered(&script, &["} catch (error) {", "error.png", "success: false"]);
}

#[test]
fn both_flows_resolve_by_cli_name() {
    for flow in flow::all() {
        let found = flow::by_name(flow.name).expect("flow resolves by its own name");
        assert_eq!(found.steps.len(), flow.steps.len());
    }
}
