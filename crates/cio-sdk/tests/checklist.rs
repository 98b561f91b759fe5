//! Setup checklist output as seen through a configured subscriber.

use cio_sdk::{DeepLinkStep, SetupChecklist, TracingSetupChecklist};
use cio_telemetry::{LogConfig, LogFormat};
use cio_test::prelude::*;
use url::Url;

fn link() -> Url {
    Url::parse("remote-habits://deep?message=hello&name=dana").unwrap()
}

#[test]
fn test_no_steps_report_printed_at_error_level() {
    let out = capture_logs(&LogConfig::new("error").without_timestamps(), || {
        TracingSetupChecklist::new().no_steps_complete_deep_links();
    });
    assert!(out.contains("Interested in opening a specific screen"));
    assert!(out.contains("--------- Customer.io Deep Link Setup progress ---------"));
    assert_eq!(out.matches("🔲").count(), 3);
    assert!(!out.contains("✅"));
}

#[test]
fn test_completed_step_printed_when_logging_is_off() {
    let config = LogConfig::new("off").with_directive("cio=off");
    let out = capture_logs(&config, || {
        TracingSetupChecklist::new()
            .completed_deep_link_step(DeepLinkStep::PushOpened, &link());
    });
    assert_eq!(out.matches("✅").count(), 2);
    assert_eq!(out.matches("🔲").count(), 1);
    assert!(out.contains("remote-habits://deep?message=hello&name=dana"));
}

#[test]
fn test_checklist_as_json() {
    let config = LogConfig::new("error").with_format(LogFormat::Json);
    let out = capture_logs(&config, || {
        TracingSetupChecklist::new()
            .completed_deep_link_step(DeepLinkStep::OsOpenDeepLinkUrl, &link());
    });
    let line = out.lines().next().unwrap();
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["target"], "cio::force");
    assert_eq!(event["level"], "INFO");
}

#[test]
fn test_other_info_events_stay_filtered() {
    let out = capture_logs(&LogConfig::new("error"), || {
        tracing::info!("ordinary event");
        TracingSetupChecklist::new().no_steps_complete_deep_links();
    });
    assert!(!out.contains("ordinary event"));
    assert!(out.contains("Deep Link Setup progress"));
}

#[test]
fn test_checklist_is_usable_as_trait_object() {
    let mock = SetupChecklistMock::new();
    let checklist: &dyn SetupChecklist = &mock;
    checklist.no_steps_complete_deep_links();
    for step in DeepLinkStep::ALL {
        checklist.completed_deep_link_step(step, &link());
    }
    assert_eq!(mock.no_steps_complete_deep_links_calls(), 1);
    let steps: Vec<DeepLinkStep> = mock.completed_steps().into_iter().map(|(s, _)| s).collect();
    assert_eq!(steps, DeepLinkStep::ALL.to_vec());
}
