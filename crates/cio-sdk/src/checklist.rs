//! Deep link setup checklist.
//!
//! Prints a progress block that walks an app developer through the three
//! steps a deep link takes from a push payload to the operating system. The
//! block is logged on [`FORCE_TARGET`] so it shows up whatever log level the
//! host app configured.

use cio_telemetry::FORCE_TARGET;
use tracing::info;
use url::Url;

const HEADER: &str = "--------- Customer.io Deep Link Setup progress ---------";
const FOOTER: &str = "-------------------------------------------------------";
const TIP: &str = "- TIP: Send a test rich push notification to your device from Customer.io: https://customer.io/docs/send-push/#test";
const INTRO: &str = "Interested in opening a specific screen of your mobile app after a push notification is opened?
Or, performing a specific action such as adding an item to a shopping cart after a push notification is opened?

If so, setup the Deep Link feature!";

/// Reports deep link setup progress to the app developer.
pub trait SetupChecklist: Send + Sync {
    /// Report that no deep link step has been observed yet.
    fn no_steps_complete_deep_links(&self);

    /// Report that `step` (and every step before it) completed for
    /// `deep_link`.
    fn completed_deep_link_step(&self, step: DeepLinkStep, deep_link: &Url);
}

/// A stage a deep link passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeepLinkStep {
    /// A push carrying a deep link reached the SDK.
    PushPayloadContainsDeepLinkUrl,
    /// The user opened that push and the SDK received it.
    PushOpened,
    /// The SDK asked the operating system to open the link.
    OsOpenDeepLinkUrl,
}

impl DeepLinkStep {
    /// Every step, in order.
    pub const ALL: [Self; 3] = [
        Self::PushPayloadContainsDeepLinkUrl,
        Self::PushOpened,
        Self::OsOpenDeepLinkUrl,
    ];

    /// Line shown once this step has completed.
    #[must_use]
    pub fn completed_message(self, deep_link: &Url) -> String {
        let url = deep_link.as_str();
        match self {
            Self::PushPayloadContainsDeepLinkUrl => format!(
                "✅ Push received from Customer.io that contains a Deep Link. The SDK will attempt to open this Deep Link URL when the push is opened: {url}"
            ),
            Self::PushOpened => format!(
                "✅ Push notification was opened and was received by Customer.io SDK. The SDK will attempt to open Deep Link URL: {url}"
            ),
            Self::OsOpenDeepLinkUrl => format!(
                "✅ The Customer.io SDK sent a request to the operating system to open the Deep Link URL. The Customer.io SDK has done all that it can at this point to get Deep Links to work. Make sure your app is configured to receive the deep link request from the OS. Deep Link URL: {url}"
            ),
        }
    }

    /// Line shown while this step is still pending.
    #[must_use]
    pub const fn not_completed_message(self) -> &'static str {
        match self {
            Self::PushPayloadContainsDeepLinkUrl => {
                "🔲 Setup your mobile app to receive a rich push and send it to the Customer.io SDK: https://customer.io/docs/sdk/ios/rich-push/#rich-push"
            },
            Self::PushOpened => {
                "🔲 After a push notification is opened, send the notification to the Customer.io SDK: https://customer.io/docs/sdk/ios/rich-push/#app-scheme-deep-links"
            },
            Self::OsOpenDeepLinkUrl => {
                "🔲 Setup your mobile app to open after a Deep Link is opened by the operating system: https://customer.io/docs/sdk/ios/rich-push/#app-scheme-deep-links"
            },
        }
    }
}

/// Progress block with every step up to and including `completed` marked
/// done. `None` renders all steps as pending.
#[must_use]
pub fn progress_report(completed: Option<(DeepLinkStep, &Url)>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(HEADER);
    out.push('\n');
    for step in DeepLinkStep::ALL {
        match completed {
            Some((done, url)) if step <= done => out.push_str(&step.completed_message(url)),
            _ => out.push_str(step.not_completed_message()),
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(TIP);
    out.push('\n');
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Introduction followed by an all-pending progress block.
#[must_use]
pub fn no_steps_report() -> String {
    format!("{INTRO}\n{}", progress_report(None))
}

/// [`SetupChecklist`] that logs on the forced tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSetupChecklist;

impl TracingSetupChecklist {
    /// Create a checklist reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SetupChecklist for TracingSetupChecklist {
    fn no_steps_complete_deep_links(&self) {
        info!(target: FORCE_TARGET, "{}", no_steps_report());
    }

    fn completed_deep_link_step(&self, step: DeepLinkStep, deep_link: &Url) {
        info!(target: FORCE_TARGET, "{}", progress_report(Some((step, deep_link))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Url {
        Url::parse("remote-habits://deep?message=hello").unwrap()
    }

    fn step_lines(report: &str) -> Vec<&str> {
        report
            .lines()
            .filter(|l| l.starts_with('✅') || l.starts_with('🔲'))
            .collect()
    }

    #[test]
    fn test_no_steps_all_pending() {
        let report = no_steps_report();
        assert!(report.starts_with("Interested in opening a specific screen"));
        assert!(report.contains(HEADER));
        assert!(report.contains(TIP));
        let lines = step_lines(&report);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with('🔲')));
    }

    #[test]
    fn test_first_step_completed() {
        let url = link();
        let report = progress_report(Some((DeepLinkStep::PushPayloadContainsDeepLinkUrl, &url)));
        let lines = step_lines(&report);
        assert!(lines[0].starts_with("✅ Push received from Customer.io"));
        assert!(lines[0].ends_with("remote-habits://deep?message=hello"));
        assert_eq!(lines[1], DeepLinkStep::PushOpened.not_completed_message());
        assert_eq!(lines[2], DeepLinkStep::OsOpenDeepLinkUrl.not_completed_message());
    }

    #[test]
    fn test_later_step_marks_earlier_steps_done() {
        let url = link();
        let report = progress_report(Some((DeepLinkStep::PushOpened, &url)));
        let lines = step_lines(&report);
        assert!(lines[0].starts_with('✅'));
        assert!(lines[1].starts_with("✅ Push notification was opened"));
        assert!(lines[2].starts_with('🔲'));

        let report = progress_report(Some((DeepLinkStep::OsOpenDeepLinkUrl, &url)));
        assert!(step_lines(&report).iter().all(|l| l.starts_with('✅')));
    }

    #[test]
    fn test_block_layout() {
        let report = progress_report(None);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], HEADER);
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], TIP);
        assert_eq!(lines[7], FOOTER);
    }
}
