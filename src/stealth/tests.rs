use crate::cdp::MockPage;
use crate::identity::{PlatformSelector, UserAgent, UserAgentGenerator};
use crate::Error;

use super::*;

fn test_user_agent() -> UserAgent {
    UserAgentGenerator::with_seed(PlatformSelector::Windows, 7)
        .generate(Some("120.0.0.0"))
        .unwrap()
}

#[test]
fn test_launch_flags_disable_automation_markers() {
    let mitigator = FingerprintMitigator::new(&test_user_agent()).unwrap();

    assert!(mitigator
        .launch_flags()
        .contains(&"--disable-blink-features=AutomationControlled"));
    assert!(mitigator.excluded_switches().contains(&"enable-automation"));
}

#[test]
fn test_unparsable_user_agent_rejected() {
    let bogus = UserAgent::new("curl/8.4.0");

    let result = FingerprintMitigator::new(&bogus);
    assert!(matches!(result, Err(Error::UnparsableIdentity(_))));
}

#[test]
fn test_patch_set_is_ordered_and_complete() {
    let mitigator = FingerprintMitigator::new(&test_user_agent()).unwrap();

    let names: Vec<&str> = mitigator.script_patches().iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        vec![
            "webdriver",
            "chrome_runtime",
            "permissions",
            "plugins",
            "languages",
            "webgl",
            "user_agent_data"
        ]
    );
}

#[test]
fn test_user_agent_data_matches_identity() {
    let mitigator = FingerprintMitigator::new(&test_user_agent()).unwrap();

    let patches = mitigator.script_patches();
    let uad = patches
        .iter()
        .find(|p| p.name == "user_agent_data")
        .unwrap();

    assert!(uad.source.contains("version: '120'"));
    assert!(uad.source.contains("platform: 'Windows'"));
}

#[tokio::test]
async fn test_apply_sets_user_agent_and_all_patches() {
    let ua = test_user_agent();
    let mitigator = FingerprintMitigator::new(&ua).unwrap();
    let page = MockPage::new();

    let outcome = mitigator.apply(&page).await;

    assert_eq!(outcome.applied.len(), 8);
    assert!(outcome.skipped.is_empty());
    assert_eq!(page.user_agent().as_deref(), Some(ua.as_str()));
    assert_eq!(page.init_scripts().len(), 7);
    assert!(page.init_scripts()[0].contains("webdriver"));
}

#[tokio::test]
async fn test_apply_skips_failed_patch_and_continues() {
    let mitigator = FingerprintMitigator::new(&test_user_agent()).unwrap();
    let page = MockPage::new();
    page.fail_init_scripts_containing("userAgentData");

    let outcome = mitigator.apply(&page).await;

    assert_eq!(outcome.skipped, vec!["user_agent_data"]);
    assert_eq!(outcome.applied.len(), 7);
    assert_eq!(page.init_scripts().len(), 6);
}
