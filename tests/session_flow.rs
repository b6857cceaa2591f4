//! End-to-end session flow over the mock page binding: identity selection,
//! fingerprint mitigation at context creation, then humanized interaction.

use std::sync::Arc;

use opaque_driver::cdp::{MockPage, Rect};
use opaque_driver::driver::OpaquePage;
use opaque_driver::humanize::{Direction, FormField};
use opaque_driver::identity::{PoolRegistry, UserAgentPool};
use opaque_driver::stealth::FingerprintMitigator;
use opaque_driver::{Config, Platform};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn login_page() -> Arc<MockPage> {
    let page = Arc::new(MockPage::new());
    let rect = Rect {
        x: 100.0,
        y: 200.0,
        width: 200.0,
        height: 30.0,
    };
    page.add_element("#username", rect, true);
    page.add_element("#password", rect, true);
    page.add_element("#login", rect, true);
    page
}

#[tokio::test(start_paused = true)]
async fn full_session_setup_and_login() {
    init_tracing();
    let page = login_page();

    // Identity: rotate an agent out of a shared pool
    let registry = PoolRegistry::new();
    let pool = registry
        .get_or_init(&[Platform::Windows, Platform::Mac, Platform::Linux], 5)
        .unwrap();
    let ua = pool.get_next().unwrap();

    // Mitigation runs before any navigation
    let mitigator = FingerprintMitigator::new(&ua).unwrap();
    assert!(!mitigator.launch_flags().is_empty());
    let outcome = mitigator.apply(page.as_ref()).await;
    assert!(outcome.skipped.is_empty());
    assert_eq!(page.user_agent().as_deref(), Some(ua.as_str()));
    assert_eq!(page.init_scripts().len(), 7);

    // Humanized login
    let config = Config {
        auto_pause: false,
        ..Config::default()
    };
    let driver = OpaquePage::with_seed(page.clone(), &config, 7);

    let fields = vec![
        FormField::Text {
            name: "username".to_string(),
            selector: "#username".to_string(),
            value: "ada.lovelace".to_string(),
        },
        FormField::Text {
            name: "password".to_string(),
            selector: "#password".to_string(),
            value: "correct horse".to_string(),
        },
        FormField::Submit {
            name: "login".to_string(),
            selector: "#login".to_string(),
        },
    ];
    driver.fill_form(&fields).await.unwrap();

    assert_eq!(page.clicks().len(), 1);
    let typed: String = page.typed_chars().into_iter().collect();
    assert!(typed.contains("ada.lovelace"));

    // Scroll down the results in steps, then jump back to the top
    driver.scroll(Direction::Down, Some(600.0)).await.unwrap();
    assert!(!page.scroll_steps().is_empty());

    driver.scroll(Direction::Top, None).await.unwrap();
    assert_eq!(page.current_scroll(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn mitigation_failure_does_not_abort_session() {
    init_tracing();
    let page = login_page();
    page.fail_init_scripts_containing("WebGLRenderingContext");

    let pool = UserAgentPool::with_seed(&[Platform::Linux], 2, 3).unwrap();
    let ua = pool.get_next().unwrap();

    let mitigator = FingerprintMitigator::new(&ua).unwrap();
    let outcome = mitigator.apply(page.as_ref()).await;

    assert_eq!(outcome.skipped, vec!["webgl"]);
    assert_eq!(page.init_scripts().len(), 6);

    // The session continues to be usable after a skipped patch
    let config = Config {
        auto_pause: false,
        ..Config::default()
    };
    let driver = OpaquePage::with_seed(page.clone(), &config, 7);
    driver.click("#login").await.unwrap();
    assert_eq!(page.clicks().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn typo_corrections_balance_out() {
    init_tracing();
    let page = login_page();
    let config = Config {
        auto_pause: false,
        ..Config::default()
    };
    let driver = OpaquePage::with_seed(page.clone(), &config, 1);

    driver.type_text("#username", "margaret").await.unwrap();

    // Every backspace erased exactly one mistyped extra char, so the
    // keystroke count always balances back to the intended text length
    let typed = page.typed_chars();
    assert_eq!(typed.len(), "margaret".len() + page.backspace_count());
    assert_eq!(page.focused().as_deref(), Some("#username"));
}
