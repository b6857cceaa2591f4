use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cdp::{MockPage, Rect};
use crate::Error;

use super::*;

fn page_with_input() -> Arc<MockPage> {
    let page = Arc::new(MockPage::new());
    page.add_element(
        "#input",
        Rect {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 20.0,
        },
        true,
    );
    page
}

fn no_typo_options() -> TypingOptions {
    TypingOptions {
        typo_probability: 0.0,
        ..TypingOptions::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_typing_without_typos_sends_text_verbatim() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    humanizer
        .send_keys("#input", "hello there", &no_typo_options())
        .await
        .unwrap();

    let typed: String = page.typed_chars().into_iter().collect();
    assert_eq!(typed, "hello there");
    assert_eq!(page.backspace_count(), 0);
    assert_eq!(page.focused().as_deref(), Some("#input"));
}

#[tokio::test(start_paused = true)]
async fn test_typing_with_certain_typos_corrects_them() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);
    let options = TypingOptions {
        typo_probability: 1.0,
        ..TypingOptions::default()
    };

    humanizer
        .send_keys("#input", "hello", &options)
        .await
        .unwrap();

    // "hello" has three interior characters, each mistyped then erased
    assert_eq!(page.backspace_count(), 3);
    assert_eq!(page.typed_chars().len(), 5 + 3);
}

#[tokio::test]
async fn test_typing_empty_text_is_a_no_op() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    humanizer
        .send_keys("#input", "", &TypingOptions::default())
        .await
        .unwrap();

    assert!(page.typed_chars().is_empty());
    assert!(page.focused().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_pause_sleeps_for_drawn_duration() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page, 42);

    let before = Instant::now();
    humanizer.pause(1.0, 1.0).await.unwrap();

    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

#[tokio::test]
async fn test_pause_rejects_invalid_ranges() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page, 42);

    assert!(matches!(
        humanizer.pause(-1.0, 2.0).await,
        Err(Error::InvalidRange(_))
    ));
    assert!(matches!(
        humanizer.pause(3.0, 1.0).await,
        Err(Error::InvalidRange(_))
    ));
}

#[tokio::test]
async fn test_scroll_down_requires_positive_amount() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);
    let options = ScrollOptions::default();

    assert!(matches!(
        humanizer.scroll(Direction::Down, None, &options).await,
        Err(Error::InvalidScrollAmount(_))
    ));
    assert!(matches!(
        humanizer.scroll(Direction::Up, Some(-5.0), &options).await,
        Err(Error::InvalidScrollAmount(_))
    ));
    assert!(page.scroll_steps().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_scroll_step_count_within_bounds() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);
    let options = ScrollOptions::default();

    humanizer
        .scroll(Direction::Down, Some(400.0), &options)
        .await
        .unwrap();

    let steps = page.scroll_steps().len();
    assert!(steps >= options.steps_min && steps <= options.steps_max);
}

#[tokio::test(start_paused = true)]
async fn test_scroll_top_lands_exactly_at_zero() {
    let page = page_with_input();
    page.set_scroll_position(1234.0);
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    humanizer
        .scroll(Direction::Top, None, &ScrollOptions::default())
        .await
        .unwrap();

    assert_eq!(page.current_scroll(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_scroll_bottom_lands_exactly_at_document_height() {
    let page = page_with_input();
    page.set_document_height(3000.0);
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    humanizer
        .scroll(Direction::Bottom, None, &ScrollOptions::default())
        .await
        .unwrap();

    assert_eq!(page.current_scroll(), 3000.0);
}

#[tokio::test(start_paused = true)]
async fn test_click_lands_near_element_center() {
    let page = page_with_input();
    let humanizer = Humanizer::with_seed(page.clone(), 42);
    let options = ClickOptions::default();

    humanizer.click("#input", &options).await.unwrap();

    let clicks = page.clicks();
    assert_eq!(clicks.len(), 1);

    // Element center is (60, 20); the landing point is center plus offset
    let (x, y) = clicks[0];
    assert!((x - 60.0).abs() <= options.movement.max_offset_px);
    assert!((y - 20.0).abs() <= options.movement.max_offset_px);
    assert!(!page.pointer_moves().is_empty());
}

#[tokio::test]
async fn test_click_rejects_non_interactable_target() {
    let page = Arc::new(MockPage::new());
    page.add_element(
        "#hidden",
        Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        },
        false,
    );
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    let result = humanizer.click("#hidden", &ClickOptions::default()).await;

    assert!(matches!(result, Err(Error::TargetNotInteractable(_))));
    assert!(page.pointer_moves().is_empty());
    assert!(page.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_form_fill_runs_fields_in_order() {
    let page = Arc::new(MockPage::new());
    let rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 50.0,
        height: 20.0,
    };
    page.add_element("#user", rect, true);
    page.add_element("#pass", rect, true);
    page.add_element("#go", rect, true);
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    let fields = vec![
        FormField::Text {
            name: "username".to_string(),
            selector: "#user".to_string(),
            value: "ada".to_string(),
        },
        FormField::Text {
            name: "password".to_string(),
            selector: "#pass".to_string(),
            value: "s3cret".to_string(),
        },
        FormField::Submit {
            name: "submit".to_string(),
            selector: "#go".to_string(),
        },
    ];

    humanizer.form_fill(&fields).await.unwrap();

    let typed: String = page.typed_chars().into_iter().collect();
    assert!(typed.starts_with("ada"));
    assert!(typed.contains("s3cret"));
    assert_eq!(page.clicks().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_form_fill_stops_at_first_failure() {
    let page = Arc::new(MockPage::new());
    page.add_element(
        "#user",
        Rect {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 20.0,
        },
        true,
    );
    let humanizer = Humanizer::with_seed(page.clone(), 42);

    let fields = vec![
        FormField::Text {
            name: "username".to_string(),
            selector: "#user".to_string(),
            value: "ada".to_string(),
        },
        FormField::Submit {
            name: "submit".to_string(),
            selector: "#missing".to_string(),
        },
    ];

    let result = humanizer.form_fill(&fields).await;

    assert!(matches!(result, Err(Error::ElementNotFound(_))));
    // The already-typed field keeps its input
    let typed: String = page.typed_chars().into_iter().collect();
    assert_eq!(typed, "ada");
    assert!(page.clicks().is_empty());
}
