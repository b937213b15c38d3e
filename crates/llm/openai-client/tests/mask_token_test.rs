//! Unit tests for [`openai_client::mask_token`] and client defaults.

use std::time::Duration;

use openai_client::{mask_token, ChatOptions, OpenAIClient, DEFAULT_CHAT_TIMEOUT};

/// **Test: Short or empty tokens are fully masked.**
#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("sk-12345"), "***");
    assert_eq!(mask_token("sk-proj-12"), "***");
}

/// **Test: Long tokens show first 7 and last 4 characters.**
#[test]
fn mask_token_long_shows_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    let masked = mask_token("sk-proj-1234567890abcdefghijklmnopqrstuvwxyz");
    assert_eq!(masked.len(), 7 + 3 + 4);
    assert!(masked.ends_with("wxyz"));
}

/// **Test: Multi-byte keys never panic on slicing.**
#[test]
fn mask_token_non_ascii_falls_back_to_stars() {
    assert_eq!(mask_token("키키키키키키키키"), "***");
}

#[test]
fn chat_options_default_is_plain_text() {
    let options = ChatOptions::default();
    assert!(!options.json_object);
    assert!((options.temperature - 0.7).abs() < f32::EPSILON);
}

#[test]
fn client_timeout_is_configurable() {
    let client = OpenAIClient::new("sk-invalid".to_string());
    assert_eq!(client.timeout(), DEFAULT_CHAT_TIMEOUT);
    let client = client.with_timeout(Duration::from_secs(3));
    assert_eq!(client.timeout(), Duration::from_secs(3));
}
