use crate::logging::{level_for, mask_api_key};
use tracing_subscriber::filter::LevelFilter;

#[test]
fn test_debug_flag_selects_level() {
    assert_eq!(level_for(true), LevelFilter::DEBUG);
    assert_eq!(level_for(false), LevelFilter::WARN);
}

#[test]
fn test_mask_short_key() {
    assert_eq!(mask_api_key(""), "****");
    assert_eq!(mask_api_key("12345678"), "****");
}

#[test]
fn test_mask_long_key() {
    assert_eq!(mask_api_key("sk-ant-api03-abcdWXYZ"), "sk-a...WXYZ");
}

#[test]
fn test_mask_never_splits_characters() {
    assert_eq!(mask_api_key("aééééééé"), "****");
}
