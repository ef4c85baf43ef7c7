// file: src/utils/validation.rs
// description: input validation and text helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// GitHub logins: 1-39 ASCII alphanumerics or single hyphens, not at
    /// either end.
    pub fn validate_account_name(name: &str) -> Result<()> {
        let valid = !name.is_empty()
            && name.len() <= 39
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !name.starts_with('-')
            && !name.ends_with('-')
            && !name.contains("--");

        if !valid {
            return Err(PipelineError::Validation(format!(
                "Invalid account name: {}",
                name
            )));
        }
        Ok(())
    }

    /// Keeps at most `max_chars` characters, never splitting a code point.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => text[..byte_index].to_string(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_account_name() {
        assert!(Validator::validate_account_name("octocat").is_ok());
        assert!(Validator::validate_account_name("cipher-rc5").is_ok());
        assert!(Validator::validate_account_name("").is_err());
        assert!(Validator::validate_account_name("-leading").is_err());
        assert!(Validator::validate_account_name("double--hyphen").is_err());
        assert!(Validator::validate_account_name("has/slash").is_err());
        assert!(Validator::validate_account_name(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(Validator::truncate_chars("short", 10), "short");
        assert_eq!(Validator::truncate_chars("this is long", 4), "this");
        assert_eq!(Validator::truncate_chars("你好世界", 2), "你好");
        assert_eq!(Validator::truncate_chars("", 3), "");
    }
}
