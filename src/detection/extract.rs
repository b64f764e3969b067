use lazy_static::lazy_static;
use regex::Regex;

pub const SUBJECT_FALLBACK: &str = "Manual Analysis";
pub const SENDER_PLACEHOLDER: &str = "unknown@manual-entry.com";

const SUBJECT_MAX_CHARS: usize = 60;
const SUBJECT_KEPT_CHARS: usize = 57;
const ELLIPSIS: &str = "...";

lazy_static! {
    static ref EMAIL_ADDRESS: Regex =
        Regex::new(r"[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+").unwrap();
}

/// First line of the text, trimmed and clipped to 60 characters.
pub fn extract_subject(text: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return SUBJECT_FALLBACK.to_string();
    }

    if first_line.chars().count() > SUBJECT_MAX_CHARS {
        let kept: String = first_line.chars().take(SUBJECT_KEPT_CHARS).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        first_line.to_string()
    }
}

/// First address-looking token in the text, or the placeholder.
pub fn extract_sender(text: &str) -> String {
    EMAIL_ADDRESS
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| SENDER_PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_is_first_trimmed_line() {
        assert_eq!(
            extract_subject("  Urgent: account locked  \nBody text here"),
            "Urgent: account locked"
        );
    }

    #[test]
    fn test_subject_truncated_to_sixty_chars() {
        let line = "a".repeat(70);
        let subject = extract_subject(&format!("{line}\nrest"));

        assert_eq!(subject.chars().count(), 60);
        assert!(subject.ends_with("..."));
        assert_eq!(&subject[..57], &line[..57]);
    }

    #[test]
    fn test_subject_of_exactly_sixty_chars_is_kept() {
        let line = "b".repeat(60);
        assert_eq!(extract_subject(&line), line);
    }

    #[test]
    fn test_subject_counts_chars_not_bytes() {
        let line = "é".repeat(59);
        assert_eq!(extract_subject(&line), line);
    }

    #[test]
    fn test_subject_fallback_for_blank_first_line() {
        assert_eq!(extract_subject(""), SUBJECT_FALLBACK);
        assert_eq!(extract_subject("   \nsecond line"), SUBJECT_FALLBACK);
    }

    #[test]
    fn test_sender_first_address() {
        assert_eq!(
            extract_sender("From: billing@amaz0n-support.com\nCc: other@example.org"),
            "billing@amaz0n-support.com"
        );
    }

    #[test]
    fn test_sender_placeholder() {
        assert_eq!(extract_sender("no address in here"), SENDER_PLACEHOLDER);
        assert_eq!(extract_sender("user@localhost"), SENDER_PLACEHOLDER);
    }
}
