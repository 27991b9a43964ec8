//! Payload to filename transforms

use crate::error::EntryError;
use crate::models::RenameOptions;

/// Extension given to every renamed file, whatever the source format
pub const TARGET_EXTENSION: &str = "jpg";

/// Remove every leading `'0'`
///
/// `"000123"` becomes `"123"` and `"0"` becomes `""`.
pub fn strip_leading_zeros(payload: &str) -> &str {
    payload.trim_start_matches('0')
}

/// Remove the last four characters; shorter input yields `""`
pub fn strip_last_four_chars(payload: &str) -> &str {
    match payload.char_indices().rev().nth(3) {
        Some((idx, _)) => &payload[..idx],
        None => "",
    }
}

/// Apply the enabled transforms in their fixed order
pub fn transform_payload<'a>(payload: &'a str, options: &RenameOptions) -> &'a str {
    let mut stem = payload;
    if options.strip_leading_zeros {
        stem = strip_leading_zeros(stem);
    }
    if options.strip_last_four_chars {
        stem = strip_last_four_chars(stem);
    }
    stem
}

/// True when `stem` names an entry of the same directory
///
/// Separators of either platform and the `.`/`..` entries are refused.
pub fn is_plain_stem(stem: &str) -> bool {
    !stem.contains(['/', '\\']) && stem != "." && stem != ".."
}

/// Build `<stem>.jpg`
///
/// Fails with `EmptyName` for an empty stem and `InvalidName` for one that
/// would leave the directory.
pub fn target_file_name(stem: &str) -> Result<String, EntryError> {
    if stem.is_empty() {
        return Err(EntryError::EmptyName);
    }
    if !is_plain_stem(stem) {
        return Err(EntryError::InvalidName(stem.to_string()));
    }
    Ok(format!("{stem}.{TARGET_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_zeros() {
        assert_eq!(strip_leading_zeros("000123"), "123");
        assert_eq!(strip_leading_zeros("0"), "");
        assert_eq!(strip_leading_zeros("1020"), "1020");
        assert_eq!(strip_leading_zeros(""), "");

        let once = strip_leading_zeros("00450");
        assert_eq!(strip_leading_zeros(once), once);
    }

    #[test]
    fn test_strip_last_four_chars() {
        assert_eq!(strip_last_four_chars("1234567890"), "123456");
        assert_eq!(strip_last_four_chars("1234"), "");
        assert_eq!(strip_last_four_chars("123"), "");
        assert_eq!(strip_last_four_chars(""), "");
        // Counts characters, not bytes
        assert_eq!(strip_last_four_chars("żółw1234"), "żółw");
    }

    #[test]
    fn test_transform_order() {
        let both = RenameOptions::new(true, true);
        // Zeros go first, then the tail
        assert_eq!(transform_payload("000590123456789", &both), "59012345");
        assert_eq!(transform_payload("00001234", &both), "");

        let none = RenameOptions::default();
        assert_eq!(transform_payload("000123", &none), "000123");

        let zeros = RenameOptions::new(true, false);
        assert_eq!(transform_payload("000123", &zeros), "123");

        let tail = RenameOptions::new(false, true);
        assert_eq!(transform_payload("000123", &tail), "00");
    }

    #[test]
    fn test_target_file_name() {
        assert_eq!(target_file_name("123"), Ok("123.jpg".to_string()));
        assert_eq!(target_file_name("123.jpg"), Ok("123.jpg.jpg".to_string()));
        assert_eq!(target_file_name(""), Err(EntryError::EmptyName));
        assert_eq!(
            target_file_name("../up"),
            Err(EntryError::InvalidName("../up".to_string()))
        );
    }

    #[test]
    fn test_is_plain_stem() {
        assert!(is_plain_stem("0123"));
        assert!(is_plain_stem("a.b"));
        assert!(is_plain_stem("..."));
        assert!(!is_plain_stem("a/b"));
        assert!(!is_plain_stem("a\\b"));
        assert!(!is_plain_stem("/abs"));
        assert!(!is_plain_stem("."));
        assert!(!is_plain_stem(".."));
    }
}
