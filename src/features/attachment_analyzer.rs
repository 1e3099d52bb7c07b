use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ATTACHMENT_REGEX: Regex =
        Regex::new(r"(?i)\b([\w\-. ]+\.(?:exe|scr|zip|rar|js|vbs|bat|cmd|msi))\b")
            .expect("attachment pattern is valid");
}

/// File names in `text` ending in an executable or archive extension.
///
/// The name may contain spaces, so a match runs back to the nearest
/// character outside `[\w\-. ]` (e.g. `Open report.zip` in "Open report.zip now").
pub fn detect_attachments(text: &str) -> Vec<&str> {
    ATTACHMENT_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_extends_over_spaces() {
        assert_eq!(
            detect_attachments("See invoice.exe for details"),
            vec!["See invoice.exe"]
        );
    }

    #[test]
    fn test_name_after_punctuation() {
        assert_eq!(
            detect_attachments("Attachment:invoice.exe (42 KB)"),
            vec!["invoice.exe"]
        );
    }

    #[test]
    fn test_multiple_names_in_order() {
        let text = "files: a.ZIP, b-1.js; c.msi";
        assert_eq!(detect_attachments(text), vec!["a.ZIP", "b-1.js", "c.msi"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "run.bat\nrun.bat";
        assert_eq!(detect_attachments(text), vec!["run.bat", "run.bat"]);
    }

    #[test]
    fn test_extension_must_end_word() {
        assert!(detect_attachments("notes.json and setup.exes").is_empty());
        assert!(detect_attachments("report.pdf").is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(detect_attachments("").is_empty());
    }
}
