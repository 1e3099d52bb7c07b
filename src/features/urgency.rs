use lazy_static::lazy_static;
use regex::Regex;

/// Pressure phrases, reported in this order.
pub const URGENT_KEYWORDS: [&str; 10] = [
    "urgent",
    "immediately",
    "verify",
    "verify now",
    "suspend",
    "password",
    "login",
    "action required",
    "click here",
    "limited time",
];

lazy_static! {
    static ref KEYWORD_PATTERNS: Vec<(&'static str, Regex)> = URGENT_KEYWORDS
        .iter()
        .map(|keyword| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
            (
                *keyword,
                Regex::new(&pattern).expect("keyword pattern is valid"),
            )
        })
        .collect();
}

/// Keywords from [`URGENT_KEYWORDS`] that occur as whole words in `text`.
///
/// Each keyword is reported at most once, in list order.
pub fn detect_urgent_words(text: &str) -> Vec<&'static str> {
    KEYWORD_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(keyword, _)| *keyword)
        .collect()
}
