use crate::domain_utils::DomainUtils;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_REGEX: Regex =
        Regex::new(r#"(?i)https?://[^\s'"<>]+"#).expect("url pattern is valid");
}

/// Words that phishing links tend to carry somewhere in the URL.
const SUSPICIOUS_URL_KEYWORDS: [&str; 8] = [
    "login", "verify", "secure", "update", "account", "bank", "confirm", "signin",
];

/// Hosts with this many dots or more (`a.b.c.example.com`) are treated as suspicious.
const MAX_HOST_DOTS: usize = 3;

/// Return every URL in `text` that looks like a phishing link.
///
/// URLs keep their original casing and appearance order. The same URL
/// appearing twice is reported twice.
pub fn detect_suspicious_urls(text: &str) -> Vec<&str> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| is_suspicious_url(url))
        .collect()
}

fn is_suspicious_url(url: &str) -> bool {
    let lower = url.to_lowercase();

    if let Some(keyword) = SUSPICIOUS_URL_KEYWORDS
        .iter()
        .find(|keyword| lower.contains(*keyword))
    {
        log::debug!("Suspicious URL keyword '{}' in {}", keyword, url);
        return true;
    }

    let host = DomainUtils::url_host(&lower);
    let dots = host.matches('.').count();
    if dots >= MAX_HOST_DOTS {
        log::debug!("Deeply nested host {} ({} dots) in {}", host, dots, url);
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_urls_are_flagged() {
        let text = "Go to https://example.com/Account/Reset and http://plain.example.org/";
        assert_eq!(
            detect_suspicious_urls(text),
            vec!["https://example.com/Account/Reset"]
        );
    }

    #[test]
    fn test_keyword_match_is_substring() {
        // "bank" inside "embankment" still counts
        assert_eq!(
            detect_suspicious_urls("http://embankment.example.com"),
            vec!["http://embankment.example.com"]
        );
    }

    #[test]
    fn test_deep_subdomains_are_flagged() {
        let text = "http://a.b.c.example.com/x http://c.example.com/a.b.c.d";
        assert_eq!(detect_suspicious_urls(text), vec!["http://a.b.c.example.com/x"]);
    }

    #[test]
    fn test_scheme_is_case_insensitive_and_casing_preserved() {
        let text = "Visit HTTPS://Secure.Example.COM/Path today";
        assert_eq!(
            detect_suspicious_urls(text),
            vec!["HTTPS://Secure.Example.COM/Path"]
        );
    }

    #[test]
    fn test_url_stops_at_quotes_and_brackets() {
        let text = r#"<a href="http://verify.example.com/x">link</a> <http://update.example.com>"#;
        assert_eq!(
            detect_suspicious_urls(text),
            vec!["http://verify.example.com/x", "http://update.example.com"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "http://bank.example.com http://bank.example.com";
        assert_eq!(detect_suspicious_urls(text).len(), 2);
    }

    #[test]
    fn test_no_urls() {
        assert!(detect_suspicious_urls("").is_empty());
        assert!(detect_suspicious_urls("ftp://login.example.com").is_empty());
    }
}
