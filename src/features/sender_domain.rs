use super::from_address;
use crate::domain_utils::DomainUtils;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SUSPICIOUS_DOMAIN_PATTERN: Regex =
        Regex::new(r"(secure|verify|login|update|account|service|support[\-_])")
            .expect("domain pattern is valid");
}

/// Sender domains with this many hyphens or more are treated as suspicious.
const MAX_DOMAIN_HYPHENS: usize = 2;

/// Return the `From:` address when it looks like a phishing sender.
///
/// An address without `@` is returned as-is. A missing `From:` line or an
/// empty address gives no signal.
pub fn detect_suspicious_sender(text: &str) -> Option<&str> {
    let sender = from_address(text).filter(|sender| !sender.is_empty())?;

    let Some(domain) = DomainUtils::extract_domain(sender) else {
        log::debug!("Malformed sender address: {}", sender);
        return Some(sender);
    };

    if let Some(m) = SUSPICIOUS_DOMAIN_PATTERN.find(&domain) {
        log::debug!("Sender domain {} contains '{}'", domain, m.as_str());
        return Some(sender);
    }

    if domain.matches('-').count() >= MAX_DOMAIN_HYPHENS {
        log::debug!("Sender domain {} has too many hyphens", domain);
        return Some(sender);
    }

    None
}
