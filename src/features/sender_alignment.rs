use super::{from_address, reply_to_address};
use crate::domain_utils::DomainUtils;

/// Compare the `From:` and `Reply-To:` domains.
///
/// Returns both addresses when the domains differ. An address without `@`
/// cannot be compared and also counts as a mismatch. Without both headers
/// there is nothing to compare.
pub fn detect_reply_to_mismatch(text: &str) -> Option<(&str, &str)> {
    let from = from_address(text)?;
    let reply_to = reply_to_address(text)?;

    match (
        DomainUtils::extract_domain(from),
        DomainUtils::extract_domain(reply_to),
    ) {
        (Some(from_domain), Some(reply_domain)) if from_domain == reply_domain => None,
        (Some(from_domain), Some(reply_domain)) => {
            log::debug!(
                "Reply-To domain {} differs from From domain {}",
                reply_domain,
                from_domain
            );
            Some((from, reply_to))
        }
        _ => {
            log::debug!("Uncomparable addresses: {} / {}", from, reply_to);
            Some((from, reply_to))
        }
    }
}
