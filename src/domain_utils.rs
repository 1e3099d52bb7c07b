/// Minimal address and URL helpers shared by the detectors
pub struct DomainUtils;

impl DomainUtils {
    /// Lowercased domain of an email address: everything after the first `@`.
    pub fn extract_domain(email: &str) -> Option<String> {
        email.split_once('@').map(|(_, domain)| domain.to_lowercase())
    }

    /// Host part of an http(s) URL: scheme stripped, cut at the first `/`.
    ///
    /// Ports and credentials are left in place.
    pub fn url_host(url: &str) -> &str {
        let rest = ["https://", "http://"]
            .iter()
            .find_map(|scheme| strip_prefix_ignore_case(url, scheme))
            .unwrap_or(url);
        rest.split('/').next().unwrap_or(rest)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
