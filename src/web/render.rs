//! HTML pages for the login form and the detector.

use crate::features::{Report, RiskLevel};

const STYLE: &str = "body{font-family:sans-serif;max-width:50rem;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;font-family:monospace}\
.error{color:#b00020}\
.risk-LOW{color:#1b7f3b}.risk-MEDIUM{color:#b26a00}.risk-HIGH{color:#b00020}\
table{border-collapse:collapse;width:100%}td,th{border:1px solid #ccc;padding:.4rem;text-align:left}";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape_html(e)))
        .unwrap_or_default();

    page(
        "Phishing Detector - Login",
        &format!(
            "<h1>Phishing Detector</h1>\n{}\
             <form method=\"post\" action=\"/\">\n\
             <p><label>Username <input name=\"username\" autocomplete=\"username\"></label></p>\n\
             <p><label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label></p>\n\
             <p><button type=\"submit\">Log in</button></p>\n\
             </form>",
            error_html
        ),
    )
}

pub fn detector_page(username: &str, report: Option<&Report>, sample: &str) -> String {
    let mut body = format!(
        "<h1>Phishing Detector</h1>\n\
         <p>Signed in as {} | <a href=\"/logout\">Log out</a></p>\n\
         <form method=\"post\" action=\"/detector\">\n\
         <p><label for=\"email\">Paste the full email, headers included:</label></p>\n\
         <textarea id=\"email\" name=\"email\" rows=\"16\">{}</textarea>\n\
         <p><button type=\"submit\">Scan</button></p>\n\
         </form>\n",
        escape_html(username),
        escape_html(sample)
    );

    if let Some(report) = report {
        body.push_str(&report_section(report));
    }

    page("Phishing Detector", &body)
}

fn report_section(report: &Report) -> String {
    let mut html = format!(
        "<h2>Result: <span class=\"risk-{risk}\">{risk}</span> (score {score})</h2>\n",
        risk = report.risk,
        score = report.score
    );

    if report.flags.is_empty() {
        html.push_str("<p>No phishing indicators found.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Indicator</th><th>Details</th><th>Points</th></tr>\n");
        for flag in &report.flags {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(flag.title),
                escape_html(&flag.description),
                flag.points
            ));
        }
        html.push_str("</table>\n");
    }

    if report.risk != RiskLevel::Low {
        html.push_str("<p class=\"error\">Treat this message with caution.</p>\n");
    }

    html.push_str("<h3>Tips</h3>\n<ul>\n");
    for tip in report.tips {
        html.push_str(&format!("<li>{}</li>\n", escape_html(tip)));
    }
    html.push_str("</ul>\n");
    html
}

pub fn error_page(status: u16, message: &str) -> String {
    page(
        message,
        &format!(
            "<h1>{} {}</h1>\n<p><a href=\"/\">Back</a></p>",
            status,
            escape_html(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scan;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_login_page_error() {
        assert!(!login_page(None).contains("class=\"error\""));
        assert!(login_page(Some("Invalid username or password"))
            .contains("<p class=\"error\">Invalid username or password</p>"));
    }

    #[test]
    fn test_detector_page_echoes_escaped_sample() {
        let sample = "From: <a@x.com>\nReply-To: <b@y.com>\n</textarea><script>";
        let report = scan(sample);
        let html = detector_page("admin", Some(&report), sample);

        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(!html.contains("</textarea><script>"));
        assert!(html.contains("Reply-To Mismatch"));
        assert!(html.contains("From: a@x.com | Reply-To: b@y.com"));
        assert!(html.contains("Never run suspicious attachments."));
    }

    #[test]
    fn test_detector_page_without_report() {
        let html = detector_page("admin", None, "");
        assert!(!html.contains("Result:"));
        assert!(html.contains("Signed in as admin"));
    }
}
