pub mod attachment_analyzer;
pub mod link_analyzer;
pub mod sender_alignment;
pub mod sender_domain;
pub mod urgency;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref FROM_HEADER: Regex = address_header_regex("From");
    static ref REPLY_TO_HEADER: Regex = address_header_regex("Reply-To");
}

/// Advice shown alongside every report, independent of the score.
pub const TIPS: [&str; 5] = [
    "Hover links to see the real address before clicking.",
    "Check the sender and Reply-To domains.",
    "Be careful with urgent requests to login/update.",
    "Never run suspicious attachments.",
    "Open official website directly instead of clicking links.",
];

fn address_header_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i){}:\s*(?:".+?"\s*)?<([^>]+)>"#,
        regex::escape(label)
    ))
    .expect("address header pattern is valid")
}

/// Address inside the angle brackets of the first `From:` line, trimmed.
pub fn from_address(text: &str) -> Option<&str> {
    header_address(&FROM_HEADER, text)
}

/// Address inside the angle brackets of the first `Reply-To:` line, trimmed.
pub fn reply_to_address(text: &str) -> Option<&str> {
    header_address(&REPLY_TO_HEADER, text)
}

fn header_address<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    SuspiciousUrls,
    UrgentLanguage,
    SuspiciousSender,
    SuspiciousAttachment,
    ReplyToMismatch,
}

impl FlagKind {
    pub fn title(self) -> &'static str {
        match self {
            FlagKind::SuspiciousUrls => "Suspicious URLs",
            FlagKind::UrgentLanguage => "Urgent Language",
            FlagKind::SuspiciousSender => "Suspicious Sender",
            FlagKind::SuspiciousAttachment => "Suspicious Attachment",
            FlagKind::ReplyToMismatch => "Reply-To Mismatch",
        }
    }

    pub fn points(self) -> u32 {
        match self {
            FlagKind::SuspiciousUrls => 2,
            FlagKind::UrgentLanguage => 1,
            FlagKind::SuspiciousSender => 2,
            FlagKind::SuspiciousAttachment => 2,
            FlagKind::ReplyToMismatch => 1,
        }
    }
}

/// One detector hit: what fired, the evidence, and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    #[serde(skip)]
    pub kind: FlagKind,
    pub title: &'static str,
    pub description: String,
    pub points: u32,
}

impl Flag {
    pub fn new(kind: FlagKind, description: String) -> Self {
        Self {
            kind,
            title: kind.title(),
            description,
            points: kind.points(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 6 => RiskLevel::High,
            s if s >= 3 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub score: u32,
    pub risk: RiskLevel,
    pub flags: Vec<Flag>,
    pub tips: &'static [&'static str],
}

/// Run every detector against `text` and aggregate the hits into a report.
///
/// Detectors run in a fixed order and never fail; text without any signal
/// produces an empty flag list with score 0 and [`RiskLevel::Low`].
pub fn scan(text: &str) -> Report {
    let mut flags = Vec::new();

    let urls = link_analyzer::detect_suspicious_urls(text);
    if !urls.is_empty() {
        flags.push(Flag::new(FlagKind::SuspiciousUrls, urls.join(", ")));
    }

    let urgent = urgency::detect_urgent_words(text);
    if !urgent.is_empty() {
        flags.push(Flag::new(FlagKind::UrgentLanguage, urgent.join(", ")));
    }

    if let Some(sender) = sender_domain::detect_suspicious_sender(text) {
        flags.push(Flag::new(FlagKind::SuspiciousSender, sender.to_string()));
    }

    let attachments = attachment_analyzer::detect_attachments(text);
    if !attachments.is_empty() {
        flags.push(Flag::new(
            FlagKind::SuspiciousAttachment,
            attachments.join(", "),
        ));
    }

    if let Some((from, reply_to)) = sender_alignment::detect_reply_to_mismatch(text) {
        flags.push(Flag::new(
            FlagKind::ReplyToMismatch,
            format!("From: {} | Reply-To: {}", from, reply_to),
        ));
    }

    let score = flags.iter().map(|flag| flag.points).sum();
    let risk = RiskLevel::from_score(score);

    log::debug!(
        "Scan complete: score={} risk={} flags={}",
        score,
        risk,
        flags.len()
    );

    Report {
        score,
        risk,
        flags,
        tips: &TIPS,
    }
}
