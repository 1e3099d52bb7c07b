//! Route handling, independent of the HTTP transport.

use super::render;
use super::session::{self, SessionStore};
use crate::config::AuthConfig;
use crate::features::scan;
use std::borrow::Cow;

pub const LOGIN_ERROR: &str = "Invalid username or password";

/// Everything a handler needs from an incoming request.
#[derive(Debug, Clone, Copy)]
pub struct Incoming<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub cookie: Option<&'a str>,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/html; charset=utf-8".to_string())],
            body,
        }
    }

    fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            headers: vec![("Location", location.to_string())],
            body: String::new(),
        }
    }

    fn with_header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::html(status, render::error_page(status, message))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Shared state behind the web routes.
pub struct AppState {
    auth: AuthConfig,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            sessions: SessionStore::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn handle(&self, request: &Incoming<'_>) -> Reply {
        let token = request.cookie.and_then(session::token_from_cookie_header);
        let user = token.and_then(|t| self.sessions.user(t));

        match (request.method, request.path) {
            ("GET", "/") => match user {
                Some(_) => Reply::redirect("/detector"),
                None => Reply::html(200, render::login_page(None)),
            },
            ("POST", "/") => self.login(request.body),
            ("GET", "/logout") => {
                if let Some(token) = token {
                    if self.sessions.remove(token) {
                        log::info!("User logged out");
                    }
                }
                Reply::redirect("/").with_header("Set-Cookie", session::clear_cookie())
            }
            ("GET", "/detector") => match user {
                Some(user) => Reply::html(200, render::detector_page(&user, None, "")),
                None => Reply::redirect("/"),
            },
            ("POST", "/detector") => match user {
                Some(user) => self.detect(&user, request.body),
                None => Reply::redirect("/"),
            },
            (_, "/" | "/detector") => Reply::error(405, "Method Not Allowed")
                .with_header("Allow", "GET, POST".to_string()),
            (_, "/logout") => {
                Reply::error(405, "Method Not Allowed").with_header("Allow", "GET".to_string())
            }
            _ => Reply::error(404, "Not Found"),
        }
    }

    fn login(&self, body: &str) -> Reply {
        let username = form_field(body, "username");
        let password = form_field(body, "password");
        let username = username.trim();
        let password = password.trim();

        if !self.credentials_match(username, password) {
            log::warn!("Failed login attempt for user '{}'", username);
            return Reply::html(200, render::login_page(Some(LOGIN_ERROR)));
        }

        match self.sessions.create(username) {
            Ok(token) => {
                log::info!("User '{}' logged in", username);
                Reply::redirect("/detector").with_header("Set-Cookie", session::set_cookie(&token))
            }
            Err(e) => {
                log::error!("Login failed: {:#}", e);
                Reply::error(500, "Internal Server Error")
            }
        }
    }

    fn credentials_match(&self, username: &str, password: &str) -> bool {
        let Some(expected_password) = self.auth.password.as_deref() else {
            return false;
        };
        // Both comparisons always run.
        let user_ok = constant_time_eq(username.as_bytes(), self.auth.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), expected_password.as_bytes());
        user_ok & pass_ok
    }

    fn detect(&self, user: &str, body: &str) -> Reply {
        let email = form_field(body, "email");
        let report = scan(&email);

        log::info!(
            "Scanned {} bytes for '{}': score={} risk={} flags=[{}]",
            email.len(),
            user,
            report.score,
            report.risk,
            report
                .flags
                .iter()
                .map(|f| f.title)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Reply::html(200, render::detector_page(user, Some(&report), &email))
    }
}

/// First value of `name` in an `application/x-www-form-urlencoded` body, or "".
fn form_field<'a>(body: &'a str, name: &str) -> Cow<'a, str> {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .unwrap_or(Cow::Borrowed(""))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
