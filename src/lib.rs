pub mod config;
pub mod domain_utils;
pub mod features;
pub mod web;

pub use config::AppConfig;
pub use features::{scan, Flag, FlagKind, Report, RiskLevel};
pub use web::WebServer;
