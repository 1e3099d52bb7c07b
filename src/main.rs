use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use phishcheck::config::AppConfig;
use phishcheck::{scan, Report, WebServer};
use std::process;

fn main() {
    let matches = Command::new("phishcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rule-based phishing risk scanner for raw email text")
        .long_about(
            "phishcheck scores pasted email text with five heuristics:\n\
             • suspicious URLs (keywords, deep subdomains)\n\
             • urgent wording\n\
             • suspicious sender domains\n\
             • risky attachment names\n\
             • From / Reply-To domain mismatch\n\
             and serves the scanner behind a login-protected web form.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("phishcheck.yaml"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to listen on (overrides config and environment)"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on (overrides config and environment)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-email")
                .long("test-email")
                .value_name("FILE")
                .help("Scan an email file, print the report and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the --test-email report as JSON")
                .requires("test-email")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-detector details")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    if let Some(email_file) = matches.get_one::<String>("test-email") {
        if let Err(e) = test_email_file(email_file, matches.get_flag("json")) {
            eprintln!("❌ {:#}", e);
            process::exit(1);
        }
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("phishcheck.yaml");

    let config = match load_config(
        config_path,
        matches.get_one::<String>("host"),
        matches.get_one::<u16>("port").copied(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {:#}", e);
            process::exit(1);
        }
    };

    let server = match WebServer::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            log::error!("{:#}", e);
            process::exit(1);
        }
    };

    let shutdown = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received shutdown signal, stopping server...");
        shutdown.shutdown();
    }) {
        log::warn!("Failed to install signal handler: {}", e);
    }

    server.run();
}

fn load_config(
    path: &str,
    host: Option<&String>,
    port: Option<u16>,
) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(path)?;
    config.apply_env()?;

    if let Some(host) = host {
        config.server.host = host.clone();
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

fn generate_default_config(path: &str) {
    let config = AppConfig::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Set auth.password (or PHISHCHECK_PASSWORD) before starting the server.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn test_email_file(email_file: &str, json: bool) -> anyhow::Result<()> {
    use anyhow::Context;

    let content = std::fs::read_to_string(email_file)
        .with_context(|| format!("Error reading email file: {}", email_file))?;
    let report = scan(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("🧪 Testing email file: {}", email_file);
        println!();
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    let icon = match report.risk {
        phishcheck::RiskLevel::Low => "✅",
        phishcheck::RiskLevel::Medium => "⚠️ ",
        phishcheck::RiskLevel::High => "🚨",
    };
    println!("{} Risk: {} (score {})", icon, report.risk, report.score);

    if report.flags.is_empty() {
        println!("   No phishing indicators found");
    } else {
        println!("   Indicators:");
        for flag in &report.flags {
            println!("     - {} (+{}): {}", flag.title, flag.points, flag.description);
        }
    }

    println!();
    println!("💡 Tips:");
    for tip in report.tips {
        println!("   • {}", tip);
    }
}
