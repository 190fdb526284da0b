//! `cookieguard` - operator tool for signed session cookies.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Loads configuration, sets up logging, and signs or validates cookie
//! values from the command line.

use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use cookieguard::{Config, CookieError, Result, find_cookie, generate_secret};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "cookieguard", about = "Sign and validate session cookies")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a value with the configured seed and cookie name.
    Sign {
        value: String,
        /// Print a full Set-Cookie header instead of the bare cookie value.
        #[clap(long)]
        set_cookie: bool,
    },
    /// Validate a signed cookie value and print its payload.
    Validate {
        cookie: String,
        /// Treat the input as a Cookie request header and look up the configured cookie.
        #[clap(long)]
        header: bool,
    },
    /// Generate a random 32-byte secret.
    Secret,
}

fn load_config() -> Result<Config> {
    let config = Config::from_env()?;
    if !config.has_aes_secret() {
        warn!(
            key_len = config.secret_key().len(),
            "COOKIE_SECRET does not normalize to a 16, 24 or 32 byte key"
        );
    }
    info!(
        cookie_name = %config.cookie_name,
        cookie_expiry_secs = config.cookie_expiry_secs,
        cookie_secure = config.cookie_secure,
        "Configuration loaded"
    );
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let now = SystemTime::now();

    match cli.command {
        Command::Secret => {
            println!("{}", generate_secret());
        }
        Command::Sign { value, set_cookie } => {
            let config = load_config()?;
            let signer = config.signer();
            if set_cookie {
                println!(
                    "{}",
                    signer.set_cookie_header(value.as_bytes(), now, config.cookie_secure)
                );
            } else {
                println!("{}", signer.sign(value.as_bytes(), now));
            }
        }
        Command::Validate { cookie, header } => {
            let config = load_config()?;
            let signer = config.signer();
            let raw = if header {
                find_cookie(&cookie, signer.name())
                    .ok_or_else(|| {
                        CookieError::InvalidInput(format!(
                            "no {} cookie in header",
                            signer.name()
                        ))
                    })?
                    .value
            } else {
                cookie
            };

            let Some(validated) = signer.validate(&raw, now) else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            };
            let signed_at = validated
                .signed_at
                .duration_since(SystemTime::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs());
            println!("{}", String::from_utf8_lossy(&validated.value));
            info!(signed_at, "Cookie accepted");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking);

    if log_format.eq_ignore_ascii_case("pretty") {
        subscriber.init();
    } else {
        subscriber.json().init();
    }

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
