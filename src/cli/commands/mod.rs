use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

use crate::gate::authority::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_SERVER_SECRET, DEFAULT_TOTP_ACCOUNT, DEFAULT_TOTP_ISSUER,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("portero")
        .about("Admin authentication gate")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORTERO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("admin-password")
                .long("admin-password")
                .help("Admin panel password")
                .default_value(DEFAULT_ADMIN_PASSWORD)
                .env("PORTERO_ADMIN_PASSWORD"),
        )
        .arg(
            Arg::new("server-secret")
                .long("server-secret")
                .help("Secret used to derive session tokens")
                .default_value(DEFAULT_SERVER_SECRET)
                .env("PORTERO_SERVER_SECRET"),
        )
        .arg(
            Arg::new("totp-secret")
                .long("totp-secret")
                .help("Base32 TOTP secret, leave unset to disable the second factor")
                .env("PORTERO_TOTP_SECRET"),
        )
        .arg(
            Arg::new("totp-issuer")
                .long("totp-issuer")
                .help("Issuer label shown by authenticator apps")
                .default_value(DEFAULT_TOTP_ISSUER)
                .env("PORTERO_TOTP_ISSUER"),
        )
        .arg(
            Arg::new("totp-account")
                .long("totp-account")
                .help("Account label shown by authenticator apps")
                .default_value(DEFAULT_TOTP_ACCOUNT)
                .env("PORTERO_TOTP_ACCOUNT"),
        )
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session cookie lifetime in seconds")
                .default_value("1209600")
                .env("PORTERO_SESSION_TTL_SECONDS")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("secure-cookies")
                .long("secure-cookies")
                .help("Mark session cookies Secure, set this when serving over HTTPS")
                .env("PORTERO_SECURE_COOKIES")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORTERO_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
