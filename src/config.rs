use clap::Parser;
use std::{
    net::{
        IpAddr,
        SocketAddr,
    },
    time::Duration,
};

pub const DEFAULT_NAMESERVER: &str = "1.1.1.1:53";
pub const DEFAULT_INTERVAL_MINUTES: i64 = 60;
/// One year.
pub const MAX_INTERVAL_MINUTES: i64 = 365 * 24 * 60;

const DNS_PORT: u16 = 53;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    #[clap(long, env = "DNS_WATCH_DOMAIN", help = "The domain name to check (e.g., example.com)")]
    pub domain: Option<String>,

    #[clap(
        long = "dns",
        env = "DNS_WATCH_NAMESERVER",
        help = "The DNS server to query over UDP (host:port)",
        default_value = DEFAULT_NAMESERVER
    )]
    pub nameserver: String,

    #[clap(
        long,
        env = "DNS_WATCH_INTERVAL",
        help = "Interval in minutes between checks. Values <= 0 fall back to 60, values above a year are capped",
        default_value_t = DEFAULT_INTERVAL_MINUTES,
        allow_negative_numbers = true
    )]
    pub interval: i64,

    #[clap(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true, help = "Telegram bot token")]
    pub telegram_bot_token: Option<String>,

    #[clap(long, env = "TELEGRAM_CHAT_ID", help = "Telegram chat to notify")]
    pub telegram_chat_id: Option<String>,

    #[clap(long, help = "Check every record type once, notify about what was found and exit")]
    pub once: bool,

    #[clap(
        long,
        env = "DNS_WATCH_DEADLINE",
        help = "Give up (exit status 1) if not all records were found within this time, e.g. 6h",
        value_parser = humantime::parse_duration
    )]
    pub deadline: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the --domain flag is required")]
    MissingDomain,

    #[error("TELEGRAM_BOT_TOKEN must be set")]
    MissingBotToken,

    #[error("TELEGRAM_CHAT_ID must be set")]
    MissingChatId,

    #[error("unable to resolve DNS server address {value:?}, expected host:port: {source}")]
    UnresolvableNameserver {
        value: String,
        #[source]
        source: std::io::Error,
    },

    #[error("DNS server address {value:?} did not resolve to any address")]
    NoNameserverAddress { value: String },
}

/// Validated configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub domain: String,
    pub nameserver: SocketAddr,
    pub interval: Duration,
    pub bot_token: String,
    pub chat_id: String,
    pub once: bool,
    pub deadline: Option<Duration>,
}

impl Config {
    /// Validates `args`. A nameserver given by host name is resolved once, here.
    pub async fn from_args(args: Args) -> Result<Self, ConfigError> {
        let domain = non_empty(args.domain).ok_or(ConfigError::MissingDomain)?;
        let bot_token = non_empty(args.telegram_bot_token).ok_or(ConfigError::MissingBotToken)?;
        let chat_id = non_empty(args.telegram_chat_id).ok_or(ConfigError::MissingChatId)?;

        Ok(Config {
            domain,
            nameserver: resolve_nameserver(&args.nameserver).await?,
            interval: interval_from_minutes(args.interval),
            bot_token,
            chat_id,
            once: args.once,
            deadline: args.deadline,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|it| it.trim().to_string()).filter(|it| !it.is_empty())
}

/// Non-positive values fall back to [`DEFAULT_INTERVAL_MINUTES`], larger ones are capped at [`MAX_INTERVAL_MINUTES`].
pub fn interval_from_minutes(minutes: i64) -> Duration {
    let minutes = if minutes <= 0 {
        DEFAULT_INTERVAL_MINUTES
    } else {
        minutes.min(MAX_INTERVAL_MINUTES)
    };
    Duration::from_secs(minutes.unsigned_abs() * 60)
}

/// Resolves `host:port`. An empty value means [`DEFAULT_NAMESERVER`], a host or IP without port gets port 53. IPv4
/// addresses are preferred when a host name has several.
pub async fn resolve_nameserver(value: &str) -> Result<SocketAddr, ConfigError> {
    let value = value.trim();
    let value = if value.is_empty() { DEFAULT_NAMESERVER } else { value };

    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DNS_PORT));
    }

    let target = if value.contains(':') {
        value.to_string()
    } else {
        format!("{value}:{DNS_PORT}")
    };

    let addrs = tokio::net::lookup_host(target.as_str())
        .await
        .map_err(|source| ConfigError::UnresolvableNameserver {
            value: value.to_string(),
            source,
        })?
        .collect::<Vec<_>>();

    debug!(?value, ?addrs, "resolved DNS server address");

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ConfigError::NoNameserverAddress {
            value: value.to_string(),
        })
}
