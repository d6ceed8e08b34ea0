use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;

const CLIENT_DIST_DIR: &str = "app/dist";
const LEGACY_PUBLIC_DIR: &str = "public";

/// Server configuration loaded explicitly from environment variables.
///
/// Optional, with defaults:
/// - `PORT` (3000), `BIND_ADDR` (0.0.0.0)
/// - `STATIC_DIR`: `app/dist` when it exists, otherwise `public`
/// - `CACHE_TTL_SECS` (1800)
/// - `RATE_LIMIT_MAX` (100) requests per `RATE_LIMIT_WINDOW_SECS` (900)
/// - `SNAPSHOT_PATH` (`app/public/headlines.json`)
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub static_dir: PathBuf,
    pub cache_ttl: Duration,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    pub snapshot_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Malformed values are errors; missing ones
    /// take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let bind_addr = parse_or(&lookup, "BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?;
        let cache_ttl = Duration::from_secs(parse_or(&lookup, "CACHE_TTL_SECS", 30 * 60u64)?);
        let rate_limit_max = parse_or(&lookup, "RATE_LIMIT_MAX", 100u32)?;
        let rate_limit_window =
            Duration::from_secs(parse_or(&lookup, "RATE_LIMIT_WINDOW_SECS", 15 * 60u64)?);
        if rate_limit_window.is_zero() {
            return Err(AppError::Config(
                "RATE_LIMIT_WINDOW_SECS must be greater than zero".to_string(),
            ));
        }

        let static_dir = match lookup("STATIC_DIR") {
            Some(dir) => PathBuf::from(dir),
            None if Path::new(CLIENT_DIST_DIR).exists() => PathBuf::from(CLIENT_DIST_DIR),
            None => {
                warn!(
                    dir = LEGACY_PUBLIC_DIR,
                    "client build not found, serving legacy static assets"
                );
                PathBuf::from(LEGACY_PUBLIC_DIR)
            }
        };

        let snapshot_path = lookup("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("app/public/headlines.json"));

        Ok(Self {
            port,
            bind_addr,
            static_dir,
            cache_ttl,
            rate_limit_max,
            rate_limit_window,
            snapshot_path,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw:?}"))),
    }
}
