//! Where "local time" comes from.
//!
//! The local zone is looked up on every call, in this order:
//! 1. the `TZ` environment variable (empty or unknown means UTC),
//! 2. `local_timezone` in `~/.config/aldehyde/datetime.toml`,
//! 3. the operating system's configured zone,
//! 4. UTC.
//!
//! Each lookup reads the config file, so callers converting many values
//! should resolve [`local_zone`] once and pass the zone along.

use std::path::PathBuf;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{DateTimeError, Result};
use crate::zone::{Zone, ZoneDatabase, ZoneResolver};

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// IANA identifier used as the local zone, e.g. `"Europe/Warsaw"`.
    pub local_timezone: Option<String>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("aldehyde").join("datetime.toml"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };

    Config::from_toml_str(&content).unwrap_or_else(|e| {
        warn!("ignoring {}: {e}", path.display());
        Config::default()
    })
}

/// The process's local zone.
pub fn local_zone() -> Zone {
    let tz_env = std::env::var("TZ").ok();
    let system = iana_time_zone::get_timezone()
        .map_err(|e| debug!("cannot read system time zone: {e}"))
        .ok();
    pick_local_zone(tz_env.as_deref(), &load_config(), system.as_deref(), &ZoneDatabase)
}

/// Picks the local zone from the candidate sources.
///
/// A set `TZ` is final: if it cannot be resolved the zone is UTC. Otherwise
/// the first usable id from the config file or the system wins.
pub fn pick_local_zone(
    tz_env: Option<&str>,
    config: &Config,
    system: Option<&str>,
    resolver: &impl ZoneResolver,
) -> Zone {
    if let Some(tz) = tz_env {
        // POSIX allows a leading colon in TZ.
        let tz = tz.strip_prefix(':').unwrap_or(tz);
        return resolve_local(tz, resolver).unwrap_or_else(|e| {
            warn!("TZ={tz:?} is not usable, using UTC: {e}");
            Zone::Utc
        });
    }

    let candidates = [("config", config.local_timezone.as_deref()), ("system", system)];

    for (source, id) in candidates {
        let Some(id) = id else {
            continue;
        };
        match resolve_local(id, resolver) {
            Ok(zone) => return zone,
            Err(e) => debug!("skipping {source} time zone: {e}"),
        }
    }

    warn!("could not determine local time zone, using UTC");
    Zone::Utc
}

/// `"Local"` names the zone being picked here, so it cannot be a source.
fn resolve_local(id: &str, resolver: &impl ZoneResolver) -> Result<Zone> {
    if id == "Local" {
        return Err(DateTimeError::UnknownTimeZone(id.to_string()));
    }
    resolver.resolve(id)
}
