use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::Requester;
use crate::error::{invalid_input_error, Error};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoogleMapsConfig {
    pub api_base: String,
    pub api_key: String,
}

/// Process settings read from the environment (and `.env` when present).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` keeps trip records in memory.
    pub database: Option<DatabaseConfig>,
    /// `None` falls back to the fixed demo geocoder.
    pub google_maps: Option<GoogleMapsConfig>,
    /// JSON roster replacing the seeded drivers.
    pub driver_roster_path: Option<PathBuf>,
    pub requester: Requester,
    pub announce: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(err) => {
                tracing::warn!(key, ?err, "ignoring unreadable variable");
                None
            }
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = parse(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        )?;

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: match get("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => parse("DATABASE_MAX_CONNECTIONS", &value)?,
                    None => DEFAULT_MAX_CONNECTIONS,
                },
            }),
            None => None,
        };

        let google_maps = match (get("GOOGLE_MAPS_API_BASE"), get("GOOGLE_MAPS_API_KEY")) {
            (Some(api_base), Some(api_key)) => Some(GoogleMapsConfig { api_base, api_key }),
            (None, None) => None,
            _ => {
                tracing::warn!("google maps needs both GOOGLE_MAPS_API_BASE and GOOGLE_MAPS_API_KEY");
                None
            }
        };

        let requester = match get("REQUESTER_ID") {
            Some(id) => Requester::new(&id, &get("REQUESTER_PROFILE").unwrap_or_default()),
            None => Requester::guest(),
        };

        let announce = match get("ANNOUNCE") {
            Some(value) => parse_flag(&value)?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            database,
            google_maps,
            driver_roster_path: get("DRIVER_ROSTER_PATH").map(PathBuf::from),
            requester,
            announce,
        })
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| {
        tracing::error!(key, value, "invalid configuration value");
        invalid_input_error()
    })
}

fn parse_flag(value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => {
            tracing::error!(key = "ANNOUNCE", value, "invalid configuration value");
            Err(invalid_input_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_run_fully_in_process() {
        let config = config(&[]).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.database, None);
        assert_eq!(config.google_maps, None);
        assert_eq!(config.driver_roster_path, None);
        assert_eq!(config.requester, Requester::guest());
        assert!(!config.announce);
    }

    #[test]
    fn reads_every_setting() {
        let config = config(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DATABASE_URL", "postgresql://paratodos@localhost/paratodos"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("GOOGLE_MAPS_API_BASE", "maps.googleapis.com"),
            ("GOOGLE_MAPS_API_KEY", "key"),
            ("DRIVER_ROSTER_PATH", "drivers.json"),
            ("REQUESTER_ID", "ana"),
            ("REQUESTER_PROFILE", "Deficiência Visual"),
            ("ANNOUNCE", "yes"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database.unwrap().max_connections, 12);
        assert_eq!(config.google_maps.unwrap().api_key, "key");
        assert_eq!(config.driver_roster_path, Some(PathBuf::from("drivers.json")));
        assert_eq!(config.requester, Requester::new("ana", "Deficiência Visual"));
        assert!(config.announce);
    }

    #[test]
    fn half_configured_maps_is_ignored() {
        let config = config(&[("GOOGLE_MAPS_API_KEY", "key")]).unwrap();
        assert_eq!(config.google_maps, None);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("DATABASE_URL", "  "), ("BIND_ADDR", "")]).unwrap();

        assert_eq!(config.database, None);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config(&[("BIND_ADDR", "localhost")]).unwrap_err().is_invalid_input_error());
        assert!(config(&[("DATABASE_URL", "postgresql://x"), ("DATABASE_MAX_CONNECTIONS", "many")])
            .unwrap_err()
            .is_invalid_input_error());
        assert!(config(&[("ANNOUNCE", "maybe")]).unwrap_err().is_invalid_input_error());
    }
}
