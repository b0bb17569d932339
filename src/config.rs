use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Write-acknowledgment policy accepted by the storage system. Only
/// `all` is recognized; anything else is rejected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyLevel {
    All,
}

impl ConsistencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyLevel::All => "all",
        }
    }
}

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub topic: String,
    pub bootstrap_servers: Vec<String>,
    pub group_id: String,
    pub auto_commit: String,
    pub auto_commit_interval_ms: u64,
    pub session_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct InfluxDbConfig {
    pub address: String,
    pub id: String,
    pub password: String,
    pub db_name: String,
    pub retention_policy: String,
    pub consistency_level: ConsistencyLevel,
}

/// Immutable process configuration, loaded once at startup and passed
/// by reference into every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub kafka: KafkaConfig,
    pub influxdb: InfluxDbConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let root: Value = serde_json::from_str(&text).map_err(|e| Error::ConfigSyntax {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_value(&root)
    }

    pub fn from_value(root: &Value) -> Result<Self> {
        let root = as_object(root, &[], "<root>")?;

        let kafka_obj = get_object(root, &[], "kafka")?;
        let kafka = KafkaConfig {
            topic: get_string(kafka_obj, &["kafka"], "topic")?,
            bootstrap_servers: get_string_list(kafka_obj, &["kafka"], "bootstrap.servers")?,
            group_id: get_string(kafka_obj, &["kafka"], "group.id")?,
            auto_commit: get_string(kafka_obj, &["kafka"], "enable.auto.commit")?,
            auto_commit_interval_ms: get_u64(kafka_obj, &["kafka"], "auto.commit.interval.ms")?,
            session_timeout_ms: get_u64(kafka_obj, &["kafka"], "session.timeout.ms")?,
        };

        let influx_obj = get_object(root, &[], "influxdb")?;
        let influxdb = InfluxDbConfig {
            address: get_string(influx_obj, &["influxdb"], "address")?,
            id: get_string(influx_obj, &["influxdb"], "id")?,
            password: get_string(influx_obj, &["influxdb"], "password")?,
            db_name: get_string(influx_obj, &["influxdb"], "db_name")?,
            retention_policy: get_string(influx_obj, &["influxdb"], "retention_policy")?,
            consistency_level: get_consistency(influx_obj, &["influxdb"])?,
        };

        Ok(Self { kafka, influxdb })
    }
}

// The `path` slice is the accumulated location of `key` within the
// config file; error messages join it with ':' (e.g. 'kafka:topic').
fn key_path(path: &[&str], key: &str) -> String {
    path.iter()
        .copied()
        .chain(std::iter::once(key))
        .collect::<Vec<_>>()
        .join(":")
}

fn get<'a>(obj: &'a Map<String, Value>, path: &[&str], key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| Error::MissingConfigKey(key_path(path, key)))
}

fn as_object<'a>(value: &'a Value, path: &[&str], key: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| Error::InvalidConfigValue {
        key: key_path(path, key),
        reason: "expected an object".into(),
    })
}

fn get_object<'a>(
    obj: &'a Map<String, Value>,
    path: &[&str],
    key: &str,
) -> Result<&'a Map<String, Value>> {
    as_object(get(obj, path, key)?, path, key)
}

fn get_string(obj: &Map<String, Value>, path: &[&str], key: &str) -> Result<String> {
    get(obj, path, key)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| Error::InvalidConfigValue {
            key: key_path(path, key),
            reason: "expected a string".into(),
        })
}

fn get_u64(obj: &Map<String, Value>, path: &[&str], key: &str) -> Result<u64> {
    get(obj, path, key)?
        .as_u64()
        .ok_or_else(|| Error::InvalidConfigValue {
            key: key_path(path, key),
            reason: "expected a non-negative integer".into(),
        })
}

fn get_string_list(obj: &Map<String, Value>, path: &[&str], key: &str) -> Result<Vec<String>> {
    let items = get(obj, path, key)?
        .as_array()
        .ok_or_else(|| Error::InvalidConfigValue {
            key: key_path(path, key),
            reason: "expected an array of strings".into(),
        })?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| Error::InvalidConfigValue {
                    key: key_path(path, key),
                    reason: "expected an array of strings".into(),
                })
        })
        .collect()
}

fn get_consistency(obj: &Map<String, Value>, path: &[&str]) -> Result<ConsistencyLevel> {
    let raw = get_string(obj, path, "consistency_level")?;
    match raw.to_lowercase().as_str() {
        "all" => Ok(ConsistencyLevel::All),
        _ => Err(Error::InvalidConfigValue {
            key: key_path(path, "consistency_level"),
            reason: format!("unrecognized consistency level '{}'", raw),
        }),
    }
}
