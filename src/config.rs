//! Service settings.
//!
//! Resolved from `SUGGEST_*` environment variables, then overridden by the
//! `--bind` and `--log-level` flags. A value that does not parse is a startup
//! error naming the variable.

use crate::catalog::keys::KeyPolicy;
use crate::engine::EngineSettings;
use crate::ingestion::coordinator::IngestOptions;
use crate::search::query::QueryLimits;
use anyhow::{Context, bail};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub log_level: tracing::Level,
    pub engine: EngineSettings,
}

impl Settings {
    /// Settings of the running process.
    pub fn load() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_lookup(|key| std::env::var(key).ok(), &args)
    }

    pub fn from_lookup<F>(lookup: F, args: &[String]) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineSettings::default();
        let get = |key: &str, default: String| lookup(key).unwrap_or(default);

        let mut bind = parse_value("SUGGEST_BIND", &get("SUGGEST_BIND", DEFAULT_BIND.to_string()))?;
        let mut log_level = parse_value("SUGGEST_LOG_LEVEL", &get("SUGGEST_LOG_LEVEL", "info".to_string()))?;

        let engine = EngineSettings {
            limits: QueryLimits {
                max_chars: parse_value(
                    "SUGGEST_MAX_CHARS",
                    &get("SUGGEST_MAX_CHARS", defaults.limits.max_chars.to_string()),
                )?,
                phrase_max_chars: parse_value(
                    "SUGGEST_PHRASE_MAX_CHARS",
                    &get("SUGGEST_PHRASE_MAX_CHARS", defaults.limits.phrase_max_chars.to_string()),
                )?,
            },
            max_hits: parse_value("SUGGEST_MAX_HITS", &get("SUGGEST_MAX_HITS", defaults.max_hits.to_string()))?,
            default_limit: parse_value(
                "SUGGEST_DEFAULT_LIMIT",
                &get("SUGGEST_DEFAULT_LIMIT", defaults.default_limit.to_string()),
            )?,
            max_limit: parse_value("SUGGEST_MAX_LIMIT", &get("SUGGEST_MAX_LIMIT", defaults.max_limit.to_string()))?,
            ingest: IngestOptions {
                key_policy: match lookup("SUGGEST_KEY_POLICY") {
                    Some(value) => value
                        .parse::<KeyPolicy>()
                        .with_context(|| format!("invalid SUGGEST_KEY_POLICY: {:?}", value))?,
                    None => defaults.ingest.key_policy,
                },
                split_by_row_locale: parse_value(
                    "SUGGEST_SPLIT_BY_ROW_LOCALE",
                    &get("SUGGEST_SPLIT_BY_ROW_LOCALE", "false".to_string()),
                )?,
            },
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    bind = parse_value("--bind", flag_value(args, i)?)?;
                    i += 2;
                }
                "--log-level" => {
                    log_level = parse_value("--log-level", flag_value(args, i)?)?;
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        if engine.default_limit == 0 || engine.default_limit > engine.max_limit {
            bail!(
                "SUGGEST_DEFAULT_LIMIT must be between 1 and SUGGEST_MAX_LIMIT ({}), got {}",
                engine.max_limit,
                engine.default_limit
            );
        }

        Ok(Self {
            bind,
            log_level,
            engine,
        })
    }
}

fn flag_value<'a>(args: &'a [String], i: usize) -> anyhow::Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", args[i]))
}

fn parse_value<T>(name: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("invalid {}: {:?} ({})", name, value, e))
}
