use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use salespulse_core::config::{resolve_config_path, AppConfig, LoadOptions};
use salespulse_core::ApplicationError;
use secrecy::ExposeSecret;
use serde::Serialize;
use toml::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    let sources = SourceResolver::detect();
    let mut entries = Vec::new();

    entries.push(sources.entry(
        "llm.api_key",
        &redact_key(config.llm.api_key.expose_secret()),
        &["SALESPULSE_LLM_API_KEY", "GEMINI_API_KEY"],
    ));
    entries.push(sources.entry(
        "llm.base_url",
        &config.llm.base_url,
        &["SALESPULSE_LLM_BASE_URL"],
    ));
    entries.push(sources.entry("llm.model", &config.llm.model, &["SALESPULSE_LLM_MODEL"]));
    entries.push(sources.entry(
        "llm.timeout_secs",
        &config.llm.timeout_secs.to_string(),
        &["SALESPULSE_LLM_TIMEOUT_SECS"],
    ));

    entries.push(sources.entry(
        "generator.sale_count",
        &config.generator.sale_count.to_string(),
        &["SALESPULSE_GENERATOR_SALE_COUNT"],
    ));
    entries.push(sources.entry(
        "generator.window_days",
        &config.generator.window_days.to_string(),
        &["SALESPULSE_GENERATOR_WINDOW_DAYS"],
    ));
    entries.push(sources.entry(
        "generator.max_quantity",
        &config.generator.max_quantity.to_string(),
        &["SALESPULSE_GENERATOR_MAX_QUANTITY"],
    ));
    entries.push(sources.entry(
        "generator.total_price_mode",
        &format!("{:?}", config.generator.total_price_mode),
        &["SALESPULSE_GENERATOR_TOTAL_PRICE_MODE"],
    ));

    entries.push(sources.entry(
        "logging.level",
        &config.logging.level,
        &["SALESPULSE_LOGGING_LEVEL", "SALESPULSE_LOG_LEVEL"],
    ));
    entries.push(sources.entry(
        "logging.format",
        &format!("{:?}", config.logging.format),
        &["SALESPULSE_LOGGING_FORMAT", "SALESPULSE_LOG_FORMAT"],
    ));

    CommandResult::success_with(
        "config",
        "effective config (source precedence: env > file > default)",
        entries,
    )
}

struct SourceResolver {
    path: Option<PathBuf>,
    doc: Option<Value>,
}

impl SourceResolver {
    fn detect() -> Self {
        let path = resolve_config_path(None);
        let doc = load_config_file_doc(path.as_deref());
        Self { path, doc }
    }

    fn entry(&self, key_path: &str, value: &str, env_keys: &[&str]) -> ConfigEntry {
        ConfigEntry {
            key: key_path.to_string(),
            value: value.to_string(),
            source: self.source(key_path, env_keys),
        }
    }

    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        let from_env = env_keys
            .iter()
            .find(|key| env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false));
        if let Some(env_key) = from_env {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn redact_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    let prefix: String = trimmed.chars().take(4).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, redact_key};

    #[test]
    fn redaction_keeps_only_a_short_prefix() {
        assert_eq!(redact_key(""), "<empty>");
        assert_eq!(redact_key("AIzaSyExampleSecret"), "AIza***");
    }

    #[test]
    fn nested_keys_are_found_in_config_document() {
        let doc: Value = "[llm]\nmodel = \"m\"\n".parse().expect("toml should parse");
        assert!(contains_path(&doc, "llm.model"));
        assert!(!contains_path(&doc, "llm.base_url"));
        assert!(!contains_path(&doc, "generator.sale_count"));
    }
}
