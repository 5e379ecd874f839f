pub mod catalog;
pub mod config;
pub mod insights;
pub mod predict;
pub mod sales;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use salespulse_core::config::{AppConfig, LoadOptions};
use salespulse_core::{ApplicationError, Catalog, SaleRecord, SalesGenerator};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(command, error.error_class(), error.to_string(), error.exit_code())
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config() -> Result<AppConfig, ApplicationError> {
    Ok(AppConfig::load(LoadOptions::default())?)
}

/// Generates the session's sales log. A seed makes the log reproducible
/// for a fixed clock; without one the generator draws from OS entropy.
pub(crate) fn generate_sales(
    config: &AppConfig,
    catalog: &Catalog,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<SaleRecord>, ApplicationError> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let count = count.unwrap_or(config.generator.sale_count);
    let records = SalesGenerator::with_settings(rng, config.generator.settings())
        .generate(catalog, count, Utc::now())?;
    Ok(records)
}

pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, ApplicationError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| {
            ApplicationError::Integration(format!("failed to initialize async runtime: {error}"))
        })?;
    Ok(runtime.block_on(future))
}
