use salespulse_agent::{GeminiClient, InsightService, LlmGateway};
use salespulse_core::{ApplicationError, Catalog, SalesInsight};
use serde::Serialize;

use crate::commands::{block_on, generate_sales, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct InsightsOutput {
    record_count: usize,
    insights: Vec<SalesInsight>,
}

pub fn run(count: Option<usize>, seed: Option<u64>) -> CommandResult {
    match execute(count, seed) {
        Ok(output) => CommandResult::success_with(
            "insights",
            format!("{} insights for {} sales", output.insights.len(), output.record_count),
            output,
        ),
        Err(error) => CommandResult::from_error("insights", &error),
    }
}

fn execute(count: Option<usize>, seed: Option<u64>) -> Result<InsightsOutput, ApplicationError> {
    let config = load_config()?;
    let catalog = Catalog::demo();
    let records = generate_sales(&config, &catalog, count, seed)?;

    let client = GeminiClient::new(&config.llm)
        .map_err(|error| ApplicationError::Integration(error.to_string()))?;
    let service = InsightService::new(LlmGateway::new(client));
    let insights = block_on(service.fetch_insights(&records, &catalog))?;

    Ok(InsightsOutput { record_count: records.len(), insights })
}
