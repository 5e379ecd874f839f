use salespulse_agent::{GeminiClient, InsightService, LlmGateway};
use salespulse_core::{ApplicationError, Catalog, Customer, CustomerId, PredictionResult, Product};
use serde::Serialize;

use crate::commands::{block_on, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct PredictOutput {
    customer: Customer,
    purchase_history: Vec<Product>,
    prediction: PredictionResult,
    /// Recommended products present in the catalog.
    recommended: Vec<Product>,
}

pub fn run(customer_id: &str) -> CommandResult {
    match execute(customer_id) {
        Ok(output) => CommandResult::success_with(
            "predict",
            format!(
                "{} recommendations for {}",
                output.recommended.len(),
                output.customer.name
            ),
            output,
        ),
        Err(error) => CommandResult::from_error("predict", &error),
    }
}

fn execute(customer_id: &str) -> Result<PredictOutput, ApplicationError> {
    let config = load_config()?;
    let catalog = Catalog::demo();
    let customer = catalog
        .find_customer(&CustomerId::new(customer_id.trim()))
        .cloned()
        .ok_or_else(|| ApplicationError::NotFound(format!("customer `{customer_id}`")))?;

    let client = GeminiClient::new(&config.llm)
        .map_err(|error| ApplicationError::Integration(error.to_string()))?;
    let service = InsightService::new(LlmGateway::new(client));
    let prediction = block_on(service.fetch_prediction(&customer, &catalog))?;

    Ok(PredictOutput {
        purchase_history: catalog.purchase_history(&customer).into_iter().cloned().collect(),
        recommended: prediction.resolve(&catalog).into_iter().cloned().collect(),
        customer,
        prediction,
    })
}
