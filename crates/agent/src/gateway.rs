use async_trait::async_trait;
use salespulse_core::{Catalog, Customer, PredictionResult, SaleRecord, SalesInsight};
use thiserror::Error;
use tracing::debug;

use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompt;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("model response is not valid JSON for the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("model response violates schema: {0}")]
    Schema(String),
}

/// Capability boundary to the hosted model. Implementations report
/// failures; substituting fallbacks is the caller's job.
#[async_trait]
pub trait InsightGateway: Send + Sync {
    async fn insights(
        &self,
        records: &[SaleRecord],
        catalog: &Catalog,
    ) -> Result<Vec<SalesInsight>, GatewayError>;

    async fn prediction(
        &self,
        customer: &Customer,
        catalog: &Catalog,
    ) -> Result<PredictionResult, GatewayError>;
}

pub struct LlmGateway<C> {
    client: C,
}

impl<C: LlmClient> LlmGateway<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: LlmClient> InsightGateway for LlmGateway<C> {
    async fn insights(
        &self,
        records: &[SaleRecord],
        catalog: &Catalog,
    ) -> Result<Vec<SalesInsight>, GatewayError> {
        let request = CompletionRequest {
            prompt: prompt::insight_prompt(records, catalog),
            response_schema: prompt::insight_schema(),
        };
        debug!(
            event_name = "agent.gateway.insights_requested",
            record_count = records.len(),
            prompt_chars = request.prompt.len(),
            "requesting sales insights"
        );

        let text = self.client.complete(&request).await?;
        parse_insights(&text)
    }

    async fn prediction(
        &self,
        customer: &Customer,
        catalog: &Catalog,
    ) -> Result<PredictionResult, GatewayError> {
        let request = CompletionRequest {
            prompt: prompt::prediction_prompt(customer, catalog),
            response_schema: prompt::prediction_schema(),
        };
        debug!(
            event_name = "agent.gateway.prediction_requested",
            customer_id = %customer.id,
            prompt_chars = request.prompt.len(),
            "requesting purchase prediction"
        );

        let text = self.client.complete(&request).await?;
        parse_prediction(&text)
    }
}

/// Empty model output counts as no insights. The number of entries is not
/// checked.
pub fn parse_insights(text: &str) -> Result<Vec<SalesInsight>, GatewayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let insights: Vec<SalesInsight> = serde_json::from_str(trimmed)?;
    if let Some(invalid) = insights.iter().find(|insight| !insight.has_valid_confidence()) {
        return Err(GatewayError::Schema(format!(
            "confidence {} is outside 0..=1",
            invalid.confidence
        )));
    }
    Ok(insights)
}

pub fn parse_prediction(text: &str) -> Result<PredictionResult, GatewayError> {
    Ok(serde_json::from_str(text.trim())?)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use salespulse_core::{Catalog, CustomerId, ProductId, SaleId, SaleRecord, Trend};

    use super::{parse_insights, parse_prediction, GatewayError, InsightGateway, LlmGateway};
    use crate::llm::{CompletionRequest, LlmClient, LlmError};

    struct ScriptedClient {
        response: String,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn new(response: &str) -> Self {
            Self { response: response.to_string(), seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.seen.lock().expect("lock").push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn one_record() -> Vec<SaleRecord> {
        vec![SaleRecord {
            id: SaleId("s0".to_string()),
            product_id: ProductId::new("p3"),
            customer_id: CustomerId::new("c2"),
            quantity: 1,
            total_price: Decimal::new(7000, 2),
            timestamp: Utc::now(),
        }]
    }

    #[tokio::test]
    async fn insights_are_parsed_from_model_json() {
        let client = ScriptedClient::new(
            r#"[{"trend":"up","message":"Electronics lead revenue","confidence":0.82},
                {"trend":"down","message":"Furniture is slow","confidence":0.4},
                {"trend":"stable","message":"Apparel is flat","confidence":0.6}]"#,
        );
        let gateway = LlmGateway::new(client);

        let insights =
            gateway.insights(&one_record(), &Catalog::demo()).await.expect("insights should parse");
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].trend, Trend::Up);
        assert_eq!(insights[1].message, "Furniture is slow");

        let seen = gateway.client().seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("Organic Cotton T-Shirt - $70.00"));
        assert_eq!(seen[0].response_schema["type"], "ARRAY");
    }

    #[tokio::test]
    async fn prediction_is_parsed_from_model_json() {
        let client = ScriptedClient::new(
            r#"{"customerId":"c3","recommendedProducts":["p1","p6","p2"],"reasoning":"Works from home"}"#,
        );
        let gateway = LlmGateway::new(client);
        let catalog = Catalog::demo();

        let prediction = gateway
            .prediction(&catalog.customers()[2], &catalog)
            .await
            .expect("prediction should parse");
        assert_eq!(prediction.customer_id, CustomerId::new("c3"));
        assert_eq!(prediction.recommended_products.len(), 3);

        let seen = gateway.client().seen.lock().expect("lock");
        assert!(seen[0].prompt.contains("[Ergonomic Office Chair, Mechanical Keyboard]"));
        assert_eq!(seen[0].response_schema["type"], "OBJECT");
    }

    #[test]
    fn empty_insight_text_means_no_insights() {
        assert!(parse_insights("  ").expect("empty is valid").is_empty());
    }

    #[test]
    fn unknown_trend_is_a_decode_error() {
        let result = parse_insights(r#"[{"trend":"sideways","message":"m","confidence":0.3}]"#);
        assert!(matches!(result, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn out_of_range_confidence_is_a_schema_error() {
        let result = parse_insights(r#"[{"trend":"up","message":"m","confidence":7}]"#);
        assert!(matches!(result, Err(GatewayError::Schema(message)) if message.contains("7")));
    }

    #[test]
    fn prediction_missing_fields_is_a_decode_error() {
        assert!(matches!(parse_prediction("{}"), Err(GatewayError::Decode(_))));
        assert!(matches!(parse_prediction(""), Err(GatewayError::Decode(_))));
    }
}
