use salespulse_core::{Catalog, Customer, PredictionResult, SaleRecord, SalesInsight};
use tracing::{info, warn};
use uuid::Uuid;

use crate::gateway::InsightGateway;

/// Caller-facing insight operations. Each call is a single gateway attempt;
/// any failure is logged and replaced by a static fallback.
pub struct InsightService<G> {
    gateway: G,
}

impl<G: InsightGateway> InsightService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn fetch_insights(
        &self,
        records: &[SaleRecord],
        catalog: &Catalog,
    ) -> Vec<SalesInsight> {
        let correlation_id = Uuid::new_v4().to_string();
        match self.gateway.insights(records, catalog).await {
            Ok(insights) => {
                info!(
                    event_name = "agent.service.insights_ready",
                    correlation_id = %correlation_id,
                    insight_count = insights.len(),
                    "sales insights generated"
                );
                insights
            }
            Err(error) => {
                warn!(
                    event_name = "agent.service.insights_fallback",
                    correlation_id = %correlation_id,
                    error = %error,
                    "insight generation failed; using fallback"
                );
                vec![SalesInsight::fallback()]
            }
        }
    }

    pub async fn fetch_prediction(&self, customer: &Customer, catalog: &Catalog) -> PredictionResult {
        let correlation_id = Uuid::new_v4().to_string();
        match self.gateway.prediction(customer, catalog).await {
            Ok(mut prediction) => {
                if prediction.customer_id != customer.id {
                    warn!(
                        event_name = "agent.service.prediction_customer_mismatch",
                        correlation_id = %correlation_id,
                        requested = %customer.id,
                        returned = %prediction.customer_id,
                        "model answered for a different customer; keeping requested id"
                    );
                    prediction.customer_id = customer.id.clone();
                }
                info!(
                    event_name = "agent.service.prediction_ready",
                    correlation_id = %correlation_id,
                    customer_id = %customer.id,
                    recommendation_count = prediction.recommended_products.len(),
                    "purchase prediction generated"
                );
                prediction
            }
            Err(error) => {
                warn!(
                    event_name = "agent.service.prediction_fallback",
                    correlation_id = %correlation_id,
                    customer_id = %customer.id,
                    error = %error,
                    "prediction failed; using fallback"
                );
                PredictionResult::fallback(&customer.id, catalog)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use salespulse_core::{
        Catalog, Customer, CustomerId, PredictionResult, ProductId, SaleRecord, SalesInsight, Trend,
    };

    use super::InsightService;
    use crate::gateway::{GatewayError, InsightGateway};
    use crate::llm::LlmError;

    struct FailingGateway;

    #[async_trait]
    impl InsightGateway for FailingGateway {
        async fn insights(
            &self,
            _records: &[SaleRecord],
            _catalog: &Catalog,
        ) -> Result<Vec<SalesInsight>, GatewayError> {
            Err(LlmError::MissingContent.into())
        }

        async fn prediction(
            &self,
            _customer: &Customer,
            _catalog: &Catalog,
        ) -> Result<PredictionResult, GatewayError> {
            Err(GatewayError::Schema("simulated malformed payload".to_string()))
        }
    }

    struct EchoGateway {
        answer_for: CustomerId,
    }

    #[async_trait]
    impl InsightGateway for EchoGateway {
        async fn insights(
            &self,
            _records: &[SaleRecord],
            _catalog: &Catalog,
        ) -> Result<Vec<SalesInsight>, GatewayError> {
            Ok(vec![SalesInsight {
                trend: Trend::Up,
                message: "Weekend orders are growing".to_string(),
                confidence: 0.9,
            }])
        }

        async fn prediction(
            &self,
            _customer: &Customer,
            _catalog: &Catalog,
        ) -> Result<PredictionResult, GatewayError> {
            Ok(PredictionResult {
                customer_id: self.answer_for.clone(),
                recommended_products: vec![ProductId::new("p6")],
                reasoning: "Audio buyer".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn insight_failure_returns_single_stable_fallback() {
        let service = InsightService::new(FailingGateway);
        let insights = service.fetch_insights(&[], &Catalog::demo()).await;

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].trend, Trend::Stable);
        assert_eq!(insights[0].confidence, 0.5);
        assert_eq!(insights[0].message, "Unable to generate real-time insights at this moment.");
    }

    #[tokio::test]
    async fn prediction_failure_returns_first_three_catalog_products() {
        let service = InsightService::new(FailingGateway);
        let catalog = Catalog::demo();
        let customer = &catalog.customers()[1];

        let prediction = service.fetch_prediction(customer, &catalog).await;
        assert_eq!(prediction.customer_id, customer.id);
        assert_eq!(
            prediction.recommended_products,
            vec![ProductId::new("p1"), ProductId::new("p2"), ProductId::new("p3")]
        );
        assert_eq!(prediction.reasoning, "Standard recommendations based on popular items.");
    }

    #[tokio::test]
    async fn successful_results_pass_through() {
        let service = InsightService::new(EchoGateway { answer_for: CustomerId::new("c1") });
        let catalog = Catalog::demo();

        let insights = service.fetch_insights(&[], &catalog).await;
        assert_eq!(insights[0].message, "Weekend orders are growing");

        let prediction = service.fetch_prediction(&catalog.customers()[0], &catalog).await;
        assert_eq!(prediction.reasoning, "Audio buyer");
        assert_eq!(prediction.recommended_products, vec![ProductId::new("p6")]);
    }

    #[tokio::test]
    async fn mismatched_customer_id_is_replaced_with_requested_one() {
        let service = InsightService::new(EchoGateway { answer_for: CustomerId::new("c9") });
        let catalog = Catalog::demo();

        let prediction = service.fetch_prediction(&catalog.customers()[2], &catalog).await;
        assert_eq!(prediction.customer_id, CustomerId::new("c3"));
    }
}
