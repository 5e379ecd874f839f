use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::{customer::CustomerId, product::Product, product::ProductId};

pub const FALLBACK_INSIGHT_MESSAGE: &str = "Unable to generate real-time insights at this moment.";
pub const FALLBACK_INSIGHT_CONFIDENCE: f64 = 0.5;
pub const FALLBACK_PREDICTION_REASONING: &str = "Standard recommendations based on popular items.";
pub const FALLBACK_RECOMMENDATION_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesInsight {
    pub trend: Trend,
    pub message: String,
    pub confidence: f64,
}

impl SalesInsight {
    pub fn fallback() -> Self {
        Self {
            trend: Trend::Stable,
            message: FALLBACK_INSIGHT_MESSAGE.to_string(),
            confidence: FALLBACK_INSIGHT_CONFIDENCE,
        }
    }

    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub customer_id: CustomerId,
    pub recommended_products: Vec<ProductId>,
    pub reasoning: String,
}

impl PredictionResult {
    /// Static recommendation used when the model is unavailable: the first
    /// catalog products in catalog order.
    pub fn fallback(customer_id: &CustomerId, catalog: &Catalog) -> Self {
        Self {
            customer_id: customer_id.clone(),
            recommended_products: catalog
                .products()
                .iter()
                .take(FALLBACK_RECOMMENDATION_COUNT)
                .map(|product| product.id.clone())
                .collect(),
            reasoning: FALLBACK_PREDICTION_REASONING.to_string(),
        }
    }

    /// Recommended products that exist in the catalog, in recommendation order.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.resolve_products(&self.recommended_products)
    }
}

#[cfg(test)]
mod tests {
    use super::{PredictionResult, SalesInsight, Trend};
    use crate::catalog::Catalog;
    use crate::domain::{customer::CustomerId, product::ProductId};

    #[test]
    fn trend_uses_lowercase_wire_names() {
        let insight: SalesInsight =
            serde_json::from_str(r#"{"trend":"down","message":"m","confidence":0.2}"#)
                .expect("insight should decode");
        assert_eq!(insight.trend, Trend::Down);

        let encoded = serde_json::to_string(&SalesInsight::fallback()).expect("encode");
        assert!(encoded.contains(r#""trend":"stable""#));
    }

    #[test]
    fn prediction_uses_camel_case_keys() {
        let prediction: PredictionResult = serde_json::from_str(
            r#"{"customerId":"c1","recommendedProducts":["p2","p9"],"reasoning":"r"}"#,
        )
        .expect("prediction should decode");

        assert_eq!(prediction.customer_id, CustomerId::new("c1"));
        assert_eq!(
            prediction.recommended_products,
            vec![ProductId::new("p2"), ProductId::new("p9")]
        );
    }

    #[test]
    fn resolve_drops_dangling_recommendations() {
        let catalog = Catalog::demo();
        let prediction = PredictionResult {
            customer_id: CustomerId::new("c1"),
            recommended_products: vec![
                ProductId::new("p4"),
                ProductId::new("missing"),
                ProductId::new("p1"),
            ],
            reasoning: "because".to_string(),
        };

        let names: Vec<&str> =
            prediction.resolve(&catalog).iter().map(|product| product.name.as_str()).collect();
        assert_eq!(names, vec!["Ergonomic Office Chair", "Premium Wireless Headphones"]);
    }

    #[test]
    fn fallback_prediction_takes_first_three_catalog_products() {
        let catalog = Catalog::demo();
        let fallback = PredictionResult::fallback(&CustomerId::new("c2"), &catalog);

        assert_eq!(fallback.customer_id, CustomerId::new("c2"));
        assert_eq!(
            fallback.recommended_products,
            vec![ProductId::new("p1"), ProductId::new("p2"), ProductId::new("p3")]
        );
        assert_eq!(fallback.reasoning, "Standard recommendations based on popular items.");
    }

    #[test]
    fn confidence_bounds_are_inclusive() {
        let mut insight = SalesInsight::fallback();
        assert!(insight.has_valid_confidence());
        insight.confidence = 1.0;
        assert!(insight.has_valid_confidence());
        insight.confidence = 1.01;
        assert!(!insight.has_valid_confidence());
    }
}
