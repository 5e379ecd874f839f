use salespulse_core::{Catalog, Customer, SaleRecord};
use serde_json::{json, Value};

pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown product";

/// One `"<timestamp>: <product> - $<amount>"` line per record.
pub fn sales_lines(records: &[SaleRecord], catalog: &Catalog) -> String {
    records
        .iter()
        .map(|record| {
            let name = catalog
                .find_product(&record.product_id)
                .map(|product| product.name.as_str())
                .unwrap_or(UNKNOWN_PRODUCT_NAME);
            format!("{}: {} - ${}", record.iso_timestamp(), name, record.total_price)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn insight_prompt(records: &[SaleRecord], catalog: &Catalog) -> String {
    format!(
        "Analyze these sales records and provide 3 key business insights.\n\
         Focus on trends, top performing categories, and areas for improvement.\n\
         Return the response as a JSON array of objects with 'trend' (up/down/stable), \
         'message' (string), and 'confidence' (number 0-1).\n\n\
         Sales Data:\n{}",
        sales_lines(records, catalog)
    )
}

pub fn insight_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "trend": { "type": "STRING", "enum": ["up", "down", "stable"] },
                "message": { "type": "STRING" },
                "confidence": { "type": "NUMBER" }
            },
            "required": ["trend", "message", "confidence"]
        }
    })
}

pub fn prediction_prompt(customer: &Customer, catalog: &Catalog) -> String {
    let history = catalog
        .purchase_history(customer)
        .iter()
        .map(|product| product.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let available = catalog
        .products()
        .iter()
        .map(|product| format!("{}: {} ({})", product.id, product.name, product.category))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on this customer's purchase history: [{history}],\n\
         predict the top 3 items they are most likely to buy next from this catalog:\n\
         {available}\n\n\
         Return a JSON object with 'customerId', 'recommendedProducts' (array of IDs), \
         and 'reasoning' (a brief explanation)."
    )
}

pub fn prediction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "customerId": { "type": "STRING" },
            "recommendedProducts": { "type": "ARRAY", "items": { "type": "STRING" } },
            "reasoning": { "type": "STRING" }
        },
        "required": ["customerId", "recommendedProducts", "reasoning"]
    })
}
