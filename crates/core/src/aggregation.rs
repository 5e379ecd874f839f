use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::sale::SaleRecord;

pub const UNKNOWN_CATEGORY: &str = "Other";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Short chart label such as `Mar 05`.
    pub label: String,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub total_revenue: Decimal,
    pub order_count: usize,
    pub average_order_value: Decimal,
}

/// Revenue per UTC calendar day, oldest day first.
pub fn daily_revenue(records: &[SaleRecord]) -> Vec<DailyRevenue> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.timestamp.date_naive()).or_default() += record.total_price;
    }

    totals
        .into_iter()
        .map(|(date, total)| DailyRevenue { date, label: date.format("%b %d").to_string(), total })
        .collect()
}

/// Revenue per product category in first-encounter order. Records whose
/// product is missing from the catalog count towards [`UNKNOWN_CATEGORY`].
pub fn category_revenue(records: &[SaleRecord], catalog: &Catalog) -> Vec<CategoryRevenue> {
    let mut buckets: Vec<CategoryRevenue> = Vec::new();
    for record in records {
        let category = catalog
            .find_product(&record.product_id)
            .map(|product| product.category.as_str())
            .unwrap_or(UNKNOWN_CATEGORY);

        match buckets.iter().position(|bucket| bucket.category == category) {
            Some(index) => buckets[index].total += record.total_price,
            None => buckets
                .push(CategoryRevenue { category: category.to_string(), total: record.total_price }),
        }
    }
    buckets
}

pub fn summarize(records: &[SaleRecord]) -> SalesSummary {
    let total_revenue: Decimal = records.iter().map(|record| record.total_price).sum();
    let order_count = records.len();
    let average_order_value = if order_count == 0 {
        Decimal::ZERO
    } else {
        (total_revenue / Decimal::from(order_count)).round_dp(2)
    };

    SalesSummary { total_revenue, order_count, average_order_value }
}
