use salespulse_core::{
    category_revenue, daily_revenue, summarize, Catalog, CategoryRevenue, DailyRevenue,
    SaleRecord, SalesSummary,
};
use serde::Serialize;

use crate::commands::{generate_sales, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct SalesOutput {
    summary: SalesSummary,
    daily_revenue: Vec<DailyRevenue>,
    category_revenue: Vec<CategoryRevenue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<SaleRecord>>,
}

pub fn run(count: Option<usize>, seed: Option<u64>, include_records: bool) -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("sales", &error),
    };
    let catalog = Catalog::demo();

    let records = match generate_sales(&config, &catalog, count, seed) {
        Ok(records) => records,
        Err(error) => return CommandResult::from_error("sales", &error),
    };

    let output = SalesOutput {
        summary: summarize(&records),
        daily_revenue: daily_revenue(&records),
        category_revenue: category_revenue(&records, &catalog),
        records: include_records.then_some(records),
    };

    CommandResult::success_with(
        "sales",
        format!("{} sales generated", output.summary.order_count),
        output,
    )
}
