//! SalesPulse core: catalog, synthetic sales generation and revenue
//! aggregation for the dashboard. Everything here is synchronous and pure
//! apart from the caller-supplied random source.

pub mod aggregation;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod generator;

pub use aggregation::{
    category_revenue, daily_revenue, summarize, CategoryRevenue, DailyRevenue, SalesSummary,
    UNKNOWN_CATEGORY,
};
pub use catalog::Catalog;
pub use domain::customer::{Customer, CustomerId};
pub use domain::insight::{PredictionResult, SalesInsight, Trend};
pub use domain::product::{Product, ProductId};
pub use domain::sale::{SaleId, SaleRecord};
pub use errors::{ApplicationError, DomainError};
pub use generator::{GeneratorSettings, SalesGenerator, TotalPriceMode};
