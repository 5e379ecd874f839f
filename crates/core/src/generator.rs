//! Synthetic sales log for the demo catalog.
//!
//! Every record draws a product, a customer, a recency offset and a quantity
//! uniformly at random. The random source and the clock are supplied by the
//! caller so runs can be replayed exactly with a seeded RNG.
//!
//! By default `total_price` is computed from a second, independent quantity
//! draw and does not necessarily equal `price x quantity`. This keeps the
//! numbers the dashboard has always shown; `TotalPriceMode::Consistent`
//! derives the total from the stored quantity instead.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::sale::{SaleId, SaleRecord};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalPriceMode {
    #[default]
    Independent,
    Consistent,
}

impl std::str::FromStr for TotalPriceMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "independent" => Ok(Self::Independent),
            "consistent" => Ok(Self::Consistent),
            other => Err(DomainError::InvalidInput(format!(
                "unsupported total price mode `{other}` (expected independent|consistent)"
            ))),
        }
    }
}

pub const MAX_WINDOW_DAYS: u32 = 3650;
pub const MAX_SALE_COUNT: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Records fall within `[now - window_days + 1 day, now]`.
    pub window_days: u32,
    pub max_quantity: u32,
    pub total_price_mode: TotalPriceMode,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self { window_days: 30, max_quantity: 3, total_price_mode: TotalPriceMode::Independent }
    }
}

pub struct SalesGenerator<R> {
    rng: R,
    settings: GeneratorSettings,
}

impl<R: Rng> SalesGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_settings(rng, GeneratorSettings::default())
    }

    pub fn with_settings(rng: R, settings: GeneratorSettings) -> Self {
        Self { rng, settings }
    }

    pub fn settings(&self) -> GeneratorSettings {
        self.settings
    }

    /// Produces `count` records sorted by ascending timestamp.
    pub fn generate(
        &mut self,
        catalog: &Catalog,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<SaleRecord>, DomainError> {
        let products = catalog.products();
        let customers = catalog.customers();
        if products.is_empty() {
            return Err(DomainError::InvalidInput(
                "cannot generate sales from a catalog without products".to_string(),
            ));
        }
        if customers.is_empty() {
            return Err(DomainError::InvalidInput(
                "cannot generate sales from a catalog without customers".to_string(),
            ));
        }
        if self.settings.window_days == 0 || self.settings.window_days > MAX_WINDOW_DAYS {
            return Err(DomainError::InvalidInput(format!(
                "generator window_days must be in range 1..={MAX_WINDOW_DAYS}"
            )));
        }
        if count > MAX_SALE_COUNT {
            return Err(DomainError::InvalidInput(format!(
                "cannot generate more than {MAX_SALE_COUNT} sales in one run"
            )));
        }
        if self.settings.max_quantity == 0 {
            return Err(DomainError::InvalidInput(
                "generator max_quantity must be greater than zero".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            let product = &products[self.rng.gen_range(0..products.len())];
            let customer = &customers[self.rng.gen_range(0..customers.len())];
            let days_ago = self.rng.gen_range(0..self.settings.window_days);
            let timestamp = now
                .checked_sub_signed(Duration::days(i64::from(days_ago)))
                .ok_or_else(|| {
                    DomainError::InvalidInput(format!(
                        "sale timestamp {days_ago} days before {now} is out of range"
                    ))
                })?;
            let quantity = self.draw_quantity();
            let priced_quantity = match self.settings.total_price_mode {
                TotalPriceMode::Independent => self.draw_quantity(),
                TotalPriceMode::Consistent => quantity,
            };

            records.push(SaleRecord {
                id: SaleId(format!("s{index}")),
                product_id: product.id.clone(),
                customer_id: customer.id.clone(),
                quantity,
                total_price: product.price * Decimal::from(priced_quantity),
                timestamp,
            });
        }

        records.sort_by_key(|record| record.timestamp);

        debug!(
            event_name = "core.generator.generated",
            record_count = records.len(),
            window_days = self.settings.window_days,
            total_price_mode = ?self.settings.total_price_mode,
            "generated synthetic sales"
        );

        Ok(records)
    }

    fn draw_quantity(&mut self) -> u32 {
        self.rng.gen_range(1..=self.settings.max_quantity)
    }
}
