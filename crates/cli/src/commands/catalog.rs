use salespulse_core::{Catalog, Customer, Product};
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct CatalogOutput<'a> {
    categories: Vec<&'a str>,
    products: &'a [Product],
    customers: &'a [Customer],
}

pub fn run() -> CommandResult {
    let catalog = Catalog::demo();
    let output = CatalogOutput {
        categories: catalog.categories(),
        products: catalog.products(),
        customers: catalog.customers(),
    };

    CommandResult::success_with(
        "catalog",
        format!(
            "{} products and {} customers loaded",
            catalog.products().len(),
            catalog.customers().len()
        ),
        output,
    )
}
