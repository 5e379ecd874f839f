use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::customer::{Customer, CustomerId};
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// Products and customers for a session. Built once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    customers: Vec<Customer>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, customers: Vec<Customer>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(DomainError::DuplicateId {
                    kind: "product",
                    id: product.id.to_string(),
                });
            }
            if product.price <= Decimal::ZERO {
                return Err(DomainError::InvariantViolation(format!(
                    "product `{}` must have a positive price",
                    product.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for customer in &customers {
            if !seen.insert(customer.id.as_str()) {
                return Err(DomainError::DuplicateId {
                    kind: "customer",
                    id: customer.id.to_string(),
                });
            }
        }

        Ok(Self { products, customers })
    }

    /// Built-in demo catalog: eight products across four categories and
    /// three customers.
    pub fn demo() -> Self {
        let products = vec![
            product("p1", "Premium Wireless Headphones", "Electronics", 29999, 45, "headphones"),
            product("p2", "Smart Fitness Watch", "Electronics", 19999, 120, "watch"),
            product("p3", "Organic Cotton T-Shirt", "Apparel", 3500, 500, "tshirt"),
            product("p4", "Ergonomic Office Chair", "Furniture", 45000, 15, "chair"),
            product("p5", "Stainless Steel Water Bottle", "Home", 2500, 250, "bottle"),
            product("p6", "Noise Cancelling Earbuds", "Electronics", 14999, 80, "earbuds"),
            product("p7", "Leather Messenger Bag", "Apparel", 12000, 30, "bag"),
            product("p8", "Mechanical Keyboard", "Electronics", 15999, 55, "keyboard"),
        ];
        let customers = vec![
            customer("c1", "Alice Johnson", "alice@example.com", &["p1", "p2", "p8"]),
            customer("c2", "Bob Smith", "bob@example.com", &["p3", "p5"]),
            customer("c3", "Charlie Davis", "charlie@example.com", &["p4", "p8"]),
        ];
        Self { products, customers }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn find_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn find_customer(&self, customer_id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| &customer.id == customer_id)
    }

    /// Looks up each id in order, skipping ids with no catalog entry.
    pub fn resolve_products(&self, product_ids: &[ProductId]) -> Vec<&Product> {
        product_ids.iter().filter_map(|id| self.find_product(id)).collect()
    }

    pub fn purchase_history(&self, customer: &Customer) -> Vec<&Product> {
        self.resolve_products(&customer.purchase_history)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    price_cents: i64,
    stock: u32,
    image_seed: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
        image: format!("https://picsum.photos/seed/{image_seed}/400/300"),
    }
}

fn customer(id: &str, name: &str, email: &str, history: &[&str]) -> Customer {
    Customer {
        id: CustomerId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        purchase_history: history.iter().map(|id| ProductId::new(*id)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::Catalog;
    use crate::domain::customer::CustomerId;
    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    #[test]
    fn demo_products_have_positive_prices() {
        for product in Catalog::demo().products() {
            assert!(product.price > Decimal::ZERO, "{} has non-positive price", product.id);
        }
    }

    #[test]
    fn demo_product_ids_are_unique() {
        let catalog = Catalog::demo();
        let ids: HashSet<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.products().len());
    }

    #[test]
    fn demo_catalog_revalidates_through_new() {
        let demo = Catalog::demo();
        let rebuilt = Catalog::new(demo.products().to_vec(), demo.customers().to_vec())
            .expect("demo catalog should satisfy construction invariants");
        assert_eq!(rebuilt.products().len(), 8);
        assert_eq!(rebuilt.customers().len(), 3);
    }

    #[test]
    fn new_rejects_duplicate_product_ids() {
        let demo = Catalog::demo();
        let mut products = demo.products().to_vec();
        products.push(products[0].clone());

        let error = Catalog::new(products, Vec::new()).expect_err("duplicate should fail");
        assert_eq!(error, DomainError::DuplicateId { kind: "product", id: "p1".to_string() });
    }

    #[test]
    fn new_rejects_duplicate_customer_ids() {
        let demo = Catalog::demo();
        let mut customers = demo.customers().to_vec();
        customers.push(customers[2].clone());

        let error = Catalog::new(Vec::new(), customers).expect_err("duplicate should fail");
        assert!(matches!(error, DomainError::DuplicateId { kind: "customer", .. }));
    }

    #[test]
    fn new_rejects_zero_price() {
        let demo = Catalog::demo();
        let mut products = demo.products().to_vec();
        products[3].price = Decimal::ZERO;

        let error = Catalog::new(products, Vec::new()).expect_err("zero price should fail");
        assert!(matches!(error, DomainError::InvariantViolation(message) if message.contains("p4")));
    }

    #[test]
    fn lookups_return_none_for_dangling_ids() {
        let catalog = Catalog::demo();
        assert!(catalog.find_product(&ProductId::new("p99")).is_none());
        assert!(catalog.find_customer(&CustomerId::new("c99")).is_none());
        assert_eq!(
            catalog.find_customer(&CustomerId::new("c2")).map(|c| c.name.as_str()),
            Some("Bob Smith")
        );
    }

    #[test]
    fn purchase_history_skips_unknown_products() {
        let catalog = Catalog::demo();
        let mut customer = catalog.customers()[1].clone();
        customer.purchase_history.insert(1, ProductId::new("retired-sku"));

        let names: Vec<&str> =
            catalog.purchase_history(&customer).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Organic Cotton T-Shirt", "Stainless Steel Water Bottle"]);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        assert_eq!(
            Catalog::demo().categories(),
            vec!["Electronics", "Apparel", "Furniture", "Home"]
        );
    }
}
