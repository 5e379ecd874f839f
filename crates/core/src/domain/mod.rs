pub mod customer;
pub mod insight;
pub mod product;
pub mod sale;
