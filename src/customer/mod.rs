//! # Customer
//!
//! Customers are stored in a relational table with a unique
//! `identification` column and listed through offset pagination.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{CreateCustomer, Customer, Gender, UpdateCustomer};
pub use repository::CustomerRepository;
pub use service::{CustomerPage, CustomerService};
