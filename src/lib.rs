//! thryv-backend - Company and Customer registry API
//!
//! Companies live in a key-value store and page through opaque cursors;
//! customers live in a relational store and page by offset. Both share the
//! soft-delete lifecycle and field validation.

pub mod auth;
pub mod cli;
pub mod company;
pub mod config;
pub mod customer;
pub mod errors;
pub mod http_server;
pub mod lifecycle;
pub mod pagination;
pub mod status;
pub mod store;
pub mod validation;
