//! Order-table aggregation for the sales dashboard.
//!
//! This module filters the base order table to a purchase-date window and
//! derives the review distribution, per-category sales and revenue, and
//! per-customer RFM tables from the rows that remain.

pub mod aggregate;
pub mod analyzer;
pub mod filter;
pub mod types;
pub mod utility;
