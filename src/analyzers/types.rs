//! Data types used by the aggregation pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parser::{score_format, timestamp_format};

/// A single order row deserialized from the dataset CSV.
///
/// Only the columns the pipeline reads are kept; any other column in the
/// file is ignored by the loader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub customer_id: String,
    pub order_id: String,
    pub product_category_name_english: Option<String>,
    #[serde(default, deserialize_with = "score_format::deserialize")]
    pub review_score: Option<i32>,
    pub payment_value: Option<f64>,
    #[serde(deserialize_with = "timestamp_format::deserialize")]
    pub order_purchase_timestamp: NaiveDateTime,
}

/// Number of reviews recorded for one review score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewCount {
    pub review_score: i32,
    pub number_of_reviews: usize,
}

/// Number of orders placed in one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySales {
    pub product_category: String,
    pub number_of_orders: usize,
}

/// Summed payment value for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub product_category: String,
    pub total_revenue: f64,
}

/// Recency, frequency and monetary metrics for a single customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRfm {
    pub customer_id: String,
    pub frequency: usize,
    pub monetary: f64,
    /// Whole days between this customer's last purchase date and the most
    /// recent purchase date in the same table.
    pub recency: i64,
}

/// The four derived tables produced by one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardTables {
    pub review_summary: Vec<ReviewCount>,
    pub category_sales: Vec<CategorySales>,
    pub category_revenue: Vec<CategoryRevenue>,
    pub customer_rfm: Vec<CustomerRfm>,
}

impl DashboardTables {
    pub fn is_empty(&self) -> bool {
        self.review_summary.is_empty()
            && self.category_sales.is_empty()
            && self.category_revenue.is_empty()
            && self.customer_rfm.is_empty()
    }
}
