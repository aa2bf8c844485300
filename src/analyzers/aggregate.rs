use crate::analyzers::types::{
    CategoryRevenue, CategorySales, CustomerRfm, OrderRecord, ReviewCount,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Counts orders per review score, in ascending score order.
///
/// Orders without a score are skipped and scores that never occur are
/// simply absent from the result.
pub fn review_summary(orders: &[&OrderRecord]) -> Vec<ReviewCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();

    for order in orders {
        if let Some(score) = order.review_score {
            *counts.entry(score).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(review_score, number_of_reviews)| ReviewCount {
            review_score,
            number_of_reviews,
        })
        .collect()
}

/// Counts orders per product category, in category name order.
pub fn category_sales(orders: &[&OrderRecord]) -> Vec<CategorySales> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for order in orders {
        if let Some(category) = order.product_category_name_english.as_deref() {
            *counts.entry(category).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(category, number_of_orders)| CategorySales {
            product_category: category.to_string(),
            number_of_orders,
        })
        .collect()
}

/// Sums payment value per product category, in category name order.
///
/// No rounding is applied; a missing payment contributes nothing.
pub fn category_revenue(orders: &[&OrderRecord]) -> Vec<CategoryRevenue> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for order in orders {
        if let Some(category) = order.product_category_name_english.as_deref() {
            *totals.entry(category).or_default() += order.payment_value.unwrap_or(0.0);
        }
    }

    totals
        .into_iter()
        .map(|(category, total_revenue)| CategoryRevenue {
            product_category: category.to_string(),
            total_revenue,
        })
        .collect()
}

struct CustomerActivity {
    last_purchase: NaiveDate,
    frequency: usize,
    monetary: f64,
}

/// Computes recency, frequency and monetary value per customer.
///
/// Recency is measured against the latest purchase date in `orders`, not
/// the current date, so the same slice of data always yields the same
/// numbers.
pub fn customer_rfm(orders: &[&OrderRecord]) -> Vec<CustomerRfm> {
    let mut customers: BTreeMap<&str, CustomerActivity> = BTreeMap::new();

    for order in orders {
        let purchased_on = order.order_purchase_timestamp.date();
        let payment = order.payment_value.unwrap_or(0.0);

        customers
            .entry(order.customer_id.as_str())
            .and_modify(|activity| {
                activity.last_purchase = activity.last_purchase.max(purchased_on);
                activity.frequency += 1;
                activity.monetary += payment;
            })
            .or_insert(CustomerActivity {
                last_purchase: purchased_on,
                frequency: 1,
                monetary: payment,
            });
    }

    let Some(reference_date) = customers.values().map(|a| a.last_purchase).max() else {
        return Vec::new();
    };

    customers
        .into_iter()
        .map(|(customer_id, activity)| CustomerRfm {
            customer_id: customer_id.to_string(),
            frequency: activity.frequency,
            monetary: activity.monetary,
            recency: (reference_date - activity.last_purchase).num_days(),
        })
        .collect()
}
