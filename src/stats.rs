//! Dashboard views derived from the aggregated tables.
//!
//! Rankings, review shares and RFM averages shown by the presentation
//! layer. The pipeline output is never reordered in place; every view
//! returns its own rows.

use serde::Serialize;
use std::cmp::Ordering;

use crate::analyzers::types::{
    CategoryRevenue, CategorySales, CustomerRfm, DashboardTables, ReviewCount,
};
use crate::analyzers::utility::{mean, round_to};

/// Share of all reviews held by one score, as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewShare {
    pub review_score: i32,
    pub number_of_reviews: usize,
    pub percent: f64,
}

/// Averages over the RFM table, as shown in the metric row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RfmOverview {
    pub avg_recency: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

impl RfmOverview {
    /// Recency and frequency are rounded to one decimal; monetary is left
    /// for [`format_brl`].
    pub fn from_rfm(rfm: &[CustomerRfm]) -> Self {
        let recency: Vec<f64> = rfm.iter().map(|c| c.recency as f64).collect();
        let frequency: Vec<f64> = rfm.iter().map(|c| c.frequency as f64).collect();
        let monetary: Vec<f64> = rfm.iter().map(|c| c.monetary).collect();

        Self {
            avg_recency: round_to(mean(&recency), 1),
            avg_frequency: round_to(mean(&frequency), 1),
            avg_monetary: mean(&monetary),
        }
    }
}

/// Everything the dashboard page shows, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub review_shares: Vec<ReviewShare>,
    pub most_ordered_categories: Vec<CategorySales>,
    pub least_ordered_categories: Vec<CategorySales>,
    pub highest_revenue_categories: Vec<CategoryRevenue>,
    pub lowest_revenue_categories: Vec<CategoryRevenue>,
    pub rfm: RfmOverview,
    pub best_by_recency: Vec<CustomerRfm>,
    pub best_by_frequency: Vec<CustomerRfm>,
    pub best_by_monetary: Vec<CustomerRfm>,
}

impl DashboardSummary {
    pub fn build(tables: &DashboardTables, top_categories: usize, top_customers: usize) -> Self {
        Self {
            review_shares: review_shares(&tables.review_summary),
            most_ordered_categories: top_categories_by_orders(
                &tables.category_sales,
                top_categories,
            ),
            least_ordered_categories: bottom_categories_by_orders(
                &tables.category_sales,
                top_categories,
            ),
            highest_revenue_categories: top_categories_by_revenue(
                &tables.category_revenue,
                top_categories,
            ),
            lowest_revenue_categories: bottom_categories_by_revenue(
                &tables.category_revenue,
                top_categories,
            ),
            rfm: RfmOverview::from_rfm(&tables.customer_rfm),
            best_by_recency: best_customers_by_recency(&tables.customer_rfm, top_customers),
            best_by_frequency: best_customers_by_frequency(&tables.customer_rfm, top_customers),
            best_by_monetary: best_customers_by_monetary(&tables.customer_rfm, top_customers),
        }
    }
}

pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

pub fn review_shares(summary: &[ReviewCount]) -> Vec<ReviewShare> {
    let total: usize = summary.iter().map(|r| r.number_of_reviews).sum();

    summary
        .iter()
        .map(|r| ReviewShare {
            review_score: r.review_score,
            number_of_reviews: r.number_of_reviews,
            percent: pct(r.number_of_reviews, total),
        })
        .collect()
}

fn ranked<T: Clone>(rows: &[T], n: usize, cmp: impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(cmp);
    sorted.truncate(n);
    sorted
}

pub fn top_categories_by_orders(sales: &[CategorySales], n: usize) -> Vec<CategorySales> {
    ranked(sales, n, |a, b| {
        b.number_of_orders
            .cmp(&a.number_of_orders)
            .then_with(|| a.product_category.cmp(&b.product_category))
    })
}

pub fn bottom_categories_by_orders(sales: &[CategorySales], n: usize) -> Vec<CategorySales> {
    ranked(sales, n, |a, b| {
        a.number_of_orders
            .cmp(&b.number_of_orders)
            .then_with(|| a.product_category.cmp(&b.product_category))
    })
}

pub fn top_categories_by_revenue(revenue: &[CategoryRevenue], n: usize) -> Vec<CategoryRevenue> {
    ranked(revenue, n, |a, b| {
        b.total_revenue
            .total_cmp(&a.total_revenue)
            .then_with(|| a.product_category.cmp(&b.product_category))
    })
}

pub fn bottom_categories_by_revenue(revenue: &[CategoryRevenue], n: usize) -> Vec<CategoryRevenue> {
    ranked(revenue, n, |a, b| {
        a.total_revenue
            .total_cmp(&b.total_revenue)
            .then_with(|| a.product_category.cmp(&b.product_category))
    })
}

/// Most recently active customers first.
pub fn best_customers_by_recency(rfm: &[CustomerRfm], n: usize) -> Vec<CustomerRfm> {
    ranked(rfm, n, |a, b| {
        a.recency
            .cmp(&b.recency)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    })
}

pub fn best_customers_by_frequency(rfm: &[CustomerRfm], n: usize) -> Vec<CustomerRfm> {
    ranked(rfm, n, |a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    })
}

pub fn best_customers_by_monetary(rfm: &[CustomerRfm], n: usize) -> Vec<CustomerRfm> {
    ranked(rfm, n, |a, b| {
        b.monetary
            .total_cmp(&a.monetary)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    })
}

/// Formats an amount in Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, frequency: usize, monetary: f64, recency: i64) -> CustomerRfm {
        CustomerRfm {
            customer_id: id.to_string(),
            frequency,
            monetary,
            recency,
        }
    }

    fn sales(category: &str, n: usize) -> CategorySales {
        CategorySales {
            product_category: category.to_string(),
            number_of_orders: n,
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_review_shares_sum_to_hundred() {
        let summary = vec![
            ReviewCount {
                review_score: 1,
                number_of_reviews: 1,
            },
            ReviewCount {
                review_score: 4,
                number_of_reviews: 1,
            },
            ReviewCount {
                review_score: 5,
                number_of_reviews: 2,
            },
        ];
        let shares = review_shares(&summary);

        assert_eq!(shares[2].percent, 50.0);
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_and_bottom_categories() {
        let rows = vec![sales("toys", 5), sales("auto", 1), sales("garden", 9), sales("art", 1)];

        let top = top_categories_by_orders(&rows, 2);
        assert_eq!(top, vec![sales("garden", 9), sales("toys", 5)]);

        let bottom = bottom_categories_by_orders(&rows, 2);
        assert_eq!(bottom, vec![sales("art", 1), sales("auto", 1)]);
    }

    #[test]
    fn test_revenue_ranking_truncates() {
        let rows = vec![
            CategoryRevenue {
                product_category: "a".into(),
                total_revenue: 3.5,
            },
            CategoryRevenue {
                product_category: "b".into(),
                total_revenue: 10.25,
            },
            CategoryRevenue {
                product_category: "c".into(),
                total_revenue: 0.5,
            },
        ];

        let top = top_categories_by_revenue(&rows, 10);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].product_category, "b");

        let bottom = bottom_categories_by_revenue(&rows, 1);
        assert_eq!(bottom[0].product_category, "c");
    }

    #[test]
    fn test_best_customers() {
        let rfm = vec![
            customer("a", 1, 50.0, 10),
            customer("b", 3, 20.0, 0),
            customer("c", 2, 80.0, 4),
        ];

        assert_eq!(best_customers_by_recency(&rfm, 1)[0].customer_id, "b");
        assert_eq!(best_customers_by_frequency(&rfm, 1)[0].customer_id, "b");
        assert_eq!(best_customers_by_monetary(&rfm, 1)[0].customer_id, "c");
    }

    #[test]
    fn test_rfm_overview() {
        let rfm = vec![customer("a", 2, 30.0, 0), customer("b", 1, 5.0, 5)];
        let overview = RfmOverview::from_rfm(&rfm);

        assert_eq!(overview.avg_recency, 2.5);
        assert_eq!(overview.avg_frequency, 1.5);
        assert_eq!(overview.avg_monetary, 17.5);
    }

    #[test]
    fn test_rfm_overview_empty() {
        assert_eq!(RfmOverview::from_rfm(&[]), RfmOverview::default());
    }

    #[test]
    fn test_summary_of_empty_tables() {
        let summary = DashboardSummary::build(&DashboardTables::default(), 10, 5);
        assert!(summary.review_shares.is_empty());
        assert!(summary.most_ordered_categories.is_empty());
        assert!(summary.best_by_monetary.is_empty());
        assert_eq!(summary.rfm, RfmOverview::default());
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(17.5), "R$ 17,50");
        assert_eq!(format_brl(1234.567), "R$ 1.234,57");
        assert_eq!(format_brl(1234567.0), "R$ 1.234.567,00");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
    }
}
