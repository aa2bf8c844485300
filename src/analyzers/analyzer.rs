use crate::analyzers::aggregate::{category_revenue, category_sales, customer_rfm, review_summary};
use crate::analyzers::filter::{DateRange, filter_orders};
use crate::analyzers::types::{DashboardTables, OrderRecord};
use tracing::{debug, info};

/// Filters the base table to `range` and computes all four dashboard tables
/// from the filtered rows.
///
/// The base table is only borrowed. An empty selection, including one
/// caused by an inverted range, produces empty tables rather than an error.
#[tracing::instrument(skip(orders), fields(base_rows = orders.len()))]
pub fn filter_and_aggregate(
    orders: &[OrderRecord],
    range: Option<&DateRange>,
) -> DashboardTables {
    if range.is_some_and(DateRange::is_inverted) {
        debug!("Start of range is after its end");
    }

    let filtered = filter_orders(orders, range);

    let tables = DashboardTables {
        review_summary: review_summary(&filtered),
        category_sales: category_sales(&filtered),
        category_revenue: category_revenue(&filtered),
        customer_rfm: customer_rfm(&filtered),
    };

    info!(
        filtered_rows = filtered.len(),
        review_scores = tables.review_summary.len(),
        categories = tables.category_sales.len(),
        customers = tables.customer_rfm.len(),
        "Dashboard tables computed"
    );

    tables
}
