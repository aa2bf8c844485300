//! Date-range filtering of the base order table.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::analyzers::types::OrderRecord;

/// Inclusive purchase-time window `[start, end]`.
///
/// Bounds are compared at full timestamp precision. A window built from
/// dates starts and ends at midnight, so orders placed later on the `end`
/// date fall outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Builds a window from two calendar dates, each taken at midnight.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        }
    }

    /// The smallest window containing every order, or `None` for an empty table.
    pub fn spanning(orders: &[OrderRecord]) -> Option<Self> {
        let mut timestamps = orders.iter().map(|o| o.order_purchase_timestamp);
        let first = timestamps.next()?;

        let (start, end) = timestamps.fold((first, first), |(lo, hi), ts| {
            (lo.min(ts), hi.max(ts))
        });
        Some(Self { start, end })
    }

    /// Resolves the window selected by optional start and end dates.
    ///
    /// Returns `None` (no filtering) when neither bound is given. A missing
    /// bound falls back to the date of the table's earliest or latest order,
    /// taken at midnight like an explicit date.
    pub fn resolve(
        orders: &[OrderRecord],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Self> {
        if start.is_none() && end.is_none() {
            return None;
        }

        let extent = Self::spanning(orders);
        let start = start.or_else(|| extent.map(|e| e.start.date()))?;
        let end = end.or_else(|| extent.map(|e| e.end.date()))?;
        Some(Self::from_dates(start, end))
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts <= self.end
    }

    /// True when `start > end`; such a window matches nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Returns the orders whose purchase timestamp lies within `range`.
///
/// With no range every order is returned.
pub fn filter_orders<'a>(
    orders: &'a [OrderRecord],
    range: Option<&DateRange>,
) -> Vec<&'a OrderRecord> {
    match range {
        None => orders.iter().collect(),
        Some(range) => orders
            .iter()
            .filter(|o| range.contains(&o.order_purchase_timestamp))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn order(id: &str, at: NaiveDateTime) -> OrderRecord {
        OrderRecord {
            customer_id: "c".to_string(),
            order_id: id.to_string(),
            product_category_name_english: None,
            review_score: None,
            payment_value: None,
            order_purchase_timestamp: at,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_range_is_identity() {
        let orders = vec![order("a", ts(2023, 1, 1, 0)), order("b", ts(2023, 6, 1, 0))];
        let filtered = filter_orders(&orders, None);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let orders = vec![
            order("a", ts(2023, 1, 1, 0)),
            order("b", ts(2023, 1, 5, 0)),
            order("c", ts(2023, 1, 10, 0)),
        ];
        let range = DateRange::new(ts(2023, 1, 1, 0), ts(2023, 1, 10, 0));
        let ids: Vec<_> = filter_orders(&orders, Some(&range))
            .iter()
            .map(|o| o.order_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_end_date_is_not_rounded_to_end_of_day() {
        let orders = vec![order("a", ts(2023, 1, 10, 0)), order("b", ts(2023, 1, 10, 15))];
        let range = DateRange::from_dates(date(2023, 1, 1), date(2023, 1, 10));
        let filtered = filter_orders(&orders, Some(&range));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].order_id, "a");
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let orders = vec![order("a", ts(2023, 1, 5, 0))];
        let range = DateRange::from_dates(date(2023, 2, 1), date(2023, 1, 1));
        assert!(range.is_inverted());
        assert!(filter_orders(&orders, Some(&range)).is_empty());
    }

    #[test]
    fn test_spanning_covers_min_and_max() {
        let orders = vec![
            order("a", ts(2023, 3, 1, 12)),
            order("b", ts(2023, 1, 1, 8)),
            order("c", ts(2023, 2, 1, 0)),
        ];
        let range = DateRange::spanning(&orders).unwrap();
        assert_eq!(range.start, ts(2023, 1, 1, 8));
        assert_eq!(range.end, ts(2023, 3, 1, 12));
        assert_eq!(filter_orders(&orders, Some(&range)).len(), 3);
    }

    #[test]
    fn test_resolve_without_bounds_is_unfiltered() {
        let orders = vec![order("a", ts(2023, 1, 1, 0))];
        assert_eq!(DateRange::resolve(&orders, None, None), None);
    }

    #[test]
    fn test_resolve_fills_missing_end_from_table() {
        let orders = vec![order("a", ts(2023, 1, 1, 9)), order("b", ts(2023, 3, 7, 16))];
        let range = DateRange::resolve(&orders, Some(date(2023, 2, 1)), None).unwrap();
        assert_eq!(range, DateRange::from_dates(date(2023, 2, 1), date(2023, 3, 7)));
    }

    #[test]
    fn test_resolve_fills_missing_start_from_table() {
        let orders = vec![order("a", ts(2023, 1, 1, 9)), order("b", ts(2023, 3, 7, 16))];
        let range = DateRange::resolve(&orders, None, Some(date(2023, 2, 1))).unwrap();
        assert_eq!(range.start, ts(2023, 1, 1, 0));
    }

    #[test]
    fn test_spanning_empty_table() {
        assert!(DateRange::spanning(&[]).is_none());
    }
}
