use crate::categories::{Category, CategoryMatcher};
use crate::coerce::coerce_value;
use crate::table::StatementRow;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-category sums over the matched rows of a statement.
///
/// Presence tracks matching: a category absent from the map never matched a
/// row with a usable value, while a present category holds the sum of every
/// matched value, even when that sum is 0.0. Downstream derivation depends on
/// that distinction ("reported as zero" is a figure, "never seen" is a gap).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    totals: BTreeMap<Category, f64>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: Category, value: f64) {
        *self.totals.entry(category).or_insert(0.0) += value;
    }

    /// The summed total, or None when no row ever matched this category.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.totals.get(&category).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.totals.iter().map(|(c, v)| (*c, *v))
    }
}

/// Sum every row's coerced value into every category its label matches.
///
/// Rows with blank labels or values that do not coerce to an amount are
/// skipped. Rows matching several categories are added to each of them, so
/// statements listing both composites and their components double-count by
/// construction; input curation is the caller's lever there.
pub fn aggregate_totals(rows: &[StatementRow], matcher: &CategoryMatcher) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    let mut matched_rows = 0usize;

    for row in rows {
        if row.account.is_empty() {
            continue;
        }
        let value = match coerce_value(&row.value) {
            Some(v) => v,
            None => continue,
        };

        let categories = matcher.matches(&row.account);
        if !categories.is_empty() {
            matched_rows += 1;
        }
        for category in categories {
            totals.add(category, value);
        }
    }

    debug!(
        "aggregated {} of {} rows into {} categories",
        matched_rows,
        rows.len(),
        totals.len()
    );

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CellValue;

    fn row(account: &str, value: impl Into<CellValue>) -> StatementRow {
        StatementRow {
            account: account.to_string(),
            value: value.into(),
        }
    }

    fn matcher() -> CategoryMatcher {
        CategoryMatcher::with_defaults().unwrap()
    }

    #[test]
    fn test_matching_rows_are_summed() {
        let rows = vec![
            row("Revenue", 100.0),
            row("Sales revenue", "50"),
            row("Goodwill", 999.0),
        ];

        let totals = aggregate_totals(&rows, &matcher());
        assert_eq!(totals.get(Category::Revenue), Some(150.0));
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_unmatched_categories_are_absent() {
        let rows = vec![row("Revenue", 100.0)];
        let totals = aggregate_totals(&rows, &matcher());

        assert_eq!(totals.get(Category::Ebitda), None);
        assert_eq!(totals.get(Category::Cash), None);
    }

    #[test]
    fn test_zero_valued_match_is_present() {
        let rows = vec![row("Revenue", 0.0)];
        let totals = aggregate_totals(&rows, &matcher());

        assert_eq!(totals.get(Category::Revenue), Some(0.0));
    }

    #[test]
    fn test_uncoercible_values_are_skipped() {
        let rows = vec![row("Revenue", "n/a"), row("Revenue", CellValue::Empty)];
        let totals = aggregate_totals(&rows, &matcher());

        assert_eq!(totals.get(Category::Revenue), None);
        assert!(totals.is_empty());
    }

    #[test]
    fn test_blank_labels_are_skipped() {
        let rows = vec![row("", 42.0)];
        let totals = aggregate_totals(&rows, &matcher());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_multi_category_rows_count_into_each() {
        let rows = vec![row("Current portion of long-term debt", 30.0)];
        let totals = aggregate_totals(&rows, &matcher());

        assert_eq!(totals.get(Category::ShortTermDebt), Some(30.0));
        assert_eq!(totals.get(Category::LongTermDebt), Some(30.0));
    }

    #[test]
    fn test_parenthesized_amounts_aggregate_as_negative() {
        let rows = vec![row("Net income", "150,000"), row("Net profit", "(20,000)")];
        let totals = aggregate_totals(&rows, &matcher());

        assert_eq!(totals.get(Category::NetIncome), Some(130_000.0));
    }

    #[test]
    fn test_totals_serialize_with_snake_case_keys() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 150.0);
        totals.add(Category::NetIncome, 20.0);

        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"revenue":150.0,"net_income":20.0}"#);
    }
}
