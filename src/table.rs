use crate::schema::{CellValue, RawTable};
use log::debug;
use regex::Regex;
use serde::Serialize;

/// One row of the narrow (Account, Value) view of a statement.
///
/// The value is still the raw cell; coercion to an amount happens during
/// aggregation so page-extractor output (two columns of strings) flows
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub account: String,
    pub value: CellValue,
}

/// A statement reduced to its narrow form, with the header of the column the
/// values were taken from (None when the source was already narrow or no
/// year-bearing column could be found).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub rows: Vec<StatementRow>,
    pub period: Option<String>,
}

const FY_ONLY_RANK: i32 = -1;

/// Reduce any table shape to (Account, Value) rows.
///
/// Tables of one or two columns pass through. Wider tables are projected onto
/// the label column and the most recent year-bearing column: headers right of
/// the label column are scanned for `20xx` or `FYnn` tokens, concrete years
/// rank by value, fiscal-year-only tokens rank below every concrete year, and
/// rank ties go to the rightmost column. With no year-bearing header at all,
/// the second column is used.
///
/// This is a total function: every input shape maps to some narrow table.
pub fn normalize_table(table: &RawTable) -> NormalizedTable {
    if table.column_count() <= 2 {
        return NormalizedTable {
            rows: project_column(table, 1),
            period: None,
        };
    }

    let mut selected: Option<(usize, i32)> = None;
    for (idx, header) in table.headers.iter().enumerate().skip(1) {
        if let Some(rank) = year_token_rank(header) {
            match selected {
                Some((_, best)) if rank < best => {}
                _ => selected = Some((idx, rank)),
            }
        }
    }

    match selected {
        Some((idx, rank)) => {
            debug!(
                "wide table: using value column {} ('{}', rank {})",
                idx, table.headers[idx], rank
            );
            NormalizedTable {
                rows: project_column(table, idx),
                period: Some(table.headers[idx].clone()),
            }
        }
        None => {
            debug!("wide table without year-bearing headers: using column 1");
            NormalizedTable {
                rows: project_column(table, 1),
                period: None,
            }
        }
    }
}

/// The concrete-year columns of a wide table, in positional order: every
/// header right of the label column carrying a `20xx` token, with that year.
/// Fiscal-year-only headers (`FY24`) are not trend points.
pub fn year_columns(headers: &[String]) -> Vec<(usize, i32)> {
    let year_re = Regex::new(r"20\d\d").unwrap();

    headers
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, header)| {
            year_re
                .find(header)
                .and_then(|m| m.as_str().parse().ok())
                .map(|year| (idx, year))
        })
        .collect()
}

pub(crate) fn project_column(table: &RawTable, value_idx: usize) -> Vec<StatementRow> {
    table
        .rows
        .iter()
        .map(|row| {
            let account = match row.first() {
                Some(CellValue::Text(s)) => s.trim().to_string(),
                Some(CellValue::Number(n)) => n.to_string(),
                Some(CellValue::Empty) | None => String::new(),
            };
            let value = row.get(value_idx).cloned().unwrap_or(CellValue::Empty);
            StatementRow { account, value }
        })
        .collect()
}

/// Rank of a header for value-column selection: the first `20xx` token as a
/// number, or `FY_ONLY_RANK` for fiscal-year-only tokens, or None.
fn year_token_rank(header: &str) -> Option<i32> {
    let lowered = header.to_lowercase();

    let year_re = Regex::new(r"20\d\d").unwrap();
    if let Some(m) = year_re.find(&lowered) {
        return m.as_str().parse().ok();
    }

    let fiscal_re = Regex::new(r"\bfy\d{2}\b").unwrap();
    if fiscal_re.is_match(&lowered) {
        return Some(FY_ONLY_RANK);
    }

    None
}
