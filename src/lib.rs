//! # Financial Statement Analyzer
//!
//! A library for normalizing loosely-structured financial statement tables
//! (CSV/XLSX exports, page-extractor output) into canonical line items,
//! credit ratios, and industry benchmark comparisons.
//!
//! ## Core Concepts
//!
//! - **Raw Table**: headers plus rows of number/text/empty cells, exactly as
//!   a spreadsheet or table extractor hands them over
//! - **Shape Normalization**: wide multi-year tables are projected onto the
//!   label column and the most recent year-bearing column
//! - **Category Matching**: regex recognition of ~21 canonical categories
//!   (revenue, COGS, current assets, ...) over normalized labels
//! - **Basics Derivation**: per-category totals with fallback derivations for
//!   missing composites (EBIT from revenue - COGS - opex, current assets from
//!   cash + receivables + inventory)
//! - **Safe Ratios**: the standard credit ratio set, null instead of panics
//!   or infinities whenever inputs are missing or denominators are zero
//! - **Benchmarks**: built-in industry median levels for side-by-side reads
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_statement_analyzer::*;
//!
//! let table = RawTable::new(
//!     vec!["Line Item".into(), "2023".into(), "2024".into()],
//!     vec![
//!         vec!["Revenue".into(), "1,200,000".into(), "1,350,000".into()],
//!         vec!["COGS".into(), "720,000".into(), "800,000".into()],
//!         vec!["Operating Expenses".into(), "310,000".into(), "335,000".into()],
//!         vec!["Net Income".into(), "120,000".into(), "150,000".into()],
//!         vec!["Current Assets".into(), "160,000".into(), "170,000".into()],
//!         vec!["Current Liabilities".into(), "81,000".into(), "85,000".into()],
//!     ],
//! );
//!
//! let report = analyze_statement(&table).unwrap();
//! assert_eq!(report.ratios.current_ratio, Some(2.0));
//! assert_eq!(report.basics.ebit, Some(215_000.0));
//! println!("{}", report.to_json().unwrap());
//! ```

pub mod aggregate;
pub mod basics;
pub mod benchmarks;
pub mod categories;
pub mod coerce;
pub mod error;
pub mod ratios;
pub mod report;
pub mod schema;
pub mod table;

pub use aggregate::{aggregate_totals, CategoryTotals};
pub use basics::{derive_basics, FinancialBasics};
pub use benchmarks::{benchmark_for, benchmark_table, IndustryBenchmark};
pub use categories::{normalize_label, Category, CategoryMatcher, CategoryPatternSet, PatternSpec};
pub use coerce::coerce_value;
pub use error::{Result, StatementError};
pub use ratios::{compute_ratios, round2, safe_div, FinancialRatios};
pub use report::{health_summary, underwriting_memo};
pub use schema::{CellValue, RawTable};
pub use table::{normalize_table, year_columns, NormalizedTable, StatementRow};

use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full analysis of one statement period: derived line-item figures plus
/// the ratio set computed from them. This is the service response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatementAnalysis {
    #[schemars(description = "Canonical line-item figures, reported or derived; null where unknown")]
    pub basics: FinancialBasics,

    #[schemars(description = "Credit ratios computed from the basics, rounded to two decimals; null where uncomputable")]
    pub ratios: FinancialRatios,
}

impl StatementAnalysis {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(StatementAnalysis)
    }

    pub fn schema_as_json() -> Result<String> {
        let schema = Self::generate_json_schema();
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Statement analyzer with a compiled category matcher.
///
/// Construction compiles the pattern set and is the only fallible step;
/// analysis itself is total. Reuse one analyzer across tables to avoid
/// recompiling patterns.
pub struct StatementAnalyzer {
    matcher: CategoryMatcher,
}

impl StatementAnalyzer {
    /// Analyzer over the built-in category patterns.
    pub fn new() -> Result<Self> {
        Ok(StatementAnalyzer {
            matcher: CategoryMatcher::with_defaults()?,
        })
    }

    /// Analyzer over a caller-supplied pattern set.
    pub fn with_patterns(patterns: &CategoryPatternSet) -> Result<Self> {
        Ok(StatementAnalyzer {
            matcher: CategoryMatcher::new(patterns)?,
        })
    }

    /// Analyze one statement table end to end.
    ///
    /// Never fails: unrecognizable input degrades to a report with null
    /// fields, not an error.
    pub fn analyze(&self, table: &RawTable) -> StatementAnalysis {
        info!(
            "analyzing statement table: {} rows x {} columns",
            table.rows.len(),
            table.column_count()
        );

        let normalized = normalize_table(table);
        debug!(
            "normalized to {} narrow rows (period: {:?})",
            normalized.rows.len(),
            normalized.period
        );

        let totals = aggregate_totals(&normalized.rows, &self.matcher);
        let basics = derive_basics(&totals);
        let ratios = compute_ratios(&basics);

        StatementAnalysis { basics, ratios }
    }

    /// Analyze every concrete-year column of a wide table separately,
    /// keyed by year. Duplicate year headers: the rightmost column wins.
    /// Tables without year-bearing headers yield an empty map.
    pub fn analyze_per_year(&self, table: &RawTable) -> BTreeMap<i32, StatementAnalysis> {
        let mut by_year = BTreeMap::new();

        for (idx, year) in year_columns(&table.headers) {
            let rows = table::project_column(table, idx);
            let totals = aggregate_totals(&rows, &self.matcher);
            let basics = derive_basics(&totals);
            let ratios = compute_ratios(&basics);
            by_year.insert(year, StatementAnalysis { basics, ratios });
        }

        info!("computed {} annual snapshots", by_year.len());
        by_year
    }
}

/// One-shot analysis with the built-in patterns.
pub fn analyze_statement(table: &RawTable) -> Result<StatementAnalysis> {
    Ok(StatementAnalyzer::new()?.analyze(table))
}
