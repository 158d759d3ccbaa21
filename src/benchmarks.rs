use schemars::JsonSchema;
use serde::Serialize;

/// Median ratio levels for one industry segment, keyed by NAICS prefix.
///
/// The levels are underwriting rules of thumb, not live market data; they
/// give the credit view a fixed yardstick to compare a statement against.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct IndustryBenchmark {
    #[schemars(description = "NAICS sector / subsector prefix")]
    pub naics: u16,

    #[schemars(description = "Display name of the industry segment")]
    pub industry: &'static str,

    pub current_ratio_median: f64,
    pub quick_ratio_median: f64,
    pub debt_to_equity_median: f64,
    pub profit_margin_pct_median: f64,
    pub return_on_assets_pct_median: f64,
}

static BENCHMARKS: [IndustryBenchmark; 9] = [
    IndustryBenchmark {
        naics: 311,
        industry: "Food Manufacturing",
        current_ratio_median: 1.5,
        quick_ratio_median: 1.2,
        debt_to_equity_median: 1.2,
        profit_margin_pct_median: 8.0,
        return_on_assets_pct_median: 6.0,
    },
    IndustryBenchmark {
        naics: 423,
        industry: "Wholesale Trade",
        current_ratio_median: 1.6,
        quick_ratio_median: 1.3,
        debt_to_equity_median: 1.0,
        profit_margin_pct_median: 6.0,
        return_on_assets_pct_median: 5.0,
    },
    IndustryBenchmark {
        naics: 424,
        industry: "Merchant Wholesalers",
        current_ratio_median: 1.6,
        quick_ratio_median: 1.3,
        debt_to_equity_median: 1.0,
        profit_margin_pct_median: 6.0,
        return_on_assets_pct_median: 5.0,
    },
    IndustryBenchmark {
        naics: 44,
        industry: "Retail",
        current_ratio_median: 1.4,
        quick_ratio_median: 1.1,
        debt_to_equity_median: 1.6,
        profit_margin_pct_median: 4.0,
        return_on_assets_pct_median: 4.0,
    },
    IndustryBenchmark {
        naics: 48,
        industry: "Transportation/Logistics",
        current_ratio_median: 1.3,
        quick_ratio_median: 1.0,
        debt_to_equity_median: 2.0,
        profit_margin_pct_median: 3.0,
        return_on_assets_pct_median: 3.0,
    },
    IndustryBenchmark {
        naics: 51,
        industry: "Information/Software",
        current_ratio_median: 2.0,
        quick_ratio_median: 1.8,
        debt_to_equity_median: 0.6,
        profit_margin_pct_median: 12.0,
        return_on_assets_pct_median: 10.0,
    },
    IndustryBenchmark {
        naics: 52,
        industry: "Financial Services",
        current_ratio_median: 1.5,
        quick_ratio_median: 1.3,
        debt_to_equity_median: 1.5,
        profit_margin_pct_median: 10.0,
        return_on_assets_pct_median: 8.0,
    },
    IndustryBenchmark {
        naics: 54,
        industry: "Professional Services",
        current_ratio_median: 1.8,
        quick_ratio_median: 1.6,
        debt_to_equity_median: 0.8,
        profit_margin_pct_median: 12.0,
        return_on_assets_pct_median: 10.0,
    },
    IndustryBenchmark {
        naics: 31,
        industry: "Manufacturing (General)",
        current_ratio_median: 1.5,
        quick_ratio_median: 1.2,
        debt_to_equity_median: 1.2,
        profit_margin_pct_median: 8.0,
        return_on_assets_pct_median: 6.0,
    },
];

pub fn benchmark_table() -> &'static [IndustryBenchmark] {
    &BENCHMARKS
}

/// Resolve an industry by exact display name. Unknown names fall back to the
/// first table row; callers wanting strict behavior can scan
/// `benchmark_table` themselves.
pub fn benchmark_for(industry: &str) -> &'static IndustryBenchmark {
    BENCHMARKS
        .iter()
        .find(|b| b.industry == industry)
        .unwrap_or(&BENCHMARKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_lookup() {
        let bench = benchmark_for("Information/Software");
        assert_eq!(bench.naics, 51);
        assert_eq!(bench.current_ratio_median, 2.0);
        assert_eq!(bench.debt_to_equity_median, 0.6);
    }

    #[test]
    fn test_unknown_industry_falls_back_to_first_row() {
        let bench = benchmark_for("Quantum Llama Farming");
        assert_eq!(bench, &benchmark_table()[0]);
        assert_eq!(bench.industry, "Food Manufacturing");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let bench = benchmark_for("retail");
        assert_eq!(bench.industry, "Food Manufacturing");
    }

    #[test]
    fn test_table_shape() {
        let table = benchmark_table();
        assert_eq!(table.len(), 9);
        assert!(table.iter().all(|b| b.naics > 0));
    }
}
