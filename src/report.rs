use crate::basics::FinancialBasics;
use crate::benchmarks::IndustryBenchmark;
use crate::ratios::FinancialRatios;

/// A short prose read of the ratio set against common SME underwriting
/// thresholds. Plain text, one finding per line.
pub fn health_summary(ratios: &FinancialRatios) -> String {
    let coverage = ratios
        .ebit_interest_coverage
        .or(ratios.ebitda_interest_coverage);

    let mut lines = vec![
        format!(
            "Liquidity: Current {}, Quick {}. Position appears {} vs SME thresholds.",
            format_ratio(ratios.current_ratio),
            format_ratio(ratios.quick_ratio),
            strength(ratios.current_ratio, 1.8, 1.2),
        ),
        format!(
            "Leverage: D/E {}. Leverage is {} vs peers.",
            format_ratio(ratios.debt_to_equity),
            inverse_strength(ratios.debt_to_equity, 0.8, 1.5),
        ),
        format!(
            "Profitability: Margin {} and ROA {}. Profitability is {} relative to medians.",
            format_pct(ratios.profit_margin_pct),
            format_pct(ratios.return_on_assets_pct),
            strength(ratios.profit_margin_pct, 12.0, 6.0),
        ),
    ];

    if let Some(cov) = coverage {
        let read = if cov >= 3.0 { "adequate" } else { "tight" };
        lines.push(format!("Coverage: Interest coverage {:.2}x ({}).", cov, read));
    }
    if let Some(dscr) = ratios.dscr {
        lines.push(format!(
            "DSCR: {:.2}x based on CFO; >=1.25x preferred for term debt.",
            dscr
        ));
    }

    lines.push(
        "Overall: balanced profile; focus on working capital discipline and consistent cash generation."
            .to_string(),
    );
    lines.join("\n")
}

/// Render a sectioned underwriting memo as plain text. Deterministic for a
/// given report and benchmark; every missing figure renders as "n/a".
pub fn underwriting_memo(
    company: &str,
    fiscal_year: &str,
    industry: &str,
    basics: &FinancialBasics,
    ratios: &FinancialRatios,
    bench: &IndustryBenchmark,
) -> String {
    let cr = ratios.current_ratio;
    let qr = ratios.quick_ratio;
    let de = ratios.debt_to_equity;
    let pm = ratios.profit_margin_pct;
    let roa = ratios.return_on_assets_pct;
    let coverage = ratios
        .ebit_interest_coverage
        .or(ratios.ebitda_interest_coverage);
    let dscr = ratios.dscr;

    let mut sections: Vec<String> = Vec::new();

    sections.push(format!("Underwriting Memo - {} (FY {})", company, fiscal_year));
    sections.push(format!("Industry: {}", industry));
    sections.push("-".repeat(60));

    sections.push("Executive Summary".to_string());
    sections.push(
        [
            format!(
                "Liquidity: Current {} (bench {:.1}), Quick {} (bench {:.1}).",
                format_ratio(cr),
                bench.current_ratio_median,
                format_ratio(qr),
                bench.quick_ratio_median,
            ),
            format!(
                "Leverage: D/E {} (bench {:.1}).",
                format_ratio(de),
                bench.debt_to_equity_median,
            ),
            format!(
                "Profitability: Margin {} (bench {:.1}%), ROA {} (bench {:.1}%).",
                format_pct(pm),
                bench.profit_margin_pct_median,
                format_pct(roa),
                bench.return_on_assets_pct_median,
            ),
            format!(
                "Coverage: Interest coverage {} (target >=3x).",
                format_times(coverage),
            ),
            format!("DSCR: {} (preferred >=1.25x).", format_times(dscr)),
        ]
        .join("\n"),
    );

    sections.push("Financial Snapshot".to_string());
    sections.push(
        [
            format!("Revenue: {}", format_amount(basics.revenue)),
            format!("COGS: {}", format_amount(basics.cogs)),
            format!(
                "Operating Expenses: {}",
                format_amount(basics.operating_expenses)
            ),
            format!("EBIT: {}", format_amount(basics.ebit)),
            format!("EBITDA: {}", format_amount(basics.ebitda)),
            format!("Net Income: {}", format_amount(basics.net_income)),
            format!(
                "Cash: {} | AR: {} | Inventory: {}",
                format_amount(basics.cash),
                format_amount(basics.accounts_receivable),
                format_amount(basics.inventory),
            ),
            format!(
                "Current Assets: {} | Current Liabilities: {}",
                format_amount(basics.current_assets),
                format_amount(basics.current_liabilities),
            ),
            format!(
                "Total Liabilities: {} | Equity: {} | Total Assets: {}",
                format_amount(basics.total_liabilities),
                format_amount(basics.equity),
                format_amount(basics.total_assets),
            ),
            format!(
                "CFO: {} | Interest Paid: {} | Principal Repayment: {}",
                format_amount(basics.cfo),
                format_amount(basics.interest_paid),
                format_amount(basics.principal_repayment),
            ),
            format!(
                "Interest Expense: {}",
                format_amount(basics.interest_expense)
            ),
        ]
        .join("\n"),
    );

    sections.push("Credit View".to_string());
    sections.push(
        [
            format!(
                "Liquidity is {} with working capital cover {}.",
                strength(cr, 1.8, 1.2),
                format_times(cr),
            ),
            format!(
                "Leverage is {} at D/E {} relative to industry median {:.1}.",
                leverage_level(de),
                format_ratio(de),
                bench.debt_to_equity_median,
            ),
            format!(
                "Debt service capacity is {} with coverage {}; DSCR {}.",
                coverage_level(coverage),
                format_times(coverage),
                format_times(dscr),
            ),
            format!(
                "Profitability (margin {}, ROA {}) {} the industry median.",
                format_pct(pm),
                format_pct(roa),
                margin_comparison(pm, bench.profit_margin_pct_median),
            ),
        ]
        .join("\n"),
    );

    sections.push("Key Risks".to_string());
    sections.push(
        [
            "- Revenue/customer concentration may pressure cash flow in a downturn.",
            "- Working capital strain if AR days extend or inventory turns slow.",
            "- Exposure to rising rates on floating debt.",
        ]
        .join("\n"),
    );

    sections.push("Mitigants".to_string());
    sections.push(
        [
            "- Stable gross margins and positive CFO trend.",
            "- Cash buffer; ability to flex SG&A if needed.",
            "- Leverage within sector norms; coverage acceptable on base case.",
        ]
        .join("\n"),
    );

    sections.push("Indicative Decision Framework".to_string());
    sections.push(
        [
            "- Approve with standard terms if: D/E <= 1.5x and interest coverage >= 3x and current ratio >= 1.2x and DSCR >= 1.25x.",
            "- Approve with conditions (e.g. a line of credit) if: coverage 2.0-3.0x or current ratio 1.0-1.2x or DSCR 1.0-1.25x.",
            "- Decline or require collateral if: coverage < 2.0x or DSCR < 1.0x or severe liquidity stress.",
        ]
        .join("\n"),
    );

    sections.join("\n\n")
}

/// Whole amounts with thousands separators; missing renders as "n/a".
fn format_amount(value: Option<f64>) -> String {
    let value = match value {
        Some(v) => v,
        None => return "n/a".to_string(),
    };

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn format_times(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}x", v),
        None => "n/a".to_string(),
    }
}

fn strength(value: Option<f64>, good: f64, ok: f64) -> &'static str {
    match value {
        None => "n/a",
        Some(v) if v >= good => "strong",
        Some(v) if v >= ok => "acceptable",
        Some(_) => "weak",
    }
}

/// For ratios where lower is better (leverage).
fn inverse_strength(value: Option<f64>, good: f64, ok: f64) -> &'static str {
    match value {
        None => "n/a",
        Some(v) if v <= good => "strong",
        Some(v) if v <= ok => "acceptable",
        Some(_) => "elevated",
    }
}

fn leverage_level(debt_to_equity: Option<f64>) -> &'static str {
    match debt_to_equity {
        None => "n/a",
        Some(d) if d <= 1.0 => "conservative",
        Some(d) if d <= 2.0 => "moderate",
        Some(_) => "elevated",
    }
}

fn coverage_level(coverage: Option<f64>) -> &'static str {
    match coverage {
        None => "n/a",
        Some(c) if c >= 3.0 => "adequate",
        Some(_) => "tight",
    }
}

fn margin_comparison(margin: Option<f64>, bench_median: f64) -> &'static str {
    match margin {
        Some(m) if m > bench_median => "outperforms",
        Some(m) if (m - bench_median).abs() <= 2.0 => "aligns with",
        _ => "trails",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::benchmark_for;

    fn sample_ratios() -> FinancialRatios {
        FinancialRatios {
            current_ratio: Some(2.0),
            quick_ratio: Some(1.32),
            debt_to_equity: Some(0.71),
            gross_margin_pct: Some(40.74),
            operating_margin_pct: Some(15.93),
            profit_margin_pct: Some(11.11),
            return_on_assets_pct: Some(25.86),
            ebit_interest_coverage: Some(8.96),
            ebitda_interest_coverage: None,
            dscr: Some(2.5),
        }
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(Some(1_350_000.0)), "1,350,000");
        assert_eq!(format_amount(Some(580.0)), "580");
        assert_eq!(format_amount(Some(-24_500.4)), "-24,500");
        assert_eq!(format_amount(Some(0.0)), "0");
        assert_eq!(format_amount(None), "n/a");
    }

    #[test]
    fn test_health_summary_reads_the_ratios() {
        let summary = health_summary(&sample_ratios());

        assert!(summary.contains("Current 2.00"));
        assert!(summary.contains("appears strong"));
        assert!(summary.contains("Leverage is strong"));
        assert!(summary.contains("Interest coverage 8.96x (adequate)"));
        assert!(summary.contains("DSCR: 2.50x"));
    }

    #[test]
    fn test_health_summary_with_no_data() {
        let summary = health_summary(&FinancialRatios::default());

        assert!(summary.contains("Current n/a"));
        assert!(summary.contains("appears n/a"));
        assert!(!summary.contains("Coverage:"));
        assert!(!summary.contains("DSCR:"));
    }

    #[test]
    fn test_memo_sections_and_figures() {
        let basics = FinancialBasics {
            revenue: Some(1_350_000.0),
            cogs: Some(800_000.0),
            net_income: Some(150_000.0),
            equity: Some(340_000.0),
            ..Default::default()
        };
        let memo = underwriting_memo(
            "DemoCo Ltd.",
            "2024",
            "Wholesale Trade",
            &basics,
            &sample_ratios(),
            benchmark_for("Wholesale Trade"),
        );

        assert!(memo.starts_with("Underwriting Memo - DemoCo Ltd. (FY 2024)"));
        assert!(memo.contains("Industry: Wholesale Trade"));
        assert!(memo.contains("Executive Summary"));
        assert!(memo.contains("Financial Snapshot"));
        assert!(memo.contains("Revenue: 1,350,000"));
        assert!(memo.contains("EBITDA: n/a"));
        assert!(memo.contains("Credit View"));
        assert!(memo.contains("Leverage is conservative"));
        assert!(memo.contains("outperforms the industry median"));
        assert!(memo.contains("Key Risks"));
        assert!(memo.contains("Mitigants"));
        assert!(memo.contains("Indicative Decision Framework"));
    }

    #[test]
    fn test_memo_with_empty_report_stays_total() {
        let memo = underwriting_memo(
            "Shell Co",
            "2023",
            "Retail",
            &FinancialBasics::default(),
            &FinancialRatios::default(),
            benchmark_for("Retail"),
        );

        assert!(memo.contains("Revenue: n/a"));
        assert!(memo.contains("DSCR: n/a (preferred >=1.25x)."));
        assert!(memo.contains("Debt service capacity is n/a"));
    }
}
