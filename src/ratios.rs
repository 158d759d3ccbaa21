use crate::basics::FinancialBasics;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The standard credit ratio set, each value pre-rounded to two decimals.
///
/// A ratio is None whenever its inputs are missing or its denominator is
/// zero; consumers render that as "n/a" rather than treating it as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialRatios {
    #[schemars(description = "Current assets / current liabilities")]
    pub current_ratio: Option<f64>,

    #[schemars(
        description = "(Cash + receivables) / current liabilities, falling back to (current assets - inventory) when neither cash nor receivables is known"
    )]
    pub quick_ratio: Option<f64>,

    #[schemars(description = "Total liabilities / equity")]
    pub debt_to_equity: Option<f64>,

    #[schemars(description = "(Revenue - COGS) / revenue, as a percentage; None unless both are reported")]
    pub gross_margin_pct: Option<f64>,

    #[schemars(description = "EBIT / revenue, as a percentage")]
    pub operating_margin_pct: Option<f64>,

    #[schemars(description = "Net income / revenue, as a percentage")]
    pub profit_margin_pct: Option<f64>,

    #[schemars(description = "Net income / total assets, as a percentage")]
    pub return_on_assets_pct: Option<f64>,

    #[schemars(description = "EBIT / interest expense")]
    pub ebit_interest_coverage: Option<f64>,

    #[schemars(description = "EBITDA / interest expense")]
    pub ebitda_interest_coverage: Option<f64>,

    #[schemars(
        description = "CFO / (interest paid, falling back to interest expense, plus principal repayments); None when no debt service is visible"
    )]
    pub dscr: Option<f64>,
}

/// Division that treats a missing numerator, a missing denominator, or a zero
/// denominator as unanswerable rather than as an error or an infinity.
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Round to two decimals, the precision every reported ratio carries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the full ratio set from derived basics. Total and deterministic:
/// whatever is uncomputable comes back None, never an error.
pub fn compute_ratios(basics: &FinancialBasics) -> FinancialRatios {
    FinancialRatios {
        current_ratio: rounded(safe_div(basics.current_assets, basics.current_liabilities)),
        quick_ratio: rounded(safe_div(quick_assets(basics), basics.current_liabilities)),
        debt_to_equity: rounded(safe_div(basics.total_liabilities, basics.equity)),
        gross_margin_pct: rounded(gross_margin_pct(basics)),
        operating_margin_pct: rounded(percentage(safe_div(basics.ebit, basics.revenue))),
        profit_margin_pct: rounded(percentage(safe_div(basics.net_income, basics.revenue))),
        return_on_assets_pct: rounded(percentage(safe_div(
            basics.net_income,
            basics.total_assets,
        ))),
        ebit_interest_coverage: rounded(safe_div(basics.ebit, basics.interest_expense)),
        ebitda_interest_coverage: rounded(safe_div(basics.ebitda, basics.interest_expense)),
        dscr: rounded(debt_service_coverage(basics)),
    }
}

/// Quick-ratio numerator. Either of cash / receivables arms the liquid sum
/// (the unknown side counts as zero); with neither known, either of current
/// assets / inventory arms the subtraction form; otherwise unknown.
fn quick_assets(basics: &FinancialBasics) -> Option<f64> {
    match (basics.cash, basics.accounts_receivable) {
        (None, None) => match (basics.current_assets, basics.inventory) {
            (None, None) => None,
            (current_assets, inventory) => {
                Some(current_assets.unwrap_or(0.0) - inventory.unwrap_or(0.0))
            }
        },
        (cash, receivables) => Some(cash.unwrap_or(0.0) + receivables.unwrap_or(0.0)),
    }
}

fn gross_margin_pct(basics: &FinancialBasics) -> Option<f64> {
    let gross_profit = match (basics.revenue, basics.cogs) {
        (Some(revenue), Some(cogs)) => Some(revenue - cogs),
        _ => None,
    };
    percentage(safe_div(gross_profit, basics.revenue))
}

fn debt_service_coverage(basics: &FinancialBasics) -> Option<f64> {
    let interest = basics.interest_paid.or(basics.interest_expense).unwrap_or(0.0);
    let debt_service = interest + basics.principal_repayment.unwrap_or(0.0);
    if debt_service == 0.0 {
        return None;
    }
    Some(basics.cfo.unwrap_or(0.0) / debt_service)
}

fn percentage(value: Option<f64>) -> Option<f64> {
    value.map(|v| v * 100.0)
}

fn rounded(value: Option<f64>) -> Option<f64> {
    value.map(round2)
}
