use crate::aggregate::CategoryTotals;
use crate::categories::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The canonical figures of one statement period, one field per category.
///
/// Every field is optional: None means the statement never reported the
/// figure and no fallback could derive it. A present 0.0 is a reported zero,
/// not a gap. Serializes with snake_case keys and JSON null for gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialBasics {
    #[schemars(description = "Total current assets; derived from cash + receivables + inventory when not reported directly")]
    pub current_assets: Option<f64>,

    #[schemars(description = "Cash and cash equivalents")]
    pub cash: Option<f64>,

    #[schemars(description = "Accounts / trade receivables")]
    pub accounts_receivable: Option<f64>,

    #[schemars(description = "Inventory / stock-in-trade")]
    pub inventory: Option<f64>,

    #[schemars(description = "Total current liabilities")]
    pub current_liabilities: Option<f64>,

    #[schemars(description = "Total liabilities as reported; never derived from subtotals")]
    pub total_liabilities: Option<f64>,

    #[schemars(description = "Total shareholders' / owners' equity")]
    pub equity: Option<f64>,

    #[schemars(description = "Total assets")]
    pub total_assets: Option<f64>,

    #[schemars(description = "Revenue / sales / turnover for the period")]
    pub revenue: Option<f64>,

    #[schemars(description = "Cost of goods sold / cost of revenue")]
    pub cogs: Option<f64>,

    #[schemars(description = "Operating expenses (SG&A, R&D, and similar)")]
    pub operating_expenses: Option<f64>,

    #[schemars(description = "Operating income; derived as revenue - COGS - operating expenses when all three are reported and EBIT is not")]
    pub ebit: Option<f64>,

    #[schemars(description = "Earnings before interest, taxes, depreciation and amortization")]
    pub ebitda: Option<f64>,

    #[schemars(description = "Interest / finance expense for the period")]
    pub interest_expense: Option<f64>,

    #[schemars(description = "Net income / net profit for the period")]
    pub net_income: Option<f64>,

    #[schemars(description = "Short-term debt, including the current portion of long-term debt")]
    pub short_term_debt: Option<f64>,

    #[schemars(description = "Long-term debt / non-current borrowings")]
    pub long_term_debt: Option<f64>,

    #[schemars(description = "Accounts / trade payables")]
    pub accounts_payable: Option<f64>,

    #[schemars(description = "Net cash provided by operating activities")]
    pub cfo: Option<f64>,

    #[schemars(description = "Interest actually paid in cash during the period")]
    pub interest_paid: Option<f64>,

    #[schemars(description = "Principal / borrowing repayments made during the period")]
    pub principal_repayment: Option<f64>,
}

/// A fallback strategy for a figure the statement did not report directly.
enum Fallback {
    /// Sum of the listed categories' totals, armed when at least one of them
    /// matched; categories that never matched contribute nothing.
    ComponentSum(&'static [Category]),
    /// Revenue - COGS - operating expenses, armed only when all three matched.
    RevenueLessDirectCosts,
}

const CURRENT_ASSET_PARTS: &[Category] = &[
    Category::Cash,
    Category::AccountsReceivable,
    Category::Inventory,
];

/// Fill a `FinancialBasics` from aggregated totals.
///
/// Each field takes the direct category total when any row matched. Only
/// current assets and EBIT carry fallback chains; every other field is
/// direct-only (total liabilities in particular is never rebuilt from
/// subtotals, which may overlap).
pub fn derive_basics(totals: &CategoryTotals) -> FinancialBasics {
    FinancialBasics {
        current_assets: resolve(
            totals,
            Category::CurrentAssets,
            &[Fallback::ComponentSum(CURRENT_ASSET_PARTS)],
        ),
        cash: totals.get(Category::Cash),
        accounts_receivable: totals.get(Category::AccountsReceivable),
        inventory: totals.get(Category::Inventory),
        current_liabilities: totals.get(Category::CurrentLiabilities),
        total_liabilities: totals.get(Category::TotalLiabilities),
        equity: totals.get(Category::Equity),
        total_assets: totals.get(Category::TotalAssets),
        revenue: totals.get(Category::Revenue),
        cogs: totals.get(Category::Cogs),
        operating_expenses: totals.get(Category::OperatingExpenses),
        ebit: resolve(totals, Category::Ebit, &[Fallback::RevenueLessDirectCosts]),
        ebitda: totals.get(Category::Ebitda),
        interest_expense: totals.get(Category::InterestExpense),
        net_income: totals.get(Category::NetIncome),
        short_term_debt: totals.get(Category::ShortTermDebt),
        long_term_debt: totals.get(Category::LongTermDebt),
        accounts_payable: totals.get(Category::AccountsPayable),
        cfo: totals.get(Category::Cfo),
        interest_paid: totals.get(Category::InterestPaid),
        principal_repayment: totals.get(Category::PrincipalRepayment),
    }
}

fn resolve(totals: &CategoryTotals, direct: Category, fallbacks: &[Fallback]) -> Option<f64> {
    if let Some(value) = totals.get(direct) {
        return Some(value);
    }

    for fallback in fallbacks {
        let value = match fallback {
            Fallback::ComponentSum(parts) => component_sum(totals, parts),
            Fallback::RevenueLessDirectCosts => revenue_less_direct_costs(totals),
        };
        if value.is_some() {
            return value;
        }
    }

    None
}

fn component_sum(totals: &CategoryTotals, parts: &[Category]) -> Option<f64> {
    let mut sum = 0.0;
    let mut any_matched = false;
    for part in parts {
        if let Some(value) = totals.get(*part) {
            sum += value;
            any_matched = true;
        }
    }
    any_matched.then_some(sum)
}

fn revenue_less_direct_costs(totals: &CategoryTotals) -> Option<f64> {
    match (
        totals.get(Category::Revenue),
        totals.get(Category::Cogs),
        totals.get(Category::OperatingExpenses),
    ) {
        (Some(revenue), Some(cogs), Some(opex)) => Some(revenue - cogs - opex),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_totals_pass_through() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 1000.0);
        totals.add(Category::Ebit, 300.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.revenue, Some(1000.0));
        assert_eq!(basics.ebit, Some(300.0));
        assert_eq!(basics.net_income, None);
    }

    #[test]
    fn test_ebit_falls_back_to_revenue_less_direct_costs() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 1000.0);
        totals.add(Category::Cogs, 600.0);
        totals.add(Category::OperatingExpenses, 150.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.ebit, Some(250.0));
    }

    #[test]
    fn test_ebit_fallback_needs_all_three_inputs() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 1000.0);
        totals.add(Category::Cogs, 600.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.ebit, None);
    }

    #[test]
    fn test_direct_ebit_beats_the_fallback() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 1000.0);
        totals.add(Category::Cogs, 600.0);
        totals.add(Category::OperatingExpenses, 150.0);
        totals.add(Category::Ebit, 999.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.ebit, Some(999.0));
    }

    #[test]
    fn test_current_assets_fall_back_to_component_sum() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Cash, 62_000.0);
        totals.add(Category::AccountsReceivable, 50_000.0);
        totals.add(Category::Inventory, 25_000.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.current_assets, Some(137_000.0));
    }

    #[test]
    fn test_component_sum_arms_on_a_single_part() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Cash, 62_000.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.current_assets, Some(62_000.0));
    }

    #[test]
    fn test_total_liabilities_is_direct_only() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::CurrentLiabilities, 85_000.0);
        totals.add(Category::ShortTermDebt, 10_000.0);
        totals.add(Category::LongTermDebt, 120_000.0);

        // Subtotals can overlap (short-term debt often sits inside current
        // liabilities), so an unreported total stays unreported.
        let basics = derive_basics(&totals);
        assert_eq!(basics.total_liabilities, None);
        assert_eq!(basics.current_liabilities, Some(85_000.0));
        assert_eq!(basics.long_term_debt, Some(120_000.0));
    }

    #[test]
    fn test_reported_zero_stays_present() {
        let mut totals = CategoryTotals::new();
        totals.add(Category::Revenue, 0.0);

        let basics = derive_basics(&totals);
        assert_eq!(basics.revenue, Some(0.0));
    }

    #[test]
    fn test_empty_totals_yield_empty_basics() {
        let basics = derive_basics(&CategoryTotals::new());
        assert_eq!(basics, FinancialBasics::default());
    }
}
