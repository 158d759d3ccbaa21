use crate::error::{Result, StatementError};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical line-item categories every statement row is classified into.
///
/// The serialized (snake_case) names double as the stable keys of the
/// aggregation and basics output, so renaming a variant is a breaking change
/// to the JSON contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CurrentAssets,
    Cash,
    AccountsReceivable,
    Inventory,
    CurrentLiabilities,
    TotalLiabilities,
    Equity,
    TotalAssets,
    Revenue,
    Cogs,
    OperatingExpenses,
    Ebit,
    Ebitda,
    InterestExpense,
    NetIncome,
    ShortTermDebt,
    LongTermDebt,
    AccountsPayable,
    Cfo,
    InterestPaid,
    PrincipalRepayment,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::CurrentAssets,
        Category::Cash,
        Category::AccountsReceivable,
        Category::Inventory,
        Category::CurrentLiabilities,
        Category::TotalLiabilities,
        Category::Equity,
        Category::TotalAssets,
        Category::Revenue,
        Category::Cogs,
        Category::OperatingExpenses,
        Category::Ebit,
        Category::Ebitda,
        Category::InterestExpense,
        Category::NetIncome,
        Category::ShortTermDebt,
        Category::LongTermDebt,
        Category::AccountsPayable,
        Category::Cfo,
        Category::InterestPaid,
        Category::PrincipalRepayment,
    ];

    /// The stable snake_case key, identical to the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Category::CurrentAssets => "current_assets",
            Category::Cash => "cash",
            Category::AccountsReceivable => "accounts_receivable",
            Category::Inventory => "inventory",
            Category::CurrentLiabilities => "current_liabilities",
            Category::TotalLiabilities => "total_liabilities",
            Category::Equity => "equity",
            Category::TotalAssets => "total_assets",
            Category::Revenue => "revenue",
            Category::Cogs => "cogs",
            Category::OperatingExpenses => "operating_expenses",
            Category::Ebit => "ebit",
            Category::Ebitda => "ebitda",
            Category::InterestExpense => "interest_expense",
            Category::NetIncome => "net_income",
            Category::ShortTermDebt => "short_term_debt",
            Category::LongTermDebt => "long_term_debt",
            Category::AccountsPayable => "accounts_payable",
            Category::Cfo => "cfo",
            Category::InterestPaid => "interest_paid",
            Category::PrincipalRepayment => "principal_repayment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A recognition pattern with an optional exclusion pattern.
///
/// The spec matches a label when `pattern` matches and `unless` (if set) does
/// not. The exclusion form replaces regex lookaround, which the pattern
/// dialect here does not support: `liabilities` lines are recognizable as
/// totals only when the label is not a combined "liabilities and equity" line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatternSpec {
    #[schemars(description = "Case-insensitive-by-normalization regex matched against the whitespace-collapsed, lowercased label")]
    pub pattern: String,

    #[serde(default)]
    #[schemars(description = "Optional veto regex: when it matches the label, this pattern is treated as not matching")]
    pub unless: Option<String>,
}

impl PatternSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        PatternSpec {
            pattern: pattern.into(),
            unless: None,
        }
    }

    pub fn unless(mut self, exclusion: impl Into<String>) -> Self {
        self.unless = Some(exclusion.into());
        self
    }
}

/// Ordered map from category to its recognition patterns.
///
/// The built-in defaults cover common income statement, balance sheet, and
/// cash flow labels; callers with house styles can replace or extend any
/// category's list. A category with no entry simply never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CategoryPatternSet {
    patterns: BTreeMap<Category, Vec<PatternSpec>>,
}

impl CategoryPatternSet {
    pub fn empty() -> Self {
        CategoryPatternSet {
            patterns: BTreeMap::new(),
        }
    }

    /// The built-in recognition table. Patterns are lowercase and
    /// word-boundary anchored; labels are normalized before matching.
    pub fn defaults() -> Self {
        let mut set = CategoryPatternSet::empty();

        set.insert(
            Category::CurrentAssets,
            vec![PatternSpec::new(r"\bcurrent assets\b")],
        );
        set.insert(
            Category::Cash,
            vec![
                // Cash flow statement lines all contain the word "cash" and
                // must not land in the cash balance.
                PatternSpec::new(r"\bcash\b").unless(r"activities|cash flow"),
                PatternSpec::new(r"\bcash and cash equivalents\b"),
                PatternSpec::new(r"\bcash equivalents\b"),
            ],
        );
        set.insert(
            Category::AccountsReceivable,
            vec![
                PatternSpec::new(r"\baccounts receivable\b"),
                PatternSpec::new(r"\btrade receivables\b"),
                PatternSpec::new(r"\breceivables\b"),
            ],
        );
        set.insert(
            Category::Inventory,
            vec![
                PatternSpec::new(r"\binventor(y|ies)\b"),
                PatternSpec::new(r"\bstock[- ]in[- ]trade\b"),
            ],
        );
        set.insert(
            Category::CurrentLiabilities,
            vec![PatternSpec::new(r"\bcurrent liabilities\b")],
        );
        set.insert(
            Category::TotalLiabilities,
            vec![
                PatternSpec::new(r"\btotal liabilities\b").unless(r"and equity"),
                // A bare "liabilities" line is a total, but neither the
                // current-liabilities subtotal nor a combined
                // "liabilities and equity" line is.
                PatternSpec::new(r"\bliabilities\b").unless(r"\bcurrent liabilities\b|and equity"),
            ],
        );
        set.insert(
            Category::Equity,
            vec![
                PatternSpec::new(r"\b(total )?(shareholders'?|stockholders'?|owners'?) equity\b"),
                PatternSpec::new(r"\btotal equity\b"),
                PatternSpec::new(r"\bequity attributable\b"),
                PatternSpec::new(r"^equity$"),
            ],
        );
        set.insert(
            Category::TotalAssets,
            vec![PatternSpec::new(r"\btotal assets\b")],
        );
        set.insert(
            Category::Revenue,
            vec![
                // "Cost of revenue" / "cost of sales" are COGS lines.
                PatternSpec::new(r"\b(revenue|sales|net sales|total revenue)\b")
                    .unless(r"\bcost of\b"),
                PatternSpec::new(r"\bturnover\b"),
            ],
        );
        set.insert(
            Category::Cogs,
            vec![PatternSpec::new(
                r"\b(cost of goods sold|cogs|cost of sales|cost of revenue)\b",
            )],
        );
        set.insert(
            Category::OperatingExpenses,
            vec![
                PatternSpec::new(r"\boperating expenses\b"),
                PatternSpec::new(r"\bselling, general and administrative\b"),
                PatternSpec::new(r"\bsg&a\b"),
                PatternSpec::new(r"\bresearch and development\b"),
            ],
        );
        set.insert(
            Category::Ebit,
            vec![
                PatternSpec::new(r"\boperating income\b"),
                PatternSpec::new(r"\boperating profit\b"),
                PatternSpec::new(r"\bebit\b"),
                PatternSpec::new(r"\bearnings before interest and taxes\b"),
            ],
        );
        set.insert(
            Category::Ebitda,
            vec![PatternSpec::new(r"\bebitda\b")],
        );
        set.insert(
            Category::InterestExpense,
            vec![
                PatternSpec::new(r"\binterest expense\b"),
                PatternSpec::new(r"\bfinance costs?\b"),
            ],
        );
        set.insert(
            Category::NetIncome,
            vec![
                PatternSpec::new(r"\bnet income\b"),
                PatternSpec::new(r"\bnet profit\b"),
                PatternSpec::new(r"\bnet earnings\b"),
                PatternSpec::new(r"\bprofit for the (year|period)\b"),
                PatternSpec::new(r"\bprofit attributable\b"),
            ],
        );
        set.insert(
            Category::ShortTermDebt,
            vec![
                PatternSpec::new(r"\bshort[- ]?term (debt|borrowings?)\b"),
                PatternSpec::new(r"\bcurrent portion of (long[- ]?term )?debt\b"),
            ],
        );
        set.insert(
            Category::LongTermDebt,
            vec![
                PatternSpec::new(r"\blong[- ]?term (debt|borrowings?)\b"),
                PatternSpec::new(r"\bnon[- ]?current borrowings\b"),
            ],
        );
        set.insert(
            Category::AccountsPayable,
            vec![
                PatternSpec::new(r"\baccounts payable\b"),
                PatternSpec::new(r"\btrade payables\b"),
            ],
        );
        set.insert(
            Category::Cfo,
            vec![
                PatternSpec::new(r"\bnet cash (provided by|from|generated by) operating activities\b"),
                PatternSpec::new(r"\bcash flow from operations\b"),
                PatternSpec::new(r"\boperating cash flow\b"),
            ],
        );
        set.insert(
            Category::InterestPaid,
            vec![PatternSpec::new(r"\binterest paid\b")],
        );
        set.insert(
            Category::PrincipalRepayment,
            vec![
                PatternSpec::new(r"\b(principal|loan) repayments?\b"),
                PatternSpec::new(r"\brepayments? of borrowings\b"),
            ],
        );

        set
    }

    /// Replace the pattern list for a category.
    pub fn insert(&mut self, category: Category, patterns: Vec<PatternSpec>) {
        self.patterns.insert(category, patterns);
    }

    /// Append one pattern to a category's list.
    pub fn add_pattern(&mut self, category: Category, spec: PatternSpec) {
        self.patterns.entry(category).or_default().push(spec);
    }

    pub fn get(&self, category: Category) -> &[PatternSpec] {
        self.patterns.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PatternSpec])> {
        self.patterns.iter().map(|(c, p)| (*c, p.as_slice()))
    }
}

impl Default for CategoryPatternSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Collapse runs of whitespace and lowercase the label. All pattern matching
/// operates on this normalized form.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug)]
struct CompiledPattern {
    include: Regex,
    exclude: Option<Regex>,
}

impl CompiledPattern {
    fn is_match(&self, label: &str) -> bool {
        self.include.is_match(label)
            && !self.exclude.as_ref().map_or(false, |e| e.is_match(label))
    }
}

/// A pattern set with every regex compiled up front.
///
/// Construction is the only fallible step of the whole pipeline: a malformed
/// custom pattern surfaces here, named with its category, instead of failing
/// row by row during analysis.
#[derive(Debug)]
pub struct CategoryMatcher {
    rules: Vec<(Category, Vec<CompiledPattern>)>,
}

impl CategoryMatcher {
    pub fn new(set: &CategoryPatternSet) -> Result<Self> {
        let mut rules = Vec::new();

        for (category, specs) in set.iter() {
            let mut compiled = Vec::with_capacity(specs.len());
            for spec in specs {
                let include = compile(category, &spec.pattern)?;
                let exclude = match &spec.unless {
                    Some(pattern) => Some(compile(category, pattern)?),
                    None => None,
                };
                compiled.push(CompiledPattern { include, exclude });
            }
            rules.push((category, compiled));
        }

        Ok(CategoryMatcher { rules })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&CategoryPatternSet::defaults())
    }

    /// Every category the (normalized) label matches, in `Category` order.
    ///
    /// A label can legitimately hit more than one category ("current portion
    /// of long-term debt" is both short- and long-term debt recognition);
    /// the aggregator adds the row's value to each.
    pub fn matches(&self, label: &str) -> Vec<Category> {
        let normalized = normalize_label(label);
        if normalized.is_empty() {
            return Vec::new();
        }

        self.rules
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(&normalized)))
            .map(|(category, _)| *category)
            .collect()
    }
}

fn compile(category: Category, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| StatementError::InvalidPattern {
        category,
        pattern: pattern.to_string(),
        source,
    })
}
