use financial_statement_analyzer::{CellValue, RawTable, StatementAnalyzer};

fn main() {
    let line_items: [(&str, [f64; 3]); 10] = [
        ("Revenue", [1_000_000.0, 1_200_000.0, 1_350_000.0]),
        ("COGS", [600_000.0, 720_000.0, 800_000.0]),
        ("Net Income", [90_000.0, 120_000.0, 150_000.0]),
        ("Current Assets", [150_000.0, 160_000.0, 170_000.0]),
        ("Current Liabilities", [80_000.0, 81_000.0, 85_000.0]),
        ("Total Liabilities", [220_000.0, 230_000.0, 240_000.0]),
        ("Equity", [300_000.0, 320_000.0, 340_000.0]),
        ("Interest Expense", [20_000.0, 22_000.0, 24_000.0]),
        (
            "Net cash provided by operating activities",
            [85_000.0, 95_000.0, 110_000.0],
        ),
        ("Repayments of borrowings", [15_000.0, 18_000.0, 20_000.0]),
    ];

    let rows = line_items
        .iter()
        .map(|(label, values)| {
            let mut row = vec![CellValue::from(*label)];
            row.extend(values.iter().map(|v| CellValue::from(*v)));
            row
        })
        .collect();

    let table = RawTable::new(
        vec![
            "Line Item".to_string(),
            "2022".to_string(),
            "2023".to_string(),
            "2024".to_string(),
        ],
        rows,
    );

    let analyzer = StatementAnalyzer::new().expect("default patterns should compile");
    let by_year = analyzer.analyze_per_year(&table);

    println!("Year-over-year credit trends");
    println!("{}", "-".repeat(60));
    println!(
        "{:<6} {:>10} {:>10} {:>10} {:>10}",
        "Year", "Current", "D/E", "Margin %", "DSCR"
    );
    for (year, analysis) in &by_year {
        println!(
            "{:<6} {:>10} {:>10} {:>10} {:>10}",
            year,
            display(analysis.ratios.current_ratio),
            display(analysis.ratios.debt_to_equity),
            display(analysis.ratios.profit_margin_pct),
            display(analysis.ratios.dscr),
        );
    }
}

fn display(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}
