use financial_statement_analyzer::{
    analyze_statement, benchmark_for, health_summary, underwriting_memo, CellValue, RawTable,
};

fn sample_statement() -> RawTable {
    let line_items: [(&str, [f64; 3]); 16] = [
        ("Revenue", [1_000_000.0, 1_200_000.0, 1_350_000.0]),
        ("COGS", [600_000.0, 720_000.0, 800_000.0]),
        ("Operating Expenses", [250_000.0, 300_000.0, 335_000.0]),
        ("EBIT", [150_000.0, 180_000.0, 215_000.0]),
        ("Net Income", [90_000.0, 120_000.0, 150_000.0]),
        ("Cash", [50_000.0, 60_000.0, 62_000.0]),
        ("Accounts Receivable", [40_000.0, 45_000.0, 50_000.0]),
        ("Inventory", [30_000.0, 28_000.0, 25_000.0]),
        ("Current Assets", [150_000.0, 160_000.0, 170_000.0]),
        ("Current Liabilities", [80_000.0, 81_000.0, 85_000.0]),
        ("Total Liabilities", [220_000.0, 230_000.0, 240_000.0]),
        ("Equity", [300_000.0, 320_000.0, 340_000.0]),
        ("Total Assets", [520_000.0, 550_000.0, 580_000.0]),
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

    RawTable::new(
        vec![
            "Line Item".to_string(),
            "2022".to_string(),
            "2023".to_string(),
            "2024".to_string(),
        ],
        rows,
    )
}

fn main() {
    let table = sample_statement();
    let report = analyze_statement(&table).expect("default patterns should compile");

    let industry = "Wholesale Trade";
    let memo = underwriting_memo(
        "DemoCo Trading Ltd.",
        "2024",
        industry,
        &report.basics,
        &report.ratios,
        benchmark_for(industry),
    );

    println!("{}", memo);
    println!();
    println!("Financial Health Summary");
    println!("{}", "-".repeat(60));
    println!("{}", health_summary(&report.ratios));
}
