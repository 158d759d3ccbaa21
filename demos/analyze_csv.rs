use std::env;
use std::fs::File;

use anyhow::{bail, Context, Result};
use financial_statement_analyzer::{analyze_statement, health_summary, CellValue, RawTable};

fn main() -> Result<()> {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: analyze_csv <statement.csv>"),
    };

    let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(CellValue::from).collect());
    }

    let report = analyze_statement(&RawTable::new(headers, rows))?;

    println!("{}", report.to_json()?);
    println!();
    println!("{}", health_summary(&report.ratios));

    Ok(())
}
