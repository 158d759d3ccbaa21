use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CellValue {
    #[schemars(description = "A numeric cell, used as-is. Zero and negative values are legitimate amounts, not missing data.")]
    Number(f64),

    #[schemars(
        description = "A textual cell as emitted by a spreadsheet or page-layout extractor. Amount text may carry thousands separators and accounting-style parentheses for negatives (e.g. '(1,234)'); label text is matched against category patterns."
    )]
    Text(String),

    #[schemars(description = "An empty cell. Serializes as JSON null and is treated as missing everywhere.")]
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawTable {
    #[schemars(
        description = "Column headers in source order. The first column is always the account label column; the remaining headers are scanned for fiscal year tokens (e.g. '2024', 'FY24') when the table is wide. May be empty for headerless extracts."
    )]
    pub headers: Vec<String>,

    #[schemars(
        description = "Data rows in source order. Rows may be ragged; cells beyond a row's length are treated as empty. The first cell of each row is the account label, the rest are period values."
    )]
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        RawTable { headers, rows }
    }

    /// Effective column count: header count or the widest row, whichever is
    /// larger. Headerless two-column extracts therefore still count as narrow.
    pub fn column_count(&self) -> usize {
        let widest = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        self.headers.len().max(widest)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RawTable)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema_json = RawTable::schema_as_json().unwrap();
        assert!(schema_json.contains("headers"));
        assert!(schema_json.contains("rows"));
        println!("Generated schema:\n{}", schema_json);
    }

    #[test]
    fn test_cell_value_deserialization() {
        let cells: Vec<CellValue> = serde_json::from_str(r#"[1234.5, "1,234", null]"#).unwrap();
        assert_eq!(cells[0], CellValue::Number(1234.5));
        assert_eq!(cells[1], CellValue::Text("1,234".to_string()));
        assert_eq!(cells[2], CellValue::Empty);
    }

    #[test]
    fn test_cell_value_serialization() {
        let json = serde_json::to_string(&vec![
            CellValue::Number(62000.0),
            CellValue::Text("n/a".to_string()),
            CellValue::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"[62000.0,"n/a",null]"#);
    }

    #[test]
    fn test_table_round_trip() {
        let table = RawTable::new(
            vec!["Line Item".to_string(), "2024".to_string()],
            vec![
                vec!["Revenue".into(), "1,350,000".into()],
                vec!["COGS".into(), 800_000.0.into()],
            ],
        );

        let json = serde_json::to_string_pretty(&table).unwrap();
        let deserialized: RawTable = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, table);
        assert_eq!(deserialized.column_count(), 2);
    }

    #[test]
    fn test_column_count_uses_widest_row() {
        let table = RawTable::new(
            vec![],
            vec![
                vec!["Revenue".into(), "100".into(), "200".into()],
                vec!["COGS".into(), "60".into()],
            ],
        );
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_empty());
    }
}
