pub mod data_loader; // Strategy trait
pub mod csv_data_loader; // CSV implementation of strategy
pub mod json_data_loader; // JSON implementation of strategy
pub mod factory; // Factory for loaders

pub use data_loader::DataLoader;
pub use csv_data_loader::CsvDataLoader;
pub use json_data_loader::JsonDataLoader;
pub use factory::DataLoaderFactory;

use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

/// Typ stĺpca tabuľky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Number,
    Text,
    Boolean,
    Date,
}

/// Hodnoty stĺpca - typ je daný variantom, nie stringovým poľom
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Number(Vec<f64>),
    Text(Vec<String>),
    Boolean(Vec<bool>),
    Date(Vec<String>),
}

/// Jeden pomenovaný, typovaný stĺpec - jednotka vstupu pre každý engine
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn numeric(name: &str, values: Vec<f64>) -> Self {
        Column { name: name.to_string(), values: ColumnValues::Number(values) }
    }

    pub fn kind(&self) -> ColumnKind {
        match &self.values {
            ColumnValues::Number(_) => ColumnKind::Number,
            ColumnValues::Text(_) => ColumnKind::Text,
            ColumnValues::Boolean(_) => ColumnKind::Boolean,
            ColumnValues::Date(_) => ColumnKind::Date,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Číselné hodnoty stĺpca, ak je číselný
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Number(v) => Some(v),
            _ => None,
        }
    }
}

/// Tabuľka stĺpcov - jediný vstupný kontrakt enginov.
/// Invariant: unikátne mená stĺpcov a rovnaké dĺžky (kontroluje konštruktor).
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> AnalysisResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.clone()) {
                return Err(AnalysisError::Validation(format!(
                    "Duplicitný názov stĺpca: '{}'",
                    col.name
                )));
            }
        }
        if let Some(first) = columns.first() {
            let n = first.len();
            for col in &columns {
                if col.len() != n {
                    return Err(AnalysisError::Validation(format!(
                        "Stĺpec '{}' má {} hodnôt, očakávaných {}",
                        col.name,
                        col.len(),
                        n
                    )));
                }
            }
        }
        Ok(DataTable { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Číselný stĺpec podľa mena; nečíselný alebo chýbajúci stĺpec je
    /// validačná chyba, rovnako nekonečná alebo NaN hodnota (fail fast,
    /// NaN sa nikdy nepustí ďalej do výpočtu).
    pub fn numeric_column(&self, name: &str) -> AnalysisResult<&[f64]> {
        let col = self.column(name).ok_or_else(|| {
            AnalysisError::Validation(format!("Stĺpec '{}' sa nenachádza v dátach", name))
        })?;
        let values = col.as_numeric().ok_or_else(|| {
            AnalysisError::Validation(format!("Stĺpec '{}' nie je číselný", name))
        })?;
        validate_finite(values, name)?;
        Ok(values)
    }

    /// Všetky číselné stĺpce, s kontrolou konečnosti hodnôt
    pub fn numeric_columns(&self) -> AnalysisResult<Vec<(&str, &[f64])>> {
        let mut out = Vec::new();
        for col in &self.columns {
            if let Some(values) = col.as_numeric() {
                validate_finite(values, &col.name)?;
                out.push((col.name.as_str(), values));
            }
        }
        Ok(out)
    }
}

/// Kontrola konečnosti hodnôt - NaN/∞ sa nesmie dostať do výpočtu
pub fn validate_finite(values: &[f64], name: &str) -> AnalysisResult<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::Validation(format!(
            "Stĺpec '{}' obsahuje NaN alebo nekonečné hodnoty",
            name
        )));
    }
    Ok(())
}

/// Inferencia typu stĺpca zo surových string hodnôt.
/// Poradie: čísla (vrátane desatinnej čiarky), boolean, ISO dátum, text.
pub(crate) fn infer_column(name: &str, raw: &[String]) -> Column {
    let as_numbers: Option<Vec<f64>> = raw.iter().map(|s| parse_number(s)).collect();
    if let Some(numbers) = as_numbers {
        return Column { name: name.to_string(), values: ColumnValues::Number(numbers) };
    }

    let as_bools: Option<Vec<bool>> = raw.iter().map(|s| parse_bool(s)).collect();
    if let Some(bools) = as_bools {
        return Column { name: name.to_string(), values: ColumnValues::Boolean(bools) };
    }

    if !raw.is_empty() && raw.iter().all(|s| looks_like_date(s)) {
        return Column { name: name.to_string(), values: ColumnValues::Date(raw.to_vec()) };
    }

    Column { name: name.to_string(), values: ColumnValues::Text(raw.to_vec()) }
}

/// Parsovanie čísla s podporou desatinnej čiarky
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Jednoduchá heuristika pre ISO dátum (YYYY-MM-DD prefix)
fn looks_like_date(s: &str) -> bool {
    let t = s.trim();
    if t.len() < 10 {
        return false;
    }
    let bytes = t.as_bytes();
    bytes[0..4].iter().all(|b| b.is_ascii_digit())
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(|b| b.is_ascii_digit())
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_numeric_column_with_decimal_comma() {
        let col = infer_column("cena", &["1,5".into(), "2.5".into(), "3".into()]);
        assert_eq!(col.kind(), ColumnKind::Number);
        assert_eq!(col.as_numeric().unwrap(), &[1.5, 2.5, 3.0]);
    }

    #[test]
    fn infer_boolean_and_date_columns() {
        let b = infer_column("aktivny", &["true".into(), "false".into()]);
        assert_eq!(b.kind(), ColumnKind::Boolean);

        let d = infer_column("datum", &["2024-01-01".into(), "2024-01-02".into()]);
        assert_eq!(d.kind(), ColumnKind::Date);

        let t = infer_column("mesto", &["Bratislava".into(), "Košice".into()]);
        assert_eq!(t.kind(), ColumnKind::Text);
    }

    #[test]
    fn table_rejects_duplicate_names_and_unequal_lengths() {
        let err = DataTable::new(vec![
            Column::numeric("a", vec![1.0]),
            Column::numeric("a", vec![2.0]),
        ])
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = DataTable::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![2.0]),
        ])
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn numeric_column_rejects_nan() {
        let table = DataTable::new(vec![Column::numeric("a", vec![1.0, f64::NAN])]).unwrap();
        let err = table.numeric_column("a").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
