use super::data_loader::DataLoader;
use super::{infer_column, DataTable};
use crate::error::{AnalysisError, AnalysisResult};
use csv::ReaderBuilder;

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
#[derive(Debug)]
pub struct CsvDataLoader;

impl CsvDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Helper pre parsovanie CSV - vráti headers a hodnoty po stĺpcoch
    fn parse_csv(&self, csv_text: &str) -> AnalysisResult<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| AnalysisError::Validation(format!("Chyba pri čítaní CSV hlavičiek: {}", e)))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(AnalysisError::Validation("CSV nemá žiadne stĺpce".to_string()));
        }

        let mut column_values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for (idx, record) in rdr.records().enumerate() {
            let record = record
                .map_err(|e| AnalysisError::Validation(format!("Chyba pri čítaní riadku {}: {}", idx + 1, e)))?;
            if record.len() != headers.len() {
                return Err(AnalysisError::Validation(format!(
                    "Riadok {} má {} stĺpcov, očakávaných {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                )));
            }
            for (i, val) in record.iter().enumerate() {
                column_values[i].push(val.trim().to_string());
            }
        }

        if column_values.iter().all(|c| c.is_empty()) {
            return Err(AnalysisError::Validation("CSV neobsahuje žiadne dáta".to_string()));
        }

        Ok((headers, column_values))
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load_from_string(&self, data: &str) -> AnalysisResult<DataTable> {
        self.validate_format(data)?;

        let (headers, column_values) = self.parse_csv(data)?;

        let columns = headers
            .iter()
            .zip(column_values.iter())
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        DataTable::new(columns)
    }

    fn get_available_columns(&self, data: &str) -> AnalysisResult<Vec<String>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| AnalysisError::Validation(format!("Chyba pri čítaní CSV hlavičiek: {}", e)))?;
        Ok(headers.iter().map(|s| s.trim().to_string()).collect())
    }

    fn validate_format(&self, data: &str) -> AnalysisResult<()> {
        if data.trim().is_empty() {
            return Err(AnalysisError::Validation("Prázdny vstup".to_string()));
        }
        Ok(())
    }
}
