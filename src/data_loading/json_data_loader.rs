use super::data_loader::DataLoader;
use super::{infer_column, DataTable};
use crate::error::{AnalysisError, AnalysisResult};
use serde_json::Value;

/// JSON Data Loader - implementácia Strategy pattern pre JSON súbory
#[derive(Debug)]
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parsuje JSON array of objects formát
    /// Príklad: [{"trzby": 120.5, "region": "západ"}, ...]
    fn parse_json_array(&self, json_text: &str) -> AnalysisResult<(Vec<String>, Vec<Vec<String>>)> {
        let parsed: Value = serde_json::from_str(json_text)
            .map_err(|e| AnalysisError::Validation(format!("Chyba pri parsovaní JSON: {}", e)))?;

        let array = parsed
            .as_array()
            .ok_or_else(|| AnalysisError::Validation("JSON musí byť array objektov".to_string()))?;

        if array.is_empty() {
            return Err(AnalysisError::Validation("JSON array je prázdny".to_string()));
        }

        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| AnalysisError::Validation("Prvý element musí byť objekt".to_string()))?;

        let headers: Vec<String> = first_obj.keys().map(|k| k.to_string()).collect();
        let mut column_values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for (idx, item) in array.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or_else(|| AnalysisError::Validation(format!("Element {} nie je objekt", idx)))?;

            for (i, header) in headers.iter().enumerate() {
                let value = obj.get(header).ok_or_else(|| {
                    AnalysisError::Validation(format!("Chýba kľúč '{}' v elemente {}", header, idx))
                })?;

                let value_str = match value {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(AnalysisError::Validation(format!(
                            "Nepodporovaný typ hodnoty pre kľúč '{}'",
                            header
                        )))
                    }
                };

                column_values[i].push(value_str);
            }
        }

        Ok((headers, column_values))
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    fn load_from_string(&self, data: &str) -> AnalysisResult<DataTable> {
        self.validate_format(data)?;

        let (headers, column_values) = self.parse_json_array(data)?;

        let columns = headers
            .iter()
            .zip(column_values.iter())
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        DataTable::new(columns)
    }

    fn get_available_columns(&self, data: &str) -> AnalysisResult<Vec<String>> {
        let (headers, _) = self.parse_json_array(data)?;
        Ok(headers)
    }

    fn validate_format(&self, data: &str) -> AnalysisResult<()> {
        let trimmed = data.trim();
        if !trimmed.starts_with('[') {
            return Err(AnalysisError::Validation(
                "JSON dáta musia začínať '[' (array objektov)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loading::ColumnKind;

    #[test]
    fn loads_array_of_objects() {
        let json = r#"[{"trzby": 10.5, "region": "západ"}, {"trzby": 11, "region": "východ"}]"#;
        let table = JsonDataLoader::new().load_from_string(json).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("trzby").unwrap().kind(), ColumnKind::Number);
        assert_eq!(table.column("region").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = JsonDataLoader::new().load_from_string(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
