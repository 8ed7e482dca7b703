use super::DataTable;
use crate::error::AnalysisResult;

/// Strategy pattern pre načítanie tabuľky z rôznych textových formátov
pub trait DataLoader: std::fmt::Debug {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta tabuľku typovaných stĺpcov zo stringu
    fn load_from_string(&self, data: &str) -> AnalysisResult<DataTable>;

    /// Získa dostupné stĺpce (headers) z dát
    fn get_available_columns(&self, data: &str) -> AnalysisResult<Vec<String>>;

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> AnalysisResult<()>;
}
