use std::fmt;

/// Typované chyby analytického enginu.
/// Každý variant zodpovedá jednej kategórii zlyhania; engine validuje
/// vstupy vopred a zlyhá s typovanou chybou namiesto toho, aby do
/// výsledku pustil NaN alebo nekonečno.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Nevalidný vstup - zlý tvar, rozdielne dĺžky stĺpcov, nečíselné hodnoty
    Validation(String),
    /// Menej vzoriek ako minimum danej operácie (vrátane nulovej variancie)
    InsufficientData(String),
    /// Numerické zlyhanie - singulárna matica, nekonečno vo výpočte
    Computation(String),
    /// Obalová chyba dispatch vrstvy
    Analysis(String),
}

impl AnalysisError {
    /// Kód chyby pre boundary vrstvu (JS klient)
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "VALIDATION_ERROR",
            AnalysisError::InsufficientData(_) => "INSUFFICIENT_DATA",
            AnalysisError::Computation(_) => "COMPUTATION_ERROR",
            AnalysisError::Analysis(_) => "ANALYSIS_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AnalysisError::Validation(m)
            | AnalysisError::InsufficientData(m)
            | AnalysisError::Computation(m)
            | AnalysisError::Analysis(m) => m,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AnalysisError {}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_taxonomy() {
        assert_eq!(AnalysisError::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AnalysisError::InsufficientData("x".into()).code(), "INSUFFICIENT_DATA");
        assert_eq!(AnalysisError::Computation("x".into()).code(), "COMPUTATION_ERROR");
        assert_eq!(AnalysisError::Analysis("x".into()).code(), "ANALYSIS_ERROR");
    }

    #[test]
    fn display_contains_code_and_message() {
        let err = AnalysisError::Validation("zlý vstup".into());
        assert_eq!(err.to_string(), "VALIDATION_ERROR: zlý vstup");
    }
}
