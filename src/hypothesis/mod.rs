/// Engine štatistických testov hypotéz - čistý dispatcher nad štyrmi
/// druhmi testov, bez stavu medzi volaniami.
pub mod anova;
pub mod chi_square;

use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Uzavretý zoznam podporovaných testov
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    OneSampleTTest,
    TwoSampleTTest,
    PairedTTest,
    ZTest,
    Anova,
    ChiSquareGoodnessOfFit,
}

/// Výsledok jedného testu hypotézy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    pub test_type: TestKind,
    pub statistic: f64,
    pub p_value: f64,
    pub critical_value: f64,
    pub degrees_of_freedom: Option<f64>,
    pub confidence_interval: Option<(f64, f64)>,
    pub is_significant: bool,
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub conclusion: String,
}

pub struct HypothesisTestingEngine;

/// Default hladina významnosti
pub const DEFAULT_ALPHA: f64 = 0.05;

impl HypothesisTestingEngine {
    pub(crate) fn validate_alpha(alpha: f64) -> AnalysisResult<f64> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(AnalysisError::Validation(format!(
                "Hladina významnosti musí byť v intervale (0, 1), dostali sme {}",
                alpha
            )));
        }
        Ok(alpha)
    }

    /// Obojstranná p-hodnota zo Studentovho t rozdelenia
    pub(crate) fn two_sided_p_students_t(t: f64, df: f64) -> AnalysisResult<f64> {
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| AnalysisError::Computation(format!("Studentovo t rozdelenie: {}", e)))?;
        Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
    }

    /// Kritická hodnota t pre obojstranný test
    pub(crate) fn t_critical(df: f64, alpha: f64) -> AnalysisResult<f64> {
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| AnalysisError::Computation(format!("Studentovo t rozdelenie: {}", e)))?;
        Ok(dist.inverse_cdf(1.0 - alpha / 2.0))
    }

    /// Obojstranná p-hodnota z normálneho rozdelenia
    pub(crate) fn two_sided_p_normal(z: f64) -> AnalysisResult<f64> {
        let dist = Normal::new(0.0, 1.0)
            .map_err(|e| AnalysisError::Computation(format!("Normálne rozdelenie: {}", e)))?;
        Ok((2.0 * (1.0 - dist.cdf(z.abs()))).clamp(0.0, 1.0))
    }

    pub(crate) fn z_critical(alpha: f64) -> AnalysisResult<f64> {
        let dist = Normal::new(0.0, 1.0)
            .map_err(|e| AnalysisError::Computation(format!("Normálne rozdelenie: {}", e)))?;
        Ok(dist.inverse_cdf(1.0 - alpha / 2.0))
    }

    /// Záver testu: significant ⇔ p ≤ α
    pub(crate) fn conclude(p_value: f64, alpha: f64) -> (bool, String) {
        let significant = p_value <= alpha;
        let conclusion = if significant {
            format!("Zamietame H0 na hladine významnosti α={} (p={:.4})", alpha, p_value)
        } else {
            format!("Nezamietame H0 na hladine významnosti α={} (p={:.4})", alpha, p_value)
        };
        (significant, conclusion)
    }
}
