use super::{HypothesisTestResult, HypothesisTestingEngine, TestKind};
use crate::error::{AnalysisError, AnalysisResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

impl HypothesisTestingEngine {
    /// Chi-kvadrát test dobrej zhody: Σ(O-E)²/E
    pub fn chi_square_goodness_of_fit(
        observed: &[f64],
        expected: &[f64],
        alpha: f64,
    ) -> AnalysisResult<HypothesisTestResult> {
        let alpha = Self::validate_alpha(alpha)?;
        if observed.len() != expected.len() {
            return Err(AnalysisError::Validation(format!(
                "Chi-kvadrát vyžaduje rovnaké dĺžky pozorovaných a očakávaných frekvencií ({} vs {})",
                observed.len(),
                expected.len()
            )));
        }
        if observed.len() < 2 {
            return Err(AnalysisError::InsufficientData(
                "Chi-kvadrát vyžaduje aspoň 2 kategórie".to_string(),
            ));
        }
        if expected.iter().any(|e| *e <= 0.0) {
            return Err(AnalysisError::Validation(
                "Očakávané frekvencie musia byť kladné".to_string(),
            ));
        }

        let statistic: f64 = observed
            .iter()
            .zip(expected.iter())
            .map(|(o, e)| {
                let diff = o - e;
                diff * diff / e
            })
            .sum();

        let df = (observed.len() - 1) as f64;
        let dist = ChiSquared::new(df)
            .map_err(|e| AnalysisError::Computation(format!("Chi-kvadrát rozdelenie: {}", e)))?;
        let p_value = (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0);
        let critical_value = dist.inverse_cdf(1.0 - alpha);
        let (is_significant, conclusion) = Self::conclude(p_value, alpha);

        Ok(HypothesisTestResult {
            test_type: TestKind::ChiSquareGoodnessOfFit,
            statistic,
            p_value,
            critical_value,
            degrees_of_freedom: Some(df),
            confidence_interval: None,
            is_significant,
            null_hypothesis: "H0: pozorované frekvencie zodpovedajú očakávaným".to_string(),
            alternative_hypothesis: "H1: pozorované frekvencie sa líšia od očakávaných".to_string(),
            conclusion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn observed_equal_to_expected_gives_zero_statistic() {
        let freq = [10.0, 20.0, 30.0];
        let result =
            HypothesisTestingEngine::chi_square_goodness_of_fit(&freq, &freq, 0.05).unwrap();
        assert_relative_eq!(result.statistic, 0.0);
        assert!(!result.is_significant);
        assert_relative_eq!(result.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn known_statistic_value() {
        let observed = [50.0, 30.0, 20.0];
        let expected = [40.0, 40.0, 20.0];
        let result =
            HypothesisTestingEngine::chi_square_goodness_of_fit(&observed, &expected, 0.05)
                .unwrap();
        // 100/40 + 100/40 + 0 = 5
        assert_relative_eq!(result.statistic, 5.0, epsilon = 1e-12);
        assert_eq!(result.degrees_of_freedom, Some(2.0));
    }

    #[test]
    fn mismatched_lengths_are_validation_error() {
        let err = HypothesisTestingEngine::chi_square_goodness_of_fit(
            &[1.0, 2.0],
            &[1.0, 2.0, 3.0],
            0.05,
        )
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn non_positive_expected_is_validation_error() {
        let err =
            HypothesisTestingEngine::chi_square_goodness_of_fit(&[1.0, 2.0], &[1.0, 0.0], 0.05)
                .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
