use super::{HypothesisTestResult, HypothesisTestingEngine, TestKind};
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

impl HypothesisTestingEngine {
    /// Jednofaktorová ANOVA: F = (SSB/(k-1)) / (SSW/(N-k))
    pub fn anova(groups: &[&[f64]], alpha: f64) -> AnalysisResult<HypothesisTestResult> {
        let alpha = Self::validate_alpha(alpha)?;
        if groups.len() < 2 {
            return Err(AnalysisError::Validation(
                "ANOVA vyžaduje aspoň 2 skupiny".to_string(),
            ));
        }
        if groups.iter().any(|g| g.is_empty()) {
            return Err(AnalysisError::InsufficientData(
                "ANOVA vyžaduje neprázdne skupiny".to_string(),
            ));
        }

        let k = groups.len() as f64;
        let total: usize = groups.iter().map(|g| g.len()).sum();
        let n = total as f64;
        if n - k < 1.0 {
            return Err(AnalysisError::InsufficientData(format!(
                "ANOVA vyžaduje aspoň {} hodnôt pre {} skupín",
                groups.len() + 1,
                groups.len()
            )));
        }

        let grand_mean =
            groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n;

        // Medzi-skupinová a vnútro-skupinová suma štvorcov
        let ss_between: f64 = groups
            .iter()
            .map(|g| g.len() as f64 * (StatisticsEngine::mean(g) - grand_mean).powi(2))
            .sum();
        let ss_within: f64 = groups
            .iter()
            .map(|g| {
                let mean = StatisticsEngine::mean(g);
                g.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            })
            .sum();

        let df_between = k - 1.0;
        let df_within = n - k;
        if ss_within == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "ANOVA nie je definovaná pre skupiny s nulovou vnútornou varianciou".to_string(),
            ));
        }

        let statistic = (ss_between / df_between) / (ss_within / df_within);
        let dist = FisherSnedecor::new(df_between, df_within)
            .map_err(|e| AnalysisError::Computation(format!("F rozdelenie: {}", e)))?;
        let p_value = (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0);
        let critical_value = dist.inverse_cdf(1.0 - alpha);
        let (is_significant, conclusion) = Self::conclude(p_value, alpha);

        Ok(HypothesisTestResult {
            test_type: TestKind::Anova,
            statistic,
            p_value,
            critical_value,
            degrees_of_freedom: Some(df_between),
            confidence_interval: None,
            is_significant,
            null_hypothesis: "H0: priemery všetkých skupín sa rovnajú".to_string(),
            alternative_hypothesis: "H1: aspoň jedna skupina má odlišný priemer".to_string(),
            conclusion,
        })
    }
}
