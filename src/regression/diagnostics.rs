use crate::statistics::StatisticsEngine;
use serde::Serialize;

/// Heuristická diagnostika reziduálov.
/// Všetky tri skóre sú aproximácie v intervale [0, 1], nie náhrada
/// presných testov (Shapiro-Wilk, Breusch-Pagan, VIF).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionDiagnostics {
    /// Aproximácia normality reziduálov zo šikmosti a špicatosti
    pub residual_normality: f64,
    /// Podiel variancie reziduálov² vysvetlený predikciami
    pub heteroscedasticity: f64,
    /// Variancia normalizovaných dôležitostí príznakov
    pub multicollinearity: f64,
    /// Indexy so |štandardizovaným reziduálom| > 2.5
    pub outlier_indices: Vec<usize>,
}

const OUTLIER_Z: f64 = 2.5;

pub(crate) fn diagnose(
    residuals: &[f64],
    predictions: &[f64],
    importance: &[f64],
) -> RegressionDiagnostics {
    let std_res = StatisticsEngine::std_dev(residuals);

    // Perfektný fit - nič na diagnostikovanie
    if std_res < 1e-12 {
        return RegressionDiagnostics {
            residual_normality: 1.0,
            heteroscedasticity: 0.0,
            multicollinearity: importance_variance(importance),
            outlier_indices: Vec::new(),
        };
    }

    let n = residuals.len() as f64;
    let mean = StatisticsEngine::mean(residuals);
    let m3 = residuals.iter().map(|r| (r - mean).powi(3)).sum::<f64>() / n;
    let m4 = residuals.iter().map(|r| (r - mean).powi(4)).sum::<f64>() / n;
    let skewness = m3 / std_res.powi(3);
    let kurtosis = m4 / std_res.powi(4) - 3.0;
    let residual_normality = (1.0 - (skewness.abs() / 2.0 + kurtosis.abs() / 4.0)).clamp(0.0, 1.0);

    // Regresia reziduálov² na predikciách, aproximovaná cez r²
    let squared: Vec<f64> = residuals.iter().map(|r| r * r).collect();
    let heteroscedasticity = match StatisticsEngine::pearson(&squared, predictions) {
        Ok(r) => r * r,
        Err(_) => 0.0, // degenerovaný prípad - konštantné reziduá alebo predikcie
    };

    let outlier_indices: Vec<usize> = residuals
        .iter()
        .enumerate()
        .filter(|(_, r)| ((*r - mean) / std_res).abs() > OUTLIER_Z)
        .map(|(i, _)| i)
        .collect();

    RegressionDiagnostics {
        residual_normality,
        heteroscedasticity,
        multicollinearity: importance_variance(importance),
        outlier_indices,
    }
}

fn importance_variance(importance: &[f64]) -> f64 {
    if importance.len() < 2 {
        return 0.0;
    }
    let mean = StatisticsEngine::mean(importance);
    importance.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / importance.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_has_clean_diagnostics() {
        let d = diagnose(&[0.0, 0.0, 0.0, 0.0], &[1.0, 2.0, 3.0, 4.0], &[1.0]);
        assert_eq!(d.residual_normality, 1.0);
        assert_eq!(d.heteroscedasticity, 0.0);
        assert!(d.outlier_indices.is_empty());
    }

    #[test]
    fn large_residual_is_flagged_as_outlier() {
        let mut residuals = vec![0.1, -0.1, 0.05, -0.05, 0.1, -0.1, 0.05, -0.05, 0.1, -0.1];
        residuals.push(5.0);
        let predictions: Vec<f64> = (0..residuals.len()).map(|i| i as f64).collect();
        let d = diagnose(&residuals, &predictions, &[1.0]);
        assert_eq!(d.outlier_indices, vec![10]);
    }

    #[test]
    fn single_feature_has_zero_multicollinearity() {
        let d = diagnose(&[0.1, -0.2, 0.1], &[1.0, 2.0, 3.0], &[1.0]);
        assert_eq!(d.multicollinearity, 0.0);
    }
}
