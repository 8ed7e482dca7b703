/// Regresný engine - lineárna, polynomiálna, ridge a lasso regresia
/// nad stĺpcami tabuľky, s metrikami a heuristickou diagnostikou.
pub mod diagnostics;
pub mod metrics;

mod lasso;
mod linear;
mod polynomial;
mod ridge;
pub(crate) mod solver;

pub use diagnostics::RegressionDiagnostics;
pub use metrics::RegressionMetrics;

use crate::data_loading::validate_finite;
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;
use serde::Serialize;

/// Uzavretý zoznam regresných modelov - dispatch je vyčerpávajúci
/// match, žiadne stringové vetvenie
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear,
    Polynomial { degree: usize },
    Ridge { alpha: f64 },
    Lasso { alpha: f64 },
}

impl RegressionModel {
    /// Počet parametrov modelu vrátane interceptu
    fn param_count(&self, feature_count: usize) -> usize {
        match self {
            RegressionModel::Linear => 2,
            RegressionModel::Polynomial { degree } => degree + 1,
            RegressionModel::Ridge { .. } | RegressionModel::Lasso { .. } => feature_count + 1,
        }
    }
}

/// Intervaly spoľahlivosti pre sklon a intercept (len lineárny model)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceIntervals {
    pub slope: (f64, f64),
    pub intercept: (f64, f64),
    pub level: f64,
}

/// Výsledok regresie - vytvorený raz, po návrate sa nemení
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    pub model: RegressionModel,
    pub equation: String,
    pub coefficients: Vec<f64>,
    pub feature_importance: Vec<f64>,
    pub predictions: Vec<f64>,
    pub residuals: Vec<f64>,
    pub metrics: RegressionMetrics,
    pub diagnostics: RegressionDiagnostics,
    pub confidence_intervals: Option<ConfidenceIntervals>,
}

/// Hladina intervalov spoľahlivosti lineárneho modelu
const CONFIDENCE_LEVEL: f64 = 0.95;

pub struct RegressionEngine;

impl RegressionEngine {
    /// Natrénuje zvolený model na príznakoch a cieli.
    /// Príznaky a cieľ musia mať rovnakú dĺžku a konečné hodnoty;
    /// minimum vzoriek je počet parametrov + 2.
    pub fn fit(
        model: RegressionModel,
        features: &[(&str, &[f64])],
        target: &[f64],
    ) -> AnalysisResult<RegressionResult> {
        Self::validate(model, features, target)?;

        let (coefficients, predictions, confidence_intervals) = match model {
            RegressionModel::Linear => {
                let fit = linear::fit(features[0].1, target, CONFIDENCE_LEVEL)?;
                (fit.coefficients, fit.predictions, Some(fit.confidence_intervals))
            }
            RegressionModel::Polynomial { degree } => {
                let (coeffs, preds) = polynomial::fit(features[0].1, target, degree)?;
                (coeffs, preds, None)
            }
            RegressionModel::Ridge { alpha } => {
                let cols: Vec<&[f64]> = features.iter().map(|(_, v)| *v).collect();
                let (coeffs, preds) = ridge::fit(&cols, target, alpha)?;
                (coeffs, preds, None)
            }
            RegressionModel::Lasso { alpha } => {
                let cols: Vec<&[f64]> = features.iter().map(|(_, v)| *v).collect();
                let (coeffs, preds) = lasso::fit(&cols, target, alpha)?;
                (coeffs, preds, None)
            }
        };

        let residuals: Vec<f64> = target
            .iter()
            .zip(predictions.iter())
            .map(|(y, p)| y - p)
            .collect();

        let param_count = model.param_count(features.len());
        let metrics = metrics::compute_metrics(target, &predictions, param_count);
        let feature_importance = metrics::feature_importance(&coefficients);
        let diagnostics = diagnostics::diagnose(&residuals, &predictions, &feature_importance);
        let equation = Self::build_equation(model, &coefficients, features);

        Ok(RegressionResult {
            model,
            equation,
            coefficients,
            feature_importance,
            predictions,
            residuals,
            metrics,
            diagnostics,
            confidence_intervals,
        })
    }

    fn validate(
        model: RegressionModel,
        features: &[(&str, &[f64])],
        target: &[f64],
    ) -> AnalysisResult<()> {
        if features.is_empty() {
            return Err(AnalysisError::Validation(
                "Regresia vyžaduje aspoň jeden príznak".to_string(),
            ));
        }

        match model {
            RegressionModel::Linear | RegressionModel::Polynomial { .. } => {
                if features.len() != 1 {
                    return Err(AnalysisError::Validation(format!(
                        "Model očakáva presne jeden prediktor, dostal {}",
                        features.len()
                    )));
                }
            }
            RegressionModel::Ridge { alpha } | RegressionModel::Lasso { alpha } => {
                if alpha <= 0.0 {
                    return Err(AnalysisError::Validation(
                        "Regularizačný parameter alpha musí byť kladný".to_string(),
                    ));
                }
            }
        }
        if let RegressionModel::Polynomial { degree } = model {
            if degree < 2 {
                return Err(AnalysisError::Validation(
                    "Polynomiálna regresia vyžaduje stupeň aspoň 2".to_string(),
                ));
            }
        }

        let n = target.len();
        validate_finite(target, "target")?;
        for (name, values) in features {
            if values.len() != n {
                return Err(AnalysisError::Validation(format!(
                    "Príznak '{}' má {} hodnôt, cieľ má {}",
                    name,
                    values.len(),
                    n
                )));
            }
            validate_finite(values, name)?;
        }

        let minimum = model.param_count(features.len()) + 2;
        if n < minimum {
            return Err(AnalysisError::InsufficientData(format!(
                "Model vyžaduje aspoň {} vzoriek, dostal {}",
                minimum, n
            )));
        }

        if StatisticsEngine::sample_variance(target) == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "Cieľový stĺpec má nulovú varianciu - R² nie je definované".to_string(),
            ));
        }

        Ok(())
    }

    fn build_equation(
        model: RegressionModel,
        coefficients: &[f64],
        features: &[(&str, &[f64])],
    ) -> String {
        match model {
            RegressionModel::Linear => format!(
                "y = {:.4}·{} {:+.4}",
                coefficients[1], features[0].0, coefficients[0]
            ),
            RegressionModel::Polynomial { .. } => {
                let mut eq = format!("y = {:.4}", coefficients[0]);
                for (power, coeff) in coefficients.iter().enumerate().skip(1) {
                    if power == 1 {
                        eq.push_str(&format!(" {:+.4}·x", coeff));
                    } else {
                        eq.push_str(&format!(" {:+.4}·x^{}", coeff, power));
                    }
                }
                eq
            }
            RegressionModel::Ridge { .. } | RegressionModel::Lasso { .. } => {
                let mut eq = format!("y = {:.4}", coefficients[0]);
                for ((name, _), coeff) in features.iter().zip(coefficients.iter().skip(1)) {
                    eq.push_str(&format!(" {:+.4}·{}", coeff, name));
                }
                eq
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy() -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 3.0).collect();
        (x, y)
    }

    #[test]
    fn linear_fit_on_noise_free_line() {
        let (x, y) = xy();
        let result =
            RegressionEngine::fit(RegressionModel::Linear, &[("x", &x)], &y).unwrap();

        assert_relative_eq!(result.coefficients[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.coefficients[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(result.metrics.r2, 1.0, epsilon = 1e-9);
        assert!(result.residuals.iter().all(|r| r.abs() < 1e-9));
        assert!(result.confidence_intervals.is_some());
        assert!(result.equation.starts_with("y = 2.0000·x"));
    }

    #[test]
    fn polynomial_below_minimum_samples_is_insufficient_data() {
        // degree 3 → minimum degree + 3 = 6 bodov
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 8.0, 27.0, 64.0, 125.0];
        let err = RegressionEngine::fit(
            RegressionModel::Polynomial { degree: 3 },
            &[("x", &x)],
            &y,
        )
        .unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn polynomial_recovers_cubic() {
        let x: Vec<f64> = (-4..=4).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.powi(3) - v + 2.0).collect();
        let result = RegressionEngine::fit(
            RegressionModel::Polynomial { degree: 3 },
            &[("x", &x)],
            &y,
        )
        .unwrap();
        assert_relative_eq!(result.metrics.r2, 1.0, epsilon = 1e-9);
        assert_relative_eq!(result.coefficients[3], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn ridge_and_lasso_validate_alpha() {
        let (x, y) = xy();
        let err = RegressionEngine::fit(
            RegressionModel::Ridge { alpha: 0.0 },
            &[("x", &x)],
            &y,
        )
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = RegressionEngine::fit(
            RegressionModel::Lasso { alpha: -1.0 },
            &[("x", &x)],
            &y,
        )
        .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn constant_target_is_insufficient_data() {
        let x: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let y = vec![5.0; 8];
        let err = RegressionEngine::fit(RegressionModel::Linear, &[("x", &x)], &y).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn mismatched_lengths_are_validation_error() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let err = RegressionEngine::fit(RegressionModel::Linear, &[("x", &x)], &y).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn fit_is_idempotent() {
        let (x, y) = xy();
        let a = RegressionEngine::fit(RegressionModel::Lasso { alpha: 0.01 }, &[("x", &x)], &y)
            .unwrap();
        let b = RegressionEngine::fit(RegressionModel::Lasso { alpha: 0.01 }, &[("x", &x)], &y)
            .unwrap();
        assert_eq!(a, b);
    }
}
