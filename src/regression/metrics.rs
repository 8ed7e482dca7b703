use serde::Serialize;
use smartcore::metrics::{mean_absolute_error, mean_squared_error, r2};

/// Metriky kvality regresného modelu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionMetrics {
    pub r2: f64,
    pub adjusted_r2: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub aic: f64,
    pub bic: f64,
}

/// Spodná hranica MSE pre logaritmus v AIC/BIC - perfektný fit
/// nesmie vyprodukovať -∞
const MSE_FLOOR: f64 = 1e-12;

/// Vypočíta metriky modelu. `param_count` zahŕňa intercept.
pub(crate) fn compute_metrics(
    y_true: &[f64],
    y_pred: &[f64],
    param_count: usize,
) -> RegressionMetrics {
    let y_true_vec: Vec<f64> = y_true.to_vec();
    let y_pred_vec: Vec<f64> = y_pred.to_vec();

    let n = y_true.len() as f64;
    let k = param_count as f64;

    let mse = mean_squared_error(&y_true_vec, &y_pred_vec);
    let mae = mean_absolute_error(&y_true_vec, &y_pred_vec);
    let r2_val = r2(&y_true_vec, &y_pred_vec);

    // Adjusted R² penalizuje počet parametrov; fit() garantuje n > k + 1
    let adjusted_r2 = 1.0 - (1.0 - r2_val) * (n - 1.0) / (n - k);

    let log_mse = mse.max(MSE_FLOOR).ln();
    let aic = n * log_mse + 2.0 * k;
    let bic = n * log_mse + k * n.ln();

    RegressionMetrics {
        r2: r2_val,
        adjusted_r2,
        mse,
        rmse: mse.sqrt(),
        mae,
        aic,
        bic,
    }
}

/// Dôležitosť príznakov ako normalizované |koeficienty| (bez interceptu)
pub(crate) fn feature_importance(coefficients: &[f64]) -> Vec<f64> {
    let abs: Vec<f64> = coefficients.iter().skip(1).map(|c| c.abs()).collect();
    let total: f64 = abs.iter().sum();
    if total == 0.0 {
        return vec![0.0; abs.len()];
    }
    abs.iter().map(|a| a / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_fit_has_unit_r2_and_finite_aic() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let metrics = compute_metrics(&y, &y, 2);
        assert_relative_eq!(metrics.r2, 1.0);
        assert_relative_eq!(metrics.mse, 0.0);
        assert!(metrics.aic.is_finite());
        assert!(metrics.bic.is_finite());
    }

    #[test]
    fn adjusted_r2_is_below_r2_for_imperfect_fit() {
        let y_true = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y_pred = [1.1, 1.9, 3.2, 3.8, 5.1, 5.9];
        let metrics = compute_metrics(&y_true, &y_pred, 2);
        assert!(metrics.adjusted_r2 < metrics.r2);
        assert!(metrics.rmse > 0.0);
    }

    #[test]
    fn importance_is_normalized() {
        let importance = feature_importance(&[3.0, 2.0, -6.0]);
        assert_relative_eq!(importance.iter().sum::<f64>(), 1.0);
        assert_relative_eq!(importance[0], 0.25);
        assert_relative_eq!(importance[1], 0.75);
    }
}
