use super::ConfidenceIntervals;
use crate::error::{AnalysisError, AnalysisResult};
use crate::hypothesis::HypothesisTestingEngine;
use crate::statistics::StatisticsEngine;

#[derive(Debug)]
pub(super) struct LinearFit {
    pub coefficients: Vec<f64>, // [intercept, slope]
    pub predictions: Vec<f64>,
    pub confidence_intervals: ConfidenceIntervals,
}

/// Uzavretý tvar najmenších štvorcov pre jeden prediktor,
/// s intervalmi spoľahlivosti pre sklon aj intercept
/// zo Studentovho t rozdelenia.
pub(super) fn fit(x: &[f64], y: &[f64], level: f64) -> AnalysisResult<LinearFit> {
    let n = x.len() as f64;
    let mean_x = StatisticsEngine::mean(x);
    let mean_y = StatisticsEngine::mean(y);

    let mut s_xx = 0.0;
    let mut s_xy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        s_xx += (xi - mean_x).powi(2);
        s_xy += (xi - mean_x) * (yi - mean_y);
    }
    if s_xx == 0.0 {
        return Err(AnalysisError::InsufficientData(
            "Prediktor má nulovú varianciu - sklon nie je definovaný".to_string(),
        ));
    }

    let slope = s_xy / s_xx;
    let intercept = mean_y - slope * mean_x;
    let predictions: Vec<f64> = x.iter().map(|xi| intercept + slope * xi).collect();

    // Reziduálna variancia s df = n - 2
    let sse: f64 = y
        .iter()
        .zip(predictions.iter())
        .map(|(yi, pi)| (yi - pi).powi(2))
        .sum();
    let df = n - 2.0;
    let residual_var = sse / df;
    let se_slope = (residual_var / s_xx).sqrt();
    let se_intercept = (residual_var * (1.0 / n + mean_x * mean_x / s_xx)).sqrt();

    let t_crit = HypothesisTestingEngine::t_critical(df, 1.0 - level)?;

    Ok(LinearFit {
        coefficients: vec![intercept, slope],
        predictions,
        confidence_intervals: ConfidenceIntervals {
            slope: (slope - t_crit * se_slope, slope + t_crit * se_slope),
            intercept: (
                intercept - t_crit * se_intercept,
                intercept + t_crit * se_intercept,
            ),
            level,
        },
    })
}
