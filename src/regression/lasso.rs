use super::solver::standardize_columns;
use crate::error::AnalysisResult;
use crate::statistics::StatisticsEngine;

/// Pevný strop iterácií koordinátového zostupu
const MAX_ITERATIONS: usize = 1000;
/// Konvergencia: maximálna zmena koeficientu pod touto hranicou
const TOLERANCE: f64 = 1e-4;

/// Soft-thresholding operátor - zráža koeficient smerom k nule
fn soft_threshold(rho: f64, lambda: f64) -> f64 {
    if rho > lambda {
        rho - lambda
    } else if rho < -lambda {
        rho + lambda
    } else {
        0.0
    }
}

/// Lasso regresia (L1) koordinátovým zostupom nad štandardizovanými
/// príznakmi a centrovaným cieľom. Dosiahnutie stropu iterácií bez
/// konvergencie nie je chyba - strop je dokumentované pravidlo
/// zastavenia.
pub(super) fn fit(
    features: &[&[f64]],
    y: &[f64],
    alpha: f64,
) -> AnalysisResult<(Vec<f64>, Vec<f64>)> {
    let standardized = standardize_columns(features)?;
    let mean_y = StatisticsEngine::mean(y);
    let centered_y: Vec<f64> = y.iter().map(|v| v - mean_y).collect();

    let n = y.len();
    let p = features.len();
    let lambda = alpha * n as f64;

    // z_j = Σ x_ij² pre štandardizované stĺpce
    let z: Vec<f64> = standardized
        .columns
        .iter()
        .map(|col| col.iter().map(|v| v * v).sum::<f64>())
        .collect();

    let mut beta = vec![0.0f64; p];
    let mut fitted = vec![0.0f64; n];

    for _ in 0..MAX_ITERATIONS {
        let mut max_change = 0.0f64;

        for j in 0..p {
            // Parciálne reziduá bez príspevku koeficientu j
            let rho: f64 = (0..n)
                .map(|i| {
                    standardized.columns[j][i]
                        * (centered_y[i] - fitted[i] + beta[j] * standardized.columns[j][i])
                })
                .sum();

            let new_beta = soft_threshold(rho, lambda) / z[j];
            let delta = new_beta - beta[j];
            if delta != 0.0 {
                for i in 0..n {
                    fitted[i] += delta * standardized.columns[j][i];
                }
                max_change = max_change.max(delta.abs());
                beta[j] = new_beta;
            }
        }

        if max_change < TOLERANCE {
            break;
        }
    }

    // Spätná transformácia do pôvodnej škály
    let mut coefficients = vec![0.0; p + 1];
    for j in 0..p {
        coefficients[j + 1] = beta[j] / standardized.stds[j];
    }
    coefficients[0] = mean_y
        - (0..p)
            .map(|j| coefficients[j + 1] * standardized.means[j])
            .sum::<f64>();

    let predictions: Vec<f64> = (0..n)
        .map(|i| {
            coefficients[0]
                + (0..p).map(|j| coefficients[j + 1] * features[j][i]).sum::<f64>()
        })
        .collect();

    Ok((coefficients, predictions))
}
