use super::solver::{self, standardize_columns};
use crate::error::AnalysisResult;
use crate::statistics::StatisticsEngine;

/// Ridge regresia (L2): štandardizácia príznakov a riešenie
/// (XᵗX + αI)β = Xᵗy nad centrovaným cieľom. Koeficienty sa vracajú
/// spätne transformované do pôvodnej škály.
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

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for i in 0..n {
        for a in 0..p {
            xty[a] += standardized.columns[a][i] * centered_y[i];
            for b in a..p {
                xtx[a][b] += standardized.columns[a][i] * standardized.columns[b][i];
            }
        }
    }
    for a in 0..p {
        for b in 0..a {
            xtx[a][b] = xtx[b][a];
        }
        xtx[a][a] += alpha; // L2 penalizácia na diagonále
    }

    let beta_std = solver::solve_linear_system(xtx, xty)?;

    // Spätná transformácia do pôvodnej škály
    let mut coefficients = vec![0.0; p + 1];
    for j in 0..p {
        coefficients[j + 1] = beta_std[j] / standardized.stds[j];
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn small_alpha_approximates_ols() {
        let x1: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let x2: Vec<f64> = (0..10).map(|i| (i * i) as f64 / 10.0).collect();
        let y: Vec<f64> = x1
            .iter()
            .zip(x2.iter())
            .map(|(a, b)| 1.0 + 2.0 * a + 3.0 * b)
            .collect();
        let cols: Vec<&[f64]> = vec![&x1, &x2];
        let (coeffs, predictions) = fit(&cols, &y, 1e-8).unwrap();

        assert_relative_eq!(coeffs[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(coeffs[1], 2.0, epsilon = 1e-4);
        assert_relative_eq!(coeffs[2], 3.0, epsilon = 1e-4);
        assert_relative_eq!(predictions[3], y[3], epsilon = 1e-4);
    }

    #[test]
    fn larger_alpha_shrinks_coefficients() {
        let x: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 4.0 * v).collect();
        let cols: Vec<&[f64]> = vec![&x];
        let (small, _) = fit(&cols, &y, 0.001).unwrap();
        let (large, _) = fit(&cols, &y, 50.0).unwrap();
        assert!(large[1].abs() < small[1].abs());
    }
}
