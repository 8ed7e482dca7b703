use super::solver;
use crate::error::AnalysisResult;

/// Polynomiálna regresia: rozšírenie prediktora na [1, x, x², …, x^d]
/// a riešenie normálnych rovníc Gaussovou elimináciou.
pub(super) fn fit(x: &[f64], y: &[f64], degree: usize) -> AnalysisResult<(Vec<f64>, Vec<f64>)> {
    let design: Vec<Vec<f64>> = x
        .iter()
        .map(|xi| (0..=degree).map(|d| xi.powi(d as i32)).collect())
        .collect();

    let coefficients = solver::solve_normal_equations(&design, y)?;

    let predictions: Vec<f64> = design
        .iter()
        .map(|row| row.iter().zip(coefficients.iter()).map(|(v, c)| v * c).sum())
        .collect();

    Ok((coefficients, predictions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_quadratic() {
        let x: Vec<f64> = (-3..=3).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 1.0 - 2.0 * v + 0.5 * v * v).collect();
        let (coeffs, predictions) = fit(&x, &y, 2).unwrap();

        assert_relative_eq!(coeffs[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(coeffs[1], -2.0, epsilon = 1e-9);
        assert_relative_eq!(coeffs[2], 0.5, epsilon = 1e-9);
        for (p, yi) in predictions.iter().zip(y.iter()) {
            assert_relative_eq!(p, yi, epsilon = 1e-9);
        }
    }

    #[test]
    fn constant_predictor_makes_singular_system() {
        let x = [1.0, 1.0, 1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let err = fit(&x, &y, 2).unwrap_err();
        assert_eq!(err.code(), "COMPUTATION_ERROR");
    }
}
