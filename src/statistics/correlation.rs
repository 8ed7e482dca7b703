use super::descriptive::StatisticsEngine;
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Slovná kategória sily korelácie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    #[serde(rename = "very strong")]
    VeryStrong,
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "weak")]
    Weak,
}

impl CorrelationStrength {
    pub fn from_r(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.9 {
            CorrelationStrength::VeryStrong
        } else if abs > 0.8 {
            CorrelationStrength::Strong
        } else if abs > 0.7 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

/// Jedna dvojica stĺpcov s koreláciou, p-hodnotou a kategóriou sily
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub column_a: String,
    pub column_b: String,
    pub r: f64,
    pub p_value: f64,
    pub strength: CorrelationStrength,
}

/// Korelačná matica všetkých číselných stĺpcov.
/// `strong_correlations` obsahuje len dvojice s |r| > 0.7.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub pairs: Vec<CorrelationPair>,
    pub strong_correlations: Vec<CorrelationPair>,
}

impl StatisticsEngine {
    /// Pearsonova korelácia dvoch stĺpcov rovnakej dĺžky.
    /// Nulová variancia ktoréhokoľvek stĺpca je explicitná chyba
    /// (delenie nulou), nie tiché NaN.
    pub fn pearson(x: &[f64], y: &[f64]) -> AnalysisResult<f64> {
        if x.len() != y.len() {
            return Err(AnalysisError::Validation(format!(
                "Korelácia vyžaduje rovnaké dĺžky stĺpcov ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(AnalysisError::InsufficientData(
                "Korelácia vyžaduje aspoň 2 hodnoty".to_string(),
            ));
        }

        let mean_x = Self::mean(x);
        let mean_y = Self::mean(y);
        let mut num = 0.0;
        let mut den_x = 0.0;
        let mut den_y = 0.0;
        for (xi, yi) in x.iter().zip(y.iter()) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            num += dx * dy;
            den_x += dx * dx;
            den_y += dy * dy;
        }

        if den_x == 0.0 || den_y == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "Korelácia nie je definovaná pre stĺpec s nulovou varianciou".to_string(),
            ));
        }

        Ok(num / (den_x * den_y).sqrt())
    }

    /// Zjednodušená obojstranná p-hodnota korelácie cez normálnu
    /// aproximáciu štatistiky t = r·sqrt((n-2)/(1-r²)).
    /// Aproximácia, nie presný test na Studentovom t rozdelení.
    pub fn correlation_p_value(r: f64, n: usize) -> AnalysisResult<f64> {
        if n < 3 {
            return Err(AnalysisError::InsufficientData(
                "P-hodnota korelácie vyžaduje aspoň 3 hodnoty".to_string(),
            ));
        }
        let one_minus_r2 = 1.0 - r * r;
        if one_minus_r2 < 1e-12 {
            // Perfektná korelácia - t rastie nad všetky medze
            return Ok(0.0);
        }
        let t = r * ((n - 2) as f64 / one_minus_r2).sqrt();
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| AnalysisError::Computation(format!("Normálne rozdelenie: {}", e)))?;
        Ok((2.0 * (1.0 - normal.cdf(t.abs()))).clamp(0.0, 1.0))
    }

    /// Korelačná matica zadaných číselných stĺpcov
    pub fn correlation_matrix(columns: &[(&str, &[f64])]) -> AnalysisResult<CorrelationMatrix> {
        if columns.len() < 2 {
            return Err(AnalysisError::Validation(
                "Korelačná matica vyžaduje aspoň 2 číselné stĺpce".to_string(),
            ));
        }
        let n = columns[0].1.len();
        if n < 3 {
            return Err(AnalysisError::InsufficientData(
                "Korelačná matica vyžaduje aspoň 3 riadky".to_string(),
            ));
        }
        for (name, values) in columns {
            if values.len() != n {
                return Err(AnalysisError::Validation(format!(
                    "Stĺpec '{}' má {} hodnôt, očakávaných {}",
                    name,
                    values.len(),
                    n
                )));
            }
        }

        let k = columns.len();
        let mut matrix = vec![vec![0.0f64; k]; k];
        let mut pairs = Vec::new();

        for i in 0..k {
            matrix[i][i] = 1.0;
            for j in (i + 1)..k {
                let r = Self::pearson(columns[i].1, columns[j].1)?;
                matrix[i][j] = r;
                matrix[j][i] = r; // Symetrická matica
                pairs.push(CorrelationPair {
                    column_a: columns[i].0.to_string(),
                    column_b: columns[j].0.to_string(),
                    r,
                    p_value: Self::correlation_p_value(r, n)?,
                    strength: CorrelationStrength::from_r(r),
                });
            }
        }

        let strong_correlations: Vec<CorrelationPair> = pairs
            .iter()
            .filter(|p| p.r.abs() > 0.7)
            .cloned()
            .collect();

        Ok(CorrelationMatrix {
            columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
            matrix,
            pairs,
            strong_correlations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn self_correlation_is_exactly_one() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(StatisticsEngine::pearson(&x, &x).unwrap(), 1.0);
    }

    #[test]
    fn correlation_is_symmetric() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 6.0];
        assert_relative_eq!(
            StatisticsEngine::pearson(&x, &y).unwrap(),
            StatisticsEngine::pearson(&y, &x).unwrap()
        );
    }

    #[test]
    fn zero_variance_column_is_insufficient_data() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];
        let err = StatisticsEngine::pearson(&x, &y).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn mismatched_lengths_are_validation_error() {
        let err = StatisticsEngine::pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn perfect_correlation_has_zero_p_value() {
        assert_relative_eq!(StatisticsEngine::correlation_p_value(1.0, 10).unwrap(), 0.0);
    }

    #[test]
    fn strength_tiers() {
        assert_eq!(CorrelationStrength::from_r(0.95), CorrelationStrength::VeryStrong);
        assert_eq!(CorrelationStrength::from_r(-0.85), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_r(0.75), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_r(0.3), CorrelationStrength::Weak);
    }

    #[test]
    fn matrix_surfaces_only_strong_pairs() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0]; // r = 1 s x
        let z = vec![5.0, 1.0, 4.0, 2.0, 3.0]; // slabá korelácia
        let cols: Vec<(&str, &[f64])> = vec![("x", &x), ("y", &y), ("z", &z)];
        let matrix = StatisticsEngine::correlation_matrix(&cols).unwrap();

        assert_eq!(matrix.pairs.len(), 3);
        assert_eq!(matrix.strong_correlations.len(), 1);
        assert_eq!(matrix.strong_correlations[0].column_a, "x");
        assert_eq!(matrix.strong_correlations[0].column_b, "y");
        assert_relative_eq!(matrix.matrix[0][1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(matrix.matrix[1][0], matrix.matrix[0][1]);
    }
}
