use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

/// Deskriptívna štatistika jedného číselného stĺpca
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Bezstavový engine so zdieľanými primitívami - žiadna inštancia,
/// žiadny cross-call stav, len čisté funkcie nad slice-mi.
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Výberová variancia (delenie n-1); pre n < 2 vracia 0
    pub fn sample_variance(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return 0.0;
        }
        let mean = Self::mean(values);
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    }

    pub fn std_dev(values: &[f64]) -> f64 {
        Self::sample_variance(values).sqrt()
    }

    /// Populačná variancia (delenie n) - detektory anomálií merajú
    /// odchýlku v rámci pozorovaného radu, nie odhad populácie
    pub fn population_variance(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(values);
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    pub fn population_std_dev(values: &[f64]) -> f64 {
        Self::population_variance(values).sqrt()
    }

    pub fn median(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = sorted.len();
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Kvantil s lineárnou interpoláciou; `q` v intervale [0, 1],
    /// vstup musí byť vzostupne zoradený
    pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        if lo == hi {
            sorted[lo]
        } else {
            sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }

    /// Kĺzavý priemer s oknom `window` (trailing); prvých window-1
    /// pozícií priemeruje dostupný prefix
    pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
        if values.is_empty() || window == 0 {
            return Vec::new();
        }
        values
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let start = (i + 1).saturating_sub(window);
                Self::mean(&values[start..=i])
            })
            .collect()
    }

    /// Autokorelácia pri posune `lag`; 0 pre degenerovaný vstup
    pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
        let n = values.len();
        if lag == 0 || lag >= n {
            return 0.0;
        }
        let mean = Self::mean(values);
        let denom: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        if denom == 0.0 {
            return 0.0;
        }
        let num: f64 = (lag..n)
            .map(|i| (values[i] - mean) * (values[i - lag] - mean))
            .sum();
        num / denom
    }

    /// Deskriptívna štatistika stĺpca. Minimálne 3 hodnoty (šikmosť a
    /// špicatosť delia treťou mocninou odchýlky); nulová variancia je
    /// explicitná chyba, nie tiché NaN.
    pub fn summarize(values: &[f64]) -> AnalysisResult<StatisticalSummary> {
        if values.len() < 3 {
            return Err(AnalysisError::InsufficientData(format!(
                "Deskriptívna štatistika vyžaduje aspoň 3 hodnoty, dostala {}",
                values.len()
            )));
        }

        let n = values.len() as f64;
        let mean = Self::mean(values);
        let variance = Self::sample_variance(values);
        let std_dev = variance.sqrt();

        if std_dev == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "Stĺpec má nulovú varianciu - šikmosť a špicatosť nie sú definované".to_string(),
            ));
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // Momentové odhady so vzorkovou smerodajnou odchýlkou - aproximácia,
        // nie korigovaný Fisher-Pearson odhad
        let m3: f64 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
        let m4: f64 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;
        let skewness = m3 / std_dev.powi(3);
        let kurtosis = m4 / std_dev.powi(4) - 3.0;

        Ok(StatisticalSummary {
            mean,
            median: Self::median(values),
            std_dev,
            min,
            max,
            variance,
            skewness,
            kurtosis,
        })
    }
}
