//! Engine detekcie anomálií - z-score, IQR a kĺzavý priemer.
//! Jediná zámerná výnimka z fail-fast politiky: pod minimom vzoriek
//! vracia prázdny výsledok, lebo "žiadne anomálie" je platná odpoveď
//! best-effort detektora.
use crate::data_loading::validate_finite;
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;
use serde::Serialize;

/// Uzavretý zoznam metód detekcie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyMethod {
    Zscore,
    Iqr,
    MovingAverage,
}

impl AnomalyMethod {
    pub fn parse(s: &str) -> AnalysisResult<Self> {
        match s.to_lowercase().as_str() {
            "zscore" | "z_score" => Ok(AnomalyMethod::Zscore),
            "iqr" => Ok(AnomalyMethod::Iqr),
            "moving_average" | "ma" => Ok(AnomalyMethod::MovingAverage),
            _ => Err(AnalysisError::Validation(format!(
                "Neznáma metóda detekcie anomálií: {}",
                s
            ))),
        }
    }
}

/// Podporované hladiny spoľahlivosti; nerozpoznaná hodnota padá
/// na default 0.95
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    P90,
    P95,
    P99,
}

impl ConfidenceLevel {
    pub fn from_value(confidence: f64) -> Self {
        if (confidence - 0.90).abs() < 1e-9 {
            ConfidenceLevel::P90
        } else if (confidence - 0.99).abs() < 1e-9 {
            ConfidenceLevel::P99
        } else {
            ConfidenceLevel::P95
        }
    }

    /// Z-hranica pre z-score a kĺzavý priemer
    pub fn z_threshold(&self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.645,
            ConfidenceLevel::P95 => 1.96,
            ConfidenceLevel::P99 => 2.576,
        }
    }

    /// Násobok IQR pre metódu medzikvartilového rozpätia
    pub fn iqr_factor(&self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.5,
            ConfidenceLevel::P95 => 2.0,
            ConfidenceLevel::P99 => 3.0,
        }
    }
}

/// Jedna nájdená anomália s diagnostickými poľami špecifickými
/// pre metódu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    pub method: AnomalyMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySummary {
    pub total: usize,
    pub count: usize,
    pub percentage: f64,
    pub method: AnomalyMethod,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
    pub summary: AnomalySummary,
}

/// Minimálny počet vzoriek; pod ním sa vracia prázdny výsledok
const MIN_SAMPLES: usize = 3;
/// Maximálne okno kĺzavého priemeru
const MAX_WINDOW: usize = 5;

pub struct AnomalyDetectionEngine;

impl AnomalyDetectionEngine {
    /// Detekcia anomálií zvolenou metódou pri danej hladine
    /// spoľahlivosti (0.90 / 0.95 / 0.99, inak default 0.95)
    pub fn detect(
        values: &[f64],
        method: AnomalyMethod,
        confidence: f64,
    ) -> AnalysisResult<AnomalyReport> {
        validate_finite(values, "anomaly")?;
        let level = ConfidenceLevel::from_value(confidence);

        if values.len() < MIN_SAMPLES {
            return Ok(AnomalyReport {
                anomalies: Vec::new(),
                summary: AnomalySummary {
                    total: values.len(),
                    count: 0,
                    percentage: 0.0,
                    method,
                    threshold: match method {
                        AnomalyMethod::Iqr => level.iqr_factor(),
                        _ => level.z_threshold(),
                    },
                },
            });
        }

        let (anomalies, threshold, method_used) = match method {
            AnomalyMethod::Zscore => (Self::zscore(values, level), level.z_threshold(), method),
            AnomalyMethod::Iqr => (Self::iqr(values, level), level.iqr_factor(), method),
            AnomalyMethod::MovingAverage => {
                let window = MAX_WINDOW.min(values.len() / 2);
                if window < 2 {
                    // Príliš krátky rad na okno - fallback na z-score
                    (Self::zscore(values, level), level.z_threshold(), AnomalyMethod::Zscore)
                } else {
                    (
                        Self::moving_average(values, window, level),
                        level.z_threshold(),
                        method,
                    )
                }
            }
        };

        let count = anomalies.len();
        Ok(AnomalyReport {
            anomalies,
            summary: AnomalySummary {
                total: values.len(),
                count,
                percentage: 100.0 * count as f64 / values.len() as f64,
                method: method_used,
                threshold,
            },
        })
    }

    /// |hodnota - priemer| / σ nad z-hranicou; σ je populačná odchýlka
    /// celého radu. Nulová odchýlka znamená konštantný rad bez anomálií.
    fn zscore(values: &[f64], level: ConfidenceLevel) -> Vec<Anomaly> {
        let mean = StatisticsEngine::mean(values);
        let std_dev = StatisticsEngine::population_std_dev(values);
        if std_dev == 0.0 {
            return Vec::new();
        }
        let threshold = level.z_threshold();

        values
            .iter()
            .enumerate()
            .filter_map(|(index, &value)| {
                let z = (value - mean) / std_dev;
                if z.abs() > threshold {
                    Some(Anomaly {
                        index,
                        value,
                        method: AnomalyMethod::Zscore,
                        z_score: Some(z),
                        bounds: None,
                        window_mean: None,
                        deviation: None,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Hodnoty mimo [Q1 - k·IQR, Q3 + k·IQR]
    fn iqr(values: &[f64], level: ConfidenceLevel) -> Vec<Anomaly> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let q1 = StatisticsEngine::quantile_sorted(&sorted, 0.25);
        let q3 = StatisticsEngine::quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let k = level.iqr_factor();
        let lower = q1 - k * iqr;
        let upper = q3 + k * iqr;

        values
            .iter()
            .enumerate()
            .filter_map(|(index, &value)| {
                if value < lower || value > upper {
                    Some(Anomaly {
                        index,
                        value,
                        method: AnomalyMethod::Iqr,
                        z_score: None,
                        bounds: Some((lower, upper)),
                        window_mean: None,
                        deviation: Some(if value < lower { lower - value } else { value - upper }),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Porovnanie s priemerom a odchýlkou predchádzajúcich `window`
    /// hodnôt (trailing okno)
    fn moving_average(values: &[f64], window: usize, level: ConfidenceLevel) -> Vec<Anomaly> {
        let threshold = level.z_threshold();
        let mut anomalies = Vec::new();

        for i in window..values.len() {
            let slice = &values[i - window..i];
            let mean = StatisticsEngine::mean(slice);
            let std_dev = StatisticsEngine::population_std_dev(slice);
            if std_dev == 0.0 {
                continue;
            }
            let deviation = (values[i] - mean).abs();
            if deviation > std_dev * threshold {
                anomalies.push(Anomaly {
                    index: i,
                    value: values[i],
                    method: AnomalyMethod::MovingAverage,
                    z_score: None,
                    bounds: None,
                    window_mean: Some(mean),
                    deviation: Some(deviation),
                });
            }
        }

        anomalies
    }
}
