/// Heuristický predikčný analyzátor - žiadny trénovaný model.
/// Tri deterministické "modely" sa priemerujú do jednej ensemble
/// predpovede; výber príznakov je korelačný filter a vzory sa
/// detekujú jednoduchými štatistickými pravidlami.
pub mod kmeans;

use crate::data_loading::validate_finite;
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;
use crate::timeseries::TimeSeriesEngine;
use serde::Serialize;

/// Minimálna |korelácia| príznaku s cieľom
const FEATURE_CORRELATION_THRESHOLD: f64 = 0.3;
/// Maximálny počet vybraných príznakov
const MAX_FEATURES: usize = 3;
/// Z-hranica pre vzor odľahlých hodnôt
const OUTLIER_Z: f64 = 2.5;
/// Normalizovaný posun priemerov polovíc pre trendový vzor
const TREND_SHIFT_THRESHOLD: f64 = 0.1;
/// Minimálny podiel medzi-zhlukovej variancie pre zhlukový vzor
const CLUSTER_SEPARATION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedFeature {
    pub name: String,
    pub correlation: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Trend,
    Seasonality,
    Outlier,
    Cluster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedPattern {
    pub pattern_type: PatternType,
    pub description: String,
    pub confidence: f64,
}

/// Smerové metriky: zhoda znamienka medziobdobnej zmeny predikcie
/// a skutočnosti. Nejde o klasifikáciu proti anotovaným triedam -
/// "presnosť" a "úplnosť" tu merajú len smerovú zhodu rast/pokles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MLResult {
    pub field: String,
    pub predictions: Vec<f64>,
    pub confidence: f64,
    pub features: Vec<SelectedFeature>,
    pub patterns: Vec<DetectedPattern>,
    pub metrics: DirectionalMetrics,
}

pub struct MLAnalyzer;

impl MLAnalyzer {
    /// Analýza jedného cieľového stĺpca proti kandidátskym príznakom.
    /// Vyžaduje aspoň 4 hodnoty a nenulovú varianciu cieľa.
    pub fn analyze_target(
        candidates: &[(&str, &[f64])],
        target_name: &str,
        target: &[f64],
    ) -> AnalysisResult<MLResult> {
        let n = target.len();
        if n < 4 {
            return Err(AnalysisError::InsufficientData(format!(
                "ML analýza vyžaduje aspoň 4 hodnoty, dostala {}",
                n
            )));
        }
        validate_finite(target, target_name)?;
        if StatisticsEngine::sample_variance(target) == 0.0 {
            return Err(AnalysisError::InsufficientData(
                "Cieľový stĺpec má nulovú varianciu - niet čo predikovať".to_string(),
            ));
        }
        for (name, values) in candidates {
            if *name == target_name {
                continue;
            }
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

        let features = Self::select_features(candidates, target_name, target);
        let predictions = Self::ensemble_predictions(candidates, &features, target);
        let confidence = Self::prediction_confidence(target, &predictions);
        let patterns = Self::detect_patterns(target);
        let metrics = Self::directional_metrics(target, &predictions);

        Ok(MLResult {
            field: target_name.to_string(),
            predictions,
            confidence,
            features,
            patterns,
            metrics,
        })
    }

    /// Korelačný filter: |r| > 0.3, zostupne, najviac 3 príznaky.
    /// Stĺpce s nedefinovanou koreláciou (nulová variancia) sa ticho
    /// preskakujú - výber je best-effort.
    fn select_features(
        candidates: &[(&str, &[f64])],
        target_name: &str,
        target: &[f64],
    ) -> Vec<SelectedFeature> {
        let mut scored: Vec<(String, f64)> = Vec::new();
        for (name, values) in candidates {
            if *name == target_name {
                continue;
            }
            if let Ok(r) = StatisticsEngine::pearson(values, target) {
                if r.abs() > FEATURE_CORRELATION_THRESHOLD {
                    scored.push((name.to_string(), r));
                }
            }
        }

        scored.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(MAX_FEATURES);

        let total: f64 = scored.iter().map(|(_, r)| r.abs()).sum();
        scored
            .into_iter()
            .map(|(name, r)| SelectedFeature {
                name,
                correlation: r,
                weight: if total > 0.0 { r.abs() / total } else { 0.0 },
            })
            .collect()
    }

    /// Priemer troch deterministických modelov po indexoch:
    /// (1) korelačne vážená kombinácia odchýlok príznakov od priemerov,
    /// (2) kĺzavý priemer samotného cieľa s oknom min(5, n/4),
    /// (3) vážený priemer hodnôt príznakov normalizovanými |r| váhami.
    /// Bez príznakov ostáva len kĺzavý priemer.
    fn ensemble_predictions(
        candidates: &[(&str, &[f64])],
        features: &[SelectedFeature],
        target: &[f64],
    ) -> Vec<f64> {
        let n = target.len();
        let mean_y = StatisticsEngine::mean(target);

        let feature_values: Vec<(&SelectedFeature, &[f64])> = features
            .iter()
            .filter_map(|f| {
                candidates
                    .iter()
                    .find(|(name, _)| *name == f.name)
                    .map(|(_, values)| (f, *values))
            })
            .collect();
        let feature_means: Vec<f64> = feature_values
            .iter()
            .map(|(_, values)| StatisticsEngine::mean(values))
            .collect();

        // Model 2: kĺzavý priemer cieľa so zdieľaným primitívom
        let window = (n / 4).clamp(1, 5);
        let moving = StatisticsEngine::moving_average(target, window);

        (0..n)
            .map(|i| {
                let mut sum = moving[i];
                let mut models = 1.0;

                if !feature_values.is_empty() {
                    // Model 1: odchýlky od priemerov vážené koreláciou
                    let deviation: f64 = feature_values
                        .iter()
                        .zip(feature_means.iter())
                        .map(|((f, values), mean)| f.correlation * (values[i] - mean))
                        .sum();
                    sum += mean_y + deviation;
                    models += 1.0;

                    // Model 3: vážený priemer hodnôt príznakov
                    let weighted: f64 = feature_values
                        .iter()
                        .map(|(f, values)| f.weight * values[i])
                        .sum();
                    sum += weighted;
                    models += 1.0;
                }

                sum / models
            })
            .collect()
    }

    /// Dôvera = max(0, 1 - priemerná relatívna chyba); indexy s nulovou
    /// skutočnou hodnotou sa do priemeru nepočítajú
    fn prediction_confidence(target: &[f64], predictions: &[f64]) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        for (actual, predicted) in target.iter().zip(predictions.iter()) {
            if *actual != 0.0 {
                total += (predicted - actual).abs() / actual.abs();
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        (1.0 - total / count as f64).max(0.0)
    }

    /// Detekcia vzorov: trend z posunu priemerov polovíc, sezónnosť
    /// rovnakým autokorelačným skenom ako engine časových radov,
    /// odľahlé hodnoty nad 2.5σ a zhluky deterministickým k-means.
    fn detect_patterns(target: &[f64]) -> Vec<DetectedPattern> {
        let n = target.len();
        let mut patterns = Vec::new();

        // Trend: porovnanie priemerov a variancií polovíc
        let half = n / 2;
        let first = &target[..half];
        let second = &target[half..];
        let mean_first = StatisticsEngine::mean(first);
        let mean_second = StatisticsEngine::mean(second);
        let denom = mean_first.abs().max(1e-12);
        let shift = (mean_second - mean_first) / denom;
        if shift.abs() > TREND_SHIFT_THRESHOLD {
            let direction = if shift > 0.0 { "rastúci" } else { "klesajúci" };
            let var_first = StatisticsEngine::sample_variance(first);
            let var_second = StatisticsEngine::sample_variance(second);
            patterns.push(DetectedPattern {
                pattern_type: PatternType::Trend,
                description: format!(
                    "{} trend: posun priemeru polovíc {:.1} %, variancia {:.4} → {:.4}",
                    direction,
                    shift * 100.0,
                    var_first,
                    var_second
                ),
                confidence: shift.abs().min(1.0),
            });
        }

        // Sezónnosť: zdieľaný autokorelačný sken
        let seasonality = TimeSeriesEngine::detect_seasonality(target);
        if let Some(period) = seasonality.period {
            patterns.push(DetectedPattern {
                pattern_type: PatternType::Seasonality,
                description: format!("Sezónny vzor s periódou {}", period),
                confidence: seasonality.strength,
            });
        }

        // Odľahlé hodnoty nad 2.5σ
        let mean = StatisticsEngine::mean(target);
        let std_dev = StatisticsEngine::population_std_dev(target);
        if std_dev > 0.0 {
            let outliers = target
                .iter()
                .filter(|v| ((**v - mean) / std_dev).abs() > OUTLIER_Z)
                .count();
            if outliers > 0 {
                patterns.push(DetectedPattern {
                    pattern_type: PatternType::Outlier,
                    description: format!("Odľahlé hodnoty: {} nad 2.5σ od priemeru", outliers),
                    confidence: (0.5 + outliers as f64 / (2.0 * n as f64)).min(0.95),
                });
            }
        }

        // Zhluky: k-means s k = min(3, √n)
        let k = (n as f64).sqrt().floor() as usize;
        let k = k.min(3);
        if k >= 2 {
            let result = kmeans::kmeans_1d(target, k);
            let sst: f64 = target.iter().map(|v| (v - mean).powi(2)).sum();
            if sst > 0.0 {
                let mut ssb = 0.0;
                for (c, center) in result.centers.iter().enumerate() {
                    let size = result.assignments.iter().filter(|a| **a == c).count();
                    ssb += size as f64 * (center - mean).powi(2);
                }
                let separation = (ssb / sst).clamp(0.0, 1.0);
                if separation > CLUSTER_SEPARATION_THRESHOLD {
                    patterns.push(DetectedPattern {
                        pattern_type: PatternType::Cluster,
                        description: format!("{} zhluky hodnôt", result.centers.len()),
                        confidence: separation,
                    });
                }
            }
        }

        patterns
    }

    /// Smerová zhoda rast/pokles medzi predikciou a skutočnosťou,
    /// vyhodnotená cez confusion matrix s ochranou proti deleniu nulou
    fn directional_metrics(target: &[f64], predictions: &[f64]) -> DirectionalMetrics {
        let mut tp = 0.0;
        let mut tn = 0.0;
        let mut fp = 0.0;
        let mut fn_ = 0.0;

        for i in 1..target.len() {
            let actual_up = target[i] > target[i - 1];
            let predicted_up = predictions[i] > predictions[i - 1];
            match (predicted_up, actual_up) {
                (true, true) => tp += 1.0,
                (false, false) => tn += 1.0,
                (true, false) => fp += 1.0,
                (false, true) => fn_ += 1.0,
            }
        }

        let total = tp + tn + fp + fn_;
        let accuracy = if total > 0.0 { (tp + tn) / total } else { 0.0 };
        let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
        let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        DirectionalMetrics { accuracy, precision, recall, f1_score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_target() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let noise: Vec<f64> = (0..16)
            .map(|i| if i % 2 == 0 { 3.0 } else { -2.0 })
            .collect();
        (x, y, noise)
    }

    #[test]
    fn selects_correlated_features_up_to_three() {
        let (x, y, noise) = linear_target();
        let candidates: Vec<(&str, &[f64])> =
            vec![("x", &x), ("sum", &y), ("noise", &noise)];
        let result = MLAnalyzer::analyze_target(&candidates, "sum", &y).unwrap();

        assert_eq!(result.field, "sum");
        assert_eq!(result.features.len(), 1); // noise je pod hranicou 0.3
        assert_eq!(result.features[0].name, "x");
        assert_relative_eq!(result.features[0].correlation, 1.0, epsilon = 1e-9);
        assert_relative_eq!(result.features[0].weight, 1.0);
    }

    #[test]
    fn strong_predictor_gives_high_confidence_and_direction_match() {
        let (x, y, _) = linear_target();
        let candidates: Vec<(&str, &[f64])> = vec![("x", &x), ("y", &y)];
        let result = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();

        assert!(result.confidence > 0.5);
        assert!(result.metrics.accuracy > 0.9);
        assert!(result.metrics.f1_score > 0.9);
    }

    #[test]
    fn detects_trend_pattern_on_rising_series() {
        let y: Vec<f64> = (0..20).map(|i| 10.0 + 3.0 * i as f64).collect();
        let candidates: Vec<(&str, &[f64])> = vec![("y", &y)];
        let result = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();

        assert!(result
            .patterns
            .iter()
            .any(|p| p.pattern_type == PatternType::Trend));
    }

    #[test]
    fn detects_outlier_pattern() {
        let mut y: Vec<f64> = (0..30).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
        y[15] = 100.0;
        let candidates: Vec<(&str, &[f64])> = vec![("y", &y)];
        let result = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();

        let outlier = result
            .patterns
            .iter()
            .find(|p| p.pattern_type == PatternType::Outlier)
            .unwrap();
        assert!(outlier.description.contains("1 nad 2.5σ"));
    }

    #[test]
    fn detects_cluster_pattern_on_separated_groups() {
        let mut y = vec![1.0, 1.2, 0.8, 1.1, 0.9, 1.0, 1.1, 0.95];
        y.extend([20.0, 20.2, 19.8, 20.1, 19.9, 20.0, 20.1, 19.95]);
        let candidates: Vec<(&str, &[f64])> = vec![("y", &y)];
        let result = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();

        let cluster = result
            .patterns
            .iter()
            .find(|p| p.pattern_type == PatternType::Cluster)
            .unwrap();
        assert!(cluster.confidence > 0.9);
    }

    #[test]
    fn too_few_samples_is_insufficient_data() {
        let y = [1.0, 2.0, 3.0];
        let candidates: Vec<(&str, &[f64])> = vec![("y", &y)];
        let err = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn constant_target_is_insufficient_data() {
        let y = [2.0; 10];
        let candidates: Vec<(&str, &[f64])> = vec![("y", &y)];
        let err = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn analysis_is_idempotent() {
        let (x, y, noise) = linear_target();
        let candidates: Vec<(&str, &[f64])> =
            vec![("x", &x), ("y", &y), ("noise", &noise)];
        let a = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();
        let b = MLAnalyzer::analyze_target(&candidates, "y", &y).unwrap();
        assert_eq!(a, b);
    }
}
