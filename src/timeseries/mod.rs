/// Engine časových radov - trend, sezónnosť, dekompozícia, ensemble
/// predpoveď, volatilita a heuristická stacionarita nad číselnou
/// sekvenciou s implicitným celočíselným časovým indexom.
pub mod forecast;

pub use forecast::{ForecastInfo, ForecastMethod, ForecastMethodOutput};

use crate::data_loading::validate_finite;
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::StatisticsEngine;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendInfo {
    pub slope: f64,
    pub intercept: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityInfo {
    pub detected: bool,
    pub period: Option<usize>,
    pub strength: f64,
}

/// Dekompozícia = trendová priamka + detrendovaný zvyšok.
/// Sezónna zložka sa neextrahuje (detekcia je samostatná),
/// reziduál sa preto rovná detrendovanej sérii.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub detrended: Vec<f64>,
    pub residual: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityInfo {
    pub std_dev: f64,
    pub annualized: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationarityInfo {
    pub is_stationary: bool,
    pub mean_diff: f64,
    pub variance_diff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesResult {
    pub trend: TrendInfo,
    pub seasonality: SeasonalityInfo,
    pub decomposition: Decomposition,
    pub forecast: ForecastInfo,
    pub volatility: VolatilityInfo,
    pub stationarity: StationarityInfo,
}

/// Hranica autokorelácie pre detekciu sezónnosti
const SEASONALITY_THRESHOLD: f64 = 0.7;
/// Maximálny skenovaný lag
const MAX_SEASONAL_LAG: usize = 20;
/// Anualizácia volatility - obchodné dni v roku
const TRADING_DAYS: f64 = 252.0;
/// Relatívny rozdiel polovíc pre heuristickú stacionaritu
const STATIONARITY_TOLERANCE: f64 = 0.1;

pub struct TimeSeriesEngine;

impl TimeSeriesEngine {
    /// Kompletná analýza časového radu. Minimálne 2 hodnoty,
    /// horizont predpovede aspoň 1 krok.
    pub fn analyze(values: &[f64], horizon: usize) -> AnalysisResult<TimeSeriesResult> {
        if values.len() < 2 {
            return Err(AnalysisError::InsufficientData(format!(
                "Analýza časového radu vyžaduje aspoň 2 hodnoty, dostala {}",
                values.len()
            )));
        }
        if horizon == 0 {
            return Err(AnalysisError::Validation(
                "Horizont predpovede musí byť aspoň 1".to_string(),
            ));
        }
        validate_finite(values, "timeseries")?;

        let trend = Self::trend(values)?;
        let seasonality = Self::detect_seasonality(values);
        let decomposition = Self::decompose(values, &trend);
        let forecast = forecast::forecast(values, horizon, &trend);
        let volatility = Self::volatility(values);
        let stationarity = Self::stationarity(values);

        Ok(TimeSeriesResult {
            trend,
            seasonality,
            decomposition,
            forecast,
            volatility,
            stationarity,
        })
    }

    /// OLS trend hodnoty proti indexu 0..n
    pub fn trend(values: &[f64]) -> AnalysisResult<TrendInfo> {
        let n = values.len();
        if n < 2 {
            return Err(AnalysisError::InsufficientData(
                "Trend vyžaduje aspoň 2 hodnoty".to_string(),
            ));
        }

        let mean_x = (n - 1) as f64 / 2.0;
        let mean_y = StatisticsEngine::mean(values);
        let mut s_xx = 0.0;
        let mut s_xy = 0.0;
        for (i, v) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            s_xx += dx * dx;
            s_xy += dx * (v - mean_y);
        }
        let slope = s_xy / s_xx;
        let intercept = mean_y - slope * mean_x;

        let direction = if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };
        let strength = if slope.abs() > 0.1 {
            TrendStrength::Strong
        } else if slope.abs() > 0.01 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        };

        Ok(TrendInfo { slope, intercept, direction, strength })
    }

    /// Sken autokorelácie na lagoch 2..min(20, n/2).
    /// Prvý lag nad hranicou 0.7 sa hlási ako perióda - first-match,
    /// nie best-match; pri viacerých kandidátoch vyhráva najkratší.
    pub fn detect_seasonality(values: &[f64]) -> SeasonalityInfo {
        let max_lag = MAX_SEASONAL_LAG.min(values.len() / 2);
        if max_lag >= 2 {
            for lag in 2..=max_lag {
                let ac = StatisticsEngine::autocorrelation(values, lag);
                if ac > SEASONALITY_THRESHOLD {
                    return SeasonalityInfo {
                        detected: true,
                        period: Some(lag),
                        strength: ac,
                    };
                }
            }
        }
        SeasonalityInfo { detected: false, period: None, strength: 0.0 }
    }

    fn decompose(values: &[f64], trend: &TrendInfo) -> Decomposition {
        let trend_line: Vec<f64> = (0..values.len())
            .map(|i| trend.intercept + trend.slope * i as f64)
            .collect();
        let detrended: Vec<f64> = values
            .iter()
            .zip(trend_line.iter())
            .map(|(v, t)| v - t)
            .collect();
        Decomposition {
            trend: trend_line,
            residual: detrended.clone(),
            detrended,
        }
    }

    /// Volatilita medziobdobných percentuálnych zmien; nulový
    /// predchodca sa preskakuje (zmena by bola nekonečná)
    fn volatility(values: &[f64]) -> VolatilityInfo {
        let changes: Vec<f64> = values
            .windows(2)
            .filter(|w| w[0] != 0.0)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect();
        let std_dev = StatisticsEngine::std_dev(&changes);

        // Max drawdown: najväčší relatívny pokles z lokálneho vrcholu
        let mut peak = f64::NEG_INFINITY;
        let mut max_drawdown = 0.0f64;
        for &v in values {
            if v > peak {
                peak = v;
            }
            if peak > 0.0 {
                max_drawdown = max_drawdown.max((peak - v) / peak);
            }
        }

        VolatilityInfo {
            std_dev,
            annualized: std_dev * TRADING_DAYS.sqrt(),
            max_drawdown,
        }
    }

    /// Heuristické porovnanie polovíc radu - nie formálny unit-root
    /// test. Stacionárny, ak sa priemer aj variancia polovíc líšia
    /// o menej ako 10 % väčšej hodnoty.
    fn stationarity(values: &[f64]) -> StationarityInfo {
        let half = values.len() / 2;
        let first = &values[..half];
        let second = &values[half..];

        let mean_diff = relative_diff(
            StatisticsEngine::mean(first),
            StatisticsEngine::mean(second),
        );
        let variance_diff = relative_diff(
            StatisticsEngine::sample_variance(first),
            StatisticsEngine::sample_variance(second),
        );

        StationarityInfo {
            is_stationary: mean_diff < STATIONARITY_TOLERANCE
                && variance_diff < STATIONARITY_TOLERANCE,
            mean_diff,
            variance_diff,
        }
    }
}

/// |a-b| relatívne k väčšej absolútnej hodnote; 0 pre dve nuly
fn relative_diff(a: f64, b: f64) -> f64 {
    let larger = a.abs().max(b.abs());
    if larger == 0.0 {
        return 0.0;
    }
    (a - b).abs() / larger
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trend_of_linear_series() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 0.5 * i as f64).collect();
        let trend = TimeSeriesEngine::trend(&values).unwrap();
        assert_relative_eq!(trend.slope, 0.5, epsilon = 1e-9);
        assert_relative_eq!(trend.intercept, 3.0, epsilon = 1e-9);
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert_eq!(trend.strength, TrendStrength::Strong);
    }

    #[test]
    fn seasonality_reports_first_matching_lag() {
        // perióda 2: silná autokorelácia na lagu 2 aj 4, hlási sa 2
        let values: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 1.0 } else { 9.0 }).collect();
        let s = TimeSeriesEngine::detect_seasonality(&values);
        assert!(s.detected);
        assert_eq!(s.period, Some(2));
        assert!(s.strength > 0.7);
    }

    #[test]
    fn seasonality_period_four() {
        let pattern = [0.0, 5.0, 10.0, 5.0];
        let values: Vec<f64> = (0..20).map(|i| pattern[i % 4]).collect();
        let s = TimeSeriesEngine::detect_seasonality(&values);
        assert!(s.detected);
        assert_eq!(s.period, Some(4));
    }

    #[test]
    fn no_seasonality_without_periodic_structure() {
        let values = [5.0, 2.0, 8.0, 3.0, 7.0, 1.0, 9.0, 4.0, 6.0, 2.5, 7.5, 3.5];
        let s = TimeSeriesEngine::detect_seasonality(&values);
        assert!(!s.detected);
        assert_eq!(s.period, None);
    }

    #[test]
    fn decomposition_residual_equals_detrended() {
        let values: Vec<f64> = (0..10).map(|i| i as f64 + (i % 3) as f64).collect();
        let result = TimeSeriesEngine::analyze(&values, 3).unwrap();
        assert_eq!(result.decomposition.detrended, result.decomposition.residual);
        for (v, (t, d)) in values.iter().zip(
            result
                .decomposition
                .trend
                .iter()
                .zip(result.decomposition.detrended.iter()),
        ) {
            assert_relative_eq!(t + d, *v, epsilon = 1e-9);
        }
    }

    #[test]
    fn volatility_skips_zero_denominator() {
        let values = [0.0, 1.0, 2.0, 1.0];
        let result = TimeSeriesEngine::analyze(&values, 2).unwrap();
        assert!(result.volatility.std_dev.is_finite());
        assert!(result.volatility.max_drawdown > 0.0);
    }

    #[test]
    fn flat_series_is_stationary() {
        let values = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.05];
        let result = TimeSeriesEngine::analyze(&values, 2).unwrap();
        assert!(result.stationarity.is_stationary);
    }

    #[test]
    fn trending_series_is_not_stationary() {
        let values: Vec<f64> = (0..20).map(|i| i as f64 * 3.0).collect();
        let result = TimeSeriesEngine::analyze(&values, 2).unwrap();
        assert!(!result.stationarity.is_stationary);
    }

    #[test]
    fn single_value_is_insufficient_data() {
        let err = TimeSeriesEngine::analyze(&[1.0], 5).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn zero_horizon_is_validation_error() {
        let err = TimeSeriesEngine::analyze(&[1.0, 2.0, 3.0], 0).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
