use super::TrendInfo;
use crate::regression::solver::solve_normal_equations;
use crate::statistics::StatisticsEngine;
use serde::Serialize;

/// Vyhladzovacia konštanta exponenciálneho vyrovnávania
const SMOOTHING_ALPHA: f64 = 0.3;
/// Kvantil normálneho rozdelenia pre 95% pás spoľahlivosti
const Z_95: f64 = 1.96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    LinearExtrapolation,
    PolynomialExtrapolation,
    ExponentialSmoothing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMethodOutput {
    pub method: ForecastMethod,
    pub values: Vec<f64>,
}

/// Ensemble predpoveď: aritmetický priemer dostupných metód
/// po jednotlivých krokoch horizontu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastInfo {
    pub methods: Vec<ForecastMethodOutput>,
    pub ensemble: Vec<f64>,
    pub confidence_intervals: Vec<(f64, f64)>,
}

pub(super) fn forecast(values: &[f64], horizon: usize, trend: &TrendInfo) -> ForecastInfo {
    let n = values.len();
    let mut methods = Vec::new();

    // Lineárna extrapolácia trendovej priamky
    let linear: Vec<f64> = (0..horizon)
        .map(|h| trend.intercept + trend.slope * (n + h) as f64)
        .collect();
    methods.push(ForecastMethodOutput {
        method: ForecastMethod::LinearExtrapolation,
        values: linear,
    });

    // Kvadratická extrapolácia - len ak má sústava riešenie
    if n >= 4 {
        let design: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let x = i as f64;
                vec![1.0, x, x * x]
            })
            .collect();
        if let Ok(coeffs) = solve_normal_equations(&design, values) {
            let poly: Vec<f64> = (0..horizon)
                .map(|h| {
                    let x = (n + h) as f64;
                    coeffs[0] + coeffs[1] * x + coeffs[2] * x * x
                })
                .collect();
            methods.push(ForecastMethodOutput {
                method: ForecastMethod::PolynomialExtrapolation,
                values: poly,
            });
        }
    }

    // Exponenciálne vyrovnávanie s pevným α - plochá predpoveď
    // poslednej vyrovnanej úrovne
    let mut level = values[0];
    for v in &values[1..] {
        level = SMOOTHING_ALPHA * v + (1.0 - SMOOTHING_ALPHA) * level;
    }
    methods.push(ForecastMethodOutput {
        method: ForecastMethod::ExponentialSmoothing,
        values: vec![level; horizon],
    });

    let ensemble: Vec<f64> = (0..horizon)
        .map(|h| {
            let sum: f64 = methods.iter().map(|m| m.values[h]).sum();
            sum / methods.len() as f64
        })
        .collect();

    let spread = StatisticsEngine::std_dev(&ensemble);
    let confidence_intervals: Vec<(f64, f64)> = ensemble
        .iter()
        .map(|v| (v - Z_95 * spread, v + Z_95 * spread))
        .collect();

    ForecastInfo {
        methods,
        ensemble,
        confidence_intervals,
    }
}
