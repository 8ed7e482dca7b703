//! Tenký dispatcher: mapuje selektor operácie a parametre z boundary
//! vrstvy na presne jeden engine a vracia serializovateľný výsledok.
//! Žiadna logika navyše - enginy si validujú vstupy samy.
use crate::anomaly::{AnomalyDetectionEngine, AnomalyMethod, AnomalyReport};
use crate::data_loading::DataTable;
use crate::error::{AnalysisError, AnalysisResult};
use crate::hypothesis::{HypothesisTestResult, HypothesisTestingEngine, DEFAULT_ALPHA};
use crate::ml::{MLAnalyzer, MLResult};
use crate::network::{NetworkAnalysis, NetworkGraph};
use crate::regression::{RegressionEngine, RegressionModel, RegressionResult};
use crate::statistics::{CorrelationMatrix, StatisticalSummary, StatisticsEngine};
use crate::timeseries::{TimeSeriesEngine, TimeSeriesResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Uzavretý zoznam operácií enginu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisOperation {
    Descriptive,
    Correlation,
    Regression,
    Hypothesis,
    TimeSeries,
    AnomalyDetection,
    Network,
    MlPrediction,
}

/// Registry aliasov operácií - rovnaký vzor ako registry
/// kompatibility formátov, inicializuje sa raz
static OPERATION_ALIASES: Lazy<HashMap<&'static str, AnalysisOperation>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("descriptive", AnalysisOperation::Descriptive);
    map.insert("descriptive_stats", AnalysisOperation::Descriptive);
    map.insert("statistics", AnalysisOperation::Descriptive);
    map.insert("correlation", AnalysisOperation::Correlation);
    map.insert("regression", AnalysisOperation::Regression);
    map.insert("hypothesis", AnalysisOperation::Hypothesis);
    map.insert("hypothesis_test", AnalysisOperation::Hypothesis);
    map.insert("timeseries", AnalysisOperation::TimeSeries);
    map.insert("time_series", AnalysisOperation::TimeSeries);
    map.insert("anomaly", AnalysisOperation::AnomalyDetection);
    map.insert("anomaly_detection", AnalysisOperation::AnomalyDetection);
    map.insert("network", AnalysisOperation::Network);
    map.insert("network_analysis", AnalysisOperation::Network);
    map.insert("ml", AnalysisOperation::MlPrediction);
    map.insert("ml_prediction", AnalysisOperation::MlPrediction);
    map.insert("prediction", AnalysisOperation::MlPrediction);
    map
});

impl AnalysisOperation {
    pub fn parse(s: &str) -> AnalysisResult<Self> {
        OPERATION_ALIASES
            .get(s.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| AnalysisError::Validation(format!("Neznáma operácia: {}", s)))
    }

    /// Kanonický názov pre boundary odpoveď
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisOperation::Descriptive => "descriptive",
            AnalysisOperation::Correlation => "correlation",
            AnalysisOperation::Regression => "regression",
            AnalysisOperation::Hypothesis => "hypothesis",
            AnalysisOperation::TimeSeries => "timeseries",
            AnalysisOperation::AnomalyDetection => "anomaly",
            AnalysisOperation::Network => "network",
            AnalysisOperation::MlPrediction => "ml",
        }
    }

    /// Zoznam všetkých operácií s popisom
    pub fn available() -> Vec<(&'static str, &'static str)> {
        vec![
            ("descriptive", "Deskriptívna štatistika číselných stĺpcov"),
            ("correlation", "Korelačná matica s p-hodnotami a kategóriami sily"),
            ("regression", "Lineárna / polynomiálna / ridge / lasso regresia"),
            ("hypothesis", "Testy hypotéz: t-test, z-test, ANOVA, chi-kvadrát"),
            ("timeseries", "Trend, sezónnosť, dekompozícia a ensemble predpoveď"),
            ("anomaly", "Detekcia anomálií: z-score, IQR, kĺzavý priemer"),
            ("network", "Korelačná sieť stĺpcov s metrikami centrality"),
            ("ml", "Heuristická predikcia a detekcia vzorov"),
        ]
    }
}

/// Parametre operácie z boundary vrstvy; všetky polia voliteľné,
/// defaulty dopĺňa dispatcher
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisParameters {
    pub target: Option<String>,
    pub features: Option<Vec<String>>,
    pub model: Option<String>,
    pub degree: Option<usize>,
    pub alpha: Option<f64>,
    pub test: Option<String>,
    pub second: Option<String>,
    pub paired: Option<bool>,
    pub groups: Option<Vec<String>>,
    pub population_mean: Option<f64>,
    pub population_std: Option<f64>,
    pub significance: Option<f64>,
    pub method: Option<String>,
    pub confidence: Option<f64>,
    pub periods: Option<usize>,
}

/// Default horizont predpovede časového radu
const DEFAULT_FORECAST_PERIODS: usize = 5;
/// Default regularizácia pre ridge/lasso
const DEFAULT_REGULARIZATION_ALPHA: f64 = 1.0;
/// Default stupeň polynomiálnej regresie
const DEFAULT_POLYNOMIAL_DEGREE: usize = 2;
/// Default hladina spoľahlivosti detekcie anomálií
const DEFAULT_ANOMALY_CONFIDENCE: f64 = 0.95;

/// Deskriptívna štatistika jedného stĺpca s jeho menom
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub summary: StatisticalSummary,
}

/// Výsledok ľubovoľnej operácie - serializuje sa priamo ako `data`
/// boundary odpovede
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Descriptive(Vec<ColumnSummary>),
    Correlation(CorrelationMatrix),
    Regression(Box<RegressionResult>),
    Hypothesis(HypothesisTestResult),
    TimeSeries(Box<TimeSeriesResult>),
    Anomaly(AnomalyReport),
    Network(NetworkGraph),
    Ml(Vec<MLResult>),
}

pub struct AnalysisEngine;

impl AnalysisEngine {
    /// Spustí jednu operáciu nad tabuľkou. Čistá funkcia - rovnaký
    /// vstup dáva bitovo rovnaký výstup, žiadny stav medzi volaniami.
    pub fn analyze(
        table: &DataTable,
        operation: AnalysisOperation,
        params: &AnalysisParameters,
    ) -> AnalysisResult<AnalysisOutput> {
        match operation {
            AnalysisOperation::Descriptive => Self::descriptive(table, params),
            AnalysisOperation::Correlation => {
                let columns = table.numeric_columns()?;
                Ok(AnalysisOutput::Correlation(StatisticsEngine::correlation_matrix(&columns)?))
            }
            AnalysisOperation::Regression => Self::regression(table, params),
            AnalysisOperation::Hypothesis => Self::hypothesis(table, params),
            AnalysisOperation::TimeSeries => {
                let target = Self::required_target(table, params)?;
                let periods = params.periods.unwrap_or(DEFAULT_FORECAST_PERIODS);
                Ok(AnalysisOutput::TimeSeries(Box::new(TimeSeriesEngine::analyze(
                    target, periods,
                )?)))
            }
            AnalysisOperation::AnomalyDetection => {
                let target = Self::required_target(table, params)?;
                let method = match &params.method {
                    Some(m) => AnomalyMethod::parse(m)?,
                    None => AnomalyMethod::Zscore,
                };
                let confidence = params.confidence.unwrap_or(DEFAULT_ANOMALY_CONFIDENCE);
                Ok(AnalysisOutput::Anomaly(AnomalyDetectionEngine::detect(
                    target, method, confidence,
                )?))
            }
            AnalysisOperation::Network => {
                let columns = table.numeric_columns()?;
                Ok(AnalysisOutput::Network(NetworkAnalysis::analyze(&columns)?))
            }
            AnalysisOperation::MlPrediction => Self::ml(table, params),
        }
    }

    fn descriptive(
        table: &DataTable,
        params: &AnalysisParameters,
    ) -> AnalysisResult<AnalysisOutput> {
        let mut summaries = Vec::new();
        match &params.target {
            Some(name) => {
                let values = table.numeric_column(name)?;
                summaries.push(ColumnSummary {
                    column: name.clone(),
                    summary: StatisticsEngine::summarize(values)?,
                });
            }
            None => {
                for (name, values) in table.numeric_columns()? {
                    summaries.push(ColumnSummary {
                        column: name.to_string(),
                        summary: StatisticsEngine::summarize(values)?,
                    });
                }
                if summaries.is_empty() {
                    return Err(AnalysisError::Validation(
                        "Tabuľka neobsahuje žiadny číselný stĺpec".to_string(),
                    ));
                }
            }
        }
        Ok(AnalysisOutput::Descriptive(summaries))
    }

    fn regression(
        table: &DataTable,
        params: &AnalysisParameters,
    ) -> AnalysisResult<AnalysisOutput> {
        let target_name = Self::required_target_name(params)?;
        let target = table.numeric_column(target_name)?;

        let feature_names: Vec<String> = match &params.features {
            Some(names) if !names.is_empty() => names.clone(),
            _ => table
                .numeric_columns()?
                .iter()
                .map(|(name, _)| name.to_string())
                .filter(|name| name != target_name)
                .collect(),
        };
        let mut features: Vec<(&str, &[f64])> = Vec::with_capacity(feature_names.len());
        for name in &feature_names {
            features.push((name.as_str(), table.numeric_column(name)?));
        }

        let model = Self::parse_model(params)?;
        Ok(AnalysisOutput::Regression(Box::new(RegressionEngine::fit(
            model, &features, target,
        )?)))
    }

    fn parse_model(params: &AnalysisParameters) -> AnalysisResult<RegressionModel> {
        let kind = params.model.as_deref().unwrap_or("linear");
        match kind.to_lowercase().as_str() {
            "linear" => Ok(RegressionModel::Linear),
            "polynomial" => Ok(RegressionModel::Polynomial {
                degree: params.degree.unwrap_or(DEFAULT_POLYNOMIAL_DEGREE),
            }),
            "ridge" => Ok(RegressionModel::Ridge {
                alpha: params.alpha.unwrap_or(DEFAULT_REGULARIZATION_ALPHA),
            }),
            "lasso" => Ok(RegressionModel::Lasso {
                alpha: params.alpha.unwrap_or(DEFAULT_REGULARIZATION_ALPHA),
            }),
            _ => Err(AnalysisError::Validation(format!(
                "Neznámy regresný model: {}",
                kind
            ))),
        }
    }

    fn hypothesis(
        table: &DataTable,
        params: &AnalysisParameters,
    ) -> AnalysisResult<AnalysisOutput> {
        let alpha = params.significance.unwrap_or(DEFAULT_ALPHA);
        let test = params.test.as_deref().ok_or_else(|| {
            AnalysisError::Validation("Parameter 'test' je povinný pre testy hypotéz".to_string())
        })?;

        let result = match test.to_lowercase().as_str() {
            "t_test" | "one_sample_t_test" => {
                let sample = Self::required_target(table, params)?;
                let mu = params.population_mean.ok_or_else(|| {
                    AnalysisError::Validation(
                        "Parameter 'population_mean' je povinný pre t-test".to_string(),
                    )
                })?;
                HypothesisTestingEngine::one_sample_t_test(sample, mu, alpha)?
            }
            "two_sample_t_test" | "t_test_two_sample" => {
                let sample_a = Self::required_target(table, params)?;
                let sample_b = Self::second_column(table, params)?;
                let paired = params.paired.unwrap_or(false);
                HypothesisTestingEngine::two_sample_t_test(sample_a, sample_b, paired, alpha)?
            }
            "z_test" => {
                let sample = Self::required_target(table, params)?;
                let mu = params.population_mean.ok_or_else(|| {
                    AnalysisError::Validation(
                        "Parameter 'population_mean' je povinný pre z-test".to_string(),
                    )
                })?;
                let sigma = params.population_std.ok_or_else(|| {
                    AnalysisError::Validation(
                        "Parameter 'population_std' je povinný pre z-test".to_string(),
                    )
                })?;
                HypothesisTestingEngine::z_test(sample, mu, sigma, alpha)?
            }
            "anova" => {
                let group_names: Vec<String> = match &params.groups {
                    Some(names) if !names.is_empty() => names.clone(),
                    _ => table
                        .numeric_columns()?
                        .iter()
                        .map(|(name, _)| name.to_string())
                        .collect(),
                };
                let mut groups: Vec<&[f64]> = Vec::with_capacity(group_names.len());
                for name in &group_names {
                    groups.push(table.numeric_column(name)?);
                }
                HypothesisTestingEngine::anova(&groups, alpha)?
            }
            "chi_square" | "chi_square_goodness_of_fit" => {
                let observed = Self::required_target(table, params)?;
                let expected = Self::second_column(table, params)?;
                HypothesisTestingEngine::chi_square_goodness_of_fit(observed, expected, alpha)?
            }
            _ => {
                return Err(AnalysisError::Validation(format!(
                    "Neznámy test hypotézy: {}",
                    test
                )))
            }
        };

        Ok(AnalysisOutput::Hypothesis(result))
    }

    fn ml(table: &DataTable, params: &AnalysisParameters) -> AnalysisResult<AnalysisOutput> {
        let candidates = table.numeric_columns()?;
        match &params.target {
            Some(name) => {
                let target = table.numeric_column(name)?;
                Ok(AnalysisOutput::Ml(vec![MLAnalyzer::analyze_target(
                    &candidates,
                    name,
                    target,
                )?]))
            }
            None => {
                // Bez explicitného cieľa sa analyzuje každý číselný
                // stĺpec; nevyhovujúce ciele sa preskakujú
                let mut results = Vec::new();
                for (name, values) in &candidates {
                    if let Ok(result) = MLAnalyzer::analyze_target(&candidates, name, values) {
                        results.push(result);
                    }
                }
                if results.is_empty() {
                    return Err(AnalysisError::InsufficientData(
                        "Žiadny číselný stĺpec nie je vhodný na ML analýzu".to_string(),
                    ));
                }
                Ok(AnalysisOutput::Ml(results))
            }
        }
    }

    fn required_target_name(params: &AnalysisParameters) -> AnalysisResult<&str> {
        params.target.as_deref().ok_or_else(|| {
            AnalysisError::Validation("Parameter 'target' je povinný pre túto operáciu".to_string())
        })
    }

    fn required_target<'a>(
        table: &'a DataTable,
        params: &AnalysisParameters,
    ) -> AnalysisResult<&'a [f64]> {
        table.numeric_column(Self::required_target_name(params)?)
    }

    fn second_column<'a>(
        table: &'a DataTable,
        params: &AnalysisParameters,
    ) -> AnalysisResult<&'a [f64]> {
        let name = params.second.as_deref().ok_or_else(|| {
            AnalysisError::Validation("Parameter 'second' je povinný pre tento test".to_string())
        })?;
        table.numeric_column(name)
    }
}
