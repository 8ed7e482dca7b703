/// Modul so zdieľanými štatistickými primitívami.
/// Všetky ostatné enginy (regresia, časové rady, anomálie, sieť, ML)
/// závisia na tomto module - priemer, variancia, kĺzavý priemer,
/// autokorelácia a korelácia existujú v celom projekte len raz.
pub mod correlation;
pub mod descriptive;

pub use correlation::{CorrelationMatrix, CorrelationPair, CorrelationStrength};
pub use descriptive::{StatisticalSummary, StatisticsEngine};
