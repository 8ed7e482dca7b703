//! Korelačná sieť číselných stĺpcov - každá dvojica dostane hranu
//! váženú |koreláciou|, uzly centralitu a kategóriu, graf hustotu
//! a ďalšie metriky.
use crate::error::{AnalysisError, AnalysisResult};
use crate::statistics::{CorrelationStrength, StatisticsEngine};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Hub,
    Connector,
    Peripheral,
}

impl NodeCategory {
    /// Kategória podľa centrality - rovnaké tretinové pásma ako
    /// počítanie zhlukov
    fn from_centrality(centrality: f64) -> Self {
        if centrality > 2.0 / 3.0 {
            NodeCategory::Hub
        } else if centrality > 1.0 / 3.0 {
            NodeCategory::Connector
        } else {
            NodeCategory::Peripheral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub connections: usize,
    pub centrality: f64,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub correlation: f64,
    #[serde(rename = "type")]
    pub edge_type: CorrelationStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkMetrics {
    pub density: f64,
    pub average_connections: f64,
    pub strongest_connection: Option<NetworkEdge>,
    pub central_nodes: Vec<String>,
    pub cluster_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    pub metrics: NetworkMetrics,
}

/// Počet top uzlov v `central_nodes`
const TOP_CENTRAL_NODES: usize = 3;

pub struct NetworkAnalysis;

impl NetworkAnalysis {
    /// Postaví neorientovaný graf nad číselnými stĺpcami.
    /// Vyžaduje aspoň 2 neprázdne číselné stĺpce.
    pub fn analyze(columns: &[(&str, &[f64])]) -> AnalysisResult<NetworkGraph> {
        if columns.len() < 2 || columns.iter().any(|(_, v)| v.is_empty()) {
            return Err(AnalysisError::Validation(
                "Sieťová analýza vyžaduje aspoň 2 neprázdne číselné stĺpce".to_string(),
            ));
        }

        let n = columns.len();
        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        let mut incident_weight = vec![0.0f64; n];
        let mut degree = vec![0usize; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let r = StatisticsEngine::pearson(columns[i].1, columns[j].1)?;
                let weight = r.abs();
                edges.push(NetworkEdge {
                    source: columns[i].0.to_string(),
                    target: columns[j].0.to_string(),
                    weight,
                    correlation: r,
                    edge_type: CorrelationStrength::from_r(r),
                });
                incident_weight[i] += weight;
                incident_weight[j] += weight;
                degree[i] += 1;
                degree[j] += 1;
            }
        }

        // Centralita = suma váh incidentných hrán / maximum (n-1)
        let max_incident = (n - 1) as f64;
        let nodes: Vec<NetworkNode> = columns
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                let centrality = incident_weight[i] / max_incident;
                NetworkNode {
                    id: name.to_string(),
                    connections: degree[i],
                    centrality,
                    category: NodeCategory::from_centrality(centrality),
                }
            })
            .collect();

        let metrics = Self::metrics(&nodes, &edges, n);

        Ok(NetworkGraph { nodes, edges, metrics })
    }

    fn metrics(nodes: &[NetworkNode], edges: &[NetworkEdge], n: usize) -> NetworkMetrics {
        let max_edges = (n * (n - 1) / 2) as f64;
        let density = edges.len() as f64 / max_edges;

        let average_connections =
            nodes.iter().map(|node| node.connections as f64).sum::<f64>() / n as f64;

        let strongest_connection = edges
            .iter()
            .max_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
            .cloned();

        let mut by_centrality: Vec<&NetworkNode> = nodes.iter().collect();
        by_centrality.sort_by(|a, b| {
            b.centrality
                .partial_cmp(&a.centrality)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let central_nodes: Vec<String> = by_centrality
            .iter()
            .take(TOP_CENTRAL_NODES)
            .map(|node| node.id.clone())
            .collect();

        // Heuristika zhlukov: počet neprázdnych tretinových pásiem
        // centrality, nie skutočná komunitná detekcia
        let mut buckets = [false; 3];
        for node in nodes {
            let idx = if node.centrality > 2.0 / 3.0 {
                2
            } else if node.centrality > 1.0 / 3.0 {
                1
            } else {
                0
            };
            buckets[idx] = true;
        }
        let cluster_count = buckets.iter().filter(|b| **b).count();

        NetworkMetrics {
            density,
            average_connections,
            strongest_connection,
            central_nodes,
            cluster_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_perfectly_correlated_columns() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let cols: Vec<(&str, &[f64])> = vec![("x", &x), ("y", &y)];
        let graph = NetworkAnalysis::analyze(&cols).unwrap();

        assert_eq!(graph.edges.len(), 1);
        assert_relative_eq!(graph.edges[0].weight, 1.0, epsilon = 1e-12);
        assert_eq!(graph.edges[0].edge_type, CorrelationStrength::VeryStrong);
        assert_relative_eq!(graph.metrics.density, 1.0);
        assert_eq!(graph.nodes.len(), 2);
        assert_relative_eq!(graph.nodes[0].centrality, 1.0, epsilon = 1e-12);
        assert_eq!(graph.nodes[0].category, NodeCategory::Hub);
    }

    #[test]
    fn single_column_is_validation_error() {
        let x = vec![1.0, 2.0, 3.0];
        let cols: Vec<(&str, &[f64])> = vec![("x", &x)];
        let err = NetworkAnalysis::analyze(&cols).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn zero_variance_column_is_insufficient_data() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![5.0, 5.0, 5.0];
        let cols: Vec<(&str, &[f64])> = vec![("x", &x), ("y", &y)];
        let err = NetworkAnalysis::analyze(&cols).unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn strongest_connection_and_central_nodes() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![1.1, 2.2, 2.9, 4.1, 5.2]; // takmer perfektná s a
        let c = vec![3.0, 1.0, 4.0, 1.5, 3.5]; // slabo korelovaná
        let cols: Vec<(&str, &[f64])> = vec![("a", &a), ("b", &b), ("c", &c)];
        let graph = NetworkAnalysis::analyze(&cols).unwrap();

        assert_eq!(graph.edges.len(), 3);
        let strongest = graph.metrics.strongest_connection.as_ref().unwrap();
        assert_eq!((strongest.source.as_str(), strongest.target.as_str()), ("a", "b"));
        assert_eq!(graph.metrics.central_nodes.len(), 3);
        assert_relative_eq!(graph.metrics.average_connections, 2.0);
        assert!(graph.metrics.cluster_count >= 1);
    }
}
