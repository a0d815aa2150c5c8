use crate::record::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `(time, value)` samples in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleSeries {
    pub samples: Vec<(f64, f64)>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, value: f64) {
        self.samples.push((time, value));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|(t, _)| *t).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|(_, v)| *v).collect()
    }

    /// Time of the last sample, or 0 for an empty series.
    pub fn end_time(&self) -> f64 {
        self.samples.last().map(|(t, _)| *t).unwrap_or(0.0)
    }
}

/// Empirical CDF: sorted values and their rank fractions in `[0, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CdfSeries {
    pub values: Vec<f64>,
    pub fractions: Vec<f64>,
}

impl CdfSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied().zip(self.fractions.iter().copied())
    }
}

/// Per-node and aggregate throughput (Mbps) sampled at shared time points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThroughputSeries {
    pub time: Vec<f64>,
    pub per_node: BTreeMap<NodeId, Vec<f64>>,
    /// Sum over client nodes at each time point.
    pub total: Vec<f64>,
    pub num_clients: u32,
}

impl ThroughputSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn node(&self, node: NodeId) -> Option<&[f64]> {
        self.per_node.get(&node).map(|v| v.as_slice())
    }

    pub fn clients(&self) -> impl Iterator<Item = (NodeId, &[f64])> + '_ {
        let num_clients = self.num_clients;
        self.per_node
            .range(..num_clients)
            .map(|(id, series)| (*id, series.as_slice()))
    }

    pub fn total_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.total.iter().copied())
    }
}
