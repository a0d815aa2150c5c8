use crate::error::{AnalysisError, Result};
use crate::parse::{TraceReader, open};
use ccbench_abstract::{NodeId, ThroughputConfig, ThroughputSeries, TraceEvent, TraceRecord};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// Accounting state of one node across windows.
#[derive(Debug, Default)]
struct NodeWindow {
    /// Bytes accepted in the active window.
    bytes: u64,
    /// Highest sequence number accepted so far, `None` until the first one.
    last_seq: Option<u64>,
    /// Bytes accepted over the whole trace.
    total_bytes: u64,
    /// Mbps of each closed window.
    series: Vec<f64>,
}

impl NodeWindow {
    /// Account `size` bytes unless `seq` does not advance past the last
    /// accepted sequence number (a retransmission).
    fn accept(&mut self, size: u64, seq: u64) -> bool {
        if self.last_seq.is_some_and(|last| seq <= last) {
            return false;
        }
        self.bytes += size;
        self.total_bytes += size;
        self.last_seq = Some(seq);
        true
    }
}

/// Buckets matching trace records into fixed-width windows and turns the
/// bytes of each window into per-node throughput.
///
/// The window clock starts at 0 and moves one granularity step each time a
/// record lands at or beyond `clock + granularity`. The record that closes a
/// window provides that window's time point and is then accounted in the next
/// window.
pub struct ThroughputAggregator {
    granularity: f64,
    num_clients: u32,
    event: TraceEvent,
    protocol: String,

    nodes: BTreeMap<NodeId, NodeWindow>,
    time: Vec<f64>,
    /// Index of the active window; the clock is `window * granularity`.
    window: u64,
    last_time: Option<f64>,
    matched: usize,
    suppressed: usize,
}

impl ThroughputAggregator {
    pub fn new(config: &ThroughputConfig) -> Result<Self> {
        if !(config.granularity.is_finite() && config.granularity > 0.0) {
            return Err(AnalysisError::InvalidGranularity(config.granularity));
        }
        let num_nodes = config.num_nodes().ok_or(AnalysisError::NodeTableTooLarge {
            clients: config.num_clients,
            leafs: config.num_leafs,
            spines: config.num_spines,
        })?;
        let nodes = (0..num_nodes)
            .map(|id| (id, NodeWindow::default()))
            .collect();
        Ok(Self {
            granularity: config.granularity,
            num_clients: config.num_clients,
            event: config.event,
            protocol: config.protocol.clone(),
            nodes,
            time: Vec::new(),
            window: 0,
            last_time: None,
            matched: 0,
            suppressed: 0,
        })
    }

    fn clock(&self) -> f64 {
        self.window as f64 * self.granularity
    }

    /// Number of records that passed the event/protocol filter.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Number of matching records dropped as retransmissions.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Bytes accepted for `node` so far, across all windows.
    pub fn accepted_bytes(&self, node: NodeId) -> Option<u64> {
        self.nodes.get(&node).map(|n| n.total_bytes)
    }

    /// Feed one record. Records that do not match the configured event and
    /// packet type are ignored.
    pub fn push(&mut self, record: &TraceRecord) -> Result<()> {
        if !record.matches(self.event, &self.protocol) {
            return Ok(());
        }
        if let Some(last) = self.last_time
            && record.time < last
        {
            warn!(
                "Trace time went backwards: {} after {} (node {})",
                record.time, last, record.from_node
            );
        }
        self.matched += 1;
        self.last_time = Some(record.time);

        if record.time - self.clock() >= self.granularity {
            self.flush(record.time);
            self.window += 1;
        }

        let Some(node) = self.nodes.get_mut(&record.from_node) else {
            return Err(self.unknown_node(record.from_node));
        };
        if !node.accept(record.size, record.seq_num) {
            self.suppressed += 1;
            debug!(
                "Suppressed retransmission from node {} seq={}",
                record.from_node, record.seq_num
            );
        }
        Ok(())
    }

    fn unknown_node(&self, node: NodeId) -> AnalysisError {
        AnalysisError::UnknownNode {
            node,
            nodes: self.nodes.len() as u32,
        }
    }

    /// Close the active window at time point `at`.
    fn flush(&mut self, at: f64) {
        debug!("Closing window {} at t={}", self.window, at);
        self.time.push(at);
        for node in self.nodes.values_mut() {
            let mbps = node.bytes as f64 * 8.0 / self.granularity / 1_000_000.0;
            node.series.push(mbps);
            node.bytes = 0;
        }
    }

    /// Close the trailing window and produce the series.
    pub fn finish(mut self) -> Result<ThroughputSeries> {
        let Some(last_time) = self.last_time else {
            return Err(AnalysisError::EmptyTrace {
                marker: self.event.marker(),
                protocol: self.protocol,
            });
        };
        self.flush(last_time);

        let num_clients = self.num_clients;
        let total = (0..self.time.len())
            .map(|idx| {
                self.nodes
                    .range(..num_clients)
                    .map(|(_, node)| node.series[idx])
                    .sum()
            })
            .collect();

        debug!(
            "Aggregated {} records into {} windows ({} retransmissions suppressed)",
            self.matched,
            self.time.len(),
            self.suppressed
        );

        Ok(ThroughputSeries {
            time: self.time,
            per_node: self
                .nodes
                .into_iter()
                .map(|(id, node)| (id, node.series))
                .collect(),
            total,
            num_clients,
        })
    }
}

pub fn aggregate<'a, I>(records: I, config: &ThroughputConfig) -> Result<ThroughputSeries>
where
    I: IntoIterator<Item = &'a TraceRecord>,
{
    let mut agg = ThroughputAggregator::new(config)?;
    for record in records {
        agg.push(record)?;
    }
    agg.finish()
}

pub fn read_throughput<R: BufRead>(reader: R, config: &ThroughputConfig) -> Result<ThroughputSeries> {
    let mut agg = ThroughputAggregator::new(config)?;
    for record in TraceReader::new(reader) {
        agg.push(&record?)?;
    }
    agg.finish()
}

pub fn load_throughput(path: &Path, config: &ThroughputConfig) -> Result<ThroughputSeries> {
    read_throughput(open(path)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn rec(time: f64, node: NodeId, size: u64, seq: u64) -> TraceRecord {
        TraceRecord {
            event: TraceEvent::Dequeue,
            time,
            from_node: node,
            to_node: 9,
            packet_type: "tcp".to_string(),
            size,
            flags: "-------".to_string(),
            flow_id: node as i64,
            src_addr: format!("{node}.0"),
            dst_addr: "9.0".to_string(),
            seq_num: seq,
            packet_id: None,
        }
    }

    fn config(clients: u32) -> ThroughputConfig {
        ThroughputConfig::with_clients(clients)
    }

    fn bytes_of(mbps: f64, granularity: f64) -> f64 {
        mbps * granularity * 1_000_000.0 / 8.0
    }

    #[test]
    fn each_record_in_its_own_window() {
        let records = [
            rec(0.0005, 0, 1000, 1),
            rec(0.0015, 0, 1000, 2),
            rec(0.0025, 0, 1000, 3),
        ];
        let series = aggregate(&records, &config(1)).unwrap();
        assert_eq!(series.time, vec![0.0015, 0.0025, 0.0025]);
        let client = series.node(0).unwrap();
        assert_eq!(client.len(), 3);
        for mbps in client {
            assert!((mbps - 8.0).abs() < 1e-9, "got {mbps}");
        }
    }

    #[test]
    fn strictly_increasing_sequences_count_every_byte() {
        let cfg = config(2);
        let mut agg = ThroughputAggregator::new(&cfg).unwrap();
        let mut expected = [0u64; 2];
        for i in 0..200u64 {
            let node = (i % 2) as NodeId;
            let size = 500 + (i * 13) % 1000;
            expected[node as usize] += size;
            agg.push(&rec(i as f64 * 0.00037, node, size, i + 1)).unwrap();
        }
        assert_eq!(agg.accepted_bytes(0), Some(expected[0]));
        assert_eq!(agg.accepted_bytes(1), Some(expected[1]));
        assert_eq!(agg.suppressed(), 0);

        let series = agg.finish().unwrap();
        for node in 0..2 {
            let counted: f64 = series
                .node(node)
                .unwrap()
                .iter()
                .map(|m| bytes_of(*m, cfg.granularity))
                .sum();
            assert!((counted - expected[node as usize] as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn retransmission_counts_once() {
        let mut agg = ThroughputAggregator::new(&config(1)).unwrap();
        agg.push(&rec(0.0001, 0, 1000, 7)).unwrap();
        agg.push(&rec(0.0002, 0, 1000, 7)).unwrap();
        assert_eq!(agg.accepted_bytes(0), Some(1000));
        assert_eq!(agg.suppressed(), 1);

        let series = agg.finish().unwrap();
        assert_eq!(series.len(), 1);
        assert!((series.total[0] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn retransmission_across_window_boundary_counts_once() {
        let mut agg = ThroughputAggregator::new(&config(1)).unwrap();
        agg.push(&rec(0.0005, 0, 1000, 7)).unwrap();
        agg.push(&rec(0.0012, 0, 1000, 7)).unwrap();
        assert_eq!(agg.accepted_bytes(0), Some(1000));
    }

    #[test]
    fn first_sequence_zero_is_counted() {
        let series = aggregate(&[rec(0.0001, 0, 1500, 0)], &config(1)).unwrap();
        assert!((series.total[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn total_is_sum_of_clients_only() {
        let cfg = ThroughputConfig {
            num_clients: 2,
            num_leafs: 1,
            num_spines: 1,
            ..Default::default()
        };
        let records = [
            rec(0.0001, 0, 1000, 1),
            rec(0.0002, 1, 2000, 1),
            rec(0.0003, 2, 4000, 1),
            rec(0.0011, 0, 3000, 2),
            rec(0.0019, 3, 5000, 1),
            rec(0.0031, 1, 1000, 2),
        ];
        let series = aggregate(&records, &cfg).unwrap();
        assert_eq!(series.per_node.len(), 5);
        let clients: Vec<&[f64]> = series.clients().map(|(_, s)| s).collect();
        assert_eq!(clients.len(), 2);
        for idx in 0..series.len() {
            let sum: f64 = clients.iter().map(|s| s[idx]).sum();
            assert!((series.total[idx] - sum).abs() < 1e-12);
        }
        // Leaf traffic shows up per node but not in the total.
        assert!(series.node(2).unwrap()[0] > 0.0);
        assert!((series.total[0] - 24.0).abs() < 1e-9);
    }

    #[test]
    fn clock_moves_one_step_per_flush() {
        // A long gap still only advances the clock by one window, so the
        // following records each close a window of their own.
        let records = [
            rec(0.0001, 0, 1000, 1),
            rec(0.0100, 0, 1000, 2),
            rec(0.0101, 0, 1000, 3),
        ];
        let series = aggregate(&records, &config(1)).unwrap();
        assert_eq!(series.time, vec![0.0100, 0.0101, 0.0101]);
    }

    #[test]
    fn non_matching_records_are_ignored() {
        let mut other = rec(0.0001, 0, 1000, 1);
        other.event = TraceEvent::Enqueue;
        let mut ack = rec(0.0002, 0, 40, 1);
        ack.packet_type = "ack".to_string();
        let err = aggregate(&[other, ack], &config(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTrace { marker: "-", .. }));
    }

    #[test]
    fn unknown_source_node_fails() {
        let err = aggregate(&[rec(0.0001, 7, 1000, 1)], &config(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownNode { node: 7, nodes: 3 }));
    }

    #[test]
    fn invalid_granularity_is_rejected() {
        let cfg = ThroughputConfig {
            granularity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            ThroughputAggregator::new(&cfg),
            Err(AnalysisError::InvalidGranularity(_))
        ));
    }

    #[test]
    fn overflowing_node_table_is_rejected() {
        let cfg = ThroughputConfig {
            num_clients: u32::MAX - 1,
            num_leafs: 1,
            ..Default::default()
        };
        assert!(matches!(
            ThroughputAggregator::new(&cfg),
            Err(AnalysisError::NodeTableTooLarge { .. })
        ));
    }

    #[test]
    fn reads_trace_text() {
        let input = "+ 0.0001 0 3 tcp 1000 ------- 0 0.0 3.0 1 1\n\
                     - 0.0002 0 3 tcp 1000 ------- 0 0.0 3.0 1 1\n\
                     r 0.0004 0 3 tcp 1000 ------- 0 0.0 3.0 1 1\n\
                     - 0.0005 3 0 ack 40 ------- 0 3.0 0.0 1 2\n\
                     - 0.0012 0 3 tcp 1000 ------- 0 0.0 3.0 2 3\n";
        let series = read_throughput(Cursor::new(input), &config(1)).unwrap();
        assert_eq!(series.time, vec![0.0012, 0.0012]);
        assert!((series.total[0] - 8.0).abs() < 1e-9);
        assert!((series.total[1] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn loads_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timely.tr");
        std::fs::write(&path, "- 0.0001 0 3 tcp 1000 ------- 0 0.0 3.0 1 1\n").unwrap();
        let series = load_throughput(&path, &config(1)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.time, vec![0.0001]);
    }
}
