use serde::{Deserialize, Serialize};

pub type NodeId = u32;

/// Event marker found in the first column of a simulator trace line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TraceEvent {
    /// `+`
    Enqueue,
    /// `-`
    Dequeue,
    /// `r`
    Receive,
    /// `d`
    Drop,
}

impl TraceEvent {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "+" => Some(TraceEvent::Enqueue),
            "-" => Some(TraceEvent::Dequeue),
            "r" => Some(TraceEvent::Receive),
            "d" => Some(TraceEvent::Drop),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            TraceEvent::Enqueue => "+",
            TraceEvent::Dequeue => "-",
            TraceEvent::Receive => "r",
            TraceEvent::Drop => "d",
        }
    }
}

/// One packet event of a simulator trace.
///
/// Column layout: `event time from to type size flags flow_id src dst seq [pkt_id]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceRecord {
    pub event: TraceEvent,
    /// Seconds since the start of the simulation.
    pub time: f64,
    /// Node that emitted the event (the link's upstream end).
    pub from_node: NodeId,
    pub to_node: NodeId,
    /// Packet type tag, e.g. `tcp` or `ack`.
    pub packet_type: String,
    /// Packet length in bytes.
    pub size: u64,
    pub flags: String,
    pub flow_id: i64,
    pub src_addr: String,
    pub dst_addr: String,
    pub seq_num: u64,
    pub packet_id: Option<u64>,
}

impl TraceRecord {
    pub fn matches(&self, event: TraceEvent, protocol: &str) -> bool {
        self.event == event && self.packet_type == protocol
    }
}

/// One sample written by the simulator's queue monitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct QueueSample {
    pub time: f64,
    pub from_node: NodeId,
    pub to_node: NodeId,
    pub size_bytes: f64,
    pub size_packets: f64,
    pub arrivals_packets: f64,
    pub departures_packets: f64,
    pub drops_packets: f64,
    pub arrivals_bytes: f64,
    pub departures_bytes: f64,
    pub drops_bytes: f64,
}
