//! Line parsers for the three simulator log formats.
//!
//! RTT and queue logs are matched against a regular expression; lines that do
//! not match are skipped. Trace lines go through [`parse_trace_line`], which
//! maps the whitespace-separated columns onto a [`TraceRecord`].

use crate::error::{AnalysisError, Result};
use ccbench_abstract::{QueueSample, SampleSeries, TraceEvent, TraceRecord};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const NUM: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

/// Minimum number of columns a trace line needs to be considered.
pub const TRACE_MIN_FIELDS: usize = 11;

static RTT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?P<time>{NUM})\s+(?P<rtt>{NUM})(?:\s|$)"))
        .expect("RTT pattern is valid")
});

static QUEUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let fields = [
        format!("(?P<time>{NUM})"),
        r"(?P<from_node>\d+)".to_string(),
        r"(?P<to_node>\d+)".to_string(),
        format!("(?P<q_size_b>{NUM})"),
        format!("(?P<q_size_p>{NUM})"),
        format!("(?P<arr_p>{NUM})"),
        format!("(?P<dep_p>{NUM})"),
        format!("(?P<drop_p>{NUM})"),
        format!("(?P<arr_b>{NUM})"),
        format!("(?P<dep_b>{NUM})"),
        format!("(?P<drop_b>{NUM})"),
    ];
    Regex::new(&format!(r"^\s*{}(?:\s|$)", fields.join(r"\s+"))).expect("queue pattern is valid")
});

pub fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Parse a `<time> <rtt>` line.
pub fn parse_rtt_line(line: &str) -> Option<(f64, f64)> {
    let caps = RTT_LINE.captures(line)?;
    let time = caps["time"].parse().ok()?;
    let rtt = caps["rtt"].parse().ok()?;
    Some((time, rtt))
}

pub fn read_rtt_samples<R: BufRead>(reader: R) -> Result<SampleSeries> {
    let mut series = SampleSeries::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_rtt_line(&line) {
            Some((time, rtt)) => series.push(time, rtt),
            None => debug!("Skipping RTT line {}: {:?}", idx + 1, line),
        }
    }
    Ok(series)
}

pub fn load_rtt_samples(path: &Path) -> Result<SampleSeries> {
    let series = read_rtt_samples(open(path)?)?;
    debug!("Loaded {} RTT samples from {}", series.len(), path.display());
    Ok(series)
}

/// Parse one queue monitor line (11 numeric columns).
pub fn parse_queue_line(line: &str) -> Option<QueueSample> {
    let caps = QUEUE_LINE.captures(line)?;
    let num = |name: &str| caps[name].parse::<f64>().ok();
    Some(QueueSample {
        time: num("time")?,
        from_node: caps["from_node"].parse().ok()?,
        to_node: caps["to_node"].parse().ok()?,
        size_bytes: num("q_size_b")?,
        size_packets: num("q_size_p")?,
        arrivals_packets: num("arr_p")?,
        departures_packets: num("dep_p")?,
        drops_packets: num("drop_p")?,
        arrivals_bytes: num("arr_b")?,
        departures_bytes: num("dep_b")?,
        drops_bytes: num("drop_b")?,
    })
}

pub fn read_queue_samples<R: BufRead>(reader: R) -> Result<Vec<QueueSample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_queue_line(&line) {
            Some(sample) => samples.push(sample),
            None => debug!("Skipping queue line {}: {:?}", idx + 1, line),
        }
    }
    Ok(samples)
}

pub fn load_queue_samples(path: &Path) -> Result<Vec<QueueSample>> {
    let samples = read_queue_samples(open(path)?)?;
    debug!("Loaded {} queue samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Queue occupancy in packets over time.
pub fn queue_occupancy(samples: &[QueueSample]) -> SampleSeries {
    SampleSeries {
        samples: samples.iter().map(|s| (s.time, s.size_packets)).collect(),
    }
}

/// Tokenize a trace line into a [`TraceRecord`].
///
/// Returns `None` for lines with fewer than [`TRACE_MIN_FIELDS`] columns, an
/// unknown event marker, or numeric columns that do not parse.
pub fn parse_trace_line(line: &str) -> Option<TraceRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < TRACE_MIN_FIELDS {
        return None;
    }
    Some(TraceRecord {
        event: TraceEvent::from_marker(fields[0])?,
        time: fields[1].parse().ok()?,
        from_node: fields[2].parse().ok()?,
        to_node: fields[3].parse().ok()?,
        packet_type: fields[4].to_string(),
        size: fields[5].parse().ok()?,
        flags: fields[6].to_string(),
        flow_id: fields[7].parse().ok()?,
        src_addr: fields[8].to_string(),
        dst_addr: fields[9].to_string(),
        seq_num: fields[10].parse().ok()?,
        packet_id: fields.get(11).and_then(|f| f.parse().ok()),
    })
}

/// Iterator over the well-formed records of a trace, in file order.
pub struct TraceReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if let Some(record) = parse_trace_line(&line) {
                return Some(Ok(record));
            }
            if !line.trim().is_empty() {
                debug!("Skipping trace line {}: {:?}", self.line_no, line);
            }
        }
    }
}
