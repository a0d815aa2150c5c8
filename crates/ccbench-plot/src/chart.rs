//! Thin layer over `plotters` shared by every chart of the benchmark.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1024, 768);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// One dot per sample, no connecting line.
    Dot,
    Line,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub marker: Marker,
}

impl Series {
    pub fn line(label: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            label: Some(label.into()),
            points: points.into_iter().collect(),
            marker: Marker::Line,
        }
    }

    pub fn dots(label: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            label: Some(label.into()),
            points: points.into_iter().collect(),
            marker: Marker::Dot,
        }
    }
}

pub struct ChartSpec {
    pub title: String,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    /// Plot the y axis in log10 space; non-positive samples are left out.
    pub log_y: bool,
    pub legend: Option<SeriesLabelPosition>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, x_desc: &'static str, y_desc: &'static str) -> Self {
        Self {
            title: title.into(),
            x_desc,
            y_desc,
            log_y: false,
            legend: None,
        }
    }

    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }

    pub fn legend(mut self, position: SeriesLabelPosition) -> Self {
        self.legend = Some(position);
        self
    }
}

/// matplotlib's default cycle, so charts read like the ones the lab is used to.
fn palette(n: usize) -> Vec<RGBColor> {
    let base = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(148, 103, 189),
        RGBColor(140, 86, 75),
        RGBColor(227, 119, 194),
        RGBColor(127, 127, 127),
        RGBColor(188, 189, 34),
        RGBColor(23, 190, 207),
    ];
    (0..n).map(|i| base[i % base.len()]).collect()
}

fn project(points: &[(f64, f64)], log_y: bool) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && (!log_y || *y > 0.0))
        .map(|&(x, y)| if log_y { (x, y.log10()) } else { (x, y) })
        .collect()
}

fn padded(min: f64, max: f64) -> Range<f64> {
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Axis ranges covering every point, with a small margin.
pub fn bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> (Range<f64>, Range<f64>) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    (padded(x_min, x_max), padded(y_min, y_max))
}

fn log_tick(exp: f64) -> String {
    let value = 10f64.powf(exp);
    if (0.01..1000.0).contains(&value) {
        format!("{value:.2}")
    } else {
        format!("{value:.0e}")
    }
}

/// Render `series` into a PNG at `path`.
pub fn render(path: &Path, spec: &ChartSpec, series: &[Series]) -> Result<()> {
    let projected: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| project(&s.points, spec.log_y))
        .collect();
    let (x_range, y_range) = bounds(projected.iter().flatten());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    let log_label = |v: &f64| log_tick(*v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_desc).y_desc(spec.y_desc);
    if spec.log_y {
        mesh.y_label_formatter(&log_label);
    }
    mesh.draw()?;

    for ((s, points), color) in series.iter().zip(projected).zip(palette(series.len())) {
        let anno = match s.marker {
            Marker::Dot => chart.draw_series(
                points
                    .into_iter()
                    .map(move |p| Circle::new(p, 2, color.filled())),
            )?,
            Marker::Line => chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?,
        };
        if let Some(label) = &s.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        }
    }

    if let Some(position) = &spec.legend {
        chart
            .configure_series_labels()
            .position(position.clone())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()
        .with_context(|| format!("Failed to write chart {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_projection_drops_non_positive() {
        let points = [(0.0, 0.0), (1.0, 10.0), (2.0, -1.0), (3.0, 1000.0)];
        let projected = project(&points, true);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0], (1.0, 1.0));
        assert!((projected[1].1 - 3.0).abs() < 1e-12);
        assert_eq!(project(&points, false).len(), 4);
    }

    #[test]
    fn bounds_pad_and_handle_flat_or_empty_data() {
        let (x, y) = bounds([(0.0, 5.0), (10.0, 5.0)].iter());
        assert_eq!(x, -0.5..10.5);
        assert_eq!(y, 4.5..5.5);

        let (x, y) = bounds([].iter());
        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 0.0..1.0);
    }

    #[test]
    fn log_ticks_are_readable() {
        assert_eq!(log_tick(0.0), "1.00");
        assert_eq!(log_tick(4.0), "1e4");
    }

    #[test]
    fn palette_cycles() {
        let colors = palette(12);
        assert_eq!(colors[0].rgb(), colors[10].rgb());
        assert_ne!(colors[0].rgb(), colors[1].rgb());
    }
}
