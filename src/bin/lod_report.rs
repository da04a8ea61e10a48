//! Builds LOD levels for a synthetic series and prints the level table plus a
//! zoom sweep of selections as JSON.
//!
//! Usage: `lod_report [point_count] [viewport_width_px] [line|scatter|timeseries]`
//!
//! `timeseries` ingests one decimal sample per second starting at
//! 2024-01-01T00:00:00Z, so x values are unix seconds.

use std::env;
use std::process::ExitCode;

use chart_lod::ChartResult;
use chart_lod::core::{DomainRange, PointBuffer};
use chart_lod::lod::{DecimationStrategy, LodConfig, LodManager, LodMemoryUsage};
use chart_lod::telemetry::init_default_tracing;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

const DEFAULT_POINT_COUNT: usize = 1_000_000;
const DEFAULT_VIEWPORT_WIDTH_PX: f64 = 1_600.0;
const SERIES_ID: &str = "synthetic";
const TIME_SERIES_START_SECS: i64 = 1_704_067_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesKind {
    Line,
    Scatter,
    TimeSeries,
}

impl SeriesKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "line" => Some(Self::Line),
            "scatter" => Some(Self::Scatter),
            "timeseries" => Some(Self::TimeSeries),
            _ => None,
        }
    }

    fn strategy(self) -> DecimationStrategy {
        match self {
            Self::Scatter => DecimationStrategy::SpatialGrid,
            Self::Line | Self::TimeSeries => DecimationStrategy::Lttb,
        }
    }
}

#[derive(Debug, Serialize)]
struct LevelRow {
    level: usize,
    point_count: usize,
    threshold: f64,
}

#[derive(Debug, Serialize)]
struct SelectionRow {
    visible_ratio: f64,
    level: usize,
    point_count: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    strategy: &'static str,
    viewport_width_px: f64,
    levels: Vec<LevelRow>,
    zoom_sweep: Vec<SelectionRow>,
    memory: LodMemoryUsage,
}

fn main() -> ExitCode {
    let _ = init_default_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let point_count = match args.first().map(|raw| raw.parse::<usize>()) {
        Some(Ok(count)) => count,
        Some(Err(err)) => {
            eprintln!("invalid point count: {err}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_POINT_COUNT,
    };
    let viewport_width_px = match args.get(1).map(|raw| raw.parse::<f64>()) {
        Some(Ok(width)) => width,
        Some(Err(err)) => {
            eprintln!("invalid viewport width: {err}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_VIEWPORT_WIDTH_PX,
    };
    let kind = match args.get(2).map(|raw| (raw, SeriesKind::parse(raw))) {
        Some((_, Some(kind))) => kind,
        Some((raw, None)) => {
            eprintln!("unknown series kind `{raw}`, expected line, scatter or timeseries");
            return ExitCode::FAILURE;
        }
        None => SeriesKind::Line,
    };

    match run(point_count, viewport_width_px, kind) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("lod report failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    point_count: usize,
    viewport_width_px: f64,
    kind: SeriesKind,
) -> Result<String, Box<dyn std::error::Error>> {
    let strategy = kind.strategy();
    let buffer = match kind {
        SeriesKind::TimeSeries => decimal_time_series(point_count)?,
        SeriesKind::Line | SeriesKind::Scatter => synthetic_series(point_count),
    };
    let full = buffer.x_range().unwrap_or(DomainRange::new(0.0, 1.0));

    let mut manager = LodManager::new(LodConfig::default())?;
    let table = manager.generate_with(SERIES_ID, buffer, strategy);
    let levels = table
        .levels()
        .iter()
        .map(|level| LevelRow {
            level: level.level(),
            point_count: level.point_count(),
            threshold: level.threshold(),
        })
        .collect();

    let mut zoom_sweep = Vec::new();
    let mut visible_ratio = 1.0;
    while visible_ratio >= 1e-4 {
        let visible = DomainRange::new(full.min, full.min + full.span() * visible_ratio);
        let level = manager.select(SERIES_ID, viewport_width_px, visible, full)?;
        zoom_sweep.push(SelectionRow {
            visible_ratio,
            level: level.level(),
            point_count: level.point_count(),
        });
        visible_ratio /= 4.0;
    }

    let report = Report {
        strategy: strategy.name(),
        viewport_width_px,
        levels,
        zoom_sweep,
        memory: manager.memory_usage(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Per-second price-like samples with four decimal places.
fn decimal_time_series(point_count: usize) -> ChartResult<PointBuffer> {
    let mut samples: Vec<(DateTime<Utc>, Decimal)> = Vec::with_capacity(point_count);
    let mut mantissa: i64 = 1_000_000;
    for i in 0..point_count {
        let Some(time) = DateTime::from_timestamp(TIME_SERIES_START_SECS + i as i64, 0) else {
            break;
        };
        mantissa += ((i * 7_919) % 201) as i64 - 100;
        samples.push((time, Decimal::new(mantissa, 4)));
    }
    PointBuffer::from_decimal_samples(&samples)
}

/// Noisy sine with sparse spikes so decimation has extrema to keep.
fn synthetic_series(point_count: usize) -> PointBuffer {
    let mut coords = Vec::with_capacity(point_count * 2);
    for i in 0..point_count {
        let x = i as f64;
        let mut y = (x / 500.0).sin() * 10.0 + ((i * 7_919) % 97) as f64 / 97.0;
        if i % 50_021 == 0 {
            y += 40.0;
        }
        coords.push(x);
        coords.push(y);
    }
    PointBuffer::new(coords)
}
