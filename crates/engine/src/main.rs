use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use engine::event::EngineEvent;
use engine::feed::{SeriesBook, read_series};
use engine::sink::{self, fmt_ts};
use engine::step::PivotEngine;
use levels::canvas::RecordingCanvas;
use levels::tier::{LineStyle, TierSettings};
use structure::candle::Timeframe;
use structure::series::SeriesProvider;

#[derive(Parser, Debug)]
#[command(about = "Replay chart bars through the missed-pivot line engine")]
struct Args {
    /// Driving (chart) series csv
    #[arg(long)]
    chart: String,
    #[arg(long, default_value_t = 5)]
    digits: u32,

    #[arg(long, default_value = "D1")]
    short_tf: Timeframe,
    #[arg(long)]
    short_cache: String,
    #[arg(long, default_value = "Red")]
    short_color: String,
    #[arg(long, default_value_t = 1)]
    short_thickness: u32,
    #[arg(long, default_value = "Solid")]
    short_style: LineStyle,

    #[arg(long, default_value = "W1")]
    medium_tf: Timeframe,
    #[arg(long)]
    medium_cache: String,
    #[arg(long, default_value = "Yellow")]
    medium_color: String,
    #[arg(long, default_value_t = 1)]
    medium_thickness: u32,
    #[arg(long, default_value = "Solid")]
    medium_style: LineStyle,

    #[arg(long, default_value = "MN1")]
    long_tf: Timeframe,
    #[arg(long)]
    long_cache: String,
    #[arg(long, default_value = "Blue")]
    long_color: String,
    #[arg(long, default_value_t = 1)]
    long_thickness: u32,
    #[arg(long, default_value = "Solid")]
    long_style: LineStyle,

    #[arg(long, default_value = "data/pivot_lines.csv")]
    lines_out: String,
    #[arg(long, default_value = "data/pivot_crossings.csv")]
    crossings_out: String,
}

#[derive(serde::Serialize)]
struct LineRow {
    name: String,
    price: f64,
    start: String,
    end: String,
}

#[derive(serde::Serialize)]
struct CrossingRow {
    ts: String,
    name: String,
    price: f64,
    direction: String,
}

fn write_csv<T: serde::Serialize>(path: &str, rows: &[T]) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine=info,levels=info,pivot_replay=info".into()),
        )
        .init();

    let args = Args::parse();

    let settings = [
        TierSettings {
            timeframe: args.short_tf,
            color: args.short_color.clone(),
            thickness: args.short_thickness,
            style: args.short_style,
        },
        TierSettings {
            timeframe: args.medium_tf,
            color: args.medium_color.clone(),
            thickness: args.medium_thickness,
            style: args.medium_style,
        },
        TierSettings {
            timeframe: args.long_tf,
            color: args.long_color.clone(),
            thickness: args.long_thickness,
            style: args.long_style,
        },
    ];
    let mut engine = PivotEngine::configure(&settings, args.digits, RecordingCanvas::new())
        .context("invalid tier configuration")?;

    let chart = read_series(&args.chart).context("read chart series failed")?;
    if chart.is_empty() {
        anyhow::bail!("chart series {} has no bars", args.chart);
    }

    let mut book = SeriesBook::new(chart);
    for (tf, path) in [
        (args.short_tf, &args.short_cache),
        (args.medium_tf, &args.medium_cache),
        (args.long_tf, &args.long_cache),
    ] {
        let series = read_series(path).with_context(|| format!("read {} series failed", tf))?;
        info!(timeframe = %tf, bars = series.len(), path = %path, "series loaded");
        if !book.insert(tf, series) {
            warn!(timeframe = %tf, path = %path, "timeframe already loaded, cache ignored");
        }
    }

    let mut crossing_rows = Vec::new();
    let mut created = 0usize;
    let bars = book.driving().len();

    for index in 0..bars {
        let events = engine.on_step(&book, index)?;
        sink::consume(&events);

        for e in &events {
            match e {
                EngineEvent::LineCreated { .. } => created += 1,
                EngineEvent::LineCrossed {
                    name,
                    price,
                    crossing,
                    at,
                } => crossing_rows.push(CrossingRow {
                    ts: fmt_ts(*at),
                    name: name.clone(),
                    price: price.0,
                    direction: format!("{:?}", crossing),
                }),
                _ => {}
            }
        }
    }

    let line_rows: Vec<LineRow> = engine
        .registry()
        .iter()
        .map(|l| LineRow {
            name: l.name.clone(),
            price: l.price.0,
            start: fmt_ts(l.start),
            end: fmt_ts(l.end),
        })
        .collect();

    write_csv(&args.lines_out, &line_rows).context("write lines csv failed")?;
    write_csv(&args.crossings_out, &crossing_rows).context("write crossings csv failed")?;

    println!("Pivot replay finished");
    for t in engine.tiers() {
        println!(
            "tier {}: tf={} color={} thickness={} style={:?}",
            t.tier,
            t.timeframe,
            t.appearance.color.to_hex(),
            t.appearance.thickness,
            t.appearance.style
        );
    }
    println!(
        "bars={} lines_created={} lines_crossed={} lines_active={}",
        bars,
        created,
        crossing_rows.len(),
        line_rows.len()
    );
    println!(
        "artifacts: lines_csv={} crossings_csv={}",
        args.lines_out, args.crossings_out
    );

    Ok(())
}
