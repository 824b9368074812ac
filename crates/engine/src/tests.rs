use levels::canvas::{CanvasOp, RecordingCanvas};
use levels::sweep::Crossing;
use levels::tier::{ConfigError, Tier, TierSettings};
use pivot_core::types::{Price, TimestampMs};
use structure::candle::{Candle, Timeframe};
use structure::series::BarSeries;

use crate::event::{EngineEvent, NoDataReason};
use crate::feed::SeriesBook;
use crate::step::{PivotEngine, StepError};

fn bar(ts: i64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        ts: TimestampMs(ts),
        open: Price(close),
        high: Price(high),
        low: Price(low),
        close: Price(close),
    }
}

fn series(bars: Vec<Candle>) -> BarSeries {
    BarSeries::from_candles(bars).unwrap()
}

// pivots: D1 -> 11 at ts>=2000, W1 -> 10, MN1 -> 8
fn book(driving: Vec<Candle>) -> SeriesBook {
    SeriesBook::new(series(driving))
        .with_series(
            Timeframe::Daily,
            series(vec![
                bar(0, 10.0, 8.0, 9.0),
                bar(1000, 12.0, 9.0, 12.0),
                bar(2000, 13.0, 11.0, 12.0),
            ]),
        )
        .with_series(
            Timeframe::Weekly,
            series(vec![bar(0, 13.0, 7.0, 10.0), bar(2000, 15.0, 10.0, 14.0)]),
        )
        .with_series(
            Timeframe::Monthly,
            series(vec![bar(0, 16.0, 2.0, 6.0), bar(1500, 20.0, 5.0, 11.0)]),
        )
}

fn driving() -> Vec<Candle> {
    vec![
        bar(2000, 11.5, 10.8, 11.2),
        bar(2100, 11.6, 10.9, 11.0),
        bar(2200, 11.2, 9.9, 10.1),
        bar(2300, 10.4, 9.8, 10.2),
    ]
}

fn engine() -> PivotEngine<RecordingCanvas> {
    let settings = Tier::ALL.map(TierSettings::defaults);
    PivotEngine::configure(&settings, 5, RecordingCanvas::new()).unwrap()
}

fn names(e: &PivotEngine<RecordingCanvas>) -> Vec<String> {
    e.registry().iter().map(|l| l.name.clone()).collect()
}

fn crossed(events: &[EngineEvent]) -> Vec<(String, Crossing)> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::LineCrossed { name, crossing, .. } => Some((name.clone(), *crossing)),
            _ => None,
        })
        .collect()
}

#[test]
fn one_line_per_tier_after_first_step() {
    let b = book(driving());
    let mut e = engine();

    let events = e.on_step(&b, 0).unwrap();

    assert_eq!(names(&e), vec!["D1_11.00000", "W1_10.00000", "MN1_8.00000"]);
    let created = events
        .iter()
        .filter(|ev| matches!(ev, EngineEvent::LineCreated { .. }))
        .count();
    assert_eq!(created, 3);

    // first step: bar range covers 11.0 but there is no prior bar
    assert!(crossed(&events).is_empty());
    assert_eq!(e.canvas().len(), 3);
}

#[test]
fn created_event_traces_back_to_htf_bar() {
    let b = book(driving());
    let mut e = engine();

    let events = e.on_step(&b, 0).unwrap();

    assert!(events.contains(&EngineEvent::LineCreated {
        tier: Tier::Short,
        name: "D1_11.00000".into(),
        price: Price(11.0),
        pivot_bar: TimestampMs(1000),
        at: TimestampMs(2000),
    }));
    assert!(events.contains(&EngineEvent::LineCreated {
        tier: Tier::Long,
        name: "MN1_8.00000".into(),
        price: Price(8.0),
        pivot_bar: TimestampMs(0),
        at: TimestampMs(2000),
    }));
}

#[test]
fn re_evaluating_same_index_does_not_duplicate() {
    let b = book(driving());
    let mut e = engine();

    e.on_step(&b, 0).unwrap();
    let events = e.on_step(&b, 0).unwrap();

    assert_eq!(e.registry().len(), 3);
    assert_eq!(e.canvas().len(), 3);
    assert!(
        events
            .iter()
            .all(|ev| !matches!(ev, EngineEvent::LineCreated { .. }))
    );
    let draws = e
        .canvas()
        .ops()
        .iter()
        .filter(|op| matches!(op, CanvasOp::Draw { .. }))
        .count();
    assert_eq!(draws, 3);
}

#[test]
fn lines_extend_until_crossed() {
    let b = book(driving());
    let mut e = engine();

    e.on_step(&b, 0).unwrap();
    let events = e.on_step(&b, 1).unwrap();
    assert!(crossed(&events).is_empty());
    assert!(e.registry().iter().all(|l| l.end == TimestampMs(2100)));
    assert!(e.registry().iter().all(|l| l.start == TimestampMs(2000)));

    // low 9.9 comes down through 10.0 from a prior low of 10.9
    let events = e.on_step(&b, 2).unwrap();
    assert_eq!(
        crossed(&events),
        vec![("W1_10.00000".to_string(), Crossing::Downward)]
    );
    assert_eq!(names(&e), vec!["D1_11.00000", "MN1_8.00000"]);
    assert!(e.canvas().segment("W1_10.00000").is_none());
}

#[test]
fn crossed_line_reappears_while_tier_pivot_is_unchanged() {
    let b = book(driving());
    let mut e = engine();

    for i in 0..3 {
        e.on_step(&b, i).unwrap();
    }
    assert!(!e.registry().contains("W1_10.00000"));

    let events = e.on_step(&b, 3).unwrap();
    let line = e.registry().get("W1_10.00000").unwrap();
    assert_eq!(line.start, TimestampMs(2300));
    assert!(crossed(&events).is_empty());
    assert!(events.iter().any(|ev| matches!(
        ev,
        EngineEvent::LineCreated { tier: Tier::Medium, .. }
    )));
}

#[test]
fn no_htf_history_skips_tier_without_error() {
    // driving starts inside the first daily bar: nothing closed yet
    let b = book(vec![bar(500, 1.0, 0.5, 0.8), bar(600, 1.0, 0.5, 0.8)]);
    let mut e = engine();

    let events = e.on_step(&b, 0).unwrap();

    assert!(e.registry().is_empty());
    assert!(e.canvas().ops().is_empty());
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|ev| matches!(
        ev,
        EngineEvent::NoPivotData {
            reason: NoDataReason::NoClosedBar,
            ..
        }
    )));
}

#[test]
fn missing_series_is_reported_as_no_data() {
    let b = SeriesBook::new(series(driving())).with_series(
        Timeframe::Daily,
        series(vec![
            bar(0, 10.0, 8.0, 9.0),
            bar(1000, 12.0, 9.0, 12.0),
            bar(2000, 13.0, 11.0, 12.0),
        ]),
    );
    let mut e = engine();

    let events = e.on_step(&b, 0).unwrap();

    assert_eq!(names(&e), vec!["D1_11.00000"]);
    assert!(events.contains(&EngineEvent::NoPivotData {
        tier: Tier::Long,
        timeframe: Timeframe::Monthly,
        reason: NoDataReason::MissingSeries,
        at: TimestampMs(2000),
    }));
}

#[test]
fn tiers_sharing_a_timeframe_share_one_line() {
    let b = book(driving());
    let settings = Tier::ALL.map(|t| TierSettings {
        timeframe: Timeframe::Daily,
        ..TierSettings::defaults(t)
    });
    let mut e = PivotEngine::configure(&settings, 5, RecordingCanvas::new()).unwrap();

    let events = e.on_step(&b, 0).unwrap();

    assert_eq!(names(&e), vec!["D1_11.00000"]);
    let extended = events
        .iter()
        .filter(|ev| matches!(ev, EngineEvent::LineExtended { .. }))
        .count();
    assert_eq!(extended, 2);
}

#[test]
fn out_of_range_index_is_rejected_without_side_effects() {
    let b = book(driving());
    let mut e = engine();

    assert_eq!(
        e.on_step(&b, 4),
        Err(StepError::IndexOutOfRange { index: 4, len: 4 })
    );
    assert!(e.registry().is_empty());
    assert!(e.canvas().ops().is_empty());
}

#[test]
fn configure_fails_fast_on_bad_color() {
    let mut settings = Tier::ALL.map(TierSettings::defaults);
    settings[1].color = "#12".into();

    let r = PivotEngine::configure(&settings, 5, RecordingCanvas::new());
    assert!(matches!(
        r,
        Err(ConfigError::InvalidColor {
            tier: Tier::Medium,
            ..
        })
    ));
}

#[test]
fn new_driving_bars_can_be_appended_between_steps() {
    let mut b = book(driving()[..1].to_vec());
    let mut e = engine();
    e.on_step(&b, 0).unwrap();

    b.driving_mut().push(bar(2100, 11.6, 10.9, 11.0)).unwrap();
    let events = e.on_step(&b, 1).unwrap();

    assert!(crossed(&events).is_empty());
    assert!(e.registry().iter().all(|l| l.end == TimestampMs(2100)));
}
