use chrono::NaiveDate;

use pairtrade_core::chart::{ChartSink, ChartSpec};
use pairtrade_core::source::{MarketDataSource, StaticMarketData};
use pairtrade_core::strategy::run_pair_analysis;
use pairtrade_core::strategy::spread_signal::{EngineConfig, Evaluation, SpreadSignalEngine};
use pairtrade_core::{AlignedPair, PairTradeError, PriceSeries};

// ===========================================================================
// End-to-end pair analysis: data source -> alignment -> engine -> chart.
// All fixtures are deterministic so outcomes are exactly reproducible.
// ===========================================================================

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Pair cointegrated by construction: `b` is a deterministic walk and
/// `a` tracks 2·b plus cyclical stationary noise.
fn cointegrated_source(n: usize) -> StaticMarketData {
    let mut b = Vec::with_capacity(n);
    let mut a = Vec::with_capacity(n);
    let mut level = 50.0;
    for i in 0..n {
        level += match i % 3 {
            0 => 0.5,
            1 => -0.4,
            _ => 0.3,
        };
        b.push(level);
        let noise = match i % 4 {
            0 => 0.3,
            1 => -0.3,
            2 => 0.1,
            _ => -0.1,
        };
        a.push(2.0 * level + noise);
    }
    StaticMarketData::new()
        .with_series(PriceSeries::from_closes("AAA", d("2022-01-01"), &a).unwrap())
        .with_series(PriceSeries::from_closes("BBB", d("2022-01-01"), &b).unwrap())
}

/// Two independent pseudo-random walks; their spread wanders and the
/// cointegration null survives at the 5% level.
fn random_walk_source(n: usize) -> StaticMarketData {
    let mut w1 = vec![100.0];
    let mut w2 = vec![100.0];
    for i in 1..n {
        w1.push(w1[i - 1] + ((i * 7919) % 1000) as f64 / 5000.0 - 0.1);
        w2.push(w2[i - 1] + ((i * 104_729) % 1000) as f64 / 5000.0 - 0.1);
    }
    StaticMarketData::new()
        .with_series(PriceSeries::from_closes("WLK1", d("2022-01-01"), &w1).unwrap())
        .with_series(PriceSeries::from_closes("WLK2", d("2022-01-01"), &w2).unwrap())
}

#[derive(Default)]
struct RecordingSink {
    specs: Vec<ChartSpec>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, spec: &ChartSpec) {
        self.specs.push(spec.clone());
    }
}

#[test]
fn test_cointegrated_pair_produces_report() {
    let source = cointegrated_source(120);
    let eval = run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap();

    match eval {
        Evaluation::Cointegrated { test, report } => {
            assert!(test.p_value < 0.05);
            assert!(test.statistic < test.critical_values.five_pct);
            assert_eq!(report.cumulative_returns.len(), 120);
            assert!(report.final_return.is_finite());
            assert!(report.correlation > 0.99);
        }
        Evaluation::Rejected { test } => {
            panic!("expected cointegration, got rejection at p={}", test.p_value)
        }
    }
}

#[test]
fn test_independent_walks_are_rejected() {
    let source = random_walk_source(120);
    let eval = run_pair_analysis(
        &source,
        "WLK1",
        "WLK2",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap();

    match eval {
        Evaluation::Rejected { test } => {
            assert!(test.p_value >= 0.05);
        }
        Evaluation::Cointegrated { test, .. } => {
            panic!("independent walks called cointegrated at p={}", test.p_value)
        }
    }
}

#[test]
fn test_tiny_significance_always_rejects() {
    // significance is validated as strictly positive; the smallest useful
    // cutoff still rejects everything our p-value floor can produce.
    let source = cointegrated_source(120);
    let eval = run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig {
            significance: 1e-7,
            entry_threshold: 2.0,
        },
        None,
    )
    .unwrap();
    assert!(matches!(eval, Evaluation::Rejected { .. }));
}

#[test]
fn test_full_significance_always_proceeds() {
    // A cutoff of 1.0 forces the computation path even for a poor fit.
    let source = random_walk_source(120);
    let eval = run_pair_analysis(
        &source,
        "WLK1",
        "WLK2",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig {
            significance: 1.0,
            entry_threshold: 2.0,
        },
        None,
    )
    .unwrap();
    assert!(eval.report().is_some());
}

#[test]
fn test_chart_rendered_only_when_cointegrated() {
    let mut sink = RecordingSink::default();
    let source = cointegrated_source(120);
    run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        Some(&mut sink),
    )
    .unwrap();

    assert_eq!(sink.specs.len(), 1);
    let spec = &sink.specs[0];
    assert_eq!(spec.z_score.values.len(), 120);
    assert_eq!(spec.cumulative_return.values.len(), 120);
    assert_eq!(spec.entry_threshold, 2.0);
    assert!(spec.z_score.name.contains("AAA"));

    let mut sink = RecordingSink::default();
    let source = random_walk_source(120);
    run_pair_analysis(
        &source,
        "WLK1",
        "WLK2",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        Some(&mut sink),
    )
    .unwrap();
    assert!(sink.specs.is_empty(), "rejected pair must not render a chart");
}

#[test]
fn test_missing_symbol_propagates_data_error() {
    let source = cointegrated_source(120);
    let err = run_pair_analysis(
        &source,
        "AAA",
        "NOPE",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PairTradeError::DataSource(_)));
}

#[test]
fn test_empty_date_range_propagates_data_error() {
    let source = cointegrated_source(120);
    let err = run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2030-01-01"),
        d("2030-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PairTradeError::DataSource(_)));
}

#[test]
fn test_engine_direct_evaluation_matches_entry_point() {
    let source = cointegrated_source(120);
    let a = source
        .fetch_adjusted_close("AAA", d("2022-01-01"), d("2022-12-31"))
        .unwrap();
    let b = source
        .fetch_adjusted_close("BBB", d("2022-01-01"), d("2022-12-31"))
        .unwrap();
    let pair = AlignedPair::align(&a, &b).unwrap();

    let direct = SpreadSignalEngine::default().evaluate(&pair).unwrap();
    let via_entry = run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap();

    assert_eq!(direct.test(), via_entry.test());
    assert_eq!(
        direct.report().map(|r| r.final_return),
        via_entry.report().map(|r| r.final_return)
    );
}

#[test]
fn test_evaluation_serialises_with_outcome_tag() {
    let source = cointegrated_source(120);
    let eval = run_pair_analysis(
        &source,
        "AAA",
        "BBB",
        d("2022-01-01"),
        d("2022-12-31"),
        EngineConfig::default(),
        None,
    )
    .unwrap();

    let json = serde_json::to_value(&eval).unwrap();
    assert_eq!(json["outcome"], "cointegrated");
    assert!(json["test"]["p_value"].is_number());
    assert!(json["report"]["final_return"].is_number());
}
