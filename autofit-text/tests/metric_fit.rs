//! Resolver + headless oracle, end to end.
//!
//! Expected sizes follow from the sans width table: "Hello World" is
//! 5.167em wide, so it stays on one line up to 38px in a 200px box.

use autofit_core::{
    fit_layer, resolve, resolve_batch, FitOptions, FitOutcome, FitRequest, MeasureOracle,
    SizeBounds, StyleConfig, TextLayer, WrapMode,
};
use autofit_text::{CacheConfig, CachedOracle, MetricOracle};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hello_world(style: StyleConfig) -> FitRequest {
    FitRequest::new("Hello World", 200.0, 60.0, style).with_bounds(8, 72)
}

#[test]
fn test_hello_world_fits_one_line() {
    init_logging();
    let result = resolve(&mut MetricOracle, &hello_world(StyleConfig::default()));
    assert_eq!(result.font_size, 38);
    assert_eq!(result.outcome, FitOutcome::FittedWithinRange);

    let m = MetricOracle
        .measure("Hello World", 200.0, 38, &StyleConfig::default())
        .unwrap();
    assert_eq!(m.line_count, 1);
}

#[test]
fn test_stroke_shrinks_resolved_size() {
    // 4px of stroke narrows the wrap width to 196px; 38px no longer fits.
    let stroked = StyleConfig {
        stroke_width: 4.0,
        ..Default::default()
    };
    let plain = resolve(&mut MetricOracle, &hello_world(StyleConfig::default()));
    let with_stroke = resolve(&mut MetricOracle, &hello_world(stroked));
    assert_eq!(with_stroke.font_size, 37);
    assert!(with_stroke.font_size < plain.font_size);
}

#[test]
fn test_paragraph_uses_height_tolerance() {
    // Two lines of 42px at 1.2 line height are 100.8px, inside 100 + 1.
    let req = FitRequest::new("Line one\nLine two", 300.0, 100.0, StyleConfig::default())
        .with_bounds(8, 200);
    let result = resolve(&mut MetricOracle, &req);
    assert_eq!(result.font_size, 42);
}

#[test]
fn test_wrapped_paragraph() {
    let req = FitRequest::new(
        "The quick brown fox jumps over the lazy dog",
        180.0,
        120.0,
        StyleConfig::default(),
    )
    .with_bounds(8, 120);
    let result = resolve(&mut MetricOracle, &req);
    assert_eq!(result.font_size, 25);
    let m = MetricOracle.measure(&req.text, 180.0, 25, &req.style).unwrap();
    assert_eq!(m.line_count, 4);
}

#[test]
fn test_wide_script() {
    let req = FitRequest::new("漢字日本語テキスト", 100.0, 100.0, StyleConfig::default())
        .with_bounds(8, 200);
    let result = resolve(&mut MetricOracle, &req);
    assert_eq!(result.font_size, 28);
}

#[test]
fn test_headline_line_ceiling_falls_below_range() {
    init_logging();
    let req = FitRequest::new("Summer Sale Starts Today", 150.0, 400.0, StyleConfig::default())
        .with_bounds(24, 200)
        .with_max_lines(1);
    let result = resolve(&mut MetricOracle, &req);
    assert_eq!(result.outcome, FitOutcome::FittedBelowRange);
    assert_eq!(result.font_size, 12);
}

#[test]
fn test_trailing_space_costs_nothing_in_either_mode() {
    // "SALE" is 2.557em: 99.72px at 39px, one line in a 100px box.
    let word = StyleConfig::default();
    let chars = StyleConfig {
        wrap_mode: WrapMode::Character,
        ..Default::default()
    };
    for style in [word, chars] {
        let req = FitRequest::new("SALE ", 100.0, 200.0, style)
            .with_bounds(8, 200)
            .with_max_lines(1);
        let result = resolve(&mut MetricOracle, &req);
        assert_eq!(result.outcome, FitOutcome::FittedWithinRange);
        assert_eq!(result.font_size, 39, "{:?}", req.style.wrap_mode);
    }
}

#[test]
fn test_fit_layer_updates_layer() {
    let mut layer = TextLayer::new("Hello World", 10.0, 20.0, 200.0, 60.0);
    let options = FitOptions {
        bounds: SizeBounds::new(8, 72),
        ..Default::default()
    };
    let result = fit_layer(&mut layer, &mut MetricOracle, &options);
    assert!(result.is_fitted());
    assert_eq!(layer.font_size, 38);
    assert_eq!(layer.line_count, 1);
    assert!(layer.rendered_height <= 61.0);
}

#[test]
fn test_cache_is_transparent() {
    let req = hello_world(StyleConfig::default()).with_max_lines(1);
    let direct = resolve(&mut MetricOracle, &req);

    let mut cached = CachedOracle::with_config(MetricOracle, &CacheConfig { capacity: 64 });
    let first = resolve(&mut cached, &req);
    let second = resolve(&mut cached, &req);
    assert_eq!(first, direct);
    assert_eq!(second, direct);
    assert_eq!(cached.stats().misses, direct.probes as u64);
    assert_eq!(cached.stats().hits, direct.probes as u64);
}

#[test]
fn test_cache_config_from_json() {
    let config: CacheConfig = serde_json::from_str(r#"{ "capacity": 128 }"#).unwrap();
    assert_eq!(config.capacity, 128);
    let config: CacheConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CacheConfig::default());
}

#[test]
fn test_batch_matches_sequential() {
    let requests: Vec<FitRequest> = [
        "Hello World",
        "Summer Sale Starts Today",
        "The quick brown fox jumps over the lazy dog",
        "",
        "漢字日本語テキスト",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| {
        FitRequest::new(*text, 120.0 + 40.0 * i as f32, 80.0, StyleConfig::default())
            .with_bounds(8, 96)
            .with_max_lines(2)
    })
    .collect();

    let parallel = resolve_batch(&requests, || MetricOracle);
    let sequential: Vec<_> = requests.iter().map(|r| resolve(&mut MetricOracle, r)).collect();
    assert_eq!(parallel, sequential);
}
