use crate::*;
use std::time::Duration;

#[test]
fn defaults_match_shipped_behavior() {
    let config = StudioConfig::default();
    assert_eq!(config.render.debounce(), Duration::from_millis(300));
    assert_eq!(config.scroll.cooldown(), Duration::from_millis(50));
    assert_eq!(config.viewport.fit_padding, 40.0);
    assert_eq!(config.export.padding, 40.0);
    assert_eq!(config.export.scale, 2.0);
    assert_eq!(config.export.max_canvas_px, 4000.0);
    assert_eq!(config.export.max_surface_edge, 16_384);
    assert_eq!(config.export.jpeg_quality, 90);
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let config = StudioConfig::parse(r#"{ "render": { "debounceMs": 120 }, "export": { "scale": 3 } }"#)
        .unwrap();
    assert_eq!(config.render.debounce_ms, 120);
    assert_eq!(config.export.scale, 3.0);
    assert_eq!(config.export.padding, 40.0);
    assert!(config.scroll.sync_enabled);
}

#[test]
fn yaml_is_accepted() {
    let config = StudioConfig::parse(
        "scroll:\n  syncEnabled: false\nexport:\n  darkBackground: '#000000'\n",
    )
    .unwrap();
    assert!(!config.scroll.sync_enabled);
    assert_eq!(config.export.dark_background, "#000000");
    assert_eq!(config.render.debounce_ms, 300);
}

#[test]
fn invalid_json_is_reported() {
    let err = StudioConfig::from_json_str("{ \"render\": 5 }").unwrap_err();
    assert!(err.to_string().starts_with("Invalid config JSON"));
}

#[test]
fn export_background_follows_theme_darkness() {
    let export = ExportConfig::default();
    assert_eq!(export.background_for(Theme::Dark), "#1e293b");
    assert_eq!(export.background_for(Theme::Neutral), "#ffffff");
    assert_eq!(export.background_for(Theme::Forest), "#ffffff");
}

#[test]
fn surface_limits_bound_both_edge_and_area() {
    let export = ExportConfig::default();
    assert!(export.surface_fits(16_384, 16_384));
    assert!(!export.surface_fits(16_385, 10));
    assert!(!export.surface_fits(100_080, 100_080));

    let export = ExportConfig {
        max_surface_area: 1_000_000,
        ..ExportConfig::default()
    };
    assert!(export.surface_fits(1_000, 1_000));
    assert!(!export.surface_fits(1_000, 1_001));
}
