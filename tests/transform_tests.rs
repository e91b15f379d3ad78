//! Transformer tests across the source, leaf and remote formats

use serde_json::json;
use token_sync::convert::color::{color_to_hex, hex_to_color};
use token_sync::diff::compare_stores;
use token_sync::models::{
    CategoryTokens, RemoteColor, ResolvedType, TokenCategory, TokenStore, TransformWarning,
    VariableValue,
};
use token_sync::sync::{CollectionNames, SyncToggles, TempIdGenerator};
use token_sync::{StudioExporter, StudioImporter, VariablesExporter};

fn store_from(sources: &[(TokenCategory, serde_json::Value)]) -> TokenStore {
    let mut store = TokenStore::new();
    for (category, source) in sources {
        let (tokens, warnings) = CategoryTokens::from_source_json(*category, source);
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        store.insert(*category, tokens);
    }
    store
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.001
}

#[test]
fn test_studio_roundtrip_preserves_store() {
    let store = store_from(&[
        (
            TokenCategory::Colors,
            json!({
                "primitive": {
                    "primary": {"900": "#0A1F44", "700": "#0F2C5C"},
                    "transparent": "transparent"
                },
                "semantic": {"background": {"primary": "{primary.900}"}},
                "component": {"card": {"border": "#3AF2D740"}}
            }),
        ),
        (
            TokenCategory::Spacing,
            json!({
                "primitive": {"px": "1px", "0": "0", "0.5": "2px", "4": "16px"},
                "semantic": {"gap": {"md": "{4}"}},
                "component": {"container": {"full": "100%"}}
            }),
        ),
        (
            TokenCategory::Motion,
            json!({"primitive": {"duration": {"fast": "100ms"}, "easing": {"linear": "linear"}}}),
        ),
    ]);

    let documents = StudioExporter::export_store(&store, |_| true);
    assert_eq!(documents.len(), 7);

    let (imported, warnings) = StudioImporter::import_documents(&documents);
    assert!(warnings.is_empty());
    assert_eq!(imported, store);
    assert!(compare_stores(&store, &imported).is_empty());
}

#[test]
fn test_studio_export_strips_px_only_for_unit_types() {
    let store = store_from(&[
        (TokenCategory::Spacing, json!({"primitive": {"4": "16px"}})),
        (TokenCategory::Motion, json!({"primitive": {"duration": {"fast": "100ms"}}})),
    ]);
    let documents = StudioExporter::export_store(&store, |_| true);

    let spacing = documents
        .iter()
        .find(|d| d.category == TokenCategory::Spacing)
        .unwrap();
    assert_eq!(spacing.relative_path(), "core/spacing.json");
    assert_eq!(spacing.content, json!({"4": {"value": "16", "type": "spacing"}}));

    let motion = documents
        .iter()
        .find(|d| d.category == TokenCategory::Motion)
        .unwrap();
    assert_eq!(
        motion.content,
        json!({"duration": {"fast": {"value": "100ms", "type": "duration"}}})
    );
}

#[test]
fn test_hex_roundtrip() {
    for hex in ["#0A1F44", "#3AF2D7", "#FFFFFF", "#000000", "#6B4CF6"] {
        let color = hex_to_color(hex).unwrap();
        assert_eq!(color_to_hex(&color), hex);
    }

    // Case and the leading hash are normalized
    let color = hex_to_color("0a1f44").unwrap();
    assert_eq!(color_to_hex(&color), "#0A1F44");

    let translucent = hex_to_color("#3AF2D780").unwrap();
    assert!(close(translucent.a, 0.502));
    assert_eq!(color_to_hex(&translucent), "#3af2d780");
}

#[test]
fn test_malformed_colors_are_rejected() {
    for bad in ["#12", "#GGGGGG", "blue-ish", "", "#0A1F4"] {
        assert!(hex_to_color(bad).is_none(), "{:?} should not parse", bad);
    }
}

#[test]
fn test_single_color_exports_one_variable() {
    let store = store_from(&[(
        TokenCategory::Colors,
        json!({"primitive": {"primary": {"900": "#0A1F44"}}}),
    )]);
    let collections = CollectionNames::default();
    let toggles = SyncToggles::default();
    let mut ids = TempIdGenerator::new();

    let export = VariablesExporter::new(&collections, &toggles).export(&store, &mut ids);

    assert_eq!(export.variable_count(), 1);
    assert_eq!(export.batch.variable_collections.len(), 1);
    assert_eq!(export.batch.variable_collections[0].name, "Colors");

    let variable = &export.batch.variables[0];
    assert_eq!(variable.name, "primary/900");
    assert_eq!(variable.resolved_type, ResolvedType::Color);

    let value = &export.batch.variable_mode_values[0];
    assert_eq!(value.variable_id, variable.id);
    match &value.value {
        VariableValue::Color(c) => {
            assert!(close(c.r, 0.039));
            assert!(close(c.g, 0.121));
            assert!(close(c.b, 0.267));
            assert_eq!(c.a, 1.0);
        }
        other => panic!("expected a color, got {:?}", other),
    }
}

#[test]
fn test_malformed_color_exports_sentinel_with_warning() {
    let store = store_from(&[(
        TokenCategory::Colors,
        json!({"primitive": {"broken": "#12", "ok": "#FFFFFF"}}),
    )]);
    let collections = CollectionNames::default();
    let toggles = SyncToggles::default();
    let mut ids = TempIdGenerator::new();

    let export = VariablesExporter::new(&collections, &toggles).export(&store, &mut ids);

    assert_eq!(export.variable_count(), 2);
    assert_eq!(
        export.batch.variable_mode_values[0].value,
        VariableValue::Color(RemoteColor::SENTINEL)
    );
    assert_eq!(export.warnings.len(), 1);
    assert!(matches!(
        &export.warnings[0],
        TransformWarning::MalformedColor { value, .. } if value == "#12"
    ));
}

#[test]
fn test_disabled_category_is_not_exported() {
    let store = store_from(&[
        (TokenCategory::Colors, json!({"primitive": {"white": "#FFFFFF"}})),
        (TokenCategory::Spacing, json!({"primitive": {"4": "16px"}})),
    ]);
    let collections = CollectionNames::default();
    let toggles = SyncToggles {
        spacing: false,
        ..Default::default()
    };
    let mut ids = TempIdGenerator::new();

    let export = VariablesExporter::new(&collections, &toggles).export(&store, &mut ids);

    assert_eq!(export.variable_count(), 1);
    assert_eq!(export.counts.len(), 1);
    assert_eq!(export.counts[0].category, TokenCategory::Colors);
}
