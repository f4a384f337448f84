//! Configuration loading and dot-path resolution.

use pretty_assertions::assert_eq;
use sitebind_core::config::{
    resolve_ref, resolve_value, Asset, ConfigNode, MetricItem, MetricVariant, SiteConfig, Tile,
};

const CLEANING: &str = include_str!("../fixtures/cleaning.json");
const VERDANT: &str = include_str!("../fixtures/verdant.json");

fn cleaning() -> SiteConfig {
    SiteConfig::from_json(CLEANING).expect("cleaning fixture loads")
}

fn verdant() -> SiteConfig {
    SiteConfig::from_json(VERDANT).expect("verdant fixture loads")
}

#[test]
fn test_resolve_string_leaf() {
    let config = cleaning();
    assert_eq!(config.text("text.hero.title"), Some("Cleaning Your Worries Away"));
    assert_eq!(
        resolve_value(&config.tree, "text.nav.contact"),
        Some(&ConfigNode::Text("Contact".to_string()))
    );
}

#[test]
fn test_resolve_returns_subtrees() {
    let config = cleaning();
    let nav = config.resolve("text.nav").and_then(ConfigNode::as_map).unwrap();
    assert_eq!(nav.len(), 5);
    assert_eq!(config.text("text.nav"), None);
}

#[test]
fn test_missing_or_invalid_segments_yield_none() {
    let config = cleaning();
    for path in [
        "",
        "nope",
        "text.hero.missing",
        "text.hero.title.deeper",
        "text..hero",
        "text.hero.",
        ".text",
        "partnerRows.default",
    ] {
        assert_eq!(config.resolve(path), None, "path {:?}", path);
    }
}

#[test]
fn test_resolve_asset_records() {
    let config = cleaning();
    assert_eq!(
        config.asset("assets.brand.logo"),
        Some(Asset {
            src: "assets/logo.png",
            alt: Some("MaGa Cleaning Services"),
        })
    );
    assert_eq!(
        config.asset("assets.hero.background"),
        Some(Asset {
            src: "assets/rainer.jpg",
            alt: None,
        })
    );
    // Maps without a src are not assets
    assert_eq!(config.asset("assets.brand"), None);
    assert_eq!(config.asset("text.hero"), None);
    assert_eq!(config.asset("text.hero.title"), None);
}

#[test]
fn test_write_through_ref_then_read() {
    let mut config = cleaning();
    {
        let mut slot = resolve_ref(&mut config.tree, "text.hero.title").unwrap();
        assert_eq!(slot.key(), "title");
        assert_eq!(slot.current().as_text(), Some("Cleaning Your Worries Away"));
        let previous = slot.set(ConfigNode::Text("Spotless".to_string()));
        assert_eq!(previous.as_text(), Some("Cleaning Your Worries Away"));
    }
    assert_eq!(config.text("text.hero.title"), Some("Spotless"));
}

#[test]
fn test_ref_on_top_level_key() {
    let mut config = cleaning();
    let slot = config.resolve_mut("text").unwrap();
    assert_eq!(slot.key(), "text");
    assert!(slot.current().as_map().is_some());
}

#[test]
fn test_ref_requires_existing_entry() {
    let mut config = cleaning();
    assert!(config.resolve_mut("").is_none());
    assert!(config.resolve_mut("text.hero.missing").is_none());
    assert!(config.resolve_mut("text.hero.title.deeper").is_none());
    assert!(config.resolve_mut("missing.title").is_none());
}

#[test]
fn test_structural_subtrees_are_typed() {
    let config = verdant();

    let tiles = &config.tile_grids["hero"].tiles;
    assert_eq!(tiles.len(), 4);
    match &tiles[0] {
        Tile::Image { asset_path, .. } => {
            assert_eq!(asset_path.as_deref(), Some("assets.tiles.monstera"))
        }
        other => panic!("Expected image tile, got {:?}", other),
    }
    assert_eq!(tiles[1].place().map(|p| p.col.as_str()), Some("3 / 4"));
    assert_eq!(tiles[3].place(), None);

    let metrics = &config.metric_grids["impact"];
    assert_eq!(
        metrics[0],
        MetricItem::Stat {
            variant: MetricVariant::Dark,
            label: "Trees planted".to_string(),
            value: "12,480".to_string(),
        }
    );
    assert_eq!(
        metrics[1],
        MetricItem::Image {
            bg_asset_path: "assets.impact.soil".to_string(),
            overlay: Some("soft".to_string()),
        }
    );

    let products = &config.product_grids["catalog"];
    assert_eq!(products[0].price, Some(24.0));
    assert_eq!(products[2].price, None);
    assert!(products[2].disabled);
    assert!(!products[0].disabled);
}

#[test]
fn test_price_labels() {
    let config = verdant();
    let labels: Vec<String> = config.product_grids["catalog"]
        .iter()
        .map(|p| p.price_label())
        .collect();
    assert_eq!(labels, vec!["$24", "$18.5", "$—"]);
}

#[test]
fn test_wrong_shapes_are_rejected_at_load() {
    assert!(SiteConfig::from_json(r#"{ "text": { "count": 3 } }"#).is_err());
    assert!(SiteConfig::from_json(
        r#"{ "tileGrids": { "a": { "tiles": [ { "type": "video", "text": "x" } ] } } }"#
    )
    .is_err());
    assert!(SiteConfig::from_json(r#"{ "partnerRows": { "default": "not a list" } }"#).is_err());

    let err = SiteConfig::from_json("{").unwrap_err();
    assert!(err.to_string().starts_with("invalid site configuration"));
}

#[test]
fn test_absent_subtrees_default_to_empty() {
    let config = SiteConfig::from_json("{}").unwrap();
    assert!(config.tile_grids.is_empty());
    assert!(config.tree.is_empty());
    assert_eq!(config.text("text.hero.title"), None);
}
