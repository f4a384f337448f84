//! Site configuration: the content tree the binders read from.
//!
//! The path-addressable part is a nested map of strings ([`ConfigNode`]), holding
//! the `text` and `assets` subtrees. The structural subtrees (partner rows and
//! the three grid kinds) are typed records, tagged by their `type` field where
//! they have variants.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SiteError};

pub mod path;

pub use path::{resolve_ref, resolve_value, Slot};

/// A path-addressable configuration value: a string leaf or a nested map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Text(String),
    Map(BTreeMap<String, ConfigNode>),
}

/// Borrowed view of an asset record: `{ src, alt? }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset<'a> {
    pub src: &'a str,
    pub alt: Option<&'a str>,
}

impl ConfigNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigNode::Text(s) => Some(s),
            ConfigNode::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigNode>> {
        match self {
            ConfigNode::Map(m) => Some(m),
            ConfigNode::Text(_) => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, ConfigNode>> {
        match self {
            ConfigNode::Map(m) => Some(m),
            ConfigNode::Text(_) => None,
        }
    }

    /// View this node as an asset. Only maps with a non-empty string `src` qualify.
    pub fn as_asset(&self) -> Option<Asset<'_>> {
        let map = self.as_map()?;
        let src = map.get("src")?.as_text().filter(|s| !s.is_empty())?;
        let alt = map.get("alt").and_then(ConfigNode::as_text);
        Some(Asset { src, alt })
    }
}

/// Grid position hint for a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub col: String,
    pub row: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub base: Option<GridCell>,
}

/// One tile of a tile grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tile {
    Image {
        #[serde(default, rename = "assetPath")]
        asset_path: Option<String>,
        #[serde(default)]
        place: Option<Placement>,
    },
    Kicker {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        place: Option<Placement>,
    },
    Text {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        place: Option<Placement>,
    },
}

impl Tile {
    pub fn place(&self) -> Option<&GridCell> {
        let place = match self {
            Tile::Image { place, .. } | Tile::Kicker { place, .. } | Tile::Text { place, .. } => {
                place
            }
        };
        place.as_ref()?.base.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileGrid {
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricVariant {
    Dark,
    Light,
}

impl MetricVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricVariant::Dark => "dark",
            MetricVariant::Light => "light",
        }
    }
}

/// One cell of a metric grid: a two-line stat or a background image block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetricItem {
    #[serde(rename = "metric")]
    Stat {
        variant: MetricVariant,
        label: String,
        value: String,
    },
    Image {
        #[serde(rename = "bgAssetPath")]
        bg_asset_path: String,
        #[serde(default)]
        overlay: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub asset_path: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Product {
    /// Price label: `$<price>`, or `$—` when the price is unknown.
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) => format!("${}", price),
            None => "$—".to_string(),
        }
    }
}

/// The whole configuration for one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub partner_rows: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub tile_grids: BTreeMap<String, TileGrid>,
    #[serde(default)]
    pub metric_grids: BTreeMap<String, Vec<MetricItem>>,
    #[serde(default)]
    pub product_grids: BTreeMap<String, Vec<Product>>,
    /// `text`, `assets` and any other string/map subtrees, addressable by path.
    #[serde(flatten)]
    pub tree: BTreeMap<String, ConfigNode>,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SiteError::read(path, e))?;
        Ok(Self::from_json(&json)?)
    }

    pub fn resolve(&self, path: &str) -> Option<&ConfigNode> {
        resolve_value(&self.tree, path)
    }

    pub fn resolve_mut(&mut self, path: &str) -> Option<Slot<'_>> {
        resolve_ref(&mut self.tree, path)
    }

    /// String value at `path`, if the path resolves to a string.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.resolve(path)?.as_text()
    }

    /// Asset record at `path`, if the path resolves to one with a `src`.
    pub fn asset(&self, path: &str) -> Option<Asset<'_>> {
        self.resolve(path)?.as_asset()
    }
}
