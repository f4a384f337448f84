//! The binder set: a table of `(selector, apply)` bindings that map
//! configuration values onto marked DOM elements.
//!
//! Every binder is idempotent and skips elements whose data is missing. A
//! binding pass first snapshots the matching elements (like
//! `querySelectorAll`) and then applies to them deepest-last-first, so a
//! binder that replaces an element's children never invalidates the position
//! of an element still waiting to be processed.

use tracing::{debug, trace};

use crate::config::SiteConfig;
use crate::css::presets::{
    css_url, overlay_preset, BG_IMAGE_VAR, BG_OVERLAY_VAR, GRID_COL_VAR, GRID_ROW_VAR,
};
use crate::css::selector::{parse_selector_list, select_paths};
use crate::dom::DomNode;
use crate::viewport::{Breakpoints, Viewport};

mod grids;

pub use grids::{render_product, render_tile, DEFAULT_PARTNER_ROW};

pub const TEXT_ATTR: &str = "data-text";
pub const ATTR_ATTR: &str = "data-attr";
pub const BG_ATTR: &str = "data-bg";
pub const IMG_ATTR: &str = "data-img";
pub const OVERLAY_ATTR: &str = "data-overlay";
pub const COL_ATTR: &str = "data-col";
pub const ROW_ATTR: &str = "data-row";
pub const PARTNERS_ATTR: &str = "data-partners";
pub const TILE_GRID_ATTR: &str = "data-tile-grid";
pub const METRIC_GRID_ATTR: &str = "data-metric-grid";
pub const PRODUCT_GRID_ATTR: &str = "data-product-grid";

/// Everything a binder may read while it runs.
#[derive(Debug, Clone, Copy)]
pub struct BindContext<'a> {
    pub config: &'a SiteConfig,
    pub viewport: Viewport,
    /// Value written into the `#year` stamp.
    pub year: i32,
}

impl<'a> BindContext<'a> {
    pub fn new(config: &'a SiteConfig, viewport: Viewport, year: i32) -> Self {
        Self {
            config,
            viewport,
            year,
        }
    }
}

/// One row of the binding table.
#[derive(Clone, Copy)]
pub struct Binding {
    pub name: &'static str,
    /// Selector for the elements this binding acts on.
    pub selector: &'static str,
    /// Act on the first match only (`querySelector` instead of `querySelectorAll`).
    pub first_only: bool,
    pub apply: fn(&mut DomNode, &BindContext<'_>),
}

pub const TEXT: Binding = Binding {
    name: "text",
    selector: "[data-text]",
    first_only: false,
    apply: bind_text,
};

pub const ATTRIBUTE: Binding = Binding {
    name: "attribute",
    selector: "[data-attr]",
    first_only: false,
    apply: bind_attribute,
};

pub const YEAR: Binding = Binding {
    name: "year",
    selector: "#year",
    first_only: true,
    apply: bind_year,
};

pub const BACKGROUND: Binding = Binding {
    name: "background",
    selector: "[data-bg]",
    first_only: false,
    apply: bind_background,
};

pub const IMAGE: Binding = Binding {
    name: "image",
    selector: "[data-img]",
    first_only: false,
    apply: bind_image,
};

pub const OVERLAY: Binding = Binding {
    name: "overlay",
    selector: "[data-overlay]",
    first_only: false,
    apply: bind_overlay,
};

pub const GRID_PLACEMENT: Binding = Binding {
    name: "grid-placement",
    selector: "[data-col][data-row]",
    first_only: false,
    apply: bind_grid_placement,
};

pub const PARTNER_ROWS: Binding = Binding {
    name: "partner-rows",
    selector: "[data-partners]",
    first_only: false,
    apply: grids::render_partner_row,
};

pub const TILE_GRID: Binding = Binding {
    name: "tile-grid",
    selector: "[data-tile-grid]",
    first_only: false,
    apply: grids::render_tile_grid,
};

pub const METRIC_GRID: Binding = Binding {
    name: "metric-grid",
    selector: "[data-metric-grid]",
    first_only: false,
    apply: grids::render_metric_grid,
};

pub const PRODUCT_GRID: Binding = Binding {
    name: "product-grid",
    selector: "[data-product-grid]",
    first_only: false,
    apply: grids::render_product_grid,
};

/// The full render pass. Structural renderers run before the final leaf
/// passes so the elements they create are bound too.
pub const RENDER_ORDER: &[&Binding] = &[
    &TEXT,
    &ATTRIBUTE,
    &YEAR,
    &PARTNER_ROWS,
    &TILE_GRID,
    &METRIC_GRID,
    &PRODUCT_GRID,
    &BACKGROUND,
    &OVERLAY,
    &IMAGE,
    &GRID_PLACEMENT,
];

/// Run one binding over the descendants of `root`. Returns the number of
/// elements it was applied to.
pub fn apply(binding: &Binding, root: &mut DomNode, cx: &BindContext<'_>) -> usize {
    let Some(selector) = parse_selector_list(binding.selector) else {
        debug!(binding = binding.name, selector = binding.selector, "unparsable selector");
        return 0;
    };
    let mut paths = select_paths(root, &selector);
    if binding.first_only {
        paths.truncate(1);
    }
    for path in paths.iter().rev() {
        if let Some(node) = root.node_at_mut(path) {
            (binding.apply)(node, cx);
        }
    }
    trace!(binding = binding.name, matched = paths.len(), "binding applied");
    paths.len()
}

/// Run every binding in [`RENDER_ORDER`] over the whole document.
pub fn render_all(document: &mut DomNode, cx: &BindContext<'_>) {
    for binding in RENDER_ORDER {
        apply(binding, document, cx);
    }
}

fn bind_text(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(path) = node.get_attr(TEXT_ATTR) else {
        return;
    };
    let Some(value) = cx.config.text(path) else {
        debug!(path, "text binding unresolved");
        return;
    };
    node.set_text_content(value);
}

/// Split an attribute binding `name:path` at the first colon. The name must
/// be a valid HTML attribute name.
pub fn parse_attr_spec(spec: &str) -> Option<(&str, &str)> {
    let (name, path) = spec.split_once(':')?;
    let name = name.trim();
    if !is_attr_name(name) {
        return None;
    }
    Some((name, path.trim()))
}

fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')
        })
}

fn bind_attribute(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(spec) = node.get_attr(ATTR_ATTR) else {
        return;
    };
    let Some((name, path)) = parse_attr_spec(spec) else {
        debug!(spec, "malformed attribute binding");
        return;
    };
    let Some(value) = cx.config.text(path) else {
        debug!(path, "attribute binding unresolved");
        return;
    };
    let name = name.to_string();
    node.set_attr(&name, value);
}

fn bind_year(node: &mut DomNode, cx: &BindContext<'_>) {
    node.set_text_content(&cx.year.to_string());
}

fn bind_background(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(path) = node.get_attr(BG_ATTR) else {
        return;
    };
    let Some(asset) = cx.config.asset(path) else {
        debug!(path, "background asset unresolved");
        return;
    };
    node.set_style_property(BG_IMAGE_VAR, &css_url(asset.src));
}

fn bind_image(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(path) = node.get_attr(IMG_ATTR) else {
        return;
    };
    let Some(asset) = cx.config.asset(path) else {
        debug!(path, "image asset unresolved");
        return;
    };
    node.set_attr("src", asset.src);
    if let Some(alt) = asset.alt {
        node.set_attr("alt", alt);
    }
    set_if_unset(node, "loading", "lazy");
    set_if_unset(node, "decoding", "async");
}

fn set_if_unset(node: &mut DomNode, name: &str, value: &str) {
    if node.get_attr(name).map_or(true, str::is_empty) {
        node.set_attr(name, value);
    }
}

fn bind_overlay(node: &mut DomNode, _cx: &BindContext<'_>) {
    let Some(key) = node.get_attr(OVERLAY_ATTR) else {
        return;
    };
    let Some(gradient) = overlay_preset(key) else {
        debug!(key, "unknown overlay preset");
        return;
    };
    node.set_style_property(BG_OVERLAY_VAR, gradient);
}

/// Pick a placement value: small override, then medium, then base. The first
/// non-empty candidate wins.
pub fn placement_value(node: &DomNode, base_attr: &str, bp: Breakpoints) -> Option<String> {
    let candidate = |suffix: &str| {
        node.get_attr(&format!("{}-{}", base_attr, suffix))
            .filter(|v| !v.is_empty())
            .map(String::from)
    };
    let small = if bp.small { candidate("sm") } else { None };
    small
        .or_else(|| if bp.medium { candidate("md") } else { None })
        .or_else(|| {
            node.get_attr(base_attr)
                .filter(|v| !v.is_empty())
                .map(String::from)
        })
}

fn bind_grid_placement(node: &mut DomNode, cx: &BindContext<'_>) {
    let bp = cx.viewport.breakpoints();
    if let Some(col) = placement_value(node, COL_ATTR, bp) {
        node.set_style_property(GRID_COL_VAR, &col);
    }
    if let Some(row) = placement_value(node, ROW_ATTR, bp) {
        node.set_style_property(GRID_ROW_VAR, &row);
    }
}
