//! Structural renderers: partner rows, tile grids, metric grids and product
//! grids. Each replaces the marked element's children with markup built from
//! a named sequence of records, then binds the leaf markers inside it.

use tracing::debug;

use super::{
    apply, BindContext, BACKGROUND, COL_ATTR, GRID_PLACEMENT, IMAGE, IMG_ATTR, METRIC_GRID_ATTR,
    OVERLAY, PARTNERS_ATTR, PRODUCT_GRID_ATTR, ROW_ATTR, TILE_GRID_ATTR,
};
use crate::config::{MetricItem, Product, Tile};
use crate::dom::{create_element, DomNode, ElementProps};

/// Row used when `data-partners` is empty.
pub const DEFAULT_PARTNER_ROW: &str = "default";

const BUY_LABEL: &str = "Buy Now";
const BUY_HREF: &str = "#reviews";

/// Non-empty marker value, if any.
fn marker<'a>(node: &'a DomNode, attr: &str) -> Option<&'a str> {
    node.get_attr(attr).filter(|k| !k.is_empty())
}

pub(super) fn render_partner_row(node: &mut DomNode, cx: &BindContext<'_>) {
    let key = marker(node, PARTNERS_ATTR).unwrap_or(DEFAULT_PARTNER_ROW);
    let Some(items) = cx.config.partner_rows.get(key) else {
        debug!(key, "unknown partner row");
        return;
    };
    let children = items
        .iter()
        .map(|label| {
            create_element(
                "span",
                ElementProps::new().class("c-partner").text(label),
                Vec::new(),
            )
        })
        .collect();
    node.replace_children(children);
}

pub(super) fn render_tile_grid(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(key) = marker(node, TILE_GRID_ATTR) else {
        return;
    };
    let Some(grid) = cx.config.tile_grids.get(key) else {
        debug!(key, "unknown tile grid");
        return;
    };
    node.replace_children(grid.tiles.iter().map(render_tile).collect());
    apply(&IMAGE, node, cx);
    apply(&GRID_PLACEMENT, node, cx);
}

/// Markup for one tile; its `place.base` hint becomes `data-col`/`data-row`.
pub fn render_tile(tile: &Tile) -> DomNode {
    let place = tile.place();
    let props = |class: &str| {
        ElementProps::new()
            .class(class)
            .attr(COL_ATTR, place.map(|p| &p.col))
            .attr(ROW_ATTR, place.map(|p| &p.row))
    };

    match tile {
        Tile::Image { asset_path, .. } => {
            let img = create_element(
                "img",
                ElementProps::new().attr(IMG_ATTR, asset_path.as_ref()),
                Vec::new(),
            );
            create_element("article", props("c-tile c-tile--img"), vec![img])
        }
        Tile::Kicker { text, .. } => create_element(
            "article",
            props("c-tile c-tile--glass"),
            vec![tile_paragraph("c-tile__kicker", text.as_deref())],
        ),
        Tile::Text { text, .. } => create_element(
            "article",
            props("c-tile c-tile--glass"),
            vec![tile_paragraph("c-tile__text", text.as_deref())],
        ),
    }
}

/// Tile paragraph; left empty when the tile has no text.
fn tile_paragraph(class: &str, text: Option<&str>) -> DomNode {
    let props = ElementProps::new().class(class);
    let props = match text {
        Some(text) => props.text(text),
        None => props,
    };
    create_element("p", props, Vec::new())
}

pub(super) fn render_metric_grid(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(key) = marker(node, METRIC_GRID_ATTR) else {
        return;
    };
    let Some(items) = cx.config.metric_grids.get(key) else {
        debug!(key, "unknown metric grid");
        return;
    };
    node.replace_children(items.iter().map(render_metric).collect());
    apply(&BACKGROUND, node, cx);
    apply(&OVERLAY, node, cx);
}

fn render_metric(item: &MetricItem) -> DomNode {
    match item {
        MetricItem::Stat {
            variant,
            label,
            value,
        } => create_element(
            "div",
            ElementProps::new().class(format!("c-stat c-stat--{}", variant.as_str())),
            vec![
                create_element(
                    "div",
                    ElementProps::new().class("c-stat__label").text(label),
                    Vec::new(),
                ),
                create_element(
                    "div",
                    ElementProps::new().class("c-stat__value").text(value),
                    Vec::new(),
                ),
            ],
        ),
        MetricItem::Image {
            bg_asset_path,
            overlay,
        } => create_element(
            "div",
            ElementProps::new()
                .class("c-stat c-stat--img u-bg")
                .attr(super::BG_ATTR, Some(bg_asset_path))
                .attr(super::OVERLAY_ATTR, overlay.as_ref()),
            Vec::new(),
        ),
    }
}

pub(super) fn render_product_grid(node: &mut DomNode, cx: &BindContext<'_>) {
    let Some(key) = marker(node, PRODUCT_GRID_ATTR) else {
        return;
    };
    let Some(items) = cx.config.product_grids.get(key) else {
        debug!(key, "unknown product grid");
        return;
    };
    node.replace_children(items.iter().map(render_product).collect());
    apply(&IMAGE, node, cx);
}

/// Product card: media, name and price, and a call to action that is an
/// inert `span` when the product is disabled.
pub fn render_product(product: &Product) -> DomNode {
    let card_class = if product.disabled {
        "c-product c-product--muted"
    } else {
        "c-product"
    };

    let media_children = product
        .asset_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|path| {
            create_element(
                "img",
                ElementProps::new().attr(IMG_ATTR, Some(path)),
                Vec::new(),
            )
        })
        .into_iter()
        .collect();
    let media = create_element(
        "div",
        ElementProps::new().class("c-product__media"),
        media_children,
    );

    let meta = create_element(
        "div",
        ElementProps::new().class("c-product__meta"),
        vec![
            create_element(
                "div",
                ElementProps::new().class("c-product__name").text(&product.name),
                Vec::new(),
            ),
            create_element(
                "div",
                ElementProps::new()
                    .class("c-product__price")
                    .text(product.price_label()),
                Vec::new(),
            ),
        ],
    );

    let cta = if product.disabled {
        create_element(
            "span",
            ElementProps::new()
                .class("c-btn c-btn--soft c-product__cta is-disabled")
                .text(BUY_LABEL)
                .attr("aria-disabled", Some("true")),
            Vec::new(),
        )
    } else {
        create_element(
            "a",
            ElementProps::new()
                .class("c-btn c-btn--soft c-product__cta")
                .text(BUY_LABEL)
                .attr("href", Some(BUY_HREF)),
            Vec::new(),
        )
    };

    create_element(
        "article",
        ElementProps::new()
            .class(card_class)
            .attr("role", Some("listitem")),
        vec![media, meta, cta],
    )
}
