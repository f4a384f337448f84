//! CSS custom properties written by the binders, and the fixed overlay presets.

/// Custom property carrying a `url(...)` background image.
pub const BG_IMAGE_VAR: &str = "--bg-image";
/// Custom property carrying an overlay gradient.
pub const BG_OVERLAY_VAR: &str = "--bg-overlay";
/// Custom property carrying the grid column placement.
pub const GRID_COL_VAR: &str = "--col";
/// Custom property carrying the grid row placement.
pub const GRID_ROW_VAR: &str = "--row";

const OVERLAY_PRESETS: &[(&str, &str)] = &[
    (
        "soft",
        "linear-gradient(180deg, rgba(3, 4, 3, 0.08), rgba(3, 4, 3, 0.35))",
    ),
    (
        "strong",
        "linear-gradient(180deg, rgba(3, 4, 3, 0.18), rgba(3, 4, 3, 0.42))",
    ),
];

/// Gradient for a named overlay preset; unknown keys have none.
pub fn overlay_preset(key: &str) -> Option<&'static str> {
    OVERLAY_PRESETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, gradient)| *gradient)
}

/// `url("...")` value for a background image source.
pub fn css_url(src: &str) -> String {
    format!("url(\"{}\")", src.replace('\\', "\\\\").replace('"', "\\\""))
}
