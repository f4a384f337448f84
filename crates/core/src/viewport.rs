//! Viewport size and the two responsive breakpoints grid placement depends on.

/// Widths at or below this match the small breakpoint.
pub const SMALL_MAX_WIDTH: f32 = 560.0;
/// Widths at or below this match the medium breakpoint.
pub const MEDIUM_MAX_WIDTH: f32 = 980.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Which breakpoint media queries currently match. A small viewport also
/// matches medium, as `(max-width: 980px)` does in a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakpoints {
    pub small: bool,
    pub medium: bool,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Keep the default height, change only the width.
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Evaluated on every call; nothing is cached.
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            small: self.width <= SMALL_MAX_WIDTH,
            medium: self.width <= MEDIUM_MAX_WIDTH,
        }
    }
}

/// Parse a `WxH` viewport string; malformed parts fall back to the default.
pub fn parse_viewport(s: &str) -> Viewport {
    let default = Viewport::default();
    match s.split_once('x') {
        Some((w, h)) => Viewport {
            width: w.trim().parse().unwrap_or(default.width),
            height: h.trim().parse().unwrap_or(default.height),
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_edges() {
        assert_eq!(
            Viewport::with_width(560.0).breakpoints(),
            Breakpoints { small: true, medium: true }
        );
        assert_eq!(
            Viewport::with_width(561.0).breakpoints(),
            Breakpoints { small: false, medium: true }
        );
        assert_eq!(
            Viewport::with_width(981.0).breakpoints(),
            Breakpoints::default()
        );
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("400x800"), Viewport::new(400.0, 800.0));
        assert_eq!(parse_viewport("bogus"), Viewport::default());
        assert_eq!(parse_viewport("700xabc"), Viewport::new(700.0, 1080.0));
    }
}
