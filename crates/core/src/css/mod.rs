//! The CSS surface the binders touch: selectors for finding marked elements,
//! inline-style declarations for writing custom properties, and the fixed
//! presets those properties take.

pub mod presets;
pub mod selector;
pub mod style;
