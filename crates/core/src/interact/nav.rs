//! Active-section highlighting for in-page navigation links.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::css::selector::{query_all, query_all_paths};
use crate::dom::DomNode;

pub const NAV_LINK_SELECTOR: &str = ".c-nav__link[href^='#']";
pub const ACTIVE_CLASS: &str = "is-active";

/// Observer root margins as fractions of the viewport height. Together they
/// leave a thin band just above the vertical center of the viewport.
pub const ROOT_MARGIN_TOP: f32 = 0.40;
pub const ROOT_MARGIN_BOTTOM: f32 = 0.55;
/// Minimum visible fraction of a section for it to count as intersecting.
pub const INTERSECTION_THRESHOLD: f32 = 0.02;

/// Visibility change for one observed section.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(target_id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            target_id: target_id.into(),
            is_intersecting,
        }
    }
}

/// Vertical extent of a section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ActiveNav {
    sections: Vec<String>,
    /// Sections whose visible ratio is at or above the threshold.
    above_threshold: HashSet<String>,
    observed_once: bool,
    active: Option<String>,
}

impl ActiveNav {
    /// Track every in-page nav link whose target section exists. Returns
    /// `None` when the page has no such links. A non-empty fragment in
    /// `location` marks its link active straight away.
    pub fn setup(document: &mut DomNode, location: Option<&str>) -> Option<Self> {
        let links = query_all(document, NAV_LINK_SELECTOR);
        if links.is_empty() {
            return None;
        }

        let mut sections: Vec<String> = Vec::new();
        for id in links
            .iter()
            .filter_map(|a| a.get_attr("href"))
            .filter_map(|href| href.strip_prefix('#'))
        {
            if !id.is_empty() && document.find_by_id(id).is_some() && !sections.iter().any(|s| s == id)
            {
                sections.push(id.to_string());
            }
        }
        debug!(links = links.len(), sections = sections.len(), "active nav ready");

        let mut nav = Self {
            sections,
            ..Self::default()
        };
        if let Some(hash) = location.and_then(location_hash) {
            nav.set_active(document, &hash);
        }
        Some(nav)
    }

    /// Ids of the observed sections, in link order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Hash (`#id`) of the link marked active, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Mark the link whose `href` equals `hash`; clear every other link.
    pub fn set_active(&mut self, document: &mut DomNode, hash: &str) {
        for path in query_all_paths(document, NAV_LINK_SELECTOR) {
            if let Some(link) = document.node_at_mut(&path) {
                let on = link.get_attr("href") == Some(hash);
                link.toggle_class(ACTIVE_CLASS, on);
            }
        }
        self.active = Some(hash.to_string());
    }

    /// Apply observer entries in order; the last intersecting one wins.
    pub fn observe(&mut self, document: &mut DomNode, entries: &[IntersectionEntry]) {
        for entry in entries {
            if !entry.is_intersecting || !self.sections.contains(&entry.target_id) {
                continue;
            }
            self.set_active(document, &format!("#{}", entry.target_id));
        }
    }

    /// Derive observer entries from section boxes at a scroll position and
    /// apply them. As with a real observer, an entry is reported when a
    /// section's visible ratio crosses the threshold (every section on the
    /// first call), and `is_intersecting` is whether it overlaps the band at
    /// all.
    pub fn observe_scroll(
        &mut self,
        document: &mut DomNode,
        scroll_y: f32,
        viewport_height: f32,
        boxes: &[SectionBox],
    ) -> Vec<IntersectionEntry> {
        let band_top = scroll_y + viewport_height * ROOT_MARGIN_TOP;
        let band_bottom = scroll_y + viewport_height * (1.0 - ROOT_MARGIN_BOTTOM);

        let mut entries = Vec::new();
        for b in boxes.iter().filter(|b| self.sections.contains(&b.id)) {
            let (overlapping, above) = visibility(b, band_top, band_bottom);
            let before = self.above_threshold.contains(&b.id);
            if above != before || !self.observed_once {
                entries.push(IntersectionEntry::new(b.id.clone(), overlapping));
            }
            if above {
                self.above_threshold.insert(b.id.clone());
            } else {
                self.above_threshold.remove(&b.id);
            }
        }
        self.observed_once = true;

        self.observe(document, &entries);
        entries
    }
}

/// Whether `section` overlaps the band, and whether its visible ratio is at
/// or above [`INTERSECTION_THRESHOLD`].
fn visibility(section: &SectionBox, band_top: f32, band_bottom: f32) -> (bool, bool) {
    if section.height <= 0.0 {
        let inside = section.top >= band_top && section.top <= band_bottom;
        return (inside, inside);
    }
    let bottom = section.top + section.height;
    let overlap = bottom.min(band_bottom) - section.top.max(band_top);
    let overlapping = overlap > 0.0;
    (
        overlapping,
        overlapping && overlap / section.height >= INTERSECTION_THRESHOLD,
    )
}

/// `#fragment` of a page URL, when it has a non-empty one.
pub fn location_hash(location: &str) -> Option<String> {
    let url = Url::parse(location).ok()?;
    url.fragment()
        .filter(|f| !f.is_empty())
        .map(|f| format!("#{}", f))
}
