//! Asset mutator: the one write path into the configuration tree.
//!
//! Swapping an asset's `src`/`alt` edits the asset map in place and re-renders
//! the page. File pickers hand out temporary object URLs, which stay live
//! until they are superseded by the next selection or the picker is unbound.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ConfigNode, SiteConfig};
use crate::css::selector::query;
use crate::page::Page;

/// Fields to replace on an asset. `None` leaves a field as it is; an empty
/// `src` is ignored too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetUpdate {
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl AssetUpdate {
    pub fn src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            alt: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Apply `update` to the map at `path`. Fails when the path does not name an
/// existing map (a missing entry or a string leaf).
pub fn set_asset(config: &mut SiteConfig, path: &str, update: &AssetUpdate) -> bool {
    let Some(mut slot) = config.resolve_mut(path) else {
        return false;
    };
    let Some(map) = slot.current_mut().as_map_mut() else {
        return false;
    };
    if let Some(src) = update.src.as_deref().filter(|s| !s.is_empty()) {
        map.insert("src".to_string(), ConfigNode::Text(src.to_string()));
    }
    if let Some(alt) = &update.alt {
        map.insert("alt".to_string(), ConfigNode::Text(alt.clone()));
    }
    true
}

/// A file chosen in a file input.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Registry of temporary object URLs handed out for selected files.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    live: BTreeSet<String>,
}

impl ObjectUrls {
    pub fn create(&mut self, file: &SelectedFile) -> String {
        let url = format!("blob:sitebind/{}", Uuid::new_v4());
        debug!(file = %file.name, url = %url, "object url created");
        self.live.insert(url.clone());
        url
    }

    /// Release a URL. Returns false if it was not live.
    pub fn revoke(&mut self, url: &str) -> bool {
        self.live.remove(url)
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }

    /// URLs created and not yet released.
    pub fn live(&self) -> impl Iterator<Item = &str> {
        self.live.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// What a file picker is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSpec {
    /// Selector of the file input.
    pub input: String,
    /// Asset updated with each selected file.
    pub asset_path: String,
    /// Alt text to set; defaults to the file name.
    pub alt: Option<String>,
}

/// Handle returned by [`Assets::bind_picker`]. Pass it back to
/// [`Assets::unbind_picker`] to detach the picker and release its URL.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unbound picker keeps its last object URL alive"]
pub struct PickerHandle {
    id: u64,
}

#[derive(Debug)]
struct PickerBinding {
    asset_path: String,
    alt: Option<String>,
    last_url: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct Pickers {
    next_id: u64,
    bindings: HashMap<u64, PickerBinding>,
}

/// Asset operations on a page (`page.assets()`).
pub struct Assets<'p> {
    page: &'p mut Page,
}

impl<'p> Assets<'p> {
    pub(crate) fn new(page: &'p mut Page) -> Self {
        Self { page }
    }

    /// Update the asset at `path` and re-render. Returns false, without
    /// rendering, when `path` does not name an existing map.
    pub fn set(&mut self, path: &str, update: AssetUpdate) -> bool {
        if !set_asset(&mut self.page.config, path, &update) {
            debug!(path, "asset update rejected");
            return false;
        }
        info!(path, src = ?update.src, "asset updated");
        self.page.render();
        true
    }

    /// Bind a file input to an asset. An input selector that matches nothing,
    /// or an empty asset path, gives an inert handle.
    pub fn bind_picker(&mut self, spec: PickerSpec) -> PickerHandle {
        let pickers = &mut self.page.pickers;
        let id = pickers.next_id;
        pickers.next_id += 1;

        let found = query(&self.page.document, &spec.input).is_some();
        if found && !spec.asset_path.is_empty() {
            self.page.pickers.bindings.insert(
                id,
                PickerBinding {
                    asset_path: spec.asset_path,
                    alt: spec.alt,
                    last_url: None,
                },
            );
        } else {
            debug!(input = %spec.input, "picker input missing, handle is inert");
        }
        PickerHandle { id }
    }

    /// Handle a file input change: release the previous URL, create a new
    /// one and point the asset at it. Returns the result of the asset update.
    pub fn select_file(&mut self, handle: &PickerHandle, file: SelectedFile) -> bool {
        let Some(binding) = self.page.pickers.bindings.get_mut(&handle.id) else {
            return false;
        };
        if let Some(previous) = binding.last_url.take() {
            self.page.object_urls.revoke(&previous);
        }
        let url = self.page.object_urls.create(&file);
        binding.last_url = Some(url.clone());

        let update = AssetUpdate {
            src: Some(url),
            alt: Some(binding.alt.clone().unwrap_or(file.name)),
        };
        let path = binding.asset_path.clone();
        self.set(&path, update)
    }

    /// Detach a picker and release the last URL it created.
    pub fn unbind_picker(&mut self, handle: PickerHandle) {
        if let Some(binding) = self.page.pickers.bindings.remove(&handle.id) {
            if let Some(url) = binding.last_url {
                self.page.object_urls.revoke(&url);
            }
        }
    }

    pub fn object_urls(&self) -> &ObjectUrls {
        &self.page.object_urls
    }
}
