//! A loaded page: the document, the configuration it is bound to, and the
//! state of its interactive behaviors.

use chrono::Datelike;
use tracing::{debug, info};

use crate::assets::{Assets, ObjectUrls, Pickers};
use crate::bind::{self, BindContext};
use crate::config::SiteConfig;
use crate::css::selector::query_path;
use crate::dom::{self, DomNode};
use crate::error::SiteError;
use crate::interact::{
    ActiveNav, IntersectionEntry, Newsletter, NewsletterTask, Scheduler, SectionBox, SubmitOutcome,
};
use crate::viewport::Viewport;

/// Values fixed for the lifetime of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Year written into the `#year` stamp.
    pub year: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
        }
    }
}

pub struct Page {
    pub(crate) document: DomNode,
    pub(crate) config: SiteConfig,
    viewport: Viewport,
    options: RenderOptions,
    nav: Option<ActiveNav>,
    newsletter: Option<Newsletter>,
    scheduler: Scheduler<NewsletterTask>,
    pub(crate) object_urls: ObjectUrls,
    pub(crate) pickers: Pickers,
    renders: u64,
}

impl Page {
    pub fn new(document: DomNode, config: SiteConfig) -> Self {
        Self {
            document,
            config,
            viewport: Viewport::default(),
            options: RenderOptions::default(),
            nav: None,
            newsletter: None,
            scheduler: Scheduler::new(),
            object_urls: ObjectUrls::default(),
            pickers: Pickers::default(),
            renders: 0,
        }
    }

    /// Parse `html` and pair it with `config`. Nothing is bound until
    /// [`Page::init`] or [`Page::render`] runs.
    pub fn from_html(html: &str, config: SiteConfig) -> Result<Self, SiteError> {
        Ok(Self::new(dom::parse_html(html)?, config))
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &DomNode {
        &self.document
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Run every binder over the document, in render order. Safe to call any
    /// number of times.
    pub fn render(&mut self) {
        let cx = BindContext::new(&self.config, self.viewport, self.options.year);
        bind::render_all(&mut self.document, &cx);
        self.renders += 1;
        debug!(renders = self.renders, width = self.viewport.width, "page rendered");
    }

    /// First render plus interaction setup. `location` is the page URL; its
    /// fragment picks the initially active nav link.
    pub fn init(&mut self, location: Option<&str>) {
        self.render();
        self.nav = ActiveNav::setup(&mut self.document, location);
        self.newsletter = Newsletter::setup(&self.document);
        info!(
            nav = self.nav.is_some(),
            newsletter = self.newsletter.is_some(),
            "page initialized"
        );
    }

    /// Resize the viewport. Grid placement re-runs only when a breakpoint
    /// starts or stops matching; returns whether it did.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let changed = self.viewport.breakpoints() != viewport.breakpoints();
        self.viewport = viewport;
        if changed {
            let cx = BindContext::new(&self.config, self.viewport, self.options.year);
            bind::apply(&bind::GRID_PLACEMENT, &mut self.document, &cx);
            debug!(width = viewport.width, "breakpoint changed, grid placement refreshed");
        }
        changed
    }

    pub fn assets(&mut self) -> Assets<'_> {
        Assets::new(self)
    }

    pub fn nav(&self) -> Option<&ActiveNav> {
        self.nav.as_ref()
    }

    /// Deliver observer entries to the active-nav behavior.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) {
        if let Some(nav) = self.nav.as_mut() {
            nav.observe(&mut self.document, entries);
        }
    }

    /// Scroll to `scroll_y` with the given section layout.
    pub fn observe_scroll(&mut self, scroll_y: f32, sections: &[SectionBox]) -> Vec<IntersectionEntry> {
        let height = self.viewport.height;
        match self.nav.as_mut() {
            Some(nav) => nav.observe_scroll(&mut self.document, scroll_y, height, sections),
            None => Vec::new(),
        }
    }

    /// Submit the newsletter form.
    pub fn submit_newsletter(&mut self) -> SubmitOutcome {
        match self.newsletter.as_mut() {
            Some(newsletter) => newsletter.submit(&mut self.document, &mut self.scheduler),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Type into the first element matching `selector` (sets its `value`).
    pub fn set_input_value(&mut self, selector: &str, value: &str) -> bool {
        let Some(path) = query_path(&self.document, selector) else {
            return false;
        };
        match self.document.node_at_mut(&path) {
            Some(input) => {
                input.set_attr("value", value);
                true
            }
            None => false,
        }
    }

    /// Let `ms` milliseconds pass, running every deferred task that falls due.
    pub fn advance(&mut self, ms: u64) {
        for task in self.scheduler.advance(ms) {
            if let Some(newsletter) = self.newsletter.as_mut() {
                newsletter.run(&mut self.document, task);
            }
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}
