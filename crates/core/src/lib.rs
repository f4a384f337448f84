pub mod assets;
pub mod bind;
pub mod config;
pub mod css;
pub mod dom;
pub mod error;
pub mod interact;
pub mod page;
pub mod viewport;

pub use config::SiteConfig;
pub use error::{ConfigError, SiteError};
pub use page::{Page, RenderOptions};
pub use viewport::Viewport;

/// Parse an HTML string, bind it to `config` at `viewport`, and serialize the result.
/// This is the one-shot entry point; use [`Page`] to keep interacting with the page.
pub fn render_html(html: &str, config: SiteConfig, viewport: Viewport) -> Result<String, SiteError> {
    let mut page = Page::from_html(html, config)?.with_viewport(viewport);
    page.render();
    Ok(page.to_html())
}
