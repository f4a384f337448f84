//! Asset updates and file pickers.

use pretty_assertions::assert_eq;
use sitebind_core::assets::{set_asset, AssetUpdate, PickerSpec, SelectedFile};
use sitebind_core::css::selector::query;
use sitebind_core::{Page, RenderOptions, SiteConfig, Viewport};

const PAGE: &str = include_str!("../fixtures/page.html");
const CLEANING: &str = include_str!("../fixtures/cleaning.json");

fn page() -> Page {
    let config = SiteConfig::from_json(CLEANING).unwrap();
    let mut page = Page::from_html(PAGE, config)
        .unwrap()
        .with_viewport(Viewport::default())
        .with_options(RenderOptions { year: 2031 });
    page.init(None);
    page
}

fn logo_src(page: &Page) -> Option<String> {
    query(page.document(), ".c-brand__logo")
        .and_then(|n| n.get_attr("src"))
        .map(String::from)
}

#[test]
fn test_set_asset_updates_config_and_rerenders() {
    let mut page = page();
    assert!(page
        .assets()
        .set("assets.brand.logo", AssetUpdate::src("x.png")));
    assert_eq!(page.config().text("assets.brand.logo.src"), Some("x.png"));
    assert_eq!(
        page.config().text("assets.brand.logo.alt"),
        Some("MaGa Cleaning Services")
    );
    assert_eq!(logo_src(&page).as_deref(), Some("x.png"));
    assert_eq!(page.render_count(), 2);
}

#[test]
fn test_set_asset_alt_only_and_empty_src() {
    let mut config = SiteConfig::from_json(CLEANING).unwrap();
    let update = AssetUpdate {
        src: Some(String::new()),
        alt: Some("Logo".to_string()),
    };
    assert!(set_asset(&mut config, "assets.brand.logo", &update));
    assert_eq!(config.text("assets.brand.logo.src"), Some("assets/logo.png"));
    assert_eq!(config.text("assets.brand.logo.alt"), Some("Logo"));
}

#[test]
fn test_set_asset_rejects_leaves_and_missing_paths() {
    let mut page = page();
    assert!(!page
        .assets()
        .set("assets.brand.logo.alt", AssetUpdate::src("x.png")));
    assert!(!page.assets().set("assets.nope", AssetUpdate::src("x.png")));
    assert!(!page.assets().set("", AssetUpdate::src("x.png")));
    assert_eq!(page.render_count(), 1);
    assert_eq!(logo_src(&page).as_deref(), Some("assets/logo.png"));
}

#[test]
fn test_set_on_non_asset_map_inserts_src() {
    let mut config = SiteConfig::from_json(CLEANING).unwrap();
    assert!(set_asset(&mut config, "text.hero", &AssetUpdate::src("y.png")));
    assert_eq!(config.text("text.hero.src"), Some("y.png"));
}

const PICKER_PAGE: &str = r#"<html><body>
<img class="logo" data-img="assets.brand.logo">
<input type="file" id="logo-file">
</body></html>"#;

fn picker_page() -> Page {
    let config = SiteConfig::from_json(CLEANING).unwrap();
    let mut page = Page::from_html(PICKER_PAGE, config)
        .unwrap()
        .with_options(RenderOptions { year: 2031 });
    page.init(None);
    page
}

#[test]
fn test_picker_selection_creates_and_revokes_urls() {
    let mut page = picker_page();
    let mut assets = page.assets();
    let handle = assets.bind_picker(PickerSpec {
        input: "#logo-file".to_string(),
        asset_path: "assets.brand.logo".to_string(),
        alt: None,
    });

    assert!(assets.select_file(&handle, SelectedFile::new("first.png")));
    let first: Vec<String> = assets.object_urls().live().map(String::from).collect();
    assert_eq!(first.len(), 1);
    assert!(first[0].starts_with("blob:sitebind/"));

    assert!(assets.select_file(&handle, SelectedFile::new("second.png")));
    assert_eq!(assets.object_urls().len(), 1);
    assert!(!assets.object_urls().is_live(&first[0]));
    let second: String = assets.object_urls().live().map(String::from).next().unwrap();

    let img = query(page.document(), ".logo").unwrap();
    assert_eq!(img.get_attr("src"), Some(second.as_str()));
    assert_eq!(img.get_attr("alt"), Some("second.png"));

    page.assets().unbind_picker(handle);
    assert!(page.assets().object_urls().is_empty());
}

#[test]
fn test_picker_with_fixed_alt() {
    let mut page = picker_page();
    let mut assets = page.assets();
    let handle = assets.bind_picker(PickerSpec {
        input: "#logo-file".to_string(),
        asset_path: "assets.brand.logo".to_string(),
        alt: Some("Company logo".to_string()),
    });
    assert!(assets.select_file(&handle, SelectedFile::new("photo.jpg")));
    assets.unbind_picker(handle);
    assert_eq!(page.config().text("assets.brand.logo.alt"), Some("Company logo"));
}

#[test]
fn test_inert_pickers() {
    let mut page = picker_page();
    let mut assets = page.assets();
    let missing_input = assets.bind_picker(PickerSpec {
        input: "#nope".to_string(),
        asset_path: "assets.brand.logo".to_string(),
        alt: None,
    });
    let empty_path = assets.bind_picker(PickerSpec {
        input: "#logo-file".to_string(),
        asset_path: String::new(),
        alt: None,
    });
    assert!(!assets.select_file(&missing_input, SelectedFile::new("a.png")));
    assert!(!assets.select_file(&empty_path, SelectedFile::new("b.png")));
    assert!(assets.object_urls().is_empty());
    assets.unbind_picker(missing_input);
    assets.unbind_picker(empty_path);
    assert_eq!(page.config().text("assets.brand.logo.src"), Some("assets/logo.png"));
}

#[test]
fn test_picker_on_missing_asset_still_tracks_url() {
    let mut page = picker_page();
    let mut assets = page.assets();
    let handle = assets.bind_picker(PickerSpec {
        input: "#logo-file".to_string(),
        asset_path: "assets.unknown".to_string(),
        alt: None,
    });
    assert!(!assets.select_file(&handle, SelectedFile::new("a.png")));
    assert_eq!(assets.object_urls().len(), 1);
    assets.unbind_picker(handle);
    assert!(assets.object_urls().is_empty());
}
