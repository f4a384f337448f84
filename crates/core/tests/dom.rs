//! DOM parsing, the element factory, inline styles and selector queries.

use pretty_assertions::assert_eq;
use sitebind_core::css::selector::{query, query_all};
use sitebind_core::dom::{create_element, parse_html, DomNode, ElementProps};

#[test]
fn test_create_element_sets_class_text_attributes_children() {
    let child = create_element("em", ElementProps::new().text("hi"), Vec::new());
    let node = create_element(
        "p",
        ElementProps::new()
            .class("lead")
            .text(42)
            .attr("data-x", Some(1))
            .attr("data-skip", None::<&str>),
        vec![child],
    );
    assert_eq!(node.to_html(), r#"<p class="lead" data-x="1">42<em>hi</em></p>"#);
    assert!(!node.has_attr("data-skip"));
}

#[test]
fn test_create_element_without_props() {
    let node = create_element("div", ElementProps::new(), Vec::new());
    assert_eq!(node.to_html(), "<div></div>");
}

#[test]
fn test_parse_and_serialize_round_trip() {
    let html = r#"<html><head></head><body><div id="a" class="x y">Hi &amp; bye<!-- note --></div><img src="a.png"></body></html>"#;
    let dom = parse_html(html).unwrap();
    assert_eq!(
        dom.to_html(),
        r#"<!DOCTYPE html><html><head></head><body><div class="x y" id="a">Hi &amp; bye<!-- note --></div><img src="a.png"></body></html>"#
    );
}

#[test]
fn test_text_content_and_set_text_content() {
    let dom = parse_html("<p id='p'>Hello <b>world</b></p>").unwrap();
    let p = dom.find_by_id("p").unwrap();
    assert_eq!(p.text_content(), "Hello world");

    let mut p = p.clone();
    p.set_text_content("Bye");
    assert_eq!(p.children, vec![DomNode::new_text("Bye")]);
    p.set_text_content("");
    assert!(p.children.is_empty());
}

#[test]
fn test_style_property_updates_in_place() {
    let mut node = DomNode::new_element("div");
    node.set_attr("style", "color: red");
    node.set_style_property("--col", "1 / 2");
    node.set_style_property("--row", "2");
    node.set_style_property("--col", "3");
    assert_eq!(node.get_attr("style"), Some("color: red; --col: 3; --row: 2;"));
    assert_eq!(node.style_property("--row").as_deref(), Some("2"));
    assert_eq!(node.style_property("--missing"), None);
}

#[test]
fn test_class_toggling() {
    let mut node = DomNode::new_element("a");
    node.add_class("c-nav__link");
    node.add_class("is-active");
    node.add_class("is-active");
    assert_eq!(node.get_attr("class"), Some("c-nav__link is-active"));
    node.remove_class("c-nav__link");
    node.remove_class("is-active");
    assert!(!node.has_attr("class"));
}

#[test]
fn test_query_all_in_document_order() {
    let dom = parse_html(
        r#"<div data-img="a"><span data-img="b"></span></div><img data-img="c">"#,
    )
    .unwrap();
    let found: Vec<&str> = query_all(&dom, "[data-img]")
        .iter()
        .filter_map(|n| n.get_attr("data-img"))
        .collect();
    assert_eq!(found, vec!["a", "b", "c"]);
}

#[test]
fn test_scoped_query_excludes_the_root() {
    let dom = parse_html(r#"<div id="grid" data-img="x"><img data-img="y"></div>"#).unwrap();
    let grid = dom.find_by_id("grid").unwrap();
    let inner = query_all(grid, "[data-img]");
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].get_attr("data-img"), Some("y"));
}

#[test]
fn test_query_with_prefix_and_descendant_selectors() {
    let dom = parse_html(
        r##"<nav><a class="c-nav__link" href="#one">1</a><a class="c-nav__link" href="/two">2</a></nav>
        <form class="c-newsletter"><div><input type="email"></div><button>Go</button></form>"##,
    )
    .unwrap();
    assert_eq!(query_all(&dom, ".c-nav__link[href^='#']").len(), 1);
    assert!(query(&dom, ".c-newsletter input[type='email']").is_some());
    assert!(query(&dom, ".c-newsletter > input").is_none());
    assert!(query(&dom, "not-a-tag").is_none());
}
