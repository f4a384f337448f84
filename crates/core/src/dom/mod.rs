use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::BTreeMap;

use crate::css::style::StyleDeclarations;
use crate::error::SiteError;

mod serialize;

/// A node in our DOM tree. Attributes are kept ordered so serialized output is stable.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Document,
}

/// Index path from a root node down to a descendant (child indices, in order).
pub type NodePath = Vec<usize>;

impl DomNode {
    pub fn new_element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Element,
        }
    }

    pub fn new_text(text: &str) -> Self {
        Self {
            tag: String::new(),
            attributes: BTreeMap::new(),
            text: text.to_string(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn new_comment(text: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            ..Self::new_text(text)
        }
    }

    pub fn new_document() -> Self {
        Self {
            tag: String::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Document,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Get the visible text content of this node and all children.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => {
                let trimmed = self.text.trim();
                if !trimmed.is_empty() {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                    out.push_str(trimmed);
                }
            }
            NodeType::Comment => {}
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Replace all children with a single text node (DOM `textContent = ...`).
    pub fn set_text_content(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(DomNode::new_text(text));
        }
    }

    pub fn replace_children(&mut self, children: Vec<DomNode>) {
        self.children = children;
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> Vec<&str> {
        self.get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add or remove `class` so that its presence equals `on`.
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        let present = self.has_class(class);
        if present == on {
            return;
        }
        let mut list: Vec<String> = self.classes().into_iter().map(String::from).collect();
        if on {
            list.push(class.to_string());
        } else {
            list.retain(|c| c != class);
        }
        if list.is_empty() {
            self.attributes.remove("class");
        } else {
            self.attributes.insert("class".to_string(), list.join(" "));
        }
    }

    pub fn add_class(&mut self, class: &str) {
        self.toggle_class(class, true);
    }

    pub fn remove_class(&mut self, class: &str) {
        self.toggle_class(class, false);
    }

    /// Read one declaration from the inline `style` attribute.
    pub fn style_property(&self, name: &str) -> Option<String> {
        let style = StyleDeclarations::parse(self.get_attr("style")?);
        style.get(name).map(String::from)
    }

    /// Set one declaration in the inline `style` attribute (`style.setProperty`).
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        let mut style = self
            .get_attr("style")
            .map(StyleDeclarations::parse)
            .unwrap_or_default();
        style.set(name, value);
        self.attributes.insert("style".to_string(), style.to_string());
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&DomNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut DomNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// First element with the given `id`, searched depth-first.
    pub fn find_by_id(&self, id: &str) -> Option<&DomNode> {
        if self.is_element() && self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }
}

/// Optional pieces of a freshly created element.
#[derive(Debug, Clone, Default)]
pub struct ElementProps {
    pub class_name: Option<String>,
    pub text: Option<String>,
    pub attributes: Vec<(String, Option<String>)>,
}

impl ElementProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn text(mut self, text: impl ToString) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Attributes with a `None` value are skipped at creation time.
    pub fn attr<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        self.attributes
            .push((name.to_string(), value.map(|v| v.to_string())));
        self
    }
}

/// Build one element: class, text, attributes, then children in order.
pub fn create_element(tag: &str, props: ElementProps, children: Vec<DomNode>) -> DomNode {
    let mut node = DomNode::new_element(tag);
    if let Some(class_name) = props.class_name.filter(|c| !c.is_empty()) {
        node.set_attr("class", class_name);
    }
    if let Some(text) = props.text {
        node.set_text_content(&text);
    }
    for (name, value) in props.attributes {
        if let Some(value) = value {
            node.attributes.insert(name, value);
        }
    }
    node.children.extend(children);
    node
}

/// Parse an HTML string into a DomNode tree.
pub fn parse_html(html: &str) -> Result<DomNode, SiteError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(SiteError::Html)?;

    Ok(convert_node(&dom.document))
}

fn convert_node(handle: &Handle) -> DomNode {
    match &handle.data {
        NodeData::Document => {
            let mut doc = DomNode::new_document();
            doc.children = convert_children(handle);
            doc
        }
        NodeData::Element { name, attrs, .. } => {
            let mut node = DomNode::new_element(&name.local);
            for attr in attrs.borrow().iter() {
                node.attributes
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            node.children = convert_children(handle);
            node
        }
        NodeData::Text { contents } => DomNode::new_text(&contents.borrow()),
        NodeData::Comment { contents } => DomNode::new_comment(contents),
        // Doctypes and processing instructions carry nothing we bind to
        _ => DomNode::new_text(""),
    }
}

fn convert_children(handle: &Handle) -> Vec<DomNode> {
    handle
        .children
        .borrow()
        .iter()
        .map(convert_node)
        .filter(|n| !(n.node_type == NodeType::Text && n.text.is_empty()))
        .collect()
}
