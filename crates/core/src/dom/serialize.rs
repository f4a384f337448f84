//! HTML serialization of a [`DomNode`] tree.

use super::{DomNode, NodeType};

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "xmp", "noembed"];

impl DomNode {
    /// Serialize this node (and its subtree) back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.node_type == NodeType::Document
            && self.children.iter().any(|c| c.is_element() && c.tag == "html")
        {
            out.push_str("<!DOCTYPE html>");
        }
        write_node(self, false, &mut out);
        out
    }

    /// Serialize only the children of this node (DOM `innerHTML`).
    pub fn inner_html(&self) -> String {
        let raw = RAW_TEXT_TAGS.contains(&self.tag.as_str());
        let mut out = String::new();
        for child in &self.children {
            write_node(child, raw, &mut out);
        }
        out
    }
}

fn write_node(node: &DomNode, raw_parent: bool, out: &mut String) {
    match node.node_type {
        NodeType::Document => {
            for child in &node.children {
                write_node(child, false, out);
            }
        }
        NodeType::Text => {
            if raw_parent {
                out.push_str(&node.text);
            } else {
                escape_text(&node.text, out);
            }
        }
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(&node.text);
            out.push_str("-->");
        }
        NodeType::Element => {
            out.push('<');
            out.push_str(&node.tag);
            for (name, value) in &node.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&node.tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_TAGS.contains(&node.tag.as_str());
            for child in &node.children {
                write_node(child, raw, out);
            }
            out.push_str("</");
            out.push_str(&node.tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut p = DomNode::new_element("p");
        p.set_attr("title", "a \"quoted\" & more");
        p.set_text_content("1 < 2 & 3");
        assert_eq!(
            p.to_html(),
            r#"<p title="a &quot;quoted&quot; &amp; more">1 &lt; 2 &amp; 3</p>"#
        );
    }

    #[test]
    fn test_void_and_raw_text_elements() {
        let mut div = DomNode::new_element("div");
        div.children.push(DomNode::new_element("img"));
        let mut script = DomNode::new_element("script");
        script.set_text_content("if (a < b) {}");
        div.children.push(script);
        assert_eq!(div.to_html(), "<div><img><script>if (a < b) {}</script></div>");
    }
}
