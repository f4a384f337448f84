//! Minimal CSS selector matching engine.
//! Supports: tag, .class, #id, [attr], [attr=v], [attr^=v], [attr$=v], [attr*=v],
//! combinators (descendant, child) and comma-separated selector lists.

use crate::dom::{DomNode, NodePath};

/// A selector list (`a, b`); matches when any member matches.
#[derive(Debug, Clone)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

/// A single selector (one part of a comma-separated list).
#[derive(Debug, Clone)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
    pub specificity: u32,
}

/// A component of a selector chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Matches a tag name: `div`, `button`, etc.
    Tag(String),
    /// Matches a class: `.foo`
    Class(String),
    /// Matches an ID: `#bar`
    Id(String),
    /// Matches an attribute: `[type="submit"]`, `[href^='#']`
    Attribute(String, Option<(AttrOp, String)>),
    /// Descendant combinator (space)
    Descendant,
    /// Child combinator (>)
    Child,
    /// Universal selector (*)
    Universal,
    /// Pseudo-class (stripped, never matches anything extra)
    PseudoClass(String),
}

/// Attribute value operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrOp {
    /// `=`
    Equals,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Contains,
}

impl AttrOp {
    fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            AttrOp::Equals => actual == expected,
            AttrOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttrOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttrOp::Contains => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// Parse a comma-separated selector list.
pub fn parse_selector_list(input: &str) -> Option<SelectorList> {
    let selectors: Vec<Selector> = input
        .split(',')
        .filter_map(|s| parse_selector(s.trim()))
        .collect();
    if selectors.is_empty() {
        None
    } else {
        Some(SelectorList { selectors })
    }
}

/// Parse a single selector string into a Selector.
pub fn parse_selector(input: &str) -> Option<Selector> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    let mut specificity: u32 = 0;
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            '.' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                let class_name = read_ident(&mut chars);
                if !class_name.is_empty() {
                    parts.push(SelectorPart::Class(class_name));
                    specificity += 10;
                }
            }
            '#' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                let id_name = read_ident(&mut chars);
                if !id_name.is_empty() {
                    parts.push(SelectorPart::Id(id_name));
                    specificity += 100;
                }
            }
            '[' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                parts.push(read_attribute(&mut chars));
                specificity += 10;
            }
            ':' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                let pseudo = read_ident(&mut chars);
                // Skip function arguments like :not(...)
                if chars.peek() == Some(&'(') {
                    chars.next();
                    let mut depth = 1;
                    for c in chars.by_ref() {
                        if c == '(' {
                            depth += 1;
                        } else if c == ')' {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                    }
                }
                parts.push(SelectorPart::PseudoClass(pseudo));
                specificity += 10;
            }
            '>' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                skip_whitespace(&mut chars);
                parts.push(SelectorPart::Child);
            }
            ' ' | '\t' | '\n' | '\r' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                skip_whitespace(&mut chars);
                if let Some(&next) = chars.peek() {
                    if next != '>' && next != '+' && next != '~' && next != ',' {
                        parts.push(SelectorPart::Descendant);
                    }
                }
            }
            '*' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                parts.push(SelectorPart::Universal);
            }
            _ => {
                current.push(ch);
                chars.next();
            }
        }
    }

    flush_tag(&mut current, &mut parts, &mut specificity);

    if parts.is_empty() {
        None
    } else {
        Some(Selector { parts, specificity })
    }
}

/// Read `name`, `name=value` or `name<op>=value` up to the closing `]`.
fn read_attribute(chars: &mut std::iter::Peekable<std::str::Chars>) -> SelectorPart {
    let mut attr = String::new();
    let mut op = None;
    let mut value = String::new();

    while let Some(&c) = chars.peek() {
        match c {
            ']' => {
                chars.next();
                break;
            }
            '=' | '^' | '$' | '*' if op.is_none() => {
                chars.next();
                op = Some(match c {
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    '*' => AttrOp::Contains,
                    _ => AttrOp::Equals,
                });
                if c != '=' && chars.peek() == Some(&'=') {
                    chars.next();
                }
                skip_whitespace(chars);
                let quote = chars.peek().copied().filter(|q| *q == '"' || *q == '\'');
                if let Some(q) = quote {
                    chars.next();
                    for vc in chars.by_ref() {
                        if vc == q {
                            break;
                        }
                        value.push(vc);
                    }
                } else {
                    while let Some(&vc) = chars.peek() {
                        if vc == ']' {
                            break;
                        }
                        value.push(vc);
                        chars.next();
                    }
                    value = value.trim().to_string();
                }
            }
            _ => {
                attr.push(c);
                chars.next();
            }
        }
    }

    let attr = attr.trim().to_lowercase();
    SelectorPart::Attribute(attr, op.map(|op| (op, value)))
}

fn flush_tag(current: &mut String, parts: &mut Vec<SelectorPart>, specificity: &mut u32) {
    let tag = current.trim().to_string();
    if !tag.is_empty() {
        parts.push(SelectorPart::Tag(tag.to_lowercase()));
        *specificity += 1;
        current.clear();
    }
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars>) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

impl SelectorList {
    pub fn matches(&self, node: &DomNode, ancestors: &[&DomNode]) -> bool {
        self.selectors.iter().any(|s| s.matches(node, ancestors))
    }
}

impl Selector {
    /// Check whether this selector matches `node`, given its ancestry
    /// (root first, parent last).
    pub fn matches(&self, node: &DomNode, ancestors: &[&DomNode]) -> bool {
        if !node.is_element() || self.parts.is_empty() {
            return false;
        }

        // Split into compound segments, each remembering the combinator that follows it
        let mut segments: Vec<(Vec<&SelectorPart>, Option<&SelectorPart>)> = Vec::new();
        let mut current_segment: Vec<&SelectorPart> = Vec::new();
        for part in &self.parts {
            match part {
                SelectorPart::Descendant | SelectorPart::Child => {
                    if !current_segment.is_empty() {
                        segments.push((current_segment, Some(part)));
                        current_segment = Vec::new();
                    }
                }
                _ => current_segment.push(part),
            }
        }
        if !current_segment.is_empty() {
            segments.push((current_segment, None));
        }

        let Some((last_segment, _)) = segments.last() else {
            return false;
        };
        if !segment_matches(last_segment, node) {
            return false;
        }

        // Walk ancestors for the remaining segments (right to left)
        let mut anc_idx = ancestors.len();
        for seg_idx in (0..segments.len() - 1).rev() {
            let (segment, combinator) = &segments[seg_idx];
            let is_child = matches!(combinator, Some(SelectorPart::Child));

            let mut found = false;
            while anc_idx > 0 {
                anc_idx -= 1;
                if segment_matches(segment, ancestors[anc_idx]) {
                    found = true;
                    break;
                }
                if is_child {
                    return false;
                }
            }
            if !found {
                return false;
            }
        }
        true
    }
}

fn segment_matches(segment: &[&SelectorPart], node: &DomNode) -> bool {
    if !node.is_element() {
        return false;
    }
    segment.iter().all(|part| match part {
        SelectorPart::Tag(t) => t.eq_ignore_ascii_case(&node.tag),
        SelectorPart::Class(c) => node.has_class(c),
        SelectorPart::Id(i) => node.get_attr("id") == Some(i.as_str()),
        SelectorPart::Attribute(name, expected) => match (node.get_attr(name), expected) {
            (Some(actual), Some((op, val))) => op.test(actual, val),
            (Some(_), None) => true,
            (None, _) => false,
        },
        SelectorPart::Universal => true,
        SelectorPart::PseudoClass(_) => true,
        SelectorPart::Descendant | SelectorPart::Child => true,
    })
}

/// Paths (relative to `root`, root excluded) of every descendant matching
/// `selector`, in document order. Like `querySelectorAll`, the result is a
/// snapshot taken before any caller mutation.
pub fn select_paths(root: &DomNode, selector: &SelectorList) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut ancestors = vec![root];
    let mut path = Vec::new();
    collect_paths(root, selector, &mut ancestors, &mut path, &mut out);
    out
}

fn collect_paths<'a>(
    node: &'a DomNode,
    selector: &SelectorList,
    ancestors: &mut Vec<&'a DomNode>,
    path: &mut NodePath,
    out: &mut Vec<NodePath>,
) {
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        if selector.matches(child, ancestors) {
            out.push(path.clone());
        }
        if !child.children.is_empty() {
            ancestors.push(child);
            collect_paths(child, selector, ancestors, path, out);
            ancestors.pop();
        }
        path.pop();
    }
}

/// All descendants of `root` matching `selector`, in document order.
pub fn query_all<'a>(root: &'a DomNode, selector: &str) -> Vec<&'a DomNode> {
    let Some(list) = parse_selector_list(selector) else {
        return Vec::new();
    };
    select_paths(root, &list)
        .iter()
        .filter_map(|p| root.node_at(p))
        .collect()
}

/// Paths of all descendants of `root` matching `selector`, in document order.
pub fn query_all_paths(root: &DomNode, selector: &str) -> Vec<NodePath> {
    match parse_selector_list(selector) {
        Some(list) => select_paths(root, &list),
        None => Vec::new(),
    }
}

/// First descendant of `root` matching `selector`.
pub fn query<'a>(root: &'a DomNode, selector: &str) -> Option<&'a DomNode> {
    query_path(root, selector).and_then(|p| root.node_at(&p))
}

/// Path of the first descendant of `root` matching `selector`.
pub fn query_path(root: &DomNode, selector: &str) -> Option<NodePath> {
    let list = parse_selector_list(selector)?;
    select_paths(root, &list).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute_operators() {
        let sel = parse_selector(".c-nav__link[href^='#']").unwrap();
        assert_eq!(
            sel.parts,
            vec![
                SelectorPart::Class("c-nav__link".to_string()),
                SelectorPart::Attribute("href".to_string(), Some((AttrOp::Prefix, "#".to_string()))),
            ]
        );
        assert_eq!(sel.specificity, 20);
    }

    #[test]
    fn test_compound_attribute_presence() {
        let sel = parse_selector("[data-col][data-row]").unwrap();
        let mut node = DomNode::new_element("div");
        node.set_attr("data-col", "1");
        assert!(!sel.matches(&node, &[]));
        node.set_attr("data-row", "2");
        assert!(sel.matches(&node, &[]));
    }

    #[test]
    fn test_child_combinator_requires_direct_parent() {
        let sel = parse_selector("form > button").unwrap();
        let form = DomNode::new_element("form");
        let div = DomNode::new_element("div");
        let button = DomNode::new_element("button");
        assert!(sel.matches(&button, &[&form]));
        assert!(!sel.matches(&button, &[&form, &div]));
        let desc = parse_selector("form button").unwrap();
        assert!(desc.matches(&button, &[&form, &div]));
    }
}
