//! Inline `style` attribute declarations: the slice of CSSOM the binders need
//! (`style.setProperty` / `getPropertyValue`).

use std::fmt;

/// Ordered `property: value` pairs from a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclarations {
    decls: Vec<(String, String)>,
}

impl StyleDeclarations {
    /// Parse a declaration block. Semicolons inside quotes or parentheses
    /// (e.g. `url("data:image/png;base64,...")`) do not split declarations.
    pub fn parse(style_str: &str) -> Self {
        let mut decls: Vec<(String, String)> = Vec::new();
        for declaration in split_declarations(style_str) {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let property = normalize_name(property);
            let value = value.trim();
            if property.is_empty() {
                continue;
            }
            match decls.iter_mut().find(|(p, _)| *p == property) {
                Some(existing) => existing.1 = value.to_string(),
                None => decls.push((property, value.to_string())),
            }
        }
        Self { decls }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = normalize_name(name);
        self.decls
            .iter()
            .find(|(p, _)| *p == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, keeping its position when it already exists.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = normalize_name(name);
        match self.decls.iter_mut().find(|(p, _)| *p == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.decls.push((name, value.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let name = normalize_name(name);
        let index = self.decls.iter().position(|(p, _)| *p == name)?;
        Some(self.decls.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}

/// Custom properties (`--name`) are case-sensitive; everything else is not.
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

fn split_declarations(style_str: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style_str.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => {
                    parts.push(&style_str[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&style_str[start..]);
    parts
}
