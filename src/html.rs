//! A small owned element tree used as the render target.
//!
//! Builders produce `Element`s; `Display` serialises them to HTML with text
//! and attribute values escaped. The query helpers exist so that callers (and
//! change handlers) can find parts of an already rendered tree.

use std::fmt::{self, Write};

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order. `None` is a boolean attribute.
    attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a boolean attribute such as `required` or `open`.
    pub fn flag(mut self, name: &str) -> Self {
        self.set_flag(name, true);
        self
    }

    pub fn flag_if(mut self, name: &str, on: bool) -> Self {
        self.set_flag(name, on);
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn set_flag(&mut self, name: &str, on: bool) {
        self.attrs.retain(|(n, _)| n != name);
        if on {
            self.attrs.push((name.to_string(), None));
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Direct child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// All descendants (not including self) with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.has_class(class) {
                found.push(e);
            }
        });
        found
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find_all_by_class(class).into_iter().next()
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        for node in &mut self.children {
            if let Node::Element(e) = node {
                if e.has_class(class) {
                    return Some(e);
                }
                if let Some(found) = e.find_by_class_mut(class) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Drop every descendant element carrying `class`.
    pub fn remove_by_class(&mut self, class: &str) {
        self.children.retain(|node| match node {
            Node::Element(e) => !e.has_class(class),
            Node::Text(_) => true,
        });
        for node in &mut self.children {
            if let Node::Element(e) = node {
                e.remove_by_class(class);
            }
        }
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        for child in self.child_elements() {
            visit(child);
            child.walk(visit);
        }
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            match value {
                Some(v) => write!(out, " {}=\"{}\"", name, escape_attr(v))?,
                None => write!(out, " {}", name)?,
            }
        }
        out.write_char('>')?;
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }
        for node in &self.children {
            match node {
                Node::Text(t) => out.write_str(&escape_text(t))?,
                Node::Element(e) => e.write_html(out)?,
            }
        }
        write!(out, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
