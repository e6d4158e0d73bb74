//! Locating form anchors in a hosting page and splicing rendered forms in.
//!
//! This is a tag scanner, not an HTML parser: it looks at opening tags only
//! and does not understand comments or `<script>` bodies.

use regex::Regex;
use std::sync::OnceLock;

/// A placeholder element in the hosting page that should receive a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Value of the anchor's `id`, which names the form to render
    pub id: String,
    pub tag: String,
    /// Byte offset just past the anchor's opening tag
    pub insert_at: usize,
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s[^<>]*?)?)\s*/?>").expect("valid tag regex")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("valid attribute regex")
    })
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attr_regex().captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
    })
}

/// Find every element whose class list contains `anchor_class`, in document order.
pub fn find_anchors(html: &str, anchor_class: &str) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    for caps in tag_regex().captures_iter(html) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let attrs = caps.get(2).map_or("", |m| m.as_str());

        let is_anchor = attribute(attrs, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == anchor_class));
        if !is_anchor {
            continue;
        }

        match attribute(attrs, "id").map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => anchors.push(Anchor {
                id: id.to_string(),
                tag: tag.as_str().to_ascii_lowercase(),
                insert_at: whole.end(),
            }),
            None => log::warn!(
                "Skipping form anchor without id at byte {}",
                whole.start()
            ),
        }
    }

    log::debug!("Found {} form anchors", anchors.len());
    anchors
}

/// Insert each fragment at its byte offset. Offsets must come from
/// `find_anchors` on the same `html`.
pub fn inject(html: &str, fragments: &[(usize, String)]) -> String {
    let mut sorted: Vec<_> = fragments.iter().collect();
    sorted.sort_by_key(|(offset, _)| *offset);

    let extra: usize = sorted.iter().map(|(_, f)| f.len()).sum();
    let mut out = String::with_capacity(html.len() + extra);
    let mut cursor = 0;
    for (offset, fragment) in sorted {
        let offset = (*offset).min(html.len());
        out.push_str(&html[cursor..offset]);
        out.push_str(fragment);
        cursor = offset;
    }
    out.push_str(&html[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="form_anchor" id="contact"></div>
<p class="intro">Hello</p>
<section class='wide form_anchor' id='signup'></section>
<div class="form_anchor"></div>
<div class="form_anchor_like" id="nope"></div>
</body></html>"#;

    #[test]
    fn test_find_anchors_in_order() {
        let anchors = find_anchors(PAGE, "form_anchor");
        let ids: Vec<_> = anchors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["contact", "signup"]);
        assert_eq!(anchors[1].tag, "section");
        assert_eq!(
            &PAGE[..anchors[0].insert_at],
            "<html><body>\n<div class=\"form_anchor\" id=\"contact\">"
        );
    }

    #[test]
    fn test_custom_anchor_class() {
        let anchors = find_anchors(PAGE, "intro");
        assert!(anchors.is_empty(), "intro paragraph has no id");
    }

    #[test]
    fn test_inject_fragments() {
        let anchors = find_anchors(PAGE, "form_anchor");
        let fragments: Vec<_> = anchors
            .iter()
            .rev()
            .map(|a| (a.insert_at, format!("[{}]", a.id)))
            .collect();
        let out = inject(PAGE, &fragments);
        assert!(out.contains(r#"id="contact">[contact]</div>"#));
        assert!(out.contains(r#"id='signup'>[signup]</section>"#));
        assert_eq!(out.len(), PAGE.len() + "[contact]".len() + "[signup]".len());
    }

    #[test]
    fn test_unquoted_attributes() {
        let anchors = find_anchors("<div class=form_anchor id=quick></div>", "form_anchor");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].id, "quick");
    }
}
