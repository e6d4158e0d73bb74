use crate::error::FormError;
use handlebars::Handlebars;
use serde_json::json;
use std::fs;
use std::path::Path;

/// Document shell used when no `page_template` is configured.
pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
</head>
<body>
{{{form}}}
</body>
</html>
"#;

/// Load a page template from disk, checking that it renders the form.
pub fn load_page_template(path: &Path) -> Result<String, FormError> {
    log::debug!("Loading page template from: {:?}", path);
    let content = fs::read_to_string(path)
        .map_err(|e| FormError::Template(format!("failed to load {:?}: {}", path, e)))?;

    if !content.contains("{{{form}}}") {
        return Err(FormError::Template(format!(
            "template {:?} never references '{{{{{{form}}}}}}'",
            path
        )));
    }
    Ok(content)
}

/// Wrap rendered form markup in a full HTML document.
///
/// `title` is escaped; `form_html` is inserted verbatim.
pub fn render_document(template: &str, title: &str, form_html: &str) -> Result<String, FormError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    handlebars
        .render_template(template, &json!({ "title": title, "form": form_html }))
        .map_err(|e| FormError::Template(format!("failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let doc = render_document(
            DEFAULT_PAGE_TEMPLATE,
            "Contact & more",
            r#"<form id="contact"></form>"#,
        )
        .unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Contact &amp; more</title>"));
        assert!(doc.contains(r#"<form id="contact"></form>"#));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variables() {
        let err = render_document("{{missing}}", "t", "f").unwrap_err();
        assert!(matches!(err, FormError::Template(_)));
    }

    #[test]
    fn test_missing_template_file() {
        let err = load_page_template(Path::new("/nonexistent/page.hbs")).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}
