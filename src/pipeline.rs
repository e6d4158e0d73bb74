//! Fetch, validate and render every form anchor of a hosting page.
//!
//! Each anchor is its own failure domain: a fetch or validation failure
//! replaces that anchor's form with an error placeholder and leaves the
//! others alone.

use crate::error::{SchemaFetchError, SchemaValidationError};
use crate::fetch::SchemaSource;
use crate::html::Element;
use crate::json_parser::parse_form_json;
use crate::page::{find_anchors, inject};
use crate::render::{classes, FormRenderer};
use futures_util::future::join_all;

/// What happened to one anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorOutcome {
    Rendered { html: String },
    FetchFailed(SchemaFetchError),
    Invalid(SchemaValidationError),
}

impl AnchorOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, AnchorOutcome::Rendered { .. })
    }

    /// Markup to place in the anchor: the form, or a visible error message.
    pub fn to_html(&self, form_name: &str) -> String {
        match self {
            AnchorOutcome::Rendered { html } => html.clone(),
            AnchorOutcome::FetchFailed(_) => {
                error_placeholder(form_name, "could not be loaded").to_string()
            }
            AnchorOutcome::Invalid(_) => {
                error_placeholder(form_name, "is not configured correctly").to_string()
            }
        }
    }
}

fn error_placeholder(form_name: &str, problem: &str) -> Element {
    Element::new("p")
        .class(classes::ERROR)
        .attr("role", "alert")
        .attr("data-form", form_name)
        .text(format!("Form \"{}\" {}.", form_name, problem))
}

/// Result of rendering a whole page.
#[derive(Debug, Clone)]
pub struct PageRender {
    pub html: String,
    /// `(anchor id, outcome)` in document order
    pub outcomes: Vec<(String, AnchorOutcome)>,
}

impl PageRender {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| !o.is_rendered()).count()
    }
}

/// Fetch, validate and render the form named `form_name`.
pub async fn render_anchor<S: SchemaSource>(
    source: &S,
    renderer: &FormRenderer,
    form_name: &str,
) -> AnchorOutcome {
    let raw = match source.fetch_schema(form_name).await {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("{}", e);
            return AnchorOutcome::FetchFailed(e);
        }
    };

    match parse_form_json(&raw) {
        Ok(form) => {
            if form.name != form_name {
                log::debug!(
                    "Anchor '{}' received schema for form '{}'",
                    form_name,
                    form.name
                );
            }
            AnchorOutcome::Rendered {
                html: renderer.render_form_html(&form),
            }
        }
        Err(e) => {
            log::warn!("Form '{}': {}", form_name, e);
            AnchorOutcome::Invalid(e)
        }
    }
}

/// Render every anchor of `page` concurrently and splice the results in,
/// in anchor order.
pub async fn render_page<S: SchemaSource>(
    page: &str,
    source: &S,
    renderer: &FormRenderer,
) -> PageRender {
    let anchors = find_anchors(page, &renderer.options().anchor_class);

    let outcomes = join_all(
        anchors
            .iter()
            .map(|anchor| render_anchor(source, renderer, &anchor.id)),
    )
    .await;

    let fragments: Vec<_> = anchors
        .iter()
        .zip(&outcomes)
        .map(|(anchor, outcome)| (anchor.insert_at, outcome.to_html(&anchor.id)))
        .collect();

    let render = PageRender {
        html: inject(page, &fragments),
        outcomes: anchors
            .into_iter()
            .map(|a| a.id)
            .zip(outcomes)
            .collect(),
    };

    log::info!(
        "Rendered {} form anchors ({} failed)",
        render.outcomes.len(),
        render.failures()
    );
    render
}
