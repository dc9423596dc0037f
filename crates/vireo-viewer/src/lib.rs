//! Document loading and rendering pipeline for the Vireo renderer.
//!
//! # Scope
//!
//! This crate ties the lower layers into one entry point:
//! - **Document Loading** - read markup from a local file or an
//!   `http(s)://` URL
//! - **Stylesheet Collection** - built-in defaults, embedded `<style>`
//!   elements, and linked external stylesheets
//! - **Rendering** - cascade resolution, layout, and paint command
//!   emission against a viewport width
//!
//! A stylesheet that cannot be fetched is skipped with a warning; only an
//! unreadable document or one with no root element fails the load.

pub mod font;

pub use font::FontBook;

use std::fs;
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use vireo_common::net::{FetchError, fetch_text};
use vireo_common::warning::{clear_warnings, warn_once};
use vireo_css::{
    DocumentLayout, PaintCommand, Rule, TextMeasurer, parse_stylesheet, resolve_styles, ua_rules,
};
use vireo_dom::NodeTree;
use vireo_html::{StructuralError, build_tree};

/// Why a document failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}'")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Markup(#[from] StructuralError),
}

/// A document taken all the way from source text to paint commands.
pub struct LoadedDocument {
    /// The path or URL the document came from.
    pub origin: String,
    /// Raw markup source.
    pub markup: String,
    /// Parsed and styled node tree.
    pub tree: NodeTree,
    /// The full rule list applied, defaults first.
    pub rules: Vec<Rule>,
    /// Laid-out box tree.
    pub layout: DocumentLayout,
    /// Paint commands in painter's order.
    pub commands: Vec<PaintCommand>,
}

/// Load and render a document from a file path or URL.
pub fn load_document(
    input: &str,
    viewport_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<LoadedDocument, LoadError> {
    let (markup, base_url) = if is_url(input) {
        (fetch_text(input)?, Some(input))
    } else {
        let content = fs::read_to_string(input).map_err(|source| LoadError::File {
            path: input.to_string(),
            source,
        })?;
        (content, None)
    };
    render(input, markup, base_url, viewport_width, measurer)
}

/// Render markup already in memory. Relative stylesheet links resolve
/// against the current directory.
pub fn render_markup(
    markup: &str,
    viewport_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<LoadedDocument, LoadError> {
    render("inline", markup.to_string(), None, viewport_width, measurer)
}

fn render(
    origin: &str,
    markup: String,
    base_url: Option<&str>,
    viewport_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<LoadedDocument, LoadError> {
    // Warnings are deduplicated per document.
    clear_warnings();

    let mut tree = build_tree(&markup)?;

    let mut rules = ua_rules();
    rules.extend(embedded_rules(&tree));
    for href in stylesheet_links(&tree) {
        match fetch_stylesheet(&href, base_url, origin) {
            Ok(text) => rules.extend(parse_stylesheet(&text)),
            Err(err) => warn_once("Viewer", &format!("skipping stylesheet '{href}': {err:#}")),
        }
    }

    resolve_styles(&mut tree, &rules);
    let layout = DocumentLayout::layout(&tree, measurer, viewport_width);
    let commands = layout.paint(&tree);

    Ok(LoadedDocument {
        origin: origin.to_string(),
        markup,
        tree,
        rules,
        layout,
        commands,
    })
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Concatenated rules from every `<style>` element, in document order.
fn embedded_rules(tree: &NodeTree) -> Vec<Rule> {
    let mut rules = Vec::new();
    for id in tree.flatten() {
        if tree.as_element(id).is_some_and(|e| e.tag == "style") {
            let css: String = tree
                .children(id)
                .iter()
                .filter_map(|&child| tree.as_text(child))
                .collect();
            rules.extend(parse_stylesheet(&css));
        }
    }
    rules
}

/// `href` values of every `<link rel="stylesheet">`, in document order.
fn stylesheet_links(tree: &NodeTree) -> Vec<String> {
    tree.flatten()
        .into_iter()
        .filter_map(|id| tree.as_element(id))
        .filter(|e| e.tag == "link" && e.attr("rel") == Some("stylesheet"))
        .filter_map(|e| e.attr("href").map(str::to_string))
        .collect()
}

/// Fetch one linked stylesheet, resolving relative references against the
/// document's URL or, for local documents, its directory.
fn fetch_stylesheet(href: &str, base_url: Option<&str>, doc_path: &str) -> anyhow::Result<String> {
    if is_url(href) {
        return Ok(fetch_text(href)?);
    }
    if let Some(base) = base_url {
        let url = resolve_href(base, href)
            .with_context(|| format!("cannot resolve against '{base}'"))?;
        return Ok(fetch_text(&url)?);
    }
    let path = Path::new(doc_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(href);
    fs::read_to_string(&path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Join a relative reference onto a base URL.
///
/// Host-relative references (`/x.css`) keep only the scheme and host;
/// others replace the last path segment. Query strings and `..` segments
/// are not handled.
fn resolve_href(base: &str, href: &str) -> Option<String> {
    let scheme_end = base.find("://")? + 3;
    if let Some(rest) = href.strip_prefix('/') {
        let host_end = base[scheme_end..]
            .find('/')
            .map_or(base.len(), |i| scheme_end + i);
        return Some(format!("{}/{}", &base[..host_end], rest));
    }
    let dir_end = base[scheme_end..]
        .rfind('/')
        .map_or(base.len(), |i| scheme_end + i);
    Some(format!("{}/{}", &base[..dir_end], href))
}
