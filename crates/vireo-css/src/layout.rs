//! Block and inline layout over an arena-indexed box tree.
//!
//! Layout mirrors the node tree with one [`BlockBox`] per node, indexed by
//! [`BoxId`] into a flat arena. Block boxes stack vertically and take their
//! parent's width; inline boxes run a greedy line breaker over their text
//! content, driven entirely by an injected [`TextMeasurer`].
//!
//! Coordinates are absolute document pixels with the origin at the top
//! left. The page content sits inside a fixed gutter of [`HSTEP`] on the
//! left and right and [`VSTEP`] on top.

use serde::Serialize;

use vireo_dom::{NodeId, NodeTree, StyleMap};

use crate::paint::PaintCommand;
use crate::style::{DEFAULT_FONT_SIZE_PX, TRANSPARENT, parse_px};

/// Horizontal page gutter in pixels.
pub const HSTEP: f32 = 13.0;
/// Vertical page gutter, and the gap added after a closed paragraph.
pub const VSTEP: f32 = 18.0;
/// Viewport width assumed when the caller does not supply one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// Ratio from CSS pixel size to rendered font size.
const TEXT_SCALE: f32 = 0.75;

/// Tags that force their parent into block layout.
///
/// Per the list of flow-content elements in the WHATWG HTML standard.
pub const BLOCK_ELEMENTS: [&str; 37] = [
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// How a box arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Children become vertically stacked child boxes.
    Block,
    /// The subtree's text flows through the line breaker.
    Inline,
}

/// Decide the layout mode for a node.
///
/// Text is always inline. An element containing at least one
/// [`BLOCK_ELEMENTS`] child lays out as a block; one with only inline
/// children lays out inline; an empty element falls back to block.
#[must_use]
pub fn layout_mode(tree: &NodeTree, node: NodeId) -> LayoutMode {
    if tree.as_text(node).is_some() {
        return LayoutMode::Inline;
    }
    let children = tree.children(node);
    let has_block_child = children.iter().any(|&child| {
        tree.as_element(child)
            .is_some_and(|e| BLOCK_ELEMENTS.contains(&e.tag.as_str()))
    });
    if has_block_child {
        LayoutMode::Block
    } else if children.is_empty() {
        LayoutMode::Block
    } else {
        LayoutMode::Inline
    }
}

/// Font weight, normalized to the two faces the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font slant, normalized likewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontSlant {
    Roman,
    Italic,
}

/// Everything a font backend needs to select a face.
///
/// The size is the rendered size in whole pixels (CSS pixels scaled by
/// [`TEXT_SCALE`] and truncated), which keeps the descriptor hashable for
/// use as a font-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontDescriptor {
    pub size: u32,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub family: String,
}

impl FontDescriptor {
    /// Build a descriptor from a node's resolved style map.
    ///
    /// Missing or unparseable values fall back to a 16px serif roman face.
    /// Only the first comma-separated `font-family` entry is kept, with any
    /// surrounding quotes stripped.
    #[must_use]
    pub fn from_style(style: &StyleMap) -> Self {
        let px = style
            .get("font-size")
            .and_then(|v| parse_px(v))
            .unwrap_or(DEFAULT_FONT_SIZE_PX);
        let weight = match style.get("font-weight").map(String::as_str) {
            Some("bold") => FontWeight::Bold,
            _ => FontWeight::Normal,
        };
        let slant = match style.get("font-style").map(String::as_str) {
            Some("italic") => FontSlant::Italic,
            _ => FontSlant::Roman,
        };
        let family = style
            .get("font-family")
            .and_then(|v| v.split(',').next())
            .map_or("serif", |first| first.trim().trim_matches(['\'', '"']))
            .to_string();
        Self {
            size: (px * TEXT_SCALE) as u32,
            weight,
            slant,
            family,
        }
    }
}

/// Vertical metrics of a font at a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline, as a positive number.
    pub descent: f32,
    /// Recommended baseline-to-baseline distance.
    pub line_advance: f32,
}

/// Measurement backend injected into the line breaker.
///
/// Implementations must be consistent: the same descriptor and text always
/// yield the same numbers within one layout pass.
pub trait TextMeasurer {
    /// Advance width of `text` in the given font, in pixels.
    fn text_width(&self, font: &FontDescriptor, text: &str) -> f32;
    /// Vertical metrics of the given font.
    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics;
}

/// Deterministic ratio-based measurer with no font backend.
///
/// Every glyph is 0.6em wide; ascent, descent, and line advance are fixed
/// fractions of the font size. Used by tests and as the fallback when no
/// system font can be loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproxMeasurer;

impl TextMeasurer for ApproxMeasurer {
    fn text_width(&self, font: &FontDescriptor, text: &str) -> f32 {
        0.6 * font.size as f32 * text.chars().count() as f32
    }

    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics {
        let size = font.size as f32;
        LineMetrics {
            ascent: 0.8 * size,
            descent: 0.2 * size,
            line_advance: 1.2 * size,
        }
    }
}

/// Index of a box in the layout arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoxId(pub usize);

/// One laid-out box, mirroring a single tree node.
#[derive(Debug, Clone)]
pub struct BlockBox {
    /// The node this box lays out.
    pub node: NodeId,
    /// Containing box, `None` for the root box.
    pub parent: Option<BoxId>,
    /// Preceding sibling box, used for vertical stacking.
    pub previous: Option<BoxId>,
    /// Child boxes in document order. Empty for inline boxes.
    pub children: Vec<BoxId>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Positioned text commands. Only inline boxes produce any.
    pub text_runs: Vec<PaintCommand>,
}

/// The laid-out document: the box arena plus the page frame around it.
#[derive(Debug)]
pub struct DocumentLayout {
    boxes: Vec<BlockBox>,
    root_box: BoxId,
    /// Left edge of the content area.
    pub x: f32,
    /// Top edge of the content area.
    pub y: f32,
    /// Content width, the viewport minus both gutters.
    pub width: f32,
    /// Full page height including the top and bottom gutters.
    pub height: f32,
}

impl DocumentLayout {
    /// Lay out a styled node tree against the given viewport width.
    #[must_use]
    pub fn layout(tree: &NodeTree, measurer: &dyn TextMeasurer, viewport_width: f32) -> Self {
        let mut doc = Self {
            boxes: Vec::new(),
            root_box: BoxId(0),
            x: HSTEP,
            y: VSTEP,
            width: viewport_width - 2.0 * HSTEP,
            height: 0.0,
        };
        doc.root_box = doc.alloc(tree.root(), None, None);
        doc.layout_box(tree, measurer, doc.root_box);
        doc.height = doc.boxes[doc.root_box.0].height + 2.0 * VSTEP;
        doc
    }

    /// The box mirroring the tree root.
    #[must_use]
    pub fn root_box(&self) -> BoxId {
        self.root_box
    }

    /// Look up a box by id.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this layout.
    #[must_use]
    pub fn get(&self, id: BoxId) -> &BlockBox {
        &self.boxes[id.0]
    }

    /// All boxes in allocation order.
    pub fn boxes(&self) -> impl Iterator<Item = &BlockBox> {
        self.boxes.iter()
    }

    fn alloc(&mut self, node: NodeId, parent: Option<BoxId>, previous: Option<BoxId>) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(BlockBox {
            node,
            parent,
            previous,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            text_runs: Vec::new(),
        });
        id
    }

    fn layout_box(&mut self, tree: &NodeTree, measurer: &dyn TextMeasurer, id: BoxId) {
        // Position comes from the containing box and the preceding sibling,
        // both already laid out. The root box positions against the page
        // frame.
        let (parent_x, parent_y, parent_width) = match self.boxes[id.0].parent {
            Some(p) => {
                let pb = &self.boxes[p.0];
                (pb.x, pb.y, pb.width)
            }
            None => (self.x, self.y, self.width),
        };
        let stack_y = self.boxes[id.0].previous.map(|p| {
            let pb = &self.boxes[p.0];
            pb.y + pb.height
        });

        let node = {
            let b = &mut self.boxes[id.0];
            b.x = parent_x;
            b.y = stack_y.unwrap_or(parent_y);
            b.width = parent_width;
            b.node
        };

        match layout_mode(tree, node) {
            LayoutMode::Block => {
                let mut previous = None;
                let mut child_boxes = Vec::new();
                for &child in tree.children(node) {
                    let cb = self.alloc(child, Some(id), previous);
                    child_boxes.push(cb);
                    previous = Some(cb);
                }
                self.boxes[id.0].children.clone_from(&child_boxes);
                for &cb in &child_boxes {
                    self.layout_box(tree, measurer, cb);
                }
                let height = child_boxes.iter().map(|c| self.boxes[c.0].height).sum();
                self.boxes[id.0].height = height;
            }
            LayoutMode::Inline => {
                let b = &self.boxes[id.0];
                let mut cursor = InlineCursor::new(b.x, b.y, b.width);
                cursor.walk(tree, measurer, node);
                cursor.flush();
                let b = &mut self.boxes[id.0];
                b.height = cursor.cursor_y;
                b.text_runs = cursor.commands;
            }
        }
    }

    /// Emit paint commands for the whole page, in painter's order: each
    /// box's own background and text before its children.
    #[must_use]
    pub fn paint(&self, tree: &NodeTree) -> Vec<PaintCommand> {
        let mut out = Vec::new();
        self.paint_box(tree, self.root_box, &mut out);
        out
    }

    fn paint_box(&self, tree: &NodeTree, id: BoxId, out: &mut Vec<PaintCommand>) {
        let b = &self.boxes[id.0];
        let bgcolor = tree
            .style(b.node)
            .get("background-color")
            .map_or(TRANSPARENT, String::as_str);
        if bgcolor != TRANSPARENT {
            out.push(PaintCommand::Rect {
                left: b.x,
                top: b.y,
                right: b.x + b.width,
                bottom: b.y + b.height,
                color: bgcolor.to_string(),
            });
        }
        out.extend(b.text_runs.iter().cloned());
        for &child in &b.children {
            self.paint_box(tree, child, out);
        }
    }
}

/// One word buffered on the current, not-yet-flushed line.
struct LineItem {
    x: f32,
    text: String,
    font: FontDescriptor,
    color: String,
    metrics: LineMetrics,
}

/// Line-breaking state for one inline box.
///
/// Cursor coordinates are relative to the box; flushed commands are
/// absolute. Words are buffered per line so the baseline can be computed
/// from the tallest font actually on the line.
struct InlineCursor {
    origin_x: f32,
    origin_y: f32,
    width: f32,
    cursor_x: f32,
    cursor_y: f32,
    line: Vec<LineItem>,
    commands: Vec<PaintCommand>,
}

impl InlineCursor {
    fn new(origin_x: f32, origin_y: f32, width: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            cursor_x: 0.0,
            cursor_y: 0.0,
            line: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn walk(&mut self, tree: &NodeTree, measurer: &dyn TextMeasurer, node: NodeId) {
        if let Some(text) = tree.as_text(node) {
            // Text styling lives on the enclosing element.
            let owner = tree.parent(node).unwrap_or(node);
            let style = tree.style(owner);
            let font = FontDescriptor::from_style(style);
            let color = style.get("color").map_or("black", String::as_str).to_string();
            for word in text.split_whitespace() {
                self.word(measurer, &font, &color, word);
            }
        } else if let Some(element) = tree.as_element(node) {
            let tag = element.tag.clone();
            if tag == "br" {
                self.flush();
            }
            for &child in tree.children(node) {
                self.walk(tree, measurer, child);
            }
            if tag == "p" || tag == "div" {
                self.flush();
                self.cursor_y += VSTEP;
            }
        }
    }

    fn word(&mut self, measurer: &dyn TextMeasurer, font: &FontDescriptor, color: &str, word: &str) {
        let width = measurer.text_width(font, word);
        // Break before placing, so a word never starts a line it cannot
        // fit on. A word wider than the box still occupies a line alone.
        if self.cursor_x + width > self.width {
            self.flush();
        }
        self.line.push(LineItem {
            x: self.cursor_x,
            text: word.to_string(),
            font: font.clone(),
            color: color.to_string(),
            metrics: measurer.line_metrics(font),
        });
        self.cursor_x += width + measurer.text_width(font, " ");
    }

    /// Commit the buffered line: align every word on a shared baseline set
    /// by the tallest ascent, emit its command, and advance past the
    /// deepest descent. Leading is 25% above and below.
    fn flush(&mut self) {
        if self.line.is_empty() {
            self.cursor_x = 0.0;
            return;
        }
        let max_ascent = self
            .line
            .iter()
            .map(|item| item.metrics.ascent)
            .fold(0.0f32, f32::max);
        let max_descent = self
            .line
            .iter()
            .map(|item| item.metrics.descent)
            .fold(0.0f32, f32::max);
        let baseline = self.cursor_y + 1.25 * max_ascent;
        for item in self.line.drain(..) {
            let y = baseline - item.metrics.ascent;
            self.commands.push(PaintCommand::Text {
                x: self.origin_x + item.x,
                y: self.origin_y + y,
                top: self.origin_y + y,
                bottom: self.origin_y + y + item.metrics.line_advance,
                text: item.text,
                font: item.font,
                color: item.color,
            });
        }
        self.cursor_y = baseline + 1.25 * max_descent;
        self.cursor_x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_dom::{ElementData, NodeKind};

    fn style_of(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_text_is_inline() {
        let mut tree = NodeTree::with_root(ElementData::new("p", Vec::new()));
        let text = tree.alloc(NodeKind::Text("hi".to_string()));
        tree.append_child(tree.root(), text);
        assert_eq!(layout_mode(&tree, text), LayoutMode::Inline);
        assert_eq!(layout_mode(&tree, tree.root()), LayoutMode::Inline);
    }

    #[test]
    fn test_block_child_forces_block_mode() {
        let mut tree = NodeTree::with_root(ElementData::new("body", Vec::new()));
        let p = tree.alloc(NodeKind::Element(ElementData::new("p", Vec::new())));
        tree.append_child(tree.root(), p);
        assert_eq!(layout_mode(&tree, tree.root()), LayoutMode::Block);
    }

    #[test]
    fn test_empty_element_is_block() {
        let tree = NodeTree::with_root(ElementData::new("div", Vec::new()));
        assert_eq!(layout_mode(&tree, tree.root()), LayoutMode::Block);
    }

    #[test]
    fn test_descriptor_scales_and_truncates_size() {
        let style = style_of(&[("font-size", "16px")]);
        assert_eq!(FontDescriptor::from_style(&style).size, 12);
        let style = style_of(&[("font-size", "19px")]);
        // 19 * 0.75 = 14.25, truncated.
        assert_eq!(FontDescriptor::from_style(&style).size, 14);
    }

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = FontDescriptor::from_style(&StyleMap::new());
        assert_eq!(descriptor.size, 12);
        assert_eq!(descriptor.weight, FontWeight::Normal);
        assert_eq!(descriptor.slant, FontSlant::Roman);
        assert_eq!(descriptor.family, "serif");
    }

    #[test]
    fn test_descriptor_reads_weight_slant_family() {
        let style = style_of(&[
            ("font-weight", "bold"),
            ("font-style", "italic"),
            ("font-family", "\"Liberation Serif\", serif"),
        ]);
        let descriptor = FontDescriptor::from_style(&style);
        assert_eq!(descriptor.weight, FontWeight::Bold);
        assert_eq!(descriptor.slant, FontSlant::Italic);
        assert_eq!(descriptor.family, "Liberation Serif");
    }
}
