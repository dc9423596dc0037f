//! Stylesheet parsing, cascade resolution, layout, and paint emission for
//! the Vireo renderer.
//!
//! # Scope
//!
//! This crate implements everything between a parsed node tree and a list
//! of positioned paint commands:
//! - **Stylesheet Parser** - an error-recovering scanner producing an
//!   ordered rule list
//! - **Selectors** - tag, class, and descendant selectors with numeric
//!   specificity
//! - **Cascade Resolver** - inheritance plus ascending-specificity rule
//!   application plus inline `style` attributes, mutating per-node style
//!   maps in place
//! - **Layout Engine** - block/inline flow with greedy, font-metric-driven
//!   line breaking over an arena-indexed box tree
//! - **Paint Commands** - absolutely positioned text and rect primitives
//!   with vertical extents for viewport culling
//! - **User-Agent Stylesheet** - embedded default rules seeded into every
//!   document's rule list
//!
//! Text measurement is injected through [`TextMeasurer`] so the layout
//! engine stays independent of any concrete font backend.

pub mod cascade;
pub mod layout;
pub mod paint;
pub mod parser;
pub mod selector;
pub mod style;
pub mod ua;

pub use cascade::resolve_styles;
pub use layout::{
    ApproxMeasurer, BlockBox, BoxId, DocumentLayout, FontDescriptor, FontSlant, FontWeight,
    LayoutMode, LineMetrics, TextMeasurer, layout_mode,
};
pub use paint::{PaintCommand, cull};
pub use parser::{Rule, StylesheetParser, parse_inline_style, parse_stylesheet};
pub use selector::Selector;
pub use style::{DEFAULT_FONT_SIZE_PX, INHERITED_PROPERTIES};
pub use ua::{UA_STYLESHEET, ua_rules};
