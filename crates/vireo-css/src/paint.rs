//! Paint commands: the flat drawing primitives layout produces.
//!
//! Commands carry absolute document coordinates and their full vertical
//! extent, so a presenter can scroll by filtering with [`cull`] and
//! translating y by the scroll offset. The set is closed and small by
//! intent; a backend needs nothing but text runs and filled rects.

use serde::Serialize;

use crate::layout::FontDescriptor;

/// One drawing primitive, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaintCommand {
    /// A single word drawn at `(x, y)`, the top-left of its glyph box.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontDescriptor,
        color: String,
        /// Top of the vertical extent, equal to `y`.
        top: f32,
        /// Bottom of the vertical extent, `y` plus the font's line advance.
        bottom: f32,
    },
    /// A filled rectangle, used for backgrounds.
    Rect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        color: String,
    },
}

impl PaintCommand {
    /// Top of the command's vertical extent.
    #[must_use]
    pub fn top(&self) -> f32 {
        match self {
            PaintCommand::Text { top, .. } | PaintCommand::Rect { top, .. } => *top,
        }
    }

    /// Bottom of the command's vertical extent.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        match self {
            PaintCommand::Text { bottom, .. } | PaintCommand::Rect { bottom, .. } => *bottom,
        }
    }
}

/// Commands at least partially inside the window starting `scroll` pixels
/// down, preserving paint order. A command touching either window edge is
/// kept.
pub fn cull(
    commands: &[PaintCommand],
    scroll: f32,
    viewport_height: f32,
) -> impl Iterator<Item = &PaintCommand> {
    commands
        .iter()
        .filter(move |cmd| cmd.bottom() >= scroll && cmd.top() <= scroll + viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f32, bottom: f32) -> PaintCommand {
        PaintCommand::Rect {
            left: 0.0,
            top,
            right: 10.0,
            bottom,
            color: "gray".to_string(),
        }
    }

    #[test]
    fn test_cull_drops_commands_outside_window() {
        let commands = vec![rect(0.0, 50.0), rect(100.0, 150.0), rect(900.0, 950.0)];
        let visible: Vec<_> = cull(&commands, 60.0, 600.0).collect();
        assert_eq!(visible, vec![&commands[1]]);
    }

    #[test]
    fn test_cull_keeps_commands_touching_edges() {
        let commands = vec![rect(0.0, 60.0), rect(660.0, 700.0)];
        let visible: Vec<_> = cull(&commands, 60.0, 600.0).collect();
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_cull_preserves_order() {
        let commands = vec![rect(10.0, 20.0), rect(5.0, 30.0), rect(0.0, 15.0)];
        let visible: Vec<_> = cull(&commands, 0.0, 100.0).collect();
        assert_eq!(visible, commands.iter().collect::<Vec<_>>());
    }
}
