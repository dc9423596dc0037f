//! Style property conventions shared by the cascade and layout.

/// The properties that inherit from parent to child, with the fixed default
/// each one takes on the tree root.
///
/// Every element's style map contains all five after cascade resolution.
pub const INHERITED_PROPERTIES: [(&str, &str); 5] = [
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
    ("font-family", "serif"),
];

/// Default font size in pixels, used when a node's `font-size` is missing
/// or unparseable.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// The sentinel `background-color` value that suppresses rect emission.
pub const TRANSPARENT: &str = "transparent";

/// Parse a pixel length like `16px` into its numeric value.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    value.strip_suffix("px")?.trim().parse().ok()
}

/// Parse a percentage like `50%` into its numeric value.
#[must_use]
pub fn parse_percentage(value: &str) -> Option<f32> {
    value.strip_suffix('%')?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px("12.5px"), Some(12.5));
        assert_eq!(parse_px("16"), None);
        assert_eq!(parse_px("1.5em"), None);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("50%"), Some(50.0));
        assert_eq!(parse_percentage("125%"), Some(125.0));
        assert_eq!(parse_percentage("50"), None);
    }
}
