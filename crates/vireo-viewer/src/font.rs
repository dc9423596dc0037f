//! Text measurement backed by fontdue.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::rc::Rc;

use fontdue::{Font, FontSettings};

use vireo_common::warning::warn_once;
use vireo_css::{ApproxMeasurer, FontDescriptor, FontSlant, FontWeight, LineMetrics, TextMeasurer};

/// Common system font paths to search for a default serif face.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "/Library/Fonts/Times New Roman.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerif.ttf",
    // Windows
    "C:\\Windows\\Fonts\\times.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
    "/Library/Fonts/Times New Roman Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerifBold.ttf",
    "C:\\Windows\\Fonts\\timesbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Times New Roman Italic.ttf",
    "/Library/Fonts/Times New Roman Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Italic.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif-Italic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerifItalic.ttf",
    "C:\\Windows\\Fonts\\timesi.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Times New Roman Bold Italic.ttf",
    "/Library/Fonts/Times New Roman Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif-BoldItalic.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif-BoldItalic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerifBoldItalic.ttf",
    "C:\\Windows\\Fonts\\timesbi.ttf",
];

/// Memoizing font cache implementing [`TextMeasurer`].
///
/// Faces are loaded from the first matching system font path for the
/// descriptor's weight and slant, and cached per descriptor so repeated
/// measurements during a layout pass hit the map. Family selection is
/// limited to picking the weight/slant variant of the system serif face.
/// When no system font can be loaded, measurement falls back to
/// [`ApproxMeasurer`] ratios so layout still runs headless.
pub struct FontBook {
    faces: RefCell<HashMap<FontDescriptor, Option<Rc<Font>>>>,
    fallback: ApproxMeasurer,
}

impl FontBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            faces: RefCell::new(HashMap::new()),
            fallback: ApproxMeasurer,
        }
    }

    fn face(&self, descriptor: &FontDescriptor) -> Option<Rc<Font>> {
        if let Some(cached) = self.faces.borrow().get(descriptor) {
            return cached.clone();
        }
        let loaded = load_face(descriptor.weight, descriptor.slant).map(Rc::new);
        if loaded.is_none() {
            warn_once(
                "Fonts",
                &format!(
                    "no system font for {:?}/{:?}, using approximate metrics",
                    descriptor.weight, descriptor.slant
                ),
            );
        }
        let _ = self
            .faces
            .borrow_mut()
            .insert(descriptor.clone(), loaded.clone());
        loaded
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for FontBook {
    fn text_width(&self, font: &FontDescriptor, text: &str) -> f32 {
        match self.face(font) {
            // Font::metrics() instead of Font::rasterize(), no bitmaps are
            // needed for measurement.
            Some(face) => text
                .chars()
                .filter(|ch| !ch.is_control())
                .map(|ch| face.metrics(ch, font.size as f32).advance_width)
                .sum(),
            None => self.fallback.text_width(font, text),
        }
    }

    fn line_metrics(&self, font: &FontDescriptor) -> LineMetrics {
        if let Some(face) = self.face(font)
            && let Some(metrics) = face.horizontal_line_metrics(font.size as f32)
        {
            return LineMetrics {
                ascent: metrics.ascent,
                descent: -metrics.descent,
                line_advance: metrics.new_line_size,
            };
        }
        self.fallback.line_metrics(font)
    }
}

fn load_face(weight: FontWeight, slant: FontSlant) -> Option<Font> {
    let paths = match (weight, slant) {
        (FontWeight::Normal, FontSlant::Roman) => FONT_SEARCH_PATHS,
        (FontWeight::Bold, FontSlant::Roman) => FONT_BOLD_SEARCH_PATHS,
        (FontWeight::Normal, FontSlant::Italic) => FONT_ITALIC_SEARCH_PATHS,
        (FontWeight::Bold, FontSlant::Italic) => FONT_BOLD_ITALIC_SEARCH_PATHS,
    };
    for path in paths {
        if let Ok(data) = fs::read(path)
            && let Ok(font) = Font::from_bytes(data, FontSettings::default())
        {
            return Some(font);
        }
    }
    None
}
