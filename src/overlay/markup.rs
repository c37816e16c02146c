//! Text-to-markup conversion: one TikZ statement per drawn text artist.
//!
//! ## The grammar
//!
//! Every statement has the shape
//!
//! ```text
//!   \draw (x, y) node[options] {content};
//! ```
//!
//! with 6-decimal fixed-point coordinates in overlay units. The node options
//! re-express the artist's alignment as a TikZ anchor: an artist whose text
//! *starts* at the anchor needs the node placed to the `right` of the point,
//! and so on. A rotated artist instead carries a single `rotate=` option —
//! TikZ rotates about the node centre, so mixing rotation with alignment
//! anchors gives poor placement and rotation wins outright.
//!
//! ## Sanitisation
//!
//! Tick labels arrive with two artefacts of the source renderer: a
//! `\mathdefault` font-selection token that has no meaning outside it, and
//! U+2212 MINUS SIGN where TeX wants a plain hyphen. After cleanup, any
//! string that parses as a float is wrapped in `$…$` so numeric tick labels
//! render in math mode. That is a heuristic, not a classifier: a category
//! label that happens to look numeric gets wrapped too.

use crate::figure::{AxisView, HorizontalAlignment, TextSnapshot, VerticalAlignment};
use crate::overlay::space::OverlaySpace;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_MATHDEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\mathdefault").unwrap());

/// Convert one text artist into a TikZ draw statement.
///
/// Returns `None` for invisible artists; they emit nothing. Pure function of
/// the snapshot and the overlay space, so re-running it on an unchanged
/// artist yields a byte-identical statement.
pub fn statement(text: &TextSnapshot, space: &OverlaySpace) -> Option<String> {
    if !text.visible {
        return None;
    }

    let horizontal = match text.horizontal {
        HorizontalAlignment::Start => "right",
        HorizontalAlignment::Center => "",
        HorizontalAlignment::End => "left",
    };
    let vertical = match text.vertical {
        VerticalAlignment::Top => "below",
        VerticalAlignment::Bottom => "above",
        VerticalAlignment::Center
        | VerticalAlignment::Baseline
        | VerticalAlignment::CenterBaseline => "",
    };
    let mut options = format!("{vertical} {horizontal}");
    if text.rotation_degrees != 0.0 {
        options = format!("rotate={:.1}", text.rotation_degrees);
    }

    let mut content = sanitize(&text.content);

    let anchor = space.map(text.transform, text.position);
    if content.contains('\n') {
        options = format!("{options},align={}", text.horizontal.label());
        content = content.replace('\n', " \\\\\n");
    }

    Some(format!(
        "  \\draw ({:.6}, {:.6}) node[{}] {{{}}};",
        anchor.x,
        anchor.y,
        options.trim(),
        content
    ))
}

/// Clean up a raw text string for TeX and apply the numeric-tick heuristic.
pub fn sanitize(raw: &str) -> String {
    let cleaned = RE_MATHDEFAULT.replace_all(raw, "");
    let cleaned = cleaned.replace('\u{2212}', "-");
    // Numeric tick labels render in math mode. Heuristic: may also wrap
    // numeric-looking category labels.
    if cleaned.trim().parse::<f64>().is_ok() {
        format!("${cleaned}$")
    } else {
        cleaned
    }
}

/// Emit the per-axis coordinate-frame annotation.
///
/// For linear axes this opens a scoped frame whose shift/scale is the affine
/// data-to-overlay map, letting downstream TikZ authors draw annotations
/// directly in data coordinates. A commented-out red rectangle over the data
/// bounds is included as a registration aid. A logarithmic dimension makes
/// the data-to-overlay map non-affine, so only a comment is emitted.
pub fn axis_annotation(axis: &AxisView, space: &OverlaySpace) -> String {
    if axis.x_scale.is_logarithmic() || axis.y_scale.is_logarithmic() {
        return "  % No internal axis coordinate system as there is a log scale.".to_string();
    }
    let data_to_overlay = space.from_device() * axis.data_transform;
    let shift = data_to_overlay * kurbo::Point::ZERO;
    let unit = data_to_overlay * kurbo::Point::new(1.0, 1.0);
    let (xscale, yscale) = (unit.x - shift.x, unit.y - shift.y);
    let b = axis.data_bounds;
    format!(
        "  % Internal axis coordinate system\n\
         \x20 \\begin{{scope}}[shift={{({:.8}, {:.8})}},\n\
         \x20               xscale={:.8}, yscale={:.8}]\n\
         \x20     %\\draw[red] ({:.6}, {:.6}) rectangle ({:.6}, {:.6});\n\
         \x20 \\end{{scope}}",
        shift.x, shift.y, xscale, yscale, b.x0, b.y0, b.x1, b.y1
    )
}
