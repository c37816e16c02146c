//! The figure object model seen through a narrow capability trait.
//!
//! The crate never owns a figure. The plotting library that rendered it does,
//! and its object graph (nested axes, tick artists, legends) is far richer
//! than anything the overlay pipeline needs. [`FigureBackend`] is the whole
//! contract: enumerate text artists, read their attributes, toggle their
//! opacity, read per-axis transforms, and render to a file. Any backend that
//! can answer those questions can drive the pipeline.
//!
//! Alignments are closed enums. The plotting libraries this models report
//! alignment as strings, so [`HorizontalAlignment::from_label`] and
//! [`VerticalAlignment::from_label`] bridge the gap at the boundary; a label
//! outside the known set means an unsupported object-model version and fails
//! with [`OverlayError::UnknownAlignment`]. Inside the crate every match on
//! these enums is exhaustive.

use crate::config::RenderOptions;
use crate::error::OverlayError;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type backends may return from [`FigureBackend::render`].
///
/// Boxed because render failures originate in foreign code (a plotting
/// library, an image encoder) whose error types this crate cannot name.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Identity of one text artist within its figure.
///
/// Stable for the lifetime of the figure object; used to key the saved
/// opacities during text-free export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextId(pub usize);

/// Horizontal alignment of a text artist relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    /// Text starts at the anchor and runs right ("left" in matplotlib terms).
    Start,
    /// Text is centred on the anchor.
    Center,
    /// Text ends at the anchor ("right" in matplotlib terms).
    End,
}

impl HorizontalAlignment {
    /// Parse a plotting-library alignment label.
    ///
    /// # Errors
    /// [`OverlayError::UnknownAlignment`] for any label outside the three
    /// known values, which indicates an unsupported upstream object model.
    pub fn from_label(label: &str) -> Result<Self, OverlayError> {
        match label {
            "left" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::End),
            other => Err(OverlayError::UnknownAlignment {
                kind: "horizontal",
                label: other.to_string(),
            }),
        }
    }

    /// The label used by the source object model, also the value TikZ's
    /// `align=` option expects for multi-line nodes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "left",
            Self::Center => "center",
            Self::End => "right",
        }
    }
}

/// Vertical alignment of a text artist relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Bottom,
    Center,
    Baseline,
    CenterBaseline,
}

impl VerticalAlignment {
    /// Parse a plotting-library alignment label.
    ///
    /// # Errors
    /// [`OverlayError::UnknownAlignment`] for any label outside the five
    /// known values.
    pub fn from_label(label: &str) -> Result<Self, OverlayError> {
        match label {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "center" => Ok(Self::Center),
            "baseline" => Ok(Self::Baseline),
            "center_baseline" => Ok(Self::CenterBaseline),
            other => Err(OverlayError::UnknownAlignment {
                kind: "vertical",
                label: other.to_string(),
            }),
        }
    }
}

/// Read view of one text artist.
///
/// Everything the converter needs, captured at collection time. `position`
/// is the artist's logical anchor point; `transform` maps it into device
/// space. `laid_out` is set once the artist has been through a render pass
/// and acquired a renderer — pre-created labels for inactive axis sides or
/// out-of-view ticks stay `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSnapshot {
    pub content: String,
    pub position: Point,
    pub transform: Affine,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
    pub rotation_degrees: f64,
    /// `None` means the artist inherits the default opacity (fully opaque).
    pub alpha: Option<f64>,
    pub visible: bool,
    pub laid_out: bool,
}

/// Whether an axis dimension uses a linear or logarithmic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
}

impl AxisScale {
    pub fn is_logarithmic(self) -> bool {
        matches!(self, Self::Logarithmic)
    }
}

/// Read view of one axis: its data-to-device transform, the bounding
/// rectangle of the plotted data, and the scale kind per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisView {
    pub data_transform: Affine,
    pub data_bounds: Rect,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

/// Capability interface over a rendered figure.
///
/// One figure per value; calls are synchronous and single-writer. The
/// pipeline reads text attributes, temporarily zeroes text opacity during
/// export, and asks the backend to render — nothing else.
pub trait FigureBackend {
    /// Transform from figure logical space ((0,0)..(1,1)) to device space.
    ///
    /// Must map the origin to device (0,0) once the figure is finalized;
    /// [`crate::OverlaySpace::for_figure`] asserts this.
    fn figure_transform(&self) -> Affine;

    /// All text artists, in document-tree traversal order.
    fn texts(&self) -> Vec<TextId>;

    /// Read one text artist's attributes.
    fn text(&self, id: TextId) -> TextSnapshot;

    /// Set one text artist's opacity. `None` restores the inherited default.
    fn set_text_alpha(&mut self, id: TextId, alpha: Option<f64>);

    /// All axes of the figure.
    fn axes(&self) -> Vec<AxisView>;

    /// Render the figure to `path` (format inferred from the extension).
    ///
    /// A render pass finalizes layout: afterwards every currently-drawn text
    /// artist must report `laid_out == true` in its snapshot.
    fn render(&mut self, path: &Path, options: &RenderOptions) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_labels_round_trip() {
        for label in ["left", "center", "right"] {
            let a = HorizontalAlignment::from_label(label).unwrap();
            assert_eq!(a.label(), label);
        }
    }

    #[test]
    fn vertical_labels_parse() {
        assert_eq!(
            VerticalAlignment::from_label("center_baseline").unwrap(),
            VerticalAlignment::CenterBaseline
        );
        assert_eq!(
            VerticalAlignment::from_label("baseline").unwrap(),
            VerticalAlignment::Baseline
        );
    }

    #[test]
    fn unknown_horizontal_label_is_fatal() {
        let err = HorizontalAlignment::from_label("justified").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("horizontal"), "got: {msg}");
        assert!(msg.contains("justified"), "got: {msg}");
    }

    #[test]
    fn unknown_vertical_label_is_fatal() {
        let err = VerticalAlignment::from_label("middle").unwrap_err();
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn axis_scale_predicate() {
        assert!(AxisScale::Logarithmic.is_logarithmic());
        assert!(!AxisScale::Linear.is_logarithmic());
    }
}
