//! The overlay coordinate space and the transform into it.
//!
//! In the TikZ overlay the horizontal coordinate runs from 0 to 100 and the
//! vertical coordinate from 0 to 100/A, where A is the figure's aspect ratio
//! (width/height). One overlay unit is therefore 1% of the figure width and
//! the aspect ratio is preserved. [`OverlaySpace`] holds the affine map
//! *from* device coordinates *to* that space, to be composed after any
//! transform that already lands in device space.

use crate::figure::FigureBackend;
use kurbo::{Affine, Point};

/// The device-to-overlay affine map for one figure.
///
/// Must be rebuilt per figure: figures can be resized between calls, and the
/// scale factor depends on the device width. Never cache one of these across
/// figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySpace {
    from_device: Affine,
    scale: f64,
}

impl OverlaySpace {
    /// Build the overlay space for a finalized figure.
    ///
    /// # Panics
    /// Asserts that the figure transform maps the logical origin to device
    /// (0,0). A violation means the figure has not been finalized/rendered
    /// yet, which is a programming error in the caller, not a recoverable
    /// condition.
    pub fn for_figure<F: FigureBackend + ?Sized>(figure: &F) -> Self {
        let device = figure.figure_transform();
        let origin = device * Point::ZERO;
        assert!(
            origin.x == 0.0 && origin.y == 0.0,
            "figure transform must map the origin to device (0, 0); \
             render the figure before building the overlay (origin mapped to {origin:?})",
        );
        let corner = device * Point::new(1.0, 1.0);
        let scale = 100.0 / corner.x;
        Self {
            from_device: Affine::scale(scale),
            scale,
        }
    }

    /// The uniform scale factor, 100 / device width.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The device-to-overlay transform itself.
    pub fn from_device(&self) -> Affine {
        self.from_device
    }

    /// Map a point through `local` (anything-to-device) and then into
    /// overlay coordinates.
    pub fn map(&self, local: Affine, point: Point) -> Point {
        (self.from_device * local) * point
    }
}
