//! # fig2tikz
//!
//! Split a rendered plot figure into a text-free image plus an editable TikZ
//! text overlay.
//!
//! ## Why this crate?
//!
//! Plot text rendered by a plotting library rarely matches the document it
//! ends up in: wrong font, wrong size, wrong math style. Rebuilding the plot
//! in TikZ to fix that throws away the plotting library's layout work.
//! Instead this crate keeps the rendered image but strips its text layer
//! (opacity forced to 0, so layout is unchanged) and emits every label as a
//! TikZ node at the equivalent overlay position — LaTeX then typesets the
//! text in the document's own fonts while the plotting library's placement,
//! rotation, and alignment are reused as-is.
//!
//! ## Pipeline Overview
//!
//! ```text
//! rendered figure
//!  │
//!  ├─ 1. Space    derive the device→overlay affine map (0–100 wide)
//!  ├─ 2. Collect  filter to text artists that are non-empty and drawn
//!  ├─ 3. Markup   one \draw … node[…] {…}; per text, plus per-axis frames
//!  ├─ 4. Image    render twice: as-is, then with text alpha zeroed
//!  └─ 5. Write    <path>/images/<file> + <path>/<base>.tex
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fig2tikz::{export, ExportConfig};
//! use fig2tikz::testing::{FigureModel, TextSpec};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Any FigureBackend works; FigureModel is the built-in in-memory one.
//!     let mut figure = FigureModel::new(800.0, 600.0)
//!         .with_text(TextSpec::new("Energy [eV]", 0.5, 0.02));
//!     let summary = export(&mut figure, "energy.pdf", &ExportConfig::default())?;
//!     println!("wrote {}", summary.image_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Coordinate spaces
//!
//! | Space | Origin | Units |
//! |-------|--------|-------|
//! | figure logical | bottom-left | fractions, (0,0)..(1,1) |
//! | device | bottom-left | points/pixels of the rendered canvas |
//! | overlay | bottom-left | 1 unit = 1% of figure width; aspect preserved |
//!
//! The overlay map is rebuilt per figure (figures resize between calls) and
//! asserts the figure has been finalized — an unrendered figure is a
//! programming error, not a recoverable condition.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod export;
pub mod figure;
pub mod overlay;
pub mod testing;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExportConfig, ExportConfigBuilder, RenderOptions};
pub use error::OverlayError;
pub use export::{export, ExportSummary};
pub use figure::{
    AxisScale, AxisView, BackendError, FigureBackend, HorizontalAlignment, TextId, TextSnapshot,
    VerticalAlignment,
};
pub use overlay::space::OverlaySpace;
