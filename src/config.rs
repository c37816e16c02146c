//! Configuration types for figure export.
//!
//! All export behaviour is controlled through [`ExportConfig`], built via its
//! [`ExportConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config across a batch of figures and to diff two runs when
//! their overlays differ.
//!
//! [`RenderOptions`] is the pass-through bundle handed to the backend's
//! render call; the library itself only ever forces `transparent` on during
//! text-free export and otherwise forwards it untouched.

use crate::error::OverlayError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options forwarded to [`crate::figure::FigureBackend::render`].
///
/// These mirror the keyword arguments a plotting library's save call takes.
/// The overlay pipeline forces `transparent` to `true` for the text-free
/// artifact so the document background shows through where text was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Render with a transparent background. Forced on during export.
    pub transparent: bool,
    /// Raster resolution in dots per inch; `None` lets the backend decide.
    pub dpi: Option<u32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            transparent: true,
            dpi: None,
        }
    }
}

/// Configuration for exporting one figure as image + TikZ overlay.
///
/// Built via [`ExportConfig::builder()`] or [`ExportConfig::default()`].
///
/// # Example
/// ```rust
/// use fig2tikz::ExportConfig;
///
/// let config = ExportConfig::builder()
///     .path("paper/plots")
///     .overlay_width(r"\columnwidth")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory for the overlay file. The image goes into an
    /// `images/` subdirectory of this path. Default: `plots`.
    pub path: PathBuf,

    /// Skip the overlay file and refresh only the text-free image. Default: false.
    ///
    /// Useful once the `.tex` overlay has been hand-edited and the figure
    /// itself needs a tweak without clobbering those edits.
    pub image_only: bool,

    /// Width expression for the `tikzoverlay*` environment.
    /// Default: `0.8\textwidth`.
    pub overlay_width: String,

    /// Options forwarded to the backend's render call.
    pub render: RenderOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("plots"),
            image_only: false,
            overlay_width: r"0.8\textwidth".to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Create a new builder for `ExportConfig`.
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExportConfig`].
#[derive(Debug)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    pub fn image_only(mut self, v: bool) -> Self {
        self.config.image_only = v;
        self
    }

    pub fn overlay_width(mut self, width: impl Into<String>) -> Self {
        self.config.overlay_width = width.into();
        self
    }

    pub fn transparent(mut self, v: bool) -> Self {
        self.config.render.transparent = v;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.render.dpi = Some(dpi);
        self
    }

    pub fn render(mut self, options: RenderOptions) -> Self {
        self.config.render = options;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExportConfig, OverlayError> {
        let c = &self.config;
        if c.path.as_os_str().is_empty() {
            return Err(OverlayError::InvalidConfig(
                "Target path must not be empty".into(),
            ));
        }
        if c.overlay_width.trim().is_empty() {
            return Err(OverlayError::InvalidConfig(
                "Overlay width must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
