//! An in-memory [`FigureBackend`] for tests and backend adapters.
//!
//! [`FigureModel`] holds exactly the state the pipeline reads from a real
//! plotting library: a device size, a flat list of text artists in tree
//! order, and per-axis transforms. Its `render` writes a small placeholder
//! file and finalizes layout, the two observable effects the pipeline relies
//! on, and records each pass (options and per-text alphas) so tests can
//! assert on the opacity bracket.
//!
//! Adapters bridging a real figure can also populate a `FigureModel` from
//! their object tree instead of implementing [`FigureBackend`] directly.

use crate::config::RenderOptions;
use crate::figure::{
    AxisScale, AxisView, BackendError, FigureBackend, HorizontalAlignment, TextId, TextSnapshot,
    VerticalAlignment,
};
use kurbo::{Affine, Point, Rect};
use std::collections::HashMap;
use std::path::Path;

/// Declarative description of one text artist, consumed by
/// [`FigureModel::with_text`].
#[derive(Debug, Clone)]
pub struct TextSpec {
    content: String,
    position: Point,
    transform: Option<Affine>,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    rotation_degrees: f64,
    alpha: Option<f64>,
    visible: bool,
    suppressed: bool,
}

impl TextSpec {
    /// A visible, centred text anchored at `(x, y)`.
    ///
    /// Without [`with_transform`](Self::with_transform) the position is in
    /// figure fraction coordinates and the figure transform applies.
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            content: content.into(),
            position: Point::new(x, y),
            transform: None,
            horizontal: HorizontalAlignment::Center,
            vertical: VerticalAlignment::Center,
            rotation_degrees: 0.0,
            alpha: None,
            visible: true,
            suppressed: false,
        }
    }

    /// Override the local-to-device transform (the position is then
    /// interpreted in that transform's source space).
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Set horizontal alignment from its object-model label.
    pub fn halign(mut self, label: &str) -> Self {
        self.horizontal = HorizontalAlignment::from_label(label).expect("known label");
        self
    }

    /// Set vertical alignment from its object-model label.
    pub fn valign(mut self, label: &str) -> Self {
        self.vertical = VerticalAlignment::from_label(label).expect("known label");
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the artist as one the library pre-created but never draws (an
    /// unlabeled axis side, an out-of-view tick). It will never acquire a
    /// renderer, even across render passes.
    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }
}

/// Declarative description of one axis.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    data_transform: Affine,
    data_bounds: Rect,
    x_scale: AxisScale,
    y_scale: AxisScale,
}

impl AxisSpec {
    /// A linear/linear axis with the given data-to-device transform and
    /// data bounding box.
    pub fn linear(data_transform: Affine, data_bounds: Rect) -> Self {
        Self {
            data_transform,
            data_bounds,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
        }
    }

    pub fn log_x(mut self) -> Self {
        self.x_scale = AxisScale::Logarithmic;
        self
    }

    pub fn log_y(mut self) -> Self {
        self.y_scale = AxisScale::Logarithmic;
        self
    }

    /// The read view the pipeline consumes.
    pub fn view(&self) -> AxisView {
        AxisView {
            data_transform: self.data_transform,
            data_bounds: self.data_bounds,
            x_scale: self.x_scale,
            y_scale: self.y_scale,
        }
    }
}

struct ModelText {
    spec: TextSpec,
    laid_out: bool,
}

/// In-memory figure: device size, text artists, axes, and a render log.
pub struct FigureModel {
    device_size: (f64, f64),
    origin_offset: (f64, f64),
    texts: Vec<ModelText>,
    axes: Vec<AxisSpec>,
    fail_on_pass: Option<usize>,
    passes: usize,
    pass_options: Vec<RenderOptions>,
    pass_alphas: Vec<HashMap<TextId, Option<f64>>>,
}

impl FigureModel {
    /// A finalized-looking figure with the given device size in points.
    pub fn new(device_width: f64, device_height: f64) -> Self {
        Self {
            device_size: (device_width, device_height),
            origin_offset: (0.0, 0.0),
            texts: Vec::new(),
            axes: Vec::new(),
            fail_on_pass: None,
            passes: 0,
            pass_options: Vec::new(),
            pass_alphas: Vec::new(),
        }
    }

    /// Offset the figure transform's origin, simulating a figure that has
    /// not been finalized. Building an overlay space over it panics.
    pub fn with_origin_offset(mut self, dx: f64, dy: f64) -> Self {
        self.origin_offset = (dx, dy);
        self
    }

    pub fn with_text(mut self, spec: TextSpec) -> Self {
        self.texts.push(ModelText {
            spec,
            laid_out: false,
        });
        self
    }

    pub fn with_axis(mut self, spec: AxisSpec) -> Self {
        self.axes.push(spec);
        self
    }

    /// Make the `pass`-th render call (1-based) fail.
    pub fn fail_render_on_pass(mut self, pass: usize) -> Self {
        self.fail_on_pass = Some(pass);
        self
    }

    /// Assign renderers to all drawable texts without going through a full
    /// render call. Unit-test convenience; `render` does the same.
    pub fn finalize_layout(&mut self) {
        for text in &mut self.texts {
            if !text.spec.suppressed {
                text.laid_out = true;
            }
        }
    }

    /// Number of render calls observed so far.
    pub fn render_passes(&self) -> usize {
        self.passes
    }

    /// The options seen by the most recent render call.
    pub fn last_render_options(&self) -> Option<&RenderOptions> {
        self.pass_options.last()
    }

    /// The alpha one text had at the time of the `pass`-th render (1-based).
    pub fn alpha_at_pass(&self, pass: usize, id: TextId) -> Option<Option<f64>> {
        self.pass_alphas
            .get(pass.checked_sub(1)?)
            .and_then(|m| m.get(&id).copied())
    }
}

impl FigureBackend for FigureModel {
    fn figure_transform(&self) -> Affine {
        Affine::translate(self.origin_offset)
            * Affine::scale_non_uniform(self.device_size.0, self.device_size.1)
    }

    fn texts(&self) -> Vec<TextId> {
        (0..self.texts.len()).map(TextId).collect()
    }

    fn text(&self, id: TextId) -> TextSnapshot {
        let text = &self.texts[id.0];
        TextSnapshot {
            content: text.spec.content.clone(),
            position: text.spec.position,
            transform: text.spec.transform.unwrap_or_else(|| self.figure_transform()),
            horizontal: text.spec.horizontal,
            vertical: text.spec.vertical,
            rotation_degrees: text.spec.rotation_degrees,
            alpha: text.spec.alpha,
            visible: text.spec.visible,
            laid_out: text.laid_out,
        }
    }

    fn set_text_alpha(&mut self, id: TextId, alpha: Option<f64>) {
        self.texts[id.0].spec.alpha = alpha;
    }

    fn axes(&self) -> Vec<AxisView> {
        self.axes.iter().map(AxisSpec::view).collect()
    }

    fn render(&mut self, path: &Path, options: &RenderOptions) -> Result<(), BackendError> {
        self.passes += 1;
        self.pass_options.push(options.clone());
        self.pass_alphas.push(
            self.texts
                .iter()
                .enumerate()
                .map(|(i, t)| (TextId(i), t.spec.alpha))
                .collect(),
        );
        self.finalize_layout();
        if self.fail_on_pass == Some(self.passes) {
            return Err(format!("simulated render failure on pass {}", self.passes).into());
        }
        std::fs::write(path, b"fig2tikz placeholder render")
            .map_err(|e| -> BackendError { Box::new(e) })?;
        Ok(())
    }
}
