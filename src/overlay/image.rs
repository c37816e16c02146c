//! Text-free image export: render the figure with every text invisible.
//!
//! ## Why zero the opacity instead of `visible = false`?
//!
//! Hiding artists outright changes layout — tick labels reserve space, and
//! removing them lets the axes box shift slightly, so the overlay text would
//! no longer line up with the image underneath. Forcing alpha to 0 keeps
//! every artist in the layout while rendering nothing.
//!
//! ## The opacity bracket
//!
//! Saving, zeroing, and restoring the alphas is a scoped mutation on a
//! figure the caller still owns. [`AlphaGuard`] restores the saved values in
//! its `Drop` impl, so a failed second render (disk full, encoder error) can
//! never leave the caller's figure with permanently hidden text.

use crate::config::RenderOptions;
use crate::error::OverlayError;
use crate::figure::{FigureBackend, TextId};
use crate::overlay::collect;
use std::path::Path;
use tracing::debug;

/// Render `figure` to `path` with all text invisible.
///
/// The figure is rendered twice: once as-is to finalize layout (texts only
/// acquire renderers during a render pass, and the collector depends on
/// that), then again with every active text's alpha forced to 0. The first
/// pass writes to the same path and is simply overwritten by the second.
/// Original alphas are restored before returning, on success and failure
/// alike.
pub fn export_without_text<F: FigureBackend>(
    figure: &mut F,
    path: &Path,
    options: &RenderOptions,
) -> Result<(), OverlayError> {
    let mut options = options.clone();
    options.transparent = true;

    // Finalizing pass, with the original text still visible.
    figure
        .render(path, &options)
        .map_err(|source| OverlayError::ImageExportFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let ids: Vec<TextId> = collect::active_texts(figure)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    debug!("Hiding {} active texts for text-free render", ids.len());

    let mut guard = AlphaGuard::hide(figure, &ids);
    let result = guard.render(path, &options);
    drop(guard); // restore alphas before surfacing any render error

    result.map_err(|source| OverlayError::ImageExportFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the given texts' alphas, zeroes them, and restores them on drop.
struct AlphaGuard<'a, F: FigureBackend> {
    figure: &'a mut F,
    saved: Vec<(TextId, Option<f64>)>,
}

impl<'a, F: FigureBackend> AlphaGuard<'a, F> {
    fn hide(figure: &'a mut F, ids: &[TextId]) -> Self {
        let saved: Vec<_> = ids.iter().map(|&id| (id, figure.text(id).alpha)).collect();
        for &id in ids {
            figure.set_text_alpha(id, Some(0.0));
        }
        Self { figure, saved }
    }

    fn render(
        &mut self,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<(), crate::figure::BackendError> {
        self.figure.render(path, options)
    }
}

impl<F: FigureBackend> Drop for AlphaGuard<'_, F> {
    fn drop(&mut self) {
        for (id, alpha) in self.saved.drain(..) {
            self.figure.set_text_alpha(id, alpha);
        }
    }
}
