//! Text collection: filter a figure's text artists down to the active set.
//!
//! Plotting libraries pre-create label artists for axis sides that are not
//! currently labeled and for tick values beyond the current view bounds,
//! then simply never hand them a renderer. Those artists exist in the object
//! tree but are not drawn, and they must never reach the overlay. The filter
//! is therefore twofold: the content must be non-empty after trimming, and
//! the artist must have been through a layout pass (`laid_out`).

use crate::figure::{FigureBackend, TextId, TextSnapshot};

/// All non-empty, actually-drawn text artists, in document-tree order.
///
/// Run a render pass first; artists only acquire a renderer during layout,
/// and an un-rendered figure collects as empty.
pub fn active_texts<F: FigureBackend + ?Sized>(figure: &F) -> Vec<(TextId, TextSnapshot)> {
    figure
        .texts()
        .into_iter()
        .map(|id| (id, figure.text(id)))
        .filter(|(_, snap)| !snap.content.trim().is_empty() && snap.laid_out)
        .collect()
}
