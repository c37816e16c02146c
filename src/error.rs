//! Error types for the fig2tikz library.
//!
//! The taxonomy mirrors how failures should reach an interactive script
//! author:
//!
//! * Filesystem and backend failures are recoverable `Err` values of
//!   [`OverlayError`]. The caller sees exactly which path or render call
//!   failed. There is no retry logic anywhere; a directory that already
//!   exists is the one tolerated case and never surfaces as an error.
//!
//! * A figure whose transform has not been finalized (origin not at device
//!   (0,0)) is a programming error, not a runtime condition: the overlay
//!   transform builder panics via `assert!` rather than returning `Err`.
//!
//! * An alignment label outside the known sets means the upstream object
//!   model is a version this crate does not support; it fails with
//!   [`OverlayError::UnknownAlignment`] at the boundary where labels are
//!   parsed, so every match inside the crate stays exhaustive.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the fig2tikz library.
#[derive(Debug, Error)]
pub enum OverlayError {
    // ── Filesystem errors ─────────────────────────────────────────────────
    /// Could not create the target or images directory.
    #[error("Failed to create directory '{path}': {source}\nCheck write permission on the parent directory.")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write the overlay `.tex` file.
    #[error("Failed to write overlay file '{path}': {source}")]
    OverlayWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Backend errors ────────────────────────────────────────────────────
    /// The figure backend failed to render/export to the target path.
    ///
    /// Text opacities are already restored when this is returned; a failed
    /// export never leaves the figure with hidden text.
    #[error("Figure export to '{path}' failed: {source}")]
    ImageExportFailed {
        path: PathBuf,
        #[source]
        source: crate::figure::BackendError,
    },

    // ── Object-model errors ───────────────────────────────────────────────
    /// A text artist reported an alignment label outside the known set.
    ///
    /// This indicates an unsupported plotting-library version; there is no
    /// sensible fallback anchor, so it is fatal to the call.
    #[error("Unknown {kind} alignment '{label}': unsupported plotting-library object model")]
    UnknownAlignment { kind: &'static str, label: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
