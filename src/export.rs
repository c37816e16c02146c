//! Top-level export: image + overlay, written into the target directory.
//!
//! One call handles one figure, synchronously. The layout it produces is the
//! one a LaTeX document expects to `\input`:
//!
//! ```text
//! <path>/images/<file_name>   text-free image (PDF/PNG per extension)
//! <path>/<base_name>.tex      TikZ overlay (unless image_only)
//! ```
//!
//! The overlay file is regenerated from scratch on every call, fully
//! overwriting prior content. `image_only` exists for the opposite workflow:
//! the `.tex` has been hand-tuned and only the image should be refreshed.

use crate::config::ExportConfig;
use crate::error::OverlayError;
use crate::figure::FigureBackend;
use crate::overlay::{collect, image, markup, space::OverlaySpace};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What one [`export`] call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Path of the text-free image artifact.
    pub image_path: PathBuf,
    /// Path of the overlay file; `None` when `image_only` was set.
    pub overlay_path: Option<PathBuf>,
    /// Number of draw statements emitted (0 when `image_only`).
    pub statements: usize,
    /// Number of per-axis annotations emitted (0 when `image_only`).
    pub axes: usize,
}

/// Export a rendered figure as a text-free image plus a TikZ text overlay.
///
/// `file_name` names the image artifact, extension included (the backend
/// infers the format from it); the overlay file shares its stem with a
/// `.tex` extension. Directory creation is idempotent and a creation race
/// with another process is tolerated.
///
/// # Errors
/// Filesystem failures (other than already-existing directories) and backend
/// render failures propagate immediately; there are no retries. The figure's
/// text opacities are unchanged on return regardless of outcome.
pub fn export<F: FigureBackend>(
    figure: &mut F,
    file_name: &str,
    config: &ExportConfig,
) -> Result<ExportSummary, OverlayError> {
    info!("Exporting figure '{}' to {}", file_name, config.path.display());

    let image_dir = config.path.join("images");
    create_dir_tolerant(&config.path)?;
    if create_dir_tolerant(&image_dir)? {
        // One-line stdout notice, only when the images directory is new, so
        // script authors see where artifacts will accumulate.
        let shown = std::path::absolute(&image_dir).unwrap_or_else(|_| image_dir.clone());
        println!("Creating directory \"{}\"", shown.display());
    }

    let image_path = image_dir.join(file_name);
    image::export_without_text(figure, &image_path, &config.render)?;

    if config.image_only {
        debug!("image_only set; skipping overlay file");
        return Ok(ExportSummary {
            image_path,
            overlay_path: None,
            statements: 0,
            axes: 0,
        });
    }

    let space = OverlaySpace::for_figure(figure);
    let active = collect::active_texts(figure);
    let statements: Vec<String> = active
        .iter()
        .filter_map(|(_, snap)| markup::statement(snap, &space))
        .collect();
    let annotations: Vec<String> = figure
        .axes()
        .iter()
        .map(|axis| markup::axis_annotation(axis, &space))
        .collect();
    debug!(
        "Collected {} statements, {} axis annotations",
        statements.len(),
        annotations.len()
    );

    let contents = assemble_overlay(file_name, &config.overlay_width, &statements, &annotations);

    let base_name = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let overlay_path = config.path.join(format!("{base_name}.tex"));
    std::fs::write(&overlay_path, contents).map_err(|source| OverlayError::OverlayWriteFailed {
        path: overlay_path.clone(),
        source,
    })?;
    info!("Wrote overlay: {}", overlay_path.display());

    Ok(ExportSummary {
        image_path,
        overlay_path: Some(overlay_path),
        statements: statements.len(),
        axes: annotations.len(),
    })
}

/// Create `dir` if absent, returning whether this call newly created it.
/// `AlreadyExists` (including from a creation race) is not an error and
/// reports `false`, so the caller's creation notice stays silent on repeat
/// calls against an existing target.
fn create_dir_tolerant(dir: &Path) -> Result<bool, OverlayError> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(OverlayError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Assemble the overlay block: header comment, sized `tikzoverlay*`
/// environment referencing the image, one line per statement, one annotation
/// per axis, closing line, trailing newline.
fn assemble_overlay(
    file_name: &str,
    overlay_width: &str,
    statements: &[String],
    annotations: &[String],
) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(statements.len() + annotations.len());
    lines.extend(statements.iter().map(String::as_str));
    lines.extend(annotations.iter().map(String::as_str));
    format!(
        "%Set \\graphicspath{{{{plots/images/}}}} to include the image files\n\
         \\begin{{tikzoverlay*}}[width={overlay_width}]{{{file_name}}}\n\
         {}\n\
         \\end{{tikzoverlay*}}\n",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_block_frames_statements() {
        let statements = vec![r"  \draw (1.000000, 2.000000) node[] {a};".to_string()];
        let annotations = vec!["  % axis".to_string()];
        let block = assemble_overlay("fig.pdf", r"0.8\textwidth", &statements, &annotations);
        let expected = "%Set \\graphicspath{{plots/images/}} to include the image files\n\
                        \\begin{tikzoverlay*}[width=0.8\\textwidth]{fig.pdf}\n\
                        \x20 \\draw (1.000000, 2.000000) node[] {a};\n\
                        \x20 % axis\n\
                        \\end{tikzoverlay*}\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn create_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("plots");
        create_dir_tolerant(&target).unwrap();
        create_dir_tolerant(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn creation_notice_fires_only_when_newly_created() {
        // The stdout notice is driven by this return value: true on the
        // call that creates the directory, false on every call after it.
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("images");
        assert!(create_dir_tolerant(&target).unwrap());
        assert!(!create_dir_tolerant(&target).unwrap());
        assert!(!create_dir_tolerant(&target).unwrap());
    }

    #[test]
    fn missing_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no/such/parent");
        let err = create_dir_tolerant(&target).unwrap_err();
        assert!(matches!(err, OverlayError::DirectoryCreateFailed { .. }));
    }
}
