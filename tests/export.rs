//! End-to-end tests for fig2tikz.
//!
//! These drive the full pipeline (directories, text-free image, overlay
//! assembly) through the in-memory `FigureModel` backend inside temporary
//! directories, so they are hermetic and run in CI without a plotting
//! library present.

use fig2tikz::testing::{AxisSpec, FigureModel, TextSpec};
use fig2tikz::{export, ExportConfig, FigureBackend, TextId};
use kurbo::{Affine, Rect};
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Install a fmt subscriber once so `RUST_LOG=fig2tikz=debug cargo test`
/// shows the pipeline's stage logs. Subsequent calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A figure with a title, one numeric tick label, a rotated axis label, and
/// a pre-created but suppressed tick.
fn sample_figure() -> FigureModel {
    init_tracing();
    FigureModel::new(800.0, 600.0)
        .with_text(
            TextSpec::new("Hi", 400.0, 400.0).with_transform(Affine::IDENTITY),
        )
        .with_text(
            TextSpec::new("0.5", 80.0, 40.0)
                .with_transform(Affine::IDENTITY)
                .halign("center")
                .valign("top"),
        )
        .with_text(
            TextSpec::new("amplitude", 20.0, 300.0)
                .with_transform(Affine::IDENTITY)
                .halign("center")
                .valign("bottom")
                .rotation(90.0),
        )
        .with_text(TextSpec::new("1.0", 0.0, 0.0).suppressed())
        .with_axis(AxisSpec::linear(
            Affine::scale_non_uniform(800.0, 600.0),
            Rect::new(0.0, 0.0, 10.0, 5.0),
        ))
}

fn config_for(dir: &Path) -> ExportConfig {
    ExportConfig::builder()
        .path(dir.join("plots"))
        .build()
        .unwrap()
}

fn read_overlay(path: &Path) -> String {
    std::fs::read_to_string(path).expect("overlay file should exist")
}

/// Assert the overlay block is well-formed: header, environment open/close,
/// trailing newline.
fn assert_overlay_framing(tex: &str, file_name: &str) {
    let mut lines = tex.lines();
    assert_eq!(
        lines.next().unwrap(),
        r"%Set \graphicspath{{plots/images/}} to include the image files"
    );
    let open = lines.next().unwrap();
    assert!(open.starts_with(r"\begin{tikzoverlay*}[width="), "got: {open}");
    assert!(open.ends_with(&format!("]{{{file_name}}}")), "got: {open}");
    assert_eq!(tex.lines().last().unwrap(), r"\end{tikzoverlay*}");
    assert!(tex.ends_with('\n'), "overlay must end with a newline");
}

// ── Full pipeline ────────────────────────────────────────────────────────────

#[test]
fn writes_image_and_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();

    assert_eq!(summary.image_path, dir.path().join("plots/images/fig.pdf"));
    assert!(summary.image_path.exists());
    let overlay_path = summary.overlay_path.expect("overlay should be written");
    assert_eq!(overlay_path, dir.path().join("plots/fig.tex"));
    assert_eq!(summary.statements, 3);
    assert_eq!(summary.axes, 1);

    let tex = read_overlay(&overlay_path);
    assert_overlay_framing(&tex, "fig.pdf");
}

#[test]
fn centered_text_statement_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(
        tex.lines()
            .any(|l| l == r"  \draw (50.000000, 50.000000) node[] {Hi};"),
        "got:\n{tex}"
    );
}

#[test]
fn numeric_tick_is_math_wrapped_and_anchored() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(
        tex.lines()
            .any(|l| l == r"  \draw (10.000000, 5.000000) node[below] {$0.5$};"),
        "got:\n{tex}"
    );
}

#[test]
fn rotated_label_carries_rotate_option_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    let line = tex
        .lines()
        .find(|l| l.contains("{amplitude}"))
        .expect("rotated label present");
    assert!(line.contains("node[rotate=90.0]"), "got: {line}");
    assert!(!line.contains("above"), "got: {line}");
}

#[test]
fn suppressed_labels_never_reach_the_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(!tex.contains("{$1.0$}"), "suppressed tick leaked:\n{tex}");
}

#[test]
fn statements_precede_axis_annotations_in_tree_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());

    let pos = |needle: &str| tex.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
    let hi = pos("{Hi}");
    let tick = pos("{$0.5$}");
    let rotated = pos("{amplitude}");
    let axis = pos("% Internal axis coordinate system");
    assert!(hi < tick && tick < rotated && rotated < axis);
}

#[test]
fn linear_axis_scope_block_is_emitted() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(tex.contains("\\begin{scope}[shift={(0.00000000, 0.00000000)},"), "{tex}");
    assert!(tex.contains("xscale=100.00000000, yscale=75.00000000]"), "{tex}");
    assert!(
        tex.contains("%\\draw[red] (0.000000, 0.000000) rectangle (10.000000, 5.000000);"),
        "{tex}"
    );
    assert!(tex.contains("\\end{scope}"), "{tex}");
}

#[test]
fn log_axis_is_annotated_with_comment_only() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut figure = FigureModel::new(800.0, 600.0)
        .with_text(TextSpec::new("log plot", 0.5, 0.9))
        .with_axis(
            AxisSpec::linear(Affine::IDENTITY, Rect::new(0.0, 0.0, 1.0, 1.0)).log_y(),
        );
    let summary = export(&mut figure, "log.pdf", &config_for(dir.path())).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(
        tex.lines()
            .any(|l| l == "  % No internal axis coordinate system as there is a log scale."),
        "got:\n{tex}"
    );
    assert!(!tex.contains("scope"), "log axis must not open a scope:\n{tex}");
}

// ── Filesystem behaviour ─────────────────────────────────────────────────────

#[test]
fn repeated_export_into_same_path_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let mut figure = sample_figure();
    export(&mut figure, "fig.pdf", &config).unwrap();
    export(&mut figure, "fig.pdf", &config).unwrap();
    assert!(dir.path().join("plots/images/fig.pdf").exists());
}

#[test]
fn overlay_file_is_fully_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let overlay_path = dir.path().join("plots/fig.tex");

    std::fs::create_dir_all(dir.path().join("plots")).unwrap();
    std::fs::write(&overlay_path, "stale hand-edited content\n").unwrap();

    let mut figure = sample_figure();
    export(&mut figure, "fig.pdf", &config).unwrap();
    let tex = read_overlay(&overlay_path);
    assert!(!tex.contains("stale"), "prior content must be gone:\n{tex}");
    assert_overlay_framing(&tex, "fig.pdf");
}

#[test]
fn image_only_skips_and_preserves_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::builder()
        .path(dir.path().join("plots"))
        .image_only(true)
        .build()
        .unwrap();
    let overlay_path = dir.path().join("plots/fig.tex");

    std::fs::create_dir_all(dir.path().join("plots")).unwrap();
    std::fs::write(&overlay_path, "hand-edited overlay\n").unwrap();

    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config).unwrap();
    assert_eq!(summary.overlay_path, None);
    assert_eq!(summary.statements, 0);
    assert!(summary.image_path.exists());
    assert_eq!(read_overlay(&overlay_path), "hand-edited overlay\n");
}

#[test]
fn custom_overlay_width_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::builder()
        .path(dir.path().join("plots"))
        .overlay_width(r"\columnwidth")
        .build()
        .unwrap();
    let mut figure = sample_figure();
    let summary = export(&mut figure, "fig.pdf", &config).unwrap();
    let tex = read_overlay(&summary.overlay_path.unwrap());
    assert!(
        tex.contains(r"\begin{tikzoverlay*}[width=\columnwidth]{fig.pdf}"),
        "{tex}"
    );
}

// ── Figure state invariants ──────────────────────────────────────────────────

#[test]
fn text_opacity_is_unchanged_after_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    for id in figure.texts() {
        assert_eq!(figure.text(id).alpha, None, "alpha leaked for {id:?}");
    }
}

#[test]
fn text_opacity_is_unchanged_after_failed_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure().fail_render_on_pass(2);
    let err = export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap_err();
    assert!(err.to_string().contains("fig.pdf"), "got: {err}");
    for id in figure.texts() {
        assert_eq!(figure.text(id).alpha, None, "alpha leaked for {id:?}");
    }
}

#[test]
fn export_renders_exactly_twice() {
    let dir = tempfile::tempdir().unwrap();
    let mut figure = sample_figure();
    export(&mut figure, "fig.pdf", &config_for(dir.path())).unwrap();
    assert_eq!(figure.render_passes(), 2);
    assert_eq!(figure.alpha_at_pass(1, TextId(0)), Some(None));
    assert_eq!(figure.alpha_at_pass(2, TextId(0)), Some(Some(0.0)));
}
