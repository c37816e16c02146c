//! Pipeline stages for figure-to-overlay conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets the
//! markup grammar evolve without touching the geometry.
//!
//! ## Data Flow
//!
//! ```text
//! figure ──▶ space ──▶ collect ──▶ markup      image
//! (backend)  (device→   (active     (one \draw   (text-free
//!             overlay)   texts)      per text)    render)
//! ```
//!
//! 1. [`space`]   — build the device-to-overlay affine map, once per figure
//! 2. [`collect`] — filter the figure's text artists down to the active set
//! 3. [`markup`]  — convert each active text (and each axis) into TikZ lines
//! 4. [`image`]   — render the figure with text opacity zeroed, restoring
//!    the original opacities afterwards even on failure

pub mod collect;
pub mod image;
pub mod markup;
pub mod space;
