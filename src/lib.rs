//! Frame-rendering throughput harness.
//!
//! Rasterizes a fixed circle scene with tiny-skia into one of three surface
//! backings (CPU pixel buffer, GPU-backed, GPU texture-backed) and measures
//! elapsed time, either headless or presented through a winit/wgpu window.

pub mod cli;
pub mod core;
pub mod error;
pub mod scene;
