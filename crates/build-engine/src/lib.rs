//! droidbuild build engine
//!
//! Drives the fixed build pipeline: clean, resource compile, javac, dex,
//! APK packaging, signing. Every heavy step is an external SDK tool; this
//! crate only constructs arguments, sequences the stages, and fails fast.

pub mod pipeline;
pub mod toolchain;

pub use pipeline::{BuildPipeline, BuildSummary, Stage};
pub use toolchain::Toolchain;
