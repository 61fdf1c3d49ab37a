//! droidbuild core - shared types and external tool invocation
//!
//! This crate provides the pieces every subcommand leans on: the persisted
//! project descriptor, the fail-fast external tool invoker, the interactive
//! prompt abstraction, and the error taxonomy.

pub mod descriptor;
pub mod error;
pub mod invoke;
pub mod prompt;

pub use descriptor::{ProjectDescriptor, DESCRIPTOR_FILE};
pub use error::{Error, Result, ToolFailure};
pub use invoke::{Invocation, SystemRunner, ToolRunner};
pub use prompt::{PromptSource, ScriptedPrompt, StdinPrompt};

/// Tool name used in user-facing output.
pub const TOOL_NAME: &str = "droidbuild";
