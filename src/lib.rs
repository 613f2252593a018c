//! Transpack
//!
//! Command-line wrapper that synthesizes a webpack configuration from user
//! options and drives webpack (or `npx webpack` when webpack itself is not
//! on PATH) to transpile and minify JavaScript. All transformation work is
//! delegated to webpack; this crate only resolves options, derives the
//! configuration, and orchestrates the external processes.

pub use crate::core::{format_error_with_help, ErrorHelp, TranspackError, TranspackResult};
pub use crate::options::{Options, ResolvedOptions};

/// Errors, error suggestions, and path helpers.
pub mod core;

/// Option resolution and interactive completion.
pub mod options;

/// Webpack configuration synthesis.
pub mod config;

/// External bundler invocation.
pub mod bundler;

/// Sequential task pipeline with fallback routing.
pub mod pipeline;
