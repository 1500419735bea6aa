/// Handles argument parsing and the generation runner.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Glob-style ignore rules for excluding template subtrees.
pub mod ignore;

/// Template path and content rendering functionality.
pub mod render;

/// Ordered, type-preserving manifest document building and writing.
pub mod manifest;

/// Package identifier parsing and configured manifest defaults.
pub mod package;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Core generation lifecycle orchestration.
pub mod template;

/// The built-in Laravel workbench package template.
pub mod workbench;

/// Constants used throughout the application.
pub mod constants;
