//! Path expression and content rendering for packsmith templates.
//!
//! This module contains the rendering components:
//! - `interface`: The `TemplateRenderer` trait the lifecycle depends on
//! - `minijinja`: The MiniJinja-backed implementation
//! - `filters`: The filter registry available inside `{{ ... }}` tokens

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use minijinja::MiniJinjaRenderer;
