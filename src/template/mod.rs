//! Generation lifecycle orchestration for packsmith.
//!
//! This module contains the core generation components:
//! - `definition`: Static template declarations and the hook seam
//! - `lifecycle`: The state machine driving one generation run
//! - `plan`: The resolved path map handed to the materializer

pub mod definition;
pub mod lifecycle;
pub mod plan;

pub use definition::{Hook, HookContext, TemplateDefinition};
pub use lifecycle::{Lifecycle, State};
pub use plan::{FsMaterializer, Materializer, ResolvedPlan};
