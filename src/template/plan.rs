use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ioutils::copy_file;

/// The output of path resolution: where every surviving template file goes,
/// and which files the ignore rules excluded.
///
/// Paths are relative: mapping sources to the template root, destinations and
/// exclusions to the output root.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResolvedPlan {
    /// Template-relative source to output-relative destination, in template
    /// tree walk order.
    pub mappings: IndexMap<PathBuf, PathBuf>,
    /// Resolved relative paths that matched an ignore rule.
    pub excluded: Vec<PathBuf>,
}

impl ResolvedPlan {
    pub fn destination_of(&self, source: impl AsRef<Path>) -> Option<&PathBuf> {
        self.mappings.get(source.as_ref())
    }

    pub fn is_excluded(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.excluded.iter().any(|p| p == path)
    }
}

/// The file materialization collaborator the lifecycle hands its plan to.
pub trait Materializer {
    fn materialize(&self, plan: &ResolvedPlan) -> Result<()>;
}

/// Materializes a plan by copying template files into the output directory,
/// creating parent directories as needed.
pub struct FsMaterializer {
    template_root: PathBuf,
    output_root: PathBuf,
}

impl FsMaterializer {
    pub fn new(template_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self { template_root: template_root.into(), output_root: output_root.into() }
    }
}

impl Materializer for FsMaterializer {
    fn materialize(&self, plan: &ResolvedPlan) -> Result<()> {
        for excluded in &plan.excluded {
            debug!("Skipping '{}' (matches ignore pattern)", excluded.display());
        }
        for (source, destination) in &plan.mappings {
            let from = self.template_root.join(source);
            let to = self.output_root.join(destination);
            debug!("Copying '{}' to '{}'", from.display(), to.display());
            copy_file(&from, &to)?;
        }
        Ok(())
    }
}
