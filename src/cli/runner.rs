use log::info;
use serde_json::json;

use crate::{
    cli::Args,
    error::{Error, Result},
    ioutils::get_output_dir,
    manifest::ManifestWriter,
    package::PackageName,
    render::MiniJinjaRenderer,
    template::{FsMaterializer, Lifecycle},
    workbench,
};

/// Main CLI runner that orchestrates one complete generation run.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the generation workflow: parse the package identifier, load
    /// the template definition, run its hook, resolve paths and materialize.
    pub fn run(self) -> Result<()> {
        // Malformed identifiers surface here, before any hook runs.
        let package = PackageName::parse(&self.args.package)?;

        let output_root = get_output_dir(&self.args.output_dir, self.args.force)?;
        let template_root = self.args.template.clone();
        if !template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: template_root.display().to_string(),
            });
        }

        let definition = workbench::definition(&template_root);
        let mut lifecycle = Lifecycle::new(
            definition,
            &output_root,
            Box::new(MiniJinjaRenderer::new()),
            ManifestWriter::default(),
        );

        let mut bindings = serde_json::Map::new();
        bindings.insert("vendor".to_string(), json!(package.vendor));
        bindings.insert("package".to_string(), json!(package.package));
        bindings.insert("resources".to_string(), json!(self.args.resources));

        lifecycle.load(bindings)?;
        lifecycle.run_hook()?;
        let plan = lifecycle.resolve()?;
        info!(
            "Resolved {} files ({} excluded) for {}",
            plan.mappings.len(),
            plan.excluded.len(),
            package
        );

        let materializer = FsMaterializer::new(&template_root, &output_root);
        lifecycle.materialize(&materializer)?;

        println!("Package generation completed successfully in {}.", output_root.display());
        Ok(())
    }
}
