use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;
use crate::ioutils::path_to_str;
use crate::manifest::ManifestWriter;
use crate::render::TemplateRenderer;

use super::definition::{HookContext, TemplateDefinition};
use super::plan::{Materializer, ResolvedPlan};

/// States of one generation run. Transitions only move forward; any failure
/// lands in `Failed` and the run cannot be resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unloaded,
    Loaded,
    HookRun,
    Resolved,
    Materialized,
    Failed,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Unloaded => "Unloaded",
            State::Loaded => "Loaded",
            State::HookRun => "HookRun",
            State::Resolved => "Resolved",
            State::Materialized => "Materialized",
            State::Failed => "Failed",
        }
    }
}

/// Drives one generation run through `load`, `run_hook`, `resolve` and
/// `materialize`.
///
/// Owns the run's variable bindings and accumulated ignore rules; they are
/// created empty, populated during load and hook execution, read during
/// resolution, and discarded with the lifecycle. Concurrent runs need
/// independent instances.
pub struct Lifecycle {
    state: State,
    definition: TemplateDefinition,
    output_dir: PathBuf,
    renderer: Box<dyn TemplateRenderer>,
    writer: ManifestWriter,
    bindings: serde_json::Map<String, Value>,
    ignore: IgnoreRules,
    plan: Option<ResolvedPlan>,
}

impl Lifecycle {
    pub fn new(
        definition: TemplateDefinition,
        output_dir: impl Into<PathBuf>,
        renderer: Box<dyn TemplateRenderer>,
        writer: ManifestWriter,
    ) -> Self {
        Self {
            state: State::Unloaded,
            definition,
            output_dir: output_dir.into(),
            renderer,
            writer,
            bindings: serde_json::Map::new(),
            ignore: IgnoreRules::new(),
            plan: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The variable bindings as they currently stand.
    pub fn bindings(&self) -> &serde_json::Map<String, Value> {
        &self.bindings
    }

    /// The ignore patterns accumulated so far, in insertion order.
    pub fn ignore_patterns(&self) -> &[String] {
        self.ignore.patterns()
    }

    pub fn plan(&self) -> Option<&ResolvedPlan> {
        self.plan.as_ref()
    }

    fn guard(&self, expected: State, operation: &str) -> Result<()> {
        if self.state != expected {
            return Err(Error::TemplateError(format!(
                "cannot {} from {} state",
                operation,
                self.state.name()
            )));
        }
        Ok(())
    }

    /// Marks the run failed and tags the error with the transition it broke.
    fn fail(&mut self, transition: State, source: Error) -> Error {
        self.state = State::Failed;
        Error::Lifecycle { state: transition.name(), source: Box::new(source) }
    }

    /// Validates the definition's transform expressions and initial ignore
    /// patterns, then installs the CLI-supplied variable bindings.
    pub fn load(&mut self, initial_bindings: serde_json::Map<String, Value>) -> Result<()> {
        self.guard(State::Unloaded, "load")?;
        match self.try_load(initial_bindings) {
            Ok(()) => {
                self.state = State::Loaded;
                Ok(())
            }
            Err(e) => Err(self.fail(State::Loaded, e)),
        }
    }

    fn try_load(&mut self, initial_bindings: serde_json::Map<String, Value>) -> Result<()> {
        // Unknown filters fail here, before any generation work.
        for (source, expression) in &self.definition.transform_paths {
            self.renderer.validate_filters(expression, Some(source))?;
        }
        let patterns: Vec<String> = self.definition.ignore_patterns.clone();
        self.ignore.add_all(&patterns)?;
        for (name, value) in initial_bindings {
            debug!("Binding '{}' from arguments", name);
            self.bindings.insert(name, value);
        }
        debug!("Loaded template '{}' from {}", self.definition.name, self.definition.root.display());
        Ok(())
    }

    /// Invokes the template's hook, if any, with a context exposing variable
    /// binding, ignore rules and manifest writing.
    pub fn run_hook(&mut self) -> Result<()> {
        self.guard(State::Loaded, "run_hook")?;
        let result = match &self.definition.hook {
            Some(hook) => {
                let mut context = HookContext {
                    bindings: &mut self.bindings,
                    ignore: &mut self.ignore,
                    output_dir: &self.output_dir,
                    writer: &self.writer,
                };
                hook(&mut context).map_err(|e| Error::HookFailed { cause: Box::new(e) })
            }
            None => Ok(()),
        };
        match result {
            Ok(()) => {
                self.state = State::HookRun;
                Ok(())
            }
            Err(e) => Err(self.fail(State::HookRun, e)),
        }
    }

    /// Renders every transform rule against the final bindings and evaluates
    /// the ignore rules against each resolved relative path.
    pub fn resolve(&mut self) -> Result<&ResolvedPlan> {
        self.guard(State::HookRun, "resolve")?;
        match self.try_resolve() {
            Ok(plan) => {
                self.state = State::Resolved;
                Ok(&*self.plan.insert(plan))
            }
            Err(e) => Err(self.fail(State::Resolved, e)),
        }
    }

    fn try_resolve(&self) -> Result<ResolvedPlan> {
        let context = Value::Object(self.bindings.clone());

        // A rule failure aborts resolution; the error names the rule.
        let mut transformed: IndexMap<String, String> = IndexMap::new();
        for (source, expression) in &self.definition.transform_paths {
            let destination = self.renderer.render(expression, &context, Some(source))?;
            debug!("Transform rule '{}' resolved to '{}'", source, destination);
            transformed.insert(source.clone(), destination);
        }

        let matcher = self.ignore.matcher()?;
        let mut plan = ResolvedPlan::default();

        for entry in WalkDir::new(&self.definition.root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.definition.root).map_err(|e| {
                Error::ProcessError {
                    source_path: entry.path().display().to_string(),
                    e: e.to_string(),
                }
            })?;
            let relative_str = path_to_str(relative)?;

            // Ignore rules match the path as it looks after rendering.
            let destination = transformed
                .get(relative_str)
                .cloned()
                .unwrap_or_else(|| relative_str.to_string());

            if matcher.is_match(&destination) {
                plan.excluded.push(PathBuf::from(destination));
            } else {
                plan.mappings.insert(relative.to_path_buf(), PathBuf::from(destination));
            }
        }

        Ok(plan)
    }

    /// Hands the resolved plan to the materialization collaborator.
    pub fn materialize(&mut self, materializer: &dyn Materializer) -> Result<()> {
        self.guard(State::Resolved, "materialize")?;
        let plan = self
            .plan
            .as_ref()
            .ok_or_else(|| Error::TemplateError("resolved plan is missing".to_string()))?;
        match materializer.materialize(plan) {
            Ok(()) => {
                self.state = State::Materialized;
                Ok(())
            }
            Err(e) => Err(self.fail(State::Materialized, e)),
        }
    }
}
