use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::ignore::IgnoreRules;
use crate::ioutils::create_dir_all;
use crate::manifest::{ManifestDocument, ManifestWriter};

/// A template-supplied customization function, invoked once per generation
/// run between loading and path resolution.
pub type Hook = Box<dyn Fn(&mut HookContext<'_>) -> Result<()>>;

/// The static declaration of one scaffoldable project type: its template
/// tree, transform rules, initial ignore patterns and optional hook.
///
/// Immutable once handed to a lifecycle; per-run state (bindings, accumulated
/// ignore rules) lives in the lifecycle itself.
pub struct TemplateDefinition {
    pub name: String,
    /// Root directory of the template tree.
    pub root: PathBuf,
    /// Source-relative path to the path expression its output is rendered
    /// from. A source matched by a transform rule is never copied to its
    /// literal template path.
    pub transform_paths: IndexMap<String, String>,
    /// Ignore patterns installed at load time, before the hook runs.
    pub ignore_patterns: Vec<String>,
    pub hook: Option<Hook>,
}

impl TemplateDefinition {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            transform_paths: IndexMap::new(),
            ignore_patterns: Vec::new(),
            hook: None,
        }
    }

    pub fn with_transform_path(
        mut self,
        source: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.transform_paths.insert(source.into(), expression.into());
        self
    }

    pub fn with_ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_patterns.push(pattern.into());
        self
    }

    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hook = Some(hook);
        self
    }
}

/// The mutable view a hook gets of the running generation.
///
/// Exposes exactly three capabilities: binding variables, adding ignore
/// rules, and building/persisting the package manifest. Hooks get no other
/// access to the lifecycle.
pub struct HookContext<'a> {
    pub(crate) bindings: &'a mut serde_json::Map<String, Value>,
    pub(crate) ignore: &'a mut IgnoreRules,
    pub(crate) output_dir: &'a Path,
    pub(crate) writer: &'a ManifestWriter,
}

impl HookContext<'_> {
    /// Looks up a bound variable.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns a boolean option binding, defaulting to `false` when the
    /// option is absent or not a boolean.
    pub fn flag(&self, name: &str) -> bool {
        self.bindings.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Binds a variable. Later writes overwrite earlier ones.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Adds an ignore pattern, validated immediately.
    pub fn ignore(&mut self, pattern: &str) -> Result<()> {
        self.ignore.add(pattern)
    }

    /// Adds several ignore patterns, stopping at the first invalid one.
    pub fn ignore_all<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore.add_all(patterns)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir
    }

    /// Persists `doc` as the package manifest in the output directory.
    ///
    /// Hooks run before materialization, so the output directory may not
    /// exist yet; it is created here as part of writing the manifest. This
    /// is the only directory the core creates on its own.
    pub fn write_manifest(&self, doc: &ManifestDocument) -> Result<()> {
        create_dir_all(self.output_dir)?;
        self.writer.write(doc, self.output_dir.join(MANIFEST_FILE))
    }
}
