//! Glob-style ignore rules for excluding template subtrees.
//!
//! Rules are matched against output-relative paths as they look *after* path
//! expression rendering, not against raw template paths. Globset's default
//! semantics apply: `*` matches across path separators, so `src/migrations*`
//! excludes the directory and everything under it.

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::error::{Error, Result};

/// An ordered, validated collection of ignore patterns.
///
/// Patterns are validated when added so a malformed glob is reported at the
/// point the rule enters the set, not deferred to match time.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    globs: Vec<Glob>,
    patterns: Vec<String>,
}

impl IgnoreRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single pattern to the set.
    ///
    /// # Errors
    /// * `Error::InvalidPattern` if the pattern is not a valid glob
    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let glob = Glob::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        debug!("Adding ignore pattern: {}", pattern);
        self.globs.push(glob);
        self.patterns.push(pattern.to_string());
        Ok(())
    }

    /// Adds every pattern in the iterator, stopping at the first invalid one.
    pub fn add_all<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.add(pattern.as_ref())?;
        }
        Ok(())
    }

    /// The patterns in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// Compiles the accumulated patterns into a matcher.
    pub fn matcher(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in &self.globs {
            builder.add(glob.clone());
        }
        builder.build().map_err(|e| Error::TemplateError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_star_matches_directory_contents() {
        let mut rules = IgnoreRules::new();
        rules.add("src/migrations*").unwrap();
        let matcher = rules.matcher().unwrap();
        assert!(matcher.is_match("src/migrations/Foo.php"));
        assert!(matcher.is_match("src/migrations"));
        assert!(!matcher.is_match("src/Other.php"));
    }

    #[test]
    fn star_crosses_path_separators() {
        let mut rules = IgnoreRules::new();
        rules.add("public/*").unwrap();
        let matcher = rules.matcher().unwrap();
        assert!(matcher.is_match("public/js/app.js"));
        assert!(matcher.is_match("public/index.html"));
        assert!(!matcher.is_match("src/public.php"));
    }

    #[test]
    fn any_matching_rule_excludes() {
        let mut rules = IgnoreRules::new();
        rules.add_all(["src/config*", "src/views*"]).unwrap();
        let matcher = rules.matcher().unwrap();
        assert!(matcher.is_match("src/views/layout.php"));
        assert!(matcher.is_match("src/config/app.php"));
        assert!(!matcher.is_match("src/Provider.php"));
    }

    #[test]
    fn invalid_pattern_fails_at_add_time() {
        let mut rules = IgnoreRules::new();
        let result = rules.add("src/{unclosed");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
        assert!(rules.is_empty());
    }

    #[test]
    fn empty_set_matches_nothing() {
        let rules = IgnoreRules::new();
        let matcher = rules.matcher().unwrap();
        assert!(!matcher.is_match("src/anything.php"));
    }
}
