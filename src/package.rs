//! Package identifier parsing and configured manifest defaults.
//!
//! A package is addressed as `vendor/package`. The parsed form feeds the
//! template bindings and the generated manifest's `name` field.

use serde_json::json;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::manifest::ManifestDocument;

/// A parsed `vendor/package` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub vendor: String,
    pub package: String,
}

impl PackageName {
    /// Parses a `vendor/package` string into its two segments.
    ///
    /// The input must contain exactly one `/` and both segments must be
    /// non-empty.
    ///
    /// # Errors
    /// * `Error::InvalidPackageIdentifier` for a missing slash, an extra
    ///   slash, or an empty segment
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(vendor), Some(package), None)
                if !vendor.is_empty() && !package.is_empty() =>
            {
                Ok(Self { vendor: vendor.to_string(), package: package.to_string() })
            }
            _ => Err(Error::InvalidPackageIdentifier { input: input.to_string() }),
        }
    }

    /// Returns the starting manifest for this package with the configured
    /// defaults filled in (name, description, authors, license).
    ///
    /// The returned document is the base that template hooks extend with
    /// `require`, `autoload` and the other template-specific sections.
    pub fn base_manifest(&self) -> ManifestDocument {
        let mut doc = ManifestDocument::new();
        doc.set("name", json!(self.to_string()));
        doc.set("description", json!(""));
        doc.set("authors", json!([]));
        doc.set("license", json!("MIT"));
        doc
    }
}

impl Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.vendor, self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_round_trips() {
        let name = PackageName::parse("acme/blog").unwrap();
        assert_eq!(name.vendor, "acme");
        assert_eq!(name.package, "blog");
        assert_eq!(name.to_string(), "acme/blog");
    }

    #[test]
    fn rejects_missing_slash() {
        assert!(matches!(
            PackageName::parse("acmeblog"),
            Err(Error::InvalidPackageIdentifier { .. })
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        for input in ["/blog", "acme/", "/"] {
            assert!(matches!(
                PackageName::parse(input),
                Err(Error::InvalidPackageIdentifier { .. })
            ));
        }
    }

    #[test]
    fn rejects_extra_slash() {
        assert!(matches!(
            PackageName::parse("acme/blog/extra"),
            Err(Error::InvalidPackageIdentifier { .. })
        ));
    }

    #[test]
    fn base_manifest_carries_full_name() {
        let name = PackageName::parse("acme/blog").unwrap();
        let doc = name.base_manifest();
        assert_eq!(doc.get("name"), Some(&json!("acme/blog")));
        assert_eq!(doc.get("license"), Some(&json!("MIT")));
    }
}
