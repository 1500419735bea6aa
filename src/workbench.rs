//! The built-in Laravel 4 workbench package template.
//!
//! Declares the service-provider transform rule and a hook that mirrors what
//! Laravel's own workbench tool produced: Laravel-specific resource
//! directories are skipped unless requested, and a `composer.json` manifest
//! is generated next to the scaffolded sources.

use serde_json::{json, Value};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::package::PackageName;
use crate::render::filters::to_studly_case;
use crate::template::{HookContext, TemplateDefinition};

/// Output path expression for the package's service provider. The source
/// file is never copied to the template root; it nests under the studly
/// vendor/package directories instead.
pub const SERVICE_PROVIDER_TRANSFORM: &str =
    "src/{{ vendor|studly }}/{{ package|studly }}/{{ package|studly ~ \"ServiceProvider\" }}.php";

/// Laravel-specific directories skipped when resources are not requested.
pub const RESOURCE_PATTERNS: &[&str] = &[
    "src/controllers*",
    "src/migrations*",
    "src/config*",
    "src/views*",
    "src/lang*",
    "public/*",
];

/// Builds the workbench template definition rooted at `template_root`.
pub fn definition(template_root: impl Into<PathBuf>) -> TemplateDefinition {
    TemplateDefinition::new("workbench", template_root)
        .with_transform_path("ServiceProvider.php", SERVICE_PROVIDER_TRANSFORM)
        .with_hook(Box::new(hook))
}

fn required_string(ctx: &HookContext<'_>, name: &str) -> Result<String> {
    ctx.var(name).and_then(Value::as_str).map(str::to_string).ok_or_else(|| {
        Error::UndefinedVariable {
            rule: "workbench hook".to_string(),
            detail: format!("'{name}' is not bound"),
        }
    })
}

fn hook(ctx: &mut HookContext<'_>) -> Result<()> {
    let vendor = required_string(ctx, "vendor")?;
    let package = required_string(ctx, "package")?;
    let resources = ctx.flag("resources");

    if !resources {
        ctx.ignore_all(RESOURCE_PATTERNS)?;
    }

    let name = PackageName { vendor: vendor.clone(), package: package.clone() };
    let mut manifest = name.base_manifest();

    manifest.set(
        "require",
        json!({
            "php": ">=5.4.0",
            "illuminate/support": "4.2.*",
        }),
    );

    // Composer's psr-0 key: `Vendor\Package\` mapped to the src directory.
    let namespace = format!("{}\\{}\\", to_studly_case(&vendor), to_studly_case(&package));
    let mut psr0 = serde_json::Map::new();
    psr0.insert(namespace, json!("src/"));

    let mut autoload = serde_json::Map::new();
    autoload.insert("psr-0".to_string(), Value::Object(psr0));
    if resources {
        autoload.insert("classmap".to_string(), json!(["src/migrations"]));
    }
    manifest.set("autoload", Value::Object(autoload));

    manifest.set("minimum-stability", json!("stable"));

    ctx.write_manifest(&manifest)
}
