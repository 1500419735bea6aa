use super::filters::*;
use crate::error::{Error, Result};
use crate::render::interface::TemplateRenderer;
use minijinja::value::Value as TemplateValue;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};

/// Wraps a case-conversion function as a filter that keeps the error
/// taxonomy intact: an undefined input reports as an undefined variable
/// rather than as a type mismatch inside the filter.
fn case_filter(
    func: fn(&str) -> String,
) -> impl Fn(TemplateValue) -> std::result::Result<String, minijinja::Error>
       + Send
       + Sync
       + 'static {
    move |value: TemplateValue| {
        if value.is_undefined() {
            return Err(minijinja::Error::new(
                ErrorKind::UndefinedError,
                "cannot apply filter to an undefined value",
            ));
        }
        let input = value.as_str().ok_or_else(|| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("filter expects a string, got {}", value.kind()),
            )
        })?;
        Ok(func(input))
    }
}

/// MiniJinja-based template rendering engine.
///
/// The environment runs with strict undefined behavior so a path expression
/// referencing a variable the hook never bound fails instead of rendering an
/// empty path segment.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer with the filter registry installed.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_filter("studly", case_filter(to_studly_case));
        env.add_filter("camel_case", case_filter(to_camel_case));
        env.add_filter("kebab_case", case_filter(to_kebab_case));
        env.add_filter("snake_case", case_filter(to_snake_case));

        Self { env }
    }

    /// Maps a MiniJinja failure onto the crate error taxonomy, carrying the
    /// name of the rule that was being rendered.
    fn map_error(err: minijinja::Error, rule: &str) -> Error {
        match err.kind() {
            ErrorKind::UndefinedError => Error::UndefinedVariable {
                rule: rule.to_string(),
                detail: err.to_string(),
            },
            ErrorKind::UnknownFilter => Error::UnknownFilter {
                rule: rule.to_string(),
                detail: err.to_string(),
            },
            _ => Error::TemplateError(err.to_string()),
        }
    }

    /// Internal helper to render a one-off template, optionally overriding
    /// the undefined-variable behavior.
    fn render_internal(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
        undefined_override: Option<UndefinedBehavior>,
    ) -> Result<String> {
        let mut env = self.env.clone();
        if let Some(undefined) = undefined_override {
            env.set_undefined_behavior(undefined);
        }
        let name = template_name.unwrap_or("temp");
        env.add_template(name, template).map_err(|e| Self::map_error(e, name))?;

        let tmpl = env.get_template(name).map_err(|e| Self::map_error(e, name))?;
        tmpl.render(context).map_err(|e| Self::map_error(e, name))
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        self.render_internal(template, context, template_name, None)
    }

    fn validate_filters(&self, template: &str, template_name: Option<&str>) -> Result<()> {
        // A lenient trial render against an empty context: missing variables
        // are tolerated at this stage, unknown filters are not.
        let empty = serde_json::json!({});
        match self.render_internal(
            template,
            &empty,
            template_name,
            Some(UndefinedBehavior::Lenient),
        ) {
            Err(err @ Error::UnknownFilter { .. }) => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_studly_filter() {
        let renderer = MiniJinjaRenderer::new();
        let rendered = renderer
            .render("{{ vendor|studly }}", &json!({"vendor": "my-pkg"}), None)
            .unwrap();
        assert_eq!(rendered, "MyPkg");
    }

    #[test]
    fn renders_filter_with_literal_append() {
        let renderer = MiniJinjaRenderer::new();
        let rendered = renderer
            .render(
                "{{ package|studly ~ \"ServiceProvider\" }}",
                &json!({"package": "blog"}),
                None,
            )
            .unwrap();
        assert_eq!(rendered, "BlogServiceProvider");
    }

    #[test]
    fn renders_compound_path() {
        let renderer = MiniJinjaRenderer::new();
        let rendered = renderer
            .render(
                "src/{{ vendor|studly }}/{{ package|studly }}/{{ package|studly ~ \"ServiceProvider\" }}.php",
                &json!({"vendor": "acme", "package": "blog"}),
                None,
            )
            .unwrap();
        assert_eq!(rendered, "src/Acme/Blog/BlogServiceProvider.php");
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render("{{ vendor|studly }}", &json!({}), Some("rule"));
        match result {
            Err(Error::UndefinedVariable { rule, .. }) => assert_eq!(rule, "rule"),
            other => panic!("Expected UndefinedVariable, got {:?}", other.err()),
        }
    }

    #[test]
    fn undefined_value_through_filter_chain_names_the_variable_error() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render(
            "{{ vendor|studly|snake_case }}",
            &json!({}),
            Some("rule"),
        );
        assert!(matches!(result, Err(Error::UndefinedVariable { .. })));
    }

    #[test]
    fn filter_on_non_string_value_is_a_template_error() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render("{{ count|studly }}", &json!({"count": 3}), Some("rule"));
        assert!(matches!(result, Err(Error::TemplateError(_))));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let renderer = MiniJinjaRenderer::new();
        let result =
            renderer.render("{{ vendor|frobnicate }}", &json!({"vendor": "x"}), Some("rule"));
        match result {
            Err(Error::UnknownFilter { rule, .. }) => assert_eq!(rule, "rule"),
            other => panic!("Expected UnknownFilter, got {:?}", other.err()),
        }
    }

    #[test]
    fn validate_filters_ignores_missing_variables() {
        let renderer = MiniJinjaRenderer::new();
        renderer.validate_filters("{{ vendor|studly }}/{{ package }}", None).unwrap();
    }

    #[test]
    fn validate_filters_catches_unknown_filter() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.validate_filters("{{ vendor|frobnicate }}", Some("rule"));
        assert!(matches!(result, Err(Error::UnknownFilter { .. })));
    }

    #[test]
    fn rendering_is_pure_over_bindings() {
        let renderer = MiniJinjaRenderer::new();
        let context = json!({"vendor": "my-pkg"});
        let first = renderer.render("{{ vendor|studly }}", &context, None).unwrap();
        let second = renderer.render("{{ vendor|studly }}", &context, None).unwrap();
        assert_eq!(first, second);
    }
}
