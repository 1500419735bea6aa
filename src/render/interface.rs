use crate::error::Result;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    /// * `template_name` - Optional name for the template (used in error messages
    ///   to identify the failing rule)
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Checks a template for unknown filters without requiring any variables
    /// to be bound, so bad templates fail at load time rather than deep in a
    /// generation run.
    ///
    /// # Arguments
    /// * `template` - Template string to check
    /// * `template_name` - Optional name for the template (used in error messages)
    fn validate_filters(&self, template: &str, template_name: Option<&str>) -> Result<()>;
}
