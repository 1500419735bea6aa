use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Invalid package identifier '{input}': expected 'vendor/package'.")]
    InvalidPackageIdentifier { input: String },

    #[error("Undefined variable while rendering '{rule}': {detail}")]
    UndefinedVariable { rule: String, detail: String },

    #[error("Unknown filter while rendering '{rule}': {detail}")]
    UnknownFilter { rule: String, detail: String },

    #[error("Invalid ignore pattern '{pattern}'. Original error: {source}")]
    InvalidPattern { pattern: String, source: globset::Error },

    /// When the template hook has run but returned an error.
    #[error("Hook execution failed: {cause}")]
    HookFailed { cause: Box<Error> },

    #[error("Failed to write manifest '{path}': {detail}")]
    WriteFailed { path: String, detail: String },

    /// Renderer faults outside the named undefined-variable/unknown-filter cases.
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Wraps any failure with the lifecycle state it originated in.
    #[error("Generation failed in {state} state: {source}")]
    Lifecycle { state: &'static str, source: Box<Error> },

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },
}

/// Convenience type alias for Results with packsmith's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
