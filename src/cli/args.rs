use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for packsmith.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Package identifier in `vendor/package` form.
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Template directory to generate from.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Destination directory for generated files.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Keep the Laravel-specific resource directories and autoload them.
    #[arg(long)]
    pub resources: bool,

    /// Force overwrite of an existing output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        use crate::constants::verbosity;
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_minimal_args() {
        let args =
            Args::parse_from(["packsmith", "acme/blog", "template_dir", "output_dir"]);
        assert_eq!(args.package, "acme/blog");
        assert_eq!(args.template, PathBuf::from("template_dir"));
        assert_eq!(args.output_dir, PathBuf::from("output_dir"));
        assert!(!args.resources);
        assert!(!args.force);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "packsmith",
            "acme/blog",
            "template_dir",
            "output_dir",
            "--resources",
            "--force",
            "-vvv",
        ]);
        assert!(args.resources);
        assert!(args.force);
        assert_eq!(args.verbose, 3);
    }
}
