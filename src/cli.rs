use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "applyview")]
#[command(about = "Render the result of an apply or destroy run from a recorded apply record")]
#[command(version)]
pub struct CliArgs {
    /// Apply record to render (JSON with events, outputs and diagnostics)
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Render the run as a destroy instead of an apply
    #[arg(long)]
    pub destroy: bool,

    /// Suppress hints meant for interactive users (also set by TF_IN_AUTOMATION)
    #[arg(long)]
    pub automation: bool,

    /// Output format: "human" or "json"
    #[arg(long, value_name = "KIND", default_value = "human")]
    pub view: String,

    /// Disable terminal colours (also set by NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Number of worker threads delivering lifecycle events
    #[arg(long, default_value = "10")]
    pub parallelism: usize,

    /// Override console width used to wrap diagnostics (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Program name used in help hints
    #[arg(long, value_name = "NAME", default_value = crate::view::DEFAULT_PROGRAM)]
    pub program: String,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.parallelism == 0 {
            return Err("--parallelism must be at least 1".to_string());
        }

        if self.console_width == Some(0) {
            return Err("--console-width must be greater than zero".to_string());
        }

        if self.program.trim().is_empty() {
            return Err("--program must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            input: PathBuf::from("apply.json"),
            destroy: false,
            automation: false,
            view: "human".to_string(),
            no_color: false,
            parallelism: 10,
            console_width: None,
            program: "terraform".to_string(),
        }
    }

    #[test]
    fn test_validate_defaults_succeed() {
        assert!(args().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_parallelism_fails() {
        let args = CliArgs { parallelism: 0, ..args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_zero_width_fails() {
        let args = CliArgs { console_width: Some(0), ..args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "applyview",
            "--input",
            "run.json",
            "--destroy",
            "--automation",
            "--view",
            "json",
            "--parallelism",
            "3",
        ])
        .expect("valid flags");

        assert_eq!(args.input, PathBuf::from("run.json"));
        assert!(args.destroy);
        assert!(args.automation);
        assert_eq!(args.view, "json");
        assert_eq!(args.parallelism, 3);
        assert!(!args.no_color);
    }

    #[test]
    fn test_input_is_required() {
        assert!(CliArgs::try_parse_from(["applyview"]).is_err());
    }
}
