use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "costmerge", version, about = "Combine and render cost estimate reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Combine cost reports and render them in the chosen format
    Output(OutputArgs),
    /// Check that cost reports can be combined, without rendering
    Validate(ValidateArgs),
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Path to a JSON cost report. Repeat for several; glob patterns are expanded
    #[arg(short, long = "path", required = true)]
    pub paths: Vec<String>,

    /// Output format: json, diff, table, html, github-comment, gitlab-comment, slack-message
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Comma separated fields to include (table and html only), or 'all'
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Show unsupported and free resources
    #[arg(long)]
    pub show_skipped: bool,

    /// Save output to a file
    #[arg(short, long)]
    pub out_file: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Path to a JSON cost report. Repeat for several; glob patterns are expanded
    #[arg(short, long = "path", required = true)]
    pub paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_args() {
        let cli = Cli::try_parse_from([
            "costmerge", "output", "-p", "a.json", "--path", "b.json",
            "--format", "html", "--fields", "price,unit", "-o", "out.html",
        ])
        .unwrap();
        let Commands::Output(args) = cli.command else { panic!("expected output") };
        assert_eq!(args.paths, vec!["a.json", "b.json"]);
        assert_eq!(args.format, "html");
        assert_eq!(args.fields, Some(vec!["price".to_string(), "unit".to_string()]));
        assert_eq!(args.out_file, Some(PathBuf::from("out.html")));
        assert!(!args.show_skipped);
    }

    #[test]
    fn test_output_defaults() {
        let cli = Cli::try_parse_from(["costmerge", "output", "-p", "a.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_format, LogFormat::Text);
        let Commands::Output(args) = cli.command else { panic!("expected output") };
        assert_eq!(args.format, "table");
        assert!(args.fields.is_none());
        assert!(args.out_file.is_none());
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["costmerge", "output"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "costmerge", "validate", "-p", "a.json", "-vv", "--no-color", "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
