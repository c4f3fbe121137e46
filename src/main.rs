use clap::Parser;
use costmerge::cli::{self, Cli, Commands, LogFormat};
use costmerge::config::{self, CostmergeConfig};
use costmerge::errors::CostmergeError;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Config warnings are logged before the config's own log level is known
    let config = {
        let _guard = tracing::subscriber::set_default(build_subscriber(&cli, None, cli.no_color));
        load_config(&cli).await
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if config.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let subscriber = build_subscriber(&cli, config.log_level.as_deref(), config.no_color);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Output(args) => cli::output::handle_output(args, config, cli.quiet).await,
        Commands::Validate(args) => cli::validate::handle_validate(args, config).await,
    };

    if let Err(e) = result {
        exit_with(e);
    }
}

async fn load_config(cli: &Cli) -> Result<CostmergeConfig, CostmergeError> {
    let mut config = config::load_config(cli.config.as_deref()).await?;
    if cli.no_color {
        config.no_color = true;
    }
    Ok(config)
}

fn build_subscriber(
    cli: &Cli,
    config_level: Option<&str>,
    no_color: bool,
) -> Box<dyn Subscriber + Send + Sync> {
    let log_level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => config_level.unwrap_or("warn"),
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr);

    match cli.log_format {
        LogFormat::Json => Box::new(builder.json().finish()),
        LogFormat::Text => Box::new(builder.finish()),
    }
}

fn exit_with(e: CostmergeError) -> ! {
    eprintln!("Error: {}", e);
    let classification = e.classify();
    tracing::debug!(error_type = classification.error_type, "Command failed");
    std::process::exit(classification.exit_code);
}
