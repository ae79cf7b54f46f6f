use clap::Parser;
use nsrecon_cli::cli::Cli;
use nsrecon_cli::error::exit_with_error;

fn init_tracing(cli: &Cli) {
    // Row-progress lines are this tool's primary terminal output, so
    // the default level is "info":
    //   --quiet  → "off"
    //   --verbose → "debug"
    //   default  → RUST_LOG if set, otherwise "info"
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = nsrecon_cli::run(cli).await {
        exit_with_error(e);
    }
}
