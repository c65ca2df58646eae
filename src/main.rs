use hbs_osi::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the generated output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        tracing::error!("{error:#}");
        std::process::exit(1);
    }
}
