use colored::Colorize;
use json_model_gen::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn main() {
    let command_line_interface = CommandLineInterface::load();
    init_logging(command_line_interface.log_enabled());
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Logs stay quiet unless `--log` / `SP_LOG` is set; `RUST_LOG` overrides both.
fn init_logging(enabled: bool) {
    let default_directive = if enabled { "json_model_gen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
