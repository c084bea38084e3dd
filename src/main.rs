use clap::Parser;
use gtd::cli::commands::Cli;
use gtd::cli::handlers;

fn main() {
    gtd::logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
