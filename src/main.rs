use std::path::PathBuf;

use clap::Parser;
use shelve::{io, logging, tui};

#[derive(Parser)]
#[command(
    name = "shelve",
    about = "Regroups a dynamically rendered list into collapsible sections, live"
)]
struct Cli {
    /// Settings file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let settings = match io::load_or_default(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = tui::run(settings) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
