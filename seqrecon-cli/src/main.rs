use clap::{self, Parser};
use log::{error, info};
use simple_logger::init_with_level;

mod cli;
mod commands;

use cli::{Args, Commands};
use commands::{run_blastn, run_blastx, run_museo, run_stops, run_translate};

fn main() {
    let start = std::time::Instant::now();

    let args = Args::parse();

    if let Err(err) = init_with_level(args.level) {
        eprintln!("failed to initialise logger: {err}");
    }

    let result = match args.command {
        Commands::Blastx(args) => run_blastx(args),
        Commands::Blastn(args) => run_blastn(args),
        Commands::Museo(args) => run_museo(args),
        Commands::Translate(args) => run_translate(args),
        Commands::Stops(args) => run_stops(args),
    };

    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
