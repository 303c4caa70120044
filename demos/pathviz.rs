//! Terminal pathfinding visualizer using crossterm.
//!
//! Run: cargo run --bin pathviz -- --algorithm astar --walls 25

use clap::Parser;
use pathviz_core::{App, AppConfig};
use pathviz_crossterm::CrosstermDriver;
use pathviz_demos::{Cli, visualizer};

fn main() {
    let cli = Cli::parse();
    let model = match visualizer(&cli) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let driver = CrosstermDriver::new().with_mouse(!cli.no_mouse);
    let mut app = App::new(AppConfig { model, driver });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
