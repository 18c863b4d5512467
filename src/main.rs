//! Headless batch benchmark: a fixed number of draws into the selected
//! surface, with a progress meter and a total elapsed-time summary.

use std::io;
use std::process;

use raster_bench::cli;
use raster_bench::core::driver::{self, BenchConfig, SURFACE_HEIGHT, SURFACE_WIDTH};
use raster_bench::scene::CircleScene;

fn main() {
    env_logger::init();

    let args = match cli::parse("cli-bench") {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    };

    let config = BenchConfig::batch(args.num_draws, args.kind);
    let mut scene = CircleScene::new(SURFACE_WIDTH, SURFACE_HEIGHT);

    if let Err(err) = driver::run_batch(&config, &mut scene, &mut io::stdout()) {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}
