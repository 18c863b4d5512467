//! Plain timed loop: identical shape to the batch benchmark but drawing
//! the translucent overlay scene.

use std::io;
use std::process;

use raster_bench::cli;
use raster_bench::core::driver::{self, BenchConfig, SURFACE_HEIGHT, SURFACE_WIDTH};
use raster_bench::scene::CircleScene;

fn main() {
    env_logger::init();

    let args = match cli::parse("timed-bench") {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    };

    let config = BenchConfig::batch(args.num_draws, args.kind);
    let mut scene = CircleScene::overlay(SURFACE_WIDTH, SURFACE_HEIGHT);

    if let Err(err) = driver::run_batch(&config, &mut scene, &mut io::stdout()) {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}
