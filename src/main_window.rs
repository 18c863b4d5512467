//! Windowed real-time benchmark: animated frames presented until the
//! window is closed or Escape is released, then an FPS and per-phase
//! timing summary.

use std::process;

use raster_bench::cli;
use raster_bench::core::driver::BenchConfig;
use raster_bench::core::window;

fn main() {
    env_logger::init();

    let args = match cli::parse("window-bench") {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    };

    // Termination is event-driven; the iteration count is accepted for
    // command-line parity with the batch binaries.
    let _ = args.num_draws;

    let config = BenchConfig::windowed(args.kind);

    match window::run_windowed(&config) {
        Ok(report) => {
            println!("FPS: {:.1}", report.fps());
            println!(
                "Raster average time: {}ms",
                report.phases.average_raster_ms().unwrap_or(0)
            );
            println!(
                "Present average time: {}ms",
                report.phases.average_present_ms().unwrap_or(0)
            );
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    }
}
