use clap::error::ErrorKind;
use clap::Parser;

use crate::core::surface::SurfaceKind;
use crate::error::BenchError;

/// Shared command-line surface of the three benchmark binaries.
#[derive(Parser, Debug, Clone)]
#[command(about = "Frame-rendering throughput benchmark", long_about = None)]
pub struct Cli {
    /// Number of draw iterations
    pub num_draws: u64,

    /// Surface backing: image | gl | gl_texture
    pub surface_kind: String,
}

/// Validated arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args {
    pub num_draws: u64,
    pub kind: SurfaceKind,
}

/// Parse the process arguments.
///
/// `--help`/`--version` print and exit 0 here. Any other parse failure
/// (wrong argument count, unparsable count) maps to the usage error; an
/// unrecognized surface tag is rejected before any drawing work happens.
pub fn parse(program: &str) -> Result<Args, BenchError> {
    parse_from(program, std::env::args())
}

pub fn parse_from<I, T>(program: &str, args: I) -> Result<Args, BenchError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(_) => return Err(BenchError::usage(program)),
    };

    let kind: SurfaceKind = cli.surface_kind.parse()?;
    Ok(Args {
        num_draws: cli.num_draws,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_surface_tags() {
        for (tag, kind) in [
            ("image", SurfaceKind::Image),
            ("gl", SurfaceKind::Gl),
            ("gl_texture", SurfaceKind::GlTexture),
        ] {
            let args = parse_from("cli-bench", ["cli-bench", "100", tag]).unwrap();
            assert_eq!(args.num_draws, 100);
            assert_eq!(args.kind, kind);
        }
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let err = parse_from("cli-bench", ["cli-bench", "100"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn extra_argument_is_a_usage_error() {
        let err = parse_from("cli-bench", ["cli-bench", "100", "image", "extra"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn non_numeric_count_is_a_usage_error() {
        let err = parse_from("cli-bench", ["cli-bench", "lots", "image"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_tag_is_fatal_with_exit_4() {
        let err = parse_from("cli-bench", ["cli-bench", "100", "bogus"]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.to_string(), "Unknown surface type 'bogus'; fatal.");
    }
}
