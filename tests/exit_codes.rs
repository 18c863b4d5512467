//! End-to-end exit-code and output contracts, exercised on the built
//! binaries. Only GPU-free paths run here: usage errors, unknown surface
//! tags, and the CPU-backed `image` kind.

use std::process::{Command, Output};

fn cli_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cli-bench"))
        .args(args)
        .output()
        .expect("failed to spawn cli-bench")
}

fn timed_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_timed-bench"))
        .args(args)
        .output()
        .expect("failed to spawn timed-bench")
}

fn window_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_window-bench"))
        .args(args)
        .output()
        .expect("failed to spawn window-bench")
}

#[test]
fn wrong_argument_count_exits_1_with_usage() {
    let out = cli_bench(&["100"]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: cli-bench <num_draws> [image | gl | gl_texture]"));
    assert!(out.stdout.is_empty());
}

#[test]
fn no_arguments_exits_1() {
    let out = cli_bench(&[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_surface_kind_exits_4_without_drawing() {
    let out = cli_bench(&["100", "bogus"]);
    assert_eq!(out.status.code(), Some(4));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown surface type 'bogus'; fatal."));
    // Zero draw operations: no progress output at all.
    assert!(out.stdout.is_empty());
}

#[test]
fn image_batch_run_exits_0_with_one_done_summary() {
    let out = cli_bench(&["100", "image"]);
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Performing 100 iterations: "));
    assert_eq!(stdout.matches("done!").count(), 1);

    let marks = stdout.matches('+').count();
    assert!((9..=11).contains(&marks), "{} marks", marks);

    // The summary carries a non-negative integer millisecond count.
    let tail = stdout.split(" done! (").nth(1).expect("no summary");
    let ms_text = tail.split("ms)").next().expect("no ms suffix");
    ms_text.parse::<u64>().expect("unparsable ms count");
}

#[test]
fn timed_variant_matches_the_batch_contract() {
    let out = timed_bench(&["50", "image"]);
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Performing 50 iterations: "));
    assert_eq!(stdout.matches("done!").count(), 1);
}

#[test]
fn timed_variant_rejects_unknown_kind() {
    let out = timed_bench(&["50", "glx"]);
    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn window_variant_shares_the_usage_contract() {
    // Argument validation happens before any window is opened, so these
    // paths are safe to exercise headlessly.
    let out = window_bench(&["100"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr)
        .contains("Usage: window-bench <num_draws> [image | gl | gl_texture]"));

    let out = window_bench(&["100", "bogus"]);
    assert_eq!(out.status.code(), Some(4));
}
