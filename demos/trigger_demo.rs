//! Edge triggering demo.
//!
//! Builds a pulse track with the `track!` macro and prints the edges found
//! while playing it forward over two cycles, then backward over the same span.
//!
//! Run with `RUST_LOG=debug` to see the triggering job logs.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tripwire::{Edge, FloatTrack, TriggeringJob, track};

const THRESHOLD: f64 = 0.5;

fn print_edges(label: &str, edges: &[Edge]) {
    println!("{} ({} edges):", label, edges.len());
    for edge in edges {
        let kind = if edge.rising { "rising " } else { "falling" };
        println!("  {} at {:>7.4}", kind, edge.time);
    }
}

fn run(track: &FloatTrack, from: f64, to: f64, buffer: &mut [Edge]) -> Result<Vec<Edge>> {
    let mut job = TriggeringJob::new()
        .with_range(from, to)
        .with_threshold(THRESHOLD)
        .with_track(track)
        .with_output(buffer);
    Ok(job.triggered_edges()?.to_vec())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Ramp up, hold, ramp down, then a short square blip.
    let track = track![
        0.0 => 0.0,
        0.2 => 1.0,
        0.4 => 1.0,
        0.6 => 0.0 step,
        0.8 => 0.8 step,
        0.9 => 0.0,
    ];

    let mut buffer = [Edge::default(); 16];

    let forward = run(&track, 0.0, 2.0, &mut buffer)?;
    print_edges("forward 0.0 -> 2.0", &forward);

    let backward = run(&track, 2.0, 0.0, &mut buffer)?;
    print_edges("backward 2.0 -> 0.0", &backward);

    // A buffer that is too small reports an overflow instead of truncating.
    let mut small = [Edge::default(); 2];
    match run(&track, 0.0, 2.0, &mut small) {
        Ok(edges) => print_edges("small buffer", &edges),
        Err(err) => println!("small buffer: {}", err),
    }

    Ok(())
}
