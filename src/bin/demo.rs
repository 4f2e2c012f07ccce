//! SpillSlice Demo Binary
//!
//! Fills a sequence far past its head capacity, deletes a range, and
//! reports what ended up in memory and on disk.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use spillslice::{Config, HybridSequence};
use tracing_subscriber::{fmt, EnvFilter};

/// SpillSlice Demo
#[derive(Parser, Debug)]
#[command(name = "spillslice-demo")]
#[command(about = "Exercise a memory-head / disk-tail sequence")]
#[command(version)]
struct Args {
    /// Parent directory for slot files (defaults to the system temp dir)
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Elements kept in memory
    #[arg(short = 'c', long, default_value = "512")]
    head_capacity: usize,

    /// Elements to append
    #[arg(short = 'n', long, default_value = "10000")]
    count: usize,

    /// Bytes per element
    #[arg(short, long, default_value = "1024")]
    payload_size: usize,

    /// First index to delete
    #[arg(long, default_value = "0")]
    delete_start: usize,

    /// Number of elements to delete
    #[arg(long, default_value = "100")]
    delete_count: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,spillslice=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("SpillSlice demo v{}", spillslice::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> spillslice::Result<()> {
    let mut builder = Config::builder().head_capacity(args.head_capacity);
    if let Some(root) = &args.root_dir {
        builder = builder.root_dir(root);
    }

    let mut seq: HybridSequence<String> = HybridSequence::open(builder.build())?;

    let started = Instant::now();
    for i in 0..args.count {
        let digit = char::from(b'0' + (i % 10) as u8);
        seq.push(std::iter::repeat(digit).take(args.payload_size).collect())?;
    }
    tracing::info!(
        "Appended {} elements of {} bytes in {:?} (head {}, tail {})",
        args.count,
        args.payload_size,
        started.elapsed(),
        seq.head_len(),
        seq.tail_len()
    );

    let started = Instant::now();
    seq.delete(args.delete_start, args.delete_count)?;
    tracing::info!(
        "Deleted {} elements at {} in {:?} (len {}, head {}, tail {})",
        args.delete_count,
        args.delete_start,
        started.elapsed(),
        seq.len(),
        seq.head_len(),
        seq.tail_len()
    );

    let report = seq.cleanup().wait()?;
    tracing::info!(
        "Cleanup done: {} slots reclaimed, {} failures, directory removed: {}",
        report.reclaimed,
        report.failed,
        report.dir_removed
    );

    Ok(())
}
