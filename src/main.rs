//! PageSim - a virtual-memory paging simulator.
//!
//! Runs a memory reference trace through the paging engine with a chosen
//! replacement policy and reports the resulting metrics.

use anyhow::{Context, Result};
use clap::Parser;
use pagesim::memory::{MemoryManager, PolicyKind};
use pagesim::process::{Process, ProcessId};
use pagesim::trace;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// PageSim - simulate page replacement over a reference trace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file: one `<pid> <page>` access per line
    trace: PathBuf,

    /// Number of physical frames
    #[arg(short, long, default_value = "3")]
    frames: usize,

    /// Replacement policy
    #[arg(short, long, value_enum, default_value = "fifo")]
    policy: PolicyKind,

    /// Print the final snapshot as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let requests = trace::load_trace(&args.trace)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;

    // The full trace doubles as the forward-reference oracle for OPT.
    let engine =
        MemoryManager::with_reference_trace(args.frames, args.policy.build(), requests.clone())
            .context("Failed to construct paging engine")?;

    let mut processes: BTreeMap<ProcessId, Process> = BTreeMap::new();
    for request in &requests {
        processes
            .entry(request.pid().clone())
            .or_insert_with(|| Process::new(request.pid().clone()));
    }

    for request in &requests {
        let process = &processes[request.pid()];
        engine
            .access(process, request.page())
            .with_context(|| format!("Access {request} failed"))?;
    }

    if args.json {
        let snapshot = engine.capture_snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_report(&engine, &processes);
    Ok(())
}

fn print_report(engine: &MemoryManager, processes: &BTreeMap<ProcessId, Process>) {
    let snapshot = engine.capture_snapshot();
    let counters = snapshot.counters;

    println!("{snapshot}");
    println!("Metrics ({}):", snapshot.algorithm);
    println!("  Total accesses:  {}", counters.total_accesses);
    println!("  Hits:            {}", counters.hits());
    println!("  Page faults:     {}", counters.page_faults);
    println!("  Replacements:    {}", counters.page_replacements);
    println!("  Page loads:      {}", counters.total_page_loads);
    println!(
        "  Free frames:     {}/{}",
        snapshot.free_frame_count(),
        snapshot.total_frames
    );
    println!("  Fault rate:      {:.2}%", snapshot.fault_rate() * 100.0);
    println!("Per-process faults:");
    for (pid, process) in processes {
        println!("  {pid}: {}", process.page_fault_count());
    }
}
