//! fl-energy entry point: CLI wiring and config-driven grid construction.

use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fl_energy::config::ScenarioConfig;
use fl_energy::io::export::export_csv;
use fl_energy::scenario::build_grid;
use fl_energy::sim::kpi::RunReport;
use fl_energy::sim::snapshot::Snapshot;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    days_override: Option<usize>,
    telemetry_out: Option<String>,
    snapshot_out: Option<String>,
    restore_from: Option<String>,
}

fn print_help() {
    eprintln!("fl-energy - bounded energy transfer grid simulator");
    eprintln!();
    eprintln!("Usage: fl-energy [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --days <n>               Override number of simulated days");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    eprintln!("  --snapshot-out <path>    Save final energy levels as TOML");
    eprintln!("  --restore <path>         Restore energy levels before running");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

/// Returns the value following a flag or exits with an error.
fn flag_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires a {what} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        days_override: None,
        telemetry_out: None,
        snapshot_out: None,
        restore_from: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(flag_value(&args, i, "--scenario", "path"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "name"));
            }
            "--seed" => {
                i += 1;
                let raw = flag_value(&args, i, "--seed", "u64");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--days" => {
                i += 1;
                let raw = flag_value(&args, i, "--days", "count");
                if let Ok(d) = raw.parse::<usize>() {
                    cli.days_override = Some(d);
                } else {
                    eprintln!("error: --days value \"{raw}\" is not a valid count");
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                cli.telemetry_out = Some(flag_value(&args, i, "--telemetry-out", "path"));
            }
            "--snapshot-out" => {
                i += 1;
                cli.snapshot_out = Some(flag_value(&args, i, "--snapshot-out", "path"));
            }
            "--restore" => {
                i += 1;
                cli.restore_from = Some(flag_value(&args, i, "--restore", "path"));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(days) = cli.days_override {
        scenario.simulation.days = days;
    }

    let mut grid = match build_grid(&scenario) {
        Ok(grid) => grid,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    if let Some(ref path) = cli.restore_from {
        let restored = Snapshot::load(Path::new(path)).and_then(|s| grid.restore(&s));
        if let Err(e) = restored {
            eprintln!("error: {e}");
            process::exit(1);
        }
        info!(path = %path, "energy levels restored");
    }

    let results = grid.run();
    let report = RunReport::from_results(&results);

    for r in &results {
        println!("{r}");
    }
    println!("\n{report}");

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, &grid.link_labels(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, "telemetry written");
    }

    if let Some(ref path) = cli.snapshot_out {
        if let Err(e) = grid.snapshot().save(Path::new(path)) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        info!(path = %path, "snapshot written");
    }
}
