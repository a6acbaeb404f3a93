//! Battery federate entry point — CLI wiring and standalone runs.

use std::path::Path;
use std::process;

use batt_fed::config::FederateConfig;
use batt_fed::io::export::export_csv;
use batt_fed::sim::bus::ChargerBus;
use batt_fed::sim::coordinator::LockstepCoordinator;
use batt_fed::sim::engine::Federate;
use batt_fed::sim::types::RunReport;

/// Seed offset for the charger stand-in RNG so its session draws do
/// not correlate with the pack arrival-SOC draws.
const CHARGER_SEED_OFFSET: u64 = 57;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    telemetry_out: Option<String>,
    quiet: bool,
}

fn print_help() {
    eprintln!("batt-fed — EV battery value federate, standalone runner");
    eprintln!();
    eprintln!("Usage: batt-fed [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (week, day, hour)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --telemetry-out <path>   Export tick records to CSV");
    eprintln!("  --quiet                  Suppress per-tick log lines");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the week preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        telemetry_out: None,
        quiet: false,
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
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            "--quiet" => {
                cli.quiet = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then the week default
    let mut config = if let Some(ref path) = cli.scenario_path {
        match FederateConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match FederateConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        FederateConfig::preset_week()
    };

    if let Some(seed) = cli.seed_override {
        config.simulation.seed = seed;
    }

    // Any config violation is fatal before execution starts.
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let units = config.units();
    let c = &config.charger;
    let bus = ChargerBus::new(
        units,
        c.supply_voltage,
        c.dwell_ticks_min,
        c.dwell_ticks_max,
        config.simulation.seed.wrapping_add(CHARGER_SEED_OFFSET),
    );
    let mut federate = Federate::new(&config, LockstepCoordinator::new(), bus);

    let records = match federate.run() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if !cli.quiet {
        for r in &records {
            println!("{r}");
        }
    }

    let report = RunReport::from_records(&records, units);
    println!("\n{report}");

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
