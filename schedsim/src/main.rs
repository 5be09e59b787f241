//! # schedsim
//!
//! Command-line entry point for the scheduling simulator.

use schedsim::{RunMode, RunnerConfig, SimRuntime};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("schedsim");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut runtime = SimRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let outcome = runtime.run();

    for entry in runtime.logger_mut().drain() {
        eprintln!("{}", entry);
    }

    match outcome {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunnerConfig, String> {
    let mut config = RunnerConfig::default();
    let mut positional = Vec::new();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--quantum" | "-q" => {
                config.quantum = parse_value(args, &mut i, "--quantum")?;
            }
            "--format" | "-f" => {
                let value = next_value(args, &mut i, "--format")?;
                config.format = value.parse().map_err(|e| format!("{}", e))?;
            }
            "--scale" => {
                config.gantt_scale = parse_value(args, &mut i, "--scale")?;
            }
            "--trace" => {
                config.show_trace = true;
            }
            "--max-processes" => {
                config.max_processes = parse_value(args, &mut i, "--max-processes")?;
            }
            "--log-level" => {
                let value = next_value(args, &mut i, "--log-level")?;
                config.log_level = value.parse().map_err(|e| format!("{}", e))?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') && other.parse::<i64>().is_err() => {
                return Err(format!("Unknown option: {}", other));
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();

    let mode = positional
        .next()
        .ok_or_else(|| "Missing policy".to_string())?;
    config.mode = mode.parse::<RunMode>().map_err(|e| format!("{}", e))?;

    let path = positional
        .next()
        .ok_or_else(|| "Missing workload file".to_string())?;
    config.workload_path = Some(PathBuf::from(path));

    if let Some(quantum) = positional.next() {
        config.quantum = quantum
            .parse()
            .map_err(|_| format!("Invalid quantum value: {}", quantum))?;
    }

    if let Some(extra) = positional.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    Ok(config)
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    i: &mut usize,
    flag: &str,
) -> Result<T, String> {
    let value = next_value(args, i, flag)?;
    value
        .parse()
        .map_err(|_| format!("Invalid {} value: {}", flag.trim_start_matches('-'), value))
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} <fifo|sjf|stcf|rr|all> <workload_file> [quantum] [OPTIONS]",
        program
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -q, --quantum <N>        Round-robin time quantum (default 3)");
    eprintln!("  -f, --format <FORMAT>    Output format: text (default) or json");
    eprintln!("  --scale <N>              Gantt chart columns per tick (default 1)");
    eprintln!("  --trace                  Print the dispatcher trace");
    eprintln!("  --max-processes <N>      Largest accepted workload (default 100)");
    eprintln!("  --log-level <LEVEL>      debug, info, warn (default) or error");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Workload files hold one 'arrival burst [priority]' line per process,");
    eprintln!("or a JSON array of objects when the name ends in .json.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} fifo demos/staggered.txt", program);
    eprintln!("  {} rr demos/idle_gaps.txt 4 --trace", program);
    eprintln!("  {} all demos/staggered.json --format json", program);
}
