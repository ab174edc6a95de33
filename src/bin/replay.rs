// Standalone replay tool for analyzing SnakeGo decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                    Replay all decisions
//   --rounds <r1,r2>         Replay specific rounds (comma-separated)
//   --validate <r:action>    Check logged actions against expectations
//   --verbose                Show detailed output for each decision
//   --config <path>          Path to SnakeGo.toml (default: SnakeGo.toml)

use std::env;
use std::process;

use snakego_bot::config::Config;
use snakego_bot::replay::ReplayEngine;
use snakego_bot::types::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    All,
    Rounds,
    Validate,
}

fn print_usage() {
    eprintln!("SnakeGo Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay every decision in the log");
    eprintln!("  --rounds <R1,R2,...>    Replay specific rounds (comma-separated)");
    eprintln!("  --validate <R:A,...>    Validate logged actions (format: round:action,...)");
    eprintln!("  --verbose               Show detailed output for each decision");
    eprintln!("  --config <path>         Path to SnakeGo.toml (default: SnakeGo.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay snakego_decisions.jsonl --all");
    eprintln!("  replay snakego_decisions.jsonl --rounds 5,10,15");
    eprintln!("  replay snakego_decisions.jsonl --validate 5:up,10:right|split");
}

fn parse_rounds(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|r| {
            r.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid round number '{}': {}", r, e))
        })
        .collect()
}

fn parse_expected_actions(s: &str) -> Result<Vec<(i32, Vec<Action>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'round:action'", pair));
            }

            let round = parts[0]
                .parse::<i32>()
                .map_err(|e| format!("Invalid round number '{}': {}", parts[0], e))?;

            // Several acceptable actions may be separated by '|'
            let actions: Result<Vec<Action>, String> =
                parts[1].split('|').map(|a| Action::parse(a.trim())).collect();

            Ok((round, actions?))
        })
        .collect()
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "SnakeGo.toml".to_string();
    let mut verbose = false;
    let mut mode = None;
    let mut mode_arg = String::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Some(Mode::All),
            flag @ ("--rounds" | "--validate" | "--config") => {
                let value = args
                    .get(i + 1)
                    .cloned()
                    .unwrap_or_else(|| fail(format!("{} requires an argument", flag)));
                match flag {
                    "--rounds" => {
                        mode = Some(Mode::Rounds);
                        mode_arg = value;
                    }
                    "--validate" => {
                        mode = Some(Mode::Validate);
                        mode_arg = value;
                    }
                    _ => config_path = value,
                }
                i += 1;
            }
            "--verbose" => verbose = true,
            other => {
                print_usage();
                fail(format!("Unknown option '{}'", other));
            }
        }
        i += 1;
    }

    let mode = mode.unwrap_or_else(|| {
        print_usage();
        fail("Must specify --all, --rounds, or --validate".to_string())
    });

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = engine
        .load_log_file(log_file)
        .unwrap_or_else(|e| fail(format!("loading log file: {}", e)));

    if entries.is_empty() {
        fail("Log file is empty".to_string());
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} decisions...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Rounds => {
            let rounds = parse_rounds(&mode_arg).unwrap_or_else(|e| fail(e));
            println!("Replaying {} specific round(s)...\n", rounds.len());
            let results = engine
                .replay_rounds(&entries, &rounds)
                .unwrap_or_else(|e| fail(format!("during replay: {}", e)));
            engine.print_report(&results);
        }
        Mode::Validate => {
            let expected = parse_expected_actions(&mode_arg).unwrap_or_else(|e| fail(e));
            println!("Validating {} expected action(s)...\n", expected.len());
            match engine.validate_expected_actions(&entries, &expected) {
                Ok(()) => println!("✓ All expected actions validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
