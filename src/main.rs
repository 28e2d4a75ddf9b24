mod report;

use simlookup::{
    CatalogSnapshot, Options, Strategy, StrategyMask, candidates, load_records_from_path, lookup_verbose_with,
    scan_text,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::Level;

const CATALOG_ENV: &str = "SIMLOOKUP_CATALOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    let records = match load_records_from_path(&config.catalog) {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(error = %err, "catalog unavailable");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let snapshot = CatalogSnapshot::build(records);
    let options = Options { strategies: config.strategies };

    let rendered = match config.mode {
        Mode::Lookup => {
            let out = lookup_verbose_with(&snapshot, &config.input, &options);
            if config.json {
                to_json(&out.result)
            } else {
                report::print_lookup(&config.input, &out, &snapshot, config.color);
                Ok(())
            }
        }
        Mode::Candidates => {
            let found = candidates(&snapshot, &config.input, &options);
            if config.json {
                to_json(&found)
            } else {
                report::print_candidates(&config.input, &found, config.color);
                Ok(())
            }
        }
        Mode::Scan => {
            let detections = scan_text(&snapshot, &config.input, &options);
            if config.json {
                to_json(&detections)
            } else {
                report::print_detections(&detections, config.color);
                Ok(())
            }
        }
    };

    if let Err(err) = rendered {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn to_json(value: &impl serde::Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode JSON: {err}"))?;
    println!("{json}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt().with_max_level(level).with_target(false).with_writer(io::stderr).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Lookup,
    Candidates,
    Scan,
}

struct CliConfig {
    input: String,
    catalog: PathBuf,
    mode: Mode,
    strategies: StrategyMask,
    json: bool,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut catalog: Option<PathBuf> = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
    let mut mode = Mode::Lookup;
    let mut strategies = StrategyMask::all();
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("simlookup {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "-v" | "--verbose" => verbose = true,
            "--scan" => mode = set_mode(mode, Mode::Scan)?,
            "--candidates" => mode = set_mode(mode, Mode::Candidates)?,
            "--catalog" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --catalog expects a value".to_string())?;
                catalog = Some(PathBuf::from(value));
            }
            "--disable" => {
                let value = args.next().ok_or_else(|| "error: --disable expects a value".to_string())?;
                strategies.remove(parse_strategy(&value)?.mask());
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--catalog=") => {
                catalog = Some(PathBuf::from(arg.trim_start_matches("--catalog=")));
            }
            _ if arg.starts_with("--disable=") => {
                strategies.remove(parse_strategy(arg.trim_start_matches("--disable="))?.mask());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let catalog = catalog.ok_or_else(|| format!("error: no catalog given (use --catalog or {CATALOG_ENV})"))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    // An all-whitespace identifier is a valid lookup (it resolves to NotFound),
    // but an empty scan has nothing to look at.
    if mode == Mode::Scan && input.trim().is_empty() {
        return Err(format!("error: no text to scan\n\n{}", help_text()));
    }

    Ok(CliConfig { input, catalog, mode, strategies, json, color, verbose })
}

fn set_mode(current: Mode, requested: Mode) -> Result<Mode, String> {
    if current != Mode::Lookup && current != requested {
        return Err("error: --scan and --candidates are mutually exclusive".to_string());
    }
    Ok(requested)
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn parse_strategy(value: &str) -> Result<Strategy, String> {
    Strategy::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
        format!("error: unknown strategy '{value}' (expected one of: {})", names.join(", "))
    })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "simlookup {version}

Resolve a SIM serie, línea or partial label number against a catalog.

Usage:
  simlookup [OPTIONS] [--] <input...>
  simlookup [OPTIONS] --scan < ocr.txt

Input words are joined and all whitespace is removed before matching.
With no input arguments, input is read from stdin.

Options:
  -c, --catalog <path>       Catalog JSON file. Default: ${env}
  --scan                     Treat input as OCR text and resolve every number in it.
  --candidates               List every record the input could denote.
  --disable <strategy>       Skip a strategy (repeatable): {strategies}.
  --json                     Print JSON instead of the report.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log strategy evaluation to stderr.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Lookup ran (found or not found).
  1  Catalog could not be loaded or output could not be written.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        env = CATALOG_ENV,
        strategies = Strategy::ALL.iter().map(|s| s.name()).collect::<Vec<_>>().join(", "),
    )
}
