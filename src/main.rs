mod report;

use country_lookup::{Clock, Config, OffsetBasis, ResultState, SearchQuery, cards, parse_timeout};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let submitter = match cli.config.submitter() {
        Ok(submitter) => submitter,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let started = Instant::now();
    let state = submitter.submit(&cli.input).await;
    let elapsed = started.elapsed();

    let clock = Clock::system();
    let cards = cards(state.records(), &clock, &cli.config.localize);
    let query = SearchQuery::new(&cli.input);

    if cli.json {
        let out = JsonOutput { query: query.as_str(), result: &state, cards: &cards };
        match serde_json::to_string_pretty(&out) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode result: {err}");
                std::process::exit(1);
            }
        }
    } else {
        report::print_result(query.as_str(), &state, &cards, elapsed, cli.color);
    }

    if matches!(state, ResultState::Error(_)) {
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    result: &'a ResultState,
    cards: &'a [country_lookup::CountryCard],
}

/// Logs go to stderr; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    input: String,
    config: Config,
    color: bool,
    json: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = Config::from_env().map_err(|err| format!("error: {err}"))?;
    let mut input: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut json = false;
    let mut extra_blocked: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("country-lookup {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--caller-local" => config.localize.basis = OffsetBasis::CallerLocal,
            "--no-default-block" => config.denylist = country_lookup::Denylist::empty(),
            "--base-url" => {
                let value = args.next().ok_or_else(|| "error: --base-url expects a value".to_string())?;
                set_base_url(&mut config, &value)?;
            }
            "--block" => {
                let value = args.next().ok_or_else(|| "error: --block expects a value".to_string())?;
                extra_blocked.push(value);
            }
            "--timeout" => {
                let value = args.next().ok_or_else(|| "error: --timeout expects a value".to_string())?;
                config.timeout = Some(parse_timeout(&value).map_err(|err| format!("error: {err}"))?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--base-url=") => {
                set_base_url(&mut config, arg.trim_start_matches("--base-url="))?;
            }
            _ if arg.starts_with("--block=") => {
                extra_blocked.push(arg.trim_start_matches("--block=").to_string());
            }
            _ if arg.starts_with("--timeout=") => {
                let value = arg.trim_start_matches("--timeout=");
                config.timeout = Some(parse_timeout(value).map_err(|err| format!("error: {err}"))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    // Applied after the loop so `--no-default-block` can appear anywhere.
    for term in &extra_blocked {
        config.denylist.insert(term);
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, config, color, json })
}

fn set_base_url(config: &mut Config, value: &str) -> Result<(), String> {
    config.set_base_url(value).map_err(|err| format!("error: {err}"))
}

fn read_stdin_input() -> Result<String, String> {
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "country-lookup {version}

Look up countries by name using the REST Countries API.

Usage:
  country-lookup [OPTIONS] [--] <country...>
  country-lookup [OPTIONS] --input <text>

Options:
  -i, --input <text>         Country name to search for. If omitted, reads
                             remaining args, or stdin when it is not a terminal.
  --base-url <url>           API base URL. Default: {base_url}
  --block <term>             Add a term to the denylist (repeatable).
  --no-default-block         Start from an empty denylist.
  --timeout <secs>           Request timeout. Default: none.
  --caller-local             Add offsets to the local clock instead of UTC.
  --json                     Print the result as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {env_base}, {env_blocked} (comma-separated),
  {env_timeout}, {env_format} (chrono strftime),
  RUST_LOG (log filter, default: warn).

Exit codes:
  0  Countries found, none found, or search blocked.
  1  Lookup failed.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        base_url = country_lookup::DEFAULT_BASE_URL,
        env_base = country_lookup::ENV_BASE_URL,
        env_blocked = country_lookup::ENV_BLOCKED,
        env_timeout = country_lookup::ENV_TIMEOUT_SECS,
        env_format = country_lookup::ENV_TIME_FORMAT,
    )
}
