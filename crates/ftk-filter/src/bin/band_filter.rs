#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use ftk_filter::{BandFilterConfig, BandMask, run};
use ftk_runtime::{TestLogEntry, TestLogLevel, TestResult};

#[derive(Debug, Clone, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    samples: Option<usize>,
    low: Option<f64>,
    high: Option<f64>,
    pass: bool,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
enum CliParseError {
    Help,
    Message(String),
}

fn value_for<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, CliParseError> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| CliParseError::Message(format!("missing value for {flag}")))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, CliParseError> {
    value
        .parse()
        .map_err(|_| CliParseError::Message(format!("invalid value `{value}` for {flag}")))
}

fn parse_cli_args(args: &[String]) -> Result<CliArgs, CliParseError> {
    let mut cli = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Err(CliParseError::Help),
            "--pass" => {
                cli.pass = true;
                index += 1;
            }
            "--config" => {
                cli.config = Some(PathBuf::from(value_for(args, index, "--config")?));
                index += 2;
            }
            "--output-dir" => {
                cli.output_dir = Some(PathBuf::from(value_for(args, index, "--output-dir")?));
                index += 2;
            }
            "--samples" => {
                cli.samples = Some(parse_number(value_for(args, index, "--samples")?, "--samples")?);
                index += 2;
            }
            "--low" => {
                cli.low = Some(parse_number(value_for(args, index, "--low")?, "--low")?);
                index += 2;
            }
            "--high" => {
                cli.high = Some(parse_number(value_for(args, index, "--high")?, "--high")?);
                index += 2;
            }
            "--seed" => {
                cli.seed = Some(parse_number(value_for(args, index, "--seed")?, "--seed")?);
                index += 2;
            }
            unknown => {
                return Err(CliParseError::Message(format!(
                    "unrecognized argument `{unknown}`"
                )));
            }
        }
    }
    Ok(cli)
}

/// Command-line flags override the config file, which overrides defaults.
fn resolve_config(cli: &CliArgs) -> Result<BandFilterConfig, String> {
    let mut config = match &cli.config {
        Some(path) => BandFilterConfig::from_json_file(path)
            .map_err(|err| format!("{}: {err}", path.display()))?,
        None => BandFilterConfig::default(),
    };
    if let Some(samples) = cli.samples {
        config.signal.samples = samples;
    }
    if let Some(seed) = cli.seed {
        config.signal.seed = seed;
    }
    let (mut low, mut high) = config.band.bounds();
    if let Some(value) = cli.low {
        low = value;
    }
    if let Some(value) = cli.high {
        high = value;
    }
    let pass = cli.pass || matches!(config.band, BandMask::Pass { .. });
    config.band = if pass {
        BandMask::Pass { low, high }
    } else {
        BandMask::Stop { low, high }
    };
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} [--config <path>] [--output-dir <path>] [--samples <n>] [--low <f>] [--high <f>] [--pass] [--seed <n>]"
    );
    eprintln!("  --config <path>      JSON run configuration");
    eprintln!("  --output-dir <path>  write column files here (omit for a dry run)");
    eprintln!("  --samples <n>        sample count, a power of two (default 1024)");
    eprintln!("  --low <f>            lower band edge, exclusive (default 0.02)");
    eprintln!("  --high <f>           upper band edge, inclusive (default 1.0)");
    eprintln!("  --pass               keep the band instead of removing it");
    eprintln!("  --seed <n>           noise seed (default 0)");
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv
        .first()
        .cloned()
        .unwrap_or_else(|| String::from("band_filter"));

    let cli = match parse_cli_args(argv.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(CliParseError::Help) => {
            print_usage(&program);
            return ExitCode::SUCCESS;
        }
        Err(CliParseError::Message(message)) => {
            eprintln!("{message}");
            print_usage(&program);
            return ExitCode::from(2);
        }
    };

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&config, cli.output_dir.as_deref()) {
        Ok(summary) => {
            for trace in &summary.traces {
                eprintln!("{}", trace.to_json_line());
            }
            TestLogEntry::new(
                "band_filter",
                "ftk_filter",
                format!(
                    "rejected {} of {} bins, wrote {} files",
                    summary.outcome.rejected_bins(),
                    summary.outcome.frequencies.len(),
                    summary.written.len()
                ),
            )
            .with_seed(config.signal.seed)
            .with_len(config.signal.samples)
            .with_mode(config.transform.mode)
            .with_result(TestResult::Pass)
            .emit();
            ExitCode::SUCCESS
        }
        Err(err) => {
            TestLogEntry::new("band_filter", "ftk_filter", err.to_string())
                .with_level(TestLogLevel::Error)
                .with_seed(config.signal.seed)
                .with_len(config.signal.samples)
                .with_result(TestResult::Fail)
                .emit();
            ExitCode::FAILURE
        }
    }
}
