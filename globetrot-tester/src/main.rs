mod reports;
mod runner;
mod scenario;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use globetrot_tour::{LocationCatalog, TourConfig, TourOrder};
use runner::{ScenarioResult, ScenarioRunner};
use scenario::{ScenarioCtx, all_keys, get_scenario, list_scenarios};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "globetrot-tester", version)]
#[command(about = "Drives the Globetrot tour engine through scripted scenarios on a virtual clock")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Base seed; each cycle adds its index
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Number of cycles per scenario
    #[arg(long, default_value_t = 3)]
    cycles: usize,

    /// Locations JSON to tour instead of the bundled dataset
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Tour timing overrides as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let ctx = load_context(&args)?;
    println!(
        "🗺️  {} stops, seed {}, {} cycle(s) per scenario",
        ctx.order.len(),
        ctx.seed,
        args.cycles
    );

    let results = run_scenarios(&args, &ctx);
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🌏 Globetrot Tour Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_context(args: &Args) -> Result<ScenarioCtx> {
    let config = match &args.config {
        Some(path) => TourConfig::from_json(&read_file(path)?)
            .with_context(|| format!("invalid tour config in {}", path.display()))?,
        None => TourConfig::default(),
    };
    let catalog = match &args.locations {
        Some(path) => LocationCatalog::from_json(&read_file(path)?)
            .with_context(|| format!("invalid locations in {}", path.display()))?,
        None => LocationCatalog::load_from_static().context("bundled locations are invalid")?,
    };
    let order = TourOrder::resolve(config.home, catalog.locations());
    Ok(ScenarioCtx {
        order,
        config,
        seed: args.seed,
        verbose: args.verbose,
    })
}

fn run_scenarios(args: &Args, ctx: &ScenarioCtx) -> Vec<ScenarioResult> {
    println!("{}", "🧭 Running Tour Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let runner = ScenarioRunner::new(args.verbose);
    let mut results = Vec::new();
    for name in expand_scenarios(&args.scenarios) {
        let Some(scenario) = get_scenario(&name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        let result = runner.run(&scenario, ctx, args.cycles);
        if result.passed {
            println!("✅ {} - {:?}", name.green(), result.average_duration);
        } else {
            eprintln!(
                "❌ {} - {}/{} cycles failed",
                name.red(),
                result.failures.len(),
                result.iterations_run
            );
        }
        results.push(result);
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_every_scenario_once() {
        let scenarios = expand_scenarios("teardown, all");
        assert_eq!(scenarios.first().map(String::as_str), Some("teardown"));
        assert_eq!(scenarios.len(), all_keys().len());
        assert!(scenarios.contains(&"interaction-storm".to_string()));
    }

    #[test]
    fn explicit_list_is_kept_in_order() {
        assert_eq!(
            expand_scenarios("idle-resume,full-cycle"),
            vec!["idle-resume", "full-cycle"]
        );
    }

    #[test]
    fn args_default_to_every_scenario() {
        let args = Args::try_parse_from(["globetrot-tester"]).expect("parse");
        assert_eq!(args.scenarios, "all");
        assert_eq!(args.seed, 1337);
        assert_eq!(args.report, "console");
    }

    #[test]
    fn unsupported_report_format_is_rejected() {
        assert!(Args::try_parse_from(["globetrot-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn bundled_context_resolves_a_tour() {
        let args = Args::try_parse_from(["globetrot-tester", "--seed", "9"]).expect("parse");
        let ctx = load_context(&args).expect("context");
        assert_eq!(ctx.seed, 9);
        assert!(!ctx.order.is_empty());
    }

    #[test]
    fn missing_locations_file_is_reported() {
        let args = Args::try_parse_from([
            "globetrot-tester",
            "--locations",
            "/definitely/not/here.json",
        ])
        .expect("parse");
        let err = load_context(&args).expect_err("missing file");
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
