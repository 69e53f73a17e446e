//! GradeChart CLI: headless access to the same assessments the viewer shows.
//!
//! Commands:
//! - `summary`: one row per assessment: count, mean, spread, peak
//! - `render`: the chart model of one assessment as JSON

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use gradechart_core::config::ViewerConfig;
use gradechart_core::{logging, source, BucketPolicy, ChartNavigator, MeanMode};

#[derive(Parser)]
#[command(
    name = "gradechart",
    about = "GradeChart CLI: grade distributions from a gradebook JSON"
)]
struct Cli {
    /// Config file. Defaults to <config dir>/gradechart/config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the true average for the mean line instead of its floor.
    #[arg(long, global = true, default_value_t = false)]
    exact_mean: bool,

    /// Fail on scores outside 0..=max instead of clamping them.
    #[arg(long, global = true, default_value_t = false)]
    strict_buckets: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// GitHub contents API URL of the gradebook.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the gradebook from a local JSON file instead.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary table, one row per assessment.
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the chart model of one assessment as JSON.
    Render {
        /// Zero-based assessment position.
        #[arg(long, default_value_t = 0)]
        index: usize,

        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_stderr(logging::level_from_verbosity(cli.verbose))?;

    match &cli.command {
        Commands::Summary { source } => {
            let navigator = load(&cli, source)?;
            print_summary(&navigator);
            Ok(())
        }
        Commands::Render { index, source } => {
            let navigator = load(&cli, source)?;
            run_render(navigator, *index)
        }
    }
}

fn resolve_config(cli: &Cli, args: &SourceArgs) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::resolve(cli.config.as_deref()).context("loading config")?;
    if let Some(url) = &args.url {
        config.source.url = url.clone();
        config.source.file = None;
    }
    if let Some(file) = &args.file {
        config.source.file = Some(file.clone());
    }
    if cli.exact_mean {
        config.chart.mean_mode = MeanMode::Exact;
    }
    if cli.strict_buckets {
        config.chart.bucket_policy = BucketPolicy::Reject;
    }
    config.validate()?;
    Ok(config)
}

fn load(cli: &Cli, args: &SourceArgs) -> Result<ChartNavigator> {
    let config = resolve_config(cli, args)?;
    let source = source::from_config(&config.source)?;
    let assessments = source::load_assessments(source.as_ref(), config.chart.bucket_policy)
        .with_context(|| format!("loading gradebook from {}", source.describe()))?;
    Ok(ChartNavigator::new(assessments)?.with_style(config.chart.style()))
}

fn print_summary(navigator: &ChartNavigator) {
    println!(
        "{:>3}  {:<28} {:>5} {:>7} {:>5} {:>6} {:>6} {:>6} {:>5} {:>7}",
        "#", "Assessment", "n", "mean", "line", "σ", "min", "max", "peak", "clamped"
    );
    println!("{}", "-".repeat(92));
    for (i, assessment) in navigator.assessments().iter().enumerate() {
        let s = assessment.summary();
        println!(
            "{:>3}  {:<28} {:>5} {:>7.2} {:>5} {:>6.2} {:>6.2} {:>6.2} {:>5} {:>7}",
            i,
            truncate(assessment.label(), 28),
            s.count,
            s.mean,
            s.truncated_mean,
            s.std_dev,
            s.min,
            s.max,
            s.peak_count,
            s.clamped
        );
    }
}

fn run_render(mut navigator: ChartNavigator, index: usize) -> Result<()> {
    if index >= navigator.len() {
        bail!(
            "index {index} out of range: the gradebook has {} assessment(s)",
            navigator.len()
        );
    }
    for _ in 0..index {
        navigator.advance();
    }
    let spec = navigator.render_model();
    info!("rendering '{}'", spec.title);
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let head: String = label.chars().take(width - 1).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_with_global_flags() {
        let cli = Cli::try_parse_from([
            "gradechart",
            "render",
            "--index",
            "2",
            "--file",
            "notes.json",
            "--exact-mean",
            "-vv",
        ])
        .unwrap();
        assert!(cli.exact_mean);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render { index, source } => {
                assert_eq!(index, 2);
                assert_eq!(source.file, Some(PathBuf::from("notes.json")));
            }
            Commands::Summary { .. } => panic!("expected render"),
        }
    }

    #[test]
    fn url_and_file_conflict() {
        let res = Cli::try_parse_from([
            "gradechart",
            "summary",
            "--url",
            "https://example.org/x.json",
            "--file",
            "notes.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[source]\ntimeout_secs = 3\n\n[chart]\nmean_mode = \"exact\"\n")
            .unwrap();

        let cli = Cli::try_parse_from([
            "gradechart",
            "--strict-buckets",
            "--config",
            config_path.to_str().unwrap(),
            "summary",
            "--file",
            "notes.json",
        ])
        .unwrap();
        let Commands::Summary { source } = &cli.command else {
            panic!("expected summary");
        };

        let config = resolve_config(&cli, source).unwrap();
        assert_eq!(config.source.timeout_secs, 3);
        assert_eq!(config.source.file, Some(PathBuf::from("notes.json")));
        assert_eq!(config.chart.bucket_policy, BucketPolicy::Reject);
        assert_eq!(config.chart.mean_mode, MeanMode::Exact);
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(truncate("DS1", 28), "DS1");
        let long = "Évaluation de fin de trimestre n°2";
        let short = truncate(long, 10);
        assert_eq!(short.chars().count(), 10);
        assert!(short.ends_with('…'));
    }
}
