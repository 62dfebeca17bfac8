use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use pixmatch_rs::image_pipeline::{
    BatchInput, ComparisonPipeline, DimensionPolicy, FetchConfig, PipelineConfig,
    PipelineConfigBuilder,
};
use pixmatch_rs::logger::{self, error, info};

/// Pixel-exact image comparison for visual regression checks
///
/// Fetches base and candidate images (http(s) URLs or local paths), decodes
/// them to RGBA and counts the pixel positions that differ.
#[derive(Parser, Debug)]
#[command(name = "pixmatch")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "EXAMPLES:
    pixmatch base.png comp.png
    pixmatch pair https://cdn.example/a.png https://cdn.example/b.png
    pixmatch batch --input urls.json

EXIT CODES:
    0 - Success
    1 - Error (fetch, decode or input failure)
    2 - Usage error")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base image URL or path (same as `pixmatch pair BASE COMP`)
    #[arg(value_name = "BASE", requires = "comp")]
    base: Option<String>,

    /// Candidate image URL or path
    #[arg(value_name = "COMP")]
    comp: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a single pair and print its mismatch count
    Pair {
        /// Base image URL or path
        #[arg(value_name = "BASE")]
        base: String,

        /// Candidate image URL or path
        #[arg(value_name = "COMP")]
        comp: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Compare every pair listed in a JSON batch file
    Batch {
        /// Batch file: {"urls": [{"baseURL": "...", "compURL": "..."}]}
        #[arg(short, long, value_name = "FILE", default_value = "urls.json")]
        input: PathBuf,

        /// Only process the first N pairs
        #[arg(long, value_name = "N")]
        max_pairs: Option<usize>,

        /// Fail when a pair's images differ in size instead of comparing the overlap
        #[arg(long)]
        strict_dimensions: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Per-request download timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Number of timed comparison passes
    #[arg(long, value_name = "N", default_value_t = 1)]
    repeat: usize,

    /// Print a per-stage timing summary
    #[arg(long)]
    timings: bool,
}

impl CommonArgs {
    fn config_builder(&self) -> PipelineConfigBuilder {
        PipelineConfig::builder()
            .fetch(
                FetchConfig::builder()
                    .timeout(Duration::from_secs(self.timeout_secs))
                    .build(),
            )
            .repeat(self.repeat)
    }
}

fn log_effective_config(config: &PipelineConfig) {
    info!(
        "Timeout {:?}, dimension policy {:?}, {} pass(es), max pairs {:?}",
        config.fetch.timeout, config.dimension_policy, config.repeat, config.max_pairs
    );
}

fn run_pair(base: &str, comp: &str, common: &CommonArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let pipeline = ComparisonPipeline::new(common.config_builder().build())
        .context("failed to initialize comparison pipeline")?;
    log_effective_config(pipeline.config());

    let (report, timings) = pipeline
        .compare_urls_with_timings(base, comp)
        .with_context(|| format!("failed to compare {} with {}", base, comp))?;

    println!("{}", report.mismatched);
    println!("Elapsed: {:.6} seconds", start.elapsed().as_secs_f64());

    if common.timings {
        timings.print_summary();
    }
    Ok(())
}

fn run_batch(
    input: &Path,
    max_pairs: Option<usize>,
    strict_dimensions: bool,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    let batch = BatchInput::from_path(input)
        .with_context(|| format!("failed to load batch input {}", input.display()))?;

    let policy = if strict_dimensions {
        DimensionPolicy::Strict
    } else {
        DimensionPolicy::BoundsSkip
    };
    let config = common
        .config_builder()
        .max_pairs(max_pairs)
        .dimension_policy(policy)
        .build();
    let pipeline = ComparisonPipeline::new(config)
        .context("failed to initialize comparison pipeline")?;
    log_effective_config(pipeline.config());

    info!("Loaded {} pairs from {}", batch.urls.len(), input.display());

    let report = pipeline.run_batch(&batch).context("batch aborted")?;

    println!("Image loading completed");
    for pair in &report.pairs {
        println!("{}\t{} -> {}", pair.mismatched, pair.base_url, pair.candidate_url);
    }
    println!(
        "Total Execution Time: {:.6} seconds",
        report.compare_elapsed.as_secs_f64()
    );

    if common.timings {
        report.timings.print_summary();
    }
    Ok(())
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    let result = match (&cli.command, &cli.base, &cli.comp) {
        (Some(Command::Pair { base, comp, common }), _, _) => run_pair(base, comp, common),
        (
            Some(Command::Batch {
                input,
                max_pairs,
                strict_dimensions,
                common,
            }),
            _,
            _,
        ) => run_batch(input, *max_pairs, *strict_dimensions, common),
        (None, Some(base), Some(comp)) => run_pair(base, comp, &cli.common),
        (None, _, _) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "expected BASE and COMP, or a subcommand",
            )
            .exit(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
