use anyhow::Result;
use archaic_resolver::{
    discovery, reference, AffixTokenizer, BatchConfig, Classifier, ModernWordPolicy, Normalizer,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resolve-archaics")]
#[command(about = "Replace archaic words in annotated documents with attested modern spellings")]
#[command(version)]
struct Args {
    /// Directory holding the *.txt documents and their <stem>.notes.json sidecars
    input_dir: PathBuf,

    /// Archaic reference word list (.json array or one word per line)
    #[arg(long)]
    archaic: PathBuf,

    /// Modern reference word list (.json array or one word per line)
    #[arg(long)]
    modern: PathBuf,

    /// Particle list replacing the built-in particles
    #[arg(long)]
    particles: Option<PathBuf>,

    /// Output directory [default: <INPUT_DIR>/resolved]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Try every non-archaic option instead of only the first
    #[arg(long)]
    scan_all_options: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting resolve-archaics");
    info!(?args, "Parsed CLI arguments");

    // WHY: validate input directory early to fail fast with clear error
    if !args.input_dir.exists() {
        anyhow::bail!("Input directory does not exist: {}", args.input_dir.display());
    }
    if !args.input_dir.is_dir() {
        anyhow::bail!("Input path is not a directory: {}", args.input_dir.display());
    }

    // Reference data first: nothing is written if it cannot be loaded
    let lexicon = reference::load_lexicon(&args.archaic, &args.modern).await?;
    let tokenizer = match &args.particles {
        Some(path) => AffixTokenizer::new(reference::read_words(path).await?),
        None => AffixTokenizer::default(),
    };
    let policy = if args.scan_all_options {
        ModernWordPolicy::AnyNonArchaic
    } else {
        ModernWordPolicy::FirstNonArchaic
    };
    let classifier = Arc::new(Classifier::new(lexicon, Normalizer::new(tokenizer)).with_policy(policy));

    let documents =
        discovery::discover_documents(&args.input_dir, &discovery::DiscoveryConfig::default()).await?;
    println!("resolve-archaics v{} - Found {} documents", env!("CARGO_PKG_VERSION"), documents.len());

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("resolved"));
    let config = BatchConfig::new(output_dir);

    let progress = (!args.no_progress).then(|| {
        let bar = ProgressBar::new(documents.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    });

    let stats = archaic_resolver::process_documents_parallel(
        classifier,
        &documents,
        &config,
        progress.as_ref(),
    )
    .await?;

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    archaic_resolver::write_run_stats(&args.stats_out, &stats).await?;

    println!("Resolution complete:");
    println!("  Documents written: {} (to {})", stats.files.len(), config.output_dir.display());
    println!("  Notes seen: {}", stats.totals.notes_seen);
    println!("  Archaic words replaced: {}", stats.totals.replacements);
    if stats.totals.unresolved_archaic > 0 {
        println!("  Archaic words without a modern form: {}", stats.totals.unresolved_archaic);
    }

    info!(
        replacements = stats.totals.replacements,
        total_time_ms = stats.total_time_ms,
        "Resolution run completed"
    );

    Ok(())
}
