use crate::cli::args::{Cli, Commands};
use crate::config::ConversionOptions;
use crate::models::eligible_file;
use crate::processors::CoordinateAggregator;
use crate::readers::SessionDiscovery;
use crate::utils::progress::ProgressReporter;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Convert(args) => {
            let options = args.to_options().with_context(|| match &args.config {
                Some(path) => format!("Failed to load options from {}", path.display()),
                None => "Failed to build conversion options".to_string(),
            })?;
            run_convert(&args.root, options, cli.quiet, args.report_json.as_deref())
        }

        Commands::Sessions { root } => run_sessions(&root),
    }
}

fn run_convert(
    root: &Path,
    options: ConversionOptions,
    quiet: bool,
    report_json: Option<&Path>,
) -> Result<()> {
    println!("Converting GNSS sessions...");
    println!("Campaign directory: {}", root.display());

    let progress = ProgressReporter::new_spinner("Reading sessions...", quiet);
    let aggregator = CoordinateAggregator::new(options);
    let result = aggregator
        .run(root, Some(&progress))
        .with_context(|| format!("Conversion of {} failed", root.display()))?;
    progress.finish_with_message("Sessions read");

    for path in &result.written {
        println!("FILE CREATED : {}", path.display());
    }
    println!("{}", result.summary());

    if let Some(path) = report_json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result)
            .context("Failed to write JSON report")?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn run_sessions(root: &Path) -> Result<()> {
    let sessions = SessionDiscovery::new(root)
        .discover_sessions()
        .with_context(|| format!("Failed to list sessions in {}", root.display()))?;

    if sessions.is_empty() {
        println!("No session directories found in {}", root.display());
        return Ok(());
    }

    for (session, files) in &sessions {
        let status = match (eligible_file(files), files.len()) {
            (Some(_), _) => "ok",
            (None, 0) => "no point file",
            (None, _) => "ambiguous",
        };
        println!("{} [{}]", session, status);
        for file in files {
            println!("    {}", PathBuf::from(session).join(file).display());
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ltop_gnss={}", log_level)));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

