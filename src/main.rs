use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use twl_generator::books::TestamentFilter;
use twl_generator::config::{load_config, Overrides};
use twl_generator::generation::{run_keywords_batch, run_tsv, KeywordsArgs, TsvArgs};
use twl_generator::TermIndexCache;

#[derive(Parser)]
#[command(name = "twl-generator", version, about = "Generate Translation Words Lists from verse text")]
struct Cli {
    /// TOML config file (default: ./twl.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on invalid dictionary entries instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one TSV row per term match in a book
    Tsv {
        /// Term dictionary JSON
        #[arg(long)]
        terms: PathBuf,

        /// Verse corpus JSON for the book
        #[arg(long)]
        verses: PathBuf,

        /// Book id, e.g. gen or 1co
        #[arg(long)]
        book: Option<String>,

        /// Output file (default: twl_<BOOK>.tsv or <verses stem>.tsv)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write a per-verse keyword JSON file for each selected book
    Keywords {
        /// Term dictionary JSON
        #[arg(long)]
        terms: PathBuf,

        /// Directory with one <book id>.json verse corpus per book
        #[arg(long)]
        verses_dir: PathBuf,

        /// Comma-separated book ids, e.g. gen,exo,mat
        #[arg(long, value_delimiter = ',')]
        books: Option<Vec<String>>,

        #[arg(long, value_enum, default_value_t = TestamentFilter::All)]
        testament: TestamentFilter,

        /// Output directory (default: ./keywords)
        #[arg(long)]
        outdir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "twl_generator=debug" } else { "twl_generator=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;
    let outdir = match &cli.command {
        Command::Keywords { outdir, .. } => outdir.clone(),
        Command::Tsv { .. } => None,
    };
    config.apply_overrides(&Overrides {
        strict: cli.strict,
        keywords_outdir: outdir,
    });

    match cli.command {
        Command::Tsv {
            terms,
            verses,
            book,
            output,
        } => {
            let args = TsvArgs {
                terms_path: terms,
                verses_path: verses,
                book,
                output_path: output,
            };
            let mut cache = TermIndexCache::new(config.strict);
            run_tsv(&config, &args, &mut cache).context("generating TSV")?;
            if !cache.rejected().is_empty() {
                warn!("{} dictionary entries were skipped", cache.rejected().len());
            }
        }
        Command::Keywords {
            terms,
            verses_dir,
            books,
            testament,
            ..
        } => {
            let args = KeywordsArgs {
                terms_path: terms,
                verses_dir,
                books,
                testament,
            };
            run_keywords_batch(&config, &args).context("generating keyword files")?;
        }
    }

    Ok(())
}
