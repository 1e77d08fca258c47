use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "layermint", version)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct LogArgs {
    /// More log output (repeat for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

impl LogArgs {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::WARN;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate unique artworks and metadata from trait layers.
    Generate(GenerateArgs),
    /// Replace the image URL prefix in a directory of metadata files.
    RewriteUrls(RewriteUrlsArgs),
    /// Strip `.json` from the path keys of a manifest.
    Manifest(ManifestArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Generator config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Override `collection_size` from the config.
    #[arg(long)]
    size: Option<u64>,

    /// Override `seed` from the config.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RewriteUrlsArgs {
    /// Directory of metadata JSON files.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory (may equal the input directory).
    #[arg(long)]
    out: PathBuf,

    /// Prefix to replace.
    #[arg(long)]
    old: String,

    /// Replacement prefix.
    #[arg(long)]
    new: String,
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output manifest JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log.level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::RewriteUrls(args) => cmd_rewrite_urls(args),
        Command::Manifest(args) => cmd_manifest(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = layermint::GeneratorConfig::from_path(&args.config)?;
    if let Some(size) = args.size {
        cfg.collection_size = size;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    let report = layermint::generate_from_config(&cfg)?;

    eprintln!(
        "generated {} unique artifacts (seed {}, {} possible)",
        report.produced, report.seed, report.max_combinations
    );
    eprintln!("images:   {}", cfg.images_dir.display());
    eprintln!("metadata: {}", cfg.metadata_dir.display());
    Ok(())
}

fn cmd_rewrite_urls(args: RewriteUrlsArgs) -> anyhow::Result<()> {
    let opts = layermint::RewriteOpts {
        input_dir: args.in_dir,
        output_dir: args.out,
        old_prefix: args.old,
        new_prefix: args.new,
    };
    let report = layermint::rewrite_image_prefix(&opts)?;

    eprintln!(
        "rewrote {} of {} files into {}",
        report.rewritten,
        report.scanned,
        opts.output_dir.display()
    );
    Ok(())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let count = layermint::rewrite_manifest_file(&args.in_path, &args.out)?;
    eprintln!("wrote {} ({count} paths)", args.out.display());
    Ok(())
}
