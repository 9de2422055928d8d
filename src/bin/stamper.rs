use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stamper", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp an image described by a JSON config and write the result.
    Apply(ApplyArgs),
    /// Print the position an anchor resolves to, as `x y`.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Stamp config JSON. Image and font paths are resolved relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Output image path (format from extension).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Anchor name, e.g. `top-left`, `center`, `bottom-right`.
    #[arg(long)]
    anchor: stamper::Anchor,

    /// Canvas size as `WxH`.
    #[arg(long, value_parser = parse_dims)]
    canvas: stamper::Dimensions,

    /// Stamp size as `WxH`.
    #[arg(long, value_parser = parse_dims)]
    stamp: stamper::Dimensions,
}

fn parse_dims(s: &str) -> Result<stamper::Dimensions, String> {
    stamper::Dimensions::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let config = stamper::StampConfig::from_path(&args.config)?;
    let root = args.config.parent().unwrap_or_else(|| Path::new("."));

    let mut engine = stamper::Stamper::with_root(root);
    let Some(out) = engine.add_stamp(&config)? else {
        anyhow::bail!(
            "base image unavailable (resolved relative to '{}')",
            root.display()
        );
    };

    if let Some(dir) = args.out.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }
    out.save(&args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    if args.anchor.is_tile() || args.anchor.is_custom() {
        eprintln!(
            "note: '{}' carries no placement; resolving as center",
            args.anchor
        );
    }
    let p = stamper::resolve(args.anchor, args.canvas, args.stamp);
    println!("{} {}", p.x, p.y);
    Ok(())
}
