//! edgedual: compile a simplified road network into its edge-dual graph and
//! hierarchical shortcut table.
//!
//! ```text
//! edgedual --nodes nodes.csv --edges edges.csv --restrictions restrictions.csv \
//!          --output data/output --name louisville
//! ```
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` to see
//! every dropped restriction.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;

use ed_compile::{CompiledNetwork, Compiler, GridIndex, SpatialIndex, TurnRestriction};
use ed_core::{AmbiguityPolicy, CompileConfig};
use ed_io::{CsvWriter, OutputWriter, SpeedTable, load_graph, load_restrictions};
use ed_network::PrimalGraph;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum IndexKind {
    /// H3 hexagons (needs the `h3` feature).
    H3,
    /// Lat/lon quad grid.
    Grid,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile a road network into an edge-dual shortcut table", long_about = None)]
struct Cli {
    /// Node table: id,lat,lon
    #[arg(long, value_name = "CSV")]
    nodes: PathBuf,

    /// Edge table: source,target,length,maxspeed,highway,way_ids
    #[arg(long, value_name = "CSV")]
    edges: PathBuf,

    /// Turn restrictions: relation_id,kind,from_way,via_node,to_way
    #[arg(long, value_name = "CSV")]
    restrictions: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "data/output")]
    output: PathBuf,

    /// Prefix for output file names
    #[arg(long, default_value = "network")]
    name: String,

    /// Finest spatial-index resolution
    #[arg(long, default_value_t = CompileConfig::DEFAULT_FINEST_RESOLUTION)]
    resolution: u8,

    /// Worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Tie-break when a way matches several edges: lowest-edge-id | reject
    #[arg(long, default_value_t = AmbiguityPolicy::LowestEdgeId)]
    ambiguity: AmbiguityPolicy,

    /// Spatial index
    #[arg(long, value_enum, default_value_t = default_index())]
    index: IndexKind,
}

fn default_index() -> IndexKind {
    if cfg!(feature = "h3") { IndexKind::H3 } else { IndexKind::Grid }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

fn compile_with<I: SpatialIndex>(
    index:        &I,
    config:       CompileConfig,
    graph:        &PrimalGraph,
    restrictions: &[TurnRestriction],
) -> Result<CompiledNetwork> {
    Compiler::new(config, index)
        .compile(graph, restrictions)
        .context("compilation failed")
}

fn compile(
    kind:         IndexKind,
    config:       CompileConfig,
    graph:        &PrimalGraph,
    restrictions: &[TurnRestriction],
) -> Result<CompiledNetwork> {
    match kind {
        IndexKind::Grid => compile_with(&GridIndex, config, graph, restrictions),
        #[cfg(feature = "h3")]
        IndexKind::H3 => compile_with(&ed_compile::H3Index, config, graph, restrictions),
        #[cfg(not(feature = "h3"))]
        IndexKind::H3 => bail!("this build has no H3 support; rebuild with --features h3 or pass --index grid"),
    }
}

fn load(cli: &Cli) -> Result<(PrimalGraph, Vec<TurnRestriction>)> {
    let graph = load_graph(&cli.nodes, &cli.edges, &SpeedTable::default()).with_context(|| {
        format!("loading {} and {}", cli.nodes.display(), cli.edges.display())
    })?;
    let restrictions = match &cli.restrictions {
        Some(path) => load_restrictions(path).with_context(|| format!("loading {}", path.display()))?,
        None => Vec::new(),
    };
    Ok((graph, restrictions))
}

fn write(dir: &Path, name: &str, graph: &PrimalGraph, compiled: &CompiledNetwork) -> Result<()> {
    let mut writer = CsvWriter::new(dir, name)
        .with_context(|| format!("creating output in {}", dir.display()))?;
    writer.write_compiled(graph, compiled)?;
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.name.is_empty() {
        bail!("--name must not be empty");
    }
    let t0 = Instant::now();

    let config = CompileConfig {
        finest_resolution: cli.resolution,
        num_threads:       cli.threads,
        ambiguity:         cli.ambiguity,
    };
    info!("index {:?}, resolution {}, ambiguity {}", cli.index, config.finest_resolution, config.ambiguity);

    let (graph, restrictions) = load(&cli)?;
    let compiled = compile(cli.index, config, &graph, &restrictions)?;
    write(&cli.output, &cli.name, &graph, &compiled)?;

    let r = &compiled.report;
    println!("edges            {:>10}", r.edges);
    println!("dual edges       {:>10}", r.dual_edges);
    println!(
        "restrictions     {:>10}  ({} matched, {} dropped, {} tie-broken)",
        r.restrictions.total,
        r.restrictions.matched,
        r.restrictions.dropped(),
        r.restrictions.tie_broken
    );
    println!("forbidden pairs  {:>10}", r.forbidden_pairs);
    println!("undefined cells  {:>10}", r.undefined_cells);
    println!("disjoint edges   {:>10}", r.disjoint_edges);
    println!("done in {:.2} s -> {}", t0.elapsed().as_secs_f64(), cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, IndexKind};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["edgedual", "--nodes", "n.csv", "--edges", "e.csv"]);
        assert_eq!(cli.output.to_str(), Some("data/output"));
        assert_eq!(cli.name, "network");
        assert_eq!(cli.resolution, 15);
        assert_eq!(cli.ambiguity, ed_core::AmbiguityPolicy::LowestEdgeId);
        assert!(cli.restrictions.is_none());
    }

    #[test]
    fn explicit_flags() {
        let cli = Cli::parse_from([
            "edgedual", "--nodes", "n.csv", "--edges", "e.csv",
            "--ambiguity", "reject", "--index", "grid", "--threads", "4", "--resolution", "9",
        ]);
        assert_eq!(cli.ambiguity, ed_core::AmbiguityPolicy::Reject);
        assert_eq!(cli.index, IndexKind::Grid);
        assert_eq!(cli.threads, Some(4));
        assert_eq!(cli.resolution, 9);
    }
}
