use anyhow::{Context, Result};
use cellplan::geom2::{MapLayout, Point};
use cellplan::sample::{FreeSpaceSampler, ReplayToken};
use cellplan::{Decomposition, PlanCfg};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod mapfile;
mod output;
mod provenance;

use output::{DecompositionOut, PathOut, SampleOut};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Cell decomposition and path planning on polygonal maps")]
struct Cmd {
    /// Log level (error, warn, info, debug, trace); logs go to stderr
    #[arg(long, default_value = "info")]
    log: Level,

    /// Override the coincidence tolerance (cut pairing, node merge)
    #[arg(long)]
    eps_coincide: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose a map and emit its cells and graph as JSON
    Decompose {
        /// Map file of `x y` lines (`-` for stdin); reference map if omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Shortest path between two points
    Path {
        /// Start point as `x,y`
        #[arg(long, value_parser = parse_point)]
        from: Point,
        /// Goal point as `x,y`
        #[arg(long, value_parser = parse_point)]
        to: Point,
        #[arg(long)]
        input: Option<PathBuf>,
        /// Interpret the query points in map (world) coordinates
        #[arg(long)]
        world: bool,
    },
    /// Random free points and the paths between consecutive pairs
    Sample {
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Rejected draws allowed per accepted point
        #[arg(long, default_value_t = 1000)]
        max_attempts: usize,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log)
        .with_writer(std::io::stderr)
        .init();
    let cfg = match cmd.eps_coincide {
        Some(eps) => PlanCfg::default().with_coincide(eps),
        None => PlanCfg::default(),
    };
    match cmd.action {
        Action::Decompose { input, out } => decompose(input.as_deref(), out.as_deref(), cfg),
        Action::Path {
            from,
            to,
            input,
            world,
        } => path(from, to, input.as_deref(), world, cfg),
        Action::Sample {
            count,
            seed,
            max_attempts,
            input,
        } => sample(count, seed, max_attempts, input.as_deref(), cfg),
        Action::Report => report(cfg),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    mapfile::parse_xy(s).map_err(|e| e.to_string())
}

fn build(input: Option<&Path>, cfg: PlanCfg) -> Result<Decomposition> {
    let points = mapfile::load_points(input)?;
    let scene = MapLayout::reference()
        .scene_from_flat(&points)
        .context("applying the map layout")?;
    let d = Decomposition::build(&scene, cfg).context("decomposing the map")?;
    tracing::info!(
        cells = d.cells().len(),
        nodes = d.graph().num_nodes(),
        unmatched = d.unmatched().len(),
        "decomposed"
    );
    Ok(d)
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
            }
            std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{}", String::from_utf8_lossy(&bytes));
            Ok(())
        }
    }
}

fn cfg_json(cfg: PlanCfg) -> serde_json::Value {
    json!({
        "eps_tight": cfg.eps_tight,
        "eps_coincide": cfg.eps_coincide,
        "probe_shear": cfg.probe_shear,
        "ray_reach": cfg.ray_reach,
    })
}

fn decompose(input: Option<&Path>, out: Option<&Path>, cfg: PlanCfg) -> Result<()> {
    let d = build(input, cfg)?;
    emit(&DecompositionOut::new(&d), out)?;
    if let Some(path) = out {
        let sidecar = provenance::RunRecord::new(&d, input, path, cfg_json(cfg)).write()?;
        tracing::info!(out = %path.display(), sidecar = %sidecar.display(), "written");
    }
    Ok(())
}

fn path(from: Point, to: Point, input: Option<&Path>, world: bool, cfg: PlanCfg) -> Result<()> {
    let d = build(input, cfg)?;
    let layout = MapLayout::reference();
    let (start, goal) = if world {
        (layout.to_screen(from), layout.to_screen(to))
    } else {
        (from, to)
    };
    let planned = d
        .shortest_path(start, goal)
        .with_context(|| format!("planning ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y))?;
    emit(&PathOut::new(&planned, world.then_some(&layout)), None)
}

fn sample(
    count: usize,
    seed: u64,
    max_attempts: usize,
    input: Option<&Path>,
    cfg: PlanCfg,
) -> Result<()> {
    let d = build(input, cfg)?;
    let drawn = FreeSpaceSampler::new(&d, ReplayToken::new(seed, 0))
        .with_max_attempts(max_attempts)
        .take(count);
    if drawn.len() < count {
        tracing::warn!(wanted = count, got = drawn.len(), "sampler ran out of attempts");
    }
    let mut paths = Vec::with_capacity(drawn.len() / 2);
    for pair in drawn.chunks_exact(2) {
        let planned = d
            .shortest_path(pair[0].0, pair[1].0)
            .context("planning between sampled points")?;
        paths.push(PathOut::new(&planned, None));
    }
    let out = SampleOut {
        seed,
        points: drawn.iter().map(|(p, _)| output::xy(*p)).collect(),
        cells: drawn.iter().map(|(_, c)| c.0).collect(),
        paths,
    };
    emit(&out, None)
}

fn report(cfg: PlanCfg) -> Result<()> {
    let mut obj = serde_json::to_value(provenance::Build::current())?;
    obj["params"] = json!({ "cfg": cfg_json(cfg) });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
