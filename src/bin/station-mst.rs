use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rust_station_mst::{
    build_network, load_points, load_tree, render_geojson, save_tree, tree_weight, DistanceModel,
    PointSet, SpanningTreeEdge,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Minimum spanning network over named stations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the spanning tree for a station list.
    Build {
        /// Station list, one `name, latitude, longitude` record per line.
        points: PathBuf,
        /// Where to write the `name_a, name_b, weight` edge list.
        #[arg(long, short, default_value = "arvore_minima.txt")]
        output: PathBuf,
        /// Also write a GeoJSON map of stations and tree edges.
        #[arg(long)]
        map: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Model::Haversine)]
        model: Model,
    },
    /// Render a previously computed edge list as GeoJSON.
    Render {
        points: PathBuf,
        tree: PathBuf,
        #[arg(long)]
        map: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Model {
    Haversine,
    Geodesic,
}

impl From<Model> for DistanceModel {
    fn from(model: Model) -> Self {
        match model {
            Model::Haversine => DistanceModel::Haversine,
            Model::Geodesic => DistanceModel::Geodesic,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            points,
            output,
            map,
            model,
        } => handle_build(&points, &output, map.as_deref(), model.into()),
        Command::Render { points, tree, map } => handle_render(&points, &tree, &map),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init also forwards `log` records from the library.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_stations(path: &Path) -> Result<PointSet> {
    load_points(path).with_context(|| format!("failed to read stations from {}", path.display()))
}

fn write_map(path: &Path, points: &PointSet, edges: &[SpanningTreeEdge]) -> Result<()> {
    let geojson = render_geojson(points, edges).context("failed to render map")?;
    let body = serde_json::to_string_pretty(&geojson).context("failed to encode map")?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write map to {}", path.display()))?;
    println!("Map written to {}", path.display());
    Ok(())
}

fn handle_build(
    points_path: &Path,
    output: &Path,
    map: Option<&Path>,
    model: DistanceModel,
) -> Result<()> {
    let points = read_stations(points_path)?;
    let edges = build_network(&points, model).context("failed to compute the spanning tree")?;

    save_tree(output, &edges)
        .with_context(|| format!("failed to write tree to {}", output.display()))?;
    println!(
        "Spanning tree with {} edges ({} km) written to {}",
        edges.len(),
        tree_weight(&edges),
        output.display()
    );

    if let Some(map) = map {
        write_map(map, &points, &edges)?;
    }
    Ok(())
}

fn handle_render(points_path: &Path, tree_path: &Path, map: &Path) -> Result<()> {
    let points = read_stations(points_path)?;
    let edges = load_tree(tree_path)
        .with_context(|| format!("failed to read tree from {}", tree_path.display()))?;
    write_map(map, &points, &edges)
}
