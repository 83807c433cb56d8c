use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use log::Level;

use geojson::GeoJson;

pub mod distance;
pub mod error;
pub mod graph;
pub mod map;
pub mod records;
pub mod types;

pub use self::distance::{compute_all, DistanceModel};
pub use self::error::{Error, Result};
pub use self::graph::{minimum_spanning_tree, tree_weight};
pub use self::map::render_geojson;
pub use self::records::{load_points, load_tree, read_points, read_tree, save_tree, write_tree};
pub use self::types::{EdgeWeights, Location, NodePair, PointSet, SpanningTreeEdge};

#[derive(Debug, Deserialize, Serialize)]
pub struct JsStation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Input document of [`compute_network`].
#[derive(Debug, Deserialize, Serialize)]
pub struct NetworkParams {
    pub points: Vec<JsStation>,
    #[serde(default)]
    pub distance_model: DistanceModel,
}

#[wasm_bindgen]
pub fn rust_init() -> std::result::Result<(), JsValue> {
    console_log::init_with_level(Level::Error)
        .map_err(|e| JsValue::from_str(&format!("error initializing logger: {}", e)))?;
    log::info!("Logger initialized from library");
    Ok(())
}

/// Distances first, then Prim's over them.
pub fn build_network(points: &PointSet, model: DistanceModel) -> Result<Vec<SpanningTreeEdge>> {
    let weights = compute_all(points, model)?;
    minimum_spanning_tree(points, &weights)
}

/// Runs the whole pipeline on a JSON [`NetworkParams`] document and returns the
/// map as a GeoJSON string, with the tree's total weight as a foreign member.
pub fn compute_network_json(params_json: &str) -> Result<String> {
    let params: NetworkParams = serde_json::from_str(params_json)?;
    let points = PointSet::try_from_iter(
        params
            .points
            .into_iter()
            .map(|station| (station.name, Location::new(station.lat, station.lng))),
    )?;

    let edges = build_network(&points, params.distance_model)?;
    let total_weight_km = tree_weight(&edges);

    let mut geojson = render_geojson(&points, &edges)?;
    if let GeoJson::FeatureCollection(collection) = &mut geojson {
        let mut members = serde_json::Map::new();
        members.insert("total_weight_km".to_string(), json!(total_weight_km));
        collection.foreign_members = Some(members);
    }

    let geojson_str = serde_json::to_string(&geojson)?;
    log::info!("GeoJson created for {} stations, total {} km", points.len(), total_weight_km);
    Ok(geojson_str)
}

#[wasm_bindgen]
pub fn compute_network(params: String) -> std::result::Result<String, JsValue> {
    compute_network_json(&params).map_err(|e| JsValue::from_str(&e.to_string()))
}
