use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

use crate::error::{Error, Result};
use crate::types::{Location, PointSet, SpanningTreeEdge};

impl Location {
    // GeoJSON positions are [longitude, latitude]
    fn to_vec(&self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }
    fn to_point(&self) -> Value {
        Value::Point(self.to_vec())
    }
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        geometry: Some(Geometry::new(geometry)),
        properties: Some(properties),
        ..Default::default()
    }
}

fn locate<'a>(points: &'a PointSet, name: &str) -> Result<&'a Location> {
    points.get(name).ok_or_else(|| Error::UnknownStation { name: name.to_string() })
}

/// Bounding box `[min_lon, min_lat, max_lon, max_lat]`, `None` for no stations.
fn bounding_box(points: &PointSet) -> Option<Vec<f64>> {
    if points.is_empty() {
        return None;
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (_, location) in points {
        min_x = min_x.min(location.longitude);
        min_y = min_y.min(location.latitude);
        max_x = max_x.max(location.longitude);
        max_y = max_y.max(location.latitude);
    }
    Some(vec![min_x, min_y, max_x, max_y])
}

/// Builds a map layer with one marker per station and one line per tree edge.
///
/// Markers carry a `name` property; lines carry `from`, `to` and `weight_km`.
pub fn render_geojson(points: &PointSet, edges: &[SpanningTreeEdge]) -> Result<GeoJson> {
    let mut features = Vec::with_capacity(points.len() + edges.len());

    for (name, location) in points {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!(name));
        features.push(feature(location.to_point(), properties));
    }

    for edge in edges {
        let from = locate(points, &edge.from)?;
        let to = locate(points, &edge.to)?;
        let mut properties = JsonObject::new();
        properties.insert("from".to_string(), json!(edge.from));
        properties.insert("to".to_string(), json!(edge.to));
        properties.insert("weight_km".to_string(), json!(edge.weight));
        features.push(feature(Value::LineString(vec![from.to_vec(), to.to_vec()]), properties));
    }

    log::info!("Map layer has {} markers and {} lines", points.len(), edges.len());
    Ok(GeoJson::FeatureCollection(FeatureCollection {
        bbox: bounding_box(points),
        features,
        foreign_members: None,
    }))
}
