//! Pairwise station distances.

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{EdgeWeights, Location, PointSet};

/// Formula used to turn two coordinates into a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Great circle on a mean-radius sphere.
    #[default]
    Haversine,
    /// Geodesic on the WGS-84 ellipsoid.
    Geodesic,
}

impl DistanceModel {
    pub fn distance_km(self, a: &Location, b: &Location) -> f64 {
        match self {
            DistanceModel::Haversine => haversine_meters(a, b) / 1000.0,
            DistanceModel::Geodesic => {
                // geo points are (x, y) = (longitude, latitude)
                let ap = Point::new(a.longitude, a.latitude);
                let bp = Point::new(b.longitude, b.latitude);
                Geodesic::distance(ap, bp) / 1000.0
            }
        }
    }
}

fn haversine_meters(a: &Location, b: &Location) -> f64 {
    if a == b {
        return 0.0;
    }
    let ap = haversine_rs::point::Point { latitude: a.latitude, longitude: a.longitude };
    let bp = haversine_rs::point::Point { latitude: b.latitude, longitude: b.longitude };
    haversine_rs::distance(ap, bp, haversine_rs::units::Unit::Meters)
}

/// Fails on the first station whose coordinates are out of range or not finite.
pub fn validate(points: &PointSet) -> Result<()> {
    match points.iter().find(|(_, location)| !location.is_valid()) {
        Some((name, location)) => Err(Error::InvalidCoordinate {
            name: name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }),
        None => Ok(()),
    }
}

/// Computes the distance in kilometres for every unordered pair of distinct
/// stations. The result has exactly `n * (n - 1) / 2` entries.
pub fn compute_all(points: &PointSet, model: DistanceModel) -> Result<EdgeWeights> {
    validate(points)?;

    let stations: Vec<_> = points.iter().collect();
    let mut weights = EdgeWeights::new();
    for (i, (name_a, location_a)) in stations.iter().enumerate() {
        for (name_b, location_b) in &stations[i + 1..] {
            // Clamp away the tiny negative values a formula may produce for coincident points.
            let distance = model.distance_km(location_a, location_b).max(0.0);
            log::debug!("Distance between {} and {} is {} km", name_a, name_b, distance);
            weights.insert(name_a, name_b, distance)?;
        }
    }

    log::info!("Computed {} distances for {} stations", weights.len(), points.len());
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PointSet {
        PointSet::try_from_iter([
            ("A", Location::new(0.0, 0.0)),
            ("B", Location::new(0.0, 1.0)),
            ("C", Location::new(1.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn haversine_degree_at_equator() {
        let weights = compute_all(&triangle(), DistanceModel::Haversine).unwrap();
        assert_eq!(weights.len(), 3);
        assert!((weights.get("A", "B").unwrap() - 111.19).abs() < 0.5);
        assert!((weights.get("A", "C").unwrap() - 111.19).abs() < 0.5);
        assert!((weights.get("B", "C").unwrap() - 157.2).abs() < 0.5);
    }

    #[test]
    fn geodesic_follows_the_ellipsoid() {
        let weights = compute_all(&triangle(), DistanceModel::Geodesic).unwrap();
        // One degree of longitude on the equator is longer than one degree of latitude.
        assert!((weights.get("A", "B").unwrap() - 111.32).abs() < 0.01);
        assert!((weights.get("A", "C").unwrap() - 110.574).abs() < 0.01);
    }

    #[test]
    fn identical_coordinates_are_zero_apart() {
        let points = PointSet::try_from_iter([
            ("x", Location::new(-8.05, -34.91)),
            ("y", Location::new(-8.05, -34.91)),
        ])
        .unwrap();
        for model in [DistanceModel::Haversine, DistanceModel::Geodesic] {
            let weights = compute_all(&points, model).unwrap();
            assert_eq!(weights.get("x", "y"), Some(0.0));
        }
    }

    #[test]
    fn single_station_has_no_pairs() {
        let points = PointSet::try_from_iter([("solo", Location::new(10.0, 10.0))]).unwrap();
        assert!(compute_all(&points, DistanceModel::Haversine).unwrap().is_empty());
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        let points = PointSet::try_from_iter([
            ("ok", Location::new(0.0, 0.0)),
            ("bad", Location::new(200.0, 0.0)),
        ])
        .unwrap();
        match compute_all(&points, DistanceModel::Haversine) {
            Err(Error::InvalidCoordinate { name, latitude, .. }) => {
                assert_eq!(name, "bad");
                assert_eq!(latitude, 200.0);
            }
            other => panic!("expected InvalidCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_longitude() {
        let points = PointSet::try_from_iter([("nan", Location::new(0.0, f64::NAN))]).unwrap();
        assert!(matches!(validate(&points), Err(Error::InvalidCoordinate { .. })));
    }

    #[test]
    fn model_names_in_json() {
        let model: DistanceModel = serde_json::from_str("\"geodesic\"").unwrap();
        assert_eq!(model, DistanceModel::Geodesic);
        assert_eq!(serde_json::to_string(&DistanceModel::Haversine).unwrap(), "\"haversine\"");
    }
}
