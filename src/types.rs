use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

// ** Coordinates **

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location { latitude, longitude }
    }

    /// Both components finite, latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

// ** Stations **

/// Named stations, iterated in lexical order of their names.
///
/// The ordering is what makes every tie-break in the spanning tree
/// reproducible, so it is fixed here rather than left to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: BTreeMap<String, Location>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(name, location)` pairs; later duplicates replace earlier ones.
    pub fn try_from_iter<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Location)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, location) in iter {
            set.insert(name, location)?;
        }
        Ok(set)
    }

    /// Inserts a station, returning the location it replaced if the name was already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        location: Location,
    ) -> Result<Option<Location>> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(self.points.insert(name, location))
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.points.get(name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Location> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = (&'a String, &'a Location);
    type IntoIter = btree_map::Iter<'a, String, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ** Edge weights **

/// Unordered pair of station names, stored with the lexically smaller name first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePair<'a> {
    pub low: &'a str,
    pub high: &'a str,
}

impl<'a> NodePair<'a> {
    pub fn new(a: &'a str, b: &'a str) -> Self {
        if a <= b {
            NodePair { low: a, high: b }
        } else {
            NodePair { low: b, high: a }
        }
    }
}

/// Symmetric distance table in kilometres.
///
/// Each pair is stored once under its canonical order, so `get(a, b)` and
/// `get(b, a)` hit the same entry.
#[derive(Debug, Clone, Default)]
pub struct EdgeWeights {
    by_low: HashMap<String, HashMap<String, f64>>,
    len: usize,
}

impl EdgeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `weight` for `{a, b}`, returning the previous weight if any.
    pub fn insert(&mut self, a: &str, b: &str, weight: f64) -> Result<Option<f64>> {
        if a == b {
            return Err(Error::SelfEdge { name: a.to_string() });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                a: a.to_string(),
                b: b.to_string(),
                weight,
            });
        }
        let pair = NodePair::new(a, b);
        let previous = self
            .by_low
            .entry(pair.low.to_string())
            .or_default()
            .insert(pair.high.to_string(), weight);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let pair = NodePair::new(a, b);
        self.by_low.get(pair.low)?.get(pair.high).copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every stored pair once, in no particular order. Sort the result when
    /// the order matters.
    pub fn iter(&self) -> impl Iterator<Item = (NodePair<'_>, f64)> {
        self.by_low.iter().flat_map(|(low, row)| {
            row.iter().map(move |(high, weight)| {
                (
                    NodePair {
                        low: low.as_str(),
                        high: high.as_str(),
                    },
                    *weight,
                )
            })
        })
    }
}

// ** Spanning tree **

/// One selected edge. `from` was already in the tree when the edge was
/// chosen; `to` is the station it brought in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl SpanningTreeEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        SpanningTreeEdge {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}
