use priority_queue::PriorityQueue;

use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::error::{Error, Result};
use crate::types::{EdgeWeights, PointSet, SpanningTreeEdge};

/// Frontier key: cheapest weight first, then the lowest vertex index. Vertex
/// indices follow the lexical order of the station names.
type FrontierPriority = Reverse<(OrderedFloat<f64>, usize)>;

/// Dense copy of the weights over arena indices.
struct WeightTable {
    n: usize,
    weights: Vec<f64>,
}

impl WeightTable {
    /// Fails with `IncompleteGraph` on the first missing pair.
    fn build(names: &[&str], weights: &EdgeWeights) -> Result<Self> {
        let n = names.len();
        let mut table = vec![0.0; n * n];
        for i in 0..n {
            for j in i + 1..n {
                let missing = || Error::IncompleteGraph {
                    a: names[i].to_string(),
                    b: names[j].to_string(),
                };
                let weight = weights.get(names[i], names[j]).ok_or_else(missing)?;
                table[i * n + j] = weight;
                table[j * n + i] = weight;
            }
        }
        Ok(WeightTable { n, weights: table })
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.n + j]
    }
}

/// Prim's algorithm over the complete graph given by `weights`.
///
/// Starts from the lexically smallest station and returns the edges in the
/// order they were selected. When several frontier edges share the minimum
/// weight, the one reaching the lexically smallest station wins. Zero or one
/// station yields an empty tree.
pub fn minimum_spanning_tree(
    points: &PointSet,
    weights: &EdgeWeights,
) -> Result<Vec<SpanningTreeEdge>> {
    let names: Vec<&str> = points.names().collect();
    let table = WeightTable::build(&names, weights)?;
    let n = names.len();
    if n < 2 {
        return Ok(Vec::new());
    }

    let mut in_tree = vec![false; n];
    // Cheapest known connection of each vertex to the tree: (tree vertex, weight).
    let mut best: Vec<(usize, f64)> = vec![(0, f64::INFINITY); n];
    let mut frontier: PriorityQueue<usize, FrontierPriority> = PriorityQueue::with_capacity(n);

    in_tree[0] = true;
    for v in 1..n {
        let weight = table.get(0, v);
        best[v] = (0, weight);
        frontier.push(v, Reverse((OrderedFloat(weight), v)));
    }

    let mut edges = Vec::with_capacity(n - 1);
    while let Some((v, _)) = frontier.pop() {
        in_tree[v] = true;
        let (parent, weight) = best[v];
        log::debug!("Selected edge {} - {} ({} km)", names[parent], names[v], weight);
        edges.push(SpanningTreeEdge::new(names[parent], names[v], weight));

        for u in 0..n {
            if in_tree[u] {
                continue;
            }
            let candidate = table.get(v, u);
            // Only a strictly cheaper connection replaces the current one.
            if candidate < best[u].1 {
                best[u] = (v, candidate);
                frontier.change_priority(&u, Reverse((OrderedFloat(candidate), u)));
            }
        }
    }

    log::info!("Spanning tree over {} stations has {} edges", n, edges.len());
    Ok(edges)
}

/// Sum of the edge weights.
pub fn tree_weight(edges: &[SpanningTreeEdge]) -> f64 {
    edges.iter().map(|edge| edge.weight).sum()
}
