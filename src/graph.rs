// City distance graph with single-pair and all-pairs shortest paths

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// Error types for route queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("unable to reach {to} from {from}")]
    Unreachable { from: String, to: String },

    #[error("broken predecessor chain while reconstructing path to {0}")]
    BrokenPath(String),
}

/// Normalized city identifier: trimmed and lower-cased on construction, so
/// every insertion and lookup path normalizes identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CityKey(String);

impl CityKey {
    pub fn new(raw: &str) -> Self {
        CityKey(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-pair shortest path: total distance plus the cities visited, in
/// order from start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance: f64,
    pub path: Vec<String>,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shortest distance: {} km", self.distance)?;
        write!(f, "Path: {}", self.path.join(" -> "))
    }
}

/// All-pairs shortest-path distances, indexed by the ordered city list.
/// `None` marks a pair with no connecting path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    pub cities: Vec<String>,
    pub dist: Vec<Vec<Option<f64>>>,
}

impl DistanceMatrix {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Shortest distance between two cities (names are normalized first);
    /// `None` when either city is unknown or no path connects them.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        self.dist[i][j]
    }

    fn index_of(&self, city: &str) -> Option<usize> {
        let key = CityKey::new(city);
        self.cities.iter().position(|c| c == key.as_str())
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Shortest paths between all cities (unit: km) ===")?;
        writeln!(f)?;
        write!(f, "\t")?;
        for city in &self.cities {
            write!(f, "{city}\t")?;
        }
        writeln!(f)?;
        for (i, city) in self.cities.iter().enumerate() {
            write!(f, "{city}:\t")?;
            for cell in &self.dist[i] {
                match cell {
                    Some(d) => write!(f, "{d}\t")?,
                    None => write!(f, "INF\t")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Undirected weighted graph of inter-city distances. City names are
/// normalized through [`CityKey`]; edges are inserted in both directions and
/// re-inserting a pair overwrites the previous weight.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    adjacency: BTreeMap<CityKey, BTreeMap<CityKey, f64>>,
}

impl CityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.adjacency.contains_key(&CityKey::new(city))
    }

    /// Adds (or overwrites) the edge between two cities in both directions
    /// and returns a confirmation for display.
    pub fn add_path(&mut self, from: &str, to: &str, distance: f64) -> String {
        let from = CityKey::new(from);
        let to = CityKey::new(to);

        self.adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), distance);
        self.adjacency
            .entry(to.clone())
            .or_default()
            .insert(from.clone(), distance);

        debug!(%from, %to, distance, "path added");
        format!("Path added: {from} <-> {to} ({distance} km)")
    }

    /// Single-pair shortest path via Dijkstra, terminating early once the
    /// end city is settled or no unvisited city remains reachable.
    ///
    /// Tentative distances are `Option<f64>` rather than a large numeric
    /// sentinel, so unreachability is never confused with a legitimately
    /// large distance.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Route, RouteError> {
        let start = CityKey::new(start);
        let end = CityKey::new(end);

        if !self.adjacency.contains_key(&start) {
            return Err(RouteError::UnknownCity(start.to_string()));
        }
        if !self.adjacency.contains_key(&end) {
            return Err(RouteError::UnknownCity(end.to_string()));
        }

        let mut dist: BTreeMap<&CityKey, Option<f64>> =
            self.adjacency.keys().map(|city| (city, None)).collect();
        dist.insert(&start, Some(0.0));
        let mut prev: BTreeMap<&CityKey, &CityKey> = BTreeMap::new();
        let mut unvisited: Vec<&CityKey> = self.adjacency.keys().collect();

        while !unvisited.is_empty() {
            // The unvisited city with the smallest finite tentative distance.
            let nearest = unvisited
                .iter()
                .enumerate()
                .filter_map(|(idx, city)| dist[*city].map(|d| (idx, *city, d)))
                .min_by(|a, b| a.2.total_cmp(&b.2));

            let Some((idx, current, here)) = nearest else {
                break; // everything left is unreachable
            };
            unvisited.swap_remove(idx);

            if *current == end {
                break;
            }

            for (neighbor, weight) in &self.adjacency[current] {
                let candidate = here + weight;
                let improved = match dist[neighbor] {
                    Some(known) => candidate < known,
                    None => true,
                };
                if improved {
                    dist.insert(neighbor, Some(candidate));
                    prev.insert(neighbor, current);
                }
            }
        }

        let Some(total) = dist[&end] else {
            return Err(RouteError::Unreachable {
                from: start.to_string(),
                to: end.to_string(),
            });
        };

        // Follow predecessor links backward from the end.
        let mut path = vec![end.to_string()];
        let mut at = &end;
        while *at != start {
            match prev.get(at) {
                Some(&p) => {
                    at = p;
                    path.push(at.to_string());
                }
                None => return Err(RouteError::BrokenPath(end.to_string())),
            }
        }
        path.reverse();

        debug!(from = %start, to = %end, distance = total, "shortest path found");
        Ok(Route {
            distance: total,
            path,
        })
    }

    /// All-pairs shortest paths via Floyd–Warshall over every known city.
    /// An empty graph yields an empty matrix.
    pub fn all_pairs(&self) -> DistanceMatrix {
        let cities: Vec<String> = self.adjacency.keys().map(CityKey::to_string).collect();
        let n = cities.len();
        let index: BTreeMap<&CityKey, usize> = self.adjacency.keys().zip(0..).collect();

        let mut dist: Vec<Vec<Option<f64>>> = vec![vec![None; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = Some(0.0);
        }
        for (from, neighbors) in &self.adjacency {
            for (to, weight) in neighbors {
                dist[index[from]][index[to]] = Some(*weight);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(ik) = dist[i][k] else { continue };
                for j in 0..n {
                    let Some(kj) = dist[k][j] else { continue };
                    let through = ik + kj;
                    if dist[i][j].map_or(true, |direct| through < direct) {
                        dist[i][j] = Some(through);
                    }
                }
            }
        }

        DistanceMatrix { cities, dist }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> CityGraph {
        let mut graph = CityGraph::new();
        graph.add_path("A", "B", 1.0);
        graph.add_path("B", "C", 2.0);
        graph.add_path("A", "C", 10.0);
        graph
    }

    #[test]
    fn add_path_confirms_with_normalized_names() {
        let mut graph = CityGraph::new();
        let msg = graph.add_path("  Paris ", "LONDON", 300.0);
        assert_eq!(msg, "Path added: paris <-> london (300 km)");
        assert!(graph.contains("paris"));
        assert!(graph.contains("London"));
    }

    #[test]
    fn routes_around_the_expensive_direct_edge() {
        let route = triangle().shortest_path("A", "C").unwrap();
        assert_eq!(route.distance, 3.0);
        assert_eq!(route.path, ["a", "b", "c"]);
        assert_eq!(
            route.to_string(),
            "Shortest distance: 3 km\nPath: a -> b -> c"
        );
    }

    #[test]
    fn city_matching_ignores_case_and_whitespace() {
        let mut graph = CityGraph::new();
        graph.add_path("Paris", "London", 300.0);
        let route = graph.shortest_path(" paris", "LONDON ").unwrap();
        assert_eq!(route.distance, 300.0);
        assert_eq!(route.path, ["paris", "london"]);
    }

    #[test]
    fn last_write_wins_on_duplicate_edges() {
        let mut graph = CityGraph::new();
        graph.add_path("A", "B", 5.0);
        graph.add_path("b", "a", 3.0);
        let route = graph.shortest_path("A", "B").unwrap();
        assert_eq!(route.distance, 3.0);
    }

    #[test]
    fn unknown_city_is_reported_before_running_the_algorithm() {
        let graph = triangle();
        assert_eq!(
            graph.shortest_path("A", "Z"),
            Err(RouteError::UnknownCity("z".to_string()))
        );
        assert_eq!(
            graph.shortest_path("Z", "A"),
            Err(RouteError::UnknownCity("z".to_string()))
        );
    }

    #[test]
    fn disconnected_components_are_unreachable() {
        let mut graph = triangle();
        graph.add_path("X", "Y", 4.0);
        assert_eq!(
            graph.shortest_path("A", "Y"),
            Err(RouteError::Unreachable {
                from: "a".to_string(),
                to: "y".to_string(),
            })
        );
        // The island itself still routes.
        assert_eq!(graph.shortest_path("X", "Y").unwrap().distance, 4.0);
    }

    #[test]
    fn start_equals_end_is_a_zero_length_route() {
        let route = triangle().shortest_path("B", "B").unwrap();
        assert_eq!(route.distance, 0.0);
        assert_eq!(route.path, ["b"]);
    }

    #[test]
    fn empty_graph_yields_empty_matrix() {
        let matrix = CityGraph::new().all_pairs();
        assert!(matrix.is_empty());
        assert!(matrix.dist.is_empty());
    }

    #[test]
    fn all_pairs_matches_the_direct_and_relaxed_distances() {
        let matrix = triangle().all_pairs();
        assert_eq!(matrix.cities, ["a", "b", "c"]);
        assert_eq!(matrix.distance("A", "A"), Some(0.0));
        assert_eq!(matrix.distance("A", "B"), Some(1.0));
        assert_eq!(matrix.distance("A", "C"), Some(3.0));
        assert_eq!(matrix.distance("C", "A"), Some(3.0));
        assert_eq!(matrix.distance("A", "Z"), None);
    }

    #[test]
    fn all_pairs_marks_disconnected_pairs_unreachable() {
        let mut graph = triangle();
        graph.add_path("X", "Y", 4.0);
        let matrix = graph.all_pairs();
        assert_eq!(matrix.distance("A", "X"), None);
        assert_eq!(matrix.distance("X", "Y"), Some(4.0));

        let rendered = matrix.to_string();
        assert!(rendered.contains("INF"));
        assert!(rendered.starts_with("=== Shortest paths between all cities (unit: km) ==="));
    }

    #[test]
    fn single_pair_agrees_with_all_pairs_for_every_reachable_pair() {
        let mut graph = CityGraph::new();
        graph.add_path("A", "B", 1.5);
        graph.add_path("B", "C", 2.5);
        graph.add_path("C", "D", 1.0);
        graph.add_path("A", "D", 10.0);
        graph.add_path("B", "D", 3.0);

        let matrix = graph.all_pairs();
        for from in ["A", "B", "C", "D"] {
            for to in ["A", "B", "C", "D"] {
                let route = graph.shortest_path(from, to).unwrap();
                assert_eq!(
                    Some(route.distance),
                    matrix.distance(from, to),
                    "{from} -> {to}"
                );
            }
        }
    }
}
