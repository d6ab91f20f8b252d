//! Builds the route graph and distance table from configured cities.

use flight_route_core::{DistanceTable, Graph, NodeId};

use crate::config::{CityConfig, EdgeFilter};
use crate::error::AppError;
use crate::geo::{great_circle_km, Coordinates};

/// Everything the path engine needs, plus what the report shows about it.
pub struct RouteNetwork {
    pub graph: Graph,
    /// Great-circle distance for every ordered pair of distinct cities.
    pub distances: DistanceTable,
    /// Mean over all ordered pairs.
    pub average_km: f64,
    /// Indexed by `NodeId`.
    pub coordinates: Vec<Coordinates>,
}

impl RouteNetwork {
    pub fn node(&self, name: &str) -> Result<NodeId, AppError> {
        self.graph
            .resolve(name)
            .ok_or_else(|| AppError::UnknownCity(name.to_string()))
    }

    pub fn route_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Intern every city, measure every ordered pair and keep the pairs the
/// filter admits as directed routes.
///
/// Cities are interned in config order, so a city's `NodeId` is its index.
/// Routes are added row by row (origin-major), which fixes expansion order.
pub fn build_network(cities: &[CityConfig], filter: EdgeFilter) -> Result<RouteNetwork, AppError> {
    let mut graph = Graph::with_capacity(cities.len());
    for city in cities {
        graph.intern_node(&city.name);
    }
    let coordinates: Vec<Coordinates> = cities.iter().map(|c| c.coordinates()).collect();

    let mut measured: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(cities.len() * cities.len());
    let mut distances = DistanceTable::with_capacity(cities.len() * cities.len());
    for (i, from) in coordinates.iter().enumerate() {
        for (j, to) in coordinates.iter().enumerate() {
            if i == j {
                continue;
            }
            let km = great_circle_km(*from, *to);
            distances.insert(i as NodeId, j as NodeId, km)?;
            measured.push((i as NodeId, j as NodeId, km));
        }
    }

    let average_km = distances.mean().unwrap_or(0.0);
    let limit = match filter {
        EdgeFilter::BelowAverage => Some(average_km),
        EdgeFilter::All => None,
        EdgeFilter::MaxKm { limit } => Some(limit),
    };

    for (from, to, km) in measured {
        if limit.is_some_and(|l| km >= l) {
            continue;
        }
        if km <= 0.0 {
            tracing::warn!(
                from = graph.label(from).unwrap_or_default(),
                to = graph.label(to).unwrap_or_default(),
                "cities share a location; no route added between them"
            );
            continue;
        }
        graph.add_edge(from, to, km)?;
    }

    for (id, name) in graph.nodes_iter() {
        if graph.neighbors_out(id).is_empty() {
            tracing::warn!(city = name, "no outgoing routes after filtering");
        }
    }

    tracing::info!(
        cities = graph.node_count(),
        routes = graph.edge_count(),
        average_km,
        "built route network"
    );

    Ok(RouteNetwork {
        graph,
        distances,
        average_km,
        coordinates,
    })
}
