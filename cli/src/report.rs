//! Route report assembly and rendering.

use std::fmt::Write as _;

use flight_route_core::{ranked, BestPath, PathCosts, PathProbabilities};
use serde::Serialize;

use crate::config::{CityConfig, SearchStrategy};
use crate::error::AppError;
use crate::geo::Coordinates;
use crate::routes::RouteNetwork;
use crate::sentiment::CitySentiment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestRoute {
    pub cities: Vec<String>,
    pub km: f64,
    pub expansions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRoute {
    pub cities: Vec<String>,
    pub km: f64,
    pub probability: f64,
}

/// Everything printed for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub cities: Vec<CityEntry>,
    pub map_center: Option<Coordinates>,
    pub average_km: f64,
    pub route_count: usize,
    pub origin: String,
    pub destination: String,
    pub search: SearchStrategy,
    pub best_route: Option<BestRoute>,
    /// Most probable first.
    pub alternatives: Vec<RankedRoute>,
    pub sentiment: Vec<CitySentiment>,
}

/// Inputs gathered by the orchestrator.
pub struct ReportInputs<'a> {
    pub cities: &'a [CityConfig],
    pub network: &'a RouteNetwork,
    pub origin: &'a str,
    pub destination: &'a str,
    pub search: SearchStrategy,
    pub best: Option<&'a BestPath>,
    pub paths: &'a PathCosts,
    pub probabilities: &'a PathProbabilities,
    pub sentiment: Vec<CitySentiment>,
}

impl RouteReport {
    pub fn build(inputs: ReportInputs<'_>) -> Self {
        let graph = &inputs.network.graph;
        let alternatives = ranked(inputs.probabilities)
            .into_iter()
            .map(|(path, probability)| RankedRoute {
                cities: graph.path_labels(path),
                km: inputs.paths.get(path).copied().unwrap_or_default(),
                probability,
            })
            .collect();

        Self {
            cities: inputs
                .cities
                .iter()
                .map(|c| CityEntry {
                    name: c.name.clone(),
                    latitude: c.latitude,
                    longitude: c.longitude,
                })
                .collect(),
            map_center: crate::geo::map_center(&inputs.network.coordinates),
            average_km: inputs.network.average_km,
            route_count: inputs.network.route_count(),
            origin: inputs.origin.to_string(),
            destination: inputs.destination.to_string(),
            search: inputs.search,
            best_route: inputs.best.map(|b| BestRoute {
                cities: graph.path_labels(&b.path),
                km: b.cost,
                expansions: b.expansions,
            }),
            alternatives,
            sentiment: inputs.sentiment,
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Cities:")?;
        for c in &self.cities {
            writeln!(out, "  {} ({:.4} : {:.4})", c.name, c.latitude, c.longitude)?;
        }
        if let Some(center) = self.map_center {
            writeln!(out, "Map center: ({:.4} : {:.4})", center.latitude, center.longitude)?;
        }
        writeln!(
            out,
            "Routes kept: {} (average distance {:.1} km)",
            self.route_count, self.average_km
        )?;
        writeln!(out, "{}", "=".repeat(72))?;

        match &self.best_route {
            Some(best) => writeln!(
                out,
                "The best route to {} is {}. ({:.1} km)",
                self.destination,
                best.cities.join(" -> "),
                best.km
            )?,
            None => writeln!(
                out,
                "No route from {} to {}.",
                self.origin, self.destination
            )?,
        }

        if !self.alternatives.is_empty() {
            writeln!(out)?;
            writeln!(out, "The probability for each path is:")?;
            for route in &self.alternatives {
                writeln!(
                    out,
                    "  {:>6.3}  {} ({:.1} km)",
                    route.probability,
                    route.cities.join(" -> "),
                    route.km
                )?;
            }
        }

        if !self.sentiment.is_empty() {
            writeln!(out)?;
            writeln!(out, "News sentiment:")?;
            for s in &self.sentiment {
                writeln!(
                    out,
                    "  {}: {} (words {}, stop words {}; positive {}, neutral {}, negative {})",
                    s.city,
                    s.summary(),
                    s.word_count,
                    s.stop_word_count,
                    s.counts.positive,
                    s.counts.neutral,
                    s.counts.negative
                )?;
            }
        }
        Ok(())
    }
}
