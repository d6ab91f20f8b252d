//! Runs the planner end to end:
//! 1. Loads the config (or the built-in one) and applies command-line overrides.
//! 2. Builds the route network from city coordinates.
//! 3. Searches for the best route and enumerates every alternative.
//! 4. Scores configured news articles.
//! 5. Prints the report as text or JSON.

use std::collections::HashSet;
use std::path::Path;

use flight_route_core::{best_first, enumerate_paths, path_probabilities};

use crate::cli::Cli;
use crate::config::{RouteConfig, SentimentConfig};
use crate::error::AppError;
use crate::logging;
use crate::report::{ReportInputs, RouteReport};
use crate::routes::build_network;
use crate::sentiment::{analyze_article, parse_word_list, CitySentiment, WordLists};

pub fn run_app(cli: Cli) -> Result<(), AppError> {
    logging::init_tracing(cli.quiet);

    let mut config = match &cli.config {
        Some(path) => RouteConfig::load(path)?,
        None => RouteConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let report = plan(&config)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn apply_overrides(config: &mut RouteConfig, cli: &Cli) {
    if let Some(origin) = &cli.origin {
        config.origin = origin.clone();
    }
    if let Some(destination) = &cli.destination {
        config.destination = destination.clone();
    }
    if let Some(search) = cli.search {
        config.search = search;
    }
}

/// Build the network, search it, enumerate alternatives and assemble the report.
pub fn plan(config: &RouteConfig) -> Result<RouteReport, AppError> {
    let network = build_network(&config.cities, config.edge_filter)?;
    let origin = network.node(&config.origin)?;
    let destination = network.node(&config.destination)?;

    tracing::info!(
        origin = %config.origin,
        destination = %config.destination,
        search = ?config.search,
        "searching for the best route"
    );
    let best = best_first(
        &network.graph,
        origin,
        destination,
        &network.distances,
        config.search.into(),
    )?;
    if best.is_none() {
        tracing::warn!(
            origin = %config.origin,
            destination = %config.destination,
            "no route connects the two cities"
        );
    }

    let paths = enumerate_paths(&network.graph, origin, destination);
    let probabilities = path_probabilities(&paths)?;
    tracing::info!(paths = paths.len(), "ranked alternative routes");

    let sentiment = match &config.sentiment {
        Some(s) => score_articles(s)?,
        None => Vec::new(),
    };

    Ok(RouteReport::build(ReportInputs {
        cities: &config.cities,
        network: &network,
        origin: &config.origin,
        destination: &config.destination,
        search: config.search,
        best: best.as_ref(),
        paths: &paths,
        probabilities: &probabilities,
        sentiment,
    }))
}

fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))
}

/// Score every configured article, in city-name order.
fn score_articles(config: &SentimentConfig) -> Result<Vec<CitySentiment>, AppError> {
    let lists = WordLists::from_texts(
        &read_text(&config.positive_words)?,
        &read_text(&config.negative_words)?,
    );
    let stop_words = match &config.stop_words {
        Some(path) => parse_word_list(&read_text(path)?),
        None => HashSet::new(),
    };
    tracing::debug!(
        positive = lists.positive.len(),
        negative = lists.negative.len(),
        stop = stop_words.len(),
        "loaded word lists"
    );

    config
        .articles
        .iter()
        .map(|(city, path)| {
            let text = read_text(path)?;
            let scored = analyze_article(city, &text, &lists, &stop_words);
            tracing::info!(city = %city, verdict = %scored.verdict, "scored article");
            Ok(scored)
        })
        .collect()
}
