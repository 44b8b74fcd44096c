//! Stop reordering to shorten the overall route.
//!
//! Greedy nearest-neighbour ordering from the first stop, refined with 2-opt
//! segment reversals. The first stop always stays first.

use crate::core::geo::{haversine_miles, raw_route_distance};
use crate::domain::model::Stop;

const IMPROVEMENT_EPSILON: f64 = 1e-9;

pub fn optimize_route(stops: &[Stop]) -> Vec<Stop> {
    if stops.len() <= 2 {
        return stops.to_vec();
    }

    let ordered = nearest_neighbour(stops);
    let before = raw_route_distance(&ordered);
    let improved = two_opt(ordered);
    tracing::debug!(
        stops = stops.len(),
        greedy_miles = before,
        optimized_miles = raw_route_distance(&improved),
        "optimized route"
    );
    improved
}

fn nearest_neighbour(stops: &[Stop]) -> Vec<Stop> {
    let mut unvisited: Vec<Stop> = stops.to_vec();
    let mut ordered = Vec::with_capacity(stops.len());
    ordered.push(unvisited.remove(0));

    while !unvisited.is_empty() {
        let current = ordered.last().and_then(|s: &Stop| s.coordinates);
        let mut nearest = 0;
        let mut best = f64::INFINITY;

        for (index, candidate) in unvisited.iter().enumerate() {
            let miles = haversine_miles(current.as_ref(), candidate.coordinates.as_ref());
            if miles < best {
                best = miles;
                nearest = index;
            }
        }

        ordered.push(unvisited.remove(nearest));
    }

    ordered
}

fn two_opt(route: Vec<Stop>) -> Vec<Stop> {
    if route.len() < 4 {
        return route;
    }

    let mut best = route;
    let mut best_miles = raw_route_distance(&best);
    let mut improved = true;

    while improved {
        improved = false;
        for i in 1..best.len() - 2 {
            for j in i + 1..best.len() - 1 {
                let mut candidate = best.clone();
                candidate[i..=j].reverse();
                let miles = raw_route_distance(&candidate);
                if miles + IMPROVEMENT_EPSILON < best_miles {
                    best = candidate;
                    best_miles = miles;
                    improved = true;
                }
            }
        }
    }

    best
}
