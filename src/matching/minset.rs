//! Minimisation of the candidate points of a sample.
//!
//! A radius search yields a point upon every road near a sample. Many of
//! these describe the same physical position, such as the end of one road
//! and the start of the road which follows it, or the two directions of a
//! two-way road. Matching every one of them bloats each step of the
//! filter without adding any information.
use crate::graph::{EdgeId, RoadPoint};

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

/// Fractions within this distance of a road end lie upon its node.
pub const NODE_TOLERANCE: f64 = 1e-8;

/// Points upon parallel roads closer than this fraction are duplicates.
pub const PARALLEL_TOLERANCE: f64 = 1e-3;

/// Reduces `points` to a minimal set of distinct positions.
///
/// 1. Every edge keeps at most a single point, the one with the
///    lowest fraction.
/// 2. Of the points upon parallel roads, sharing the same source and
///    target node in the same heading, those within the tolerance of a
///    kept point collapse onto it. Points are kept in order of their
///    fraction, then their edge.
/// 3. A point at the very start of a road is dropped if another point
///    lies at the very end of a road leading into it, as both describe
///    the same node.
///
/// The result is sorted by edge, and does not depend upon the order of
/// the input. Minimising a minimal set leaves it unchanged.
pub fn minimize(points: impl IntoIterator<Item = RoadPoint>) -> Vec<RoadPoint> {
    let mut unique: FxHashMap<EdgeId, RoadPoint> = FxHashMap::default();
    for point in points {
        unique
            .entry(point.edge())
            .and_modify(|existing| {
                if point.fraction < existing.fraction {
                    *existing = point;
                }
            })
            .or_insert(point);
    }

    let distinct = unique
        .into_values()
        .into_group_map_by(|point| (point.road.source, point.road.target, point.road.heading))
        .into_values()
        .flat_map(|parallel| {
            let mut kept: Vec<RoadPoint> = Vec::with_capacity(parallel.len());

            let sorted = parallel.into_iter().sorted_by(|a, b| {
                a.fraction
                    .total_cmp(&b.fraction)
                    .then_with(|| a.edge().cmp(&b.edge()))
            });

            for point in sorted {
                let duplicate = kept
                    .last()
                    .is_some_and(|last| point.fraction - last.fraction <= PARALLEL_TOLERANCE);

                if !duplicate {
                    kept.push(point);
                }
            }

            kept
        })
        .collect::<Vec<_>>();

    let arrived = distinct
        .iter()
        .filter(|point| point.travel_fraction() >= 1.0 - NODE_TOLERANCE)
        .map(|point| point.road.target)
        .collect::<FxHashSet<_>>();

    distinct
        .into_iter()
        .filter(|point| {
            !(point.travel_fraction() <= NODE_TOLERANCE && arrived.contains(&point.road.source))
        })
        .sorted_by_key(|point| point.edge())
        .collect()
}
