use crate::costing::*;
use crate::graph::{costs, Cost, EdgeId, Heading, Route, RoadPoint, Scan, Spatial, Trip};
use crate::markov::{Emission, Model, Reachable, StateOf, Transitions};
use crate::matching::{minimize, ConfigError, MatcherConfig, Sample};

use log::{debug, trace};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
#[cfg(feature = "tracing")]
use tracing::Level;
use wkt::ToWkt;

/// The speed, in distance units per second, by which the straight-line
/// distance between two samples is normalised into the transition base.
pub const SPEED_NORMALIZER: f64 = 60.0;

/// The shortest distance a transition may always route.
const MIN_ROUTE_BOUND: f64 = 1_000.0;

/// The fastest travel assumed between two samples, bounding the routes
/// explored for a transition.
const MAX_ROUTE_SPEED: f64 = 100.0;

/// The map matching [`Model`] of the Hidden Markov Model.
///
/// Candidates of a sample are the positions upon the roads near it,
/// scored by their distance (and heading) to the sample. Transitions
/// are the cheapest trips between the candidates of two consecutive
/// samples, scored by their cost beyond the straight-line expectation.
///
/// ### Example
///
/// ```rust,ignore
/// use waymark::graph::{costs, Geodetic};
/// use waymark::markov::Filter;
/// use waymark::matching::{Matcher, MatcherConfig};
///
/// let matcher = Matcher::new(&map, Geodetic, costs::distance, MatcherConfig::default())?;
/// let filter = Filter::new(matcher);
/// ```
pub struct Matcher<'a, G, S, E = DefaultEmissionCost, T = DefaultTransitionCost>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    map: &'a G,
    spatial: S,
    cost: Cost,
    config: MatcherConfig,
    costing: CostingStrategies<E, T>,
}

impl<'a, G, S> Matcher<'a, G, S>
where
    S: Spatial,
{
    /// Creates a matcher upon the `map`, which routes by the `cost`
    /// function and scores using the default strategies.
    pub fn new(
        map: &'a G,
        spatial: S,
        cost: Cost,
        config: MatcherConfig,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;

        let costing = CostingStrategies::new(
            DefaultEmissionCost::new(config.sigma, config.sigma_azimuth)?,
            DefaultTransitionCost::new(config.lambda)?,
        );

        Ok(Self {
            map,
            spatial,
            cost,
            config,
            costing,
        })
    }
}

impl<'a, G, S, E, T> Matcher<'a, G, S, E, T>
where
    S: Spatial,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Replaces the costing strategies of the matcher.
    pub fn with_costing<E2, T2>(self, costing: CostingStrategies<E2, T2>) -> Matcher<'a, G, S, E2, T2>
    where
        E2: EmissionStrategy,
        T2: TransitionStrategy,
    {
        Matcher {
            map: self.map,
            spatial: self.spatial,
            cost: self.cost,
            config: self.config,
            costing,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn map(&self) -> &G {
        self.map
    }

    pub fn spatial(&self) -> &S {
        &self.spatial
    }

    /// The bound on the length of the trips between two samples.
    fn bound(&self, elapsed_secs: f64) -> f64 {
        (elapsed_secs * MAX_ROUTE_SPEED)
            .min(self.config.max_distance)
            .max(MIN_ROUTE_BOUND)
    }
}

impl<G, S, E, T> Model for Matcher<'_, G, S, E, T>
where
    G: Scan + Route + Sync,
    S: Spatial,
    E: EmissionStrategy + Sync,
    T: TransitionStrategy + Sync,
{
    type State = RoadPoint;
    type Transition = Trip;
    type Sample = Sample;

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip_all))]
    fn candidates(&self, predecessors: &[StateOf<Self>], sample: &Sample) -> Vec<Emission<RoadPoint>> {
        debug!("Proposing candidates for {}", sample.position.wkt_string());

        let found = self.map.radius(
            &sample.position,
            self.config.max_radius,
            self.config.max_candidates,
        );

        let mut points = minimize(found);
        let slots = points
            .iter()
            .enumerate()
            .map(|(slot, point)| (point.edge(), slot))
            .collect::<FxHashMap<EdgeId, usize>>();

        // A predecessor "sticks" to its position if the new point upon its
        // road lies slightly behind it, preventing jitter from moving
        // the candidate against the direction of travel.
        for predecessor in predecessors {
            let previous = predecessor.state();
            let Some(&slot) = slots.get(&previous.edge()) else {
                continue;
            };

            let point = &points[slot];
            let backwards = match point.road.heading {
                Heading::Forward => point.fraction < previous.fraction,
                Heading::Backward => point.fraction > previous.fraction,
            };

            if backwards
                && self.spatial.distance(point.position, previous.position) < self.config.sigma
            {
                trace!("Candidate upon road {} sticks to its predecessor", point.edge());
                points[slot] = *previous;
            }
        }

        points
            .into_iter()
            .map(|point| {
                let distance = self.spatial.distance(sample.position, point.position);
                let context =
                    EmissionContext::new(distance).with_azimuths(sample.azimuth, point.azimuth);

                Emission::new(point, self.costing.emission(context))
            })
            .collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip_all))]
    fn transitions(
        &self,
        (previous, predecessors): (&Sample, &[StateOf<Self>]),
        (sample, candidates): (&Sample, &[Emission<RoadPoint>]),
    ) -> Transitions<Trip> {
        let elapsed = sample.elapsed_since(previous);
        let base = self.spatial.distance(previous.position, sample.position) / SPEED_NORMALIZER;
        let bound = self.bound(elapsed.num_milliseconds() as f64 / 1000.0);

        let targets = candidates
            .iter()
            .map(|candidate| candidate.state)
            .collect::<Vec<_>>();

        // Each predecessor routes independently, and is merged
        // back in the order of the predecessors.
        predecessors
            .par_iter()
            .enumerate()
            .map(|(source, predecessor)| {
                let origin = predecessor.state();
                let routes = self
                    .map
                    .route(origin, &targets, self.cost, costs::distance, bound);

                routes
                    .into_iter()
                    .map(|(target, roads)| {
                        let trip = Trip::new(*origin, targets[target], roads);
                        let context = TransitionContext::new(trip.cost(self.cost), base, elapsed);
                        let probability = self.costing.transition(context);

                        (source, target, Reachable::new(trip, probability))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}
