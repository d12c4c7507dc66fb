use crate::markov::StateCandidate;

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A shared candidate of the model `M`.
pub type StateOf<M> = Arc<StateCandidate<<M as Model>::State, <M as Model>::Transition>>;

/// A newly proposed state, with its emission probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission<S> {
    pub state: S,
    pub probability: f64,
}

impl<S> Emission<S> {
    pub fn new(state: S, probability: f64) -> Self {
        Self { state, probability }
    }
}

/// A transition payload which reaches a candidate, with its
/// transition probability.
#[derive(Clone, Debug, PartialEq)]
pub struct Reachable<T> {
    pub transition: T,
    pub probability: f64,
}

impl<T> Reachable<T> {
    pub fn new(transition: T, probability: f64) -> Self {
        Self {
            transition,
            probability,
        }
    }
}

/// The transitions between the predecessors and candidates of a step.
///
/// Keyed by the `(predecessor, candidate)` index pair, relative to the
/// predecessor slice and emission vector given to
/// [`Model::transitions`]. A missing pair means the candidate is
/// unreachable from that predecessor.
#[derive(Debug)]
pub struct Transitions<T> {
    entries: FxHashMap<(usize, usize), Reachable<T>>,
}

impl<T> Default for Transitions<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T> Transitions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, predecessor: usize, candidate: usize, reachable: Reachable<T>) {
        self.entries.insert((predecessor, candidate), reachable);
    }

    pub fn get(&self, predecessor: usize, candidate: usize) -> Option<&Reachable<T>> {
        self.entries.get(&(predecessor, candidate))
    }

    pub fn remove(&mut self, predecessor: usize, candidate: usize) -> Option<Reachable<T>> {
        self.entries.remove(&(predecessor, candidate))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(usize, usize, Reachable<T>)> for Transitions<T> {
    fn from_iter<I: IntoIterator<Item = (usize, usize, Reachable<T>)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(predecessor, candidate, reachable)| ((predecessor, candidate), reachable))
            .collect();

        Self { entries }
    }
}

/// The domain capabilities the [`Filter`](crate::markov::Filter) requires.
///
/// A model proposes the candidate states of every incoming sample, and
/// scores the transitions between two consecutive candidate sets. The
/// forward algorithm itself is domain-agnostic, see the
/// [`Matcher`](crate::matching::Matcher) for the road network model.
pub trait Model {
    /// The hypothesised hidden state, such as a position on a road.
    type State;

    /// The payload describing how one state reached the next.
    type Transition;

    /// The observation fed into every step.
    type Sample;

    /// Proposes the candidates for `sample`, each with its emission
    /// probability. The `predecessors` are the candidates of the
    /// previous step, and are empty on the first step.
    fn candidates(
        &self,
        predecessors: &[Arc<StateCandidate<Self::State, Self::Transition>>],
        sample: &Self::Sample,
    ) -> Vec<Emission<Self::State>>;

    /// Scores the transitions from every predecessor to every candidate.
    ///
    /// Pairs which cannot be reached must be omitted.
    fn transitions(
        &self,
        previous: (
            &Self::Sample,
            &[Arc<StateCandidate<Self::State, Self::Transition>>],
        ),
        current: (&Self::Sample, &[Emission<Self::State>]),
    ) -> Transitions<Self::Transition>;
}
