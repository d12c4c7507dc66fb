use crate::markov::*;

use log::{debug, trace};
use measure_time::debug_time;
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::Level;

/// A candidate whose probabilities are known, but not yet normalised.
struct Staged<S, T> {
    state: S,
    filtprob: f64,
    seqprob: f64,
    origin: Origin<S, T>,
}

/// The online forward-algorithm engine of the Hidden Markov Model.
///
/// For every incoming sample, the filter asks its [`Model`] for the
/// candidate states and the transitions reaching them, and folds them
/// into the filter probability (the forward marginal) and the sequence
/// probability (the Viterbi score) of each candidate.
///
/// The filter holds no state between steps. Everything a step depends
/// upon is the [`Layer`] of the previous step, which the caller passes
/// back in. Independent trajectories may therefore be filtered in
/// parallel using the same filter.
///
/// ### Example
///
/// ```rust,ignore
/// use waymark::markov::Filter;
///
/// let filter = Filter::new(matcher);
///
/// let mut layer = None;
/// for sample in samples {
///     layer = Some(filter.step(layer.as_ref(), sample)?);
/// }
///
/// // The most likely sequence of the trajectory
/// let sequence = layer.map(|layer| layer.sequence().len());
/// ```
pub struct Filter<M> {
    model: M,
}

impl<M> Filter<M>
where
    M: Model,
{
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Filters a `sample` against the `previous` layer, producing the
    /// layer of this step. Without a previous layer, the sample starts
    /// a new sequence.
    pub fn step(
        &self,
        previous: Option<&Layer<M>>,
        sample: M::Sample,
    ) -> Result<Layer<M>, FilterError> {
        let previous = previous.map(|layer| (layer.sample(), layer.candidates()));
        let candidates = self.execute(previous, &sample)?;

        Ok(Layer::new(sample, candidates))
    }

    /// Executes a single step of the forward algorithm.
    ///
    /// The `previous` sample and its candidates are the predecessors of
    /// this step. Supplying no predecessors treats every candidate
    /// of `sample` as the initial state of a sequence.
    ///
    /// Candidates which cannot be reached from any predecessor break the
    /// sequence. They take their raw emission as filter probability, and
    /// are normalised together with every linked candidate.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    pub fn execute(
        &self,
        previous: Option<(&M::Sample, &[StateOf<M>])>,
        sample: &M::Sample,
    ) -> Result<Vec<StateOf<M>>, FilterError> {
        debug_time!("filter step");

        let predecessors = previous.map_or(&[][..], |(_, predecessors)| predecessors);
        let emissions = self.model.candidates(predecessors, sample);

        debug!(
            "Step proposed {} candidates against {} predecessors",
            emissions.len(),
            predecessors.len()
        );

        let Some((previous_sample, predecessors)) =
            previous.filter(|(_, predecessors)| !predecessors.is_empty())
        else {
            let staged = emissions
                .into_iter()
                .map(|emission| Staged {
                    state: emission.state,
                    filtprob: emission.probability,
                    seqprob: emission.probability.log10(),
                    origin: Origin::Initial,
                })
                .collect::<Vec<_>>();

            return Self::normalize(staged);
        };

        let mut transitions = self
            .model
            .transitions((previous_sample, predecessors), (sample, &emissions));

        debug!("Scored {} transitions", transitions.len());

        let staged = emissions
            .into_iter()
            .enumerate()
            .map(|(index, emission)| {
                Self::fold(predecessors, &mut transitions, index, emission)
            })
            .collect::<Vec<_>>();

        Self::normalize(staged)
    }

    /// Folds every transition reaching the candidate at `index` into its
    /// filter probability, and selects the predecessor which maximises
    /// its sequence probability.
    fn fold(
        predecessors: &[StateOf<M>],
        transitions: &mut Transitions<M::Transition>,
        index: usize,
        emission: Emission<M::State>,
    ) -> Staged<M::State, M::Transition> {
        let mut filtprob = 0.0;
        let mut best: Option<(usize, f64)> = None;

        for (source, predecessor) in predecessors.iter().enumerate() {
            let Some(reachable) = transitions.get(source, index) else {
                continue;
            };

            // Zero-probability transitions are unreachable.
            if !(reachable.probability > 0.0) {
                continue;
            }

            filtprob += predecessor.filtprob() * reachable.probability;

            let seqprob = predecessor.seqprob()
                + reachable.probability.log10()
                + emission.probability.log10();

            // Ties keep the earliest predecessor.
            if best.map_or(true, |(_, current)| seqprob > current) {
                best = Some((source, seqprob));
            }
        }

        let linked = best.and_then(|(source, seqprob)| {
            transitions
                .remove(source, index)
                .map(|reachable| (source, seqprob, reachable))
        });

        match linked {
            Some((source, seqprob, reachable)) => Staged {
                state: emission.state,
                filtprob: filtprob * emission.probability,
                seqprob,
                origin: Origin::Linked {
                    predecessor: Arc::clone(&predecessors[source]),
                    transition: reachable.transition,
                },
            },
            None => {
                trace!("Candidate {index} is unreachable, breaking sequence");

                Staged {
                    state: emission.state,
                    filtprob: emission.probability,
                    seqprob: emission.probability.log10(),
                    origin: Origin::Break,
                }
            }
        }
    }

    fn normalize(
        staged: Vec<Staged<M::State, M::Transition>>,
    ) -> Result<Vec<StateOf<M>>, FilterError> {
        if staged.is_empty() {
            return Ok(vec![]);
        }

        let total = staged.iter().map(|candidate| candidate.filtprob).sum::<f64>();
        if !(total > 0.0 && total.is_finite()) {
            return Err(FilterError::Degenerate {
                candidates: staged.len(),
            });
        }

        let candidates = staged
            .into_iter()
            .map(|candidate| {
                Arc::new(StateCandidate::new(
                    candidate.state,
                    candidate.filtprob / total,
                    candidate.seqprob,
                    candidate.origin,
                ))
            })
            .collect();

        Ok(candidates)
    }
}
