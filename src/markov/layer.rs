use crate::markov::{Model, StateCandidate, StateOf};

/// The result of a single filter step.
///
/// This represents the [sample](#method.sample) which was filtered, and
/// the set of candidates it produced. A layer is the only state carried
/// between two steps, the history is reachable through the
/// predecessor links of its candidates.
pub struct Layer<M>
where
    M: Model,
{
    sample: M::Sample,
    candidates: Vec<StateOf<M>>,
}

impl<M> Layer<M>
where
    M: Model,
{
    pub fn new(sample: M::Sample, candidates: Vec<StateOf<M>>) -> Self {
        Self { sample, candidates }
    }

    pub fn sample(&self) -> &M::Sample {
        &self.sample
    }

    pub fn candidates(&self) -> &[StateOf<M>] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<StateOf<M>> {
        self.candidates
    }

    /// The candidate with the highest filter probability.
    pub fn estimate(&self) -> Option<&StateOf<M>> {
        Self::first_maximal(&self.candidates, |candidate| candidate.filtprob())
    }

    /// The candidate with the highest sequence probability, which is
    /// the end of the most likely (Viterbi) path.
    pub fn best(&self) -> Option<&StateOf<M>> {
        Self::first_maximal(&self.candidates, |candidate| candidate.seqprob())
    }

    /// Backtracks the most likely sequence, from the start of the sequence
    /// (the first sample, or the latest break) up to [`Layer::best`].
    pub fn sequence(&self) -> Vec<&StateCandidate<M::State, M::Transition>> {
        let Some(best) = self.best() else {
            return vec![];
        };

        let mut sequence = best.ancestry().collect::<Vec<_>>();
        sequence.reverse();
        sequence
    }

    // Ties keep the earliest candidate.
    fn first_maximal(
        candidates: &[StateOf<M>],
        key: impl Fn(&StateOf<M>) -> f64,
    ) -> Option<&StateOf<M>> {
        candidates.iter().fold(None, |best, candidate| match best {
            Some(current) if key(current) >= key(candidate) => Some(current),
            _ => Some(candidate),
        })
    }
}
