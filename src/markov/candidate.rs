use std::sync::Arc;

/// Describes how a [`StateCandidate`] entered its sequence.
///
/// A candidate either starts the very first step ([`Origin::Initial`]),
/// restarts a sequence part-way through a trajectory because no
/// predecessor could reach it ([`Origin::Break`]), or continues the
/// sequence of a predecessor through a routed transition
/// ([`Origin::Linked`]).
#[derive(Debug)]
pub enum Origin<S, T> {
    Initial,
    Break,
    Linked {
        predecessor: Arc<StateCandidate<S, T>>,
        transition: T,
    },
}

impl<S, T> Origin<S, T> {
    /// Detaches the predecessor link, leaving the origin as initial.
    fn detach(&mut self) -> Option<Arc<StateCandidate<S, T>>> {
        match std::mem::replace(self, Origin::Initial) {
            Origin::Linked { predecessor, .. } => Some(predecessor),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// A hidden-state hypothesis at a single step of the filter.
///
/// Holds the hypothesised `state` (for map matching, a position upon
/// a road), the normalised filter probability of that state, and the
/// `log10` probability of the single most likely sequence ending in it.
///
/// Predecessors are shared back-references. The full trajectory is only
/// reachable by walking [`StateCandidate::predecessor`] links from the
/// survivors of the latest step, earlier candidates are released as soon
/// as nothing chains through them anymore.
#[derive(Debug)]
pub struct StateCandidate<S, T> {
    state: S,
    filtprob: f64,
    seqprob: f64,
    origin: Origin<S, T>,
}

impl<S, T> StateCandidate<S, T> {
    pub(crate) fn new(state: S, filtprob: f64, seqprob: f64, origin: Origin<S, T>) -> Self {
        Self {
            state,
            filtprob,
            seqprob,
            origin,
        }
    }

    /// Creates an unlinked candidate with known probabilities.
    ///
    /// Useful to restore a filter from a checkpoint, or to seed it with
    /// an externally known belief.
    pub fn seed(state: S, filtprob: f64, seqprob: f64) -> Self {
        Self::new(state, filtprob, seqprob, Origin::Initial)
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// The normalised filter (belief) probability, in `[0, 1]`.
    pub fn filtprob(&self) -> f64 {
        self.filtprob
    }

    /// The `log10` probability of the most likely sequence ending here.
    pub fn seqprob(&self) -> f64 {
        self.seqprob
    }

    pub fn origin(&self) -> &Origin<S, T> {
        &self.origin
    }

    pub fn predecessor(&self) -> Option<&Arc<StateCandidate<S, T>>> {
        match &self.origin {
            Origin::Linked { predecessor, .. } => Some(predecessor),
            _ => None,
        }
    }

    pub fn transition(&self) -> Option<&T> {
        match &self.origin {
            Origin::Linked { transition, .. } => Some(transition),
            _ => None,
        }
    }

    pub fn has_transition(&self) -> bool {
        matches!(self.origin, Origin::Linked { .. })
    }

    /// Returns `true` if the candidate restarted its sequence mid-trajectory.
    pub fn is_break(&self) -> bool {
        matches!(self.origin, Origin::Break)
    }

    /// Walks back through the predecessors of this candidate, starting
    /// with the candidate itself and ending at the start of its sequence
    /// (the first initial or break candidate).
    pub fn ancestry(&self) -> impl Iterator<Item = &StateCandidate<S, T>> {
        std::iter::successors(Some(self), |candidate| {
            candidate.predecessor().map(|predecessor| predecessor.as_ref())
        })
    }
}

impl<S, T> Drop for StateCandidate<S, T> {
    // Unwinds the predecessor chain iteratively, a recursive drop
    // would overflow the stack on long trajectories.
    fn drop(&mut self) {
        let mut next = self.origin.detach();

        while let Some(predecessor) = next {
            next = Arc::into_inner(predecessor).and_then(|mut inner| inner.origin.detach());
        }
    }
}
