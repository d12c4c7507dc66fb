use crate::markov::{Filter, FilterError, Layer, Model, StateCandidate, StateOf};

use log::{info, warn};

/// An online matching session of a single trajectory.
///
/// Owns the latest [`Layer`] of the filter, feeding it back into every
/// following step. Sessions are independent of one another, so many
/// trajectories may be tracked in parallel, each by its own track.
pub struct Track<M>
where
    M: Model,
{
    filter: Filter<M>,
    layer: Option<Layer<M>>,
}

impl<M> Track<M>
where
    M: Model,
{
    pub fn new(model: M) -> Self {
        Self {
            filter: Filter::new(model),
            layer: None,
        }
    }

    pub fn filter(&self) -> &Filter<M> {
        &self.filter
    }

    /// Filters the next `sample` of the trajectory.
    ///
    /// A degenerate step discards the layer, so the next sample
    /// starts a new sequence. The error is returned, such that the
    /// caller may retry the same sample.
    pub fn update(&mut self, sample: M::Sample) -> Result<&Layer<M>, FilterError> {
        match self.filter.step(self.layer.as_ref(), sample) {
            Ok(layer) => {
                let layer: &Layer<M> = self.layer.insert(layer);
                Ok(layer)
            }
            Err(error) => {
                warn!("Discarding the track after a failed step: {error}");
                self.layer = None;
                Err(error)
            }
        }
    }

    pub fn layer(&self) -> Option<&Layer<M>> {
        self.layer.as_ref()
    }

    /// The most likely candidate of the latest sample.
    pub fn estimate(&self) -> Option<&StateOf<M>> {
        self.layer.as_ref().and_then(|layer| layer.estimate())
    }

    /// The most likely sequence of the trajectory, since the
    /// latest break in the sequence.
    pub fn sequence(&self) -> Vec<&StateCandidate<M::State, M::Transition>> {
        self.layer
            .as_ref()
            .map(|layer| layer.sequence())
            .unwrap_or_default()
    }

    /// Forgets the trajectory, the next sample starts a new sequence.
    pub fn reset(&mut self) {
        if self.layer.take().is_some() {
            info!("Track reset");
        }
    }
}
