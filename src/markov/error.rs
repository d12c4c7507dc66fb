use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Every emission and transition of the step resolved to a zero
    /// probability, so the filter distribution cannot be normalised.
    ///
    /// Callers may restart the filter without predecessors, or
    /// abandon the trajectory.
    #[error("degenerate step, total filter probability of {candidates} candidates is zero")]
    Degenerate { candidates: usize },
}
