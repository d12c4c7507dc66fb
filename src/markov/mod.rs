//! A generic, online Hidden-Markov-Model (HMM) filter.
//!
//! The [`Filter`] performs a single step of the forward algorithm for
//! every incoming sample. It keeps a normalised belief over the candidate
//! states (the filter probability) alongside the score of the most likely
//! sequence ending in each candidate (the Viterbi score), linking every
//! candidate to the predecessor which maximises it.
//!
//! The domain is supplied through the [`Model`] trait, which proposes
//! candidate states and scores the transitions between them.

#[doc(hidden)]
pub mod candidate;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod filter;
#[doc(hidden)]
pub mod layer;
#[doc(hidden)]
pub mod model;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use filter::*;
#[doc(inline)]
pub use layer::*;
#[doc(inline)]
pub use model::*;
