#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod costing;
pub mod graph;
pub mod markov;
pub mod matching;
pub mod util;

#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use markov::{Filter, Layer, Model, StateCandidate};
#[doc(inline)]
pub use matching::{Matcher, MatcherConfig, Sample, Track};
