//! Map matching upon a road network.
//!
//! The [`Matcher`] is the [`Model`](crate::markov::Model) of the filter
//! for road networks. It proposes the positions upon the roads near every
//! [`Sample`], reduced to their [minimal set](minimize), and routes between
//! the positions of consecutive samples.
//!
//! A [`Track`] drives the filter for a single trajectory, sample by
//! sample, holding the latest layer between updates.

#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod matcher;
pub mod minset;
#[doc(hidden)]
pub mod sample;
#[doc(hidden)]
pub mod track;


#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use matcher::*;
#[doc(inline)]
pub use minset::minimize;
#[doc(inline)]
pub use sample::*;
#[doc(inline)]
pub use track::*;
