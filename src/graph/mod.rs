//! The road network the matcher operates upon.
//!
//! The matcher depends only upon the [`Scan`] and [`Route`] traits, which
//! may be implemented over any network. The [`RoadMap`] is an in-memory
//! implementation of both, generic over the [`Spatial`] operations of its
//! coordinate space.

pub mod costs;
#[doc(hidden)]
pub mod map;
pub mod primitives;
#[doc(hidden)]
pub mod road;
#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod trip;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use costs::Cost;
#[doc(inline)]
pub use map::*;
#[doc(inline)]
pub use road::*;
#[doc(inline)]
pub use traits::*;
#[doc(inline)]
pub use trip::*;
