//! Costing strategies score the likelihood of candidates and of
//! the trips between them.
//!
//! ## Structure
//! Strategies are joined onto the aggregate [`CostingStrategies`]
//! structure, which is then supplied to the matcher.
//!
//! ```rust,ignore
//! use waymark::costing::CostingStrategies;
//!
//! // Create default strategies
//! let costing = CostingStrategies::default();
//!
//! // Supply them to the matcher
//! let matcher = Matcher::new(&map, Geodetic, costs::distance, config)?.with_costing(costing);
//! ```
//!
//! ### Creating your own strategy
//!
//! Implement [`Strategy`] for your structure, with the context of the
//! heuristic you need to override. The higher-order traits, like
//! [`TransitionStrategy`], are auto-derived for every structure which
//! implements [`Strategy<TransitionContext>`].
//!
//! ```rust
//! use waymark::costing::{Strategy, TransitionContext};
//!
//! struct FlatTransition;
//!
//! impl Strategy<TransitionContext> for FlatTransition {
//!     type Cost = f64;
//!
//!     fn calculate(&self, _: TransitionContext) -> Self::Cost {
//!         1.0
//!     }
//! }
//! ```
//!
//! ### Default Strategies:
//! - [`DefaultEmissionCost`]: Gaussian distance, with a heading term.
//! - [`DefaultTransitionCost`]: Negative exponential of the detour.
//!
#[doc(hidden)]
pub mod default;
#[doc(hidden)]
pub mod emission;
#[doc(hidden)]
pub mod transition;
#[doc(hidden)]
pub mod util;


#[doc(inline)]
pub use default::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
#[doc(inline)]
pub use util::*;
