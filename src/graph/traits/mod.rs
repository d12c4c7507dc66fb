mod route;
mod scan;
mod spatial;

pub use route::Route;
pub use scan::Scan;
pub use spatial::{Geodetic, Planar, Spatial};
