use geo::{Bearing, Destination, Distance, Euclidean, Haversine, Point};

/// The spatial operations the matcher requires of its coordinate space.
///
/// Azimuths are given in degrees clockwise from north, within `[0, 360)`.
pub trait Spatial: Send + Sync {
    /// The distance between two points, in the units of the space.
    fn distance(&self, a: Point, b: Point) -> f64;

    /// The azimuth of travel from `a` towards `b`.
    fn azimuth(&self, a: Point, b: Point) -> f64;

    /// The point `distance` away from `origin`, along the `bearing`.
    fn destination(&self, origin: Point, bearing: f64, distance: f64) -> Point;
}

/// Longitude/latitude coordinates on the earth, measured in meters
/// upon a sphere of the mean earth radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geodetic;

impl Spatial for Geodetic {
    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        Haversine.distance(a, b)
    }

    #[inline]
    fn azimuth(&self, a: Point, b: Point) -> f64 {
        Haversine.bearing(a, b).rem_euclid(360.0)
    }

    #[inline]
    fn destination(&self, origin: Point, bearing: f64, distance: f64) -> Point {
        Haversine.destination(origin, bearing, distance)
    }
}

/// Cartesian coordinates on a plane, where `y` points north.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Planar;

impl Spatial for Planar {
    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        Euclidean.distance(a, b)
    }

    #[inline]
    fn azimuth(&self, a: Point, b: Point) -> f64 {
        let delta = b - a;
        delta.x().atan2(delta.y()).to_degrees().rem_euclid(360.0)
    }

    #[inline]
    fn destination(&self, origin: Point, bearing: f64, distance: f64) -> Point {
        let radians = bearing.to_radians();
        Point::new(
            origin.x() + distance * radians.sin(),
            origin.y() + distance * radians.cos(),
        )
    }
}
