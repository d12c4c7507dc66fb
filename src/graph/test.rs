use crate::graph::*;

use approx::assert_relative_eq;
use geo::{point, Line};

fn road(id: EdgeId, heading: Heading) -> Road {
    let (source, target) = match heading {
        Heading::Forward => (1, 2),
        Heading::Backward => (2, 1),
    };

    Road {
        id,
        base: id / 2,
        source,
        target,
        heading,
        geometry: Line::new(point! { x: 0.0, y: 0.0 }, point! { x: 100.0, y: 0.0 }),
        length: 100.0,
        speed: 10.0,
    }
}

#[test]
fn travel_fraction_follows_heading() {
    let forward = road(2, Heading::Forward);
    let backward = road(3, Heading::Backward);

    assert_relative_eq!(forward.travel_fraction(0.3), 0.3);
    assert_relative_eq!(backward.travel_fraction(0.3), 0.7);
}

#[test]
fn road_point_upon_base_geometry() {
    let forward = RoadPoint::on(road(2, Heading::Forward), 0.25, &Planar);
    let backward = RoadPoint::on(road(3, Heading::Backward), 0.25, &Planar);

    // Both directions share the base position
    assert_relative_eq!(forward.position.x(), 25.0);
    assert_relative_eq!(backward.position.x(), 25.0);

    assert_relative_eq!(forward.azimuth, 90.0, epsilon = 1e-9);
    assert_relative_eq!(backward.azimuth, 270.0, epsilon = 1e-9);

    assert_relative_eq!(backward.travel_fraction(), 0.75);
    assert_eq!(backward.edge(), 3);
}

#[test]
fn road_point_fraction_is_clamped() {
    let point = RoadPoint::on(road(2, Heading::Forward), 1.5, &Planar);

    assert_relative_eq!(point.fraction, 1.0);
    assert_relative_eq!(point.position.x(), 100.0);
}

#[test]
fn trip_upon_single_road() {
    let road = road(2, Heading::Forward);
    let source = RoadPoint::on(road, 0.2, &Planar);
    let target = RoadPoint::on(road, 0.7, &Planar);

    let trip = Trip::new(source, target, vec![road]);

    assert_relative_eq!(trip.length(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(trip.cost(costs::time), 5.0, epsilon = 1e-9);
}

#[test]
fn trip_across_roads() {
    let forward = road(2, Heading::Forward);
    let backward = road(3, Heading::Backward);

    // Turning around at the end of the road, and returning to it
    let source = RoadPoint::on(forward, 0.7, &Planar);
    let target = RoadPoint::on(forward, 0.2, &Planar);

    let trip = Trip::new(source, target, vec![forward, backward, forward]);

    assert_relative_eq!(trip.length(), 30.0 + 100.0 + 20.0, epsilon = 1e-9);
    assert_eq!(trip.roads().len(), 3);
    assert_eq!(trip.source().edge(), 2);
    assert_eq!(trip.target().edge(), 2);
}

#[test]
fn trip_against_base_geometry() {
    let backward = road(3, Heading::Backward);

    // Travelling from base fraction 0.8 towards 0.1
    let source = RoadPoint::on(backward, 0.8, &Planar);
    let target = RoadPoint::on(backward, 0.1, &Planar);

    let trip = Trip::new(source, target, vec![backward]);
    assert_relative_eq!(trip.length(), 70.0, epsilon = 1e-9);
}

#[test]
fn planar_operations() {
    let origin = point! { x: 10.0, y: 10.0 };

    assert_relative_eq!(Planar.distance(origin, point! { x: 13.0, y: 14.0 }), 5.0);
    assert_relative_eq!(Planar.azimuth(origin, point! { x: 10.0, y: 20.0 }), 0.0);
    assert_relative_eq!(Planar.azimuth(origin, point! { x: 0.0, y: 10.0 }), 270.0);
    assert_relative_eq!(
        Planar.azimuth(origin, point! { x: 10.0, y: 0.0 }),
        180.0,
        epsilon = 1e-9
    );

    let destination = Planar.destination(origin, 90.0, 5.0);
    assert_relative_eq!(destination.x(), 15.0, epsilon = 1e-9);
    assert_relative_eq!(destination.y(), 10.0, epsilon = 1e-9);
}

#[test]
fn geodetic_operations() {
    let origin = point! { x: 0.0, y: 0.0 };

    // A degree of latitude, upon the mean earth radius
    let north = point! { x: 0.0, y: 1.0 };
    assert_relative_eq!(Geodetic.distance(origin, north), 111_195.0, max_relative = 1e-3);
    assert_relative_eq!(Geodetic.azimuth(origin, north), 0.0, epsilon = 1e-9);

    let east = point! { x: 1.0, y: 0.0 };
    assert_relative_eq!(Geodetic.azimuth(origin, east), 90.0, epsilon = 1e-9);

    // Destinations share the sphere of the distance and azimuth
    let destination = Geodetic.destination(origin, 45.0, 1_000.0);
    assert_relative_eq!(Geodetic.distance(origin, destination), 1_000.0, max_relative = 1e-9);
    assert_relative_eq!(Geodetic.azimuth(origin, destination), 45.0, epsilon = 1e-6);
    assert!(destination.x() > 0.0 && destination.y() > 0.0);
}
