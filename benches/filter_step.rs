use chrono::{DateTime, TimeDelta, Utc};
use criterion::criterion_main;
use geo::{point, LineString};
use waymark::graph::{costs, Planar, RoadMap, RoadSpec};
use waymark::{Matcher, MatcherConfig, Sample, Track};
use wkt::TryFromWkt;

const GRID_SIZE: u64 = 20;
const GRID_SPACING: f64 = 100.0;

struct TrackScenario {
    name: &'static str,
    trajectory: &'static str,
    interval: i64,
}

const TRACK_CASES: [TrackScenario; 2] = [
    TrackScenario {
        name: "STRAIGHT_ROW",
        trajectory: "LINESTRING(10 3,60 -3,110 2,160 4,210 -1,260 3,310 -2,360 1,410 3,460 -4)",
        interval: 5,
    },
    TrackScenario {
        name: "STAIRCASE",
        trajectory: "LINESTRING(10 2,60 -3,98 40,103 90,150 102,210 98,302 150,296 210,350 303,410 297)",
        interval: 8,
    },
];

/// A square grid of two-way roads.
fn grid() -> RoadMap<Planar> {
    let node = |x: u64, y: u64| y * GRID_SIZE + x;

    let mut builder = RoadMap::builder(Planar);
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            builder = builder.node(
                node(x, y),
                point! { x: x as f64 * GRID_SPACING, y: y as f64 * GRID_SPACING },
            );
        }
    }

    let mut id = 0;
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            if x + 1 < GRID_SIZE {
                id += 1;
                builder = builder.road(RoadSpec::two_way(id, node(x, y), node(x + 1, y)));
            }

            if y + 1 < GRID_SIZE {
                id += 1;
                builder = builder.road(RoadSpec::two_way(id, node(x, y), node(x, y + 1)));
            }
        }
    }

    builder.build().expect("Grid must be built")
}

fn samples(scenario: &TrackScenario) -> Vec<Sample> {
    let linestring: LineString<f64> = LineString::try_from_wkt_str(scenario.trajectory)
        .expect("Linestring must parse successfully.");

    let start = DateTime::<Utc>::UNIX_EPOCH;
    linestring
        .points()
        .enumerate()
        .map(|(index, position)| {
            let offset = TimeDelta::seconds(index as i64 * scenario.interval);
            Sample::new(start + offset, position)
        })
        .collect()
}

fn target_benchmark(c: &mut criterion::Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("track");
    group.significance_level(0.1).sample_size(30);

    let map = grid();
    let config = MatcherConfig::default().with_max_radius(50.0);

    TRACK_CASES.into_iter().for_each(|sc| {
        let samples = samples(&sc);

        group.bench_function(format!("track: {}", sc.name), |b| {
            b.iter(|| {
                let matcher = Matcher::new(&map, Planar, costs::distance, config)
                    .expect("Config must be valid");

                let mut track = Track::new(matcher);
                for sample in &samples {
                    track.update(*sample).expect("Step must not be degenerate");
                }

                assert_eq!(track.sequence().len(), samples.len());
            })
        });
    });

    group.finish();
}

criterion::criterion_group!(track_benches, target_benchmark);
criterion_main!(track_benches);
