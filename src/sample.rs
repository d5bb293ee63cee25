//! Synthetic point clouds used until slides are backed by real tabular data
//! (rows of x, y, z and an image reference).

use rand::Rng;
use std::f32::consts::TAU;

pub const BASE_POINT_COUNT: usize = 50;
pub const POINTS_PER_ORDINAL: usize = 20;

const RADIUS: std::ops::Range<f32> = 1.0..3.0;
const HEIGHT: std::ops::Range<f32> = -1.0..1.0;
const JITTER: std::ops::Range<f32> = -0.25..0.25;

pub const RED_BAND: std::ops::Range<f32> = 0.3..1.0;
pub const GREEN_BAND: std::ops::Range<f32> = 0.5..1.0;
pub const BLUE_BAND: std::ops::Range<f32> = 0.8..1.0;

/// One decorative sample: position, normalized RGB, and an image reference
/// reserved for a future show-image-on-click feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub image: String,
}

/// Number of points generated for a 1-indexed slide.
pub const fn point_count(ordinal: u32) -> usize {
    BASE_POINT_COUNT + POINTS_PER_ORDINAL * ordinal as usize
}

/// Polar draw on the noisy ring before jitter is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSample {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    pub jitter: [f32; 2],
}

impl RingSample {
    pub fn draw<R: Rng + ?Sized>(index: usize, count: usize, rng: &mut R) -> Self {
        Self {
            angle: index as f32 / count as f32 * TAU,
            radius: rng.gen_range(RADIUS),
            height: rng.gen_range(HEIGHT),
            jitter: [rng.gen_range(JITTER), rng.gen_range(JITTER)],
        }
    }

    pub fn position(&self) -> [f32; 3] {
        [
            self.angle.cos() * self.radius + self.jitter[0],
            self.height,
            self.angle.sin() * self.radius + self.jitter[1],
        ]
    }
}

fn cool_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    [
        rng.gen_range(RED_BAND),
        rng.gen_range(GREEN_BAND),
        rng.gen_range(BLUE_BAND),
    ]
}

/// Builds the point set for a slide. The count depends only on `ordinal`;
/// positions and colors come from `rng`.
pub fn generate_sample_data<R: Rng + ?Sized>(ordinal: u32, rng: &mut R) -> Vec<Point> {
    let count = point_count(ordinal);
    (0..count)
        .map(|index| {
            let ring = RingSample::draw(index, count, rng);
            Point {
                position: ring.position(),
                color: cool_color(rng),
                image: format!("slide{ordinal}/point_{index}.jpg"),
            }
        })
        .collect()
}

pub fn sample_data_for_slide(ordinal: u32) -> Vec<Point> {
    generate_sample_data(ordinal, &mut rand::thread_rng())
}

/// Packs points as `[x, y, z, r, g, b]` per vertex for a GPU buffer.
pub fn interleave(points: &[Point]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|p| p.position.into_iter().chain(p.color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn counts_grow_with_ordinal() {
        let mut rng = StdRng::seed_from_u64(1);
        for ordinal in 1..=3 {
            let points = generate_sample_data(ordinal, &mut rng);
            assert_eq!(points.len(), 50 + 20 * ordinal as usize);
        }
        assert_eq!(point_count(1), 70);
        assert_eq!(point_count(3), 110);
    }

    #[test]
    fn image_refs_name_slide_and_index() {
        let mut rng = StdRng::seed_from_u64(2);
        let points = generate_sample_data(2, &mut rng);
        assert_eq!(points[0].image, "slide2/point_0.jpg");
        assert_eq!(points[89].image, "slide2/point_89.jpg");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_sample_data(1, &mut StdRng::seed_from_u64(9));
        let b = generate_sample_data(1, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn interleave_keeps_position_then_color() {
        let points = vec![Point {
            position: [1.0, 2.0, 3.0],
            color: [0.4, 0.6, 0.9],
            image: String::new(),
        }];
        assert_eq!(interleave(&points), vec![1.0, 2.0, 3.0, 0.4, 0.6, 0.9]);
    }

    #[test]
    fn ring_angles_span_one_turn() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = RingSample::draw(0, 4, &mut rng);
        let last = RingSample::draw(3, 4, &mut rng);
        assert_eq!(first.angle, 0.0);
        assert!((last.angle - 0.75 * TAU).abs() < 1e-6);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_colors_stay_in_bands(seed in any::<u64>(), ordinal in 1u32..6) {
                let points = generate_sample_data(ordinal, &mut StdRng::seed_from_u64(seed));
                for p in &points {
                    prop_assert!(RED_BAND.contains(&p.color[0]));
                    prop_assert!(GREEN_BAND.contains(&p.color[1]));
                    prop_assert!(BLUE_BAND.contains(&p.color[2]));
                    prop_assert!(HEIGHT.contains(&p.position[1]));
                }
            }

            #[test]
            fn prop_ring_radius_ignoring_jitter(seed in any::<u64>(), count in 1usize..200) {
                let mut rng = StdRng::seed_from_u64(seed);
                for index in 0..count {
                    let ring = RingSample::draw(index, count, &mut rng);
                    let [x, _, z] = ring.position();
                    let planar = (x - ring.jitter[0]).hypot(z - ring.jitter[1]);
                    prop_assert!(RADIUS.contains(&ring.radius));
                    prop_assert!(planar >= 1.0 - 1e-4 && planar < 3.0 + 1e-4);
                }
            }
        }
    }
}
