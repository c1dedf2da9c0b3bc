//! Poisson-disk sampling in the unit domain
//!
//! Bridson-style dart throwing: an active list of accepted points spawns
//! candidates in the annulus `[d, 2d)` around a randomly chosen member, and a
//! candidate is kept only if no accepted point within its bucket neighborhood
//! lies closer than `d`.
//!
//! # Approximation
//!
//! Separation is only checked against points filed in the acceleration grid
//! (bucket side `d/√2`) within the half-open window `[cell-5, cell+5)`. Points
//! landing exactly on the far domain edge fall outside the acceleration grid and
//! are emitted without being indexed, so they can rarely end up closer than `d`
//! to a later point. The sampler may also return fewer points than requested
//! when the domain saturates; neither case is an error.

use rand::Rng;

use super::bucket_grid::{BucketGrid, GridWindow};
use crate::foundation::math::{constants::PI, Vec2};

/// Offspring tried per active point when none is configured
pub const DEFAULT_OFFSPRING: u32 = 30;

/// Neighborhood scanned when testing a candidate, `[cell-5, cell+5)`
const NEIGHBORHOOD: GridWindow = GridWindow::new(-5, 4);

/// Shape of the region points are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleDomain {
    /// Disc centred at `(0.5, 0.5)` with radius `0.5`
    #[default]
    Disc,
    /// The unit square `[0, 1]²`
    Rectangle,
}

impl SampleDomain {
    /// Whether `point` lies inside the domain (boundary inclusive)
    pub fn contains(self, point: Vec2) -> bool {
        match self {
            Self::Disc => (point - Vec2::new(0.5, 0.5)).norm_squared() <= 0.25,
            Self::Rectangle => (0.0..=1.0).contains(&point.x) && (0.0..=1.0).contains(&point.y),
        }
    }
}

/// Builder and runner for one sampling pass
#[derive(Debug, Clone)]
pub struct PoissonSampler {
    count: usize,
    offspring: u32,
    domain: SampleDomain,
    min_distance: Option<f32>,
}

impl PoissonSampler {
    /// Sampler targeting `count` points with default settings
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            offspring: DEFAULT_OFFSPRING,
            domain: SampleDomain::Disc,
            min_distance: None,
        }
    }

    /// Candidates generated around each popped active point
    #[must_use]
    pub const fn with_offspring(mut self, offspring: u32) -> Self {
        self.offspring = offspring;
        self
    }

    /// Domain shape
    #[must_use]
    pub const fn with_domain(mut self, domain: SampleDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Minimum separation. Non-positive or non-finite values fall back to the
    /// derived `sqrt(N)/N`.
    #[must_use]
    pub fn with_min_distance(mut self, distance: f32) -> Self {
        self.min_distance = (distance.is_finite() && distance > 0.0).then_some(distance);
        self
    }

    /// Target point count
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Separation actually used by [`PoissonSampler::generate`]
    pub fn min_distance(&self) -> f32 {
        self.min_distance.unwrap_or_else(|| {
            let n = self.count.max(1) as f32;
            n.sqrt() / n
        })
    }

    /// Cells per side of the acceleration grid [`PoissonSampler::generate`]
    /// allocates, `ceil(√2 / d)`
    pub fn grid_side(&self) -> usize {
        (1.0 / self.bucket_size()).ceil() as usize
    }

    fn bucket_size(&self) -> f32 {
        self.min_distance() * std::f32::consts::FRAC_1_SQRT_2
    }

    /// Run the sampler, drawing every random number from `rng`.
    ///
    /// Returns at most `count` points in acceptance order.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec2> {
        if self.count == 0 {
            return Vec::new();
        }

        let distance = self.min_distance();
        let bucket = self.bucket_size();
        let side = self.grid_side();
        let mut accel = BucketGrid::new(side, side, bucket);

        let mut points = Vec::with_capacity(self.count);
        let mut active = Vec::new();

        let first = loop {
            let candidate = Vec2::new(rng.gen(), rng.gen());
            if self.domain.contains(candidate) {
                break candidate;
            }
        };
        accel.insert(first);
        points.push(first);
        active.push(first);

        while !active.is_empty() && points.len() < self.count {
            let origin = active.remove(rng.gen_range(0..active.len()));

            for _ in 0..self.offspring {
                let candidate = Self::annulus_point(rng, origin, distance);
                if !self.domain.contains(candidate) || Self::crowded(&accel, candidate, distance) {
                    continue;
                }
                accel.insert(candidate);
                points.push(candidate);
                active.push(candidate);
            }
        }

        points.truncate(self.count);
        log::trace!(
            "Poisson pass: {} of {} points, d = {distance:.4}, {:?}",
            points.len(),
            self.count,
            self.domain
        );
        points
    }

    fn annulus_point<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, distance: f32) -> Vec2 {
        let radius = distance * (rng.gen::<f32>() + 1.0);
        let angle = 2.0 * PI * rng.gen::<f32>();
        origin + Vec2::new(radius * angle.cos(), radius * angle.sin())
    }

    fn crowded(accel: &BucketGrid<Vec2>, candidate: Vec2, distance: f32) -> bool {
        let limit = distance * distance;
        accel
            .neighbors(accel.cell_of(candidate), NEIGHBORHOOD)
            .into_iter()
            .any(|point| (point - candidate).norm_squared() < limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::random::seeded_rng;
    use approx::assert_relative_eq;

    fn assert_separated(points: &[Vec2], distance: f32) {
        for (i, p) in points.iter().enumerate() {
            for q in &points[i + 1..] {
                assert!(
                    (p - q).norm() >= distance * (1.0 - 1e-5),
                    "points {p:?} and {q:?} closer than {distance}"
                );
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = seeded_rng(1);
        assert!(PoissonSampler::new(0).generate(&mut rng).is_empty());
    }

    #[test]
    fn test_derived_min_distance() {
        assert_relative_eq!(PoissonSampler::new(16).min_distance(), 0.25);
        assert_relative_eq!(PoissonSampler::new(16).with_min_distance(-1.0).min_distance(), 0.25);
        assert_relative_eq!(PoissonSampler::new(16).with_min_distance(0.1).min_distance(), 0.1);
    }

    #[test]
    fn test_grid_side_follows_min_distance() {
        assert_eq!(PoissonSampler::new(16).grid_side(), 6);
        assert_eq!(PoissonSampler::new(16).with_min_distance(0.01).grid_side(), 142);
    }

    #[test]
    fn test_rectangle_points_are_separated_and_inside() {
        let mut rng = seeded_rng(11);
        let sampler = PoissonSampler::new(30)
            .with_offspring(50)
            .with_domain(SampleDomain::Rectangle)
            .with_min_distance(0.1);
        let points = sampler.generate(&mut rng);

        assert!(!points.is_empty());
        assert!(points.len() <= 30);
        assert!(points.iter().all(|p| SampleDomain::Rectangle.contains(*p)));
        assert_separated(&points, 0.1);
    }

    #[test]
    fn test_disc_points_are_separated_and_inside() {
        let mut rng = seeded_rng(5);
        let sampler = PoissonSampler::new(20).with_offspring(70);
        let points = sampler.generate(&mut rng);

        assert!(points.iter().all(|p| SampleDomain::Disc.contains(*p)));
        assert_separated(&points, sampler.min_distance());
    }

    #[test]
    fn test_saturated_domain_returns_fewer_points() {
        let mut rng = seeded_rng(3);
        let points = PoissonSampler::new(500)
            .with_domain(SampleDomain::Rectangle)
            .with_min_distance(0.3)
            .generate(&mut rng);

        assert!(points.len() < 500);
        assert_separated(&points, 0.3);
    }

    #[test]
    fn test_same_seed_same_points() {
        let sampler = PoissonSampler::new(40).with_domain(SampleDomain::Rectangle);
        let a = sampler.generate(&mut seeded_rng(99));
        let b = sampler.generate(&mut seeded_rng(99));
        assert_eq!(a, b);
    }
}
