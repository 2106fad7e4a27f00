use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Yields points in the square [-1, 1] x [-1, 1].
pub trait PointSource {
    fn next_point(&mut self) -> (f64, f64);
}

/// Uniform points drawn from the closed square, backed by any `Rng`.
pub struct UniformSquare<R> {
    rng: R,
    range: Uniform<f64>,
}

impl<R: Rng> UniformSquare<R> {
    pub fn new(rng: R) -> Self {
        UniformSquare {
            rng,
            range: Uniform::new_inclusive(-1.0, 1.0),
        }
    }
}

impl UniformSquare<StdRng> {
    /// Fresh generator per unit, seeded from the OS.
    pub fn from_entropy() -> Self {
        UniformSquare::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PointSource for UniformSquare<R> {
    fn next_point(&mut self) -> (f64, f64) {
        let x = self.range.sample(&mut self.rng);
        let y = self.range.sample(&mut self.rng);
        (x, y)
    }
}

/// Result of one sampling unit. `inside <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleCount {
    pub inside: u64,
    pub total: u64,
}

impl SampleCount {
    pub fn merge(self, other: SampleCount) -> SampleCount {
        SampleCount {
            inside: self.inside + other.inside,
            total: self.total + other.total,
        }
    }
}

// Boundary points count as inside.
pub fn in_unit_circle(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

pub fn sample<S: PointSource>(source: &mut S, points: u64) -> SampleCount {
    let mut inside = 0;

    for _ in 0..points {
        let (x, y) = source.next_point();
        if in_unit_circle(x, y) {
            inside += 1;
        }
    }

    SampleCount {
        inside,
        total: points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64, f64);

    impl PointSource for Fixed {
        fn next_point(&mut self) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    #[test]
    fn boundary_point_is_inside() {
        assert!(in_unit_circle(1.0, 0.0));
        assert!(in_unit_circle(0.0, -1.0));
    }

    #[test]
    fn corner_point_is_outside() {
        assert!(!in_unit_circle(1.0, 1.0));
        assert!(!in_unit_circle(-1.0, -1.0));
    }

    #[test]
    fn zero_points_yields_empty_count() {
        let mut source = UniformSquare::from_entropy();
        assert_eq!(sample(&mut source, 0), SampleCount { inside: 0, total: 0 });
    }

    #[test]
    fn fixed_sources_hit_or_miss_every_time() {
        assert_eq!(sample(&mut Fixed(0.0, 0.0), 25), SampleCount { inside: 25, total: 25 });
        assert_eq!(sample(&mut Fixed(1.0, 1.0), 25), SampleCount { inside: 0, total: 25 });
    }

    #[test]
    fn uniform_points_stay_in_square() {
        let mut source = UniformSquare::from_entropy();
        for _ in 0..10_000 {
            let (x, y) = source.next_point();
            assert!((-1.0..=1.0).contains(&x));
            assert!((-1.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn merge_adds_both_fields() {
        let a = SampleCount { inside: 3, total: 5 };
        let b = SampleCount { inside: 1, total: 4 };
        assert_eq!(a.merge(b), SampleCount { inside: 4, total: 9 });
    }
}
