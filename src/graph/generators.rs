use super::*;
use rand::Rng;
use rand_distr::Uniform;

/// A point in the plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Rounds `value` to `decimals` places after the decimal point
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Builds the matrix of pairwise Euclidean distances; if `decimals` is given, every distance
/// is rounded to that many places.
pub fn euclidean_matrix(points: &[Point], decimals: Option<i32>) -> WeightMatrix {
    WeightMatrix::from_fn(points.len() as NumNodes, |u, v| {
        let distance = points[u as usize].distance_to(&points[v as usize]);
        match decimals {
            Some(d) => round_to_decimals(distance, d),
            None => distance,
        }
    })
}

pub trait EuclideanGenerator: Sized {
    /// Places `n` points independently and uniformly at random in the square `[0, side)^2`
    /// and returns the matrix of their exact Euclidean distances. Such matrices satisfy the
    /// triangle inequality.
    fn random_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: f64) -> Self;
}

pub fn random_points<R: Rng>(rng: &mut R, n: NumNodes, side: f64) -> Vec<Point> {
    let coord = Uniform::new(0.0, side);
    (0..n)
        .map(|_| Point::new(rng.sample(coord), rng.sample(coord)))
        .collect()
}

impl EuclideanGenerator for WeightMatrix {
    fn random_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: f64) -> Self {
        euclidean_matrix(&random_points(rng, n, side), None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn rounding() {
        assert_eq!(round_to_decimals(1.04, 1), 1.0);
        assert_eq!(round_to_decimals(1.06, 1), 1.1);
        assert_eq!(round_to_decimals(123.456, 2), 123.46);
    }

    #[test]
    fn pythagorean_triangle() {
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)];
        let matrix = euclidean_matrix(&points, Some(1));

        assert_eq!(matrix.weight(0, 1), 3.0);
        assert_eq!(matrix.weight(1, 2), 4.0);
        assert_eq!(matrix.weight(2, 0), 5.0);
        assert_eq!(matrix.weight(1, 1), 0.0);
    }

    #[test]
    fn random_instances_are_metric() {
        let mut rng = Pcg64::seed_from_u64(42);
        for n in [0, 1, 5, 20] {
            let matrix = WeightMatrix::random_euclidean(&mut rng, n, 100.0);
            assert_eq!(matrix.number_of_nodes(), n);

            for u in matrix.vertices() {
                for v in matrix.vertices() {
                    assert_eq!(matrix.weight(u, v), matrix.weight(v, u));
                    for x in matrix.vertices() {
                        assert!(
                            matrix.weight(u, v)
                                <= matrix.weight(u, x) + matrix.weight(x, v) + EPSILON
                        );
                    }
                }
            }
        }
    }
}
