use glam::Vec3;

/// Enclosing sphere of a point set.
///
/// Built from the axis-aligned bounds: the center is the box midpoint and the
/// radius is the farthest point's distance from it. Deterministic, two linear
/// passes, not minimal.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Empty sphere at the origin.
    pub const EMPTY: Self = Self { center: Vec3::ZERO, radius: 0.0 };

    /// Computes the sphere for `points`.
    ///
    /// Returns [`BoundingSphere::EMPTY`] for an empty input.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;

        for p in points.clone() {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        if !any {
            return Self::EMPTY;
        }

        let center = (min + max) * 0.5;

        let max_dist_sq = points
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max);

        Self { center, radius: max_dist_sq.sqrt() }
    }

    #[inline]
    pub fn contains(&self, p: Vec3, epsilon: f32) -> bool {
        p.distance(self.center) <= self.radius + epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube_corners() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn empty_input_is_origin_with_zero_radius() {
        let s = BoundingSphere::from_points(std::iter::empty::<Vec3>());
        assert_eq!(s, BoundingSphere::EMPTY);
    }

    #[test]
    fn unit_cube_corners() {
        let s = BoundingSphere::from_points(cube_corners());
        assert_eq!(s.center, Vec3::ZERO);
        assert_relative_eq!(s.radius, 3.0f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn single_point_has_zero_radius() {
        let p = Vec3::new(4.0, -2.0, 7.5);
        let s = BoundingSphere::from_points([p]);
        assert_eq!(s.center, p);
        assert_eq!(s.radius, 0.0);
    }

    #[test]
    fn points_entirely_in_negative_octant() {
        let pts = [Vec3::new(-3.0, -5.0, -7.0), Vec3::new(-1.0, -1.0, -1.0)];
        let s = BoundingSphere::from_points(pts);
        assert_eq!(s.center, Vec3::new(-2.0, -3.0, -4.0));
        assert_relative_eq!(s.radius, (1.0f32 + 4.0 + 9.0).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn every_point_is_enclosed() {
        // Deterministic scatter.
        let pts: Vec<Vec3> = (0..500)
            .map(|i| {
                let t = i as f32 * 0.37;
                Vec3::new(t.sin() * 13.0 + 2.0, (t * 1.7).cos() * 4.0 - 9.0, (t * 0.3).sin() * 40.0)
            })
            .collect();

        let s = BoundingSphere::from_points(pts.iter().copied());
        for p in &pts {
            assert!(s.contains(*p, 1e-4), "{p:?} outside {s:?}");
        }
    }
}
