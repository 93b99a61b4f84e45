//! Arc-length path resampling.

use crate::core::Point2D;

/// Round a coordinate to one decimal place.
///
/// Planner output is rounded for stability and reproducibility.
#[inline]
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

/// Resample a polyline to (approximately) uniform arc-length spacing.
///
/// Walks the polyline emitting a point every time `step` meters of
/// accumulated distance have passed; the input polyline's final endpoint
/// is always included exactly. Emitted coordinates are rounded to one decimal place.
/// Inputs with fewer than two points are returned unchanged.
pub fn resample(points: &[Point2D], step: f32) -> Vec<Point2D> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut sampled = vec![points[0]];
    let mut acc = 0.0f32;

    for target in &points[1..] {
        // Walk from the last emitted sample toward the next input point.
        let last = *sampled.last().unwrap();
        let (mut x0, mut y0) = (last.x, last.y);
        let mut dx = target.x - x0;
        let mut dy = target.y - y0;
        let mut dist = (dx * dx + dy * dy).sqrt();

        while acc + dist >= step {
            let ratio = (step - acc) / dist;
            let nx = x0 + ratio * dx;
            let ny = y0 + ratio * dy;
            sampled.push(Point2D::new(round1(nx), round1(ny)));
            x0 = nx;
            y0 = ny;
            dx = target.x - x0;
            dy = target.y - y0;
            dist = (dx * dx + dy * dy).sqrt();
            acc = 0.0;
        }
        acc += dist;
    }

    let goal = Point2D::new(round1(points[points.len() - 1].x), round1(points[points.len() - 1].y));
    if *sampled.last().unwrap() != goal {
        sampled.push(goal);
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(1.24), 1.2);
        assert_eq!(round1(-0.05), -0.1);
    }

    #[test]
    fn test_short_input_unchanged() {
        let single = vec![Point2D::new(1.0, 1.0)];
        assert_eq!(resample(&single, 0.5), single);
        assert!(resample(&[], 0.5).is_empty());
    }

    #[test]
    fn test_uniform_spacing_on_straight_line() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0)];
        let sampled = resample(&points, 0.5);

        assert_eq!(sampled.first().unwrap(), &Point2D::new(0.0, 0.0));
        assert_eq!(sampled.last().unwrap(), &Point2D::new(2.0, 0.0));
        for pair in sampled.windows(2) {
            let d = pair[0].distance(&pair[1]);
            assert!(d <= 0.5 + 1e-4, "spacing {} exceeds step", d);
        }
    }

    #[test]
    fn test_endpoint_always_included() {
        // 1.3 m segment: samples at 0.5 and 1.0, endpoint appended exactly.
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1.3, 0.0)];
        let sampled = resample(&points, 0.5);
        assert_eq!(
            sampled,
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(0.5, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(1.3, 0.0),
            ]
        );
    }

    #[test]
    fn test_length_close_to_polyline() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
        ];
        let sampled = resample(&points, 0.5);
        let length: f32 = sampled.windows(2).map(|w| w[0].distance(&w[1])).sum();
        assert!((length - 7.0).abs() < 0.5);
    }
}
