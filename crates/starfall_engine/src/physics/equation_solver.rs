//! Analytic line-circle intersection solver
//!
//! A projectile's travel this tick is turned into a line in general form
//! `a·x + b·y + c = 0`, each candidate hit-volume into a circle in general form
//! `(x − cx)² + (y − cy)² − r² = 0`. Substituting the line's explicit form into
//! the circle yields a single-variable quadratic whose discriminant decides
//! between zero, one or two intersection points.
//!
//! Coefficients are kept in `f64` and only the emitted points drop back to
//! world precision. Lines steeper than 45° are solved as `x = f(y)` so the
//! substituted slope never exceeds one in magnitude; a near-vertical shot
//! would otherwise cancel the discriminant into noise.
//!
//! # Query cycle
//!
//! An [`EquationSolver`] is a reusable scratch buffer, not a shared global.
//! One query is: set the line, then for each candidate set the circle and
//! solve, then filter and read the results, then [`EquationSolver::flush`].
//! A solver must not be interleaved between two queries; give each worker
//! its own instance.

use crate::foundation::math::{sign, Point2, Vec2};

/// Algebraic shape of a line, chosen when the line is derived from two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    /// Any line with a finite, non-zero slope
    #[default]
    Regular,
    /// Zero slope. Solved exactly like [`LineKind::Regular`], tagged for diagnostics only
    Horizontal,
    /// No slope; solved as `x = f(y)`
    Vertical,
}

/// Line in general form `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    /// Coefficient of x
    pub a: f64,
    /// Coefficient of y (zero only for vertical lines)
    pub b: f64,
    /// Constant term
    pub c: f64,
    /// Algebraic shape the line was derived with
    pub kind: LineKind,
}

impl LineEquation {
    /// Derive the line through two points.
    ///
    /// Returns `None` when the points coincide: a zero-length segment has no
    /// direction and is treated as "no intersection" by callers.
    pub fn from_points(p1: &Point2, p2: &Point2) -> Option<Self> {
        let (x1, y1) = (f64::from(p1.x), f64::from(p1.y));
        let x_difference = f64::from(p2.x) - x1;
        let y_difference = f64::from(p2.y) - y1;

        if x_difference == 0.0 {
            if y_difference == 0.0 {
                return None;
            }

            // x = x1, rewritten as -x + x1 = 0
            return Some(Self {
                a: -1.0,
                b: 0.0,
                c: x1,
                kind: LineKind::Vertical,
            });
        }

        let slope = y_difference / x_difference;
        let kind = if slope == 0.0 {
            LineKind::Horizontal
        } else {
            LineKind::Regular
        };

        // (y - y1) = m(x - x1)  ->  -m·x + y + (-y1 + m·x1) = 0
        Some(Self {
            a: -slope,
            b: 1.0,
            c: -y1 - slope * -x1,
            kind,
        })
    }

    /// Value of `a·x + b·y + c` at a point; zero on the line
    pub fn evaluate(&self, point: &Point2) -> f64 {
        self.a * f64::from(point.x) + self.b * f64::from(point.y) + self.c
    }

    /// Signed distance from the line to a point
    pub fn distance_to(&self, point: &Point2) -> f64 {
        self.evaluate(point) / self.a.hypot(self.b)
    }

    /// Steeper than 45°, vertical lines included
    pub fn is_steep(&self) -> bool {
        self.a.abs() > self.b.abs()
    }

    /// Explicit form `(slope, constant)`.
    ///
    /// For [steep](Self::is_steep) lines this is `x = slope·y + constant`,
    /// otherwise `y = slope·x + constant`. Either way `|slope| <= 1`.
    pub fn explicit_form(&self) -> (f64, f64) {
        if self.is_steep() {
            (-self.b / self.a, -self.c / self.a)
        } else {
            (-self.a / self.b, -self.c / self.b)
        }
    }
}

/// Circle in general form, with the center stored negated
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleEquation {
    negated_x: f64,
    negated_y: f64,
    squared_radius: f64,
}

impl CircleEquation {
    /// Create the equation of a circle from its center and radius
    pub fn new(center_x: f32, center_y: f32, radius: f32) -> Self {
        let radius = f64::from(radius);
        Self {
            negated_x: -f64::from(center_x),
            negated_y: -f64::from(center_y),
            squared_radius: radius * radius,
        }
    }

    /// Circle center
    pub fn center(&self) -> Point2 {
        Point2::new(-self.negated_x as f32, -self.negated_y as f32)
    }

    /// Squared radius
    pub fn squared_radius(&self) -> f64 {
        self.squared_radius
    }

    /// Value of `(x − cx)² + (y − cy)² − r²`; zero on the circle
    pub fn evaluate(&self, point: &Point2) -> f64 {
        let dx = f64::from(point.x) + self.negated_x;
        let dy = f64::from(point.y) + self.negated_y;
        dx * dx + dy * dy - self.squared_radius
    }
}

/// `A·t² + B·t + C = 0` obtained by substituting a line into a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    /// Coefficient of t²
    pub a: f64,
    /// Coefficient of t
    pub b: f64,
    /// Constant term
    pub c: f64,
}

impl Quadratic {
    /// Substitute the line's explicit form into the circle's general equation.
    ///
    /// The variable `t` is y for [steep](LineEquation::is_steep) lines and x
    /// for the rest.
    pub fn from_line_and_circle(line: &LineEquation, circle: &CircleEquation) -> Self {
        let (slope, constant) = line.explicit_form();

        // (t + solid)² + (slope·t + altered)² − r² = 0
        let (solid, altered) = if line.is_steep() {
            (circle.negated_y, circle.negated_x + constant)
        } else {
            (circle.negated_x, circle.negated_y + constant)
        };

        Self {
            a: 1.0 + slope * slope,
            b: 2.0 * solid + 2.0 * slope * altered,
            c: -circle.squared_radius + altered * altered + solid * solid,
        }
    }

    /// `B² − 4AC`
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }
}

/// Outcome of one line-circle test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCircleIntersection {
    /// Negative discriminant
    None,
    /// Zero discriminant, the line is tangent
    One(Point2),
    /// Positive discriminant. Points are not deduplicated
    Two(Point2, Point2),
}

impl LineCircleIntersection {
    /// Number of points in this result
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
        }
    }
}

/// Solve a line against a circle without touching any scratch state
pub fn intersect_line_circle(line: &LineEquation, circle: &CircleEquation) -> LineCircleIntersection {
    let quadratic = Quadratic::from_line_and_circle(line, circle);
    let discriminant = quadratic.discriminant();

    log::trace!(
        "line {:?} (steep: {}) vs circle at {:?}: {}t^2 + {}t + {} = 0, D = {}",
        line.kind,
        line.is_steep(),
        circle.center(),
        quadratic.a,
        quadratic.b,
        quadratic.c,
        discriminant
    );

    if discriminant < 0.0 {
        return LineCircleIntersection::None;
    }

    let (slope, constant) = line.explicit_form();
    let steep = line.is_steep();
    let to_point = |t: f64| {
        let other = slope * t + constant;
        if steep {
            Point2::new(other as f32, t as f32)
        } else {
            Point2::new(t as f32, other as f32)
        }
    };

    let divisor = 2.0 * quadratic.a;
    let root_discriminant = discriminant.sqrt();
    let first = to_point((-quadratic.b + root_discriminant) / divisor);

    if discriminant == 0.0 {
        return LineCircleIntersection::One(first);
    }

    let second = to_point((-quadratic.b - root_discriminant) / divisor);
    LineCircleIntersection::Two(first, second)
}

/// One accumulated intersection, tagged with the candidate that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    /// Caller-chosen index of the circle this point belongs to
    pub owner_index: usize,
    /// World coordinates
    pub coordinates: Point2,
}

/// Reusable scratch state for line-circle queries
#[derive(Debug, Default)]
pub struct EquationSolver {
    line: Option<LineEquation>,
    circle: CircleEquation,
    emitted: usize,
    intersection_points: Vec<IntersectionPoint>,
}

impl EquationSolver {
    /// Create an empty solver
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset line, circle and accumulated points. Keeps the point buffer's capacity
    pub fn flush(&mut self) {
        self.line = None;
        self.circle = CircleEquation::default();
        self.emitted = 0;
        self.intersection_points.clear();
    }

    /// Set the line through two points.
    ///
    /// Coincident points leave no line set, so every following solve emits
    /// nothing. Returns whether a line was set.
    pub fn set_line_from_points(&mut self, p1: &Point2, p2: &Point2) -> bool {
        self.line = LineEquation::from_points(p1, p2);
        if self.line.is_none() {
            log::trace!("degenerate segment at {:?}, no line set", p1);
        }
        self.line.is_some()
    }

    /// Set the circle for the next solve
    pub fn set_circle(&mut self, center_x: f32, center_y: f32, radius: f32) {
        self.circle = CircleEquation::new(center_x, center_y, radius);
    }

    /// Current line, if one is set
    pub fn line(&self) -> Option<&LineEquation> {
        self.line.as_ref()
    }

    /// Current circle
    pub fn circle(&self) -> &CircleEquation {
        &self.circle
    }

    /// Intersect the current line and circle, appending results tagged with
    /// `owner_index`. Returns how many points were appended.
    pub fn solve_line_circle_intersection(&mut self, owner_index: usize) -> usize {
        let Some(line) = self.line else {
            return 0;
        };

        let result = intersect_line_circle(&line, &self.circle);
        match result {
            LineCircleIntersection::None => {}
            LineCircleIntersection::One(point) => self.push(owner_index, point),
            LineCircleIntersection::Two(first, second) => {
                self.push(owner_index, first);
                self.push(owner_index, second);
            }
        }

        let count = result.count();
        self.emitted += count;
        count
    }

    fn push(&mut self, owner_index: usize, coordinates: Point2) {
        self.intersection_points.push(IntersectionPoint {
            owner_index,
            coordinates,
        });
    }

    /// Points accumulated since the last flush, after any filtering
    pub fn intersection_points(&self) -> &[IntersectionPoint] {
        &self.intersection_points
    }

    /// Total points produced by solves since the last flush, before filtering
    pub fn emitted_count(&self) -> usize {
        self.emitted
    }

    /// Point nearest to `origin`. Ties go to the point accumulated first
    pub fn closest_intersection_point(&self, origin: &Point2) -> Option<IntersectionPoint> {
        let mut min_distance = f32::INFINITY;
        let mut candidate = None;

        for point in &self.intersection_points {
            let distance = nalgebra::distance(&point.coordinates, origin);
            if distance < min_distance {
                min_distance = distance;
                candidate = Some(*point);
            }
        }

        candidate
    }

    /// Keep only points lying ahead of `position` along `direction`, per axis.
    ///
    /// An axis is ignored when the direction has no component on it or the
    /// point sits exactly level with `position` on it. Order is preserved.
    pub fn filter_points_with_correct_direction(&mut self, position: &Point2, direction: &Vec2) {
        let direction_sign_x = sign(direction.x);
        let direction_sign_y = sign(direction.y);

        self.intersection_points.retain(|point| {
            let sign_x = sign(point.coordinates.x - position.x);
            let sign_y = sign(point.coordinates.y - position.y);

            if sign_x != 0.0 && direction_sign_x != 0.0 && sign_x != direction_sign_x {
                return false;
            }
            if sign_y != 0.0 && direction_sign_y != 0.0 && sign_y != direction_sign_y {
                return false;
            }
            true
        });
    }

    /// Keep only points within `reach` of `origin`. Order is preserved
    pub fn retain_within_reach(&mut self, origin: &Point2, reach: f32) {
        self.intersection_points
            .retain(|point| nalgebra::distance(&point.coordinates, origin) <= reach);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-3;

    fn assert_on_both(line: &LineEquation, circle: &CircleEquation, point: &Point2) {
        assert_relative_eq!(line.distance_to(point), 0.0, epsilon = f64::from(EPSILON));
        assert_relative_eq!(circle.evaluate(point), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_regular_line_from_points() {
        let line = LineEquation::from_points(&Point2::new(0.0, 1.0), &Point2::new(2.0, 5.0)).unwrap();

        assert_eq!(line.kind, LineKind::Regular);
        assert_relative_eq!(line.a, -2.0);
        assert_relative_eq!(line.b, 1.0);
        assert_relative_eq!(line.c, -1.0);
    }

    #[test]
    fn test_horizontal_line_is_tagged() {
        let line = LineEquation::from_points(&Point2::new(-3.0, 4.0), &Point2::new(7.0, 4.0)).unwrap();

        assert_eq!(line.kind, LineKind::Horizontal);
        assert_relative_eq!(line.evaluate(&Point2::new(100.0, 4.0)), 0.0);
    }

    #[test]
    fn test_vertical_line_coefficients() {
        let line = LineEquation::from_points(&Point2::new(2.5, -1.0), &Point2::new(2.5, 9.0)).unwrap();

        assert_eq!(line.kind, LineKind::Vertical);
        assert_eq!((line.a, line.b, line.c), (-1.0, 0.0, 2.5));
    }

    #[test]
    fn test_coincident_points_have_no_line() {
        let p = Point2::new(1.0, 1.0);
        assert!(LineEquation::from_points(&p, &p).is_none());

        let mut solver = EquationSolver::new();
        solver.set_circle(1.0, 1.0, 5.0);
        assert!(!solver.set_line_from_points(&p, &p));
        assert_eq!(solver.solve_line_circle_intersection(0), 0);
        assert!(solver.intersection_points().is_empty());
    }

    #[test]
    fn test_circle_is_stored_negated() {
        let circle = CircleEquation::new(3.0, -4.0, 2.0);

        assert_eq!(circle.center(), Point2::new(3.0, -4.0));
        assert_eq!(circle.squared_radius(), 4.0);
        assert_relative_eq!(circle.evaluate(&Point2::new(5.0, -4.0)), 0.0);
    }

    #[test]
    fn test_point_count_follows_discriminant_sign() {
        let circle = CircleEquation::new(0.0, 0.0, 3.0);
        let cases = [
            (Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0)),
            (Point2::new(-10.0, 3.0), Point2::new(10.0, 3.0)),
            (Point2::new(-10.0, 5.0), Point2::new(10.0, 5.0)),
            (Point2::new(3.0, -10.0), Point2::new(3.0, 10.0)),
            (Point2::new(-7.0, -10.0), Point2::new(-7.0, 10.0)),
            (Point2::new(-4.0, -4.0), Point2::new(4.0, 4.0)),
        ];

        for (p1, p2) in cases {
            let line = LineEquation::from_points(&p1, &p2).unwrap();
            let discriminant = Quadratic::from_line_and_circle(&line, &circle).discriminant();
            let expected = if discriminant > 0.0 {
                2
            } else if discriminant == 0.0 {
                1
            } else {
                0
            };

            assert_eq!(intersect_line_circle(&line, &circle).count(), expected, "{p1:?} -> {p2:?}");
        }
    }

    #[test]
    fn test_tangent_lines_yield_one_point() {
        let circle = CircleEquation::new(0.0, 0.0, 3.0);

        let horizontal = LineEquation::from_points(&Point2::new(-5.0, 3.0), &Point2::new(5.0, 3.0)).unwrap();
        assert_eq!(
            intersect_line_circle(&horizontal, &circle),
            LineCircleIntersection::One(Point2::new(0.0, 3.0))
        );

        let vertical = LineEquation::from_points(&Point2::new(3.0, -5.0), &Point2::new(3.0, 5.0)).unwrap();
        assert_eq!(
            intersect_line_circle(&vertical, &circle),
            LineCircleIntersection::One(Point2::new(3.0, 0.0))
        );
    }

    #[test]
    fn test_intersections_satisfy_both_equations() {
        let circles = [
            CircleEquation::new(0.0, 0.0, 3.0),
            CircleEquation::new(12.5, -4.0, 6.0),
            CircleEquation::new(-20.0, 35.0, 9.0),
        ];
        let segments = [
            (Point2::new(-30.0, -2.0), Point2::new(40.0, 1.0)),
            (Point2::new(5.0, -20.0), Point2::new(15.0, 10.0)),
            (Point2::new(-40.0, 20.0), Point2::new(0.0, 45.0)),
            (Point2::new(-20.0, -100.0), Point2::new(-20.0, 100.0)),
            (Point2::new(12.5, 0.0), Point2::new(12.5, 1.0)),
            (Point2::new(37.0, -50.0), Point2::new(37.002, 0.0)),
            (Point2::new(10.0, -50.0), Point2::new(10.00001, 0.0)),
            (Point2::new(12.5, -50.0), Point2::new(12.5004, 0.0)),
        ];

        for circle in &circles {
            for (p1, p2) in &segments {
                let line = LineEquation::from_points(p1, p2).unwrap();
                match intersect_line_circle(&line, circle) {
                    LineCircleIntersection::None => {}
                    LineCircleIntersection::One(point) => assert_on_both(&line, circle, &point),
                    LineCircleIntersection::Two(first, second) => {
                        assert_on_both(&line, circle, &first);
                        assert_on_both(&line, circle, &second);
                    }
                }
            }
        }
    }

    #[test]
    fn test_near_vertical_paths_keep_both_points() {
        // Slopes from about 2.5e4 up to several million
        let paths = [(37.0_f32, 2e-3_f32), (10.0, 1e-5), (80.0, 1e-5), (-3.0, 4e-4)];

        for (x, dx) in paths {
            let line = LineEquation::from_points(&Point2::new(x, -50.0), &Point2::new(x + dx, 0.0)).unwrap();
            let circle = CircleEquation::new(x, -10.0, 3.0);
            assert_eq!(line.kind, LineKind::Regular);
            assert!(line.is_steep());

            let LineCircleIntersection::Two(first, second) = intersect_line_circle(&line, &circle) else {
                panic!("path through x = {x} should cross the circle twice");
            };
            assert_on_both(&line, &circle, &first);
            assert_on_both(&line, &circle, &second);

            let (low, high) = if first.y < second.y { (first, second) } else { (second, first) };
            assert_relative_eq!(low.y, -13.0, epsilon = 1e-3);
            assert_relative_eq!(high.y, -7.0, epsilon = 1e-3);
            assert_relative_eq!(low.x, x, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_steepness_picks_the_solved_variable() {
        let shallow = LineEquation::from_points(&Point2::new(0.0, 0.0), &Point2::new(2.0, 1.0)).unwrap();
        let diagonal = LineEquation::from_points(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0)).unwrap();
        let steep = LineEquation::from_points(&Point2::new(0.0, 1.0), &Point2::new(1.0, 5.0)).unwrap();
        let vertical = LineEquation::from_points(&Point2::new(2.0, 0.0), &Point2::new(2.0, 1.0)).unwrap();

        assert!(!shallow.is_steep());
        assert!(!diagonal.is_steep());
        assert!(steep.is_steep());
        assert!(vertical.is_steep());

        // y = 4x + 1 read back as x = y/4 - 1/4
        let (slope, constant) = steep.explicit_form();
        assert_relative_eq!(slope, 0.25);
        assert_relative_eq!(constant, -0.25);
        assert_eq!(vertical.explicit_form(), (0.0, 2.0));
    }

    #[test]
    fn test_vertical_branch_matches_rotated_regular_case() {
        let circle = CircleEquation::new(0.0, 0.0, 2.0);

        // x = 1 through the vertical branch
        let vertical = LineEquation::from_points(&Point2::new(1.0, -10.0), &Point2::new(1.0, 10.0)).unwrap();
        // The same configuration turned a quarter turn clockwise: y = -1
        let rotated = LineEquation::from_points(&Point2::new(-10.0, -1.0), &Point2::new(10.0, -1.0)).unwrap();

        let LineCircleIntersection::Two(v1, v2) = intersect_line_circle(&vertical, &circle) else {
            panic!("vertical line should cross the circle twice");
        };
        let LineCircleIntersection::Two(r1, r2) = intersect_line_circle(&rotated, &circle) else {
            panic!("rotated line should cross the circle twice");
        };

        assert_on_both(&vertical, &circle, &v1);
        assert_on_both(&vertical, &circle, &v2);

        // Turn the rotated results back a quarter turn counter-clockwise
        let unrotate = |p: Point2| Point2::new(-p.y, p.x);
        let mut from_vertical = [v1, v2];
        let mut from_rotated = [unrotate(r1), unrotate(r2)];
        from_vertical.sort_by(|a, b| a.y.total_cmp(&b.y));
        from_rotated.sort_by(|a, b| a.y.total_cmp(&b.y));

        for (v, r) in from_vertical.iter().zip(&from_rotated) {
            assert_relative_eq!(v.x, r.x, epsilon = EPSILON);
            assert_relative_eq!(v.y, r.y, epsilon = EPSILON);
        }
        assert_relative_eq!(from_vertical[1].y, 3.0_f32.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_batch_tags_points_by_owner() {
        let mut solver = EquationSolver::new();
        solver.set_line_from_points(&Point2::new(-50.0, 0.0), &Point2::new(50.0, 0.0));

        solver.set_circle(-10.0, 0.0, 2.0);
        assert_eq!(solver.solve_line_circle_intersection(4), 2);
        solver.set_circle(0.0, 10.0, 2.0);
        assert_eq!(solver.solve_line_circle_intersection(5), 0);
        solver.set_circle(10.0, 0.0, 2.0);
        assert_eq!(solver.solve_line_circle_intersection(6), 2);

        let owners: Vec<usize> = solver.intersection_points().iter().map(|p| p.owner_index).collect();
        assert_eq!(owners, vec![4, 4, 6, 6]);
        assert_eq!(solver.emitted_count(), 4);
    }

    #[test]
    fn test_flush_resets_everything() {
        let mut solver = EquationSolver::new();
        solver.set_line_from_points(&Point2::new(0.0, -5.0), &Point2::new(0.0, 5.0));
        solver.set_circle(0.0, 0.0, 1.0);
        solver.solve_line_circle_intersection(0);

        solver.flush();

        assert!(solver.line().is_none());
        assert_eq!(*solver.circle(), CircleEquation::default());
        assert!(solver.intersection_points().is_empty());
        assert_eq!(solver.emitted_count(), 0);
        assert_eq!(solver.solve_line_circle_intersection(0), 0);
    }

    #[test]
    fn test_closest_point_and_first_seen_ties() {
        let mut solver = EquationSolver::new();
        assert!(solver.closest_intersection_point(&Point2::origin()).is_none());

        solver.set_line_from_points(&Point2::new(-10.0, 0.0), &Point2::new(10.0, 0.0));
        solver.set_circle(0.0, 0.0, 4.0);
        solver.solve_line_circle_intersection(0);

        let points = solver.intersection_points().to_vec();
        let closest = solver.closest_intersection_point(&Point2::origin()).unwrap();
        assert_eq!(closest, points[0]);

        let origin = Point2::new(-9.0, 1.0);
        let closest = solver.closest_intersection_point(&origin).unwrap();
        for point in &points {
            assert!(
                nalgebra::distance(&closest.coordinates, &origin)
                    <= nalgebra::distance(&point.coordinates, &origin)
            );
        }
        assert_relative_eq!(closest.coordinates.x, -4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_direction_filter_drops_points_behind() {
        let mut solver = EquationSolver::new();
        let start = Point2::new(0.0, 0.0);
        solver.set_line_from_points(&start, &Point2::new(0.0, 10.0));
        solver.set_circle(0.0, 0.0, 3.0);
        solver.solve_line_circle_intersection(0);
        assert_eq!(solver.intersection_points().len(), 2);

        solver.filter_points_with_correct_direction(&start, &Vec2::new(0.0, 10.0));

        assert_eq!(solver.intersection_points().len(), 1);
        assert_relative_eq!(solver.intersection_points()[0].coordinates.y, 3.0, epsilon = EPSILON);
    }

    #[test]
    fn test_direction_filter_ignores_zero_axes() {
        let mut solver = EquationSolver::new();
        solver.set_line_from_points(&Point2::new(-10.0, 2.0), &Point2::new(10.0, 2.0));
        solver.set_circle(0.0, 2.0, 1.0);
        solver.solve_line_circle_intersection(0);

        // Points sit level with the origin on y and the direction has no x component
        solver.filter_points_with_correct_direction(&Point2::new(0.0, 2.0), &Vec2::new(0.0, 1.0));
        assert_eq!(solver.intersection_points().len(), 2);

        // Diagonal travel drops the point that is behind on x
        solver.filter_points_with_correct_direction(&Point2::new(0.0, 0.0), &Vec2::new(1.0, 1.0));
        assert_eq!(solver.intersection_points().len(), 1);
        assert_relative_eq!(solver.intersection_points()[0].coordinates.x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_direction_filter_is_idempotent() {
        let mut solver = EquationSolver::new();
        let start = Point2::new(-6.0, -6.0);
        solver.set_line_from_points(&start, &Point2::new(6.0, 5.0));
        for (index, x) in [-4.0_f32, 0.0, 4.0].iter().enumerate() {
            solver.set_circle(*x, 0.0, 2.5);
            solver.solve_line_circle_intersection(index);
        }

        let direction = Vec2::new(-1.0, -0.5);
        solver.filter_points_with_correct_direction(&Point2::new(0.0, 0.0), &direction);
        let once = solver.intersection_points().to_vec();
        solver.filter_points_with_correct_direction(&Point2::new(0.0, 0.0), &direction);

        assert_eq!(solver.intersection_points(), once.as_slice());
    }

    #[test]
    fn test_reach_limits_points_to_segment() {
        let mut solver = EquationSolver::new();
        let start = Point2::new(-10.0, 0.0);
        solver.set_line_from_points(&start, &Point2::new(10.0, 0.0));
        solver.set_circle(20.0, 0.0, 3.0);
        solver.solve_line_circle_intersection(0);
        assert_eq!(solver.intersection_points().len(), 2);

        solver.retain_within_reach(&start, 20.0);
        assert!(solver.intersection_points().is_empty());
    }
}
