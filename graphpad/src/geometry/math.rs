use crate::model::Point;

/// Squared distance from `p` to the segment `a`-`b`, and the clamped
/// parameter of the closest point along it.
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let vx = b.x - a.x; let vy = b.y - a.y;
    let wx = p.x - a.x; let wy = p.y - a.y;
    let vv = vx*vx + vy*vy;
    let t = if vv > 0.0 { ((wx*vx + wy*vy) / vv).clamp(0.0, 1.0) } else { 0.0 };
    let proj = Point::new(a.x + t * vx, a.y + t * vy);
    (p.dist2(proj), t)
}
