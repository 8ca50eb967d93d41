//! Analytic 2D signed-distance primitives and combinators. Every primitive
//! returns a signed distance: negative inside the shape, positive outside,
//! zero on the boundary. All operate in normalized coordinate space, where
//! the shape's canonical extent is centered at the origin with radius ≈1.

use crate::vecmath::{clamp, lerp, sign, Vec2, Vec3};

/// `(2*pos - res)/res.y`. Maps pixel space into a centered square with unit
/// y-extent.
#[inline]
pub fn normalize(pos: Vec2, res: Vec2) -> Vec2 {
    pos.scale(2.0).sub(res).scale(1.0 / res.y)
}

/// `((2*pos.x - res.x)/res.y, (2*(res.y - pos.y) - res.y)/res.y + 0.5)`.
/// Y-flipped and shifted so the heart primitive, which is not
/// origin-symmetric, fits its destination region.
#[inline]
pub fn heart_center(pos: Vec2, res: Vec2) -> Vec2 {
    let x = (2.0 * pos.x - res.x) / res.y;
    let y = (2.0 * (res.y - pos.y) - res.y) / res.y + 0.5;
    Vec2::new(x, y)
}

#[inline]
pub fn circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

/// Heart shape, expected to be evaluated on a point already produced by
/// [`heart_center`]. Not origin-symmetric: the caller is responsible for
/// the y-flip `heart_center` bakes in.
pub fn heart(p: Vec2) -> f32 {
    let p = Vec2::new(p.x.abs(), p.y);
    if p.y + p.x > 1.0 {
        p.sub(Vec2::new(0.25, 0.75)).length_squared().sqrt() - 2f32.sqrt() / 4.0
    } else {
        let a = p.sub(Vec2::new(0.0, 1.0)).length_squared();
        let b = p.sub_scalar((p.x + p.y).max(0.0) * 0.5).length_squared();
        a.min(b).sqrt() * sign(p.x - p.y)
    }
}

#[inline]
pub fn sdf_box(p: Vec2, b: Vec2) -> f32 {
    let d = p.abs().sub(b);
    d.max_scalar(0.0).length() + d.x.max(d.y).min(0.0)
}

/// Per-corner rounding radii, ordered the way a shadertoy `sdRoundedBox`
/// reader expects: `(top_right, bottom_right, top_left, bottom_left)`.
#[derive(Debug, Clone, Copy)]
pub struct RoundedBoxRadii {
    pub top_right: f32,
    pub bottom_right: f32,
    pub top_left: f32,
    pub bottom_left: f32,
}

impl RoundedBoxRadii {
    pub fn uniform(r: f32) -> Self {
        RoundedBoxRadii { top_right: r, bottom_right: r, top_left: r, bottom_left: r }
    }
}

pub fn rounded_box(p: Vec2, b: Vec2, r: RoundedBoxRadii) -> f32 {
    let (rx, ry) = if p.x > 0.0 {
        (r.top_right, r.bottom_right)
    } else {
        (r.top_left, r.bottom_left)
    };
    let rx = if p.y > 0.0 { rx } else { ry };
    let q = p.abs().sub(b).sub_scalar(-rx); // p.abs()-b+rx
    q.x.max(q.y).min(0.0) + q.max_scalar(0.0).length() - rx
}

pub fn rhombus(p: Vec2, b: Vec2) -> f32 {
    let p = p.abs();
    let h = clamp(b.sub(p.scale(2.0)).ndot(b) / b.dot(b), -1.0, 1.0);
    let d = p.sub(b.scale(0.5).mul(Vec2::new(1.0 - h, 1.0 + h))).length();
    d * sign(p.x * b.y + p.y * b.x - b.x * b.y)
}

/// `k = sqrt(3)`. Unit-radius; callers scale point space for other radii.
pub fn equilateral_triangle(p: Vec2) -> f32 {
    const K: f32 = 1.732_050_8; // sqrt(3)
    let mut p = Vec2::new(p.x.abs() - 1.0, p.y + 1.0 / K);
    if p.x + K * p.y > 0.0 {
        p = Vec2::new(p.x - K * p.y, -K * p.x - p.y).scale(0.5);
    }
    p.x -= clamp(p.x, -2.0, 0.0);
    -p.length() * sign(p.y)
}

/// `k = (0.809016994, 0.587785252, 0.726542528)`.
pub fn pentagon(p: Vec2, r: f32) -> f32 {
    const KX: f32 = 0.809_017;
    const KY: f32 = 0.587_785_26;
    const KZ: f32 = 0.726_542_53;
    let mut p = Vec2::new(p.x.abs(), p.y);
    p = fold(p, Vec2::new(-KX, KY));
    p = fold(p, Vec2::new(KX, KY));
    p = p.sub(Vec2::new(clamp(p.x, -r * KZ, r * KZ), r));
    p.length() * sign(p.y)
}

/// `k = (-0.866025404, 0.5, 0.577350269)`.
pub fn hexagon(p: Vec2, r: f32) -> f32 {
    const KX: f32 = -0.866_025_4;
    const KY: f32 = 0.5;
    const KZ: f32 = 0.577_350_27;
    let mut p = p.abs();
    p = fold(p, Vec2::new(KX, KY));
    p = p.sub(Vec2::new(clamp(p.x, -KZ * r, KZ * r), r));
    p.length() * sign(p.y)
}

/// `k = (-0.9238795325, 0.3826834324, 0.4142135623)`.
pub fn octagon(p: Vec2, r: f32) -> f32 {
    const KX: f32 = -0.923_879_5;
    const KY: f32 = 0.382_683_43;
    const KZ: f32 = 0.414_213_56;
    let mut p = p.abs();
    p = fold(p, Vec2::new(KX, KY));
    p = fold(p, Vec2::new(-KX, KY));
    p = p.sub(Vec2::new(clamp(p.x, -KZ * r, KZ * r), r));
    p.length() * sign(p.y)
}

/// `k = (-0.5, 0.8660254038, 0.5773502692, 1.7320508076)`.
pub fn hexagram(p: Vec2, r: f32) -> f32 {
    const KX: f32 = -0.5;
    const KY: f32 = 0.866_025_4;
    const KZ: f32 = 0.577_350_26;
    const KW: f32 = 1.732_050_8;
    let mut p = p.abs();
    p = fold(p, Vec2::new(KX, KY));
    p = fold(p, Vec2::new(KY, KX));
    p = p.sub(Vec2::new(clamp(p.x, r * KZ, r * KW), r));
    p.length() * sign(p.y)
}

#[inline]
fn fold(p: Vec2, axis: Vec2) -> Vec2 {
    p.sub(axis.scale(2.0 * p.dot(axis).min(0.0)))
}

/// Classic 5-point star. `rf` is the inner-radius factor, `rf ∈ (0,1)`.
pub fn star5(p: Vec2, r: f32, rf: f32) -> f32 {
    const K1X: f32 = 0.809_016_994_375;
    const K1Y: f32 = -0.587_785_252_292;
    let k1 = Vec2::new(K1X, K1Y);
    let k2 = Vec2::new(-K1X, K1Y);
    let mut p = Vec2::new(p.x.abs(), p.y);
    p = p.sub(k1.scale(2.0 * k1.dot(p).max(0.0)));
    p = p.sub(k2.scale(2.0 * k2.dot(p).max(0.0)));
    p = Vec2::new(p.x.abs(), p.y - r);
    let ba = Vec2::new(-k1.y, k1.x).scale(rf).sub(Vec2::new(0.0, 1.0));
    let h = clamp(p.dot(ba) / ba.dot(ba), 0.0, r);
    p.sub(ba.scale(h)).length() * sign(p.y * ba.x - p.x * ba.y)
}

/// Min-distance to both diagonals of width `w`, inset by `r`.
pub fn rounded_x(p: Vec2, w: f32, r: f32) -> f32 {
    let p = p.abs();
    let m = (p.x + p.y).min(w) * 0.5;
    p.sub(Vec2::new(m, m)).length() - r
}

/// Intersection of two offset circles: radius `r`, half-separation `d`.
pub fn vesica(p: Vec2, r: f32, d: f32) -> f32 {
    let p = p.abs();
    let b = (r * r - d * d).sqrt();
    if (p.y - b) * d > p.x * b {
        p.sub(Vec2::new(0.0, b)).length()
    } else {
        p.sub(Vec2::new(-d, 0.0)).length() - r
    }
}

/// Asymmetric capsule: two circular arcs of radius `ra` (upper) and `rb`
/// (lower) joined tangentially.
pub fn egg(p: Vec2, ra: f32, rb: f32) -> f32 {
    const K: f32 = 1.732_050_8; // sqrt(3)
    let p = Vec2::new(p.x.abs(), p.y);
    let r = ra - rb;
    let d = if p.y < 0.0 {
        Vec2::new(p.x, p.y).length() - r
    } else if K * (p.x + r) < p.y {
        Vec2::new(p.x, p.y - K * r).length()
    } else {
        Vec2::new(p.x + r, p.y).length() - 2.0 * r
    };
    d - rb
}

/// Signed distance to an arbitrary convex polygon given in winding order.
/// Grounds the VM's `POLY4` opcode (specialized to 4 vertices there).
pub fn convex_polygon(p: Vec2, verts: &[Vec2]) -> f32 {
    let n = verts.len();
    let first = p.sub(verts[0]);
    let mut d = first.dot(first);
    let mut s = 1.0f32;
    for i in 0..n {
        let j = (i + n - 1) % n;
        let e = verts[j].sub(verts[i]);
        let w = p.sub(verts[i]);
        let t = clamp(w.dot(e) / e.dot(e), 0.0, 1.0);
        let b = w.sub(e.scale(t));
        d = d.min(b.dot(b));
        let c0 = p.y >= verts[i].y;
        let c1 = p.y < verts[j].y;
        let c2 = e.x * w.y > e.y * w.x;
        if (c0 && c1 && c2) || (!c0 && !c1 && !c2) {
            s = -s;
        }
    }
    s * d.sqrt()
}

/// `min(a, b)`.
#[inline]
pub fn union(a: f32, b: f32) -> f32 {
    a.min(b)
}

/// `max(a, b)`.
#[inline]
pub fn intersection(a: f32, b: f32) -> f32 {
    a.max(b)
}

/// `max(-a, b)`.
#[inline]
pub fn subtraction(a: f32, b: f32) -> f32 {
    (-a).max(b)
}

/// Polynomial smooth-min, `k > 0`.
#[inline]
pub fn union_smooth(a: f32, b: f32, k: f32) -> f32 {
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.min(b) - h * h * k * 0.25
}

/// `d - r`: inflates the zero-set outward by `r`.
#[inline]
pub fn roundness(d: f32, r: f32) -> f32 {
    d - r
}

/// `|d| - r`: shell of thickness `r`.
#[inline]
pub fn onion(d: f32, r: f32) -> f32 {
    d.abs() - r
}

/// Feather-based anti-aliasing: maps a signed distance to a coverage
/// fraction via a symmetric `smoothstep` band around the boundary. See
/// DESIGN.md for why this is not the literal formula in the distillation.
#[inline]
pub fn feather_alpha(d: f32, feather: f32) -> f32 {
    crate::vecmath::smoothstep(feather, -feather, d)
}

/// `lerp(bg, fg, feather_alpha(d, feather))`.
#[inline]
pub fn feather_blend(bg: Vec3, fg: Vec3, d: f32, feather: f32) -> Vec3 {
    bg.lerp(fg, feather_alpha(d, feather))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_near(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "{} vs {} (eps {})", a, b, eps);
    }

    #[test]
    fn circle_canonical_values() {
        assert_near(circle(Vec2::new(0.0, 0.0), 1.0), -1.0, 1e-6);
        assert_near(circle(Vec2::new(1.0, 0.0), 1.0), 0.0, 1e-6);
        assert_near(circle(Vec2::new(2.0, 0.0), 1.0), 1.0, 1e-6);
    }

    #[test]
    fn box_canonical_values() {
        let b = Vec2::new(1.0, 1.0);
        assert_near(sdf_box(Vec2::new(0.0, 0.0), b), -1.0, 1e-6);
        assert_near(sdf_box(Vec2::new(1.0, 1.0), b), 0.0, 1e-6);
        assert_near(sdf_box(Vec2::new(2.0, 2.0), b), 2f32.sqrt(), 1e-6);
    }

    #[test]
    fn rounded_box_canonical_values() {
        let b = Vec2::new(1.0, 1.0);
        let r = 0.3;
        let radii = RoundedBoxRadii::uniform(r);
        // Deep interior: rounding only cuts corners, so this matches the
        // plain box exactly.
        assert_near(rounded_box(Vec2::new(0.0, 0.0), b, radii), -1.0, 1e-6);
        // Flat-edge boundary point: unaffected by rounding.
        assert_near(rounded_box(Vec2::new(1.0, 0.0), b, radii), 0.0, 1e-6);
        // The underlying box's sharp corner sits just outside the rounded
        // shape, by less than the rounding radius.
        let corner = rounded_box(Vec2::new(1.0, 1.0), b, radii);
        assert!(corner > 0.0 && corner < r);
    }

    #[test]
    fn combinator_laws() {
        assert_eq!(union(0.3, -0.2), union(-0.2, 0.3));
        assert_eq!(intersection(0.3, -0.2), 0.3f32.max(-0.2));
        assert_eq!(onion(0.4, 0.0), 0.4f32.abs());
        assert_eq!(onion(-0.4, 0.0), (-0.4f32).abs());
        assert_eq!(roundness(0.4, 0.0), 0.4);
    }

    #[test]
    fn sign_contract_circle() {
        let interior = circle(Vec2::new(0.2, 0.0), 1.0);
        let exterior = circle(Vec2::new(3.0, 0.0), 1.0);
        assert!(interior < 0.0);
        assert!(exterior > 0.0);
    }

    #[test]
    fn heart_interior_and_exterior() {
        // heart_center((64,64), (128,128)) -> (0, 0.5): deep interior.
        let interior = heart_center(Vec2::new(64.0, 64.0), Vec2::new(128.0, 128.0));
        assert_near(interior.x, 0.0, 1e-6);
        assert_near(interior.y, 0.5, 1e-6);
        assert!(heart(interior) < 0.0);

        // heart_center((0,0), (128,128)) -> (-1, 1.5): deep exterior.
        let exterior = heart_center(Vec2::new(0.0, 0.0), Vec2::new(128.0, 128.0));
        assert_near(exterior.x, -1.0, 1e-6);
        assert_near(exterior.y, 1.5, 1e-6);
        assert!(heart(exterior) > 0.0);
    }

    #[test]
    fn heart_canonical_boundary_point() {
        // Per the glossary: (0,0) post heart_center is the tip of the "V".
        assert_near(heart(Vec2::new(0.0, 0.0)), 0.0, 1e-3);
    }

    #[test]
    fn pentagon_boundary_point() {
        // Canonical boundary point per the glossary: (sin(2pi/5), cos(2pi/5)).
        let p = Vec2::new((2.0 * PI / 5.0).sin(), (2.0 * PI / 5.0).cos());
        assert_near(pentagon(p, 1.0), 0.0, 5e-3);
    }

    #[test]
    fn equilateral_triangle_boundary_point() {
        let p = Vec2::new(0.0, 1.0 / 3f32.sqrt());
        assert_near(equilateral_triangle(p), 0.0, 1e-3);
    }

    #[test]
    fn lipschitz_bound_on_random_pairs() {
        // Deterministic pseudo-random grid (no external RNG dependency
        // needed for this bound check).
        let mut state: u32 = 0x1234_5678;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 4.0 - 2.0
        };
        for _ in 0..1000 {
            let p = Vec2::new(next(), next());
            let q = Vec2::new(next(), next());
            let fp = circle(p, 1.0);
            let fq = circle(q, 1.0);
            let dist = p.sub(q).length();
            assert!((fp - fq).abs() <= dist + 1e-4);
        }
    }

    #[test]
    fn union_smooth_approaches_union_as_k_shrinks() {
        let a = 0.5;
        let b = -0.3;
        let smooth = union_smooth(a, b, 1e-6);
        assert_near(smooth, union(a, b), 1e-3);
    }

    #[test]
    fn feather_alpha_matches_scenario_two() {
        // Circle(cx=192,cy=64,r=48) boundary pixel should land at alpha ~0.5.
        assert_near(feather_alpha(0.0, 0.03), 0.5, 1e-6);
        assert_near(feather_alpha(-1.0, 0.03), 1.0, 1e-6);
        assert_near(feather_alpha(1.0, 0.03), 0.0, 1e-6);
    }
}
