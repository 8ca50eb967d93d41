//! Shader adapters: normalize pixel coordinates, invoke a native or
//! SDFVM-driven fragment shader, and blend the result onto the pixel with
//! the feather/alpha rule from `sdf::feather_blend`.
//!
//! Shapes addressed by `(x,y,w,h,...)` (heart, box, rounded_box) normalize
//! against their own destination region's extent, so they fill whatever
//! tile they are drawn into. Shapes addressed by `(cx,cy,r,...)` normalize
//! against the full canvas resolution, anchored at an absolute canvas
//! point. See DESIGN.md for why the two conventions coexist.

use crate::error::VmError;
use crate::raster::{Shader, ShaderContext};
use crate::sdf;
use crate::vecmath::{Vec2, Vec3};
use crate::vm::{Value, Vm, REGISTER_COUNT};

const DEFAULT_FEATHER: f32 = 0.03;

/// Native shader: distance comes from a plain closure over the primitive
/// library; foreground is blended onto the prior pixel content via the
/// feather band. The closure receives the `ShaderContext` alongside the
/// normalized point, since canvas-relative shapes must normalize their own
/// center/radius against the same resolution before taking a difference.
pub struct NativeShader<F: Fn(&ShaderContext, Vec2) -> f32 + Sync> {
    distance: F,
    fg: Vec3,
    feather: f32,
    /// When true, distance is computed from the pixel's absolute canvas
    /// position (normalized against the full canvas resolution) instead of
    /// its region-relative position (normalized against the region).
    canvas_relative: bool,
}

impl<F: Fn(&ShaderContext, Vec2) -> f32 + Sync> Shader for NativeShader<F> {
    type Worker = ();

    fn make_worker(&self, _worker_index: usize) {}

    fn shade(&self, _worker: &mut (), ctx: &ShaderContext, coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
        let p = if self.canvas_relative {
            let absolute = coord.add(Vec2::new(ctx.region.x as f32, ctx.region.y as f32));
            sdf::normalize(absolute, ctx.resolution.as_vec2())
        } else {
            sdf::normalize(coord, ctx.region.extent())
        };
        let d = (self.distance)(ctx, p);
        *pixel = sdf::feather_blend(*pixel, self.fg, d, self.feather);
        Ok(())
    }
}

/// `normalize(center) - normalize(0)`-equivalent scale: `normalize` is
/// affine, so `normalize(a) - normalize(b) == scale * (a - b)` for
/// `scale = 2/res.y`. Canvas-relative shapes use this to bring a
/// pixel-space center and radius into the same normalized units as `p`.
fn canvas_center_and_scale(ctx: &ShaderContext, cx: f32, cy: f32) -> (Vec2, f32) {
    let res = ctx.resolution.as_vec2();
    let center = sdf::normalize(Vec2::new(cx, cy), res);
    (center, 2.0 / res.y)
}

/// Heart shader: not origin-symmetric, so it uses `heart_center` rather
/// than the generic `normalize`/`NativeShader` path.
pub struct HeartShader {
    pub fg: Vec3,
    pub feather: f32,
}

impl Shader for HeartShader {
    type Worker = ();

    fn make_worker(&self, _worker_index: usize) {}

    fn shade(&self, _worker: &mut (), ctx: &ShaderContext, coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
        let p = sdf::heart_center(coord, ctx.region.extent());
        let d = sdf::heart(p);
        *pixel = sdf::feather_blend(*pixel, self.fg, d, self.feather);
        Ok(())
    }
}

/// Fills the whole region with a flat color, ignoring any prior content.
/// Mirrors `d_fill` in the original demo.
pub struct FillShader {
    pub color: Vec3,
}

impl Shader for FillShader {
    type Worker = ();

    fn make_worker(&self, _worker_index: usize) {}

    fn shade(&self, _worker: &mut (), _ctx: &ShaderContext, _coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
        *pixel = self.color;
        Ok(())
    }
}

/// VM-driven shader: normalizes the pixel coordinate, optionally flips y for
/// shapes that are not origin-symmetric, sets ambient point/color on a
/// per-worker VM instance, executes the program, and pops a `vec3` result.
pub struct VmShader<'a> {
    pub program: &'a [u8],
    pub registers: [Value; REGISTER_COUNT],
    pub background: Vec3,
    pub flip_y: bool,
}

impl<'a> Shader for VmShader<'a> {
    type Worker = Vm;

    fn make_worker(&self, _worker_index: usize) -> Vm {
        let mut vm = Vm::new();
        vm.set_registers(self.registers);
        vm
    }

    fn shade(&self, vm: &mut Vm, ctx: &ShaderContext, coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
        let mut p = sdf::normalize(coord, ctx.region.extent());
        if self.flip_y {
            p.y = -p.y;
        }
        vm.set_point(p);
        vm.set_color(self.background);
        vm.execute(self.program)?;
        *pixel = vm.pop_vec3_pub()?;
        Ok(())
    }
}

fn region_shader<F: Fn(&ShaderContext, Vec2) -> f32 + Sync>(distance: F, fg: Vec3) -> NativeShader<F> {
    NativeShader { distance, fg, feather: DEFAULT_FEATHER, canvas_relative: false }
}

fn canvas_shader<F: Fn(&ShaderContext, Vec2) -> f32 + Sync>(distance: F, fg: Vec3) -> NativeShader<F> {
    NativeShader { distance, fg, feather: DEFAULT_FEATHER, canvas_relative: true }
}

/// `heart(x,y,w,h,fg)`: region-relative, per `demo.c`.
pub fn heart(fg: Vec3) -> HeartShader {
    HeartShader { fg, feather: DEFAULT_FEATHER }
}

/// `box(x,y,w,h,fg)`: region-relative; half-extents fixed at `(0.9,0.9)`,
/// matching the one worked example (§8 scenario 3 builds on a rounded box
/// with the same half-extents).
pub fn sdf_box(fg: Vec3) -> impl Shader {
    region_shader(|_ctx, p| sdf::sdf_box(p, Vec2::new(0.9, 0.9)), fg)
}

/// `rounded_box(x,y,w,h,r,fg)`: region-relative; half-extents `(0.9,0.9)`.
pub fn rounded_box(r: f32, fg: Vec3) -> impl Shader {
    let radii = sdf::RoundedBoxRadii::uniform(r);
    region_shader(move |_ctx, p| sdf::rounded_box(p, Vec2::new(0.9, 0.9), radii), fg)
}

/// `circle(cx,cy,r,fg)`: canvas-relative.
pub fn circle(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::circle(p.sub(center), r * scale)
        },
        fg,
    )
}

/// `rhombus(cx,cy,r,fg)`: canvas-relative; half-extents scaled by `r`.
pub fn rhombus(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::rhombus(p.sub(center), Vec2::new(r, r * 0.6).scale(scale))
        },
        fg,
    )
}

/// `triangle_equilateral(cx,cy,r,fg)`: canvas-relative, y-flipped (the
/// triangle primitive is not origin-symmetric).
pub fn triangle_equilateral(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            let mut local = p.sub(center).scale(1.0 / (r * scale));
            local.y = -local.y;
            sdf::equilateral_triangle(local) * r * scale
        },
        fg,
    )
}

/// `pentagon(cx,cy,r,fg)`: canvas-relative, unit shape scaled by `r`.
pub fn pentagon(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::pentagon(p.sub(center), r * scale)
        },
        fg,
    )
}

/// `hexagon(cx,cy,r,fg)`: canvas-relative.
pub fn hexagon(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::hexagon(p.sub(center), r * scale)
        },
        fg,
    )
}

/// `octagon(cx,cy,r,fg)`: canvas-relative.
pub fn octagon(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::octagon(p.sub(center), r * scale)
        },
        fg,
    )
}

/// `hexagram(cx,cy,r,fg)`: canvas-relative.
pub fn hexagram(cx: f32, cy: f32, r: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::hexagram(p.sub(center), r * scale)
        },
        fg,
    )
}

/// `star5(cx,cy,r,rf,fg)`: canvas-relative, y-flipped.
pub fn star5(cx: f32, cy: f32, r: f32, rf: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            let mut local = p.sub(center);
            local.y = -local.y;
            sdf::star5(local, r * scale, rf)
        },
        fg,
    )
}

/// `rounded_x(cx,cy,r,thickness,fg)`: canvas-relative, y-flipped.
pub fn rounded_x(cx: f32, cy: f32, r: f32, thickness: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            let mut local = p.sub(center);
            local.y = -local.y;
            sdf::rounded_x(local, r * scale, thickness * scale)
        },
        fg,
    )
}

/// `vesica(cx,cy,r,d,fg)`: canvas-relative.
pub fn vesica(cx: f32, cy: f32, r: f32, d: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            sdf::vesica(p.sub(center), r * scale, d * scale)
        },
        fg,
    )
}

/// `egg(cx,cy,ra,rb,fg)`: canvas-relative, y-flipped (the egg primitive is
/// not origin-symmetric).
pub fn egg(cx: f32, cy: f32, ra: f32, rb: f32, fg: Vec3) -> impl Shader {
    canvas_shader(
        move |ctx, p| {
            let (center, scale) = canvas_center_and_scale(ctx, cx, cy);
            let mut local = p.sub(center);
            local.y = -local.y;
            sdf::egg(local, ra * scale, rb * scale)
        },
        fg,
    )
}
