//! Assembles a small SDFVM program at runtime — a 4-vertex polygon, rounded
//! and blended against a circle, selected into a flat color via
//! `ROUNDNESS`/`LERP`/`GTZ`/`LERP3` — and rasterizes it with the VM-driven
//! shader adapter. Mirrors `vmdemo.c`'s `draw_color`.

use sdfvm::raster::{draw, Region, Resolution};
use sdfvm::shader::VmShader;
use sdfvm::vecmath::{Vec2, Vec3};
use sdfvm::vm::{Program, Value, REGISTER_COUNT};

const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const INK: Vec3 = Vec3::new(0.05, 0.05, 0.1);

fn main() {
    env_logger::init();

    let res = Resolution::new(512, 512);
    let mut buf = vec![WHITE; (res.width * res.height) as usize];

    // `fg` is pushed before `bg`: after the distance computation leaves its
    // scalar `t` on top, LERP3's pop order (t, then a, then b) resolves to
    // `a=bg`, `b=fg`, so `t=1` (inside) selects fg and `t=0` (outside)
    // selects bg.
    let mut program = Program::new();
    program.vec3(INK); // fg
    program.color(); // bg
    program.point(); // p
    program.scalar(0.0).register(); // v0
    program.scalar(1.0).register(); // v1
    program.scalar(2.0).register(); // v2
    program.scalar(3.0).register(); // v3
    program.poly4(); // d1 = convex_polygon(p, verts)
    program.scalar(4.0).register(); // r4 = roundness radius
    program.roundness(); // d1' = d1 - r4
    program.point();
    program.scalar(6.0).register(); // r6 = circle radius
    program.circle(); // d2 = circle(p, r6)
    program.scalar(5.0).register(); // r5 = lerp blend factor
    program.lerp(); // blend = lerp(d2, d1', r5)
    program.scalar(-1.0);
    program.mul(); // negate
    program.gtz(); // t = (negated > 0) ? 1 : 0
    program.lerp3(); // pops t, bg, fg -> bg.lerp(fg, t)

    let mut registers = [Value::Scalar(0.0); REGISTER_COUNT];
    registers[0] = Value::Vec2(Vec2::new(-0.5, 0.5));
    registers[1] = Value::Vec2(Vec2::new(-0.1, -0.5));
    registers[2] = Value::Vec2(Vec2::new(0.1, -0.5));
    registers[3] = Value::Vec2(Vec2::new(0.5, 0.5));
    registers[4] = Value::Scalar(0.1);
    registers[5] = Value::Scalar(0.1);
    registers[6] = Value::Scalar(0.7);

    let shader = VmShader { program: program.bytes(), registers, background: WHITE, flip_y: false };
    if let Err(e) = draw(&mut buf, res, Region::full(res), &shader) {
        log::error!("vm polygon pass failed: {}", e);
        std::process::exit(1);
    }

    let path = "vm_polygon.ppm";
    if let Err(e) = sdfvm::ppm::write(path, &buf, res.width, res.height) {
        log::error!("writing {} failed: {}", path, e);
        std::process::exit(1);
    }
    log::info!("wrote {}", path);
}
