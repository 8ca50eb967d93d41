//! Draws a heart tile plus a gallery of canvas-relative primitives onto a
//! single canvas and writes `shapes.ppm`. Each shape layers onto whatever
//! the previous pass left behind, the same way `demo.c`'s `fill` then
//! `heart` calls compose.

use sdfvm::raster::{draw, Region, Resolution};
use sdfvm::shader;
use sdfvm::vecmath::Vec3;

const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

fn main() {
    env_logger::init();

    let res = Resolution::new(640, 480);
    let mut buf = vec![WHITE; (res.width * res.height) as usize];

    draw(&mut buf, res, Region::new(16, 16, 160, 160), &shader::heart(Vec3::new(0.9, 0.2, 0.35))).unwrap();
    draw(&mut buf, res, Region::full(res), &shader::circle(320.0, 100.0, 48.0, Vec3::new(0.1, 0.2, 0.8))).unwrap();
    draw(&mut buf, res, Region::full(res), &shader::hexagon(420.0, 100.0, 48.0, Vec3::new(0.1, 0.6, 0.2))).unwrap();
    draw(
        &mut buf,
        res,
        Region::full(res),
        &shader::triangle_equilateral(320.0, 220.0, 56.0, Vec3::new(0.8, 0.5, 0.0)),
    )
    .unwrap();
    draw(&mut buf, res, Region::full(res), &shader::star5(420.0, 220.0, 48.0, 0.5, Vec3::new(0.6, 0.1, 0.7))).unwrap();
    draw(
        &mut buf,
        res,
        Region::new(480, 16, 140, 140),
        &shader::rounded_box(0.15, Vec3::new(0.2, 0.2, 0.2)),
    )
    .unwrap();

    let path = "shapes.ppm";
    if let Err(e) = sdfvm::ppm::write(path, &buf, res.width, res.height) {
        log::error!("writing {} failed: {}", path, e);
        std::process::exit(1);
    }
    log::info!("wrote {}", path);
}
