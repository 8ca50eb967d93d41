//! Fills a 640x480 canvas with a flat color and writes it to `fill.ppm`.
//! Mirrors the flat-fill half of the original `demo.c` `main()`.

use sdfvm::raster::{draw, Region, Resolution};
use sdfvm::shader::FillShader;
use sdfvm::vecmath::Vec3;

fn main() {
    env_logger::init();

    let res = Resolution::new(640, 480);
    let mut buf = vec![Vec3::ZERO; (res.width * res.height) as usize];

    let shader = FillShader { color: Vec3::new(0.1, 0.1, 0.15) };
    if let Err(e) = draw(&mut buf, res, Region::full(res), &shader) {
        log::error!("fill pass failed: {}", e);
        std::process::exit(1);
    }

    let path = "fill.ppm";
    if let Err(e) = sdfvm::ppm::write(path, &buf, res.width, res.height) {
        log::error!("writing {} failed: {}", path, e);
        std::process::exit(1);
    }
    log::info!("wrote {}", path);
}
