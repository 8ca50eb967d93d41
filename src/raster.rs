//! The parallel tile rasterizer: a fixed-size worker pool that fills a
//! rectangular region of a linear RGB buffer by invoking a per-pixel shader
//! over an interleaved row partition (`y mod N == t`).

use crate::error::{RasterError, VmError};
use crate::vecmath::{Vec2, Vec3};

/// `N = 8` worker tasks per `draw` call by default.
pub const DEFAULT_WORKERS: usize = 8;

/// Canvas resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The upper-left origin and extent of an affected sub-rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Region { x, y, w, h }
    }

    /// The full canvas as a region.
    pub fn full(resolution: Resolution) -> Self {
        Region { x: 0, y: 0, w: resolution.width, h: resolution.height }
    }

    pub fn extent(self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }
}

/// Per-invocation immutable inputs passed to a shader: the region being
/// drawn and the canvas resolution it was dispatched against.
#[derive(Debug, Clone, Copy)]
pub struct ShaderContext {
    pub resolution: Resolution,
    pub region: Region,
}

/// Either a native closure capturing its own parameters, or a VM dispatch
/// carrying a reference to program + register file. No raw type-erased
/// `userdata` pointer survives this abstraction: per-shader configuration
/// lives inside the `Shader` implementor itself.
pub trait Shader: Sync {
    /// Per-worker scratch state, e.g. an SDFVM instance. Constructed once
    /// per worker before dispatch and owned for that worker's lifetime.
    type Worker: Send;

    fn make_worker(&self, worker_index: usize) -> Self::Worker;

    /// `coord` is the pixel position relative to the region's origin.
    fn shade(
        &self,
        worker: &mut Self::Worker,
        ctx: &ShaderContext,
        coord: Vec2,
        pixel: &mut Vec3,
    ) -> Result<(), VmError>;
}

/// Renders `region` of `buf` (resolution `resolution`, default stride)
/// using `shader`, dispatched across `DEFAULT_WORKERS` worker tasks.
pub fn draw<S: Shader>(buf: &mut [Vec3], resolution: Resolution, region: Region, shader: &S) -> Result<(), RasterError> {
    draw_with_stride(buf, resolution, region, shader, resolution.width, DEFAULT_WORKERS)
}

/// As `draw`, but with an explicit worker count.
pub fn draw_with_workers<S: Shader>(
    buf: &mut [Vec3],
    resolution: Resolution,
    region: Region,
    shader: &S,
    workers: usize,
) -> Result<(), RasterError> {
    draw_with_stride(buf, resolution, region, shader, resolution.width, workers)
}

/// As `draw`, but with an explicit buffer stride (row pitch), which may
/// differ from `resolution.width` to permit rendering into a sub-image.
pub fn draw_with_stride<S: Shader>(
    buf: &mut [Vec3],
    resolution: Resolution,
    region: Region,
    shader: &S,
    stride: u32,
    workers: usize,
) -> Result<(), RasterError> {
    let workers = workers.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| RasterError::WorkerPool(e.to_string()))?;

    let max_pos = stride as usize * resolution.height as usize;
    let clipped_len = buf.len().min(max_pos);
    let buf = &mut buf[..clipped_len];

    let row_end = region.y.saturating_add(region.h);
    let col_end = region.x.saturating_add(region.w);

    let mut buckets: Vec<Vec<(u32, &mut [Vec3])>> = (0..workers).map(|_| Vec::new()).collect();
    for (y, row) in buf.chunks_mut(stride.max(1) as usize).enumerate() {
        let y = y as u32;
        if y < region.y || y >= row_end {
            continue;
        }
        let t = ((y - region.y) as usize) % workers;
        buckets[t].push((y, row));
    }

    let ctx = ShaderContext { resolution, region };
    let mut worker_errors: Vec<Option<VmError>> = vec![None; workers];

    pool.scope(|scope| {
        for (worker_index, (bucket, err_slot)) in buckets.into_iter().zip(worker_errors.iter_mut()).enumerate() {
            let shader = &shader;
            let ctx = &ctx;
            scope.spawn(move |_| {
                let mut worker_state = shader.make_worker(worker_index);
                for (y, row) in bucket {
                    let xend = col_end.min(row.len() as u32);
                    for x in region.x..xend {
                        let coord = Vec2::new((x - region.x) as f32, (y - region.y) as f32);
                        let pixel = &mut row[x as usize];
                        if let Err(e) = shader.shade(&mut worker_state, ctx, coord, pixel) {
                            if err_slot.is_none() {
                                *err_slot = Some(e);
                            }
                        }
                    }
                }
            });
        }
    });

    if let Some(err) = worker_errors.into_iter().flatten().next() {
        return Err(RasterError::Shader(err));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FillShader {
        color: Vec3,
    }

    impl Shader for FillShader {
        type Worker = ();

        fn make_worker(&self, _worker_index: usize) {}

        fn shade(&self, _worker: &mut (), _ctx: &ShaderContext, _coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
            *pixel = self.color;
            Ok(())
        }
    }

    struct WriterIdShader;

    impl Shader for WriterIdShader {
        type Worker = usize;

        fn make_worker(&self, worker_index: usize) -> usize {
            worker_index
        }

        fn shade(&self, worker: &mut usize, _ctx: &ShaderContext, _coord: Vec2, pixel: &mut Vec3) -> Result<(), VmError> {
            pixel.x = *worker as f32;
            Ok(())
        }
    }

    struct AlwaysErrShader;

    impl Shader for AlwaysErrShader {
        type Worker = ();

        fn make_worker(&self, _worker_index: usize) {}

        fn shade(&self, _worker: &mut (), _ctx: &ShaderContext, _coord: Vec2, _pixel: &mut Vec3) -> Result<(), VmError> {
            Err(VmError::StackUnderflow)
        }
    }

    #[test]
    fn coverage_every_pixel_written() {
        let res = Resolution::new(16, 16);
        let mut buf = vec![Vec3::new(-1.0, -1.0, -1.0); 16 * 16];
        let shader = FillShader { color: Vec3::new(1.0, 1.0, 1.0) };
        draw(&mut buf, res, Region::full(res), &shader).unwrap();
        assert!(buf.iter().all(|p| *p == Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn disjointness_each_pixel_written_by_one_worker() {
        let res = Resolution::new(32, 32);
        let mut buf = vec![Vec3::new(-1.0, -1.0, -1.0); 32 * 32];
        draw_with_workers(&mut buf, res, Region::full(res), &WriterIdShader, 8).unwrap();
        // Every row should be entirely attributed to one worker id, matching
        // the y-mod-N partition: no shared row could have been split.
        for y in 0..32usize {
            let row = &buf[y * 32..(y + 1) * 32];
            let first = row[0].x;
            assert!(row.iter().all(|p| p.x == first));
            assert_eq!(first as usize, y % 8);
        }
    }

    #[test]
    fn stride_with_padding_leaves_padding_untouched() {
        let res = Resolution::new(8, 4);
        let stride = 8 + 3; // W + P
        let mut buf = vec![Vec3::new(-1.0, -1.0, -1.0); stride as usize * 4];
        let shader = FillShader { color: Vec3::new(1.0, 1.0, 1.0) };
        draw_with_stride(&mut buf, res, Region::full(res), &shader, stride, DEFAULT_WORKERS).unwrap();
        for y in 0..4usize {
            let row = &buf[y * stride as usize..(y + 1) * stride as usize];
            assert!(row[..8].iter().all(|p| *p == Vec3::new(1.0, 1.0, 1.0)));
            assert!(row[8..].iter().all(|p| *p == Vec3::new(-1.0, -1.0, -1.0)));
        }
    }

    #[test]
    fn shader_error_surfaces_after_join() {
        let res = Resolution::new(4, 4);
        let mut buf = vec![Vec3::ZERO; 16];
        let err = draw(&mut buf, res, Region::full(res), &AlwaysErrShader).unwrap_err();
        assert_eq!(err, RasterError::Shader(VmError::StackUnderflow));
    }

    #[test]
    fn out_of_range_region_is_clipped_not_erroring() {
        let res = Resolution::new(4, 4);
        let mut buf = vec![Vec3::new(-1.0, -1.0, -1.0); 16];
        let shader = FillShader { color: Vec3::new(1.0, 1.0, 1.0) };
        // Region extends beyond the buffer; out-of-range pixels are skipped.
        let region = Region::new(0, 0, 100, 100);
        draw(&mut buf, res, region, &shader).unwrap();
        assert!(buf.iter().all(|p| *p == Vec3::new(1.0, 1.0, 1.0)));
    }
}
