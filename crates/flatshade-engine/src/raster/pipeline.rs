use rayon::prelude::*;

use crate::stages::{VertexInput, VertexOutput, vertex_stage};

use super::triangle::{self, Primitive};
use super::ColorBuffer;

/// Rows per parallel work band.
const BAND_ROWS: usize = 16;

/// Fixed-function state for the reference rasterizer.
///
/// The default matches the GPU pipeline: counter-clockwise front face with
/// back faces culled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RasterState {
    pub cull_back_faces: bool,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            cull_back_faces: true,
        }
    }
}

/// Work done by one [`rasterize`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RasterStats {
    /// Triangles assembled from the vertex list.
    pub primitives: u64,
    /// Triangles dropped for having no area.
    pub degenerate: u64,
    /// Triangles dropped as back facing.
    pub culled: u64,
    /// Fragment stage invocations.
    pub fragments: u64,
}

/// Runs the vertex stage once per input, in parallel.
pub fn run_vertex_stage(inputs: &[VertexInput]) -> Vec<VertexOutput> {
    inputs.par_iter().map(|&v| vertex_stage(v)).collect()
}

/// Draws `vertices` as a triangle list into `target`.
///
/// Trailing vertices that do not complete a triangle are ignored. Degenerate
/// and culled triangles never reach the fragment stage. Triangles are applied
/// in submission order within every band, so the result does not depend on
/// how bands are scheduled.
pub fn rasterize(
    vertices: &[VertexInput],
    state: &RasterState,
    target: &mut ColorBuffer,
) -> RasterStats {
    let (width, height) = (target.width(), target.height());
    let outputs = run_vertex_stage(vertices);

    let mut stats = RasterStats::default();
    let mut visible = Vec::new();

    for tri in outputs.chunks_exact(3) {
        stats.primitives += 1;
        let screen = [
            triangle::to_screen(tri[0].position, width, height),
            triangle::to_screen(tri[1].position, width, height),
            triangle::to_screen(tri[2].position, width, height),
        ];
        match triangle::setup(screen, width, height, state.cull_back_faces) {
            Primitive::Degenerate => stats.degenerate += 1,
            Primitive::BackFacing => stats.culled += 1,
            Primitive::Visible(setup) => visible.push(setup),
        }
    }

    if visible.is_empty() || width == 0 || height == 0 {
        log::debug!("rasterize: nothing visible ({stats:?})");
        return stats;
    }

    let row_len = width as usize;
    stats.fragments = target
        .pixels_mut()
        .par_chunks_mut(BAND_ROWS * row_len)
        .enumerate()
        .map(|(i, band)| {
            let y0 = (i * BAND_ROWS) as u32;
            let y1 = y0 + (band.len() / row_len) as u32;
            visible
                .iter()
                .map(|tri| triangle::shade_band(tri, band, width, y0, y1))
                .sum::<u64>()
        })
        .sum();

    log::debug!("rasterize: {stats:?}");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TRIANGLE;
    use crate::stages::FILL_COLOR;

    const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    fn v(x: f32, y: f32) -> VertexInput {
        VertexInput::new(x, y)
    }

    fn draw(vertices: &[VertexInput], state: RasterState, size: u32) -> (ColorBuffer, RasterStats) {
        let mut buf = ColorBuffer::new(size, size, CLEAR);
        let stats = rasterize(vertices, &state, &mut buf);
        (buf, stats)
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn triangle_fills_green() {
        let tri = [v(-0.5, -0.5), v(0.5, -0.5), v(0.0, 0.5)];
        let (buf, stats) = draw(&tri, RasterState::default(), 64);

        assert_eq!(stats.primitives, 1);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.culled, 0);

        // Every pixel is either untouched or exactly the fill color.
        assert!(buf.pixels().iter().all(|&p| p == CLEAR || p == FILL_COLOR));
        assert_eq!(stats.fragments as usize, buf.covered_pixels(CLEAR));

        // Half of a unit square out of a 2x2 NDC square: ~1/8 of 64x64.
        let covered = buf.covered_pixels(CLEAR);
        assert!((450..=580).contains(&covered), "covered = {covered}");

        assert_eq!(buf.pixel(32, 32), Some(FILL_COLOR));
        assert_eq!(buf.pixel(32, 20), Some(FILL_COLOR));
        assert_eq!(buf.pixel(0, 0), Some(CLEAR));
        assert_eq!(buf.pixel(32, 50), Some(CLEAR));
        assert_eq!(buf.pixel(5, 40), Some(CLEAR));
    }

    #[test]
    fn builtin_shape_is_visible() {
        let (buf, stats) = draw(&TRIANGLE, RasterState::default(), 32);
        assert_eq!(stats.culled, 0);
        assert!(stats.fragments > 0);
        assert_eq!(buf.pixel(16, 16), Some(FILL_COLOR));
    }

    #[test]
    fn fullscreen_pair_covers_every_pixel() {
        let quad = [
            v(-1.0, -1.0),
            v(1.0, -1.0),
            v(1.0, 1.0),
            v(-1.0, -1.0),
            v(1.0, 1.0),
            v(-1.0, 1.0),
        ];
        let (buf, stats) = draw(&quad, RasterState::default(), 20);
        assert_eq!(stats.primitives, 2);
        assert_eq!(buf.covered_pixels(CLEAR), 400);
        // The shared diagonal passes through pixel centers on both sides.
        assert!(stats.fragments >= 400);
    }

    #[test]
    fn far_vertex_triangle_is_still_drawn() {
        let tri = [v(-0.5, -0.5), v(0.5, -0.5), v(0.0, 1e37)];
        let (buf, stats) = draw(&tri, RasterState::default(), 64);

        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.culled, 0);
        assert!(stats.fragments > 0);
        assert_eq!(stats.fragments as usize, buf.covered_pixels(CLEAR));

        // Near the base the sides are practically vertical at x = 16 and x = 48.
        assert_eq!(buf.pixel(32, 40), Some(FILL_COLOR));
        assert_eq!(buf.pixel(32, 0), Some(FILL_COLOR));
        assert_eq!(buf.pixel(5, 40), Some(CLEAR));
        assert_eq!(buf.pixel(32, 50), Some(CLEAR));
    }

    #[test]
    fn huge_triangle_covers_the_whole_target() {
        let tri = [v(-1e18, -1e18), v(1e18, -1e18), v(0.0, 1e18)];
        let (buf, stats) = draw(&tri, RasterState::default(), 64);

        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.fragments, 64 * 64);
        assert_eq!(buf.covered_pixels(CLEAR), 64 * 64);
    }

    // ── culling ───────────────────────────────────────────────────────────

    #[test]
    fn clockwise_triangle_is_culled() {
        let tri = [v(0.0, 0.5), v(0.5, -0.5), v(-0.5, -0.5)];
        let (buf, stats) = draw(&tri, RasterState::default(), 32);
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.fragments, 0);
        assert_eq!(buf.covered_pixels(CLEAR), 0);
    }

    #[test]
    fn culling_disabled_draws_both_windings() {
        let ccw = [v(-0.5, -0.5), v(0.5, -0.5), v(0.0, 0.5)];
        let cw = [v(-0.5, -0.5), v(0.0, 0.5), v(0.5, -0.5)];
        let state = RasterState { cull_back_faces: false };

        let (a, sa) = draw(&ccw, state, 48);
        let (b, sb) = draw(&cw, state, 48);
        assert_eq!(sb.culled, 0);
        assert_eq!(sa.fragments, sb.fragments);
        assert_eq!(a, b);
    }

    // ── degenerate input ──────────────────────────────────────────────────

    #[test]
    fn collinear_triangle_produces_no_fragments() {
        let tri = [v(-0.5, -0.5), v(0.0, 0.0), v(0.5, 0.5)];
        let (buf, stats) = draw(&tri, RasterState::default(), 32);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments, 0);
        assert_eq!(buf.covered_pixels(CLEAR), 0);
    }

    #[test]
    fn coincident_triangle_produces_no_fragments() {
        let tri = [v(0.25, 0.25); 3];
        let (_, stats) = draw(&tri, RasterState { cull_back_faces: false }, 32);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments, 0);
    }

    #[test]
    fn non_finite_positions_do_not_panic() {
        let tri = [v(f32::NAN, 0.0), v(0.5, -0.5), v(0.0, 0.5)];
        let (buf, stats) = draw(&tri, RasterState::default(), 16);
        assert_eq!(stats.fragments, 0);
        assert_eq!(buf.covered_pixels(CLEAR), 0);
    }

    #[test]
    fn incomplete_trailing_triangle_is_ignored() {
        let verts = [
            v(-0.5, -0.5),
            v(0.5, -0.5),
            v(0.0, 0.5),
            v(0.9, 0.9),
            v(0.8, 0.1),
        ];
        let (_, stats) = draw(&verts, RasterState::default(), 16);
        assert_eq!(stats.primitives, 1);
    }

    #[test]
    fn empty_input_and_empty_target() {
        let (_, stats) = draw(&[], RasterState::default(), 16);
        assert_eq!(stats, RasterStats::default());

        let mut empty = ColorBuffer::new(0, 0, CLEAR);
        let stats = rasterize(&TRIANGLE, &RasterState::default(), &mut empty);
        assert_eq!(stats.fragments, 0);
    }

    // ── scheduling independence ───────────────────────────────────────────

    #[test]
    fn vertex_stage_parallel_matches_sequential() {
        let inputs: Vec<VertexInput> = (0..10_000)
            .map(|i| v((i as f32 * 0.37).sin(), (i as f32 * 0.11).cos()))
            .collect();

        let sequential: Vec<VertexOutput> = inputs.iter().map(|&i| vertex_stage(i)).collect();
        assert_eq!(run_vertex_stage(&inputs), sequential);
    }

    #[test]
    fn output_is_independent_of_thread_count() {
        let verts = [
            v(-0.9, -0.9),
            v(0.8, -0.7),
            v(0.1, 0.95),
            v(-0.3, 0.2),
            v(0.6, 0.4),
            v(-0.1, 0.9),
        ];

        let render_with = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(|| draw(&verts, RasterState::default(), 97))
        };

        let (one, stats_one) = render_with(1);
        let (many, stats_many) = render_with(4);
        assert_eq!(stats_one, stats_many);
        assert_eq!(one, many);
    }

    #[test]
    fn repeated_rasterization_is_identical() {
        let (a, sa) = draw(&TRIANGLE, RasterState::default(), 40);
        let (b, sb) = draw(&TRIANGLE, RasterState::default(), 40);
        assert_eq!(sa, sb);
        assert_eq!(a, b);
    }
}
