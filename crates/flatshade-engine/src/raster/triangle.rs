use crate::stages::{VertexOutput, fragment_stage};

/// A vertex after perspective divide and viewport transform.
///
/// Screen coordinates are f64: f32 clip positions near `f32::MAX` still give
/// finite edge functions and areas after scaling to pixels.
#[derive(Debug, Copy, Clone)]
pub(super) struct ScreenVertex {
    pub x: f64,
    pub y: f64,
    pub clip: [f32; 4],
}

/// Maps a clip-space position to framebuffer coordinates (top-left origin, +Y down).
pub(super) fn to_screen(clip: [f32; 4], width: u32, height: u32) -> ScreenVertex {
    let inv_w = 1.0 / f64::from(clip[3]);
    let ndc_x = f64::from(clip[0]) * inv_w;
    let ndc_y = f64::from(clip[1]) * inv_w;
    ScreenVertex {
        x: (ndc_x + 1.0) * 0.5 * f64::from(width),
        y: (1.0 - ndc_y) * 0.5 * f64::from(height),
        clip,
    }
}

#[inline]
fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Triangle ready for scan conversion.
#[derive(Debug, Copy, Clone)]
pub(super) struct Setup {
    v: [ScreenVertex; 3],
    inv_area: f64,
    // Inclusive pixel bounds, clamped to the target.
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

#[derive(Debug)]
pub(super) enum Primitive {
    /// Zero area, or a vertex that is not a finite point on screen.
    Degenerate,
    BackFacing,
    Visible(Setup),
}

pub(super) fn setup(
    v: [ScreenVertex; 3],
    width: u32,
    height: u32,
    cull_back_faces: bool,
) -> Primitive {
    if v.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Primitive::Degenerate;
    }

    let [a, b, c] = &v;
    let area = edge(a, b, c.x, c.y);
    if area == 0.0 {
        return Primitive::Degenerate;
    }

    // Screen space flips Y, so counter-clockwise in NDC is negative here.
    let front_facing = area < 0.0;
    if cull_back_faces && !front_facing {
        return Primitive::BackFacing;
    }

    let min_x = a.x.min(b.x).min(c.x);
    let max_x = a.x.max(b.x).max(c.x);
    let min_y = a.y.min(b.y).min(c.y);
    let max_y = a.y.max(b.y).max(c.y);

    // Pixel `i` is sampled at `i + 0.5`. Float-to-int casts saturate.
    Primitive::Visible(Setup {
        v,
        inv_area: 1.0 / area,
        min_x: ((min_x - 0.5).ceil() as i64).max(0),
        max_x: ((max_x - 0.5).floor() as i64).min(i64::from(width) - 1),
        min_y: ((min_y - 0.5).ceil() as i64).max(0),
        max_y: ((max_y - 0.5).floor() as i64).min(i64::from(height) - 1),
    })
}

/// Shades the part of `tri` that falls in rows `y0..y1`.
///
/// `band` holds exactly those rows. Returns the number of fragment stage
/// invocations.
pub(super) fn shade_band(
    tri: &Setup,
    band: &mut [[f32; 4]],
    width: u32,
    y0: u32,
    y1: u32,
) -> u64 {
    let [v0, v1, v2] = &tri.v;
    let row_start = tri.min_y.max(i64::from(y0));
    let row_end = tri.max_y.min(i64::from(y1) - 1);

    let mut fragments = 0;
    for y in row_start..=row_end {
        let py = y as f64 + 0.5;
        let row = (y - i64::from(y0)) as usize * width as usize;

        for x in tri.min_x..=tri.max_x {
            let px = x as f64 + 0.5;
            let w0 = edge(v1, v2, px, py) * tri.inv_area;
            let w1 = edge(v2, v0, px, py) * tri.inv_area;
            let w2 = edge(v0, v1, px, py) * tri.inv_area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let weights = [w0, w1, w2];
            let interpolate = |i: usize| -> f64 {
                tri.v.iter().zip(weights).map(|(v, w)| f64::from(v.clip[i]) * w).sum()
            };
            let out = fragment_stage(VertexOutput {
                position: [px as f32, py as f32, interpolate(2) as f32, interpolate(3) as f32],
            });

            band[row + x as usize] = out.color;
            fragments += 1;
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(x: f64, y: f64) -> ScreenVertex {
        ScreenVertex {
            x,
            y,
            clip: [0.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn to_screen_maps_ndc_corners() {
        let tl = to_screen([-1.0, 1.0, 0.0, 1.0], 100, 50);
        assert_eq!((tl.x, tl.y), (0.0, 0.0));

        let br = to_screen([1.0, -1.0, 0.0, 1.0], 100, 50);
        assert_eq!((br.x, br.y), (100.0, 50.0));

        let c = to_screen([0.0, 0.0, 0.0, 1.0], 100, 50);
        assert_eq!((c.x, c.y), (50.0, 25.0));
    }

    #[test]
    fn to_screen_divides_by_w() {
        let p = to_screen([1.0, 1.0, 0.0, 2.0], 100, 100);
        assert_eq!((p.x, p.y), (75.0, 25.0));
    }

    #[test]
    fn coincident_vertices_are_degenerate() {
        let p = sv(3.0, 3.0);
        assert!(matches!(setup([p, p, p], 8, 8, true), Primitive::Degenerate));
    }

    #[test]
    fn collinear_vertices_are_degenerate() {
        let tri = [sv(0.0, 0.0), sv(2.0, 2.0), sv(5.0, 5.0)];
        assert!(matches!(setup(tri, 8, 8, false), Primitive::Degenerate));
    }

    #[test]
    fn non_finite_vertex_is_degenerate() {
        let tri = [sv(f64::NAN, 0.0), sv(0.0, 4.0), sv(4.0, 0.0)];
        assert!(matches!(setup(tri, 8, 8, false), Primitive::Degenerate));

        let tri = [sv(f64::INFINITY, 0.0), sv(0.0, 4.0), sv(4.0, 0.0)];
        assert!(matches!(setup(tri, 8, 8, false), Primitive::Degenerate));
    }

    #[test]
    fn far_vertex_keeps_a_finite_area() {
        let far = to_screen([0.0, f32::MAX, 0.0, 1.0], 64, 64);
        let tri = [
            to_screen([-0.5, -0.5, 0.0, 1.0], 64, 64),
            to_screen([0.5, -0.5, 0.0, 1.0], 64, 64),
            far,
        ];
        assert!(far.y.is_finite());
        assert!(matches!(setup(tri, 64, 64, true), Primitive::Visible(_)));
    }

    #[test]
    fn winding_decides_culling() {
        // Clockwise on screen == counter-clockwise in NDC == front facing.
        let front = [sv(0.0, 0.0), sv(0.0, 4.0), sv(4.0, 0.0)];
        let back = [sv(0.0, 0.0), sv(4.0, 0.0), sv(0.0, 4.0)];
        assert!(matches!(setup(front, 8, 8, true), Primitive::Visible(_)));
        assert!(matches!(setup(back, 8, 8, true), Primitive::BackFacing));
        assert!(matches!(setup(back, 8, 8, false), Primitive::Visible(_)));
    }

    #[test]
    fn shade_band_only_touches_its_rows() {
        let tri = [sv(0.0, 0.0), sv(0.0, 8.0), sv(8.0, 0.0)];
        let Primitive::Visible(s) = setup(tri, 8, 8, true) else {
            panic!("expected a visible triangle");
        };

        let mut band = vec![[0.0; 4]; 8 * 2];
        let n = shade_band(&s, &mut band, 8, 2, 4);
        assert!(n > 0);
        assert_eq!(n as usize, band.iter().filter(|p| p[1] == 1.0).count());
        // Row 2 samples y = 2.5, so x + 0.5 + 2.5 <= 8 covers x in 0..=5.
        assert_eq!(band[4], [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(band[6], [0.0; 4]);
    }
}
