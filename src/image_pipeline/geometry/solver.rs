use std::f64::consts::PI;

use tracing::debug;

use crate::image_pipeline::geometry::types::{AffineMatrix, CanvasGeometry};

/// Sizes the destination canvas for a rotation by `angle_deg` combined with a
/// uniform `scale`, and builds the matrix that centres the result on it.
///
/// The corners are rotated about the source centre and shifted back into the
/// source frame before measuring; the extent is shift-invariant so only the
/// canvas-centring translation depends on the destination size.
///
/// Never fails: degenerate input (zero scale, non-finite values) produces a
/// zero-sized canvas that [`CanvasGeometry::validate`] rejects.
pub fn compute_transform(
    src_width: usize,
    src_height: usize,
    angle_deg: f64,
    scale: f64,
) -> CanvasGeometry {
    let angle_rad = angle_deg * PI / 180.0;
    let (sin_a, cos_a) = angle_rad.sin_cos();

    let w = src_width as f64;
    let h = src_height as f64;
    let (half_w, half_h) = (w / 2.0, h / 2.0);

    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (cx, cy) in corners {
        let x = cx - half_w;
        let y = cy - half_h;

        let new_x = scale * (x * cos_a - y * sin_a) + half_w;
        let new_y = scale * (x * sin_a + y * cos_a) + half_h;

        min_x = min_x.min(new_x);
        max_x = max_x.max(new_x);
        min_y = min_y.min(new_y);
        max_y = max_y.max(new_y);
    }

    // `as` saturates: NaN and negative extents become 0.
    let dst_width = (max_x - min_x).ceil() as usize;
    let dst_height = (max_y - min_y).ceil() as usize;

    let tx = dst_width as f64 / 2.0 - scale * (half_w * cos_a - half_h * sin_a);
    let ty = dst_height as f64 / 2.0 - scale * (half_w * sin_a + half_h * cos_a);

    let matrix = AffineMatrix::new([
        [scale * cos_a, -scale * sin_a, tx],
        [scale * sin_a, scale * cos_a, ty],
    ]);

    debug!(
        src_width,
        src_height,
        angle_deg,
        scale,
        dst_width,
        dst_height,
        "Computed transform canvas"
    );

    CanvasGeometry {
        dst_width,
        dst_height,
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_rotation_unit_scale_is_identity() {
        let geometry = compute_transform(640, 480, 0.0, 1.0);

        assert_eq!((geometry.dst_width, geometry.dst_height), (640, 480));
        let expected = AffineMatrix::identity();
        for (row, expected_row) in geometry.matrix.coeffs().iter().zip(expected.coeffs()) {
            for (value, expected_value) in row.iter().zip(expected_row) {
                assert_abs_diff_eq!(*value, *expected_value, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_rotation_grows_non_square_canvas() {
        for angle in [10.0, 30.0, 45.0, 60.0, 89.0, 135.0, 200.0, -75.0] {
            let geometry = compute_transform(100, 50, angle, 1.0);
            assert!(
                geometry.dst_width * geometry.dst_height >= 100 * 50,
                "angle {angle}: {}x{}",
                geometry.dst_width,
                geometry.dst_height
            );
        }
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let geometry = compute_transform(640, 480, 90.0, 1.0);
        assert_eq!((geometry.dst_width, geometry.dst_height), (480, 640));

        let geometry = compute_transform(300, 200, -90.0, 1.0);
        assert_eq!((geometry.dst_width, geometry.dst_height), (200, 300));
    }

    #[test]
    fn test_doubling_scale_doubles_canvas() {
        let single = compute_transform(640, 480, 30.0, 1.0);
        let double = compute_transform(640, 480, 30.0, 2.0);

        assert_eq!((single.dst_width, single.dst_height), (795, 736));
        assert!(double.dst_width.abs_diff(2 * single.dst_width) <= 1);
        assert!(double.dst_height.abs_diff(2 * single.dst_height) <= 1);
    }

    #[test]
    fn test_source_centre_lands_on_canvas_centre() {
        for (w, h, angle, scale) in [(512, 512, 45.0, 1.0), (100, 50, 30.0, 2.0), (64, 32, 120.0, 0.5)] {
            let geometry = compute_transform(w, h, angle, scale);
            let (x, y) = geometry.matrix.apply(w as f64 / 2.0, h as f64 / 2.0);

            assert_abs_diff_eq!(x, geometry.dst_width as f64 / 2.0, epsilon = 1e-9);
            assert_abs_diff_eq!(y, geometry.dst_height as f64 / 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_identity_maps_source_centre_onto_itself() {
        let geometry = compute_transform(64, 32, 0.0, 1.0);
        let (x, y) = geometry.matrix.apply(32.0, 16.0);

        assert_abs_diff_eq!(x, 32.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lena_sized_45_degrees() {
        let geometry = compute_transform(512, 512, 45.0, 1.0);
        let [[a11, a12, _], [a21, a22, _]] = *geometry.matrix.coeffs();

        // ceil(512 * sqrt(2)) = ceil(724.08)
        assert_eq!((geometry.dst_width, geometry.dst_height), (725, 725));
        assert_abs_diff_eq!(a11, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_abs_diff_eq!(a22, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_abs_diff_eq!(a12, -std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_abs_diff_eq!(a21, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_translation_formula() {
        let geometry = compute_transform(100, 50, 30.0, 1.5);
        let (sin_a, cos_a) = (30.0f64).to_radians().sin_cos();

        let tx = geometry.dst_width as f64 / 2.0 - 1.5 * (50.0 * cos_a - 25.0 * sin_a);
        let ty = geometry.dst_height as f64 / 2.0 - 1.5 * (50.0 * sin_a + 25.0 * cos_a);
        assert_abs_diff_eq!(geometry.matrix.coeffs()[0][2], tx, epsilon = 1e-9);
        assert_abs_diff_eq!(geometry.matrix.coeffs()[1][2], ty, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_scale_collapses_canvas() {
        let geometry = compute_transform(512, 512, 45.0, 0.0);
        assert_eq!((geometry.dst_width, geometry.dst_height), (0, 0));
    }

    #[test]
    fn test_non_finite_angle_collapses_canvas() {
        let geometry = compute_transform(64, 64, f64::NAN, 1.0);
        assert_eq!((geometry.dst_width, geometry.dst_height), (0, 0));
    }
}
