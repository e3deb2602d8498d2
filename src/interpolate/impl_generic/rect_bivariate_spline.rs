//! Rect bivariate spline generic implementation (fully on-device).
//!
//! Tensor-product B-spline on rectangular grid:
//! S(x,y) = Σᵢ Σⱼ cᵢⱼ Bᵢ(x) Bⱼ(y)
//!
//! Reuses 1D B-spline basis computation from bspline.rs.
//! Zero GPU↔CPU transfers in algorithm code apart from the axis checks.

use crate::interpolate::error::{InterpolateError, InterpolateResult};
use crate::interpolate::impl_generic::bspline::{
    build_not_a_knot_vector, clamp_to_knot_span, compute_basis_matrix, ensure_strictly_increasing,
};
use crate::interpolate::traits::rect_bivariate_spline::BivariateSpline;
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{CompareOps, ScalarOps};
use numr::prelude::DType;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Fit a tensor-product B-spline to rectangular grid data.
///
/// 1. Build 1D basis matrices Bx `[nx, ncx]` and By `[ny, ncy]`
/// 2. Form 2D collocation: A = kron(By, Bx) → `[nx*ny, ncx*ncy]`
/// 3. Flatten z and solve: coeffs = solve(A, z_flat)
/// 4. Reshape coefficients to `[ncx, ncy]`
pub fn rect_bivariate_spline_fit_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    y: &Tensor<R>,
    z: &Tensor<R>,
    degree_x: usize,
    degree_y: usize,
) -> InterpolateResult<BivariateSpline<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + LinearAlgebraAlgorithms<R> + RuntimeClient<R>,
{
    if x.shape().len() != 1 || y.shape().len() != 1 {
        return Err(InterpolateError::InvalidParameter {
            parameter: "x, y".to_string(),
            message: "x and y must be 1D tensors".to_string(),
        });
    }
    if degree_x == 0 || degree_y == 0 {
        return Err(InterpolateError::InvalidParameter {
            parameter: "degree".to_string(),
            message: "degree must be >= 1".to_string(),
        });
    }

    let nx = x.shape()[0];
    let ny = y.shape()[0];

    if z.shape().len() != 2 || z.shape()[0] != nx || z.shape()[1] != ny {
        return Err(InterpolateError::ShapeMismatch {
            expected: nx * ny,
            actual: z.shape().iter().product(),
            context: "rect_bivariate_spline_fit: z must be [nx, ny]".to_string(),
        });
    }
    if nx <= degree_x || ny <= degree_y {
        return Err(InterpolateError::InsufficientData {
            required: (degree_x + 1).max(degree_y + 1),
            actual: nx.min(ny),
            context: "rect_bivariate_spline_fit: need at least degree+1 points per axis"
                .to_string(),
        });
    }

    ensure_strictly_increasing(client, x, "rect_bivariate_spline_fit: x")?;
    ensure_strictly_increasing(client, y, "rect_bivariate_spline_fit: y")?;

    let knots_x = build_not_a_knot_vector(client, x, degree_x)?;
    let knots_y = build_not_a_knot_vector(client, y, degree_y)?;

    let ncx = knots_x.shape()[0] - degree_x - 1;
    let ncy = knots_y.shape()[0] - degree_y - 1;

    let bx = compute_basis_matrix(client, x, &knots_x, degree_x, ncx)?; // `[nx, ncx]`
    let by = compute_basis_matrix(client, y, &knots_y, degree_y, ncy)?; // `[ny, ncy]`

    let a = LinearAlgebraAlgorithms::kron(client, &by, &bx)?; // `[nx*ny, ncx*ncy]`

    // kron(By, Bx) @ vec(C) = vec(Z) with column-major vec(), so the
    // right-hand side is z transposed to `[ny, nx]` and flattened row-major
    let z_t = z.transpose(0, 1)?.contiguous();
    let z_flat = z_t.reshape(&[nx * ny, 1])?;

    let coeffs_flat = LinearAlgebraAlgorithms::solve(client, &a, &z_flat).map_err(|e| {
        InterpolateError::NumericalError {
            message: format!("Failed to solve bivariate spline system: {}", e),
        }
    })?;

    let coefficients = coeffs_flat
        .reshape(&[ncy, ncx])?
        .transpose(0, 1)?
        .contiguous(); // [ncx, ncy]

    Ok(BivariateSpline {
        knots_x,
        knots_y,
        coefficients,
        degree_x,
        degree_y,
    })
}

/// Evaluate bivariate spline at scattered query points.
///
/// For each query (xi`[i]`, yi`[i]`):
///   result`[i]` = Bx_row`[i,:]` @ C @ By_row`[i,:]`ᵀ
///
/// Vectorized: matmul basis rows with C, multiply element-wise, row-sum.
pub fn rect_bivariate_spline_evaluate_impl<R, C>(
    client: &C,
    spline: &BivariateSpline<R>,
    xi: &Tensor<R>,
    yi: &Tensor<R>,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let m = xi.shape()[0];
    if yi.shape()[0] != m {
        return Err(InterpolateError::ShapeMismatch {
            expected: m,
            actual: yi.shape()[0],
            context: "rect_bivariate_spline_evaluate: xi and yi must have same length".to_string(),
        });
    }
    if m == 0 {
        return Ok(Tensor::zeros(&[0], DType::F64, client.device()));
    }

    let ncx = spline.n_coeffs_x();
    let ncy = spline.n_coeffs_y();

    let xi = clamp_to_knot_span(client, xi, &spline.knots_x)?;
    let yi = clamp_to_knot_span(client, yi, &spline.knots_y)?;

    let bx = compute_basis_matrix(client, &xi, &spline.knots_x, spline.degree_x, ncx)?; // `[m, ncx]`
    let by = compute_basis_matrix(client, &yi, &spline.knots_y, spline.degree_y, ncy)?; // `[m, ncy]`

    let tmp = client.matmul(&bx, &spline.coefficients)?; // [m, ncy]
    let product = client.mul(&tmp, &by)?; // [m, ncy]
    let result = client.sum(&product, &[1], false)?; // [m]

    Ok(result)
}

/// Evaluate bivariate spline on a grid of query points.
///
/// Returns z`[i,j]` = S(xi`[i]`, yi`[j]`) as a `[mx, my]` tensor.
pub fn rect_bivariate_spline_evaluate_grid_impl<R, C>(
    client: &C,
    spline: &BivariateSpline<R>,
    xi: &Tensor<R>,
    yi: &Tensor<R>,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let mx = xi.shape()[0];
    let my = yi.shape()[0];
    if mx == 0 || my == 0 {
        return Ok(Tensor::zeros(&[mx, my], DType::F64, client.device()));
    }

    let ncx = spline.n_coeffs_x();
    let ncy = spline.n_coeffs_y();

    let xi = clamp_to_knot_span(client, xi, &spline.knots_x)?;
    let yi = clamp_to_knot_span(client, yi, &spline.knots_y)?;

    let bx = compute_basis_matrix(client, &xi, &spline.knots_x, spline.degree_x, ncx)?; // [mx, ncx]
    let by = compute_basis_matrix(client, &yi, &spline.knots_y, spline.degree_y, ncy)?; // [my, ncy]

    // Z = Bx @ C @ By^T → [mx, my]
    let tmp = client.matmul(&bx, &spline.coefficients)?; // [mx, ncy]
    let by_t = by.transpose(0, 1)?.contiguous(); // [ncy, my]
    let result = client.matmul(&tmp, &by_t)?; // [mx, my]

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    fn setup() -> (CpuDevice, CpuClient) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (device, client)
    }

    /// z[i, j] = f(x[i], y[j]) on the grid, row-major `[nx, ny]`.
    fn tabulate(x: &[f64], y: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        x.iter()
            .flat_map(|&xv| y.iter().map(move |&yv| (xv, yv)))
            .map(|(xv, yv)| f(xv, yv))
            .collect()
    }

    #[test]
    fn test_bilinear_exact() {
        // z = x + 2y should be exact with degree 1
        let (device, client) = setup();
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 2.0];
        let x = Tensor::<CpuRuntime>::from_slice(&xs, &[4], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&ys, &[3], &device);
        let z_data = tabulate(&xs, &ys, |a, b| a + 2.0 * b);
        let z = Tensor::<CpuRuntime>::from_slice(&z_data, &[4, 3], &device);

        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 1, 1).expect("fit failed");

        let xi = Tensor::<CpuRuntime>::from_slice(&[0.5, 1.5, 2.5], &[3], &device);
        let yi = Tensor::<CpuRuntime>::from_slice(&[0.5, 1.0, 1.5], &[3], &device);
        let result = rect_bivariate_spline_evaluate_impl(&client, &spline, &xi, &yi).unwrap();
        let vals: Vec<f64> = result.to_vec();

        let expected = [0.5 + 1.0, 1.5 + 2.0, 2.5 + 3.0];
        for (&v, &e) in vals.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(v, e, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_grid_evaluation_shape_and_values() {
        // z = x * y is bilinear, so cubic reproduces it exactly
        let (device, client) = setup();
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 2.0, 3.0];
        let x = Tensor::<CpuRuntime>::from_slice(&xs, &[4], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&ys, &[4], &device);
        let z_data = tabulate(&xs, &ys, |a, b| a * b);
        let z = Tensor::<CpuRuntime>::from_slice(&z_data, &[4, 4], &device);

        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 3, 3).expect("fit failed");

        let xi = Tensor::<CpuRuntime>::from_slice(&[0.5, 1.5], &[2], &device);
        let yi = Tensor::<CpuRuntime>::from_slice(&[0.5, 1.5, 2.5], &[3], &device);
        let grid = rect_bivariate_spline_evaluate_grid_impl(&client, &spline, &xi, &yi).unwrap();

        assert_eq!(grid.shape(), &[2, 3]);
        let vals: Vec<f64> = grid.to_vec();
        assert_abs_diff_eq!(vals[0], 0.25, epsilon = 1e-8);
        assert_abs_diff_eq!(vals[5], 3.75, epsilon = 1e-8);
    }

    #[test]
    fn test_interpolates_grid_values() {
        let (device, client) = setup();
        let xs = [0.0, 0.5, 1.5, 2.0, 3.5];
        let ys = [-1.0, 0.0, 2.0, 4.0];
        let x = Tensor::<CpuRuntime>::from_slice(&xs, &[5], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&ys, &[4], &device);
        let z_data = tabulate(&xs, &ys, |a, b| (a * 1.3).sin() + b * b);
        let z = Tensor::<CpuRuntime>::from_slice(&z_data, &[5, 4], &device);

        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 3, 3).expect("fit failed");
        let grid = rect_bivariate_spline_evaluate_grid_impl(&client, &spline, &x, &y).unwrap();
        let vals: Vec<f64> = grid.to_vec();

        for (&v, &e) in vals.iter().zip(z_data.iter()) {
            assert_abs_diff_eq!(v, e, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_out_of_box_clamps_to_edge() {
        let (device, client) = setup();
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0];
        let x = Tensor::<CpuRuntime>::from_slice(&xs, &[3], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&ys, &[2], &device);
        let z_data = tabulate(&xs, &ys, |a, b| 10.0 * a + b);
        let z = Tensor::<CpuRuntime>::from_slice(&z_data, &[3, 2], &device);

        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 1, 1).unwrap();

        let xi = Tensor::<CpuRuntime>::from_slice(&[-5.0, 7.0], &[2], &device);
        let yi = Tensor::<CpuRuntime>::from_slice(&[0.5, 3.0], &[2], &device);
        let vals: Vec<f64> = rect_bivariate_spline_evaluate_impl(&client, &spline, &xi, &yi)
            .unwrap()
            .to_vec();

        assert_abs_diff_eq!(vals[0], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(vals[1], 21.0, epsilon = 1e-10);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let (device, client) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 2.0], &[3], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 2.0, 3.0], &[4], &device);
        let z = Tensor::<CpuRuntime>::from_slice(&[0.0f64; 12], &[3, 4], &device);

        // Three x samples cannot carry a cubic
        let err = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 3, 3).unwrap_err();
        assert!(matches!(err, InterpolateError::InsufficientData { .. }));

        // z must be [nx, ny]
        let z_t = Tensor::<CpuRuntime>::from_slice(&[0.0f64; 12], &[4, 3], &device);
        let err = rect_bivariate_spline_fit_impl(&client, &x, &y, &z_t, 1, 1).unwrap_err();
        assert!(matches!(err, InterpolateError::ShapeMismatch { .. }));

        let x_dup = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 1.0], &[3], &device);
        let err = rect_bivariate_spline_fit_impl(&client, &x_dup, &y, &z, 1, 1).unwrap_err();
        assert!(matches!(err, InterpolateError::NotMonotonic { .. }));
    }

    #[test]
    fn test_evaluate_rejects_unpaired_points() {
        let (device, client) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0], &[2], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0], &[2], &device);
        let z = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 2.0, 3.0], &[2, 2], &device);
        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 1, 1).unwrap();

        let xi = Tensor::<CpuRuntime>::from_slice(&[0.5, 0.5], &[2], &device);
        let yi = Tensor::<CpuRuntime>::from_slice(&[0.5], &[1], &device);
        let err = rect_bivariate_spline_evaluate_impl(&client, &spline, &xi, &yi).unwrap_err();
        assert!(matches!(err, InterpolateError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_queries() {
        let (device, client) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0], &[2], &device);
        let y = Tensor::<CpuRuntime>::from_slice(&[0.0, 1.0, 2.0], &[3], &device);
        let z = Tensor::<CpuRuntime>::from_slice(&[0.0f64; 6], &[2, 3], &device);
        let spline = rect_bivariate_spline_fit_impl(&client, &x, &y, &z, 1, 1).unwrap();

        let empty = Tensor::<CpuRuntime>::from_slice::<f64>(&[], &[0], &device);
        let points = rect_bivariate_spline_evaluate_impl(&client, &spline, &empty, &empty).unwrap();
        assert_eq!(points.shape(), &[0]);

        let grid = rect_bivariate_spline_evaluate_grid_impl(&client, &spline, &empty, &y).unwrap();
        assert_eq!(grid.shape(), &[0, 3]);
        let grid = rect_bivariate_spline_evaluate_grid_impl(&client, &spline, &x, &empty).unwrap();
        assert_eq!(grid.shape(), &[2, 0]);
    }
}
