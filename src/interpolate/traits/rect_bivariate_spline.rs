//! Rect bivariate spline trait — tensor-product B-spline on rectangular grid.
use crate::DType;

use crate::interpolate::error::InterpolateResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// A fitted tensor-product bivariate B-spline on a rectangular grid.
///
/// Represents `S(x,y) = Σᵢ Σⱼ cᵢⱼ Bᵢ(x) Bⱼ(y)` where Bᵢ, Bⱼ are 1D B-spline
/// basis functions along x and y axes respectively.
#[derive(Debug, Clone)]
pub struct BivariateSpline<R: Runtime<DType = DType>> {
    /// Knot vector for x-axis, shape `[n_knots_x]`.
    pub knots_x: Tensor<R>,
    /// Knot vector for y-axis, shape `[n_knots_y]`.
    pub knots_y: Tensor<R>,
    /// Coefficient matrix, shape `[n_coeffs_x, n_coeffs_y]`.
    pub coefficients: Tensor<R>,
    /// Polynomial degree along x-axis.
    pub degree_x: usize,
    /// Polynomial degree along y-axis.
    pub degree_y: usize,
}

impl<R: Runtime<DType = DType>> BivariateSpline<R> {
    /// Number of coefficients along x.
    pub fn n_coeffs_x(&self) -> usize {
        self.knots_x.shape()[0] - self.degree_x - 1
    }

    /// Number of coefficients along y.
    pub fn n_coeffs_y(&self) -> usize {
        self.knots_y.shape()[0] - self.degree_y - 1
    }
}

/// Algorithms for tensor-product B-spline interpolation on rectangular grids.
///
/// Given a rectangular grid of (x, y) values and corresponding z values,
/// fits an interpolating bivariate B-spline surface and evaluates it either
/// at paired coordinates or on an outer-product grid.
///
/// Query coordinates outside the fitted bounding box are clamped to it, so
/// evaluation there returns the value on the nearest edge.
pub trait RectBivariateSplineAlgorithms<R: Runtime<DType = DType>> {
    /// Fit a tensor-product B-spline to data on a rectangular grid.
    ///
    /// Knots use not-a-knot placement, which makes the collocation system
    /// square and the surface pass through every grid value.
    ///
    /// # Arguments
    /// * `x` - 1D tensor of x coordinates, shape `[nx]`, strictly increasing
    /// * `y` - 1D tensor of y coordinates, shape `[ny]`, strictly increasing
    /// * `z` - 2D tensor of values, shape `[nx, ny]`
    /// * `degree_x` - Polynomial degree along x
    /// * `degree_y` - Polynomial degree along y
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` if `z` is not `[nx, ny]`
    /// - `InsufficientData` if an axis has `degree` points or fewer
    /// - `NotMonotonic` if an axis is not strictly increasing
    fn rect_bivariate_spline_fit(
        &self,
        x: &Tensor<R>,
        y: &Tensor<R>,
        z: &Tensor<R>,
        degree_x: usize,
        degree_y: usize,
    ) -> InterpolateResult<BivariateSpline<R>>;

    /// Evaluate a bivariate spline at paired query points.
    ///
    /// # Arguments
    /// * `spline` - The fitted bivariate spline
    /// * `xi` - 1D tensor of x query coordinates, shape `[m]`
    /// * `yi` - 1D tensor of y query coordinates, shape `[m]`
    ///
    /// # Returns
    /// 1D tensor of interpolated values, shape `[m]`
    fn rect_bivariate_spline_evaluate(
        &self,
        spline: &BivariateSpline<R>,
        xi: &Tensor<R>,
        yi: &Tensor<R>,
    ) -> InterpolateResult<Tensor<R>>;

    /// Evaluate a bivariate spline on a grid of query points.
    ///
    /// # Arguments
    /// * `spline` - The fitted bivariate spline
    /// * `xi` - 1D tensor of x grid coordinates, shape `[mx]`
    /// * `yi` - 1D tensor of y grid coordinates, shape `[my]`
    ///
    /// # Returns
    /// 2D tensor of interpolated values, shape `[mx, my]`
    fn rect_bivariate_spline_evaluate_grid(
        &self,
        spline: &BivariateSpline<R>,
        xi: &Tensor<R>,
        yi: &Tensor<R>,
    ) -> InterpolateResult<Tensor<R>>;
}
