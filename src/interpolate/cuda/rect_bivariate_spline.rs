use crate::interpolate::error::InterpolateResult;
use crate::interpolate::impl_generic::rect_bivariate_spline::{
    rect_bivariate_spline_evaluate_grid_impl, rect_bivariate_spline_evaluate_impl,
    rect_bivariate_spline_fit_impl,
};
use crate::interpolate::traits::rect_bivariate_spline::{
    BivariateSpline, RectBivariateSplineAlgorithms,
};
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl RectBivariateSplineAlgorithms<CudaRuntime> for CudaClient {
    fn rect_bivariate_spline_fit(
        &self,
        x: &Tensor<CudaRuntime>,
        y: &Tensor<CudaRuntime>,
        z: &Tensor<CudaRuntime>,
        degree_x: usize,
        degree_y: usize,
    ) -> InterpolateResult<BivariateSpline<CudaRuntime>> {
        rect_bivariate_spline_fit_impl(self, x, y, z, degree_x, degree_y)
    }

    fn rect_bivariate_spline_evaluate(
        &self,
        spline: &BivariateSpline<CudaRuntime>,
        xi: &Tensor<CudaRuntime>,
        yi: &Tensor<CudaRuntime>,
    ) -> InterpolateResult<Tensor<CudaRuntime>> {
        rect_bivariate_spline_evaluate_impl(self, spline, xi, yi)
    }

    fn rect_bivariate_spline_evaluate_grid(
        &self,
        spline: &BivariateSpline<CudaRuntime>,
        xi: &Tensor<CudaRuntime>,
        yi: &Tensor<CudaRuntime>,
    ) -> InterpolateResult<Tensor<CudaRuntime>> {
        rect_bivariate_spline_evaluate_grid_impl(self, spline, xi, yi)
    }
}
