pub mod bspline;
pub mod rect_bivariate_spline;

pub use rect_bivariate_spline::{
    rect_bivariate_spline_evaluate_grid_impl, rect_bivariate_spline_evaluate_impl,
    rect_bivariate_spline_fit_impl,
};
