pub mod rect_bivariate_spline;
