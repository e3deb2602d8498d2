//! Legacy `interp2d`-style interpolation on a rectangular grid.
//!
//! [`Interp2d`] accepts the classic calling convention: unsorted axes, a
//! value table indexed `[y, x]`, and a kind name where anything other than
//! `"cubic"` means linear. It sorts and reorients the grid once, fits a
//! [`BivariateSpline`] through [`RectBivariateSplineAlgorithms`], and then
//! dispatches each evaluation on the shapes of its arguments:
//!
//! | `new_x`, `new_y`                   | Result                               |
//! |------------------------------------|--------------------------------------|
//! | two scalars                        | scalar                               |
//! | two 1D tensors of different length | grid `[len(new_y), len(new_x)]`      |
//! | anything else                      | paired points, shaped like `new_x`   |
//!
//! In paired mode a `new_y` holding a single value is repeated for every
//! element of `new_x`.
//!
//! Two 1D tensors of *equal* length are always paired pointwise. Call
//! [`Interp2d::evaluate_grid`] when they are meant as grid axes.

mod grid;
mod query;

pub use grid::{NormalizedGrid, normalize_grid, sort_permutation};
pub use query::{Interp2dQuery, QueryArg, QueryMode};

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::DType;
use crate::interpolate::error::{InterpolateError, InterpolateResult};
use crate::interpolate::traits::rect_bivariate_spline::{
    BivariateSpline, RectBivariateSplineAlgorithms,
};
use log::{debug, trace};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Spline kind for [`Interp2d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interp2dKind {
    /// Degree 1 in both directions.
    #[default]
    Linear,
    /// Degree 3 in both directions.
    Cubic,
}

impl Interp2dKind {
    /// Parse a kind name. `"cubic"` selects [`Cubic`](Self::Cubic); every
    /// other name, recognized or not, selects [`Linear`](Self::Linear).
    pub fn from_name(name: &str) -> Self {
        match name {
            "cubic" => Self::Cubic,
            _ => Self::Linear,
        }
    }

    /// Polynomial degree used along both axes.
    pub fn degree(self) -> usize {
        match self {
            Self::Linear => 1,
            Self::Cubic => 3,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

impl From<&str> for Interp2dKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl FromStr for Interp2dKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Interp2dKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an [`Interp2d`] evaluation.
#[derive(Debug, Clone)]
pub enum Interp2dOutput<R: Runtime<DType = DType>> {
    /// Scalar query, or a pointwise query whose x argument was a scalar.
    Scalar(f64),
    /// Grid `[len(new_y), len(new_x)]` or pointwise values shaped like `new_x`.
    Array(Tensor<R>),
}

impl<R: Runtime<DType = DType>> Interp2dOutput<R> {
    /// The value of a scalar result.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Array(_) => None,
        }
    }

    /// The tensor of an array result.
    pub fn into_tensor(self) -> Option<Tensor<R>> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(t) => Some(t),
        }
    }

    /// Result shape; empty for scalars.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Array(t) => t.shape().to_vec(),
        }
    }

    /// Values in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Array(t) => t.contiguous().to_vec(),
        }
    }
}

/// Interpolator over a rectangular grid with the legacy `interp2d` calling
/// convention.
///
/// Holds the sorted axes and the fitted surface; evaluation never mutates it.
///
/// # Example
///
/// ```ignore
/// let x = Tensor::from_slice(&[2.0, 1.0, 3.0], &[3], &device);
/// let y = Tensor::from_slice(&[5.0, 4.0], &[2], &device);
/// let z = Tensor::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], &[2, 3], &device);
///
/// let interp = Interp2d::from_kind_name(&client, &x, &y, &z, "linear")?;
///
/// let point = interp.evaluate(&client, 1.0, 4.0)?;      // Scalar(50.0)
/// let grid = interp.evaluate(&client, &xs_3, &ys_2)?;   // Array of shape [2, 3]
/// ```
#[derive(Debug, Clone)]
pub struct Interp2d<R: Runtime<DType = DType>> {
    x: Tensor<R>,
    y: Tensor<R>,
    kind: Interp2dKind,
    spline: BivariateSpline<R>,
}

impl<R: Runtime<DType = DType>> Interp2d<R> {
    /// Build an interpolator from an `interp2d`-style grid.
    ///
    /// # Arguments
    ///
    /// * `client` - Runtime client providing the spline backend
    /// * `x` - 1D tensor of `N` distinct x samples, any order
    /// * `y` - 1D tensor of `M` distinct y samples, any order
    /// * `z` - 2D tensor of values, shape `[M, N]` (indexed `[y, x]`)
    /// * `kind` - Spline kind
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `x` or `y` is not 1D
    /// - `ShapeMismatch` if `z` is not `[len(y), len(x)]`
    /// - Any error of [`RectBivariateSplineAlgorithms::rect_bivariate_spline_fit`],
    ///   unchanged (too few points for the degree, repeated samples)
    pub fn new<C>(
        client: &C,
        x: &Tensor<R>,
        y: &Tensor<R>,
        z: &Tensor<R>,
        kind: Interp2dKind,
    ) -> InterpolateResult<Self>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        if x.shape().len() != 1 || y.shape().len() != 1 {
            return Err(InterpolateError::InvalidParameter {
                parameter: "x, y".to_string(),
                message: "x and y must be 1D tensors".to_string(),
            });
        }

        let nx = x.shape()[0];
        let ny = y.shape()[0];
        if z.shape().len() != 2 || z.shape()[0] != ny || z.shape()[1] != nx {
            return Err(InterpolateError::ShapeMismatch {
                expected: nx * ny,
                actual: z.shape().iter().product(),
                context: "Interp2d::new: z must be [len(y), len(x)]".to_string(),
            });
        }

        let x_data: Vec<f64> = x.contiguous().to_vec();
        let y_data: Vec<f64> = y.contiguous().to_vec();
        let z_data: Vec<f64> = z.contiguous().to_vec();
        let grid = normalize_grid(&x_data, &y_data, &z_data);

        let device = client.device();
        let x_sorted = Tensor::from_slice(&grid.x, &[nx], device);
        let y_sorted = Tensor::from_slice(&grid.y, &[ny], device);
        let z_xy = Tensor::from_slice(&grid.z, &[nx, ny], device);

        let degree = kind.degree();
        let spline =
            client.rect_bivariate_spline_fit(&x_sorted, &y_sorted, &z_xy, degree, degree)?;

        debug!(
            "Interp2d: fitted {} surface on {}x{} grid (resorted x: {}, resorted y: {})",
            kind, nx, ny, grid.resorted_x, grid.resorted_y
        );

        Ok(Self {
            x: x_sorted,
            y: y_sorted,
            kind,
            spline,
        })
    }

    /// Build an interpolator from a kind name; unknown names mean linear.
    pub fn from_kind_name<C>(
        client: &C,
        x: &Tensor<R>,
        y: &Tensor<R>,
        z: &Tensor<R>,
        kind: &str,
    ) -> InterpolateResult<Self>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        Self::new(client, x, y, z, Interp2dKind::from_name(kind))
    }

    /// Sorted x axis.
    pub fn x(&self) -> &Tensor<R> {
        &self.x
    }

    /// Sorted y axis.
    pub fn y(&self) -> &Tensor<R> {
        &self.y
    }

    /// Spline kind the surface was fitted with.
    pub fn kind(&self) -> Interp2dKind {
        self.kind
    }

    /// The fitted surface, indexed `[x, y]`.
    pub fn spline(&self) -> &BivariateSpline<R> {
        &self.spline
    }

    /// Evaluate with shape-based dispatch.
    ///
    /// Each argument may be an `f64` or a `&Tensor<R>` of any rank. See the
    /// module docs for the dispatch table.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when a pointwise query pairs arguments with different
    /// element counts and `new_y` does not hold exactly one value.
    pub fn evaluate<'a, C>(
        &self,
        client: &C,
        new_x: impl Into<QueryArg<'a, R>>,
        new_y: impl Into<QueryArg<'a, R>>,
    ) -> InterpolateResult<Interp2dOutput<R>>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
        R: 'a,
    {
        let query = Interp2dQuery::<R>::classify(client, new_x, new_y)?;
        self.evaluate_query(client, &query)
    }

    /// Evaluate an already classified query.
    pub fn evaluate_query<C>(
        &self,
        client: &C,
        query: &Interp2dQuery<R>,
    ) -> InterpolateResult<Interp2dOutput<R>>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        trace!("Interp2d: evaluating {:?} query", query.mode());

        match query {
            Interp2dQuery::Scalar { x, y } => {
                let device = client.device();
                let xi = Tensor::from_slice(&[*x], &[1], device);
                let yi = Tensor::from_slice(&[*y], &[1], device);
                let values = client.rect_bivariate_spline_evaluate(&self.spline, &xi, &yi)?;
                Ok(Interp2dOutput::Scalar(single_value(&values)?))
            }
            Interp2dQuery::Grid { x, y } => {
                let (mx, my) = (x.shape()[0], y.shape()[0]);
                if mx == 0 || my == 0 {
                    let empty = Tensor::zeros(&[my, mx], DType::F64, client.device());
                    return Ok(Interp2dOutput::Array(empty));
                }
                // Surface grid is [len(x), len(y)]; callers expect [len(y), len(x)]
                let grid = client.rect_bivariate_spline_evaluate_grid(&self.spline, x, y)?;
                Ok(Interp2dOutput::Array(grid.transpose(0, 1)?.contiguous()))
            }
            Interp2dQuery::Pointwise { x, y, shape } => {
                let flat = client.rect_bivariate_spline_evaluate(&self.spline, x, y)?;
                match shape {
                    Some(shape) => Ok(Interp2dOutput::Array(flat.reshape(shape)?)),
                    None => Ok(Interp2dOutput::Scalar(single_value(&flat)?)),
                }
            }
        }
    }

    /// Evaluate at a single point.
    pub fn evaluate_scalar<C>(&self, client: &C, x: f64, y: f64) -> InterpolateResult<f64>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        let query = Interp2dQuery::Scalar { x, y };
        match self.evaluate_query(client, &query)? {
            Interp2dOutput::Scalar(v) => Ok(v),
            Interp2dOutput::Array(t) => single_value(&t),
        }
    }

    /// Evaluate on the outer product of two 1D axes, whatever their lengths.
    ///
    /// Returns a tensor of shape `[len(ys), len(xs)]`.
    pub fn evaluate_grid<C>(
        &self,
        client: &C,
        xs: &Tensor<R>,
        ys: &Tensor<R>,
    ) -> InterpolateResult<Tensor<R>>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        let query = Interp2dQuery::grid(xs, ys)?;
        self.evaluate_array(client, &query)
    }

    /// Evaluate at paired coordinates `(xs[i], ys[i])`.
    ///
    /// Returns a tensor shaped like `xs`; `ys` must have the same number of
    /// elements.
    pub fn evaluate_points<C>(
        &self,
        client: &C,
        xs: &Tensor<R>,
        ys: &Tensor<R>,
    ) -> InterpolateResult<Tensor<R>>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        let n = xs.shape().iter().product::<usize>();
        let query = Interp2dQuery::Pointwise {
            x: xs.contiguous().reshape(&[n])?,
            y: ys.contiguous().reshape(&[ys.shape().iter().product::<usize>()])?,
            shape: Some(xs.shape().to_vec()),
        };
        self.evaluate_array(client, &query)
    }

    fn evaluate_array<C>(
        &self,
        client: &C,
        query: &Interp2dQuery<R>,
    ) -> InterpolateResult<Tensor<R>>
    where
        C: RectBivariateSplineAlgorithms<R> + RuntimeClient<R>,
    {
        match self.evaluate_query(client, query)? {
            Interp2dOutput::Array(t) => Ok(t),
            Interp2dOutput::Scalar(v) => Ok(Tensor::from_slice(&[v], &[1], client.device())),
        }
    }
}

fn single_value<R: Runtime<DType = DType>>(values: &Tensor<R>) -> InterpolateResult<f64> {
    let data: Vec<f64> = values.contiguous().to_vec();
    match data.as_slice() {
        [v] => Ok(*v),
        _ => Err(InterpolateError::ShapeMismatch {
            expected: 1,
            actual: data.len(),
            context: "Interp2d: scalar result".to_string(),
        }),
    }
}
