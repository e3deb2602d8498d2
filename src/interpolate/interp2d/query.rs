//! Query arguments and shape-based dispatch.
use crate::DType;

use crate::interpolate::error::{InterpolateError, InterpolateResult};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// One coordinate argument of an evaluation call.
///
/// A rank-0 tensor behaves exactly like `Scalar`.
#[derive(Debug)]
pub enum QueryArg<'a, R: Runtime<DType = DType>> {
    /// A bare number.
    Scalar(f64),
    /// A tensor of any rank.
    Tensor(&'a Tensor<R>),
}

impl<R: Runtime<DType = DType>> Clone for QueryArg<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Runtime<DType = DType>> Copy for QueryArg<'_, R> {}

impl<R: Runtime<DType = DType>> From<f64> for QueryArg<'_, R> {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl<'a, R: Runtime<DType = DType>> From<&'a Tensor<R>> for QueryArg<'a, R> {
    fn from(tensor: &'a Tensor<R>) -> Self {
        Self::Tensor(tensor)
    }
}

impl<R: Runtime<DType = DType>> QueryArg<'_, R> {
    /// Shape of the argument; empty for scalars.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Tensor(t) => t.shape().to_vec(),
        }
    }

    /// Number of coordinates carried by the argument.
    pub fn numel(&self) -> usize {
        self.shape().iter().product()
    }

    fn scalar_value(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Tensor(t) if t.shape().is_empty() => {
                let data: Vec<f64> = t.contiguous().to_vec();
                data.first().copied()
            }
            Self::Tensor(_) => None,
        }
    }

    /// The only value of a one-element argument, whatever its rank.
    fn single_value(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Tensor(t) if self.numel() == 1 => {
                let data: Vec<f64> = t.contiguous().to_vec();
                data.first().copied()
            }
            Self::Tensor(_) => None,
        }
    }

    fn to_flat(&self, device: &R::Device) -> InterpolateResult<Tensor<R>> {
        match self {
            Self::Scalar(v) => Ok(Tensor::from_slice(&[*v], &[1], device)),
            Self::Tensor(t) => Ok(t.contiguous().reshape(&[self.numel()])?),
        }
    }
}

/// Calling convention chosen for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// One point, one value.
    Scalar,
    /// Outer product of two 1D axes, result `[len(y), len(x)]`.
    Grid,
    /// Paired coordinates, result shaped like the x argument.
    Pointwise,
}

/// A classified evaluation request.
#[derive(Debug, Clone)]
pub enum Interp2dQuery<R: Runtime<DType = DType>> {
    /// Both arguments are scalars.
    Scalar { x: f64, y: f64 },
    /// Both arguments are 1D and their lengths differ.
    Grid { x: Tensor<R>, y: Tensor<R> },
    /// Everything else. `x` and `y` are flattened, with a one-element y
    /// repeated to the length of x; `shape` is the shape of the x argument,
    /// `None` when it was a scalar.
    Pointwise {
        x: Tensor<R>,
        y: Tensor<R>,
        shape: Option<Vec<usize>>,
    },
}

impl<R: Runtime<DType = DType>> Interp2dQuery<R> {
    /// Decide the calling convention from the shapes of the two arguments.
    ///
    /// Equal-length 1D arguments are paired pointwise, never treated as a
    /// grid. Use [`Interp2d::evaluate_grid`](super::Interp2d::evaluate_grid)
    /// to force grid evaluation.
    pub fn classify<'a, C: RuntimeClient<R>>(
        client: &C,
        new_x: impl Into<QueryArg<'a, R>>,
        new_y: impl Into<QueryArg<'a, R>>,
    ) -> InterpolateResult<Self>
    where
        R: 'a,
    {
        let new_x = new_x.into();
        let new_y = new_y.into();

        if let (Some(x), Some(y)) = (new_x.scalar_value(), new_y.scalar_value()) {
            return Ok(Self::Scalar { x, y });
        }

        let device = client.device();
        let x_shape = new_x.shape();
        let y_shape = new_y.shape();

        if x_shape.len() == 1 && y_shape.len() == 1 && x_shape[0] != y_shape[0] {
            return Ok(Self::Grid {
                x: new_x.to_flat(device)?,
                y: new_y.to_flat(device)?,
            });
        }

        // A single y value is repeated along every x
        let n = new_x.numel();
        let y = match new_y.single_value() {
            Some(v) if n != 1 => Tensor::full_scalar(&[n], DType::F64, v, device),
            _ => new_y.to_flat(device)?,
        };

        Ok(Self::Pointwise {
            x: new_x.to_flat(device)?,
            y,
            shape: (!x_shape.is_empty()).then_some(x_shape),
        })
    }

    /// Grid query over two explicit axes, regardless of their lengths.
    pub fn grid(x: &Tensor<R>, y: &Tensor<R>) -> InterpolateResult<Self> {
        Ok(Self::Grid {
            x: flat_axis(x, "x")?,
            y: flat_axis(y, "y")?,
        })
    }

    /// Calling convention of this query.
    pub fn mode(&self) -> QueryMode {
        match self {
            Self::Scalar { .. } => QueryMode::Scalar,
            Self::Grid { .. } => QueryMode::Grid,
            Self::Pointwise { .. } => QueryMode::Pointwise,
        }
    }
}

fn flat_axis<R: Runtime<DType = DType>>(
    axis: &Tensor<R>,
    name: &str,
) -> InterpolateResult<Tensor<R>> {
    if axis.shape().len() != 1 {
        return Err(InterpolateError::InvalidParameter {
            parameter: name.to_string(),
            message: format!("grid axis must be 1D, got shape {:?}", axis.shape()),
        });
    }
    Ok(axis.contiguous())
}
