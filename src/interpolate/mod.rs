//! Interpolation on rectangular grids
//!
//! The [`Interp2d`] shim reproduces the legacy `interp2d` calling convention
//! on top of the tensor-product B-spline backend exposed by
//! [`RectBivariateSplineAlgorithms`]. The backend works across numr runtimes
//! (CPU always, CUDA behind the `cuda` feature).
//!
//! # Module Organization
//!
//! - [`interp2d`] - Axis sorting, table reorientation and query dispatch
//! - [`traits`] - Backend algorithm traits and the fitted surface type
//! - [`impl_generic`] - Runtime-generic backend implementations
//!
//! # Example
//!
//! ```ignore
//! use interp2d::interpolate::{Interp2d, Interp2dKind};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let interp = Interp2d::new(&client, &x, &y, &z, Interp2dKind::Cubic)?;
//!
//! // Different lengths: grid of shape [len(yi), len(xi)]
//! let grid = interp.evaluate(&client, &xi, &yi)?;
//! ```

mod cpu;
mod error;
pub mod impl_generic;
pub mod interp2d;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

pub use error::{InterpolateError, InterpolateResult};
pub use interp2d::{Interp2d, Interp2dKind, Interp2dOutput, Interp2dQuery, QueryArg, QueryMode};
pub use traits::rect_bivariate_spline::{BivariateSpline, RectBivariateSplineAlgorithms};
