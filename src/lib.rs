//! interp2d - Legacy 2D interpolation on rectangular grids
//!
//! Reproduces the calling convention of the classic `interp2d(x, y, z, kind)`
//! routine on top of a tensor-product B-spline surface. Input axes may be
//! unsorted, the value table is indexed `[y, x]`, and the returned
//! interpolator decides per call whether a query is a single point, an
//! outer-product grid, or a set of paired coordinates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Interp2d (shim)                       │
//! │   axis sorting, [y,x] → [x,y] reorientation, dispatch   │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ fit / evaluate / evaluate_grid
//! ┌──────────────────────────▼──────────────────────────────┐
//! │           RectBivariateSplineAlgorithms                  │
//! │        (tensor-product B-spline on numr tensors)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | CUDA 12.x, numr/cuda |
//!
//! # Example
//!
//! ```ignore
//! use interp2d::interpolate::{Interp2d, Interp2dKind, Interp2dOutput};
//! use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let x = Tensor::<CpuRuntime>::from_slice(&[2.0, 1.0, 3.0], &[3], &device);
//! let y = Tensor::<CpuRuntime>::from_slice(&[5.0, 4.0], &[2], &device);
//! let z = Tensor::<CpuRuntime>::from_slice(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], &[2, 3], &device);
//!
//! let interp = Interp2d::new(&client, &x, &y, &z, Interp2dKind::Linear)?;
//! let value = interp.evaluate_scalar(&client, 1.0, 4.0)?; // 50.0
//! ```

pub mod interpolate;

pub use interpolate::{
    Interp2d, Interp2dKind, Interp2dOutput, Interp2dQuery, InterpolateError, InterpolateResult,
    QueryArg, QueryMode,
};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
