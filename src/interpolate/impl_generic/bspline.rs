//! 1D B-spline building blocks shared by the bivariate surface (fully on-device).
//!
//! Knot placement, batched basis evaluation via the Cox-de Boor recurrence,
//! and the axis checks the surface fit runs before solving.

use crate::interpolate::error::{InterpolateError, InterpolateResult};
use numr::ops::{CompareOps, ScalarOps};
use numr::prelude::DType;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

// ============ Axis checks ============

/// Reject an axis whose samples are not strictly increasing.
///
/// Only a single scalar leaves the device, for control flow.
pub(crate) fn ensure_strictly_increasing<R, C>(
    client: &C,
    x: &Tensor<R>,
    context: &str,
) -> InterpolateResult<()>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let n = x.shape()[0];
    if n < 2 {
        return Ok(());
    }

    let dx = client.sub(
        &x.narrow(0, 1, n - 1)?.contiguous(),
        &x.narrow(0, 0, n - 1)?.contiguous(),
    )?;
    let zero_dx = Tensor::zeros(&[n - 1], DType::F64, client.device());
    let non_pos = client.le(&dx, &zero_dx)?;
    let bad_count = client.sum(&non_pos, &[0], false)?;
    if bad_count.item::<f64>()? > 0.0 {
        return Err(InterpolateError::NotMonotonic {
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Clamp query coordinates into `[knots[0], knots[last]]`.
pub(crate) fn clamp_to_knot_span<R, C>(
    client: &C,
    xi: &Tensor<R>,
    knots: &Tensor<R>,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let m = xi.shape()[0];
    let n_knots = knots.shape()[0];

    let lo = knots
        .narrow(0, 0, 1)?
        .contiguous()
        .broadcast_to(&[m])?
        .contiguous();
    let hi = knots
        .narrow(0, n_knots - 1, 1)?
        .contiguous()
        .broadcast_to(&[m])?
        .contiguous();

    let above_lo = client.maximum(&xi.contiguous(), &lo)?;
    Ok(client.minimum(&above_lo, &hi)?)
}

// ============ Core computation: batched basis matrix ============

/// Compute the B-spline basis matrix [m, n_coeffs] on-device.
///
/// Uses the Cox-de Boor recurrence with batched tensor operations:
/// 1. Degree-0 basis via element-wise comparison (broadcasting)
/// 2. Recurrence for degrees 1..k via narrow + broadcast + safe division
///
/// Points at or beyond the last knot are assigned to the last non-empty span.
pub(crate) fn compute_basis_matrix<R, C>(
    client: &C,
    x: &Tensor<R>,
    knots: &Tensor<R>,
    degree: usize,
    n_coeffs: usize,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let device = client.device();
    let m = x.shape()[0];
    let n_knots = knots.shape()[0];
    let n_basis_0 = n_knots - 1;

    let x_col = x.reshape(&[m, 1])?.contiguous();

    // Degree 0: B0[i,j] = 1 if knots[j] <= x[i] < knots[j+1]
    let knots_left = knots
        .narrow(0, 0, n_basis_0)?
        .contiguous()
        .reshape(&[1, n_basis_0])?;
    let knots_right = knots
        .narrow(0, 1, n_basis_0)?
        .contiguous()
        .reshape(&[1, n_basis_0])?;

    let x_broad = x_col.broadcast_to(&[m, n_basis_0])?.contiguous();
    let kl_broad = knots_left.broadcast_to(&[m, n_basis_0])?.contiguous();
    let kr_broad = knots_right.broadcast_to(&[m, n_basis_0])?.contiguous();

    let ge_left = client.ge(&x_broad, &kl_broad)?;
    let lt_right = client.lt(&x_broad, &kr_broad)?;
    let in_span = client.mul(&ge_left, &lt_right)?;

    // x == knots[last] falls outside every half-open span
    let right_span_idx = n_knots - degree - 2;
    let idx = client.arange(0.0, n_basis_0 as f64, 1.0, DType::F64)?;
    let target = Tensor::full_scalar(&[n_basis_0], DType::F64, right_span_idx as f64, device);
    let right_col_mask = client.eq(&idx, &target)?;

    let last_knot = knots
        .narrow(0, n_knots - 1, 1)?
        .contiguous()
        .reshape(&[1])?;
    let at_right = client.ge(&x.contiguous(), &last_knot.broadcast_to(&[m])?.contiguous())?;

    let right_correction = client.mul(
        &at_right
            .reshape(&[m, 1])?
            .broadcast_to(&[m, n_basis_0])?
            .contiguous(),
        &right_col_mask
            .reshape(&[1, n_basis_0])?
            .broadcast_to(&[m, n_basis_0])?
            .contiguous(),
    )?;

    let mut basis = client.maximum(&in_span, &right_correction)?;

    let eps_val = Tensor::full_scalar(&[1], DType::F64, 1e-300, device);

    for p in 1..=degree {
        let n_active = n_knots - p - 1;

        let basis_left = basis.narrow(1, 0, n_active)?.contiguous();
        let basis_right = basis.narrow(1, 1, n_active)?.contiguous();
        let eps_broad = eps_val.broadcast_to(&[1, n_active])?.contiguous();
        let zero_1n = Tensor::zeros(&[1, n_active], DType::F64, device);

        // w1[j] = (x - knots[j]) / (knots[j+p] - knots[j])
        let kj = knots
            .narrow(0, 0, n_active)?
            .contiguous()
            .reshape(&[1, n_active])?;
        let kjp = knots
            .narrow(0, p, n_active)?
            .contiguous()
            .reshape(&[1, n_active])?;
        let w1 = safe_ratio(
            client,
            &client.sub(
                &x_col.broadcast_to(&[m, n_active])?.contiguous(),
                &kj.broadcast_to(&[m, n_active])?.contiguous(),
            )?,
            &client.sub(&kjp, &kj)?,
            &eps_broad,
            &zero_1n,
            m,
        )?;

        // w2[j] = (knots[j+p+1] - x) / (knots[j+p+1] - knots[j+1])
        let kj1 = knots
            .narrow(0, 1, n_active)?
            .contiguous()
            .reshape(&[1, n_active])?;
        let kjp1 = knots
            .narrow(0, p + 1, n_active)?
            .contiguous()
            .reshape(&[1, n_active])?;
        let w2 = safe_ratio(
            client,
            &client.sub(
                &kjp1.broadcast_to(&[m, n_active])?.contiguous(),
                &x_col.broadcast_to(&[m, n_active])?.contiguous(),
            )?,
            &client.sub(&kjp1, &kj1)?,
            &eps_broad,
            &zero_1n,
            m,
        )?;

        let new_active = client.add(
            &client.mul(&w1, &basis_left)?,
            &client.mul(&w2, &basis_right)?,
        )?;

        // Pad back to n_basis_0 columns for the next degree
        basis = if n_active < n_basis_0 {
            let padding = Tensor::zeros(&[m, n_basis_0 - n_active], DType::F64, device);
            client.cat(&[&new_active, &padding], 1)?
        } else {
            new_active
        };
    }

    Ok(basis.narrow(1, 0, n_coeffs)?.contiguous())
}

/// `numer / denom` with zero where the knot span is empty (0/0 := 0).
///
/// `numer` is `[m, n]`, `denom` is `[1, n]`.
fn safe_ratio<R, C>(
    client: &C,
    numer: &Tensor<R>,
    denom: &Tensor<R>,
    eps: &Tensor<R>,
    zero: &Tensor<R>,
    m: usize,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + CompareOps<R> + RuntimeClient<R>,
{
    let n = denom.shape()[1];
    let abs_d = client.abs(denom)?;
    let d_safe = client.maximum(&abs_d, eps)?;
    let mask = client.gt(&abs_d, zero)?;
    Ok(client.mul(
        &client.div(numer, &d_safe.broadcast_to(&[m, n])?.contiguous())?,
        &mask.broadcast_to(&[m, n])?.contiguous(),
    )?)
}

// ============ Knot vector construction (on-device) ============

/// Build the interpolating knot vector on-device.
///
/// `degree + 1` copies of each end point; interior knots sit on the samples
/// `x[(k+1)/2 ..]`, skipping the samples nearest each end. For odd degrees
/// this is the not-a-knot placement. Yields exactly `n` coefficients for
/// `n` samples.
pub(crate) fn build_not_a_knot_vector<R, C>(
    client: &C,
    x: &Tensor<R>,
    degree: usize,
) -> InterpolateResult<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: ScalarOps<R> + RuntimeClient<R>,
{
    let n = x.shape()[0];
    let k = degree;
    let x_first = x.narrow(0, 0, 1)?.contiguous();
    let x_last = x.narrow(0, n - 1, 1)?.contiguous();
    let first_rep = x_first.broadcast_to(&[k + 1])?.contiguous();
    let last_rep = x_last.broadcast_to(&[k + 1])?.contiguous();

    let n_interior = n.saturating_sub(k + 1);
    let knots = if n_interior == 0 {
        client.cat(&[&first_rep, &last_rep], 0)?
    } else {
        let interior = x.narrow(0, (k + 1) / 2, n_interior)?.contiguous();
        client.cat(&[&first_rep, &interior, &last_rep], 0)?
    };

    Ok(knots)
}
