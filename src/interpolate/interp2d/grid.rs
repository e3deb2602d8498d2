//! Host-side grid normalization.
//!
//! Sorting and reorientation are expressed as explicit index arrays so that
//! the x-sort, the y-sort and the `[y, x]` → `[x, y]` transpose happen in a
//! single gather over the value table.

/// Grid with ascending axes and a value table indexed `[x, y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGrid {
    /// Ascending x samples.
    pub x: Vec<f64>,
    /// Ascending y samples.
    pub y: Vec<f64>,
    /// Row-major values of shape `[x.len(), y.len()]`.
    pub z: Vec<f64>,
    /// Whether x had to be permuted.
    pub resorted_x: bool,
    /// Whether y had to be permuted.
    pub resorted_y: bool,
}

/// Ascending argsort of `axis`, or `None` if no sample is smaller than its
/// predecessor.
pub fn sort_permutation(axis: &[f64]) -> Option<Vec<usize>> {
    if !axis.windows(2).any(|w| w[1] < w[0]) {
        return None;
    }
    let mut perm: Vec<usize> = (0..axis.len()).collect();
    perm.sort_by(|&a, &b| axis[a].total_cmp(&axis[b]));
    Some(perm)
}

/// Sort both axes and transpose the value table.
///
/// `z` is row-major with shape `[y.len(), x.len()]`; the caller checks the
/// length. The output satisfies `out[i, j] = z[perm_y[j], perm_x[i]]`.
pub fn normalize_grid(x: &[f64], y: &[f64], z: &[f64]) -> NormalizedGrid {
    let nx = x.len();
    let ny = y.len();
    debug_assert_eq!(z.len(), nx * ny);

    let perm_x = sort_permutation(x);
    let perm_y = sort_permutation(y);
    let resorted_x = perm_x.is_some();
    let resorted_y = perm_y.is_some();
    let perm_x = perm_x.unwrap_or_else(|| (0..nx).collect());
    let perm_y = perm_y.unwrap_or_else(|| (0..ny).collect());

    let mut z_xy = Vec::with_capacity(nx * ny);
    for &col in &perm_x {
        for &row in &perm_y {
            z_xy.push(z[row * nx + col]);
        }
    }

    NormalizedGrid {
        x: perm_x.iter().map(|&i| x[i]).collect(),
        y: perm_y.iter().map(|&j| y[j]).collect(),
        z: z_xy,
        resorted_x,
        resorted_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_axis_has_no_permutation() {
        assert_eq!(sort_permutation(&[1.0, 2.0, 3.0]), None);
        assert_eq!(sort_permutation(&[]), None);
        assert_eq!(sort_permutation(&[4.0]), None);
    }

    #[test]
    fn test_argsort() {
        assert_eq!(sort_permutation(&[2.0, 1.0, 3.0]), Some(vec![1, 0, 2]));
        assert_eq!(sort_permutation(&[5.0, 4.0]), Some(vec![1, 0]));
    }

    #[test]
    fn test_normalize_reference_grid() {
        // z indexed [y, x] before sorting
        let grid = normalize_grid(
            &[2.0, 1.0, 3.0],
            &[5.0, 4.0],
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        );

        assert_eq!(grid.x, vec![1.0, 2.0, 3.0]);
        assert_eq!(grid.y, vec![4.0, 5.0]);
        assert!(grid.resorted_x);
        assert!(grid.resorted_y);
        // [x, y]: (1,4)=50 (1,5)=20 (2,4)=40 (2,5)=10 (3,4)=60 (3,5)=30
        assert_eq!(grid.z, vec![50.0, 20.0, 40.0, 10.0, 60.0, 30.0]);
    }

    #[test]
    fn test_sorted_input_is_plain_transpose() {
        let grid = normalize_grid(&[0.0, 1.0, 2.0], &[0.0, 1.0], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert!(!grid.resorted_x);
        assert!(!grid.resorted_y);
        assert_eq!(grid.z, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_axis_sorts_are_order_insensitive() {
        let x = [3.0, 1.0, 2.0];
        let y = [9.0, 7.0, 8.0, 6.0];
        let z: Vec<f64> = (0..12).map(f64::from).collect();

        // Sort y rows first by hand, then normalize: same table either way
        let perm_y = sort_permutation(&y).unwrap();
        let y_sorted: Vec<f64> = perm_y.iter().map(|&j| y[j]).collect();
        let z_rows: Vec<f64> = perm_y
            .iter()
            .flat_map(|&row| z[row * 3..row * 3 + 3].to_vec())
            .collect();

        let direct = normalize_grid(&x, &y, &z);
        let staged = normalize_grid(&x, &y_sorted, &z_rows);

        assert_eq!(direct.x, staged.x);
        assert_eq!(direct.y, staged.y);
        assert_eq!(direct.z, staged.z);
    }
}
