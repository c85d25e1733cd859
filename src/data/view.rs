use ndarray::{s, Array1, Array2, ArrayView2};

// ---------------------------------------------------------------------------
// Display orientation
// ---------------------------------------------------------------------------

/// Vertically mirrored copy for rendering: row 0 becomes the last row,
/// columns and values untouched. The source is never mutated, and
/// index-based slicing always happens on the un-mirrored array.
pub fn flip_rows(array: &Array2<f32>) -> Array2<f32> {
    array.slice(s![..;-1, ..]).to_owned()
}

// ---------------------------------------------------------------------------
// Clamped row / column slices
// ---------------------------------------------------------------------------

/// Saturate a requested index into `[0, len - 1]`. Scrubbing a slice
/// control past either end keeps producing the edge slice instead of
/// failing, so the caller never has to pre-validate.
fn clamp_index(index: i64, len: usize) -> usize {
    index.clamp(0, len as i64 - 1) as usize
}

/// Full row at the clamped row index. A zero-row array yields an empty
/// slice; there is no row to saturate onto.
pub fn row_slice(array: ArrayView2<'_, f32>, row: i64) -> Array1<f32> {
    if array.nrows() == 0 {
        return Array1::zeros(0);
    }
    let r = clamp_index(row, array.nrows());
    array.row(r).to_owned()
}

/// Full column at the clamped column index.
pub fn col_slice(array: ArrayView2<'_, f32>, col: i64) -> Array1<f32> {
    if array.ncols() == 0 {
        return Array1::zeros(0);
    }
    let c = clamp_index(col, array.ncols());
    array.column(c).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn double_flip_is_identity() {
        let wf = arr2(&[[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(flip_rows(&flip_rows(&wf)), wf);
    }

    #[test]
    fn flip_reverses_rows_only() {
        let wf = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let flipped = flip_rows(&wf);
        assert_eq!(flipped, arr2(&[[3.0f32, 4.0], [1.0, 2.0]]));
        // Source untouched.
        assert_eq!(wf[[0, 0]], 1.0);
    }

    #[test]
    fn out_of_range_indices_saturate() {
        let wf = arr2(&[[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);

        for r in [-1_000_000i64, -1, 0, 1, 2, 3, 1_000_000] {
            let clamped = r.clamp(0, 2);
            assert_eq!(row_slice(wf.view(), r), row_slice(wf.view(), clamped));
        }
        for c in [-5i64, 0, 1, 7] {
            let clamped = c.clamp(0, 1);
            assert_eq!(col_slice(wf.view(), c), col_slice(wf.view(), clamped));
        }
    }

    #[test]
    fn synthetic_waterfall_end_to_end() {
        // Row r holds the constant value r.
        let rows = 5000;
        let cols = 1500;
        let wf = ndarray::Array2::from_shape_fn((rows, cols), |(r, _)| r as f32);

        let row7 = row_slice(wf.view(), 7);
        assert_eq!(row7.len(), cols);
        assert!(row7.iter().all(|&v| v == 7.0));

        let col3 = col_slice(wf.view(), 3);
        assert_eq!(col3.len(), rows);
        for (r, &v) in col3.iter().enumerate() {
            assert_eq!(v, r as f32);
        }

        assert_eq!(row_slice(wf.view(), -1), row_slice(wf.view(), 0));
        assert_eq!(row_slice(wf.view(), 999_999), row_slice(wf.view(), 4999));
    }
}
