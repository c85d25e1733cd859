use ndarray::{Array1, Array2};

use super::DeriveError;

// ---------------------------------------------------------------------------
// Variance trace – activity per distance bin
// ---------------------------------------------------------------------------

/// Population variance of every column across all time frames (divisor
/// is the row count, not rows − 1). Accumulates in f64 so long captures
/// do not lose precision to cancellation.
///
/// Output length equals the column count.
pub fn variance_trace(waterfall: &Array2<f32>) -> Result<Array1<f32>, DeriveError> {
    let (rows, cols) = waterfall.dim();
    if rows == 0 || cols == 0 {
        return Err(DeriveError::EmptyInput { rows, cols });
    }

    let mut trace = Array1::<f32>::zeros(cols);
    for (c, column) in waterfall.columns().into_iter().enumerate() {
        let mean = column.iter().map(|&v| v as f64).sum::<f64>() / rows as f64;
        let var = column
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / rows as f64;
        trace[c] = var as f32;
    }

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn length_matches_column_count() {
        let wf = arr2(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let trace = variance_trace(&wf).unwrap();
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn constant_column_has_zero_variance() {
        let wf = arr2(&[[7.0f32, 1.0], [7.0, 2.0], [7.0, 3.0]]);
        let trace = variance_trace(&wf).unwrap();
        assert_eq!(trace[0], 0.0);
    }

    #[test]
    fn population_divisor_is_row_count() {
        // Column [1, 2, 3, 4]: mean 2.5, squared deviations sum 5.0,
        // population variance 5/4 = 1.25 (sample variance would be 5/3).
        let wf = arr2(&[[1.0f32], [2.0], [3.0], [4.0]]);
        let trace = variance_trace(&wf).unwrap();
        assert!((trace[0] - 1.25).abs() < 1e-6);
    }

    #[test]
    fn empty_input_is_rejected() {
        let wf = ndarray::Array2::<f32>::zeros((0, 0));
        assert_eq!(
            variance_trace(&wf),
            Err(DeriveError::EmptyInput { rows: 0, cols: 0 })
        );
    }
}
