use ndarray::Array2;
use rustfft::{num_complex::Complex32, FftPlanner};

use super::DeriveError;

// ---------------------------------------------------------------------------
// PSD waterfall – one periodogram per distance bin
// ---------------------------------------------------------------------------

/// Compute the one-sided power spectral density of every column of a
/// waterfall along the time (row) axis.
///
/// Each column is treated as a real signal sampled once per time frame:
/// rectangular window, column mean removed, then a length-`rows` FFT.
/// Density scaling at unit sample rate, so the frequency axis is
/// bin-indexed rather than Hz-scaled. All bins except DC — and, for
/// even row counts, Nyquist — carry the doubled one-sided power.
///
/// Output shape is `(rows / 2 + 1, cols)`.
pub fn compute_psd(waterfall: &Array2<f32>) -> Result<Array2<f32>, DeriveError> {
    let (rows, cols) = waterfall.dim();
    if rows == 0 || cols == 0 {
        return Err(DeriveError::EmptyInput { rows, cols });
    }

    let n_bins = rows / 2 + 1;
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(rows);

    let mut psd = Array2::<f32>::zeros((n_bins, cols));
    let mut buffer = vec![Complex32::ZERO; rows];
    let scale = 1.0 / rows as f32;

    for (c, column) in waterfall.columns().into_iter().enumerate() {
        let mean = (column.iter().map(|&v| v as f64).sum::<f64>() / rows as f64) as f32;
        for (slot, &v) in buffer.iter_mut().zip(column.iter()) {
            *slot = Complex32::new(v - mean, 0.0);
        }
        fft.process(&mut buffer);

        for k in 0..n_bins {
            let one_sided = k != 0 && !(rows % 2 == 0 && k == n_bins - 1);
            let factor = if one_sided { 2.0 } else { 1.0 };
            psd[[k, c]] = buffer[k].norm_sqr() * scale * factor;
        }
    }

    Ok(psd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn output_shape_is_half_spectrum_by_columns() {
        let wf = Array2::<f32>::zeros((100, 7));
        let psd = compute_psd(&wf).unwrap();
        assert_eq!(psd.dim(), (51, 7));

        let wf = Array2::<f32>::zeros((101, 3));
        let psd = compute_psd(&wf).unwrap();
        assert_eq!(psd.dim(), (51, 3));
    }

    #[test]
    fn zero_input_gives_negligible_psd() {
        let wf = Array2::<f32>::zeros((64, 5));
        let psd = compute_psd(&wf).unwrap();
        assert!(psd.iter().all(|&p| p.abs() < 1e-12));
    }

    #[test]
    fn constant_columns_carry_no_power() {
        // The column mean is removed, so a DC-only signal is silent.
        let wf = Array2::<f32>::from_elem((64, 3), 42.0);
        let psd = compute_psd(&wf).unwrap();
        assert!(psd.iter().all(|&p| p.abs() < 1e-6));
    }

    #[test]
    fn pure_tone_peaks_at_its_bin() {
        let n = 64;
        let tone_bin = 5;
        let mut wf = Array2::<f32>::zeros((n, 2));
        for r in 0..n {
            let phase = 2.0 * std::f32::consts::PI * tone_bin as f32 * r as f32 / n as f32;
            wf[[r, 0]] = phase.cos();
        }

        let psd = compute_psd(&wf).unwrap();

        let peak = psd
            .column(0)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, tone_bin);

        // Everything off the tone bin is leakage-free for an exact bin.
        for (k, &p) in psd.column(0).iter().enumerate() {
            if k != tone_bin {
                assert!(p < 1e-4, "bin {k} has stray power {p}");
            }
        }
        // The silent second column stays silent.
        assert!(psd.column(1).iter().all(|&p| p.abs() < 1e-12));
    }

    #[test]
    fn empty_input_is_rejected() {
        let wf = Array2::<f32>::zeros((0, 4));
        assert_eq!(
            compute_psd(&wf),
            Err(DeriveError::EmptyInput { rows: 0, cols: 4 })
        );

        let wf = Array2::<f32>::zeros((4, 0));
        assert!(compute_psd(&wf).is_err());
    }
}
