//! Digital Butterworth low-pass design.
//!
//! Analog prototype poles on the unit circle, frequency prewarping, scaling
//! to the cutoff, then the bilinear transform. All N zeros land on z = -1.

use std::f64::consts::PI;

use contracts::AcquisitionError;
use nalgebra::Complex;

/// Highest order accepted by the designer
pub const MAX_ORDER: usize = 16;

/// Transfer function coefficients `b / a`, highest power of z⁻¹ last
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    /// Numerator
    pub b: Vec<f64>,
    /// Denominator, `a[0] == 1`
    pub a: Vec<f64>,
}

impl FilterCoefficients {
    /// Gain at DC, H(z = 1)
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }
}

/// Design an `order`-th order low-pass with `cutoff_hz` at `sample_rate_hz`
///
/// # Errors
/// `FilterDesign` if the order is 0 or above [`MAX_ORDER`], the sample rate is
/// not positive, or the cutoff is not strictly between 0 and Nyquist.
pub fn butterworth_lowpass(
    order: usize,
    cutoff_hz: f64,
    sample_rate_hz: f64,
) -> Result<FilterCoefficients, AcquisitionError> {
    if order == 0 || order > MAX_ORDER {
        return Err(AcquisitionError::filter_design(format!(
            "order must be in 1..={MAX_ORDER}, got {order}"
        )));
    }
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(AcquisitionError::filter_design(format!(
            "sample rate must be > 0, got {sample_rate_hz}"
        )));
    }
    let nyquist = sample_rate_hz / 2.0;
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(AcquisitionError::filter_design(format!(
            "cutoff must satisfy 0 < cutoff < {nyquist} Hz (Nyquist), got {cutoff_hz}"
        )));
    }

    // Work on the normalized frequency axis where Nyquist = 1 and fs = 2
    let wn = cutoff_hz / nyquist;
    let fs = 2.0;
    let warped = 2.0 * fs * (PI * wn / fs).tan();

    let analog_poles: Vec<Complex<f64>> = prototype_poles(order)
        .into_iter()
        .map(|p| p * warped)
        .collect();
    let analog_gain = warped.powi(order as i32);

    let fs2 = Complex::new(2.0 * fs, 0.0);
    let digital_poles: Vec<Complex<f64>> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let denominator_product = analog_poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));
    let digital_gain = analog_gain * (Complex::new(1.0, 0.0) / denominator_product).re;

    let b = binomial_row(order)
        .into_iter()
        .map(|c| c * digital_gain)
        .collect();
    let a = poly(&digital_poles).into_iter().map(|c| c.re).collect();

    Ok(FilterCoefficients { b, a })
}

/// Left-half-plane poles of the unit-cutoff analog Butterworth prototype
fn prototype_poles(order: usize) -> Vec<Complex<f64>> {
    let n = order as i64;
    (0..n)
        .map(|k| {
            let m = (-n + 1 + 2 * k) as f64;
            let theta = PI * m / (2.0 * order as f64);
            -Complex::new(theta.cos(), theta.sin())
        })
        .collect()
}

/// Coefficients of ∏ (x − rᵢ), highest power first
fn poly(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &r in roots {
        let mut next = coeffs.clone();
        next.push(Complex::new(0.0, 0.0));
        for i in 1..next.len() {
            next[i] -= r * coeffs[i - 1];
        }
        coeffs = next;
    }
    coeffs
}

/// Row `n` of Pascal's triangle, i.e. the coefficients of (x + 1)ⁿ
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for _ in 0..n {
        let mut next = vec![1.0; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tol, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_fourth_order_reference_coefficients() {
        // Wn = 0.2 of Nyquist
        let c = butterworth_lowpass(4, 10.0, 100.0).unwrap();
        assert_close(
            &c.b,
            &[0.00482434, 0.01929737, 0.02894606, 0.01929737, 0.00482434],
            1e-7,
        );
        assert_close(
            &c.a,
            &[1.0, -2.36951301, 2.31398841, -1.05466541, 0.18737949],
            1e-7,
        );
    }

    #[test]
    fn test_unity_dc_gain() {
        for order in 1..=8 {
            let c = butterworth_lowpass(order, 5.0, 250.0).unwrap();
            assert_eq!(c.order(), order);
            assert!((c.dc_gain() - 1.0).abs() < 1e-9, "order {order}");
        }
    }

    #[test]
    fn test_first_order_is_symmetric_numerator() {
        let c = butterworth_lowpass(1, 25.0, 100.0).unwrap();
        assert!((c.b[0] - c.b[1]).abs() < 1e-12);
        assert_eq!(c.a[0], 1.0);
    }

    #[test]
    fn test_cutoff_must_be_below_nyquist() {
        assert!(matches!(
            butterworth_lowpass(4, 10.0, 10.0),
            Err(AcquisitionError::FilterDesign { .. })
        ));
        assert!(butterworth_lowpass(4, 50.0, 100.0).is_err());
        assert!(butterworth_lowpass(4, 0.0, 100.0).is_err());
        assert!(butterworth_lowpass(0, 10.0, 100.0).is_err());
        assert!(butterworth_lowpass(4, 10.0, -1.0).is_err());
    }

    #[test]
    fn test_binomial_row() {
        assert_eq!(binomial_row(0), vec![1.0]);
        assert_eq!(binomial_row(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }
}
