//! Causal IIR filtering, direct form II transposed.

use contracts::AcquisitionError;

/// Filter `x` through `b / a` starting from zero state
///
/// Coefficients are normalized by `a[0]`. Output length equals input length.
///
/// # Errors
/// `InvalidParameter` if either coefficient vector is empty or `a[0] == 0`.
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64]) -> Result<Vec<f64>, AcquisitionError> {
    let mut state = vec![0.0; state_len(b, a)];
    lfilter_with_state(b, a, x, &mut state)
}

/// Delay-line length for `b / a`
pub fn state_len(b: &[f64], a: &[f64]) -> usize {
    b.len().max(a.len()).saturating_sub(1)
}

/// Filter `x` continuing from `state`, which is updated in place
///
/// Feeding a series in consecutive pieces yields the same output as one
/// call over the whole series.
///
/// # Errors
/// As [`lfilter`], plus `InvalidParameter` if `state.len() != state_len(b, a)`.
pub fn lfilter_with_state(
    b: &[f64],
    a: &[f64],
    x: &[f64],
    state: &mut [f64],
) -> Result<Vec<f64>, AcquisitionError> {
    if b.is_empty() || a.is_empty() {
        return Err(AcquisitionError::invalid_parameter(
            "coefficients",
            "numerator and denominator must be non-empty",
        ));
    }
    let a0 = a[0];
    if a0 == 0.0 || !a0.is_finite() {
        return Err(AcquisitionError::invalid_parameter(
            "coefficients",
            "leading denominator coefficient must be non-zero",
        ));
    }
    if state.len() != state_len(b, a) {
        return Err(AcquisitionError::invalid_parameter(
            "state",
            format!("expected {} delay elements, got {}", state_len(b, a), state.len()),
        ));
    }

    let n = b.len().max(a.len());
    let mut bn = vec![0.0; n];
    let mut an = vec![0.0; n];
    for (dst, src) in bn.iter_mut().zip(b) {
        *dst = src / a0;
    }
    for (dst, src) in an.iter_mut().zip(a) {
        *dst = src / a0;
    }

    let z = state;
    let mut y = Vec::with_capacity(x.len());

    for &xi in x {
        let yi = bn[0] * xi + z.first().copied().unwrap_or(0.0);
        for i in 0..z.len() {
            let carry = z.get(i + 1).copied().unwrap_or(0.0);
            z[i] = bn[i + 1] * xi + carry - an[i + 1] * yi;
        }
        y.push(yi);
    }

    Ok(y)
}
