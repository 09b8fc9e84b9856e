//! Reference signal generation over a time grid.

use std::f64::consts::PI;

/// Value of `sign(x)` at exactly `x == 0`
///
/// The square wave outputs `amplitude * SIGN_AT_ZERO` wherever
/// `sin(2π·f·t)` is exactly zero (e.g. at `t = 0`). Downstream consumers may
/// depend on this, so it stays 0 rather than being folded into ±1.
pub const SIGN_AT_ZERO: f64 = 0.0;

#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        SIGN_AT_ZERO
    }
}

/// Square wave `amplitude * sign(sin(2π·frequency·t))` sampled at `time_points`
pub fn square_wave(time_points: &[f64], frequency: f64, amplitude: f64) -> Vec<f64> {
    time_points
        .iter()
        .map(|&t| amplitude * sign((2.0 * PI * frequency * t).sin()))
        .collect()
}

/// `count` evenly spaced points over `[start, stop]`, both ends included
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    // Pin the last point so it equals `stop` exactly
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let t = linspace(0.0, 100.0, 10_001);
        assert_eq!(t.len(), 10_001);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[10_000], 100.0);
        assert!((t[1] - 0.01).abs() < 1e-12);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    }

    #[test]
    fn test_square_wave_bounded_by_amplitude() {
        let t = linspace(0.0, 20.0, 2001);
        let wave = square_wave(&t, 0.2, 2.5);
        assert!(wave.iter().all(|v| v.abs() <= 2.5));
        assert!(wave.iter().any(|&v| v == 2.5));
        assert!(wave.iter().any(|&v| v == -2.5));
    }

    #[test]
    fn test_square_wave_sign_at_zero() {
        let wave = square_wave(&[0.0], 1.0, 3.0);
        assert_eq!(wave, vec![3.0 * SIGN_AT_ZERO]);
    }

    #[test]
    fn test_square_wave_period() {
        // f = 0.2 Hz -> period 5 s; rising edges every 5 s
        let dt = 0.01;
        let t = linspace(0.0, 30.0, 3001);
        let wave = square_wave(&t, 0.2, 1.0);

        let rising: Vec<f64> = wave
            .windows(2)
            .zip(t.iter().skip(1))
            .filter(|(w, _)| w[0] < 0.0 && w[1] > 0.0)
            .map(|(_, &time)| time)
            .collect();

        assert!(rising.len() >= 4);
        for pair in rising.windows(2) {
            assert!((pair[1] - pair[0] - 5.0).abs() <= dt + 1e-9);
        }
    }
}
