//! Second-order linear system response.
//!
//! G(s) = Kp·ωn² / (τ²·s² + 2ζωnτ·s + ωn²)
//!
//! The transfer function is realized in controllable canonical form and
//! simulated from zero initial state. Between grid points the input is
//! interpolated linearly (first-order hold); each step uses the exact
//! discretization obtained from the matrix exponential of the augmented
//! system
//!
//! ```text
//!     | A·dt  B·dt  0 |
//! M = |  0     0    1 |      exp(M) = | Ad  Γ1  Γ2 |
//!     |  0     0    0 |               | ·   ·   ·  |
//! ```
//!
//! so that `x[k+1] = Ad·x[k] + (Γ1 − Γ2)·u[k] + Γ2·u[k+1]`.

use contracts::{AcquisitionError, SensorConfig};
use nalgebra::{Matrix2, Matrix4, RowVector2, Vector2};
use tracing::trace;

/// Relative tolerance for treating two step lengths as equal
const DT_REL_TOLERANCE: f64 = 1e-9;

/// Parameters of one second-order response model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderModel {
    pub natural_freq: f64,
    pub damping_ratio: f64,
    pub gain: f64,
    pub time_constant: f64,
    /// Dead time is carried but has no effect on the simulated response.
    pub dead_time: f64,
}

impl SecondOrderModel {
    pub fn new(natural_freq: f64, damping_ratio: f64, gain: f64, time_constant: f64) -> Self {
        Self {
            natural_freq,
            damping_ratio,
            gain,
            time_constant,
            dead_time: 0.0,
        }
    }

    pub fn from_config(config: &SensorConfig) -> Self {
        Self {
            natural_freq: config.natural_freq,
            damping_ratio: config.damping_ratio,
            gain: config.gain,
            time_constant: config.time_constant,
            dead_time: config.dead_time,
        }
    }

    /// Steady-state gain G(0)
    pub fn dc_gain(&self) -> f64 {
        if self.natural_freq == 0.0 {
            0.0
        } else {
            self.gain
        }
    }

    /// Forced response to `input` sampled on `time_points`
    pub fn simulate(
        &self,
        time_points: &[f64],
        input: &[f64],
    ) -> Result<Vec<f64>, AcquisitionError> {
        simulate(
            time_points,
            input,
            self.natural_freq,
            self.damping_ratio,
            self.gain,
            self.time_constant,
        )
    }

    fn validate(&self) -> Result<(), AcquisitionError> {
        let params = [
            ("natural_freq", self.natural_freq),
            ("damping_ratio", self.damping_ratio),
            ("gain", self.gain),
            ("time_constant", self.time_constant),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(AcquisitionError::invalid_parameter(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        if self.time_constant == 0.0 {
            return Err(AcquisitionError::invalid_parameter(
                "time_constant",
                "must be non-zero (leading denominator coefficient)",
            ));
        }
        Ok(())
    }

    /// Controllable canonical realization (A, B = [1, 0]ᵀ, C)
    fn state_space(&self) -> (Matrix2<f64>, RowVector2<f64>) {
        let tau2 = self.time_constant * self.time_constant;
        let wn2 = self.natural_freq * self.natural_freq;
        let a1 = 2.0 * self.damping_ratio * self.natural_freq * self.time_constant / tau2;
        let a2 = wn2 / tau2;
        let b0 = self.gain * wn2 / tau2;

        let a = Matrix2::new(-a1, -a2, 1.0, 0.0);
        let c = RowVector2::new(0.0, b0);
        (a, c)
    }
}

/// One-step first-order-hold discretization
#[derive(Debug, Clone, Copy)]
struct Discretization {
    dt: f64,
    ad: Matrix2<f64>,
    /// Weight of u[k]
    bd0: Vector2<f64>,
    /// Weight of u[k+1]
    bd1: Vector2<f64>,
}

impl Discretization {
    fn new(a: &Matrix2<f64>, dt: f64) -> Self {
        let mut m = Matrix4::<f64>::zeros();
        m.fixed_view_mut::<2, 2>(0, 0).copy_from(&(a * dt));
        m[(0, 2)] = dt;
        m[(2, 3)] = 1.0;

        let phi = m.exp();
        let ad: Matrix2<f64> = phi.fixed_view::<2, 2>(0, 0).into_owned();
        let gamma1: Vector2<f64> = phi.fixed_view::<2, 1>(0, 2).into_owned();
        let gamma2: Vector2<f64> = phi.fixed_view::<2, 1>(0, 3).into_owned();

        Self {
            dt,
            ad,
            bd0: gamma1 - gamma2,
            bd1: gamma2,
        }
    }

    #[inline]
    fn matches(&self, dt: f64) -> bool {
        (self.dt - dt).abs() <= DT_REL_TOLERANCE * self.dt.abs().max(dt.abs())
    }
}

/// Simulate the forced response of a second-order system
///
/// Numerator `gain·ωn²`, denominator `[τ², 2ζωnτ, ωn²]`, zero initial
/// state. The output has the same length as `input` and is sampled on the
/// same grid.
///
/// # Errors
/// - `ShapeMismatch` if `time_points` and `input` lengths differ
/// - `InvalidParameter` for non-finite parameters, `time_constant == 0`,
///   or a time grid that is not strictly increasing
pub fn simulate(
    time_points: &[f64],
    input: &[f64],
    natural_freq: f64,
    damping_ratio: f64,
    gain: f64,
    time_constant: f64,
) -> Result<Vec<f64>, AcquisitionError> {
    if time_points.len() != input.len() {
        return Err(AcquisitionError::ShapeMismatch {
            expected: time_points.len(),
            actual: input.len(),
        });
    }

    let model = SecondOrderModel::new(natural_freq, damping_ratio, gain, time_constant);
    model.validate()?;

    if input.is_empty() {
        return Ok(Vec::new());
    }

    let (a, c) = model.state_space();
    let mut output = Vec::with_capacity(input.len());
    let mut x = Vector2::<f64>::zeros();
    let mut disc: Option<Discretization> = None;

    output.push((c * x)[0]);

    for k in 1..input.len() {
        let dt = time_points[k] - time_points[k - 1];
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(AcquisitionError::invalid_parameter(
                "time_points",
                format!("grid must be strictly increasing (step {k}: dt = {dt})"),
            ));
        }

        let step = match disc {
            Some(d) if d.matches(dt) => d,
            _ => {
                trace!(dt, step = k, "recomputing discretization");
                let d = Discretization::new(&a, dt);
                disc = Some(d);
                d
            }
        };

        x = step.ad * x + step.bd0 * input[k - 1] + step.bd1 * input[k];
        output.push((c * x)[0]);
    }

    Ok(output)
}
