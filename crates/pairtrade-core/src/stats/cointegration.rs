//! Engle-Granger cointegration test.
//!
//! Two-step procedure: estimate the cointegrating regression
//! `a = α + β·b + ε` by OLS, then test the residuals for stationarity with
//! a Dickey-Fuller t-statistic. Critical values use the MacKinnon (2010)
//! response surface for two variables with a constant; the p-value is
//! interpolated across those quantiles. More negative statistic = stronger
//! evidence of cointegration.

use serde::{Deserialize, Serialize};

use crate::stats::descriptive::mean;
use crate::{PairTradeError, PairTradeResult};

/// Minimum observations for the cointegrating regression to be meaningful.
pub const MIN_OBSERVATIONS: usize = 20;

/// Tabulated critical values for the test statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    pub one_pct: f64,
    pub five_pct: f64,
    pub ten_pct: f64,
}

/// Outcome of the cointegration test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CointegrationTest {
    /// Dickey-Fuller t-statistic on the cointegrating residuals
    pub statistic: f64,
    /// Approximate p-value for the null of no cointegration
    pub p_value: f64,
    pub critical_values: CriticalValues,
}

/// MacKinnon (2010) response-surface coefficients, two variables, constant:
/// cv = b0 + b1/T + b2/T².
const TAU_1PCT: [f64; 3] = [-3.89644, -10.9519, -22.527];
const TAU_5PCT: [f64; 3] = [-3.33613, -6.1101, -6.823];
const TAU_10PCT: [f64; 3] = [-3.04445, -4.2412, -2.720];

fn finite_sample_cv(coef: &[f64; 3], n: usize) -> f64 {
    let t = n as f64;
    coef[0] + coef[1] / t + coef[2] / (t * t)
}

fn critical_values(n: usize) -> CriticalValues {
    CriticalValues {
        one_pct: finite_sample_cv(&TAU_1PCT, n),
        five_pct: finite_sample_cv(&TAU_5PCT, n),
        ten_pct: finite_sample_cv(&TAU_10PCT, n),
    }
}

/// Approximate p-value by interpolating across the tabulated quantiles,
/// with exponential decay beyond them.
fn approximate_p_value(statistic: f64, cv: &CriticalValues) -> f64 {
    if statistic <= cv.one_pct {
        // Deep rejection region; decay from 0.01 towards zero.
        (0.01 * (-(cv.one_pct - statistic)).exp()).max(1e-6)
    } else if statistic <= cv.five_pct {
        0.01 + 0.04 * (statistic - cv.one_pct) / (cv.five_pct - cv.one_pct)
    } else if statistic <= cv.ten_pct {
        0.05 + 0.05 * (statistic - cv.five_pct) / (cv.ten_pct - cv.five_pct)
    } else {
        (0.10 + 0.90 * (1.0 - (-0.5 * (statistic - cv.ten_pct)).exp())).min(0.9999)
    }
}

/// OLS of `y` on `x` with a constant. Returns (alpha, beta, residuals).
fn ols(y: &[f64], x: &[f64]) -> PairTradeResult<(f64, f64, Vec<f64>)> {
    let n = y.len();
    let mean_y = mean(y);
    let mean_x = mean(x);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        cov += (y[i] - mean_y) * dx;
        var_x += dx * dx;
    }

    if var_x == 0.0 {
        return Err(PairTradeError::DegenerateSpread {
            context: "cointegrating regression (flat regressor series)".into(),
        });
    }

    let beta = cov / var_x;
    let alpha = mean_y - beta * mean_x;
    let residuals = (0..n).map(|i| y[i] - alpha - beta * x[i]).collect();
    Ok((alpha, beta, residuals))
}

/// Dickey-Fuller t-statistic: regress Δε_t on ε_{t−1} with a constant and
/// return the t-ratio of the slope.
fn dickey_fuller_statistic(residuals: &[f64]) -> PairTradeResult<f64> {
    let n = residuals.len();
    if n < 4 {
        return Err(PairTradeError::InsufficientData(format!(
            "Dickey-Fuller regression needs at least 4 residuals, got {}",
            n
        )));
    }

    let m = n - 1;
    let diffs: Vec<f64> = residuals.windows(2).map(|w| w[1] - w[0]).collect();
    let lagged = &residuals[..m];

    let mean_d = mean(&diffs);
    let mean_l = mean(lagged);

    let mut cov = 0.0;
    let mut var_l = 0.0;
    for i in 0..m {
        let dl = lagged[i] - mean_l;
        cov += (diffs[i] - mean_d) * dl;
        var_l += dl * dl;
    }

    if var_l == 0.0 {
        return Err(PairTradeError::DegenerateSpread {
            context: "Dickey-Fuller regression (constant residuals)".into(),
        });
    }

    let gamma = cov / var_l;
    let intercept = mean_d - gamma * mean_l;

    let mut sse = 0.0;
    for i in 0..m {
        let e = diffs[i] - intercept - gamma * lagged[i];
        sse += e * e;
    }
    let residual_var = sse / (m - 2) as f64;
    let se_gamma = (residual_var / var_l).sqrt();

    if se_gamma == 0.0 {
        return Err(PairTradeError::DegenerateSpread {
            context: "Dickey-Fuller regression (perfect fit)".into(),
        });
    }

    Ok(gamma / se_gamma)
}

/// Run the Engle-Granger test on two aligned price sequences, `a` regressed
/// on `b` in that fixed order.
pub fn engle_granger(a: &[f64], b: &[f64]) -> PairTradeResult<CointegrationTest> {
    if a.len() != b.len() {
        return Err(PairTradeError::InputAlignment {
            reason: format!("series lengths differ: {} vs {}", a.len(), b.len()),
        });
    }
    if a.len() < MIN_OBSERVATIONS {
        return Err(PairTradeError::InsufficientData(format!(
            "cointegration test needs at least {} observations, got {}",
            MIN_OBSERVATIONS,
            a.len()
        )));
    }

    let (_alpha, _beta, residuals) = ols(a, b)?;
    let statistic = dickey_fuller_statistic(&residuals)?;
    let cv = critical_values(a.len());
    let p_value = approximate_p_value(statistic, &cv);

    Ok(CointegrationTest {
        statistic,
        p_value,
        critical_values: cv,
    })
}
