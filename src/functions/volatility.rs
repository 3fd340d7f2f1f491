//! Rolling volatility features derived from a close-price series.

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (ddof = 0) standard deviation.
fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Log returns; the first element has no predecessor and is NaN.
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return returns;
    }
    returns.push(f64::NAN);
    returns.extend(closes.windows(2).map(|w| (w[1] / w[0]).ln()));
    returns
}

/// Annualized realized volatility in percentage points.
///
/// Rolling population std of log returns over `window` returns, scaled by
/// `sqrt(trading_days) * 100`. NaN until a full window of finite returns exists.
pub fn realized_volatility(closes: &[f64], window: usize, trading_days: f64) -> Vec<f64> {
    let returns = log_returns(closes);
    let scale = trading_days.sqrt() * 100.0;

    rolling(&returns, window, |slice| population_std(slice) * scale)
}

/// `(x - rolling mean) / rolling std` with population std.
///
/// NaN until the window fills, when the window holds a non-finite value,
/// or when the window has zero dispersion.
pub fn rolling_zscore(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |slice| {
        let sd = population_std(slice);
        if sd == 0.0 {
            return f64::NAN;
        }
        (slice[slice.len() - 1] - mean(slice)) / sd
    })
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for end in window..=values.len() {
        let slice = &values[end - window..end];
        if slice.iter().all(|v| v.is_finite()) {
            out[end - 1] = f(slice);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_prices_have_zero_vol() {
        let closes = vec![100.0; 6];
        let hv = realized_volatility(&closes, 3, 252.0);
        assert!(hv[0].is_nan());
        assert!(hv[2].is_nan());
        assert_eq!(hv[3], 0.0);
        assert_eq!(hv[5], 0.0);
    }

    #[test]
    fn test_realized_vol_matches_manual() {
        let closes = [100.0, 110.0, 99.0];
        let hv = realized_volatility(&closes, 2, 252.0);
        let r1 = (110.0f64 / 100.0).ln();
        let r2 = (99.0f64 / 110.0).ln();
        let m = (r1 + r2) / 2.0;
        let sd = (((r1 - m).powi(2) + (r2 - m).powi(2)) / 2.0).sqrt();
        assert!((hv[2] - sd * 252f64.sqrt() * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zscore_window() {
        let z = rolling_zscore(&[1.0, 2.0, 3.0], 3);
        assert!(z[0].is_nan() && z[1].is_nan());
        // mean 2, population std sqrt(2/3)
        let expected = 1.0 / (2.0f64 / 3.0).sqrt();
        assert!((z[2] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zscore_flat_window_is_nan() {
        let z = rolling_zscore(&[5.0, 5.0, 5.0], 2);
        assert!(z[1].is_nan());
        assert!(z[2].is_nan());
    }
}
