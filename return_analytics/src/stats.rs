//! Descriptive statistics over return slices.
//!
//! Standard deviations use the sample (n - 1) denominator. Functions return
//! `NaN` when the statistic is undefined for the input.

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        f64::NAN
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let m = mean(xs);
    let var = xs
        .iter()
        .map(|x| {
            let diff = x - m;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    var.sqrt()
}

/// Pearson correlation of two equally long slices, clamped to [-1, 1].
///
/// Returns 0.0 when either side has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);

    let mut cov = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;

    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        cov += dx * dy;
        sx += dx * dx;
        sy += dy * dy;
    }

    let denom = (sx * sy).sqrt();
    if denom < 1e-15 {
        0.0
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn median_of_even_and_odd_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // var = ((-1)^2 + 0 + 1^2) / 2 = 1
        assert_relative_eq!(sample_std(&[1.0, 2.0, 3.0]), 1.0, epsilon = 1e-12);
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn pearson_of_linear_relationships() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &z), -1.0, epsilon = 1e-12);
        assert_eq!(pearson(&x, &[5.0; 4]), 0.0);
    }
}
