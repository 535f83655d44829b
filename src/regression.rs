use std::fmt;

use crate::editor::Point;

const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    pub mse: f64,
    pub mae: f64,
    pub rmse: f64,
}

/// Ordinary least squares over the closed form normal equations.
///
/// When `n·Σx² − (Σx)²` is exactly zero (fewer than two points, or all x
/// equal) the fit falls back to a horizontal line through the first point.
pub fn linear_regression(points: &[Point]) -> RegressionResult {
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = points.iter().fold(
        (0.0_f64, 0.0, 0.0, 0.0),
        |(sum_x, sum_y, sum_xy, sum_x2), &Point { x, y }| {
            (sum_x + x, sum_y + y, sum_xy + x * y, sum_x2 + x * x)
        },
    );

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return RegressionResult {
            slope: 0.0,
            intercept: points.first().map_or(0.0, |point| point.y),
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    RegressionResult { slope, intercept }
}

/// Residual statistics of `fit` over `points`, `None` below two points.
pub fn error_stats(points: &[Point], fit: &RegressionResult) -> Option<ErrorStats> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (abs_sum, sq_sum) = points
        .iter()
        .map(|point| fit.predict(point.x) - point.y)
        .fold((0.0_f64, 0.0_f64), |(abs_sum, sq_sum), error| {
            (abs_sum + error.abs(), sq_sum + error * error)
        });
    let mse = sq_sum / n;
    Some(ErrorStats {
        mse,
        mae: abs_sum / n,
        rmse: mse.sqrt(),
    })
}

/// What the statistics panel shows after a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub fit: RegressionResult,
    pub errors: ErrorStats,
}

pub fn statistics(points: &[Point]) -> Option<Statistics> {
    let fit = linear_regression(points);
    let errors = error_stats(points, &fit)?;
    Some(Statistics { fit, errors })
}

/// `y = 1.23x + 4.56`, or the placeholder when there is nothing to fit.
pub fn equation_text(fit: Option<&RegressionResult>) -> String {
    match fit {
        Some(RegressionResult { slope, intercept }) => {
            let sign = if *intercept >= 0.0 { '+' } else { '-' };
            format!("y = {:.2}x {} {:.2}", slope, sign, intercept.abs())
        }
        None => format!("y = {0}x + {0}", PLACEHOLDER),
    }
}

/// Labelled lines for the statistics panel, four decimals each.
pub fn statistics_lines(stats: Option<&Statistics>) -> [(&'static str, String); 5] {
    let fmt4 = |value: Option<f64>| {
        value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{:.4}", v))
    };
    [
        ("Slope (m)", fmt4(stats.map(|s| s.fit.slope))),
        ("Intercept (b)", fmt4(stats.map(|s| s.fit.intercept))),
        ("Mean Squared Error (MSE)", fmt4(stats.map(|s| s.errors.mse))),
        ("Mean Absolute Error (MAE)", fmt4(stats.map(|s| s.errors.mae))),
        ("Root Mean Squared Error (RMSE)", fmt4(stats.map(|s| s.errors.rmse))),
    ]
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&equation_text(Some(self)))
    }
}
