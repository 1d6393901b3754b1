use serde::{Deserialize, Serialize};

use crate::analysis::descriptive::mean;

/// Square correlation matrix over named metric series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major coefficients; `values[i][i]` is always 1.0.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson correlation coefficient between two series, truncated to the
/// shorter length. Constant or too-short input yields 0.0.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let x = &x[..n];
    let y = &y[..n];

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    covariance / denom
}

/// Full correlation matrix over labelled series. The diagonal is fixed at
/// 1.0 and the matrix is symmetric by construction.
pub fn correlation_matrix(series: &[(&str, &[f64])]) -> CorrelationMatrix {
    let k = series.len();
    let labels = series.iter().map(|(name, _)| name.to_string()).collect();
    let mut values = vec![vec![0.0; k]; k];

    for i in 0..k {
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            let r = pearson_correlation(series[i].1, series[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { labels, values }
}
