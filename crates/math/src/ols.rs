//! Ordinary least squares with an intercept.

use ndarray::{Array1, Array2, s};

use crate::MathError;

/// Result of an OLS fit, carrying the pieces the HAC sandwich needs.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients: intercept first, then one slope per design column.
    pub coefficients: Array1<f64>,
    /// Residuals, one per observation.
    pub residuals: Array1<f64>,
    /// Inverse of X'X for the augmented design.
    pub xtx_inv: Array2<f64>,
    /// Augmented design matrix actually used (leading column of ones).
    pub design: Array2<f64>,
    /// Residual standard deviation, sqrt(SSR / (n - p)).
    pub residual_std: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
}

impl OlsFit {
    /// Intercept estimate.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Slope estimates, without the intercept.
    #[must_use]
    pub fn slopes(&self) -> Array1<f64> {
        self.coefficients.slice(s![1..]).to_owned()
    }

    /// Number of observations used.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }
}

/// Fit ordinary least squares of `y` on `x` with an intercept.
///
/// The design matrix `x` holds one column per regressor and no intercept
/// column; a leading column of ones is added internally.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x k)
///
/// # Errors
/// Returns `MathError::Singular` when X'X has no usable pivot (collinear or
/// constant columns, or fewer observations than coefficients). Rank
/// deficiency is never absorbed by regularization or column dropping.
pub fn ols(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsFit, MathError> {
    let n = y.len();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }

    let p = x.ncols() + 1;
    if n <= p {
        return Err(MathError::Singular {
            detail: format!("{n} observations cannot identify {p} coefficients"),
        });
    }

    // Augment with the intercept column.
    let mut design = Array2::ones((n, p));
    design.slice_mut(s![.., 1..]).assign(x);

    let xtx = design.t().dot(&design);
    let xty = design.t().dot(y);

    let xtx_inv = invert_matrix(&xtx)?;
    let coefficients = xtx_inv.dot(&xty);

    let fitted = design.dot(&coefficients);
    let residuals = y - &fitted;

    let ss_res: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let y_mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };
    let residual_std = (ss_res / (n - p) as f64).sqrt();

    Ok(OlsFit { coefficients, residuals, xtx_inv, design, residual_std, r_squared })
}

/// Invert a square matrix by Gaussian elimination with partial pivoting.
fn invert_matrix(a: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: a.ncols() });
    }

    // Augmented matrix [A | I].
    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < 1e-14 {
            return Err(MathError::Singular {
                detail: format!("no usable pivot for column {col}"),
            });
        }

        // Swap rows
        if max_row != col {
            for j in 0..(2 * n) {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }

        // Normalize the pivot row
        let pivot = aug[[col, col]];
        for j in 0..(2 * n) {
            aug[[col, j]] /= pivot;
        }

        // Eliminate the column everywhere else
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..(2 * n) {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }

    Ok(inv)
}
