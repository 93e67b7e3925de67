//! Normal-equation accumulator and Cholesky solver for ridge least squares.
//!
//! The design matrices here are tall and narrow (thousands of rows, tens of
//! columns), so X'X is accumulated row by row and solved directly.

/// Accumulates X'X and X'y for a fixed column count.
#[derive(Debug, Clone)]
pub struct NormalEquations {
    cols: usize,
    xtx: Vec<f64>,
    xty: Vec<f64>,
    rows: usize,
}

impl NormalEquations {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            xtx: vec![0.0; cols * cols],
            xty: vec![0.0; cols],
            rows: 0,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Add one observation. `x.len()` must equal `cols`.
    pub fn add_row(&mut self, x: &[f64], y: f64) {
        debug_assert_eq!(x.len(), self.cols);
        for i in 0..self.cols {
            let xi = x[i];
            if xi == 0.0 {
                continue;
            }
            self.xty[i] += xi * y;
            let row = &mut self.xtx[i * self.cols..(i + 1) * self.cols];
            for j in i..self.cols {
                row[j] += xi * x[j];
            }
        }
        self.rows += 1;
    }

    /// Solve `(X'X + diag(penalty)) b = X'y`. `None` if the system is not
    /// positive definite.
    pub fn solve_ridge(&self, penalty: &[f64]) -> Option<Vec<f64>> {
        debug_assert_eq!(penalty.len(), self.cols);
        let n = self.cols;
        let mut a = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                let v = self.xtx[i * n + j];
                a[i * n + j] = v;
                a[j * n + i] = v;
            }
            a[i * n + i] += penalty[i];
        }
        cholesky_solve(&mut a, &self.xty, n)
    }
}

/// In-place Cholesky factorisation of the row-major `n x n` matrix `a`
/// followed by forward and back substitution.
fn cholesky_solve(a: &mut [f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
    // Lower triangle of `a` becomes L.
    for j in 0..n {
        let mut d = a[j * n + j];
        for k in 0..j {
            d -= a[j * n + k] * a[j * n + k];
        }
        if d <= 0.0 || !d.is_finite() {
            return None;
        }
        let ljj = d.sqrt();
        a[j * n + j] = ljj;
        for i in (j + 1)..n {
            let mut s = a[i * n + j];
            for k in 0..j {
                s -= a[i * n + k] * a[j * n + k];
            }
            a[i * n + j] = s / ljj;
        }
    }

    // L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= a[i * n + k] * z[k];
        }
        z[i] = s / a[i * n + i];
    }

    // L' x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = z[i];
        for k in (i + 1)..n {
            s -= a[k * n + i] * x[k];
        }
        x[i] = s / a[i * n + i];
    }

    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
