use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Add, Mul};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Fills a matrix with samples from N(0, scale²): standard-normal draws
    /// multiplied by `scale`.
    ///
    /// The RNG is caller-supplied so that construction is reproducible under
    /// a fixed seed.
    pub fn gaussian<R: Rng>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = Matrix::sample_standard_normal(rng) * scale;
            }
        }
        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            (self.data)
                .clone()
                .into_iter()
                .map(|row| row.into_iter().map(|x| functor(x)).collect())
                .collect()
        )
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 5);
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 5);
        assert!(m.data.iter().flatten().all(|&x| x == 0.0));
    }

    #[test]
    fn mul_computes_row_vector_by_matrix() {
        let v = Matrix::from_data(vec![vec![1.0, 2.0]]);
        let w = Matrix::from_data(vec![
            vec![3.0, 0.0, 1.0],
            vec![0.0, 4.0, 1.0],
        ]);
        let out = v * w;
        assert_eq!(out.rows, 1);
        assert_eq!(out.cols, 3);
        assert_eq!(out.data[0], vec![3.0, 8.0, 3.0]);
    }

    #[test]
    fn add_applies_bias_row() {
        let z = Matrix::from_data(vec![vec![1.0, -1.0]]);
        let b = Matrix::from_data(vec![vec![0.5, 0.5]]);
        let out = z + b;
        assert_eq!(out.data[0], vec![1.5, -0.5]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mul_panics_on_inner_dimension_mismatch() {
        let a = Matrix::zeros(1, 3);
        let b = Matrix::zeros(4, 2);
        let _ = a * b;
    }

    #[test]
    fn gaussian_is_deterministic_under_a_fixed_seed() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        let a = Matrix::gaussian(4, 6, 0.1, &mut rng1);
        let b = Matrix::gaussian(4, 6, 0.1, &mut rng2);
        assert_eq!(a, b);
    }

    #[test]
    fn gaussian_scale_zero_yields_all_zeros() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = Matrix::gaussian(2, 2, 0.0, &mut rng);
        assert!(m.data.iter().flatten().all(|&x| x == 0.0));
    }
}
