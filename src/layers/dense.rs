use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::relu;
use crate::math::matrix::Matrix;

/// One affine layer followed by ReLU.
///
/// Parameters are fixed at construction time: weights are drawn from a scaled
/// zero-mean Gaussian, biases start at zero. Nothing ever updates them — the
/// network is inference-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Dense {
    /// Weights: `input_size × size`, sampled from N(0, scale²).
    /// Biases: `1 × size`, all zeros.
    pub fn new<R: Rng>(input_size: usize, size: usize, scale: f64, rng: &mut R) -> Dense {
        Dense {
            size,
            input_size,
            weights: Matrix::gaussian(input_size, size, scale, rng),
            biases: Matrix::zeros(1, size),
        }
    }

    /// Builds a layer from explicit parameter matrices.
    ///
    /// Panics if the shapes disagree — parameters come from trusted
    /// construction paths, not external input.
    pub fn from_parameters(weights: Matrix, biases: Matrix) -> Dense {
        if biases.rows != 1 || biases.cols != weights.cols {
            panic!("Bias shape does not match weight matrix")
        }
        Dense {
            size: weights.cols,
            input_size: weights.rows,
            weights,
            biases,
        }
    }

    /// Computes `relu(input · weights + biases)` for a `1 × input_size` row
    /// vector. Pure: parameters are untouched.
    pub fn forward(&self, input: &Matrix) -> Matrix {
        let z = input.clone() * self.weights.clone() + self.biases.clone();
        z.map(relu)
    }
}
