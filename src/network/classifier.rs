use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::layers::dense::Dense;
use crate::math::matrix::Matrix;

/// Flattened 28×28 grayscale input.
pub const INPUT_DIM: usize = 784;
/// Hidden layer width.
pub const HIDDEN_DIM: usize = 128;
/// One score per digit class.
pub const OUTPUT_DIM: usize = 10;
/// Standard deviation of the Gaussian weight initialization.
pub const INIT_SCALE: f64 = 0.1;

/// Two-layer feed-forward digit classifier: 784 → 128 (ReLU) → 10 (ReLU).
///
/// The parameters are random and never trained, so the output is a vector of
/// raw non-negative scores, not a probability distribution. ReLU on the
/// output layer is kept as-is; see `activation::relu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    pub layer1: Dense,
    pub layer2: Dense,
}

impl Classifier {
    /// Builds both layers from the given RNG: Gaussian weights scaled by
    /// `INIT_SCALE`, zero biases.
    pub fn new<R: Rng>(rng: &mut R) -> Classifier {
        Classifier {
            layer1: Dense::new(INPUT_DIM, HIDDEN_DIM, INIT_SCALE, rng),
            layer2: Dense::new(HIDDEN_DIM, OUTPUT_DIM, INIT_SCALE, rng),
        }
    }

    /// Deterministic construction: two classifiers built from the same seed
    /// hold identical parameters.
    pub fn from_seed(seed: u64) -> Classifier {
        let mut rng = StdRng::seed_from_u64(seed);
        Classifier::new(&mut rng)
    }

    /// Builds a classifier from explicit layers, checking that they chain as
    /// 784 → 128 → 10.
    pub fn from_layers(layer1: Dense, layer2: Dense) -> Result<Classifier, String> {
        if layer1.input_size != INPUT_DIM {
            return Err(format!(
                "Layer 1 must accept {} inputs, got {}.",
                INPUT_DIM, layer1.input_size
            ));
        }
        if layer1.size != HIDDEN_DIM || layer2.input_size != HIDDEN_DIM {
            return Err(format!(
                "Layer boundary mismatch: layer 1 produces {} values, layer 2 expects {} \
                 (both must be {}).",
                layer1.size, layer2.input_size, HIDDEN_DIM
            ));
        }
        if layer2.size != OUTPUT_DIM {
            return Err(format!(
                "Layer 2 must produce {} scores, got {}.",
                OUTPUT_DIM, layer2.size
            ));
        }
        Ok(Classifier { layer1, layer2 })
    }

    /// Runs the forward pass: affine + ReLU through both layers.
    ///
    /// The input must be a flattened 28×28 image with pixels in [0, 1];
    /// anything that is not exactly 784 values is a caller error. The
    /// computation is pure — repeated calls on the same input return
    /// identical results.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>, String> {
        if input.len() != INPUT_DIM {
            return Err(format!(
                "Input dimension mismatch: expected {} values, got {}.",
                INPUT_DIM,
                input.len()
            ));
        }

        let x = Matrix::from_data(vec![input.to_vec()]);
        let hidden = self.layer1.forward(&x);
        let scores = self.layer2.forward(&hidden);
        Ok(scores.data[0].clone())
    }

    /// Serializes the classifier parameters to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a classifier from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Classifier> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

/// Returns the index of the maximum value, or `None` for an empty slice.
/// Total over all floats, NaN included.
pub fn argmax(v: &[f64]) -> Option<usize> {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
