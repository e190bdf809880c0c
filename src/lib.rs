pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod dataset;
pub mod viz;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::relu;
pub use layers::dense::Dense;
pub use network::classifier::{Classifier, argmax};
pub use dataset::mnist::MnistSet;
