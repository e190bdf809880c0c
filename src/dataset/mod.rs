pub mod mnist;

pub use mnist::MnistSet;
