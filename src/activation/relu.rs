/// Rectified linear unit: `max(0, x)`, applied element-wise via `Matrix::map`.
///
/// The classifier applies it after both affine layers, including the output
/// layer. A ReLU'd classification head is unusual (the last layer is normally
/// left linear), but it is the behavior this network reproduces.
pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}
