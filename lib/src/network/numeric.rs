/// Sum of pairwise products, accumulated left to right.
///
/// The accumulation order is fixed so that trained weights are reproducible
/// bit for bit across runs.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
  debug_assert_eq!(a.len(), b.len());
  a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

/// Binary threshold of a unit: fires when `weighted_sum + bias >= 0`.
///
/// A total of exactly zero fires. Convergence on boundary points depends on
/// this inclusive comparison.
pub fn activation(weighted_sum: f64, bias: i32) -> u8 {
  if weighted_sum + f64::from(bias) >= 0.0 {
    1
  } else {
    0
  }
}
