pub mod linear;

use ridgeline_common::value::{ScalarOrArray, ScalarOrArrayRef};

/// A scale mapping a continuous numeric domain onto a continuous numeric range
pub trait ContinuousNumericScale<D: Sync + Clone>: Clone + std::fmt::Debug {
    fn domain(&self) -> (D, D);
    fn range(&self) -> (f32, f32);
    fn clamp(&self) -> bool;

    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, D>>) -> ScalarOrArray<f32>
    where
        D: 'a;

    fn ticks(&self, count: Option<f32>) -> Vec<D>;

    /// Scale a single value
    fn scale_scalar(&self, value: D) -> f32 {
        match self.scale(ScalarOrArrayRef::Scalar(value)) {
            ScalarOrArray::Scalar(v) => v,
            ScalarOrArray::Array(values) => values.first().copied().unwrap_or(f32::NAN),
        }
    }
}
