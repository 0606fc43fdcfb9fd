use tch::Tensor;

/// Converts a single observation into a `[1, dim]` float tensor.
pub trait ToTensor {
    fn to_tensor(&self) -> Tensor;
}

impl<const N: usize> ToTensor for [f32; N] {
    fn to_tensor(&self) -> Tensor {
        Tensor::from_slice(self).unsqueeze(0)
    }
}

impl ToTensor for Vec<f32> {
    fn to_tensor(&self) -> Tensor {
        Tensor::from_slice(self).unsqueeze(0)
    }
}

// gridworld 的 (row, column)
impl ToTensor for (usize, usize) {
    fn to_tensor(&self) -> Tensor {
        Tensor::from_slice(&[self.0 as f32, self.1 as f32]).unsqueeze(0)
    }
}

/// Stacks observations into a `[batch, dim]` tensor.
pub fn batch<T: ToTensor>(states: &[T]) -> Tensor {
    let rows: Vec<Tensor> = states.iter().map(|s| s.to_tensor()).collect();
    Tensor::cat(&rows, 0)
}
