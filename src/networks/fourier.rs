//! Fourier basis linear function approximation.
//!
//! Konidaris, Osentoski and Thomas (2011), "Value Function Approximation in
//! Reinforcement Learning using the Fourier Basis". Bounds are known for every
//! dimension, so only the cosine half of the basis is used.

use std::f64::consts::PI;

use tch::{Device, Kind, Tensor};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct FourierBasis {
    order: usize,
    nvars: usize,
    min_vals: Tensor,
    max_vals: Option<Tensor>,
    multipliers: Tensor,
}

impl FourierBasis {
    /// Basis with `min_vals = 0` and no upper bound: inputs are used as-is.
    pub fn new(nvars: usize, order: usize) -> Self {
        Self::build(nvars, Tensor::zeros([nvars as i64], (Kind::Float, Device::Cpu)), None, order)
    }

    pub fn with_bounds(
        nvars: usize,
        min_vals: &[f32],
        max_vals: Option<&[f32]>,
        order: usize,
    ) -> Result<Self> {
        check_len("min_vals", nvars, min_vals.len())?;
        if let Some(max_vals) = max_vals {
            check_len("max_vals", nvars, max_vals.len())?;
        }
        Ok(Self::build(
            nvars,
            Tensor::from_slice(min_vals),
            max_vals.map(Tensor::from_slice),
            order,
        ))
    }

    fn build(nvars: usize, min_vals: Tensor, max_vals: Option<Tensor>, order: usize) -> Self {
        let rows = multiplier_rows(nvars, order);
        let count = rows.len() as i64;
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        let multipliers = Tensor::from_slice(&flat).view([count, nvars as i64]);

        tracing::debug!(nvars, order, num_features = count, "built fourier basis");

        Self {
            order,
            nvars,
            min_vals,
            max_vals,
            multipliers,
        }
    }

    pub fn to_device(self, device: Device) -> Self {
        Self {
            min_vals: self.min_vals.to_device(device),
            max_vals: self.max_vals.map(|max_vals| max_vals.to_device(device)),
            multipliers: self.multipliers.to_device(device),
            ..self
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn num_features(&self) -> usize {
        self.multipliers.size()[0] as usize
    }

    /// `[num_features, nvars]`, one row per frequency combination.
    pub fn multipliers(&self) -> &Tensor {
        &self.multipliers
    }

    pub fn scale(&self, values: &Tensor) -> Tensor {
        let min_vals = self.min_vals.to_device(values.device());
        let shifted = values - &min_vals;
        match &self.max_vals {
            None => shifted,
            Some(max_vals) => shifted / (max_vals.to_device(values.device()) - &min_vals),
        }
    }

    /// `[batch, nvars] -> [batch, num_features]`
    pub fn compute_features(&self, features: &Tensor) -> Tensor {
        // 必须先缩放到 [0, 1]
        let scaled = self.scale(&features.to_kind(Kind::Float));
        let multipliers = self.multipliers.to_device(scaled.device());
        (scaled.matmul(&multipliers.tr()) * PI).cos()
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Every combination of `0..=order` over `nvars` dimensions, last dimension
/// varying fastest, without the leading all-zero row.
fn multiplier_rows(nvars: usize, order: usize) -> Vec<Vec<f32>> {
    let base = order + 1;
    let total = base.pow(nvars as u32);
    (1..total)
        .map(|index| {
            let mut row = vec![0.0; nvars];
            let mut rest = index;
            for slot in row.iter_mut().rev() {
                *slot = (rest % base) as f32;
                rest /= base;
            }
            row
        })
        .collect()
}
