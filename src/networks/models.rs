use tch::{Kind, Tensor, nn, nn::Module};

use crate::domains::Domain;
use crate::error::{Error, Result};
use crate::networks::basic::{Activation, BasicDiscreteDomainNetwork, check_batched};
use crate::networks::fourier::FourierBasis;
use crate::networks::{NetworkOutput, QNetwork};

pub const DEFAULT_FOURIER_BASIS_ORDER: usize = 3;

/// DQN-style network: one Q-value per action.
pub struct DqnNetwork {
    net: BasicDiscreteDomainNetwork,
    var_store: nn::VarStore,
}

impl DqnNetwork {
    pub fn new(
        vs: nn::VarStore,
        min_vals: &[f32],
        max_vals: &[f32],
        num_actions: usize,
        activation: Activation,
    ) -> Result<Self> {
        let net = BasicDiscreteDomainNetwork::new(
            &vs.root(),
            min_vals,
            max_vals,
            num_actions,
            None,
            activation,
        )?;
        Ok(Self { net, var_store: vs })
    }

    pub fn for_domain(vs: nn::VarStore, domain: Domain, num_actions: usize) -> Result<Self> {
        Self::new(
            vs,
            domain.min_vals(),
            domain.max_vals(),
            num_actions,
            Activation::default(),
        )
    }

    pub fn cartpole(vs: nn::VarStore, num_actions: usize) -> Result<Self> {
        Self::for_domain(vs, Domain::Cartpole, num_actions)
    }

    pub fn acrobot(vs: nn::VarStore, num_actions: usize) -> Result<Self> {
        Self::for_domain(vs, Domain::Acrobot, num_actions)
    }

    pub fn trunk(&self) -> &BasicDiscreteDomainNetwork {
        &self.net
    }
}

impl QNetwork for DqnNetwork {
    fn call(&mut self, state: &Tensor) -> Result<NetworkOutput> {
        let q_values = self.net.forward(state)?;
        Ok(NetworkOutput::Dqn { q_values })
    }

    fn num_actions(&self) -> usize {
        self.net.num_actions()
    }

    fn var_store(&self) -> &nn::VarStore {
        &self.var_store
    }
}

/// Rainbow-style network: a categorical distribution over `support` per action.
pub struct RainbowNetwork {
    net: BasicDiscreteDomainNetwork,
    var_store: nn::VarStore,
    num_actions: usize,
    num_atoms: usize,
    support: Tensor,
}

impl RainbowNetwork {
    pub fn new(
        vs: nn::VarStore,
        min_vals: &[f32],
        max_vals: &[f32],
        num_actions: usize,
        num_atoms: usize,
        support: Tensor,
        activation: Activation,
    ) -> Result<Self> {
        let support_len = support.numel();
        if support_len != num_atoms {
            return Err(Error::ShapeMismatch {
                what: "support",
                expected: num_atoms,
                actual: support_len,
            });
        }
        let net = BasicDiscreteDomainNetwork::new(
            &vs.root(),
            min_vals,
            max_vals,
            num_actions,
            Some(num_atoms),
            activation,
        )?;
        let support = support.to_kind(Kind::Float).to_device(vs.device());
        Ok(Self {
            net,
            var_store: vs,
            num_actions,
            num_atoms,
            support,
        })
    }

    pub fn for_domain(
        vs: nn::VarStore,
        domain: Domain,
        num_actions: usize,
        num_atoms: usize,
        support: Tensor,
    ) -> Result<Self> {
        Self::new(
            vs,
            domain.min_vals(),
            domain.max_vals(),
            num_actions,
            num_atoms,
            support,
            Activation::default(),
        )
    }

    pub fn cartpole(
        vs: nn::VarStore,
        num_actions: usize,
        num_atoms: usize,
        support: Tensor,
    ) -> Result<Self> {
        Self::for_domain(vs, Domain::Cartpole, num_actions, num_atoms, support)
    }

    pub fn acrobot(
        vs: nn::VarStore,
        num_actions: usize,
        num_atoms: usize,
        support: Tensor,
    ) -> Result<Self> {
        Self::for_domain(vs, Domain::Acrobot, num_actions, num_atoms, support)
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    pub fn support(&self) -> &Tensor {
        &self.support
    }
}

impl QNetwork for RainbowNetwork {
    fn call(&mut self, state: &Tensor) -> Result<NetworkOutput> {
        let x = self.net.forward(state)?;
        let logits = x.f_view([-1, self.num_actions as i64, self.num_atoms as i64])?;
        // softmax 沿 atom 维度
        let probabilities = logits.softmax(-1, Kind::Float);
        let q_values = (&self.support * &probabilities).sum_dim_intlist(&[2i64][..], false, Kind::Float);
        Ok(NetworkOutput::Rainbow {
            q_values,
            logits,
            probabilities,
        })
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn var_store(&self) -> &nn::VarStore {
        &self.var_store
    }
}

/// Feature generator that can only be built once the input width is known.
enum FeatureGenerator {
    Pending,
    Built {
        basis: FourierBasis,
        last_layer: nn::Linear,
    },
}

/// Linear approximator over Fourier basis features, without bias.
///
/// The basis and the output layer are created on the first [`QNetwork::call`],
/// so their variables only appear in the var store after that call. Build
/// optimizers afterwards.
pub struct FourierDqnNetwork {
    var_store: nn::VarStore,
    min_vals: Vec<f32>,
    max_vals: Option<Vec<f32>>,
    num_actions: usize,
    fourier_basis_order: usize,
    generator: FeatureGenerator,
}

impl FourierDqnNetwork {
    pub fn new(
        vs: nn::VarStore,
        min_vals: &[f32],
        max_vals: Option<&[f32]>,
        num_actions: usize,
        fourier_basis_order: usize,
    ) -> Self {
        Self {
            var_store: vs,
            min_vals: min_vals.to_vec(),
            max_vals: max_vals.map(<[f32]>::to_vec),
            num_actions,
            fourier_basis_order,
            generator: FeatureGenerator::Pending,
        }
    }

    pub fn for_domain(vs: nn::VarStore, domain: Domain, num_actions: usize) -> Self {
        Self::new(
            vs,
            domain.min_vals(),
            Some(domain.max_vals()),
            num_actions,
            DEFAULT_FOURIER_BASIS_ORDER,
        )
    }

    pub fn cartpole(vs: nn::VarStore, num_actions: usize) -> Self {
        Self::for_domain(vs, Domain::Cartpole, num_actions)
    }

    pub fn acrobot(vs: nn::VarStore, num_actions: usize) -> Self {
        Self::for_domain(vs, Domain::Acrobot, num_actions)
    }

    pub fn fourier_basis_order(&self) -> usize {
        self.fourier_basis_order
    }

    /// `None` until the first call.
    pub fn feature_generator(&self) -> Option<&FourierBasis> {
        match &self.generator {
            FeatureGenerator::Pending => None,
            FeatureGenerator::Built { basis, .. } => Some(basis),
        }
    }

    fn ensure_built(&mut self, width: usize) -> Result<()> {
        if let FeatureGenerator::Built { basis, .. } = &self.generator {
            if basis.nvars() != width {
                return Err(Error::ShapeMismatch {
                    what: "state",
                    expected: basis.nvars(),
                    actual: width,
                });
            }
            return Ok(());
        }

        let basis = FourierBasis::with_bounds(
            width,
            &self.min_vals,
            self.max_vals.as_deref(),
            self.fourier_basis_order,
        )?
        .to_device(self.var_store.device());
        let last_layer = nn::linear(
            &self.var_store.root() / "fully_connected",
            basis.num_features() as i64,
            self.num_actions as i64,
            nn::LinearConfig {
                bias: false,
                ..Default::default()
            },
        );
        tracing::debug!(
            width,
            num_features = basis.num_features(),
            "fourier feature generator initialized"
        );
        self.generator = FeatureGenerator::Built { basis, last_layer };
        Ok(())
    }
}

impl QNetwork for FourierDqnNetwork {
    fn call(&mut self, state: &Tensor) -> Result<NetworkOutput> {
        check_batched(state)?;
        let x = state.to_kind(Kind::Float).flatten(1, -1);
        self.ensure_built(x.size()[1] as usize)?;
        let FeatureGenerator::Built { basis, last_layer } = &self.generator else {
            unreachable!("feature generator is built above");
        };
        let features = basis.compute_features(&x);
        Ok(NetworkOutput::Dqn {
            q_values: last_layer.forward(&features),
        })
    }

    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn var_store(&self) -> &nn::VarStore {
        &self.var_store
    }
}
