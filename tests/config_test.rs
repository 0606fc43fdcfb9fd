use discrete_domains::Error;
use discrete_domains::config::{Config, NetworkConfig, NetworkKind};
use discrete_domains::domains::Domain;
use discrete_domains::environment::Environment;
use discrete_domains::environments::DoubleRoomWindyGridWorld;
use discrete_domains::networks::{Activation, NetworkOutput};
use tch::{Device, Kind, Tensor, nn};

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.environment.name, None);
    assert_eq!(config.environment.version, "v0");
    assert_eq!(config.network.kind, NetworkKind::Dqn);
    assert_eq!(config.network.fourier_basis_order, 3);
    assert_eq!(config.gridworld.random_action_prob, 0.1);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = Config::from_json_str(
        r#"{
            "environment": { "name": "Acrobot", "version": "v1" },
            "network": { "kind": "rainbow", "domain": "acrobot", "num_actions": 3, "activation": "tanh" },
            "gridworld": { "seed": 42 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.environment.name.as_deref(), Some("Acrobot"));
    assert_eq!(config.network.kind, NetworkKind::Rainbow);
    assert_eq!(config.network.domain, Domain::Acrobot);
    assert_eq!(config.network.domain.state_dim(), 6);
    assert_eq!(config.network.activation, Activation::Tanh);
    assert_eq!(config.network.num_atoms, 51);
    assert_eq!(config.gridworld.seed, Some(42));
    assert_eq!(config.gridworld.random_action_prob, 0.1);

    let env = config.environment.create().unwrap();
    assert_eq!(env.state_dim(), 6);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_json_str(r#"{ "network": { "kind": "ppo" } }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn config_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!("discrete_domains_{}.json", std::process::id()));
    let mut config = Config::default();
    config.network.kind = NetworkKind::FourierDqn;
    config.gridworld.random_action_prob = 0.0;
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = Config::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn network_config_builds_every_kind() {
    let state = Tensor::zeros([2, 4], (Kind::Float, Device::Cpu));
    for kind in [NetworkKind::Dqn, NetworkKind::Rainbow, NetworkKind::FourierDqn] {
        let config = NetworkConfig {
            kind,
            num_atoms: 11,
            ..NetworkConfig::default()
        };
        let mut net = config.build(nn::VarStore::new(Device::Cpu)).unwrap();
        assert_eq!(net.num_actions(), 2);

        let output = net.call(&state).unwrap();
        assert_eq!(output.q_values().size(), vec![2, 2]);
        match (kind, output) {
            (NetworkKind::Rainbow, NetworkOutput::Rainbow { probabilities, .. }) => {
                assert_eq!(probabilities.size(), vec![2, 2, 11]);
            }
            (NetworkKind::Rainbow, _) => panic!("rainbow config built a DQN network"),
            (_, output) => assert!(output.probabilities().is_none()),
        }
    }
}

#[test]
fn gridworld_config_controls_slip() {
    let config = Config::from_json_str(r#"{ "gridworld": { "random_action_prob": 0.0, "seed": 1 } }"#)
        .unwrap();
    let mut env = DoubleRoomWindyGridWorld::new(&config.gridworld);
    env.reset();
    for _ in 0..5 {
        env.step(&0).unwrap();
    }
    assert_eq!(env.current_state(), (8, 0));
}
