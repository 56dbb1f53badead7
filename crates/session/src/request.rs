use pd_core::*;
use pd_engine::*;
use serde::Deserialize;

/// Untrusted session creation payload, as received on the wire.
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationRequest {
    pub strategies: Vec<StrategySpec>,
    #[serde(default = "defaults::rounds")]
    pub rounds: Count,
    #[serde(default = "defaults::monte_carlo_runs")]
    pub monte_carlo_runs: Count,
    pub payoffs: Option<PayoffMatrix>,
    pub batch_size: Option<usize>,
}

/// One requested strategy, by kind string.
#[derive(Clone, Debug, Deserialize)]
pub struct StrategySpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub cooperate_probability: Option<Probability>,
}

mod defaults {
    use pd_core::Count;
    pub fn rounds() -> Count {
        100
    }
    pub fn monte_carlo_runs() -> Count {
        1
    }
}

impl TryFrom<SimulationRequest> for SimulationConfig {
    type Error = EngineError;

    /// Resolve kind strings and fill defaults. Range checks happen at
    /// session creation via [`SimulationConfig::validate`].
    fn try_from(request: SimulationRequest) -> Result<Self, Self::Error> {
        let [p1, p2] = request.strategies.as_slice() else {
            return Err(EngineError::InvalidConfig(
                "exactly two player strategies are required".to_string(),
            ));
        };
        let strategies = [
            Strategy::parse(&p1.kind, p1.cooperate_probability)?,
            Strategy::parse(&p2.kind, p2.cooperate_probability)?,
        ];
        let mut config = SimulationConfig::new(strategies, request.rounds, request.monte_carlo_runs);
        if let Some(payoffs) = request.payoffs {
            config = config.with_payoffs(payoffs);
        }
        if let Some(batch_size) = request.batch_size {
            // Batches larger than a run never fill; clamp to the run length.
            config = config.with_batch_size(batch_size.min(request.rounds as usize).max(1));
        }
        Ok(config)
    }
}
