use super::*;
use pd_core::*;

/// Complete, validated configuration for one simulation session.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub strategies: [Strategy; N],
    pub rounds: Count,
    pub monte_carlo_runs: Count,
    pub payoffs: PayoffMatrix,
    /// Rounds coalesced per emitted unit; 1 means unbatched.
    pub batch_size: usize,
}

impl SimulationConfig {
    pub fn new(strategies: [Strategy; N], rounds: Count, monte_carlo_runs: Count) -> Self {
        Self {
            strategies,
            rounds,
            monte_carlo_runs,
            payoffs: PayoffMatrix::default(),
            batch_size: 1,
        }
    }
    pub fn with_payoffs(mut self, payoffs: PayoffMatrix) -> Self {
        self.payoffs = payoffs;
        self
    }
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rounds < 1 || self.rounds > MAX_ROUNDS {
            return Err(EngineError::InvalidConfig(format!(
                "rounds must be between 1 and {}, got {}",
                MAX_ROUNDS, self.rounds,
            )));
        }
        if self.monte_carlo_runs < 1 {
            return Err(EngineError::InvalidConfig(
                "monte_carlo_runs must be at least 1".to_string(),
            ));
        }
        if self.batch_size < 1 {
            return Err(EngineError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        self.payoffs.validate()?;
        for strategy in &self.strategies {
            strategy.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SimulationConfig {
        SimulationConfig::new([Strategy::AlwaysCooperate, Strategy::AlwaysDefect], 100, 1)
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }
    #[test]
    fn round_bounds_are_enforced() {
        let mut config = base();
        config.rounds = 0;
        assert!(config.validate().is_err());
        config.rounds = MAX_ROUNDS;
        assert!(config.validate().is_ok());
        config.rounds = MAX_ROUNDS + 1;
        assert!(config.validate().is_err());
    }
    #[test]
    fn run_count_must_be_positive() {
        let mut config = base();
        config.monte_carlo_runs = 0;
        assert!(config.validate().is_err());
    }
    #[test]
    fn batch_size_must_be_positive() {
        let config = base().with_batch_size(0);
        assert!(config.validate().is_err());
    }
    #[test]
    fn strategy_probability_is_checked() {
        let mut config = base();
        config.strategies[0] = Strategy::Probabilistic(1.5);
        assert!(config.validate().is_err());
    }
}
