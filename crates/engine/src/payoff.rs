use super::*;
use pd_core::*;
use serde::Deserialize;
use serde::Serialize;

/// The four scalar payoffs defining game payouts.
/// Immutable per session once created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    #[serde(default = "defaults::reward")]
    pub reward: Payoff,
    #[serde(default = "defaults::temptation")]
    pub temptation: Payoff,
    #[serde(default = "defaults::sucker")]
    pub sucker: Payoff,
    #[serde(default = "defaults::punishment")]
    pub punishment: Payoff,
}

mod defaults {
    use pd_core::*;
    pub fn reward() -> Payoff {
        DEFAULT_REWARD
    }
    pub fn temptation() -> Payoff {
        DEFAULT_TEMPTATION
    }
    pub fn sucker() -> Payoff {
        DEFAULT_SUCKER
    }
    pub fn punishment() -> Payoff {
        DEFAULT_PUNISHMENT
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            reward: DEFAULT_REWARD,
            temptation: DEFAULT_TEMPTATION,
            sucker: DEFAULT_SUCKER,
            punishment: DEFAULT_PUNISHMENT,
        }
    }
}

impl PayoffMatrix {
    /// Per-player payouts for an outcome, player one first.
    /// This lookup is the only place payoff semantics are defined.
    pub fn payout(&self, outcome: Outcome) -> (Payoff, Payoff) {
        match outcome {
            Outcome::CC => (self.reward, self.reward),
            Outcome::CD => (self.sucker, self.temptation),
            Outcome::DC => (self.temptation, self.sucker),
            Outcome::DD => (self.punishment, self.punishment),
        }
    }
    pub fn validate(&self) -> Result<(), EngineError> {
        let values = [self.reward, self.temptation, self.sucker, self.punishment];
        match values.iter().all(|v| v.is_finite()) {
            true => Ok(()),
            false => Err(EngineError::InvalidConfig(
                "payoff values must be finite numbers".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_matrix() {
        let matrix = PayoffMatrix::default();
        assert_eq!(matrix.reward, 3.0);
        assert_eq!(matrix.temptation, 5.0);
        assert_eq!(matrix.sucker, 0.0);
        assert_eq!(matrix.punishment, 1.0);
    }
    #[test]
    fn canonical_payouts() {
        let matrix = PayoffMatrix::default();
        assert_eq!(matrix.payout(Outcome::CC), (3.0, 3.0));
        assert_eq!(matrix.payout(Outcome::CD), (0.0, 5.0));
        assert_eq!(matrix.payout(Outcome::DC), (5.0, 0.0));
        assert_eq!(matrix.payout(Outcome::DD), (1.0, 1.0));
    }
    #[test]
    fn rejects_non_finite_values() {
        let mut matrix = PayoffMatrix::default();
        matrix.temptation = f64::NAN;
        assert!(matrix.validate().is_err());
    }
    #[test]
    fn partial_json_fills_defaults() {
        let matrix: PayoffMatrix = serde_json::from_str(r#"{"reward": 4.0}"#).expect("parse");
        assert_eq!(matrix.reward, 4.0);
        assert_eq!(matrix.temptation, 5.0);
        assert_eq!(matrix.punishment, 1.0);
    }
}
