use super::*;
use pd_core::*;
use rand::Rng;
use serde::Serialize;

/// A player's decision rule.
///
/// Strategies are pure: history-dependent rules receive the opponent's
/// previous action explicitly rather than carrying mutable state, so the
/// same value can be reused across independent runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    AlwaysCooperate,
    AlwaysDefect,
    /// Uniform 50/50 per round.
    Random,
    /// Cooperate with the stored probability, normalized to [0, 1].
    Probabilistic(Probability),
    /// Cooperate on round 1, then replay the opponent's previous action.
    TitForTat,
}

impl Strategy {
    /// Build a probabilistic strategy, accepting either a fraction in [0, 1]
    /// or a percentage in (1, 100]. Values outside [0, 100] are invalid.
    pub fn probabilistic(p: Probability) -> Result<Self, EngineError> {
        if !p.is_finite() {
            return Err(EngineError::InvalidConfig(
                "cooperate_probability must be a finite number".to_string(),
            ));
        }
        let p = if p > 1.0 { p / 100.0 } else { p };
        match (0.0..=1.0).contains(&p) {
            true => Ok(Self::Probabilistic(p)),
            false => Err(EngineError::InvalidConfig(format!(
                "cooperate_probability must be within [0, 100], got {}",
                p * 100.0,
            ))),
        }
    }

    /// Resolve a strategy kind string and optional probability from a request.
    /// Kind strings are case-insensitive; `tit-for-tat` is accepted as an
    /// alias of `tit_for_tat`.
    pub fn parse(kind: &str, probability: Option<Probability>) -> Result<Self, EngineError> {
        match kind.to_lowercase().as_str() {
            "always_cooperate" => Ok(Self::AlwaysCooperate),
            "always_defect" => Ok(Self::AlwaysDefect),
            "random" => Ok(Self::Random),
            "tit_for_tat" | "tit-for-tat" => Ok(Self::TitForTat),
            "probabilistic" => match probability {
                Some(p) => Self::probabilistic(p),
                None => Err(EngineError::InvalidConfig(
                    "missing cooperate_probability for probabilistic strategy".to_string(),
                )),
            },
            other => Err(EngineError::InvalidConfig(format!(
                "unsupported strategy '{}'",
                other,
            ))),
        }
    }

    /// Decide this round's action. One independent uniform draw per call
    /// for the randomized strategies. `opponent_last` is None on round 1.
    pub fn decide<R>(&self, round: Count, opponent_last: Option<Action>, rng: &mut R) -> Action
    where
        R: Rng,
    {
        match self {
            Self::AlwaysCooperate => Action::Cooperate,
            Self::AlwaysDefect => Action::Defect,
            Self::Random => match rng.random_bool(0.5) {
                true => Action::Cooperate,
                false => Action::Defect,
            },
            Self::Probabilistic(p) => match *p {
                // Exact at the extremes: no draw, no sampling error.
                p if p <= 0.0 => Action::Defect,
                p if p >= 1.0 => Action::Cooperate,
                p => match rng.random_bool(p) {
                    true => Action::Cooperate,
                    false => Action::Defect,
                },
            },
            Self::TitForTat => match round {
                1 => Action::Cooperate,
                _ => opponent_last.unwrap_or(Action::Cooperate),
            },
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            Self::Probabilistic(p) if !(0.0..=1.0).contains(p) => Err(EngineError::InvalidConfig(
                format!("cooperate_probability out of range: {}", p),
            )),
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlwaysCooperate => "always_cooperate",
            Self::AlwaysDefect => "always_defect",
            Self::Random => "random",
            Self::Probabilistic(_) => "probabilistic",
            Self::TitForTat => "tit_for_tat",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::AlwaysCooperate => "Always Cooperate",
            Self::AlwaysDefect => "Always Defect",
            Self::Random => "Random",
            Self::Probabilistic(_) => "Probabilistic",
            Self::TitForTat => "Tit for Tat",
        }
    }
    pub fn requires_probability(&self) -> bool {
        matches!(self, Self::Probabilistic(_))
    }

    /// All supported kinds, for client configuration UIs.
    pub fn catalog() -> Vec<StrategyInfo> {
        [
            Self::AlwaysCooperate,
            Self::AlwaysDefect,
            Self::Random,
            Self::Probabilistic(1.0),
            Self::TitForTat,
        ]
        .iter()
        .map(|s| StrategyInfo {
            id: s.kind(),
            label: s.label(),
            requires_probability: s.requires_probability(),
        })
        .collect()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probabilistic(p) => write!(f, "probabilistic({})", p),
            s => write!(f, "{}", s.kind()),
        }
    }
}

/// Catalog entry describing one supported strategy kind.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub requires_probability: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn constant_strategies() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(
            Strategy::AlwaysCooperate.decide(1, None, rng),
            Action::Cooperate
        );
        assert_eq!(Strategy::AlwaysDefect.decide(1, None, rng), Action::Defect);
    }
    #[test]
    fn tit_for_tat_opens_with_cooperation() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(Strategy::TitForTat.decide(1, None, rng), Action::Cooperate);
    }
    #[test]
    fn tit_for_tat_replays_opponent() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let tft = Strategy::TitForTat;
        assert_eq!(tft.decide(2, Some(Action::Defect), rng), Action::Defect);
        assert_eq!(tft.decide(3, Some(Action::Cooperate), rng), Action::Cooperate);
    }
    #[test]
    fn probabilistic_extremes_are_exact() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let always = Strategy::probabilistic(1.0).expect("valid");
        let never = Strategy::probabilistic(0.0).expect("valid");
        for round in 1..=1000 {
            assert_eq!(always.decide(round, None, rng), Action::Cooperate);
            assert_eq!(never.decide(round, None, rng), Action::Defect);
        }
    }
    #[test]
    fn percentage_form_normalizes() {
        assert_eq!(
            Strategy::probabilistic(50.0).expect("valid"),
            Strategy::Probabilistic(0.5)
        );
        assert_eq!(
            Strategy::probabilistic(0.5).expect("valid"),
            Strategy::Probabilistic(0.5)
        );
    }
    #[test]
    fn probability_out_of_range_is_invalid() {
        assert!(Strategy::probabilistic(150.0).is_err());
        assert!(Strategy::probabilistic(-0.1).is_err());
        assert!(Strategy::probabilistic(f64::NAN).is_err());
    }
    #[test]
    fn probabilistic_long_run_rate() {
        let ref mut rng = SmallRng::seed_from_u64(42);
        let s = Strategy::probabilistic(0.3).expect("valid");
        let n = 100_000;
        let coops = (0..n)
            .filter(|_| s.decide(1, None, rng).cooperated())
            .count();
        let rate = coops as f64 / n as f64;
        assert!((rate - 0.3).abs() < 0.01, "rate {} too far from 0.3", rate);
    }
    #[test]
    fn parse_kinds_and_alias() {
        assert_eq!(
            Strategy::parse("always_cooperate", None).expect("valid"),
            Strategy::AlwaysCooperate
        );
        assert_eq!(
            Strategy::parse("TIT-FOR-TAT", None).expect("valid"),
            Strategy::TitForTat
        );
        assert!(Strategy::parse("probabilistic", None).is_err());
        assert!(Strategy::parse("minimax", None).is_err());
    }
    #[test]
    fn catalog_lists_all_kinds() {
        let catalog = Strategy::catalog();
        assert_eq!(catalog.len(), 5);
        assert!(
            catalog
                .iter()
                .any(|s| s.id == "probabilistic" && s.requires_probability)
        );
    }
}
