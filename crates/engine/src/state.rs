use super::*;
use pd_core::*;

/// Cumulative statistics for a single run, mutated round by round.
/// Owned exclusively by the worker executing the run.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    /// Rounds completed so far in this run.
    pub round: Count,
    /// Last action pair, for history-dependent strategies.
    pub last: Option<(Action, Action)>,
    pub payoff: [Payoff; N],
    pub cooperation: [Count; N],
    /// Counters indexed per [`Outcome::ALL`].
    pub outcomes: [Count; 4],
}

impl RunState {
    /// Fold one resolved round into the running totals.
    pub fn record(&mut self, result: &RoundResult) -> Result<(), EngineError> {
        self.round = checked_increment(self.round, "round counter")?;
        let (a1, a2) = result.actions;
        let (p1, p2) = result.payoffs;
        self.payoff[0] += p1;
        self.payoff[1] += p2;
        for (pos, action) in [a1, a2].into_iter().enumerate() {
            if action.cooperated() {
                self.cooperation[pos] =
                    checked_increment(self.cooperation[pos], "cooperation counter")?;
            }
        }
        let idx = result.outcome.index();
        self.outcomes[idx] = checked_increment(self.outcomes[idx], "outcome counter")?;
        if !self.payoff.iter().all(|p| p.is_finite()) {
            return Err(EngineError::Numeric(
                "payoff accumulator is no longer finite".to_string(),
            ));
        }
        self.last = Some(result.actions);
        Ok(())
    }

    /// The opponent's previous action as seen from `pos`, None on round 1.
    pub fn opponent_last(&self, pos: Position) -> Option<Action> {
        self.last.map(|(a1, a2)| match pos {
            0 => a2,
            _ => a1,
        })
    }

    /// Cumulative cooperation over rounds played so far.
    pub fn cooperation_rate(&self, pos: Position) -> f64 {
        match self.round {
            0 => 0.0,
            n => self.cooperation[pos] as f64 / n as f64,
        }
    }
}

/// Statistics combined across completed runs.
/// Accumulators are sized for rounds times runs, not per-round allocation.
#[derive(Clone, Debug, Default)]
pub struct AggregateState {
    pub payoff: [Payoff; N],
    pub cooperation: [Count; N],
    pub outcomes: [Count; 4],
    pub runs: Count,
}

impl AggregateState {
    /// Fold one completed run into the cross-run totals.
    pub fn absorb(&mut self, run: &RunState) -> Result<(), EngineError> {
        for pos in 0..N {
            self.payoff[pos] += run.payoff[pos];
            self.cooperation[pos] = self.cooperation[pos]
                .checked_add(run.cooperation[pos])
                .ok_or_else(|| overflow("cooperation total"))?;
        }
        for idx in 0..self.outcomes.len() {
            self.outcomes[idx] = self.outcomes[idx]
                .checked_add(run.outcomes[idx])
                .ok_or_else(|| overflow("outcome total"))?;
        }
        self.runs = checked_increment(self.runs, "run counter")?;
        if !self.payoff.iter().all(|p| p.is_finite()) {
            return Err(EngineError::Numeric(
                "aggregate payoff is no longer finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Total rounds across completed runs.
    pub fn rounds_played(&self, rounds_per_run: Count) -> Count {
        self.runs.saturating_mul(rounds_per_run)
    }
}

fn checked_increment(value: Count, what: &str) -> Result<Count, EngineError> {
    value.checked_add(1).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> EngineError {
    EngineError::Numeric(format!("{} overflowed", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(p1: Action, p2: Action) -> RoundResult {
        play_round((p1, p2), &PayoffMatrix::default())
    }

    #[test]
    fn records_payoffs_and_counts() {
        let mut state = RunState::default();
        state
            .record(&resolved(Action::Cooperate, Action::Defect))
            .expect("record");
        state
            .record(&resolved(Action::Defect, Action::Defect))
            .expect("record");
        assert_eq!(state.round, 2);
        assert_eq!(state.payoff, [1.0, 6.0]);
        assert_eq!(state.cooperation, [1, 0]);
        assert_eq!(state.outcomes, [0, 1, 0, 1]);
    }
    #[test]
    fn opponent_last_is_per_seat() {
        let mut state = RunState::default();
        assert_eq!(state.opponent_last(0), None);
        state
            .record(&resolved(Action::Cooperate, Action::Defect))
            .expect("record");
        assert_eq!(state.opponent_last(0), Some(Action::Defect));
        assert_eq!(state.opponent_last(1), Some(Action::Cooperate));
    }
    #[test]
    fn cooperation_rate_tracks_round_index() {
        let mut state = RunState::default();
        state
            .record(&resolved(Action::Cooperate, Action::Defect))
            .expect("record");
        state
            .record(&resolved(Action::Cooperate, Action::Cooperate))
            .expect("record");
        assert_eq!(state.cooperation_rate(0), 1.0);
        assert_eq!(state.cooperation_rate(1), 0.5);
    }
    #[test]
    fn aggregate_absorbs_runs() {
        let mut run = RunState::default();
        run.record(&resolved(Action::Defect, Action::Cooperate))
            .expect("record");
        let mut aggregate = AggregateState::default();
        aggregate.absorb(&run).expect("absorb");
        aggregate.absorb(&run).expect("absorb");
        assert_eq!(aggregate.runs, 2);
        assert_eq!(aggregate.payoff, [10.0, 0.0]);
        assert_eq!(aggregate.cooperation, [0, 2]);
        assert_eq!(aggregate.outcomes, [0, 0, 2, 0]);
    }
    #[test]
    fn counter_overflow_is_detected() {
        let mut run = RunState::default();
        run.cooperation[0] = Count::MAX;
        run.record(&resolved(Action::Cooperate, Action::Cooperate))
            .map(|_| ())
            .expect_err("overflow");
    }
    #[test]
    fn incremental_equals_recomputed() {
        // Summary statistics folded round by round must equal statistics
        // recomputed from scratch over the same history.
        let matrix = PayoffMatrix::default();
        let history = [
            (Action::Cooperate, Action::Cooperate),
            (Action::Cooperate, Action::Defect),
            (Action::Defect, Action::Defect),
            (Action::Defect, Action::Cooperate),
            (Action::Cooperate, Action::Defect),
        ];
        let mut incremental = RunState::default();
        for actions in history {
            incremental
                .record(&play_round(actions, &matrix))
                .expect("record");
        }
        let from_scratch: f64 = history
            .iter()
            .map(|&a| play_round(a, &matrix).payoffs.0)
            .sum();
        assert_eq!(incremental.payoff[0], from_scratch);
        let coops = history.iter().filter(|(a, _)| a.cooperated()).count();
        assert_eq!(incremental.cooperation[0], coops as Count);
        assert_eq!(incremental.outcomes.iter().sum::<Count>(), 5);
    }
}
