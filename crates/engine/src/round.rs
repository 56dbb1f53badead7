use super::*;
use pd_core::*;

/// One resolved round: the action pair, per-player payoffs, and outcome code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundResult {
    pub actions: (Action, Action),
    pub payoffs: (Payoff, Payoff),
    pub outcome: Outcome,
}

/// Resolve one action pair against the payoff matrix.
/// No side effects; the caller updates cumulative state.
pub fn play_round(actions: (Action, Action), matrix: &PayoffMatrix) -> RoundResult {
    let outcome = Outcome::from(actions);
    RoundResult {
        actions,
        payoffs: matrix.payout(outcome),
        outcome,
    }
}
