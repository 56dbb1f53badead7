use pd_core::*;
use pd_engine::*;
use serde::Serialize;

/// Per-player values in wire payloads, always keyed player1/player2.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PerPlayer<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> From<(T, T)> for PerPlayer<T> {
    fn from((player1, player2): (T, T)) -> Self {
        Self { player1, player2 }
    }
}
impl<T> From<[T; N]> for PerPlayer<T> {
    fn from([player1, player2]: [T; N]) -> Self {
        Self { player1, player2 }
    }
}

/// Per-outcome values keyed by outcome code, in canonical CC/CD/DC/DD order.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PerOutcome<T> {
    #[serde(rename = "CC")]
    pub cc: T,
    #[serde(rename = "CD")]
    pub cd: T,
    #[serde(rename = "DC")]
    pub dc: T,
    #[serde(rename = "DD")]
    pub dd: T,
}

impl<T> From<[T; 4]> for PerOutcome<T> {
    fn from([cc, cd, dc, dd]: [T; 4]) -> Self {
        Self { cc, cd, dc, dd }
    }
}

/// One round's progress snapshot. Totals reset at run boundaries;
/// `cumulative_round` alone counts across the whole simulation.
#[derive(Clone, Debug, Serialize)]
pub struct RoundUpdate {
    pub run: Count,
    pub round: Count,
    pub cumulative_round: Count,
    pub actions: PerPlayer<char>,
    pub outcome_code: &'static str,
    pub cooperated: PerPlayer<bool>,
    pub round_payoff: PerPlayer<Payoff>,
    pub total_payoff: PerPlayer<Payoff>,
    pub cumulative_cooperation: PerPlayer<Count>,
    pub cooperation_rate: PerPlayer<f64>,
    pub outcome_counts: PerOutcome<Count>,
}

impl RoundUpdate {
    /// Snapshot state immediately after the round was recorded.
    pub fn new(run: Count, cumulative_round: Count, result: &RoundResult, state: &RunState) -> Self {
        let (a1, a2) = result.actions;
        Self {
            run,
            round: state.round,
            cumulative_round,
            actions: PerPlayer::from((a1.letter(), a2.letter())),
            outcome_code: result.outcome.code(),
            cooperated: PerPlayer::from((a1.cooperated(), a2.cooperated())),
            round_payoff: PerPlayer::from(result.payoffs),
            total_payoff: PerPlayer::from(state.payoff),
            cumulative_cooperation: PerPlayer::from(state.cooperation),
            cooperation_rate: PerPlayer::from((state.cooperation_rate(0), state.cooperation_rate(1))),
            outcome_counts: PerOutcome::from(state.outcomes),
        }
    }
}

/// Per-run statistics emitted when a run finishes.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub run: Count,
    pub total_payoff: PerPlayer<Payoff>,
    pub total_cooperation: PerPlayer<Count>,
    pub average_payoff_per_round: PerPlayer<f64>,
    pub cooperation_rate: PerPlayer<f64>,
    pub outcome_counts: PerOutcome<Count>,
}

impl RunReport {
    pub fn new(run: Count, state: &RunState) -> Self {
        let rounds = state.round.max(1) as f64;
        Self {
            run,
            total_payoff: PerPlayer::from(state.payoff),
            total_cooperation: PerPlayer::from(state.cooperation),
            average_payoff_per_round: PerPlayer::from((
                state.payoff[0] / rounds,
                state.payoff[1] / rounds,
            )),
            cooperation_rate: PerPlayer::from((state.cooperation_rate(0), state.cooperation_rate(1))),
            outcome_counts: PerOutcome::from(state.outcomes),
        }
    }
}

/// Final cross-run statistics, emitted exactly once per completed session.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub runs: Count,
    pub rounds: Count,
    pub total_payoff: PerPlayer<Payoff>,
    pub average_payoff_per_round: PerPlayer<f64>,
    pub cooperation_rate: PerPlayer<f64>,
    pub total_cooperation: PerPlayer<Count>,
    pub outcome_counts: PerOutcome<Count>,
    pub outcome_distribution: PerOutcome<f64>,
    pub payoffs: PayoffMatrix,
}

impl Summary {
    pub fn new(aggregate: &AggregateState, config: &SimulationConfig) -> Self {
        let played = aggregate.rounds_played(config.rounds).max(1) as f64;
        Self {
            runs: aggregate.runs,
            rounds: config.rounds,
            total_payoff: PerPlayer::from(aggregate.payoff),
            average_payoff_per_round: PerPlayer::from((
                aggregate.payoff[0] / played,
                aggregate.payoff[1] / played,
            )),
            cooperation_rate: PerPlayer::from((
                aggregate.cooperation[0] as f64 / played,
                aggregate.cooperation[1] as f64 / played,
            )),
            total_cooperation: PerPlayer::from(aggregate.cooperation),
            outcome_counts: PerOutcome::from(aggregate.outcomes),
            outcome_distribution: PerOutcome::from(
                aggregate.outcomes.map(|count| count as f64 / played),
            ),
            payoffs: config.payoffs,
        }
    }
}

/// Events delivered to the consumer, in the exact order emitted.
#[derive(Clone, Debug)]
pub enum StreamEvent {
    Round(RoundUpdate),
    /// An ordered slice of consecutive rounds, coalesced for volume.
    RoundBatch(Vec<RoundUpdate>),
    RunComplete(RunReport),
    Summary(Summary),
    Error(String),
}

impl StreamEvent {
    /// SSE event name for this payload.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Round(_) => "round",
            Self::RoundBatch(_) => "round_batch",
            Self::RunComplete(_) => "run_complete",
            Self::Summary(_) => "summary",
            Self::Error(_) => "error",
        }
    }
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct Batch<'a> {
            rounds: &'a [RoundUpdate],
        }
        #[derive(Serialize)]
        struct Failure<'a> {
            error: &'a str,
        }
        match self {
            Self::Round(update) => serde_json::to_string(update),
            Self::RoundBatch(rounds) => serde_json::to_string(&Batch { rounds }),
            Self::RunComplete(report) => serde_json::to_string(report),
            Self::Summary(summary) => serde_json::to_string(summary),
            Self::Error(error) => serde_json::to_string(&Failure { error }),
        }
        .expect("serialize stream event")
    }
    /// Format as one SSE block: event name line, data line, blank line.
    pub fn to_sse(&self) -> String {
        format!("event: {}\ndata: {}\n\n", self.name(), self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_update() -> RoundUpdate {
        let matrix = PayoffMatrix::default();
        let result = play_round((Action::Cooperate, Action::Defect), &matrix);
        let mut state = RunState::default();
        state.record(&result).expect("record");
        RoundUpdate::new(1, 1, &result, &state)
    }

    #[test]
    fn round_payload_fields() {
        let update = sample_update();
        let json: serde_json::Value =
            serde_json::from_str(&StreamEvent::Round(update).to_json()).expect("parse");
        assert_eq!(json["run"], 1);
        assert_eq!(json["round"], 1);
        assert_eq!(json["actions"]["player1"], "C");
        assert_eq!(json["actions"]["player2"], "D");
        assert_eq!(json["outcome_code"], "CD");
        assert_eq!(json["round_payoff"]["player2"], 5.0);
        assert_eq!(json["cooperation_rate"]["player1"], 1.0);
        assert_eq!(json["outcome_counts"]["CD"], 1);
        assert_eq!(json["outcome_counts"]["CC"], 0);
    }
    #[test]
    fn batch_payload_wraps_rounds() {
        let event = StreamEvent::RoundBatch(vec![sample_update(), sample_update()]);
        let json: serde_json::Value = serde_json::from_str(&event.to_json()).expect("parse");
        assert_eq!(json["rounds"].as_array().expect("array").len(), 2);
    }
    #[test]
    fn outcome_counts_keyed_by_code() {
        let json = serde_json::to_string(&PerOutcome::from([1u64, 2, 3, 4])).expect("serialize");
        assert_eq!(json, r#"{"CC":1,"CD":2,"DC":3,"DD":4}"#);
    }
    #[test]
    fn sse_framing() {
        let event = StreamEvent::Error("boom".to_string());
        assert_eq!(event.to_sse(), "event: error\ndata: {\"error\":\"boom\"}\n\n");
    }
    #[test]
    fn event_names() {
        assert_eq!(StreamEvent::Round(sample_update()).name(), "round");
        assert_eq!(StreamEvent::RoundBatch(Vec::new()).name(), "round_batch");
        assert_eq!(StreamEvent::Error(String::new()).name(), "error");
    }
}
