/// A single player's per-round choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// Single-letter label used in outcome codes and wire payloads.
    pub fn letter(&self) -> char {
        match self {
            Self::Cooperate => 'C',
            Self::Defect => 'D',
        }
    }
    pub fn cooperated(&self) -> bool {
        matches!(self, Self::Cooperate)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
