use super::*;

/// Two-letter label naming a round's action pair, player one first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    CC,
    CD,
    DC,
    DD,
}

impl Outcome {
    /// Canonical ordering used for outcome counters and wire payloads.
    pub const ALL: [Self; 4] = [Self::CC, Self::CD, Self::DC, Self::DD];

    pub fn code(&self) -> &'static str {
        match self {
            Self::CC => "CC",
            Self::CD => "CD",
            Self::DC => "DC",
            Self::DD => "DD",
        }
    }
    /// Index into counter arrays, consistent with [`Self::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::CC => 0,
            Self::CD => 1,
            Self::DC => 2,
            Self::DD => 3,
        }
    }
}

impl From<(Action, Action)> for Outcome {
    fn from((p1, p2): (Action, Action)) -> Self {
        match (p1, p2) {
            (Action::Cooperate, Action::Cooperate) => Self::CC,
            (Action::Cooperate, Action::Defect) => Self::CD,
            (Action::Defect, Action::Cooperate) => Self::DC,
            (Action::Defect, Action::Defect) => Self::DD,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn codes_follow_action_pair() {
        assert_eq!(Outcome::from((Action::Cooperate, Action::Cooperate)).code(), "CC");
        assert_eq!(Outcome::from((Action::Cooperate, Action::Defect)).code(), "CD");
        assert_eq!(Outcome::from((Action::Defect, Action::Cooperate)).code(), "DC");
        assert_eq!(Outcome::from((Action::Defect, Action::Defect)).code(), "DD");
    }
    #[test]
    fn indices_match_canonical_order() {
        for (i, outcome) in Outcome::ALL.iter().enumerate() {
            assert_eq!(outcome.index(), i);
        }
    }
}
