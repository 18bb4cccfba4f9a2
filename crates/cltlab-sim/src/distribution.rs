use serde::{Deserialize, Serialize};

/// Shape of a synthetic population.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionKind {
    /// Bell curve centered in the population range.
    #[default]
    Normal,
    /// Flat over the population range.
    Uniform,
    /// Mass piled up near the minimum with a long right tail.
    #[display("Skewed right")]
    SkewedRight,
    /// Mass piled up near the maximum with a long left tail.
    #[display("Skewed left")]
    SkewedLeft,
    /// Two bell curves, one on each side of the midpoint.
    Bimodal,
}

impl DistributionKind {
    /// All kinds in display order.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Uniform,
        Self::SkewedRight,
        Self::SkewedLeft,
        Self::Bimodal,
    ];

    /// Returns the kind after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns the kind before this one, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Position of this kind in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Uniform => 1,
            Self::SkewedRight => 2,
            Self::SkewedLeft => 3,
            Self::Bimodal => 4,
        }
    }
}
