use serde::{Deserialize, Serialize};

/// Strength band for an entropy estimate, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthBand {
    Weak,
    Medium,
    Strong,
    #[serde(rename = "Military Grade")]
    MilitaryGrade,
}

impl StrengthBand {
    /// Maps an entropy estimate (in bits) to its band.
    ///
    /// Boundaries are inclusive on the upper band: exactly 40 bits is
    /// Medium, exactly 60 is Strong, exactly 80 is Military Grade.
    pub fn classify(entropy_bits: f64) -> Self {
        if entropy_bits < 40.0 {
            StrengthBand::Weak
        } else if entropy_bits < 60.0 {
            StrengthBand::Medium
        } else if entropy_bits < 80.0 {
            StrengthBand::Strong
        } else {
            StrengthBand::MilitaryGrade
        }
    }

    /// UI label for the band.
    pub fn label(&self) -> &'static str {
        match self {
            StrengthBand::Weak => "Weak",
            StrengthBand::Medium => "Medium",
            StrengthBand::Strong => "Strong",
            StrengthBand::MilitaryGrade => "Military Grade",
        }
    }
}

/// Entropy estimate plus its band, as returned by the strength estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthReport {
    pub entropy_bits: f64,
    pub band: StrengthBand,
}
