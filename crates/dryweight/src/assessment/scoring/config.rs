use serde::{Deserialize, Serialize};

/// Canonical cutoffs for every classifier. `Default` is the reference set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub fluid: FluidThresholds,
    pub cardiac: CardiacThresholds,
    pub nutrition: NutritionThresholds,
    pub salt: SaltThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidThresholds {
    pub underfilled_above_pwi: f64,
    pub overfilled_below_pwi: f64,
    pub low_systolic_bp: f64,
    pub high_systolic_bp: f64,
    /// When set, a missing systolic BP leaves fluid status unevaluated instead
    /// of defaulting the 2.0..=4.0 PWI range to optimal.
    pub requires_blood_pressure: bool,
}

impl Default for FluidThresholds {
    fn default() -> Self {
        Self {
            underfilled_above_pwi: 4.0,
            overfilled_below_pwi: 2.0,
            low_systolic_bp: 100.0,
            high_systolic_bp: 160.0,
            requires_blood_pressure: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardiacThresholds {
    pub male_ctr_pct: f64,
    pub female_ctr_pct: f64,
    pub ctr_rapid_increase_pct: f64,
    pub nt_probnp_high_concern_from: f64,
    pub bnp_high_concern_from: Option<f64>,
    pub hanp_high_concern_from: Option<f64>,
}

impl Default for CardiacThresholds {
    fn default() -> Self {
        Self {
            male_ctr_pct: 50.0,
            female_ctr_pct: 55.0,
            ctr_rapid_increase_pct: 5.0,
            nt_probnp_high_concern_from: 8000.0,
            bnp_high_concern_from: None,
            hanp_high_concern_from: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionThresholds {
    pub gnri_high_risk_below: f64,
    pub gnri_low_risk_from: f64,
    pub nri_high_risk_from: u8,
    pub nri_medium_risk_from: u8,
}

impl Default for NutritionThresholds {
    fn default() -> Self {
        Self {
            gnri_high_risk_below: 90.0,
            gnri_low_risk_from: 98.0,
            nri_high_risk_from: 10,
            nri_medium_risk_from: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaltThresholds {
    /// Grams of salt per day attributed to each kg of interdialytic gain.
    pub grams_per_kg: f64,
    pub high_risk_above_g: f64,
}

impl Default for SaltThresholds {
    fn default() -> Self {
        Self {
            grams_per_kg: 3.22,
            high_risk_above_g: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_reference_cutoffs() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"nutrition":{"gnri_high_risk_below":92.0}}"#)
                .expect("config parses");

        assert_eq!(config.nutrition.gnri_high_risk_below, 92.0);
        assert_eq!(config.nutrition.gnri_low_risk_from, 98.0);
        assert_eq!(config.fluid, FluidThresholds::default());
        assert_eq!(config.salt.grams_per_kg, 3.22);
    }
}
