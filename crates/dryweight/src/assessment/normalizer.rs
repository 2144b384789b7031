use super::domain::{DerivedValues, PatientInput, RawPatientInput, DEFAULT_TARGET_BMI};

/// Applies the sentinel-as-absence rule: zero and non-finite readings are not provided.
pub(crate) fn provided(value: Option<f64>) -> Option<f64> {
    value.filter(|reading| reading.is_finite() && *reading != 0.0)
}

/// Cleans a raw record and computes the derived quantities.
///
/// Missing data is never an error; absence propagates into every derived
/// value that depends on it.
pub fn normalize(raw: &RawPatientInput) -> (PatientInput, DerivedValues) {
    let input = PatientInput {
        patient_ref: raw
            .patient_ref
            .as_deref()
            .map(str::trim)
            .filter(|reference| !reference.is_empty())
            .map(str::to_string),
        age: provided(raw.age),
        sex: raw.sex,
        height_cm: provided(raw.height_cm),
        pre_weight_kg: provided(raw.pre_weight_kg),
        post_weight_kg: provided(raw.post_weight_kg),
        dry_weight_kg: provided(raw.dry_weight_kg),
        target_bmi: provided(raw.target_bmi).unwrap_or(DEFAULT_TARGET_BMI),
        entered_ideal_weight_kg: provided(raw.ideal_weight_kg),
        pre_total_protein: provided(raw.pre_total_protein),
        post_total_protein: provided(raw.post_total_protein),
        pre_hematocrit: provided(raw.pre_hematocrit),
        post_hematocrit: provided(raw.post_hematocrit),
        pre_sodium: provided(raw.pre_sodium),
        post_sodium: provided(raw.post_sodium),
        entered_kr: provided(raw.kr),
        entered_pwi: provided(raw.pwi),
        systolic_bp: provided(raw.systolic_bp),
        ctr_current_pct: provided(raw.ctr_current_pct),
        ctr_previous_pct: provided(raw.ctr_previous_pct),
        arrhythmia: raw.arrhythmia.unwrap_or(false),
        hanp: provided(raw.hanp),
        bnp: provided(raw.bnp),
        nt_probnp: provided(raw.nt_probnp),
        albumin: provided(raw.albumin),
        creatinine: provided(raw.creatinine),
        total_cholesterol: provided(raw.total_cholesterol),
    };

    let derived = derive(&input);
    (input, derived)
}

/// Pure derivation over an already-normalised input.
pub fn derive(input: &PatientInput) -> DerivedValues {
    let height_m = input.height_cm.map(|cm| cm / 100.0);

    let delta_bw_kg = input
        .pre_weight_kg
        .zip(input.post_weight_kg)
        .map(|(pre, post)| pre - post);

    let ideal_weight_kg = input
        .entered_ideal_weight_kg
        .or_else(|| height_m.map(|m| m * m * input.target_bmi));

    let kr = input.entered_kr.or_else(|| {
        input
            .pre_hematocrit
            .zip(input.post_hematocrit)
            .map(|(pre, post)| pre - post)
    });

    let pwi = input.entered_pwi.or_else(|| {
        input
            .post_total_protein
            .zip(input.pre_total_protein)
            .map(|(post, pre)| post - pre)
    });

    let bmi = input
        .post_weight_kg
        .zip(height_m)
        .map(|(weight, m)| weight / (m * m));

    DerivedValues {
        delta_bw_kg,
        ideal_weight_kg,
        kr,
        pwi,
        bmi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) {
        let value = actual.expect("value should be provided");
        assert!(
            (value - expected).abs() < 1e-9,
            "expected {expected}, got {value}"
        );
    }

    #[test]
    fn zero_and_non_finite_readings_are_not_provided() {
        let raw = RawPatientInput {
            albumin: Some(0.0),
            creatinine: Some(f64::NAN),
            total_cholesterol: Some(f64::INFINITY),
            pre_weight_kg: Some(62.0),
            ..RawPatientInput::default()
        };

        let (input, _) = normalize(&raw);

        assert!(input.albumin.is_none());
        assert!(input.creatinine.is_none());
        assert!(input.total_cholesterol.is_none());
        assert_eq!(input.pre_weight_kg, Some(62.0));
    }

    #[test]
    fn derives_values_from_complete_pairs() {
        let raw = RawPatientInput {
            height_cm: Some(160.0),
            pre_weight_kg: Some(57.5),
            post_weight_kg: Some(55.0),
            pre_total_protein: Some(6.4),
            post_total_protein: Some(7.2),
            pre_hematocrit: Some(33.0),
            post_hematocrit: Some(36.5),
            ..RawPatientInput::default()
        };

        let (input, derived) = normalize(&raw);

        assert_eq!(input.target_bmi, DEFAULT_TARGET_BMI);
        approx(derived.delta_bw_kg, 2.5);
        approx(derived.ideal_weight_kg, 1.6 * 1.6 * 22.0);
        approx(derived.kr, -3.5);
        approx(derived.pwi, 0.8);
        approx(derived.bmi, 55.0 / (1.6 * 1.6));
    }

    #[test]
    fn absence_propagates_into_derived_values() {
        let raw = RawPatientInput {
            pre_weight_kg: Some(60.0),
            pre_total_protein: Some(6.5),
            post_hematocrit: Some(35.0),
            ..RawPatientInput::default()
        };

        let (_, derived) = normalize(&raw);

        assert_eq!(derived, DerivedValues::default());
    }

    #[test]
    fn entered_values_take_precedence_over_derivations() {
        let raw = RawPatientInput {
            height_cm: Some(170.0),
            ideal_weight_kg: Some(58.0),
            pre_hematocrit: Some(30.0),
            post_hematocrit: Some(34.0),
            kr: Some(1.2),
            pwi: Some(3.1),
            ..RawPatientInput::default()
        };

        let (_, derived) = normalize(&raw);

        approx(derived.ideal_weight_kg, 58.0);
        approx(derived.kr, 1.2);
        approx(derived.pwi, 3.1);
    }

    #[test]
    fn negative_weight_gain_passes_through() {
        let raw = RawPatientInput {
            pre_weight_kg: Some(54.0),
            post_weight_kg: Some(55.0),
            ..RawPatientInput::default()
        };

        let (_, derived) = normalize(&raw);

        approx(derived.delta_bw_kg, -1.0);
    }

    #[test]
    fn computed_zero_is_still_provided() {
        let raw = RawPatientInput {
            pre_hematocrit: Some(34.0),
            post_hematocrit: Some(34.0),
            ..RawPatientInput::default()
        };

        let (_, derived) = normalize(&raw);

        approx(derived.kr, 0.0);
    }

    #[test]
    fn blank_patient_reference_is_dropped() {
        let raw = RawPatientInput {
            patient_ref: Some("   ".to_string()),
            arrhythmia: None,
            ..RawPatientInput::default()
        };

        let (input, _) = normalize(&raw);

        assert!(input.patient_ref.is_none());
        assert!(!input.arrhythmia);
    }
}
