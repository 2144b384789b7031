use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::assessment::domain::{RawPatientInput, Sex};
use crate::assessment::model::{
    ModelError, ModelFeatures, ModelSlot, TendencyLabel, TendencyModel,
};

/// Male patient with every field the classifiers consume.
///
/// ΔBW 2.5 kg, PWI 3.0, Kr 3.0, BP 130, CTR 52 % (previous 49 %),
/// NT-proBNP 9000, GNRI 14.89 × 3.8 + 41.7 × 55 / 58.
pub(super) fn reference_patient() -> RawPatientInput {
    RawPatientInput {
        patient_ref: Some("HD-0042".to_string()),
        age: Some(72.0),
        sex: Some(Sex::Male),
        height_cm: Some(160.0),
        pre_weight_kg: Some(57.5),
        post_weight_kg: Some(55.0),
        dry_weight_kg: Some(55.0),
        target_bmi: None,
        ideal_weight_kg: Some(58.0),
        pre_total_protein: Some(6.0),
        post_total_protein: Some(9.0),
        pre_hematocrit: Some(36.0),
        post_hematocrit: Some(33.0),
        pre_sodium: Some(138.0),
        post_sodium: Some(140.0),
        kr: None,
        pwi: None,
        systolic_bp: Some(130.0),
        ctr_current_pct: Some(52.0),
        ctr_previous_pct: Some(49.0),
        arrhythmia: Some(false),
        hanp: None,
        bnp: None,
        nt_probnp: Some(9000.0),
        albumin: Some(3.8),
        creatinine: Some(9.0),
        total_cholesterol: Some(150.0),
    }
}

/// Record where every numeric reading uses the zero sentinel.
pub(super) fn zero_sentinel_patient() -> RawPatientInput {
    RawPatientInput {
        age: Some(0.0),
        height_cm: Some(0.0),
        pre_weight_kg: Some(0.0),
        post_weight_kg: Some(0.0),
        dry_weight_kg: Some(0.0),
        target_bmi: Some(0.0),
        pre_total_protein: Some(0.0),
        post_total_protein: Some(0.0),
        pre_hematocrit: Some(0.0),
        post_hematocrit: Some(0.0),
        systolic_bp: Some(0.0),
        ctr_current_pct: Some(0.0),
        nt_probnp: Some(0.0),
        albumin: Some(0.0),
        creatinine: Some(0.0),
        total_cholesterol: Some(0.0),
        ..RawPatientInput::default()
    }
}

/// Stub model returning a fixed label and counting invocations.
#[derive(Debug, Default)]
pub(super) struct CountingModel {
    calls: AtomicUsize,
}

impl CountingModel {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TendencyModel for CountingModel {
    fn predict(&self, _features: &ModelFeatures) -> Result<TendencyLabel, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TendencyLabel("stable".to_string()))
    }
}

pub(super) struct FailingModel;

impl TendencyModel for FailingModel {
    fn predict(&self, _features: &ModelFeatures) -> Result<TendencyLabel, ModelError> {
        Err(ModelError::Prediction("weights corrupted".to_string()))
    }
}

pub(super) fn counting_slot() -> (Arc<CountingModel>, ModelSlot) {
    let model = Arc::new(CountingModel::default());
    let slot = ModelSlot::Ready(model.clone());
    (model, slot)
}
