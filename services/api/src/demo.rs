use crate::infra::{cli_service, read_input};
use chrono::Local;
use clap::Args;
use dryweight::assessment::scoring::CtrTrigger;
use dryweight::assessment::{
    BatchImporter, BatchRow, EvaluationSummary, MetricKind, MetricStatus, RawPatientInput, Sex,
};
use dryweight::config::AppConfig;
use dryweight::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one patient record
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the summary as pretty JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one patient per row, headers named after the record fields
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every summary as a JSON line instead of a text line
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the summary as pretty JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let service = cli_service(&AppConfig::load()?)?;
    let raw = read_input(&args.input)?;
    let summary = service.assess(&raw);

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(AppError::Output)?;
        println!("{rendered}");
    } else {
        render_summary(&summary);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = cli_service(&AppConfig::load()?)?;
    let records = BatchImporter::from_path(&args.csv)?;
    let rows = BatchImporter::assess_all(&service, &records);

    if !args.json {
        println!(
            "Batch assessment of {} ({} patients)",
            args.csv.display(),
            rows.len()
        );
    }
    for row in &rows {
        if args.json {
            let rendered = serde_json::to_string(row).map_err(AppError::Output)?;
            println!("{rendered}");
        } else {
            println!("{}", batch_line(row));
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = cli_service(&AppConfig::load()?)?;
    let summary = service.assess(&demo_patient());

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(AppError::Output)?;
        println!("{rendered}");
    } else {
        println!("Dry-weight assessment demo (sample patient)");
        render_summary(&summary);
    }
    Ok(())
}

fn render_summary(summary: &EvaluationSummary) {
    println!(
        "Generated {}",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for line in report_lines(summary) {
        println!("{line}");
    }
}

/// Text report body; carries no timestamp so it is stable for a given summary.
pub(crate) fn report_lines(summary: &EvaluationSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(reference) = &summary.patient_ref {
        lines.push(format!("Patient: {reference}"));
    }

    let derived = &summary.derived;
    let derived_values = [
        ("Ideal weight", derived.ideal_weight_kg, "kg"),
        ("Kr", derived.kr, "%"),
        ("PWI", derived.pwi, "g/dL"),
        ("BMI", derived.bmi, "kg/m²"),
    ];
    let shown: Vec<String> = derived_values
        .iter()
        .filter_map(|(name, value, unit)| value.map(|value| format!("{name} {value:.1} {unit}")))
        .collect();
    if !shown.is_empty() {
        lines.push(format!("Derived: {}", shown.join(" | ")));
    }

    lines.push(String::new());
    lines.push("Assessment".to_string());
    for metric in summary.metrics() {
        let marker = match metric.status {
            MetricStatus::Assessed => "*",
            MetricStatus::NotAssessed => "-",
        };
        lines.push(format!("{marker} {}", metric.display));
    }

    if !summary.cardiac.ctr_triggers.is_empty() {
        let triggers: Vec<String> = summary
            .cardiac
            .ctr_triggers
            .iter()
            .map(|trigger| match trigger {
                CtrTrigger::AboveSexThreshold { threshold_pct } => {
                    format!("above {threshold_pct:.0}% sex threshold")
                }
                CtrTrigger::RapidIncrease { delta_pct } => {
                    format!("rose {delta_pct:.1} points since previous")
                }
            })
            .collect();
        lines.push(format!("  CTR alert: {}", triggers.join(", ")));
    }

    if !summary.nri_jh.components.is_empty() {
        let components: Vec<String> = summary
            .nri_jh
            .components
            .iter()
            .map(|component| {
                format!(
                    "{} {} pt",
                    component.factor.label(),
                    component.points
                )
            })
            .collect();
        lines.push(format!("  NRI-JH points: {}", components.join(", ")));
    }

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Data warnings".to_string());
        for warning in &summary.warnings {
            lines.push(format!("- {}", warning.message()));
        }
    }

    lines
}

/// One line per CSV row: the band of every badge, or `n/a` when not assessed.
pub(crate) fn batch_line(row: &BatchRow) -> String {
    let reference = row.summary.patient_ref.as_deref().unwrap_or("-");
    let badges: Vec<String> = row
        .summary
        .metrics()
        .into_iter()
        .filter(|metric| metric.kind != MetricKind::WeightGain)
        .map(|metric| match metric.band_label {
            Some(label) => format!("{} {label}", metric.name),
            None if metric.status == MetricStatus::Assessed => metric.display,
            None => format!("{} n/a", metric.name),
        })
        .collect();

    format!(
        "row {} [{}] {} | warnings {}",
        row.row,
        reference,
        badges.join(" | "),
        row.summary.warnings.len()
    )
}

pub(crate) fn demo_patient() -> RawPatientInput {
    RawPatientInput {
        patient_ref: Some("DEMO-01".to_string()),
        age: Some(74.0),
        sex: Some(Sex::Female),
        height_cm: Some(152.0),
        pre_weight_kg: Some(50.6),
        post_weight_kg: Some(48.1),
        dry_weight_kg: Some(48.0),
        pre_total_protein: Some(6.1),
        post_total_protein: Some(7.3),
        pre_hematocrit: Some(33.0),
        post_hematocrit: Some(30.5),
        systolic_bp: Some(168.0),
        ctr_current_pct: Some(57.5),
        ctr_previous_pct: Some(51.0),
        arrhythmia: Some(false),
        nt_probnp: Some(11_400.0),
        albumin: Some(3.3),
        creatinine: Some(7.2),
        total_cholesterol: Some(128.0),
        ..RawPatientInput::default()
    }
}
