use chrono::{Local, NaiveDate};
use clap::Args;
use medcare::config::AppConfig;
use medcare::error::AppError;
use medcare::risk::{
    calculate_age, calculate_bmi, plausibility_warnings, validate, BatchAssessor, BatchOutcome,
    BatchReport, ClinicalField, HistoryRepository, InMemoryHistory, ModelId, ModelSelection,
    PatientForm, PatientId, RiskAssessment, RiskAssessmentService, RiskEngine, RiskLevel,
};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_BATCH: &str = include_str!("../../../crates/medcare/data/pima_sample.csv");

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Plasma glucose concentration (mg/dL)
    #[arg(long)]
    pub(crate) glucose: Option<f64>,
    /// Diastolic blood pressure (mm Hg)
    #[arg(long)]
    pub(crate) blood_pressure: Option<f64>,
    /// Body mass index; derived from --height/--weight when omitted
    #[arg(long)]
    pub(crate) bmi: Option<f64>,
    /// Height such as 5'10" or 178 cm, used with --weight
    #[arg(long)]
    pub(crate) height: Option<String>,
    /// Weight such as 185 lbs or 84 kg, used with --height
    #[arg(long)]
    pub(crate) weight: Option<String>,
    /// Age in years; derived from --date-of-birth when omitted
    #[arg(long)]
    pub(crate) age: Option<f64>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date_of_birth: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) pregnancies: Option<f64>,
    #[arg(long)]
    pub(crate) skin_thickness: Option<f64>,
    #[arg(long)]
    pub(crate) insulin: Option<f64>,
    #[arg(long)]
    pub(crate) diabetes_pedigree_function: Option<f64>,
    /// Model key: ensemble, gradient, logistic or neural
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Attach an existing medical record number instead of issuing one
    #[arg(long)]
    pub(crate) patient_id: Option<String>,
    /// Print the full assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with Pima dataset headers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Model key applied to every row
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the bundled batch scoring portion of the demo.
    #[arg(long)]
    pub(crate) skip_batch: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = Local::now().date_naive();
    let json = args.json;
    let form = assess_form(args, today);

    let history = Arc::new(InMemoryHistory::with_capacity(config.history.capacity));
    let service = RiskAssessmentService::new(history, config.engine);

    let receipt = service.assess(form)?;

    if json {
        match serde_json::to_string_pretty(&receipt) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Assessment payload unavailable: {}", err),
        }
        return Ok(());
    }

    let record = &receipt.record;
    println!("Diabetes risk assessment {}", record.assessment_id.0);
    if let Some(patient) = &record.patient_id {
        println!("Patient: {}", patient.0);
    }
    for warning in &receipt.warnings {
        println!("! {} (entered {})", warning.message, warning.value);
    }
    render_assessment(&record.assessment);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = RiskEngine::new(config.engine);
    let selection = ModelSelection::resolve(args.model.as_deref(), config.engine.default_model);

    let report = BatchAssessor::new(&engine, selection.clone()).assess_path(&args.csv)?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Batch payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Batch scoring of {} with model '{}'",
        args.csv.display(),
        selection.requested()
    );
    render_batch(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = Arc::new(RiskEngine::default());
    let history = Arc::new(InMemoryHistory::default());
    let service = RiskAssessmentService::with_engine(engine.clone(), history.clone());
    let today = Local::now().date_naive();

    println!("Diabetes risk engine demo");
    let form = PatientForm::sample().with_patient(PatientId::issue(today).0);
    let inputs = match validate(&form) {
        Ok(inputs) => inputs,
        Err(err) => {
            println!("  Reference patient rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "Reference patient: glucose {} mg/dL | BP {} mm Hg | BMI {} | age {}",
        inputs.glucose, inputs.blood_pressure, inputs.bmi, inputs.age
    );
    if plausibility_warnings(&inputs).is_empty() {
        println!("All measurements fall within their usual clinical ranges");
    }

    println!("\nModel comparison");
    for model in ModelId::ALL {
        let assessment = engine.evaluate(&inputs, &model.into());
        println!(
            "  - {:<30} {:>3}% (adjusted {:>3}%) -> {} | confidence {}%",
            assessment.model_used,
            assessment.risk_percentage,
            assessment.adjusted_percentage,
            assessment.risk_level,
            assessment.confidence
        );
    }

    println!("\nFull assessment with the default model");
    match service.assess(form) {
        Ok(receipt) => {
            println!("Recorded as {}", receipt.record.assessment_id.0);
            render_assessment(&receipt.record.assessment);
        }
        Err(err) => println!("  Assessment unavailable: {}", err),
    }

    let incomplete = PatientForm::sample()
        .without(ClinicalField::BloodPressure)
        .with_value(ClinicalField::Age, 0.0);
    match service.assess(incomplete) {
        Ok(_) => println!("\nIncomplete submission unexpectedly accepted"),
        Err(err) => println!("\nIncomplete submission rejected: {}", err),
    }

    match history.recent(5) {
        Ok(records) => println!("History holds {} assessment(s)", records.len()),
        Err(err) => println!("History unavailable: {}", err),
    }

    if args.skip_batch {
        return Ok(());
    }

    println!("\nBundled Pima sample");
    let report = BatchAssessor::new(&engine, ModelSelection::Catalog(ModelId::Ensemble))
        .assess_reader(Cursor::new(SAMPLE_BATCH.as_bytes()))?;
    render_batch(&report);
    Ok(())
}

fn assess_form(args: AssessArgs, today: NaiveDate) -> PatientForm {
    let bmi = args.bmi.or_else(|| match (&args.height, &args.weight) {
        (Some(height), Some(weight)) => {
            calculate_bmi(height, weight).map(|bmi| (bmi * 10.0).round() / 10.0)
        }
        _ => None,
    });
    let age = args.age.or_else(|| {
        args.date_of_birth
            .and_then(|dob| calculate_age(dob, today))
            .map(f64::from)
    });

    let measurements = [
        (ClinicalField::Glucose, args.glucose),
        (ClinicalField::BloodPressure, args.blood_pressure),
        (ClinicalField::Bmi, bmi),
        (ClinicalField::Age, age),
        (ClinicalField::Pregnancies, args.pregnancies),
        (ClinicalField::SkinThickness, args.skin_thickness),
        (ClinicalField::Insulin, args.insulin),
        (
            ClinicalField::DiabetesPedigreeFunction,
            args.diabetes_pedigree_function,
        ),
    ];

    let mut form = measurements
        .into_iter()
        .fold(PatientForm::new(), |form, (field, value)| match value {
            Some(value) => form.with_value(field, value),
            None => form,
        });
    form.selected_model = args.model;
    form.with_patient(
        args.patient_id
            .unwrap_or_else(|| PatientId::issue(today).0),
    )
}

fn render_assessment(assessment: &RiskAssessment) {
    println!("Result: {}", assessment.summary());
    if let Some(warning) = &assessment.model_warning {
        println!("! {}", warning);
    }
    println!(
        "Model metrics: accuracy {:.2} | precision {:.2} | recall {:.2} | F1 {:.2}",
        assessment.model_metrics.accuracy,
        assessment.model_metrics.precision,
        assessment.model_metrics.recall,
        assessment.model_metrics.f1_score
    );

    let findings = &assessment.clinical_factors;
    println!("Clinical factors:");
    println!(
        "  - {} ({} criteria)",
        findings.metabolic_syndrome.description, findings.metabolic_syndrome.criteria_count
    );
    println!(
        "  - {} (score {:.2})",
        findings.insulin_resistance.description, findings.insulin_resistance.score
    );
    println!(
        "  - {} ({})",
        findings.cardiovascular_risk.description, findings.cardiovascular_risk.level
    );

    println!("Analysis: {}", assessment.analysis.summary);
    for finding in &assessment.analysis.key_findings {
        println!("  * {}", finding);
    }
    println!("  {}", assessment.analysis.clinical_significance);

    println!("Risk factors:");
    for factor in &assessment.risk_factors {
        println!(
            "  - {}: {} ({}% weight)",
            factor.factor, factor.status, factor.contribution
        );
    }

    println!("Recommendations:");
    for group in &assessment.recommendations {
        println!("  {}", group.category);
        for item in &group.items {
            println!("    - {}", item);
        }
    }

    let plan = &assessment.follow_up;
    println!("Follow-up in {}", plan.next_appointment);
    println!("  Monitoring: {}", plan.monitoring.join("; "));
    println!("  Interventions: {}", plan.interventions.join("; "));
    println!("  Goals: {}", plan.goals.join("; "));
}

fn render_batch(report: &BatchReport) {
    for row in &report.rows {
        match &row.outcome {
            BatchOutcome::Assessed { assessment } => {
                let observed = match row.observed_outcome {
                    Some(1) => " [diabetic]",
                    Some(0) => " [non-diabetic]",
                    _ => "",
                };
                println!(
                    "  row {:>3}: {:>3}% {:<6}{}",
                    row.row,
                    assessment.risk_percentage,
                    assessment.risk_level.label(),
                    observed
                );
            }
            BatchOutcome::Rejected { reason, .. } => {
                println!("  row {:>3}: skipped ({})", row.row, reason);
            }
        }
    }

    println!(
        "Scored {} row(s), skipped {}: {} high | {} medium | {} low",
        report.assessed().count(),
        report.rejected_count(),
        report.level_count(RiskLevel::High),
        report.level_count(RiskLevel::Medium),
        report.level_count(RiskLevel::Low)
    );
}
