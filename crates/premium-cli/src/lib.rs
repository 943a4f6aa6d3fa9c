//! Premium Predictor CLI
//!
//! Collects one applicant's details from flags or a JSON document, loads the
//! fitted artifacts and prints the predicted premium with its disclaimer.

pub mod config;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use data_validator::{ValidationConfig, Validator};
use feature_engine::categories::{
    BMI_CATEGORY, EMPLOYMENT_STATUS, GENDERS, INSURANCE_PLAN, MARITAL_STATUSES, MEDICAL_HISTORY,
    REGION, SMOKING_STATUS,
};
use feature_engine::RawInput;
use inference_engine::{ModelArtifacts, PremiumPredictor, PremiumQuote};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::PredictorConfig;

/// Health insurance premium predictor
#[derive(Debug, Parser)]
#[command(name = "premium-predict")]
#[command(version)]
#[command(about = "Predict a health insurance premium from applicant details")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict the premium for one applicant
    Predict(PredictArgs),
    /// List the accepted labels for every categorical field
    Categories,
}

/// Applicant details, either as flags or as a JSON document
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// JSON document holding every field
    #[arg(long, conflicts_with_all = [
        "age", "dependants", "income", "gender", "region", "marital_status",
        "bmi_category", "smoking_status", "employment_status", "medical_history",
        "insurance_plan",
    ])]
    pub input: Option<PathBuf>,

    /// Age in years (18-99)
    #[arg(long, required_unless_present = "input")]
    pub age: Option<u32>,

    /// Number of dependants (0-10)
    #[arg(long, required_unless_present = "input")]
    pub dependants: Option<u32>,

    /// Annual income in lakhs (1.0-100.0)
    #[arg(long, required_unless_present = "input")]
    pub income: Option<f64>,

    /// Male or Female
    #[arg(long, required_unless_present = "input")]
    pub gender: Option<String>,

    /// Northwest, Southeast, Northeast or Southwest
    #[arg(long, required_unless_present = "input")]
    pub region: Option<String>,

    /// Unmarried or Married
    #[arg(long, required_unless_present = "input")]
    pub marital_status: Option<String>,

    /// Normal, Obesity, Overweight or Underweight
    #[arg(long, required_unless_present = "input")]
    pub bmi_category: Option<String>,

    /// No Smoking, Regular or Occasional
    #[arg(long, required_unless_present = "input")]
    pub smoking_status: Option<String>,

    /// Salaried, Self-Employed or Freelancer
    #[arg(long, required_unless_present = "input")]
    pub employment_status: Option<String>,

    /// Medical history label (see `categories`)
    #[arg(long, required_unless_present = "input")]
    pub medical_history: Option<String>,

    /// Bronze, Silver or Gold
    #[arg(long, required_unless_present = "input")]
    pub insurance_plan: Option<String>,
}

impl PredictArgs {
    /// Build the request from the JSON document or the individual flags
    pub fn to_raw_input(&self) -> anyhow::Result<RawInput> {
        if let Some(path) = &self.input {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading input {}", path.display()))?;
            return serde_json::from_str(&json)
                .with_context(|| format!("parsing input {}", path.display()));
        }

        Ok(RawInput {
            age: self.age.context("--age is required")?,
            number_of_dependants: self.dependants.context("--dependants is required")?,
            income: self.income.context("--income is required")?,
            gender: required(&self.gender, "--gender")?,
            region: required(&self.region, "--region")?,
            marital_status: required(&self.marital_status, "--marital-status")?,
            bmi_category: required(&self.bmi_category, "--bmi-category")?,
            smoking_status: required(&self.smoking_status, "--smoking-status")?,
            employment_status: required(&self.employment_status, "--employment-status")?,
            medical_history: required(&self.medical_history, "--medical-history")?,
            insurance_plan: required(&self.insurance_plan, "--insurance-plan")?,
        })
    }
}

fn required(value: &Option<String>, flag: &str) -> anyhow::Result<String> {
    value
        .clone()
        .with_context(|| format!("{} is required", flag))
}

/// Initialize logging
///
/// `RUST_LOG` wins over the configured level; each `-v` raises it.
pub fn init_logging(
    level: &str,
    verbose: u8,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Result text shown to the applicant
pub fn render_quote(quote: &PremiumQuote) -> String {
    format!(
        "Predicted Amount ₹{:.1}\n{}",
        quote.rounded(),
        quote.disclaimer()
    )
}

/// Accepted labels for every categorical field
pub fn render_categories() -> String {
    let fields: [(&str, Vec<&str>); 8] = [
        ("gender", GENDERS.to_vec()),
        ("region", REGION.labels().collect()),
        ("marital_status", MARITAL_STATUSES.to_vec()),
        ("bmi_category", BMI_CATEGORY.labels().collect()),
        ("smoking_status", SMOKING_STATUS.labels().collect()),
        ("employment_status", EMPLOYMENT_STATUS.labels().collect()),
        ("medical_history", MEDICAL_HISTORY.labels().collect()),
        ("insurance_plan", INSURANCE_PLAN.labels().collect()),
    ];

    fields
        .iter()
        .map(|(field, labels)| format!("{}: {}", field, labels.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run one CLI invocation
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PredictorConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging.level, cli.verbose).context("initializing logging")?;

    info!("=== Premium Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Categories => {
            println!("{}", render_categories());
            Ok(())
        }
        Commands::Predict(args) => predict(&config, &args),
    }
}

fn predict(config: &PredictorConfig, args: &PredictArgs) -> anyhow::Result<()> {
    let quote = quote(config, args)?;
    println!("{}", render_quote(&quote));
    Ok(())
}

/// Validate the applicant, then load the artifacts and price the request
fn quote(config: &PredictorConfig, args: &PredictArgs) -> anyhow::Result<PremiumQuote> {
    let input = args.to_raw_input()?;

    let validator = Validator::new(ValidationConfig {
        strict_categories: config.validation.strict_categories,
        ..Default::default()
    });
    let result = validator.validate_input(&input);
    if !result.valid {
        for err in &result.errors {
            warn!("Invalid input: {}", err);
        }
        let reasons: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
        bail!("invalid input: {}", reasons.join("; "));
    }

    let models = &config.models;
    let artifacts = ModelArtifacts::load(&models.young, &models.rest, &models.scaler)
        .context("loading model artifacts")?;
    let predictor = PremiumPredictor::new(artifacts).context("initializing predictor")?;

    let quote = predictor.predict(&input).context("predicting premium")?;
    info!(
        "Predicted amount {} ({} model)",
        quote.amount,
        quote.band.as_str()
    );
    if quote.band.is_low_confidence() {
        warn!("Quote served by the low-accuracy {} model", quote.band.as_str());
    }

    Ok(quote)
}
