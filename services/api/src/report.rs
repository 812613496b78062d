use crate::infra::{parse_area_unit, parse_soil_fertility};
use chrono::Local;
use clap::Args;
use crop_yield::config::AppConfig;
use crop_yield::error::AppError;
use crop_yield::estimation::{
    AreaUnit, BaselineSource, EstimationBreakdown, EstimationInput, EstimationResult,
    EstimationServiceError, FieldRecordImporter, InputValidator, InvalidInput, SoilFertility,
    YieldEstimator,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Crop name (matched case-insensitively against the baseline table)
    #[arg(long)]
    pub(crate) crop: String,
    /// Field area in the chosen unit
    #[arg(long)]
    pub(crate) area: f64,
    /// Unit of the field area (acres or hectares)
    #[arg(long, default_value = "acres", value_parser = parse_area_unit)]
    pub(crate) area_unit: AreaUnit,
    /// Soil fertility class (low, medium or high)
    #[arg(long, value_parser = parse_soil_fertility)]
    pub(crate) soil_fertility: SoilFertility,
    /// Expected seasonal rainfall in millimetres
    #[arg(long)]
    pub(crate) rainfall_mm: f64,
    /// Fertilizer applied in kg per acre
    #[arg(long)]
    pub(crate) fertilizer_rate: f64,
    /// Previous season yield in quintals per acre (0 when unknown)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) previous_yield: f64,
    /// Management practice rating from 1 to 10
    #[arg(long)]
    pub(crate) management_score: u8,
    /// Print the result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one field per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print results as a JSON array instead of one line per field
    #[arg(long)]
    pub(crate) json: bool,
}

/// One batch row as printed in JSON mode.
#[derive(Debug, Serialize)]
struct BatchEntry {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<EstimationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn build_estimator() -> Result<YieldEstimator, AppError> {
    let config = AppConfig::load()?;
    Ok(YieldEstimator::new(config.yield_model()?))
}

/// One-shot estimate for the command line. Nothing reads a cached input
/// after the process exits, so the CLI skips the input store.
fn estimate_field(
    estimator: &YieldEstimator,
    input: EstimationInput,
) -> Result<EstimationBreakdown, InvalidInput> {
    let input = InputValidator.validate(input)?;
    Ok(estimator.explain(&input))
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        crop,
        area,
        area_unit,
        soil_fertility,
        rainfall_mm,
        fertilizer_rate,
        previous_yield,
        management_score,
        json,
    } = args;

    let input = EstimationInput {
        crop,
        area,
        area_unit,
        soil_fertility,
        rainfall_mm,
        fertilizer_rate_kg_per_acre: fertilizer_rate,
        previous_yield_qtl_per_acre: previous_yield,
        management_score,
    };

    let estimator = build_estimator()?;
    let breakdown =
        estimate_field(&estimator, input.clone()).map_err(EstimationServiceError::from)?;

    if json {
        print_json(&breakdown.result);
    } else {
        render_estimate_report(&input, &breakdown);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, json } = args;

    let estimator = build_estimator()?;
    let fields = FieldRecordImporter::from_path(&csv)?;

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let entry = match field.input {
            Ok(input) => {
                let crop = input.crop.trim().to_string();
                match estimate_field(&estimator, input) {
                    Ok(breakdown) => BatchEntry {
                        line: field.line,
                        crop: Some(crop),
                        result: Some(breakdown.result),
                        error: None,
                    },
                    Err(err) => BatchEntry {
                        line: field.line,
                        crop: Some(crop),
                        result: None,
                        error: Some(err.to_string()),
                    },
                }
            }
            Err(err) => BatchEntry {
                line: field.line,
                crop: None,
                result: None,
                error: Some(err.to_string()),
            },
        };
        entries.push(entry);
    }

    if json {
        print_json(&entries);
    } else {
        render_batch_report(&csv, &entries);
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(body) => println!("{body}"),
        Err(err) => eprintln!("failed to encode JSON output: {err}"),
    }
}

fn render_estimate_report(input: &EstimationInput, breakdown: &EstimationBreakdown) {
    let result = &breakdown.result;

    println!("Crop yield estimate");
    println!(
        "Field: {} on {} {} ({:.2} acres), generated {}",
        input.crop.trim(),
        input.area,
        input.area_unit.label(),
        breakdown.area_in_acres,
        Local::now().date_naive()
    );

    let source = match &breakdown.baseline.source {
        BaselineSource::History => "previous season yield".to_string(),
        BaselineSource::CropTable { crop } => format!("{crop} table entry"),
        BaselineSource::Default => "generic default".to_string(),
    };
    println!(
        "\nBaseline: {:.1} qtl/acre ({source})",
        breakdown.baseline.qtl_per_acre
    );

    println!("\nAdjustments");
    for component in &breakdown.components {
        println!(
            "- {}: x{:.3} ({})",
            component.factor.label(),
            component.multiplier,
            component.notes
        );
    }

    let signals = &breakdown.signals;
    println!(
        "\nConfidence: {} ({}/3: history {}, known crop {}, rainfall in band {})",
        result.confidence.label(),
        signals.score(),
        yes_no(signals.historical_yield),
        yes_no(signals.known_crop),
        yes_no(signals.rainfall_in_band)
    );

    println!(
        "\nYield: {:.0} quintals/acre, {:.0} quintals total",
        result.yield_per_acre, result.total_yield
    );
    println!("{}", result.rationale);
}

fn render_batch_report(csv: &std::path::Path, entries: &[BatchEntry]) {
    println!("Batch yield estimates from {}", csv.display());

    let mut total = 0.0;
    let mut failed = 0;
    for entry in entries {
        match (&entry.result, &entry.error) {
            (Some(result), _) => {
                total += result.total_yield;
                println!(
                    "- line {}: {} | {:.0} qtl/acre | {:.0} qtl total | {} confidence",
                    entry.line,
                    entry.crop.as_deref().unwrap_or("?"),
                    result.yield_per_acre,
                    result.total_yield,
                    result.confidence.label()
                );
            }
            (None, Some(error)) => {
                failed += 1;
                println!("- line {}: skipped ({error})", entry.line);
            }
            (None, None) => {}
        }
    }

    println!(
        "\n{} field(s) estimated, {} skipped, {:.0} quintals in total",
        entries.len() - failed,
        failed,
        total
    );
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
