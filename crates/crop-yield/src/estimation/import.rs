use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{AreaUnit, EstimationInput, SoilFertility};

/// Failure reading the field file as a whole.
#[derive(Debug, thiserror::Error)]
pub enum FieldImportError {
    #[error("failed to read field records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid field CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure confined to a single row; the rest of the file still imports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldRowError {
    #[error("malformed row: {0}")]
    Malformed(String),
    #[error("unknown area unit '{0}' (expected acres or hectares)")]
    UnknownAreaUnit(String),
    #[error("unknown soil fertility '{0}' (expected low, medium or high)")]
    UnknownSoilFertility(String),
}

/// One parsed row, keyed by its line number in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedField {
    pub line: usize,
    pub input: Result<EstimationInput, FieldRowError>,
}

/// Reads field records exported from the survey spreadsheet.
///
/// Expected headers: `crop,area,area_unit,soil_fertility,rainfall_mm,
/// fertilizer_rate_kg_per_acre,previous_yield_qtl_per_acre,management_score`.
/// `area_unit` and `previous_yield_qtl_per_acre` may be left blank.
pub struct FieldRecordImporter;

impl FieldRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedField>, FieldImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedField>, FieldImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut fields = Vec::new();
        let mut last_line = 1;

        for record in csv_reader.records() {
            let (line, input) = match record {
                Ok(record) => {
                    let line = line_of(record.position(), last_line + 1);
                    let input = record
                        .deserialize::<FieldRow>(Some(&headers))
                        .map_err(|err| FieldRowError::Malformed(err.to_string()))
                        .and_then(FieldRow::into_input);
                    (line, input)
                }
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => (
                    line_of(err.position(), last_line + 1),
                    Err(FieldRowError::Malformed(err.to_string())),
                ),
            };
            last_line = line;
            fields.push(ImportedField { line, input });
        }

        Ok(fields)
    }
}

/// Physical line a record starts on; quoted fields may span lines and
/// blank lines are skipped, so records are not counted.
fn line_of(position: Option<&csv::Position>, fallback: usize) -> usize {
    position.map_or(fallback, |position| position.line() as usize)
}

#[derive(Debug, Deserialize)]
struct FieldRow {
    crop: String,
    area: f64,
    #[serde(default)]
    area_unit: Option<String>,
    soil_fertility: String,
    rainfall_mm: f64,
    fertilizer_rate_kg_per_acre: f64,
    #[serde(default)]
    previous_yield_qtl_per_acre: Option<f64>,
    management_score: u8,
}

impl FieldRow {
    fn into_input(self) -> Result<EstimationInput, FieldRowError> {
        let area_unit = match self.area_unit.as_deref().map(str::trim) {
            None | Some("") => AreaUnit::Acres,
            Some(raw) => {
                AreaUnit::parse(raw).ok_or_else(|| FieldRowError::UnknownAreaUnit(raw.to_string()))?
            }
        };
        let soil_fertility = SoilFertility::parse(&self.soil_fertility)
            .ok_or_else(|| FieldRowError::UnknownSoilFertility(self.soil_fertility.clone()))?;

        Ok(EstimationInput {
            crop: self.crop,
            area: self.area,
            area_unit,
            soil_fertility,
            rainfall_mm: self.rainfall_mm,
            fertilizer_rate_kg_per_acre: self.fertilizer_rate_kg_per_acre,
            previous_yield_qtl_per_acre: self.previous_yield_qtl_per_acre.unwrap_or(0.0),
            management_score: self.management_score,
        })
    }
}
