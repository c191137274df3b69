use crate::error::{ProcessingError, Result};
use crate::models::WeatherObservation;
use crate::utils::constants::{
    COL_CLOUDS, COL_HUMIDITY, COL_LIGHTNING, COL_PRECIPITATION, COL_TEMPERATURE, COL_WIND_SPEED,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Reads weather observations from comma-separated text with a header row.
pub struct ObservationReader {
    delimiter: u8,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read all observations from a file
    pub fn read_observations(&self, path: &Path) -> Result<Vec<WeatherObservation>> {
        let file = File::open(path)?;
        let observations = self.read_from(file)?;
        debug!(path = %path.display(), count = observations.len(), "Read observations");
        Ok(observations)
    }

    /// Read all observations from any reader. The first malformed row fails the whole read.
    pub fn read_from<R: Read>(&self, input: R) -> Result<Vec<WeatherObservation>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(input);

        let columns = ColumnMap::from_headers(reader.headers()?)?;
        let mut observations = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1; fall back to the row count if position is unavailable
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            observations.push(columns.parse_record(&record, line)?);
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    temperature: usize,
    wind_speed: usize,
    humidity: usize,
    precipitation: usize,
    lightning: usize,
    clouds: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &'static str| {
            let wanted = normalize_header(name);
            normalized
                .iter()
                .position(|h| *h == wanted)
                .ok_or(ProcessingError::MissingColumn(name))
        };

        Ok(Self {
            temperature: find(COL_TEMPERATURE)?,
            wind_speed: find(COL_WIND_SPEED)?,
            humidity: find(COL_HUMIDITY)?,
            precipitation: find(COL_PRECIPITATION)?,
            lightning: find(COL_LIGHTNING)?,
            clouds: find(COL_CLOUDS)?,
        })
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<WeatherObservation> {
        Ok(WeatherObservation::new(
            parse_field(record, self.temperature, COL_TEMPERATURE, line)?,
            parse_field(record, self.wind_speed, COL_WIND_SPEED, line)?,
            parse_field(record, self.humidity, COL_HUMIDITY, line)?,
            parse_field(record, self.precipitation, COL_PRECIPITATION, line)?,
            text_field(record, self.lightning, COL_LIGHTNING, line)?,
            text_field(record, self.clouds, COL_CLOUDS, line)?,
        ))
    }
}

/// Case, underscores and spaces are ignored when matching headers
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn text_field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str> {
    record.get(index).ok_or_else(|| ProcessingError::InvalidField {
        line,
        column,
        value: String::new(),
    })
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<T> {
    let value = text_field(record, index, column, line)?;
    value.parse::<T>().map_err(|_| ProcessingError::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds
10,5,40,0,No,Clear
20.5,8,50,0,No,Cumulus
35,12,70,3,Yes,Nimbus
";

    #[test]
    fn test_read_observations() {
        let reader = ObservationReader::new();
        let observations = reader.read_from(SAMPLE.as_bytes()).unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(
            observations[0],
            WeatherObservation::new(10.0, 5.0, 40.0, 0, "No", "Clear")
        );
        assert_eq!(observations[1].temperature, 20.5);
        assert_eq!(observations[1].clouds, "Cumulus");
        assert_eq!(observations[2].precipitation, 3);
        assert_eq!(observations[2].lightning, "Yes");
    }

    #[test]
    fn test_columns_matched_by_name() {
        let input = "\
Date, clouds ,Lightning,precipitation,humidity,wind_speed,TEMPERATURE
2024-03-01, Clear ,No,0,45,7,18
";
        let observations = ObservationReader::new().read_from(input.as_bytes()).unwrap();

        assert_eq!(
            observations,
            vec![WeatherObservation::new(18.0, 7.0, 45.0, 0, "No", "Clear")]
        );
    }

    #[test]
    fn test_header_only_gives_no_observations() {
        let input = "Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds\n";
        let observations = ObservationReader::new().read_from(input.as_bytes()).unwrap();
        assert!(observations.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let input = "Temperature,WindSpeed,Humidity,Lightning,Clouds\n10,5,40,No,Clear\n";
        let result = ObservationReader::new().read_from(input.as_bytes());

        assert!(matches!(
            result,
            Err(ProcessingError::MissingColumn("Precipitation"))
        ));
    }

    #[test]
    fn test_invalid_value_reports_line_and_column() {
        let input = "\
Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds
10,5,40,0,No,Clear
12,windy,40,0,No,Clear
";
        let err = ObservationReader::new()
            .read_from(input.as_bytes())
            .unwrap_err();

        match err {
            ProcessingError::InvalidField {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "WindSpeed");
                assert_eq!(value, "windy");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_fractional_precipitation_is_rejected() {
        let input = "\
Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds
10,5,40,0.5,No,Clear
";
        let result = ObservationReader::new().read_from(input.as_bytes());
        assert!(matches!(result, Err(ProcessingError::InvalidField { .. })));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let input = "\
Temperature,WindSpeed,Humidity,Precipitation,Lightning,Clouds
10,5,40
";
        assert!(ObservationReader::new().read_from(input.as_bytes()).is_err());
    }

    #[test]
    fn test_custom_delimiter() {
        let input = "Temperature;WindSpeed;Humidity;Precipitation;Lightning;Clouds\n10;5;40;0;No;Clear\n";
        let observations = ObservationReader::with_delimiter(b';')
            .read_from(input.as_bytes())
            .unwrap();
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn test_read_observations_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", SAMPLE)?;

        let observations = ObservationReader::new().read_observations(temp_file.path())?;
        assert_eq!(observations.len(), 3);

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = ObservationReader::new().read_observations(Path::new("no/such/file.csv"));
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
