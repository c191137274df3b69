/// Launch suitability thresholds
pub const MIN_LAUNCH_TEMP: f64 = 2.0;
pub const MAX_LAUNCH_TEMP: f64 = 31.0;
pub const MAX_LAUNCH_WIND_SPEED: f64 = 10.0;
/// Humidity must stay strictly below this value
pub const HUMIDITY_LIMIT: f64 = 60.0;
pub const NO_PRECIPITATION: i32 = 0;
pub const LIGHTNING_ABSENT: &str = "No";
pub const EXCLUDED_CLOUDS: [&str; 2] = ["Cumulus", "Nimbus"];

/// Input column names
pub const COL_TEMPERATURE: &str = "Temperature";
pub const COL_WIND_SPEED: &str = "WindSpeed";
pub const COL_HUMIDITY: &str = "Humidity";
pub const COL_PRECIPITATION: &str = "Precipitation";
pub const COL_LIGHTNING: &str = "Lightning";
pub const COL_CLOUDS: &str = "Clouds";

/// Report columns, in output order
pub const REPORT_COLUMNS: [&str; 12] = [
    "AverageTemperature",
    "MaxTemperature",
    "MinTemperature",
    "MedianTemperature",
    "AverageWindSpeed",
    "MaxWindSpeed",
    "MinWindSpeed",
    "MedianWindSpeed",
    "AverageHumidity",
    "MaxHumidity",
    "MinHumidity",
    "MedianHumidity",
];

/// Report defaults
pub const DEFAULT_REPORT_FILE: &str = "WeatherReport.csv";
pub const DEFAULT_EMAIL_SUBJECT: &str = "Weather Report";
pub const DEFAULT_EMAIL_BODY: &str = "Please find the attached weather report.";
pub const REPORT_CONTENT_TYPE: &str = "text/csv";

/// SMTP defaults
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Settings sources
pub const ENV_PREFIX: &str = "LAUNCH_WEATHER";
pub const ENV_SEPARATOR: &str = "__";
