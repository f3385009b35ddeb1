use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{ensure, Context, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub map: MapConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub volcano_csv: PathBuf,
    pub lat_column: String,
    pub lon_column: String,
    pub elev_column: String,
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            volcano_csv: PathBuf::from("volcano_data.txt"),
            lat_column: "LAT".to_string(),
            lon_column: "LON".to_string(),
            elev_column: "ELEV".to_string(),
            delimiter: ',',
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lon]` of the initial view.
    pub center: [f64; 2],
    pub zoom_start: u8,
    /// Leaflet URL template for the base layer.
    pub tiles: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [20.0, 0.0],
            zoom_start: 5,
            tiles: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub html: PathBuf,
    pub geojson: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html: PathBuf::from("mapify_with_seven_wonders.html"),
            geojson: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when given, otherwise falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let [lat, lon] = self.map.center;
        ensure!((-90.0..=90.0).contains(&lat), "map.center latitude {} is outside [-90, 90]", lat);
        ensure!((-180.0..=180.0).contains(&lon), "map.center longitude {} is outside [-180, 180]", lon);
        ensure!(self.map.zoom_start <= 18, "map.zoom_start {} is above 18", self.map.zoom_start);
        ensure!(self.input.delimiter.is_ascii(), "input.delimiter must be a single ASCII character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_reproduce_fixed_behaviour() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.input.volcano_csv, PathBuf::from("volcano_data.txt"));
        assert_eq!(config.input.lat_column, "LAT");
        assert_eq!(config.map.center, [20.0, 0.0]);
        assert_eq!(config.map.zoom_start, 5);
        assert_eq!(config.output.html, PathBuf::from("mapify_with_seven_wonders.html"));
        assert!(config.output.geojson.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[input]\nvolcano_csv = \"other.csv\"\ndelimiter = \";\"\n\n[server]\nport = 9000").unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.input.volcano_csv, PathBuf::from("other.csv"));
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.input.elev_column, "ELEV");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.map.zoom_start, 5);
    }

    #[test]
    fn rejects_out_of_range_center() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map]\ncenter = [95.0, 0.0]").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map]\ncenter = [0.0, 180.5]").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn rejects_zoom_above_eighteen() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map]\nzoom_start = 19").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("zoom_start"));

        let mut config = AppConfig::default();
        config.map.zoom_start = 18;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let mut config = AppConfig::default();
        config.input.delimiter = '§';
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = AppConfig::load_from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("exist.toml"));
    }
}
