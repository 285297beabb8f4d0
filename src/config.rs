use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculator::TOLERANCE;
use crate::error::{HarnessError, HarnessResult};
use crate::harness::types::ReportFormat;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub log_level: String,
    pub tolerance: f64,
    pub fail_fast: bool,
    pub report_format: ReportFormat,
    pub report_output_path: Option<String>,
    pub property_samples: usize,
    pub property_seed: u64,
    pub cases: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            tolerance: TOLERANCE,
            fail_fast: true,
            report_format: ReportFormat::Console,
            report_output_path: None,
            property_samples: 0,
            property_seed: 42,
            cases: vec![],
        }
    }
}

impl HarnessConfig {
    /// Layers `calculator.*`, `config/local.*`, an explicit file and `CALC_*`
    /// environment variables, in that order.
    pub fn load(explicit: Option<&Path>) -> HarnessResult<Self> {
        Self::load_with_env(explicit, None)
    }

    /// Like [`HarnessConfig::load`], reading `CALC_*` variables from `env`
    /// instead of the process environment when it is given.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> HarnessResult<Self> {
        let mut builder = Config::builder()
            .add_source(File::with_name("calculator").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            info!("Loading harness configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CALC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cases")
                .source(env),
        );

        let config: HarnessConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(HarnessError::Validation(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> HarnessResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn write_toml(&self, path: &Path) -> HarnessResult<()> {
        fs::write(path, self.to_toml()?)?;
        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}
