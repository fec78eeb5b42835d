use camino::Utf8Path;
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::error::{CueError, CueResult};
use crate::gamut::{ColorGamut, Gamut, GamutType};
use crate::light::MirekSchema;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GamutConfig {
    Profile { profile: GamutType },
    Vertices(ColorGamut),
}

impl GamutConfig {
    pub fn resolve(&self) -> CueResult<Gamut> {
        match self {
            Self::Profile { profile } => Ok(Gamut::from(*profile)),
            Self::Vertices(vertices) => Gamut::new(*vertices),
        }
    }
}

impl From<GamutType> for GamutConfig {
    fn from(profile: GamutType) -> Self {
        Self::Profile { profile }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LightConfig {
    pub name: String,
    pub mirek_minimum: u32,
    pub mirek_maximum: u32,
}

impl LightConfig {
    #[must_use]
    pub const fn mirek_schema(&self) -> MirekSchema {
        MirekSchema {
            mirek_minimum: self.mirek_minimum,
            mirek_maximum: self.mirek_maximum,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub gamut: Option<GamutConfig>,
    pub light: LightConfig,
}

impl AppConfig {
    /// The configured gamut. There is no fallback profile.
    pub fn gamut(&self) -> CueResult<Gamut> {
        self.gamut
            .as_ref()
            .ok_or(CueError::NoGamutSelected)?
            .resolve()
    }

    #[must_use]
    pub fn with_gamut(self, gamut: Option<GamutConfig>) -> Self {
        Self {
            gamut: gamut.or(self.gamut),
            ..self
        }
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("light.name", "Hue color lamp")?
        .set_default("light.mirek_minimum", i64::from(MirekSchema::DEFAULT.mirek_minimum))?
        .set_default("light.mirek_maximum", i64::from(MirekSchema::DEFAULT.mirek_maximum))
}

/// Loads `filename`, falling back to defaults if it does not exist.
pub fn parse(filename: &Utf8Path) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(config::File::with_name(filename.as_str()).required(false))
        .build()?;

    settings.try_deserialize()
}

pub fn parse_str(yaml: &str) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .build()?;

    settings.try_deserialize()
}
