#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use wodgen_domain::{CardioKind, DailyTemplate, Day, Metcon};

/// The externally supplied configuration: seven daily templates keyed by
/// lowercase day name, display settings, and the metcon sampling pool.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub daily_templates: BTreeMap<String, TemplateConfig>,
    pub settings: Settings,
    pub metcons: Vec<MetconConfig>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub name: String,
    pub warmup: String,
    pub categories: Vec<String>,
    pub cardio: Cardio,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cardio {
    Metcon,
    Running,
    Mobility,
    Rest,
}

impl From<Cardio> for CardioKind {
    fn from(value: Cardio) -> Self {
        match value {
            Cardio::Metcon => CardioKind::Metcon,
            Cardio::Running => CardioKind::Running,
            Cardio::Mobility => CardioKind::Mobility,
            Cardio::Rest => CardioKind::Rest,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_excel_file: String,
    pub allow_custom_percentages: bool,
    pub show_probabilities: bool,
    pub show_random_values: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetconConfig {
    pub name: String,
    pub description: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Daily templates in Sunday-first order. Unconfigured days are skipped.
    #[must_use]
    pub fn templates(&self) -> Vec<DailyTemplate> {
        Day::ALL
            .into_iter()
            .filter_map(|day| {
                self.daily_templates.get(day.key()).map(|t| DailyTemplate {
                    day,
                    name: t.name.clone(),
                    warmup: t.warmup.clone(),
                    category_names: t.categories.clone(),
                    cardio: t.cardio.into(),
                })
            })
            .collect()
    }

    /// The configured metcons, or the built-in fallback set when none are
    /// configured, so the assembler always receives a non-empty pool.
    #[must_use]
    pub fn metcon_pool(&self) -> Vec<Metcon> {
        if self.metcons.is_empty() {
            return fallback_metcons();
        }
        self.metcons
            .iter()
            .map(|m| Metcon {
                name: m.name.clone(),
                description: m.description.clone(),
            })
            .collect()
    }
}

#[must_use]
pub fn fallback_metcons() -> Vec<Metcon> {
    vec![
        Metcon {
            name: "Fran".to_string(),
            description: "21-15-9 For Time:\n• Thrusters (95/65 lbs)\n• Pull-Ups".to_string(),
        },
        Metcon {
            name: "Annie".to_string(),
            description: "50-40-30-20-10 For Time:\n• Double-Unders\n• Sit-Ups".to_string(),
        },
        Metcon {
            name: "Cindy".to_string(),
            description: "20 Min AMRAP:\n• 5 Pull-Ups\n• 10 Push-Ups\n• 15 Air Squats".to_string(),
        },
    ]
}
