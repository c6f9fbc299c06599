use std::env;
use std::path::PathBuf;

use log::warn;

use super::tables::PlayerTierScale;
use crate::rating::decay::inactivity_adjusted_rating;
use crate::rating::SalaryModel;

pub const DATA_DIR_ENV: &str = "PROAM_DATA_DIR";
pub const REVALIDATE_ENV: &str = "PROAM_REVALIDATE_SECS";

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub leaderboard_size: usize,
    pub award_candidates: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            leaderboard_size: 10,
            award_candidates: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub data_dir: PathBuf,
    pub port: u16,
    pub revalidate_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 3000,
            revalidate_secs: 30, // same cadence as the hosted site
        }
    }
}

impl ServerSettings {
    /// Defaults overridden by `PROAM_DATA_DIR` and `PROAM_REVALIDATE_SECS`
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                settings.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(secs) = env::var(REVALIDATE_ENV) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => settings.revalidate_secs = secs,
                _ => warn!("Ignoring invalid {}='{}'", REVALIDATE_ENV, secs),
            }
        }

        settings
    }
}

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub player_tier_scale: PlayerTierScale,
    pub salary_model: SalaryModel,
    pub inactivity_decay_rate: f64,
    pub inactivity_period_days: u32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            player_tier_scale: PlayerTierScale::Standard,
            salary_model: SalaryModel::BracketMultiplier,
            inactivity_decay_rate: 0.02,
            inactivity_period_days: 30,
        }
    }
}

impl RatingSettings {
    pub fn inactivity_adjusted(&self, rating: f64, days_inactive: i64) -> f64 {
        inactivity_adjusted_rating(rating, days_inactive, self.inactivity_decay_rate, self.inactivity_period_days)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub pipeline: PipelineSettings,
    pub server: ServerSettings,
    pub rating: RatingSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self {
            server: ServerSettings::from_env(),
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.server.data_dir = data_dir.into();
        self
    }
}
