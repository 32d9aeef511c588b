//! User configuration.
//!
//! Stored as `config.json` in the data directory (see
//! [`DataStorage`](super::data_storage::DataStorage)). Every section is
//! optional; a missing section means "use the defaults", so an absent or
//! empty file is a valid configuration.
//!
//! ```json
//! {
//!   "cycle": { "default_length": 5, "default_shift_hours": 8.0 },
//!   "calendar": { "week_starts_on": "monday", "upcoming_events": 3 },
//!   "statistics": { "default_range": "month" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::calendar::WeekStart;
use crate::libs::cycle::{MAX_CYCLE_LENGTH, MIN_CYCLE_LENGTH};
use crate::libs::messages::Message;
use crate::libs::statistics::RangeKind;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Defaults used when creating cycles and shift types.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CycleConfig {
    /// Length of a new cycle when none is given.
    pub default_length: u32,
    /// Length of a new shift type's window when only a start time is given.
    pub default_shift_hours: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            default_length: 5,
            default_shift_hours: 8.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    pub week_starts_on: WeekStart,
    /// How many upcoming events the calendar lists below the grid.
    pub upcoming_events: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            week_starts_on: WeekStart::Monday,
            upcoming_events: 3,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StatisticsConfig {
    pub default_range: RangeKind,
}

/// Contents of `config.json`. Every section is optional; a missing one
/// reads as its defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<CycleConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsConfig>,
}

impl Config {
    /// Reads the configuration, or the defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - JSON configuration file
    ///
    /// # Returns
    ///
    /// The defaults when the file does not exist, or an error for unreadable or
    /// malformed JSON.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Writes the configuration to `path` as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn cycle(&self) -> CycleConfig {
        self.cycle.clone().unwrap_or_default()
    }

    pub fn calendar(&self) -> CalendarConfig {
        self.calendar.clone().unwrap_or_default()
    }

    pub fn statistics(&self) -> StatisticsConfig {
        self.statistics.clone().unwrap_or_default()
    }

    /// Interactive setup: pick sections, then answer prompts prefilled with
    /// the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [
            ConfigModule {
                key: "cycle".to_string(),
                name: "Cycles".to_string(),
            },
            ConfigModule {
                key: "calendar".to_string(),
                name: "Calendar".to_string(),
            },
            ConfigModule {
                key: "statistics".to_string(),
                name: "Statistics".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "cycle" => {
                    let default = config.cycle();
                    msg_print!(Message::ConfigModuleCycle);
                    config.cycle = Some(CycleConfig {
                        default_length: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultCycleLength.to_string())
                            .default(default.default_length)
                            .validate_with(|value: &u32| -> Result<(), String> {
                                if (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(value) {
                                    Ok(())
                                } else {
                                    Err(Message::CycleLengthRange.to_string())
                                }
                            })
                            .interact_text()?,
                        default_shift_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultShiftHours.to_string())
                            .default(default.default_shift_hours)
                            .interact_text()?,
                    });
                }
                "calendar" => {
                    let default = config.calendar();
                    msg_print!(Message::ConfigModuleCalendar);
                    let week_starts = [WeekStart::Monday, WeekStart::Sunday];
                    let week_start = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptWeekStart.to_string())
                        .items(&["Monday", "Sunday"])
                        .default(week_starts.iter().position(|w| *w == default.week_starts_on).unwrap_or(0))
                        .interact()?;
                    config.calendar = Some(CalendarConfig {
                        week_starts_on: week_starts[week_start],
                        upcoming_events: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUpcomingEvents.to_string())
                            .default(default.upcoming_events)
                            .interact_text()?,
                    });
                }
                "statistics" => {
                    let default = config.statistics();
                    msg_print!(Message::ConfigModuleStatistics);
                    let ranges = [RangeKind::Month, RangeKind::Year];
                    let range = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultRange.to_string())
                        .items(&["Month", "Year"])
                        .default(ranges.iter().position(|r| *r == default.default_range).unwrap_or(0))
                        .interact()?;
                    config.statistics = Some(StatisticsConfig {
                        default_range: ranges[range],
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
