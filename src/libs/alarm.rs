//! Shift-aware alarms.
//!
//! Alarms only compute when they should fire; delivering a notification is
//! left to whatever runs `rota alarm next` (cron, a desktop notifier, ...).
//! Alarms live in `alarms.json` next to the configuration.

use crate::libs::calendar::add_days;
use crate::libs::cycle::ShiftCycle;
use crate::libs::data_storage::DataStorage;
use crate::libs::shift::ShiftTypeId;
use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use uuid::Uuid;

/// File name of the alarm list inside the data directory.
pub const ALARMS_FILE_NAME: &str = "alarms.json";

/// How far ahead repeating alarms are searched.
const SCAN_HORIZON_DAYS: i64 = 366;

/// When an alarm fires, on top of its time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Repeat {
    /// Fires once, today if the time is still ahead, else tomorrow.
    Once,
    /// Fires on the listed weekdays.
    Weekly { days: Vec<Weekday> },
    /// Fires on days whose effective shift in the active cycle is `shift_type_id`.
    Shift { shift_type_id: ShiftTypeId },
}

/// Sound hint passed on to whatever delivers the alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    #[default]
    Default,
    Bell,
    Chime,
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sound::Default => write!(f, "default"),
            Sound::Bell => write!(f, "bell"),
            Sound::Chime => write!(f, "chime"),
        }
    }
}

/// A time of day plus a rule for which days it applies to.
///
/// Disabled alarms stay in the file but never produce occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    pub time: NaiveTime,
    pub label: Option<String>,
    pub repeat: Repeat,
    #[serde(default)]
    pub sound: Sound,
    pub enabled: bool,
}

impl Alarm {
    /// Enabled alarm with no label and the default sound.
    ///
    /// # Arguments
    ///
    /// * `time` - Time of day it fires at
    /// * `repeat` - Which days it fires on
    pub fn new(time: NaiveTime, repeat: Repeat) -> Self {
        Alarm {
            id: Uuid::new_v4(),
            time,
            label: None,
            repeat,
            sound: Sound::default(),
            enabled: true,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_sound(mut self, sound: Sound) -> Self {
        self.sound = sound;
        self
    }

    /// Up to `count` firing times strictly after `now`, in ascending order.
    ///
    /// `cycle` is the active cycle; shift-bound alarms never fire without one.
    pub fn next_occurrences(&self, now: NaiveDateTime, cycle: Option<&ShiftCycle>, count: usize) -> Vec<NaiveDateTime> {
        if !self.enabled || count == 0 {
            return Vec::new();
        }

        let today = now.date();
        match &self.repeat {
            Repeat::Once => {
                let day = if self.time > now.time() { Some(today) } else { add_days(today, 1) };
                day.map(|day| day.and_time(self.time)).into_iter().collect()
            }
            Repeat::Weekly { days } => {
                if days.is_empty() {
                    return Vec::new();
                }
                self.scan(now, count, |date| days.contains(&date.weekday()))
            }
            Repeat::Shift { shift_type_id } => match cycle {
                Some(cycle) => self.scan(now, count, |date| {
                    cycle.day_view(date).is_some_and(|view| view.shift().id == *shift_type_id)
                }),
                None => Vec::new(),
            },
        }
    }

    fn scan<F>(&self, now: NaiveDateTime, count: usize, fires_on: F) -> Vec<NaiveDateTime>
    where
        F: Fn(NaiveDate) -> bool,
    {
        (0..SCAN_HORIZON_DAYS)
            .filter_map(|offset| add_days(now.date(), offset))
            .filter(|date| fires_on(*date))
            .map(|date| date.and_time(self.time))
            .filter(|moment| *moment > now)
            .take(count)
            .collect()
    }
}

/// The alarms file.
#[derive(Debug, Default)]
pub struct Alarms {
    alarms: Vec<Alarm>,
}

impl Alarms {
    /// Reads `alarms.json`, or an empty set when it does not exist yet.
    pub fn load() -> Result<Self> {
        let path = DataStorage::new().get_path(ALARMS_FILE_NAME)?;
        Self::load_from(&path)
    }

    /// Reads an alarm list from `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - JSON file holding an array of alarms
    ///
    /// # Returns
    ///
    /// An empty list when the file is missing, or an error when it exists but
    /// cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let alarms: Vec<Alarm> = serde_json::from_str(&content)?;
        Ok(Self { alarms })
    }

    /// Writes the list to `alarms.json` in the data directory.
    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(ALARMS_FILE_NAME)?;
        self.save_to(&path)
    }

    /// Writes the list to `path` as pretty-printed JSON, replacing the file.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &self.alarms)?;
        Ok(())
    }

    /// All alarms in insertion order.
    ///
    /// # Returns
    ///
    /// A slice over the alarms, enabled or not.
    pub fn list(&self) -> &[Alarm] {
        &self.alarms
    }

    /// Appends an alarm.
    ///
    /// # Arguments
    ///
    /// * `alarm` - Alarm to store
    ///
    /// # Returns
    ///
    /// The alarm's id, for later [`remove`](Self::remove) or
    /// [`toggle`](Self::toggle).
    pub fn add(&mut self, alarm: Alarm) -> Uuid {
        let id = alarm.id;
        self.alarms.push(alarm);
        id
    }

    /// Removes the alarm `id`.
    ///
    /// # Returns
    ///
    /// The removed alarm, or `None` when no alarm has that id.
    pub fn remove(&mut self, id: Uuid) -> Option<Alarm> {
        let index = self.alarms.iter().position(|alarm| alarm.id == id)?;
        Some(self.alarms.remove(index))
    }

    /// Flips the enabled flag and returns the new state.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let alarm = self.alarms.iter_mut().find(|alarm| alarm.id == id)?;
        alarm.enabled = !alarm.enabled;
        Some(alarm.enabled)
    }

    /// Alarms bound to a shift type that is no longer in `known`.
    pub fn orphaned<'a>(&'a self, known: &'a [ShiftTypeId]) -> impl Iterator<Item = &'a Alarm> + 'a {
        self.alarms.iter().filter(move |alarm| match &alarm.repeat {
            Repeat::Shift { shift_type_id } => !known.contains(shift_type_id),
            _ => false,
        })
    }
}
