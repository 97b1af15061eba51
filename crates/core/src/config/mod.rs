use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Result, Value, Visualisation};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub seeds: SeedConfig,
}

impl AppConfig {
    /// Reads a JSON config file. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

/// Pacing for autoplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Seed collections each visualisation starts from (and returns to on reset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub sort: Vec<Value>,
    pub linear_search: Vec<Value>,
    pub binary_search: Vec<Value>,
    pub array: Vec<Value>,
    pub linked_list: Vec<Value>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sort: vec![64, 34, 25, 12, 22, 11, 90],
            linear_search: vec![4, 2, 7, 1, 9, 5],
            binary_search: vec![1, 2, 4, 5, 7, 9],
            array: vec![64, 34, 25, 12, 22, 11, 90],
            linked_list: Vec::new(),
        }
    }
}

impl SeedConfig {
    pub fn for_kind(&self, visualisation: Visualisation) -> &[Value] {
        match visualisation {
            Visualisation::LinearSearch => &self.linear_search,
            Visualisation::BinarySearch => &self.binary_search,
            Visualisation::BubbleSort
            | Visualisation::InsertionSort
            | Visualisation::SelectionSort => &self.sort,
            Visualisation::Array => &self.array,
            Visualisation::LinkedList => &self.linked_list,
        }
    }

    pub fn for_kind_mut(&mut self, visualisation: Visualisation) -> &mut Vec<Value> {
        match visualisation {
            Visualisation::LinearSearch => &mut self.linear_search,
            Visualisation::BinarySearch => &mut self.binary_search,
            Visualisation::BubbleSort
            | Visualisation::InsertionSort
            | Visualisation::SelectionSort => &mut self.sort,
            Visualisation::Array => &mut self.array,
            Visualisation::LinkedList => &mut self.linked_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "playback": { "interval_ms": 250 } }"#).unwrap();

        assert_eq!(config.playback.interval(), Duration::from_millis(250));
        assert_eq!(config.seeds, SeedConfig::default());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let playback = PlaybackConfig { interval_ms: 0 };
        assert_eq!(playback.interval(), Duration::from_millis(1));
    }

    #[test]
    fn saves_and_loads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "algo-visualiser-config-{}.json",
            std::process::id()
        ));
        let mut config = AppConfig::default();
        config.seeds.linked_list = vec![3, 1];
        config.save(&path).expect("config should be written");

        let loaded = AppConfig::load(&path).expect("config should load");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn seeds_by_visualisation() {
        let seeds = SeedConfig::default();
        assert_eq!(seeds.for_kind(Visualisation::BinarySearch), &[1, 2, 4, 5, 7, 9]);
        assert!(seeds.for_kind(Visualisation::LinkedList).is_empty());
        assert_eq!(seeds.for_kind(Visualisation::SelectionSort).len(), 7);
    }
}
