use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Algorithm, Result, Run, SearchOutcome, StepRecord, Value};

/// Serialisable copy of a generated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    pub initial: Vec<Value>,
    pub steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SearchOutcome>,
}

impl From<&Run> for Transcript {
    fn from(run: &Run) -> Self {
        Self {
            algorithm: run.algorithm(),
            target: run.target(),
            initial: run.initial().to_vec(),
            steps: run.steps().to_vec(),
            outcome: run.outcome(),
        }
    }
}

/// Writes run transcripts as JSON.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pretty: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn to_json(&self, run: &Run) -> Result<String> {
        let transcript = Transcript::from(run);
        let json = if self.pretty {
            serde_json::to_string_pretty(&transcript)?
        } else {
            serde_json::to_string(&transcript)?
        };
        Ok(json)
    }

    pub fn write_json(&self, run: &Run, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json(run)?;
        fs::write(path.as_ref(), json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            steps = run.len(),
            "transcript written"
        );
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Transcript> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_transcript_carries_target_and_outcome() {
        let run = Run::search(Algorithm::BinarySearch, &[1, 2, 4, 5, 7, 9], 5);
        let json = Recorder::new().to_json(&run).unwrap();

        assert!(json.contains("\"algorithm\":\"binary_search\""));
        assert!(json.contains("\"outcome\":{\"found\":3}"));
        assert!(json.contains("\"kind\":\"probe\""));
    }

    #[test]
    fn sort_transcript_omits_search_fields() {
        let run = Run::sort(Algorithm::BubbleSort, &[2, 1]);
        let json = Recorder::new().pretty(true).to_json(&run).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("target").is_none());
        assert!(value.get("outcome").is_none());
        assert_eq!(value["steps"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn writes_transcript_to_disk() {
        let path = std::env::temp_dir().join(format!(
            "algo-visualiser-transcript-{}.json",
            std::process::id()
        ));
        let run = Run::sort(Algorithm::InsertionSort, &[3, 1, 2]);
        Recorder::new().write_json(&run, &path).unwrap();

        let transcript = Recorder::read_json(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(transcript, Transcript::from(&run));
    }
}
