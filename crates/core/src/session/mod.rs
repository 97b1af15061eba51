//! Command surface the presentation shell drives.
//!
//! A [`Session`] pairs one visualisation's live [`Collection`] with a
//! [`Player`]. The collection may only be edited while no run is loaded;
//! runs are generated from a copy of it and never write back.

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    collection::parse_value, project, project_values, Algorithm, AppConfig, AutoPlayToggle,
    Collection, DiagramFrame, Phase, Player, Result, Run, Shape, Transition, Value,
    VisualiserError,
};

/// Every screen of the visualiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visualisation {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    InsertionSort,
    SelectionSort,
    Array,
    LinkedList,
}

impl Visualisation {
    pub const ALL: [Visualisation; 7] = [
        Visualisation::LinearSearch,
        Visualisation::BinarySearch,
        Visualisation::BubbleSort,
        Visualisation::InsertionSort,
        Visualisation::SelectionSort,
        Visualisation::Array,
        Visualisation::LinkedList,
    ];

    pub fn name(self) -> &'static str {
        match self.algorithm() {
            Some(algorithm) => algorithm.name(),
            None if self == Self::LinkedList => "linked list",
            None => "array",
        }
    }

    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            Self::LinearSearch => Some(Algorithm::LinearSearch),
            Self::BinarySearch => Some(Algorithm::BinarySearch),
            Self::BubbleSort => Some(Algorithm::BubbleSort),
            Self::InsertionSort => Some(Algorithm::InsertionSort),
            Self::SelectionSort => Some(Algorithm::SelectionSort),
            Self::Array | Self::LinkedList => None,
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Self::LinkedList => Shape::LinkedList,
            _ => Shape::Array,
        }
    }

    fn is_search(self) -> bool {
        self.algorithm().is_some_and(Algorithm::is_search)
    }

    fn is_sort(self) -> bool {
        self.algorithm().is_some_and(|algorithm| !algorithm.is_search())
    }
}

impl fmt::Display for Visualisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct Session {
    visualisation: Visualisation,
    seed: Vec<Value>,
    interval: Duration,
    collection: Collection,
    player: Player,
    message: String,
}

impl Session {
    pub fn new(visualisation: Visualisation, config: &AppConfig) -> Self {
        let seed = config.seeds.for_kind(visualisation).to_vec();
        Self {
            visualisation,
            collection: Collection::new(visualisation.shape(), &seed),
            seed,
            interval: config.playback.interval(),
            player: Player::new(),
            message: String::new(),
        }
    }

    pub fn visualisation(&self) -> Visualisation {
        self.visualisation
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Feedback from the last collection edit.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> Result<Phase> {
        self.player.phase()
    }

    pub fn is_autoplaying(&self) -> Result<bool> {
        self.player.is_autoplaying()
    }

    /// Position of the playback cursor; `-1` before the first step or while idle.
    pub fn cursor(&self) -> Result<isize> {
        self.player.cursor()
    }

    /// The loaded run, if any.
    pub fn run(&self) -> Result<Option<Arc<Run>>> {
        self.player.inspect(|controller| controller.run().cloned())
    }

    pub fn add_element(&mut self, input: &str) -> Result<usize> {
        self.ensure_idle("add")?;
        let value = parse_value(input)?;

        let index = if self.visualisation == Visualisation::BinarySearch {
            self.collection.insert_sorted(value)
        } else {
            self.collection.push(value)
        };

        self.message = match self.visualisation {
            Visualisation::BinarySearch => {
                let values = self.collection.values();
                let place = if index == 0 {
                    "start of array".to_string()
                } else if index == values.len() - 1 {
                    "end of array".to_string()
                } else {
                    format!("between {} and {}", values[index - 1], values[index + 1])
                };
                format!("Added {value} at index {index} ({place})")
            }
            Visualisation::LinearSearch => format!("Added {value} at index {index} (end of array)"),
            Visualisation::Array => format!("Added {value} to the array"),
            Visualisation::LinkedList => format!("Added {value} to the linked list"),
            _ => format!("Added {value} at the end"),
        };
        tracing::debug!(value, index, "element added");
        Ok(index)
    }

    pub fn remove_last_element(&mut self) -> Result<Option<Value>> {
        self.ensure_idle("remove")?;
        let removed = self.collection.remove_last();
        if removed.is_some() {
            self.message = match self.visualisation {
                Visualisation::LinkedList => "Removed last node from the linked list".to_string(),
                _ => "Removed last element from the array".to_string(),
            };
        }
        Ok(removed)
    }

    /// Removes every occurrence of the typed value; returns its first index.
    pub fn remove_element(&mut self, input: &str) -> Result<Option<usize>> {
        self.ensure_idle("remove")?;
        let value = parse_value(input)?;

        let before = self.collection.values();
        let removed = self.collection.remove_value(value);
        self.message = match removed {
            Some(index) if self.visualisation == Visualisation::BinarySearch => {
                let left = match index {
                    0 => "start".to_string(),
                    _ => before[index - 1].to_string(),
                };
                let right = match before.get(index + 1) {
                    Some(next) => next.to_string(),
                    None => "end".to_string(),
                };
                format!("Removed {value} from index {index} (between {left} and {right})")
            }
            Some(index) => format!("Removed {value} from index {index}"),
            None => format!("Value {value} not found in array"),
        };
        Ok(removed)
    }

    /// Stops any run and returns to idle, keeping the edited collection.
    pub fn reset(&mut self) -> Result<()> {
        self.player.reset()?;
        self.message = "Ready".to_string();
        tracing::info!(visualisation = %self.visualisation, "run cleared");
        Ok(())
    }

    /// Stops any run and restores the seed collection.
    pub fn reset_to_default(&mut self) -> Result<()> {
        self.player.reset()?;
        self.collection = Collection::new(self.visualisation.shape(), &self.seed);
        self.message = match self.visualisation {
            Visualisation::Array => "Reset array to initial state".to_string(),
            Visualisation::LinkedList => "Reset linked list".to_string(),
            _ => "Reset to initial array".to_string(),
        };
        tracing::info!(visualisation = %self.visualisation, "reset to default");
        Ok(())
    }

    /// Generates and loads a sort run over the current collection.
    pub fn start_run(&mut self) -> Result<Transition> {
        let algorithm = match self.visualisation.algorithm() {
            Some(algorithm) if self.visualisation.is_sort() => algorithm,
            _ => return Err(self.unsupported("start run")),
        };
        self.discard_finished_run()?;
        self.player
            .start(Run::sort(algorithm, &self.collection.values()))
    }

    /// Generates and loads a search run for the typed value.
    pub fn search(&mut self, input: &str) -> Result<Transition> {
        let algorithm = match self.visualisation.algorithm() {
            Some(algorithm) if self.visualisation.is_search() => algorithm,
            _ => return Err(self.unsupported("search")),
        };
        let target = parse_value(input)?;
        self.discard_finished_run()?;
        self.player
            .start(Run::search(algorithm, &self.collection.values(), target))
    }

    pub fn next(&mut self) -> Result<Transition> {
        self.player.next()
    }

    pub fn previous(&mut self) -> Result<Transition> {
        self.player.previous()
    }

    pub fn toggle_autoplay(&mut self) -> Result<AutoPlayToggle> {
        self.player.toggle_autoplay(self.interval)
    }

    /// Diagram for the current cursor, or the plain collection when idle.
    pub fn frame(&self) -> Result<DiagramFrame> {
        let shape = self.visualisation.shape();
        Ok(match self.player.render_state()? {
            Some(state) => project(&state, shape),
            None => project_values(&self.collection.values(), shape, self.message.clone()),
        })
    }

    /// Diagram the cursor would show at `position`; `None` while idle or out
    /// of range.
    pub fn frame_at(&self, position: isize) -> Result<Option<DiagramFrame>> {
        let shape = self.visualisation.shape();
        Ok(self
            .player
            .render_state_at(position)?
            .map(|state| project(&state, shape)))
    }

    fn ensure_idle(&self, operation: &'static str) -> Result<()> {
        let phase = self.player.phase()?;
        if phase == Phase::Idle {
            return Ok(());
        }
        tracing::warn!(operation, phase = phase.label(), "collection edit rejected");
        Err(VisualiserError::CollectionLocked {
            phase: phase.label(),
        })
    }

    fn discard_finished_run(&mut self) -> Result<()> {
        if self.player.phase()? == Phase::Complete {
            self.player.reset()?;
        }
        Ok(())
    }

    fn unsupported(&self, operation: &'static str) -> VisualiserError {
        VisualiserError::NotSupported {
            operation,
            visualisation: self.visualisation.name(),
        }
    }
}
