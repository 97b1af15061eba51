//! Core library for the Algorithm Visualiser.
//!
//! Algorithms are run eagerly into ordered step records ([`generate`](mod@generate)), a
//! playback controller walks those records forward, backward or on a timer
//! ([`playback`], [`timeline`]), and each position is projected into node
//! and edge descriptors for a diagram renderer ([`render`]). [`session`]
//! ties this to the editable collection a front end works with.

pub mod collection;
pub mod config;
pub mod error;
pub mod generate;
pub mod playback;
pub mod record;
pub mod render;
pub mod session;
pub mod step;
pub mod timeline;

pub use collection::{parse_value, Collection, LinkedList};
pub use config::{AppConfig, PlaybackConfig, SeedConfig};
pub use error::{Result, VisualiserError};
pub use generate::{generate, Algorithm, Run, SearchOutcome};
pub use playback::{
    AutoPlayToggle, Ignored, Phase, PlaybackController, Player, RenderState, Transition,
};
pub use record::{Recorder, Transcript};
pub use render::{
    project, project_values, DiagramFrame, DiagramRenderer, EdgeDescriptor, NodeDescriptor,
    RenderGraph, Shape, TextRenderer, VisualState,
};
pub use session::{Session, Visualisation};
pub use step::{SettledRegion, StepIndices, StepKind, StepRecord, Value};
pub use timeline::{PlaybackClock, TickControl, Ticker};
