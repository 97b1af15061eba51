use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{RenderState, Result, Value};

/// How a collection is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Free-standing boxes, no edges.
    Array,
    /// Boxes joined by directed edges in list order.
    LinkedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Normal,
    Highlighted,
    Comparing,
    Boundary,
    Target,
    Sorted,
}

impl VisualState {
    /// Marker the text renderer appends to a value.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Highlighted => "^",
            Self::Comparing => "~",
            Self::Boundary => "|",
            Self::Target => "*",
            Self::Sorted => "=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: String,
    pub display_value: String,
    pub visual_state: VisualState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub from_id: String,
    pub to_id: String,
}

/// Node and edge descriptors for one render tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramFrame {
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
    pub narration: String,
}

impl DiagramFrame {
    pub fn visual_states(&self) -> Vec<VisualState> {
        self.nodes.iter().map(|node| node.visual_state).collect()
    }
}

/// Projects a playback render state into diagram descriptors.
pub fn project(state: &RenderState, shape: Shape) -> DiagramFrame {
    let indices = &state.indices;
    let in_bounds = |index: usize| {
        indices
            .bounds
            .is_some_and(|(left, right)| index == left || index == right)
    };

    let nodes = state
        .snapshot
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let visual_state = if indices.target == Some(index) {
                VisualState::Target
            } else if indices.active == Some(index) {
                VisualState::Highlighted
            } else if in_bounds(index) {
                VisualState::Boundary
            } else if indices.compare == Some(index) {
                VisualState::Comparing
            } else if state.is_settled(index) {
                VisualState::Sorted
            } else {
                VisualState::Normal
            };
            node(index, *value, visual_state)
        })
        .collect();

    DiagramFrame {
        nodes,
        edges: edges(state.snapshot.len(), shape),
        narration: state.narration.clone(),
    }
}

/// Plain frame for a collection outside of any run.
pub fn project_values(
    values: &[Value],
    shape: Shape,
    narration: impl Into<String>,
) -> DiagramFrame {
    DiagramFrame {
        nodes: values
            .iter()
            .enumerate()
            .map(|(index, value)| node(index, *value, VisualState::Normal))
            .collect(),
        edges: edges(values.len(), shape),
        narration: narration.into(),
    }
}

fn node(index: usize, value: Value, visual_state: VisualState) -> NodeDescriptor {
    NodeDescriptor {
        id: index.to_string(),
        display_value: value.to_string(),
        visual_state,
    }
}

fn edges(len: usize, shape: Shape) -> Vec<EdgeDescriptor> {
    match shape {
        Shape::Array => Vec::new(),
        Shape::LinkedList => (1..len)
            .map(|to| EdgeDescriptor {
                from_id: (to - 1).to_string(),
                to_id: to.to_string(),
            })
            .collect(),
    }
}

/// Anything that can draw a [`DiagramFrame`].
pub trait DiagramRenderer {
    fn draw(&mut self, frame: &DiagramFrame) -> Result<()>;
}

/// Draws frames as one line of boxed values plus the narration.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagramRenderer for TextRenderer<W> {
    fn draw(&mut self, frame: &DiagramFrame) -> Result<()> {
        let boxes: Vec<String> = frame
            .nodes
            .iter()
            .map(|node| format!("[{}{}]", node.display_value, node.visual_state.marker()))
            .collect();
        let separator = if frame.edges.is_empty() { " " } else { " -> " };

        if boxes.is_empty() {
            writeln!(self.out, "(empty)")?;
        } else {
            writeln!(self.out, "{}", boxes.join(separator))?;
        }
        if !frame.narration.is_empty() {
            writeln!(self.out, "  {}", frame.narration)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps the most recent frame and forwards it to a renderer.
#[derive(Debug, Default)]
pub struct RenderGraph<R> {
    renderer: R,
    last_frame: Option<DiagramFrame>,
    frames_drawn: u64,
}

impl<R: DiagramRenderer> RenderGraph<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            last_frame: None,
            frames_drawn: 0,
        }
    }

    /// Draws `frame` unless it is identical to the previous one.
    pub fn present(&mut self, frame: DiagramFrame) -> Result<bool> {
        if self.last_frame.as_ref() == Some(&frame) {
            return Ok(false);
        }
        self.renderer.draw(&frame)?;
        self.last_frame = Some(frame);
        self.frames_drawn += 1;
        Ok(true)
    }

    pub fn last_frame(&self) -> Option<&DiagramFrame> {
        self.last_frame.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Phase, SettledRegion, StepIndices};

    fn state(
        indices: StepIndices,
        boundary: Option<usize>,
        settled: Option<SettledRegion>,
    ) -> RenderState {
        RenderState {
            snapshot: vec![10, 20, 30, 40, 50],
            indices,
            sorted_boundary: boundary,
            settled,
            narration: "step".to_string(),
            phase: Phase::Stepping,
            cursor: 0,
        }
    }

    #[test]
    fn bubble_frame_marks_pair_and_settled_suffix() {
        let frame = project(
            &state(StepIndices::pair(0, 1), Some(3), Some(SettledRegion::Suffix)),
            Shape::Array,
        );

        assert_eq!(
            frame.visual_states(),
            vec![
                VisualState::Highlighted,
                VisualState::Comparing,
                VisualState::Normal,
                VisualState::Sorted,
                VisualState::Sorted,
            ]
        );
        assert!(frame.edges.is_empty());
    }

    #[test]
    fn target_outranks_every_other_state() {
        let indices = StepIndices::active(2).with_bounds(1, 2).with_target(2);
        let frame = project(&state(indices, None, None), Shape::Array);

        assert_eq!(
            frame.visual_states(),
            vec![
                VisualState::Normal,
                VisualState::Boundary,
                VisualState::Target,
                VisualState::Normal,
                VisualState::Normal,
            ]
        );
    }

    #[test]
    fn linked_list_edges_join_consecutive_nodes() {
        let frame = project_values(&[7, 8, 9], Shape::LinkedList, "");
        let pairs: Vec<(&str, &str)> = frame
            .edges
            .iter()
            .map(|edge| (edge.from_id.as_str(), edge.to_id.as_str()))
            .collect();

        assert_eq!(pairs, vec![("0", "1"), ("1", "2")]);
        assert!(project_values(&[7], Shape::LinkedList, "").edges.is_empty());
    }

    #[test]
    fn text_renderer_writes_boxes_and_narration() {
        let frame = project(
            &state(StepIndices::pair(0, 1), Some(5), Some(SettledRegion::Prefix)),
            Shape::Array,
        );
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.draw(&frame).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "[10^] [20~] [30=] [40=] [50=]\n  step\n");
    }

    #[test]
    fn render_graph_skips_unchanged_frames() {
        let mut graph = RenderGraph::new(TextRenderer::new(Vec::new()));
        let frame = project_values(&[1, 2], Shape::LinkedList, "Added 2");

        assert!(graph.present(frame.clone()).unwrap());
        assert!(!graph.present(frame).unwrap());
        assert_eq!(graph.frames_drawn(), 1);
        assert_eq!(graph.last_frame().unwrap().narration, "Added 2");
    }
}
