//! Positioning for the floating panel and its launcher button: anchor
//! inference, drag tracking clamped to the viewport, and full-screen
//! save/restore.
//!
//! Layout is described CSS-style with optional edge offsets. Any pair of
//! opposite edges may be the one pinning an element; a drag always rewrites the
//! position as `top`/`left` so later inference has a single answer.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}
impl Edges {
    pub fn top_left(top: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
            ..Self::default()
        }
    }

    /// All four edges pinned to the viewport.
    pub fn pinned() -> Self {
        Self {
            top: Some(0.0),
            right: Some(0.0),
            bottom: Some(0.0),
            left: Some(0.0),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}
impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which edges are constraining layout. `top` beats `bottom` and `left` beats
/// `right` when both are set.
pub fn infer_anchor(edges: &Edges) -> Anchor {
    let from_bottom = edges.top.is_none() && edges.bottom.is_some();
    let from_right = edges.left.is_none() && edges.right.is_some();
    match (from_bottom, from_right) {
        (false, false) => Anchor::TopLeft,
        (false, true) => Anchor::TopRight,
        (true, false) => Anchor::BottomLeft,
        (true, true) => Anchor::BottomRight,
    }
}

/// Absolute top/left of an element, whichever corner it is anchored by.
pub fn resolve_position(edges: &Edges, element: Size, viewport: Size) -> Position {
    let top = match (edges.top, edges.bottom) {
        (Some(top), _) => top,
        (None, Some(bottom)) => viewport.height - bottom - element.height,
        (None, None) => 0.0,
    };
    let left = match (edges.left, edges.right) {
        (Some(left), _) => left,
        (None, Some(right)) => viewport.width - right - element.width,
        (None, None) => 0.0,
    };
    Position { top, left }
}

fn clamp_to_viewport(position: Position, element: Size, viewport: Size) -> Position {
    let max_top = viewport.height - element.height;
    let max_left = viewport.width - element.width;
    Position {
        top: position.top.min(max_top).max(0.0),
        left: position.left.min(max_left).max(0.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GeometryMode {
    Anchored,
    FullScreen { saved: Option<Edges> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragTracker {
    pointer: Point,
    origin: Position,
    element: Size,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    edges: Edges,
    mode: GeometryMode,
    defaults: Edges,
    #[serde(skip)]
    drag: Option<DragTracker>,
}

impl PanelGeometry {
    pub fn new(defaults: Edges) -> Self {
        Self {
            edges: defaults,
            mode: GeometryMode::Anchored,
            defaults,
            drag: None,
        }
    }

    /// Starts full screen with nothing saved; leaving full screen falls back to
    /// `defaults`.
    pub fn full_screen(defaults: Edges) -> Self {
        Self {
            edges: Edges::pinned(),
            mode: GeometryMode::FullScreen { saved: None },
            defaults,
            drag: None,
        }
    }

    /// Floating panel: 50px from the top right corner, 520 wide.
    pub fn panel() -> Self {
        Self::new(Edges {
            top: Some(50.0),
            right: Some(50.0),
            width: Some(520.0),
            ..Edges::default()
        })
    }

    /// Launcher button in the bottom right corner.
    pub fn launcher() -> Self {
        Self::new(Edges {
            bottom: Some(20.0),
            right: Some(20.0),
            ..Edges::default()
        })
    }

    pub fn edges(&self) -> &Edges {
        &self.edges
    }

    pub fn mode(&self) -> &GeometryMode {
        &self.mode
    }

    pub fn anchor(&self) -> Anchor {
        infer_anchor(&self.edges)
    }

    pub fn is_full_screen(&self) -> bool {
        matches!(self.mode, GeometryMode::FullScreen { .. })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts tracking a drag. A full-screen element is restored first.
    pub fn begin_drag(&mut self, pointer: Point, element: Size, viewport: Size) -> Position {
        if self.is_full_screen() {
            self.exit_full_screen();
        }
        let origin = resolve_position(&self.edges, element, viewport);
        debug!("drag start from {:?} at {:?}", self.anchor(), origin);
        self.drag = Some(DragTracker {
            pointer,
            origin,
            element,
        });
        origin
    }

    /// Moves by the pointer delta since the drag began, clamped so the element
    /// stays inside the viewport. Returns `None` when no drag is active.
    pub fn on_drag(&mut self, pointer: Point, viewport: Size) -> Option<Position> {
        let drag = self.drag?;
        let moved = Position {
            top: drag.origin.top + (pointer.y - drag.pointer.y),
            left: drag.origin.left + (pointer.x - drag.pointer.x),
        };
        let position = clamp_to_viewport(moved, drag.element, viewport);
        self.write_position(position);
        Some(position)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Returns whether the element is full screen afterwards.
    pub fn toggle_full_screen(&mut self) -> bool {
        self.drag = None;
        match self.mode {
            GeometryMode::Anchored => {
                self.mode = GeometryMode::FullScreen {
                    saved: Some(self.edges),
                };
                self.edges = Edges::pinned();
                debug!("entered full screen");
                true
            }
            GeometryMode::FullScreen { .. } => {
                self.exit_full_screen();
                false
            }
        }
    }

    /// Pulls an anchored element back on screen after the viewport shrank.
    /// Size is never changed. Returns whether the element moved.
    pub fn on_viewport_resize(&mut self, element: Size, viewport: Size) -> bool {
        if self.is_full_screen() {
            return false;
        }
        let current = resolve_position(&self.edges, element, viewport);
        let mut shifted = current;
        if current.left + element.width > viewport.width {
            shifted.left = (viewport.width - element.width).max(0.0);
        }
        if current.top + element.height > viewport.height {
            shifted.top = (viewport.height - element.height).max(0.0);
        }
        if shifted == current {
            return false;
        }
        self.write_position(shifted);
        true
    }

    fn exit_full_screen(&mut self) {
        if let GeometryMode::FullScreen { saved } = self.mode {
            self.edges = saved.unwrap_or(self.defaults);
            self.mode = GeometryMode::Anchored;
            debug!("left full screen");
        }
    }

    fn write_position(&mut self, position: Position) {
        self.edges.top = Some(position.top);
        self.edges.left = Some(position.left);
        self.edges.right = None;
        self.edges.bottom = None;
    }
}
