//! Drawing session: the state machine that turns input into element edits.

use crate::camera::Camera;
use crate::config::SessionConfig;
use crate::eraser::Eraser;
use crate::history::History;
use crate::input::{InputEvent, Shortcut, shortcut_for};
use crate::shapes::{Element, ElementId, Text};
use crate::state::{WhiteboardState, now_millis};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::Point;
use std::collections::HashSet;

/// How much of the surface needs repainting after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Redraw {
    #[default]
    None,
    /// Elements changed; the grid did not.
    Scene,
    /// The view changed; repaint grid and elements.
    Full,
}

impl Redraw {
    /// Combine two requests, keeping the larger one.
    pub fn merge(self, other: Redraw) -> Redraw {
        self.max(other)
    }
}

/// What the host should do after the session handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: Redraw,
    /// The element set changed in a way that should be persisted.
    pub save: bool,
}

impl Response {
    pub const NONE: Self = Self {
        redraw: Redraw::None,
        save: false,
    };

    pub fn scene() -> Self {
        Self {
            redraw: Redraw::Scene,
            save: false,
        }
    }

    pub fn full() -> Self {
        Self {
            redraw: Redraw::Full,
            save: false,
        }
    }

    pub fn with_save(mut self) -> Self {
        self.save = true;
        self
    }

    pub fn merge(self, other: Response) -> Self {
        Self {
            redraw: self.redraw.merge(other.redraw),
            save: self.save || other.save,
        }
    }
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Dragging the view with the hand tool.
    Panning { last: Point },
    /// Drawing a new element. It joins the element list on release.
    Building { element: Element },
    /// Erasing with the width captured at pointer down.
    Erasing { stroke_width: f64 },
}

/// All state of one whiteboard: elements, view, history and tool settings.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    elements: Vec<Element>,
    gesture: Gesture,
    camera: Camera,
    history: History,
    eraser: Eraser,
    settings: ToolSettings,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Create an empty session.
    ///
    /// Out-of-range config values fall back to their defaults.
    pub fn new(config: SessionConfig) -> Self {
        let config = config.sanitized();
        Self {
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            history: History::with_capacity(&[], config.max_history),
            settings: ToolSettings::from_config(&config),
            elements: Vec::new(),
            gesture: Gesture::Idle,
            eraser: Eraser::new(),
            config,
        }
    }

    /// Committed elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The element being drawn, if any.
    pub fn current_element(&self) -> Option<&Element> {
        match &self.gesture {
            Gesture::Building { element } => Some(element),
            _ => None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Replace the session contents with a persisted state.
    ///
    /// Any gesture in progress is dropped and history restarts from the
    /// loaded elements.
    pub fn load(&mut self, state: WhiteboardState) -> Response {
        let mut elements = state.elements;
        elements.retain(Element::is_drawable);
        dedupe_ids(&mut elements);
        self.elements = elements;
        self.camera.set_view(state.view_offset, state.zoom);
        self.gesture = Gesture::Idle;
        self.eraser.begin_stroke();
        self.history.reset(&self.elements);
        log::debug!(
            "Loaded {} elements at zoom {}",
            self.elements.len(),
            self.camera.zoom
        );
        Response::full()
    }

    /// Snapshot the session for persistence, stamped with the current time.
    pub fn to_state(&self) -> WhiteboardState {
        WhiteboardState {
            elements: self.elements.clone(),
            view_offset: self.camera.offset,
            zoom: self.camera.zoom,
            last_modified: now_millis(),
        }
    }

    /// Handle one input event.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.end_gesture(),
            InputEvent::Wheel { position, delta_y } => {
                let factor = if delta_y > 0.0 {
                    self.config.wheel_zoom_out
                } else {
                    self.config.wheel_zoom_in
                };
                self.camera.zoom_at(position, factor);
                Response::full()
            }
            InputEvent::Key { key, modifiers } => match shortcut_for(&key, modifiers) {
                Some(Shortcut::Undo) => self.undo(),
                Some(Shortcut::Redo) => self.redo(),
                Some(Shortcut::SelectTool(tool)) => self.select_tool(tool),
                None => Response::NONE,
            },
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Clear => self.clear(),
            InputEvent::ZoomIn => {
                self.camera.zoom_by(self.config.button_zoom_step);
                Response::full()
            }
            InputEvent::ZoomOut => {
                self.camera.zoom_by(1.0 / self.config.button_zoom_step);
                Response::full()
            }
            InputEvent::ResetZoom => {
                self.camera.reset();
                Response::full()
            }
            InputEvent::SelectTool { tool } => self.select_tool(tool),
            InputEvent::SetColor { color } => {
                self.settings.color = color;
                Response::NONE
            }
            InputEvent::SetStrokeWidth { width } => {
                self.settings.set_stroke_width(width);
                Response::NONE
            }
            InputEvent::SetTextLabel { text } => {
                self.settings.text_label = text;
                Response::NONE
            }
        }
    }

    fn pointer_down(&mut self, position: Point) -> Response {
        if self.is_gesture_active() {
            return Response::NONE;
        }

        let model = self.camera.device_to_model(position);
        match self.settings.tool {
            ToolKind::Hand => {
                self.gesture = Gesture::Panning { last: position };
                Response::NONE
            }
            ToolKind::Eraser => {
                let stroke_width = self.settings.stroke_width;
                self.eraser.begin_stroke();
                self.gesture = Gesture::Erasing { stroke_width };
                self.erase_at(model, stroke_width)
            }
            _ => match self.settings.start_element(model) {
                Some(element) => {
                    self.gesture = Gesture::Building { element };
                    Response::scene()
                }
                None => Response::NONE,
            },
        }
    }

    fn pointer_move(&mut self, position: Point) -> Response {
        let model = self.camera.device_to_model(position);
        match &mut self.gesture {
            Gesture::Idle => Response::NONE,
            Gesture::Panning { last } => {
                let delta = position - *last;
                *last = position;
                self.camera.pan(delta);
                Response::full()
            }
            Gesture::Building { element } => {
                element.drag_to(model);
                Response::scene()
            }
            Gesture::Erasing { stroke_width } => {
                let stroke_width = *stroke_width;
                self.erase_at(model, stroke_width)
            }
        }
    }

    fn erase_at(&mut self, model: Point, stroke_width: f64) -> Response {
        let removed = self.eraser.erase_at(
            &mut self.elements,
            model,
            stroke_width,
            self.config.eraser_radius_factor,
        );
        if removed > 0 {
            Response::scene()
        } else {
            Response::NONE
        }
    }

    /// Finish the current gesture. Pointer up and pointer leave both end here.
    fn end_gesture(&mut self) -> Response {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => Response::NONE,
            Gesture::Building { element } => {
                log::debug!("Committed {} element {}", element.kind(), element.id());
                self.elements.push(element);
                self.history.commit(&self.elements);
                Response::scene().with_save()
            }
            Gesture::Erasing { .. } => {
                let removed = self.eraser.erased_count();
                self.eraser.end_stroke();
                log::debug!("Eraser stroke removed {} elements", removed);
                self.history.commit(&self.elements);
                Response::NONE.with_save()
            }
        }
    }

    /// Select a tool. An active gesture keeps the tool it started with.
    pub fn select_tool(&mut self, tool: ToolKind) -> Response {
        self.settings.set_tool(tool);
        Response::NONE
    }

    /// Step back one history entry.
    pub fn undo(&mut self) -> Response {
        match self.history.undo() {
            Some(elements) => {
                self.elements = elements;
                log::debug!("Undo to step {}", self.history.step());
                Response::scene().with_save()
            }
            None => Response::NONE,
        }
    }

    /// Step forward one history entry.
    pub fn redo(&mut self) -> Response {
        match self.history.redo() {
            Some(elements) => {
                self.elements = elements;
                log::debug!("Redo to step {}", self.history.step());
                Response::scene().with_save()
            }
            None => Response::NONE,
        }
    }

    /// Remove every element. Undoable.
    pub fn clear(&mut self) -> Response {
        self.elements.clear();
        self.history.commit(&self.elements);
        Response::scene().with_save()
    }

    /// Place and commit a text label at a device position in one step.
    pub fn place_text(&mut self, device_point: Point, text: impl Into<String>) -> Response {
        let anchor = self.camera.device_to_model(device_point);
        let label = Text::new(ElementId::generate(), anchor, text, self.settings.style());
        self.elements.push(Element::Text(label));
        self.history.commit(&self.elements);
        Response::scene().with_save()
    }
}

/// Give every element after the first with a given id a fresh one.
///
/// Timestamp ids from older records can repeat.
fn dedupe_ids(elements: &mut [Element]) {
    let mut seen = HashSet::new();
    for element in elements {
        if !seen.insert(element.id().clone()) {
            let id = ElementId::generate();
            log::warn!("Duplicate element id {}, reassigned {}", element.id(), id);
            element.set_id(id.clone());
            seen.insert(id);
        }
    }
}
