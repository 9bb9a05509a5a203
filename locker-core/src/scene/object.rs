//! Scene objects
//!
//! An object bundles a handful of primitives with an optional touch area
//! and the action dispatched when that area is touched.

use heapless::Vec;

use super::geometry::{Area, Point};
use super::primitives::{Label, Outline, Rect};
use super::SceneError;
use crate::state::{Scene, TouchAction};
use crate::traits::{Canvas, DisplayError};

/// Maximum primitives of each kind per object
pub const MAX_PRIMITIVES: usize = 5;

/// Handle to an object owned by the [`Engine`](super::Engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObjectId(pub(crate) u8);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which scenes an object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneFilter {
    /// Drawn and touchable in every scene
    All,
    /// Drawn and touchable in one scene only
    Only(Scene),
}

impl SceneFilter {
    pub fn matches(self, scene: Scene) -> bool {
        match self {
            SceneFilter::All => true,
            SceneFilter::Only(own) => own == scene,
        }
    }
}

/// Draw and touch unit
#[derive(Debug, Clone)]
pub struct Object {
    pub(crate) scene: SceneFilter,
    /// Lower priorities are drawn first and hit-tested last
    pub priority: i16,
    pub hidden: bool,
    rects: Vec<Rect, MAX_PRIMITIVES>,
    outlines: Vec<Outline, MAX_PRIMITIVES>,
    labels: Vec<Label, MAX_PRIMITIVES>,
    touch: Option<Area>,
    action: TouchAction,
}

impl Object {
    /// Create an empty, untouchable object
    pub fn new(priority: i16) -> Self {
        Self {
            scene: SceneFilter::All,
            priority,
            hidden: false,
            rects: Vec::new(),
            outlines: Vec::new(),
            labels: Vec::new(),
            touch: None,
            action: TouchAction::None,
        }
    }

    /// Add a filled rectangle, returning its index
    pub fn add_rect(&mut self, rect: Rect) -> Result<usize, SceneError> {
        self.rects
            .push(rect)
            .map_err(|_| SceneError::TooManyPrimitives)?;
        Ok(self.rects.len() - 1)
    }

    /// Add an outline, returning its index
    pub fn add_outline(&mut self, outline: Outline) -> Result<usize, SceneError> {
        self.outlines
            .push(outline)
            .map_err(|_| SceneError::TooManyPrimitives)?;
        Ok(self.outlines.len() - 1)
    }

    /// Add a text label, returning its index
    pub fn add_label(&mut self, label: Label) -> Result<usize, SceneError> {
        self.labels
            .push(label)
            .map_err(|_| SceneError::TooManyPrimitives)?;
        Ok(self.labels.len() - 1)
    }

    /// Make the object touch-sensitive
    pub fn set_touch(&mut self, area: Area, action: TouchAction) {
        self.touch = Some(area);
        self.action = action;
    }

    pub fn scene(&self) -> SceneFilter {
        self.scene
    }

    pub fn touch_area(&self) -> Option<Area> {
        self.touch
    }

    pub fn action(&self) -> TouchAction {
        self.action
    }

    /// Whether `point` falls inside the touch area
    ///
    /// Objects without a touch area are never touched.
    pub fn is_touched(&self, point: Point) -> bool {
        self.touch.is_some_and(|area| area.contains(point))
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn rect_mut(&mut self, index: usize) -> Option<&mut Rect> {
        self.rects.get_mut(index)
    }

    pub fn outline_mut(&mut self, index: usize) -> Option<&mut Outline> {
        self.outlines.get_mut(index)
    }

    pub fn label_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.labels.get_mut(index)
    }

    /// Draw the object: fills, then outlines, then labels
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), DisplayError> {
        if self.hidden {
            return Ok(());
        }
        for rect in self.rects.iter().filter(|r| !r.hidden) {
            canvas.fill_rect(rect.area, rect.color)?;
        }
        for outline in self.outlines.iter().filter(|o| !o.hidden) {
            canvas.stroke_box(outline.area, outline.color, outline.width)?;
        }
        for label in self.labels.iter().filter(|l| !l.hidden) {
            canvas.draw_text(label.origin, &label.style, label.text.as_str())?;
        }
        Ok(())
    }
}
