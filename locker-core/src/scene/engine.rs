//! Object registry and scene engine

use heapless::Vec;

use super::geometry::Point;
use super::object::{Object, ObjectId, SceneFilter};
use super::SceneError;
use crate::state::{Scene, TouchAction};
use crate::traits::{Canvas, DisplayError};

/// Maximum number of registered objects
pub const MAX_OBJECTS: usize = 64;

/// Owns every object plus the scene currently on screen
///
/// Objects live in an arena addressed by [`ObjectId`]. A separate order
/// list is kept sorted ascending by priority; ties keep registration order.
pub struct Engine {
    objects: Vec<Object, MAX_OBJECTS>,
    order: Vec<u8, MAX_OBJECTS>,
    scene: Scene,
    dirty: bool,
}

impl Engine {
    pub fn new(initial: Scene) -> Self {
        Self {
            objects: Vec::new(),
            order: Vec::new(),
            scene: initial,
            dirty: true,
        }
    }

    /// Register an object that belongs to a single scene
    pub fn register(&mut self, object: Object, scene: Scene) -> Result<ObjectId, SceneError> {
        self.insert(object, SceneFilter::Only(scene))
    }

    /// Register an object shown in every scene
    pub fn register_global(&mut self, object: Object) -> Result<ObjectId, SceneError> {
        self.insert(object, SceneFilter::All)
    }

    fn insert(&mut self, mut object: Object, scene: SceneFilter) -> Result<ObjectId, SceneError> {
        object.scene = scene;
        let priority = object.priority;
        let index = self.objects.len();
        self.objects
            .push(object)
            .map_err(|_| SceneError::RegistryFull)?;
        // Arena and order share capacity, so this cannot fail after the push above
        self.order
            .push(index as u8)
            .map_err(|_| SceneError::RegistryFull)?;

        // Single insertion step: walk left past strictly greater priorities
        let mut pos = self.order.len() - 1;
        while pos > 0 && self.objects[self.order[pos - 1] as usize].priority > priority {
            self.order.swap(pos - 1, pos);
            pos -= 1;
        }

        self.dirty = true;
        Ok(ObjectId(index as u8))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Result<&Object, SceneError> {
        self.objects.get(id.index()).ok_or(SceneError::UnknownObject)
    }

    /// Mutable access to an object; marks the engine dirty
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object, SceneError> {
        let object = self
            .objects
            .get_mut(id.index())
            .ok_or(SceneError::UnknownObject)?;
        self.dirty = true;
        Ok(object)
    }

    /// Object ids in draw order
    pub fn draw_order(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.order.iter().map(|&i| ObjectId(i))
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Switch scenes; a switch to the current scene still requests a redraw
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw every visible object of the current scene in ascending priority
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), DisplayError> {
        for &index in self.order.iter() {
            let object = &self.objects[index as usize];
            if object.hidden || !object.scene.matches(self.scene) {
                continue;
            }
            object.draw(canvas)?;
        }
        Ok(())
    }

    /// Topmost object of the current scene whose touch area contains `point`
    pub fn hit_test(&self, point: Point) -> Option<ObjectId> {
        self.order.iter().rev().copied().find_map(|index| {
            let object = &self.objects[index as usize];
            (object.scene.matches(self.scene) && object.is_touched(point))
                .then_some(ObjectId(index))
        })
    }

    /// Action of the topmost object under `point`
    pub fn dispatch(&self, point: Point) -> Option<(ObjectId, TouchAction)> {
        self.hit_test(point)
            .map(|id| (id, self.objects[id.index()].action()))
    }
}
