//! Session state and touch action handling

use heapless::String;

use super::layout::Layout;
use crate::config::{KioskConfig, MAX_PIN_LEN};
use crate::scene::{Engine, Point, SceneError, TextBuffer};
use crate::state::{ComputerId, Event, Scene, TouchAction};
use crate::touch::{RawPoint, TouchFilter};
use crate::traits::{
    AccessAttempt, AccessLog, Canvas, ComputerStatus, DisplayError, EvidenceCapture, LockActuator,
    StatusSource, Verifier,
};

/// Samples averaged per accepted touch
pub const TOUCH_WINDOW: usize = 20;

/// What a handled action did, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Nothing changed
    Ignored,
    SceneChanged { from: Scene, to: Scene },
    ComputerSelected(ComputerId),
    DigitAppended,
    DigitRemoved,
    Granted(ComputerId),
    Denied(ComputerId),
}

/// An accepted touch and what it triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    pub point: Point,
    pub action: TouchAction,
    pub outcome: Outcome,
}

/// The kiosk: scene engine, session and collaborators
pub struct Kiosk<V, S, L, A, E = ()> {
    engine: Engine,
    layout: Layout,
    filter: TouchFilter<TOUCH_WINDOW>,
    verifier: V,
    status: S,
    lock: L,
    log: A,
    capture: E,
    computer: Option<ComputerId>,
    pin: String<MAX_PIN_LEN>,
    pin_len: usize,
    pulse_ms: u32,
    now_ms: u64,
    release_at: Option<u64>,
}

impl<V, S, L, A, E> Kiosk<V, S, L, A, E>
where
    V: Verifier,
    S: StatusSource,
    L: LockActuator,
    A: AccessLog,
    E: EvidenceCapture,
{
    /// Build the UI and start on the selection scene with the lock released
    pub fn new(
        config: &KioskConfig,
        verifier: V,
        status: S,
        mut lock: L,
        log: A,
        capture: E,
    ) -> Result<Self, SceneError> {
        let mut engine = Engine::new(Scene::Selection);
        let layout = Layout::build(&mut engine, config)?;
        lock.set_lock(false);

        let mut kiosk = Self {
            engine,
            layout,
            filter: TouchFilter::new(config.filter_config()),
            verifier,
            status,
            lock,
            log,
            capture,
            computer: None,
            pin: String::new(),
            pin_len: config.pin_len(),
            pulse_ms: config.lock.pulse_ms,
            now_ms: 0,
            release_at: None,
        };
        kiosk.refresh()?;
        Ok(kiosk)
    }

    pub fn scene(&self) -> Scene {
        self.engine.scene()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn computer(&self) -> Option<ComputerId> {
        self.computer
    }

    /// Number of PIN digits entered so far
    pub fn pin_entered(&self) -> usize {
        self.pin.len()
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    pub fn access_log(&self) -> &A {
        &self.log
    }

    pub fn capture(&self) -> &E {
        &self.capture
    }

    /// Status of the selected computer; `NoComputer` when none is selected
    pub fn current_status(&self) -> ComputerStatus {
        self.computer
            .map(|id| self.status.status_of(id))
            .unwrap_or(ComputerStatus::NoComputer)
    }

    /// Feed one touch sample; dispatches when the filter accepts a press
    pub fn poll(&mut self, sample: Option<RawPoint>) -> Result<Option<Dispatch>, SceneError> {
        let Some(point) = self.filter.update(sample) else {
            return Ok(None);
        };
        let action = self
            .engine
            .dispatch(point)
            .map(|(_, action)| action)
            .unwrap_or_default();
        let outcome = self.handle(action)?;
        Ok(Some(Dispatch {
            point,
            action,
            outcome,
        }))
    }

    /// Apply a touch action to the session
    pub fn handle(&mut self, action: TouchAction) -> Result<Outcome, SceneError> {
        match action {
            TouchAction::None => Ok(Outcome::Ignored),
            TouchAction::SelectScene(scene) => {
                let from = self.engine.scene();
                self.switch(Event::Navigate(scene))?;
                Ok(Outcome::SceneChanged { from, to: scene })
            }
            TouchAction::SelectComputer(id) => {
                self.computer = Some(id);
                self.switch(Event::ComputerChosen)?;
                Ok(Outcome::ComputerSelected(id))
            }
            TouchAction::AppendDigit(digit) => {
                if !self.current_status().accepts_entry() || self.pin.len() >= self.pin_len {
                    return Ok(Outcome::Ignored);
                }
                if self.pin.push(digit).is_err() {
                    return Ok(Outcome::Ignored);
                }
                self.pin_label()?.push(digit);
                Ok(Outcome::DigitAppended)
            }
            TouchAction::Backspace => {
                if self.pin.pop().is_none() {
                    return Ok(Outcome::Ignored);
                }
                self.pin_label()?.remove_last(1);
                Ok(Outcome::DigitRemoved)
            }
            TouchAction::Submit => self.submit(),
        }
    }

    /// Advance the clock; releases the lock once the pulse has elapsed
    ///
    /// Returns true on the tick that releases it.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        match self.release_at {
            Some(deadline) if now_ms >= deadline => {
                self.lock.set_lock(false);
                self.release_at = None;
                true
            }
            _ => false,
        }
    }

    /// Redraw the current scene if anything changed
    ///
    /// Returns whether a frame was drawn. A failed frame stays dirty.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<bool, DisplayError> {
        if !self.engine.is_dirty() {
            return Ok(false);
        }
        self.engine.draw(canvas)?;
        canvas.present()?;
        self.engine.mark_clean();
        Ok(true)
    }

    fn submit(&mut self) -> Result<Outcome, SceneError> {
        let Some(computer) = self.computer else {
            return Ok(Outcome::Ignored);
        };
        if !self.status.status_of(computer).accepts_entry() {
            return Ok(Outcome::Ignored);
        }

        let granted = self.verifier.verify(computer, &self.pin);
        self.clear_pin()?;
        self.log.record(&AccessAttempt {
            computer,
            group: self.status.group_of(computer),
            granted,
        });

        if granted {
            // A grant during a pulse extends it without re-engaging
            if self.release_at.is_none() {
                self.lock.set_lock(true);
            }
            self.release_at = Some(self.now_ms + self.pulse_ms as u64);
            self.capture.trigger(computer);
            self.switch(Event::AccessGranted)?;
            Ok(Outcome::Granted(computer))
        } else {
            self.switch(Event::AccessDenied)?;
            Ok(Outcome::Denied(computer))
        }
    }

    /// Transition and bring every status-dependent object up to date
    fn switch(&mut self, event: Event) -> Result<(), SceneError> {
        let next = self.engine.scene().transition(event);
        self.engine.set_scene(next);
        if matches!(event, Event::Navigate(_) | Event::ComputerChosen) {
            self.clear_pin()?;
            self.refresh()?;
        }
        Ok(())
    }

    fn clear_pin(&mut self) -> Result<(), SceneError> {
        self.pin.clear();
        self.pin_label()?.clear();
        Ok(())
    }

    fn pin_label(&mut self) -> Result<&mut TextBuffer, SceneError> {
        let id = self.layout.pin_field;
        self.engine
            .object_mut(id)?
            .label_mut(0)
            .map(|label| &mut label.text)
            .ok_or(SceneError::UnknownObject)
    }

    fn refresh(&mut self) -> Result<(), SceneError> {
        // Entry header
        let status = self.current_status();
        let name = self
            .computer
            .and_then(|id| {
                self.layout
                    .buttons
                    .iter()
                    .find(|(computer, _)| *computer == id)
                    .map(|(_, button)| *button)
            })
            .map(|button| self.engine.object(button))
            .transpose()?
            .and_then(|button| button.labels().first())
            .map(|label| label.text.clone())
            .unwrap_or_default();

        let header = self.engine.object_mut(self.layout.entry_header)?;
        if let Some(swatch) = header.rect_mut(0) {
            swatch.color = status.color();
        }
        if let Some(label) = header.label_mut(0) {
            label.text = name;
        }
        if let Some(label) = header.label_mut(1) {
            label.text.set(status.as_str());
        }

        // Computer buttons
        for i in 0..self.layout.buttons.len() {
            let (computer, id) = self.layout.buttons[i];
            let color = self.status.status_of(computer).color();
            if let Some(swatch) = self.engine.object_mut(id)?.rect_mut(1) {
                swatch.color = color;
            }
        }

        // Tab marker
        let tab = self.layout.tab_area(self.engine.scene()).inset(2);
        if let Some(outline) = self.engine.object_mut(self.layout.tab_marker)?.outline_mut(0) {
            outline.area = tab;
        }
        Ok(())
    }
}
