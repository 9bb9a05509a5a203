//! Fixed UI layout
//!
//! Builds every object once for a given screen size and computer list.
//! Coordinates scale with the configured display size; the default 320x240
//! panel is the reference.

use heapless::Vec;

use crate::config::{KioskConfig, MAX_COMPUTERS};
use crate::scene::{
    Area, Color, Engine, Label, Object, ObjectId, Outline, Point, Rect, SceneError, TextBuffer,
    TextStyle,
};
use crate::state::{ComputerId, Scene, TouchAction};
use crate::traits::ComputerStatus;

const BACKGROUND: i16 = -100;
const PANEL: i16 = 0;
const WIDGET: i16 = 10;
const MARKER: i16 = 20;

const SMALL: u8 = 10;
const MEDIUM: u8 = 13;
const LARGE: u8 = 20;

const MARGIN: i32 = 6;
const GRID_COLUMNS: usize = 4;

/// Handles to the objects the controller updates at runtime
#[derive(Debug, Clone)]
pub struct Layout {
    /// Outline drawn around the active header tab
    pub tab_marker: ObjectId,
    tabs: [Area; 2],
    /// One button per configured computer, in config order
    pub buttons: Vec<(ComputerId, ObjectId), MAX_COMPUTERS>,
    /// Entry scene header: swatch rect, name label, status label
    pub entry_header: ObjectId,
    /// Masked PIN label
    pub pin_field: ObjectId,
}

impl Layout {
    /// Register the whole UI with `engine`
    pub fn build(engine: &mut Engine, config: &KioskConfig) -> Result<Self, SceneError> {
        let w = config.display.width as i32;
        let h = config.display.height as i32;
        let header_h = h / 6;
        let body = Area::new(MARGIN, header_h + MARGIN, w - 1 - MARGIN, h - 1 - MARGIN);

        // Background
        let mut background = Object::new(BACKGROUND);
        background.add_rect(Rect::new(Area::new(0, 0, w - 1, h - 1), Color::WHITE))?;
        engine.register_global(background)?;

        // Header with title and tabs
        let tab_w = w / 5;
        let tabs = [
            Area::new(w - 2 * tab_w, 0, w - tab_w - 1, header_h - 1),
            Area::new(w - tab_w, 0, w - 1, header_h - 1),
        ];
        let mut header = Object::new(PANEL);
        header.add_rect(Rect::new(Area::new(0, 0, w - 1, header_h - 1), Color::BLUE))?;
        header.add_label(Label::new(
            Point::new(MARGIN, (header_h - LARGE as i32) / 2),
            TextStyle::new(LARGE, Color::WHITE),
            TextBuffer::with_text(config.ui.title.as_str()),
        ))?;
        engine.register_global(header)?;

        engine.register_global(button(
            tabs[0],
            Color::BLUE,
            "Lockers",
            SMALL,
            Color::WHITE,
            TouchAction::SelectScene(Scene::Selection),
        )?)?;
        engine.register_global(button(
            tabs[1],
            Color::BLUE,
            "Help",
            SMALL,
            Color::WHITE,
            TouchAction::SelectScene(Scene::Help),
        )?)?;

        let mut marker = Object::new(MARKER);
        marker.add_outline(Outline::new(tabs[0].inset(2), Color::WHITE, 2))?;
        let tab_marker = engine.register_global(marker)?;

        let buttons = build_selection(engine, config, body)?;
        let (entry_header, pin_field) = build_entry(engine, config, body)?;
        build_results(engine, body)?;
        build_help(engine, body)?;

        Ok(Self {
            tab_marker,
            tabs,
            buttons,
            entry_header,
            pin_field,
        })
    }

    /// Area of the header tab highlighted for `scene`
    pub fn tab_area(&self, scene: Scene) -> Area {
        self.tabs[scene.tab().min(self.tabs.len() - 1)]
    }
}

/// Approximate pixel width of `text` at `size`
fn text_width(text: &str, size: u8) -> i32 {
    text.chars().count() as i32 * size as i32 * 3 / 5
}

/// Label centered inside `area`
fn centered_label(area: Area, text: &str, size: u8, color: Color) -> Label {
    let origin = Point::new(
        area.x1 + (area.width() as i32 - text_width(text, size)) / 2,
        area.y1 + (area.height() as i32 - size as i32) / 2,
    );
    Label::new(origin, TextStyle::new(size, color), TextBuffer::with_text(text))
}

/// Face, border and centered caption; touching anywhere on it fires `action`
fn button(
    area: Area,
    face: Color,
    text: &str,
    size: u8,
    text_color: Color,
    action: TouchAction,
) -> Result<Object, SceneError> {
    let mut object = Object::new(WIDGET);
    object.add_rect(Rect::new(area, face))?;
    object.add_outline(Outline::new(area, Color::BLACK, 1))?;
    object.add_label(centered_label(area, text, size, text_color))?;
    object.set_touch(area, action);
    Ok(object)
}

/// Back button in the bottom-left corner of the body
fn back_button(body: Area, target: Scene, text: &str) -> Result<Object, SceneError> {
    let area = Area::from_origin(body.x1, body.y2 - 35, 90, 36);
    button(
        area,
        Color::LIGHT_GREY,
        text,
        MEDIUM,
        Color::BLACK,
        TouchAction::SelectScene(target),
    )
}

fn build_selection(
    engine: &mut Engine,
    config: &KioskConfig,
    body: Area,
) -> Result<Vec<(ComputerId, ObjectId), MAX_COMPUTERS>, SceneError> {
    let mut buttons = Vec::new();
    let rows = config.computers.len().div_ceil(GRID_COLUMNS).max(1);
    let cell_w = body.width() as i32 / GRID_COLUMNS as i32;
    let cell_h = body.height() as i32 / rows as i32;

    for (i, computer) in config.computers.iter().enumerate() {
        let col = (i % GRID_COLUMNS) as i32;
        let row = (i / GRID_COLUMNS) as i32;
        let cell = Area::from_origin(body.x1 + col * cell_w, body.y1 + row * cell_h, cell_w, cell_h)
            .inset(3);

        let mut object = button(
            cell,
            Color::LIGHT_GREY,
            computer.label.as_str(),
            MEDIUM,
            Color::BLACK,
            TouchAction::SelectComputer(computer.id),
        )?;
        // Status swatch along the bottom edge
        let swatch = Area::new(cell.x1 + 4, cell.y2 - 8, cell.x2 - 4, cell.y2 - 4);
        object.add_rect(Rect::new(swatch, ComputerStatus::NoComputer.color()))?;

        let id = engine.register(object, Scene::Selection)?;
        buttons
            .push((computer.id, id))
            .map_err(|_| SceneError::RegistryFull)?;
    }
    Ok(buttons)
}

fn build_entry(
    engine: &mut Engine,
    config: &KioskConfig,
    body: Area,
) -> Result<(ObjectId, ObjectId), SceneError> {
    let split = body.x1 + body.width() as i32 / 2;

    // Computer name, status swatch and status text
    let mut header = Object::new(PANEL);
    header.add_rect(Rect::new(
        Area::from_origin(body.x1, body.y1 + 30, 16, 16),
        ComputerStatus::NoComputer.color(),
    ))?;
    header.add_label(Label::new(
        Point::new(body.x1, body.y1),
        TextStyle::new(LARGE, Color::BLACK),
        TextBuffer::new(crate::config::MAX_LABEL_LEN),
    ))?;
    header.add_label(Label::new(
        Point::new(body.x1 + 22, body.y1 + 32),
        TextStyle::new(SMALL, Color::BLACK),
        TextBuffer::default(),
    ))?;
    let entry_header = engine.register(header, Scene::Entry)?;

    // Masked PIN field
    let field_area = Area::new(body.x1, body.y1 + 56, split - MARGIN, body.y1 + 90);
    let mut field = Object::new(PANEL);
    field.add_rect(Rect::new(field_area, Color::WHITE))?;
    field.add_outline(Outline::new(field_area, Color::BLACK, 2))?;
    field.add_label(Label::new(
        Point::new(field_area.x1 + 8, field_area.y1 + 8),
        TextStyle::new(LARGE, Color::BLACK),
        TextBuffer::masked(config.pin_len()),
    ))?;
    let pin_field = engine.register(field, Scene::Entry)?;

    // 3x4 keypad
    const KEYS: [(&str, TouchAction); 12] = [
        ("1", TouchAction::AppendDigit('1')),
        ("2", TouchAction::AppendDigit('2')),
        ("3", TouchAction::AppendDigit('3')),
        ("4", TouchAction::AppendDigit('4')),
        ("5", TouchAction::AppendDigit('5')),
        ("6", TouchAction::AppendDigit('6')),
        ("7", TouchAction::AppendDigit('7')),
        ("8", TouchAction::AppendDigit('8')),
        ("9", TouchAction::AppendDigit('9')),
        ("DEL", TouchAction::Backspace),
        ("0", TouchAction::AppendDigit('0')),
        ("OK", TouchAction::Submit),
    ];
    let key_w = (body.x2 - split) / 3;
    let key_h = body.height() as i32 / 4;
    for (i, (text, action)) in KEYS.iter().enumerate() {
        let col = (i % 3) as i32;
        let row = (i / 3) as i32;
        let area = Area::from_origin(split + col * key_w, body.y1 + row * key_h, key_w, key_h)
            .inset(2);
        let face = match action {
            TouchAction::Submit => Color::GREEN,
            TouchAction::Backspace => Color::YELLOW,
            _ => Color::LIGHT_GREY,
        };
        engine.register(
            button(area, face, text, LARGE, Color::BLACK, *action)?,
            Scene::Entry,
        )?;
    }

    engine.register(back_button(body, Scene::Selection, "Back")?, Scene::Entry)?;

    Ok((entry_header, pin_field))
}

fn build_results(engine: &mut Engine, body: Area) -> Result<(), SceneError> {
    let panel_area = Area::new(body.x1, body.y1, body.x2, body.y2 - 44);

    let mut granted = Object::new(PANEL);
    granted.add_rect(Rect::new(panel_area, Color::GREEN))?;
    granted.add_label(centered_label(
        panel_area,
        "Access granted",
        LARGE,
        Color::WHITE,
    ))?;
    granted.add_label(centered_label(
        Area::new(panel_area.x1, panel_area.y1 + 40, panel_area.x2, panel_area.y2),
        "Take your computer",
        MEDIUM,
        Color::WHITE,
    ))?;
    engine.register(granted, Scene::Granted)?;
    engine.register(back_button(body, Scene::Selection, "Done")?, Scene::Granted)?;

    let mut denied = Object::new(PANEL);
    denied.add_rect(Rect::new(panel_area, Color::RED))?;
    denied.add_label(centered_label(panel_area, "Wrong PIN", LARGE, Color::WHITE))?;
    engine.register(denied, Scene::Denied)?;
    engine.register(back_button(body, Scene::Selection, "Back")?, Scene::Denied)?;

    let retry = Area::from_origin(body.x2 - 89, body.y2 - 35, 90, 36);
    engine.register(
        button(
            retry,
            Color::LIGHT_GREY,
            "Retry",
            MEDIUM,
            Color::BLACK,
            TouchAction::SelectScene(Scene::Entry),
        )?,
        Scene::Denied,
    )?;
    Ok(())
}

fn build_help(engine: &mut Engine, body: Area) -> Result<(), SceneError> {
    const STEPS: [&str; 4] = [
        "1. Tap your computer",
        "2. Enter your PIN",
        "3. Press OK",
        "4. Open the locker",
    ];
    const LEGEND: [ComputerStatus; 4] = [
        ComputerStatus::Available,
        ComputerStatus::Unavailable,
        ComputerStatus::NoSensor,
        ComputerStatus::NoComputer,
    ];

    let line_h = MEDIUM as i32 + 8;

    let mut steps = Object::new(PANEL);
    for (i, text) in STEPS.iter().enumerate() {
        steps.add_label(Label::new(
            Point::new(body.x1, body.y1 + i as i32 * line_h),
            TextStyle::new(MEDIUM, Color::BLACK),
            TextBuffer::with_text(text),
        ))?;
    }
    engine.register(steps, Scene::Help)?;

    let legend_x = body.x1 + body.width() as i32 / 2 + MARGIN;
    let mut legend = Object::new(PANEL);
    for (i, status) in LEGEND.iter().enumerate() {
        let y = body.y1 + i as i32 * line_h;
        legend.add_rect(Rect::new(Area::from_origin(legend_x, y, 12, 12), status.color()))?;
        legend.add_label(Label::new(
            Point::new(legend_x + 18, y),
            TextStyle::new(SMALL, Color::BLACK),
            TextBuffer::with_text(status.as_str()),
        ))?;
    }
    engine.register(legend, Scene::Help)?;

    engine.register(back_button(body, Scene::Selection, "Back")?, Scene::Help)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComputerConfig;
    use crate::scene::MAX_OBJECTS;
    use crate::traits::canvas::mock::RecordingCanvas;

    fn config(computers: u8) -> KioskConfig {
        let mut config = KioskConfig::default();
        for id in 1..=computers {
            let mut computer = ComputerConfig::new(ComputerId(id));
            computer.label = heapless::String::try_from("PC").unwrap();
            config.computers.push(computer).unwrap();
        }
        config
    }

    fn center(area: Area) -> Point {
        Point::new((area.x1 + area.x2) / 2, (area.y1 + area.y2) / 2)
    }

    #[test]
    fn test_full_layout_fits_registry() {
        let mut engine = Engine::new(Scene::Selection);
        let layout = Layout::build(&mut engine, &config(MAX_COMPUTERS as u8)).unwrap();
        assert_eq!(layout.buttons.len(), MAX_COMPUTERS);
        assert!(engine.len() <= MAX_OBJECTS);
    }

    #[test]
    fn test_computer_buttons_dispatch_selection() {
        let mut engine = Engine::new(Scene::Selection);
        let layout = Layout::build(&mut engine, &config(3)).unwrap();

        for (computer, id) in layout.buttons.iter() {
            let area = engine.object(*id).unwrap().touch_area().unwrap();
            assert_eq!(
                engine.dispatch(center(area)),
                Some((*id, TouchAction::SelectComputer(*computer)))
            );
        }
    }

    #[test]
    fn test_tabs_reachable_from_every_scene() {
        let mut engine = Engine::new(Scene::Selection);
        let layout = Layout::build(&mut engine, &config(1)).unwrap();
        let help_tab = center(layout.tab_area(Scene::Help));

        for scene in [Scene::Selection, Scene::Entry, Scene::Granted, Scene::Denied] {
            engine.set_scene(scene);
            let (_, action) = engine.dispatch(help_tab).unwrap();
            assert_eq!(action, TouchAction::SelectScene(Scene::Help));
        }
    }

    #[test]
    fn test_keypad_in_entry_scene() {
        let mut engine = Engine::new(Scene::Entry);
        Layout::build(&mut engine, &config(1)).unwrap();

        let mut actions = std::vec::Vec::new();
        for id in engine.draw_order() {
            let object = engine.object(id).unwrap();
            let entry_action = matches!(
                object.action(),
                TouchAction::AppendDigit(_) | TouchAction::Backspace | TouchAction::Submit
            );
            if object.scene().matches(Scene::Entry) && entry_action {
                actions.push(object.action());
            }
        }
        assert_eq!(actions.len(), 12);
        assert!(actions.contains(&TouchAction::Submit));
        assert!(actions.contains(&TouchAction::Backspace));
        assert!(actions.contains(&TouchAction::AppendDigit('0')));
    }

    #[test]
    fn test_every_scene_draws() {
        let mut engine = Engine::new(Scene::Selection);
        Layout::build(&mut engine, &config(2)).unwrap();

        for scene in [
            Scene::Selection,
            Scene::Entry,
            Scene::Granted,
            Scene::Denied,
            Scene::Help,
        ] {
            engine.set_scene(scene);
            let mut canvas = RecordingCanvas::default();
            engine.draw(&mut canvas).unwrap();
            assert!(canvas.texts().contains(&"Help"));
        }
    }
}
