//! Minimal TOML parser for the kiosk configuration
//!
//! Handles only the subset the kiosk needs and never allocates.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Arrays of strings: `pins = ["1234", "5678"]`
//! - `[section]` and `[computer.N]` headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Escapes inside strings

use heapless::String;

use super::types::{
    ComputerConfig, KioskConfig, PinConfig, GPIO_COUNT, MAX_LABEL_LEN, MAX_PIN_LEN,
};
use crate::state::ComputerId;
use crate::traits::ComputerStatus;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Touch,
    Lock,
    Frame,
    Entry,
    Ui,
    Computer,
}

/// Parse TOML text into a [`KioskConfig`]
///
/// Sections that are absent keep their defaults. Unknown keys are
/// ignored; unknown sections are an error.
pub fn parse_config(input: &str) -> Result<KioskConfig, ParseError> {
    let mut config = KioskConfig::new();
    let mut section = Section::Root;
    let mut current: Option<ComputerConfig> = None;
    // An explicit `active_low` wins over the pin prefix in either key order
    let mut explicit_active_low: Option<bool> = None;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_computer(&mut config, &mut current)?;
            section = parse_section_header(&line[1..line.len() - 1], &mut current)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        if section == Section::Lock && key == "active_low" {
            explicit_active_low = Some(parse_bool(value)?);
        }
        apply_value(section, key, value, &mut config, &mut current)?;
    }

    save_computer(&mut config, &mut current)?;
    if let Some(active_low) = explicit_active_low {
        config.lock.active_low = active_low;
    }
    Ok(config)
}

fn save_computer(
    config: &mut KioskConfig,
    current: &mut Option<ComputerConfig>,
) -> Result<(), ParseError> {
    if let Some(computer) = current.take() {
        config
            .computers
            .push(computer)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

/// Parse a header like "touch" or "computer.3"
fn parse_section_header(
    header: &str,
    current: &mut Option<ComputerConfig>,
) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((kind, id)) = header.split_once('.') {
        if kind.trim() != "computer" {
            return Err(ParseError::InvalidSection);
        }
        let id: u8 = id.trim().parse().map_err(|_| ParseError::InvalidSection)?;
        *current = Some(ComputerConfig::new(ComputerId(id)));
        return Ok(Section::Computer);
    }

    match header {
        "display" => Ok(Section::Display),
        "touch" => Ok(Section::Touch),
        "lock" => Ok(Section::Lock),
        "frame" => Ok(Section::Frame),
        "entry" => Ok(Section::Entry),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer, allowing `_` separators (`40_000_000`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<20> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio14", "!gpio14" or "^gpio15"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value)?;
    let mut pin = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    pin.pin = number.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin.pin as usize >= GPIO_COUNT {
        return Err(ParseError::InvalidPin);
    }
    Ok(pin)
}

/// Optional pins may be disabled with `"none"`
fn parse_optional_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    if parse_string(value)? == "none" {
        Ok(None)
    } else {
        parse_pin(value).map(Some)
    }
}

fn parse_status(value: &str) -> Result<ComputerStatus, ParseError> {
    match parse_string(value)? {
        "available" => Ok(ComputerStatus::Available),
        "unavailable" => Ok(ComputerStatus::Unavailable),
        "no_sensor" => Ok(ComputerStatus::NoSensor),
        "none" | "no_computer" => Ok(ComputerStatus::NoComputer),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_label<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_string(value)?).map_err(|_| ParseError::InvalidValue)
}

/// Parse `["1234", "5678"]` into the computer's PIN list
fn parse_pins(value: &str, computer: &mut ComputerConfig) -> Result<(), ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    computer.pins.clear();
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let pin: String<MAX_PIN_LEN> = parse_label(item)?;
        computer
            .pins
            .push(pin)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut KioskConfig,
    current: &mut Option<ComputerConfig>,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Display => {
            let d = &mut config.display;
            match key {
                "width" => d.width = parse_int(value)?,
                "height" => d.height = parse_int(value)?,
                "spi_hz" => d.spi_hz = parse_int(value)?,
                "dc_pin" => d.dc_pin = parse_pin(value)?,
                "cs_pin" => d.cs_pin = parse_pin(value)?,
                "rst_pin" => d.rst_pin = parse_optional_pin(value)?,
                "backlight_pin" => d.backlight_pin = parse_optional_pin(value)?,
                _ => {}
            }
        }
        Section::Touch => {
            let t = &mut config.touch;
            match key {
                "spread" => t.spread = parse_int(value)?,
                "debounce_polls" => t.debounce_polls = parse_int(value)?,
                "pressure_threshold" => t.pressure_threshold = parse_int(value)?,
                "x_raw_min" => t.x_raw_min = parse_int(value)?,
                "x_raw_max" => t.x_raw_max = parse_int(value)?,
                "y_raw_min" => t.y_raw_min = parse_int(value)?,
                "y_raw_max" => t.y_raw_max = parse_int(value)?,
                "invert_x" => t.invert_x = parse_bool(value)?,
                "invert_y" => t.invert_y = parse_bool(value)?,
                "swap_xy" => t.swap_xy = parse_bool(value)?,
                "cs_pin" => t.cs_pin = parse_pin(value)?,
                "irq_pin" => t.irq_pin = parse_optional_pin(value)?,
                _ => {}
            }
        }
        Section::Lock => {
            let l = &mut config.lock;
            match key {
                "pin" => {
                    l.pin = parse_pin(value)?;
                    // "!gpioN" is shorthand for an active-low relay
                    l.active_low = l.pin.inverted;
                }
                "active_low" => l.active_low = parse_bool(value)?,
                "pulse_ms" => l.pulse_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Frame => match key {
            "poll_interval_ms" => config.frame.poll_interval_ms = parse_int(value)?,
            "present_every" => config.frame.present_every = parse_int(value)?,
            _ => {}
        },
        Section::Entry => {
            if key == "pin_len" {
                config.entry.pin_len = parse_int(value)?;
            }
        }
        Section::Ui => {
            if key == "title" {
                config.ui.title = parse_label(value)?;
            }
        }
        Section::Computer => {
            let c = current.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "label" => c.label = parse_label::<MAX_LABEL_LEN>(value)?,
                "status" => c.status = parse_status(value)?,
                "group" => c.group = parse_int(value)?,
                "pins" => parse_pins(value, c)?,
                _ => {}
            }
        }
    }
    Ok(())
}
