//! Build script for locker-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates kiosk.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs wired to the panel and touch SPI buses
const BUS_PINS: [u8; 6] = [10, 11, 12, 16, 18, 19];

/// Size of the RAM back buffer in front of the panel
const FRAME_SIZE: (i64, i64) = (320, 240);

const MAX_COMPUTERS: usize = 12;
const MAX_PIN_LEN: usize = 12;
const DEFAULT_PIN_LEN: usize = 6;
const STATUSES: [&str; 5] = ["available", "unavailable", "no_sensor", "no_computer", "none"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate kiosk.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=kiosk.toml");

    let config_path = Path::new("kiosk.toml");
    if !config_path.exists() {
        fail(
            "kiosk.toml not found",
            &["The firmware embeds kiosk.toml from the crate directory".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read kiosk.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "TOML syntax error in kiosk.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_display(&config, &mut errors);
    validate_pins(&config, &mut errors);
    let pin_len = validate_entry(&config, &mut errors);
    validate_computers(&config, pin_len, &mut errors);

    if !errors.is_empty() {
        fail("Invalid kiosk configuration", &errors);
    }

    println!("cargo:warning=kiosk.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let line = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };
    for (key, expected) in [("width", FRAME_SIZE.0), ("height", FRAME_SIZE.1)] {
        if let Some(value) = display.get(key) {
            match value.as_integer() {
                Some(n) if n == expected => {}
                Some(n) if n > 0 && n <= u16::MAX as i64 => errors.push(format!(
                    "[display] {} {} does not match the {}x{} frame buffer",
                    key, n, FRAME_SIZE.0, FRAME_SIZE.1
                )),
                _ => errors.push(format!("[display] {} must be a positive integer", key)),
            }
        }
    }
}

/// Parse "gpioN" with optional "!" / "^" prefixes
fn gpio_number(value: &str) -> Option<u8> {
    value
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")?
        .parse()
        .ok()
        .filter(|n| *n < 30)
}

/// Every configured GPIO must be valid, unique and off the SPI buses
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    const KEYS: [(&str, &str); 7] = [
        ("display", "dc_pin"),
        ("display", "cs_pin"),
        ("display", "rst_pin"),
        ("display", "backlight_pin"),
        ("touch", "cs_pin"),
        ("touch", "irq_pin"),
        ("lock", "pin"),
    ];

    let mut used: Vec<(u8, String)> = Vec::new();
    for (section, key) in KEYS {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        let name = format!("[{}] {}", section, key);
        let Some(text) = value.as_str() else {
            errors.push(format!("{} must be a string", name));
            continue;
        };
        if text == "none" {
            continue;
        }
        let Some(gpio) = gpio_number(text) else {
            errors.push(format!("{} '{}' is not a valid gpio", name, text));
            continue;
        };
        if BUS_PINS.contains(&gpio) {
            errors.push(format!("{} gpio{} is wired to an SPI bus", name, gpio));
        }
        if let Some((_, other)) = used.iter().find(|(n, _)| *n == gpio) {
            errors.push(format!("{} gpio{} already used by {}", name, gpio, other));
        }
        used.push((gpio, name));
    }
}

/// `[entry] pin_len` bounds every configured PIN
fn validate_entry(config: &toml::Value, errors: &mut Vec<String>) -> usize {
    let Some(value) = config.get("entry").and_then(|e| e.get("pin_len")) else {
        return DEFAULT_PIN_LEN;
    };
    match value.as_integer() {
        Some(n) if n >= 1 && n <= MAX_PIN_LEN as i64 => n as usize,
        _ => {
            errors.push(format!("[entry] pin_len must be 1-{}", MAX_PIN_LEN));
            MAX_PIN_LEN
        }
    }
}

fn validate_computers(config: &toml::Value, pin_len: usize, errors: &mut Vec<String>) {
    let computers = match config.get("computer") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[computer] must be a table of [computer.N]".to_string());
            return;
        }
        None => {
            println!("cargo:warning=kiosk.toml defines no computers");
            return;
        }
    };

    if computers.len() > MAX_COMPUTERS {
        errors.push(format!("at most {} computers are supported", MAX_COMPUTERS));
    }

    for (id, computer) in computers {
        if id.parse::<u8>().is_err() {
            errors.push(format!("[computer.{}] id must be 0-255", id));
        }
        let Some(computer) = computer.as_table() else {
            errors.push(format!("[computer.{}] must be a table", id));
            continue;
        };

        if let Some(status) = computer.get("status") {
            if !status.as_str().is_some_and(|s| STATUSES.contains(&s)) {
                errors.push(format!("[computer.{}] unknown status", id));
            }
        }

        match computer.get("pins") {
            Some(toml::Value::Array(pins)) => {
                for pin in pins {
                    let ok = pin.as_str().is_some_and(|p| {
                        !p.is_empty()
                            && p.len() <= pin_len
                            && p.bytes().all(|b| b.is_ascii_digit())
                    });
                    if !ok {
                        errors.push(format!(
                            "[computer.{}] PINs must be 1-{} digits (entry.pin_len)",
                            id, pin_len
                        ));
                    }
                }
            }
            Some(_) => errors.push(format!("[computer.{}] pins must be an array", id)),
            None => {}
        }
    }
}
