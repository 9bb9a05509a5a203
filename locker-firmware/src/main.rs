//! Computer Locker - Touchscreen Kiosk Firmware
//!
//! Main firmware binary for an RP2040 driving an ILI9341 panel with an
//! XPT2046 resistive touch controller and a lock relay. Pin assignment,
//! touch calibration and the computer table come from `kiosk.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use locker_core::config::{AccessTable, KioskConfig, PinConfig};
use locker_core::kiosk::Kiosk;
use locker_core::scene::SceneError;
use locker_display::{
    hard_reset, Buffered, Frame, GraphicsCanvas, Ili9341, PanelError, FRAME_HEIGHT, FRAME_WIDTH,
};
use locker_drivers::lock::RelayLock;
use locker_drivers::touch::{Calibration, Xpt2046};
use locker_hal::SpiConfig;
use locker_hal_rp2040::spi::rp_config;
use locker_hal_rp2040::{
    PinBank, PinBankPeripherals, PinError, RemainingPeripherals, RpOutput, RpSpi,
};

use crate::access_log::{DefmtCapture, DefmtLog};
use crate::tasks::{LockerKiosk, Panel, Touch};

mod access_log;
mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit kiosk.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../kiosk.toml");

static CONFIG: StaticCell<KioskConfig> = StaticCell::new();
static ACCESS: StaticCell<AccessTable> = StaticCell::new();
static KIOSK: StaticCell<LockerKiosk> = StaticCell::new();
static FRAME: ConstStaticCell<Frame> = ConstStaticCell::new(Frame::new());

// Control lines that must keep driving after init
static PANEL_RESET: StaticCell<RpOutput<'static>> = StaticCell::new();
static BACKLIGHT: StaticCell<RpOutput<'static>> = StaticCell::new();

/// Fatal setup failures
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum InitError {
    /// A configured GPIO could not be claimed
    Pin(&'static str, PinError),
    /// Panel did not accept its init sequence
    Panel(PanelError<embassy_rp::spi::Error>),
    /// Configured display size differs from the back buffer
    FrameSize(u16, u16),
    /// UI did not fit the scene registry
    Scene(SceneError),
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Locker kiosk starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static KioskConfig = CONFIG.init(config::load_config(EMBEDDED_CONFIG));
    if config.computers.is_empty() {
        warn!("No computers configured, selection screen will be empty");
    }

    let (mut pins, bus) = PinBankPeripherals::from_peripherals(p);
    let mut bank = PinBank::new(&mut pins);

    let (kiosk, touch, panel) = match setup(config, &mut bank, bus) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Kiosk setup failed: {:?}", e);
            defmt::panic!("cannot start kiosk");
        }
    };

    // Too large for the task arena, so it lives in a static
    let kiosk = KIOSK.init(kiosk);
    spawner.spawn(unwrap!(tasks::kiosk_task(kiosk, touch, panel, config.frame)));

    info!("Kiosk running");
}

/// Claim pins, bring up both buses and build the kiosk
fn setup(
    config: &'static KioskConfig,
    bank: &mut PinBank,
    bus: RemainingPeripherals,
) -> Result<(LockerKiosk, Touch, Panel), InitError> {
    let RemainingPeripherals {
        spi0,
        spi1,
        touch_sck,
        touch_mosi,
        touch_miso,
        panel_sck,
        panel_mosi,
        panel_miso,
    } = bus;
    let display = &config.display;
    let mut delay = Delay;

    if (display.width as usize, display.height as usize) != (FRAME_WIDTH, FRAME_HEIGHT) {
        return Err(InitError::FrameSize(display.width, display.height));
    }

    // Panel on SPI0
    let mut panel_spi = SpiConfig::panel();
    panel_spi.frequency = display.spi_hz;
    let spi = RpSpi::new(Spi::new_blocking(
        spi0,
        panel_sck,
        panel_mosi,
        panel_miso,
        rp_config(&panel_spi),
    ));
    let dc = claim(bank, "display.dc_pin", &display.dc_pin, false)?;
    let cs = claim(bank, "display.cs_pin", &display.cs_pin, true)?;

    if let Some(pin) = &display.rst_pin {
        let rst = PANEL_RESET.init(claim(bank, "display.rst_pin", pin, true)?);
        hard_reset(rst, &mut delay);
    }

    let mut lcd = Ili9341::new(spi, dc, cs, display.width, display.height);
    lcd.init(&mut delay).map_err(InitError::Panel)?;

    if let Some(pin) = &display.backlight_pin {
        BACKLIGHT.init(claim(bank, "display.backlight_pin", pin, !pin.inverted)?);
    }
    info!(
        "Panel initialized: {}x{} {:?}",
        display.width,
        display.height,
        lcd.orientation()
    );

    // Touch controller on SPI1
    let spi = RpSpi::new(Spi::new_blocking(
        spi1,
        touch_sck,
        touch_mosi,
        touch_miso,
        rp_config(&SpiConfig::touch()),
    ));
    let touch_cs = claim(bank, "touch.cs_pin", &config.touch.cs_pin, true)?;
    let irq = match &config.touch.irq_pin {
        Some(pin) => Some(
            bank.input(pin)
                .map_err(|e| InitError::Pin("touch.irq_pin", e))?,
        ),
        None => None,
    };
    let touch = Xpt2046::new(
        spi,
        touch_cs,
        irq,
        Calibration::from_config(&config.touch, display),
        config.touch.pressure_threshold,
    );
    info!("Touch controller initialized");

    // Start with the relay at its released level
    let active_low = config.lock.active_low;
    let lock_pin = claim(bank, "lock.pin", &config.lock.pin, active_low)?;
    let lock = RelayLock::new(lock_pin, active_low);
    info!("Lock relay on gpio{}, active_low={}", config.lock.pin.pin, active_low);

    let access: &'static AccessTable = ACCESS.init(AccessTable::from_config(config));
    let kiosk = Kiosk::new(
        config,
        access,
        access,
        lock,
        DefmtLog::default(),
        DefmtCapture::default(),
    )
    .map_err(InitError::Scene)?;

    let panel = GraphicsCanvas::new(Buffered::new(FRAME.take(), lcd));
    Ok((kiosk, touch, panel))
}

/// Take a configured GPIO as an output at the given level
fn claim(
    bank: &mut PinBank,
    name: &'static str,
    pin: &PinConfig,
    initial_high: bool,
) -> Result<RpOutput<'static>, InitError> {
    bank.output(pin, initial_high)
        .map_err(|e| InitError::Pin(name, e))
}
