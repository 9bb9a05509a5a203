//! Kiosk task
//!
//! Polls the touch controller at the configured interval, feeds the
//! samples through the kiosk, releases the lock when its pulse ends and
//! redraws every `present_every` polls.

use defmt::*;
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_time::{Duration, Instant, Ticker};

use locker_core::config::{AccessTable, FrameConfig};
use locker_core::kiosk::{FramePacer, Kiosk, Outcome};
use locker_core::traits::TouchInput;
use locker_display::{Buffered, GraphicsCanvas, Ili9341};
use locker_drivers::lock::RelayLock;
use locker_drivers::touch::Xpt2046;
use locker_hal_rp2040::{RpInput, RpOutput, RpSpi};

use crate::access_log::{DefmtCapture, DefmtLog};

pub type Touch = Xpt2046<RpSpi<'static, SPI1>, RpOutput<'static>, RpInput<'static>>;
pub type Lcd = Ili9341<RpSpi<'static, SPI0>, RpOutput<'static>, RpOutput<'static>>;
pub type Panel = GraphicsCanvas<Buffered<'static, Lcd>>;
pub type LockerKiosk = Kiosk<
    &'static AccessTable,
    &'static AccessTable,
    RelayLock<RpOutput<'static>>,
    DefmtLog,
    DefmtCapture,
>;

#[embassy_executor::task]
pub async fn kiosk_task(
    kiosk: &'static mut LockerKiosk,
    mut touch: Touch,
    mut panel: Panel,
    frame: FrameConfig,
) {
    info!("Kiosk task started");

    let mut ticker = Ticker::every(Duration::from_millis(frame.poll_interval_ms as u64));
    let mut pacer = FramePacer::new(frame.present_every);
    let start = Instant::now();

    draw(kiosk, &mut panel);

    loop {
        ticker.next().await;

        let sample = match touch.poll() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Touch read failed: {:?}", e);
                None
            }
        };

        match kiosk.poll(sample) {
            Ok(Some(dispatch)) => report(dispatch.outcome),
            Ok(None) => {}
            Err(e) => error!("Touch dispatch failed: {:?}", e),
        }

        if kiosk.tick(start.elapsed().as_millis()) {
            info!("Lock released");
        }

        if pacer.tick() {
            draw(kiosk, &mut panel);
        }
    }
}

fn draw(kiosk: &mut LockerKiosk, panel: &mut Panel) {
    match kiosk.render(panel) {
        Ok(true) => trace!("Frame {} presented", panel.frames()),
        Ok(false) => {}
        Err(e) => warn!("Render failed: {:?}", e),
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Ignored => trace!("Touch ignored"),
        Outcome::SceneChanged { from, to } => debug!("Scene {:?} -> {:?}", from, to),
        Outcome::ComputerSelected(id) => debug!("Computer {} selected", id.0),
        Outcome::DigitAppended | Outcome::DigitRemoved => trace!("PIN edited"),
        // Granted/Denied are reported by the access log
        Outcome::Granted(_) | Outcome::Denied(_) => {}
    }
}
