//! Embedded entry point - nRF52840 scripted HID keyboard.
//!
//! Three Embassy tasks:
//!   - the USB device runner (enumeration, endpoint servicing),
//!   - the typist task driving the session controller's step machine,
//!   - the status LED task blinking the mount state.
//!
//! The session controller's delays become `Timer` awaits here, so the
//! USB stack and the LED keep running while the typist paces itself.
//! That is a deliberate departure from a blocking poll loop.

#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_time::{Instant, Timer};
use panic_probe as _;

use hid_typist::config;
use hid_typist::hid::keyboard::KEYBOARD_REPORT_SIZE;
use hid_typist::indicator::Indicator;
use hid_typist::script;
use hid_typist::session::{SessionController, SessionStep};

mod usb;

use usb::hid_device::{self, KeyboardWriter, UsbDriver};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("hid-typist starting");

    let usb = hid_device::init(p.USBD);

    spawner.must_spawn(usb_task(usb.device));
    spawner.must_spawn(typist_task(usb.keyboard_writer));
    spawner.must_spawn(status_led_task(Output::new(
        p.P0_06,
        Level::Low,
        OutputDrive::Standard,
    )));
}

/// Run the USB device stack - handles enumeration, suspend/resume, and
/// endpoint servicing.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Drive the keystroke session: one report or delay per step, gating
/// every report on endpoint readiness.  The session runs exactly once;
/// after `Done` the task parks itself until the next power cycle.
#[embassy_executor::task]
async fn typist_task(mut writer: KeyboardWriter) {
    let mut session = SessionController::new(script::SCRIPT_LINES);
    let mut buf = [0u8; KEYBOARD_REPORT_SIZE];

    info!("typist task started ({} script lines)", script::SCRIPT_LINES.len());

    loop {
        match session.step() {
            SessionStep::Report(report) => {
                writer.ready().await;
                let n = report.serialize(&mut buf);
                if writer.write(&buf[..n]).await.is_err() {
                    warn!("USB keyboard write failed");
                }
                session.report_complete();
            }
            SessionStep::Delay(ms) => Timer::after_millis(ms).await,
            SessionStep::Idle => {
                info!("script complete, session latched");
                return;
            }
        }
    }
}

/// Blink the board LED at the interval matching the USB mount state,
/// or hold it solid while the host asserts Caps Lock.
#[embassy_executor::task]
async fn status_led_task(mut led: Output<'static>) {
    let mut indicator = Indicator::new();

    loop {
        Timer::after_millis(config::LED_TICK_MS).await;

        if let Some(mount) = hid_device::mount_signal().try_take() {
            indicator.set_mount_state(mount);
        }
        if let Some(leds) = hid_device::led_report_signal().try_take() {
            if let Some(on) = indicator.on_led_report(leds) {
                drive_led(&mut led, on);
            }
        }
        if let Some(on) = indicator.tick(Instant::now().as_millis()) {
            drive_led(&mut led, on);
        }
    }
}

fn drive_led(led: &mut Output<'static>, on: bool) {
    if on {
        led.set_high();
    } else {
        led.set_low();
    }
}
