//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes a single keyboard HID endpoint.

use defmt::info;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

use hid_typist::config;
use hid_typist::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;
use hid_typist::indicator::MountState;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type KeyboardWriter = HidWriter<'static, UsbDriver, 8>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_STATE_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();
static LED_REQUEST_HANDLER: StaticCell<LedRequestHandler> = StaticCell::new();

static MOUNT_SIGNAL: Signal<CriticalSectionRawMutex, MountState> = Signal::new();
static LED_REPORT_SIGNAL: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Mount-state changes derived from bus callbacks (configured, suspend,
/// resume, detach).  Consumed by the status LED task.
pub fn mount_signal() -> &'static Signal<CriticalSectionRawMutex, MountState> {
    &MOUNT_SIGNAL
}

/// Keyboard LED byte from the host's most recent output report.
pub fn led_report_signal() -> &'static Signal<CriticalSectionRawMutex, u8> {
    &LED_REPORT_SIGNAL
}

/// Translates `embassy-usb` bus events into [`MountState`] signals.
struct UsbStateHandler {
    configured: bool,
}

impl embassy_usb::Handler for UsbStateHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.configured = false;
            MOUNT_SIGNAL.signal(MountState::NotMounted);
        }
    }

    fn configured(&mut self, configured: bool) {
        self.configured = configured;
        MOUNT_SIGNAL.signal(if configured {
            MountState::Mounted
        } else {
            MountState::NotMounted
        });
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            MOUNT_SIGNAL.signal(MountState::Suspended);
        } else {
            MOUNT_SIGNAL.signal(if self.configured {
                MountState::Mounted
            } else {
                MountState::NotMounted
            });
        }
    }
}

/// Captures the keyboard LED output report the host writes over the
/// control pipe.  Only the first byte (the LED bitfield) matters.
struct LedRequestHandler;

impl RequestHandler for LedRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if let ReportId::Out(_) = id {
            if let Some(&leds) = data.first() {
                LED_REPORT_SIGNAL.signal(leds);
            }
        }
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Build result containing the USB device runner and the keyboard writer.
pub struct UsbKeyboard {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: KeyboardWriter,
}

/// Initialise the USB stack and create the HID keyboard device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbKeyboard {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let state_handler = USB_STATE_HANDLER.init(UsbStateHandler { configured: false });
    builder.handler(state_handler);

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: Some(LED_REQUEST_HANDLER.init(LedRequestHandler)),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    UsbKeyboard {
        device,
        keyboard_writer,
    }
}
