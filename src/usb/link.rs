//! USB HID keyboard device and link-state tracking.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral with one boot-keyboard HID interface, and reports the
//! link state (unplugged / powered / HID configured) to the widget.

use defmt::info;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use sofle_status::config;
use sofle_status::widget::{StatusEvent, UsbConnState};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_LINK_HANDLER: StaticCell<UsbLinkHandler> = StaticCell::new();
static USB_LINK_SIGNAL: Signal<CriticalSectionRawMutex, UsbConnState> = Signal::new();

/// Maps USB bus callbacks onto `UsbConnState`.
///
/// A suspended bus drops back to `Powered`; resuming restores `Hid`
/// only if the host had configured the device.
struct UsbLinkHandler {
    configured: bool,
}

impl UsbLinkHandler {
    fn publish(&self, state: UsbConnState) {
        USB_LINK_SIGNAL.signal(state);
    }
}

impl embassy_usb::Handler for UsbLinkHandler {
    fn enabled(&mut self, enabled: bool) {
        self.configured = false;
        self.publish(if enabled {
            UsbConnState::Powered
        } else {
            UsbConnState::Disconnected
        });
    }

    fn reset(&mut self) {
        self.configured = false;
        self.publish(UsbConnState::Powered);
    }

    fn configured(&mut self, configured: bool) {
        self.configured = configured;
        self.publish(if configured {
            UsbConnState::Hid
        } else {
            UsbConnState::Powered
        });
    }

    fn suspended(&mut self, suspended: bool) {
        self.publish(if !suspended && self.configured {
            UsbConnState::Hid
        } else {
            UsbConnState::Powered
        });
    }
}

/// Initialise the USB stack and create the keyboard HID interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbDevice<'static, UsbDriver> {
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

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let handler = USB_LINK_HANDLER.init(UsbLinkHandler { configured: false });
    builder.handler(handler);

    let kb_state = KB_STATE.init(State::new());
    let kb_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    // Key reports come from the keymap firmware; the interface only has
    // to exist for the host to configure us as a HID device.
    let _keyboard: HidWriter<'static, UsbDriver, 8> =
        HidWriter::new(&mut builder, kb_state, kb_config);

    let device = builder.build();

    info!("USB HID keyboard initialised");

    device
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Forward link-state changes to the display task.
pub async fn link_state_task(
    tx: Sender<'static, CriticalSectionRawMutex, StatusEvent, { config::STATUS_EVENT_QUEUE_DEPTH }>,
) -> ! {
    let mut last = None;
    loop {
        let state = USB_LINK_SIGNAL.wait().await;
        if last == Some(state) {
            continue;
        }
        last = Some(state);
        info!("USB link: {}", state);
        tx.send(StatusEvent::UsbConnStateChanged(Some(state))).await;
    }
}
