//! sofle-status firmware - keyboard status OLED on nRF52840.
//!
//! Task layout:
//!
//! ```text
//!  battery_task ──┐
//!  usb_link_task ─┼─► STATUS_EVENTS ─► display_task ─► StatusAggregator ─► OLED
//!  key_task (x2) ─┘
//! ```
//!
//! Every producer sends `StatusEvent`s into one bounded channel; the
//! display task owns the widget and applies them one at a time.

#![no_std]
#![no_main]

mod power;
mod ui;
mod usb;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Pin, Pull};
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::UsbDevice;
use sofle_status::board::{BoardKey, BoardState};
use sofle_status::config::{MAX_SURFACES, STATUS_EVENT_QUEUE_DEPTH};
use sofle_status::widget::{GlyphSet, StatusAggregator, StatusEvent, StatusFormatter};
use {defmt_rtt as _, panic_probe as _};

use crate::power::BatteryMonitor;
use crate::ui::display::OledSurface;
use crate::usb::link::UsbDriver;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SAADC => saadc::InterruptHandler;
});

type EventSender = Sender<'static, CriticalSectionRawMutex, StatusEvent, STATUS_EVENT_QUEUE_DEPTH>;
type EventReceiver = Receiver<'static, CriticalSectionRawMutex, StatusEvent, STATUS_EVENT_QUEUE_DEPTH>;

type Oled = OledSurface<Twim<'static, peripherals::TWISPI0>>;
type Widget =
    StatusAggregator<'static, Oled, &'static BoardState, &'static BoardState, MAX_SURFACES>;

/// Notifications for the display task.
static STATUS_EVENTS: Channel<CriticalSectionRawMutex, StatusEvent, STATUS_EVENT_QUEUE_DEPTH> =
    Channel::new();

/// Layer and pairing slot selected with the board keys.
static BOARD: BoardState = BoardState::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("sofle-status starting");

    // Display: the SSD1306 fonts are ASCII-only.
    let formatter = StatusFormatter::default().with_glyphs(GlyphSet::ASCII);
    let mut widget: Widget = StatusAggregator::new(formatter, &BOARD, &BOARD);

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_17, p.P0_20, twim::Config::default());
    match widget.register_with(|| ui::display::init(i2c).map(OledSurface::new)) {
        Ok(id) => info!("OLED registered as {}", id),
        Err(e) => warn!("OLED unavailable: {}", e),
    }
    spawner.must_spawn(display_task(widget, STATUS_EVENTS.receiver()));

    // Battery
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = saadc::Resolution::_12BIT;
    let mut vbat = ChannelConfig::single_ended(p.P0_04);
    vbat.gain = saadc::Gain::GAIN1_6;
    vbat.reference = saadc::Reference::INTERNAL;
    let adc = Saadc::new(p.SAADC, Irqs, adc_config, [vbat]);
    let charger = Input::new(p.P0_03, Pull::Up);
    let monitor = BatteryMonitor::new(adc, charger).await;
    spawner.must_spawn(battery_task(monitor, STATUS_EVENTS.sender()));

    // USB
    let device = usb::link::init(p.USBD);
    spawner.must_spawn(usb_device_task(device));
    spawner.must_spawn(usb_link_task(STATUS_EVENTS.sender()));

    // Board keys
    spawner.must_spawn(key_task(
        p.P0_11.degrade(),
        BoardKey::Layer,
        STATUS_EVENTS.sender(),
    ));
    spawner.must_spawn(key_task(
        p.P0_12.degrade(),
        BoardKey::Profile,
        STATUS_EVENTS.sender(),
    ));

    info!("All tasks spawned");
}

#[embassy_executor::task]
async fn display_task(mut widget: Widget, rx: EventReceiver) -> ! {
    info!("Display task started");
    loop {
        let event = rx.receive().await;
        let applied = widget.apply(event);
        debug!("{} -> {}", event.kind(), applied);
    }
}

#[embassy_executor::task]
async fn battery_task(monitor: BatteryMonitor, tx: EventSender) -> ! {
    power::battery_task(monitor, tx).await
}

#[embassy_executor::task]
async fn usb_device_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::link::run_usb_device(device).await
}

#[embassy_executor::task]
async fn usb_link_task(tx: EventSender) -> ! {
    usb::link::link_state_task(tx).await
}

#[embassy_executor::task(pool_size = 2)]
async fn key_task(pin: AnyPin, key: BoardKey, tx: EventSender) -> ! {
    ui::buttons::key_task(pin, key, &BOARD, tx).await
}
