//! Power monitoring - battery state of charge and charger status.
//!
//! Samples the cell voltage through the SAADC and a 1:2 divider,
//! converts it with the LiPo discharge curve and reads the charger's
//! open-drain STAT pin (low while charging).
//!
//! A `BatteryStateChanged` event is published only when the percentage
//! or the charge flag changes. Plugging or unplugging the charger wakes
//! the task early so the CHG marker appears without waiting a full
//! sample period.

use defmt::info;
use embassy_futures::select::select;
use embassy_nrf::gpio::Input;
use embassy_nrf::saadc::Saadc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use sofle_status::battery_logic;
use sofle_status::config::{
    BATTERY_DIVIDER_RATIO, BATTERY_SAMPLE_INTERVAL_SECS, LIPO_DISCHARGE_CURVE,
    SAADC_FULL_SCALE_MV, SAADC_MAX_COUNT, STATUS_EVENT_QUEUE_DEPTH,
};
use sofle_status::widget::{BatteryState, StatusEvent};

/// Battery sampler owning the ADC and the charger status pin.
pub struct BatteryMonitor {
    saadc: Saadc<'static, 1>,
    charger: Input<'static>,
    last: Option<BatteryState>,
}

impl BatteryMonitor {
    pub async fn new(saadc: Saadc<'static, 1>, charger: Input<'static>) -> Self {
        saadc.calibrate().await;
        Self {
            saadc,
            charger,
            last: None,
        }
    }

    /// Take one reading.
    pub async fn sample(&mut self) -> BatteryState {
        let mut buf = [0i16; 1];
        self.saadc.sample(&mut buf).await;

        let mv = battery_logic::millivolts_from_raw(
            buf[0],
            SAADC_FULL_SCALE_MV,
            SAADC_MAX_COUNT,
            BATTERY_DIVIDER_RATIO,
        );
        let percent = battery_logic::percent_from_millivolts(mv, LIPO_DISCHARGE_CURVE);
        BatteryState::new(percent, self.charger.is_low())
    }

    /// Returns the new state if it differs from the last one reported.
    pub async fn poll_change(&mut self) -> Option<BatteryState> {
        let state = self.sample().await;
        if self.last == Some(state) {
            return None;
        }
        self.last = Some(state);
        Some(state)
    }

    /// Sleep until the next sample period or a charger pin edge.
    pub async fn wait_next(&mut self) {
        select(
            Timer::after(Duration::from_secs(BATTERY_SAMPLE_INTERVAL_SECS)),
            self.charger.wait_for_any_edge(),
        )
        .await;
    }
}

/// Battery task - must be spawned as a dedicated Embassy task.
pub async fn battery_task(
    mut monitor: BatteryMonitor,
    tx: Sender<'static, CriticalSectionRawMutex, StatusEvent, STATUS_EVENT_QUEUE_DEPTH>,
) -> ! {
    info!("Battery monitor started");

    loop {
        if let Some(state) = monitor.poll_change().await {
            info!(
                "Battery: {}% charging={}",
                state.state_of_charge, state.charging
            );
            tx.send(StatusEvent::BatteryStateChanged(Some(state))).await;
        }
        monitor.wait_next().await;
    }
}
