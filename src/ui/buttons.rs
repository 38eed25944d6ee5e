//! GPIO key input with async debouncing.
//!
//! Two physical keys (active-low with internal pull-up):
//!   - LAYER   - cycle the active keymap layer
//!   - PROFILE - cycle the Bluetooth pairing slot
//!
//! Each key is handled by an async task that waits for a GPIO edge,
//! debounces it, updates the board state and sends the matching
//! `StatusEvent` to the display task.

use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use sofle_status::board::{BoardKey, BoardState};
use sofle_status::config::{BUTTON_DEBOUNCE_MS, STATUS_EVENT_QUEUE_DEPTH};
use sofle_status::widget::StatusEvent;

/// Run a single key polling loop.
///
/// Waits for the pin to go low (pressed), debounces, sends the event,
/// then waits for release before repeating.
pub async fn key_task(
    pin: AnyPin,
    key: BoardKey,
    board: &'static BoardState,
    tx: Sender<'static, CriticalSectionRawMutex, StatusEvent, STATUS_EVENT_QUEUE_DEPTH>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (key press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("Key: {}", key);
            tx.send(board.press(key)).await;

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
