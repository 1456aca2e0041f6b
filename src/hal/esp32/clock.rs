//! ESP32 clock implementation using the ESP-IDF timer.

use crate::traits::Clock;

/// ESP32 clock using the hardware timer.
///
/// Provides microsecond-resolution timing using the ESP-IDF
/// `esp_timer_get_time()` function, which returns microseconds since boot.
///
/// # Example
///
/// ```ignore
/// use rs_sketchbook::hal::esp32::Esp32Clock;
/// use rs_sketchbook::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let start = clock.now_micros();
/// // ... do work ...
/// let elapsed = clock.now_micros() - start;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_micros(&self) -> u64 {
        // Safe: plain read of the boot-relative hardware timer
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        micros as u64
    }
}
