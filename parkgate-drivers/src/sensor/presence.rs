//! GPIO vehicle presence sensor
//!
//! Reads an inductive loop or IR beam module with a digital output. The
//! output can be active-high (default) or active-low.

use parkgate_core::traits::PresenceSensor;
use parkgate_hal::InputPin;

/// Presence sensor on a GPIO input
pub struct GpioPresenceSensor<P> {
    pin: P,
    /// If true, vehicle present = pin LOW
    inverted: bool,
}

impl<P: InputPin> GpioPresenceSensor<P> {
    /// Create a new presence sensor
    ///
    /// # Arguments
    /// - `pin`: The input pin the sensor output is wired to
    /// - `inverted`: If true, a vehicle is present when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Create a sensor with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a sensor with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: InputPin> PresenceSensor for GpioPresenceSensor<P> {
    fn read(&mut self) -> bool {
        self.pin.is_high() != self.inverted
    }
}
