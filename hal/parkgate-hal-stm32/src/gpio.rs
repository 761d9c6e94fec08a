//! GPIO inputs for STM32

use embassy_stm32::gpio::{Input, Pull as StmPull};
use parkgate_hal::gpio::{InputPin, Pull};

/// Convert the chip-agnostic pull setting
pub fn to_stm_pull(pull: Pull) -> StmPull {
    match pull {
        Pull::None => StmPull::None,
        Pull::Up => StmPull::Up,
        Pull::Down => StmPull::Down,
    }
}

/// Digital input backed by an embassy-stm32 [`Input`]
pub struct Stm32InputPin<'d> {
    input: Input<'d>,
}

impl<'d> Stm32InputPin<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self { input }
    }
}

impl InputPin for Stm32InputPin<'_> {
    fn is_high(&mut self) -> bool {
        self.input.is_high()
    }
}
