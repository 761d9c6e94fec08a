//! STM32-specific HAL for the Parkgate controller
//!
//! Implements the `parkgate-hal` traits on top of embassy-stm32 peripheral
//! drivers. Supported chips:
//!
//! - STM32F103C8 ("Blue Pill")
//! - STM32F103RB (Nucleo-F103RB)
//!
//! # Features
//!
//! - `stm32f103c8` / `stm32f103rb` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! Clock, pin and timer setup stays in the firmware; this crate only wraps
//! already-configured peripherals.

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod uart;

pub use gpio::Stm32InputPin;
pub use pwm::Stm32PwmChannel;
pub use uart::Stm32UartTx;
