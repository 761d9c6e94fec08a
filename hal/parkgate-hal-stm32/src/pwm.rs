//! Timer PWM channels for STM32

use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::timer::GeneralInstance4Channel;
use parkgate_hal::PwmChannel;

/// One output of an embassy-stm32 `SimplePwm`
///
/// The timer frequency is set when the `SimplePwm` is created (50 Hz for
/// the barrier servo).
pub struct Stm32PwmChannel<'d, T: GeneralInstance4Channel> {
    channel: SimplePwmChannel<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> Stm32PwmChannel<'d, T> {
    pub fn new(channel: SimplePwmChannel<'d, T>) -> Self {
        Self { channel }
    }
}

impl<T: GeneralInstance4Channel> PwmChannel for Stm32PwmChannel<'_, T> {
    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        self.channel.set_duty_cycle(duty);
    }

    fn enable(&mut self) {
        self.channel.enable();
    }

    fn disable(&mut self) {
        self.channel.disable();
    }
}
