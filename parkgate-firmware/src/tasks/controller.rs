//! Control task
//!
//! Owns the display, servo and presence sensor. Runs pending host commands
//! as soon as they are posted and otherwise ticks the debouncer and the
//! periodic reporter every few milliseconds.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::TIM4;
use embassy_time::{Instant, Timer};

use parkgate_core::control::{ControlLoop, TickReport};
use parkgate_drivers::{GpioPresenceSensor, ServoActuator, Ssd1306Display};
use parkgate_hal_stm32::{Stm32InputPin, Stm32PwmChannel};
use parkgate_protocol::Command;

use crate::channels::{dropped_commands, SharedTransport, PENDING_COMMAND};

/// Sensor poll period
const POLL_INTERVAL_MS: u64 = 5;

pub type StatusDisplay = Ssd1306Display<I2c<'static, Blocking>>;
pub type BarrierServo = ServoActuator<Stm32PwmChannel<'static, TIM4>>;
pub type VehicleSensor = GpioPresenceSensor<Stm32InputPin<'static>>;
pub type GateControl = ControlLoop<SharedTransport, StatusDisplay, BarrierServo, VehicleSensor>;

/// Wrapping millisecond clock used by the debouncer and reporter
pub fn now_ms() -> u32 {
    // Truncation is the intended 32-bit wrap
    Instant::now().as_millis() as u32
}

/// Controller task - command execution and sensor polling
#[embassy_executor::task]
pub async fn controller_task(mut control: GateControl) {
    info!("Controller task started");
    let mut dropped_seen = 0u32;

    loop {
        if let Either::First(command) =
            select(PENDING_COMMAND.wait(), Timer::after_millis(POLL_INTERVAL_MS)).await
        {
            run_command(&mut control, &command);

            let dropped = dropped_commands();
            if dropped != dropped_seen {
                warn!(
                    "{} host command(s) replaced before running, {} total",
                    dropped.wrapping_sub(dropped_seen),
                    dropped
                );
                dropped_seen = dropped;
            }
        }

        let report = control.tick(now_ms());
        log_tick(&report, control.vehicle_present());
    }
}

fn run_command(control: &mut GateControl, command: &Command) {
    match control.handle(command) {
        Ok(effect) => debug!("{:?} -> {:?}", command, effect),
        Err(e) => warn!("{:?} not executed: {:?}", command, e),
    }
}

fn log_tick(report: &TickReport, present: bool) {
    if let Some(edge) = report.edge {
        info!("Vehicle {} at {} ms", if edge.stable { "arrived" } else { "left" }, edge.at_ms);
    }
    if report.periodic {
        trace!("Periodic report: present={}", present);
    }
    if let Some(e) = report.send_error {
        warn!("State report not sent: {:?}", e);
    }
}
