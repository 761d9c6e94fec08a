//! Command dispatch
//!
//! Maps a decoded host command onto the display and actuator. The
//! dispatcher only ever sees frames that already passed the checksum, so it
//! raises no integrity errors.

use parkgate_protocol::{Command, CommandId, Direction};

use crate::actuator::ActuatorAngle;
use crate::config::{GateConfig, StatusText};
use crate::traits::{Actuator, Display};

/// What a dispatched command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Display text replaced
    Displayed,
    /// Actuator driven to a new position
    ActuatorMoved { angle: ActuatorAngle, duty: u16 },
}

/// Dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Command only travels device → host and was not executed
    WrongDirection(CommandId),
}

/// Executes host commands against the collaborators
#[derive(Debug, Clone)]
pub struct Dispatcher {
    open_angle: ActuatorAngle,
    closed_angle: ActuatorAngle,
    lot_full_text: StatusText,
    spaces_text: StatusText,
}

impl Dispatcher {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            open_angle: config.gate.open_angle,
            closed_angle: config.gate.closed_angle,
            lot_full_text: config.display.lot_full.clone(),
            spaces_text: config.display.spaces.clone(),
        }
    }

    /// Run one command
    pub fn dispatch<D, A>(
        &self,
        command: &Command,
        display: &mut D,
        actuator: &mut A,
    ) -> Result<Effect, DispatchError>
    where
        D: Display + ?Sized,
        A: Actuator + ?Sized,
    {
        let id = command.id();
        if id.direction() != Direction::HostToDevice {
            return Err(DispatchError::WrongDirection(id));
        }

        match command {
            Command::Display(text) => {
                display.show(text);
                Ok(Effect::Displayed)
            }
            Command::SetActuator(degrees) => Ok(move_to(ActuatorAngle::new(*degrees), actuator)),
            Command::PlateStatus(open) => {
                let angle = if *open {
                    self.open_angle
                } else {
                    self.closed_angle
                };
                Ok(move_to(angle, actuator))
            }
            Command::LotFull(full) => {
                display.show(if *full {
                    &self.lot_full_text
                } else {
                    &self.spaces_text
                });
                Ok(Effect::Displayed)
            }
            Command::SensorState(_) => Err(DispatchError::WrongDirection(id)),
        }
    }
}

/// Drive the actuator to `angle`
pub fn move_to<A: Actuator + ?Sized>(angle: ActuatorAngle, actuator: &mut A) -> Effect {
    let duty = angle.duty();
    actuator.set_angle_duty(duty);
    Effect::ActuatorMoved { angle, duty }
}
