//! Cooperative single-context composition of the link and control sides
//!
//! [`Gate`] wires a [`LinkReceiver`], a [`Mailbox`] and a [`ControlLoop`]
//! together for targets (and tests) that feed bytes and poll from one loop.
//! The split is kept: `on_byte` only decodes, acks and posts; dispatch
//! happens in `poll`.

use parkgate_protocol::{Ack, ChecksumScope, Command};

use super::control_loop::{ControlLoop, TickReport};
use super::mailbox::Mailbox;
use crate::config::GateConfig;
use crate::dispatch::{DispatchError, Effect};
use crate::link::{LinkReceiver, Reception};
use crate::traits::{Actuator, Display, PresenceSensor, Transport, TransportError};

/// Outcome of feeding one byte that finished a frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ByteOutcome {
    pub reception: Reception,
    /// Result of sending the acknowledgement
    pub ack_sent: Result<(), TransportError>,
    /// A pending command was replaced before it ran
    pub replaced: bool,
}

/// Outcome of one [`Gate::poll`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// Command taken from the mailbox and its result
    pub dispatched: Option<(Command, Result<Effect, DispatchError>)>,
    pub tick: TickReport,
}

pub struct Gate<T, D, A, S> {
    link: LinkReceiver,
    mailbox: Mailbox<Command>,
    control: ControlLoop<T, D, A, S>,
}

impl<T, D, A, S> Gate<T, D, A, S>
where
    T: Transport,
    D: Display,
    A: Actuator,
    S: PresenceSensor,
{
    pub fn new(
        transport: T,
        display: D,
        actuator: A,
        sensor: S,
        config: &GateConfig,
        now_ms: u32,
    ) -> Self {
        let scope: ChecksumScope = config.checksum_scope();
        Self {
            link: LinkReceiver::new(scope),
            mailbox: Mailbox::new(),
            control: ControlLoop::new(transport, display, actuator, sensor, config, now_ms),
        }
    }

    /// Byte-arrival path: decode, acknowledge, post
    pub fn on_byte(&mut self, byte: u8) -> Option<ByteOutcome> {
        let reception = self.link.on_byte(byte)?;
        let ack: Ack = reception.ack();
        let ack_sent = self.control.transport_mut().send(ack.as_bytes());
        let replaced = match reception.command() {
            Some(command) => self.mailbox.post(command.clone()),
            None => false,
        };

        Some(ByteOutcome {
            reception,
            ack_sent,
            replaced,
        })
    }

    /// Control path: run the pending command, then tick
    pub fn poll(&mut self, now_ms: u32) -> PollOutcome {
        let dispatched = self.mailbox.take().map(|command| {
            let result = self.control.handle(&command);
            (command, result)
        });

        PollOutcome {
            dispatched,
            tick: self.control.tick(now_ms),
        }
    }

    pub fn control(&self) -> &ControlLoop<T, D, A, S> {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlLoop<T, D, A, S> {
        &mut self.control
    }

    pub fn dropped_commands(&self) -> u32 {
        self.mailbox.overwrites()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSensor, RecordingActuator, RecordingDisplay, RecordingTransport};

    type TestGate = Gate<RecordingTransport, RecordingDisplay, RecordingActuator, FakeSensor>;

    fn gate() -> TestGate {
        Gate::new(
            RecordingTransport::default(),
            RecordingDisplay::default(),
            RecordingActuator::default(),
            FakeSensor::default(),
            &GateConfig::default(),
            0,
        )
    }

    fn feed(gate: &mut TestGate, bytes: &[u8]) -> Vec<ByteOutcome> {
        bytes.iter().filter_map(|&b| gate.on_byte(b)).collect()
    }

    fn sent(gate: &mut TestGate) -> Vec<Vec<u8>> {
        gate.control_mut().transport_mut().take_sent()
    }

    #[test]
    fn test_plate_status_end_to_end() {
        let mut g = gate();
        let outcomes = feed(&mut g, &[0xAA, 0x02, 0x04, 0x01, 0x85]);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].ack_sent, Ok(()));
        assert_eq!(sent(&mut g), vec![b"OK\n".to_vec()]);

        // Nothing runs in the byte context
        assert_eq!(g.control().actuator().duties, vec![50]);

        let outcome = g.poll(10);
        assert_eq!(
            outcome.dispatched,
            Some((
                Command::PlateStatus(true),
                Ok(Effect::ActuatorMoved {
                    angle: crate::actuator::ActuatorAngle::new(90),
                    duty: 100
                })
            ))
        );
        assert_eq!(g.control().actuator().last(), Some(100));
    }

    #[test]
    fn test_corrupt_frame_end_to_end() {
        let mut g = gate();
        feed(&mut g, &[0xAA, 0x02, 0x04, 0x01, 0x86]);
        assert_eq!(sent(&mut g), vec![b"ERR\n".to_vec()]);
        assert_eq!(g.poll(10).dispatched, None);
        assert_eq!(g.control().actuator().duties, vec![50]);
    }

    #[test]
    fn test_malformed_length_naks() {
        let mut g = gate();
        feed(&mut g, &[0xAA, 0x00]);
        assert_eq!(sent(&mut g), vec![b"ERR\n".to_vec()]);
    }

    #[test]
    fn test_periodic_report_end_to_end() {
        let mut g = gate();
        for t in (0..=1000).step_by(25) {
            g.poll(t);
        }
        assert!(sent(&mut g).is_empty());
        g.poll(1001);
        assert_eq!(sent(&mut g), vec![vec![0xAA, 0x02, 0x03, 0x00, 0xE9]]);
    }

    #[test]
    fn test_latest_command_wins() {
        let mut g = gate();
        let first = Command::SetActuator(10).to_frame().unwrap();
        let second = Command::SetActuator(170).to_frame().unwrap();
        feed(&mut g, &first.encode_to_vec(ChecksumScope::default()).unwrap());
        let outcomes = feed(&mut g, &second.encode_to_vec(ChecksumScope::default()).unwrap());
        assert!(outcomes[0].replaced);
        assert_eq!(g.dropped_commands(), 1);

        g.poll(1);
        // 170 * 100 / 180 = 94
        assert_eq!(g.control().actuator().duties, vec![50, 144]);
    }

    #[test]
    fn test_wrong_direction_acked_but_not_executed() {
        let mut g = gate();
        let frame = Command::SensorState(true).to_frame().unwrap();
        feed(&mut g, &frame.encode_to_vec(ChecksumScope::default()).unwrap());
        assert_eq!(sent(&mut g), vec![b"OK\n".to_vec()]);

        let outcome = g.poll(1);
        assert_eq!(
            outcome.dispatched,
            Some((
                Command::SensorState(true),
                Err(DispatchError::WrongDirection(
                    parkgate_protocol::CommandId::SensorState
                ))
            ))
        );
    }

    #[test]
    fn test_display_then_lot_full() {
        let mut g = gate();
        let frame = Command::display("Welcome").to_frame().unwrap();
        feed(&mut g, &frame.encode_to_vec(ChecksumScope::default()).unwrap());
        g.poll(1);
        assert_eq!(g.control().display().last(), Some("Welcome"));

        let frame = Command::LotFull(true).to_frame().unwrap();
        feed(&mut g, &frame.encode_to_vec(ChecksumScope::default()).unwrap());
        g.poll(2);
        assert_eq!(g.control().display().last(), Some("Lot Full"));
    }

    #[test]
    fn test_ack_failure_is_reported() {
        let mut g = gate();
        g.control_mut()
            .transport_mut()
            .failures
            .push_back(TransportError::Io);
        let outcomes = feed(&mut g, &[0xAA, 0x02, 0x04, 0x01, 0x85]);
        assert_eq!(outcomes[0].ack_sent, Err(TransportError::Io));
        // Command still reaches the control side
        assert!(g.poll(1).dispatched.is_some());
    }
}
