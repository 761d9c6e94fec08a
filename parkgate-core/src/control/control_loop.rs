//! Control context: sensor polling, state reports and command execution

use parkgate_protocol::{ChecksumScope, Command, FrameError, MAX_FRAME_SIZE};

use crate::config::GateConfig;
use crate::debounce::{Debouncer, Edge};
use crate::dispatch::{move_to, DispatchError, Dispatcher, Effect};
use crate::report::PeriodicReporter;
use crate::traits::{Actuator, Display, PresenceSensor, Transport, TransportError};

/// What one [`ControlLoop::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Stable state change, reported to the host
    pub edge: Option<Edge>,
    /// A periodic state report was due and attempted
    pub periodic: bool,
    /// First send failure this tick, if any
    pub send_error: Option<TransportError>,
}

/// Owns the collaborators and all control-side state
///
/// Must only be driven from one context. Commands arrive through
/// [`handle`](Self::handle), typically after being taken from a mailbox.
pub struct ControlLoop<T, D, A, S> {
    transport: T,
    display: D,
    actuator: A,
    sensor: S,
    dispatcher: Dispatcher,
    debouncer: Debouncer,
    reporter: PeriodicReporter,
    scope: ChecksumScope,
}

impl<T, D, A, S> ControlLoop<T, D, A, S>
where
    T: Transport,
    D: Display,
    A: Actuator,
    S: PresenceSensor,
{
    /// Bring the gate to its startup state
    ///
    /// Shows the ready text, closes the barrier and takes the initial sensor
    /// sample. The periodic report clock starts at `now_ms`.
    pub fn new(
        transport: T,
        mut display: D,
        mut actuator: A,
        mut sensor: S,
        config: &GateConfig,
        now_ms: u32,
    ) -> Self {
        display.show(&config.display.ready);
        move_to(config.gate.closed_angle, &mut actuator);
        let initial = sensor.read();

        Self {
            transport,
            display,
            actuator,
            sensor,
            dispatcher: Dispatcher::new(config),
            debouncer: Debouncer::new(initial, now_ms, config.sensor.debounce_ms),
            reporter: PeriodicReporter::new(config.sensor.report_interval_ms, now_ms),
            scope: config.checksum_scope(),
        }
    }

    /// Execute one host command
    pub fn handle(&mut self, command: &Command) -> Result<Effect, DispatchError> {
        self.dispatcher
            .dispatch(command, &mut self.display, &mut self.actuator)
    }

    /// Sample the sensor and send any reports that are due
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        let mut report = TickReport::default();
        let raw = self.sensor.read();

        if let Some(edge) = self.debouncer.poll(raw, now_ms) {
            report.edge = Some(edge);
            if let Err(e) = self.send_state(edge.stable) {
                report.send_error.get_or_insert(e);
            }
        }

        if self.reporter.poll(now_ms) {
            report.periodic = true;
            if let Err(e) = self.send_state(self.debouncer.stable()) {
                report.send_error.get_or_insert(e);
            }
        }

        report
    }

    /// Current debounced presence
    pub fn vehicle_present(&self) -> bool {
        self.debouncer.stable()
    }

    /// Transport shared with the acknowledgement path
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    fn send_state(&mut self, present: bool) -> Result<(), TransportError> {
        let frame = encode_sensor_state(present, self.scope).map_err(|_| TransportError::Io)?;
        self.transport.send(&frame)
    }
}

/// Wire bytes of a `SensorState` report
pub fn encode_sensor_state(
    present: bool,
    scope: ChecksumScope,
) -> Result<heapless::Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    Command::SensorState(present).to_frame()?.encode_to_vec(scope)
}
