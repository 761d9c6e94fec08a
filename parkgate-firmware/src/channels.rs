//! Inter-task communication
//!
//! The UART receive task and the control task share two things: the
//! pending-command slot and the UART transmitter.

use core::cell::RefCell;

use embassy_stm32::mode::Async;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

use parkgate_core::traits::{Transport, TransportError};
use parkgate_drivers::UartTransport;
use parkgate_hal_stm32::Stm32UartTx;
use parkgate_protocol::Command;

/// Concrete host transport
pub type HostTransport = UartTransport<Stm32UartTx<'static, Async>>;

/// Latest command from the host, waiting for the control task
///
/// Single slot: a command posted before the previous one was taken
/// replaces it.
pub static PENDING_COMMAND: Signal<CriticalSectionRawMutex, Command> = Signal::new();

/// Commands replaced in [`PENDING_COMMAND`] before they ran
pub static DROPPED_COMMANDS: AtomicU32 = AtomicU32::new(0);

/// UART transmitter, shared by acks (RX task) and reports (control task)
///
/// Sends are short and bounded, so they run inside the critical section.
static HOST_TX: Mutex<CriticalSectionRawMutex, RefCell<Option<HostTransport>>> =
    Mutex::new(RefCell::new(None));

/// Install the transmitter; must run before any task sends
pub fn install_transport(transport: HostTransport) {
    HOST_TX.lock(|cell| {
        cell.replace(Some(transport));
    });
}

/// Post a command for the control task, counting any it replaces
pub fn post_command(command: Command) -> bool {
    let replaced = PENDING_COMMAND.signaled();
    if replaced {
        DROPPED_COMMANDS.fetch_add(1, Ordering::Relaxed);
    }
    PENDING_COMMAND.signal(command);
    replaced
}

/// Total commands replaced before they ran
pub fn dropped_commands() -> u32 {
    DROPPED_COMMANDS.load(Ordering::Relaxed)
}

/// Handle to the shared transmitter
#[derive(Clone, Copy, Default)]
pub struct SharedTransport;

impl Transport for SharedTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        HOST_TX.lock(|cell| match cell.borrow_mut().as_mut() {
            Some(transport) => transport.send(bytes),
            None => Err(TransportError::Io),
        })
    }
}
