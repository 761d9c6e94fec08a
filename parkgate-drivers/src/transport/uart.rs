//! Blocking UART transport to the host

use parkgate_core::traits::{Transport, TransportError};
use parkgate_hal::{UartError, UartTx};

/// Sends whole frames and acknowledgements over a UART transmitter
///
/// The transmitter enforces the bounded timeout; this type only maps its
/// errors onto the transport contract.
pub struct UartTransport<U> {
    uart: U,
}

impl<U: UartTx> UartTransport<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: UartTx> Transport for UartTransport<U> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.uart.write_blocking(bytes).map_err(map_error)?;
        self.uart.flush().map_err(map_error)
    }
}

/// Map a UART fault onto the transport error set
pub fn map_error(e: UartError) -> TransportError {
    match e {
        UartError::Timeout => TransportError::Timeout,
        _ => TransportError::Io,
    }
}
