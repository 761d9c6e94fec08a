//! UART serial communication abstractions

/// Error from a UART transmit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// The peripheral did not accept the data in time
    Timeout,
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Any other bus fault
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Write data to the UART
    ///
    /// Blocks until all data has been written, the configured transmit
    /// timeout expires, or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), UartError>;
}
