//! Outbound byte transport to the host

/// Errors from sending bytes to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The bounded transmit timeout expired
    Timeout,
    /// The peripheral reported a fault
    Io,
}

/// Synchronous, bounded-time byte sink
///
/// Implementations must return within their configured transmit timeout.
/// Failed sends are never retried by the caller.
pub trait Transport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).send(bytes)
    }
}
