//! Textual acknowledgements sent after every frame the decoder finishes

/// Positive acknowledgement bytes
pub const ACK_OK: &[u8] = b"OK\n";

/// Negative acknowledgement bytes
pub const ACK_ERR: &[u8] = b"ERR\n";

/// Link-level acknowledgement
///
/// An ack reflects frame integrity only. A checksum-correct frame whose
/// command cannot be decoded is still acknowledged with `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    Ok,
    Err,
}

impl Ack {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Ack::Ok => ACK_OK,
            Ack::Err => ACK_ERR,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Ack::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_bytes() {
        assert_eq!(Ack::Ok.as_bytes(), b"OK\n");
        assert_eq!(Ack::Err.as_bytes(), b"ERR\n");
        assert!(Ack::Ok.is_ok());
        assert!(!Ack::Err.is_ok());
    }
}
