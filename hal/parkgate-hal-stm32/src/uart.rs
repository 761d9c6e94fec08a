//! Blocking UART transmitter for STM32
//!
//! Frames and acknowledgements are short, so the transmitter polls the
//! peripheral directly even when the USART was set up for DMA. Writes are
//! bounded by a deadline checked between bytes.

use embassy_stm32::mode::Mode;
use embassy_stm32::usart::{Error as UsartError, UartTx};
use embassy_time::{Duration, Instant};
use parkgate_hal::uart::{UartError, UartTx as HalUartTx};

/// Map an embassy USART error
pub fn map_usart_error(e: UsartError) -> UartError {
    match e {
        UsartError::Framing => UartError::Framing,
        UsartError::Noise => UartError::Noise,
        UsartError::Overrun => UartError::Overrun,
        UsartError::Parity => UartError::Parity,
        _ => UartError::Other,
    }
}

/// Transmit half of a USART, written with blocking calls
pub struct Stm32UartTx<'d, M: Mode> {
    tx: UartTx<'d, M>,
    timeout: Duration,
}

impl<'d, M: Mode> Stm32UartTx<'d, M> {
    pub fn new(tx: UartTx<'d, M>, timeout_ms: u32) -> Self {
        Self {
            tx,
            timeout: Duration::from_millis(u64::from(timeout_ms)),
        }
    }
}

impl<M: Mode> HalUartTx for Stm32UartTx<'_, M> {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        let deadline = Instant::now() + self.timeout;
        for byte in data.chunks(1) {
            if Instant::now() > deadline {
                return Err(UartError::Timeout);
            }
            self.tx.blocking_write(byte).map_err(map_usart_error)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        self.tx.blocking_flush().map_err(map_usart_error)
    }
}
