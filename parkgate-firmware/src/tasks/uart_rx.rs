//! Host UART receive task
//!
//! Byte-arrival context: decodes frames, acknowledges every finished frame
//! and hands decoded commands to the control task. Nothing is executed here.

use defmt::*;
use embassy_stm32::usart::RingBufferedUartRx;
use embedded_io_async::Read;

use parkgate_core::link::{LinkReceiver, Reception};
use parkgate_core::traits::Transport;
use parkgate_protocol::ChecksumScope;

use crate::channels::{post_command, SharedTransport};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Host RX task - receives and acknowledges frames from the host
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: RingBufferedUartRx<'static>, scope: ChecksumScope) {
    info!("UART RX task started ({:?})", scope);

    let mut link = LinkReceiver::new(scope);
    let mut transport = SharedTransport;
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(reception) = link.on_byte(byte) {
                        handle_reception(reception, &mut transport);
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                // The decoder keeps its state; the checksum catches lost bytes
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Acknowledge a finished frame and forward its command
fn handle_reception(reception: Reception, transport: &mut SharedTransport) {
    let ack = reception.ack();
    if let Err(e) = transport.send(ack.as_bytes()) {
        warn!("{:?} ack not sent: {:?}", ack, e);
    }

    match reception {
        Reception::Accepted(Ok(command)) => {
            debug!("Command: {:?}", command);
            if post_command(command) {
                warn!("Pending command replaced before it ran");
            }
        }
        Reception::Accepted(Err(e)) => {
            warn!("Undecodable command: {:?}", e);
        }
        Reception::Rejected(e) => {
            warn!("Frame rejected: {:?}", e);
        }
    }
}
