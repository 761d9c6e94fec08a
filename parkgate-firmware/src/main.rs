//! Parkgate - Car Park Barrier Controller Firmware
//!
//! Main firmware binary for STM32F103 boards. Watches a vehicle presence
//! sensor, drives the barrier servo and a status OLED, and takes orders
//! from the plate-recognition host over a framed UART link.
//!
//! Pin map (same wiring as the deployed controller board):
//!
//! | Function        | Pin       | Peripheral       |
//! |-----------------|-----------|------------------|
//! | Host TX / RX    | PA2 / PA3 | USART2           |
//! | Presence sensor | PA0       | GPIO input       |
//! | Barrier servo   | PB6       | TIM4 CH1         |
//! | OLED SCL / SDA  | PB8 / PB9 | I2C1 (remapped)  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, OutputType};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, Config as UsartConfig, Uart};
use embassy_stm32::{bind_interrupts, peripherals};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use parkgate_core::control::ControlLoop;
use parkgate_drivers::{GpioPresenceSensor, ServoActuator, Ssd1306Display, UartTransport};
use parkgate_hal::gpio::Pull;
use parkgate_hal_stm32::gpio::to_stm_pull;
use parkgate_hal_stm32::{Stm32InputPin, Stm32PwmChannel, Stm32UartTx};

use crate::channels::SharedTransport;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    USART2 => usart::InterruptHandler<peripherals::USART2>;
});

/// Servo PWM frequency (20 ms period)
const SERVO_PWM_HZ: u32 = 50;

/// OLED bus speed
const I2C_HZ: u32 = 400_000;

// DMA ring buffer for host RX (must live forever)
static RX_DMA_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Parkgate firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Gate config: open={}deg closed={}deg debounce={}ms report={}ms baud={} scope={:?}",
        config.gate.open_angle.degrees(),
        config.gate.closed_angle.degrees(),
        config.sensor.debounce_ms,
        config.sensor.report_interval_ms,
        config.link.baudrate,
        config.link.checksum
    );

    // Host link
    let mut uart_config = UsartConfig::default();
    uart_config.baudrate = config.link.baudrate;
    let uart = Uart::new(
        p.USART2,
        p.PA3,
        p.PA2,
        Irqs,
        p.DMA1_CH7,
        p.DMA1_CH6,
        uart_config,
    )
    .unwrap();
    let (uart_tx, uart_rx) = uart.split();
    let rx = uart_rx.into_ring_buffered(RX_DMA_BUF.init([0; 64]));
    channels::install_transport(UartTransport::new(Stm32UartTx::new(
        uart_tx,
        config.link.tx_timeout_ms,
    )));

    // Presence sensor, pulled towards "no vehicle"
    let pull = if config.sensor.inverted {
        Pull::Up
    } else {
        Pull::Down
    };
    let sensor = GpioPresenceSensor::new(
        Stm32InputPin::new(Input::new(p.PA0, to_stm_pull(pull))),
        config.sensor.inverted,
    );

    // Barrier servo
    let pwm = SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new(p.PB6, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(SERVO_PWM_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let servo = ServoActuator::new(Stm32PwmChannel::new(pwm.split().ch1));

    // Status display, I2C1 remap selected from the pins
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, Hertz(I2C_HZ), Default::default());
    let mut display = Ssd1306Display::new(i2c);
    if let Err(e) = display.init() {
        // show() retries the init sequence
        warn!("Display init failed: {:?}", e);
    }

    let control = ControlLoop::new(
        SharedTransport,
        display,
        servo,
        sensor,
        &config,
        tasks::now_ms(),
    );
    info!("Barrier closed, display ready");

    // Spawn tasks
    spawner
        .spawn(tasks::uart_rx_task(rx, config.checksum_scope()))
        .unwrap();
    spawner.spawn(tasks::controller_task(control)).unwrap();

    info!("All tasks spawned, firmware running");
}
