//! Capture-Beacon Main Application
//!
//! Entry point for the beacon node firmware. Initializes the IR and
//! indicator pins and runs the exchange loop.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use {defmt_rtt as _, panic_probe as _};

use beacon_firmware::beacon::cycle::BeaconLoop;
use beacon_firmware::config;
use beacon_firmware::hal::clock::BootClock;
use beacon_firmware::hal::gpio::{EmitterPin, ReceiverPin, RgbIndicator};
use beacon_firmware::types::Role;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Beacon firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // IR link: PB0 drives the emitter transistor, PB1 reads the
    // demodulating receiver (active low, pulled up while quiet)
    let tx = EmitterPin::new(Output::new(p.PB0, Level::Low, Speed::VeryHigh));
    let rx = ReceiverPin::new(Input::new(p.PB1, Pull::Up));

    // Indicator LED channels
    let indicator = RgbIndicator::new(
        Output::new(p.PA9, Level::Low, Speed::Low),
        Output::new(p.PA10, Level::Low, Speed::Low),
        Output::new(p.PA11, Level::Low, Speed::Low),
    );

    let mut node = BeaconLoop::new(Role::Beacon, BootClock, tx, rx, indicator);

    info!(
        "Pins ready, {}kHz carrier, entering exchange loop",
        config::carrier_frequency_hz() / 1000
    );

    // The exchange loop never awaits: IR frame timing tolerates only a
    // few microseconds of jitter, so each cycle busy-polls from first
    // header edge to last sample
    loop {
        if let Some(message) = node.run_cycle() {
            info!("heard {} -> state {}", message, node.team_state());
        }
    }
}
