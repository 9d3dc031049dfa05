//! Read a tellstick.conf, add a device and write it back.
//!
//! Run with: cargo run --example roundtrip -- /etc/tellstick.conf

use serde_tellstick::{conf_map, from_path, to_path_with_options, ConfOptions, Device};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tellstick.conf".to_string());

    let mut config = from_path(&path)?;
    println!(
        "{} device(s), {} commented line(s)",
        config.devices.len(),
        config.commented_devices.len()
    );
    for device in &config.devices {
        println!(
            "  #{:?} {} ({})",
            device.id(),
            device.name().unwrap_or("<unnamed>"),
            device.protocol().unwrap_or("?")
        );
    }

    let mut device = Device::with_fields(conf_map! {
        "id" => config.next_device_id(),
        "name" => "Demo switch",
        "protocol" => "arctech",
        "model" => "selflearning-switch",
    });
    device.parameters = conf_map! { "house" => 4242, "unit" => 1 };
    config.devices.push(device);

    // Keep commented-out devices around.
    to_path_with_options(&config, &path, ConfOptions::new().with_comments(true))?;
    println!("✓ wrote {}", path);

    Ok(())
}
