//! Print a tellstick.conf as JSON.
//!
//! Run with: cargo run --example to_json

use serde_tellstick::from_str;
use std::error::Error;

const CONF: &str = r#"user = "nobody"
group = "plugdev"
controller {
  id = 1
  type = 2
}
device {
  id = 1
  name = "Lamp"
  protocol = "arctech"
  parameters {
    house = 12
    unit = 1
  }
}
#device {
#  id = 2
#}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config = from_str(CONF)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
