//! The in-memory shape of a tellstick.conf file.
//!
//! A [`Config`] holds the top-level settings, the single controller block,
//! the device blocks in file order and every commented-out line.
//!
//! Through serde the model takes the same JSON shape tellstick tooling has
//! always exchanged, with device fields flattened next to `parameters`:
//!
//! ```rust
//! use serde_tellstick::from_str;
//!
//! let config = from_str("controller {\n}\ndevice {\n  id = 1\n  parameters {\n    house = 12\n  }\n}\n").unwrap();
//! let json = serde_json::to_string(&config).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"root":{},"controller":{},"devices":[{"id":1.0,"parameters":{"house":12.0}}],"commentedDevices":[]}"#
//! );
//! ```

use crate::{ConfMap, Value};
use serde::{Deserialize, Serialize};

/// A parsed tellstick.conf file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Settings that appear before the controller block.
    #[serde(default)]
    pub root: ConfMap,
    /// Settings of the controller block.
    #[serde(default)]
    pub controller: ConfMap,
    /// Device blocks in file order.
    #[serde(default)]
    pub devices: Vec<Device>,
    /// Every source line that contained `#`, verbatim.
    #[serde(default, rename = "commentedDevices")]
    pub commented_devices: Vec<String>,
}

/// One peripheral device block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(flatten)]
    pub fields: ConfMap,
    #[serde(default)]
    pub parameters: ConfMap,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first device whose `id` field equals `id`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::{conf_map, Config, Device};
    ///
    /// let mut config = Config::new();
    /// config.devices.push(Device::with_fields(conf_map! { "id" => 3, "name" => "Fan" }));
    ///
    /// assert_eq!(config.device_by_id(3).and_then(|d| d.name()), Some("Fan"));
    /// assert!(config.device_by_id(4).is_none());
    /// ```
    #[must_use]
    pub fn device_by_id(&self, id: i64) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == Some(id))
    }

    /// Mutable variant of [`Config::device_by_id`].
    pub fn device_by_id_mut(&mut self, id: i64) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id() == Some(id))
    }

    /// Returns the smallest positive id not used by any device.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tellstick::{conf_map, Config, Device};
    ///
    /// let mut config = Config::new();
    /// assert_eq!(config.next_device_id(), 1);
    ///
    /// config.devices.push(Device::with_fields(conf_map! { "id" => 1 }));
    /// config.devices.push(Device::with_fields(conf_map! { "id" => 3 }));
    /// assert_eq!(config.next_device_id(), 2);
    /// ```
    #[must_use]
    pub fn next_device_id(&self) -> i64 {
        let mut id = 1;
        while self.device_by_id(id).is_some() {
            id += 1;
        }
        id
    }
}

impl Device {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a device with the given fields and no parameters.
    #[must_use]
    pub fn with_fields(fields: ConfMap) -> Self {
        Device {
            fields,
            parameters: ConfMap::new(),
        }
    }

    /// Returns a device field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The device's numeric `id` field.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    /// The device's `name` field.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// The device's `protocol` field, e.g. `arctech`.
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        self.get("protocol").and_then(Value::as_str)
    }

    /// The device's `model` field, e.g. `selflearning-switch`.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.get("model").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf_map;

    fn lamp() -> Device {
        Device {
            fields: conf_map! {
                "id" => 1,
                "name" => "Lamp",
                "protocol" => "arctech",
                "model" => "selflearning-switch",
            },
            parameters: conf_map! { "house" => 12, "unit" => 1 },
        }
    }

    #[test]
    fn test_device_accessors() {
        let device = lamp();
        assert_eq!(device.id(), Some(1));
        assert_eq!(device.name(), Some("Lamp"));
        assert_eq!(device.protocol(), Some("arctech"));
        assert_eq!(device.model(), Some("selflearning-switch"));
        assert_eq!(Device::new().id(), None);
    }

    #[test]
    fn test_device_by_id_mut() {
        let mut config = Config::new();
        config.devices.push(lamp());
        if let Some(device) = config.device_by_id_mut(1) {
            device.fields.insert("name", Value::from("Porch"));
        }
        assert_eq!(config.devices[0].name(), Some("Porch"));
    }

    #[test]
    fn test_device_json_shape() {
        let json = serde_json::to_value(lamp()).unwrap();
        assert_eq!(json["id"], 1.0);
        assert_eq!(json["name"], "Lamp");
        assert_eq!(json["parameters"]["house"], 12.0);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "root": {"user": "root"},
            "controller": {"id": 1, "type": 2},
            "devices": [{"id": 1, "name": "Lamp", "parameters": {"house": 12}}]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.root.get("user"), Some(&Value::from("root")));
        assert_eq!(config.controller.len(), 2);
        assert_eq!(config.devices[0], {
            let mut d = Device::with_fields(conf_map! { "id" => 1, "name" => "Lamp" });
            d.parameters.insert("house", Value::from(12));
            d
        });
        assert!(config.commented_devices.is_empty());
    }

    #[test]
    fn test_device_without_parameters_from_json() {
        let device: Device = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert_eq!(device.id(), Some(2));
        assert!(device.parameters.is_empty());
    }
}
