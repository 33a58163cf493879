use std::collections::HashMap;

use super::types::ConnectionRecord;

/// One port referenced on a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortUsage {
    /// Declared port number, or `"default"`.
    pub port_id: String,
    /// Name captured from the first row that referenced this port.
    pub name: Option<String>,
    /// How many link ends use this port. Diagnostic only.
    pub connections: usize,
}

/// Ports registered on a single device, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePorts {
    pub device_id: String,
    /// `type` field of the first record mentioning this device.
    pub type_hint: String,
    pub ports: Vec<PortUsage>,
}

impl DevicePorts {
    pub fn port(&self, port_id: &str) -> Option<&PortUsage> {
        self.ports.iter().find(|p| p.port_id == port_id)
    }
}

/// Accumulates the ports each device uses across the whole record sequence.
///
/// Both devices and ports keep first-occurrence order. Port offsets are assigned from this
/// order, so it must not depend on hashing.
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    devices: Vec<DevicePorts>,
    index: HashMap<String, usize>,
}

impl PortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both ends of every record, source before target, in record order.
    pub fn from_records(records: &[ConnectionRecord]) -> Self {
        let mut registry = Self::new();
        for record in records {
            registry.register(
                &record.source,
                &record.device_type,
                record.source_port_id(),
                record.local_port_name.as_deref(),
            );
            registry.register(
                &record.target,
                &record.device_type,
                record.target_port_id(),
                record.remote_port_name.as_deref(),
            );
        }
        registry
    }

    /// Record one use of `(device_id, port_id)`.
    ///
    /// The first registration of a device fixes its type hint; the first registration of a
    /// port fixes its name. Later registrations only bump the usage counter.
    pub fn register(
        &mut self,
        device_id: &str,
        type_hint: &str,
        port_id: &str,
        name: Option<&str>,
    ) {
        let idx = match self.index.get(device_id) {
            Some(&idx) => idx,
            None => {
                self.devices.push(DevicePorts {
                    device_id: device_id.to_string(),
                    type_hint: type_hint.to_string(),
                    ports: Vec::new(),
                });
                let idx = self.devices.len() - 1;
                self.index.insert(device_id.to_string(), idx);
                idx
            }
        };

        let device = &mut self.devices[idx];
        match device.ports.iter_mut().find(|p| p.port_id == port_id) {
            Some(usage) => usage.connections += 1,
            None => device.ports.push(PortUsage {
                port_id: port_id.to_string(),
                name: name.map(str::to_string),
                connections: 1,
            }),
        }
    }

    pub fn devices(&self) -> &[DevicePorts] {
        &self.devices
    }

    pub fn device(&self, device_id: &str) -> Option<&DevicePorts> {
        self.index.get(device_id).map(|&idx| &self.devices[idx])
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
