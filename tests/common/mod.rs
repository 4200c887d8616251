#![allow(dead_code)]

use dskylink::{Gateway, Transport, TransportError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct SimulatorState {
    online: bool,
    listing: Value,
    values: HashMap<String, Value>,
    queries: Vec<String>,
}

/// In-memory datalink: replays a canned API listing and telemetry values and
/// records every query it receives.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<SimulatorState>>,
}

impl ScriptedTransport {
    pub fn new(listing: Value) -> Self {
        let transport = Self::default();
        {
            let mut state = transport.state.lock().unwrap();
            state.online = true;
            state.listing = listing;
        }
        transport
    }

    pub fn offline() -> Self {
        Self::default()
    }

    pub fn set_online(&self, online: bool) {
        self.state.lock().unwrap().online = online;
    }

    pub fn set_listing(&self, listing: Value) {
        self.state.lock().unwrap().listing = listing;
    }

    pub fn set_value(&self, name: &str, value: Value) {
        self.state.lock().unwrap().values.insert(name.to_string(), value);
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.lock().unwrap().queries.clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.state.lock().unwrap().queries.last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, query: &str) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.lock().unwrap();
        if !state.online {
            return Err(TransportError::Connect("connection refused".to_string()));
        }
        state.queries.push(query.to_string());

        let body = if query == "api=a.api" {
            state.listing.clone()
        } else if query == "paused=p.paused" {
            json!({ "paused": 0 })
        } else if query.starts_with("command=") {
            json!({})
        } else {
            let name = query.split('=').next().unwrap_or_default();
            match state.values.get(name) {
                Some(value) => json!({ name: value }),
                None => json!({}),
            }
        };

        Ok(serde_json::to_vec(&body).unwrap())
    }
}

pub fn standard_listing() -> Value {
    json!({
        "vessel": [
            { "apistring": "v.altitude", "name": "Altitude" },
            { "apistring": "v.missionTime", "name": "Mission Time" },
            { "apistring": "v.orbitalVelocity" },
            { "apistring": "v.surfaceVelocityx" },
            { "apistring": "v.surfaceVelocityy" },
            { "apistring": "v.surfaceVelocityz" },
            { "apistring": "v.relativeVelocity" },
            { "apistring": "v.verticalSpeed" },
            { "apistring": "v.lat" },
            { "apistring": "v.long" },
            { "apistring": "v.setThrottle" }
        ],
        "navigation": [
            { "apistring": "n.roll" },
            { "apistring": "n.pitch" },
            { "apistring": "n.heading" }
        ],
        "orbit": [
            { "apistring": "o.ApA" },
            { "apistring": "o.PeA" },
            { "apistring": "o.timeToAp" },
            { "apistring": "o.addManeuverNode" },
            { "apistring": "o.updateManeuverNode" }
        ],
        "body": [
            { "apistring": "b.name" },
            { "apistring": "b.number" }
        ],
        "target": [
            { "apistring": "tar.o.mass" }
        ],
        "flight": [
            { "apistring": "f.throttleZero" },
            { "apistring": "f.sas" }
        ],
        "mechjeb": [
            { "apistring": "mj.smartassoff" },
            { "apistring": "mj.prograde" },
            { "apistring": "mj.retrograde" }
        ],
        "paused": [
            { "apistring": "p.paused" }
        ]
    })
}

pub fn connected_gateway() -> (Gateway, ScriptedTransport) {
    let transport = ScriptedTransport::new(standard_listing());
    let gateway = Gateway::with_transport(transport.clone());
    (gateway, transport)
}
