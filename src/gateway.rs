use crate::config::GatewayConfig;
use crate::discovery::{self, CapabilityMaps, LISTING_QUERY};
use crate::transport::{HttpTransport, Transport, TransportError};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, info, warn};

pub const CONNECTION_PROBE_QUERY: &str = "paused=p.paused";

const SET_THROTTLE: &str = "setThrottle";
const THROTTLE_ZERO: &str = "throttleZero";
const AUTOPILOT_OFF: &str = "smartassoff";
const ADD_MANEUVER_NODE: &str = "addManeuverNode";
const UPDATE_MANEUVER_NODE: &str = "updateManeuverNode";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("simulator unreachable (query `{query}`): {source}")]
    SimulatorUnreachable {
        query: String,
        #[source]
        source: TransportError,
    },
    #[error("telemetry `{0}` is not available")]
    TelemetryUnavailable(String),
    #[error("command `{0}` is not available")]
    CommandUnavailable(String),
    #[error("invalid argument for `{command}`: {reason}")]
    InvalidArgument { command: String, reason: String },
    #[error("malformed response to `{query}`: {reason}")]
    Decode { query: String, reason: String },
}

/// Telemetry/command gateway to the simulator.
///
/// Every operation is one blocking round trip through the transport. The
/// discovered mappings are swapped in whole on each discovery, so readers
/// holding a snapshot never observe a half-built mapping.
pub struct Gateway {
    transport: Box<dyn Transport>,
    capabilities: RwLock<Option<Arc<CapabilityMaps>>>,
}

impl Gateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            capabilities: RwLock::new(None),
        }
    }

    /// Fetch the API listing and replace both mappings with its contents.
    pub fn discover(&self) -> Result<Arc<CapabilityMaps>, GatewayError> {
        let body = self.request(LISTING_QUERY)?;
        let listing = discovery::parse_listing(&body).map_err(|e| GatewayError::Decode {
            query: LISTING_QUERY.to_string(),
            reason: e.to_string(),
        })?;

        let maps = Arc::new(CapabilityMaps::from_listing(&listing));
        info!(
            "Discovered {} telemetry values and {} commands",
            maps.telemetry.len(),
            maps.commands.len()
        );

        *self
            .capabilities
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&maps));
        Ok(maps)
    }

    pub fn is_discovered(&self) -> bool {
        self.capabilities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Current mappings, running discovery first if it never happened.
    pub fn capabilities(&self) -> Result<Arc<CapabilityMaps>, GatewayError> {
        let current = self
            .capabilities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match current {
            Some(maps) => Ok(maps),
            None => self.discover(),
        }
    }

    /// Read one telemetry value, optionally scoped to a celestial body index.
    pub fn get_telemetry(&self, name: &str, body: Option<usize>) -> Result<Value, GatewayError> {
        let query = self.telemetry_query(name, body)?;
        self.read_value(name, &query)
    }

    pub fn get_number(&self, name: &str) -> Result<f64, GatewayError> {
        let query = self.telemetry_query(name, None)?;
        let value = self.read_value(name, &query)?;
        value.as_f64().ok_or_else(|| GatewayError::Decode {
            query,
            reason: format!("expected a number, got {}", value),
        })
    }

    /// Invoke a discovered command with an optional bracketed argument list.
    pub fn send_command(&self, name: &str, args: &[String]) -> Result<(), GatewayError> {
        let maps = self.capabilities()?;
        let identifier = maps
            .command_id(name)
            .ok_or_else(|| GatewayError::CommandUnavailable(name.to_string()))?;
        self.invoke(identifier, args)
    }

    pub fn set_throttle(&self, percent: f64) -> Result<(), GatewayError> {
        if !percent.is_finite() {
            return Err(GatewayError::InvalidArgument {
                command: SET_THROTTLE.to_string(),
                reason: format!("throttle {} is not a finite percentage", percent),
            });
        }
        if !(0.0..=100.0).contains(&percent) {
            warn!("Throttle {}% out of range, clamping", percent);
        }
        let percent = percent.clamp(0.0, 100.0);
        let magnitude = if percent == 0.0 { 0.0 } else { percent / 100.0 };
        self.send_command(SET_THROTTLE, &[magnitude.to_string()])
    }

    pub fn cut_throttle(&self) -> Result<(), GatewayError> {
        self.send_command(THROTTLE_ZERO, &[])
    }

    pub fn set_autopilot_mode(&self, direction: &str) -> Result<(), GatewayError> {
        self.send_command(direction, &[])
    }

    pub fn disable_autopilot(&self) -> Result<(), GatewayError> {
        self.send_command(AUTOPILOT_OFF, &[])
    }

    pub fn add_maneuver_node(&self, ut: f64, delta_v: [f64; 3]) -> Result<(), GatewayError> {
        let identifier = self.action_identifier(ADD_MANEUVER_NODE)?;
        self.invoke(&identifier, &maneuver_args(ut, delta_v))
    }

    /// Rewrite the first planned maneuver node.
    pub fn update_maneuver_node(&self, ut: f64, delta_v: [f64; 3]) -> Result<(), GatewayError> {
        let identifier = self.action_identifier(UPDATE_MANEUVER_NODE)?;
        let mut args = vec!["0".to_string()];
        args.extend(maneuver_args(ut, delta_v));
        self.invoke(&identifier, &args)
    }

    /// Probe the simulator without side effects.
    pub fn check_connection(&self) -> bool {
        match self.transport.fetch(CONNECTION_PROBE_QUERY) {
            Ok(_) => true,
            Err(e) => {
                debug!("Connection probe failed: {}", e);
                false
            }
        }
    }

    // Maneuver actions live under the orbit namespace, which discovery files
    // as telemetry.
    fn action_identifier(&self, name: &str) -> Result<String, GatewayError> {
        let maps = self.capabilities()?;
        maps.command_id(name)
            .or_else(|| maps.telemetry_id(name))
            .map(str::to_string)
            .ok_or_else(|| GatewayError::CommandUnavailable(name.to_string()))
    }

    fn telemetry_query(&self, name: &str, body: Option<usize>) -> Result<String, GatewayError> {
        let maps = self.capabilities()?;
        let identifier = maps
            .telemetry_id(name)
            .ok_or_else(|| GatewayError::TelemetryUnavailable(name.to_string()))?;

        let mut query = format!("{}={}", name, identifier);
        if let Some(index) = body {
            query.push_str(&format!("[{}]", index));
        }
        Ok(query)
    }

    fn read_value(&self, name: &str, query: &str) -> Result<Value, GatewayError> {
        let body = self.request(query)?;
        let mut response: Value = serde_json::from_slice(&body).map_err(|e| GatewayError::Decode {
            query: query.to_string(),
            reason: e.to_string(),
        })?;

        match response.get_mut(name) {
            Some(value) => Ok(value.take()),
            None => Err(GatewayError::Decode {
                query: query.to_string(),
                reason: format!("response has no `{}` key", name),
            }),
        }
    }

    fn invoke(&self, identifier: &str, args: &[String]) -> Result<(), GatewayError> {
        let mut query = format!("command={}", identifier);
        if !args.is_empty() {
            query.push_str(&format!("[{}]", args.join(",")));
        }
        self.request(&query).map(|_| ())
    }

    fn request(&self, query: &str) -> Result<Vec<u8>, GatewayError> {
        debug!("Query: {}", query);
        self.transport.fetch(query).map_err(|source| {
            error!("Query string: {}", query);
            error!("Transport failure: {}", source);
            GatewayError::SimulatorUnreachable {
                query: query.to_string(),
                source,
            }
        })
    }
}

impl core::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gateway")
            .field("discovered", &self.is_discovered())
            .finish_non_exhaustive()
    }
}

/// Two-decimal argument with trailing zeros dropped (`10.50` is sent as `10.5`).
fn decimal_arg(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn maneuver_args(ut: f64, delta_v: [f64; 3]) -> Vec<String> {
    core::iter::once(ut).chain(delta_v).map(decimal_arg).collect()
}
