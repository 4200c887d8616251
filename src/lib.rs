//! # DSKY Link
//!
//! Ground-side bridge between a DSKY-style flight computer and a remote flight
//! simulator. The simulator exposes telemetry and commands through a string-keyed
//! datalink whose vocabulary is discovered at runtime; this crate translates raw
//! telemetry into Noun display registers and high-level intents into simulator
//! commands.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dskylink::{Gateway, GatewayConfig, NounCode, NounContext, NounRegistry, OnboardState};
//!
//! let gateway = Gateway::new(&GatewayConfig::default()).unwrap();
//! gateway.discover().unwrap();
//!
//! let mut computer = OnboardState::new();
//! let mut registry = NounRegistry::new();
//! let noun = registry.resolve(NounCode::new("36").unwrap());
//!
//! let mut ctx = NounContext::new(&gateway, &mut computer);
//! let readout = noun.entry().return_data(&mut ctx).unwrap();
//! println!("{:?}", readout.into_display().registers());
//! ```
//!
//! ## Architecture
//!
//! - [`transport`] - one blocking request/response exchange with the simulator
//! - [`discovery`] - classification of the API listing into telemetry and commands
//! - [`gateway`] - telemetry reads, command sends and convenience actions
//! - [`computer`] - the onboard-computer state nouns read and alarm into
//! - [`nouns`] - Noun formatters and the code-indexed registry
//! - [`config`] - datalink endpoint and timeout

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]

pub mod computer;
pub mod config;
pub mod discovery;
pub mod gateway;
pub mod nouns;
pub mod transport;

// Re-export main public types for convenience
pub use computer::{BurnPlan, FlightComputer, OnboardState, PlannedBurn};
pub use config::GatewayConfig;
pub use gateway::{Gateway, GatewayError};
pub use nouns::{NounCode, NounContext, NounError, NounPayload, NounReadout, NounRegistry};
pub use transport::{HttpTransport, Transport, TransportError};

static_assertions::assert_impl_all!(Gateway: Send, Sync);
static_assertions::assert_impl_all!(NounRegistry: Send, Sync);
