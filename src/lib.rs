// Error type and connection settings shared by every layer
pub mod error;
pub mod config;

// External data representation, a protocol for serializing data to be sent over the network
pub mod xdr;

// Remote procedure call, a protocol build on top of XDR to provide something like C-style function calls over the network
pub mod rpc;

// A protocol using RPC that's meant to communicate with instruments like oscilloscopes, power supplies, waveform generators, etc
pub mod vxi11;

// Byte-level link to an instrument, over VXI-11 or in memory
pub mod transport;

// SCPI command dispatch, reply parsing and the mnemonic! macro used by the device modules
#[macro_use]
pub mod scpi;
pub mod validate;

// Instruments built on the layers above
pub mod devices;

pub use config::Config;
pub use devices::ds2000::{DS2000, Snapshot};
pub use error::{Error, Result};
pub use transport::{MockTransport, Transport};
