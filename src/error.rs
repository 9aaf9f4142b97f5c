//! Error type shared by the transport, dispatch and controller layers.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("RPC error: {0}")]
	Rpc(String),

	#[error("VXI-11 {operation} failed with device error {code} ({reason})")]
	Vxi11 { operation: &'static str, code: i32, reason: &'static str },

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Not connected to an instrument")]
	NotConnected,

	#[error("Connected to a device but it doesn't appear to be a DS2000: {0}")]
	WrongModel(String),

	#[error("The DS2000 only has channels 1 and 2, got {0}")]
	InvalidChannel(u8),

	#[error("The DS2000 only has buses 1 and 2, got {0}")]
	InvalidBus(u8),

	#[error("Invalid value for \"{name}\": {message}")]
	OutOfRange { name: &'static str, message: String },

	#[error("Instrument state error: {0}")]
	InvalidState(String),

	#[error("Unexpected reply {reply:?} to {command:?}")]
	UnexpectedReply { command: String, reply: String },

	#[error("Reply is not valid UTF-8")]
	Utf8(#[from] std::str::Utf8Error),

	#[error("Malformed binary block: {0}")]
	Block(String),
}

impl Error {
	pub(crate) fn vxi11(operation:&'static str, code:i32) -> Self {
		Error::Vxi11{ operation, code, reason: device_error_text(code) }
	}

	pub(crate) fn unexpected(command:&str, reply:&str) -> Self {
		Error::UnexpectedReply{ command: command.to_owned(), reply: reply.to_owned() }
	}

	pub(crate) fn state<S:Into<String>>(msg:S) -> Self { Error::InvalidState(msg.into()) }
}

/// Text for the `Device_ErrorCode` values defined by VXI-11 (B.5.2).
pub fn device_error_text(code:i32) -> &'static str {
	match code {
		0  => "no error",
		1  => "syntax error",
		3  => "device not accessible",
		4  => "invalid link identifier",
		5  => "parameter error",
		6  => "channel not established",
		8  => "operation not supported",
		9  => "out of resources",
		11 => "device locked by another link",
		12 => "no lock held by this link",
		15 => "I/O timeout",
		17 => "I/O error",
		21 => "invalid address",
		23 => "abort",
		29 => "channel already established",
		_  => "unknown error",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn vxi11_error_names_the_code() {
		let e = Error::vxi11("device_read", 15);
		assert_eq!(e.to_string(), "VXI-11 device_read failed with device error 15 (I/O timeout)");
	}

	#[test]
	fn unknown_codes_are_reported() {
		assert_eq!(device_error_text(99), "unknown error");
	}
}
