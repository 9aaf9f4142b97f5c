//! SCPI command dispatch and reply parsing.
//!
//! Every controller talks to the instrument through one [`Scpi`]. Setters are plain writes and
//! getters are `<path>?` queries whose replies are parsed into numbers, booleans or [`Mnemonic`]s.

use std::convert::TryFrom;
use std::str;
use std::thread;

use log::{debug, error};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// A symbolic SCPI parameter. The instrument accepts the long command token (`CHANnel1`) and
/// answers with the short reply token (`CHAN1`).
pub trait Mnemonic: Sized + Copy + 'static {
	const ALL: &'static [Self];

	fn command_token(self) -> &'static str;
	fn reply_token(self) -> &'static str;
	fn label(self) -> &'static str;

	fn from_reply(reply:&str) -> Option<Self> {
		let reply = reply.trim();
		Self::ALL.iter().copied().find(|m| {
			m.reply_token().eq_ignore_ascii_case(reply) || m.command_token().eq_ignore_ascii_case(reply)
		})
	}
}

/// Declares an enum of SCPI mnemonics from a table of `Variant => ("COMMand", "COMM", "label")` rows.
#[macro_export]
macro_rules! mnemonic {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$( $(#[$vmeta:meta])* $variant:ident => ($cmd:literal, $reply:literal, $label:literal) ),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
		$vis enum $name { $( $(#[$vmeta])* $variant ),+ }

		impl $crate::scpi::Mnemonic for $name {
			const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

			fn command_token(self) -> &'static str { match self { $( $name::$variant => $cmd ),+ } }
			fn reply_token(self) -> &'static str { match self { $( $name::$variant => $reply ),+ } }
			fn label(self) -> &'static str { match self { $( $name::$variant => $label ),+ } }
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f:&mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str($crate::scpi::Mnemonic::label(*self))
			}
		}
	};
}

pub struct Scpi {
	transport: Box<dyn Transport>,
	config: Config,
	connected: bool,
}

impl Scpi {

	pub fn new(transport:Box<dyn Transport>, config:Config) -> Self {
		Self{ transport, config, connected: true }
	}

	pub fn config(&self) -> &Config { &self.config }

	pub fn is_connected(&self) -> bool { self.connected }

	fn before_send(&self, cmd:&str) -> Result<()> {
		if !self.connected { return Err(Error::NotConnected); }
		let throttle = self.config.tx_throttle();
		if !throttle.is_zero() { thread::sleep(throttle); }
		if self.config.log_traffic { debug!("sent: {:?}", cmd); }
		Ok(())
	}

	fn failed<T>(cmd:&str, e:Error) -> Result<T> {
		error!("{:?} failed: {}", cmd, e);
		Err(e)
	}

	/// Sends a command that has no reply.
	pub fn write(&mut self, cmd:&str) -> Result<()> {
		self.before_send(cmd)?;
		match self.transport.write(cmd.as_bytes()) {
			Ok(()) => Ok(()),
			Err(e) => Self::failed(cmd, e),
		}
	}

	/// Sends a query and returns the raw response, binary blocks included.
	pub fn ask_raw(&mut self, cmd:&str) -> Result<Vec<u8>> {
		self.before_send(cmd)?;
		match self.transport.ask(cmd.as_bytes()) {
			Ok(reply) => {
				if self.config.log_traffic { debug!("asked: {:?}, answered {} bytes", cmd, reply.len()); }
				Ok(reply)
			},
			Err(e) => Self::failed(cmd, e),
		}
	}

	/// Sends a query and returns the reply line without its terminator.
	pub fn ask(&mut self, cmd:&str) -> Result<String> {
		self.before_send(cmd)?;
		let raw = match self.transport.ask(cmd.as_bytes()) {
			Ok(raw) => raw,
			Err(e) => return Self::failed(cmd, e),
		};
		let reply = str::from_utf8(&raw)?.trim_end_matches(|c| c == '\n' || c == '\r').to_owned();
		if self.config.log_traffic { debug!("asked: {:?}, answered: {:?}", cmd, reply); }
		Ok(reply)
	}

	pub fn query_str(&mut self, path:&str) -> Result<String> { self.ask(&format!("{}?", path)) }

	pub fn query_f64(&mut self, path:&str) -> Result<f64> {
		let cmd = format!("{}?", path);
		let reply = self.ask(&cmd)?;
		parse_f64(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	pub fn query_i64(&mut self, path:&str) -> Result<i64> {
		let cmd = format!("{}?", path);
		let reply = self.ask(&cmd)?;
		parse_i64(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	/// Integer query converted to `T`. A reply that doesn't fit `T` is `Error::UnexpectedReply`.
	pub fn query_int<T:TryFrom<i64>>(&mut self, path:&str) -> Result<T> { self.query_int_in(path, i64::MIN, i64::MAX) }

	/// Like [`Scpi::query_int`], but a reply outside `min..=max` is also `Error::UnexpectedReply`.
	pub fn query_int_in<T:TryFrom<i64>>(&mut self, path:&str, min:i64, max:i64) -> Result<T> {
		let cmd = format!("{}?", path);
		let reply = self.ask(&cmd)?;
		parse_i64(&reply)
			.filter(|n| (min..=max).contains(n))
			.and_then(|n| T::try_from(n).ok())
			.ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	pub fn query_bool(&mut self, path:&str) -> Result<bool> {
		let cmd = format!("{}?", path);
		let reply = self.ask(&cmd)?;
		parse_bool(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	pub fn query_mnemonic<M:Mnemonic>(&mut self, path:&str) -> Result<M> {
		let cmd = format!("{}?", path);
		let reply = self.ask(&cmd)?;
		M::from_reply(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	pub fn set_f64(&mut self, path:&str, value:f64) -> Result<()> { self.write(&format!("{} {}", path, format_f64(value))) }
	pub fn set_i64(&mut self, path:&str, value:i64) -> Result<()> { self.write(&format!("{} {}", path, value)) }
	pub fn set_bool(&mut self, path:&str, value:bool) -> Result<()> { self.write(&format!("{} {}", path, if value { 1 } else { 0 })) }
	pub fn set_str(&mut self, path:&str, value:&str) -> Result<()> { self.write(&format!("{} {}", path, value)) }

	pub fn set_mnemonic<M:Mnemonic>(&mut self, path:&str, value:M) -> Result<()> {
		self.write(&format!("{} {}", path, value.command_token()))
	}

	/// Issues `<path>?` and returns the payload of the definite length block in the reply.
	pub fn query_block(&mut self, path:&str) -> Result<Vec<u8>> {
		let raw = self.ask_raw(&format!("{}?", path))?;
		parse_block(&raw).map(|data| data.to_vec())
	}

	/// Releases the link. Later calls fail with `Error::NotConnected`.
	pub fn close(&mut self) -> Result<()> {
		if !self.connected { return Ok(()); }
		self.connected = false;
		self.transport.close()
	}

}

/// Parses a numeric reply such as `2.000000e-01`.
pub fn parse_f64(reply:&str) -> Option<f64> {
	reply.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an integer reply. Integral values in scientific notation (`1.400000e+04`) are accepted.
pub fn parse_i64(reply:&str) -> Option<i64> {
	let reply = reply.trim();
	if let Ok(v) = reply.parse::<i64>() { return Some(v); }
	let v = parse_f64(reply)?;
	if v.fract() == 0.0 && v.abs() < i64::MAX as f64 { Some(v as i64) } else { None }
}

pub fn parse_bool(reply:&str) -> Option<bool> {
	match reply.trim().to_ascii_uppercase().as_str() {
		"1" | "ON"  => Some(true),
		"0" | "OFF" => Some(false),
		_ => None,
	}
}

/// Payload of an IEEE 488.2 definite length block, `#<N><len><data>`. Anything after the data
/// (normally the `\n` terminator) is ignored.
pub fn parse_block(raw:&[u8]) -> Result<&[u8]> {
	if raw.first() != Some(&b'#') {
		return Err(Error::Block("missing '#' at the start of the block".to_owned()));
	}
	let digits = match raw.get(1) {
		Some(d @ b'1'..=b'9') => (d - b'0') as usize,
		_ => return Err(Error::Block("the header length digit must be 1 to 9".to_owned())),
	};
	let header = raw.get(2..2 + digits)
		.ok_or_else(|| Error::Block("the block header is truncated".to_owned()))?;
	let len:usize = str::from_utf8(header).ok()
		.and_then(|h| h.parse().ok())
		.ok_or_else(|| Error::Block(format!("invalid block length {:?}", String::from_utf8_lossy(header))))?;

	let start = 2 + digits;
	raw.get(start..start + len)
		.ok_or_else(|| Error::Block(format!("expected {} data bytes, got {}", len, raw.len() - start)))
}

/// Plain decimal for ordinary magnitudes, scientific notation for very small or large ones.
pub fn format_f64(value:f64) -> String {
	let magnitude = value.abs();
	if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) { format!("{}", value) } else { format!("{:e}", value) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::MockTransport;

	mnemonic! {
		enum Fruit {
			Apple  => ("APPLe", "APPL", "apple"),
			Banana => ("BANana", "BAN", "banana"),
		}
	}

	#[test]
	fn parses_scientific_notation() {
		assert_eq!(parse_f64("2.000000e-01"), Some(0.2));
		assert_eq!(parse_f64(" -1.5E+03\n"), Some(-1500.0));
		assert!((parse_f64("1.000000e-09").unwrap() - 1e-9).abs() < 1e-21);
		assert_eq!(parse_f64("CHAN1"), None);
		assert_eq!(parse_f64("9.9E37").map(|v| v > 1e37), Some(true));
	}

	#[test]
	fn parses_integers() {
		assert_eq!(parse_i64("14000"), Some(14000));
		assert_eq!(parse_i64("1.400000e+04"), Some(14000));
		assert_eq!(parse_i64("1.5"), None);
	}

	#[test]
	fn parses_booleans() {
		assert_eq!(parse_bool("1"), Some(true));
		assert_eq!(parse_bool("off"), Some(false));
		assert_eq!(parse_bool("2"), None);
	}

	#[test]
	fn formats_floats_compactly() {
		assert_eq!(format_f64(0.5), "0.5");
		assert_eq!(format_f64(2e-9), "2e-9");
		assert_eq!(format_f64(-7000.0), "-7000");
		assert_eq!(format_f64(56e6), "5.6e7");
	}

	#[test]
	fn definite_length_blocks() {
		assert_eq!(parse_block(b"#15hello\n").unwrap(), b"hello");
		assert_eq!(parse_block(b"#2100123456789").unwrap(), b"0123456789");
		assert_eq!(parse_block(b"#10\n").unwrap(), b"");
		assert!(matches!(parse_block(b"15hello"), Err(Error::Block(_))));
		assert!(matches!(parse_block(b"#0"), Err(Error::Block(_))));
		assert!(matches!(parse_block(b"#3"), Err(Error::Block(_))));
		assert!(matches!(parse_block(b"#2x5hello"), Err(Error::Block(_))));
		assert!(matches!(parse_block(b"#19abc"), Err(Error::Block(_))));
	}

	#[test]
	fn mnemonics_match_either_token() {
		assert_eq!(Fruit::from_reply("APPL"), Some(Fruit::Apple));
		assert_eq!(Fruit::from_reply("banana\n"), Some(Fruit::Banana));
		assert_eq!(Fruit::from_reply("CHERRY"), None);
		assert_eq!(Fruit::Apple.to_string(), "apple");
	}

	#[test]
	fn unknown_reply_is_an_error() {
		let mock = MockTransport::new();
		mock.reply(":FRUit", "CHERRY");
		let mut scpi = Scpi::new(Box::new(mock), Config::default());
		match scpi.query_mnemonic::<Fruit>(":FRUit") {
			Err(Error::UnexpectedReply{ command, reply }) => {
				assert_eq!(command, ":FRUit?");
				assert_eq!(reply, "CHERRY");
			},
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn integer_replies_must_fit() {
		let mock = MockTransport::new();
		mock.reply(":WIDTh", "300").reply(":COUNt", "-1").reply(":BITS", "1.600000e+01");
		let mut scpi = Scpi::new(Box::new(mock), Config::default());
		assert!(matches!(scpi.query_int::<u8>(":WIDTh"), Err(Error::UnexpectedReply{ .. })));
		assert_eq!(scpi.query_int::<u16>(":WIDTh").unwrap(), 300);
		assert!(matches!(scpi.query_int::<u32>(":COUNt"), Err(Error::UnexpectedReply{ .. })));
		assert_eq!(scpi.query_int_in::<u8>(":BITS", 4, 32).unwrap(), 16);
		assert!(matches!(scpi.query_int_in::<u8>(":BITS", 5, 8), Err(Error::UnexpectedReply{ .. })));
	}

	#[test]
	fn closed_connection_refuses_commands() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		scpi.close().unwrap();
		assert!(mock.is_closed());
		assert!(matches!(scpi.write("*CLS"), Err(Error::NotConnected)));
	}
}
