use crate::error::{Error, Result};
use crate::scpi::{parse_f64, Mnemonic, Scpi};
use crate::validate::check_level;

use super::super::common::Source;

const PATTERN:&str = ":TRIGger:PATTern:PATTern";
const LEVEL:&str   = ":TRIGger:PATTern:LEVel";

mnemonic! {
	/// Per-channel condition of a pattern. At most one channel may hold an edge.
	pub enum PatternCode {
		High     => ("H", "H", "high"),
		Low      => ("L", "L", "low"),
		Ignore   => ("X", "X", "don't care"),
		Rising   => ("R", "R", "rising edge"),
		Falling  => ("F", "F", "falling edge"),
	}
}

impl PatternCode {
	pub fn is_edge(self) -> bool { self == PatternCode::Rising || self == PatternCode::Falling }
}

/// Splits a `H,L` style reply into one code per channel.
pub(crate) fn parse_pair(command:&str, reply:&str) -> Result<(PatternCode, PatternCode)> {
	let mut codes = reply.split(',').map(PatternCode::from_reply);
	match (codes.next(), codes.next(), codes.next()) {
		(Some(Some(a)), Some(Some(b)), None) => Ok((a, b)),
		_ => Err(Error::unexpected(command, reply)),
	}
}

pub struct Pattern<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Pattern<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	/// Sets the codes for channel 1 and channel 2.
	pub fn set_pattern(&mut self, ch1:PatternCode, ch2:PatternCode) -> Result<()> {
		if ch1.is_edge() && ch2.is_edge() {
			return Err(Error::OutOfRange{ name: "pattern", message: format!("only one channel may hold an edge, got {},{}", ch1.command_token(), ch2.command_token()) });
		}
		self.scpi.write(&format!("{} {},{}", PATTERN, ch1.command_token(), ch2.command_token()))
	}

	pub fn pattern(&mut self) -> Result<(PatternCode, PatternCode)> {
		let reply = self.scpi.query_str(PATTERN)?;
		parse_pair(":TRIGger:PATTern:PATTern?", &reply)
	}

	pub fn set_level(&mut self, channel:Source, level:f64) -> Result<()> {
		let n = channel.number();
		let scale = self.scpi.query_f64(&format!(":CHANnel{}:SCALe", n))?;
		let offset = self.scpi.query_f64(&format!(":CHANnel{}:OFFSet", n))?;
		check_level(level, scale, offset)?;
		self.scpi.write(&format!("{} {},{}", LEVEL, channel.command_token(), crate::scpi::format_f64(level)))
	}

	pub fn level(&mut self, channel:Source) -> Result<f64> {
		let cmd = format!("{}? {}", LEVEL, channel.command_token());
		let reply = self.scpi.ask(&cmd)?;
		parse_f64(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pattern_pairs() {
		assert_eq!(parse_pair("q", "H,R").unwrap(), (PatternCode::High, PatternCode::Rising));
		assert!(parse_pair("q", "H").is_err());
		assert!(parse_pair("q", "H,L,X").is_err());
		assert!(parse_pair("q", "H,Q").is_err());
	}
}
