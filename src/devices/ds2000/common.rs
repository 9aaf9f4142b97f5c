//! Vocabulary shared by several subsystems.

use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::check_level;

mnemonic! {
	/// An analog input used as a trigger, cursor or math source.
	pub enum Source {
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
	}
}

impl Source {
	pub fn from_number(n:u8) -> Result<Self> {
		match n {
			1 => Ok(Source::Channel1),
			2 => Ok(Source::Channel2),
			_ => Err(Error::InvalidChannel(n)),
		}
	}

	pub fn number(self) -> u8 { match self { Source::Channel1 => 1, Source::Channel2 => 2 } }
}

mnemonic! {
	pub enum Slope {
		Positive => ("POSitive", "POS", "positive"),
		Negative => ("NEGative", "NEG", "negative"),
	}
}

/// Runt and video triggers describe pulse polarity with the same tokens as an edge slope.
pub type Polarity = Slope;

mnemonic! {
	/// Edge direction for triggers that also accept either edge.
	pub enum EdgeSlope {
		Positive => ("POSitive", "POS", "rising"),
		Negative => ("NEGative", "NEG", "falling"),
		Either   => ("RFALl", "RFAL", "rising or falling"),
	}
}

mnemonic! {
	pub enum Parity {
		Even => ("EVEN", "EVEN", "even"),
		Odd  => ("ODD", "ODD", "odd"),
		None => ("NONE", "NONE", "none"),
	}
}

/// Channel number named by a source reply such as `CHAN1`, `CHANnel2` or `CH1`. Anything else is not a channel.
pub fn channel_of(reply:&str) -> Option<u8> {
	let reply = reply.trim().to_ascii_uppercase();
	let digits = reply.strip_prefix("CHANNEL")
		.or_else(|| reply.strip_prefix("CHAN"))
		.or_else(|| reply.strip_prefix("CH"))?;
	match digits {
		"1" => Some(1),
		"2" => Some(2),
		_ => None,
	}
}

/// Checks a level or threshold against the channel named by the `source_path` query.
pub(crate) fn check_source_level(scpi:&mut Scpi, source_path:&str, level:f64) -> Result<()> {
	let source = scpi.query_str(source_path)?;
	let n = channel_of(&source)
		.ok_or_else(|| Error::state(format!("a level needs channel 1 or 2 as its source, {} is {}", source_path, source)))?;
	let scale = scpi.query_f64(&format!(":CHANnel{}:SCALe", n))?;
	let offset = scpi.query_f64(&format!(":CHANnel{}:OFFSet", n))?;
	check_level(level, scale, offset)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scpi::Mnemonic;

	#[test]
	fn channel_replies() {
		assert_eq!(channel_of("CHAN1"), Some(1));
		assert_eq!(channel_of("CHANnel2"), Some(2));
		assert_eq!(channel_of("CH2\n"), Some(2));
		assert_eq!(channel_of("EXT"), None);
		assert_eq!(channel_of("ACL"), None);
		assert_eq!(channel_of("CHAN3"), None);
	}

	#[test]
	fn sources_by_number() {
		assert_eq!(Source::from_number(2).unwrap(), Source::Channel2);
		assert!(matches!(Source::from_number(3), Err(Error::InvalidChannel(3))));
		assert_eq!(Source::from_reply("CHAN1").map(Source::number), Some(1));
	}

	#[test]
	fn either_edge_token() {
		assert_eq!(EdgeSlope::Either.command_token(), "RFALl");
		assert_eq!(EdgeSlope::from_reply("RFAL"), Some(EdgeSlope::Either));
	}
}
