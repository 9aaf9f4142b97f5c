use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::EdgeSlope;
use super::check_source_level;

const SOURCE:&str = ":TRIGger:EDGe:SOURce";
const SLOPE:&str  = ":TRIGger:EDGe:SLOPe";
const LEVEL:&str  = ":TRIGger:EDGe:LEVel";

mnemonic! {
	pub enum EdgeSource {
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
		External => ("EXT", "EXT", "external"),
		AcLine   => ("ACLine", "ACL", "AC line"),
	}
}

pub struct Edge<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Edge<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:EdgeSource) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<EdgeSource>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_slope(&mut self, slope:EdgeSlope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<EdgeSlope>               { self.scpi.query_mnemonic(SLOPE) }

	/// Only a channel source has a level. EXT and AC line sources are rejected.
	pub fn set_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(LEVEL, level)
	}

	pub fn level(&mut self) -> Result<f64> { self.scpi.query_f64(LEVEL) }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::error::Error;
	use crate::transport::MockTransport;

	fn scpi(mock:&MockTransport) -> Scpi { Scpi::new(Box::new(mock.clone()), Config::default()) }

	#[test]
	fn level_is_checked_against_the_source_channel() {
		let mock = MockTransport::new();
		mock.reply(SOURCE, "CHAN2").reply(":CHANnel2:SCALe", "1.000000e-01").reply(":CHANnel2:OFFSet", "0.000000e+00");
		let mut scpi = scpi(&mock);

		Edge::new(&mut scpi).set_level(0.4).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:EDGe:LEVel 0.4"));

		mock.clear_sent();
		assert!(matches!(Edge::new(&mut scpi).set_level(0.6), Err(Error::OutOfRange{ .. })));
		assert!(!mock.sent().iter().any(|c| c.starts_with(LEVEL)));
	}

	#[test]
	fn external_source_has_no_level() {
		let mock = MockTransport::new();
		mock.reply(SOURCE, "EXT");
		let mut scpi = scpi(&mock);
		assert!(matches!(Edge::new(&mut scpi).set_level(0.1), Err(Error::InvalidState(_))));
	}
}
