use crate::error::{Error, Result};
use crate::scpi::{Mnemonic, Scpi};
use crate::validate::check_range;

use super::super::common::{Slope, Source};

const TYPE:&str   = ":TRIGger:DELay:TYPe";
const TUPPER:&str = ":TRIGger:DELay:TUPPer";
const TLOWER:&str = ":TRIGger:DELay:TLOWer";

pub const MAX_UPPER:f64 = 4.0;
pub const MAX_LOWER:f64 = 3.99;
pub const MIN_LOWER:f64 = 2e-9;
/// Smallest upper limit with `LESS`.
pub const MIN_UPPER_LESS:f64 = 2e-9;
/// Smallest upper limit when a lower limit is also in play.
pub const MIN_UPPER_RANGE:f64 = 12e-9;

mnemonic! {
	/// Condition on the time between edge A and edge B.
	pub enum DelayType {
		Greater => ("GREater", "GRE", "greater than lower limit"),
		Less    => ("LESS", "LESS", "less than upper limit"),
		Between => ("GLESs", "GLES", "inside limits"),
		Outside => ("GOUT", "GOUT", "outside limits"),
	}
}

impl DelayType {
	pub fn has_upper(self) -> bool { self != DelayType::Greater }
	pub fn has_lower(self) -> bool { self != DelayType::Less }
}

/// The two edges a delay trigger measures between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayEdge { A, B }

impl DelayEdge {
	fn letter(self) -> &'static str { match self { DelayEdge::A => "A", DelayEdge::B => "B" } }
}

pub struct Delay<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Delay<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, edge:DelayEdge, source:Source) -> Result<()> {
		self.scpi.set_mnemonic(&format!(":TRIGger:DELay:S{}", edge.letter()), source)
	}

	pub fn source(&mut self, edge:DelayEdge) -> Result<Source> {
		self.scpi.query_mnemonic(&format!(":TRIGger:DELay:S{}", edge.letter()))
	}

	pub fn set_slope(&mut self, edge:DelayEdge, slope:Slope) -> Result<()> {
		self.scpi.set_mnemonic(&format!(":TRIGger:DELay:SLOP{}", edge.letter()), slope)
	}

	pub fn slope(&mut self, edge:DelayEdge) -> Result<Slope> {
		self.scpi.query_mnemonic(&format!(":TRIGger:DELay:SLOP{}", edge.letter()))
	}

	pub fn set_delay_type(&mut self, t:DelayType) -> Result<()> { self.scpi.set_mnemonic(TYPE, t) }
	pub fn delay_type(&mut self) -> Result<DelayType>           { self.scpi.query_mnemonic(TYPE) }

	pub fn set_upper_limit(&mut self, time:f64) -> Result<()> {
		let t = self.delay_type()?;
		if !t.has_upper() {
			return Err(Error::state(format!("the delay upper limit is not used with type {}", t.command_token())));
		}
		let min = if t == DelayType::Less { MIN_UPPER_LESS } else { MIN_UPPER_RANGE };
		check_range("upper limit", time, min, MAX_UPPER, "s")?;
		self.scpi.set_f64(TUPPER, time)
	}

	pub fn upper_limit(&mut self) -> Result<f64> { self.scpi.query_f64(TUPPER) }

	pub fn set_lower_limit(&mut self, time:f64) -> Result<()> {
		let t = self.delay_type()?;
		if !t.has_lower() {
			return Err(Error::state(format!("the delay lower limit is not used with type {}", t.command_token())));
		}
		check_range("lower limit", time, MIN_LOWER, MAX_LOWER, "s")?;
		self.scpi.set_f64(TLOWER, time)
	}

	pub fn lower_limit(&mut self) -> Result<f64> { self.scpi.query_f64(TLOWER) }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	fn delay_with(mock:&MockTransport, t:&str) -> Scpi {
		mock.reply(TYPE, t);
		Scpi::new(Box::new(mock.clone()), Config::default())
	}

	#[test]
	fn upper_limit_depends_on_type() {
		let mock = MockTransport::new();
		let mut scpi = delay_with(&mock, "GRE");
		assert!(matches!(Delay::new(&mut scpi).set_upper_limit(1e-6), Err(Error::InvalidState(_))));

		let mut scpi = delay_with(&mock, "LESS");
		Delay::new(&mut scpi).set_upper_limit(5e-9).unwrap();

		let mut scpi = delay_with(&mock, "GOUT");
		assert!(matches!(Delay::new(&mut scpi).set_upper_limit(5e-9), Err(Error::OutOfRange{ .. })));
		Delay::new(&mut scpi).set_upper_limit(12e-9).unwrap();
	}

	#[test]
	fn lower_limit_is_refused_for_less() {
		let mock = MockTransport::new();
		let mut scpi = delay_with(&mock, "LESS");
		assert!(matches!(Delay::new(&mut scpi).set_lower_limit(1e-6), Err(Error::InvalidState(_))));

		let mut scpi = delay_with(&mock, "GLES");
		assert!(Delay::new(&mut scpi).set_lower_limit(4.0).is_err());
		Delay::new(&mut scpi).set_lower_limit(3.99).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:DELay:TLOWer 3.99"));
	}

	#[test]
	fn edges_are_addressed_by_letter() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		Delay::new(&mut scpi).set_source(DelayEdge::B, Source::Channel2).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:DELay:SB CHANnel2"));
		assert_eq!(Delay::new(&mut scpi).source(DelayEdge::B).unwrap(), Source::Channel2);
	}
}
