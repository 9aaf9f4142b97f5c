use crate::error::{Error, Result};
use crate::scpi::{Mnemonic, Scpi};

use super::super::common::Source;
use super::pattern::{parse_pair, PatternCode};
use super::{set_time, When};

const SOURCE:&str = ":TRIGger:DURATion:SOURce";
const TYPE:&str   = ":TRIGger:DURATion:TYPe";
const WHEN:&str   = ":TRIGger:DURATion:WHEN";
const TUPPER:&str = ":TRIGger:DURATion:TUPPer";
const TLOWER:&str = ":TRIGger:DURATion:TLOWer";

pub const MIN_TIME:f64 = 2e-9;
pub const MAX_TIME:f64 = 4.0;

/// Triggers when a level pattern holds for a qualified time.
pub struct Duration<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Duration<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	/// Pattern for channel 1 and channel 2. Edges are not allowed here, only `H`, `L` and `X`.
	pub fn set_pattern(&mut self, ch1:PatternCode, ch2:PatternCode) -> Result<()> {
		if ch1.is_edge() || ch2.is_edge() {
			return Err(Error::OutOfRange{ name: "pattern", message: format!("must be H, L or X, got {},{}", ch1.command_token(), ch2.command_token()) });
		}
		self.scpi.write(&format!("{} {},{}", TYPE, ch1.command_token(), ch2.command_token()))
	}

	pub fn pattern(&mut self) -> Result<(PatternCode, PatternCode)> {
		let reply = self.scpi.query_str(TYPE)?;
		parse_pair(":TRIGger:DURATion:TYPe?", &reply)
	}

	pub fn set_when(&mut self, when:When) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<When>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_upper_limit(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TUPPER, "upper limit", time, MIN_TIME, MAX_TIME) }
	pub fn upper_limit(&mut self) -> Result<f64>              { self.scpi.query_f64(TUPPER) }

	pub fn set_lower_limit(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TLOWER, "lower limit", time, MIN_TIME, MAX_TIME) }
	pub fn lower_limit(&mut self) -> Result<f64>              { self.scpi.query_f64(TLOWER) }

}
