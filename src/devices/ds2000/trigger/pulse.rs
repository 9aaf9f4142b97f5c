use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::Source;
use super::{check_source_level, set_time, PolarWhen};

const SOURCE:&str = ":TRIGger:PULSe:SOURce";
const WHEN:&str   = ":TRIGger:PULSe:WHEN";
const UWIDTH:&str = ":TRIGger:PULSe:UWIDth";
const LWIDTH:&str = ":TRIGger:PULSe:LWIDth";
const LEVEL:&str  = ":TRIGger:PULSe:LEVel";

pub const MIN_WIDTH:f64 = 2e-9;
pub const MAX_WIDTH:f64 = 4.0;

/// Pulse width trigger.
pub struct Pulse<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Pulse<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_when(&mut self, when:PolarWhen) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<PolarWhen>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_upper_width(&mut self, width:f64) -> Result<()> { set_time(self.scpi, UWIDTH, "upper width", width, MIN_WIDTH, MAX_WIDTH) }
	pub fn upper_width(&mut self) -> Result<f64>               { self.scpi.query_f64(UWIDTH) }

	pub fn set_lower_width(&mut self, width:f64) -> Result<()> { set_time(self.scpi, LWIDTH, "lower width", width, MIN_WIDTH, MAX_WIDTH) }
	pub fn lower_width(&mut self) -> Result<f64>               { self.scpi.query_f64(LWIDTH) }

	pub fn set_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(LEVEL, level)
	}

	pub fn level(&mut self) -> Result<f64> { self.scpi.query_f64(LEVEL) }

}
