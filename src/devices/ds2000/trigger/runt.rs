use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::{Polarity, Source};
use super::{check_source_level, set_time};

const SOURCE:&str   = ":TRIGger:RUNT:SOURce";
const POLARITY:&str = ":TRIGger:RUNT:POLarity";
const WHEN:&str     = ":TRIGger:RUNT:WHEN";
const WLOWER:&str   = ":TRIGger:RUNT:WLOWer";
const WUPPER:&str   = ":TRIGger:RUNT:WUPPer";
const ALEVEL:&str   = ":TRIGger:RUNT:ALEVel";
const BLEVEL:&str   = ":TRIGger:RUNT:BLEVel";

pub const MIN_WIDTH:f64 = 2e-9;
pub const MAX_WIDTH:f64 = 4.0;

mnemonic! {
	/// Width qualifier of a runt pulse. `None` triggers on every runt.
	pub enum RuntWhen {
		None    => ("NONE", "NONE", "any width"),
		Greater => ("GREater", "GRE", "wider than lower limit"),
		Less    => ("LESS", "LESS", "narrower than upper limit"),
		Between => ("GLESs", "GLES", "between limits"),
	}
}

/// Runt trigger: a pulse that crosses one threshold but not the other.
pub struct Runt<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Runt<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_polarity(&mut self, p:Polarity) -> Result<()> { self.scpi.set_mnemonic(POLARITY, p) }
	pub fn polarity(&mut self) -> Result<Polarity>           { self.scpi.query_mnemonic(POLARITY) }

	pub fn set_when(&mut self, when:RuntWhen) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<RuntWhen>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_lower_width(&mut self, width:f64) -> Result<()> { set_time(self.scpi, WLOWER, "lower width", width, MIN_WIDTH, MAX_WIDTH) }
	pub fn lower_width(&mut self) -> Result<f64>               { self.scpi.query_f64(WLOWER) }

	pub fn set_upper_width(&mut self, width:f64) -> Result<()> { set_time(self.scpi, WUPPER, "upper width", width, MIN_WIDTH, MAX_WIDTH) }
	pub fn upper_width(&mut self) -> Result<f64>               { self.scpi.query_f64(WUPPER) }

	pub fn set_upper_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(ALEVEL, level)
	}

	pub fn upper_level(&mut self) -> Result<f64> { self.scpi.query_f64(ALEVEL) }

	pub fn set_lower_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(BLEVEL, level)
	}

	pub fn lower_level(&mut self) -> Result<f64> { self.scpi.query_f64(BLEVEL) }

}
