use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::Source;
use super::{check_source_level, set_time, PolarWhen};

const SOURCE:&str = ":TRIGger:SLOPe:SOURce";
const WHEN:&str   = ":TRIGger:SLOPe:WHEN";
const TUPPER:&str = ":TRIGger:SLOPe:TUPPer";
const TLOWER:&str = ":TRIGger:SLOPe:TLOWer";
const WINDOW:&str = ":TRIGger:SLOPe:WINDow";
const ALEVEL:&str = ":TRIGger:SLOPe:ALEVel";
const BLEVEL:&str = ":TRIGger:SLOPe:BLEVel";

pub const MIN_TIME:f64 = 10e-9;
pub const MAX_UPPER_TIME:f64 = 2.0;
pub const MAX_LOWER_TIME:f64 = 1.0;

mnemonic! {
	/// Which level the slope trigger adjusts from the front panel.
	pub enum SlopeWindow {
		Upper => ("TA", "TA", "upper level"),
		Lower => ("TB", "TB", "lower level"),
		Both  => ("TAB", "TAB", "both levels"),
	}
}

/// Slope trigger: the time a signal takes to travel between two levels.
pub struct SlopeTrigger<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> SlopeTrigger<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_when(&mut self, when:PolarWhen) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<PolarWhen>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_upper_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TUPPER, "upper time", time, MIN_TIME, MAX_UPPER_TIME) }
	pub fn upper_time(&mut self) -> Result<f64>              { self.scpi.query_f64(TUPPER) }

	pub fn set_lower_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TLOWER, "lower time", time, MIN_TIME, MAX_LOWER_TIME) }
	pub fn lower_time(&mut self) -> Result<f64>              { self.scpi.query_f64(TLOWER) }

	pub fn set_window(&mut self, w:SlopeWindow) -> Result<()> { self.scpi.set_mnemonic(WINDOW, w) }
	pub fn window(&mut self) -> Result<SlopeWindow>           { self.scpi.query_mnemonic(WINDOW) }

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
