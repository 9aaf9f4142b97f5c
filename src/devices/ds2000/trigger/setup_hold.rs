use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::{Slope, Source};
use super::set_time;

const DATA_SOURCE:&str  = ":TRIGger:SHOLd:DSrc";
const CLOCK_SOURCE:&str = ":TRIGger:SHOLd:CSrc";
const SLOPE:&str        = ":TRIGger:SHOLd:SLOPe";
const PATTERN:&str      = ":TRIGger:SHOLd:PATTern";
const TYPE:&str         = ":TRIGger:SHOLd:TYPe";
const SETUP_TIME:&str   = ":TRIGger:SHOLd:STIMe";
const HOLD_TIME:&str    = ":TRIGger:SHOLd:HTIMe";

pub const MIN_TIME:f64 = 2e-9;
pub const MAX_TIME:f64 = 1.0;

mnemonic! {
	pub enum DataLevel {
		High => ("H", "H", "high"),
		Low  => ("L", "L", "low"),
	}
}

mnemonic! {
	pub enum SetupHoldType {
		Setup        => ("SETup", "SET", "setup"),
		Hold         => ("HOLd", "HOL", "hold"),
		SetupAndHold => ("SETHOLd", "SETHOL", "setup and hold"),
	}
}

pub struct SetupHold<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> SetupHold<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_data_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(DATA_SOURCE, source) }
	pub fn data_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(DATA_SOURCE) }

	pub fn set_clock_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(CLOCK_SOURCE, source) }
	pub fn clock_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(CLOCK_SOURCE) }

	/// Clock edge the data is sampled on.
	pub fn set_slope(&mut self, slope:Slope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<Slope>               { self.scpi.query_mnemonic(SLOPE) }

	pub fn set_pattern(&mut self, level:DataLevel) -> Result<()> { self.scpi.set_mnemonic(PATTERN, level) }
	pub fn pattern(&mut self) -> Result<DataLevel>               { self.scpi.query_mnemonic(PATTERN) }

	pub fn set_hold_type(&mut self, t:SetupHoldType) -> Result<()> { self.scpi.set_mnemonic(TYPE, t) }
	pub fn hold_type(&mut self) -> Result<SetupHoldType>           { self.scpi.query_mnemonic(TYPE) }

	pub fn set_setup_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, SETUP_TIME, "setup time", time, MIN_TIME, MAX_TIME) }
	pub fn setup_time(&mut self) -> Result<f64>              { self.scpi.query_f64(SETUP_TIME) }

	pub fn set_hold_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, HOLD_TIME, "hold time", time, MIN_TIME, MAX_TIME) }
	pub fn hold_time(&mut self) -> Result<f64>              { self.scpi.query_f64(HOLD_TIME) }

}
