use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::{EdgeSlope, Source};
use super::set_time;

const SOURCE:&str = ":TRIGger:TIMeout:SOURce";
const SLOPE:&str  = ":TRIGger:TIMeout:SLOPe";
const TIME:&str   = ":TRIGger:TIMeout:TIMe";

pub const MIN_TIME:f64 = 16e-9;
pub const MAX_TIME:f64 = 4.0;

/// Triggers when the signal stays away from an edge for longer than the timeout.
pub struct Timeout<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Timeout<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_slope(&mut self, slope:EdgeSlope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<EdgeSlope>               { self.scpi.query_mnemonic(SLOPE) }

	pub fn set_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TIME, "timeout", time, MIN_TIME, MAX_TIME) }
	pub fn time(&mut self) -> Result<f64>              { self.scpi.query_f64(TIME) }

}
