use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::{EdgeSlope, Source};
use super::set_time;

const SOURCE:&str   = ":TRIGger:WINDows:SOURce";
const SLOPE:&str    = ":TRIGger:WINDows:SLOPe";
const POSITION:&str = ":TRIGger:WINDows:POSition";
const TIME:&str     = ":TRIGger:WINDows:TIMe";

pub const MIN_TIME:f64 = 16e-9;
pub const MAX_TIME:f64 = 4.0;

mnemonic! {
	pub enum WindowPosition {
		Exit  => ("EXIT", "EXIT", "exiting the window"),
		Enter => ("ENTER", "ENTER", "entering the window"),
		Time  => ("TIMe", "TIM", "inside for a time"),
	}
}

pub struct Window<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Window<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_slope(&mut self, slope:EdgeSlope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<EdgeSlope>               { self.scpi.query_mnemonic(SLOPE) }

	pub fn set_position(&mut self, p:WindowPosition) -> Result<()> { self.scpi.set_mnemonic(POSITION, p) }
	pub fn position(&mut self) -> Result<WindowPosition>           { self.scpi.query_mnemonic(POSITION) }

	/// Time the signal must stay inside the window when the position is [`WindowPosition::Time`].
	pub fn set_time(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TIME, "window time", time, MIN_TIME, MAX_TIME) }
	pub fn time(&mut self) -> Result<f64>              { self.scpi.query_f64(TIME) }

}
