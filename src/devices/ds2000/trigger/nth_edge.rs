use crate::error::Result;
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

use super::super::common::{Slope, Source};
use super::{check_source_level, set_time};

const SOURCE:&str = ":TRIGger:NEDGe:SOURce";
const SLOPE:&str  = ":TRIGger:NEDGe:SLOPe";
const IDLE:&str   = ":TRIGger:NEDGe:IDLE";
const EDGE:&str   = ":TRIGger:NEDGe:EDGE";
const LEVEL:&str  = ":TRIGger:NEDGe:LEVel";

pub const MIN_IDLE:f64 = 16e-9;
pub const MAX_IDLE:f64 = 4.0;
pub const MAX_EDGES:i64 = 65535;

/// Triggers on the Nth edge after an idle period.
pub struct NthEdge<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> NthEdge<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_slope(&mut self, slope:Slope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<Slope>               { self.scpi.query_mnemonic(SLOPE) }

	pub fn set_idle(&mut self, time:f64) -> Result<()> { set_time(self.scpi, IDLE, "idle time", time, MIN_IDLE, MAX_IDLE) }
	pub fn idle(&mut self) -> Result<f64>              { self.scpi.query_f64(IDLE) }

	pub fn set_edge(&mut self, count:u32) -> Result<()> {
		check_range_i64("edge", count as i64, 1, MAX_EDGES)?;
		self.scpi.set_i64(EDGE, count as i64)
	}

	pub fn edge(&mut self) -> Result<u32> { self.scpi.query_int(EDGE) }

	pub fn set_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(LEVEL, level)
	}

	pub fn level(&mut self) -> Result<f64> { self.scpi.query_f64(LEVEL) }

}
