use crate::error::Result;
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

use super::super::common::{Slope, Source};
use super::{check_source_level, set_time};

const SCL:&str         = ":TRIGger:SPI:SCL";
const SDA:&str         = ":TRIGger:SPI:SDA";
const SLOPE:&str       = ":TRIGger:SPI:SLOPe";
const WIDTH:&str       = ":TRIGger:SPI:WIDTh";
const DATA:&str        = ":TRIGger:SPI:DATA";
const TIMEOUT:&str     = ":TRIGger:SPI:TIMeout";
const CLOCK_LEVEL:&str = ":TRIGger:SPI:CLEVel";
const DATA_LEVEL:&str  = ":TRIGger:SPI:DLEVel";

pub const MIN_WIDTH:u8 = 4;
pub const MAX_WIDTH:u8 = 32;
pub const MIN_TIMEOUT:f64 = 100e-9;
pub const MAX_TIMEOUT:f64 = 1.0;

/// SPI trigger. A frame starts after the clock has been idle for the timeout.
pub struct Spi<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Spi<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_clock_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SCL, source) }
	pub fn clock_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SCL) }

	pub fn set_data_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SDA, source) }
	pub fn data_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SDA) }

	pub fn set_slope(&mut self, slope:Slope) -> Result<()> { self.scpi.set_mnemonic(SLOPE, slope) }
	pub fn slope(&mut self) -> Result<Slope>               { self.scpi.query_mnemonic(SLOPE) }

	pub fn set_width(&mut self, bits:u8) -> Result<()> {
		check_range_i64("width", bits as i64, MIN_WIDTH as i64, MAX_WIDTH as i64)?;
		self.scpi.set_i64(WIDTH, bits as i64)
	}

	pub fn width(&mut self) -> Result<u8> { self.scpi.query_int_in(WIDTH, MIN_WIDTH as i64, MAX_WIDTH as i64) }

	pub fn set_data(&mut self, value:u32) -> Result<()> {
		let width = self.width()?;
		check_range_i64("data", value as i64, 0, (1i64 << width) - 1)?;
		self.scpi.set_i64(DATA, value as i64)
	}

	pub fn data(&mut self) -> Result<u32> { self.scpi.query_int(DATA) }

	pub fn set_timeout(&mut self, time:f64) -> Result<()> { set_time(self.scpi, TIMEOUT, "timeout", time, MIN_TIMEOUT, MAX_TIMEOUT) }
	pub fn timeout(&mut self) -> Result<f64>              { self.scpi.query_f64(TIMEOUT) }

	pub fn set_clock_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SCL, level)?;
		self.scpi.set_f64(CLOCK_LEVEL, level)
	}

	pub fn clock_level(&mut self) -> Result<f64> { self.scpi.query_f64(CLOCK_LEVEL) }

	pub fn set_data_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SDA, level)?;
		self.scpi.set_f64(DATA_LEVEL, level)
	}

	pub fn data_level(&mut self) -> Result<f64> { self.scpi.query_f64(DATA_LEVEL) }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::error::Error;
	use crate::transport::MockTransport;

	#[test]
	fn data_must_fit_width() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		Spi::new(&mut scpi).set_width(32).unwrap();
		Spi::new(&mut scpi).set_data(u32::MAX).unwrap();
		Spi::new(&mut scpi).set_width(4).unwrap();
		assert!(Spi::new(&mut scpi).set_data(16).is_err());
		assert!(Spi::new(&mut scpi).set_width(33).is_err());
	}

	#[test]
	fn out_of_range_width_reply_is_an_error() {
		let mock = MockTransport::new();
		mock.reply(WIDTH, "64");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(matches!(Spi::new(&mut scpi).set_data(1), Err(Error::UnexpectedReply{ .. })));
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:SPI:WIDTh?"));
	}
}
