use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::{check_in_set, check_range_i64};

use super::super::common::Source;
use super::check_source_level;

const SCL:&str        = ":TRIGger:IIC:SCL";
const SDA:&str        = ":TRIGger:IIC:SDA";
const WHEN:&str       = ":TRIGger:IIC:WHEN";
const DIRECTION:&str  = ":TRIGger:IIC:DIRection";
const AWIDTH:&str     = ":TRIGger:IIC:AWIDth";
const ADDRESS:&str    = ":TRIGger:IIC:ADDRess";
const DATA:&str       = ":TRIGger:IIC:DATA";
const CLOCK_LEVEL:&str = ":TRIGger:IIC:CLEVel";
const DATA_LEVEL:&str = ":TRIGger:IIC:DLEVel";

pub const ADDRESS_WIDTHS:[f64; 3] = [7.0, 8.0, 10.0];
/// Up to five data bytes.
pub const MAX_DATA:i64 = (1 << 40) - 1;

mnemonic! {
	pub enum I2cWhen {
		Start       => ("STARt", "STAR", "start"),
		Restart     => ("RESTart", "REST", "restart"),
		Stop        => ("STOP", "STOP", "stop"),
		Nack        => ("NACKnowledge", "NACK", "missing acknowledge"),
		Address     => ("ADDRess", "ADDR", "address"),
		Data        => ("DATA", "DATA", "data"),
		AddressData => ("ADATa", "ADAT", "address and data"),
	}
}

mnemonic! {
	pub enum I2cDirection {
		Read      => ("READ", "READ", "read"),
		Write     => ("WRITe", "WRIT", "write"),
		ReadWrite => ("RWRite", "RWR", "read or write"),
	}
}

pub struct I2c<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> I2c<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_clock_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SCL, source) }
	pub fn clock_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SCL) }

	pub fn set_data_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SDA, source) }
	pub fn data_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SDA) }

	pub fn set_when(&mut self, when:I2cWhen) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<I2cWhen>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_direction(&mut self, d:I2cDirection) -> Result<()> { self.scpi.set_mnemonic(DIRECTION, d) }
	pub fn direction(&mut self) -> Result<I2cDirection>           { self.scpi.query_mnemonic(DIRECTION) }

	pub fn set_address_width(&mut self, bits:u8) -> Result<()> {
		check_in_set("address width", bits as f64, &ADDRESS_WIDTHS, "")?;
		self.scpi.set_i64(AWIDTH, bits as i64)
	}

	pub fn address_width(&mut self) -> Result<u8> {
		let bits:u8 = self.scpi.query_int_in(AWIDTH, 7, 10)?;
		if !ADDRESS_WIDTHS.contains(&(bits as f64)) {
			return Err(Error::unexpected(":TRIGger:IIC:AWIDth?", &bits.to_string()));
		}
		Ok(bits)
	}

	pub fn set_address(&mut self, address:u16) -> Result<()> {
		let width = self.address_width()?;
		check_range_i64("address", address as i64, 0, (1i64 << width) - 1)?;
		self.scpi.set_i64(ADDRESS, address as i64)
	}

	pub fn address(&mut self) -> Result<u16> { self.scpi.query_int(ADDRESS) }

	pub fn set_data(&mut self, data:u64) -> Result<()> {
		check_range_i64("data", data.min(i64::MAX as u64) as i64, 0, MAX_DATA)?;
		self.scpi.set_i64(DATA, data as i64)
	}

	pub fn data(&mut self) -> Result<u64> { self.scpi.query_int(DATA) }

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
	use crate::transport::MockTransport;

	#[test]
	fn address_follows_width() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(I2c::new(&mut scpi).set_address_width(9).is_err());
		I2c::new(&mut scpi).set_address_width(7).unwrap();
		assert!(I2c::new(&mut scpi).set_address(0x80).is_err());
		I2c::new(&mut scpi).set_address(0x7f).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:IIC:ADDRess 127"));
	}

	#[test]
	fn data_spans_five_bytes() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		I2c::new(&mut scpi).set_data(0xff_ffff_ffff).unwrap();
		assert!(I2c::new(&mut scpi).set_data(1 << 40).is_err());
	}

	#[test]
	fn odd_address_width_reply_is_an_error() {
		let mock = MockTransport::new();
		mock.reply(AWIDTH, "64");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(matches!(I2c::new(&mut scpi).set_address(1), Err(Error::UnexpectedReply{ .. })));
		mock.reply(AWIDTH, "9");
		assert!(matches!(I2c::new(&mut scpi).address_width(), Err(Error::UnexpectedReply{ .. })));
		assert!(mock.sent().iter().all(|c| c.contains('?')));
	}
}
