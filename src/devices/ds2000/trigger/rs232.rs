use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

use super::super::common::{Parity, Source};
use super::check_source_level;

const SOURCE:&str    = ":TRIGger:RS232:SOURce";
const WHEN:&str      = ":TRIGger:RS232:WHEN";
const PARITY:&str    = ":TRIGger:RS232:PARity";
const STOP:&str      = ":TRIGger:RS232:STOP";
const DATA:&str      = ":TRIGger:RS232:DATA";
const WIDTH:&str     = ":TRIGger:RS232:WIDTh";
const BAUD:&str      = ":TRIGger:RS232:BAUD";
const USER_BAUD:&str = ":TRIGger:RS232:BUSer";
const LEVEL:&str     = ":TRIGger:RS232:LEVel";

pub const PRESET_BAUDS:[u32; 11] = [2400, 4800, 9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600, 1_000_000];
pub const MAX_USER_BAUD:u32 = 900_000;

mnemonic! {
	pub enum Rs232When {
		Start       => ("STARt", "STAR", "start frame"),
		Error       => ("ERRor", "ERR", "error frame"),
		ParityError => ("PARity", "PAR", "check error"),
		Data        => ("DATA", "DATA", "data"),
	}
}

/// Baud rate of the RS232 trigger. The instrument keeps preset rates and a user rate apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Baud {
	Preset(u32),
	User(u32),
}

impl Baud {
	pub fn rate(self) -> u32 { match self { Baud::Preset(r) | Baud::User(r) => r } }
}

pub struct Rs232<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Rs232<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_when(&mut self, when:Rs232When) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<Rs232When>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_parity(&mut self, p:Parity) -> Result<()> { self.scpi.set_mnemonic(PARITY, p) }
	pub fn parity(&mut self) -> Result<Parity>           { self.scpi.query_mnemonic(PARITY) }

	pub fn set_stop_bits(&mut self, bits:u8) -> Result<()> {
		check_range_i64("stop bits", bits as i64, 1, 2)?;
		self.scpi.set_i64(STOP, bits as i64)
	}

	pub fn stop_bits(&mut self) -> Result<u8> { self.scpi.query_int_in(STOP, 1, 2) }

	pub fn set_width(&mut self, bits:u8) -> Result<()> {
		check_range_i64("width", bits as i64, 5, 8)?;
		self.scpi.set_i64(WIDTH, bits as i64)
	}

	pub fn width(&mut self) -> Result<u8> { self.scpi.query_int_in(WIDTH, 5, 8) }

	/// Data value for the DATA condition. It must fit in the current data width.
	pub fn set_data(&mut self, value:u32) -> Result<()> {
		let width = self.width()?;
		check_range_i64("data", value as i64, 0, (1i64 << width) - 1)?;
		self.scpi.set_i64(DATA, value as i64)
	}

	pub fn data(&mut self) -> Result<u32> { self.scpi.query_int(DATA) }

	/// Preset rates go to `BAUD`. Anything else is a user rate of at most 900 kbaud.
	pub fn set_baud(&mut self, rate:u32) -> Result<()> {
		if PRESET_BAUDS.contains(&rate) {
			return self.scpi.set_i64(BAUD, rate as i64);
		}
		check_range_i64("baud", rate as i64, 1, MAX_USER_BAUD as i64)?;
		self.scpi.set_i64(USER_BAUD, rate as i64)
	}

	pub fn baud(&mut self) -> Result<Baud> {
		let reply = self.scpi.query_str(BAUD)?;
		if reply.trim().eq_ignore_ascii_case("USER") {
			return self.scpi.query_int(USER_BAUD).map(Baud::User);
		}
		crate::scpi::parse_i64(&reply)
			.map(|r| Baud::Preset(r as u32))
			.ok_or_else(|| Error::unexpected(":TRIGger:RS232:BAUD?", &reply))
	}

	pub fn set_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, SOURCE, level)?;
		self.scpi.set_f64(LEVEL, level)
	}

	pub fn level(&mut self) -> Result<f64> { self.scpi.query_f64(LEVEL) }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	#[test]
	fn data_must_fit_width() {
		let mock = MockTransport::new();
		mock.reply(WIDTH, "7");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(Rs232::new(&mut scpi).set_data(128).is_err());
		Rs232::new(&mut scpi).set_data(127).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:RS232:DATA 127"));
	}

	#[test]
	fn out_of_range_width_reply_is_an_error() {
		let mock = MockTransport::new();
		mock.reply(WIDTH, "64").reply(STOP, "300");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(matches!(Rs232::new(&mut scpi).set_data(1), Err(Error::UnexpectedReply{ .. })));
		assert!(matches!(Rs232::new(&mut scpi).stop_bits(), Err(Error::UnexpectedReply{ .. })));
		assert_eq!(mock.sent(), vec![":TRIGger:RS232:WIDTh?", ":TRIGger:RS232:STOP?"]);
	}

	#[test]
	fn preset_and_user_baud() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		Rs232::new(&mut scpi).set_baud(9600).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:RS232:BAUD 9600"));
		assert_eq!(Rs232::new(&mut scpi).baud().unwrap(), Baud::Preset(9600));

		Rs232::new(&mut scpi).set_baud(250_000).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:RS232:BUSer 250000"));
		assert!(Rs232::new(&mut scpi).set_baud(950_000).is_err());

		mock.reply(BAUD, "USER");
		assert_eq!(Rs232::new(&mut scpi).baud().unwrap(), Baud::User(250_000));
	}
}
