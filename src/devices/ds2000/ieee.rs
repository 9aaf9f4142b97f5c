//! IEEE 488.2 common commands.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::Scpi;

lazy_static! {
	static ref IDN_RE: Regex = Regex::new(r"([^,]+),([^,]+),([^,]+),([^,\s]+)").unwrap();
}

/// Reply of `*IDN?`, e.g. `RIGOL TECHNOLOGIES,DS2202,DS2A0000000001,00.02.01.00.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub manufacturer: String,
	pub model: String,
	pub serial_num: String,
	pub fw_version: String,
}

impl Identity {
	pub fn parse(reply:&str) -> Result<Self> {
		let caps:Captures = IDN_RE.captures(reply).ok_or_else(|| Error::unexpected("*IDN?", reply))?;
		let field = |i:usize| caps.get(i).map(|m| m.as_str().trim().to_owned()).unwrap_or_default();
		Ok(Self{ manufacturer: field(1), model: field(2), serial_num: field(3), fw_version: field(4) })
	}

	/// DS2000 and MSO2000 models share one command set.
	pub fn is_ds2000(&self) -> bool {
		let model = self.model.to_ascii_uppercase();
		model.contains("DS2") || model.contains("MSO2")
	}
}

pub struct Ieee<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Ieee<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn idn(&mut self) -> Result<Identity> {
		let reply = self.scpi.ask("*IDN?")?;
		Identity::parse(&reply)
	}

	/// Restores the factory defaults.
	pub fn rst(&mut self) -> Result<()> { self.scpi.write("*RST") }

	/// Clears the event registers and the error queue.
	pub fn cls(&mut self) -> Result<()> { self.scpi.write("*CLS") }

	// Register masks are 0..=255, so u8 leaves nothing to check
	pub fn set_ese(&mut self, mask:u8) -> Result<()> { self.scpi.set_i64("*ESE", mask as i64) }
	pub fn ese(&mut self) -> Result<u8>              { self.scpi.query_int("*ESE") }

	/// Reads and clears the standard event register.
	pub fn esr(&mut self) -> Result<u8> { self.scpi.query_int("*ESR") }

	/// Sets the operation complete bit once pending operations finish.
	pub fn set_opc(&mut self) -> Result<()> { self.scpi.write("*OPC") }
	pub fn opc(&mut self) -> Result<bool>   { self.scpi.query_bool("*OPC") }

	pub fn set_sre(&mut self, mask:u8) -> Result<()> { self.scpi.set_i64("*SRE", mask as i64) }
	pub fn sre(&mut self) -> Result<u8>              { self.scpi.query_int("*SRE") }

	pub fn stb(&mut self) -> Result<u8> { self.scpi.query_int("*STB") }

	/// Self-test result, 0 when every test passed.
	pub fn tst(&mut self) -> Result<i64> { self.scpi.query_i64("*TST") }

	pub fn wai(&mut self) -> Result<()> { self.scpi.write("*WAI") }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	#[test]
	fn identity_fields() {
		let id = Identity::parse("RIGOL TECHNOLOGIES,DS2202,DS2A0000000001,00.02.01.00.00\n").unwrap();
		assert_eq!(id.manufacturer, "RIGOL TECHNOLOGIES");
		assert_eq!(id.model, "DS2202");
		assert_eq!(id.serial_num, "DS2A0000000001");
		assert_eq!(id.fw_version, "00.02.01.00.00");
		assert!(id.is_ds2000());
		assert!(Identity::parse("RIGOL TECHNOLOGIES,MSO2302A,DS2D0000000002,00.03.05").unwrap().is_ds2000());
		assert!(!Identity::parse("RIGOL TECHNOLOGIES,DS1054Z,DS1ZA000000001,00.04.04").unwrap().is_ds2000());
		assert!(Identity::parse("no commas here").is_err());
	}

	#[test]
	fn registers() {
		let mock = MockTransport::new();
		mock.reply("*STB", "64").reply("*OPC", "1");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());

		Ieee::new(&mut scpi).set_ese(32).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some("*ESE 32"));
		assert_eq!(Ieee::new(&mut scpi).ese().unwrap(), 32);
		assert_eq!(Ieee::new(&mut scpi).stb().unwrap(), 64);
		assert!(Ieee::new(&mut scpi).opc().unwrap());
	}
}
