use crate::error::Result;
use crate::scpi::Scpi;

use super::super::common::Source;
use super::check_source_level;

const DPLUS:&str       = ":TRIGger:USB:DPLus";
const DMINUS:&str      = ":TRIGger:USB:DMINus";
const WHEN:&str        = ":TRIGger:USB:WHEN";
const SPEED:&str       = ":TRIGger:USB:SPEed";
const PLUS_LEVEL:&str  = ":TRIGger:USB:PLEVel";
const MINUS_LEVEL:&str = ":TRIGger:USB:MLEVel";

mnemonic! {
	pub enum UsbWhen {
		StartOfPacket => ("SOP", "SOP", "start of packet"),
		EndOfPacket   => ("EOP", "EOP", "end of packet"),
		ResetComplete => ("RC", "RC", "reset complete"),
		Suspend       => ("SUSPend", "SUSP", "enter suspend"),
		ExitSuspend   => ("EXITsuspend", "EXIT", "exit suspend"),
	}
}

mnemonic! {
	pub enum UsbSpeed {
		Full => ("FULL", "FULL", "full speed"),
		Low  => ("LOW", "LOW", "low speed"),
	}
}

pub struct Usb<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Usb<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_plus_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(DPLUS, source) }
	pub fn plus_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(DPLUS) }

	pub fn set_minus_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(DMINUS, source) }
	pub fn minus_source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(DMINUS) }

	pub fn set_when(&mut self, when:UsbWhen) -> Result<()> { self.scpi.set_mnemonic(WHEN, when) }
	pub fn when(&mut self) -> Result<UsbWhen>              { self.scpi.query_mnemonic(WHEN) }

	pub fn set_speed(&mut self, speed:UsbSpeed) -> Result<()> { self.scpi.set_mnemonic(SPEED, speed) }
	pub fn speed(&mut self) -> Result<UsbSpeed>               { self.scpi.query_mnemonic(SPEED) }

	/// Level on the D+ line, checked against the channel carrying D+.
	pub fn set_plus_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, DPLUS, level)?;
		self.scpi.set_f64(PLUS_LEVEL, level)
	}

	pub fn plus_level(&mut self) -> Result<f64> { self.scpi.query_f64(PLUS_LEVEL) }

	pub fn set_minus_level(&mut self, level:f64) -> Result<()> {
		check_source_level(self.scpi, DMINUS, level)?;
		self.scpi.set_f64(MINUS_LEVEL, level)
	}

	pub fn minus_level(&mut self) -> Result<f64> { self.scpi.query_f64(MINUS_LEVEL) }

}
