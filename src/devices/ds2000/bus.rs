//! `:BUS<n>` protocol decoding. Two decoders run side by side, each set to one protocol at a time.

use crate::error::{Error, Result};
use crate::scpi::{parse_f64, Mnemonic, Scpi};
use crate::validate::{check_level, check_range_i64};

use super::common::{check_source_level, Parity, Source};
use super::trigger::rs232::{Baud, PRESET_BAUDS};

/// Vertical position of the decoded bus, in screen rows from the center.
pub const MIN_OFFSET:i64 = -166;
pub const MAX_OFFSET:i64 = 148;
pub const MAX_PARALLEL_BITS:usize = 20;
pub const MIN_USER_BAUD:u32 = 50;
pub const MAX_USER_BAUD:u32 = 1_000_000;

mnemonic! {
	pub enum BusMode {
		Parallel => ("PARallel", "PAR", "parallel"),
		Rs232    => ("RS232", "RS232", "RS232"),
		I2c      => ("IIC", "IIC", "I2C"),
		Spi      => ("SPI", "SPI", "SPI"),
	}
}

mnemonic! {
	pub enum BusFormat {
		Hex     => ("HEX", "HEX", "hexadecimal"),
		Decimal => ("DEC", "DEC", "decimal"),
		Binary  => ("BIN", "BIN", "binary"),
		Ascii   => ("ASCii", "ASC", "ASCII"),
	}
}

mnemonic! {
	pub enum ClockSource {
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
		Off      => ("OFF", "OFF", "off"),
	}
}

mnemonic! {
	pub enum ClockSlope {
		Positive => ("POSitive", "POS", "rising"),
		Negative => ("NEGative", "NEG", "falling"),
		Both     => ("BOTH", "BOTH", "both edges"),
	}
}

mnemonic! {
	pub enum LinePolarity {
		Positive => ("POSitive", "POS", "positive"),
		Negative => ("NEGative", "NEG", "negative"),
	}
}

mnemonic! {
	pub enum Endian {
		Msb => ("MSB", "MSB", "MSB first"),
		Lsb => ("LSB", "LSB", "LSB first"),
	}
}

mnemonic! {
	pub enum StopBits {
		One     => ("1", "1", "1"),
		OneHalf => ("1.5", "1.5", "1.5"),
		Two     => ("2", "2", "2"),
	}
}

mnemonic! {
	pub enum PacketEnd {
		Null     => ("NULL", "NULL", "NUL"),
		LineFeed => ("LF", "LF", "line feed"),
		Return   => ("CR", "CR", "carriage return"),
		Space    => ("SP", "SP", "space"),
		FormFeed => ("FF", "FF", "form feed"),
	}
}

mnemonic! {
	pub enum DataPolarity {
		High => ("HIGH", "HIGH", "active high"),
		Low  => ("LOW", "LOW", "active low"),
	}
}

pub struct Bus<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> Bus<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi, n:u8) -> Result<Self> {
		if n != 1 && n != 2 { return Err(Error::InvalidBus(n)); }
		Ok(Self{ scpi, n })
	}

	pub fn number(&self) -> u8 { self.n }

	fn path(&self, leaf:&str) -> String { format!(":BUS{}:{}", self.n, leaf) }

	pub fn set_mode(&mut self, mode:BusMode) -> Result<()> { let p = self.path("MODE"); self.scpi.set_mnemonic(&p, mode) }
	pub fn mode(&mut self) -> Result<BusMode>              { let p = self.path("MODE"); self.scpi.query_mnemonic(&p) }

	pub fn set_format(&mut self, f:BusFormat) -> Result<()> { let p = self.path("FORMat"); self.scpi.set_mnemonic(&p, f) }
	pub fn format(&mut self) -> Result<BusFormat>           { let p = self.path("FORMat"); self.scpi.query_mnemonic(&p) }

	pub fn set_display(&mut self, on:bool) -> Result<()> { let p = self.path("DISPlay"); self.scpi.set_bool(&p, on) }
	pub fn display(&mut self) -> Result<bool>           { let p = self.path("DISPlay"); self.scpi.query_bool(&p) }

	/// Event table of decoded frames.
	pub fn set_event_table(&mut self, on:bool) -> Result<()> { let p = self.path("EVENt"); self.scpi.set_bool(&p, on) }
	pub fn event_table(&mut self) -> Result<bool>           { let p = self.path("EVENt"); self.scpi.query_bool(&p) }

	/// Writes the event table as CSV to a USB stick plugged into the instrument.
	pub fn export_events(&mut self) -> Result<()> { let p = self.path("EEXPort"); self.scpi.write(&p) }

	pub fn parallel(self) -> ParallelBus<'a> { ParallelBus{ scpi: self.scpi, n: self.n } }
	pub fn rs232(self) -> Rs232Bus<'a>       { Rs232Bus{ scpi: self.scpi, n: self.n } }
	pub fn i2c(self) -> I2cBus<'a>           { I2cBus{ scpi: self.scpi, n: self.n } }
	pub fn spi(self) -> SpiBus<'a>           { SpiBus{ scpi: self.scpi, n: self.n } }

}

fn set_offset(scpi:&mut Scpi, path:&str, offset:i32) -> Result<()> {
	check_range_i64("offset", offset as i64, MIN_OFFSET, MAX_OFFSET)?;
	scpi.set_i64(path, offset as i64)
}

/// Threshold setter shared by the serial decoders. `source` is the command selecting the line's channel.
fn set_threshold(scpi:&mut Scpi, source:&str, path:&str, volts:f64) -> Result<()> {
	check_source_level(scpi, source, volts)?;
	scpi.set_f64(path, volts)
}

pub struct ParallelBus<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> ParallelBus<'a> {

	fn path(&self, leaf:&str) -> String { format!(":BUS{}:PARallel:{}", self.n, leaf) }

	pub fn set_clock(&mut self, c:ClockSource) -> Result<()> { let p = self.path("CLK"); self.scpi.set_mnemonic(&p, c) }
	pub fn clock(&mut self) -> Result<ClockSource>           { let p = self.path("CLK"); self.scpi.query_mnemonic(&p) }

	pub fn set_slope(&mut self, s:ClockSlope) -> Result<()> { let p = self.path("SLOPe"); self.scpi.set_mnemonic(&p, s) }
	pub fn slope(&mut self) -> Result<ClockSlope>           { let p = self.path("SLOPe"); self.scpi.query_mnemonic(&p) }

	/// Channel of each data bit, bit 0 first. Sets the bus width at the same time.
	pub fn set_bits(&mut self, bits:&[Source]) -> Result<()> {
		check_range_i64("bits", bits.len() as i64, 1, MAX_PARALLEL_BITS as i64)?;
		let list:Vec<&str> = bits.iter().map(|b| b.command_token()).collect();
		let p = self.path("BSET");
		self.scpi.write(&format!("{} {}", p, list.join(",")))
	}

	pub fn bits(&mut self) -> Result<Vec<Source>> {
		let p = self.path("BSET");
		let reply = self.scpi.query_str(&p)?;
		reply.split(',')
			.map(|b| Source::from_reply(b).ok_or_else(|| Error::unexpected(&format!("{}?", p), &reply)))
			.collect()
	}

	pub fn set_threshold(&mut self, source:Source, volts:f64) -> Result<()> {
		let n = source.number();
		let scale = self.scpi.query_f64(&format!(":CHANnel{}:SCALe", n))?;
		let offset = self.scpi.query_f64(&format!(":CHANnel{}:OFFSet", n))?;
		check_level(volts, scale, offset)?;
		let p = self.path("THReshold");
		self.scpi.write(&format!("{} {},{}", p, source.command_token(), crate::scpi::format_f64(volts)))
	}

	pub fn threshold(&mut self, source:Source) -> Result<f64> {
		let cmd = format!("{}? {}", self.path("THReshold"), source.command_token());
		let reply = self.scpi.ask(&cmd)?;
		parse_f64(&reply).ok_or_else(|| Error::unexpected(&cmd, &reply))
	}

	pub fn set_offset(&mut self, offset:i32) -> Result<()> { let p = self.path("OFFSet"); set_offset(self.scpi, &p, offset) }
	pub fn offset(&mut self) -> Result<i32>               { let p = self.path("OFFSet"); self.scpi.query_int(&p) }

}

pub struct Rs232Bus<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> Rs232Bus<'a> {

	fn path(&self, leaf:&str) -> String { format!(":BUS{}:RS232:{}", self.n, leaf) }

	pub fn set_tx(&mut self, s:ClockSource) -> Result<()> { let p = self.path("TX"); self.scpi.set_mnemonic(&p, s) }
	pub fn tx(&mut self) -> Result<ClockSource>           { let p = self.path("TX"); self.scpi.query_mnemonic(&p) }

	pub fn set_rx(&mut self, s:ClockSource) -> Result<()> { let p = self.path("RX"); self.scpi.set_mnemonic(&p, s) }
	pub fn rx(&mut self) -> Result<ClockSource>           { let p = self.path("RX"); self.scpi.query_mnemonic(&p) }

	pub fn set_polarity(&mut self, pol:LinePolarity) -> Result<()> { let p = self.path("POLarity"); self.scpi.set_mnemonic(&p, pol) }
	pub fn polarity(&mut self) -> Result<LinePolarity>             { let p = self.path("POLarity"); self.scpi.query_mnemonic(&p) }

	pub fn set_endian(&mut self, e:Endian) -> Result<()> { let p = self.path("ENDian"); self.scpi.set_mnemonic(&p, e) }
	pub fn endian(&mut self) -> Result<Endian>           { let p = self.path("ENDian"); self.scpi.query_mnemonic(&p) }

	/// Preset rates go to `BAUD`, anything else to the user rate.
	pub fn set_baud(&mut self, rate:u32) -> Result<()> {
		if PRESET_BAUDS.contains(&rate) {
			let p = self.path("BAUD");
			return self.scpi.set_i64(&p, rate as i64);
		}
		check_range_i64("baud", rate as i64, MIN_USER_BAUD as i64, MAX_USER_BAUD as i64)?;
		let p = self.path("BUSer");
		self.scpi.set_i64(&p, rate as i64)
	}

	pub fn baud(&mut self) -> Result<Baud> {
		let p = self.path("BAUD");
		let reply = self.scpi.query_str(&p)?;
		if reply.trim().eq_ignore_ascii_case("USER") {
			let user = self.path("BUSer");
			return self.scpi.query_int(&user).map(Baud::User);
		}
		crate::scpi::parse_i64(&reply)
			.map(|r| Baud::Preset(r as u32))
			.ok_or_else(|| Error::unexpected(&format!("{}?", p), &reply))
	}

	pub fn set_data_bits(&mut self, bits:u8) -> Result<()> {
		check_range_i64("data bits", bits as i64, 5, 9)?;
		let p = self.path("DBITs");
		self.scpi.set_i64(&p, bits as i64)
	}

	pub fn data_bits(&mut self) -> Result<u8> { let p = self.path("DBITs"); self.scpi.query_int(&p) }

	pub fn set_stop_bits(&mut self, s:StopBits) -> Result<()> { let p = self.path("SBITs"); self.scpi.set_mnemonic(&p, s) }

	pub fn stop_bits(&mut self) -> Result<StopBits> {
		let p = self.path("SBITs");
		let reply = self.scpi.query_str(&p)?;
		// Some firmware answers in scientific notation
		let bits = parse_f64(&reply).and_then(|v| match (v * 2.0).round() as i64 {
			2 => Some(StopBits::One),
			3 => Some(StopBits::OneHalf),
			4 => Some(StopBits::Two),
			_ => None,
		});
		bits.ok_or_else(|| Error::unexpected(&format!("{}?", p), &reply))
	}

	pub fn set_parity(&mut self, par:Parity) -> Result<()> { let p = self.path("PARity"); self.scpi.set_mnemonic(&p, par) }
	pub fn parity(&mut self) -> Result<Parity>             { let p = self.path("PARity"); self.scpi.query_mnemonic(&p) }

	pub fn set_packet(&mut self, on:bool) -> Result<()> { let p = self.path("PACKet"); self.scpi.set_bool(&p, on) }
	pub fn packet(&mut self) -> Result<bool>           { let p = self.path("PACKet"); self.scpi.query_bool(&p) }

	pub fn set_packet_end(&mut self, e:PacketEnd) -> Result<()> { let p = self.path("PEND"); self.scpi.set_mnemonic(&p, e) }
	pub fn packet_end(&mut self) -> Result<PacketEnd>           { let p = self.path("PEND"); self.scpi.query_mnemonic(&p) }

	pub fn set_tx_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("TX"), self.path("TTHReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn tx_threshold(&mut self) -> Result<f64> { let p = self.path("TTHReshold"); self.scpi.query_f64(&p) }

	pub fn set_rx_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("RX"), self.path("RTHReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn rx_threshold(&mut self) -> Result<f64> { let p = self.path("RTHReshold"); self.scpi.query_f64(&p) }

	pub fn set_offset(&mut self, offset:i32) -> Result<()> { let p = self.path("OFFSet"); set_offset(self.scpi, &p, offset) }
	pub fn offset(&mut self) -> Result<i32>               { let p = self.path("OFFSet"); self.scpi.query_int(&p) }

}

pub struct I2cBus<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> I2cBus<'a> {

	fn path(&self, leaf:&str) -> String { format!(":BUS{}:IIC:{}", self.n, leaf) }

	pub fn set_clock_source(&mut self, s:Source) -> Result<()> { let p = self.path("SCLK:SOURce"); self.scpi.set_mnemonic(&p, s) }
	pub fn clock_source(&mut self) -> Result<Source>           { let p = self.path("SCLK:SOURce"); self.scpi.query_mnemonic(&p) }

	pub fn set_clock_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("SCLK:SOURce"), self.path("SCLK:THReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn clock_threshold(&mut self) -> Result<f64> { let p = self.path("SCLK:THReshold"); self.scpi.query_f64(&p) }

	pub fn set_data_source(&mut self, s:Source) -> Result<()> { let p = self.path("SDA:SOURce"); self.scpi.set_mnemonic(&p, s) }
	pub fn data_source(&mut self) -> Result<Source>           { let p = self.path("SDA:SOURce"); self.scpi.query_mnemonic(&p) }

	pub fn set_data_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("SDA:SOURce"), self.path("SDA:THReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn data_threshold(&mut self) -> Result<f64> { let p = self.path("SDA:THReshold"); self.scpi.query_f64(&p) }

	pub fn set_offset(&mut self, offset:i32) -> Result<()> { let p = self.path("OFFSet"); set_offset(self.scpi, &p, offset) }
	pub fn offset(&mut self) -> Result<i32>               { let p = self.path("OFFSet"); self.scpi.query_int(&p) }

}

pub struct SpiBus<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> SpiBus<'a> {

	fn path(&self, leaf:&str) -> String { format!(":BUS{}:SPI:{}", self.n, leaf) }

	pub fn set_clock_source(&mut self, s:Source) -> Result<()> { let p = self.path("SCLK:SOURce"); self.scpi.set_mnemonic(&p, s) }
	pub fn clock_source(&mut self) -> Result<Source>           { let p = self.path("SCLK:SOURce"); self.scpi.query_mnemonic(&p) }

	pub fn set_clock_slope(&mut self, s:LinePolarity) -> Result<()> { let p = self.path("SCLK:SLOPe"); self.scpi.set_mnemonic(&p, s) }
	pub fn clock_slope(&mut self) -> Result<LinePolarity>           { let p = self.path("SCLK:SLOPe"); self.scpi.query_mnemonic(&p) }

	pub fn set_clock_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("SCLK:SOURce"), self.path("SCLK:THReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn clock_threshold(&mut self) -> Result<f64> { let p = self.path("SCLK:THReshold"); self.scpi.query_f64(&p) }

	pub fn set_data_source(&mut self, s:Source) -> Result<()> { let p = self.path("SDA:SOURce"); self.scpi.set_mnemonic(&p, s) }
	pub fn data_source(&mut self) -> Result<Source>           { let p = self.path("SDA:SOURce"); self.scpi.query_mnemonic(&p) }

	pub fn set_data_polarity(&mut self, pol:DataPolarity) -> Result<()> { let p = self.path("SDA:POLarity"); self.scpi.set_mnemonic(&p, pol) }
	pub fn data_polarity(&mut self) -> Result<DataPolarity>             { let p = self.path("SDA:POLarity"); self.scpi.query_mnemonic(&p) }

	pub fn set_data_threshold(&mut self, volts:f64) -> Result<()> {
		let (source, p) = (self.path("SDA:SOURce"), self.path("SDA:THReshold"));
		set_threshold(self.scpi, &source, &p, volts)
	}

	pub fn data_threshold(&mut self) -> Result<f64> { let p = self.path("SDA:THReshold"); self.scpi.query_f64(&p) }

	pub fn set_data_bits(&mut self, bits:u8) -> Result<()> {
		check_range_i64("data bits", bits as i64, 4, 32)?;
		let p = self.path("DBITs");
		self.scpi.set_i64(&p, bits as i64)
	}

	pub fn data_bits(&mut self) -> Result<u8> { let p = self.path("DBITs"); self.scpi.query_int(&p) }

	pub fn set_endian(&mut self, e:Endian) -> Result<()> { let p = self.path("ENDian"); self.scpi.set_mnemonic(&p, e) }
	pub fn endian(&mut self) -> Result<Endian>           { let p = self.path("ENDian"); self.scpi.query_mnemonic(&p) }

	pub fn set_offset(&mut self, offset:i32) -> Result<()> { let p = self.path("OFFSet"); set_offset(self.scpi, &p, offset) }
	pub fn offset(&mut self) -> Result<i32>               { let p = self.path("OFFSet"); self.scpi.query_int(&p) }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	fn scpi(mock:&MockTransport) -> Scpi { Scpi::new(Box::new(mock.clone()), Config::default()) }

	#[test]
	fn only_two_buses() {
		let mock = MockTransport::new();
		let mut scpi = scpi(&mock);
		assert!(matches!(Bus::new(&mut scpi, 3), Err(Error::InvalidBus(3))));
	}

	#[test]
	fn parallel_bits_round_trip() {
		let mock = MockTransport::new();
		let mut scpi = scpi(&mock);
		let bits = [Source::Channel2, Source::Channel1, Source::Channel1];
		Bus::new(&mut scpi, 1).unwrap().parallel().set_bits(&bits).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":BUS1:PARallel:BSET CHANnel2,CHANnel1,CHANnel1"));
		assert_eq!(Bus::new(&mut scpi, 1).unwrap().parallel().bits().unwrap(), bits.to_vec());
		assert!(Bus::new(&mut scpi, 1).unwrap().parallel().set_bits(&[]).is_err());
	}

	#[test]
	fn stop_bits_accept_numeric_replies() {
		let mock = MockTransport::new();
		mock.reply(":BUS2:RS232:SBITs", "1.500000e+00");
		let mut scpi = scpi(&mock);
		assert_eq!(Bus::new(&mut scpi, 2).unwrap().rs232().stop_bits().unwrap(), StopBits::OneHalf);
	}

	#[test]
	fn offsets_are_bounded() {
		let mock = MockTransport::new();
		let mut scpi = scpi(&mock);
		assert!(Bus::new(&mut scpi, 1).unwrap().spi().set_offset(149).is_err());
		Bus::new(&mut scpi, 1).unwrap().spi().set_offset(-166).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":BUS1:SPI:OFFSet -166"));
	}

	#[test]
	fn thresholds_follow_the_line_source() {
		let mock = MockTransport::new();
		mock.reply(":BUS1:RS232:TX", "OFF");
		let mut scpi = scpi(&mock);
		assert!(matches!(Bus::new(&mut scpi, 1).unwrap().rs232().set_tx_threshold(1.0), Err(Error::InvalidState(_))));
	}
}
