//! `:WAVeform` readout of screen or memory samples.

use log::debug;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::{parse_f64, parse_i64, Scpi};
use crate::validate::check_range_i64;

use super::acquire::{Acquire, MemoryDepth};

const SOURCE:&str   = ":WAVeform:SOURce";
const MODE:&str     = ":WAVeform:MODE";
const FORMAT:&str   = ":WAVeform:FORMat";
const POINTS:&str   = ":WAVeform:POINts";
const START:&str    = ":WAVeform:STARt";
const STOP:&str     = ":WAVeform:STOP";
const STATUS:&str   = ":WAVeform:STATus";
const PREAMBLE:&str = ":WAVeform:PREamble";
const DATA:&str     = ":WAVeform:DATA";

/// Points on screen, the limit in NORMal mode.
pub const SCREEN_POINTS:i64 = 1400;

mnemonic! {
	pub enum WaveformSource {
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
		Math     => ("MATH", "MATH", "math"),
	}
}

mnemonic! {
	/// NORMal reads the screen, RAW reads internal memory and MAXimum picks whichever is available.
	pub enum WaveformMode {
		Normal  => ("NORMal", "NORM", "screen"),
		Maximum => ("MAXimum", "MAX", "maximum"),
		Raw     => ("RAW", "RAW", "memory"),
	}
}

mnemonic! {
	pub enum WaveformFormat {
		Word  => ("WORD", "WORD", "word"),
		Byte  => ("BYTE", "BYTE", "byte"),
		Ascii => ("ASCii", "ASC", "ASCII"),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadState { Idle, Read }

/// Progress of a memory read. `points` is the number of points read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformStatus {
	pub state: ReadState,
	pub points: u64,
}

/// Reply of `:WAVeform:PREamble?`. Converts raw samples to seconds and volts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preamble {
	pub format: WaveformFormat,
	pub mode: WaveformMode,
	pub points: u64,
	pub count: u64,
	pub x_increment: f64,
	pub x_origin: f64,
	pub x_reference: f64,
	pub y_increment: f64,
	pub y_origin: f64,
	pub y_reference: f64,
}

impl Preamble {
	pub fn parse(reply:&str) -> Result<Self> {
		let bad = || Error::unexpected(":WAVeform:PREamble?", reply);
		let fields:Vec<f64> = reply.split(',').map(parse_f64).collect::<Option<_>>().ok_or_else(bad)?;
		if fields.len() != 10 { return Err(bad()); }

		let format = match fields[0] as i64 { 0 => WaveformFormat::Word, 1 => WaveformFormat::Byte, 2 => WaveformFormat::Ascii, _ => return Err(bad()) };
		let mode = match fields[1] as i64 { 0 => WaveformMode::Normal, 1 => WaveformMode::Maximum, 2 => WaveformMode::Raw, _ => return Err(bad()) };

		Ok(Self {
			format, mode,
			points: fields[2] as u64,
			count: fields[3] as u64,
			x_increment: fields[4],
			x_origin: fields[5],
			x_reference: fields[6],
			y_increment: fields[7],
			y_origin: fields[8],
			y_reference: fields[9],
		})
	}

	pub fn volts(&self, sample:u8) -> f64 {
		(sample as f64 - self.y_origin - self.y_reference) * self.y_increment
	}

	/// Time of the `index`th sample relative to the trigger.
	pub fn seconds(&self, index:usize) -> f64 {
		(index as f64 - self.x_reference) * self.x_increment + self.x_origin
	}
}

fn parse_status(reply:&str) -> Option<WaveformStatus> {
	let (state, points) = reply.trim().split_once(',')?;
	let state = match state.trim().to_ascii_uppercase().as_str() {
		"IDLE" => ReadState::Idle,
		"READ" => ReadState::Read,
		_ => return None,
	};
	let points = parse_i64(points).filter(|p| *p >= 0)? as u64;
	Some(WaveformStatus{ state, points })
}

pub struct Waveform<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Waveform<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, s:WaveformSource) -> Result<()> { self.scpi.set_mnemonic(SOURCE, s) }
	pub fn source(&mut self) -> Result<WaveformSource>           { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_mode(&mut self, m:WaveformMode) -> Result<()> { self.scpi.set_mnemonic(MODE, m) }
	pub fn mode(&mut self) -> Result<WaveformMode>           { self.scpi.query_mnemonic(MODE) }

	pub fn set_format(&mut self, f:WaveformFormat) -> Result<()> { self.scpi.set_mnemonic(FORMAT, f) }
	pub fn format(&mut self) -> Result<WaveformFormat>           { self.scpi.query_mnemonic(FORMAT) }

	fn set_point_index(&mut self, path:&str, name:&'static str, n:u64) -> Result<()> {
		let max = match self.mode()? {
			WaveformMode::Normal => SCREEN_POINTS,
			_ => i64::MAX,
		};
		check_range_i64(name, n.min(i64::MAX as u64) as i64, 1, max)?;
		self.scpi.set_i64(path, n as i64)
	}

	pub fn set_points(&mut self, n:u64) -> Result<()> { self.set_point_index(POINTS, "points", n) }
	pub fn points(&mut self) -> Result<u64>           { self.scpi.query_int(POINTS) }

	pub fn set_start(&mut self, n:u64) -> Result<()> { self.set_point_index(START, "start", n) }
	pub fn start(&mut self) -> Result<u64>           { self.scpi.query_int(START) }

	pub fn set_stop(&mut self, n:u64) -> Result<()> { self.set_point_index(STOP, "stop", n) }
	pub fn stop(&mut self) -> Result<u64>           { self.scpi.query_int(STOP) }

	pub fn begin(&mut self) -> Result<()> { self.scpi.write(":WAVeform:BEGin") }
	pub fn end(&mut self) -> Result<()>   { self.scpi.write(":WAVeform:END") }
	pub fn reset(&mut self) -> Result<()> { self.scpi.write(":WAVeform:RESet") }

	pub fn status(&mut self) -> Result<WaveformStatus> {
		let reply = self.scpi.query_str(STATUS)?;
		parse_status(&reply).ok_or_else(|| Error::unexpected(":WAVeform:STATus?", &reply))
	}

	pub fn preamble(&mut self) -> Result<Preamble> {
		let reply = self.scpi.query_str(PREAMBLE)?;
		Preamble::parse(&reply)
	}

	pub fn x_increment(&mut self) -> Result<f64> { self.scpi.query_f64(":WAVeform:XINCrement") }
	pub fn x_origin(&mut self) -> Result<f64>    { self.scpi.query_f64(":WAVeform:XORigin") }
	pub fn x_reference(&mut self) -> Result<f64> { self.scpi.query_f64(":WAVeform:XREFerence") }
	pub fn y_increment(&mut self) -> Result<f64> { self.scpi.query_f64(":WAVeform:YINCrement") }
	pub fn y_origin(&mut self) -> Result<f64>    { self.scpi.query_f64(":WAVeform:YORigin") }
	pub fn y_reference(&mut self) -> Result<f64> { self.scpi.query_f64(":WAVeform:YREFerence") }

	/// One `:WAVeform:DATA?` block, as sent by the instrument.
	pub fn data_raw(&mut self) -> Result<Vec<u8>> { self.scpi.query_block(DATA) }

	/// Screen samples in volts. The format is switched to BYTE first.
	pub fn data_volts(&mut self) -> Result<Vec<f64>> {
		self.set_format(WaveformFormat::Byte)?;
		let preamble = self.preamble()?;
		let raw = self.data_raw()?;
		Ok(raw.iter().map(|b| preamble.volts(*b)).collect())
	}

	/// Reads the whole acquisition memory of the current source. Stops the acquisition.
	pub fn read_memory(&mut self) -> Result<Vec<u8>> {
		self.scpi.write(":STOP")?;
		self.set_mode(WaveformMode::Raw)?;
		self.set_format(WaveformFormat::Byte)?;
		self.reset()?;
		self.set_start(1)?;

		let depth = match Acquire::new(&mut *self.scpi).memory_depth()? {
			MemoryDepth::Points(p) => p,
			MemoryDepth::Auto => self.preamble()?.points,
		};
		self.set_stop(depth)?;
		self.begin()?;

		let mut data = Vec::with_capacity(depth as usize);
		loop {
			let status = self.status()?;
			let chunk = self.data_raw()?;
			debug!("memory read: {} bytes, {:?} after {} points", chunk.len(), status.state, status.points);
			if chunk.is_empty() && status.state == ReadState::Read {
				return Err(Error::Block("the instrument sent no data while a memory read was in progress".to_owned()));
			}
			data.extend_from_slice(&chunk);
			if status.state == ReadState::Idle { break; }
		}

		self.end()?;
		Ok(data)
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	const PREAMBLE_REPLY:&str = "1,0,1400,1,2.000000e-08,-1.400000e-05,0,4.000000e-02,0,127";

	#[test]
	fn preamble_fields() {
		let p = Preamble::parse(PREAMBLE_REPLY).unwrap();
		assert_eq!(p.format, WaveformFormat::Byte);
		assert_eq!(p.mode, WaveformMode::Normal);
		assert_eq!(p.points, 1400);
		assert!((p.volts(127) - 0.0).abs() < 1e-12);
		assert!((p.volts(152) - 1.0).abs() < 1e-12);
		assert!(Preamble::parse("1,0,1400").is_err());
	}

	#[test]
	fn status_replies() {
		assert_eq!(parse_status("IDLE,1400"), Some(WaveformStatus{ state: ReadState::Idle, points: 1400 }));
		assert_eq!(parse_status("READ,250000\n"), Some(WaveformStatus{ state: ReadState::Read, points: 250_000 }));
		assert_eq!(parse_status("BUSY,1"), None);
	}

	#[test]
	fn screen_reads_are_limited() {
		let mock = MockTransport::new();
		mock.reply(MODE, "NORM");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(Waveform::new(&mut scpi).set_points(1401).is_err());
		assert!(Waveform::new(&mut scpi).set_start(0).is_err());
		Waveform::new(&mut scpi).set_points(1400).unwrap();

		mock.reply(MODE, "RAW");
		Waveform::new(&mut scpi).set_stop(56_000_000).unwrap();
	}

	#[test]
	fn volts_from_a_block() {
		let mock = MockTransport::new();
		mock.reply(PREAMBLE, PREAMBLE_REPLY).reply_bytes(DATA, b"#13\x7f\x98\x66\n");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		let volts = Waveform::new(&mut scpi).data_volts().unwrap();
		assert_eq!(volts.len(), 3);
		assert!((volts[1] - 1.0).abs() < 1e-12);
		assert!((volts[2] + 1.0).abs() < 1e-12);
	}

	#[test]
	fn memory_read_collects_blocks() {
		let mock = MockTransport::new();
		mock.reply(":ACQuire:MDEPth", "14000")
			.reply(STATUS, "IDLE,4")
			.reply_bytes(DATA, b"#14abcd\n");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert_eq!(Waveform::new(&mut scpi).read_memory().unwrap(), b"abcd".to_vec());

		let sent = mock.sent();
		assert_eq!(sent.first().map(String::as_str), Some(":STOP"));
		assert!(sent.contains(&":WAVeform:STOP 14000".to_owned()));
		assert_eq!(sent.last().map(String::as_str), Some(":WAVeform:END"));
	}
}
