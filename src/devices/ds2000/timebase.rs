use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::{check_range, check_range_i64};

use super::acquire::{Acquire, MemoryDepth};
use super::trigger::TriggerStatus;

const MAIN_SCALE:&str   = ":TIMebase:MAIN:SCALe";
const MAIN_OFFSET:&str  = ":TIMebase:MAIN:OFFSet";
const MODE:&str         = ":TIMebase:MODE";
const VERNIER:&str      = ":TIMebase:VERNier";
const HREF_MODE:&str    = ":TIMebase:HREF:MODE";
const HREF_POS:&str     = ":TIMebase:HREF:POSition";
const DELAY_ENABLE:&str = ":TIMebase:DELay:ENABle";
const DELAY_OFFSET:&str = ":TIMebase:DELay:OFFSet";
const DELAY_SCALE:&str  = ":TIMebase:DELay:SCALe";

pub const MIN_SCALE:f64 = 2e-9;
pub const MAX_SCALE:f64 = 1000.0;
pub const MAX_HREF_POSITION:i64 = 350;
/// Offset limit in seconds while acquisition is stopped.
pub const STOPPED_OFFSET_LIMIT:f64 = 7000.0;

mnemonic! {
	pub enum TimebaseMode {
		Main => ("MAIN", "MAIN", "Y-T"),
		Xy   => ("XY", "XY", "X-Y"),
		Roll => ("ROLL", "ROLL", "roll"),
	}
}

mnemonic! {
	/// Reference point the waveform expands around when the scale changes.
	pub enum HrefMode {
		Center          => ("CENTer", "CENT", "screen center"),
		TriggerPosition => ("TPOSition", "TPOS", "trigger position"),
		User            => ("USER", "USER", "user position"),
	}
}

/// Window allowed for the main offset, given the acquisition state.
pub fn main_offset_window(running:bool, mode:TimebaseMode, scale:f64, memory_depth:f64, sample_rate:f64) -> Result<(f64, f64)> {
	if running {
		if mode == TimebaseMode::Roll {
			return Err(Error::state("the horizontal offset cannot be changed in roll mode while running"));
		}
		let min = -memory_depth / sample_rate;
		let max = if scale < 20e-3 { 1.0 } else { 10.0 * scale };
		Ok((min, max))
	} else if mode == TimebaseMode::Roll {
		Ok((-STOPPED_OFFSET_LIMIT, 0.0))
	} else {
		Ok((-STOPPED_OFFSET_LIMIT, STOPPED_OFFSET_LIMIT))
	}
}

/// Window allowed for the delayed sweep offset. The zoomed section must stay inside the main sweep.
pub fn delay_offset_window(main_scale:f64, main_offset:f64, delay_scale:f64) -> (f64, f64) {
	let left_time = 7.0 * main_scale - main_offset;
	let right_time = 7.0 * main_scale + main_offset;
	let delay_range = 14.0 * delay_scale;
	(-(left_time - delay_range / 2.0), right_time - delay_range / 2.0)
}

pub struct Timebase<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Timebase<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	/// Main time base scale in s/div, 2ns to 1000s.
	pub fn set_scale(&mut self, scale:f64) -> Result<()> {
		check_range("scale", scale, MIN_SCALE, MAX_SCALE, "s")?;
		self.scpi.set_f64(MAIN_SCALE, scale)
	}

	pub fn scale(&mut self) -> Result<f64> { self.scpi.query_f64(MAIN_SCALE) }

	pub fn set_offset(&mut self, offset:f64) -> Result<()> {
		let status:TriggerStatus = self.scpi.query_mnemonic(":TRIGger:STATus")?;
		let mode = self.mode()?;
		let running = status != TriggerStatus::Stop;

		let (min, max) = if running && mode != TimebaseMode::Roll {
			let scale = self.scale()?;
			let mut acquire = Acquire::new(&mut *self.scpi);
			let sample_rate = acquire.sample_rate()?;
			let memory_depth = match acquire.memory_depth()? {
				MemoryDepth::Points(p) => p as f64,
				// Auto depth fills exactly the 14 divisions on screen
				MemoryDepth::Auto => 14.0 * scale * sample_rate,
			};
			main_offset_window(running, mode, scale, memory_depth, sample_rate)?
		} else {
			main_offset_window(running, mode, 0.0, 0.0, 1.0)?
		};

		check_range("offset", offset, min, max, "s")?;
		self.scpi.set_f64(MAIN_OFFSET, offset)
	}

	pub fn offset(&mut self) -> Result<f64> { self.scpi.query_f64(MAIN_OFFSET) }

	pub fn set_mode(&mut self, mode:TimebaseMode) -> Result<()> { self.scpi.set_mnemonic(MODE, mode) }
	pub fn mode(&mut self) -> Result<TimebaseMode>              { self.scpi.query_mnemonic(MODE) }

	pub fn set_fine_adjust(&mut self, on:bool) -> Result<()> { self.scpi.set_bool(VERNIER, on) }
	pub fn fine_adjust(&mut self) -> Result<bool>           { self.scpi.query_bool(VERNIER) }

	pub fn set_href_mode(&mut self, mode:HrefMode) -> Result<()> { self.scpi.set_mnemonic(HREF_MODE, mode) }
	pub fn href_mode(&mut self) -> Result<HrefMode>              { self.scpi.query_mnemonic(HREF_MODE) }

	/// User reference position in screen pixels from center. Switches the reference mode to USER first.
	pub fn set_href_position(&mut self, position:i64) -> Result<()> {
		check_range_i64("position", position, -MAX_HREF_POSITION, MAX_HREF_POSITION)?;
		self.set_href_mode(HrefMode::User)?;
		self.scpi.set_i64(HREF_POS, position)
	}

	pub fn href_position(&mut self) -> Result<i64> { self.scpi.query_i64(HREF_POS) }

	pub fn set_delay_enabled(&mut self, on:bool) -> Result<()> { self.scpi.set_bool(DELAY_ENABLE, on) }
	pub fn delay_enabled(&mut self) -> Result<bool>           { self.scpi.query_bool(DELAY_ENABLE) }

	pub fn set_delay_offset(&mut self, offset:f64) -> Result<()> {
		let main_scale = self.scale()?;
		let main_offset = self.offset()?;
		let delay_scale = self.delay_scale()?;
		let (min, max) = delay_offset_window(main_scale, main_offset, delay_scale);
		check_range("delay offset", offset, min, max, "s")?;
		self.scpi.set_f64(DELAY_OFFSET, offset)
	}

	pub fn delay_offset(&mut self) -> Result<f64> { self.scpi.query_f64(DELAY_OFFSET) }

	/// The delayed scale can go no finer than 5/(4·sample rate) and no coarser than the main scale.
	pub fn set_delay_scale(&mut self, scale:f64) -> Result<()> {
		let sample_rate = self.scpi.query_f64(":ACQuire:SRATe")?;
		let max = self.scale()?;
		check_range("delay scale", scale, 5.0 / (4.0 * sample_rate), max, "s")?;
		self.scpi.set_f64(DELAY_SCALE, scale)
	}

	pub fn delay_scale(&mut self) -> Result<f64> { self.scpi.query_f64(DELAY_SCALE) }

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn running_window_depends_on_scale() {
		assert_eq!(main_offset_window(true, TimebaseMode::Main, 1e-3, 14000.0, 1e9).unwrap(), (-14e-6, 1.0));
		assert_eq!(main_offset_window(true, TimebaseMode::Main, 0.5, 14000.0, 1e6).unwrap(), (-0.014, 5.0));
		assert!(main_offset_window(true, TimebaseMode::Roll, 1.0, 14000.0, 1e6).is_err());
	}

	#[test]
	fn stopped_window() {
		assert_eq!(main_offset_window(false, TimebaseMode::Main, 0.0, 0.0, 1.0).unwrap(), (-7000.0, 7000.0));
		assert_eq!(main_offset_window(false, TimebaseMode::Roll, 0.0, 0.0, 1.0).unwrap(), (-7000.0, 0.0));
	}

	#[test]
	fn delay_window_is_centered_on_main_sweep() {
		// 1 µs/div main sweep, no offset, 100 ns/div zoom: the zoom window is 1.4 µs wide
		let (min, max) = delay_offset_window(1e-6, 0.0, 100e-9);
		assert!((min + 6.3e-6).abs() < 1e-15);
		assert!((max - 6.3e-6).abs() < 1e-15);
	}
}
