use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

const TYPE:&str     = ":ACQuire:TYPE";
const AVERAGES:&str = ":ACQuire:AVERages";
const MDEPTH:&str   = ":ACQuire:MDEPth";
const SRATE:&str    = ":ACQuire:SRATe";
const AALIAS:&str   = ":ACQuire:AALias";

/// Memory depths available with one channel enabled.
pub const MEMORY_DEPTH_SINGLE:[u64; 5] = [14_000, 140_000, 1_400_000, 14_000_000, 56_000_000];
/// Memory depths available with both channels enabled.
pub const MEMORY_DEPTH_DUAL:[u64; 5] = [7_000, 70_000, 700_000, 7_000_000, 28_000_000];

pub const MIN_AVERAGES:u32 = 2;
pub const MAX_AVERAGES:u32 = 8192;

mnemonic! {
	pub enum AcquireType {
		Normal         => ("NORMal", "NORM", "normal"),
		Average        => ("AVERages", "AVER", "average"),
		Peak           => ("PEAK", "PEAK", "peak detect"),
		HighResolution => ("HRESolution", "HRES", "high resolution"),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryDepth {
	Auto,
	Points(u64),
}

pub struct Acquire<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Acquire<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_type(&mut self, t:AcquireType) -> Result<()> { self.scpi.set_mnemonic(TYPE, t) }
	pub fn acquire_type(&mut self) -> Result<AcquireType>  { self.scpi.query_mnemonic(TYPE) }

	/// Number of waveforms averaged in average mode: a power of two from 2 to 8192.
	pub fn set_averages(&mut self, count:u32) -> Result<()> {
		check_range_i64("averages", count as i64, MIN_AVERAGES as i64, MAX_AVERAGES as i64)?;
		if !count.is_power_of_two() {
			return Err(Error::OutOfRange{ name: "averages", message: format!("must be a power of two, got {}", count) });
		}
		self.scpi.set_i64(AVERAGES, count as i64)
	}

	pub fn averages(&mut self) -> Result<u32> { self.scpi.query_int(AVERAGES) }

	/// Which depths are valid depends on how many channels are displayed.
	pub fn set_memory_depth(&mut self, depth:MemoryDepth) -> Result<()> {
		let points = match depth {
			MemoryDepth::Auto => return self.scpi.set_str(MDEPTH, "AUTO"),
			MemoryDepth::Points(p) => p,
		};

		let dual = self.scpi.query_bool(":CHANnel1:DISPlay")? && self.scpi.query_bool(":CHANnel2:DISPlay")?;
		let table:&[u64] = if dual { &MEMORY_DEPTH_DUAL } else { &MEMORY_DEPTH_SINGLE };
		if !table.contains(&points) {
			let choices:Vec<String> = table.iter().map(|p| p.to_string()).collect();
			return Err(Error::OutOfRange {
				name: "memory depth",
				message: format!("with {} channel(s) on must be AUTO or one of {}, got {}", if dual { 2 } else { 1 }, choices.join(", "), points),
			});
		}
		self.scpi.set_i64(MDEPTH, points as i64)
	}

	pub fn memory_depth(&mut self) -> Result<MemoryDepth> {
		let reply = self.scpi.query_str(MDEPTH)?;
		if reply.trim().eq_ignore_ascii_case("AUTO") { return Ok(MemoryDepth::Auto); }
		crate::scpi::parse_i64(&reply)
			.filter(|p| *p > 0)
			.map(|p| MemoryDepth::Points(p as u64))
			.ok_or_else(|| Error::unexpected(":ACQuire:MDEPth?", &reply))
	}

	/// Current sample rate in Sa/s.
	pub fn sample_rate(&mut self) -> Result<f64> { self.scpi.query_f64(SRATE) }

	pub fn set_antialiasing(&mut self, enable:bool) -> Result<()> { self.scpi.set_bool(AALIAS, enable) }
	pub fn antialiasing(&mut self) -> Result<bool>                { self.scpi.query_bool(AALIAS) }

}
