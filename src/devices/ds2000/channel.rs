use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::{check_in_set, check_range, si_format};

/// `(min scale, max scale, offset limit)` at a 1X probe. The offset may go from `-limit` to `+limit`
/// while the scale lies within `min..=max`. Every entry scales with the probe ratio.
pub const OFFSET_RANGES:[(f64, f64, f64); 4] = [
	(0.0005, 0.05, 2.0),
	(0.051, 0.2, 10.0),
	(0.205, 2.0, 50.0),
	(2.05, 10.0, 100.0),
];

pub const PROBE_RATIOS:[f64; 16] = [
	0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0,
];

pub const MIN_SCALE:f64 = 0.0005;
pub const MAX_SCALE:f64 = 10.0;

mnemonic! {
	pub enum Coupling {
		Ac  => ("AC", "AC", "AC"),
		Dc  => ("DC", "DC", "DC"),
		Gnd => ("GND", "GND", "ground"),
	}
}

mnemonic! {
	pub enum Units {
		Voltage => ("VOLTage", "VOLT", "volts"),
		Watt    => ("WATT", "WATT", "watts"),
		Ampere  => ("AMPere", "AMP", "amperes"),
		Unknown => ("UNKNown", "UNKN", "unknown"),
	}
}

mnemonic! {
	/// The 100 MHz limit is not available on 70 MHz and 100 MHz models.
	pub enum BandwidthLimit {
		Off    => ("OFF", "OFF", "off"),
		Mhz20  => ("20M", "20M", "20 MHz"),
		Mhz100 => ("100M", "100M", "100 MHz"),
	}
}

/// Allowed offset window for `scale` (V/div) with a probe of `ratio`, if the scale is valid.
pub fn offset_limit(scale:f64, ratio:f64) -> Option<f64> {
	OFFSET_RANGES.iter()
		.find(|(min, max, _)| min * ratio <= scale && scale <= max * ratio)
		.map(|(_, _, off)| off * ratio)
}

pub struct Channel<'a> {
	scpi: &'a mut Scpi,
	n: u8,
}

impl<'a> Channel<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi, n:u8) -> Result<Self> {
		if n != 1 && n != 2 { return Err(Error::InvalidChannel(n)); }
		Ok(Self{ scpi, n })
	}

	pub fn number(&self) -> u8 { self.n }

	fn path(&self, leaf:&str) -> String { format!(":CHANnel{}:{}", self.n, leaf) }

	pub fn set_coupling(&mut self, c:Coupling) -> Result<()> { let p = self.path("COUPling"); self.scpi.set_mnemonic(&p, c) }
	pub fn coupling(&mut self) -> Result<Coupling>          { let p = self.path("COUPling"); self.scpi.query_mnemonic(&p) }

	pub fn set_units(&mut self, u:Units) -> Result<()> { let p = self.path("UNITs"); self.scpi.set_mnemonic(&p, u) }
	pub fn units(&mut self) -> Result<Units>          { let p = self.path("UNITs"); self.scpi.query_mnemonic(&p) }

	pub fn set_bandwidth_limit(&mut self, b:BandwidthLimit) -> Result<()> { let p = self.path("BWLimit"); self.scpi.set_mnemonic(&p, b) }
	pub fn bandwidth_limit(&mut self) -> Result<BandwidthLimit>          { let p = self.path("BWLimit"); self.scpi.query_mnemonic(&p) }

	pub fn set_display(&mut self, on:bool) -> Result<()> { let p = self.path("DISPlay"); self.scpi.set_bool(&p, on) }
	pub fn display(&mut self) -> Result<bool>           { let p = self.path("DISPlay"); self.scpi.query_bool(&p) }

	pub fn set_invert(&mut self, on:bool) -> Result<()> { let p = self.path("INVert"); self.scpi.set_bool(&p, on) }
	pub fn invert(&mut self) -> Result<bool>           { let p = self.path("INVert"); self.scpi.query_bool(&p) }

	/// Fine adjustment of the vertical scale.
	pub fn set_fine_adjust(&mut self, on:bool) -> Result<()> { let p = self.path("VERNier"); self.scpi.set_bool(&p, on) }
	pub fn fine_adjust(&mut self) -> Result<bool>           { let p = self.path("VERNier"); self.scpi.query_bool(&p) }

	pub fn set_probe_ratio(&mut self, ratio:f64) -> Result<()> {
		check_in_set("probe ratio", ratio, &PROBE_RATIOS, "X")?;
		let p = self.path("PROBe");
		self.scpi.set_f64(&p, ratio)
	}

	pub fn probe_ratio(&mut self) -> Result<f64> { let p = self.path("PROBe"); self.scpi.query_f64(&p) }

	/// Vertical scale in V/div. The valid range is 500µV to 10V at 1X and scales with the probe ratio.
	pub fn set_scale(&mut self, scale:f64) -> Result<()> {
		let ratio = self.probe_ratio()?;
		check_range("scale", scale, MIN_SCALE * ratio, MAX_SCALE * ratio, "V")?;
		let p = self.path("SCALe");
		self.scpi.set_f64(&p, scale)
	}

	pub fn scale(&mut self) -> Result<f64> { let p = self.path("SCALe"); self.scpi.query_f64(&p) }

	/// Vertical offset in volts. `None` restores the default of +2V on channel 1 and -2V on
	/// channel 2 (times the probe ratio).
	pub fn set_offset(&mut self, offset:Option<f64>) -> Result<()> {
		let ratio = self.probe_ratio()?;
		let p = self.path("OFFSet");

		let offset = match offset {
			Some(o) => o,
			None => return self.scpi.set_f64(&p, if self.n == 1 { 2.0 * ratio } else { -2.0 * ratio }),
		};

		let scale = self.scale()?;
		match offset_limit(scale, ratio) {
			Some(limit) => check_range("offset", offset, -limit, limit, "V")?,
			None => {
				let ranges:Vec<String> = OFFSET_RANGES.iter()
					.map(|(min, max, off)| format!("{}/div to {}/div allows ±{}", si_format(min * ratio, "V"), si_format(max * ratio, "V"), si_format(off * ratio, "V")))
					.collect();
				return Err(Error::OutOfRange {
					name: "offset",
					message: format!("the current scale {}/div has no offset range ({})", si_format(scale, "V"), ranges.join("; ")),
				});
			}
		}
		self.scpi.set_f64(&p, offset)
	}

	pub fn offset(&mut self) -> Result<f64> { let p = self.path("OFFSet"); self.scpi.query_f64(&p) }

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offset_limit_follows_scale_and_probe() {
		assert_eq!(offset_limit(0.01, 1.0), Some(2.0));
		assert_eq!(offset_limit(0.1, 1.0), Some(10.0));
		assert_eq!(offset_limit(1.0, 1.0), Some(50.0));
		assert_eq!(offset_limit(5.0, 1.0), Some(100.0));
		assert_eq!(offset_limit(0.1, 10.0), Some(20.0));
		assert_eq!(offset_limit(20.0, 1.0), None);
	}
}
