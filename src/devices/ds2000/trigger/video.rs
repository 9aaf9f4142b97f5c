use crate::error::Result;
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

use super::super::common::{Polarity, Source};
use super::check_source_level;

const SOURCE:&str   = ":TRIGger:VIDeo:SOURce";
const POLARITY:&str = ":TRIGger:VIDeo:POLarity";
const MODE:&str     = ":TRIGger:VIDeo:MODE";
const STANDARD:&str = ":TRIGger:VIDeo:STANdard";
const LINE:&str     = ":TRIGger:VIDeo:LINE";
const LEVEL:&str    = ":TRIGger:VIDeo:LEVel";

mnemonic! {
	/// Sync the video trigger locks onto. Odd and even fields only exist for interlaced standards.
	pub enum VideoMode {
		OddField  => ("ODDField", "ODDF", "odd field"),
		EvenField => ("EVENfield", "EVEN", "even field"),
		Line      => ("LINE", "LINE", "line"),
		AllLines  => ("ALINes", "ALIN", "all lines"),
	}
}

mnemonic! {
	pub enum VideoStandard {
		PalSecam  => ("PALSecam", "PALS", "PAL/SECAM"),
		Ntsc      => ("NTSC", "NTSC", "NTSC"),
		P480      => ("480P", "480P", "480p"),
		P576      => ("576P", "576P", "576p"),
		P720Hz60  => ("720P60HZ", "720P60HZ", "720p 60Hz"),
		P720Hz50  => ("720P50HZ", "720P50HZ", "720p 50Hz"),
		P720Hz30  => ("720P30HZ", "720P30HZ", "720p 30Hz"),
		P720Hz25  => ("720P25HZ", "720P25HZ", "720p 25Hz"),
		P720Hz24  => ("720P24HZ", "720P24HZ", "720p 24Hz"),
		P1080Hz60 => ("1080P60HZ", "1080P60HZ", "1080p 60Hz"),
		P1080Hz50 => ("1080P50HZ", "1080P50HZ", "1080p 50Hz"),
		P1080Hz30 => ("1080P30HZ", "1080P30HZ", "1080p 30Hz"),
		P1080Hz25 => ("1080P25HZ", "1080P25HZ", "1080p 25Hz"),
		P1080Hz24 => ("1080P24HZ", "1080P24HZ", "1080p 24Hz"),
		I1080Hz30 => ("1080I30HZ", "1080I30HZ", "1080i 30Hz"),
		I1080Hz25 => ("1080I25HZ", "1080I25HZ", "1080i 25Hz"),
		I1080Hz24 => ("1080I24HZ", "1080I24HZ", "1080i 24Hz"),
	}
}

impl VideoStandard {
	/// Number of lines per frame, which is also the highest line the trigger accepts.
	pub fn lines(self) -> u32 {
		use self::VideoStandard::*;
		match self {
			Ntsc | P480 => 525,
			PalSecam | P576 => 625,
			P720Hz60 | P720Hz50 | P720Hz30 | P720Hz25 | P720Hz24 => 750,
			_ => 1125,
		}
	}
}

pub struct Video<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Video<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(SOURCE, source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(SOURCE) }

	pub fn set_polarity(&mut self, p:Polarity) -> Result<()> { self.scpi.set_mnemonic(POLARITY, p) }
	pub fn polarity(&mut self) -> Result<Polarity>           { self.scpi.query_mnemonic(POLARITY) }

	pub fn set_mode(&mut self, mode:VideoMode) -> Result<()> { self.scpi.set_mnemonic(MODE, mode) }
	pub fn mode(&mut self) -> Result<VideoMode>              { self.scpi.query_mnemonic(MODE) }

	pub fn set_standard(&mut self, s:VideoStandard) -> Result<()> { self.scpi.set_mnemonic(STANDARD, s) }
	pub fn standard(&mut self) -> Result<VideoStandard>           { self.scpi.query_mnemonic(STANDARD) }

	/// Line to trigger on in LINE mode, bounded by the current standard.
	pub fn set_line(&mut self, line:u32) -> Result<()> {
		let max = self.standard()?.lines();
		check_range_i64("line", line as i64, 1, max as i64)?;
		self.scpi.set_i64(LINE, line as i64)
	}

	pub fn line(&mut self) -> Result<u32> { self.scpi.query_int(LINE) }

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
	fn line_limit_follows_standard() {
		assert_eq!(VideoStandard::Ntsc.lines(), 525);
		assert_eq!(VideoStandard::P576.lines(), 625);
		assert_eq!(VideoStandard::P720Hz24.lines(), 750);
		assert_eq!(VideoStandard::I1080Hz25.lines(), 1125);

		let mock = MockTransport::new();
		mock.reply(STANDARD, "NTSC");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(Video::new(&mut scpi).set_line(600).is_err());
		Video::new(&mut scpi).set_line(525).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":TRIGger:VIDeo:LINE 525"));
	}
}
