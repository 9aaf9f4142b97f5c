use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::Scpi;

lazy_static! {
	static ref DATE_RE: Regex = Regex::new(r"^\s*(\d{4}),\s*(\d{1,2}),\s*(\d{1,2})\s*$").unwrap();
	static ref TIME_RE: Regex = Regex::new(r"^\s*(\d{1,4}),\s*(\d{1,2}),\s*(\d{1,2})\s*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationDate {
	pub year: u16,
	pub month: u8,
	pub day: u8,
}

/// How long the last self-calibration took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationDuration {
	pub hours: u16,
	pub minutes: u8,
	pub seconds: u8,
}

impl CalibrationDuration {
	pub fn as_duration(&self) -> Duration {
		Duration::from_secs(self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64)
	}
}

fn three_fields(re:&Regex, command:&str, reply:&str) -> Result<(u16, u8, u8)> {
	let caps = re.captures(reply).ok_or_else(|| Error::unexpected(command, reply))?;
	let field = |i:usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
	match (field(1).parse::<u16>(), field(2).parse::<u8>(), field(3).parse::<u8>()) {
		(Ok(a), Ok(b), Ok(c)) => Ok((a, b, c)),
		_ => Err(Error::unexpected(command, reply)),
	}
}

pub fn parse_date(reply:&str) -> Result<CalibrationDate> {
	let (year, month, day) = three_fields(&DATE_RE, ":CALibrate:DATE?", reply)?;
	if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
		return Err(Error::unexpected(":CALibrate:DATE?", reply));
	}
	Ok(CalibrationDate{ year, month, day })
}

pub fn parse_duration(reply:&str) -> Result<CalibrationDuration> {
	let (hours, minutes, seconds) = three_fields(&TIME_RE, ":CALibrate:TIME?", reply)?;
	if minutes > 59 || seconds > 59 {
		return Err(Error::unexpected(":CALibrate:TIME?", reply));
	}
	Ok(CalibrationDuration{ hours, minutes, seconds })
}

pub struct Calibrate<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Calibrate<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	/// Starts self-calibration. Disconnect every input first; it takes several minutes.
	pub fn start(&mut self) -> Result<()> { self.scpi.write(":CALibrate:STARt") }

	/// Aborts a running self-calibration.
	pub fn quit(&mut self) -> Result<()> { self.scpi.write(":CALibrate:QUIT") }

	pub fn date(&mut self) -> Result<CalibrationDate> {
		let reply = self.scpi.query_str(":CALibrate:DATE")?;
		parse_date(&reply)
	}

	/// Time the last self-calibration took.
	pub fn duration(&mut self) -> Result<CalibrationDuration> {
		let reply = self.scpi.query_str(":CALibrate:TIME")?;
		parse_duration(&reply)
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	#[test]
	fn dates() {
		assert_eq!(parse_date("2013,01,01").unwrap(), CalibrationDate{ year: 2013, month: 1, day: 1 });
		assert!(parse_date("2013,13,01").is_err());
		assert!(parse_date("13,1,1").is_err());
	}

	#[test]
	fn durations() {
		let d = parse_duration("13,57,38\n").unwrap();
		assert_eq!(d, CalibrationDuration{ hours: 13, minutes: 57, seconds: 38 });
		assert_eq!(d.as_duration(), Duration::from_secs(13 * 3600 + 57 * 60 + 38));
		assert_eq!(parse_duration("30,00,00").unwrap().hours, 30);
		assert!(parse_duration("1,60,00").is_err());
		assert!(parse_duration("garbage").is_err());
	}

	#[test]
	fn duration_query() {
		let mock = MockTransport::new();
		mock.reply(":CALibrate:TIME", "0,12,30");
		let mut scpi = Scpi::new(Box::new(mock), Config::default());
		assert_eq!(Calibrate::new(&mut scpi).duration().unwrap().as_duration(), Duration::from_secs(750));
	}
}
