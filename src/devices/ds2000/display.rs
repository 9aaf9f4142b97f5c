use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::validate::{check_in_set, check_range_i64};

const CLEAR:&str       = ":DISPlay:CLEar";
const TYPE:&str        = ":DISPlay:TYPE";
const GRID:&str        = ":DISPlay:GRID";
const GRADING:&str     = ":DISPlay:GRADing:TIME";
const WBRIGHTNESS:&str = ":DISPlay:WBRightness";
const GBRIGHTNESS:&str = ":DISPlay:GBRightness";
const MENU_TIME:&str   = ":DISPlay:MPERsistence";
const DATA:&str        = ":DISPlay:DATA";

pub const PERSISTENCE_TIMES:[f64; 9] = [0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0];
pub const MENU_TIMES:[f64; 5] = [1.0, 2.0, 5.0, 10.0, 20.0];

/// 800x480 pixels at 24 bits plus the 54 byte file header.
pub const SCREENSHOT_SIZE:usize = 800 * 480 * 3 + 54;

mnemonic! {
	pub enum DisplayType {
		Vectors => ("VECTors", "VECT", "vectors"),
		Dots    => ("DOTS", "DOTS", "dots"),
	}
}

mnemonic! {
	pub enum Grid {
		Full => ("FULL", "FULL", "full"),
		Half => ("HALF", "HALF", "half"),
		None => ("NONE", "NONE", "none"),
	}
}

/// How long old waveform points stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Persistence {
	Minimum,
	Seconds(f64),
	Infinite,
}

/// How long a menu stays on screen after the last key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuTime {
	Seconds(u32),
	Infinite,
}

fn parse_persistence(reply:&str) -> Option<Persistence> {
	let reply = reply.trim().to_ascii_uppercase();
	if reply.starts_with("MIN") { return Some(Persistence::Minimum); }
	if reply.starts_with("INF") { return Some(Persistence::Infinite); }
	crate::scpi::parse_f64(&reply).map(Persistence::Seconds)
}

fn parse_menu_time(reply:&str) -> Option<MenuTime> {
	let reply = reply.trim().to_ascii_uppercase();
	if reply.starts_with("INF") { return Some(MenuTime::Infinite); }
	crate::scpi::parse_i64(&reply).filter(|t| *t > 0).map(|t| MenuTime::Seconds(t as u32))
}

pub struct Display<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Display<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	/// Clears every waveform on screen.
	pub fn clear(&mut self) -> Result<()> { self.scpi.write(CLEAR) }

	pub fn set_display_type(&mut self, t:DisplayType) -> Result<()> { self.scpi.set_mnemonic(TYPE, t) }
	pub fn display_type(&mut self) -> Result<DisplayType>           { self.scpi.query_mnemonic(TYPE) }

	pub fn set_grid(&mut self, grid:Grid) -> Result<()> { self.scpi.set_mnemonic(GRID, grid) }
	pub fn grid(&mut self) -> Result<Grid>              { self.scpi.query_mnemonic(GRID) }

	pub fn set_persistence(&mut self, p:Persistence) -> Result<()> {
		match p {
			Persistence::Minimum => self.scpi.set_str(GRADING, "MIN"),
			Persistence::Infinite => self.scpi.set_str(GRADING, "INFinite"),
			Persistence::Seconds(t) => {
				check_in_set("persistence", t, &PERSISTENCE_TIMES, "s")?;
				self.scpi.set_f64(GRADING, t)
			},
		}
	}

	pub fn persistence(&mut self) -> Result<Persistence> {
		let reply = self.scpi.query_str(GRADING)?;
		parse_persistence(&reply).ok_or_else(|| Error::unexpected(":DISPlay:GRADing:TIME?", &reply))
	}

	pub fn set_waveform_brightness(&mut self, percent:u8) -> Result<()> {
		check_range_i64("waveform brightness", percent as i64, 0, 100)?;
		self.scpi.set_i64(WBRIGHTNESS, percent as i64)
	}

	pub fn waveform_brightness(&mut self) -> Result<u8> { self.scpi.query_int(WBRIGHTNESS) }

	pub fn set_grid_brightness(&mut self, percent:u8) -> Result<()> {
		check_range_i64("grid brightness", percent as i64, 0, 100)?;
		self.scpi.set_i64(GBRIGHTNESS, percent as i64)
	}

	pub fn grid_brightness(&mut self) -> Result<u8> { self.scpi.query_int(GBRIGHTNESS) }

	pub fn set_menu_time(&mut self, t:MenuTime) -> Result<()> {
		match t {
			MenuTime::Infinite => self.scpi.set_str(MENU_TIME, "INFinite"),
			MenuTime::Seconds(s) => {
				check_in_set("menu time", s as f64, &MENU_TIMES, "s")?;
				self.scpi.set_i64(MENU_TIME, s as i64)
			},
		}
	}

	pub fn menu_time(&mut self) -> Result<MenuTime> {
		let reply = self.scpi.query_str(MENU_TIME)?;
		parse_menu_time(&reply).ok_or_else(|| Error::unexpected(":DISPlay:MPERsistence?", &reply))
	}

	/// Bitmap of the current screen, as a complete BMP file.
	pub fn screenshot(&mut self) -> Result<Vec<u8>> {
		let bmp = self.scpi.query_block(DATA)?;
		if !bmp.starts_with(b"BM") {
			return Err(Error::Block("the screenshot does not start with a bitmap header".to_owned()));
		}
		if bmp.len() != SCREENSHOT_SIZE {
			return Err(Error::Block(format!("expected a {} byte bitmap, got {} bytes", SCREENSHOT_SIZE, bmp.len())));
		}
		Ok(bmp)
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn persistence_replies() {
		assert_eq!(parse_persistence("MIN"), Some(Persistence::Minimum));
		assert_eq!(parse_persistence("INF"), Some(Persistence::Infinite));
		assert_eq!(parse_persistence("5.000000e-02"), Some(Persistence::Seconds(0.05)));
		assert_eq!(parse_persistence("LONG"), None);
	}

	#[test]
	fn menu_time_replies() {
		assert_eq!(parse_menu_time("INFinite"), Some(MenuTime::Infinite));
		assert_eq!(parse_menu_time("10"), Some(MenuTime::Seconds(10)));
		assert_eq!(parse_menu_time("0"), None);
	}
}
