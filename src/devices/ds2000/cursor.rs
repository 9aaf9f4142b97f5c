//! `:CURSor` measurements. Manual cursors are placed freely on the screen, track cursors follow a
//! waveform and only their horizontal position can be set.

use crate::error::Result;
use crate::scpi::Scpi;
use crate::validate::check_range_i64;

const MODE:&str   = ":CURSor:MODE";
const MANUAL:&str = ":CURSor:MANual";
const TRACK:&str  = ":CURSor:TRACk";

/// Horizontal cursor positions are screen columns.
pub const MAX_X:i64 = 699;
/// Vertical cursor positions are screen rows.
pub const MAX_Y:i64 = 399;

mnemonic! {
	pub enum CursorMode {
		Off    => ("OFF", "OFF", "off"),
		Manual => ("MANual", "MAN", "manual"),
		Track  => ("TRACk", "TRAC", "track"),
		Auto   => ("AUTO", "AUTO", "auto"),
	}
}

mnemonic! {
	pub enum CursorType {
		Time      => ("TIME", "TIME", "time (X)"),
		Amplitude => ("AMPLitude", "AMPL", "amplitude (Y)"),
	}
}

mnemonic! {
	pub enum ManualSource {
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
		Math     => ("MATH", "MATH", "math"),
		None     => ("NONE", "NONE", "none"),
	}
}

mnemonic! {
	pub enum TrackSource {
		Off      => ("OFF", "OFF", "off"),
		Channel1 => ("CHANnel1", "CHAN1", "channel 1"),
		Channel2 => ("CHANnel2", "CHAN2", "channel 2"),
	}
}

mnemonic! {
	pub enum TimeUnit {
		Second  => ("SECond", "SEC", "seconds"),
		Hertz   => ("HZ", "HZ", "hertz"),
		Percent => ("PERCentage", "PERC", "percent"),
		Degree  => ("DEGRee", "DEGR", "degrees"),
	}
}

mnemonic! {
	pub enum VerticalUnit {
		SourceUnit => ("SUNit", "SUN", "source unit"),
		Percent    => ("PERCent", "PERC", "percent"),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorId { A, B }

impl CursorId {
	fn letter(self) -> char { match self { CursorId::A => 'A', CursorId::B => 'B' } }
}

// The value and delta queries read the same under both modes
fn x_value(scpi:&mut Scpi, prefix:&str, id:CursorId) -> Result<f64> { scpi.query_f64(&format!("{}:{}XValue", prefix, id.letter())) }
fn y_value(scpi:&mut Scpi, prefix:&str, id:CursorId) -> Result<f64> { scpi.query_f64(&format!("{}:{}YValue", prefix, id.letter())) }

fn set_position(scpi:&mut Scpi, prefix:&str, axis:char, id:CursorId, position:u16, max:i64) -> Result<()> {
	let name = match axis { 'X' => "x position", _ => "y position" };
	check_range_i64(name, position as i64, 0, max)?;
	scpi.set_i64(&format!("{}:C{}{}", prefix, id.letter(), axis), position as i64)
}

fn position(scpi:&mut Scpi, prefix:&str, axis:char, id:CursorId) -> Result<u16> {
	scpi.query_int(&format!("{}:C{}{}", prefix, id.letter(), axis))
}

pub struct Cursor<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Cursor<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_mode(&mut self, mode:CursorMode) -> Result<()> { self.scpi.set_mnemonic(MODE, mode) }
	pub fn mode(&mut self) -> Result<CursorMode>              { self.scpi.query_mnemonic(MODE) }

	pub fn manual(self) -> ManualCursor<'a> { ManualCursor{ scpi: self.scpi } }
	pub fn track(self) -> TrackCursor<'a>   { TrackCursor{ scpi: self.scpi } }

}

pub struct ManualCursor<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> ManualCursor<'a> {

	pub fn set_cursor_type(&mut self, t:CursorType) -> Result<()> { self.scpi.set_mnemonic(":CURSor:MANual:TYPE", t) }
	pub fn cursor_type(&mut self) -> Result<CursorType>           { self.scpi.query_mnemonic(":CURSor:MANual:TYPE") }

	pub fn set_source(&mut self, s:ManualSource) -> Result<()> { self.scpi.set_mnemonic(":CURSor:MANual:SOURce", s) }
	pub fn source(&mut self) -> Result<ManualSource>           { self.scpi.query_mnemonic(":CURSor:MANual:SOURce") }

	pub fn set_time_unit(&mut self, u:TimeUnit) -> Result<()> { self.scpi.set_mnemonic(":CURSor:MANual:TUNit", u) }
	pub fn time_unit(&mut self) -> Result<TimeUnit>           { self.scpi.query_mnemonic(":CURSor:MANual:TUNit") }

	pub fn set_vertical_unit(&mut self, u:VerticalUnit) -> Result<()> { self.scpi.set_mnemonic(":CURSor:MANual:VUNit", u) }
	pub fn vertical_unit(&mut self) -> Result<VerticalUnit>           { self.scpi.query_mnemonic(":CURSor:MANual:VUNit") }

	pub fn set_x(&mut self, id:CursorId, column:u16) -> Result<()> { set_position(self.scpi, MANUAL, 'X', id, column, MAX_X) }
	pub fn x(&mut self, id:CursorId) -> Result<u16>                { position(self.scpi, MANUAL, 'X', id) }

	pub fn set_y(&mut self, id:CursorId, row:u16) -> Result<()> { set_position(self.scpi, MANUAL, 'Y', id, row, MAX_Y) }
	pub fn y(&mut self, id:CursorId) -> Result<u16>             { position(self.scpi, MANUAL, 'Y', id) }

	pub fn x_value(&mut self, id:CursorId) -> Result<f64> { x_value(self.scpi, MANUAL, id) }
	pub fn y_value(&mut self, id:CursorId) -> Result<f64> { y_value(self.scpi, MANUAL, id) }

	pub fn x_delta(&mut self) -> Result<f64> { self.scpi.query_f64(":CURSor:MANual:XDELta") }
	/// Reciprocal of the X delta, the frequency when X is time.
	pub fn inverse_x_delta(&mut self) -> Result<f64> { self.scpi.query_f64(":CURSor:MANual:IXDelta") }
	pub fn y_delta(&mut self) -> Result<f64> { self.scpi.query_f64(":CURSor:MANual:YDELta") }

}

pub struct TrackCursor<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> TrackCursor<'a> {

	fn source_path(id:CursorId) -> &'static str {
		match id { CursorId::A => ":CURSor:TRACk:SOURce1", CursorId::B => ":CURSor:TRACk:SOURce2" }
	}

	pub fn set_source(&mut self, id:CursorId, s:TrackSource) -> Result<()> { self.scpi.set_mnemonic(Self::source_path(id), s) }
	pub fn source(&mut self, id:CursorId) -> Result<TrackSource>           { self.scpi.query_mnemonic(Self::source_path(id)) }

	pub fn set_x(&mut self, id:CursorId, column:u16) -> Result<()> { set_position(self.scpi, TRACK, 'X', id, column, MAX_X) }
	pub fn x(&mut self, id:CursorId) -> Result<u16>                { position(self.scpi, TRACK, 'X', id) }

	/// Row where the cursor meets its waveform. Read only.
	pub fn y(&mut self, id:CursorId) -> Result<u16> { position(self.scpi, TRACK, 'Y', id) }

	pub fn x_value(&mut self, id:CursorId) -> Result<f64> { x_value(self.scpi, TRACK, id) }
	pub fn y_value(&mut self, id:CursorId) -> Result<f64> { y_value(self.scpi, TRACK, id) }

	pub fn x_delta(&mut self) -> Result<f64>         { self.scpi.query_f64(":CURSor:TRACk:XDELta") }
	pub fn inverse_x_delta(&mut self) -> Result<f64> { self.scpi.query_f64(":CURSor:TRACk:IXDelta") }
	pub fn y_delta(&mut self) -> Result<f64>         { self.scpi.query_f64(":CURSor:TRACk:YDELta") }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::error::Error;
	use crate::transport::MockTransport;

	#[test]
	fn positions_are_bounded_by_the_screen() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());

		Cursor::new(&mut scpi).manual().set_x(CursorId::B, 699).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":CURSor:MANual:CBX 699"));
		assert!(matches!(Cursor::new(&mut scpi).manual().set_y(CursorId::A, 400), Err(Error::OutOfRange{ .. })));

		Cursor::new(&mut scpi).track().set_x(CursorId::A, 10).unwrap();
		assert_eq!(Cursor::new(&mut scpi).track().x(CursorId::A).unwrap(), 10);
	}

	#[test]
	fn values_use_the_mode_prefix() {
		let mock = MockTransport::new();
		mock.reply(":CURSor:TRACk:AYValue", "-2.500000e-01");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert_eq!(Cursor::new(&mut scpi).track().y_value(CursorId::A).unwrap(), -0.25);
	}
}
