//! `:TRIGger` subsystem. Settings common to every trigger type live on [`Trigger`]; each trigger
//! type has its own controller reached through it, e.g. `ds.trigger().edge().set_level(0.5)`.

use crate::error::Result;
use crate::scpi::Scpi;
use crate::validate::check_range;

pub(crate) use super::common::check_source_level;

pub mod edge;
pub mod pulse;
pub mod runt;
pub mod window;
pub mod nth_edge;
pub mod slope;
pub mod video;
pub mod pattern;
pub mod delay;
pub mod timeout;
pub mod duration;
pub mod setup_hold;
pub mod rs232;
pub mod i2c;
pub mod spi;
pub mod usb;

pub use self::edge::Edge;
pub use self::pulse::Pulse;
pub use self::runt::Runt;
pub use self::window::Window;
pub use self::nth_edge::NthEdge;
pub use self::slope::SlopeTrigger;
pub use self::video::Video;
pub use self::pattern::Pattern;
pub use self::delay::Delay;
pub use self::timeout::Timeout;
pub use self::duration::Duration;
pub use self::setup_hold::SetupHold;
pub use self::rs232::Rs232;
pub use self::i2c::I2c;
pub use self::spi::Spi;
pub use self::usb::Usb;

const MODE:&str     = ":TRIGger:MODE";
const COUPLING:&str = ":TRIGger:COUPling";
const SWEEP:&str    = ":TRIGger:SWEep";
const STATUS:&str   = ":TRIGger:STATus";
const HOLDOFF:&str  = ":TRIGger:HOLDoff";
const NREJECT:&str  = ":TRIGger:NREJect";

pub const MIN_HOLDOFF:f64 = 100e-9;
pub const MAX_HOLDOFF:f64 = 10.0;

mnemonic! {
	pub enum TriggerMode {
		Edge      => ("EDGE", "EDGE", "edge"),
		Pulse     => ("PULSe", "PULS", "pulse"),
		Runt      => ("RUNT", "RUNT", "runt"),
		Window    => ("WIND", "WIND", "window"),
		NthEdge   => ("NEDG", "NEDG", "nth edge"),
		Slope     => ("SLOPe", "SLOP", "slope"),
		Video     => ("VIDeo", "VID", "video"),
		Pattern   => ("PATTern", "PATT", "pattern"),
		Delay     => ("DELay", "DEL", "delay"),
		Timeout   => ("TIMeout", "TIM", "timeout"),
		Duration  => ("DURATion", "DURAT", "duration"),
		SetupHold => ("SHOLd", "SHOL", "setup/hold"),
		Rs232     => ("RS232", "RS232", "RS232"),
		I2c       => ("IIC", "IIC", "I2C"),
		Spi       => ("SPI", "SPI", "SPI"),
		Usb       => ("USB", "USB", "USB"),
	}
}

mnemonic! {
	pub enum TriggerCoupling {
		Ac       => ("AC", "AC", "AC"),
		Dc       => ("DC", "DC", "DC"),
		LfReject => ("LFReject", "LFR", "low frequency reject"),
		HfReject => ("HFReject", "HFR", "high frequency reject"),
	}
}

mnemonic! {
	pub enum Sweep {
		Auto   => ("AUTO", "AUTO", "auto"),
		Normal => ("NORMal", "NORM", "normal"),
		Single => ("SINGle", "SING", "single"),
	}
}

mnemonic! {
	pub enum TriggerStatus {
		Triggered => ("TD", "TD", "triggered"),
		Wait      => ("WAIT", "WAIT", "waiting"),
		Run       => ("RUN", "RUN", "running"),
		Auto      => ("AUTO", "AUTO", "auto"),
		Stop      => ("STOP", "STOP", "stopped"),
	}
}

mnemonic! {
	/// Trigger condition comparing a measured time against upper and lower limits.
	pub enum When {
		Greater => ("GREater", "GRE", "greater than lower limit"),
		Less    => ("LESS", "LESS", "less than upper limit"),
		Between => ("GLESs", "GLES", "between limits"),
	}
}

mnemonic! {
	/// Polarity-qualified version of [`When`], used by the pulse and slope triggers.
	pub enum PolarWhen {
		PositiveGreater => ("PGReater", "PGR", "positive, greater than"),
		PositiveLess    => ("PLESs", "PLES", "positive, less than"),
		NegativeGreater => ("NGReater", "NGR", "negative, greater than"),
		NegativeLess    => ("NLESs", "NLES", "negative, less than"),
		PositiveBetween => ("PGLess", "PGL", "positive, between"),
		NegativeBetween => ("NGLess", "NGL", "negative, between"),
	}
}

/// Range-checked time setter shared by the sub-mode controllers.
pub(crate) fn set_time(scpi:&mut Scpi, path:&str, name:&'static str, time:f64, min:f64, max:f64) -> Result<()> {
	check_range(name, time, min, max, "s")?;
	scpi.set_f64(path, time)
}

pub struct Trigger<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Trigger<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_mode(&mut self, mode:TriggerMode) -> Result<()> { self.scpi.set_mnemonic(MODE, mode) }
	pub fn mode(&mut self) -> Result<TriggerMode>              { self.scpi.query_mnemonic(MODE) }

	pub fn set_coupling(&mut self, c:TriggerCoupling) -> Result<()> { self.scpi.set_mnemonic(COUPLING, c) }
	pub fn coupling(&mut self) -> Result<TriggerCoupling>          { self.scpi.query_mnemonic(COUPLING) }

	pub fn set_sweep(&mut self, s:Sweep) -> Result<()> { self.scpi.set_mnemonic(SWEEP, s) }
	pub fn sweep(&mut self) -> Result<Sweep>          { self.scpi.query_mnemonic(SWEEP) }

	pub fn status(&mut self) -> Result<TriggerStatus> { self.scpi.query_mnemonic(STATUS) }

	pub fn set_holdoff(&mut self, time:f64) -> Result<()> { set_time(self.scpi, HOLDOFF, "holdoff", time, MIN_HOLDOFF, MAX_HOLDOFF) }
	pub fn holdoff(&mut self) -> Result<f64>             { self.scpi.query_f64(HOLDOFF) }

	pub fn set_noise_reject(&mut self, on:bool) -> Result<()> { self.scpi.set_bool(NREJECT, on) }
	pub fn noise_reject(&mut self) -> Result<bool>           { self.scpi.query_bool(NREJECT) }

	pub fn edge(self) -> Edge<'a>              { Edge::new(self.scpi) }
	pub fn pulse(self) -> Pulse<'a>            { Pulse::new(self.scpi) }
	pub fn runt(self) -> Runt<'a>              { Runt::new(self.scpi) }
	pub fn window(self) -> Window<'a>          { Window::new(self.scpi) }
	pub fn nth_edge(self) -> NthEdge<'a>       { NthEdge::new(self.scpi) }
	pub fn slope(self) -> SlopeTrigger<'a>     { SlopeTrigger::new(self.scpi) }
	pub fn video(self) -> Video<'a>            { Video::new(self.scpi) }
	pub fn pattern(self) -> Pattern<'a>        { Pattern::new(self.scpi) }
	pub fn delay(self) -> Delay<'a>            { Delay::new(self.scpi) }
	pub fn timeout(self) -> Timeout<'a>        { Timeout::new(self.scpi) }
	pub fn duration(self) -> Duration<'a>      { Duration::new(self.scpi) }
	pub fn setup_hold(self) -> SetupHold<'a>   { SetupHold::new(self.scpi) }
	pub fn rs232(self) -> Rs232<'a>            { Rs232::new(self.scpi) }
	pub fn i2c(self) -> I2c<'a>                { I2c::new(self.scpi) }
	pub fn spi(self) -> Spi<'a>                { Spi::new(self.scpi) }
	pub fn usb(self) -> Usb<'a>                { Usb::new(self.scpi) }

}
