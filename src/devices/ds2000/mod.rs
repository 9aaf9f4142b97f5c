//! Rigol DS2000 series oscilloscopes.
//!
//! [`DS2000`] owns the connection. Each subsystem is reached through a short-lived controller that
//! borrows it, for example `scope.channel(1)?.set_scale(0.5)?`.

use std::ops::Drop;

use log::{info, warn};
use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scpi::Scpi;
use crate::transport::Transport;
use crate::vxi11::CoreClient;

pub mod common;
pub mod acquire;
pub mod channel;
pub mod timebase;
pub mod trigger;
pub mod display;
pub mod cursor;
pub mod calculate;
pub mod bus;
pub mod calibrate;
pub mod waveform;
pub mod ieee;

use self::acquire::Acquire;
use self::bus::Bus;
use self::calculate::Calculate;
use self::calibrate::Calibrate;
use self::channel::{Channel, Coupling};
use self::cursor::Cursor;
use self::display::Display;
use self::ieee::{Identity, Ieee};
use self::timebase::Timebase;
use self::trigger::{Sweep, Trigger, TriggerMode, TriggerStatus};
use self::waveform::Waveform;

pub struct DS2000 {
	scpi: Scpi,
	identity: Identity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub identity: Identity,
	pub time_scale: f64,
	pub trigger_mode: TriggerMode,
	pub trigger_sweep: Sweep,
	pub trigger_status: TriggerStatus,
	pub ch1: ChannelSnapshot,
	pub ch2: ChannelSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
	pub display: bool,
	pub scale: f64,
	pub offset: f64,
	pub probe_ratio: f64,
	pub coupling: Coupling,
}

impl DS2000 {

	/// Opens a VXI-11 link to `host` and checks that a DS2000 answers.
	pub fn connect(host:&str, config:Config) -> Result<Self> {
		let mut core = CoreClient::new(host, &config)?;
		core.create_link(&config.device_name)?;
		let scope = Self::with_transport(Box::new(core), config)?;
		info!("connected to {} {} at {}", scope.identity.model, scope.identity.serial_num, host);
		Ok(scope)
	}

	/// Runs the `*IDN?` handshake over an already open transport.
	pub fn with_transport(transport:Box<dyn Transport>, config:Config) -> Result<Self> {
		let mut scpi = Scpi::new(transport, config);

		let identity = match scpi.ask("*IDN?") {
			Ok(reply) => match Identity::parse(&reply) {
				Ok(id) if id.is_ds2000() => id,
				_ => return Err(Self::abandon(scpi, Error::WrongModel(reply))),
			},
			Err(e) => return Err(Self::abandon(scpi, e)),
		};

		Ok(Self{ scpi, identity })
	}

	// The link is released whenever the handshake fails
	fn abandon(mut scpi:Scpi, e:Error) -> Error {
		if let Err(close_err) = scpi.close() { warn!("unable to close the link after a failed handshake: {}", close_err); }
		e
	}

	/// Releases the link. Every later call fails with `Error::NotConnected`.
	pub fn disconnect(&mut self) -> Result<()> {
		if self.scpi.is_connected() { info!("disconnecting from {}", self.identity.model); }
		self.scpi.close()
	}

	pub fn is_connected(&self) -> bool { self.scpi.is_connected() }

	/// Identity read during the handshake.
	pub fn identity(&self) -> &Identity { &self.identity }

	/// Fresh `*IDN?` reply.
	pub fn info(&mut self) -> Result<Identity> { self.ieee().idn() }

	/// Direct access for commands this crate doesn't wrap.
	pub fn scpi(&mut self) -> &mut Scpi { &mut self.scpi }

	pub fn autoscale(&mut self) -> Result<()>     { self.scpi.write(":AUToscale") }
	pub fn clear(&mut self) -> Result<()>         { self.scpi.write(":CLEar") }
	pub fn run(&mut self) -> Result<()>           { self.scpi.write(":RUN") }
	pub fn stop(&mut self) -> Result<()>          { self.scpi.write(":STOP") }
	pub fn single(&mut self) -> Result<()>        { self.scpi.write(":SINGle") }
	pub fn force_trigger(&mut self) -> Result<()> { self.scpi.write(":TFORce") }
	/// Sets the trigger level to the vertical midpoint of the signal.
	pub fn level_50(&mut self) -> Result<()>      { self.scpi.write(":TLHAlf") }
	pub fn reset(&mut self) -> Result<()>         { self.scpi.write("*RST") }

	pub fn acquire(&mut self) -> Acquire             { Acquire::new(&mut self.scpi) }
	pub fn channel(&mut self, n:u8) -> Result<Channel> { Channel::new(&mut self.scpi, n) }
	pub fn timebase(&mut self) -> Timebase           { Timebase::new(&mut self.scpi) }
	pub fn trigger(&mut self) -> Trigger             { Trigger::new(&mut self.scpi) }
	pub fn display(&mut self) -> Display             { Display::new(&mut self.scpi) }
	pub fn cursor(&mut self) -> Cursor               { Cursor::new(&mut self.scpi) }
	pub fn calculate(&mut self) -> Calculate         { Calculate::new(&mut self.scpi) }
	pub fn calibrate(&mut self) -> Calibrate         { Calibrate::new(&mut self.scpi) }
	pub fn bus(&mut self, n:u8) -> Result<Bus>       { Bus::new(&mut self.scpi, n) }
	pub fn waveform(&mut self) -> Waveform           { Waveform::new(&mut self.scpi) }
	pub fn ieee(&mut self) -> Ieee                   { Ieee::new(&mut self.scpi) }

	fn channel_snapshot(&mut self, n:u8) -> Result<ChannelSnapshot> {
		let mut ch = self.channel(n)?;
		Ok(ChannelSnapshot {
			display: ch.display()?,
			scale: ch.scale()?,
			offset: ch.offset()?,
			probe_ratio: ch.probe_ratio()?,
			coupling: ch.coupling()?,
		})
	}

	/// Reads the settings most often needed to interpret a capture.
	pub fn snapshot(&mut self) -> Result<Snapshot> {
		let time_scale = self.timebase().scale()?;
		let trigger_mode = self.trigger().mode()?;
		let trigger_sweep = self.trigger().sweep()?;
		let trigger_status = self.trigger().status()?;
		let ch1 = self.channel_snapshot(1)?;
		let ch2 = self.channel_snapshot(2)?;

		Ok(Snapshot{ identity: self.identity.clone(), time_scale, trigger_mode, trigger_sweep, trigger_status, ch1, ch2 })
	}

}

impl Drop for DS2000 {

	fn drop(&mut self) {
		if !self.scpi.is_connected() { return; }
		if let Err(e) = self.scpi.close() { warn!("unable to close the link to {}: {}", self.identity.model, e); }
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::MockTransport;

	#[test]
	fn handshake_rejects_other_models() {
		let mock = MockTransport::new();
		mock.reply("*IDN", "Siglent Technologies,SDS1202X-E,SDSMMEBQ1R1234,1.3.26");
		match DS2000::with_transport(Box::new(mock.clone()), Config::default()) {
			Err(Error::WrongModel(reply)) => assert!(reply.contains("SDS1202X-E")),
			other => panic!("unexpected {:?}", other.map(|s| s.identity.clone())),
		}
		assert!(mock.is_closed());
	}

	#[test]
	fn handshake_timeout_closes_the_link() {
		let mock = MockTransport::new();
		assert!(matches!(DS2000::with_transport(Box::new(mock.clone()), Config::default()), Err(Error::Vxi11{ code: 15, .. })));
		assert!(mock.is_closed());
	}

	#[test]
	fn mso_models_are_accepted() {
		let mock = MockTransport::new();
		mock.reply("*IDN", "RIGOL TECHNOLOGIES,MSO2302A,DS2D0000000002,00.03.05");
		let scope = DS2000::with_transport(Box::new(mock.clone()), Config::default()).unwrap();
		assert_eq!(scope.identity().model, "MSO2302A");
	}

	#[test]
	fn drop_closes_the_link() {
		let mock = MockTransport::new();
		mock.reply("*IDN", "RIGOL TECHNOLOGIES,DS2072A,DS2D0000000001,00.03.05");
		let scope = DS2000::with_transport(Box::new(mock.clone()), Config::default()).unwrap();
		assert_eq!(scope.identity().model, "DS2072A");
		drop(scope);
		assert!(mock.is_closed());
	}
}
