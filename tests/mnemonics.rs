
use std::fmt::Debug;

use ds2000::devices::ds2000::{acquire, bus, calculate, channel, common, cursor, display, timebase, trigger, waveform};
use ds2000::devices::ds2000::trigger::{delay, edge, i2c, pattern, rs232, runt, setup_hold, slope, usb, video, window};
use ds2000::scpi::Mnemonic;
use ds2000::{Config, DS2000, MockTransport};

const PATH:&str = ":PARameter";

// Every value written with its command token must read back from the short reply token
fn round_trip<M:Mnemonic + PartialEq + Debug>(scope:&mut DS2000) {
	for &value in M::ALL {
		scope.scpi().set_mnemonic(PATH, value).unwrap();
		assert_eq!(scope.scpi().query_mnemonic::<M>(PATH).unwrap(), value, "{} read back wrong", value.command_token());
	}
}

fn connect() -> DS2000 {
	let mock = MockTransport::new();
	mock.reply("*IDN", "RIGOL TECHNOLOGIES,DS2202,DS2A0000000001,00.02.01.00.00");
	DS2000::with_transport(Box::new(mock), Config::default()).unwrap()
}

#[test]
fn acquisition_and_vertical_tables() {
	let mut scope = connect();
	round_trip::<acquire::AcquireType>(&mut scope);
	round_trip::<channel::Coupling>(&mut scope);
	round_trip::<channel::Units>(&mut scope);
	round_trip::<channel::BandwidthLimit>(&mut scope);
	round_trip::<timebase::TimebaseMode>(&mut scope);
	round_trip::<timebase::HrefMode>(&mut scope);
	round_trip::<common::Source>(&mut scope);
	round_trip::<common::Slope>(&mut scope);
	round_trip::<common::EdgeSlope>(&mut scope);
	round_trip::<common::Parity>(&mut scope);
}

#[test]
fn trigger_tables() {
	let mut scope = connect();
	round_trip::<trigger::TriggerMode>(&mut scope);
	round_trip::<trigger::TriggerCoupling>(&mut scope);
	round_trip::<trigger::Sweep>(&mut scope);
	round_trip::<trigger::TriggerStatus>(&mut scope);
	round_trip::<trigger::When>(&mut scope);
	round_trip::<trigger::PolarWhen>(&mut scope);
	round_trip::<edge::EdgeSource>(&mut scope);
	round_trip::<runt::RuntWhen>(&mut scope);
	round_trip::<window::WindowPosition>(&mut scope);
	round_trip::<slope::SlopeWindow>(&mut scope);
	round_trip::<video::VideoMode>(&mut scope);
	round_trip::<video::VideoStandard>(&mut scope);
	round_trip::<pattern::PatternCode>(&mut scope);
	round_trip::<delay::DelayType>(&mut scope);
	round_trip::<setup_hold::DataLevel>(&mut scope);
	round_trip::<setup_hold::SetupHoldType>(&mut scope);
	round_trip::<rs232::Rs232When>(&mut scope);
	round_trip::<i2c::I2cWhen>(&mut scope);
	round_trip::<i2c::I2cDirection>(&mut scope);
	round_trip::<usb::UsbWhen>(&mut scope);
	round_trip::<usb::UsbSpeed>(&mut scope);
}

#[test]
fn analysis_and_display_tables() {
	let mut scope = connect();
	round_trip::<cursor::CursorMode>(&mut scope);
	round_trip::<cursor::CursorType>(&mut scope);
	round_trip::<cursor::ManualSource>(&mut scope);
	round_trip::<cursor::TrackSource>(&mut scope);
	round_trip::<cursor::TimeUnit>(&mut scope);
	round_trip::<cursor::VerticalUnit>(&mut scope);
	round_trip::<calculate::MathMode>(&mut scope);
	round_trip::<calculate::Operation>(&mut scope);
	round_trip::<calculate::FftWindow>(&mut scope);
	round_trip::<calculate::FftScale>(&mut scope);
	round_trip::<calculate::LogicOperator>(&mut scope);
	round_trip::<display::DisplayType>(&mut scope);
	round_trip::<display::Grid>(&mut scope);
	round_trip::<waveform::WaveformSource>(&mut scope);
	round_trip::<waveform::WaveformMode>(&mut scope);
	round_trip::<waveform::WaveformFormat>(&mut scope);
}

#[test]
fn bus_tables() {
	let mut scope = connect();
	round_trip::<bus::BusMode>(&mut scope);
	round_trip::<bus::BusFormat>(&mut scope);
	round_trip::<bus::ClockSource>(&mut scope);
	round_trip::<bus::ClockSlope>(&mut scope);
	round_trip::<bus::LinePolarity>(&mut scope);
	round_trip::<bus::Endian>(&mut scope);
	round_trip::<bus::StopBits>(&mut scope);
	round_trip::<bus::PacketEnd>(&mut scope);
	round_trip::<bus::DataPolarity>(&mut scope);
}
