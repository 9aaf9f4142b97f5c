
use ds2000::devices::ds2000::acquire::{AcquireType, MemoryDepth};
use ds2000::devices::ds2000::channel::Coupling;
use ds2000::devices::ds2000::trigger::{Sweep, TriggerMode, TriggerStatus};
use ds2000::devices::ds2000::trigger::edge::EdgeSource;
use ds2000::{Config, DS2000, Error, MockTransport};

const IDN:&str = "RIGOL TECHNOLOGIES,DS2202,DS2A0000000001,00.02.01.00.00";

fn connect() -> (MockTransport, DS2000) {
	let mock = MockTransport::new();
	mock.reply("*IDN", IDN);
	let scope = DS2000::with_transport(Box::new(mock.clone()), Config::default()).unwrap();
	mock.clear_sent();
	(mock, scope)
}

#[test]
fn handshake_reads_the_identity() {
	let (_mock, mut scope) = connect();
	assert_eq!(scope.identity().manufacturer, "RIGOL TECHNOLOGIES");
	assert_eq!(scope.identity().model, "DS2202");
	assert_eq!(scope.info().unwrap().fw_version, "00.02.01.00.00");
}

#[test]
fn wrong_model_is_rejected() {
	let mock = MockTransport::new();
	mock.reply("*IDN", "Agilent Technologies,DSO-X 2002A,MY12345678,02.35.2013061800");
	assert!(matches!(DS2000::with_transport(Box::new(mock), Config::default()), Err(Error::WrongModel(_))));
}

#[test]
fn settings_read_back() {
	let (mock, mut scope) = connect();

	scope.acquire().set_type(AcquireType::Average).unwrap();
	assert_eq!(mock.last_sent().as_deref(), Some(":ACQuire:TYPE AVERages"));
	assert_eq!(scope.acquire().acquire_type().unwrap(), AcquireType::Average);

	scope.acquire().set_averages(64).unwrap();
	assert_eq!(scope.acquire().averages().unwrap(), 64);

	let mut ch = scope.channel(2).unwrap();
	ch.set_probe_ratio(10.0).unwrap();
	ch.set_scale(1.0).unwrap();
	ch.set_coupling(Coupling::Ac).unwrap();
	assert_eq!(ch.scale().unwrap(), 1.0);
	assert_eq!(ch.probe_ratio().unwrap(), 10.0);
	assert_eq!(ch.coupling().unwrap(), Coupling::Ac);
}

#[test]
fn replies_in_scientific_notation() {
	let (mock, mut scope) = connect();
	mock.reply(":TIMebase:MAIN:SCALe", "1.000000e-06")
		.reply(":ACQuire:MDEPth", "1.400000e+04")
		.reply(":ACQuire:SRATe", "2.000000e+09");

	assert_eq!(scope.timebase().scale().unwrap(), 1e-6);
	assert_eq!(scope.acquire().memory_depth().unwrap(), MemoryDepth::Points(14_000));
	assert_eq!(scope.acquire().sample_rate().unwrap(), 2e9);
}

#[test]
fn rejected_values_are_never_sent() {
	let (mock, mut scope) = connect();

	assert!(matches!(scope.timebase().set_scale(2000.0), Err(Error::OutOfRange{ name: "scale", .. })));
	assert!(matches!(scope.acquire().set_averages(100), Err(Error::OutOfRange{ .. })));
	assert!(matches!(scope.channel(3), Err(Error::InvalidChannel(3))));
	assert!(matches!(scope.bus(0), Err(Error::InvalidBus(0))));
	assert!(mock.sent().is_empty());
}

#[test]
fn trigger_level_follows_the_source_channel() {
	let (mock, mut scope) = connect();
	mock.reply(":CHANnel1:SCALe", "5.000000e-01").reply(":CHANnel1:OFFSet", "0.000000e+00");

	scope.trigger().edge().set_source(EdgeSource::Channel1).unwrap();
	scope.trigger().edge().set_level(2.0).unwrap();
	assert!(matches!(scope.trigger().edge().set_level(3.0), Err(Error::OutOfRange{ name: "level", .. })));

	scope.trigger().edge().set_source(EdgeSource::External).unwrap();
	assert!(matches!(scope.trigger().edge().set_level(0.1), Err(Error::InvalidState(_))));
}

#[test]
fn transport_failures_propagate() {
	let (mock, mut scope) = connect();
	mock.fail(true);
	assert!(matches!(scope.run(), Err(Error::Io(_))));
	assert!(matches!(scope.timebase().scale(), Err(Error::Io(_))));
}

#[test]
fn unanswered_queries_time_out() {
	let (_mock, mut scope) = connect();
	assert!(matches!(scope.timebase().scale(), Err(Error::Vxi11{ code: 15, .. })));
}

#[test]
fn disconnect_closes_the_link() {
	let (mock, mut scope) = connect();
	scope.disconnect().unwrap();
	assert!(mock.is_closed());
	assert!(!scope.is_connected());
	assert!(matches!(scope.stop(), Err(Error::NotConnected)));
	scope.disconnect().unwrap();
}

#[test]
fn snapshot_serializes() {
	let (mock, mut scope) = connect();
	mock.reply(":TIMebase:MAIN:SCALe", "1.000000e-03")
		.reply(":TRIGger:MODE", "EDGE")
		.reply(":TRIGger:SWEep", "NORM")
		.reply(":TRIGger:STATus", "TD");
	for n in 1..=2 {
		mock.reply(&format!(":CHANnel{}:DISPlay", n), "1")
			.reply(&format!(":CHANnel{}:SCALe", n), "2.000000e-01")
			.reply(&format!(":CHANnel{}:OFFSet", n), "0.000000e+00")
			.reply(&format!(":CHANnel{}:PROBe", n), "1.000000e+00")
			.reply(&format!(":CHANnel{}:COUPling", n), "DC");
	}

	let snapshot = scope.snapshot().unwrap();
	assert_eq!(snapshot.trigger_mode, TriggerMode::Edge);
	assert_eq!(snapshot.trigger_sweep, Sweep::Normal);
	assert_eq!(snapshot.trigger_status, TriggerStatus::Triggered);
	assert_eq!(snapshot.ch2.scale, 0.2);

	let json = serde_json::to_string(&snapshot).unwrap();
	assert!(json.contains("\"model\":\"DS2202\""));
	assert!(json.contains("\"time_scale\":0.001"));
}

#[test]
fn system_commands() {
	let (mock, mut scope) = connect();
	scope.autoscale().unwrap();
	scope.single().unwrap();
	scope.force_trigger().unwrap();
	scope.level_50().unwrap();
	assert_eq!(mock.sent(), vec![":AUToscale", ":SINGle", ":TFORce", ":TLHAlf"]);
}
