
use std::env;
use std::fs;
use std::process;

use log::error;

use ds2000::{Config, DS2000, Error, Result};

fn run() -> Result<()> {
	let args:Vec<String> = env::args().collect();
	let host = match args.get(1) {
		Some(h) => h.as_str(),
		None => {
			eprintln!("Usage: ds2000_state <host> [config.json]");
			process::exit(2);
		},
	};

	let config = match args.get(2) {
		Some(path) => Config::from_json_str(&fs::read_to_string(path)?)?,
		None => Config::default(),
	};

	let mut scope = DS2000::connect(host, config)?;
	let snapshot = scope.snapshot()?;
	let json = serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Config(e.to_string()))?;
	println!("{}", json);

	scope.disconnect()
}

pub fn main() {
	env_logger::init();

	if let Err(e) = run() {
		error!("{}", e);
		process::exit(1);
	}
}
