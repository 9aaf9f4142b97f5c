//! Byte-level link to an instrument.
//!
//! `CoreClient` implements [`Transport`] over VXI-11. [`MockTransport`] implements it in memory so
//! that the controllers can be driven without hardware.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;

use crate::error::{Error, Result};

/// A message-based instrument link. Each `write` sends one complete command and each `read`
/// returns one complete response.
pub trait Transport {
	fn write(&mut self, data:&[u8]) -> Result<()>;
	fn read(&mut self) -> Result<Vec<u8>>;

	fn ask(&mut self, data:&[u8]) -> Result<Vec<u8>> {
		self.write(data)?;
		self.read()
	}

	/// Releases the link. Calls after this may fail.
	fn close(&mut self) -> Result<()> { Ok(()) }
}

/// In-memory instrument that remembers what it was told.
///
/// A setter such as `:ACQuire:TYPE AVERages` stores the SCPI short form (`AVER`) under its path,
/// and a later `:ACQuire:TYPE?` answers with it. Replies can also be preloaded with [`MockTransport::reply`].
/// Clones share state, so a test can keep one clone and hand the other to the driver.
#[derive(Clone, Default)]
pub struct MockTransport {
	state: Rc<RefCell<MockState>>,
}

#[derive(Default)]
struct MockState {
	values: HashMap<String, Vec<u8>>,
	pending: VecDeque<Option<Vec<u8>>>,
	sent: Vec<String>,
	failing: bool,
	closed: bool,
}

impl MockTransport {
	pub fn new() -> Self { Self::default() }

	/// Answers queries for `path` (the command without its `?`) with `reply`.
	pub fn reply(&self, path:&str, reply:&str) -> &Self { self.reply_bytes(path, reply.as_bytes()) }

	pub fn reply_bytes(&self, path:&str, reply:&[u8]) -> &Self {
		self.state.borrow_mut().values.insert(path.trim().to_owned(), reply.to_vec());
		self
	}

	/// Every command written so far, in order.
	pub fn sent(&self) -> Vec<String> { self.state.borrow().sent.clone() }

	pub fn last_sent(&self) -> Option<String> { self.state.borrow().sent.last().cloned() }

	pub fn clear_sent(&self) { self.state.borrow_mut().sent.clear(); }

	/// Makes every following call fail as if the connection had dropped.
	pub fn fail(&self, failing:bool) { self.state.borrow_mut().failing = failing; }

	pub fn is_closed(&self) -> bool { self.state.borrow().closed }
}

/// SCPI short form of a parameter: `CHANnel1` becomes `CHAN1`. Numbers and quoted strings are kept.
pub fn short_form(value:&str) -> String {
	value.split(',')
		.map(|part| {
			let part = part.trim();
			if part.parse::<f64>().is_ok() || part.starts_with('"') || !part.chars().any(|c| c.is_ascii_uppercase()) {
				part.to_owned()
			} else {
				part.chars().filter(|c| !c.is_ascii_lowercase()).collect()
			}
		})
		.collect::<Vec<String>>()
		.join(",")
}

impl Transport for MockTransport {
	fn write(&mut self, data:&[u8]) -> Result<()> {
		let mut state = self.state.borrow_mut();
		if state.failing {
			return Err(Error::Io(io::Error::new(io::ErrorKind::ConnectionReset, "mock connection dropped")));
		}
		if state.closed { return Err(Error::NotConnected); }

		let cmd = std::str::from_utf8(data)?.trim().to_owned();
		state.sent.push(cmd.clone());

		if cmd.contains('?') {
			let path = cmd.replacen('?', "", 1);
			let reply = state.values.get(path.trim()).cloned();
			state.pending.push_back(reply);
		} else if let Some((path, value)) = cmd.split_once(' ') {
			state.values.insert(path.to_owned(), short_form(value).into_bytes());
		}
		Ok(())
	}

	fn read(&mut self) -> Result<Vec<u8>> {
		let mut state = self.state.borrow_mut();
		if state.failing {
			return Err(Error::Io(io::Error::new(io::ErrorKind::ConnectionReset, "mock connection dropped")));
		}
		match state.pending.pop_front() {
			Some(Some(mut reply)) => {
				if !reply.ends_with(b"\n") { reply.push(b'\n'); }
				Ok(reply)
			},
			// A real instrument stays silent and the read times out
			_ => Err(Error::vxi11("device_read", 15)),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.state.borrow_mut().closed = true;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_form_drops_lowercase() {
		assert_eq!(short_form("CHANnel1"), "CHAN1");
		assert_eq!(short_form("HRESolution"), "HRES");
		assert_eq!(short_form("720P60HZ"), "720P60HZ");
		assert_eq!(short_form("0.5"), "0.5");
		assert_eq!(short_form("H,L"), "H,L");
		assert_eq!(short_form("\"A+B\""), "\"A+B\"");
	}

	#[test]
	fn remembers_set_values() {
		let mut mock = MockTransport::new();
		mock.write(b":ACQuire:TYPE AVERages").unwrap();
		assert_eq!(mock.ask(b":ACQuire:TYPE?").unwrap(), b"AVER\n".to_vec());
	}

	#[test]
	fn unanswered_query_times_out() {
		let mut mock = MockTransport::new();
		assert!(matches!(mock.ask(b":WHAT?"), Err(Error::Vxi11{ code: 15, .. })));
	}

	#[test]
	fn failing_mock_reports_io_errors() {
		let mut mock = MockTransport::new();
		mock.fail(true);
		assert!(matches!(mock.write(b"*CLS"), Err(Error::Io(_))));
	}
}
