use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use byteorder::{BigEndian, WriteBytesExt, ReadBytesExt};
use log::trace;

use crate::error::{Error, Result};
use crate::xdr;
use super::{xdr_pack, xdr_unpack, LAST_FRAGMENT};

/// ONC-RPC client over a TCP stream using record marking.
pub struct TcpClient {
	stream: TcpStream,
	pub prog: u32,
	pub vers: u32,
	lastxid: u32,
	pub packer: xdr::Packer,
	pub unpacker: xdr::Unpacker,
}

impl TcpClient {

	pub fn connect<A: ToSocketAddrs>(addr: A, prog: u32, vers: u32, timeout: Option<Duration>) -> Result<Self> {
		let stream = TcpStream::connect(addr)?;
		stream.set_read_timeout(timeout)?;
		stream.set_write_timeout(timeout)?;
		stream.set_nodelay(true)?;
		Ok(Self{ stream, prog, vers, lastxid: 0, packer: xdr::Packer::new(), unpacker: xdr::Unpacker::new() })
	}

	/// Resets the packer and writes a call header for procedure `prc`. Arguments are packed after this.
	pub fn start_call(&mut self, prc:u32) -> Result<()> {
		self.lastxid = self.lastxid.wrapping_add(1);
		self.packer.reset();
		xdr_pack::pack_callheader_no_auth(&mut self.packer, self.lastxid, self.prog, self.vers, prc)?;
		Ok(())
	}

	/// Sends the packed call and leaves the matching reply body in the unpacker.
	pub fn do_call(&mut self) -> Result<()> {
		let call:&[u8] = self.packer.get_buf();
		if !call.is_empty() {
			let mut send_bytes:Vec<u8> = Vec::with_capacity(call.len() + 4);
			send_bytes.write_u32::<BigEndian>(call.len() as u32 | LAST_FRAGMENT)?;
			send_bytes.extend_from_slice(call);
			self.stream.write_all(&send_bytes)?;
		}

		loop {
			let reply:Vec<u8> = self.read_record()?;

			// Load the response into the unpacker and make sure the xid matches
			self.unpacker.reset(&reply);
			let xid = xdr_unpack::unpack_replyheader(&mut self.unpacker)?;
			if xid == self.lastxid {
				return Ok(());
			} else if xid < self.lastxid {
				trace!("discarding stale RPC reply {} (expected {})", xid, self.lastxid);
				continue;
			} else {
				return Err(Error::Rpc(format!("Got reply {} to a call that was never made", xid)));
			}
		}
	}

	fn read_record(&mut self) -> Result<Vec<u8>> {
		let mut reply:Vec<u8> = vec![];
		let mut last:bool = false;
		while !last {
			let x:u32 = self.stream.read_u32::<BigEndian>()?;
			last = (x & LAST_FRAGMENT) != 0;
			let n = (x & !LAST_FRAGMENT) as usize;

			let start = reply.len();
			reply.resize(start + n, 0);
			self.stream.read_exact(&mut reply[start..])?;
		}
		Ok(reply)
	}

}
