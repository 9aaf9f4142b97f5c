// Device core
pub const DEVICE_CORE_PROG:u32  = 0x0607af;
pub const DEVICE_CORE_VERS:u32  = 1;
pub const CREATE_LINK:u32       = 10;
pub const DEVICE_WRITE:u32      = 11;
pub const DEVICE_READ:u32       = 12;
pub const DESTROY_LINK:u32      = 23;

pub const CLIENT_ID:i32 = 3333;

pub const OPERATION_FLAGS_NONE:i32 = 0;
pub const OPERATION_FLAGS_END_ONLY:i32 = 8;

// Reason bits in a device_read reply
pub const REASON_REQCNT:i32 = 1;
pub const REASON_CHR:i32    = 2;
pub const REASON_END:i32    = 4;

// Upper bound on bytes requested per device_read call
pub const READ_CHUNK_SIZE:u32 = 1024 * 1024;

use std::time::Duration;

use log::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::rpc::port_mapping::{TcpPortMapperClient, Mapping};
use crate::rpc::tcp_clients::TcpClient;
use crate::transport::Transport;

pub mod xdr_pack;

pub struct CoreClient {
	client: TcpClient,
	opt_link: Option<Link>,
	io_timeout: u32,
	lock_timeout: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Link {
	pub link_id: i32,
	pub abort_port: u16,
	pub max_recv_size: u32,
}

fn check(operation:&'static str, error:i32) -> Result<()> {
	if error == 0 { Ok(()) } else { Err(Error::vxi11(operation, error)) }
}

impl CoreClient {

	fn get_link(&self) -> Result<Link> { self.opt_link.ok_or(Error::NotConnected) }

	pub fn new(host:&str, config:&Config) -> Result<Self> {
		let timeout = Some(Duration::from_millis(config.io_timeout_ms as u64 + config.lock_timeout_ms as u64));

		// Find the port to use for the core program
		let mut pmap_client = TcpPortMapperClient::new(host, timeout)?;
		let port = pmap_client.get_port(&Mapping::tcp(DEVICE_CORE_PROG, DEVICE_CORE_VERS))?;
		debug!("{} exports the VXI-11 core channel on port {}", host, port);

		let client = TcpClient::connect((host, port), DEVICE_CORE_PROG, DEVICE_CORE_VERS, timeout)?;

		Ok(CoreClient{ client, opt_link: None, io_timeout: config.io_timeout_ms, lock_timeout: config.lock_timeout_ms })
	}

	pub fn link(&self) -> Option<Link> { self.opt_link }

	pub fn create_link(&mut self, device:&str) -> Result<Link> {
		if let Some(link) = self.opt_link {
			return Err(Error::state(format!("already connected to link {}", link.link_id)));
		}

		self.client.start_call(CREATE_LINK)?;
		xdr_pack::pack_create_link_parms(&mut self.client.packer, CLIENT_ID, false, self.lock_timeout, device)?;
		self.client.do_call()?;

		let error:i32         = self.client.unpacker.unpack_i32()?;
		let link_id:i32       = self.client.unpacker.unpack_i32()?;
		let abort_port:u32    = self.client.unpacker.unpack_u32()?;
		let max_recv_size:u32 = self.client.unpacker.unpack_u32()?;
		check("create_link", error)?;

		let link = Link{ link_id, abort_port: abort_port as u16, max_recv_size };
		info!("created VXI-11 link {} to {}", link_id, device);
		self.opt_link = Some(link);
		Ok(link)
	}

	/// Writes `data`, split into chunks no larger than the device's receive buffer. Only the last chunk carries END.
	pub fn write(&mut self, data:&[u8]) -> Result<()> {
		let link = self.get_link()?;
		let chunk_size = if link.max_recv_size == 0 { data.len().max(1) } else { link.max_recv_size as usize };

		let mut chunks = data.chunks(chunk_size).peekable();
		while let Some(chunk) = chunks.next() {
			let flags = if chunks.peek().is_none() { OPERATION_FLAGS_END_ONLY } else { OPERATION_FLAGS_NONE };

			self.client.start_call(DEVICE_WRITE)?;
			xdr_pack::pack_device_write_parms(&mut self.client.packer, link.link_id, self.io_timeout, self.lock_timeout, flags, chunk)?;
			self.client.do_call()?;

			let error:i32 = self.client.unpacker.unpack_i32()?;
			let size:u32  = self.client.unpacker.unpack_u32()?;
			check("device_write", error)?;

			if size as usize != chunk.len() {
				return Err(Error::Rpc(format!("Device accepted {} of {} bytes", size, chunk.len())));
			}
		}
		Ok(())
	}

	/// Reads until the device signals END. Binary blocks larger than one chunk take several calls.
	pub fn read(&mut self) -> Result<Vec<u8>> {
		let link = self.get_link()?;
		let mut ans:Vec<u8> = vec![];

		loop {
			self.client.start_call(DEVICE_READ)?;
			xdr_pack::pack_device_read_parms(&mut self.client.packer, link.link_id, READ_CHUNK_SIZE, self.io_timeout, self.lock_timeout, OPERATION_FLAGS_NONE, 0)?;
			self.client.do_call()?;

			let error:i32    = self.client.unpacker.unpack_i32()?;
			let reason:i32   = self.client.unpacker.unpack_i32()?;
			let data:Vec<u8> = self.client.unpacker.unpack_variable_len_opaque()?;
			check("device_read", error)?;

			ans.extend_from_slice(&data);
			if reason & (REASON_END | REASON_CHR) != 0 { return Ok(ans); }
			if reason & REASON_REQCNT == 0 {
				return Err(Error::Rpc(format!("Unexpected reason {:#x} in device_read reply", reason)));
			}
		}
	}

	pub fn destroy_link(&mut self) -> Result<()> {
		let link = self.get_link()?;

		self.client.start_call(DESTROY_LINK)?;
		xdr_pack::pack_device_link(&mut self.client.packer, link.link_id)?;
		self.client.do_call()?;

		let device_error:i32 = self.client.unpacker.unpack_i32()?;
		self.opt_link = None;
		check("destroy_link", device_error)?;
		info!("destroyed VXI-11 link {}", link.link_id);
		Ok(())
	}

}

impl Transport for CoreClient {
	fn write(&mut self, data:&[u8]) -> Result<()> { CoreClient::write(self, data) }
	fn read(&mut self) -> Result<Vec<u8>> { CoreClient::read(self) }

	fn close(&mut self) -> Result<()> {
		if self.opt_link.is_some() { self.destroy_link() } else { Ok(()) }
	}
}
