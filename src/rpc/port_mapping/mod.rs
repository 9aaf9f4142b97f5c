pub const PMAP_PROG:u32 = 100000;
pub const PMAP_VERS:u32 = 2;
pub const PMAP_PORT:u16 = 111;

pub const PMAPPROC_GETPORT:u32 = 3;     // (mapping) -> unsigned int

use std::time::Duration;

use crate::error::{Error, Result};

use super::IPPROTO_TCP;
use super::xdr_pack;
use super::tcp_clients::TcpClient;

#[derive(Debug)]
pub struct Mapping {
	pub program: u32,
	pub version: u32,
	pub protocol: u32,
	pub port: u32,
}

impl Mapping {
	pub fn tcp(program:u32, version:u32) -> Self { Self{ program, version, protocol: IPPROTO_TCP, port: 0 } }
}

pub struct TcpPortMapperClient {
	pub host: String,
	tcp_client: TcpClient,
}

impl TcpPortMapperClient {

	pub fn new(host:&str, timeout:Option<Duration>) -> Result<Self> {
		let tcp_client = TcpClient::connect((host, PMAP_PORT), PMAP_PROG, PMAP_VERS, timeout)?;
		Ok(Self{ host: host.to_owned(), tcp_client })
	}

	/// Asks the portmapper which port `m.program` listens on. Zero means the program is not registered.
	pub fn get_port(&mut self, m:&Mapping) -> Result<u16> {
		self.tcp_client.start_call(PMAPPROC_GETPORT)?;
		xdr_pack::pack_mapping(&mut self.tcp_client.packer, m.program, m.version, m.protocol, m.port)?;
		self.tcp_client.do_call()?;

		let ans:u32 = self.tcp_client.unpacker.unpack_u32()?;
		if !self.tcp_client.unpacker.all_data_consumed() {
			return Err(Error::Rpc("Data unexpectedly left over in unpacker after unpacking port".to_owned()));
		}

		match ans {
			0 => Err(Error::Rpc(format!("Program {:#x} is not registered on {}", m.program, self.host))),
			p if p > u16::MAX as u32 => Err(Error::Rpc(format!("Portmapper returned invalid port {}", p))),
			p => Ok(p as u16),
		}
	}

}
