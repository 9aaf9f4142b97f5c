use std::io::{self, Error, ErrorKind};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

fn err(msg:&str) -> io::Error { Error::new(ErrorKind::InvalidData, msg) }

fn padding(n:usize) -> usize { (4 - n % 4) % 4 }

#[derive(Debug, Default)]
pub struct Packer {
	buff: Vec<u8>
}

#[derive(Debug, Default)]
pub struct Unpacker {
	buff: Vec<u8>,
	pos: usize,
}

impl Packer {

	pub fn new() -> Self { Packer{buff: Vec::new()} }

	pub fn reset(&mut self) { self.buff.clear(); }

	pub fn get_buf(&self) -> &[u8] { &self.buff }

	// Packing methods that can only add multiples of four bytes, so if we started off with the correct
	// padding, we'll end up with the correct padding
	pub fn pack_u32(&mut self, x:u32) -> io::Result<()> { self.buff.write_u32::<BigEndian>(x) }
	pub fn pack_i32(&mut self, x:i32) -> io::Result<()> { self.buff.write_i32::<BigEndian>(x) }

	pub fn pack_bool(&mut self, b:bool) -> io::Result<()> { self.pack_i32(if b { 1 } else { 0 }) }

	pub fn pack_enum(&mut self, x:i32) -> io::Result<()> { self.pack_i32(x) }

	pub fn pack_variable_len_opaque(&mut self, data:&[u8]) -> io::Result<()> {
		if data.len() > u32::MAX as usize {
			return Err(Error::new(ErrorKind::InvalidInput, "Opaque data too long for XDR"));
		}
		self.pack_u32(data.len() as u32)?;
		self.buff.extend_from_slice(data);
		self.buff.extend(std::iter::repeat(0).take(padding(data.len())));
		Ok(())
	}

	pub fn pack_string(&mut self, s:&str) -> io::Result<()> {
		if !s.is_ascii() { return Err(Error::new(ErrorKind::InvalidInput, "XDR strings must be ASCII")); }
		self.pack_variable_len_opaque(s.as_bytes())
	}

}

impl Unpacker {

	pub fn new() -> Self { Unpacker{buff: Vec::new(), pos: 0} }

	pub fn reset(&mut self, data:&[u8]) {
		self.buff.clear();
		self.buff.extend_from_slice(data);
		self.pos = 0;
	}

	pub fn remaining(&self) -> usize { self.buff.len() - self.pos }
	pub fn all_data_consumed(&self) -> bool { self.remaining() == 0 }

	fn take(&mut self, n:usize) -> io::Result<&[u8]> {
		if n > self.remaining() { return Err(err("Tried to read past the end of the buffer")); }
		let start = self.pos;
		self.pos += n;
		Ok(&self.buff[start..self.pos])
	}

	pub fn unpack_u32(&mut self) -> io::Result<u32> { self.take(4).map(BigEndian::read_u32) }
	pub fn unpack_i32(&mut self) -> io::Result<i32> { self.take(4).map(BigEndian::read_i32) }

	// An enum is just an i32 with a restricted set of values.  We can't check that this value is in the restricted set at this
	// level because it depends on the application, so for our purposes here, an enum is the same as an i32
	pub fn unpack_enum(&mut self) -> io::Result<i32> { self.unpack_i32() }

	pub fn unpack_bool(&mut self) -> io::Result<bool> {
		match self.unpack_i32()? {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(err("Expected 0 or 1 in unpack_bool")),
		}
	}

	pub fn unpack_variable_len_opaque(&mut self) -> io::Result<Vec<u8>> {
		let n = self.unpack_u32()? as usize;
		let ans:Vec<u8> = self.take(n)?.to_vec();
		self.take(padding(n))?;
		Ok(ans)
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_is_padded_to_four_bytes() {
		let mut p = Packer::new();
		p.pack_variable_len_opaque(b"inst0").unwrap();
		assert_eq!(p.get_buf(), &[0, 0, 0, 5, b'i', b'n', b's', b't', b'0', 0, 0, 0][..]);
	}

	#[test]
	fn unpacks_in_order_and_skips_padding() {
		let mut p = Packer::new();
		p.pack_i32(-3).unwrap();
		p.pack_variable_len_opaque(b"RIGOL").unwrap();
		p.pack_bool(true).unwrap();

		let mut u = Unpacker::new();
		u.reset(p.get_buf());
		assert_eq!(u.unpack_i32().unwrap(), -3);
		assert_eq!(u.unpack_variable_len_opaque().unwrap(), b"RIGOL".to_vec());
		assert!(u.unpack_bool().unwrap());
		assert!(u.all_data_consumed());
	}

	#[test]
	fn bad_bool_is_an_error() {
		let mut u = Unpacker::new();
		u.reset(&[0, 0, 0, 2]);
		assert!(u.unpack_bool().is_err());
	}

	#[test]
	fn short_buffer_is_an_error() {
		let mut u = Unpacker::new();
		u.reset(&[0, 0, 1]);
		assert!(u.unpack_u32().is_err());
	}
}
