use std::io;

use crate::xdr::Packer;

pub fn pack_device_link(packer:&mut Packer, link:i32) -> io::Result<()> {
	packer.pack_i32(link)
}

pub fn pack_create_link_parms(packer:&mut Packer, id:i32, lock_device:bool, lock_timeout:u32, device:&str) -> io::Result<()> {
	packer.pack_i32(id)?;
	packer.pack_bool(lock_device)?;
	packer.pack_u32(lock_timeout)?;
	packer.pack_string(device)
}

pub fn pack_device_write_parms(packer:&mut Packer, link:i32, timeout:u32, lock_timeout:u32, flags:i32, data:&[u8]) -> io::Result<()> {
	packer.pack_i32(link)?;
	packer.pack_u32(timeout)?;
	packer.pack_u32(lock_timeout)?;
	packer.pack_i32(flags)?;
	packer.pack_variable_len_opaque(data)
}

pub fn pack_device_read_parms(packer:&mut Packer, link:i32, request_size:u32, timeout:u32, lock_timeout:u32, flags:i32, term_char:i32) -> io::Result<()> {
	packer.pack_i32(link)?;
	packer.pack_u32(request_size)?;
	packer.pack_u32(timeout)?;
	packer.pack_u32(lock_timeout)?;
	packer.pack_i32(flags)?;
	packer.pack_i32(term_char)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn create_link_parms_carry_device_name() {
		let mut p = Packer::new();
		pack_create_link_parms(&mut p, 3333, false, 10000, "inst0").unwrap();
		let buf = p.get_buf();
		assert_eq!(buf.len(), 4 * 4 + 8);
		assert_eq!(&buf[16..21], b"inst0");
	}

	#[test]
	fn non_ascii_device_name_is_rejected() {
		let mut p = Packer::new();
		assert!(pack_create_link_parms(&mut p, 3333, false, 10000, "instö").is_err());
	}
}
