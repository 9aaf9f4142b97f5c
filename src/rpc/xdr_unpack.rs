use crate::error::{Error, Result};
use crate::xdr::Unpacker;
use crate::rpc::{REPLY, MSG_DENIED, RPC_MISMATCH, AUTH_ERROR, MSG_ACCEPTED, PROG_UNAVAIL, PROG_MISMATCH, PROC_UNAVAIL, GARBAGE_ARGS, SUCCESS};

fn rpc_err(msg:&str) -> Error { Error::Rpc(msg.to_owned()) }

pub fn unpack_auth(unpacker:&mut Unpacker) -> Result<(i32, Vec<u8>)> {
	let flavor:i32    = unpacker.unpack_enum()?;
	let stuff:Vec<u8> = unpacker.unpack_variable_len_opaque()?;
	Ok((flavor, stuff))
}

/// Reads an accepted, successful reply header and returns its transaction id.
pub fn unpack_replyheader(unpacker:&mut Unpacker) -> Result<u32> {
	let xid:u32 = unpacker.unpack_u32()?;

	let mtype:i32 = unpacker.unpack_enum()?;
	if mtype != REPLY { return Err(rpc_err("Expected REPLY message type")); }

	match unpacker.unpack_enum()? {
		MSG_DENIED => {
			match unpacker.unpack_enum()? {
				RPC_MISMATCH => {
					let low:u32  = unpacker.unpack_u32()?;
					let high:u32 = unpacker.unpack_u32()?;
					return Err(Error::Rpc(format!("Message denied, server supports RPC versions {} to {}", low, high)))
				},
				AUTH_ERROR => {
					let stat:u32 = unpacker.unpack_u32()?;
					return Err(Error::Rpc(format!("Message denied due to AUTH_ERROR ({})", stat)))
				}
				_ => return Err(rpc_err("Message denied for an unknown reason")),
			}
		},
		MSG_ACCEPTED => { },
		_            => return Err(rpc_err("Neither MSG_DENIED nor MSG_ACCEPTED in reply")),
	}

	let _verf = unpack_auth(unpacker)?;

	match unpacker.unpack_enum()? {
		SUCCESS       => Ok(xid),
		PROG_UNAVAIL  => Err(rpc_err("Program unavailable")),
		PROG_MISMATCH => {
			let low:u32  = unpacker.unpack_u32()?;
			let high:u32 = unpacker.unpack_u32()?;
			Err(Error::Rpc(format!("Program mismatch, server supports versions {} to {}", low, high)))
		},
		PROC_UNAVAIL  => Err(rpc_err("Procedure unavailable")),
		GARBAGE_ARGS  => Err(rpc_err("Garbage args")),
		_             => Err(rpc_err("Call failed for an unknown reason")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::xdr::Packer;

	fn reply(words:&[i32]) -> Unpacker {
		let mut p = Packer::new();
		for w in words { p.pack_i32(*w).unwrap(); }
		let mut u = Unpacker::new();
		u.reset(p.get_buf());
		u
	}

	#[test]
	fn accepted_reply_yields_xid() {
		// xid, REPLY, MSG_ACCEPTED, verf flavor, verf len, SUCCESS
		let mut u = reply(&[42, REPLY, MSG_ACCEPTED, 0, 0, SUCCESS]);
		assert_eq!(unpack_replyheader(&mut u).unwrap(), 42);
	}

	#[test]
	fn program_unavailable_is_an_rpc_error() {
		let mut u = reply(&[1, REPLY, MSG_ACCEPTED, 0, 0, PROG_UNAVAIL]);
		match unpack_replyheader(&mut u) {
			Err(Error::Rpc(msg)) => assert_eq!(msg, "Program unavailable"),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn denied_version_mismatch_reports_range() {
		let mut u = reply(&[1, REPLY, MSG_DENIED, RPC_MISMATCH, 2, 2]);
		assert!(matches!(unpack_replyheader(&mut u), Err(Error::Rpc(_))));
	}
}
