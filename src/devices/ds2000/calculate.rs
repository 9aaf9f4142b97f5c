//! `:CALCulate`, the math channel.

use crate::error::{Error, Result};
use crate::scpi::{Mnemonic, Scpi};
use crate::validate::{check_range, check_range_i64};

use super::common::Source;

const MODE:&str = ":CALCulate:MODE";

pub const MAX_VARIABLE:f64 = 9.9999e9;
/// The vertical offset may move the trace this many divisions away from the center.
pub const OFFSET_DIVISIONS:f64 = 40.0;

mnemonic! {
	pub enum MathMode {
		Add      => ("ADD", "ADD", "A+B"),
		Subtract => ("SUB", "SUB", "A-B"),
		Multiply => ("MULTiply", "MULT", "A×B"),
		Divide   => ("DIVision", "DIV", "A÷B"),
		Fft      => ("FFT", "FFT", "FFT"),
		Logic    => ("LOGic", "LOG", "logic"),
		Advanced => ("ADVanced", "ADV", "advanced"),
		Off      => ("OFF", "OFF", "off"),
	}
}

mnemonic! {
	/// Operations combining two sources. They share source, invert, scale and offset settings.
	pub enum Operation {
		Add      => ("ADD", "ADD", "A+B"),
		Subtract => ("SUB", "SUB", "A-B"),
		Multiply => ("MULTiply", "MULT", "A×B"),
		Divide   => ("DIVision", "DIV", "A÷B"),
		Logic    => ("LOGic", "LOG", "logic"),
	}
}

impl Operation {
	/// Valid vertical scale range of the result.
	pub fn scale_range(self) -> (f64, f64) {
		match self {
			Operation::Add | Operation::Subtract => (0.02, 500.0),
			Operation::Multiply => (5e-8, 1e7),
			Operation::Divide => (5e-7, 5e8),
			Operation::Logic => (0.05, 100.0),
		}
	}
}

mnemonic! {
	pub enum FftWindow {
		Rectangle => ("RECTangle", "RECT", "rectangle"),
		Hanning   => ("HANNing", "HANN", "Hanning"),
		Hamming   => ("HAMMing", "HAMM", "Hamming"),
		Blackman  => ("BLACkman", "BLAC", "Blackman"),
	}
}

mnemonic! {
	pub enum FftScale {
		Vrms   => ("VRMS", "VRMS", "Vrms"),
		DbVrms => ("DBVRms", "DBVR", "dBVrms"),
	}
}

mnemonic! {
	pub enum LogicOperator {
		And => ("AND", "AND", "AND"),
		Or  => ("OR", "OR", "OR"),
		Not => ("NOT", "NOT", "NOT"),
		Xor => ("XOR", "XOR", "XOR"),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand { A, B }

impl Operand {
	fn letter(self) -> char { match self { Operand::A => 'A', Operand::B => 'B' } }
}

/// Checks an offset against the scale currently set under `prefix`.
fn check_offset(scpi:&mut Scpi, prefix:&str, offset:f64) -> Result<()> {
	let scale = scpi.query_f64(&format!("{}:VSCale", prefix))?;
	let limit = OFFSET_DIVISIONS * scale;
	check_range("offset", offset, -limit, limit, "")
}

pub struct Calculate<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Calculate<'a> {

	pub(crate) fn new(scpi:&'a mut Scpi) -> Self { Self{ scpi } }

	pub fn set_mode(&mut self, mode:MathMode) -> Result<()> { self.scpi.set_mnemonic(MODE, mode) }
	pub fn mode(&mut self) -> Result<MathMode>              { self.scpi.query_mnemonic(MODE) }

	pub fn operation(self, op:Operation) -> Arithmetic<'a> { Arithmetic{ scpi: self.scpi, op } }
	pub fn fft(self) -> Fft<'a>                            { Fft{ scpi: self.scpi } }
	pub fn logic(self) -> Logic<'a>                        { Logic{ scpi: self.scpi } }
	pub fn advanced(self) -> Advanced<'a>                  { Advanced{ scpi: self.scpi } }

}

pub struct Arithmetic<'a> {
	scpi: &'a mut Scpi,
	op: Operation,
}

impl<'a> Arithmetic<'a> {

	fn path(&self, leaf:&str) -> String { format!(":CALCulate:{}:{}", self.op.command_token(), leaf) }

	pub fn operation(&self) -> Operation { self.op }

	pub fn set_source(&mut self, operand:Operand, source:Source) -> Result<()> {
		let p = self.path(&format!("S{}", operand.letter()));
		self.scpi.set_mnemonic(&p, source)
	}

	pub fn source(&mut self, operand:Operand) -> Result<Source> {
		let p = self.path(&format!("S{}", operand.letter()));
		self.scpi.query_mnemonic(&p)
	}

	pub fn set_invert(&mut self, on:bool) -> Result<()> { let p = self.path("INVert"); self.scpi.set_bool(&p, on) }
	pub fn invert(&mut self) -> Result<bool>           { let p = self.path("INVert"); self.scpi.query_bool(&p) }

	pub fn set_scale(&mut self, scale:f64) -> Result<()> {
		let (min, max) = self.op.scale_range();
		check_range("scale", scale, min, max, "")?;
		let p = self.path("VSCale");
		self.scpi.set_f64(&p, scale)
	}

	pub fn scale(&mut self) -> Result<f64> { let p = self.path("VSCale"); self.scpi.query_f64(&p) }

	pub fn set_offset(&mut self, offset:f64) -> Result<()> {
		let prefix = format!(":CALCulate:{}", self.op.command_token());
		check_offset(self.scpi, &prefix, offset)?;
		self.scpi.set_f64(&format!("{}:VOFFset", prefix), offset)
	}

	pub fn offset(&mut self) -> Result<f64> { let p = self.path("VOFFset"); self.scpi.query_f64(&p) }

}

/// Logic math: the arithmetic settings plus an operator and per-source thresholds.
pub struct Logic<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Logic<'a> {

	pub fn common(&mut self) -> Arithmetic<'_> { Arithmetic{ scpi: &mut *self.scpi, op: Operation::Logic } }

	pub fn set_operator(&mut self, op:LogicOperator) -> Result<()> { self.scpi.set_mnemonic(":CALCulate:LOGic:OPERator", op) }
	pub fn operator(&mut self) -> Result<LogicOperator>           { self.scpi.query_mnemonic(":CALCulate:LOGic:OPERator") }

	pub fn set_threshold(&mut self, operand:Operand, volts:f64) -> Result<()> {
		self.scpi.set_f64(&format!(":CALCulate:LOGic:{}THReshold", operand.letter()), volts)
	}

	pub fn threshold(&mut self, operand:Operand) -> Result<f64> {
		self.scpi.query_f64(&format!(":CALCulate:LOGic:{}THReshold", operand.letter()))
	}

}

pub struct Fft<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Fft<'a> {

	pub fn set_source(&mut self, source:Source) -> Result<()> { self.scpi.set_mnemonic(":CALCulate:FFT:SOURce", source) }
	pub fn source(&mut self) -> Result<Source>                { self.scpi.query_mnemonic(":CALCulate:FFT:SOURce") }

	pub fn set_window(&mut self, w:FftWindow) -> Result<()> { self.scpi.set_mnemonic(":CALCulate:FFT:WINDow", w) }
	pub fn window(&mut self) -> Result<FftWindow>           { self.scpi.query_mnemonic(":CALCulate:FFT:WINDow") }

	/// Half screen FFT with the source waveform on the other half.
	pub fn set_split(&mut self, on:bool) -> Result<()> { self.scpi.set_bool(":CALCulate:FFT:SPLit", on) }
	pub fn split(&mut self) -> Result<bool>           { self.scpi.query_bool(":CALCulate:FFT:SPLit") }

	pub fn set_vertical_mode(&mut self, m:FftScale) -> Result<()> { self.scpi.set_mnemonic(":CALCulate:FFT:VSMode", m) }
	pub fn vertical_mode(&mut self) -> Result<FftScale>           { self.scpi.query_mnemonic(":CALCulate:FFT:VSMode") }

	pub fn set_vertical_scale(&mut self, scale:f64) -> Result<()> { self.scpi.set_f64(":CALCulate:FFT:VSCale", scale) }
	pub fn vertical_scale(&mut self) -> Result<f64>              { self.scpi.query_f64(":CALCulate:FFT:VSCale") }

	pub fn set_vertical_offset(&mut self, offset:f64) -> Result<()> {
		check_offset(self.scpi, ":CALCulate:FFT", offset)?;
		self.scpi.set_f64(":CALCulate:FFT:VOFFset", offset)
	}

	pub fn vertical_offset(&mut self) -> Result<f64> { self.scpi.query_f64(":CALCulate:FFT:VOFFset") }

	/// Horizontal zoom factor, 1 to 4.
	pub fn set_horizontal_scale(&mut self, factor:u8) -> Result<()> {
		check_range_i64("horizontal scale", factor as i64, 1, 4)?;
		self.scpi.set_i64(":CALCulate:FFT:HSCale", factor as i64)
	}

	pub fn horizontal_scale(&mut self) -> Result<u8> { self.scpi.query_int(":CALCulate:FFT:HSCale") }

	pub fn set_horizontal_offset(&mut self, hz:f64) -> Result<()> { self.scpi.set_f64(":CALCulate:FFT:HOFFset", hz) }
	pub fn horizontal_offset(&mut self) -> Result<f64>           { self.scpi.query_f64(":CALCulate:FFT:HOFFset") }

	pub fn set_span(&mut self, hz:f64) -> Result<()> { self.scpi.set_f64(":CALCulate:FFT:HSPan", hz) }
	pub fn span(&mut self) -> Result<f64>           { self.scpi.query_f64(":CALCulate:FFT:HSPan") }

	pub fn set_center(&mut self, hz:f64) -> Result<()> { self.scpi.set_f64(":CALCulate:FFT:HCENter", hz) }
	pub fn center(&mut self) -> Result<f64>           { self.scpi.query_f64(":CALCulate:FFT:HCENter") }

}

/// User defined expression math.
pub struct Advanced<'a> {
	scpi: &'a mut Scpi,
}

impl<'a> Advanced<'a> {

	/// Expression such as `CH1+CH2*VAR1`. It must not contain a double quote.
	pub fn set_expression(&mut self, expr:&str) -> Result<()> {
		if expr.contains('"') || !expr.is_ascii() {
			return Err(Error::OutOfRange{ name: "expression", message: format!("must be ASCII without quotes, got {:?}", expr) });
		}
		self.scpi.write(&format!(":CALCulate:ADVanced:EXPRession \"{}\"", expr))
	}

	pub fn expression(&mut self) -> Result<String> {
		let reply = self.scpi.query_str(":CALCulate:ADVanced:EXPRession")?;
		Ok(reply.trim().trim_matches('"').to_owned())
	}

	pub fn set_invert(&mut self, on:bool) -> Result<()> { self.scpi.set_bool(":CALCulate:ADVanced:INVert", on) }
	pub fn invert(&mut self) -> Result<bool>           { self.scpi.query_bool(":CALCulate:ADVanced:INVert") }

	/// Value of `VAR1` or `VAR2`, selected by `index`.
	pub fn set_variable(&mut self, index:u8, value:f64) -> Result<()> {
		check_range_i64("variable", index as i64, 1, 2)?;
		check_range("variable value", value, -MAX_VARIABLE, MAX_VARIABLE, "")?;
		self.scpi.set_f64(&format!(":CALCulate:ADVanced:VARiable{}", index), value)
	}

	pub fn variable(&mut self, index:u8) -> Result<f64> {
		check_range_i64("variable", index as i64, 1, 2)?;
		self.scpi.query_f64(&format!(":CALCulate:ADVanced:VARiable{}", index))
	}

	pub fn set_scale(&mut self, scale:f64) -> Result<()> {
		check_range("scale", scale, 0.02, 500.0, "")?;
		self.scpi.set_f64(":CALCulate:ADVanced:VSCale", scale)
	}

	pub fn scale(&mut self) -> Result<f64> { self.scpi.query_f64(":CALCulate:ADVanced:VSCale") }

	pub fn set_offset(&mut self, offset:f64) -> Result<()> {
		check_offset(self.scpi, ":CALCulate:ADVanced", offset)?;
		self.scpi.set_f64(":CALCulate:ADVanced:VOFFset", offset)
	}

	pub fn offset(&mut self) -> Result<f64> { self.scpi.query_f64(":CALCulate:ADVanced:VOFFset") }

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::transport::MockTransport;

	#[test]
	fn scale_range_depends_on_operation() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		assert!(Calculate::new(&mut scpi).operation(Operation::Add).set_scale(1000.0).is_err());
		Calculate::new(&mut scpi).operation(Operation::Multiply).set_scale(1000.0).unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":CALCulate:MULTiply:VSCale 1000"));
	}

	#[test]
	fn offset_follows_scale() {
		let mock = MockTransport::new();
		mock.reply(":CALCulate:SUB:VSCale", "1.000000e+00");
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		Calculate::new(&mut scpi).operation(Operation::Subtract).set_offset(-40.0).unwrap();
		assert!(Calculate::new(&mut scpi).operation(Operation::Subtract).set_offset(41.0).is_err());
	}

	#[test]
	fn expressions_are_quoted() {
		let mock = MockTransport::new();
		let mut scpi = Scpi::new(Box::new(mock.clone()), Config::default());
		Calculate::new(&mut scpi).advanced().set_expression("CH1*VAR1").unwrap();
		assert_eq!(mock.last_sent().as_deref(), Some(":CALCulate:ADVanced:EXPRession \"CH1*VAR1\""));
		assert_eq!(Calculate::new(&mut scpi).advanced().expression().unwrap(), "CH1*VAR1");
		assert!(Calculate::new(&mut scpi).advanced().set_expression("\"").is_err());
	}
}
