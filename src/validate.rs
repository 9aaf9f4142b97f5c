//! Range checks run before a command is sent. A failed check never reaches the instrument.

use crate::error::{Error, Result};

const PREFIXES:[(i32, &str); 17] = [
	(-24, "y"), (-21, "z"), (-18, "a"), (-15, "f"), (-12, "p"), (-9, "n"), (-6, "µ"), (-3, "m"),
	(0, ""),
	(3, "k"), (6, "M"), (9, "G"), (12, "T"), (15, "P"), (18, "E"), (21, "Z"), (24, "Y"),
];

/// Formats `value` with an engineering SI prefix: `0.0005` with unit `V` becomes `500µV`.
pub fn si_format(value:f64, unit:&str) -> String {
	if value == 0.0 || !value.is_finite() { return format!("{}{}", value, unit); }

	let mut mantissa = value.abs();
	let mut power:i32 = 0;
	while mantissa < 1.0 && power > -24 {
		mantissa *= 1000.0;
		power -= 3;
	}
	while mantissa >= 1000.0 && power < 24 {
		mantissa /= 1000.0;
		power += 3;
	}

	let prefix = PREFIXES.iter().find(|(p, _)| *p == power).map(|(_, s)| *s).unwrap_or("");
	let digits = format!("{:.3}", mantissa);
	let digits = digits.trim_end_matches('0').trim_end_matches('.');
	format!("{}{}{}{}", if value < 0.0 { "-" } else { "" }, digits, prefix, unit)
}

pub fn check_range(name:&'static str, value:f64, min:f64, max:f64, unit:&str) -> Result<()> {
	if value.is_finite() && min <= value && value <= max { return Ok(()); }
	Err(Error::OutOfRange {
		name,
		message: format!("must be between {} and {}, got {}", si_format(min, unit), si_format(max, unit), si_format(value, unit)),
	})
}

pub fn check_range_i64(name:&'static str, value:i64, min:i64, max:i64) -> Result<()> {
	if min <= value && value <= max { return Ok(()); }
	Err(Error::OutOfRange{ name, message: format!("must be between {} and {}, got {}", min, max, value) })
}

/// Accepts `value` if it matches an entry of `allowed` to within floating point noise.
pub fn check_in_set(name:&'static str, value:f64, allowed:&[f64], unit:&str) -> Result<()> {
	if allowed.iter().any(|a| (a - value).abs() <= a.abs() * 1e-9) { return Ok(()); }
	let choices:Vec<String> = allowed.iter().map(|a| si_format(*a, unit)).collect();
	Err(Error::OutOfRange{ name, message: format!("must be one of {}, got {}", choices.join(", "), si_format(value, unit)) })
}

/// Trigger levels must stay on screen: within five divisions of the source channel's offset.
pub fn check_level(level:f64, scale:f64, offset:f64) -> Result<()> {
	check_range("level", level, -5.0 * scale - offset, 5.0 * scale - offset, "V")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn si_prefixes() {
		assert_eq!(si_format(0.0005, "V"), "500µV");
		assert_eq!(si_format(2e-9, "s"), "2ns");
		assert_eq!(si_format(1000.0, "s"), "1ks");
		assert_eq!(si_format(-0.02, "V"), "-20mV");
		assert_eq!(si_format(1.5, ""), "1.5");
		assert_eq!(si_format(0.0, "V"), "0V");
	}

	#[test]
	fn range_messages_use_prefixes() {
		let e = check_range("scale", 20.0, 0.0005, 10.0, "V").unwrap_err();
		assert_eq!(e.to_string(), "Invalid value for \"scale\": must be between 500µV and 10V, got 20V");
	}

	#[test]
	fn range_bounds_are_inclusive() {
		assert!(check_range("t", 4.0, 2e-9, 4.0, "s").is_ok());
		assert!(check_range("t", 2e-9, 2e-9, 4.0, "s").is_ok());
		assert!(check_range("t", 1e-9, 2e-9, 4.0, "s").is_err());
		assert!(check_range("t", f64::NAN, 2e-9, 4.0, "s").is_err());
	}

	#[test]
	fn set_membership_tolerates_rounding() {
		assert!(check_in_set("ratio", 0.1 + 0.2 - 0.2, &[0.1, 1.0], "").is_ok());
		assert!(check_in_set("ratio", 3.0, &[0.1, 1.0], "").is_err());
	}

	#[test]
	fn level_window_follows_offset() {
		// 1 V/div with a 2 V offset puts the screen between -7 V and 3 V
		assert!(check_level(-7.0, 1.0, 2.0).is_ok());
		assert!(check_level(3.0, 1.0, 2.0).is_ok());
		assert!(check_level(3.5, 1.0, 2.0).is_err());
	}
}
