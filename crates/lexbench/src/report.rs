/// Formats `value` with a comma between every group of three digits, e.g. `1,234,567`.
pub fn format_grouped(value: u128) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(digit);
	}
	grouped
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn groups_thousands() {
		assert_eq!(format_grouped(0), "0");
		assert_eq!(format_grouped(999), "999");
		assert_eq!(format_grouped(1000), "1,000");
		assert_eq!(format_grouped(123456), "123,456");
		assert_eq!(format_grouped(1234567), "1,234,567");
		assert_eq!(format_grouped(u64::MAX as u128), "18,446,744,073,709,551,615");
	}
}
