use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Placeholder tokens, longest first so `YYYY` wins over `YY`.
const TOKENS: [&str; 9] = ["YYYY", "YY", "MM", "DD", "HH", "hh", "mm", "ss", "A"];

/// Render a timestamp by substituting calendar tokens in `layout`.
///
/// `YYYY` year, `YY` two-digit year, `MM` month, `DD` day, `HH` 24-hour,
/// `hh` 12-hour, `mm` minute, `ss` second, `A` AM/PM. Everything else is
/// copied through.
pub fn date_format<Tz: TimeZone>(value: &DateTime<Tz>, layout: &str) -> String {
	let mut out = String::with_capacity(layout.len() + 8);
	let mut rest = layout;

	while !rest.is_empty() {
		if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
			push_token(&mut out, value, token);
			rest = &rest[token.len()..];
			continue;
		}

		let Some(ch) = rest.chars().next() else {
			break;
		};
		out.push(ch);
		rest = &rest[ch.len_utf8()..];
	}

	out
}

fn push_token<Tz: TimeZone>(out: &mut String, value: &DateTime<Tz>, token: &str) {
	let rendered = match token {
		"YYYY" => format!("{:04}", value.year()),
		"YY" => format!("{:02}", value.year().rem_euclid(100)),
		"MM" => format!("{:02}", value.month()),
		"DD" => format!("{:02}", value.day()),
		"HH" => format!("{:02}", value.hour()),
		"hh" => format!("{:02}", value.hour12().1),
		"mm" => format!("{:02}", value.minute()),
		"ss" => format!("{:02}", value.second()),
		"A" => if value.hour12().0 { "PM" } else { "AM" }.to_owned(),
		_ => token.to_owned(),
	};
	out.push_str(&rendered);
}
