use std::fmt::Write;

use anyconv::conv::Value;

use crate::cmd::util::truncate;

/// Output truncation limits for value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields or entries printed for one struct or map.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one value tree.
pub fn print_value(value: &Value, options: PrintOptions) {
	let mut out = String::new();
	render_value(&mut out, value, 0, 0, options);
	print!("{out}");
}

/// Render one value tree, one scalar or bracket per line.
pub fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	// Writing to a String cannot fail.
	let _ = match value {
		Value::Null => writeln!(out, "{pad}null"),
		Value::Bool(v) => writeln!(out, "{pad}{v}"),
		Value::I64(v) => writeln!(out, "{pad}{v}"),
		Value::U64(v) => writeln!(out, "{pad}{v}"),
		Value::F32(_) | Value::F64(_) => writeln!(out, "{pad}{value}"),
		Value::Bytes(v) => writeln!(out, "{pad}bytes[{}]", v.len()),
		Value::String(v) => writeln!(out, "{pad}\"{}\"", truncate(v, options.max_string_len)),
		Value::Time(v) => writeln!(out, "{pad}{}", v.to_rfc3339()),
		Value::Ext(_) => writeln!(out, "{pad}ext({value})"),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}[... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}[");
			for item in items.iter().take(options.max_array_items) {
				render_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items);
			}
			writeln!(out, "{pad}]")
		}
		Value::Map(map) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{{ ... {} keys }}", map.len());
				return;
			}
			let _ = writeln!(out, "{pad}{{");
			for (key, item) in map.iter().take(options.max_fields_per_struct) {
				render_entry(out, key, item, indent, depth, options);
			}
			if map.len() > options.max_fields_per_struct {
				let _ = writeln!(out, "{pad}  ... {} more keys", map.len() - options.max_fields_per_struct);
			}
			writeln!(out, "{pad}}}")
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{} {{ ... }}", item.type_name);
				return;
			}
			let _ = writeln!(out, "{pad}{} {{", item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				render_entry(out, &field.name, &field.value, indent, depth, options);
			}
			if item.fields.len() > options.max_fields_per_struct {
				let _ = writeln!(out, "{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			writeln!(out, "{pad}}}")
		}
	};
}

fn render_entry(out: &mut String, name: &str, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let _ = write!(out, "{}  {name} = ", " ".repeat(indent));
	if matches!(value, Value::Struct(_) | Value::Array(_) | Value::Map(_)) {
		out.push('\n');
		render_value(out, value, indent + 4, depth + 1, options);
	} else {
		render_value(out, value, 0, depth + 1, options);
	}
}
