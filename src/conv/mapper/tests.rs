use chrono::{DateTime, TimeZone, Utc};

use crate::conv::{Mapping, Value};
use crate::impl_record;

#[derive(Debug, Default)]
struct PostConfig {
	permalink: String,
	summary_lines: i32,
	latest: i64,
	layout: String,
	exclude: String,
}

impl_record!(PostConfig {
	"Permalink" => permalink,
	"Summary_lines" => summary_lines,
	"Latest" => latest,
	"Layout" => layout,
	"Exclude" => exclude,
});

#[derive(Debug, Default)]
struct PageConfig {
	permalink: String,
	layout: String,
}

impl_record!(PageConfig {
	"Permalink" => permalink,
	"Layout" => layout,
});

#[derive(Debug, Default)]
struct TopConfig {
	theme: String,
	production_url: String,
	posts: PostConfig,
	pages: PageConfig,
}

impl_record!(TopConfig {
	"Theme" => theme,
	"Production_url" => production_url,
	"Posts" => posts as record,
	"Pages" => pages as record,
});

#[derive(Debug, Default)]
struct SiteConfig {
	title: String,
	author: Mapping,
	navigation: Vec<String>,
}

impl_record!(SiteConfig {
	"Title" => title,
	"Author" => author,
	"Navigation" => navigation,
});

#[derive(Debug, Default)]
struct PostBean {
	id: String,
	date: DateTime<Utc>,
	draft: bool,
	weight: f64,
	port: u16,
	cover: Option<String>,
	extra: Value,
	meta: Mapping,
}

impl_record!(PostBean {
	"Id" => id,
	"Date" => date,
	"Draft" => draft,
	"Weight" => weight,
	"Port" => port,
	"Cover" => cover,
	"Extra" => extra,
	"Meta" => meta as hidden,
});

#[derive(Debug, Default)]
struct Leaf {
	value: i64,
}

impl_record!(Leaf { "Value" => value });

#[derive(Debug, Default)]
struct Inner {
	leaf: Leaf,
	name: String,
}

impl_record!(Inner {
	"Leaf" => leaf as record,
	"Name" => name,
});

#[derive(Debug, Default)]
struct Outer {
	inner: Inner,
	zeta: String,
}

impl_record!(Outer {
	"Inner" => inner as record,
	"Zeta" => zeta,
});

mod flat_records {
	use super::{PostConfig, SiteConfig};
	use crate::conv::{DynValue, SkipReason, Value, map_to_record};
	use crate::mapping;

	#[derive(Debug)]
	struct Echo;

	impl DynValue for Echo {
		fn type_name(&self) -> &str {
			"Echo"
		}

		fn string_value(&self) -> Option<Value> {
			Some(Value::Map(mapping! { "again" => Value::ext(Echo) }))
		}
	}

	#[test]
	fn self_containing_extension_text_is_bounded() {
		let mut post = PostConfig {
			latest: 5,
			..PostConfig::default()
		};
		let report = map_to_record(&mapping! { "layout" => Value::ext(Echo), "latest" => Value::ext(Echo) }, &mut post);

		assert!(report.is_clean());
		assert!(post.layout.starts_with("map[again:map[again:"));
		assert!(post.layout.ends_with("Echo]]"));
		assert_eq!(post.latest, 0);
	}

	#[test]
	fn title_cased_keys_populate_fields() {
		let m = mapping! {
			"permalink" => "/:title/:year",
			"latest" => 10,
			"bogus" => "ignored",
		};
		let mut post = PostConfig::default();
		let report = map_to_record(&m, &mut post);

		assert_eq!(post.permalink, "/:title/:year");
		assert_eq!(post.latest, 10);
		assert_eq!(report.skipped_keys(), vec!["bogus"]);
		assert_eq!(report.reason_for("bogus"), Some(SkipReason::NoSuchField));
	}

	#[test]
	fn exact_title_cased_key_also_matches() {
		let mut post = PostConfig::default();
		let report = map_to_record(&mapping! { "Layout" => "post" }, &mut post);
		assert_eq!(post.layout, "post");
		assert!(report.is_clean());
	}

	#[test]
	fn integer_fields_use_default_valued_coercion() {
		let mut post = PostConfig {
			latest: 99,
			summary_lines: 7,
			..PostConfig::default()
		};
		map_to_record(&mapping! { "latest" => "0x10", "summary_lines" => Value::Null }, &mut post);
		assert_eq!(post.latest, 16);
		assert_eq!(post.summary_lines, 0);

		map_to_record(&mapping! { "latest" => 3.7, "summary_lines" => i64::MAX }, &mut post);
		assert_eq!(post.latest, 0);
		assert_eq!(post.summary_lines, i32::MAX);
	}

	#[test]
	fn string_fields_fall_back_to_textual_form() {
		let mut post = PostConfig::default();
		map_to_record(&mapping! { "layout" => 42, "exclude" => true }, &mut post);
		assert_eq!(post.layout, "42");
		assert_eq!(post.exclude, "true");
	}

	#[test]
	fn string_sequences_and_raw_mappings() {
		let m = mapping! {
			"title" => "wendal",
			"navigation" => vec![Value::from("admin.html"), Value::from("user.html")],
			"author" => mapping! { "name" => "wendal" },
		};
		let mut site = SiteConfig::default();
		let report = map_to_record(&m, &mut site);

		assert!(report.is_clean(), "unexpected skips: {:?}", report.skipped);
		assert_eq!(site.title, "wendal");
		assert_eq!(site.navigation, vec!["admin.html", "user.html"]);
		assert_eq!(site.author.get("name"), Some(&Value::from("wendal")));
	}

	#[test]
	fn non_string_elements_are_dropped_individually() {
		let m = mapping! {
			"navigation" => vec![Value::from("a"), Value::from(3), Value::from("b")],
		};
		let mut site = SiteConfig::default();
		let report = map_to_record(&m, &mut site);

		assert_eq!(site.navigation, vec!["a", "b"]);
		assert_eq!(report.reason_for("navigation[1]"), Some(SkipReason::ElementNotString));
	}

	#[test]
	fn mismatched_sequence_and_mapping_values_are_skipped() {
		let mut site = SiteConfig {
			navigation: vec!["keep".to_owned()],
			..SiteConfig::default()
		};
		let report = map_to_record(&mapping! { "navigation" => "a.html", "author" => 5 }, &mut site);

		assert_eq!(site.navigation, vec!["keep"]);
		assert!(site.author.is_empty());
		assert_eq!(report.reason_for("navigation"), Some(SkipReason::TypeMismatch));
		assert_eq!(report.reason_for("author"), Some(SkipReason::TypeMismatch));
	}
}

mod nested_records {
	use super::{Outer, TopConfig};
	use crate::conv::{MapOptions, SkipReason, map_to_record, map_to_record_with};
	use crate::mapping;

	#[test]
	fn nested_mapping_recurses_into_record_field() {
		let m = mapping! {
			"theme" => "x",
			"pages" => mapping! { "permalink" => "/y" },
		};
		let mut top = TopConfig::default();
		let report = map_to_record(&m, &mut top);

		assert!(report.is_clean());
		assert_eq!(top.theme, "x");
		assert_eq!(top.pages.permalink, "/y");
	}

	#[test]
	fn non_mapping_for_nested_record_abandons_the_level() {
		let m = mapping! {
			"pages" => "oops",
			"production_url" => "http://example.com",
			"theme" => "x",
		};
		let mut top = TopConfig {
			theme: "before".to_owned(),
			..TopConfig::default()
		};
		let report = map_to_record(&m, &mut top);

		assert_eq!(top.theme, "before");
		assert_eq!(top.production_url, "");
		assert_eq!(report.reason_for("pages"), Some(SkipReason::NotAMapping));
		assert_eq!(report.reason_for("production_url"), Some(SkipReason::Abandoned));
		assert_eq!(report.reason_for("theme"), Some(SkipReason::Abandoned));
	}

	#[test]
	fn lenient_options_keep_going_after_mismatch() {
		let m = mapping! { "pages" => "oops", "theme" => "x" };
		let mut top = TopConfig::default();
		let report = map_to_record_with(&m, &mut top, &MapOptions::lenient());

		assert_eq!(top.theme, "x");
		assert_eq!(report.skipped_keys(), vec!["pages"]);
	}

	#[test]
	fn nested_abandon_does_not_stop_outer_level() {
		let m = mapping! {
			"inner" => mapping! { "leaf" => 5, "name" => "n" },
			"zeta" => "z",
		};
		let mut outer = Outer::default();
		let report = map_to_record(&m, &mut outer);

		assert_eq!(outer.inner.name, "");
		assert_eq!(outer.zeta, "z");
		assert_eq!(report.reason_for("inner.leaf"), Some(SkipReason::NotAMapping));
		assert_eq!(report.reason_for("inner.name"), Some(SkipReason::Abandoned));
	}

	#[test]
	fn deeply_nested_values_are_assigned() {
		let m = mapping! {
			"inner" => mapping! { "leaf" => mapping! { "value" => "7" } },
		};
		let mut outer = Outer::default();
		assert!(map_to_record(&m, &mut outer).is_clean());
		assert_eq!(outer.inner.leaf.value, 7);
	}

	#[test]
	fn depth_limit_skips_deeper_levels() {
		let m = mapping! {
			"theme" => "x",
			"pages" => mapping! { "permalink" => "/y" },
		};
		let mut top = TopConfig::default();
		let opt = MapOptions {
			max_depth: 1,
			..MapOptions::default()
		};
		let report = map_to_record_with(&m, &mut top, &opt);

		assert_eq!(top.theme, "x");
		assert_eq!(top.pages.permalink, "");
		assert_eq!(report.reason_for("pages.permalink"), Some(SkipReason::DepthExceeded));
	}
}

mod field_kinds {
	use chrono::{TimeZone, Utc};

	use super::PostBean;
	use crate::conv::{SkipReason, Value, map_to_record};
	use crate::mapping;

	#[test]
	fn readonly_and_pointer_fields_are_skipped() {
		let mut bean = PostBean::default();
		bean.meta.insert("k".to_owned(), Value::from(1));
		let report = map_to_record(&mapping! { "meta" => mapping! {}, "cover" => "c.png" }, &mut bean);

		assert_eq!(bean.meta.len(), 1);
		assert_eq!(bean.cover, None);
		assert_eq!(report.reason_for("meta"), Some(SkipReason::Readonly));
		assert_eq!(report.reason_for("cover"), Some(SkipReason::Unsupported));
	}

	#[test]
	fn raw_fields_take_matching_values_only() {
		let mut bean = PostBean::default();
		let report = map_to_record(
			&mapping! {
				"draft" => true,
				"weight" => 1.5,
				"port" => 8080,
				"extra" => vec![Value::from(1)],
			},
			&mut bean,
		);
		assert!(report.is_clean(), "unexpected skips: {:?}", report.skipped);
		assert!(bean.draft);
		assert_eq!(bean.weight, 1.5);
		assert_eq!(bean.port, 8080);
		assert_eq!(bean.extra, Value::Array(vec![Value::from(1)]));

		let report = map_to_record(&mapping! { "draft" => "yes", "port" => -1, "weight" => "2" }, &mut bean);
		assert!(bean.draft);
		assert_eq!(bean.port, 8080);
		assert_eq!(bean.weight, 1.5);
		assert_eq!(report.skipped.len(), 3);
		assert!(report.skipped.iter().all(|item| item.reason == SkipReason::TypeMismatch));
	}

	#[test]
	fn timestamps_assign_directly() {
		let t = Utc.with_ymd_and_hms(2015, 2, 19, 8, 0, 0).single().expect("valid date");
		let mut bean = PostBean::default();
		let report = map_to_record(&mapping! { "date" => t, "id" => "p1" }, &mut bean);

		assert!(report.is_clean());
		assert_eq!(bean.date, t);
		assert_eq!(bean.id, "p1");
	}

	#[test]
	fn timestamp_fields_reject_other_shapes() {
		let mut bean = PostBean::default();
		let report = map_to_record(&mapping! { "date" => mapping! { "year" => 2020 } }, &mut bean);
		assert_eq!(report.reason_for("date.year"), Some(SkipReason::NoSuchField));

		let report = map_to_record(&mapping! { "date" => "2020-01-01", "id" => "p2" }, &mut bean);
		assert_eq!(bean.id, "");
		assert_eq!(report.reason_for("date"), Some(SkipReason::NotAMapping));
		assert_eq!(report.reason_for("id"), Some(SkipReason::Abandoned));
	}
}

mod dynamic_targets {
	use crate::conv::{ConvError, FieldValue, StructValue, Value, map_to_value, value_to_mapping};
	use crate::mapping;

	fn page_value() -> Value {
		Value::Struct(StructValue {
			type_name: "Page".into(),
			fields: vec![
				FieldValue {
					name: "Title".into(),
					value: Value::from(""),
				},
				FieldValue {
					name: "Order".into(),
					value: Value::from(0),
				},
				FieldValue {
					name: "Tags".into(),
					value: Value::Array(Vec::new()),
				},
			],
		})
	}

	#[test]
	fn struct_values_are_populated_by_current_field_kind() {
		let mut target = page_value();
		let report = map_to_value(
			&mapping! {
				"title" => 12,
				"order" => "3",
				"tags" => vec![Value::from("a"), Value::from("b")],
			},
			&mut target,
		);

		assert!(report.is_clean());
		let Value::Struct(page) = &target else {
			panic!("target kind changed");
		};
		assert_eq!(page.field("Title"), Some(&Value::from("12")));
		assert_eq!(page.field("Order"), Some(&Value::from(3)));
		assert_eq!(page.field("Tags"), Some(&Value::Array(vec![Value::from("a"), Value::from("b")])));
	}

	#[test]
	fn non_struct_target_is_rejected_untouched() {
		let mut target = Value::from(5);
		let report = map_to_value(&mapping! { "title" => "x" }, &mut target);

		assert_eq!(target, Value::from(5));
		assert_eq!(report.rejected_target, Some("int"));
		assert!(matches!(report.into_result(), Err(ConvError::UnsupportedTarget { kind: "int" })));
	}

	#[test]
	fn value_dump_handles_null_and_structs() {
		assert!(value_to_mapping(&Value::Null).is_empty());
		assert!(value_to_mapping(&Value::from("x")).is_empty());
		let dumped = value_to_mapping(&page_value());
		assert_eq!(dumped.len(), 3);
		assert_eq!(dumped.get("Order"), Some(&Value::from(0)));
	}
}

mod dumping {
	use super::{PostBean, TopConfig};
	use crate::conv::{ConvError, Value, map_to_record, record_to_mapping, title_case};
	use crate::mapping;

	#[test]
	fn dump_is_flat_and_complete() {
		let mut top = TopConfig::default();
		top.pages.permalink = "/p".to_owned();
		let dumped = record_to_mapping(&top);

		assert_eq!(dumped.len(), 4);
		let Some(Value::Struct(pages)) = dumped.get("Pages") else {
			panic!("nested record should dump as a struct value");
		};
		assert_eq!(pages.field("Permalink"), Some(&Value::from("/p")));
	}

	#[test]
	fn dump_includes_hidden_fields_and_is_idempotent() {
		let bean = PostBean::default();
		let first = record_to_mapping(&bean);
		let second = record_to_mapping(&bean);

		assert_eq!(first, second);
		assert!(first.contains_key("Meta"));
		assert_eq!(first.get("Cover"), Some(&Value::Null));
	}

	#[test]
	fn dump_then_map_round_trips_flat_fields() {
		let source = TopConfig {
			theme: "dark".to_owned(),
			production_url: "https://example.com".to_owned(),
			..TopConfig::default()
		};

		let mut dumped = record_to_mapping(&source);
		dumped.remove("Pages");
		dumped.remove("Posts");
		let mut copy = TopConfig::default();
		map_to_record(&dumped, &mut copy).into_result().expect("flat fields map back");

		assert_eq!(copy.theme, "dark");
		assert_eq!(copy.production_url, "https://example.com");
	}

	#[test]
	fn strict_result_lists_skipped_keys() {
		let mut top = TopConfig::default();
		let err = map_to_record(&mapping! { "nope" => 1, "theme" => "t" }, &mut top)
			.into_result()
			.expect_err("unknown key must surface");
		assert!(matches!(err, ConvError::Incomplete { ref keys } if keys == &vec!["nope".to_owned()]));
		assert_eq!(top.theme, "t");
	}

	#[test]
	fn title_casing_touches_only_the_first_char() {
		assert_eq!(title_case("permalink"), "Permalink");
		assert_eq!(title_case("summary_lines"), "Summary_lines");
		assert_eq!(title_case("production url"), "Production url");
		assert_eq!(title_case("élan"), "Élan");
		assert_eq!(title_case(""), "");
	}
}

#[test]
fn default_timestamp_field_is_epoch() {
	let bean = PostBean::default();
	assert_eq!(bean.date, Utc.timestamp_opt(0, 0).single().expect("epoch"));
}
