//! Lenient narrative ingestion.
//!
//! Narratives come from hand-edited JSON, so every field inside a record is
//! coerced the way the tagging forms wrote it: weights may be numbers or
//! numeric strings, `tags` may be missing, names may be absent. Only a broken
//! document is an error.

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::DatasetError;
use super::types::{NarrativeRecord, Tag};

#[derive(Deserialize)]
struct RawNarrative {
	#[serde(default, deserialize_with = "string_or_none")]
	name: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	context: Option<String>,
	#[serde(default, deserialize_with = "tag_list")]
	tags: Vec<Tag>,
}

impl From<RawNarrative> for NarrativeRecord {
	fn from(raw: RawNarrative) -> Self {
		Self {
			name: raw.name,
			context: raw.context,
			tags: raw.tags,
		}
	}
}

/// Parse a JSON array of narratives.
///
/// Array elements that are not objects become empty, untitled records so
/// dataset indices stay aligned with the source array.
pub fn parse_narratives(json: &str) -> Result<Vec<NarrativeRecord>, DatasetError> {
	let value: Value = serde_json::from_str(json)?;
	let Value::Array(items) = value else {
		return Err(DatasetError::NotAnArray {
			found: kind_of(&value),
		});
	};

	let records: Vec<NarrativeRecord> = items
		.into_iter()
		.enumerate()
		.map(|(i, item)| {
			if !item.is_object() {
				warn!("narrative {} is a JSON {}, treating as empty", i, kind_of(&item));
				return NarrativeRecord::default();
			}
			RawNarrative::deserialize(item)
				.map(NarrativeRecord::from)
				.unwrap_or_else(|e| {
					warn!("narrative {} could not be read ({}), treating as empty", i, e);
					NarrativeRecord::default()
				})
		})
		.collect();

	debug!("Parsed narratives - count={}", records.len());
	Ok(records)
}

/// Numeric conversion applied to tag weights.
///
/// Missing, `null`, `false` and blank strings are zero; `true` is one;
/// numeric strings are parsed; anything else is not a number.
pub fn coerce_weight(value: &Value) -> Option<f64> {
	match value {
		Value::Null => Some(0.0),
		Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
		Value::Number(n) => n.as_f64(),
		Value::String(s) => {
			let s = s.trim();
			if s.is_empty() {
				Some(0.0)
			} else {
				s.parse::<f64>().ok().filter(|w| w.is_finite())
			}
		}
		Value::Array(_) | Value::Object(_) => None,
	}
}

/// Short salience label shown next to a tag.
///
/// Reads the coerced weight, so `"3"` labels the same as `3`.
pub fn weight_label(weight: Option<f64>) -> &'static str {
	match weight {
		Some(w) if w == 3.0 => "SI",
		Some(w) if w == 2.0 => "I",
		Some(w) if w == 1.0 => "R",
		_ => "?",
	}
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => Some(s),
		_ => None,
	})
}

fn tag_list<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
	D: Deserializer<'de>,
{
	let Value::Array(items) = Value::deserialize(deserializer)? else {
		return Ok(Vec::new());
	};
	Ok(items.iter().filter_map(tag_from_value).collect())
}

fn tag_from_value(value: &Value) -> Option<Tag> {
	let object = value.as_object()?;
	let name = match object.get("name")? {
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		_ => return None,
	};
	let weight = coerce_weight(object.get("weight").unwrap_or(&Value::Null));
	Some(Tag { name, weight })
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_well_formed_records() {
		let records = parse_narratives(
			r#"[{"name": "Clinic", "context": "waiting room", "tags": [{"name": "Privacy", "weight": 3}]}]"#,
		)
		.unwrap();
		assert_eq!(
			records,
			vec![NarrativeRecord {
				name: Some("Clinic".into()),
				context: Some("waiting room".into()),
				tags: vec![Tag::new("Privacy", 3.0)],
			}]
		);
	}

	#[test]
	fn malformed_fields_degrade() {
		let records = parse_narratives(
			r#"[
				{"tags": "Privacy"},
				{"name": 7, "tags": [{"name": "Trust", "weight": "2"}, {"weight": 3}, "loose"]},
				42
			]"#,
		)
		.unwrap();
		assert_eq!(records.len(), 3);
		assert!(records[0].tags.is_empty());
		assert_eq!(records[1].name, None);
		assert_eq!(records[1].tags, vec![Tag::new("Trust", 2.0)]);
		assert_eq!(records[2], NarrativeRecord::default());
	}

	#[test]
	fn rejects_non_array_documents() {
		assert!(matches!(
			parse_narratives(r#"{"name": "x"}"#),
			Err(DatasetError::NotAnArray { found: "object" })
		));
		assert!(matches!(parse_narratives("[{"), Err(DatasetError::Json(_))));
	}

	#[test]
	fn weight_coercion() {
		assert_eq!(coerce_weight(&json!(2)), Some(2.0));
		assert_eq!(coerce_weight(&json!(" 1.5 ")), Some(1.5));
		assert_eq!(coerce_weight(&json!("")), Some(0.0));
		assert_eq!(coerce_weight(&json!(null)), Some(0.0));
		assert_eq!(coerce_weight(&json!(true)), Some(1.0));
		assert_eq!(coerce_weight(&json!("high")), None);
		assert_eq!(coerce_weight(&json!([2])), None);
	}

	#[test]
	fn salience_labels() {
		assert_eq!(weight_label(Some(3.0)), "SI");
		assert_eq!(weight_label(Some(2.0)), "I");
		assert_eq!(weight_label(Some(1.0)), "R");
		assert_eq!(weight_label(Some(0.0)), "?");
		assert_eq!(weight_label(None), "?");
	}

	#[test]
	fn labels_follow_the_coerced_weight() {
		let narratives =
			parse_narratives(r#"[{"tags": [{"name": "a", "weight": "3"}, {"name": "b", "weight": "high"}]}]"#)
				.unwrap();
		let labels: Vec<_> = narratives[0].tags.iter().map(|t| weight_label(t.weight)).collect();
		assert_eq!(labels, vec!["SI", "?"]);
	}
}
