//! Structured content carried by church descriptions and sermon note bodies.
//!
//! Legacy rows store the structured record serialized into a single text column. Current rows keep
//! the free-text part in the text column and the structured part in a separate JSON column. Both
//! shapes resolve to the same in-memory types, and text that does not decode as a blob is treated
//! as plain text.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a content value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
	/// Caption and structured column stored separately.
	Split,
	/// Legacy serialized blob decoded from the text column.
	Blob,
	/// Text column did not decode; the raw text became the caption.
	PlainText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
	pub value: T,
	pub origin: Origin,
}
impl<T> Decoded<T> {
	pub fn is_fallback(&self) -> bool {
		self.origin == Origin::PlainText
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
	#[serde(default, deserialize_with = "null_as_default")]
	pub city: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub state: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub zip_code: String,
}
impl Location {
	pub fn is_empty(&self) -> bool {
		self.city.trim().is_empty()
			&& self.state.trim().is_empty()
			&& self.zip_code.trim().is_empty()
	}

	/// "City, ST" when a city is known, the bare city when the state is blank.
	pub fn display(&self) -> Option<String> {
		let city = self.city.trim();

		if city.is_empty() {
			return None;
		}

		let state = self.state.trim();

		if state.is_empty() {
			return Some(city.to_string());
		}

		Some(format!("{city}, {state}"))
	}

	pub fn to_value(&self) -> Value {
		serde_json::json!({
			"city": self.city,
			"state": self.state,
			"zipCode": self.zip_code,
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurchDetails {
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub location: Location,
}
impl ChurchDetails {
	/// Decodes a legacy description blob, falling back to plain text.
	pub fn decode(raw: &str) -> Decoded<Self> {
		match serde_json::from_str::<Self>(raw) {
			Ok(value) => Decoded { value, origin: Origin::Blob },
			Err(_) => Decoded {
				value: Self { description: raw.to_string(), location: Location::default() },
				origin: Origin::PlainText,
			},
		}
	}

	pub fn resolve(description: Option<&str>, location: Option<&Value>) -> Decoded<Self> {
		let caption = description.unwrap_or_default();
		let Some(location) = location else {
			return Self::decode(caption);
		};
		let location = serde_json::from_value(location.clone()).unwrap_or_default();

		Decoded {
			value: Self { description: caption.to_string(), location },
			origin: Origin::Split,
		}
	}

	pub fn subtitle(&self) -> String {
		self.location.display().unwrap_or_else(|| self.description.clone())
	}
}

/// Sermon metadata kept beside the note body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonMeta {
	#[serde(default, deserialize_with = "null_as_default")]
	pub pastor_name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub church_name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub bible_verses: Vec<String>,
}
impl SermonMeta {
	pub fn to_value(&self) -> Value {
		serde_json::json!({
			"pastorName": self.pastor_name,
			"churchName": self.church_name,
			"bibleVerses": self.bible_verses,
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonContent {
	#[serde(default, deserialize_with = "null_as_default")]
	pub pastor_name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub church_name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub content: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub bible_verses: Vec<String>,
}
impl SermonContent {
	/// Decodes a legacy note body blob, falling back to plain text.
	pub fn decode(raw: &str) -> Decoded<Self> {
		match serde_json::from_str::<Self>(raw) {
			Ok(value) => Decoded { value, origin: Origin::Blob },
			Err(_) => Decoded {
				value: Self { content: raw.to_string(), ..Default::default() },
				origin: Origin::PlainText,
			},
		}
	}

	pub fn resolve(content: &str, sermon: Option<&Value>) -> Decoded<Self> {
		let Some(sermon) = sermon else {
			return Self::decode(content);
		};
		let meta: SermonMeta = serde_json::from_value(sermon.clone()).unwrap_or_default();

		Decoded { value: Self::join(content.to_string(), meta), origin: Origin::Split }
	}

	pub fn join(content: String, meta: SermonMeta) -> Self {
		Self {
			pastor_name: meta.pastor_name,
			church_name: meta.church_name,
			content,
			bible_verses: meta.bible_verses,
		}
	}

	pub fn split(self) -> (String, SermonMeta) {
		let meta = SermonMeta {
			pastor_name: self.pastor_name,
			church_name: self.church_name,
			bible_verses: self.bible_verses,
		};

		(self.content, meta)
	}
}

/// True when text looks like a serialized object, so a failed decode is worth reporting.
pub fn looks_like_blob(raw: &str) -> bool {
	raw.trim_start().starts_with('{')
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
