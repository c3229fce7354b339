use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sermon_domain::{content::ChurchDetails, search_term};

use crate::{BoxFuture, Error, Result, SermonService, normalize, tracker::SearchTracker};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
	Person,
	Church,
	Note,
}

/// The entity family a search sub-query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	People,
	Churches,
	Notes,
}
impl Category {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::People => "people",
			Self::Churches => "churches",
			Self::Notes => "notes",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
	pub kind: ResultKind,
	pub id: Uuid,
	pub title: String,
	pub subtitle: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<ChurchDetails>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResponse {
	/// People first, then churches, then notes.
	pub results: Vec<SearchResult>,
	/// Categories whose query failed and were left out of `results`.
	pub degraded: Vec<Category>,
}

impl SermonService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let Some(term) = search_term::normalize_term(&req.term) else {
			return Ok(SearchResponse::default());
		};
		let max_chars = self.cfg.search.max_term_chars as usize;

		if term.chars().count() > max_chars {
			return Err(Error::invalid(format!(
				"Search term must be at most {max_chars} characters."
			)));
		}

		let pattern = search_term::like_pattern(term);
		let limit = i64::from(self.cfg.search.per_category_limit);
		let timeout = Duration::from_millis(self.cfg.search.query_timeout_ms);
		let source = self.search_source.as_ref();
		let (people, churches, notes) = tokio::join!(
			bounded(Category::People, timeout, source.people(&pattern, limit)),
			bounded(Category::Churches, timeout, source.churches(&pattern, limit)),
			bounded(Category::Notes, timeout, source.notes(&pattern, limit)),
		);
		let mut response = SearchResponse::default();
		let mut failures = Vec::new();

		match people {
			Ok(rows) => response.results.extend(rows.into_iter().map(normalize::person)),
			Err(err) => failures.push((Category::People, err)),
		}
		match churches {
			Ok(rows) => response.results.extend(rows.into_iter().map(normalize::church)),
			Err(err) => failures.push((Category::Churches, err)),
		}
		match notes {
			Ok(rows) => response.results.extend(rows.into_iter().map(normalize::note)),
			Err(err) => failures.push((Category::Notes, err)),
		}

		if failures.is_empty() {
			return Ok(response);
		}
		if !self.cfg.search.partial_results {
			let (category, err) = failures.remove(0);

			tracing::warn!(category = category.as_str(), error = %err, "Search category failed.");

			return Err(err);
		}
		if failures.len() == 3 {
			for (category, err) in &failures {
				tracing::warn!(
					category = category.as_str(),
					error = %err,
					"Search category failed."
				);
			}

			return Err(Error::Remote { message: "Every search category failed.".to_string() });
		}

		for (category, err) in failures {
			tracing::warn!(
				category = category.as_str(),
				error = %err,
				"Search category failed. Returning partial results."
			);

			response.degraded.push(category);
		}

		Ok(response)
	}

	/// Runs a search and returns `None` when a newer search was issued on `tracker` before this one
	/// finished. Failures of superseded searches are dropped too.
	pub async fn search_latest(
		&self,
		tracker: &SearchTracker,
		req: SearchRequest,
	) -> Result<Option<SearchResponse>> {
		let ticket = tracker.issue();
		let outcome = self.search(req).await;

		if !tracker.is_latest(ticket) {
			tracing::debug!(?ticket, "Discarding superseded search results.");

			return Ok(None);
		}

		outcome.map(Some)
	}
}

async fn bounded<T>(
	category: Category,
	timeout: Duration,
	query: BoxFuture<'_, Result<T>>,
) -> Result<T> {
	match tokio::time::timeout(timeout, query).await {
		Ok(result) => result,
		Err(_) => Err(Error::Remote {
			message: format!("Search for {} timed out.", category.as_str()),
		}),
	}
}
