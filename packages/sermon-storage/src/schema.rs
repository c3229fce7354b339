pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

/// Splits a rendered schema into statements, keeping `$$` bodies intact.
pub fn split_statements(sql: &str) -> Vec<&str> {
	let mut out = Vec::new();
	let mut start = 0;
	let mut in_body = false;
	let bytes = sql.as_bytes();
	let mut idx = 0;

	while idx < bytes.len() {
		if bytes[idx] == b'$' && bytes.get(idx + 1) == Some(&b'$') {
			in_body = !in_body;
			idx += 2;

			continue;
		}
		if bytes[idx] == b';' && !in_body {
			push_statement(&mut out, &sql[start..idx]);

			start = idx + 1;
		}

		idx += 1;
	}

	push_statement(&mut out, &sql[start..]);

	out
}

fn push_statement<'a>(out: &mut Vec<&'a str>, raw: &'a str) {
	let trimmed = raw.trim();

	if !trimmed.is_empty() {
		out.push(trimmed);
	}
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_churches.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_churches.sql")),
				"tables/002_profiles.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_profiles.sql")),
				"tables/003_sermon_notes.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_sermon_notes.sql")),
				"tables/004_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_tags.sql")),
				"tables/005_sermon_tags.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_sermon_tags.sql")),
				"tables/006_follows.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_follows.sql")),
				"tables/007_notifications.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_notifications.sql")),
				"tables/008_sermon_praises.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_sermon_praises.sql")),
				"tables/009_sermon_comments.sql" =>
					out.push_str(include_str!("../../../sql/tables/009_sermon_comments.sql")),
				"functions/001_get_trending_tags.sql" =>
					out.push_str(include_str!("../../../sql/functions/001_get_trending_tags.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
