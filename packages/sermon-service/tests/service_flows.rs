mod support;

use std::collections::HashSet;

use uuid::Uuid;

use sermon_domain::{
	content::{Location, Origin},
	visibility::Visibility,
};
use sermon_service::{
	AddCommentRequest, CreateNoteRequest, Error, FeedRequest, FeedScope, MigrateLegacyRequest,
	NewChurchRequest, ProfileView, RegisterProfileRequest, SermonService, Viewer,
};
use sermon_storage::db::Db;
use sermon_testkit::TestDatabase;

async fn boot(test_db: &TestDatabase) -> SermonService {
	let cfg = support::test_config(test_db.dsn(), true, 5_000);
	let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	SermonService::new(cfg, db)
}

async fn register(svc: &SermonService, username: &str, church: Option<&str>) -> ProfileView {
	let church = church.map(|name| NewChurchRequest {
		name: name.to_string(),
		description: "A friendly congregation".to_string(),
		location: Location {
			city: "Austin".to_string(),
			state: "TX".to_string(),
			zip_code: "78701".to_string(),
		},
		image_url: None,
	});

	svc.register_profile(RegisterProfileRequest {
		id: Uuid::new_v4(),
		username: username.to_string(),
		full_name: None,
		avatar_url: None,
		church,
	})
	.await
	.expect("Failed to register profile.")
}

async fn write_note(
	svc: &SermonService,
	author: &ProfileView,
	title: &str,
	privacy: Visibility,
	tags: &[&str],
) -> Uuid {
	let req = CreateNoteRequest {
		title: title.to_string(),
		content: format!("<p>{title}</p>"),
		pastor_name: "Rev. Lee".to_string(),
		church_name: "Hope Chapel".to_string(),
		bible_verses: vec!["John 1:16".to_string()],
		privacy,
		tags: tags.iter().map(|tag| tag.to_string()).collect(),
	};

	let created =
		svc.create_note(&Viewer::signed_in(author.id), req).await.expect("Failed to create note.");

	created.note_id
}

fn feed(scope: FeedScope, cursor: Option<String>, page_size: Option<u32>) -> FeedRequest {
	FeedRequest { scope, cursor, page_size }
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn feed_scopes_filter_and_paginate() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping feed_scopes_filter_and_paginate; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", Some("Hope Chapel")).await;
	let carol = register(&svc, "carol", None).await;
	let church_id = alice.church_id.expect("Alice should own a church.");

	svc.join_church(&Viewer::signed_in(carol.id), church_id).await.expect("Failed to join.");

	for idx in 0..3 {
		write_note(&svc, &alice, &format!("Public {idx}"), Visibility::Public, &[]).await;
	}

	write_note(&svc, &alice, "Members only", Visibility::Church, &[]).await;
	write_note(&svc, &alice, "Diary", Visibility::Private, &[]).await;

	let anonymous = Viewer::anonymous();
	let first =
		svc.feed(&anonymous, feed(FeedScope::Public, None, None)).await.expect("Feed failed.");

	assert_eq!(first.items.len(), 2);
	assert!(first.next_cursor.is_some());

	let second = svc
		.feed(&anonymous, feed(FeedScope::Public, first.next_cursor.clone(), None))
		.await
		.expect("Feed failed.");

	assert_eq!(second.items.len(), 1);
	assert!(second.next_cursor.is_none());

	let seen: HashSet<Uuid> =
		first.items.iter().chain(second.items.iter()).map(|item| item.id).collect();

	assert_eq!(seen.len(), 3);

	let church_for_stranger = svc
		.feed(&anonymous, feed(FeedScope::ByChurch(church_id), None, Some(10)))
		.await
		.expect("Feed failed.");
	let church_for_member = svc
		.feed(&Viewer::signed_in(carol.id), feed(FeedScope::ByChurch(church_id), None, Some(10)))
		.await
		.expect("Feed failed.");
	let own = svc
		.feed(&Viewer::signed_in(alice.id), feed(FeedScope::ByAuthor(alice.id), None, Some(10)))
		.await
		.expect("Feed failed.");

	assert_eq!(church_for_stranger.items.len(), 3);
	assert_eq!(church_for_member.items.len(), 4);
	assert_eq!(own.items.len(), 5);
	assert_eq!(own.items[0].title, "Diary");
	assert_eq!(own.items[0].sermon.pastor_name, "Rev. Lee");
	assert_eq!(own.items[0].content_origin, Origin::Split);

	let err = svc
		.feed(&anonymous, feed(FeedScope::Public, Some("not-a-cursor".to_string()), None))
		.await
		.expect_err("Malformed cursor should fail.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn notes_carry_tags_and_respect_moderation() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping notes_carry_tags_and_respect_moderation; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", Some("Hope Chapel")).await;
	let bob = register(&svc, "bob", None).await;
	let carol = register(&svc, "carol", None).await;
	let church_id = alice.church_id.expect("Alice should own a church.");

	svc.join_church(&Viewer::signed_in(carol.id), church_id).await.expect("Failed to join.");

	let tagged =
		write_note(&svc, &alice, "Tagged", Visibility::Public, &["#Grace", "grace", "Faith"]).await;
	let detail = svc.get_note(&Viewer::anonymous(), tagged).await.expect("Failed to get note.");

	assert_eq!(detail.note.tags, vec!["faith".to_string(), "grace".to_string()]);

	let members_only = write_note(&svc, &carol, "Members", Visibility::Church, &[]).await;
	let hidden = svc
		.get_note(&Viewer::signed_in(bob.id), members_only)
		.await
		.expect_err("Church note should be hidden from outsiders.");

	assert!(matches!(hidden, Error::NotFound { .. }));

	let forbidden = svc
		.moderate_remove_note(&Viewer::signed_in(bob.id), members_only)
		.await
		.expect_err("Members cannot moderate.");

	assert!(matches!(forbidden, Error::Forbidden { .. }));

	let not_author = svc
		.delete_note(&Viewer::signed_in(bob.id), members_only)
		.await
		.expect_err("Only the author deletes.");

	assert!(matches!(not_author, Error::NotFound { .. }));

	svc.moderate_remove_note(&Viewer::signed_in(alice.id), members_only)
		.await
		.expect("Church admin should remove the note.");

	let gone = svc
		.get_note(&Viewer::signed_in(carol.id), members_only)
		.await
		.expect_err("Removed note should be gone.");

	assert!(matches!(gone, Error::NotFound { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn reactions_notify_the_author() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping reactions_notify_the_author; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", None).await;
	let bob = register(&svc, "bob", None).await;
	let note_id = write_note(&svc, &alice, "Praise worthy", Visibility::Public, &[]).await;
	let as_alice = Viewer::signed_in(alice.id);
	let as_bob = Viewer::signed_in(bob.id);
	let praised = svc.toggle_praise(&as_bob, note_id).await.expect("Praise failed.");

	assert!(praised.praised);
	assert_eq!(praised.praise_count, 1);

	let withdrawn = svc.toggle_praise(&as_bob, note_id).await.expect("Praise failed.");

	assert!(!withdrawn.praised);
	assert_eq!(withdrawn.praise_count, 0);

	svc.toggle_praise(&as_alice, note_id).await.expect("Praise failed.");
	svc.add_comment(&as_bob, note_id, AddCommentRequest { content: " Amen ".to_string() })
		.await
		.expect("Comment failed.");

	let comments = svc.list_comments(&as_alice, note_id).await.expect("Listing failed.");

	assert_eq!(comments.len(), 1);
	assert_eq!(comments[0].content, "Amen");
	assert_eq!(comments[0].author_username, "bob");

	let unread = svc.unread_notifications(&as_alice).await.expect("Listing failed.");
	let kinds: Vec<&str> = unread.iter().map(|item| item.kind.as_str()).collect();

	assert_eq!(kinds, vec!["comment", "praise"]);

	svc.mark_notification_read(&as_alice, unread[0].id).await.expect("Mark read failed.");

	let err = svc
		.mark_notification_read(&as_bob, unread[1].id)
		.await
		.expect_err("Only the owner marks a notification read.");

	assert!(matches!(err, Error::NotFound { .. }));
	assert_eq!(svc.unread_notifications(&as_alice).await.expect("Listing failed.").len(), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn follows_feed_the_profile_overview() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping follows_feed_the_profile_overview; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", None).await;
	let bob = register(&svc, "bob", None).await;
	let as_bob = Viewer::signed_in(bob.id);

	svc.follow(&as_bob, alice.id).await.expect("Follow failed.");
	svc.follow(&as_bob, alice.id).await.expect("Repeated follow should be a no-op.");

	let overview = svc.profile_overview(&as_bob, alice.id).await.expect("Overview failed.");

	assert_eq!(overview.follower_count, 1);
	assert_eq!(overview.following_count, 0);
	assert!(overview.viewer_follows);

	let notifications =
		svc.unread_notifications(&Viewer::signed_in(alice.id)).await.expect("Listing failed.");

	assert_eq!(notifications.len(), 1);
	assert_eq!(notifications[0].kind, "follow");

	let self_follow = svc.follow(&as_bob, bob.id).await.expect_err("Self-follow should fail.");

	assert!(matches!(self_follow, Error::InvalidRequest { .. }));

	svc.unfollow(&as_bob, alice.id).await.expect("Unfollow failed.");

	let overview = svc.profile_overview(&as_bob, alice.id).await.expect("Overview failed.");

	assert_eq!(overview.follower_count, 0);
	assert!(!overview.viewer_follows);
	assert_eq!(svc.resolve_username("@ALICE").await.expect("Lookup failed."), alice.id);

	let duplicate = svc
		.register_profile(RegisterProfileRequest {
			id: Uuid::new_v4(),
			username: "Alice".to_string(),
			full_name: None,
			avatar_url: None,
			church: None,
		})
		.await
		.expect_err("Usernames are unique ignoring case.");

	assert!(matches!(duplicate, Error::Conflict { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn churches_expose_profile_and_dashboard() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping churches_expose_profile_and_dashboard; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", Some("Hope Chapel")).await;
	let carol = register(&svc, "carol", None).await;
	let church_id = alice.church_id.expect("Alice should own a church.");
	let as_carol = Viewer::signed_in(carol.id);

	svc.join_church(&as_carol, church_id).await.expect("Failed to join.");
	write_note(&svc, &carol, "Sunday", Visibility::Public, &[]).await;

	let profile = svc.church_profile(&as_carol, church_id).await.expect("Profile failed.");

	assert_eq!(profile.church.subtitle, "Austin, TX");
	assert_eq!(profile.member_count, 2);
	assert_eq!(profile.sermon_count, 1);
	assert!(profile.viewer_is_member);

	let dashboard =
		svc.church_dashboard(&Viewer::signed_in(alice.id)).await.expect("Dashboard failed.");

	assert_eq!(dashboard.member_count, 2);
	assert_eq!(dashboard.recent_note_count, 1);

	let err = svc.church_dashboard(&as_carol).await.expect_err("Members have no dashboard.");

	assert!(matches!(err, Error::Forbidden { .. }));

	svc.leave_church(&as_carol).await.expect("Failed to leave.");

	let profile = svc.church_profile(&as_carol, church_id).await.expect("Profile failed.");

	assert_eq!(profile.member_count, 1);
	assert!(!profile.viewer_is_member);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn trending_tags_rank_public_notes() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping trending_tags_rank_public_notes; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", None).await;

	write_note(&svc, &alice, "One", Visibility::Public, &["grace", "hope"]).await;
	write_note(&svc, &alice, "Two", Visibility::Public, &["grace"]).await;
	write_note(&svc, &alice, "Three", Visibility::Private, &["secret"]).await;

	let trending = svc.trending_tags().await.expect("Trending failed.");
	let names: Vec<&str> = trending.iter().map(|tag| tag.name.as_str()).collect();

	assert_eq!(names, vec!["grace", "hope"]);
	assert_eq!(trending[0].note_count, 2);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SERMON_PG_DSN to run."]
async fn legacy_blobs_are_split_once() {
	let Some(base_dsn) = sermon_testkit::env_dsn() else {
		eprintln!("Skipping legacy_blobs_are_split_once; set SERMON_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let svc = boot(&test_db).await;
	let alice = register(&svc, "alice", None).await;
	let church_id = Uuid::new_v4();
	let blob_note = Uuid::new_v4();
	let plain_note = Uuid::new_v4();

	sqlx::query("INSERT INTO churches (id, name, description) VALUES ($1, 'Old Chapel', $2)")
		.bind(church_id)
		.bind(
			r#"{"description":"A friendly congregation","location":{"city":"Austin","state":"TX","zipCode":"78701"}}"#,
		)
		.execute(&svc.db.pool)
		.await
		.expect("Failed to insert legacy church.");

	for (id, content) in [
		(
			blob_note,
			r#"{"pastorName":"Rev. Lee","churchName":"Old Chapel","content":"<p>Grace</p>","bibleVerses":["Eph 2:8"]}"#,
		),
		(plain_note, "Notes from Sunday"),
	] {
		sqlx::query(
			"\
INSERT INTO sermon_notes (id, user_id, title, content, privacy)
VALUES ($1, $2, 'Legacy', $3, 'public')",
		)
		.bind(id)
		.bind(alice.id)
		.bind(content)
		.execute(&svc.db.pool)
		.await
		.expect("Failed to insert legacy note.");
	}

	let report = svc
		.migrate_legacy_content(MigrateLegacyRequest { batch_size: 1 })
		.await
		.expect("Migration failed.");

	assert_eq!(report.churches, 1);
	assert_eq!(report.notes, 2);

	let church =
		svc.church_profile(&Viewer::anonymous(), church_id).await.expect("Profile failed.");

	assert_eq!(church.church.subtitle, "Austin, TX");
	assert_eq!(church.church.details.description, "A friendly congregation");
	assert_eq!(church.church.details_origin, Origin::Split);

	let blob = svc.get_note(&Viewer::anonymous(), blob_note).await.expect("Note failed.");

	assert_eq!(blob.note.sermon.content, "<p>Grace</p>");
	assert_eq!(blob.note.sermon.pastor_name, "Rev. Lee");
	assert_eq!(blob.note.content_origin, Origin::Split);

	let plain = svc.get_note(&Viewer::anonymous(), plain_note).await.expect("Note failed.");

	assert_eq!(plain.note.sermon.content, "Notes from Sunday");
	assert_eq!(plain.note.sermon.pastor_name, "");

	let again = svc
		.migrate_legacy_content(MigrateLegacyRequest { batch_size: 1 })
		.await
		.expect("Migration failed.");

	assert_eq!(again.churches + again.notes, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
