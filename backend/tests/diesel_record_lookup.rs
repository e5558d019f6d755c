//! Integration tests for `DieselRecordLookup` against embedded PostgreSQL.
//!
//! The lookup answers the validator's `unique` and `exists` rules, so these
//! cases pin down the `ignore_id` handling for updates.

use postbook::domain::ports::{PostRepository, RecordLookup, UserRepository};
use postbook::domain::{LookupValue, NewPost, NewUser, PasswordDigest, RecordColumn};
use postbook::outbound::persistence::{
    DieselPostRepository, DieselRecordLookup, DieselUserRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{PgContext, pg_context};

#[fixture]
fn db() -> Option<PgContext> {
    pg_context()
}

/// Ids of one seeded user (`lam@x.com`) and one post (`Hello world`).
struct Seeded {
    user_id: i64,
    post_id: i64,
}

fn seed(ctx: &PgContext) -> Seeded {
    let users = DieselUserRepository::new(ctx.pool());
    let posts = DieselPostRepository::new(ctx.pool());
    let user = ctx
        .block_on(users.create(&NewUser {
            name: "Lam".to_owned(),
            email: "lam@x.com".to_owned(),
            password: PasswordDigest::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
            number: None,
        }))
        .expect("seed user");
    let post = ctx
        .block_on(posts.create(&NewPost {
            title: "Hello world".to_owned(),
            description: "First post body".to_owned(),
            user_id: Some(user.user.id),
        }))
        .expect("seed post");
    Seeded {
        user_id: user.user.id.get(),
        post_id: post.post.id.get(),
    }
}

fn text(value: &str) -> LookupValue {
    LookupValue::Text(value.to_owned())
}

#[rstest]
fn stored_values_are_found_unless_their_row_is_ignored(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!(
            "SKIP-TEST-CLUSTER: stored_values_are_found_unless_their_row_is_ignored skipped"
        );
        return;
    };
    let seeded = seed(&ctx);
    let lookup = DieselRecordLookup::new(ctx.pool());
    let exists = |column, value: LookupValue, ignore| {
        ctx.block_on(lookup.value_exists(column, &value, ignore))
            .expect("lookup succeeds")
    };

    assert!(exists(RecordColumn::UserEmail, text("lam@x.com"), None));
    assert!(!exists(
        RecordColumn::UserEmail,
        text("lam@x.com"),
        Some(seeded.user_id)
    ));
    assert!(exists(
        RecordColumn::UserEmail,
        text("lam@x.com"),
        Some(seeded.user_id + 1)
    ));
    assert!(exists(RecordColumn::PostTitle, text("Hello world"), None));
    assert!(!exists(
        RecordColumn::PostTitle,
        text("Hello world"),
        Some(seeded.post_id)
    ));
}

#[rstest]
fn absent_values_and_mismatched_types_are_not_found(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: absent_values_and_mismatched_types_are_not_found skipped");
        return;
    };
    let seeded = seed(&ctx);
    let lookup = DieselRecordLookup::new(ctx.pool());
    let exists = |column, value: LookupValue| {
        ctx.block_on(lookup.value_exists(column, &value, None))
            .expect("lookup succeeds")
    };

    assert!(exists(RecordColumn::UserId, LookupValue::Integer(seeded.user_id)));
    assert!(!exists(RecordColumn::UserId, LookupValue::Integer(seeded.user_id + 100)));
    assert!(!exists(RecordColumn::UserEmail, text("other@x.com")));
    assert!(!exists(RecordColumn::PostTitle, text("Another title")));
    assert!(!exists(RecordColumn::UserId, text("1")));
    assert_eq!(ctx.count_rows("users"), 1);
}
