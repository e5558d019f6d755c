//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test provisions its own database cloned from the migrated template, so
//! the foreign keys and unique constraints under test are the ones the server
//! creates at startup.

use postbook::domain::ports::{PhoneRepository, PostRepository, UserRepository, UserRepositoryError};
use postbook::domain::{NewPost, NewUser, PasswordDigest, UserChanges, UserId};
use postbook::outbound::persistence::{
    DieselPhoneRepository, DieselPostRepository, DieselUserRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{PgContext, pg_context};

#[fixture]
fn db() -> Option<PgContext> {
    pg_context()
}

fn new_user(email: &str, number: Option<&str>) -> NewUser {
    NewUser {
        name: "Lam".to_owned(),
        email: email.to_owned(),
        password: PasswordDigest::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        number: number.map(str::to_owned),
    }
}

#[rstest]
fn create_with_number_round_trips_user_and_phone(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: create_with_number_round_trips_user_and_phone skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());

    let created = ctx
        .block_on(repo.create(&new_user("lam@x.com", Some("0987654321"))))
        .expect("create user");
    let fetched = ctx
        .block_on(repo.find_by_id(created.user.id))
        .expect("fetch user")
        .expect("user exists");

    assert_eq!(fetched.user.email, "lam@x.com");
    assert_eq!(fetched.user.password, created.user.password);
    let phone = fetched.phone.expect("phone stored with the user");
    assert_eq!(phone.number, "0987654321");
    assert_eq!(phone.user_id, created.user.id);
    assert_eq!(ctx.count_rows("phones"), 1);
}

#[rstest]
fn list_returns_users_in_id_order(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: list_returns_users_in_id_order skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());

    let first = ctx
        .block_on(repo.create(&new_user("first@x.com", None)))
        .expect("create first");
    let second = ctx
        .block_on(repo.create(&new_user("second@x.com", Some("0911"))))
        .expect("create second");
    let listed = ctx.block_on(repo.list()).expect("list users");

    let ids: Vec<UserId> = listed.iter().map(|entry| entry.user.id).collect();
    assert_eq!(ids, [first.user.id, second.user.id]);
    assert!(listed[0].phone.is_none());
    assert_eq!(
        listed[1].phone.as_ref().map(|phone| phone.number.as_str()),
        Some("0911")
    );
}

#[rstest]
fn duplicate_email_maps_to_conflict(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_email_maps_to_conflict skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());
    ctx.block_on(repo.create(&new_user("lam@x.com", None)))
        .expect("create first");

    let error = ctx
        .block_on(repo.create(&new_user("lam@x.com", Some("0911"))))
        .expect_err("duplicate email is rejected");

    assert_eq!(error, UserRepositoryError::conflict("email"));
    assert_eq!(ctx.count_rows("users"), 1);
    assert_eq!(ctx.count_rows("phones"), 0);
}

#[rstest]
fn failed_phone_insert_rolls_back_the_user(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: failed_phone_insert_rolls_back_the_user skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());

    // `phones.number` is VARCHAR(20); the user row is inserted first.
    let error = ctx
        .block_on(repo.create(&new_user("lam@x.com", Some("0123456789012345678901234"))))
        .expect_err("oversized number is rejected");

    assert!(
        matches!(error, UserRepositoryError::Query { .. }),
        "expected query error, got {error:?}"
    );
    assert_eq!(ctx.count_rows("users"), 0);
    assert_eq!(ctx.count_rows("phones"), 0);
}

#[rstest]
fn update_upserts_the_phone(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: update_upserts_the_phone skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());
    let created = ctx
        .block_on(repo.create(&new_user("lam@x.com", None)))
        .expect("create user");
    let id = created.user.id;

    let with_phone = ctx
        .block_on(repo.update(
            id,
            &UserChanges {
                number: Some("0911".to_owned()),
                ..UserChanges::default()
            },
        ))
        .expect("add phone")
        .expect("user exists");
    let renumbered = ctx
        .block_on(repo.update(
            id,
            &UserChanges {
                name: Some("Lam N".to_owned()),
                number: Some("0922".to_owned()),
                ..UserChanges::default()
            },
        ))
        .expect("replace number")
        .expect("user exists");

    let first_phone = with_phone.phone.expect("phone created");
    let second_phone = renumbered.phone.expect("phone kept");
    assert_eq!(first_phone.id, second_phone.id);
    assert_eq!(second_phone.number, "0922");
    assert_eq!(renumbered.user.name, "Lam N");
    assert_eq!(renumbered.user.email, "lam@x.com");
    assert_eq!(ctx.count_rows("phones"), 1);
}

#[rstest]
fn update_without_number_keeps_the_phone(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: update_without_number_keeps_the_phone skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());
    let created = ctx
        .block_on(repo.create(&new_user("lam@x.com", Some("0911"))))
        .expect("create user");

    let updated = ctx
        .block_on(repo.update(
            created.user.id,
            &UserChanges {
                email: Some("new@x.com".to_owned()),
                ..UserChanges::default()
            },
        ))
        .expect("update user")
        .expect("user exists");

    assert_eq!(updated.user.email, "new@x.com");
    assert_eq!(
        updated.phone.map(|phone| phone.number),
        Some("0911".to_owned())
    );
}

#[rstest]
fn missing_user_is_reported_as_absent(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: missing_user_is_reported_as_absent skipped");
        return;
    };
    let repo = DieselUserRepository::new(ctx.pool());
    let missing = UserId::new(999);

    let fetched = ctx.block_on(repo.find_by_id(missing)).expect("fetch");
    let updated = ctx
        .block_on(repo.update(
            missing,
            &UserChanges {
                name: Some("Nobody".to_owned()),
                number: Some("0911".to_owned()),
                ..UserChanges::default()
            },
        ))
        .expect("update");
    let deleted = ctx.block_on(repo.delete(missing)).expect("delete");

    assert!(fetched.is_none());
    assert!(updated.is_none());
    assert!(!deleted);
    assert_eq!(ctx.count_rows("phones"), 0);
}

#[rstest]
fn delete_removes_phone_and_detaches_posts(db: Option<PgContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_phone_and_detaches_posts skipped");
        return;
    };
    let users = DieselUserRepository::new(ctx.pool());
    let posts = DieselPostRepository::new(ctx.pool());
    let phones = DieselPhoneRepository::new(ctx.pool());
    let owner = ctx
        .block_on(users.create(&new_user("lam@x.com", Some("0911"))))
        .expect("create owner");
    let phone_id = owner.phone.as_ref().expect("phone created").id;
    let post = ctx
        .block_on(posts.create(&NewPost {
            title: "Hello world".to_owned(),
            description: "First post body".to_owned(),
            user_id: Some(owner.user.id),
        }))
        .expect("create post");

    let deleted = ctx.block_on(users.delete(owner.user.id)).expect("delete");

    assert!(deleted);
    assert!(
        ctx.block_on(phones.find_by_id(phone_id))
            .expect("fetch phone")
            .is_none()
    );
    let detached = ctx
        .block_on(posts.find_by_id(post.post.id))
        .expect("fetch post")
        .expect("post survives its owner");
    assert_eq!(detached.post.user_id, None);
    assert_eq!(detached.owner_name, None);
}
