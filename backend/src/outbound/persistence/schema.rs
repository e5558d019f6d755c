//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key, issued by a `BIGSERIAL` sequence.
        id -> Int8,
        name -> Varchar,
        /// Unique (`users_email_key`).
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Phones, one per user at most.
    phones (id) {
        id -> Int8,
        number -> Varchar,
        /// Unique (`phones_user_id_key`); cascades on user deletion.
        user_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts, optionally owned by a user.
    posts (id) {
        id -> Int8,
        /// Unique (`posts_title_key`).
        title -> Varchar,
        description -> Varchar,
        /// Set to null when the owner is deleted.
        user_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(phones -> users (user_id));
diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(phones, posts, users);
