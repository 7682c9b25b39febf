//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Varchar,
        username -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published cheeps. `text` is limited to 160 characters by a CHECK.
    cheeps (id) {
        id -> Int8,
        author_id -> Varchar,
        text -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Like-set membership, one row per (cheep, user).
    cheep_likes (cheep_id, user_id) {
        cheep_id -> Int8,
        user_id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges; the composite key enforces uniqueness.
    follows (follower_id, followee_id) {
        follower_id -> Varchar,
        followee_id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-row simulator counter.
    latest (id) {
        id -> Int4,
        value -> Int8,
    }
}

diesel::joinable!(cheeps -> users (author_id));
diesel::joinable!(cheep_likes -> cheeps (cheep_id));

diesel::allow_tables_to_appear_in_same_query!(users, cheeps, cheep_likes, follows, latest);
