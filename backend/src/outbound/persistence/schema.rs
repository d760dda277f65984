//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used by
//! Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Shared category catalogue. Never written by the application.
    categories (id) {
        /// Primary key.
        id -> Int8,
        /// Unique display name (max 50 characters).
        name -> Varchar,
        /// Whether the row belongs to the seeded default catalogue.
        is_default -> Bool,
    }
}

diesel::table! {
    /// Recipe header rows, one per recipe.
    recipes (id) {
        /// Primary key assigned by an identity sequence.
        id -> Int8,
        /// Owning user (UUID issued by the identity provider).
        user_id -> Uuid,
        /// Title (1-100 characters).
        title -> Varchar,
        /// `EASY`, `MEDIUM` or `HARD`.
        difficulty -> Varchar,
        /// Cooking time in minutes, at least one.
        cooking_time_minutes -> Int4,
        /// Creation timestamp, preserved across replacements.
        created_at -> Timestamptz,
        /// Last replacement timestamp, never earlier than `created_at`.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredients exclusively owned by a recipe.
    ///
    /// `(recipe_id, sort_order)` is unique.
    ingredients (id) {
        id -> Int8,
        recipe_id -> Int8,
        quantity -> Varchar,
        unit -> Varchar,
        name -> Varchar,
        /// 1-based position within the recipe.
        sort_order -> Int4,
    }
}

diesel::table! {
    /// Steps exclusively owned by a recipe.
    ///
    /// `(recipe_id, step_number)` is unique.
    steps (id) {
        id -> Int8,
        recipe_id -> Int8,
        /// 1-based step number within the recipe.
        step_number -> Int4,
        instruction -> Varchar,
    }
}

diesel::table! {
    /// Recipe to category associations in request order.
    recipe_categories (recipe_id, category_id) {
        recipe_id -> Int8,
        category_id -> Int8,
        /// 1-based association order.
        position -> Int4,
    }
}

diesel::joinable!(ingredients -> recipes (recipe_id));
diesel::joinable!(steps -> recipes (recipe_id));
diesel::joinable!(recipe_categories -> recipes (recipe_id));
diesel::joinable!(recipe_categories -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    recipes,
    ingredients,
    steps,
    recipe_categories,
);
