//! Recipe aggregate, its owned children and the shared construction routine.
//!
//! A recipe exclusively owns ordered ingredients and steps; neither holds a
//! reference back to the recipe. Categories are shared catalogue entries that
//! a recipe only references by id.
//!
//! Create and update both flow through [`RecipeDraft::try_from_submission`]
//! (validation) and [`RecipeContent::try_from_draft`] (invariants and
//! ordering), so a replaced recipe is rebuilt exactly like a new one.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FieldErrors, UserId};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum ingredient quantity length in characters.
pub const QUANTITY_MAX_CHARS: usize = 20;
/// Maximum ingredient unit length in characters.
pub const UNIT_MAX_CHARS: usize = 20;
/// Maximum ingredient name length in characters.
pub const INGREDIENT_NAME_MAX_CHARS: usize = 50;
/// Maximum step instruction length in characters.
pub const INSTRUCTION_MAX_CHARS: usize = 500;
/// Minimum number of steps a recipe must carry.
pub const MIN_STEPS: usize = 2;

/// Error raised when an identifier is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer, got {0}")]
pub struct NonPositiveId(pub i64);

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate a store-assigned identifier.
            pub fn new(value: i64) -> Result<Self, NonPositiveId> {
                if value > 0 { Ok(Self(value)) } else { Err(NonPositiveId(value)) }
            }

            /// Raw identifier value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = NonPositiveId;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

positive_id! {
    /// Store-assigned recipe identifier.
    RecipeId
}

positive_id! {
    /// Catalogue category identifier.
    CategoryId
}

/// How demanding a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Quick or beginner friendly.
    Easy,
    /// Some technique required.
    Medium,
    /// Demanding.
    Hard,
}

impl Difficulty {
    /// Every difficulty, in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Canonical upper-case name, as stored and serialised.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Parse the canonical upper-case name only.
    ///
    /// Request bodies use this; listing filters go through [`FromStr`], which
    /// ignores case.
    pub fn from_canonical(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown difficulty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

/// Shared catalogue entry referenced by recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    is_default: bool,
}

impl Category {
    /// Build a category read from the catalogue.
    pub fn new(id: CategoryId, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_default,
        }
    }

    /// Catalogue identifier.
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Unique display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the category ships with the default catalogue.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Ingredient line owned by a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    position: u32,
    quantity: String,
    unit: String,
    name: String,
}

impl Ingredient {
    /// Build an ingredient at a 1-based sort position.
    pub fn new(
        position: u32,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            position,
            quantity: quantity.into(),
            unit: unit.into(),
            name: name.into(),
        }
    }

    /// 1-based sort position.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Amount, free text such as `1/2`.
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Unit of measure.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Ingredient name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Preparation step owned by a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    number: u32,
    instruction: String,
}

impl Step {
    /// Build a step with a 1-based number.
    pub fn new(number: u32, instruction: impl Into<String>) -> Self {
        Self {
            number,
            instruction: instruction.into(),
        }
    }

    /// 1-based step number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Instruction text.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

/// Unvalidated ingredient as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSubmission {
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub name: Option<String>,
}

/// Unvalidated step as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSubmission {
    pub instruction: Option<String>,
}

/// Unvalidated create/update body.
///
/// Every field is optional so missing values surface as field violations
/// rather than deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSubmission {
    pub title: Option<String>,
    pub difficulty: Option<String>,
    pub cooking_time_minutes: Option<i64>,
    pub category_ids: Option<Vec<i64>>,
    pub ingredients: Option<Vec<IngredientSubmission>>,
    pub steps: Option<Vec<StepSubmission>>,
}

/// Validated ingredient fields, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

/// Validated recipe body.
///
/// `category_ids` is duplicate-free and keeps request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub category_ids: Vec<CategoryId>,
    pub ingredients: Vec<IngredientDraft>,
    pub instructions: Vec<String>,
}

fn required_text(
    errors: &mut FieldErrors,
    field: String,
    value: Option<&str>,
    required: &str,
    max_chars: usize,
    too_long: &str,
) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(field, required);
            None
        }
        Some(text) if text.chars().count() > max_chars => {
            errors.push(field, too_long);
            None
        }
        Some(text) => Some(text.to_owned()),
    }
}

fn validate_category_ids(errors: &mut FieldErrors, raw: Option<&[i64]>) -> Vec<CategoryId> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        errors.push("categoryIds", "At least one category is required");
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match CategoryId::new(*value) {
            Ok(id) => {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
            Err(_) => {
                errors.push("categoryIds", "Category IDs must be positive integers");
                return Vec::new();
            }
        }
    }
    ids
}

fn ingredient_fields(
    errors: &mut FieldErrors,
    index: usize,
    quantity: Option<&str>,
    unit: Option<&str>,
    name: Option<&str>,
) -> Option<IngredientDraft> {
    let quantity = required_text(
        errors,
        format!("ingredients[{index}].quantity"),
        quantity,
        "Quantity is required",
        QUANTITY_MAX_CHARS,
        "Quantity must not exceed 20 characters",
    );
    let unit = required_text(
        errors,
        format!("ingredients[{index}].unit"),
        unit,
        "Unit is required",
        UNIT_MAX_CHARS,
        "Unit must not exceed 20 characters",
    );
    let name = required_text(
        errors,
        format!("ingredients[{index}].name"),
        name,
        "Ingredient name is required",
        INGREDIENT_NAME_MAX_CHARS,
        "Ingredient name must not exceed 50 characters",
    );
    Some(IngredientDraft {
        quantity: quantity?,
        unit: unit?,
        name: name?,
    })
}

fn instruction_field(
    errors: &mut FieldErrors,
    index: usize,
    instruction: Option<&str>,
) -> Option<String> {
    required_text(
        errors,
        format!("steps[{index}].instruction"),
        instruction,
        "Instruction is required",
        INSTRUCTION_MAX_CHARS,
        "Instruction must be between 1 and 500 characters",
    )
}

fn title_field(errors: &mut FieldErrors, title: Option<&str>) -> Option<String> {
    required_text(
        errors,
        "title".to_owned(),
        title,
        "Title is required",
        TITLE_MAX_CHARS,
        "Title must be between 1 and 100 characters",
    )
}

fn cooking_time_field(errors: &mut FieldErrors, minutes: Option<i64>) -> Option<u32> {
    match minutes {
        None => {
            errors.push("cookingTimeMinutes", "Cooking time is required");
            None
        }
        Some(minutes) if minutes < 1 => {
            errors.push("cookingTimeMinutes", "Cooking time must be at least 1 minute");
            None
        }
        Some(minutes) => match u32::try_from(minutes) {
            Ok(value) if i32::try_from(value).is_ok() => Some(value),
            _ => {
                errors.push(
                    "cookingTimeMinutes",
                    format!("Cooking time must not exceed {} minutes", i32::MAX),
                );
                None
            }
        },
    }
}

fn validate_ingredients(
    errors: &mut FieldErrors,
    raw: Option<&[IngredientSubmission]>,
) -> Vec<IngredientDraft> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        errors.push("ingredients", "At least one ingredient is required");
    }
    raw.iter()
        .enumerate()
        .filter_map(|(index, item)| {
            ingredient_fields(
                errors,
                index,
                item.quantity.as_deref(),
                item.unit.as_deref(),
                item.name.as_deref(),
            )
        })
        .collect()
}

fn validate_steps(errors: &mut FieldErrors, raw: Option<&[StepSubmission]>) -> Vec<String> {
    let raw = raw.unwrap_or_default();
    if raw.len() < MIN_STEPS {
        errors.push("steps", "At least two steps are required");
    }
    raw.iter()
        .enumerate()
        .filter_map(|(index, step)| instruction_field(errors, index, step.instruction.as_deref()))
        .collect()
}

impl RecipeDraft {
    /// Validate a submission, reporting every violation at once.
    ///
    /// # Examples
    /// ```
    /// use recipe_notebook::domain::{
    ///     IngredientSubmission, RecipeDraft, RecipeSubmission, StepSubmission,
    /// };
    ///
    /// let submission = RecipeSubmission {
    ///     title: Some("Pancakes".into()),
    ///     difficulty: Some("EASY".into()),
    ///     cooking_time_minutes: Some(15),
    ///     category_ids: Some(vec![1]),
    ///     ingredients: Some(vec![IngredientSubmission {
    ///         quantity: Some("200".into()),
    ///         unit: Some("g".into()),
    ///         name: Some("flour".into()),
    ///     }]),
    ///     steps: Some(vec![
    ///         StepSubmission { instruction: Some("Whisk".into()) },
    ///         StepSubmission { instruction: Some("Fry".into()) },
    ///     ]),
    /// };
    /// let draft = RecipeDraft::try_from_submission(&submission).expect("valid");
    /// assert_eq!(draft.title, "Pancakes");
    /// ```
    pub fn try_from_submission(submission: &RecipeSubmission) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = title_field(&mut errors, submission.title.as_deref());

        let difficulty = match submission.difficulty.as_deref() {
            None => {
                errors.push("difficulty", "Difficulty is required");
                None
            }
            Some(value) => {
                let parsed = Difficulty::from_canonical(value);
                if parsed.is_none() {
                    errors.push("difficulty", "Difficulty must be EASY, MEDIUM, or HARD");
                }
                parsed
            }
        };

        let cooking_time_minutes =
            cooking_time_field(&mut errors, submission.cooking_time_minutes);

        let category_ids = validate_category_ids(&mut errors, submission.category_ids.as_deref());
        let ingredients = validate_ingredients(&mut errors, submission.ingredients.as_deref());
        let instructions = validate_steps(&mut errors, submission.steps.as_deref());

        match (title, difficulty, cooking_time_minutes) {
            (Some(title), Some(difficulty), Some(cooking_time_minutes)) if errors.is_empty() => {
                Ok(Self {
                    title,
                    difficulty,
                    cooking_time_minutes,
                    category_ids,
                    ingredients,
                    instructions,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Ordered recipe content produced from a validated draft.
///
/// Ingredient positions run `1..=N` and step numbers `1..=M` in draft order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeContent {
    title: String,
    difficulty: Difficulty,
    cooking_time_minutes: u32,
    category_ids: Vec<CategoryId>,
    ingredients: Vec<Ingredient>,
    steps: Vec<Step>,
}

fn one_based(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1))
}

impl RecipeContent {
    /// Check the stored-state invariants and assign ingredient positions and
    /// step numbers from draft order.
    ///
    /// Drafts assembled by hand get the same checks as submissions: a blank
    /// title, a zero cooking time, no categories, no ingredients or fewer
    /// than two steps are reported together. Text is trimmed and repeated
    /// category ids collapse to their first occurrence.
    ///
    /// # Examples
    /// ```
    /// use recipe_notebook::domain::{CategoryId, Difficulty, RecipeContent, RecipeDraft};
    ///
    /// let draft = RecipeDraft {
    ///     title: "Toast".into(),
    ///     difficulty: Difficulty::Easy,
    ///     cooking_time_minutes: 3,
    ///     category_ids: vec![CategoryId::new(1).expect("positive")],
    ///     ingredients: Vec::new(),
    ///     instructions: vec!["Toast".into()],
    /// };
    /// let errors = RecipeContent::try_from_draft(draft).expect_err("incomplete");
    /// assert_eq!(errors.get("ingredients"), Some("At least one ingredient is required"));
    /// assert_eq!(errors.get("steps"), Some("At least two steps are required"));
    /// ```
    pub fn try_from_draft(draft: RecipeDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = title_field(&mut errors, Some(draft.title.as_str()));
        let cooking_time_minutes =
            cooking_time_field(&mut errors, Some(i64::from(draft.cooking_time_minutes)));

        if draft.category_ids.is_empty() {
            errors.push("categoryIds", "At least one category is required");
        }
        let mut seen = HashSet::new();
        let category_ids: Vec<CategoryId> = draft
            .category_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        if draft.ingredients.is_empty() {
            errors.push("ingredients", "At least one ingredient is required");
        }
        let ingredients: Vec<Ingredient> = draft
            .ingredients
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                ingredient_fields(
                    &mut errors,
                    index,
                    Some(item.quantity.as_str()),
                    Some(item.unit.as_str()),
                    Some(item.name.as_str()),
                )
            })
            .enumerate()
            .map(|(index, item)| {
                Ingredient::new(one_based(index), item.quantity, item.unit, item.name)
            })
            .collect();

        if draft.instructions.len() < MIN_STEPS {
            errors.push("steps", "At least two steps are required");
        }
        let steps: Vec<Step> = draft
            .instructions
            .iter()
            .enumerate()
            .filter_map(|(index, instruction)| {
                instruction_field(&mut errors, index, Some(instruction.as_str()))
            })
            .enumerate()
            .map(|(index, instruction)| Step::new(one_based(index), instruction))
            .collect();

        match (title, cooking_time_minutes) {
            (Some(title), Some(cooking_time_minutes)) if errors.is_empty() => Ok(Self {
                title,
                difficulty: draft.difficulty,
                cooking_time_minutes,
                category_ids,
                ingredients,
                steps,
            }),
            _ => Err(errors),
        }
    }

    /// Recipe title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Difficulty rating.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cooking time in minutes, at least one.
    pub fn cooking_time_minutes(&self) -> u32 {
        self.cooking_time_minutes
    }

    /// Referenced categories in association order.
    pub fn category_ids(&self) -> &[CategoryId] {
        &self.category_ids
    }

    /// Ingredients in position order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Steps in number order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Recipe about to be inserted for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub owner: UserId,
    pub content: RecipeContent,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of an existing recipe's content.
///
/// Adapters must only apply it when `owner` still owns `id`, and must drop
/// every existing ingredient, step and category association first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeReplacement {
    pub id: RecipeId,
    pub owner: UserId,
    pub content: RecipeContent,
    pub updated_at: DateTime<Utc>,
}

/// Stored recipe parts handed to [`Recipe::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeParts {
    pub id: RecipeId,
    pub owner: UserId,
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted recipe aggregate.
///
/// Children are kept in whatever order storage returned them; projections
/// sort them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    owner: UserId,
    title: String,
    difficulty: Difficulty,
    cooking_time_minutes: u32,
    ingredients: Vec<Ingredient>,
    steps: Vec<Step>,
    categories: Vec<Category>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Reassemble a recipe read from storage.
    pub fn from_parts(parts: RecipeParts) -> Self {
        let RecipeParts {
            id,
            owner,
            title,
            difficulty,
            cooking_time_minutes,
            ingredients,
            steps,
            categories,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            owner,
            title,
            difficulty,
            cooking_time_minutes,
            ingredients,
            steps,
            categories,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cooking_time_minutes(&self) -> u32 {
        self.cooking_time_minutes
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Categories in stored association order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Validation and ordering coverage for recipe construction.

    use super::*;
    use rstest::{fixture, rstest};

    fn ingredient(quantity: &str, unit: &str, name: &str) -> IngredientSubmission {
        IngredientSubmission {
            quantity: Some(quantity.to_owned()),
            unit: Some(unit.to_owned()),
            name: Some(name.to_owned()),
        }
    }

    fn step(text: &str) -> StepSubmission {
        StepSubmission {
            instruction: Some(text.to_owned()),
        }
    }

    #[fixture]
    fn submission() -> RecipeSubmission {
        RecipeSubmission {
            title: Some("  Pancakes ".to_owned()),
            difficulty: Some("EASY".to_owned()),
            cooking_time_minutes: Some(20),
            category_ids: Some(vec![2, 1, 2]),
            ingredients: Some(vec![ingredient("200", "g", "flour"), ingredient("2", "pcs", "egg")]),
            steps: Some(vec![step("Whisk"), step("Rest"), step("Fry")]),
        }
    }

    #[rstest]
    fn valid_submission_is_trimmed_and_deduplicated(submission: RecipeSubmission) {
        let draft = RecipeDraft::try_from_submission(&submission).expect("valid draft");
        assert_eq!(draft.title, "Pancakes");
        assert_eq!(draft.difficulty, Difficulty::Easy);
        let ids: Vec<i64> = draft.category_ids.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[rstest]
    fn content_numbers_children_from_one_in_request_order(submission: RecipeSubmission) {
        let draft = RecipeDraft::try_from_submission(&submission).expect("valid draft");
        let content = RecipeContent::try_from_draft(draft).expect("valid content");

        let positions: Vec<(u32, &str)> = content
            .ingredients()
            .iter()
            .map(|i| (i.position(), i.name()))
            .collect();
        assert_eq!(positions, vec![(1, "flour"), (2, "egg")]);

        let steps: Vec<(u32, &str)> = content
            .steps()
            .iter()
            .map(|s| (s.number(), s.instruction()))
            .collect();
        assert_eq!(steps, vec![(1, "Whisk"), (2, "Rest"), (3, "Fry")]);
    }

    #[rstest]
    fn hand_built_drafts_must_meet_stored_invariants() {
        let draft = RecipeDraft {
            title: "   ".to_owned(),
            difficulty: Difficulty::Hard,
            cooking_time_minutes: 0,
            category_ids: Vec::new(),
            ingredients: Vec::new(),
            instructions: vec!["only one".to_owned()],
        };

        let errors = RecipeContent::try_from_draft(draft).expect_err("draft rejected");

        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(
            errors.get("cookingTimeMinutes"),
            Some("Cooking time must be at least 1 minute")
        );
        assert_eq!(errors.get("categoryIds"), Some("At least one category is required"));
        assert_eq!(errors.get("ingredients"), Some("At least one ingredient is required"));
        assert_eq!(errors.get("steps"), Some("At least two steps are required"));
    }

    #[rstest]
    fn hand_built_drafts_are_trimmed_and_deduplicated() {
        let category = CategoryId::new(3).expect("positive");
        let draft = RecipeDraft {
            title: " Soup ".to_owned(),
            difficulty: Difficulty::Easy,
            cooking_time_minutes: 30,
            category_ids: vec![category, category],
            ingredients: vec![IngredientDraft {
                quantity: "1".to_owned(),
                unit: " l ".to_owned(),
                name: "stock".to_owned(),
            }],
            instructions: vec!["Heat".to_owned(), " Serve ".to_owned()],
        };

        let content = RecipeContent::try_from_draft(draft).expect("valid content");

        assert_eq!(content.title(), "Soup");
        assert_eq!(content.category_ids(), [category]);
        assert_eq!(content.ingredients()[0].unit(), "l");
        assert_eq!(content.steps()[1].instruction(), "Serve");
    }

    #[rstest]
    fn empty_submission_reports_every_required_field() {
        let errors = RecipeDraft::try_from_submission(&RecipeSubmission::default())
            .expect_err("empty submission rejected");
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("difficulty"), Some("Difficulty is required"));
        assert_eq!(errors.get("cookingTimeMinutes"), Some("Cooking time is required"));
        assert_eq!(errors.get("categoryIds"), Some("At least one category is required"));
        assert_eq!(errors.get("ingredients"), Some("At least one ingredient is required"));
        assert_eq!(errors.get("steps"), Some("At least two steps are required"));
    }

    #[rstest]
    #[case("easy")]
    #[case("EXTREME")]
    fn body_difficulty_must_be_canonical(mut submission: RecipeSubmission, #[case] value: &str) {
        submission.difficulty = Some(value.to_owned());
        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(
            errors.get("difficulty"),
            Some("Difficulty must be EASY, MEDIUM, or HARD")
        );
    }

    #[rstest]
    fn nested_violations_are_indexed(mut submission: RecipeSubmission) {
        submission.ingredients = Some(vec![
            ingredient("1", "cup", "milk"),
            ingredient("", "g", &"x".repeat(51)),
        ]);
        submission.steps = Some(vec![step("ok"), step(&"y".repeat(501))]);

        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(errors.get("ingredients[1].quantity"), Some("Quantity is required"));
        assert_eq!(
            errors.get("ingredients[1].name"),
            Some("Ingredient name must not exceed 50 characters")
        );
        assert_eq!(
            errors.get("steps[1].instruction"),
            Some("Instruction must be between 1 and 500 characters")
        );
        assert!(errors.get("ingredients[0].quantity").is_none());
    }

    #[rstest]
    #[case(0, "Cooking time must be at least 1 minute")]
    #[case(-5, "Cooking time must be at least 1 minute")]
    fn cooking_time_must_be_positive(
        mut submission: RecipeSubmission,
        #[case] minutes: i64,
        #[case] message: &str,
    ) {
        submission.cooking_time_minutes = Some(minutes);
        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(errors.get("cookingTimeMinutes"), Some(message));
    }

    #[rstest]
    fn single_step_is_rejected(mut submission: RecipeSubmission) {
        submission.steps = Some(vec![step("Only one")]);
        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(errors.get("steps"), Some("At least two steps are required"));
    }

    #[rstest]
    fn non_positive_category_id_invalidates_field(mut submission: RecipeSubmission) {
        submission.category_ids = Some(vec![1, 0]);
        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(
            errors.get("categoryIds"),
            Some("Category IDs must be positive integers")
        );
    }

    #[rstest]
    fn title_over_limit_is_rejected(mut submission: RecipeSubmission) {
        submission.title = Some("t".repeat(101));
        let errors = RecipeDraft::try_from_submission(&submission).expect_err("rejected");
        assert_eq!(
            errors.get("title"),
            Some("Title must be between 1 and 100 characters")
        );
    }

    #[rstest]
    #[case("easy", Difficulty::Easy)]
    #[case("Medium", Difficulty::Medium)]
    #[case("HARD", Difficulty::Hard)]
    fn difficulty_parse_ignores_case(#[case] raw: &str, #[case] expected: Difficulty) {
        assert_eq!(raw.parse::<Difficulty>().expect("known difficulty"), expected);
    }

    #[rstest]
    fn identifiers_must_be_positive() {
        assert_eq!(RecipeId::new(0), Err(NonPositiveId(0)));
        assert_eq!(CategoryId::new(7).map(CategoryId::get), Ok(7));
    }
}
