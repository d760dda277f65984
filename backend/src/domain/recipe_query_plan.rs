//! Composition of a listing filter into predicate, ordering and page window.
//!
//! Each optional filter is a fragment function returning an optional clause.
//! Fragments fold into a [`RecipePredicate`] by logical AND; a missing clause
//! leaves the predicate unchanged. The ownership gate is not a fragment: a
//! predicate can only be built from an owner, so no plan exists without it.
//!
//! Storage adapters translate the plan into their own query language; the
//! `matches` and `compare` methods define the reference semantics they must
//! reproduce.

use std::cmp::Ordering;

use pagination::PageRequest;

use super::{CategoryId, Difficulty, Recipe, RecipeFilter, RecipeSort, SortDirection, SortField, UserId};

/// One optional listing condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeClause {
    /// Recipe references at least one of the ids.
    InAnyCategory(Vec<CategoryId>),
    /// Difficulty equals the value.
    DifficultyIs(Difficulty),
    /// Title contains the trimmed term, ignoring case.
    TitleContains(String),
}

impl RecipeClause {
    /// Evaluate the clause against a stored recipe.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Self::InAnyCategory(ids) => recipe
                .categories()
                .iter()
                .any(|category| ids.contains(&category.id())),
            Self::DifficultyIs(difficulty) => recipe.difficulty() == *difficulty,
            Self::TitleContains(term) => recipe
                .title()
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

/// Ownership gate followed by zero or more ANDed clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePredicate {
    owner: UserId,
    clauses: Vec<RecipeClause>,
}

impl RecipePredicate {
    /// Start a predicate that only admits recipes owned by `owner`.
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner,
            clauses: Vec::new(),
        }
    }

    /// AND another clause onto the predicate; `None` is the identity.
    #[must_use]
    pub fn and(mut self, clause: Option<RecipeClause>) -> Self {
        self.clauses.extend(clause);
        self
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Clauses applied after the ownership gate, in composition order.
    pub fn clauses(&self) -> &[RecipeClause] {
        &self.clauses
    }

    /// Evaluate ownership first, then every clause.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe.owner() == &self.owner && self.clauses.iter().all(|c| c.matches(recipe))
    }
}

type Fragment = fn(&RecipeFilter) -> Option<RecipeClause>;

fn category_fragment(filter: &RecipeFilter) -> Option<RecipeClause> {
    filter
        .category_ids()
        .map(|ids| RecipeClause::InAnyCategory(ids.to_vec()))
}

fn difficulty_fragment(filter: &RecipeFilter) -> Option<RecipeClause> {
    filter.difficulty().map(RecipeClause::DifficultyIs)
}

fn search_fragment(filter: &RecipeFilter) -> Option<RecipeClause> {
    filter
        .search()
        .map(|term| RecipeClause::TitleContains(term.to_owned()))
}

const FRAGMENTS: [Fragment; 3] = [category_fragment, difficulty_fragment, search_fragment];

/// Everything a storage adapter needs to answer one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQueryPlan {
    predicate: RecipePredicate,
    sort: RecipeSort,
    page: PageRequest,
}

impl RecipeQueryPlan {
    /// Fold every fragment of `filter` onto its owner's predicate.
    ///
    /// # Examples
    /// ```
    /// use recipe_notebook::domain::{
    ///     RecipeClause, RecipeFilter, RecipeListParams, RecipeQueryPlan, UserId,
    /// };
    ///
    /// let owner = UserId::random();
    /// let params = RecipeListParams {
    ///     search: Some("cake".into()),
    ///     ..RecipeListParams::default()
    /// };
    /// let filter = RecipeFilter::build(owner.clone(), &params).expect("valid");
    /// let plan = RecipeQueryPlan::from_filter(&filter);
    /// assert_eq!(plan.predicate().owner(), &owner);
    /// assert_eq!(
    ///     plan.predicate().clauses(),
    ///     &[RecipeClause::TitleContains("cake".into())]
    /// );
    /// ```
    pub fn from_filter(filter: &RecipeFilter) -> Self {
        let predicate = FRAGMENTS
            .iter()
            .fold(RecipePredicate::owned_by(filter.owner().clone()), |acc, fragment| {
                acc.and(fragment(filter))
            });
        Self {
            predicate,
            sort: filter.sort(),
            page: filter.page(),
        }
    }

    pub fn predicate(&self) -> &RecipePredicate {
        &self.predicate
    }

    pub fn sort(&self) -> RecipeSort {
        self.sort
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Listing order: the requested key and direction, then id ascending.
    ///
    /// The id tie-break ignores the requested direction so equal keys always
    /// list in insertion order.
    pub fn compare(&self, left: &Recipe, right: &Recipe) -> Ordering {
        let primary = match self.sort.field {
            SortField::Title => left.title().cmp(right.title()),
            SortField::CookingTime => left.cooking_time_minutes().cmp(&right.cooking_time_minutes()),
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
        };
        let primary = match self.sort.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| left.id().cmp(&right.id()))
    }
}
