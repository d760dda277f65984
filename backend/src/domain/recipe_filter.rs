//! Listing parameter validation and normalisation.
//!
//! [`RecipeFilter::build`] turns raw query-string values into a validated
//! filter for one owner. It never fails fast: every malformed field is
//! recorded in the returned [`FieldErrors`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PageRequest};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Difficulty, FieldErrors, UserId};

/// Column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Title,
    CookingTime,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Every sortable field in allow-list order.
    pub const ALL: [Self; 4] = [
        Self::Title,
        Self::CookingTime,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Query-string name of the field.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CookingTime => "cookingTimeMinutes",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Match a query-string name exactly.
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_param() == value)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Error returned for directions other than `asc` and `desc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0}")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ParseSortDirectionError(s.to_owned()))
        }
    }
}

/// Requested ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecipeSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub category_ids: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
}

/// Validated listing filter for one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFilter {
    owner: UserId,
    category_ids: Option<Vec<CategoryId>>,
    difficulty: Option<Difficulty>,
    search: Option<String>,
    sort: RecipeSort,
    page: PageRequest,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_page(errors: &mut FieldErrors, raw: Option<&str>) -> u32 {
    let Some(raw) = present(raw) else {
        return 0;
    };
    match raw.parse::<i64>() {
        Ok(value) if value < 0 => {
            errors.push("page", "Page number must be >= 0");
            0
        }
        Ok(value) => u32::try_from(value).unwrap_or_else(|_| {
            errors.push("page", "Page number must be a valid integer");
            0
        }),
        Err(_) => {
            errors.push("page", "Page number must be a valid integer");
            0
        }
    }
}

fn parse_size(errors: &mut FieldErrors, raw: Option<&str>) -> u32 {
    let Some(raw) = present(raw) else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.parse::<i64>() {
        Ok(value) if (i64::from(MIN_PAGE_SIZE)..=i64::from(MAX_PAGE_SIZE)).contains(&value) => {
            u32::try_from(value).unwrap_or(DEFAULT_PAGE_SIZE)
        }
        _ => {
            errors.push(
                "size",
                format!("Page size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"),
            );
            DEFAULT_PAGE_SIZE
        }
    }
}

fn parse_sort(errors: &mut FieldErrors, raw: Option<&str>) -> SortField {
    let Some(raw) = present(raw) else {
        return SortField::default();
    };
    SortField::from_param(raw).unwrap_or_else(|| {
        let allowed: Vec<&str> = SortField::ALL.iter().map(|f| f.as_param()).collect();
        errors.push("sort", format!("Must be one of: {}", allowed.join(", ")));
        SortField::default()
    })
}

fn parse_direction(errors: &mut FieldErrors, raw: Option<&str>) -> SortDirection {
    let Some(raw) = present(raw) else {
        return SortDirection::default();
    };
    raw.parse().unwrap_or_else(|_| {
        errors.push("direction", "Must be one of: asc, desc");
        SortDirection::default()
    })
}

fn parse_difficulty(errors: &mut FieldErrors, raw: Option<&str>) -> Option<Difficulty> {
    let raw = present(raw)?;
    match raw.parse() {
        Ok(difficulty) => Some(difficulty),
        Err(_) => {
            errors.push("difficulty", "Must be one of: EASY, MEDIUM, HARD");
            None
        }
    }
}

fn parse_category_ids(errors: &mut FieldErrors, raw: Option<&str>) -> Option<Vec<CategoryId>> {
    let raw = present(raw)?;
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let parsed = part
            .parse::<i64>()
            .ok()
            .and_then(|value| CategoryId::new(value).ok());
        let Some(id) = parsed else {
            errors.push("categoryIds", "Category IDs must be valid numbers");
            return None;
        };
        if seen.insert(id) {
            ids.push(id);
        }
    }
    (!ids.is_empty()).then_some(ids)
}

impl RecipeFilter {
    /// Validate raw parameters for `owner`.
    ///
    /// Blank values fall back to their defaults (page `0`, size `20`, sort
    /// `title`, direction `asc`) or are treated as absent for the optional
    /// filters.
    ///
    /// # Examples
    /// ```
    /// use recipe_notebook::domain::{Difficulty, RecipeFilter, RecipeListParams, UserId};
    ///
    /// let params = RecipeListParams {
    ///     difficulty: Some("easy".into()),
    ///     search: Some("  cake ".into()),
    ///     ..RecipeListParams::default()
    /// };
    /// let filter = RecipeFilter::build(UserId::random(), &params).expect("valid filter");
    /// assert_eq!(filter.difficulty(), Some(Difficulty::Easy));
    /// assert_eq!(filter.search(), Some("cake"));
    /// assert_eq!(filter.page().size(), 20);
    /// ```
    pub fn build(owner: UserId, params: &RecipeListParams) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let page_index = parse_page(&mut errors, params.page.as_deref());
        let size = parse_size(&mut errors, params.size.as_deref());
        let field = parse_sort(&mut errors, params.sort.as_deref());
        let direction = parse_direction(&mut errors, params.direction.as_deref());
        let difficulty = parse_difficulty(&mut errors, params.difficulty.as_deref());
        let category_ids = parse_category_ids(&mut errors, params.category_ids.as_deref());
        let search = present(params.search.as_deref()).map(str::to_owned);

        let page = PageRequest::new(page_index, size).unwrap_or_default();
        errors.into_result(Self {
            owner,
            category_ids,
            difficulty,
            search,
            sort: RecipeSort { field, direction },
            page,
        })
    }

    /// Caller whose recipes are listed.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Requested categories, duplicate-free in request order.
    pub fn category_ids(&self) -> Option<&[CategoryId]> {
        self.category_ids.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Trimmed, non-blank title search term.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> RecipeSort {
        self.sort
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    fn params() -> RecipeListParams {
        RecipeListParams::default()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_supplied(owner: UserId) {
        let filter = RecipeFilter::build(owner.clone(), &params()).expect("defaults are valid");
        assert_eq!(filter.owner(), &owner);
        assert_eq!(filter.page(), PageRequest::default());
        assert_eq!(filter.sort(), RecipeSort::default());
        assert!(filter.category_ids().is_none());
        assert!(filter.difficulty().is_none());
        assert!(filter.search().is_none());
    }

    #[rstest]
    fn every_violation_is_reported_together(owner: UserId) {
        let raw = RecipeListParams {
            page: Some("-1".into()),
            size: Some("101".into()),
            sort: Some("calories".into()),
            direction: Some("sideways".into()),
            category_ids: Some("1,x".into()),
            difficulty: Some("extreme".into()),
            search: None,
        };
        let errors = RecipeFilter::build(owner, &raw).expect_err("all fields invalid");

        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("page"), Some("Page number must be >= 0"));
        assert_eq!(errors.get("size"), Some("Page size must be between 1 and 100"));
        assert_eq!(
            errors.get("sort"),
            Some("Must be one of: title, cookingTimeMinutes, createdAt, updatedAt")
        );
        assert_eq!(errors.get("direction"), Some("Must be one of: asc, desc"));
        assert_eq!(errors.get("difficulty"), Some("Must be one of: EASY, MEDIUM, HARD"));
        assert_eq!(errors.get("categoryIds"), Some("Category IDs must be valid numbers"));
    }

    #[rstest]
    #[case("DESC", SortDirection::Desc)]
    #[case("asc", SortDirection::Asc)]
    #[case("Desc", SortDirection::Desc)]
    fn direction_ignores_case(owner: UserId, #[case] raw: &str, #[case] expected: SortDirection) {
        let raw_params = RecipeListParams {
            direction: Some(raw.into()),
            ..params()
        };
        let filter = RecipeFilter::build(owner, &raw_params).expect("valid direction");
        assert_eq!(filter.sort().direction, expected);
    }

    #[rstest]
    #[case("cookingtimeminutes")]
    #[case("Title")]
    fn sort_field_is_case_sensitive(owner: UserId, #[case] raw: &str) {
        let raw_params = RecipeListParams {
            sort: Some(raw.into()),
            ..params()
        };
        let errors = RecipeFilter::build(owner, &raw_params).expect_err("rejected");
        assert!(errors.get("sort").is_some());
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    fn non_positive_category_id_invalidates_field(owner: UserId, #[case] bad: &str) {
        let raw_params = RecipeListParams {
            category_ids: Some(format!("1,{bad}")),
            ..params()
        };
        let errors = RecipeFilter::build(owner, &raw_params).expect_err("rejected");
        assert_eq!(errors.get("categoryIds"), Some("Category IDs must be valid numbers"));
    }

    #[rstest]
    fn category_ids_skip_blanks_and_duplicates(owner: UserId) {
        let raw_params = RecipeListParams {
            category_ids: Some(" 3, ,1,3,".into()),
            ..params()
        };
        let filter = RecipeFilter::build(owner, &raw_params).expect("valid ids");
        let ids: Vec<i64> = filter
            .category_ids()
            .expect("ids present")
            .iter()
            .map(|id| id.get())
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(Some(""))]
    #[case(None)]
    fn blank_search_is_absent(owner: UserId, #[case] search: Option<&str>) {
        let raw_params = RecipeListParams {
            search: search.map(str::to_owned),
            ..params()
        };
        let filter = RecipeFilter::build(owner, &raw_params).expect("valid");
        assert!(filter.search().is_none());
    }

    #[rstest]
    fn non_numeric_page_is_reported(owner: UserId) {
        let raw_params = RecipeListParams {
            page: Some("first".into()),
            ..params()
        };
        let errors = RecipeFilter::build(owner, &raw_params).expect_err("rejected");
        assert_eq!(errors.get("page"), Some("Page number must be a valid integer"));
    }

    #[rstest]
    fn valid_parameters_are_normalised(owner: UserId) {
        let raw_params = RecipeListParams {
            page: Some("2".into()),
            size: Some("5".into()),
            sort: Some("cookingTimeMinutes".into()),
            direction: Some("DESC".into()),
            category_ids: Some("2".into()),
            difficulty: Some("medium".into()),
            search: Some(" Cake ".into()),
        };
        let filter = RecipeFilter::build(owner, &raw_params).expect("valid");
        assert_eq!(filter.page().page(), 2);
        assert_eq!(filter.page().size(), 5);
        assert_eq!(filter.sort().field, SortField::CookingTime);
        assert_eq!(filter.difficulty(), Some(Difficulty::Medium));
        assert_eq!(filter.search(), Some("Cake"));
    }
}
