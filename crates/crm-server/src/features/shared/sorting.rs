//! Allow-listed sorting for list queries
//!
//! Sort keys arrive as raw strings from the query string and are only ever
//! turned into SQL through [`SortField::column`], so user input never reaches
//! an `ORDER BY` clause directly.

use std::fmt;

/// A closed set of sortable fields for one listing.
pub trait SortField: Copy + fmt::Debug + Send + Sync + 'static {
    /// Every accepted field, in the order shown in error messages.
    const ALL: &'static [Self];

    /// Name accepted on the wire (camelCase).
    fn name(self) -> &'static str;

    /// Column used in `ORDER BY`.
    fn column(self) -> &'static str;

    /// Case-sensitive lookup by wire name.
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == raw)
    }

    /// Wire names rendered as `[a, b, c]`.
    fn allowed() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
        format!("[{}]", names.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALLOWED: &'static str = "[asc, desc]";

    /// Case-insensitive: `asc`, `ASC` and `Desc` are all accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A checked sort: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Why a raw sort request was refused. The display text is returned to
/// clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("Invalid sort parameter '{value}'. Allowed values are {allowed}")]
    Field { value: String, allowed: String },

    #[error("Invalid sort direction '{value}'. Allowed values are {}", SortDirection::ALLOWED)]
    Direction { value: String },
}

impl<F: SortField> Sort<F> {
    /// Check the field against the allow-list first, then the direction.
    pub fn parse(sort_by: &str, sort_dir: &str) -> Result<Self, SortError> {
        let field = F::parse(sort_by).ok_or_else(|| SortError::Field {
            value: sort_by.to_string(),
            allowed: F::allowed(),
        })?;
        let direction = SortDirection::parse(sort_dir).ok_or_else(|| SortError::Direction {
            value: sort_dir.to_string(),
        })?;
        Ok(Self { field, direction })
    }

    /// `ORDER BY` body with `id` as a tiebreaker so pages never overlap.
    pub fn order_by(&self) -> String {
        let column = self.field.column();
        if column == "id" {
            format!("id {}", self.direction.as_sql())
        } else {
            format!("{} {}, id ASC", column, self.direction.as_sql())
        }
    }
}
