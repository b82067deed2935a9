use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of hits returned when the query does not ask for a limit.
pub const DEFAULT_PRECEDENT_LIMIT: usize = 10;

/// Upper bound on hits per query.
pub const MAX_PRECEDENT_LIMIT: usize = 50;

/// A prior decision available to the precedent finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Precedent {
    pub id: Uuid,
    /// Reporter citation, e.g. `347 U.S. 483`.
    pub citation: String,
    pub title: String,
    pub court: String,
    pub jurisdiction: String,
    pub decided_year: i32,
    pub summary: String,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PrecedentHit {
    pub precedent: Precedent,
    pub score: f32,
    pub snippet: String,
}

/// Query parameters for precedent search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PrecedentQuery {
    /// Free-text query over citation, title and summary.
    #[serde(default)]
    pub q: String,
    /// Exact jurisdiction filter (case-insensitive). Empty means all.
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PrecedentQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Requested limit clamped to `1..=MAX_PRECEDENT_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PRECEDENT_LIMIT)
            .clamp(1, MAX_PRECEDENT_LIMIT)
    }

    /// Jurisdiction filter with blanks and the "all" sentinel removed.
    pub fn jurisdiction_filter(&self) -> Option<&str> {
        self.jurisdiction
            .as_deref()
            .map(str::trim)
            .filter(|j| !j.is_empty() && !j.eq_ignore_ascii_case("all"))
    }
}
