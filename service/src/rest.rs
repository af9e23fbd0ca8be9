//! REST API handlers and `OpenAPI` documentation.
//!
//! Thin wrappers over the directory snapshot: every handler grabs the
//! current [`DirectoryHandle`] snapshot, so a concurrent reload never
//! affects an in-flight request. Lookup misses are RFC 7807 problem
//! responses, not errors; they are expected outcomes of user-driven queries.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::congress::{
    BuildStats, CommitteeAssignment, CommitteeSummary, DirectoryHandle, DistrictLink, Member,
};
use crate::congress::types::Rank;

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
}

impl ProblemDetails {
    /// Create a not-found response for a missed lookup.
    #[must_use]
    pub fn not_found(detail: &str) -> Self {
        Self {
            problem_type: "https://watchdog.example.com/errors/not-found".to_string(),
            title: "Not Found".to_string(),
            status: StatusCode::NOT_FOUND,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Watchdog Congressional Directory API",
        version = "1.0.0",
        description = "REST API over the reconciled congressional directory",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "REST API")
    ),
    paths(
        get_representatives,
        get_senators,
        get_committees,
        get_member,
        lookup_district,
        reload_directory
    ),
    components(schemas(
        Member,
        CommitteeAssignment,
        CommitteeSummary,
        DistrictLink,
        BuildStats,
        Rank,
        ProblemDetails
    ))
)]
pub struct ApiDoc;

/// List all representatives
///
/// Ordered by state name, then district (At-Large last within a state).
#[utoipa::path(
    get,
    path = "/congress/representatives",
    tag = "Congress",
    responses(
        (status = 200, description = "Ordered representative list", body = [Member])
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_representatives(
    Extension(handle): Extension<DirectoryHandle>,
) -> Json<Vec<Member>> {
    Json(handle.snapshot().representatives.clone())
}

/// List all senators
///
/// Ordered by state name, senior seat first.
#[utoipa::path(
    get,
    path = "/congress/senators",
    tag = "Congress",
    responses(
        (status = 200, description = "Ordered senator list", body = [Member])
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_senators(Extension(handle): Extension<DirectoryHandle>) -> Json<Vec<Member>> {
    Json(handle.snapshot().senators.clone())
}

/// List all main committees
///
/// Dropdown-style listing sorted by committee name.
#[utoipa::path(
    get,
    path = "/congress/committees",
    tag = "Congress",
    responses(
        (status = 200, description = "Committee listing", body = [CommitteeSummary])
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_committees(
    Extension(handle): Extension<DirectoryHandle>,
) -> Json<Vec<CommitteeSummary>> {
    Json(handle.snapshot().committees())
}

/// Get one member by synthetic identifier
///
/// Looks in both chambers.
#[utoipa::path(
    get,
    path = "/congress/members/{congress_id}",
    tag = "Congress",
    params(
        ("congress_id" = String, Path, description = "Synthetic member identifier")
    ),
    responses(
        (status = 200, description = "Member found", body = Member),
        (status = 404, description = "No member with that identifier", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)]
pub async fn get_member(
    Extension(handle): Extension<DirectoryHandle>,
    Path(congress_id): Path<String>,
) -> Result<Json<Member>, ProblemDetails> {
    handle
        .snapshot()
        .find_member_by_id(&congress_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ProblemDetails::not_found(&format!("no member with id {congress_id}")))
}

/// Query parameters for the district lookup.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LookupParams {
    /// State code or full state name
    pub state: String,
    /// House district; omit for At-Large states or senator-only lookups
    pub district: Option<String>,
}

/// Resolve a state/district to member identifiers
///
/// Registration-time contract: returns the matching representative's and up
/// to two senators' synthetic identifiers. A state/district combination that
/// matches nothing is a 404, distinct from any internal failure.
#[utoipa::path(
    get,
    path = "/congress/lookup",
    tag = "Congress",
    params(LookupParams),
    responses(
        (status = 200, description = "Resolved identifiers", body = DistrictLink),
        (status = 404, description = "Nothing matches that state/district", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)]
pub async fn lookup_district(
    Extension(handle): Extension<DirectoryHandle>,
    Query(params): Query<LookupParams>,
) -> Result<Json<DistrictLink>, ProblemDetails> {
    let link = handle
        .snapshot()
        .link_district(&params.state, params.district.as_deref());
    if link.is_empty() {
        return Err(ProblemDetails::not_found(&format!(
            "no members for state {:?} district {:?}",
            params.state, params.district
        )));
    }
    Ok(Json(link))
}

/// Rebuild the directory from the reference datasets
///
/// Builds a complete new snapshot off to the side and swaps it in; readers
/// keep whatever snapshot they already hold.
#[utoipa::path(
    post,
    path = "/admin/reload",
    tag = "Admin",
    responses(
        (status = 200, description = "Directory rebuilt", body = BuildStats)
    )
)]
#[allow(clippy::unused_async)]
pub async fn reload_directory(
    Extension(handle): Extension<DirectoryHandle>,
) -> Json<BuildStats> {
    Json(handle.reload())
}

/// Serve the generated `OpenAPI` document.
#[allow(clippy::unused_async)]
pub async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Assemble the REST router over a directory handle.
#[must_use]
pub fn api_router(handle: DirectoryHandle) -> Router {
    Router::new()
        .route("/api/congress/representatives", get(get_representatives))
        .route("/api/congress/senators", get(get_senators))
        .route("/api/congress/committees", get(get_committees))
        .route("/api/congress/members/{congress_id}", get(get_member))
        .route("/api/congress/lookup", get(lookup_district))
        .route("/api/admin/reload", post(reload_directory))
        .route("/api/openapi.json", get(get_openapi))
        .layer(Extension(handle))
}
