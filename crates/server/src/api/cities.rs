//! # Cities API
//!
//! Read-only access to the built-in city table.

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use equinox_core::cities::{CityEntry, CityMetrics, CityTable, ResolvedCity};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::SharedState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// Case-insensitive substring of a name or alias
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CitySummary {
    pub name: String,
    pub aliases: Vec<String>,
    #[schema(value_type = Object)]
    pub metrics: CityMetrics,
}

impl From<&CityEntry> for CitySummary {
    fn from(entry: &CityEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            aliases: entry.aliases.iter().map(|a| a.to_string()).collect(),
            metrics: entry.metrics,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CityListResponse {
    pub count: usize,
    pub cities: Vec<CitySummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CityLookupResponse {
    #[schema(value_type = Object)]
    pub city: ResolvedCity,
}

pub fn city_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_cities))
        .route("/:name", get(get_city))
}

/// List cities, optionally filtered
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    tag = "cities",
    params(CityQuery),
    responses(
        (status = 200, description = "Matching cities in table order", body = CityListResponse)
    )
)]
pub async fn list_cities(Query(query): Query<CityQuery>) -> Json<CityListResponse> {
    let table = CityTable::builtin();
    let cities: Vec<CitySummary> = table
        .search(query.filter.as_deref().unwrap_or_default())
        .into_iter()
        .map(CitySummary::from)
        .collect();

    Json(CityListResponse {
        count: cities.len(),
        cities,
    })
}

/// Resolve free-form input to a city; unknown input gets fallback metrics
#[utoipa::path(
    get,
    path = "/api/v1/cities/{name}",
    tag = "cities",
    params(("name" = String, Path, description = "City name, alias or fragment")),
    responses(
        (status = 200, description = "Resolved city", body = CityLookupResponse)
    )
)]
pub async fn get_city(Path(name): Path<String>) -> Json<CityLookupResponse> {
    Json(CityLookupResponse {
        city: CityTable::builtin().resolve(&name),
    })
}
