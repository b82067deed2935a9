use dioxus::prelude::*;
use shared_types::{Precedent, PrecedentHit, PrecedentQuery};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn search_precedents(query: PrecedentQuery) -> Result<Vec<PrecedentHit>, ServerFnError> {
    require_auth()?;
    let index = crate::precedent_index::get_precedents()
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(index.search(&query))
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_precedent(id: String) -> Result<Precedent, ServerFnError> {
    require_auth()?;
    let id = parse_id(&id, "precedent")?;
    let pool = db().await?;
    crate::repo::precedent::find_by_id(pool, id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Distinct jurisdictions for the search filter.
#[server]
pub async fn list_jurisdictions() -> Result<Vec<String>, ServerFnError> {
    require_auth()?;
    let pool = db().await?;
    crate::repo::precedent::list_jurisdictions(pool)
        .await
        .map_err(|e| e.into_server_fn_error())
}
