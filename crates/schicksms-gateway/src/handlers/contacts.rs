// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Address book endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use schicksms_storage::queries::contacts::{
    delete_contact, list_contacts, update_contact, upsert_contact,
};
use schicksms_storage::{Contact, ContactSaved, Page};
use serde::Deserialize;

use super::{page_limit, Ack};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ContactsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Request body for POST /v1/contacts and PUT /v1/contacts/{id}.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub number: String,
}

/// GET /v1/contacts
pub async fn get_contacts(
    State(state): State<AppState>,
    Query(query): Query<ContactsQuery>,
) -> Result<Json<Page<Contact>>, ApiError> {
    let page = list_contacts(
        &state.db,
        query.search.as_deref(),
        page_limit(query.limit, DEFAULT_PAGE_SIZE),
        query.offset.unwrap_or(0).max(0),
    )
    .await?;
    Ok(Json(page))
}

/// POST /v1/contacts
///
/// Saves by number: a known number renames the existing contact.
pub async fn post_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<ContactSaved>, ApiError> {
    let saved = upsert_contact(&state.db, &body.name, &body.number).await?;
    Ok(Json(saved))
}

/// PUT /v1/contacts/{id}
pub async fn put_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<Ack>, ApiError> {
    update_contact(&state.db, id, &body.name, &body.number).await?;
    Ok(Json(Ack::ok()))
}

/// DELETE /v1/contacts/{id}
pub async fn remove_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    delete_contact(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}
