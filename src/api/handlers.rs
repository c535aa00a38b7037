//! Request handlers for the inventory routes

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    core::search,
    error::{AppError, Result},
    models::item::{ItemPatch, ItemView, NewItem},
    AppState,
};

use super::extract::{deserialize_flag, JsonOrForm, PhotoForm};
use super::responses::{ItemResponse, PhotoResponse};

/// Body of `PUT /inventory/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    name: Option<String>,
    description: Option<String>,
}

/// Body of `POST /search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    id: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    has_photo: bool,
}

/// `POST /register`
///
/// Accepts multipart (with an optional `photo` file), JSON or an urlencoded
/// form.
pub async fn register_item(
    State(state): State<Arc<AppState>>,
    form: PhotoForm,
) -> Result<impl IntoResponse> {
    let name = form.text("inventory_name").unwrap_or("");
    if name.is_empty() {
        return Err(AppError::Validation("inventory_name is required".to_string()));
    }
    let mut new_item = NewItem::named(name).with_description(form.text("description").unwrap_or(""));

    if let Some(photo) = &form.photo {
        let filename = state
            .photos
            .store(&photo.field, photo.file_name.as_deref(), &photo.bytes)
            .await?;
        new_item = new_item.with_photo(filename);
    }

    let item = state.inventory.create(new_item)?;
    Ok(ItemResponse::created(ItemView::from_item(&item, &state.urls)))
}

/// `GET /inventory`
pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let items: Vec<ItemView> = state
        .inventory
        .list()?
        .iter()
        .map(|item| ItemView::from_item(item, &state.urls))
        .collect();

    Ok(Json(items))
}

/// `GET /inventory/:id`
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let item = state.inventory.get(&id)?;
    Ok(ItemResponse::ok(ItemView::from_item(&item, &state.urls)))
}

/// `PUT /inventory/:id`
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonOrForm(body): JsonOrForm<UpdateItemRequest>,
) -> Result<impl IntoResponse> {
    let patch = ItemPatch::from_form(body.name, body.description);
    let item = state.inventory.update(&id, patch)?;
    Ok(ItemResponse::ok(ItemView::from_item(&item, &state.urls)))
}

/// `DELETE /inventory/:id`
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let removed = state.inventory.delete(&id)?;

    if let Some(filename) = removed.photo_filename {
        release_photo(&state, &filename).await;
    }

    Ok((StatusCode::OK, "Deleted"))
}

/// `GET /inventory/:id/photo`
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let item = state.inventory.get(&id)?;
    let filename = item
        .photo_filename
        .ok_or_else(|| AppError::NotFound(format!("inventory item {} has no photo", id)))?;

    let asset = state.photos.open(&filename).await?;
    Ok(PhotoResponse(asset))
}

/// `PUT /inventory/:id/photo`
pub async fn replace_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    // Unknown ids are reported before the upload is looked at or written.
    state.inventory.get(&id)?;

    let form = PhotoForm::read(multipart?).await?;
    let photo = form
        .photo
        .ok_or_else(|| AppError::UploadError("No photo uploaded".to_string()))?;

    let filename = state
        .photos
        .store(&photo.field, photo.file_name.as_deref(), &photo.bytes)
        .await?;

    let (item, previous) = match state.inventory.replace_photo(&id, filename.clone()) {
        Ok(result) => result,
        Err(e) => {
            // The item vanished between the check and the write.
            if let Err(remove_err) = state.photos.remove(&filename).await {
                log::warn!("Failed to remove unused photo {}: {}", filename, remove_err);
            }
            return Err(e);
        }
    };

    if let Some(previous) = previous {
        release_photo(&state, &previous).await;
    }

    Ok(ItemResponse::ok(ItemView::from_item(&item, &state.urls)))
}

/// `POST /search`
pub async fn search_item(
    State(state): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<SearchRequest>,
) -> Result<impl IntoResponse> {
    let item = state.inventory.get(&body.id)?;
    Ok(Json(search::annotate(&item, body.has_photo, &state.urls)))
}

/// Deletes a photo file nothing references any more, when pruning is on.
/// Otherwise the file is left in the cache directory.
async fn release_photo(state: &AppState, filename: &str) {
    if !state.config.prune_orphaned_photos {
        log::debug!("Keeping unreferenced photo {}", filename);
        return;
    }
    if let Err(e) = state.photos.remove(filename).await {
        log::warn!("Failed to remove orphaned photo {}: {}", filename, e);
    }
}
