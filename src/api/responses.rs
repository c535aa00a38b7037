use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::core::photos::PhotoAsset;
use crate::models::item::ItemView;

/// A single item with the status it should be sent under.
#[derive(Debug)]
pub(crate) struct ItemResponse {
    pub(crate) status: StatusCode,
    pub(crate) item: ItemView,
}

impl ItemResponse {
    pub(crate) fn ok(item: ItemView) -> Self {
        Self {
            status: StatusCode::OK,
            item,
        }
    }

    pub(crate) fn created(item: ItemView) -> Self {
        Self {
            status: StatusCode::CREATED,
            item,
        }
    }
}

impl IntoResponse for ItemResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.item)).into_response()
    }
}

/// Streams a stored photo back to the client.
#[derive(Debug)]
pub(crate) struct PhotoResponse(pub(crate) PhotoAsset);

impl IntoResponse for PhotoResponse {
    fn into_response(self) -> Response {
        let PhotoAsset {
            stream,
            content_type,
            len,
        } = self.0;

        let content_type = HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::core::photos::FALLBACK_CONTENT_TYPE));

        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_LENGTH, HeaderValue::from(len)),
            ],
            Body::from_stream(stream),
        )
            .into_response()
    }
}
