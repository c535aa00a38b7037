//! Request body extraction shared by the handlers

use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    Form, Json,
};
use bytes::Bytes;
use serde::{
    de::{value::MapDeserializer, DeserializeOwned},
    Deserialize, Deserializer,
};

use crate::error::{AppError, Result};

/// Form field carrying the photo file.
pub(crate) const PHOTO_FIELD: &str = "photo";

/// Body that may arrive either as JSON or as an urlencoded HTML form.
///
/// A request without a body, or without a `Content-Type`, is read as an
/// empty form so every optional field takes its default.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let (mut parts, body) = req.into_parts();
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return empty_form().map(Self);
        }

        if is_json(&parts.headers) {
            let Json(value) =
                Json::<T>::from_bytes(&bytes).map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(Self(value));
        }

        if !parts.headers.contains_key(CONTENT_TYPE) {
            parts.headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }
        let req = Request::from_parts(parts, Body::from(bytes));
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Deserializes `T` from a form with no fields at all.
fn empty_form<T: DeserializeOwned>() -> Result<T> {
    let fields = MapDeserializer::<_, serde::de::value::Error>::new(std::iter::empty::<(String, String)>());
    T::deserialize(fields).map_err(|e| AppError::Validation(e.to_string()))
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn is_json(headers: &HeaderMap) -> bool {
    content_type(headers).starts_with("application/json")
}

fn is_multipart(headers: &HeaderMap) -> bool {
    content_type(headers).starts_with("multipart/form-data")
}

/// Text fields of a registration sent as JSON or an urlencoded form.
#[derive(Debug, Deserialize)]
struct RegisterFields {
    inventory_name: Option<String>,
    description: Option<String>,
}

/// A file pulled out of a multipart body.
#[derive(Debug)]
pub(crate) struct UploadedFile {
    /// Name of the form field it came from.
    pub(crate) field: String,
    /// Client-supplied file name.
    pub(crate) file_name: Option<String>,
    /// Raw contents.
    pub(crate) bytes: Bytes,
}

/// Text fields plus the photo of a submission.
///
/// Multipart bodies may carry a `photo` file; JSON and urlencoded bodies
/// only supply `inventory_name` and `description`.
#[derive(Debug, Default)]
pub struct PhotoForm {
    pub(crate) fields: Vec<(String, String)>,
    pub(crate) photo: Option<UploadedFile>,
}

impl PhotoForm {
    /// Drains the multipart stream. A `photo` part submitted without a file
    /// (an empty file input) counts as no photo.
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            if name == PHOTO_FIELD {
                let file_name = field.file_name().map(String::from);
                let bytes = field.bytes().await?;
                let submitted = file_name.as_deref().map_or(false, |n| !n.is_empty()) || !bytes.is_empty();
                if submitted {
                    form.photo = Some(UploadedFile {
                        field: name,
                        file_name,
                        bytes,
                    });
                }
            } else {
                let value = field.text().await?;
                form.fields.push((name, value));
            }
        }

        Ok(form)
    }

    fn from_fields(fields: RegisterFields) -> Self {
        let fields = [
            ("inventory_name", fields.inventory_name),
            ("description", fields.description),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect();

        Self {
            fields,
            photo: None,
        }
    }

    /// Value of a text field, if it was submitted.
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

#[async_trait]
impl<S> FromRequest<S> for PhotoForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state).await?;
            Self::read(multipart).await
        } else {
            let JsonOrForm(fields) = JsonOrForm::<RegisterFields>::from_request(req, state).await?;
            Ok(Self::from_fields(fields))
        }
    }
}

/// Accepts `"on"`/`"true"` strings and JSON booleans.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(value)) => crate::core::search::is_truthy(&value),
        None => false,
    })
}
