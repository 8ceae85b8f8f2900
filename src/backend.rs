//! Hosted backend access.
//!
//! Everything remote goes through the [`Backend`] trait: session lookup,
//! magic-link sign-in, the `categories` and `photos` tables, and object
//! storage. Callers receive a backend handle explicitly; there is no global
//! client.
//!
//! [`SupabaseClient`] implements the trait over Supabase's REST endpoints:
//!
//! | Concern | Endpoint |
//! |---------|----------|
//! | Session | `GET /auth/v1/user`, `POST /auth/v1/otp`, `POST /auth/v1/logout` |
//! | Tables | `/rest/v1/categories`, `/rest/v1/photos` (PostgREST filters) |
//! | Storage | `/storage/v1/object/{bucket}/{path}`, public URLs under `/object/public/` |
//!
//! Every request carries the project's anon key; requests made on behalf of a
//! signed-in user also carry their access token as a bearer token.

use crate::config::BackendConfig;
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend is not configured (set backend.url and backend.anon_key)")]
    NotConfigured,
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("backend returned no row for {0}")]
    MissingRow(String),
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
}

/// A row of the `photos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRow {
    pub id: String,
    #[serde(default)]
    pub storage_path: Option<String>,
    pub public_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for `photos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPhoto {
    pub storage_path: String,
    pub public_url: String,
    pub caption: Option<String>,
    pub category_id: Option<String>,
}

/// Partial update for `photos`. `None` leaves a column untouched;
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhotoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
}

impl PhotoPatch {
    pub fn is_empty(&self) -> bool {
        self.caption.is_none() && self.category_id.is_none()
    }
}

/// Remote auth, table and storage operations.
pub trait Backend {
    /// The user behind the current session, if any.
    fn current_user(&self) -> Result<Option<User>, BackendError>;
    fn send_magic_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), BackendError>;
    fn sign_out(&self) -> Result<(), BackendError>;

    /// All categories ordered by name.
    fn list_categories(&self) -> Result<Vec<CategoryRow>, BackendError>;
    fn create_category(&self, name: &str) -> Result<CategoryRow, BackendError>;

    /// Newest photos first, at most `limit`.
    fn list_photos(&self, limit: usize) -> Result<Vec<PhotoRow>, BackendError>;
    fn insert_photo(&self, photo: &NewPhoto) -> Result<PhotoRow, BackendError>;
    fn update_photo(&self, id: &str, patch: &PhotoPatch) -> Result<PhotoRow, BackendError>;
    /// Delete a photo row, returning what was deleted.
    fn delete_photo(&self, id: &str) -> Result<PhotoRow, BackendError>;

    fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;
    fn public_url(&self, path: &str) -> String;
    fn remove_object(&self, path: &str) -> Result<(), BackendError>;
}

/// Supabase REST implementation of [`Backend`].
pub struct SupabaseClient {
    http: HttpClient,
    base_url: Url,
    anon_key: String,
    bucket: String,
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let (Some(url), Some(anon_key)) = (&config.url, &config.anon_key) else {
            return Err(BackendError::NotConfigured);
        };
        let mut base_url = Url::parse(url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.clone(),
            bucket: config.bucket.clone(),
            access_token: None,
        })
    }

    /// Act on behalf of the user owning `token`.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }

    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, BackendError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn object_url(&self, path: &str) -> Result<Url, BackendError> {
        self.endpoint(&format!("storage/v1/object/{}/{}", self.bucket, path))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    fn returning(&self, request: RequestBuilder) -> RequestBuilder {
        self.authorized(request)
            .header("Prefer", "return=representation")
    }

    fn single_row<T: for<'de> Deserialize<'de>>(
        response: Response,
        what: &str,
    ) -> Result<T, BackendError> {
        let rows: Vec<T> = check(response)?.json()?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::MissingRow(what.to_string()))
    }
}

/// Turn a non-2xx response into [`BackendError::Api`] with the best message
/// the body offers.
fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(BackendError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.msg).or(e.error_description).or(e.error))
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

impl Backend for SupabaseClient {
    fn current_user(&self) -> Result<Option<User>, BackendError> {
        if self.access_token.is_none() {
            return Ok(None);
        }
        let response = self
            .authorized(self.http.get(self.endpoint("auth/v1/user")?))
            .send()?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        Ok(Some(check(response)?.json()?))
    }

    fn send_magic_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), BackendError> {
        let mut url = self.endpoint("auth/v1/otp")?;
        if let Some(redirect) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect);
        }
        let body = serde_json::json!({ "email": email.trim() });
        check(self.authorized(self.http.post(url)).json(&body).send()?)?;
        Ok(())
    }

    fn sign_out(&self) -> Result<(), BackendError> {
        if self.access_token.is_none() {
            return Ok(());
        }
        check(
            self.authorized(self.http.post(self.endpoint("auth/v1/logout")?))
                .send()?,
        )?;
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<CategoryRow>, BackendError> {
        let url = self.table_url("categories", &[("select", "id,name"), ("order", "name.asc")])?;
        Ok(check(self.authorized(self.http.get(url)).send()?)?.json()?)
    }

    fn create_category(&self, name: &str) -> Result<CategoryRow, BackendError> {
        let url = self.table_url("categories", &[])?;
        let body = serde_json::json!({ "name": name });
        let response = self.returning(self.http.post(url)).json(&body).send()?;
        Self::single_row(response, "new category")
    }

    fn list_photos(&self, limit: usize) -> Result<Vec<PhotoRow>, BackendError> {
        let limit = limit.to_string();
        let url = self.table_url(
            "photos",
            &[
                (
                    "select",
                    "id,storage_path,public_url,caption,category_id,created_at",
                ),
                ("order", "created_at.desc"),
                ("limit", &limit),
            ],
        )?;
        Ok(check(self.authorized(self.http.get(url)).send()?)?.json()?)
    }

    fn insert_photo(&self, photo: &NewPhoto) -> Result<PhotoRow, BackendError> {
        let url = self.table_url("photos", &[])?;
        let response = self.returning(self.http.post(url)).json(photo).send()?;
        Self::single_row(response, "new photo")
    }

    fn update_photo(&self, id: &str, patch: &PhotoPatch) -> Result<PhotoRow, BackendError> {
        let filter = format!("eq.{id}");
        let url = self.table_url("photos", &[("id", &filter)])?;
        let response = self.returning(self.http.patch(url)).json(patch).send()?;
        Self::single_row(response, &format!("photo {id}"))
    }

    fn delete_photo(&self, id: &str) -> Result<PhotoRow, BackendError> {
        let filter = format!("eq.{id}");
        let url = self.table_url("photos", &[("id", &filter)])?;
        let response = self.returning(self.http.delete(url)).send()?;
        Self::single_row(response, &format!("photo {id}"))
    }

    fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .authorized(self.http.post(self.object_url(path)?))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        check(request.send()?)?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    fn remove_object(&self, path: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("storage/v1/object/{}", self.bucket))?;
        let body = serde_json::json!({ "prefixes": [path] });
        check(self.authorized(self.http.delete(url)).json(&body).send()?)?;
        Ok(())
    }
}
