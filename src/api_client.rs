//! HTTP client the front end uses to talk to the JSON API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dto::api::{
    AddressDto, AddressPayload, BatchResponse, CatalogItemDto, CatalogsDto, ClientDto,
    ClientPayload, ClientsQuery, ContactDto, ContactPayload, CountryDto, ErrorResponse,
    ListResponse, PhoneDto, PhonePayload,
};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiClientError>;

/// Thin JSON wrapper over `reqwest` bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiClientError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|err| {
            log::error!("API request failed: {err}");
            ApiClientError::Transport(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ApiClientError::Decode(err.to_string()));
        }

        // Error bodies are best effort; fall back to the status text.
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => ApiClientError::NotFound,
            StatusCode::CONFLICT => ApiClientError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiClientError::Validation(message)
            }
            other => {
                log::warn!("API responded with {other}: {message}");
                ApiClientError::Status(other)
            }
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn list_clients(&self, query: &ClientsQuery) -> ApiResult<ListResponse<ClientDto>> {
        self.get_query("/clients", query).await
    }

    pub async fn get_client(&self, client_id: i32) -> ApiResult<ClientDto> {
        self.get(&format!("/clients/{client_id}")).await
    }

    pub async fn create_client(&self, payload: &ClientPayload) -> ApiResult<ClientDto> {
        self.post("/clients", payload).await
    }

    pub async fn import_clients(&self, payloads: &[ClientPayload]) -> ApiResult<BatchResponse> {
        self.post("/clients/batch", payloads).await
    }

    pub async fn update_client(
        &self,
        client_id: i32,
        payload: &ClientPayload,
    ) -> ApiResult<ClientDto> {
        self.put(&format!("/clients/{client_id}"), payload).await
    }

    pub async fn list_addresses(&self, client_id: i32) -> ApiResult<Vec<AddressDto>> {
        self.get(&format!("/clients/{client_id}/addresses")).await
    }

    pub async fn create_address(
        &self,
        client_id: i32,
        payload: &AddressPayload,
    ) -> ApiResult<AddressDto> {
        self.post(&format!("/clients/{client_id}/addresses"), payload)
            .await
    }

    pub async fn get_address(&self, address_id: i32) -> ApiResult<AddressDto> {
        self.get(&format!("/addresses/{address_id}")).await
    }

    pub async fn update_address(
        &self,
        address_id: i32,
        payload: &AddressPayload,
    ) -> ApiResult<AddressDto> {
        self.put(&format!("/addresses/{address_id}"), payload).await
    }

    pub async fn list_phones(&self, client_id: i32) -> ApiResult<Vec<PhoneDto>> {
        self.get(&format!("/clients/{client_id}/phones")).await
    }

    pub async fn create_phone(&self, client_id: i32, payload: &PhonePayload) -> ApiResult<PhoneDto> {
        self.post(&format!("/clients/{client_id}/phones"), payload)
            .await
    }

    pub async fn get_phone(&self, phone_id: i32) -> ApiResult<PhoneDto> {
        self.get(&format!("/phones/{phone_id}")).await
    }

    pub async fn update_phone(&self, phone_id: i32, payload: &PhonePayload) -> ApiResult<PhoneDto> {
        self.put(&format!("/phones/{phone_id}"), payload).await
    }

    pub async fn list_contacts(&self, client_id: i32) -> ApiResult<Vec<ContactDto>> {
        self.get(&format!("/clients/{client_id}/contacts")).await
    }

    pub async fn create_contact(
        &self,
        client_id: i32,
        payload: &ContactPayload,
    ) -> ApiResult<ContactDto> {
        self.post(&format!("/clients/{client_id}/contacts"), payload)
            .await
    }

    pub async fn get_contact(&self, contact_id: i32) -> ApiResult<ContactDto> {
        self.get(&format!("/contacts/{contact_id}")).await
    }

    pub async fn update_contact(
        &self,
        contact_id: i32,
        payload: &ContactPayload,
    ) -> ApiResult<ContactDto> {
        self.put(&format!("/contacts/{contact_id}"), payload).await
    }

    pub async fn list_client_types(&self) -> ApiResult<Vec<CatalogItemDto>> {
        self.get("/catalogs/client-types").await
    }

    pub async fn list_address_types(&self) -> ApiResult<Vec<CatalogItemDto>> {
        self.get("/catalogs/address-types").await
    }

    pub async fn list_phone_types(&self) -> ApiResult<Vec<CatalogItemDto>> {
        self.get("/catalogs/phone-types").await
    }

    pub async fn list_countries(&self) -> ApiResult<Vec<CountryDto>> {
        self.get("/catalogs/countries").await
    }

    /// Fetches the four catalogs concurrently; any failure fails the whole call.
    pub async fn fetch_catalogs(&self) -> ApiResult<CatalogsDto> {
        let (client_types, address_types, phone_types, countries) = futures::try_join!(
            self.list_client_types(),
            self.list_address_types(),
            self.list_phone_types(),
            self.list_countries(),
        )?;

        Ok(CatalogsDto {
            client_types,
            address_types,
            phone_types,
            countries,
        })
    }
}
