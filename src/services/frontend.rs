//! Page loaders for the server-rendered front end.
//!
//! Each loader gathers everything a template needs from the API in as few
//! round trips as possible.

use serde::{Deserialize, Serialize};

use crate::api_client::{ApiClient, ApiResult};
use crate::dto::api::{AddressDto, CatalogsDto, ClientDto, ClientsQuery, ContactDto, PhoneDto};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};

/// Query string of the clients grid feed.
#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    pub search: Option<String>,
    pub client_type_id: Option<i32>,
    pub is_active: Option<bool>,
    pub page: Option<usize>,
}

impl From<GridQuery> for ClientsQuery {
    fn from(query: GridQuery) -> Self {
        Self {
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            client_type_id: query.client_type_id,
            is_active: query.is_active,
            page: Some(query.page.unwrap_or(1).max(1)),
            per_page: Some(DEFAULT_ITEMS_PER_PAGE),
        }
    }
}

/// Loads one page of the grid and attaches navigation links.
pub async fn load_clients_grid(
    api: &ApiClient,
    query: GridQuery,
) -> ApiResult<Paginated<ClientDto>> {
    let response = api.list_clients(&query.into()).await?;
    Ok(Paginated::new(
        response.items,
        response.page,
        response.total,
        response.per_page,
    ))
}

/// Everything rendered on the client detail page.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub client: ClientDto,
    pub addresses: Vec<AddressDto>,
    pub phones: Vec<PhoneDto>,
    pub contacts: Vec<ContactDto>,
    pub catalogs: CatalogsDto,
}

/// Fetches the client, its child records and the catalogs concurrently.
pub async fn load_client_page(api: &ApiClient, client_id: i32) -> ApiResult<ClientPageData> {
    let (client, addresses, phones, contacts, catalogs) = futures::try_join!(
        api.get_client(client_id),
        api.list_addresses(client_id),
        api.list_phones(client_id),
        api.list_contacts(client_id),
        api.fetch_catalogs(),
    )?;

    Ok(ClientPageData {
        client,
        addresses,
        phones,
        contacts,
        catalogs,
    })
}

/// Catalogs needed by the index filters and the new client form.
pub async fn load_catalogs(api: &ApiClient) -> ApiResult<CatalogsDto> {
    api.fetch_catalogs().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_query_normalizes_paging_and_search() {
        let query = ClientsQuery::from(GridQuery {
            search: Some("  ".into()),
            client_type_id: Some(2),
            is_active: None,
            page: Some(0),
        });

        assert_eq!(query.search, None);
        assert_eq!(query.page, Some(1));
        assert_eq!(query.per_page, Some(DEFAULT_ITEMS_PER_PAGE));
        assert_eq!(query.client_type_id, Some(2));
    }
}
