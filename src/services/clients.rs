//! Client listing, lookup and guarded writes.

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, ClientTypeId};
use crate::dto::api::{ClientPayload, ClientsQuery};
use crate::pagination::per_page_or_default;
use crate::repository::{CatalogReader, ClientListQuery, ClientReader, ClientWriter};
use crate::services::catalogs::ensure_client_type;
use crate::services::{ServiceError, ServiceResult, parse_id};

/// Page of clients returned by [`list_clients`].
#[derive(Debug)]
pub struct ClientPage {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub clients: Vec<Client>,
}

/// Returns the filtered, paginated list of clients.
pub fn list_clients<R>(repo: &R, params: ClientsQuery) -> ServiceResult<ClientPage>
where
    R: ClientReader + ?Sized,
{
    let page = params.page.unwrap_or(1).max(1);
    let per_page = per_page_or_default(params.per_page);

    let mut query = ClientListQuery::new().paginate(page, per_page);

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    if let Some(client_type_id) = params.client_type_id {
        // An impossible id can never match, so report an empty page.
        match ClientTypeId::new(client_type_id) {
            Ok(id) => query = query.client_type(id),
            Err(_) => {
                return Ok(ClientPage {
                    total: 0,
                    page,
                    per_page,
                    clients: Vec::new(),
                });
            }
        }
    }

    if let Some(is_active) = params.is_active {
        query = query.active(is_active);
    }

    let (total, clients) = repo.list_clients(query)?;

    Ok(ClientPage {
        total,
        page,
        per_page,
        clients,
    })
}

/// Fetches a single client.
pub fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client_id = parse_id(client_id, ClientId::new)?;
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the payload and inserts the client if its code and tax id are free.
pub fn create_client<R>(repo: &R, payload: ClientPayload) -> ServiceResult<Client>
where
    R: ClientWriter + CatalogReader + ?Sized,
{
    let new_client = NewClient::try_from(payload)?;
    ensure_client_type(repo, new_client.client_type_id)?;

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client {}: {err}", new_client.code);
        ServiceError::from(err)
    })
}

/// Inserts a batch of clients atomically.
pub fn import_clients<R>(repo: &R, payloads: Vec<ClientPayload>) -> ServiceResult<usize>
where
    R: ClientWriter + CatalogReader + ?Sized,
{
    if payloads.is_empty() {
        return Err(ServiceError::Form("no clients to import".to_string()));
    }

    let client_types = repo.list_client_types()?;

    let new_clients = payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            let client = NewClient::try_from(payload)
                .map_err(|err| ServiceError::Form(format!("row {}: {err}", index + 1)))?;
            if !client_types.iter().any(|t| t.id == client.client_type_id) {
                return Err(ServiceError::Form(format!(
                    "row {}: unknown client type {}",
                    index + 1,
                    client.client_type_id
                )));
            }
            Ok(client)
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let created = repo.create_clients(&new_clients)?;
    log::info!("Imported {created} clients");
    Ok(created)
}

/// Replaces the editable fields of an existing client.
pub fn update_client<R>(repo: &R, client_id: i32, payload: ClientPayload) -> ServiceResult<Client>
where
    R: ClientWriter + CatalogReader + ?Sized,
{
    let client_id = parse_id(client_id, ClientId::new)?;
    let updates = UpdateClient::try_from(payload)?;
    ensure_client_type(repo, updates.client_type_id)?;

    repo.update_client(client_id, &updates)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::catalog::ClientType;
    use crate::domain::types::{ClientCode, ClientName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn payload(code: &str) -> ClientPayload {
        ClientPayload {
            code: code.to_string(),
            name: "Acme".to_string(),
            client_type_id: 1,
            tax_id: None,
            email: None,
            notes: None,
            is_active: true,
        }
    }

    fn stored(new_client: &NewClient) -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: ClientId::new(1).unwrap(),
            code: new_client.code.clone(),
            name: new_client.name.clone(),
            client_type_id: new_client.client_type_id,
            tax_id: new_client.tax_id.clone(),
            email: new_client.email.clone(),
            notes: new_client.notes.clone(),
            is_active: new_client.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_company_type(repo: &mut MockRepository) {
        repo.expect_list_client_types().returning(|| {
            Ok(vec![ClientType {
                id: ClientTypeId::new(1).unwrap(),
                name: "Company".into(),
            }])
        });
    }

    #[test]
    fn list_clients_applies_filters_and_paging() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .withf(|query| {
                query.search.as_deref() == Some("acme")
                    && query.is_active == Some(true)
                    && query.client_type_id.map(ClientTypeId::get) == Some(2)
                    && query.pagination.map(|p| (p.page, p.per_page)) == Some((3, 100))
            })
            .returning(|_| Ok((0, vec![])));

        let page = list_clients(
            &repo,
            ClientsQuery {
                search: Some("  acme ".into()),
                client_type_id: Some(2),
                is_active: Some(true),
                page: Some(3),
                per_page: Some(500),
            },
        )
        .expect("list");

        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 100);
    }

    #[test]
    fn list_clients_with_impossible_type_is_empty() {
        let repo = MockRepository::new();
        let page = list_clients(
            &repo,
            ClientsQuery {
                client_type_id: Some(0),
                ..Default::default()
            },
        )
        .expect("list");
        assert_eq!(page.total, 0);
    }

    #[test]
    fn get_client_missing_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(None));

        assert!(matches!(get_client(&repo, 5), Err(ServiceError::NotFound)));
        assert!(matches!(get_client(&repo, -1), Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_client_persists_normalized_client() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_create_client()
            .withf(|client| client.code == ClientCode::new("ACME-1").unwrap())
            .returning(|client| Ok(stored(client)));

        let client = create_client(&repo, payload("acme-1")).expect("created");
        assert_eq!(client.name, ClientName::new("Acme").unwrap());
    }

    #[test]
    fn create_client_duplicate_is_conflict() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_create_client()
            .returning(|_| Err(RepositoryError::duplicate("clients", "code")));

        match create_client(&repo, payload("ACME")) {
            Err(ServiceError::Conflict(message)) => {
                assert_eq!(message, "client with the same code already exists")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_client_unknown_type_is_form_error() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_create_client().never();

        let mut bad = payload("ACME");
        bad.client_type_id = 3;
        assert!(matches!(
            create_client(&repo, bad),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn create_client_invalid_code_is_type_constraint() {
        let repo = MockRepository::new();
        assert!(matches!(
            create_client(&repo, payload("no spaces allowed")),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn import_reports_offending_row() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_create_clients().never();

        let result = import_clients(&repo, vec![payload("A1"), payload("")]);
        match result {
            Err(ServiceError::Form(message)) => assert!(message.starts_with("row 2:")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn import_rejects_empty_batch() {
        let repo = MockRepository::new();
        assert!(matches!(
            import_clients(&repo, vec![]),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn import_inserts_all_rows() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_create_clients()
            .withf(|clients| clients.len() == 2)
            .returning(|clients| Ok(clients.len()));

        let created = import_clients(&repo, vec![payload("A1"), payload("A2")]).expect("import");
        assert_eq!(created, 2);
    }

    #[test]
    fn update_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        with_company_type(&mut repo);
        repo.expect_update_client()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            update_client(&repo, 10, payload("A1")),
            Err(ServiceError::NotFound)
        ));
    }
}
