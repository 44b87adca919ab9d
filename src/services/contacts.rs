//! Contact persons nested under a client.

use crate::domain::contact::{Contact, UpdateContact};
use crate::domain::types::ContactId;
use crate::dto::api::{ContactPayload, ContactsQuery};
use crate::repository::{ClientReader, ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult, parse_id, require_client};

pub fn list_client_contacts<R>(
    repo: &R,
    client_id: i32,
    params: ContactsQuery,
) -> ServiceResult<Vec<Contact>>
where
    R: ClientReader + ContactReader + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let mut query = ContactListQuery::new(client_id);

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    Ok(repo.list_contacts(query)?)
}

pub fn get_contact<R>(repo: &R, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    let contact_id = parse_id(contact_id, ContactId::new)?;
    repo.get_contact_by_id(contact_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_contact<R>(
    repo: &R,
    client_id: i32,
    payload: ContactPayload,
) -> ServiceResult<Contact>
where
    R: ClientReader + ContactWriter + ?Sized,
{
    let client_id = require_client(repo, client_id)?;
    let new_contact = payload.into_new_contact(client_id)?;

    repo.create_contact(&new_contact).map_err(|err| {
        log::error!("Failed to add contact to client {client_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn update_contact<R>(
    repo: &R,
    contact_id: i32,
    payload: ContactPayload,
) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    let contact_id = parse_id(contact_id, ContactId::new)?;
    let updates = UpdateContact::try_from(payload)?;

    Ok(repo.update_contact(contact_id, &updates)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::client::{Client, NewClient};
    use crate::domain::contact::NewContact;
    use crate::domain::types::{ClientCode, ClientId, ClientName, ClientTypeId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn client() -> Client {
        let now = Utc::now().naive_utc();
        let new_client = NewClient::new(
            ClientCode::new("ACME").unwrap(),
            ClientName::new("Acme").unwrap(),
            ClientTypeId::new(1).unwrap(),
        );
        Client {
            id: ClientId::new(1).unwrap(),
            code: new_client.code,
            name: new_client.name,
            client_type_id: new_client.client_type_id,
            tax_id: None,
            email: None,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored(new_contact: &NewContact) -> Contact {
        let now = Utc::now().naive_utc();
        Contact {
            id: ContactId::new(2).unwrap(),
            client_id: new_contact.client_id,
            name: new_contact.name.clone(),
            position: new_contact.position.clone(),
            email: new_contact.email.clone(),
            phone: new_contact.phone.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            name: "Jane Doe".into(),
            position: Some("CFO".into()),
            email: "Jane@Acme.io".into(),
            phone: None,
        }
    }

    #[test]
    fn create_contact_lowercases_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(Some(client())));
        repo.expect_create_contact()
            .withf(|contact| contact.email.as_str() == "jane@acme.io")
            .returning(|contact| Ok(stored(contact)));

        let contact = create_contact(&repo, 1, payload()).expect("created");
        assert_eq!(contact.name.as_str(), "Jane Doe");
    }

    #[test]
    fn duplicate_email_is_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(Some(client())));
        repo.expect_create_contact()
            .returning(|_| Err(RepositoryError::duplicate("contacts", "email")));

        assert!(matches!(
            create_contact(&repo, 1, payload()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn list_contacts_trims_search() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_| Ok(Some(client())));
        repo.expect_list_contacts()
            .withf(|query| query.search.is_none())
            .returning(|_| Ok(vec![]));

        let contacts = list_client_contacts(
            &repo,
            1,
            ContactsQuery {
                search: Some("   ".into()),
            },
        )
        .expect("list");
        assert!(contacts.is_empty());
    }

    #[test]
    fn get_contact_with_invalid_id_is_not_found() {
        let repo = MockRepository::new();
        assert!(matches!(get_contact(&repo, 0), Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_missing_contact_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_contact()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            update_contact(&repo, 4, payload()),
            Err(ServiceError::NotFound)
        ));
    }
}
