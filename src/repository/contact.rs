use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        contact::{Contact, NewContact, UpdateContact},
        types::{ClientId, ContactId},
    },
    models::contact::{
        Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
    },
    repository::{
        ContactListQuery, ContactReader, ContactWriter, DieselRepository, contains_pattern,
        client::ensure_client_exists,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::contacts,
};

fn ensure_unique_contact(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    email: &str,
    exclude: Option<i32>,
) -> RepositoryResult<()> {
    let mut existing = contacts::table
        .filter(contacts::client_id.eq(client_id.get()))
        .filter(contacts::email.eq(email.to_string()))
        .select(contacts::id)
        .into_boxed();
    if let Some(id) = exclude {
        existing = existing.filter(contacts::id.ne(id));
    }
    match existing.first::<i32>(conn).optional()? {
        Some(_) => Err(RepositoryError::duplicate("contacts", "email")),
        None => Ok(()),
    }
}

impl ContactReader for DieselRepository {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>> {
        let mut conn = self.conn()?;
        contacts::table
            .find(id.get())
            .first::<DbContact>(&mut conn)
            .optional()?
            .map(|contact| Contact::try_from(contact).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>> {
        let mut conn = self.conn()?;

        let mut items = contacts::table
            .filter(contacts::client_id.eq(query.client_id.get()))
            .order(contacts::id.asc())
            .into_boxed();

        if let Some(term) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let pattern = contains_pattern(term);
            items = items.filter(
                contacts::name
                    .like(pattern.clone())
                    .escape('\\')
                    .or(contacts::email.like(pattern.clone()).escape('\\'))
                    .or(
                        contacts::position
                            .assume_not_null()
                            .like(pattern)
                            .escape('\\'),
                    ),
            );
        }

        items
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(|contact| Contact::try_from(contact).map_err(RepositoryError::from))
            .collect()
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            ensure_client_exists(conn, new_contact.client_id)?;
            ensure_unique_contact(conn, new_contact.client_id, new_contact.email.as_str(), None)?;

            let db_new_contact: DbNewContact = new_contact.into();
            let db_contact = diesel::insert_into(contacts::table)
                .values(&db_new_contact)
                .get_result::<DbContact>(conn)?;

            Contact::try_from(db_contact).map_err(RepositoryError::from)
        })
    }

    fn update_contact(
        &self,
        id: ContactId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let client_id = contacts::table
                .find(id.get())
                .select(contacts::client_id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            ensure_unique_contact(
                conn,
                ClientId::new(client_id)?,
                updates.email.as_str(),
                Some(id.get()),
            )?;

            let changes = DbUpdateContact::from_domain(updates, Utc::now().naive_utc());
            let db_contact = diesel::update(contacts::table.find(id.get()))
                .set(&changes)
                .get_result::<DbContact>(conn)?;

            Contact::try_from(db_contact).map_err(RepositoryError::from)
        })
    }
}
