use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        phone::{NewPhone, Phone, UpdatePhone},
        types::{ClientId, PhoneId},
    },
    models::phone::{NewPhone as DbNewPhone, Phone as DbPhone, UpdatePhone as DbUpdatePhone},
    repository::{
        DieselRepository, PhoneListQuery, PhoneReader, PhoneWriter,
        client::ensure_client_exists,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::phones,
};

/// The same number cannot be stored twice for one client.
fn ensure_unique_phone(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    number: &str,
    exclude: Option<i32>,
) -> RepositoryResult<()> {
    let mut existing = phones::table
        .filter(phones::client_id.eq(client_id.get()))
        .filter(phones::number.eq(number.to_string()))
        .select(phones::id)
        .into_boxed();
    if let Some(id) = exclude {
        existing = existing.filter(phones::id.ne(id));
    }
    match existing.first::<i32>(conn).optional()? {
        Some(_) => Err(RepositoryError::duplicate("phones", "number")),
        None => Ok(()),
    }
}

fn clear_primary_phone(conn: &mut SqliteConnection, client_id: ClientId) -> QueryResult<usize> {
    diesel::update(
        phones::table
            .filter(phones::client_id.eq(client_id.get()))
            .filter(phones::is_primary.eq(true)),
    )
    .set(phones::is_primary.eq(false))
    .execute(conn)
}

impl PhoneReader for DieselRepository {
    fn get_phone_by_id(&self, id: PhoneId) -> RepositoryResult<Option<Phone>> {
        let mut conn = self.conn()?;
        phones::table
            .find(id.get())
            .first::<DbPhone>(&mut conn)
            .optional()?
            .map(|phone| Phone::try_from(phone).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_phones(&self, query: PhoneListQuery) -> RepositoryResult<Vec<Phone>> {
        let mut conn = self.conn()?;

        let mut items = phones::table
            .filter(phones::client_id.eq(query.client_id.get()))
            .order(phones::id.asc())
            .into_boxed();

        if let Some(phone_type_id) = query.phone_type_id {
            items = items.filter(phones::phone_type_id.eq(phone_type_id.get()));
        }

        items
            .load::<DbPhone>(&mut conn)?
            .into_iter()
            .map(|phone| Phone::try_from(phone).map_err(RepositoryError::from))
            .collect()
    }
}

impl PhoneWriter for DieselRepository {
    fn create_phone(&self, new_phone: &NewPhone) -> RepositoryResult<Phone> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            ensure_client_exists(conn, new_phone.client_id)?;
            ensure_unique_phone(conn, new_phone.client_id, new_phone.number.as_str(), None)?;

            if new_phone.is_primary {
                clear_primary_phone(conn, new_phone.client_id)?;
            }

            let db_new_phone: DbNewPhone = new_phone.into();
            let db_phone = diesel::insert_into(phones::table)
                .values(&db_new_phone)
                .get_result::<DbPhone>(conn)?;

            Phone::try_from(db_phone).map_err(RepositoryError::from)
        })
    }

    fn update_phone(&self, id: PhoneId, updates: &UpdatePhone) -> RepositoryResult<Phone> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let client_id = phones::table
                .find(id.get())
                .select(phones::client_id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;
            let client_id = ClientId::new(client_id)?;

            ensure_unique_phone(conn, client_id, updates.number.as_str(), Some(id.get()))?;

            if updates.is_primary {
                clear_primary_phone(conn, client_id)?;
            }

            let changes = DbUpdatePhone::from_domain(updates, Utc::now().naive_utc());
            let db_phone = diesel::update(phones::table.find(id.get()))
                .set(&changes)
                .get_result::<DbPhone>(conn)?;

            Phone::try_from(db_phone).map_err(RepositoryError::from)
        })
    }
}
