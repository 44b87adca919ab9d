use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        address::{Address, NewAddress, UpdateAddress},
        types::{AddressId, ClientId},
    },
    models::address::{
        Address as DbAddress, NewAddress as DbNewAddress, UpdateAddress as DbUpdateAddress,
    },
    repository::{
        AddressListQuery, AddressReader, AddressWriter, DieselRepository,
        client::ensure_client_exists,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::addresses,
};

/// A client keeps at most one address of each type.
fn ensure_unique_address(
    conn: &mut SqliteConnection,
    client_id: ClientId,
    address_type_id: i32,
    exclude: Option<i32>,
) -> RepositoryResult<()> {
    let mut existing = addresses::table
        .filter(addresses::client_id.eq(client_id.get()))
        .filter(addresses::address_type_id.eq(address_type_id))
        .select(addresses::id)
        .into_boxed();
    if let Some(id) = exclude {
        existing = existing.filter(addresses::id.ne(id));
    }
    match existing.first::<i32>(conn).optional()? {
        Some(_) => Err(RepositoryError::duplicate("addresses", "address_type_id")),
        None => Ok(()),
    }
}

fn clear_primary_address(conn: &mut SqliteConnection, client_id: ClientId) -> QueryResult<usize> {
    diesel::update(
        addresses::table
            .filter(addresses::client_id.eq(client_id.get()))
            .filter(addresses::is_primary.eq(true)),
    )
    .set(addresses::is_primary.eq(false))
    .execute(conn)
}

impl AddressReader for DieselRepository {
    fn get_address_by_id(&self, id: AddressId) -> RepositoryResult<Option<Address>> {
        let mut conn = self.conn()?;
        addresses::table
            .find(id.get())
            .first::<DbAddress>(&mut conn)
            .optional()?
            .map(|address| Address::try_from(address).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_addresses(&self, query: AddressListQuery) -> RepositoryResult<Vec<Address>> {
        let mut conn = self.conn()?;

        let mut items = addresses::table
            .filter(addresses::client_id.eq(query.client_id.get()))
            .order(addresses::id.asc())
            .into_boxed();

        if let Some(address_type_id) = query.address_type_id {
            items = items.filter(addresses::address_type_id.eq(address_type_id.get()));
        }

        items
            .load::<DbAddress>(&mut conn)?
            .into_iter()
            .map(|address| Address::try_from(address).map_err(RepositoryError::from))
            .collect()
    }
}

impl AddressWriter for DieselRepository {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            ensure_client_exists(conn, new_address.client_id)?;
            ensure_unique_address(
                conn,
                new_address.client_id,
                new_address.address_type_id.get(),
                None,
            )?;

            if new_address.is_primary {
                clear_primary_address(conn, new_address.client_id)?;
            }

            let db_new_address: DbNewAddress = new_address.into();
            let db_address = diesel::insert_into(addresses::table)
                .values(&db_new_address)
                .get_result::<DbAddress>(conn)?;

            Address::try_from(db_address).map_err(RepositoryError::from)
        })
    }

    fn update_address(
        &self,
        id: AddressId,
        updates: &UpdateAddress,
    ) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let client_id = addresses::table
                .find(id.get())
                .select(addresses::client_id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;
            let client_id = ClientId::new(client_id)?;

            ensure_unique_address(
                conn,
                client_id,
                updates.address_type_id.get(),
                Some(id.get()),
            )?;

            if updates.is_primary {
                clear_primary_address(conn, client_id)?;
            }

            let changes = DbUpdateAddress::from_domain(updates, Utc::now().naive_utc());
            let db_address = diesel::update(addresses::table.find(id.get()))
                .set(&changes)
                .get_result::<DbAddress>(conn)?;

            Address::try_from(db_address).map_err(RepositoryError::from)
        })
    }
}
