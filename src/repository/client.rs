use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{
        ClientListQuery, ClientReader, ClientWriter, DieselRepository, contains_pattern,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::clients,
};

/// Builds the filtered (but not paginated) clients query shared by listing and counting.
fn filtered_clients(query: &ClientListQuery) -> clients::BoxedQuery<'static, Sqlite> {
    let mut items = clients::table.into_boxed();

    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        let pattern = contains_pattern(term);
        items = items.filter(
            clients::code
                .like(pattern.clone())
                .escape('\\')
                .or(clients::name.like(pattern.clone()).escape('\\'))
                .or(
                    clients::tax_id
                        .assume_not_null()
                        .like(pattern.clone())
                        .escape('\\'),
                )
                .or(clients::email.assume_not_null().like(pattern).escape('\\')),
        );
    }

    if let Some(client_type_id) = query.client_type_id {
        items = items.filter(clients::client_type_id.eq(client_type_id.get()));
    }

    if let Some(is_active) = query.is_active {
        items = items.filter(clients::is_active.eq(is_active));
    }

    items
}

/// Rejects a client whose code or tax id is already used by another row.
fn ensure_unique_client(
    conn: &mut SqliteConnection,
    code: &str,
    tax_id: Option<&str>,
    exclude: Option<i32>,
) -> RepositoryResult<()> {
    let mut by_code = clients::table
        .filter(clients::code.eq(code.to_string()))
        .select(clients::id)
        .into_boxed();
    if let Some(id) = exclude {
        by_code = by_code.filter(clients::id.ne(id));
    }
    if by_code.first::<i32>(conn).optional()?.is_some() {
        return Err(RepositoryError::duplicate("clients", "code"));
    }

    if let Some(tax_id) = tax_id {
        let mut by_tax_id = clients::table
            .filter(clients::tax_id.eq(tax_id.to_string()))
            .select(clients::id)
            .into_boxed();
        if let Some(id) = exclude {
            by_tax_id = by_tax_id.filter(clients::id.ne(id));
        }
        if by_tax_id.first::<i32>(conn).optional()?.is_some() {
            return Err(RepositoryError::duplicate("clients", "tax_id"));
        }
    }

    Ok(())
}

/// Fails with [`RepositoryError::NotFound`] unless the client row exists.
pub(crate) fn ensure_client_exists(
    conn: &mut SqliteConnection,
    client_id: ClientId,
) -> RepositoryResult<()> {
    clients::table
        .find(client_id.get())
        .select(clients::id)
        .first::<i32>(conn)
        .optional()?
        .map(|_| ())
        .ok_or(RepositoryError::NotFound)
}

fn insert_client(conn: &mut SqliteConnection, new_client: &NewClient) -> RepositoryResult<Client> {
    ensure_unique_client(
        conn,
        new_client.code.as_str(),
        new_client.tax_id.as_ref().map(|t| t.as_str()),
        None,
    )?;

    let db_new_client: DbNewClient = new_client.into();
    let db_client = diesel::insert_into(clients::table)
        .values(&db_new_client)
        .get_result::<DbClient>(conn)?;

    Client::try_from(db_client).map_err(RepositoryError::from)
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let db_client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        db_client
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_clients(&query).count().get_result(&mut conn)?;

        let mut items = filtered_clients(&query).order((clients::name.asc(), clients::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let clients = items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|client| Client::try_from(client).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| insert_client(conn, new_client))
    }

    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let mut codes = HashSet::new();
        let mut tax_ids = HashSet::new();
        for client in new_clients {
            if !codes.insert(client.code.as_str()) {
                return Err(RepositoryError::duplicate("clients", "code"));
            }
            if let Some(tax_id) = &client.tax_id
                && !tax_ids.insert(tax_id.as_str())
            {
                return Err(RepositoryError::duplicate("clients", "tax_id"));
            }
        }

        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            for new_client in new_clients {
                insert_client(conn, new_client)?;
            }
            Ok(new_clients.len())
        })
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            ensure_client_exists(conn, id)?;
            ensure_unique_client(
                conn,
                updates.code.as_str(),
                updates.tax_id.as_ref().map(|t| t.as_str()),
                Some(id.get()),
            )?;

            let changes = DbUpdateClient::from_domain(updates, Utc::now().naive_utc());
            let db_client = diesel::update(clients::table.find(id.get()))
                .set(&changes)
                .get_result::<DbClient>(conn)?;

            Client::try_from(db_client).map_err(RepositoryError::from)
        })
    }
}
