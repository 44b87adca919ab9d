use diesel::prelude::*;

use crate::{
    domain::catalog::{AddressType, ClientType, Country, PhoneType},
    models::catalog::{
        AddressType as DbAddressType, ClientType as DbClientType, Country as DbCountry,
        PhoneType as DbPhoneType,
    },
    repository::{
        CatalogReader, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{address_types, client_types, countries, phone_types},
};

/// Converts loaded catalog rows, failing on the first invalid one.
fn convert_rows<Row, Item>(rows: Vec<Row>) -> RepositoryResult<Vec<Item>>
where
    Item: TryFrom<Row>,
    RepositoryError: From<Item::Error>,
{
    rows.into_iter()
        .map(|row| Item::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl CatalogReader for DieselRepository {
    fn list_client_types(&self) -> RepositoryResult<Vec<ClientType>> {
        let mut conn = self.conn()?;
        let rows = client_types::table
            .order(client_types::name.asc())
            .load::<DbClientType>(&mut conn)?;
        convert_rows(rows)
    }

    fn list_address_types(&self) -> RepositoryResult<Vec<AddressType>> {
        let mut conn = self.conn()?;
        let rows = address_types::table
            .order(address_types::name.asc())
            .load::<DbAddressType>(&mut conn)?;
        convert_rows(rows)
    }

    fn list_phone_types(&self) -> RepositoryResult<Vec<PhoneType>> {
        let mut conn = self.conn()?;
        let rows = phone_types::table
            .order(phone_types::name.asc())
            .load::<DbPhoneType>(&mut conn)?;
        convert_rows(rows)
    }

    fn list_countries(&self) -> RepositoryResult<Vec<Country>> {
        let mut conn = self.conn()?;
        let rows = countries::table
            .order(countries::name.asc())
            .load::<DbCountry>(&mut conn)?;
        convert_rows(rows)
    }
}
