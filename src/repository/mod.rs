use crate::{
    db::{DbConnection, DbPool},
    domain::{
        address::{Address, NewAddress, UpdateAddress},
        catalog::{AddressType, ClientType, Country, PhoneType},
        client::{Client, NewClient, UpdateClient},
        contact::{Contact, NewContact, UpdateContact},
        phone::{NewPhone, Phone, UpdatePhone},
        types::{
            AddressId, AddressTypeId, ClientId, ClientTypeId, ContactId, PhoneId, PhoneTypeId,
        },
    },
    repository::errors::RepositoryResult,
};

pub mod address;
pub mod catalog;
pub mod client;
pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod phone;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get connection from pool: {e}");
            e.into()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; page numbers start at 1 and 0 is treated as 1.
    ///
    /// Saturates at `i64::MAX`, so a page far past the end yields no rows.
    pub fn offset(&self) -> i64 {
        let skipped_pages = i64::try_from(self.page.max(1) - 1).unwrap_or(i64::MAX);
        skipped_pages.saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` taken literally.
///
/// Use together with `.escape('\\')`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub client_type_id: Option<ClientTypeId>,
    pub is_active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn client_type(mut self, client_type_id: ClientTypeId) -> Self {
        self.client_type_id = Some(client_type_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressListQuery {
    pub client_id: ClientId,
    pub address_type_id: Option<AddressTypeId>,
}

impl AddressListQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            address_type_id: None,
        }
    }

    pub fn address_type(mut self, address_type_id: AddressTypeId) -> Self {
        self.address_type_id = Some(address_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneListQuery {
    pub client_id: ClientId,
    pub phone_type_id: Option<PhoneTypeId>,
}

impl PhoneListQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            phone_type_id: None,
        }
    }

    pub fn phone_type(mut self, phone_type_id: PhoneTypeId) -> Self {
        self.phone_type_id = Some(phone_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactListQuery {
    pub client_id: ClientId,
    pub search: Option<String>,
}

impl ContactListQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            search: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Returns the total number of matches and the requested page.
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Inserts every client or none of them.
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
}

pub trait AddressReader {
    fn get_address_by_id(&self, id: AddressId) -> RepositoryResult<Option<Address>>;
    fn list_addresses(&self, query: AddressListQuery) -> RepositoryResult<Vec<Address>>;
}

pub trait AddressWriter {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
    fn update_address(&self, id: AddressId, updates: &UpdateAddress)
    -> RepositoryResult<Address>;
}

pub trait PhoneReader {
    fn get_phone_by_id(&self, id: PhoneId) -> RepositoryResult<Option<Phone>>;
    fn list_phones(&self, query: PhoneListQuery) -> RepositoryResult<Vec<Phone>>;
}

pub trait PhoneWriter {
    fn create_phone(&self, new_phone: &NewPhone) -> RepositoryResult<Phone>;
    fn update_phone(&self, id: PhoneId, updates: &UpdatePhone) -> RepositoryResult<Phone>;
}

pub trait ContactReader {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(&self, id: ContactId, updates: &UpdateContact)
    -> RepositoryResult<Contact>;
}

pub trait CatalogReader {
    fn list_client_types(&self) -> RepositoryResult<Vec<ClientType>>;
    fn list_address_types(&self) -> RepositoryResult<Vec<AddressType>>;
    fn list_phone_types(&self) -> RepositoryResult<Vec<PhoneType>>;
    fn list_countries(&self) -> RepositoryResult<Vec<Country>>;
}
