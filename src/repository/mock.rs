//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::address::{Address, NewAddress, UpdateAddress};
use crate::domain::catalog::{AddressType, ClientType, Country, PhoneType};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::phone::{NewPhone, Phone, UpdatePhone};
use crate::domain::types::{AddressId, ClientId, ContactId, PhoneId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AddressListQuery, AddressReader, AddressWriter, CatalogReader, ClientListQuery, ClientReader,
    ClientWriter, ContactListQuery, ContactReader, ContactWriter, PhoneListQuery, PhoneReader,
    PhoneWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
        fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client>;
    }

    impl AddressReader for Repository {
        fn get_address_by_id(&self, id: AddressId) -> RepositoryResult<Option<Address>>;
        fn list_addresses(&self, query: AddressListQuery) -> RepositoryResult<Vec<Address>>;
    }

    impl AddressWriter for Repository {
        fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
        fn update_address(
            &self,
            id: AddressId,
            updates: &UpdateAddress,
        ) -> RepositoryResult<Address>;
    }

    impl PhoneReader for Repository {
        fn get_phone_by_id(&self, id: PhoneId) -> RepositoryResult<Option<Phone>>;
        fn list_phones(&self, query: PhoneListQuery) -> RepositoryResult<Vec<Phone>>;
    }

    impl PhoneWriter for Repository {
        fn create_phone(&self, new_phone: &NewPhone) -> RepositoryResult<Phone>;
        fn update_phone(&self, id: PhoneId, updates: &UpdatePhone) -> RepositoryResult<Phone>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update_contact(
            &self,
            id: ContactId,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
    }

    impl CatalogReader for Repository {
        fn list_client_types(&self) -> RepositoryResult<Vec<ClientType>>;
        fn list_address_types(&self) -> RepositoryResult<Vec<AddressType>>;
        fn list_phone_types(&self) -> RepositoryResult<Vec<PhoneType>>;
        fn list_countries(&self) -> RepositoryResult<Vec<Country>>;
    }
}
