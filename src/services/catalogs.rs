//! Catalog lookups and the membership checks used before writes.

use crate::domain::catalog::Catalogs;
use crate::domain::types::{AddressTypeId, ClientTypeId, CountryCode, PhoneTypeId};
use crate::repository::CatalogReader;
use crate::services::{ServiceError, ServiceResult};

/// Loads every catalog in one go.
pub fn load_catalogs<R>(repo: &R) -> ServiceResult<Catalogs>
where
    R: CatalogReader + ?Sized,
{
    Ok(Catalogs {
        client_types: repo.list_client_types()?,
        address_types: repo.list_address_types()?,
        phone_types: repo.list_phone_types()?,
        countries: repo.list_countries()?,
    })
}

pub(crate) fn ensure_client_type<R>(repo: &R, id: ClientTypeId) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    if repo.list_client_types()?.iter().any(|item| item.id == id) {
        Ok(())
    } else {
        Err(ServiceError::Form(format!("unknown client type {id}")))
    }
}

pub(crate) fn ensure_address_type<R>(repo: &R, id: AddressTypeId) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    if repo.list_address_types()?.iter().any(|item| item.id == id) {
        Ok(())
    } else {
        Err(ServiceError::Form(format!("unknown address type {id}")))
    }
}

pub(crate) fn ensure_phone_type<R>(repo: &R, id: PhoneTypeId) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    if repo.list_phone_types()?.iter().any(|item| item.id == id) {
        Ok(())
    } else {
        Err(ServiceError::Form(format!("unknown phone type {id}")))
    }
}

pub(crate) fn ensure_country<R>(repo: &R, code: &CountryCode) -> ServiceResult<()>
where
    R: CatalogReader + ?Sized,
{
    if repo
        .list_countries()?
        .iter()
        .any(|country| &country.code == code)
    {
        Ok(())
    } else {
        Err(ServiceError::Form(format!("unknown country {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ClientType, Country};
    use crate::repository::mock::MockRepository;

    #[test]
    fn unknown_client_type_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_list_client_types().returning(|| {
            Ok(vec![ClientType {
                id: ClientTypeId::new(1).unwrap(),
                name: "Company".into(),
            }])
        });

        assert!(ensure_client_type(&repo, ClientTypeId::new(1).unwrap()).is_ok());
        assert!(matches!(
            ensure_client_type(&repo, ClientTypeId::new(9).unwrap()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn country_lookup_matches_code() {
        let mut repo = MockRepository::new();
        repo.expect_list_countries().returning(|| {
            Ok(vec![Country {
                code: CountryCode::new("DE").unwrap(),
                name: "Germany".into(),
            }])
        });

        assert!(ensure_country(&repo, &CountryCode::new("de").unwrap()).is_ok());
        assert!(ensure_country(&repo, &CountryCode::new("FR").unwrap()).is_err());
    }

    #[test]
    fn load_catalogs_collects_every_list() {
        let mut repo = MockRepository::new();
        repo.expect_list_client_types().returning(|| Ok(vec![]));
        repo.expect_list_address_types().returning(|| Ok(vec![]));
        repo.expect_list_phone_types().returning(|| Ok(vec![]));
        repo.expect_list_countries().returning(|| {
            Ok(vec![Country {
                code: CountryCode::new("US").unwrap(),
                name: "United States".into(),
            }])
        });

        let catalogs = load_catalogs(&repo).expect("catalogs");
        assert_eq!(catalogs.countries.len(), 1);
        assert!(catalogs.client_types.is_empty());
    }
}
