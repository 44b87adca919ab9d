use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::dto::api::ClientPayload;
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a client from the "new client" page.
pub struct AddClientForm {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub client_type_id: i32,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl From<AddClientForm> for ClientPayload {
    fn from(form: AddClientForm) -> Self {
        Self {
            code: form.code,
            name: form.name,
            client_type_id: form.client_type_id,
            tax_id: non_blank(form.tax_id),
            email: non_blank(form.email),
            notes: non_blank(form.notes),
            is_active: form.is_active,
        }
    }
}

#[derive(MultipartForm)]
/// CSV upload with the columns `code,name,client_type_id,tax_id,email,notes`.
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// One CSV row before it becomes a [`ClientPayload`].
#[derive(Debug, Deserialize)]
struct ClientCsvRow {
    code: String,
    name: String,
    client_type_id: i32,
    #[serde(default)]
    tax_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<ClientCsvRow> for ClientPayload {
    fn from(row: ClientCsvRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            client_type_id: row.client_type_id,
            tax_id: non_blank(row.tax_id),
            email: non_blank(row.email),
            notes: non_blank(row.notes),
            is_active: true,
        }
    }
}

/// Parses client rows from CSV text with a header line.
pub fn parse_clients_csv<R: Read>(reader: R) -> Result<Vec<ClientPayload>, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let payloads = rdr
        .deserialize::<ClientCsvRow>()
        .map(|row| row.map(ClientPayload::from))
        .collect::<Result<Vec<_>, _>>()?;

    if payloads.is_empty() {
        return Err(FormError::EmptyUpload);
    }
    Ok(payloads)
}

impl UploadClientsForm {
    pub fn parse(&mut self) -> Result<Vec<ClientPayload>, FormError> {
        let mut content = String::new();
        self.csv.file.read_to_string(&mut content)?;
        parse_clients_csv(content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_payloads() {
        let csv = "code,name,client_type_id,tax_id,email,notes\n\
                   acme,Acme Corp,1,,sales@acme.io,\n\
                   BETA, Beta Ltd ,2,123-456,,VIP\n";
        let payloads = parse_clients_csv(csv.as_bytes()).expect("valid csv");

        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].tax_id, None);
        assert_eq!(payloads[0].email.as_deref(), Some("sales@acme.io"));
        assert_eq!(payloads[1].name, "Beta Ltd");
        assert_eq!(payloads[1].notes.as_deref(), Some("VIP"));
        assert!(payloads[1].is_active);
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let csv = "code,name,client_type_id\nA1,Alpha,1\n";
        let payloads = parse_clients_csv(csv.as_bytes()).expect("valid csv");
        assert_eq!(payloads[0].email, None);
    }

    #[test]
    fn header_only_upload_is_rejected() {
        let csv = "code,name,client_type_id,tax_id,email,notes\n";
        assert!(matches!(
            parse_clients_csv(csv.as_bytes()),
            Err(FormError::EmptyUpload)
        ));
    }

    #[test]
    fn non_numeric_type_is_a_csv_error() {
        let csv = "code,name,client_type_id\nA1,Alpha,company\n";
        assert!(matches!(
            parse_clients_csv(csv.as_bytes()),
            Err(FormError::Csv(_))
        ));
    }

    #[test]
    fn add_form_validates_and_converts() {
        let form = AddClientForm {
            code: "A1".into(),
            name: "Alpha".into(),
            client_type_id: 1,
            tax_id: Some("".into()),
            email: Some(" a@alpha.io ".into()),
            notes: None,
            is_active: false,
        };
        assert!(form.validate().is_ok());

        let payload = ClientPayload::from(form);
        assert_eq!(payload.tax_id, None);
        assert_eq!(payload.email.as_deref(), Some("a@alpha.io"));
        assert!(!payload.is_active);
    }
}
