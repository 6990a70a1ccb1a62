use actix_web::{web, HttpRequest, HttpResponse};
use shared_types::{CreateContactForm, DeleteContactByNameForm, JsonResponse, SearchContactForm};
use tracing::{debug, info, warn};

use crate::database::SharedStore;
use crate::error::ApiError;
use crate::helpers::form::decode_form;

pub const MISSING_CONTACT_FIELDS: &str =
    "You are missing PhoneNumber or FullName or Address or Email parameter.";
pub const MISSING_PHONE_NUMBER: &str = "You are missing PhoneNumber parameter.";
pub const MISSING_FULL_NAME: &str = "You are missing FullName parameter.";
pub const MISSING_SEARCH: &str = "You are missing Search parameter.";

pub const CONTACT_INSERTED: &str = "The contact has been inserted successfully!";
pub const CONTACT_DELETED: &str = "The contact has been deleted successfully!";
pub const ALL_CONTACTS_DELETED: &str = "All contacts have been deleted successfully!";

type HandlerResult = Result<HttpResponse, ApiError>;

fn validation_error(message: &str) -> HandlerResult {
    warn!("{}", message);
    Ok(HttpResponse::Ok().json(JsonResponse::error(message)))
}

pub async fn get_all_contacts(store: web::Data<SharedStore>) -> HandlerResult {
    info!("Getting all contacts");

    let contacts = store.list_contacts().await?;

    debug!("Returning {} contacts", contacts.len());
    Ok(HttpResponse::Ok().json(JsonResponse::contacts(contacts)))
}

pub async fn create_contact(
    store: web::Data<SharedStore>,
    req: HttpRequest,
    body: web::Bytes,
) -> HandlerResult {
    let form: CreateContactForm = decode_form(&req, &body)?;

    if !form.is_complete() {
        return validation_error(MISSING_CONTACT_FIELDS);
    }

    info!(
        phone_number = %form.phone_number,
        full_name = %form.full_name,
        email = %form.email,
        address = %form.address,
        "Inserting new contact"
    );

    let id = store.insert_contact(&form.into_contact()).await?;
    debug!("Inserted contact with id {}", id);

    Ok(HttpResponse::Ok().json(JsonResponse::success(CONTACT_INSERTED)))
}

pub async fn delete_contact_by_number(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> HandlerResult {
    let phone_number = path.into_inner();

    if phone_number.is_empty() {
        return validation_error(MISSING_PHONE_NUMBER);
    }

    info!("Deleting contacts with phone number {}", phone_number);

    let deleted = store.delete_contacts_by_phone_number(&phone_number).await?;
    debug!("Deleted {} contacts", deleted);

    Ok(HttpResponse::Ok().json(JsonResponse::success(CONTACT_DELETED)))
}

/// `/contacts/delete-by-number/` without a number segment.
pub async fn delete_contact_without_number() -> HandlerResult {
    validation_error(MISSING_PHONE_NUMBER)
}

pub async fn delete_contact_by_name(
    store: web::Data<SharedStore>,
    req: HttpRequest,
    body: web::Bytes,
) -> HandlerResult {
    let form: DeleteContactByNameForm = decode_form(&req, &body)?;

    if form.full_name.is_empty() {
        return validation_error(MISSING_FULL_NAME);
    }

    info!("Deleting contacts named {}", form.full_name);

    let deleted = store.delete_contacts_by_full_name(&form.full_name).await?;
    debug!("Deleted {} contacts", deleted);

    Ok(HttpResponse::Ok().json(JsonResponse::success(CONTACT_DELETED)))
}

pub async fn delete_all_contacts(store: web::Data<SharedStore>) -> HandlerResult {
    info!("Deleting all contacts");

    let deleted = store.delete_all_contacts().await?;
    info!("{} ({} rows)", ALL_CONTACTS_DELETED, deleted);

    Ok(HttpResponse::Ok().json(JsonResponse::success(ALL_CONTACTS_DELETED)))
}

/// Zero matches still yield `{"type":"success","data":[]}`.
pub async fn search_contacts(
    store: web::Data<SharedStore>,
    req: HttpRequest,
    body: web::Bytes,
) -> HandlerResult {
    let form: SearchContactForm = decode_form(&req, &body)?;

    if form.search.is_empty() {
        return validation_error(MISSING_SEARCH);
    }

    info!("Searching for: {}", form.search);

    let contacts = store.search_contacts_by_full_name(&form.search).await?;

    debug!("Search matched {} contacts", contacts.len());
    Ok(HttpResponse::Ok().json(JsonResponse::contacts(contacts)))
}
