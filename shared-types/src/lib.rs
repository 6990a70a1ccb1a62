pub mod contact;
pub mod response;

pub use contact::{Contact, CreateContactForm, DeleteContactByNameForm, SearchContactForm};
pub use response::{JsonResponse, ResponseType};
