use actix_web::{web, HttpRequest};
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

type FormPairs = Vec<(String, String)>;

fn parse_pairs(encoded: &str) -> Result<FormPairs, ApiError> {
    web::Query::<FormPairs>::from_query(encoded)
        .map(web::Query::into_inner)
        .map_err(|e| ApiError::MalformedForm(e.to_string()))
}

/// Decode urlencoded form values from the request body and the query string.
///
/// Body values come before query values and the first occurrence of a key
/// wins, so repeated keys are not an error.
pub fn decode_form<T: DeserializeOwned>(req: &HttpRequest, body: &[u8]) -> Result<T, ApiError> {
    let body = std::str::from_utf8(body).map_err(|e| ApiError::MalformedForm(e.to_string()))?;

    let mut pairs = parse_pairs(body)?;
    pairs.extend(parse_pairs(req.query_string())?);

    let mut fields: FormPairs = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        if !fields.iter().any(|(seen, _)| *seen == key) {
            fields.push((key, value));
        }
    }

    T::deserialize(MapDeserializer::<_, ValueError>::new(fields.into_iter()))
        .map_err(|e| ApiError::MalformedForm(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use shared_types::{CreateContactForm, SearchContactForm};

    #[test]
    fn test_decode_from_body() {
        let req = TestRequest::default().to_http_request();
        let form: CreateContactForm = decode_form(
            &req,
            b"phonenumber=555-1234&fullname=Ada+Lovelace&address=1%20Analytical%20Engine%20Way&email=ada%40example.com",
        )
        .unwrap();

        assert_eq!(form.phone_number, "555-1234");
        assert_eq!(form.full_name, "Ada Lovelace");
        assert_eq!(form.address, "1 Analytical Engine Way");
        assert_eq!(form.email, "ada@example.com");
    }

    #[test]
    fn test_decode_falls_back_to_query_string() {
        let req = TestRequest::default()
            .uri("/contacts/search/?search=%5EJohn")
            .to_http_request();
        let form: SearchContactForm = decode_form(&req, b"").unwrap();

        assert_eq!(form.search, "^John");
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let req = TestRequest::default().to_http_request();
        let form: CreateContactForm = decode_form(&req, b"fullname=Ada").unwrap();

        assert_eq!(form.full_name, "Ada");
        assert!(form.phone_number.is_empty());
        assert!(!form.is_complete());
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let req = TestRequest::default()
            .uri("/contacts/search/?search=x&search=y")
            .to_http_request();
        let form: SearchContactForm = decode_form(&req, b"").unwrap();

        assert_eq!(form.search, "x");
    }

    #[test]
    fn test_body_takes_precedence_and_query_fills_in() {
        let req = TestRequest::default()
            .uri("/contacts/new/?fullname=Query+Name&email=ada%40example.com")
            .to_http_request();
        let form: CreateContactForm = decode_form(
            &req,
            b"phonenumber=555-1234&fullname=Ada+Lovelace&address=London",
        )
        .unwrap();

        assert_eq!(form.full_name, "Ada Lovelace");
        assert_eq!(form.email, "ada@example.com");
        assert!(form.is_complete());
    }

    #[test]
    fn test_invalid_utf8_body_is_rejected() {
        let req = TestRequest::default().to_http_request();
        let result: Result<SearchContactForm, _> = decode_form(&req, &[0xff, 0xfe]);

        assert!(matches!(result, Err(ApiError::MalformedForm(_))));
    }
}
