//! Account signup endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;

use crate::AppState;
use crate::account::{Account, AddAccount, NewAccount};
use crate::error::{Result, ServerError};
use crate::router::{HttpRequest, HttpResponse, created};
use crate::validation::EmailValidator;

/// Fields the request body must carry, checked in order. The first missing
/// one wins.
const REQUIRED_FIELDS: [&str; 7] =
    ["name", "email", "password", "group", "country", "role", "status"];

/// Orchestrates field presence checks, email validation and account
/// creation, and maps every outcome to an HTTP-shaped response.
pub struct SignupController {
    email_validator: Arc<dyn EmailValidator>,
    add_account: Arc<dyn AddAccount>,
}

impl SignupController {
    /// Create a new [`SignupController`].
    pub fn new(
        email_validator: Arc<dyn EmailValidator>,
        add_account: Arc<dyn AddAccount>,
    ) -> Self {
        Self {
            email_validator,
            add_account,
        }
    }

    /// Turn a signup request into a response. Never fails outward:
    /// collaborator errors become a generic 500 body.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        match self.signup(&request.body).await {
            Ok(account) => created(&account),
            Err(err) => err.into(),
        }
    }

    async fn signup(&self, body: &Value) -> Result<Account> {
        for field in REQUIRED_FIELDS {
            if !is_present(body.get(field)) {
                return Err(ServerError::MissingParam(field.into()));
            }
        }

        let email = body.get("email").and_then(Value::as_str).ok_or_else(
            || ServerError::Internal {
                details: "email is not a string".into(),
            },
        )?;
        if !self.email_validator.is_valid(email)? {
            return Err(ServerError::InvalidParam("email".into()));
        }

        let data: NewAccount = serde_json::from_value(body.clone())
            .map_err(|err| ServerError::Internal {
                details: err.to_string(),
            })?;

        self.add_account.add(data).await
    }
}

/// A field counts as missing when it is absent, `null`, an empty string,
/// the number `0` or `false`. Arrays and objects always count as present.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

/// Handler to sign an account up.
pub async fn handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> HttpResponse {
    match payload {
        Ok(Json(body)) => state.signup.handle(HttpRequest { body }).await,
        Err(rejection) => ServerError::from(rejection).into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;

    use super::*;
    use crate::{app, make_request, router};

    struct EmailValidatorStub {
        is_valid: bool,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl EmailValidatorStub {
        fn new(is_valid: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                is_valid,
                fail,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl EmailValidator for EmailValidatorStub {
        fn is_valid(&self, email: &str) -> Result<bool> {
            self.calls.lock().unwrap().push(email.to_owned());
            if self.fail {
                return Err(ServerError::Internal {
                    details: "validator blew up".into(),
                });
            }
            Ok(self.is_valid)
        }
    }

    struct AddAccountStub {
        fail: bool,
        calls: Mutex<Vec<NewAccount>>,
    }

    impl AddAccountStub {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AddAccount for AddAccountStub {
        async fn add(&self, data: NewAccount) -> Result<Account> {
            self.calls.lock().unwrap().push(data.clone());
            if self.fail {
                return Err(ServerError::Internal {
                    details: "insert failed".into(),
                });
            }
            Ok(Account {
                id: "generated_id".into(),
                name: data.name,
                email: data.email,
            })
        }
    }

    fn make_sut(
        is_valid: bool,
        validator_fails: bool,
        add_fails: bool,
    ) -> (Arc<EmailValidatorStub>, Arc<AddAccountStub>, SignupController)
    {
        let email_validator =
            EmailValidatorStub::new(is_valid, validator_fails);
        let add_account = AddAccountStub::new(add_fails);
        let sut = SignupController::new(
            email_validator.clone(),
            add_account.clone(),
        );
        (email_validator, add_account, sut)
    }

    fn valid_body() -> Value {
        json!({
            "name": "valid_name",
            "email": "valid_email@email.com",
            "password": "valid_password",
            "group": "valid_id",
            "country": {},
            "role": 10,
            "status": 1,
        })
    }

    async fn handle(sut: &SignupController, body: Value) -> HttpResponse {
        sut.handle(HttpRequest { body }).await
    }

    #[tokio::test]
    async fn test_each_absent_field_yields_400() {
        for field in REQUIRED_FIELDS {
            let (_, _, sut) = make_sut(true, false, false);
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);

            let response = handle(&sut, body).await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response.body["detail"],
                format!("Missing param: {field}"),
            );
        }
    }

    #[tokio::test]
    async fn test_first_missing_field_wins() {
        let (_, _, sut) = make_sut(true, false, false);

        let response = handle(&sut, json!({ "status": 1 })).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["detail"], "Missing param: name");
    }

    #[tokio::test]
    async fn test_empty_and_null_values_count_as_missing() {
        let (_, _, sut) = make_sut(true, false, false);
        let mut body = valid_body();
        body["name"] = json!("");

        let response = handle(&sut, body).await;
        assert_eq!(response.body["detail"], "Missing param: name");

        let mut body = valid_body();
        body["group"] = Value::Null;

        let response = handle(&sut, body).await;
        assert_eq!(response.body["detail"], "Missing param: group");
    }

    // Zero is a legitimate role/status value but the presence check treats
    // it as missing. Kept on purpose; see DESIGN.md.
    #[tokio::test]
    async fn test_zero_role_is_rejected_as_missing() {
        let (_, _, sut) = make_sut(true, false, false);
        let mut body = valid_body();
        body["role"] = json!(0);

        let response = handle(&sut, body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["detail"], "Missing param: role");
    }

    #[tokio::test]
    async fn test_invalid_email_yields_400() {
        let (_, add_account, sut) = make_sut(false, false, false);

        let response = handle(&sut, valid_body()).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["detail"], "Invalid param: email");
        assert!(add_account.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validator_receives_submitted_email_once() {
        let (email_validator, _, sut) = make_sut(true, false, false);

        handle(&sut, valid_body()).await;

        assert_eq!(
            *email_validator.calls.lock().unwrap(),
            vec!["valid_email@email.com"],
        );
    }

    #[tokio::test]
    async fn test_validator_failure_yields_500_and_skips_use_case() {
        let (_, add_account, sut) = make_sut(true, true, false);

        let response = handle(&sut, valid_body()).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["title"], "Internal server error.");
        assert!(add_account.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_email_yields_500() {
        let (_, add_account, sut) = make_sut(true, false, false);
        let mut body = valid_body();
        body["email"] = json!(42);

        let response = handle(&sut, body).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(add_account.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_use_case_receives_submitted_fields() {
        let (_, add_account, sut) = make_sut(true, false, false);

        handle(&sut, valid_body()).await;

        assert_eq!(
            *add_account.calls.lock().unwrap(),
            vec![NewAccount {
                name: "valid_name".into(),
                email: "valid_email@email.com".into(),
                password: "valid_password".into(),
                group: "valid_id".into(),
                country: json!({}),
                role: 10,
                status: 1,
            }],
        );
    }

    #[tokio::test]
    async fn test_use_case_failure_yields_generic_500() {
        let (_, _, sut) = make_sut(true, false, true);

        let response = handle(&sut, valid_body()).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["title"], "Internal server error.");
        // the collaborator failure is not leaked.
        assert_eq!(response.body["detail"], "");
    }

    #[tokio::test]
    async fn test_success_returns_projection_without_password() {
        let (_, _, sut) = make_sut(true, false, false);

        let response = handle(&sut, valid_body()).await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["id"], "generated_id");
        assert_eq!(response.body["name"], "valid_name");
        assert_eq!(response.body["email"], "valid_email@email.com");
        assert!(response.body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_signup_handler() {
        let app = app(router::testing::state());

        let response = make_request(
            app,
            Method::POST,
            "/signup",
            valid_body().to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "valid_name");
        assert_eq!(body["email"], "valid_email@email.com");
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_signup_handler_with_missing_field() {
        let app = app(router::testing::state());

        let response = make_request(
            app,
            Method::POST,
            "/signup",
            json!({ "email": "valid_email@email.com" }).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["detail"], "Missing param: name");
    }

    #[tokio::test]
    async fn test_signup_handler_with_malformed_body() {
        let app = app(router::testing::state());

        let response = make_request(
            app,
            Method::POST,
            "/signup",
            "{ not json".to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
