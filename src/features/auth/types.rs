//! Request and response types for the login exchange. Credentials and the
//! device fingerprint are secrets in transit and must never be logged; their
//! `Debug` output is redacted.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// User-entered credentials, held only for one login attempt.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Opaque device identifier, produced once per login attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeviceFingerprint([REDACTED])")
    }
}

/// Body of the login call.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(serialize_with = "expose_password")]
    pub password: &'a SecretString,
    pub device_id: &'a str,
}

fn expose_password<S: Serializer>(
    password: &&SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Staff,
    Patient,
    /// Any role the client has no dashboard for, kept verbatim. Empty when the
    /// payload carried no usable role.
    Other(String),
}

impl Role {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            "patient" => Role::Patient,
            other => Role::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Patient => "patient",
            Role::Other(other) => other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user as reported by the login endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionUser {
    pub role: Role,
    /// Remaining profile fields, passed through untouched.
    pub profile: Map<String, Value>,
}

impl SessionUser {
    fn from_object(mut object: Map<String, Value>) -> Self {
        let role = match object.remove("role") {
            Some(Value::String(role)) => Role::parse(&role),
            _ => Role::Other(String::new()),
        };
        Self {
            role,
            profile: object,
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.profile.get("email").and_then(Value::as_str)
    }
}

/// The two shapes the login endpoint is known to answer with.
///
/// * `Nested`: `{ "user": { "role": ... }, ... }`
/// * `TopLevel`: `{ "role": ..., ... }`
///
/// A `user` field that is missing, `null` or not an object is dropped and the
/// top-level payload is read instead. A non-object payload yields a user
/// without a role.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginResponse {
    Nested {
        user: SessionUser,
        token: Option<SecretToken>,
    },
    TopLevel {
        user: SessionUser,
        token: Option<SecretToken>,
    },
}

impl LoginResponse {
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let mut object = match value {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        let token = take_token(&mut object);

        match object.remove("user") {
            Some(Value::Object(user)) => LoginResponse::Nested {
                user: SessionUser::from_object(user),
                token,
            },
            _ => LoginResponse::TopLevel {
                user: SessionUser::from_object(object),
                token,
            },
        }
    }

    #[must_use]
    pub fn user(&self) -> &SessionUser {
        match self {
            LoginResponse::Nested { user, .. } | LoginResponse::TopLevel { user, .. } => user,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (SessionUser, Option<SecretToken>) {
        match self {
            LoginResponse::Nested { user, token } | LoginResponse::TopLevel { user, token } => {
                (user, token)
            }
        }
    }
}

/// Session token returned alongside the user, when the backend issues one.
#[derive(Clone)]
pub struct SecretToken(pub SecretString);

impl PartialEq for SecretToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}

fn take_token(object: &mut Map<String, Value>) -> Option<SecretToken> {
    match object.remove("token") {
        Some(Value::String(token)) if !token.trim().is_empty() => {
            Some(SecretToken(SecretString::from(token)))
        }
        _ => None,
    }
}

/// JavaScript-style truthiness, which is how the backend's boolean-ish
/// fields are meant to be read.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
