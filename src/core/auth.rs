//! Credential hashing and bearer-token handling.
//!
//! Passwords are stored as argon2 PHC strings. Tokens are HS256 JWTs carrying the
//! employee id as subject plus the employee's role; a token is only honoured while
//! the employee it names still exists.

use crate::{
    config::settings::AuthSettings,
    db::{self, EmployeeView},
    errors::{AuthError, Result},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            AuthError::Hashing {
                message: e.to_string(),
            }
            .into()
        })
}

/// Checks a plaintext password against a stored hash.
///
/// An unparseable stored hash counts as a mismatch.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Claims carried in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id, as a string
    pub sub: String,
    /// Employee role tag
    pub role: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// The employee id named by the subject claim.
    pub fn employee_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidToken.into())
    }
}

/// A freshly signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
    /// Profile of the authenticated employee
    pub employee: EmployeeView,
}

/// Signs and verifies tokens with the configured secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: Duration,
}

impl TokenSigner {
    /// Builds a signer from the auth settings.
    #[must_use]
    pub fn new(settings: &AuthSettings) -> Self {
        // Expiry is exact: no clock-skew allowance.
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret_key.as_bytes()),
            validation,
            token_expiry: settings.token_expiry,
        }
    }

    /// Issues a token for the employee, valid from `now` for the configured lifetime.
    pub fn issue(&self, employee_id: i64, role: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let expires_at = now + self.token_expiry;
        let claims = Claims {
            sub: employee_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Signing {
                message: e.to_string(),
            }
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Checks signature and expiry, returning the claims.
    ///
    /// # Errors
    /// `AuthError::TokenExpired` once past expiry, `AuthError::InvalidToken` for
    /// anything else that fails to decode.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired.into(),
                _ => AuthError::InvalidToken.into(),
            })
    }
}

/// Looks an employee up by email and checks the password.
///
/// The email is trimmed as at registration. Unknown emails and wrong passwords
/// fail identically.
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<EmployeeView> {
    let Some(employee) = db::employees::find_model_by_email(db, email.trim()).await? else {
        warn!("Login attempt for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verify_password(password, &employee.password_hash) {
        warn!(employee_id = employee.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    db::employees::find_by_id(db, employee.id)
        .await?
        .ok_or_else(|| AuthError::InvalidCredentials.into())
}

/// Authenticates and issues a token.
pub async fn login(
    db: &DatabaseConnection,
    signer: &TokenSigner,
    email: &str,
    password: &str,
) -> Result<LoginResponse> {
    let employee = authenticate(db, email, password).await?;
    let issued = signer.issue(employee.id, &employee.role, Utc::now())?;

    info!(employee_id = employee.id, "Employee logged in");
    Ok(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        employee,
    })
}

/// Verifies a bearer token and resolves the employee it names.
///
/// # Errors
/// Returns `AuthError::InvalidToken` if the employee no longer exists.
pub async fn validate_token(
    db: &DatabaseConnection,
    signer: &TokenSigner,
    token: &str,
) -> Result<(Claims, EmployeeView)> {
    let claims = signer.verify(token)?;
    let employee = db::employees::find_by_id(db, claims.employee_id()?)
        .await?
        .ok_or(AuthError::InvalidToken)?;
    Ok((claims, employee))
}
