use chrono::{Duration, Utc};
use domain::UserId;
use http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// 認証済みユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// リクエスト単位の認証状態
pub trait AuthContext: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// 認証済みなら `Some`
    fn auth_user(&self) -> Option<AuthUser>;
}

/// HS256 の JWT を検証・発行する
#[derive(Clone)]
pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// トークンを発行（ログイン機能は外部。テスト・ローカル開発用）
    pub fn issue(&self, user: &AuthUser, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.as_str().to_string(),
            email: user.email.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// `Authorization: Bearer <token>` を検証してユーザーを取り出す
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken("non-ascii header".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidToken("expected Bearer scheme".to_string()))?;

        let claims = self.verify(token.trim())?;
        let id = UserId::from_string(claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AuthUser {
            id,
            email: claims.email,
        })
    }
}

/// Bearer トークンから解決した認証状態
///
/// トークン不正はリクエストを失敗させず、未認証として扱う。
#[derive(Debug, Clone, Default)]
pub struct BearerAuthContext {
    user: Option<AuthUser>,
}

impl BearerAuthContext {
    pub fn from_headers(headers: &HeaderMap, authenticator: &JwtAuthenticator) -> Self {
        match authenticator.authenticate(headers) {
            Ok(user) => Self { user: Some(user) },
            Err(AuthError::MissingToken) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "rejecting bearer token");
                Self::default()
            }
        }
    }
}

impl AuthContext for BearerAuthContext {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn auth_user(&self) -> Option<AuthUser> {
        self.user.clone()
    }
}
