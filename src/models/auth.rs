use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: CredentialsTokenType,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CredentialsTokenType {
    Bearer,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            additional_properties: WireObject::new(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<&Credentials> for RefreshTokenRequest {
    fn from(credentials: &Credentials) -> Self {
        Self::new(credentials.refresh_token.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(rename = "OrgID")]
    pub org_id: i32,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: OffsetDateTime,
}

declare_entities!(Credentials, RefreshTokenRequest, User);
