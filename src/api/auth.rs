#![allow(clippy::result_large_err)]

use super::client::{ApiResult, Client};
use super::operation::{Method, Operation, Request};
use super::response::ApiResponse;
use crate::models::{Credentials, RefreshTokenRequest};

pub const SIGN_IN: Operation = Operation::new("SignIn", Method::Post, "/auth/sign-in", &[200]);
pub const REFRESH_TOKEN: Operation =
    Operation::new("RefreshToken", Method::Post, "/auth/refresh", &[200]);
pub const SIGN_OUT: Operation =
    Operation::new("SignOut", Method::Post, "/auth/sign-out", &[200, 204]);

impl Client {
    /// Sends `name`/`password` as a form body.
    pub fn sign_in_detailed(
        &self,
        name: &str,
        password: &str,
    ) -> ApiResult<ApiResponse<Credentials>> {
        let request = Request::new(SIGN_IN).form(vec![
            ("name", name.to_string()),
            ("password", password.to_string()),
        ]);
        self.execute_json(request)
    }

    pub fn sign_in(&self, name: &str, password: &str) -> ApiResult<Option<Credentials>> {
        self.sign_in_detailed(name, password)
            .map(ApiResponse::into_parsed)
    }

    pub fn refresh_token_detailed(
        &self,
        body: &RefreshTokenRequest,
    ) -> ApiResult<ApiResponse<Credentials>> {
        self.execute_json(Request::new(REFRESH_TOKEN).json(body)?)
    }

    pub fn refresh_token(&self, body: &RefreshTokenRequest) -> ApiResult<Option<Credentials>> {
        self.refresh_token_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn sign_out_detailed(&self) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(Request::new(SIGN_OUT))
    }

    pub fn sign_out(&self) -> ApiResult<Option<()>> {
        self.sign_out_detailed().map(ApiResponse::into_parsed)
    }
}
