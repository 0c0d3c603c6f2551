//! Purpose: Describe REST operations and the requests built against them.
//! Exports: `Method`, `Operation`, and the crate-internal `Request` builder.
//! Role: One static descriptor per endpoint; the client executes requests generically.
//! Invariants: Path templates use `{name}` placeholders that must all be bound before send.
//! Invariants: Absent optional query parameters are never sent.
use crate::core::entity::Entity;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse::encode_body;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Operation {
    pub id: &'static str,
    pub method: Method,
    pub path: &'static str,
    /// Statuses whose body is parsed as the documented response.
    pub success: &'static [u16],
}

impl Operation {
    pub const fn new(
        id: &'static str,
        method: Method,
        path: &'static str,
        success: &'static [u16],
    ) -> Self {
        Self {
            id,
            method,
            path,
            success,
        }
    }

    pub fn is_success(&self, status: u16) -> bool {
        self.success.contains(&status)
    }

    /// Resolves the path template into segments, substituting bound parameters.
    pub(crate) fn segments(&self, params: &[(&'static str, String)]) -> Result<Vec<String>, Error> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let Some(name) = segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                else {
                    return Ok(segment.to_string());
                };
                params
                    .iter()
                    .find(|(param, _)| *param == name)
                    .map(|(_, value)| value.clone())
                    .ok_or_else(|| {
                        Error::new(ErrorKind::Internal)
                            .with_message(format!("path parameter `{name}` is not bound"))
                            .with_operation(self.id)
                    })
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Body {
    Empty,
    Json(String),
    Form(Vec<(&'static str, String)>),
}

#[derive(Clone, Debug)]
pub(crate) struct Request {
    pub(crate) operation: Operation,
    pub(crate) path_params: Vec<(&'static str, String)>,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: Body,
}

impl Request {
    pub(crate) fn new(operation: Operation) -> Self {
        Self {
            operation,
            path_params: Vec::new(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub(crate) fn path(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub(crate) fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    pub(crate) fn query_opt<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub(crate) fn json<E: Entity>(mut self, entity: &E) -> Result<Self, Error> {
        let object = entity
            .encode()
            .map_err(|err| err.with_operation(self.operation.id))?;
        let text = encode_body(object).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to encode request body")
                .with_operation(self.operation.id)
                .with_source(err)
        })?;
        self.body = Body::Json(text);
        Ok(self)
    }

    pub(crate) fn form(mut self, fields: Vec<(&'static str, String)>) -> Self {
        self.body = Body::Form(fields);
        self
    }
}
