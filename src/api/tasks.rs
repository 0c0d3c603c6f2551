#![allow(clippy::result_large_err)]

use super::client::{ApiResult, Client};
use super::operation::{Method, Operation, Request};
use super::response::ApiResponse;
use crate::models::{Event, Task};

pub const LIST_TASKS: Operation = Operation::new("ListTasks", Method::Get, "/tasks", &[200]);
pub const LIST_EVENTS: Operation = Operation::new("ListEvents", Method::Get, "/events", &[200]);

impl Client {
    pub fn list_tasks_detailed(&self) -> ApiResult<ApiResponse<Vec<Task>>> {
        self.execute_json(Request::new(LIST_TASKS))
    }

    pub fn list_tasks(&self) -> ApiResult<Option<Vec<Task>>> {
        self.list_tasks_detailed().map(ApiResponse::into_parsed)
    }

    pub fn list_events_detailed(&self) -> ApiResult<ApiResponse<Vec<Event>>> {
        self.execute_json(Request::new(LIST_EVENTS))
    }

    pub fn list_events(&self) -> ApiResult<Option<Vec<Event>>> {
        self.list_events_detailed().map(ApiResponse::into_parsed)
    }
}
