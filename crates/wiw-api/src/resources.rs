//! Resource wrappers over [`WhenIWorkClient::request`].
//!
//! Each wrapper only picks a path and a verb. Errors from `request` are
//! propagated unchanged.

use std::fmt::Display;

use reqwest::Method;
use serde_json::Value;
use wiw_types::ApiError;

use crate::client::{RequestOptions, WhenIWorkClient};
use crate::query::{Params, query_string};

impl WhenIWorkClient {
    async fn list(&self, path: &str, params: Option<&Params>) -> Result<Value, ApiError> {
        let endpoint = format!("{path}{}", query_string(params));
        self.request(&endpoint, RequestOptions::default()).await
    }

    async fn fetch(&self, path: &str, id: impl Display) -> Result<Value, ApiError> {
        self.request(&format!("{path}/{id}"), RequestOptions::default())
            .await
    }

    async fn create(&self, path: &str, payload: &Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::POST).with_body(payload))
            .await
    }

    async fn update(&self, path: &str, id: impl Display, payload: &Value) -> Result<Value, ApiError> {
        self.request(
            &format!("{path}/{id}"),
            RequestOptions::new(Method::PUT).with_body(payload),
        )
        .await
    }

    async fn remove(&self, path: &str, id: impl Display) -> Result<Value, ApiError> {
        self.request(&format!("{path}/{id}"), RequestOptions::new(Method::DELETE))
            .await
    }

    // Users

    pub async fn list_users(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/users", params).await
    }

    pub async fn get_user(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/users", id).await
    }

    pub async fn create_user(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/users", payload).await
    }

    pub async fn update_user(&self, id: impl Display, payload: &Value) -> Result<Value, ApiError> {
        self.update("/users", id, payload).await
    }

    pub async fn delete_user(&self, id: impl Display) -> Result<Value, ApiError> {
        self.remove("/users", id).await
    }

    // Shifts

    pub async fn list_shifts(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/shifts", params).await
    }

    pub async fn get_shift(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/shifts", id).await
    }

    pub async fn create_shift(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/shifts", payload).await
    }

    pub async fn update_shift(&self, id: impl Display, payload: &Value) -> Result<Value, ApiError> {
        self.update("/shifts", id, payload).await
    }

    pub async fn delete_shift(&self, id: impl Display) -> Result<Value, ApiError> {
        self.remove("/shifts", id).await
    }

    // Positions

    pub async fn list_positions(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/positions", params).await
    }

    pub async fn get_position(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/positions", id).await
    }

    pub async fn create_position(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/positions", payload).await
    }

    pub async fn update_position(
        &self,
        id: impl Display,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        self.update("/positions", id, payload).await
    }

    pub async fn delete_position(&self, id: impl Display) -> Result<Value, ApiError> {
        self.remove("/positions", id).await
    }

    // Locations

    pub async fn list_locations(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/locations", params).await
    }

    pub async fn get_location(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/locations", id).await
    }

    pub async fn create_location(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/locations", payload).await
    }

    pub async fn update_location(
        &self,
        id: impl Display,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        self.update("/locations", id, payload).await
    }

    pub async fn delete_location(&self, id: impl Display) -> Result<Value, ApiError> {
        self.remove("/locations", id).await
    }

    // Time tracking: clock in/out post to fixed sub-paths, never to /times.

    pub async fn list_times(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/times", params).await
    }

    pub async fn clock_in(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/times/clockin", payload).await
    }

    pub async fn clock_out(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/times/clockout", payload).await
    }

    // Time-off requests: cancelled, not deleted.

    pub async fn list_requests(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/requests", params).await
    }

    pub async fn get_request(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/requests", id).await
    }

    pub async fn create_request(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/requests", payload).await
    }

    pub async fn update_request(
        &self,
        id: impl Display,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        self.update("/requests", id, payload).await
    }

    pub async fn cancel_request(&self, id: impl Display) -> Result<Value, ApiError> {
        self.request(
            &format!("/requests/{id}/cancel"),
            RequestOptions::new(Method::PUT),
        )
        .await
    }

    // Availability

    pub async fn list_availabilities(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/availabilities", params).await
    }

    pub async fn get_availability(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/availabilities", id).await
    }

    pub async fn create_availability(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/availabilities", payload).await
    }

    pub async fn update_availability(
        &self,
        id: impl Display,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        self.update("/availabilities", id, payload).await
    }

    pub async fn delete_availability(&self, id: impl Display) -> Result<Value, ApiError> {
        self.remove("/availabilities", id).await
    }

    // Account and payroll are read-only.

    pub async fn get_account(&self) -> Result<Value, ApiError> {
        self.request("/account", RequestOptions::default()).await
    }

    pub async fn get_payroll(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/payrolls", params).await
    }

    // Messages

    pub async fn list_messages(&self, params: Option<&Params>) -> Result<Value, ApiError> {
        self.list("/messages", params).await
    }

    pub async fn get_message(&self, id: impl Display) -> Result<Value, ApiError> {
        self.fetch("/messages", id).await
    }

    pub async fn create_message(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create("/messages", payload).await
    }

    /// Alias of [`create_message`](Self::create_message).
    pub async fn send_message(&self, payload: &Value) -> Result<Value, ApiError> {
        self.create_message(payload).await
    }
}
