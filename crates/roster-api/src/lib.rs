// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use roster_app::{Directory, Post, Record, UserId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }

        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not an absolute URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn list_users(&self) -> Result<Vec<Record>> {
        self.get_json("/users", "decode user list")
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<Record>> {
        let response = self.send(&format!("/users/{id}"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let value: Value = ensure_success(response)?
            .json()
            .with_context(|| format!("decode user {id}"))?;
        match value {
            Value::Null => Ok(None),
            Value::Object(attributes) if attributes.is_empty() => Ok(None),
            Value::Object(attributes) => Ok(Some(Record::new(attributes))),
            other => bail!("user {id} response is not a JSON object: {other}"),
        }
    }

    pub fn list_user_posts(&self, id: UserId) -> Result<Vec<Post>> {
        let entries: Vec<Value> = self.get_json(&format!("/users/{id}/posts"), "decode post list")?;
        Ok(Post::decode_list(entries))
    }

    fn send(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");
        self.http
            .get(&url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, what: &'static str) -> Result<T> {
        let response = ensure_success(self.send(path)?)?;
        response.json().context(what)
    }
}

impl Directory for Client {
    fn list_users(&self) -> Result<Vec<Record>> {
        Client::list_users(self)
    }

    fn get_user(&self, id: UserId) -> Result<Option<Record>> {
        Client::get_user(self, id)
    }

    fn list_posts(&self, id: UserId) -> Result<Vec<Post>> {
        self.list_user_posts(id)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(clean_error_response(status, &body))
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check [api].base_url or ROSTER_API_BASE_URL ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}
