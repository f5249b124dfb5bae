use async_trait::async_trait;
use std::{
    io::{self, ErrorKind},
    sync::Mutex,
};

use super::{HttpReply, Transport};
use crate::FetchError;

#[derive(Debug)]
enum Canned {
    Reply(HttpReply),
    Unreachable(String),
}

/// In-memory [`Transport`] answering from canned replies.
///
/// Replies are matched by URL prefix, first registered wins. Every requested
/// URL is recorded, including unmatched ones, which fail as transport errors.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<(String, Canned)>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url_prefix: impl Into<String>, reply: HttpReply) -> Self {
        self.routes.push((url_prefix.into(), Canned::Reply(reply)));
        self
    }

    /// Simulate a connection failure for matching URLs.
    pub fn unreachable(
        mut self,
        url_prefix: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let canned = Canned::Unreachable(reason.into());
        self.routes.push((url_prefix.into(), canned));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let canned = self
            .routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()));

        let (kind, reason) = match canned {
            Some((_, Canned::Reply(reply))) => return Ok(reply.clone()),
            Some((_, Canned::Unreachable(why))) => (ErrorKind::ConnectionRefused, why.as_str()),
            None => (ErrorKind::NotFound, "no canned reply"),
        };

        Err(FetchError::transport(url, io::Error::new(kind, reason)))
    }
}
