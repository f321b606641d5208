//! Fakes for the domain traits, shared by the handler and router tests.

use crate::domain::traits::{ChatProvider, ServiceControl};
use crate::domain::types::LogStream;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Records every outbound message.
pub struct RecordingChat {
    chat_id: i64,
    sent: Mutex<Vec<String>>,
    typing_fails: bool,
}

impl RecordingChat {
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            sent: Mutex::new(Vec::new()),
            typing_fails: false,
        }
    }

    /// The typing indicator errors, as when the transport drops the request.
    pub fn with_failing_typing(mut self) -> Self {
        self.typing_fails = true;
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(content.to_string());
        Ok(sent.len().to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn typing(&self, _active: bool) -> Result<(), String> {
        if self.typing_fails {
            return Err("sendChatAction failed".to_string());
        }
        Ok(())
    }

    fn chat_id(&self) -> i64 {
        self.chat_id
    }
}

/// In-memory service manager that records each call as `"<verb> <service> ..."`.
#[derive(Default)]
pub struct FakeServices {
    running: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    log: Option<String>,
}

impl FakeServices {
    pub fn with_running(services: &[&str]) -> Self {
        Self {
            running: Mutex::new(services.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Content returned by `tail_log`; without one, tailing fails.
    pub fn with_log(mut self, content: &str) -> Self {
        self.log = Some(content.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ServiceControl for FakeServices {
    async fn is_running(&self, service: &str) -> Result<bool> {
        self.record(format!("status {service}"));
        Ok(self.running.lock().unwrap().contains(service))
    }

    async fn start(&self, service: &str) -> Result<()> {
        self.record(format!("start {service}"));
        self.running.lock().unwrap().insert(service.to_string());
        Ok(())
    }

    async fn stop(&self, service: &str) -> Result<()> {
        self.record(format!("stop {service}"));
        self.running.lock().unwrap().remove(service);
        Ok(())
    }

    async fn tail_log(&self, service: &str, stream: LogStream, lines: usize) -> Result<String> {
        self.record(format!("tail {service} {stream} {lines}"));
        match &self.log {
            Some(log) => Ok(log.clone()),
            None => bail!("tail: cannot open log for {service}"),
        }
    }
}
