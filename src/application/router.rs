//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command string (e.g., `/status lirc`), applies the authorization guard,
//! and dispatches through the static command table.

use anyhow::Result;
use std::sync::Arc;

use crate::application::auth::Authorizer;
use crate::application::parsing::parse_command;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, ServiceControl};
use crate::domain::types::Command;
use crate::interface::commands;

pub struct CommandRouter {
    config: Arc<AppConfig>,
    auth: Authorizer,
    services: Arc<dyn ServiceControl>,
    /// Our own username from `getMe`; `/cmd@name` for any other name is ignored.
    bot_username: Option<String>,
}

impl CommandRouter {
    pub fn new(config: Arc<AppConfig>, services: Arc<dyn ServiceControl>) -> Self {
        let auth = Authorizer::new(config.telegram.chat_ids.iter().copied());
        Self {
            config,
            auth,
            services,
            bot_username: None,
        }
    }

    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Handle one inbound message. Errors from the handlers are returned for the
    /// caller to log; user-facing validation failures are replied to directly.
    pub async fn route<C>(&self, chat: &C, message: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let Some(invocation) = parse_command(message, self.bot_username.as_deref()) else {
            return Ok(());
        };
        let Some(command) = Command::from_name(&invocation.name) else {
            tracing::debug!("Ignoring unknown command /{}", invocation.name);
            return Ok(());
        };

        tracing::info!(
            "Router dispatching cmd='{}' args={:?} chat='{}'",
            invocation.name,
            invocation.args,
            chat.chat_id()
        );

        if !self.auth.guard(chat, &invocation.name).await? {
            return Ok(());
        }

        match command {
            Command::Service(action) => {
                commands::service::handle_service(
                    &self.config,
                    self.services.as_ref(),
                    chat,
                    action,
                    &invocation.args,
                )
                .await
            }
            Command::Log(stream) => {
                commands::log::handle_log(
                    &self.config,
                    self.services.as_ref(),
                    chat,
                    stream,
                    &invocation.args,
                )
                .await
            }
            Command::Help => commands::help::handle_help(&self.config, chat).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeServices, RecordingChat};
    use crate::strings::messages;

    const ALLOWED: i64 = 1001;

    fn router(services: Arc<FakeServices>) -> CommandRouter {
        let mut config = AppConfig::default();
        config.telegram.chat_ids = vec![ALLOWED];
        CommandRouter::new(Arc::new(config), services)
            .with_bot_username(Some("home_bot".to_string()))
    }

    #[tokio::test]
    async fn test_unauthorized_never_touches_services() {
        let services = Arc::new(FakeServices::with_running(&["lirc"]).with_log("x"));
        let router = router(services.clone());
        let chat = RecordingChat::new(666);

        for msg in [
            "/status",
            "/start lirc",
            "/stop",
            "/log lirc",
            "/logerr lirc 3",
            "/help",
        ] {
            router.route(&chat, msg).await.unwrap();
        }

        assert!(services.calls().is_empty());
        assert_eq!(chat.messages(), vec![messages::UNAUTHORIZED; 6]);
    }

    #[tokio::test]
    async fn test_non_commands_are_ignored() {
        let services = Arc::new(FakeServices::default());
        let router = router(services.clone());
        let chat = RecordingChat::new(666);

        router.route(&chat, "hello there").await.unwrap();
        router.route(&chat, "/restart lirc").await.unwrap();

        // Not even a rejection for things that are not in the command table.
        assert!(chat.messages().is_empty());
        assert!(services.calls().is_empty());
    }

    #[tokio::test]
    async fn test_commands_for_other_bots_are_ignored() {
        let services = Arc::new(FakeServices::with_running(&["lirc"]));
        let router = router(services.clone());
        let chat = RecordingChat::new(ALLOWED);

        router.route(&chat, "/stop@other_bot").await.unwrap();
        router.route(&chat, "/status@other_bot lirc").await.unwrap();

        assert!(services.calls().is_empty());
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn test_dispatches_status() {
        let services = Arc::new(FakeServices::with_running(&["lirc"]));
        let router = router(services.clone());
        let chat = RecordingChat::new(ALLOWED);

        router.route(&chat, "/status@home_bot lirc").await.unwrap();

        assert_eq!(services.calls(), vec!["status lirc"]);
        assert_eq!(chat.messages(), vec!["✅ *lirc* - Running"]);
    }

    #[tokio::test]
    async fn test_dispatches_logerr() {
        let services = Arc::new(FakeServices::default().with_log("boom\n"));
        let router = router(services.clone());
        let chat = RecordingChat::new(ALLOWED);

        router.route(&chat, "/logerr bot").await.unwrap();

        assert_eq!(services.calls(), vec!["tail bot err 5"]);
        assert_eq!(chat.messages(), vec!["```\nboom\n```"]);
    }

    #[tokio::test]
    async fn test_handler_failure_propagates() {
        // No log content configured: tail fails.
        let services = Arc::new(FakeServices::default());
        let router = router(services.clone());
        let chat = RecordingChat::new(ALLOWED);

        assert!(router.route(&chat, "/log bot").await.is_err());
        assert!(chat.messages().is_empty());
    }
}
