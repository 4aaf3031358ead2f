use super::{
    Notifier,
    NotifyError,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request payload of the Telegram `sendMessage` call.
///
/// See https://core.telegram.org/bots/api#sendmessage
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// Sends Markdown messages to one chat through a Telegram bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl ToString, chat_id: impl ToString) -> Result<Self, NotifyError> {
        Self::with_base_url(TELEGRAM_API_URL, bot_token, chat_id)
    }

    /// Like [`TelegramNotifier::new`] but talks to `base_url` instead of the public bot API.
    pub fn with_base_url(
        base_url: impl ToString,
        bot_token: impl ToString,
        chat_id: impl ToString,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::from_parts(client, base_url, bot_token, chat_id))
    }

    fn from_parts(
        client: reqwest::Client,
        base_url: impl ToString,
        bot_token: impl ToString,
        chat_id: impl ToString,
    ) -> Self {
        Self {
            client,
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let message = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let res = self.client.post(self.send_message_url()).json(&message).send().await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }

        trace!(chat_id = %self.chat_id, "telegram message delivered");
        Ok(())
    }
}
