//! Resend implementation of ConfirmationMailer.
//!
//! Sends the confirmation-link message through the Resend HTTP API. The
//! link embeds the token directly: tokens are URL-safe base64 by
//! construction, so no percent-encoding is needed.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

use crate::config::{ConfirmationConfig, EmailConfig};
use crate::domain::foundation::RequestId;
use crate::domain::subscriber::{ConfirmationToken, EmailAddress, SubscriberName};
use crate::ports::{ConfirmationMailer, DeliveryError};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Resend implementation of the ConfirmationMailer port.
pub struct ResendMailer {
    client: Client,
    email: EmailConfig,
    confirmation: ConfirmationConfig,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    text: String,
    headers: SendEmailHeaders,
}

#[derive(Debug, Serialize)]
struct SendEmailHeaders {
    #[serde(rename = "X-Request-Id")]
    request_id: String,
}

impl ResendMailer {
    pub fn new(email: EmailConfig, confirmation: ConfirmationConfig) -> Self {
        Self {
            client: Client::new(),
            email,
            confirmation,
        }
    }

    /// Builds the verification link for a token.
    pub fn verification_link(&self, token: &ConfirmationToken) -> String {
        format!(
            "{}/verify?token={}",
            self.confirmation.base_url.trim_end_matches('/'),
            token.as_str()
        )
    }

    fn render(&self, to: &EmailAddress, display_name: &SubscriberName, link: &str) -> (String, String) {
        let hours = self.confirmation.ttl_hours();
        let name = escape_html(display_name.as_str());
        let address = escape_html(to.as_str());

        let html = format!(
            concat!(
                r#"<div style="font-family:system-ui,sans-serif">"#,
                "<h2>Confirm your email, {name}</h2>",
                "<p>This message is intended for <strong>{address}</strong>.</p>",
                r#"<p><a href="{link}">Confirm my email</a> (valid {hours}h)</p>"#,
                "</div>"
            ),
            name = name,
            address = address,
            link = link,
            hours = hours,
        );
        let text = format!(
            "Confirm your email ({}). Link (valid {}h): {}",
            to.as_str(),
            hours,
            link
        );
        (html, text)
    }
}

#[async_trait]
impl ConfirmationMailer for ResendMailer {
    async fn deliver(
        &self,
        to: &EmailAddress,
        display_name: &SubscriberName,
        token: &ConfirmationToken,
        request_id: RequestId,
    ) -> Result<(), DeliveryError> {
        let link = self.verification_link(token);
        let (html, text) = self.render(to, display_name, &link);

        let body = SendEmailRequest {
            from: self.email.from_header(),
            to: vec![to.as_str().to_string()],
            subject: format!("Confirm your email, {}", display_name.as_str()),
            html,
            text,
            headers: SendEmailHeaders {
                request_id: request_id.to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/emails", self.email.api_base_url))
            .bearer_auth(self.email.resend_api_key.expose_secret())
            .timeout(SEND_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::transport(e.to_string()))?;

        if response.status().is_success() {
            tracing::debug!(%request_id, to = %to, "confirmation mail accepted");
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: response.status().as_u16(),
            })
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn mailer() -> ResendMailer {
        ResendMailer::new(
            EmailConfig {
                resend_api_key: Secret::new("re_test".to_string()),
                ..Default::default()
            },
            ConfirmationConfig {
                base_url: "https://news.example.com/".to_string(),
                ttl_hours: 24,
            },
        )
    }

    #[test]
    fn verification_link_embeds_token_without_double_slash() {
        let mailer = mailer();
        let token = ConfirmationToken::generate();
        let link = mailer.verification_link(&token);
        assert_eq!(
            link,
            format!("https://news.example.com/verify?token={}", token.as_str())
        );
    }

    #[test]
    fn render_escapes_user_input_and_names_the_window() {
        let mailer = mailer();
        let to = EmailAddress::parse("ada@example.com").unwrap();
        let name = SubscriberName::parse("Ada <script>").unwrap();
        let (html, text) = mailer.render(&to, &name, "https://news.example.com/verify?token=t");

        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("valid 24h"));
        assert!(text.contains("valid 24h"));
        assert!(text.contains("https://news.example.com/verify?token=t"));
    }

    #[test]
    fn escape_html_covers_all_specials() {
        assert_eq!(escape_html(r#"<>&'""#), "&lt;&gt;&amp;&#39;&quot;");
    }
}
