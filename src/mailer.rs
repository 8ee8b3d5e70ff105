// src/mailer.rs

use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    ApiError(String),
}

/// A rendered report ready to hand to a mail service.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
}

pub trait ReportMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailerError>;
}

pub struct BrevoMailer {
    api_key: String,
    sender_name: String,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

impl BrevoMailer {
    pub fn new(api_key: String, sender_name: String) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        Ok(Self {
            api_key,
            sender_name,
            client,
        })
    }

    fn payload<'a>(&'a self, email: &'a OutgoingEmail) -> BrevoPayload<'a> {
        BrevoPayload {
            sender: BrevoSender {
                name: &self.sender_name,
                email: &email.from,
            },
            to: vec![BrevoRecipient { email: &email.to }],
            subject: &email.subject,
            html_content: &email.html,
        }
    }
}

impl ReportMailer for BrevoMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let resp = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.payload(email))
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MailerError::ApiError(format!(
                "Brevo API error: {} - {}",
                status, error_body
            )));
        }

        Ok(())
    }
}
