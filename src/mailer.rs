//! SMTP notifications for form submissions. The mailer is optional: without
//! SMTP settings in the environment the endpoints still accept submissions
//! and only log them.

use anyhow::{Context, Result};
use chrono::Utc;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use crate::forms::{ContactSubmission, JoinApplication};

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    /// Build a mailer from `SMTP_HOST`/`SMTP_USER`/`SMTP_PASS` and
    /// `MAIL_FROM`/`MAIL_TO`. Returns `Ok(None)` when `SMTP_HOST` is unset,
    /// which disables notifications without disabling the endpoints.
    pub fn from_env() -> Result<Option<Self>> {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => return Ok(None),
        };
        let user = std::env::var("SMTP_USER").context("SMTP_USER missing")?;
        let pass = std::env::var("SMTP_PASS").context("SMTP_PASS missing")?;
        let from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "BSA Website <noreply@bsa-epfl.ch>".to_string());
        let to = std::env::var("MAIL_TO").unwrap_or_else(|_| "bsa@epfl.ch".to_string());

        let creds = Credentials::new(user, pass);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .context("invalid SMTP_HOST")?
            .credentials(creds)
            .build();

        let from = from.parse().context("invalid MAIL_FROM")?;
        let to = to.parse().context("invalid MAIL_TO")?;

        Ok(Some(Self {
            transport,
            from,
            to,
        }))
    }

    pub async fn send_contact(&self, submission: &ContactSubmission) -> Result<()> {
        let subject = format!("BSA Contact Form: {}", submission.subject);
        self.send(subject, contact_body(submission)).await
    }

    pub async fn send_join(&self, application: &JoinApplication) -> Result<()> {
        let subject = format!(
            "New BSA Join Application: {} {}",
            application.first_name, application.last_name
        );
        self.send(subject, join_body(application)).await
    }

    async fn send(&self, subject: String, body: String) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body)
            .context("build email")?;

        self.transport.send(msg).await.context("send email")?;
        Ok(())
    }
}

fn contact_body(submission: &ContactSubmission) -> String {
    format!(
        "New contact form submission\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\
         \n\
         Message:\n{}\n\
         \n\
         Submitted: {}\n\
         Please respond to the sender at: {}\n",
        submission.name,
        submission.email,
        submission.subject,
        submission.message,
        Utc::now().to_rfc3339(),
        submission.email,
    )
}

fn join_body(application: &JoinApplication) -> String {
    let mut body = format!(
        "New BSA join application\n\
         \n\
         Name: {} {}\n\
         Email: {}\n\
         Student ID: {}\n\
         Study Program: {}\n\
         Year of Study: {}\n\
         \n\
         Areas of Interest: {}\n\
         Experience Level: {}\n\
         \n\
         Motivation:\n{}\n\
         \n\
         How they heard about BSA: {}\n",
        application.first_name,
        application.last_name,
        application.email,
        application.student_id.as_deref().unwrap_or("Not provided"),
        application.study_program,
        application.year_of_study,
        application.interests.join(", "),
        application.experience,
        application.motivation,
        application.how_did_you_hear,
    );

    if let Some(info) = &application.additional_info {
        body.push_str(&format!("Additional Info: {}\n", info));
    }

    body.push_str(&format!(
        "\nSubmitted: {}\nPlease respond to the applicant at: {}\n",
        Utc::now().to_rfc3339(),
        application.email
    ));

    body
}
