//! Contact form command.

use bharat_storefront::StorefrontError;
use bharat_storefront::contact::{ContactForm, ContactOutcome};

use super::Context;

/// Arguments for `bharat contact`.
#[derive(Debug, clap::Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(short, long)]
    pub message: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// Enquiry type, e.g. orders or wholesale
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,
}

impl From<&ContactArgs> for ContactForm {
    fn from(args: &ContactArgs) -> Self {
        Self {
            name: args.name.clone(),
            email: args.email.clone(),
            message: args.message.clone(),
            phone: args.phone.clone(),
            category: args.category.clone(),
            subject: args.subject.clone(),
        }
    }
}

/// Send a contact message.
///
/// # Errors
///
/// Returns the validation error if a required field is blank or the email
/// address is malformed.
pub async fn send(ctx: &mut Context, args: &ContactArgs) -> Result<(), StorefrontError> {
    let outcome = match ctx.storefront.handle_contact_form(&ContactForm::from(args)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            ctx.flush_notifications();
            return Err(e.into());
        }
    };

    if outcome == ContactOutcome::AcceptedOffline {
        tracing::warn!("Contact message was not delivered to the backend");
    }
    Ok(())
}
