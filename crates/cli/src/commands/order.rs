//! Order commands.

use bharat_core::Email;
use bharat_storefront::StorefrontError;
use bharat_storefront::api::{FulfillmentStatus, Order, ShippingAddress};

use super::{Context, print_line};

/// Arguments for `bharat order submit`.
#[derive(Debug, clap::Args)]
pub struct SubmitArgs {
    /// Customer email address
    #[arg(short, long)]
    pub email: String,

    /// Recipient name
    #[arg(long)]
    pub name: String,

    /// Address line 1
    #[arg(long)]
    pub line1: String,

    /// Address line 2
    #[arg(long)]
    pub line2: Option<String>,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub postal_code: String,

    #[arg(long, default_value = "IN")]
    pub country: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,
}

impl SubmitArgs {
    fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            name: self.name.clone(),
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Submit the cart as an order.
///
/// # Errors
///
/// Returns an error if the cart is empty, the email is malformed, or the
/// backend does not accept the order.
pub async fn submit(ctx: &mut Context, args: &SubmitArgs) -> Result<(), StorefrontError> {
    let email = Email::parse(args.email.trim())
        .map_err(|e| StorefrontError::BadRequest(format!("invalid email: {e}")))?;

    let items = ctx.storefront.cart().order_items();
    if items.is_empty() {
        return Err(StorefrontError::BadRequest("the cart is empty".to_string()));
    }

    let order = ctx
        .storefront
        .submit_order(&email, &args.shipping_address(), &items)
        .await
        .ok_or_else(|| {
            StorefrontError::BadRequest("the order could not be placed; try again later".to_string())
        })?;

    for line in order_summary(&order) {
        print_line(&line);
    }
    Ok(())
}

/// Print an order's status.
///
/// # Errors
///
/// Returns an error if the backend does not know the order.
pub async fn status(ctx: &Context, order_id: &str) -> Result<(), StorefrontError> {
    let order = ctx
        .storefront
        .get_order_status(order_id)
        .await
        .ok_or_else(|| StorefrontError::NotFound(format!("order {order_id}")))?;

    for line in order_summary(&order) {
        print_line(&line);
    }
    Ok(())
}

/// Print fulfillment progress for an order.
///
/// # Errors
///
/// Returns an error if the fulfillment status is unavailable.
pub async fn fulfillment(ctx: &Context, order_id: &str) -> Result<(), StorefrontError> {
    let status = ctx
        .storefront
        .get_fulfillment_status(order_id)
        .await
        .ok_or_else(|| StorefrontError::NotFound(format!("fulfillment for order {order_id}")))?;

    for line in fulfillment_summary(&status) {
        print_line(&line);
    }
    Ok(())
}

fn order_summary(order: &Order) -> Vec<String> {
    let mut lines = vec![
        format!("Order:   {}", order.order_id),
        format!("Status:  {}", order.status),
    ];
    if let Some(total) = order.total {
        lines.push(format!("Total:   {total}"));
    }
    if let Some(tracking_id) = &order.tracking_id {
        lines.push(format!("Tracking: {tracking_id}"));
    }
    for item in &order.items {
        lines.push(format!("  {} x{} {}", item.sku, item.quantity, item.name));
    }
    lines
}

fn fulfillment_summary(status: &FulfillmentStatus) -> Vec<String> {
    let mut lines = vec![
        format!("Order:    {}", status.order_id),
        format!("Status:   {}", status.status),
    ];
    if let Some(tracking) = &status.tracking_number {
        lines.push(format!("Tracking: {tracking}"));
    }
    if let Some(eta) = &status.estimated_delivery {
        lines.push(format!("ETA:      {eta}"));
    }
    for event in &status.events {
        let when = event.timestamp.as_deref().unwrap_or("-");
        match &event.location {
            Some(location) => lines.push(format!("  {when}  {} ({location})", event.event)),
            None => lines.push(format!("  {when}  {}", event.event)),
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    use bharat_core::Price;
    use bharat_storefront::api::FulfillmentEvent;

    #[test]
    fn test_order_summary() {
        let order = Order {
            order_id: "BHRT-1718000000".to_string(),
            status: "pending".to_string(),
            total: Some(Price::from_rupees(2598)),
            created_at: None,
            tracking_id: None,
            customer_email: None,
            items: Vec::new(),
        };
        assert_eq!(
            order_summary(&order),
            vec![
                "Order:   BHRT-1718000000",
                "Status:  pending",
                "Total:   ₹2,598.00"
            ]
        );
    }

    #[test]
    fn test_fulfillment_summary_lists_events() {
        let status = FulfillmentStatus {
            order_id: "BHRT-1".to_string(),
            status: "in_transit".to_string(),
            tracking_number: Some("QK123".to_string()),
            estimated_delivery: None,
            last_update: None,
            events: vec![FulfillmentEvent {
                event: "Shipped".to_string(),
                timestamp: Some("2024-06-10T09:00:00".to_string()),
                location: Some("Delhi".to_string()),
            }],
        };
        let lines = fulfillment_summary(&status);
        assert_eq!(lines[2], "Tracking: QK123");
        assert_eq!(lines[3], "  2024-06-10T09:00:00  Shipped (Delhi)");
    }
}
