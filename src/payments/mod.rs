pub mod stripe;

pub use stripe::{
    Address, CheckoutSession, CustomerDetails, SessionMetadata, StripeEventData, StripeWebhook,
    StripeWebhookEvent, CHECKOUT_SESSION_COMPLETED,
};
