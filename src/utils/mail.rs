use async_trait::async_trait;

/// Outbound mail collaborator. Dispatched fire-and-forget after the booking
/// transaction commits; failures are logged, never surfaced to the caller.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_booking_confirmation(&self, email: &str, first_name: &str);
}

/// Default notifier: logs the message instead of talking to an SMTP relay.
/// The real delivery worker lives outside this service.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_booking_confirmation(&self, email: &str, first_name: &str) {
        tracing::info!(
            recipient = %email,
            "Booking confirmation queued: Hello {}, your booking is under process \
             and our team will contact you soon.",
            first_name
        );
    }
}
