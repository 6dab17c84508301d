use crate::domain::NotificationGateway;

/// Gateway that prints messages to stdout. The default backend for the
/// demo binary; real deployments swap in one that actually delivers.
#[derive(Debug, Default)]
pub struct ConsoleEmailGateway;

impl NotificationGateway for ConsoleEmailGateway {
    fn send_email(&self, to: &str, subject: &str, body: &str) {
        println!("[EMAIL] To: {} | {} | {}", to, subject, body);
    }
}
