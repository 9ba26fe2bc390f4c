//! Telephony Adapter - 电话外呼客户端实现

mod fake_telephony_client;
mod twilio_client;

pub use fake_telephony_client::FakeTelephonyClient;
pub use twilio_client::{build_say_twiml, TwilioClient, TwilioClientConfig};
