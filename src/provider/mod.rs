pub mod fcm;
pub mod mock;
pub mod provider_trait;
pub mod types;

pub use fcm::FcmProvider;
pub use mock::MockProvider;
pub use provider_trait::PushProvider;
pub use types::{HttpMessage, HttpResponse, XmppMessage, XmppResponse};
