pub use rassid_core::gateways::payment::{
    CheckoutSession, PaymentGateway, PaymentGatewayError, PaymentStatus,
};

mod http;
mod manual;

pub use self::{http::HttpPaymentGateway, manual::ManualPaymentGateway};
