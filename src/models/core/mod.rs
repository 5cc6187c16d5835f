mod endpoint;
mod record;
mod sale;

pub use endpoint::EndpointConfig;
pub use record::ConstantRecord;
pub use sale::{DerivationRule, SaleDescriptor};
