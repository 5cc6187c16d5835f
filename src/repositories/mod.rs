//! Static configuration repositories.

mod error;
mod interface;
mod sale;

pub use error::RepositoryError;
pub use interface::{InterfaceRepository, InterfaceRepositoryTrait};
pub use sale::{SaleRepository, SaleRepositoryTrait};
