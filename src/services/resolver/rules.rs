use crate::{
	models::DerivationRule,
	services::{
		blockchain::{BlockChainError, ContractProxy},
		decoder::ValueDecoder,
	},
};

impl DerivationRule {
	/// Computes the display value of this rule against `proxy`.
	///
	/// A call rule naming a method the contract does not declare yields `None`.
	pub async fn derive(
		&self,
		proxy: &ContractProxy,
		decoder: &ValueDecoder,
	) -> Result<Option<String>, BlockChainError> {
		match self {
			Self::Static { value } => Ok(Some(value.clone())),
			Self::Call { method, value_type } => match proxy.call(method).await? {
				Some(raw) => decoder.decode(&raw, *value_type, proxy.handle()).await,
				None => Ok(None),
			},
		}
	}
}
