//! Payment gateway listing.

// self
use crate::{
	_prelude::*,
	client::{Client, Page},
	http::{HttpClient, TransportErrorMapper},
	obs::Operation,
	resources::GatewayInfo,
};

/// Path of the gateway collection.
pub const GATEWAYS_PATH: &str = "/gateways";

/// Gateway configured on the vault.
pub type Gateway = GatewayInfo;

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the gateways configured on the vault (first page only).
	pub async fn get_gateways(&self) -> Result<Page<Gateway>> {
		self.call(Operation::GetGateways, self.get(GATEWAYS_PATH)).await
	}
}
