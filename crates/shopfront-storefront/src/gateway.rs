//! [`CartGateway`] adapter over [`StorefrontClient`].

use shopfront_core::{
    CartGateway, CartIdentity, CartLineInput, CartLineUpdate, CartSnapshot, RemoteError,
};

use crate::client::StorefrontClient;

impl CartGateway for StorefrontClient {
    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<CartSnapshot, RemoteError> {
        Ok(StorefrontClient::create_cart(self, lines).await?)
    }

    async fn get_cart(&self, id: &CartIdentity) -> Result<Option<CartSnapshot>, RemoteError> {
        Ok(StorefrontClient::get_cart(self, id).await?)
    }

    async fn add_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, RemoteError> {
        Ok(StorefrontClient::add_lines(self, id, lines).await?)
    }

    async fn update_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineUpdate],
    ) -> Result<CartSnapshot, RemoteError> {
        Ok(StorefrontClient::update_lines(self, id, lines).await?)
    }

    async fn remove_lines(
        &self,
        id: &CartIdentity,
        line_ids: &[String],
    ) -> Result<CartSnapshot, RemoteError> {
        Ok(StorefrontClient::remove_lines(self, id, line_ids).await?)
    }
}
