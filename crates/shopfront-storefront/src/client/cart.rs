//! Cart queries and mutations for `StorefrontClient`.

use serde_json::json;
use shopfront_core::{CartIdentity, CartLineInput, CartLineUpdate, CartSnapshot, UserError};

use crate::error::StorefrontError;
use crate::normalize::{normalize_cart, normalize_user_errors};
use crate::queries;
use crate::types::{
    CartCreateData, CartLinesAddData, CartLinesRemoveData, CartLinesUpdateData,
    CartMutationPayload, CartQueryData,
};

use super::StorefrontClient;

impl StorefrontClient {
    /// Creates a cart, optionally seeded with `lines`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::UserErrors`] if the API rejects the input.
    /// - Any transport or envelope error from the underlying request.
    pub async fn create_cart(
        &self,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, StorefrontError> {
        let variables = json!({ "input": { "lines": line_inputs(lines) } });
        let data: CartCreateData = self
            .execute("cartCreate", queries::CART_CREATE, variables)
            .await?;
        let cart = resolve_mutation("cartCreate", data.cart_create, None)?;
        tracing::info!(cart_id = %cart.id, "created remote cart");
        Ok(cart)
    }

    /// Fetches a cart by id. Returns `Ok(None)` when the id no longer
    /// resolves (expired or already checked out).
    ///
    /// # Errors
    ///
    /// Any transport, envelope, or normalization error.
    pub async fn get_cart(
        &self,
        cart_id: &CartIdentity,
    ) -> Result<Option<CartSnapshot>, StorefrontError> {
        let variables = json!({ "cartId": cart_id.as_str() });
        let data: CartQueryData = self
            .execute("cart", queries::CART_QUERY, variables)
            .await?;
        data.cart.map(normalize_cart).transpose()
    }

    /// Adds lines to an existing cart.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::CartNotFound`] if the cart no longer exists.
    /// - [`StorefrontError::UserErrors`] if the API rejects the lines.
    /// - Any transport or envelope error from the underlying request.
    pub async fn add_lines(
        &self,
        cart_id: &CartIdentity,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, StorefrontError> {
        let variables = json!({ "cartId": cart_id.as_str(), "lines": line_inputs(lines) });
        let data: CartLinesAddData = self
            .execute("cartLinesAdd", queries::CART_LINES_ADD, variables)
            .await?;
        resolve_mutation("cartLinesAdd", data.cart_lines_add, Some(cart_id))
    }

    /// Sets new quantities on existing lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_lines`].
    pub async fn update_lines(
        &self,
        cart_id: &CartIdentity,
        lines: &[CartLineUpdate],
    ) -> Result<CartSnapshot, StorefrontError> {
        let updates: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| json!({ "id": l.line_id, "quantity": l.quantity }))
            .collect();
        let variables = json!({ "cartId": cart_id.as_str(), "lines": updates });
        let data: CartLinesUpdateData = self
            .execute("cartLinesUpdate", queries::CART_LINES_UPDATE, variables)
            .await?;
        resolve_mutation("cartLinesUpdate", data.cart_lines_update, Some(cart_id))
    }

    /// Removes lines by line id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_lines`].
    pub async fn remove_lines(
        &self,
        cart_id: &CartIdentity,
        line_ids: &[String],
    ) -> Result<CartSnapshot, StorefrontError> {
        let variables = json!({ "cartId": cart_id.as_str(), "lineIds": line_ids });
        let data: CartLinesRemoveData = self
            .execute("cartLinesRemove", queries::CART_LINES_REMOVE, variables)
            .await?;
        resolve_mutation("cartLinesRemove", data.cart_lines_remove, Some(cart_id))
    }
}

fn line_inputs(lines: &[CartLineInput]) -> Vec<serde_json::Value> {
    lines
        .iter()
        .map(|l| json!({ "merchandiseId": l.merchandise_id, "quantity": l.quantity }))
        .collect()
}

/// Turns a mutation payload into a snapshot, or the error it reports.
///
/// The API reports an unknown cart id as a user error ("The specified cart
/// does not exist.") or as a null cart with no errors; both become
/// [`StorefrontError::CartNotFound`] when a cart id was supplied.
fn resolve_mutation(
    operation: &str,
    payload: Option<CartMutationPayload>,
    cart_id: Option<&CartIdentity>,
) -> Result<CartSnapshot, StorefrontError> {
    let payload = payload.ok_or_else(|| StorefrontError::GraphQl {
        operation: operation.to_owned(),
        message: "mutation returned no payload".to_owned(),
    })?;

    if !payload.user_errors.is_empty() {
        let errors = normalize_user_errors(payload.user_errors);
        if let Some(id) = cart_id {
            if errors.iter().any(is_missing_cart) {
                return Err(StorefrontError::CartNotFound {
                    cart_id: id.clone(),
                });
            }
        }
        return Err(StorefrontError::UserErrors {
            operation: operation.to_owned(),
            errors,
        });
    }

    match (payload.cart, cart_id) {
        (Some(cart), _) => normalize_cart(cart),
        (None, Some(id)) => Err(StorefrontError::CartNotFound {
            cart_id: id.clone(),
        }),
        (None, None) => Err(StorefrontError::GraphQl {
            operation: operation.to_owned(),
            message: "mutation returned no cart".to_owned(),
        }),
    }
}

/// Whether a user error reports that the cart itself is gone, as opposed to
/// a line or merchandise in the request.
fn is_missing_cart(error: &UserError) -> bool {
    error.field.iter().any(|f| f == "cartId")
        || error
            .message
            .to_ascii_lowercase()
            .contains("cart does not exist")
}
