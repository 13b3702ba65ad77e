//! In-memory stand-in for the remote cart service.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use shopfront_core::{
    CartCost, CartGateway, CartIdentity, CartLine, CartLineInput, CartLineUpdate, CartSnapshot,
    CartVariant, Money, ProductSummary, RemoteError, UserError,
};

/// Every fake variant costs 10.00 USD.
pub(crate) fn unit_price() -> Decimal {
    Decimal::new(1000, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CallKind {
    Create,
    Get,
    Add,
    Update,
    Remove,
}

#[derive(Debug, Clone)]
struct FakeLine {
    id: String,
    variant_id: String,
    quantity: u32,
}

#[derive(Debug, Default)]
struct Inner {
    carts: HashMap<String, Vec<FakeLine>>,
    next_cart: u32,
    next_line: u32,
    calls: Vec<CallKind>,
    failures: HashMap<CallKind, RemoteError>,
}

impl Inner {
    fn new_line(&mut self, variant_id: &str, quantity: u32) -> FakeLine {
        self.next_line += 1;
        FakeLine {
            id: format!("gid://shopify/CartLine/{}", self.next_line),
            variant_id: variant_id.to_owned(),
            quantity,
        }
    }

    fn add(&mut self, cart_id: &str, lines: &[CartLineInput]) {
        for input in lines {
            let existing = self
                .carts
                .get_mut(cart_id)
                .and_then(|c| c.iter_mut().find(|l| l.variant_id == input.merchandise_id));
            if let Some(line) = existing {
                line.quantity += input.quantity;
            } else {
                let line = self.new_line(&input.merchandise_id, input.quantity);
                self.carts.entry(cart_id.to_owned()).or_default().push(line);
            }
        }
    }
}

/// Simulates the remote cart service. Each call is recorded, then yields to
/// the scheduler before touching state so concurrent callers interleave.
#[derive(Debug, Default)]
pub(crate) struct FakeGateway {
    inner: Mutex<Inner>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Seeds a remote cart, as if created in an earlier session.
    pub(crate) fn insert_cart(&self, cart_id: &str, lines: &[(&str, u32)]) {
        self.with_inner(|inner| {
            inner.carts.insert(cart_id.to_owned(), Vec::new());
            let inputs: Vec<CartLineInput> = lines
                .iter()
                .map(|(variant, quantity)| CartLineInput {
                    merchandise_id: (*variant).to_owned(),
                    quantity: *quantity,
                })
                .collect();
            inner.add(cart_id, &inputs);
        });
    }

    /// Deletes a remote cart, as when it expires or completes checkout.
    pub(crate) fn expire_cart(&self, cart_id: &str) {
        self.with_inner(|inner| {
            inner.carts.remove(cart_id);
        });
    }

    /// Makes the next call of `kind` fail with `error`.
    pub(crate) fn fail_next(&self, kind: CallKind, error: RemoteError) {
        self.with_inner(|inner| {
            inner.failures.insert(kind, error);
        });
    }

    pub(crate) fn calls(&self) -> Vec<CallKind> {
        self.with_inner(|inner| inner.calls.clone())
    }

    pub(crate) fn count(&self, kind: CallKind) -> usize {
        self.with_inner(|inner| inner.calls.iter().filter(|c| **c == kind).count())
    }

    pub(crate) fn cart_count(&self) -> usize {
        self.with_inner(|inner| inner.carts.len())
    }

    async fn enter(&self, kind: CallKind) -> Result<(), RemoteError> {
        self.with_inner(|inner| inner.calls.push(kind));
        tokio::task::yield_now().await;
        match self.with_inner(|inner| inner.failures.remove(&kind)) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn snapshot(&self, cart_id: &str) -> Option<CartSnapshot> {
        self.with_inner(|inner| {
            inner.carts.get(cart_id).map(|lines| {
                let pairs: Vec<(&str, &str, u32)> = lines
                    .iter()
                    .map(|l| (l.id.as_str(), l.variant_id.as_str(), l.quantity))
                    .collect();
                build_snapshot(cart_id, &pairs)
            })
        })
    }

    fn require(&self, cart_id: &CartIdentity) -> Result<(), RemoteError> {
        if self.with_inner(|inner| inner.carts.contains_key(cart_id.as_str())) {
            Ok(())
        } else {
            Err(RemoteError::NotFound(cart_id.clone()))
        }
    }

    fn finish(&self, cart_id: &CartIdentity) -> Result<CartSnapshot, RemoteError> {
        self.snapshot(cart_id.as_str())
            .ok_or_else(|| RemoteError::NotFound(cart_id.clone()))
    }
}

fn unknown_line(line_id: &str) -> RemoteError {
    RemoteError::Validation(vec![UserError {
        field: vec!["lines".to_owned()],
        message: format!("line {line_id} is not in the cart"),
        code: Some("INVALID".to_owned()),
    }])
}

impl CartGateway for FakeGateway {
    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<CartSnapshot, RemoteError> {
        self.enter(CallKind::Create).await?;
        let cart_id = self.with_inner(|inner| {
            inner.next_cart += 1;
            let cart_id = format!("gid://shopify/Cart/fake-{}", inner.next_cart);
            inner.carts.insert(cart_id.clone(), Vec::new());
            inner.add(&cart_id, lines);
            cart_id
        });
        self.finish(&CartIdentity::new(cart_id))
    }

    async fn get_cart(&self, id: &CartIdentity) -> Result<Option<CartSnapshot>, RemoteError> {
        self.enter(CallKind::Get).await?;
        Ok(self.snapshot(id.as_str()))
    }

    async fn add_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineInput],
    ) -> Result<CartSnapshot, RemoteError> {
        self.enter(CallKind::Add).await?;
        self.require(id)?;
        self.with_inner(|inner| inner.add(id.as_str(), lines));
        self.finish(id)
    }

    async fn update_lines(
        &self,
        id: &CartIdentity,
        lines: &[CartLineUpdate],
    ) -> Result<CartSnapshot, RemoteError> {
        self.enter(CallKind::Update).await?;
        self.require(id)?;
        self.with_inner(|inner| {
            let cart = inner.carts.entry(id.as_str().to_owned()).or_default();
            for update in lines {
                let Some(line) = cart.iter_mut().find(|l| l.id == update.line_id) else {
                    return Err(unknown_line(&update.line_id));
                };
                line.quantity = update.quantity;
            }
            cart.retain(|l| l.quantity > 0);
            Ok(())
        })?;
        self.finish(id)
    }

    async fn remove_lines(
        &self,
        id: &CartIdentity,
        line_ids: &[String],
    ) -> Result<CartSnapshot, RemoteError> {
        self.enter(CallKind::Remove).await?;
        self.require(id)?;
        self.with_inner(|inner| {
            let cart = inner.carts.entry(id.as_str().to_owned()).or_default();
            if let Some(missing) = line_ids
                .iter()
                .find(|line_id| !cart.iter().any(|l| &l.id == *line_id))
            {
                return Err(unknown_line(missing));
            }
            cart.retain(|l| !line_ids.contains(&l.id));
            Ok(())
        })?;
        self.finish(id)
    }
}

fn build_snapshot(cart_id: &str, lines: &[(&str, &str, u32)]) -> CartSnapshot {
    let lines: Vec<CartLine> = lines
        .iter()
        .map(|(line_id, variant_id, quantity)| CartLine {
            id: (*line_id).to_owned(),
            quantity: *quantity,
            line_total: Money::new(unit_price() * Decimal::from(*quantity), "USD"),
            variant: CartVariant {
                id: (*variant_id).to_owned(),
                title: "Default Title".to_owned(),
                unit_price: Money::new(unit_price(), "USD"),
                selected_options: Vec::new(),
                available_for_sale: true,
                product: ProductSummary {
                    title: format!("Product {variant_id}"),
                    handle: (*variant_id).to_owned(),
                    image_url: None,
                    image_alt: None,
                },
            },
        })
        .collect();
    let total: Decimal = lines.iter().map(|l| l.line_total.amount).sum();
    CartSnapshot {
        id: CartIdentity::new(cart_id),
        lines,
        cost: CartCost {
            subtotal: Money::new(total, "USD"),
            tax: None,
            total: Money::new(total, "USD"),
        },
        checkout_url: format!("https://shop.test/cart/c/{cart_id}"),
        updated_at: None,
    }
}

/// A snapshot whose line `l` refers to variant `variant-l`.
pub(crate) fn snapshot_with_lines(cart_id: &str, lines: &[(&str, u32)]) -> CartSnapshot {
    let variants: Vec<String> = lines.iter().map(|(id, _)| format!("variant-{id}")).collect();
    let triples: Vec<(&str, &str, u32)> = lines
        .iter()
        .zip(&variants)
        .map(|((id, quantity), variant)| (*id, variant.as_str(), *quantity))
        .collect();
    build_snapshot(cart_id, &triples)
}
