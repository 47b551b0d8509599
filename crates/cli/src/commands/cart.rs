//! Cart commands: add, buy now, show, count, total.

use legumechanics_core::{
    CartRepository, ProductId, SummaryKind, add_to_cart, buy_now as buy_now_op, cart_count,
    cart_summary, cart_total,
};
use tracing::info;

use super::Context;
use crate::error::CliError;
use crate::render;

fn product_id(raw: &str) -> Result<ProductId, CliError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(CliError::EmptyProductId);
    }
    Ok(ProductId::new(id))
}

/// Add one unit of a product and report the new badge count.
///
/// # Errors
///
/// Returns an error if the id is blank or the cart cannot be saved.
pub fn add(ctx: &Context, raw_id: &str) -> Result<String, CliError> {
    let mut repo = ctx.repo();
    let outcome = add_to_cart(&mut repo, product_id(raw_id)?)?;
    Ok(format!("{}\nCarrito: {}", outcome.notice, outcome.badge))
}

/// Replace the cart with one unit of a product and show the checkout summary.
///
/// # Errors
///
/// Returns an error if the id is blank or the cart cannot be saved.
pub fn buy_now(ctx: &Context, raw_id: &str) -> Result<String, CliError> {
    let mut repo = ctx.repo();
    let outcome = buy_now_op(&mut repo, product_id(raw_id)?)?;
    info!(path = %repo.storage().path().display(), redirect = outcome.redirect, "Cart replaced");

    let summary = cart_summary(SummaryKind::Checkout, &outcome.cart, &ctx.catalog, &ctx.money);
    Ok(render::summary(&summary))
}

/// Show the persisted cart as the mini cart or the checkout summary.
pub fn show(ctx: &Context, checkout: bool) -> String {
    let kind = if checkout {
        SummaryKind::Checkout
    } else {
        SummaryKind::MiniCart
    };
    let cart = ctx.repo().load().into_cart();
    render::summary(&cart_summary(kind, &cart, &ctx.catalog, &ctx.money))
}

/// Badge count of the persisted cart.
pub fn count(ctx: &Context) -> String {
    cart_count(&ctx.repo()).to_string()
}

/// Formatted total of the persisted cart.
pub fn total(ctx: &Context) -> String {
    ctx.money.format(cart_total(&ctx.repo(), &ctx.catalog))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use legumechanics_core::{CART_KEY, KeyValueStore, MoneyFormatter, ProductOrder};

    use super::*;
    use crate::file_store::{FileStore, tests::temp_path};

    fn context() -> Context {
        Context::load(
            temp_path(),
            MoneyFormatter::default(),
            ProductOrder::default(),
            None,
        )
        .unwrap()
    }

    fn cleanup(ctx: &Context) {
        let _ = fs::remove_file(&ctx.store_path);
    }

    #[test]
    fn test_add_persists_between_invocations() {
        let ctx = context();

        let out = add(&ctx, "energy-bar").unwrap();
        assert_eq!(out, "Producto añadido al carrito\nCarrito: 1");
        add(&ctx, "energy-bar").unwrap();
        add(&ctx, "pea-protein").unwrap();

        assert_eq!(count(&ctx), "3");
        assert_eq!(total(&ctx), "29,90\u{a0}€");

        let raw = FileStore::new(&ctx.store_path).get(CART_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"energy-bar","qty":2},{"id":"pea-protein","qty":1}]"#
        );
        cleanup(&ctx);
    }

    #[test]
    fn test_buy_now_replaces_cart() {
        let ctx = context();
        add(&ctx, "pea-protein").unwrap();
        add(&ctx, "pack-legumechanics").unwrap();

        let out = buy_now(&ctx, "energy-bar").unwrap();
        assert!(out.contains("Energy Bar"));
        assert!(out.contains("x1"));
        assert!(out.ends_with("Total: 2,50\u{a0}€"));
        assert_eq!(count(&ctx), "1");
        cleanup(&ctx);
    }

    #[test]
    fn test_show_empty_cart() {
        let ctx = context();
        assert_eq!(show(&ctx, false), "Tu carrito está vacío.\nTotal: 0,00\u{a0}€");
        assert!(show(&ctx, true).starts_with("Tu carrito está vacío. Vuelve"));
    }

    #[test]
    fn test_unknown_ids_count_but_cost_nothing() {
        let ctx = context();
        add(&ctx, "bote500").unwrap();
        add(&ctx, "bote500").unwrap();

        assert_eq!(count(&ctx), "2");
        assert_eq!(total(&ctx), "0,00\u{a0}€");
        assert_eq!(show(&ctx, false), "Total: 0,00\u{a0}€");
        cleanup(&ctx);
    }

    #[test]
    fn test_malformed_slot_loads_empty() {
        let ctx = context();
        FileStore::new(&ctx.store_path)
            .set(CART_KEY, "{not json".to_string())
            .unwrap();

        assert_eq!(count(&ctx), "0");
        assert_eq!(add(&ctx, "energy-bar").unwrap(), "Producto añadido al carrito\nCarrito: 1");
        cleanup(&ctx);
    }

    #[test]
    fn test_blank_id_rejected() {
        let ctx = context();
        assert!(matches!(add(&ctx, "  "), Err(CliError::EmptyProductId)));
    }

    #[test]
    fn test_save_failure_propagates() {
        let ctx = context();
        fs::write(&ctx.store_path, "not a storage file").unwrap();
        assert!(matches!(add(&ctx, "energy-bar"), Err(CliError::CartStore(_))));
        cleanup(&ctx);
    }
}
