//! Product grid listing.

use legumechanics_core::product_grid;

use super::Context;
use crate::render;

/// Render the product grid in display order.
pub fn grid(ctx: &Context) -> String {
    render::grid(&product_grid(&ctx.catalog, &ctx.order, &ctx.money))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use legumechanics_core::{MoneyFormatter, ProductOrder};

    use super::*;
    use crate::file_store::tests::temp_path;

    #[test]
    fn test_grid_follows_order() {
        let ctx = Context::load(
            temp_path(),
            MoneyFormatter::default(),
            "pack-legumechanics,bote500,energy-bar".parse().unwrap(),
            None,
        )
        .unwrap();

        let out = grid(&ctx);
        let pack = out.find("Pack Legumechanics").unwrap();
        let bar = out.find("Energy Bar").unwrap();
        assert!(pack < bar);
        assert!(!out.contains("bote500"));
        assert!(out.contains("39,90\u{a0}€"));
    }

    #[test]
    fn test_default_grid_lists_every_product() {
        let ctx = Context::load(
            temp_path(),
            MoneyFormatter::default(),
            ProductOrder::default(),
            None,
        )
        .unwrap();
        assert_eq!(grid(&ctx).matches("Añadir: lm-cli add").count(), 4);
    }
}
