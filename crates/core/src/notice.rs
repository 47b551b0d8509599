//! User-facing notifications.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// An item was added to the cart.
    ItemAdded,
    /// The demo checkout form was submitted. No payment is taken.
    DemoOrderCompleted,
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ItemAdded => "Producto añadido al carrito",
            Self::DemoOrderCompleted => {
                "Pedido de demostración completado. Cuando conectemos Stripe, este paso procesará el pago real."
            }
        }
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
