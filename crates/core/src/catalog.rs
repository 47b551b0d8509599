//! The static product catalog.
//!
//! The catalog is configuration: it is built once at start-up (either the
//! built-in Legumechanics range or a JSON file supplied by the deployment)
//! and never mutated afterwards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A product as shown in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Image path relative to the static asset root.
    pub image: String,
    pub name: String,
    /// Short category label shown above the name.
    pub tag: String,
    pub subtitle: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    pub badge: String,
    pub details: String,
    pub meta_left: String,
    pub meta_right: String,
}

/// Read-only mapping from product id to product.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id or a price is negative.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for product in products {
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if map.contains_key(&product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            map.insert(product.id.clone(), product);
        }
        Ok(Self { products: map })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails the
    /// [`Catalog::from_products`] checks.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// The built-in Legumechanics product range.
    #[must_use]
    pub fn builtin() -> Self {
        let products = builtin_products()
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { products }
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    image: &str,
    name: &str,
    tag: &str,
    subtitle: &str,
    price_cents: i64,
    badge: &str,
    details: &str,
    meta: (&str, &str),
) -> Product {
    Product {
        id: ProductId::new(id),
        image: image.to_string(),
        name: name.to_string(),
        tag: tag.to_string(),
        subtitle: subtitle.to_string(),
        price: Decimal::new(price_cents, 2),
        badge: badge.to_string(),
        details: details.to_string(),
        meta_left: meta.0.to_string(),
        meta_right: meta.1.to_string(),
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product(
            "pea-protein",
            "img/proteina.svg",
            "Pea Protein Power",
            "Preentreno",
            "20 g de proteína · 0% lactosa",
            2490,
            "Ideal antes o después de entrenar",
            "Proteína de guisante de alta calidad con perfil aminoacídico optimizado para deportistas. Energía limpia y saciante.",
            ("750 g · 25 servicios aprox.", "Vegano · Sin azúcares añadidos"),
        ),
        product(
            "energy-bar",
            "img/barrita.svg",
            "Energy Bar",
            "Energía",
            "10 g de proteína · Liberación progresiva",
            250,
            "Ideal durante el entreno",
            "Barrita a base de legumbres y avena para mantener tu energía estable durante sesiones largas y exigentes.",
            ("Unidad · Packs disponibles", "Sin aceite de palma"),
        ),
        product(
            "recovery-doybag350",
            "img/doybag350.svg",
            "Recovery Gummies",
            "Recuperación",
            "Electrolitos · Antioxidantes",
            1490,
            "Perfecto post-entreno",
            "Gummies formuladas para reponer minerales y apoyar la recuperación tras entrenos intensos, con sabor ligero y textura suave.",
            ("60 doybag350 por bote", "Sin gelatina animal"),
        ),
        product(
            "pack-legumechanics",
            "img/pack-family.svg",
            "Pack Legumechanics",
            "Pack",
            "Preentreno + energía + recuperación",
            3990,
            "Mejor relación valor / precio",
            "Incluye Pea Protein Power, Energy Bar y Recovery Gummies para cubrir preentreno, durante y postentreno.",
            ("3 productos", "Ideal como suscripción mensual"),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prices() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        let price = |id: &str| catalog.get(&ProductId::new(id)).unwrap().price;
        assert_eq!(price("pea-protein"), Decimal::new(2490, 2));
        assert_eq!(price("energy-bar"), Decimal::new(250, 2));
        assert_eq!(price("recovery-doybag350"), Decimal::new(1490, 2));
        assert_eq!(price("pack-legumechanics"), Decimal::new(3990, 2));
    }

    #[test]
    fn test_unknown_id() {
        assert!(Catalog::builtin().get(&ProductId::new("bote500")).is_none());
    }

    #[test]
    fn test_from_products_rejects_duplicates() {
        let mut products = builtin_products();
        let dup = products.first().cloned().unwrap();
        products.push(dup);
        assert!(matches!(
            Catalog::from_products(products),
            Err(CatalogError::DuplicateId(id)) if id.as_str() == "pea-protein"
        ));
    }

    #[test]
    fn test_from_products_rejects_negative_price() {
        let mut p = builtin_products().remove(0);
        p.price = Decimal::new(-1, 0);
        assert!(matches!(
            Catalog::from_products([p]),
            Err(CatalogError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "oat-shake",
            "image": "img/oat.png",
            "name": "Oat Shake",
            "tag": "Desayuno",
            "subtitle": "Avena",
            "price": "3.20",
            "badge": "Nuevo",
            "details": "Batido de avena.",
            "metaLeft": "330 ml",
            "metaRight": "Sin lactosa"
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let shake = catalog.get(&ProductId::new("oat-shake")).unwrap();
        assert_eq!(shake.price, Decimal::new(320, 2));
        assert_eq!(shake.meta_right, "Sin lactosa");
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{}"),
            Err(CatalogError::Json(_))
        ));
    }
}
