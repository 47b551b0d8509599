//! Plain-text layout of view models.

use legumechanics_core::{CartSummary, ProductCard};

/// One block per product card.
pub fn grid(cards: &[ProductCard]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{name} · {price}\n  {tag} · {subtitle}\n  {details}\n  {left} · {right}\n  Añadir: lm-cli add {id}",
                name = card.name,
                price = card.price,
                tag = card.tag,
                subtitle = card.subtitle,
                details = card.details,
                left = card.meta_left,
                right = card.meta_right,
                id = card.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Lines, then the empty-state copy if any, then the total.
pub fn summary(summary: &CartSummary) -> String {
    let mut rows: Vec<String> = summary.empty_message.map(str::to_string).into_iter().collect();
    rows.extend(summary.lines.iter().map(|line| {
        format!("{}  {}  {}", line.name, line.quantity_label, line.subtotal)
    }));
    rows.push(format!("Total: {}", summary.total));
    rows.join("\n")
}
