//! Outfitting store: buy supplies at catalog prices.
use std::fmt::Write as _;

use crate::catalog::ItemCatalog;
use crate::context::GameContext;
use crate::error::SimResult;
use crate::item::ItemCategory;
use crate::mode::{Mode, ModeType, State, Transition};
use crate::modes::Notice;
use crate::numbers::format_cents;

const STOCK: [(&str, ItemCategory); 7] = [
    ("Food", ItemCategory::Food),
    ("Clothes", ItemCategory::Clothes),
    ("Ammo", ItemCategory::Ammo),
    ("Oxen", ItemCategory::Animal),
    ("Wheels", ItemCategory::Wheel),
    ("Axles", ItemCategory::Axle),
    ("Tongues", ItemCategory::Tongue),
];

pub fn mode(catalog: &ItemCatalog) -> SimResult<Mode> {
    let mut builder = Mode::builder(ModeType::Store)
        .header(store_header)
        .show_keys();
    for (key, category) in STOCK {
        let description = catalog.get(category).map_or_else(
            || key.to_string(),
            |item| format!("{} ({} each)", item.name, format_cents(item.value_cents)),
        );
        builder = builder.choice(key, description, move |_| {
            Ok(Transition::to(Purchase::new(category)))
        });
    }
    builder
        .choice("Leave", "Leave the store", |_| Ok(Transition::remove_mode()))
        .build()
}

fn store_header(ctx: &GameContext) -> String {
    let mut out = format!(
        "General store. You have {} to spend.\n",
        format_cents(ctx.vehicle.spendable_cents())
    );
    for (_, category) in STOCK {
        let _ = write!(out, "{} {}  ", ctx.vehicle.quantity(category), category.unit());
    }
    out.truncate(out.trim_end().len());
    out
}

/// Quantity prompt for one category.
#[derive(Debug)]
struct Purchase {
    category: ItemCategory,
    message: Option<String>,
}

impl Purchase {
    const fn new(category: ItemCategory) -> Self {
        Self {
            category,
            message: None,
        }
    }
}

impl State for Purchase {
    fn render(&self, ctx: &GameContext) -> String {
        let mut out = String::new();
        if let Some(message) = &self.message {
            out.push_str(message);
            out.push('\n');
        }
        let Some(item) = ctx.vehicle.item(self.category) else {
            return out;
        };
        let _ = writeln!(
            out,
            "How many {} of {}? {} each, room for {}, you have {}. Blank line to cancel.",
            self.category.unit(),
            item.name.to_lowercase(),
            format_cents(ctx.catalog.price_cents(self.category)),
            item.room(),
            format_cents(ctx.vehicle.spendable_cents())
        );
        out
    }

    fn on_input(&mut self, input: &str, ctx: &mut GameContext) -> SimResult<Transition> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Transition::ClearState);
        }
        let Ok(requested) = input.parse::<u32>() else {
            self.message = Some(format!("`{input}` is not a number."));
            return Ok(Transition::Stay);
        };
        let room = ctx.vehicle.item(self.category).map_or(0, |item| item.room());
        let quantity = requested.min(room);
        let Some(item) = ctx.catalog.get(self.category) else {
            return Ok(Transition::ClearState);
        };
        let transaction = item.transaction(quantity);
        if quantity == 0 {
            self.message = Some(format!("You cannot carry any more {}.", self.category.unit()));
            return Ok(Transition::Stay);
        }
        if !ctx.vehicle.purchase(&transaction) {
            self.message = Some(format!(
                "That costs {}. You only have {}.",
                format_cents(transaction.total_value_cents()),
                format_cents(ctx.vehicle.spendable_cents())
            ));
            return Ok(Transition::Stay);
        }
        Ok(Transition::to(Notice::new(format!(
            "You bought {quantity} {} for {}.",
            self.category.unit_for(quantity),
            format_cents(transaction.total_value_cents())
        ))))
    }
}
