//! Trading with strangers on the trail.
use rand::Rng;

use crate::catalog::ItemCatalog;
use crate::constants::{
    TRADE_MAX_AMMO, TRADE_MAX_CLOTHES, TRADE_MAX_FOOD_LBS, TRADE_MAX_OXEN, TRADE_MAX_PARTS,
};
use crate::context::GameContext;
use crate::error::SimResult;
use crate::event::describe_items;
use crate::item::{Item, ItemCategory};
use crate::mode::{Mode, ModeType, Transition};
use crate::modes::Notice;

/// A stranger's proposal: the party hands over `give` and receives `receive`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOffer {
    pub give: Item,
    pub receive: Item,
}

impl TradeOffer {
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "A trader offers {} in exchange for {}.",
            describe_items(std::slice::from_ref(&self.receive)),
            describe_items(std::slice::from_ref(&self.give))
        )
    }
}

const fn max_offer(category: ItemCategory) -> u32 {
    match category {
        ItemCategory::Food => TRADE_MAX_FOOD_LBS,
        ItemCategory::Clothes => TRADE_MAX_CLOTHES,
        ItemCategory::Ammo => TRADE_MAX_AMMO,
        ItemCategory::Animal => TRADE_MAX_OXEN,
        ItemCategory::Wheel | ItemCategory::Axle | ItemCategory::Tongue => TRADE_MAX_PARTS,
        ItemCategory::Cash => 0,
    }
}

/// Pick two different tradeable categories and an amount of each.
pub fn generate_offer<R: Rng + ?Sized>(catalog: &ItemCatalog, rng: &mut R) -> Option<TradeOffer> {
    let tradeable: Vec<&Item> = catalog
        .iter()
        .filter(|item| item.category.is_tradeable())
        .collect();
    if tradeable.len() < 2 {
        return None;
    }
    let give_index = rng.gen_range(0..tradeable.len());
    let mut receive_index = rng.gen_range(0..tradeable.len() - 1);
    if receive_index >= give_index {
        receive_index += 1;
    }
    let pick = |item: &Item, rng: &mut R| {
        let amount = rng.gen_range(1..=max_offer(item.category).max(1));
        item.transaction(amount)
    };
    let give = pick(tradeable[give_index], &mut *rng);
    let receive = pick(tradeable[receive_index], &mut *rng);
    Some(TradeOffer { give, receive })
}

pub fn mode(ctx: &mut GameContext) -> SimResult<Mode> {
    let Some(offer) = generate_offer(&ctx.catalog, &mut ctx.rng) else {
        return Mode::builder(ModeType::Trade)
            .initial_state(Notice::closing("Nobody wants to trade today."))
            .build();
    };
    let description = offer.describe();
    Mode::builder(ModeType::Trade)
        .header(move |_| description.clone())
        .choice("Accept", "Accept the trade", move |ctx| {
            let text = if ctx.vehicle.trade(&offer.give, &offer.receive) {
                "It's a deal.".to_string()
            } else {
                format!(
                    "You don't have {} to give.",
                    describe_items(std::slice::from_ref(&offer.give))
                )
            };
            Ok(Transition::to(Notice::closing(text)))
        })
        .choice("Decline", "Decline the trade", |_| Ok(Transition::remove_mode()))
        .choice("Leave", "Move on", |_| Ok(Transition::remove_mode()))
        .build()
}
