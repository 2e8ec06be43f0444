use log::debug;

use crate::models::price_variation::PriceVariationModel;
use crate::order::OrderEvent;
use crate::security::Security;

//Relative tolerance for treating a price as already on a tick
const ON_TICK_TOLERANCE: f64 = 1e-9;

/// Snaps a fill price onto the security's tick grid.
///
/// Buys round to the nearest tick, halves to even. Sells that are not already on a tick always
/// round up to the next tick. Events that are not fills, and securities with no increment, are
/// returned unchanged.
pub fn adjust_to_price_variation(
    mut event: OrderEvent,
    security: &Security,
    model: &dyn PriceVariationModel,
) -> OrderEvent {
    if !event.is_fill() {
        return event;
    }

    let increment = model.minimum_price_variation(security, event.fill_price);
    if increment <= 0.0 {
        return event;
    }

    let quotient = event.fill_price / increment;
    let mut rounded = quotient.round_ties_even();
    let on_tick = (quotient - rounded).abs() <= ON_TICK_TOLERANCE * quotient.abs().max(1.0);

    if event.fill_quantity < 0.0 && !on_tick && rounded < quotient {
        rounded += 1.0;
    }

    let adjusted = rounded * increment;
    if adjusted != event.fill_price {
        debug!(
            "FILL: Adjusted {} fill price from {:?} to {:?} on increment {:?}",
            event.symbol, event.fill_price, adjusted, increment
        );
    }
    event.fill_price = adjusted;
    event
}
