use log::{debug, info};

use crate::fill::error::FillError;
use crate::fill::prices::Prices;
use crate::fill::{FillContext, FillModel};
use crate::order::{Direction, FillStatus, Order, OrderEvent, OrderType};
use crate::security::Security;

fn set_filled(event: &mut OrderEvent, order: &Order, price: f64) {
    event.status = FillStatus::Filled;
    event.fill_price = price;
    event.fill_quantity = order.quantity;
    info!(
        "FILL: Filled {:?} {} order for {:?} {} at {:?}",
        order.direction(),
        order.order_type.name(),
        order.quantity,
        order.symbol,
        price
    );
}

fn stale_price_message(order: &Order, prices: &Prices) -> String {
    format!(
        "Warning: fill at stale price ({:?}), data for {} ends at {:?} but the order was \
         submitted at {:?}",
        prices.current, order.symbol, prices.end_time, order.submitted
    )
}

// Pending orders only fill on data that ends after they were submitted, otherwise they could fill
// on prices that existed before the order did
fn is_newer_than_order(prices: &Prices, order: &Order) -> bool {
    if prices.end_time <= order.submitted {
        debug!(
            "FILL: Data for {} ends at {:?}, not after order submission at {:?}",
            order.symbol, prices.end_time, order.submitted
        );
        return false;
    }
    true
}

impl FillModel {
    /// Fills at the ask plus slippage for buys, the bid less slippage for sells. Always fills
    /// when the exchange is open, an event priced from data older than the stale price threshold
    /// carries a warning message.
    pub fn market_fill(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        if !matches!(order.order_type, OrderType::Market) {
            return Err(self.unsupported(order));
        }

        let mut event = OrderEvent::unfilled(order, security.local_time);
        if !self.passes_gates(security, order, ctx, Some(false)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        let slip = ctx.slippage.slippage_approximation(security, order);

        let price = match order.direction() {
            Direction::Buy => prices.ask + slip,
            Direction::Sell => prices.bid - slip,
            Direction::Hold => return Ok(event),
        };

        if prices.end_time + ctx.stale_price_threshold < order.submitted {
            event.message = Some(stale_price_message(order, &prices));
        }

        set_filled(&mut event, order, price);
        Ok(self.complete(event, security, ctx))
    }

    /// Buy stops trigger when the bar high exceeds the stop, sell stops when the bar low is
    /// below it. The fill is never better than the stop price.
    pub fn stop_market_fill(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        let OrderType::StopMarket { stop_price } = order.order_type else {
            return Err(self.unsupported(order));
        };

        let mut event = OrderEvent::unfilled(order, security.local_time);
        let extended = ctx.subscriptions.is_extended_market_hours(&order.symbol);
        if !self.passes_gates(security, order, ctx, Some(extended)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        if !is_newer_than_order(&prices, order) {
            return Ok(event);
        }
        let slip = ctx.slippage.slippage_approximation(security, order);

        match order.direction() {
            Direction::Buy => {
                if prices.bar.high > stop_price {
                    set_filled(&mut event, order, stop_price.max(prices.ask + slip));
                }
            }
            Direction::Sell => {
                if prices.bar.low < stop_price {
                    set_filled(&mut event, order, stop_price.min(prices.bid - slip));
                }
            }
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }

    /// Two phases. Until triggered, buys trigger when the bar high exceeds the stop and sells when
    /// the bar low is below it. Once triggered, which persists on the order, the order is a limit
    /// order: buys fill while the last price is below the limit, at the lower of bar high and
    /// limit, sells while the last price is above the limit, at the higher of bar low and limit.
    ///
    /// The bar cannot tell us whether the limit was reached before or after the stop so the worse
    /// bound for the trader is used.
    pub fn stop_limit_fill(
        &self,
        security: &Security,
        order: &mut Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        let OrderType::StopLimit {
            stop_price,
            limit_price,
        } = order.order_type
        else {
            return Err(self.unsupported(order));
        };

        let mut event = OrderEvent::unfilled(order, security.local_time);
        let extended = ctx.subscriptions.is_extended_market_hours(&order.symbol);
        if !self.passes_gates(security, order, ctx, Some(extended)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        if !is_newer_than_order(&prices, order) {
            return Ok(event);
        }

        let stop_hit = match order.direction() {
            Direction::Buy => prices.bar.high > stop_price,
            Direction::Sell => prices.bar.low < stop_price,
            Direction::Hold => false,
        };
        if stop_hit && order.trigger() {
            debug!(
                "FILL: Stop triggered at {:?} for {} order {:?}",
                stop_price, order.symbol, order.order_id
            );
        }

        if !order.is_stop_triggered() {
            return Ok(event);
        }

        match order.direction() {
            Direction::Buy => {
                if security.price < limit_price {
                    set_filled(&mut event, order, prices.bar.high.min(limit_price));
                }
            }
            Direction::Sell => {
                if security.price > limit_price {
                    set_filled(&mut event, order, prices.bar.low.max(limit_price));
                }
            }
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }

    /// Buys fill when the bar low is below the limit, sells when the bar high is above it. The
    /// fill is at the limit or the bar extreme, whichever is worse for the trader.
    pub fn limit_fill(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        let OrderType::Limit { limit_price } = order.order_type else {
            return Err(self.unsupported(order));
        };

        let mut event = OrderEvent::unfilled(order, security.local_time);
        let extended = ctx.subscriptions.is_extended_market_hours(&order.symbol);
        if !self.passes_gates(security, order, ctx, Some(extended)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        if !is_newer_than_order(&prices, order) {
            return Ok(event);
        }

        match order.direction() {
            Direction::Buy => {
                if prices.bar.low < limit_price {
                    set_filled(&mut event, order, prices.bar.high.min(limit_price));
                }
            }
            Direction::Sell => {
                if prices.bar.high > limit_price {
                    set_filled(&mut event, order, prices.bar.low.max(limit_price));
                }
            }
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }

    /// Waits for the trigger price to be touched, buys when the bar low reaches it and sells when
    /// the bar high does, then behaves like a limit order against the current side price.
    pub fn limit_if_touched_fill(
        &self,
        security: &Security,
        order: &mut Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        let OrderType::LimitIfTouched {
            trigger_price,
            limit_price,
        } = order.order_type
        else {
            return Err(self.unsupported(order));
        };

        let mut event = OrderEvent::unfilled(order, security.local_time);
        let extended = ctx.subscriptions.is_extended_market_hours(&order.symbol);
        if !self.passes_gates(security, order, ctx, Some(extended)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        if !is_newer_than_order(&prices, order) {
            return Ok(event);
        }

        let touched = match order.direction() {
            Direction::Buy => prices.bar.low <= trigger_price,
            Direction::Sell => prices.bar.high >= trigger_price,
            Direction::Hold => false,
        };
        if touched && order.trigger() {
            debug!(
                "FILL: Trigger touched at {:?} for {} order {:?}",
                trigger_price, order.symbol, order.order_id
            );
        }

        if !order.is_stop_triggered() {
            return Ok(event);
        }

        match order.direction() {
            Direction::Buy => {
                if prices.current < limit_price {
                    set_filled(&mut event, order, prices.bar.high.min(limit_price));
                }
            }
            Direction::Sell => {
                if prices.current > limit_price {
                    set_filled(&mut event, order, prices.bar.low.max(limit_price));
                }
            }
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }

    /// Fills at the bar open once the local time reaches the first regular open after the order
    /// was submitted, so an order placed during a session waits for the next one. The data must be
    /// newer than the order.
    pub fn market_on_open_fill(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        if !matches!(order.order_type, OrderType::MarketOnOpen) {
            return Err(self.unsupported(order));
        }
        self.check_supported(order)?;

        let mut event = OrderEvent::unfilled(order, security.local_time);
        if !self.passes_gates(security, order, ctx, Some(false)) {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        if !is_newer_than_order(&prices, order) {
            return Ok(event);
        }

        let waiting = match ctx.exchange.next_market_open(order.submitted, false) {
            Some(open) => security.local_time < open,
            //Continuous venues never open, the order waits for the next date
            None => order.submitted.is_same_date(&security.local_time),
        };
        if waiting {
            debug!(
                "FILL: Market on open for {} waiting for the first open after {:?}",
                order.symbol, order.submitted
            );
            return Ok(event);
        }

        let slip = ctx.slippage.slippage_approximation(security, order);
        match order.direction() {
            Direction::Buy => set_filled(&mut event, order, prices.bar.open + slip),
            Direction::Sell => set_filled(&mut event, order, prices.bar.open - slip),
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }

    /// Fills at the close once the local time reaches the first regular close after the order
    /// was submitted. This is the one order type that fills while the exchange is closed.
    pub fn market_on_close_fill(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        if !matches!(order.order_type, OrderType::MarketOnClose) {
            return Err(self.unsupported(order));
        }
        self.check_supported(order)?;

        let mut event = OrderEvent::unfilled(order, security.local_time);
        if !self.passes_gates(security, order, ctx, None) {
            return Ok(event);
        }

        let Some(next_close) = ctx.exchange.next_market_close(order.submitted, false) else {
            debug!("FILL: No session close for {}, cannot fill market on close", order.symbol);
            return Ok(event);
        };
        if security.local_time < next_close {
            return Ok(event);
        }

        let prices = self
            .resolver
            .resolve(security, ctx.subscriptions, order.direction())?;
        let slip = ctx.slippage.slippage_approximation(security, order);

        if prices.end_time + ctx.stale_price_threshold < next_close {
            event.message = Some(stale_price_message(order, &prices));
        }

        match order.direction() {
            Direction::Buy => set_filled(&mut event, order, prices.bar.close + slip),
            Direction::Sell => set_filled(&mut event, order, prices.bar.close - slip),
            Direction::Hold => {}
        }
        Ok(self.complete(event, security, ctx))
    }
}
