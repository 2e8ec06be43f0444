//! Orders as seen by the fill models and the events the fill models return.
//!
//! Orders are owned by the surrounding system. The only thing a fill model ever changes on an
//! order is moving it from [OrderStatus::Pending] to [OrderStatus::Triggered] when a stop or
//! touch price is hit.
use serde::{Deserialize, Serialize};

use crate::clock::DateTime;

pub type OrderId = u64;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Direction {
    Buy,
    Sell,
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum OrderType {
    Market,
    MarketOnOpen,
    MarketOnClose,
    Limit {
        limit_price: f64,
    },
    StopMarket {
        stop_price: f64,
    },
    StopLimit {
        stop_price: f64,
        limit_price: f64,
    },
    /// Turns into a limit order once price touches the trigger price.
    LimitIfTouched {
        trigger_price: f64,
        limit_price: f64,
    },
}

impl OrderType {
    pub fn name(&self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::MarketOnOpen => "MarketOnOpen",
            OrderType::MarketOnClose => "MarketOnClose",
            OrderType::Limit { .. } => "Limit",
            OrderType::StopMarket { .. } => "StopMarket",
            OrderType::StopLimit { .. } => "StopLimit",
            OrderType::LimitIfTouched { .. } => "LimitIfTouched",
        }
    }
}

/// Lifecycle of an order.
///
/// `Triggered` is only reachable from `Pending` and is never left except by filling or canceling,
/// so once a stop-limit has been stopped it remains a live limit order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum OrderStatus {
    Pending,
    Triggered,
    Filled,
    Canceled,
}

impl OrderStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Triggered)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Order {
    pub order_id: Option<OrderId>,
    pub symbol: String,
    pub quantity: f64,
    pub order_type: OrderType,
    pub submitted: DateTime,
    status: OrderStatus,
}

impl Order {
    pub fn new(
        symbol: impl Into<String>,
        quantity: f64,
        order_type: OrderType,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Self {
            order_id: None,
            symbol: symbol.into(),
            quantity,
            order_type,
            submitted: submitted.into(),
            status: OrderStatus::Pending,
        }
    }

    pub fn market(
        symbol: impl Into<String>,
        quantity: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(symbol, quantity, OrderType::Market, submitted)
    }

    pub fn market_on_open(
        symbol: impl Into<String>,
        quantity: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(symbol, quantity, OrderType::MarketOnOpen, submitted)
    }

    pub fn market_on_close(
        symbol: impl Into<String>,
        quantity: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(symbol, quantity, OrderType::MarketOnClose, submitted)
    }

    pub fn limit(
        symbol: impl Into<String>,
        quantity: f64,
        limit_price: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(symbol, quantity, OrderType::Limit { limit_price }, submitted)
    }

    pub fn stop_market(
        symbol: impl Into<String>,
        quantity: f64,
        stop_price: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(symbol, quantity, OrderType::StopMarket { stop_price }, submitted)
    }

    pub fn stop_limit(
        symbol: impl Into<String>,
        quantity: f64,
        stop_price: f64,
        limit_price: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(
            symbol,
            quantity,
            OrderType::StopLimit {
                stop_price,
                limit_price,
            },
            submitted,
        )
    }

    pub fn limit_if_touched(
        symbol: impl Into<String>,
        quantity: f64,
        trigger_price: f64,
        limit_price: f64,
        submitted: impl Into<DateTime>,
    ) -> Self {
        Order::new(
            symbol,
            quantity,
            OrderType::LimitIfTouched {
                trigger_price,
                limit_price,
            },
            submitted,
        )
    }

    pub fn with_order_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn direction(&self) -> Direction {
        if self.quantity > 0.0 {
            Direction::Buy
        } else if self.quantity < 0.0 {
            Direction::Sell
        } else {
            Direction::Hold
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_stop_triggered(&self) -> bool {
        self.status == OrderStatus::Triggered
    }

    /// Returns true if the order moved into [OrderStatus::Triggered].
    pub fn trigger(&mut self) -> bool {
        if self.status == OrderStatus::Pending {
            self.status = OrderStatus::Triggered;
            return true;
        }
        false
    }

    pub fn fill(&mut self) -> bool {
        if self.status.is_open() {
            self.status = OrderStatus::Filled;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) -> bool {
        if self.status.is_open() {
            self.status = OrderStatus::Canceled;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum FillStatus {
    None,
    PartiallyFilled,
    Filled,
    Canceled,
}

/// Result of a single fill evaluation. Created fresh on every evaluation and never retained by the
/// fill model.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrderEvent {
    pub order_id: Option<OrderId>,
    pub symbol: String,
    pub date: DateTime,
    pub status: FillStatus,
    pub fill_price: f64,
    pub fill_quantity: f64,
    pub message: Option<String>,
    pub fee: f64,
}

impl OrderEvent {
    pub fn unfilled(order: &Order, date: DateTime) -> Self {
        Self {
            order_id: order.order_id,
            symbol: order.symbol.clone(),
            date,
            status: FillStatus::None,
            fill_price: 0.0,
            fill_quantity: 0.0,
            message: None,
            fee: 0.0,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self.status, FillStatus::Filled | FillStatus::PartiallyFilled)
    }

    pub fn with_fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, FillStatus, Order, OrderEvent, OrderStatus};

    #[test]
    fn test_that_direction_follows_quantity_sign() {
        assert_eq!(Order::market("ABC", 10.0, 100).direction(), Direction::Buy);
        assert_eq!(Order::market("ABC", -10.0, 100).direction(), Direction::Sell);
        assert_eq!(Order::market("ABC", 0.0, 100).direction(), Direction::Hold);
    }

    #[test]
    fn test_that_triggered_order_cannot_return_to_pending() {
        let mut order = Order::stop_limit("ABC", 10.0, 101.0, 102.0, 100);
        assert!(order.trigger());
        assert!(order.is_stop_triggered());
        assert!(!order.trigger());
        assert_eq!(order.status(), OrderStatus::Triggered);

        assert!(order.fill());
        assert!(!order.trigger());
        assert!(!order.cancel());
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn test_that_canceled_order_cannot_trigger() {
        let mut order = Order::stop_market("ABC", 10.0, 101.0, 100);
        assert!(order.cancel());
        assert!(!order.trigger());
        assert!(!order.fill());
        assert_eq!(order.status(), OrderStatus::Canceled);
    }

    #[test]
    fn test_that_unfilled_event_is_zeroed() {
        let order = Order::market("ABC", 10.0, 100).with_order_id(7);
        let event = OrderEvent::unfilled(&order, 101.into());
        assert_eq!(event.status, FillStatus::None);
        assert_eq!(event.order_id, Some(7));
        assert_eq!(event.fill_price, 0.0);
        assert_eq!(event.fill_quantity, 0.0);
        assert_eq!(event.fee, 0.0);
        assert!(!event.is_fill());
        assert_eq!(event.with_fee(1.5).fee, 1.5);
    }
}
