//! Collaborator models consulted by fill models: slippage and minimum price variation. Both are
//! chosen per security by the surrounding system.
pub mod price_variation;
pub mod slippage;
