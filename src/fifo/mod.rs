pub mod engine;
pub mod lots;

pub use engine::{
    FifoEngine, FifoReport, FifoTotals, MatchSummary, PositionSnapshot, RealizedSale, SaleMatch,
};
pub use lots::{Lot, LotBook, LotDraw, SellOutcome};
