pub mod panel;
pub mod stat_card;

pub use panel::{draw_lead, draw_notice, draw_panel, draw_table, tone_style};
pub use stat_card::StatCard;
