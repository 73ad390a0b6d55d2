pub mod assignment;
pub mod bucket;
pub mod calendar;
pub mod config;
pub mod draw_source;
pub mod eligibility;
pub mod expiry;
pub mod generator;
pub mod persistence;
pub mod render;
pub mod roster;
#[cfg(feature = "cli")]
pub mod telemetry;

pub use assignment::{AssignmentRow, AssignmentSlot, DrawSchedule, ScheduleSummary};
pub use bucket::BucketStore;
pub use calendar::{Week, WeekRange, monday_anchor};
pub use config::{ConfigError, DrawConfig, RosterLayout};
pub use draw_source::{DrawSource, RngSource};
pub use eligibility::EligibilityEvaluator;
pub use expiry::{ContractExpiry, ExpiryParse};
pub use generator::{DrawGenerator, generate};
pub use persistence::{
    PersistenceError, load_roster_from_csv, read_roster_csv, save_schedule_to_csv,
    save_schedule_to_json, write_schedule_csv,
};
pub use render::render_text_table;
pub use roster::{Roster, RosterEntry, RosterError, TaskLabel};
