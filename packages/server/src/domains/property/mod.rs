//! Property domain - query interpretation, listing search, locality trends,
//! and reply assembly.

pub mod assembler;
pub mod interpreter;
pub mod listings;
pub mod prompts;
pub mod trends;
pub mod types;

pub use assembler::{AssemblerFlags, ReplyError, ResponseAssembler};
pub use types::{
    LocationTrend, LocationsResponse, PropertiesResponse, PropertyCategory, PropertyRecord,
    PropertyType, SearchParameters,
};
