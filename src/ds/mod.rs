//! Index-stable building blocks for policy metadata.

pub mod frequency_buckets;
pub mod intrusive_list;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
