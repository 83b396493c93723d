//! Entry storage shared by the list-ordered policies.

pub(crate) mod linked;

pub(crate) use linked::LinkedStore;
