//! Presentation-neutral view models.

pub mod card;
