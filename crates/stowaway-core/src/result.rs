use crate::error::StowawayError;

pub type Result<T> = std::result::Result<T, StowawayError>;
