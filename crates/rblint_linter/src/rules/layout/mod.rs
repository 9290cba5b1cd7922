//! Layout rules: whitespace and formatting of otherwise valid code.

pub mod common;
pub mod space_around_equals_in_parameter_default;

pub use space_around_equals_in_parameter_default::SpaceAroundEqualsInParameterDefault;
