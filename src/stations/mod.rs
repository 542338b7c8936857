pub mod error;
pub mod lookup;
pub mod normalize;
pub mod range_parser;
pub mod resolver;
