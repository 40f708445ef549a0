//! Core types shared by the request builders and the transport.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConsoleRequest`] | Request descriptor: method, route, query, JSON body |
//! | [`ConsoleResponse`] | Parsed console reply |
//! | [`StrEnumParam`] | Argument accepting either a known enum or its raw string |

pub mod param;
pub mod request;
pub mod response;

pub use param::{ParameterScaleParam, StrEnumParam, TrainModeParam};
pub use request::{ConsoleRequest, Extra, HttpMethod, JsonObject};
pub use response::ConsoleResponse;
