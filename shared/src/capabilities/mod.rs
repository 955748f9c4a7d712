//! Side-effect capabilities.
//!
//! The core never performs I/O itself. Handlers request work through the
//! capabilities below; Crux turns each request into an [`Effect`] for the
//! shell and feeds the shell's answer back as the next [`Event`].

mod http;

pub use crux_core::render::{Render, RenderOperation};
pub use crux_core::Request;
pub use crux_kv::error::KeyValueError;
pub use crux_kv::value::Value;
pub use crux_kv::{KeyValue, KeyValueOperation, KeyValueResponse, KeyValueResult};

pub use self::http::{Http, HttpError, HttpOperation, HttpResponse, HttpResult, ResourcePath};

use crate::event::Event;

/// What a preference read or write hands back to the app: the stored (or,
/// for a write, the previous) value.
pub type KvResult = Result<Option<Vec<u8>>, KeyValueError>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub kv: KeyValue<Event>,
    pub render: Render<Event>,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Http(_) => "http",
            Effect::KeyValue(_) => "key_value",
            Effect::Render(_) => "render",
        }
    }
}
