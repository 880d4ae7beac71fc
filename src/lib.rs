//! # cdpgen: Chrome DevTools Protocol binding compiler
//!
//! Reads the CDP JSON IDL (domains with types, commands and events) and
//! compiles every domain into a strongly typed Rust module.
//!
//! ## Pipeline
//!
//! - **Load**: [`parser::parse`] turns one JSON document into a [`Protocol`],
//!   rejecting versions other than 1.3 and leaves with an ambiguous shape;
//!   [`parser::merge`] joins the browser and JS documents.
//! - **Patch**: [`patch::fix_protocol`] applies the known upstream corrections.
//! - **Compile**: [`domain::compile_protocol`] produces one [`ModulePlan`] per
//!   domain (enums, records, aliases, command bindings, event records and the
//!   computed imports). A failing domain is reported and does not stop the rest.
//! - **Emit**: [`render`] turns plans into source, [`emit::write_package`]
//!   writes the package (`mod.rs`, `util.rs`, one file per domain).
//!
//! ## Mapping
//!
//! - `boolean`, `integer`, `number`, `string` → `bool`, `i64`, `f64`, `String`
//! - `object` without properties → `util::JsonMap`, `any` → `serde_json::Value`
//! - `array` → `Vec<T>`, optional → `Option<T>`
//! - enum types → Rust enums; object types → structs; other types → newtypes
//! - commands → `fn name(..) -> util::Command<T>`, events → structs implementing `util::Event`
//!
//! ## Running compiled plans
//!
//! [`Codec`] executes the same encode/decode rules over a dynamic [`Value`],
//! [`Codec::call`] drives the two-phase command exchange and
//! [`frame::decode_notifications`] decodes a batch of incoming events.
//!
//! ## Example
//!
//! ```
//! let doc = r#"{"version": {"major": "1", "minor": "3"}, "domains": [
//!     {"domain": "DOM", "types": [{"id": "NodeId", "type": "integer"}]}]}"#;
//! let protocol = cdpgen::parse(doc).expect("valid schema");
//! let report = cdpgen::compile_protocol(&protocol);
//! assert!(report.is_complete());
//! let source = cdpgen::render::render_module(&report.modules[0]);
//! assert!(source.contains("pub struct NodeId(pub i64);"));
//! ```

pub mod ast;
pub mod call;
pub mod codec;
pub mod command;
pub mod decl;
pub mod domain;
pub mod emit;
pub mod error;
pub mod event;
pub mod frame;
pub mod lint;
pub mod naming;
pub mod parser;
pub mod patch;
pub mod render;
pub mod resolve;
pub mod shape;
pub mod value;

pub use ast::Protocol;
pub use call::{CallOutput, PendingCall, Request};
pub use codec::{Codec, CodecError};
pub use domain::{compile_protocol, CompileContext, CompileReport, ModulePlan};
pub use error::CompileError;
pub use frame::{decode_notifications, NotificationBatch};
pub use parser::parse;
pub use value::Value;
