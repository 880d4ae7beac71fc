//! Two-phase command exchange over a compiled [`Codec`].
//!
//! [`Codec::call`] encodes the arguments and hands back a [`PendingCall`]. The
//! caller sends [`PendingCall::request`] over its transport and later consumes
//! the call with [`PendingCall::resume`]. Retries, timeouts and multiplexing
//! belong to the transport.

use crate::codec::{as_map, Codec, CodecError, JsonMap};
use crate::command::{CommandBinding, CommandOutput};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request descriptor: `{"method": "Domain.command", "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonMap>,
}

impl Request {
    /// The wire form; `params` is left out when the command takes none.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Value a resumed call completes with.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    Unit,
    Single(Value),
    /// Returns in declaration order.
    Tuple(Vec<Value>),
}

/// A command that has produced its request and waits for exactly one response.
#[derive(Debug)]
pub struct PendingCall<'c> {
    codec: &'c Codec,
    binding: &'c CommandBinding,
    request: Request,
}

impl<'c> PendingCall<'c> {
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Decode the response mapping. Consumes the call: it cannot be resumed twice.
    pub fn resume(self, response: &serde_json::Value) -> Result<CallOutput, CodecError> {
        let output = self.binding.output();
        if let CommandOutput::Unit = output {
            return Ok(CallOutput::Unit);
        }
        let map = as_map(response)?;
        match output {
            CommandOutput::Unit => Ok(CallOutput::Unit),
            CommandOutput::Single(f) => Ok(CallOutput::Single(self.codec.decode_field(f, &map)?)),
            CommandOutput::Tuple(fields) => fields
                .iter()
                .map(|f| self.codec.decode_field(f, &map))
                .collect::<Result<Vec<_>, _>>()
                .map(CallOutput::Tuple),
        }
    }
}

impl Codec {
    /// Start the command `Domain.command` with arguments keyed by wire name.
    ///
    /// Absent optional arguments (missing or [`Value::Absent`]) are left out of
    /// `params`; commands without declared parameters send no `params` at all.
    pub fn call(&self, method: &str, args: &BTreeMap<String, Value>) -> Result<PendingCall<'_>, CodecError> {
        let binding = self.command(method)?;
        let params = self.encode_fields(&binding.parameters, args)?;
        let request = Request {
            method: binding.method.clone(),
            params: binding.has_params.then_some(params),
        };
        Ok(PendingCall {
            codec: self,
            binding,
            request,
        })
    }
}
