//! Recovers the distributor contract address from a creation transaction receipt.
//!
//! Wallet libraries export receipts in different shapes. Each known shape is a variant of
//! [`EventShape`]; the decoder tries them in order and the first match wins.

use std::str::FromStr as _;

use alloy_primitives::{Address, B256, keccak256};
use serde_json::Value;
use strata_core::base::{AddressError, WalletAddress};
use thiserror::Error;
use tracing::debug;

/// Decoded event argument names that hold the created contract address.
pub const ADDRESS_ARG_NAMES: [&str; 5] = [
    "distributor",
    "airdrop",
    "airdropContract",
    "distributorAddress",
    "propertyContract",
];

/// Receipt decoding errors.
#[derive(Error, Debug, PartialEq)]
pub enum ReceiptError {
    /// The receipt is not a JSON object.
    #[error("Receipt must be a JSON object")]
    NotAnObject,

    /// No known shape yields a contract address.
    #[error("No contract creation event found in receipt")]
    NoCreationEvent,

    /// A matching field holds something that is not a usable address.
    #[error("Receipt field {field} holds an invalid address: {source}")]
    InvalidAddress {
        /// Field the value was read from.
        field: String,
        /// Underlying address error.
        source: AddressError,
    },

    /// A log topic is not a 32-byte hex word.
    #[error("Receipt log topic {0} is not a 32-byte hex word")]
    InvalidTopic(String),
}

/// A receipt shape the created contract address can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventShape {
    /// A log decoded by the wallet library, with one of [`ADDRESS_ARG_NAMES`] in `args`.
    DecodedArgs,
    /// A raw log whose first topic is the event selector and whose second topic is the
    /// indexed contract address.
    IndexedTopic {
        /// `keccak256` of the event signature.
        selector: B256,
    },
    /// The receipt's own `contractAddress`, set when the distributor was deployed directly.
    ContractAddress,
}

impl EventShape {
    /// Indexed-topic shape for an event signature such as `AirdropCreated(address,address)`.
    #[must_use]
    pub fn indexed_topic(signature: &str) -> Self {
        Self::IndexedTopic {
            selector: keccak256(signature.trim().as_bytes()),
        }
    }

    /// Shapes in matching order. Raw topics are only matched when a signature is known.
    #[must_use]
    pub fn defaults(event_signature: Option<&str>) -> Vec<Self> {
        let mut shapes = vec![Self::DecodedArgs];
        shapes.extend(event_signature.map(Self::indexed_topic));
        shapes.push(Self::ContractAddress);
        shapes
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DecodedArgs => "decoded_args",
            Self::IndexedTopic { .. } => "indexed_topic",
            Self::ContractAddress => "contract_address",
        }
    }

    fn extract(&self, receipt: &Value) -> Result<Option<WalletAddress>, ReceiptError> {
        match self {
            Self::DecodedArgs => {
                for log in logs(receipt) {
                    let Some(args) = log.get("args").and_then(Value::as_object) else {
                        continue;
                    };
                    for name in ADDRESS_ARG_NAMES {
                        if let Some(value) = args.get(name).and_then(Value::as_str) {
                            return parse_address(name, value).map(Some);
                        }
                    }
                }
                Ok(None)
            }
            Self::IndexedTopic { selector } => {
                for log in logs(receipt) {
                    let topics: Vec<&str> = log
                        .get("topics")
                        .and_then(Value::as_array)
                        .map(|topics| topics.iter().filter_map(Value::as_str).collect())
                        .unwrap_or_default();
                    let [first, second, ..] = topics.as_slice() else {
                        continue;
                    };
                    if parse_topic(first)? != *selector {
                        continue;
                    }
                    let address = Address::from_word(parse_topic(second)?);
                    return WalletAddress::from_bytes(address.0.0)
                        .map(Some)
                        .map_err(|source| ReceiptError::InvalidAddress {
                            field: "topics[1]".to_owned(),
                            source,
                        });
                }
                Ok(None)
            }
            Self::ContractAddress => receipt
                .get("contractAddress")
                .and_then(Value::as_str)
                .map(|value| parse_address("contractAddress", value))
                .transpose(),
        }
    }
}

/// Decode the created contract address, trying `shapes` in order.
///
/// # Errors
/// Returns [`ReceiptError::NoCreationEvent`] if no shape matches, or the first decoding
/// error of a matching shape.
pub fn decode_creation_address(
    receipt: &Value,
    shapes: &[EventShape],
) -> Result<WalletAddress, ReceiptError> {
    if !receipt.is_object() {
        return Err(ReceiptError::NotAnObject);
    }
    for shape in shapes {
        if let Some(address) = shape.extract(receipt)? {
            debug!(shape = shape.name(), %address, "Decoded creation receipt");
            return Ok(address);
        }
    }
    Err(ReceiptError::NoCreationEvent)
}

/// Logs of a receipt: `logs` as returned by JSON-RPC, or `events` as exported by older
/// wallet libraries.
fn logs(receipt: &Value) -> impl Iterator<Item = &Value> {
    ["logs", "events"]
        .into_iter()
        .filter_map(|key| receipt.get(key).and_then(Value::as_array))
        .flatten()
}

fn parse_address(field: &str, value: &str) -> Result<WalletAddress, ReceiptError> {
    value
        .parse()
        .map_err(|source| ReceiptError::InvalidAddress {
            field: field.to_owned(),
            source,
        })
}

fn parse_topic(topic: &str) -> Result<B256, ReceiptError> {
    B256::from_str(topic).map_err(|_| ReceiptError::InvalidTopic(topic.to_owned()))
}
