//! Line-based recipient list format.
//!
//! One recipient per line, `address` or `address,amount`. Blank lines and lines starting
//! with `#` are skipped, and a first data line whose first column is not an address is
//! taken as a column header. A leading byte order mark is ignored.

use strata_core::base::{AddressError, AmountError, TokenAmount, WalletAddress};
use strata_core::schema::recipient::Recipient;
use thiserror::Error;

/// Errors raised while parsing a recipient list.
#[derive(Error, Debug, PartialEq)]
pub enum RecipientsError {
    /// The address column cannot be parsed.
    #[error("{file}:{line}: {source}")]
    InvalidAddress {
        /// Name of the list being parsed.
        file: String,
        /// 1-based line number.
        line: usize,
        /// Underlying address error.
        source: AddressError,
    },

    /// The amount column cannot be parsed with the distribution's decimals.
    #[error("{file}:{line}: invalid amount: {source}")]
    InvalidAmount {
        /// Name of the list being parsed.
        file: String,
        /// 1-based line number.
        line: usize,
        /// Underlying amount error.
        source: AmountError,
    },

    /// More than two columns.
    #[error("{file}:{line}: expected `address[,amount]`, found {columns} columns")]
    TooManyColumns {
        /// Name of the list being parsed.
        file: String,
        /// 1-based line number.
        line: usize,
        /// Number of columns found.
        columns: usize,
    },
}

/// Parse a recipient list.
///
/// `file` only labels errors. Amounts are read as human-readable values with `decimals`
/// fractional digits. Duplicate addresses are left for the tree builder to reject.
///
/// # Errors
/// Returns the first malformed line.
pub fn parse_recipients(
    text: &str,
    decimals: u8,
    file: &str,
) -> Result<Vec<Recipient>, RecipientsError> {
    let mut recipients = Vec::new();
    let mut header_allowed = true;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for (line, raw) in (1_usize..).zip(text.lines()) {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let (address, amount) = match columns.as_slice() {
            [address] => (*address, None),
            [address, amount] => (*address, Some(*amount).filter(|a| !a.is_empty())),
            _ => {
                return Err(RecipientsError::TooManyColumns {
                    file: file.to_owned(),
                    line,
                    columns: columns.len(),
                });
            }
        };

        let parsed = address.parse::<WalletAddress>();
        if std::mem::take(&mut header_allowed) && parsed.is_err() && !is_prefixed(address) {
            continue;
        }

        let address = parsed.map_err(|source| RecipientsError::InvalidAddress {
            file: file.to_owned(),
            line,
            source,
        })?;
        let recipient = match amount {
            Some(amount) => {
                let amount = TokenAmount::parse_units(amount, decimals).map_err(|source| {
                    RecipientsError::InvalidAmount {
                        file: file.to_owned(),
                        line,
                        source,
                    }
                })?;
                Recipient::with_amount(address, amount)
            }
            None => Recipient::new(address),
        };
        recipients.push(recipient);
    }

    Ok(recipients)
}

/// A `0x` column is meant as an address even when malformed.
fn is_prefixed(column: &str) -> bool {
    column.starts_with("0x") || column.starts_with("0X")
}
