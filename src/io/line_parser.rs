//! Record parser for raw source lines
//!
//! Turns one raw line into a validated [`TransactionRecord`] or a
//! [`ParseError`] naming the rejection reason. Pure function, no shared
//! state; the caller decides what to do with a rejection (the pipeline logs
//! it and skips the line).
//!
//! # Format
//!
//! `accountId,action,amount` - exactly 3 comma-separated fields, no quoting
//! or escaping support. Fields are whitespace-trimmed before validation.
//! The action keyword is case-insensitive.

use crate::types::{Action, ParseError, TransactionRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse one raw source line into a validated transaction record
///
/// Validation steps, in order; the first failure wins:
/// 1. exactly 3 comma-separated fields, else [`ParseError::Malformed`]
/// 2. field 1 parses as an integer account id, else
///    [`ParseError::BadAccountId`]
/// 3. field 2 is `deposit` or `withdraw` (case-insensitive), else
///    [`ParseError::BadAction`]
/// 4. field 3 parses as a non-negative decimal amount, else
///    [`ParseError::BadAmount`]
pub fn parse_line(line: &str) -> Result<TransactionRecord, ParseError> {
    let mut fields = line.split(',');
    let (id, action, amount) = match (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) {
        (Some(id), Some(action), Some(amount), None) => (id.trim(), action.trim(), amount.trim()),
        _ => return Err(ParseError::Malformed),
    };

    let account = id
        .parse()
        .map_err(|_| ParseError::BadAccountId(id.to_string()))?;

    let action =
        Action::from_token(action).ok_or_else(|| ParseError::BadAction(action.to_string()))?;

    let amount = Decimal::from_str(amount)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .ok_or_else(|| ParseError::BadAmount(amount.to_string()))?;

    Ok(TransactionRecord {
        account,
        action,
        amount,
    })
}
