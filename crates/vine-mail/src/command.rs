// command.rs — The encoded address protocol.
//
// Grammar (local-part, case-insensitive, domain ignored):
//
//   start-command = "start" *anything
//   share-command = "share" *anything-before-plus "+" transaction-id
//   transaction-id = 1*( any character except "@" )
//
// Both directions live here: parse_command() for inbound routing,
// share_address() for outbound composition. The format must stay
// bit-exact — share+<id>@<domain> — because links minted by the reshare
// generator re-enter the router verbatim.
//
// Parsing is deliberately lenient. Mail clients in the field already
// produce these addresses; a stricter grammar would bounce real
// traffic. A "share" local-part with no extractable id is a
// MalformedAddress the caller logs and swallows.

use thiserror::Error;

use crate::message::Address;

/// A command recognized in an envelope address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailCommand {
    /// Challenge creation — recipient local-part starts with `start`.
    Start,

    /// Reshare recording — bcc local-part starts with `share`, with the
    /// transaction id between the first `+` and the `@`.
    Share { transaction_id: String },
}

/// A command-shaped address that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedAddress {
    /// Not a command address at all (no `start`/`share` prefix, or no
    /// local part). Routed as unroutable, not an error.
    #[error("address {0} carries no command")]
    NoCommand(String),

    /// `share` prefix without an extractable transaction id.
    #[error("share address {0} has no transaction id")]
    MissingTransactionId(String),
}

/// Format the share command address for a transaction.
///
/// The wire contract: `share+<transaction-id>@<domain>`, no escaping
/// beyond what email addressing already requires.
pub fn share_address(transaction_id: &str, domain: &str) -> String {
    format!("share+{}@{}", transaction_id, domain)
}

/// Decode a command from one envelope address.
pub fn parse_command(address: &Address) -> Result<MailCommand, MalformedAddress> {
    let Some(local) = address.local_part() else {
        return Err(MalformedAddress::NoCommand(address.address.clone()));
    };

    if local.starts_with("start") {
        return Ok(MailCommand::Start);
    }

    if local.starts_with("share") {
        // The id sits between the first '+' and the '@' (already
        // stripped by local_part). Empty or absent id is malformed.
        let transaction_id = local
            .split_once('+')
            .map(|(_, id)| id.to_string())
            .filter(|id| !id.is_empty());
        return match transaction_id {
            Some(transaction_id) => Ok(MailCommand::Share { transaction_id }),
            None => Err(MalformedAddress::MissingTransactionId(
                address.address.clone(),
            )),
        };
    }

    Err(MalformedAddress::NoCommand(address.address.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_prefix_routes_case_insensitively() {
        assert_eq!(
            parse_command(&Address::new("start@redb.ai")).unwrap(),
            MailCommand::Start
        );
        assert_eq!(
            parse_command(&Address::new("START@redb.ai")).unwrap(),
            MailCommand::Start
        );
        assert_eq!(
            parse_command(&Address::new("start+anything@redb.ai")).unwrap(),
            MailCommand::Start
        );
    }

    #[test]
    fn share_address_extracts_the_transaction_id() {
        assert_eq!(
            parse_command(&Address::new("share+abc123@redb.ai")).unwrap(),
            MailCommand::Share {
                transaction_id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn share_without_plus_is_malformed() {
        let result = parse_command(&Address::new("shared@redb.ai"));
        assert!(matches!(
            result,
            Err(MalformedAddress::MissingTransactionId(_))
        ));
    }

    #[test]
    fn share_with_empty_id_is_malformed() {
        let result = parse_command(&Address::new("share+@redb.ai"));
        assert!(matches!(
            result,
            Err(MalformedAddress::MissingTransactionId(_))
        ));
    }

    #[test]
    fn unrelated_address_is_no_command() {
        let result = parse_command(&Address::new("hello@redb.ai"));
        assert!(matches!(result, Err(MalformedAddress::NoCommand(_))));
    }

    #[test]
    fn format_and_parse_round_trip_bit_exact() {
        let formatted = share_address("tx-42", "redb.ai");
        assert_eq!(formatted, "share+tx-42@redb.ai");
        assert_eq!(
            parse_command(&Address::new(formatted)).unwrap(),
            MailCommand::Share {
                transaction_id: "tx-42".to_string()
            }
        );
    }
}
