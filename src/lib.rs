#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

// Needed for Vec/String.
extern crate alloc;

pub mod diagnostics;
pub mod error;
pub mod fixed;
pub mod message;
pub mod script;
pub mod tag;
pub mod transaction;
pub mod value;
pub mod varint;

pub use diagnostics::{Diagnostics, Warning};
pub use error::{CmfError, StrictViolation};
pub use message::{MessageBuilder, MessageParser, ParseEvent, Sink};
pub use transaction::{Lint, Transaction, TxIn, TxOut};
pub use value::{BorrowedBytes, Value, ValueType};

#[cfg(test)]
mod crate_level_tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn v1_tx_reread_as_v4_preserves_inputs_and_outputs() {
        let mut prev_tx_id = [0u8; 32];
        prev_tx_id[3] = 0x42;
        let v1_tx = Transaction {
            version: 1,
            inputs: alloc::vec![TxIn {
                prev_tx_id,
                prev_index: 0,
                sequence: 0xFFFF_FFFF,
                script: alloc::vec![0x01, 0xAA],
                script_items: alloc::vec![alloc::vec![0xAA]],
            }],
            outputs: alloc::vec![TxOut { value: 12345, script: alloc::vec![0x76, 0xa9] }],
            lock_time: 0,
            coinbase_message: Vec::new(),
        };

        let v4_bytes = v1_tx.write_v4(true);
        let (reread, diagnostics) = Transaction::read(&v4_bytes, Lint::Strict).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(reread.inputs.len(), v1_tx.inputs.len());
        assert_eq!(reread.inputs[0].prev_tx_id, v1_tx.inputs[0].prev_tx_id);
        assert_eq!(reread.outputs, v1_tx.outputs);
    }

    #[test]
    fn unknown_header_version_is_rejected() {
        let bytes = [9u8, 0, 0, 0, 0];
        let err = Transaction::read(&bytes, Lint::Strict).unwrap_err();
        assert_eq!(err, CmfError::UnknownVersion(9));
    }

    #[test]
    fn nonzero_padding_is_rejected() {
        let bytes = [1u8, 0, 1, 0, 0];
        assert!(Transaction::read(&bytes, Lint::Strict).is_err());
    }
}
