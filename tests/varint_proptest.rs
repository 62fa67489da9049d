use cmf_tx::varint;
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrips_any_u64(value: u64) {
        let mut buf = Vec::new();
        let written = varint::encode(value, &mut buf);
        prop_assert_eq!(written, buf.len());
        prop_assert!(buf.len() <= varint::MAX_VARINT_LEN);

        let mut pos = 0;
        let decoded = varint::decode(&buf, &mut pos).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(pos, buf.len());
    }

    #[test]
    fn only_the_last_byte_lacks_the_continuation_bit(value: u64) {
        let mut buf = Vec::new();
        varint::encode(value, &mut buf);
        let (last, rest) = buf.split_last().unwrap();
        prop_assert_eq!(last & 0x80, 0);
        prop_assert!(rest.iter().all(|b| b & 0x80 != 0));
    }

    #[test]
    fn distinct_values_never_share_an_encoding(a: u64, b: u64) {
        prop_assume!(a != b);
        let mut buf_a = Vec::new();
        let mut buf_b = Vec::new();
        varint::encode(a, &mut buf_a);
        varint::encode(b, &mut buf_b);
        prop_assert_ne!(buf_a, buf_b);
    }

    #[test]
    fn garbage_bytes_never_panic_the_decoder(bytes: Vec<u8>) {
        let mut pos = 0;
        let _ = varint::decode(&bytes, &mut pos);
    }
}
